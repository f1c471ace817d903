/// HTTP server with WebSocket support for a shared table view
use actix_web::{middleware, web, App, Error, HttpRequest, HttpResponse, HttpServer};
use actix_web_actors::ws;
use log::info;

use crate::source::{DataSource, HttpSource};
use crate::state::ViewConfig;
use crate::websocket::{AppState, TableWebSocket};

/// WebSocket endpoint handler
async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let resp = ws::start(TableWebSocket::new(state), &req, stream)?;
    Ok(resp)
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let reducer = state.reducer();
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "loading": reducer.state().is_loading(),
        "records": reducer.dataset().len(),
    }))
}

/// Start the HTTP server with WebSocket support.
///
/// When `data_url` is given the dataset is fetched once in the background;
/// clients connected meanwhile see the loading flag.
pub async fn run_server(
    host: &str,
    port: u16,
    config: ViewConfig,
    data_url: Option<String>,
) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(config));

    info!("TableView WebSocket server");
    info!("WebSocket: ws://{}:{}/ws", host, port);
    info!("Health check: http://{}:{}/health", host, port);

    if let Some(url) = data_url {
        let state = state.clone();
        state.begin_fetch();
        actix_web::rt::spawn(async move {
            let source = HttpSource::new(url);
            info!("Fetching dataset from {}", source.url());
            let result = source.fetch().await;
            state.finish_fetch(result);
        });
    }

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            // CORS for development
            .wrap(
                actix_cors::Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .route("/ws", web::get().to(ws_index))
            .route("/health", web::get().to(health_check))
    })
    .bind((host, port))?
    .run()
    .await
}

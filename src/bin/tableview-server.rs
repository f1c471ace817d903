/// TableView WebSocket Server
///
/// Serves one shared table view over WebSocket. Clients send intents
/// (sort, filter, paging) and receive the recomputed view.

use log::error;
use std::process::ExitCode;
use tableview::server::run_server;
use tableview::{ColumnConfig, PaginationConfig, ViewConfig, ViewError};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_number(key: &str, default: usize) -> Result<usize, ViewError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ViewError::InvalidConfig(format!("{} must be a number, got '{}'", key, raw))),
        Err(_) => Ok(default),
    }
}

fn load_config() -> Result<(String, u16, ViewConfig, Option<String>), ViewError> {
    let host = env_or("HOST", "127.0.0.1");
    let port = env_number("PORT", 8080)?;
    let port = u16::try_from(port)
        .map_err(|_| ViewError::InvalidConfig(format!("PORT {} is out of range", port)))?;

    let defaults = PaginationConfig::default();
    let pagination = PaginationConfig::new(
        env_number("PAGE_SIZE", defaults.page_size)?,
        env_number("MAX_PAGE_NUMBERS", defaults.max_page_numbers)?,
    )?;
    let config = ViewConfig::new(ColumnConfig::default(), pagination)?;

    let data_url = std::env::var("DATA_URL").ok().filter(|u| !u.is_empty());
    Ok((host, port, config, data_url))
}

#[actix_web::main]
async fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let (host, port, config, data_url) = match load_config() {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run_server(&host, port, config, data_url).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// WebSocket sessions driving a shared table view
use actix::prelude::*;
use actix_web_actors::ws;
use log::{debug, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::error::ViewError;
use crate::messages::{ClientMessage, ServerMessage};
use crate::record::Dataset;
use crate::reducer::ViewReducer;
use crate::source;
use crate::state::ViewConfig;

/// How often heartbeat pings are sent
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
/// How long before lack of client response causes a timeout
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared state for all WebSocket connections.
///
/// Every mutation goes through the one reducer behind the mutex, so intents
/// from different connections are applied one at a time.
pub struct AppState {
    reducer: Arc<Mutex<ViewReducer>>,
    subscribers: Arc<Mutex<Vec<Addr<TableWebSocket>>>>,
}

impl AppState {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            reducer: Arc::new(Mutex::new(ViewReducer::new(config))),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn reducer(&self) -> MutexGuard<'_, ViewReducer> {
        self.reducer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current view as a message
    pub fn view_message(&self) -> ServerMessage {
        ServerMessage::view(&self.reducer())
    }

    /// Subscribe a WebSocket connection to view updates
    pub fn subscribe(&self, addr: Addr<TableWebSocket>) {
        let mut subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|a| a.connected());
        subscribers.push(addr);
    }

    /// Broadcast a message to all subscribers
    pub fn broadcast(&self, msg: ServerMessage) {
        let subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        for addr in subscribers.iter() {
            addr.do_send(BroadcastMessage(msg.clone()));
        }
    }

    /// Raises the loading flag and tells subscribers.
    pub fn begin_fetch(&self) {
        self.reducer().begin_fetch();
        self.broadcast(self.view_message());
    }

    /// Installs a fetch result and tells subscribers.
    pub fn finish_fetch(&self, result: Result<Dataset, ViewError>) {
        {
            let mut reducer = self.reducer();
            source::finish(&mut reducer, result);
        }
        self.broadcast(self.view_message());
    }
}

/// Message to broadcast to clients
#[derive(Message)]
#[rtype(result = "()")]
struct BroadcastMessage(ServerMessage);

/// WebSocket connection actor
pub struct TableWebSocket {
    hb: Instant,
    state: actix_web::web::Data<AppState>,
    subscribed: bool,
}

impl TableWebSocket {
    pub fn new(state: actix_web::web::Data<AppState>) -> Self {
        Self {
            hb: Instant::now(),
            state,
            subscribed: false,
        }
    }

    fn hb(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.hb) > CLIENT_TIMEOUT {
                warn!("WebSocket client heartbeat failed, disconnecting");
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    fn send(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMessage) {
        match serde_json::to_string(msg) {
            Ok(text) => ctx.text(text),
            Err(e) => warn!("Could not serialize server message: {}", e),
        }
    }

    fn handle_client_message(&mut self, msg: ClientMessage, ctx: &mut ws::WebsocketContext<Self>) {
        match msg.intent() {
            None => {
                if msg == ClientMessage::Subscribe && !self.subscribed {
                    self.subscribed = true;
                    self.state.subscribe(ctx.address());
                    Self::send(ctx, &ServerMessage::Subscribed);
                }
                Self::send(ctx, &self.state.view_message());
            }

            Some(intent) => {
                debug!("Applying {:?}", intent);
                let result = {
                    let mut reducer = self.state.reducer();
                    reducer.apply(&intent).map(|_| ServerMessage::view(&reducer))
                };

                match result {
                    // Subscribers, this connection included, get the new view by broadcast
                    Ok(view) if self.subscribed => self.state.broadcast(view),
                    Ok(view) => {
                        Self::send(ctx, &view);
                        self.state.broadcast(view);
                    }
                    Err(e) => Self::send(ctx, &ServerMessage::error(e.to_string())),
                }
            }
        }
    }
}

impl Actor for TableWebSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.hb(ctx);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for TableWebSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                self.hb = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {
                self.hb = Instant::now();
            }
            Ok(ws::Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => {
                    self.handle_client_message(client_msg, ctx);
                }
                Err(e) => {
                    Self::send(ctx, &ServerMessage::error(format!("Invalid message format: {}", e)));
                }
            },
            Ok(ws::Message::Binary(_)) => {
                warn!("Unexpected binary message");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            _ => ctx.stop(),
        }
    }
}

impl Handler<BroadcastMessage> for TableWebSocket {
    type Result = ();

    fn handle(&mut self, msg: BroadcastMessage, ctx: &mut Self::Context) {
        Self::send(ctx, &msg.0);
    }
}

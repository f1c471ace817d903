/// WebSocket message types for client-server communication
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::reducer::{DerivedView, Intent, ViewReducer};
use crate::sort::SortDirective;

/// Messages sent from client to server
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Receive the view after every change
    Subscribe,

    /// Request the current view
    Query,

    ToggleSort { column: String },

    SetFilter { column: String, text: String },

    PreviousPage,

    NextPage,

    GoToPage { page: usize },
}

impl ClientMessage {
    /// The intent carried by this message, if it changes the view.
    pub fn intent(&self) -> Option<Intent> {
        match self {
            ClientMessage::Subscribe | ClientMessage::Query => None,
            ClientMessage::ToggleSort { column } => Some(Intent::ToggleSort {
                column: column.clone(),
            }),
            ClientMessage::SetFilter { column, text } => Some(Intent::SetFilter {
                column: column.clone(),
                text: text.clone(),
            }),
            ClientMessage::PreviousPage => Some(Intent::PreviousPage),
            ClientMessage::NextPage => Some(Intent::NextPage),
            ClientMessage::GoToPage { page } => Some(Intent::GoToPage { page: *page }),
        }
    }
}

/// Messages sent from server to client
#[derive(Debug, Serialize, Clone)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Derived view plus the header state a client needs to draw it
    View {
        view: DerivedView,
        sortable: Vec<String>,
        filterable: Vec<String>,
        sorting: BTreeMap<String, SortDirective>,
        filters: BTreeMap<String, String>,
    },

    /// Subscription confirmed
    Subscribed,

    /// Error occurred
    Error { message: String },
}

impl ServerMessage {
    pub fn view(reducer: &ViewReducer) -> Self {
        let state = reducer.state();
        ServerMessage::View {
            view: reducer.view().clone(),
            sortable: reducer.column_config().sortable.clone(),
            filterable: reducer.column_config().filterable.clone(),
            sorting: state
                .sorting()
                .iter()
                .map(|(c, d)| (c.to_string(), d))
                .collect(),
            filters: state
                .filters()
                .active()
                .map(|(c, v)| (c.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }
}

//! Request handlers.

use axum::extract::State;

use crate::http::state::AppState;

/// Answer any request with the configured greeting.
pub async fn greet(State(state): State<AppState>) -> String {
    state.settings().greeting.clone()
}

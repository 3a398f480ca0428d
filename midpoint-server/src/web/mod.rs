//! Web layer for the midpoint finder.
//!
//! Session-scoped JSON endpoints, HTML fragments for the result panes and
//! the static frontend.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;

mod auth;
pub mod routes;
mod server;
pub use auth::API_KEY_HEADER;
pub use server::{app, serve};
pub mod public;
mod state;
pub use state::AppState;

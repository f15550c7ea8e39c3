//! SAT practice question backend.
//!
//! - Axum HTTP API that turns `{section, topic, difficulty}` into one
//!   generated SAT-style question via the OpenAI Responses API
//! - Static frontend served from `STATIC_DIR`
//! - CORS decoration on every response

pub mod config;
pub mod domain;
pub mod error;
pub mod logic;
pub mod openai;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod util;

pub use config::Settings;
pub use routes::build_router;
pub use state::AppState;

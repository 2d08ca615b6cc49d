//! # cups-api
//!
//! HTTP storefront for the HashiCups demo.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Product menu |
//! | POST | `/buy` | Payment form (form field `product`) |
//! | POST | `/submit` | Process payment (`name`, `number`, `cvv`, `expiry`) |
//! | GET | `/alldata` | Stored transactions, newest first |
//! | GET | `/healthcheck` | `{"status": "healthy", "timestamp": ...}` |

pub mod handlers;
pub mod routes;
pub mod state;
pub mod views;

pub use routes::create_router;
pub use state::{AppConfig, AppState};

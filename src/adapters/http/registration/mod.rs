//! HTTP adapter for user registration endpoints.
//!
//! - `GET /api/users/` - List users with their preferences
//! - `POST /api/users/` - Register a user through the verification service

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{RegistrationApiError, RegistrationAppState};
pub use routes::registration_router;

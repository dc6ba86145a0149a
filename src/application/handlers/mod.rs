//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod registration;

pub use registration::{
    ListUsersHandler, ListUsersQuery, RegisterUserCommand, RegisterUserHandler,
    RegisterUserResult,
};

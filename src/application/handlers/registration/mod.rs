//! Registration command and query handlers.

mod list_users;
mod register_user;

pub use list_users::{ListUsersHandler, ListUsersQuery};
pub use register_user::{RegisterUserCommand, RegisterUserHandler, RegisterUserResult};

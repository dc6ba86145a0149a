//! Registration domain - users, their preferences, and the rules a
//! registration must satisfy before it is sent for verification.

mod errors;
mod preferences;
mod user;
mod values;

pub use errors::RegistrationError;
pub use preferences::{validate_preferences, PreferenceError};
pub use user::{NewUser, Preference, RegisteredUser, User};
pub use values::{EmailAddress, UserName};

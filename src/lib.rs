//! Preference Registry - User registration with verified preferences.
//!
//! Users register with a name, an email, an affiliate flag, and a list of
//! integer preferences. Preferences must be distinct and mix even and odd
//! values. Accepted registrations are forwarded to a remote verification
//! service, whose answer decides the preference labels that get stored.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

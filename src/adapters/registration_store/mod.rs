//! Registration store adapters that need no external services.

mod in_memory;

pub use in_memory::InMemoryRegistrationStore;

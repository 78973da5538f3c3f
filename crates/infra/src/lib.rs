//! Storage adapters for every repository trait: an in-memory store for tests
//! and development, and a PostgreSQL store for persistent deployments.

pub mod store;

pub use store::{Backend, InMemoryStore, PgStore};

#[cfg(test)]
mod integration_tests;

//! Toy module: domain, repository trait, and the in-memory store.

pub mod domain;
pub mod memory;
pub mod repository;

pub use domain::{Toy, ToyFields};
pub use memory::InMemoryToyStore;
pub use repository::ToyRepository;

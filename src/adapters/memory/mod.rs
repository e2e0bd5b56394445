//! In-memory adapters for the durable collaborators.
//!
//! The real record store and flat registry live outside this service; these
//! adapters satisfy the same ports for local runs and tests.

mod flat_directory;
mod visitor_repository;

pub use flat_directory::InMemoryFlatDirectory;
pub use visitor_repository::InMemoryVisitorRepository;

//! In-memory adapters for task lifecycle tests and the default server mode.

mod task;

pub use task::InMemoryTaskRepository;

pub mod config;
pub mod error;

// Query expansion and search core
pub mod mealdb;
pub mod query;
pub mod search;

// Presentation state
pub mod session;

// Command-line interface
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
pub use query::{expand, CandidateQuerySet, QueryExpander};
pub use search::{merge, FailurePolicy, ResultSet, SearchOrchestrator};

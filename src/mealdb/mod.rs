// TheMealDB integration: the external search capability the orchestrator
// fans queries out to.

pub mod client;
pub mod models;

pub use client::MealDbClient;
pub use models::{Ingredient, MealRecord};

use crate::Result;
use std::future::Future;

/// Exact-name recipe lookup.
///
/// "No match" is an empty list, never an error. Transport failures and
/// unparseable responses are errors.
pub trait MealSearch: Send + Sync {
    fn search_by_name(&self, name: &str)
        -> impl Future<Output = Result<Vec<MealRecord>>> + Send;
}

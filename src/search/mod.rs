// Search orchestration: fan a candidate query set out to the search API
// and merge the per-query results into one deduplicated list.

pub mod pagination;

use crate::config::SearchConfig;
use crate::mealdb::{MealRecord, MealSearch};
use crate::query::CandidateQuerySet;
use crate::{Error, Result};
use futures::future::{join_all, try_join_all};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use tracing::{info, warn};

/// What to do when some candidate lookups fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Any failed lookup fails the whole search
    FailFast,
    /// Skip failed lookups; fail only when every lookup failed
    #[default]
    BestEffort,
}

impl FromStr for FailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fail-fast" | "fail_fast" | "failfast" => Ok(FailurePolicy::FailFast),
            "best-effort" | "best_effort" | "besteffort" => Ok(FailurePolicy::BestEffort),
            other => Err(Error::Config(format!("Unknown failure policy: {other}"))),
        }
    }
}

/// Merged search results, unique by meal id, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    meals: Vec<MealRecord>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MealRecord> {
        self.meals.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.meals.iter().position(|meal| meal.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MealRecord> {
        self.meals.iter()
    }

    pub fn as_slice(&self) -> &[MealRecord] {
        &self.meals
    }

    pub fn into_vec(self) -> Vec<MealRecord> {
        self.meals
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a MealRecord;
    type IntoIter = std::slice::Iter<'a, MealRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.meals.iter()
    }
}

/// Concatenate result lists in order, keeping the first record seen for
/// each meal id
pub fn merge<I, L>(lists: I) -> ResultSet
where
    I: IntoIterator<Item = L>,
    L: IntoIterator<Item = MealRecord>,
{
    let mut seen = HashSet::new();
    let meals = lists
        .into_iter()
        .flatten()
        .filter(|meal| seen.insert(meal.id.clone()))
        .collect();
    ResultSet { meals }
}

/// Issues one lookup per candidate query and merges the results
pub struct SearchOrchestrator<S> {
    source: S,
    policy: FailurePolicy,
    skip_empty_queries: bool,
}

impl<S: MealSearch> SearchOrchestrator<S> {
    pub fn new(source: S, config: &SearchConfig) -> Self {
        Self {
            source,
            policy: config.failure_policy,
            skip_empty_queries: config.skip_empty_queries,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_skip_empty_queries(mut self, skip: bool) -> Self {
        self.skip_empty_queries = skip;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Queries that will actually be sent, in candidate order. Blank queries
    /// match every meal upstream, so they are skipped unless enabled.
    fn issued<'q>(&self, queries: &'q CandidateQuerySet) -> Vec<&'q str> {
        queries
            .iter()
            .filter(|q| !(self.skip_empty_queries && q.trim().is_empty()))
            .collect()
    }

    /// Run all lookups concurrently and merge their results
    pub async fn search(&self, queries: &CandidateQuerySet) -> Result<ResultSet> {
        let issued = self.issued(queries);
        info!(
            "Searching: {} lookups for {} candidate queries ({:?})",
            issued.len(),
            queries.len(),
            self.policy
        );

        let lists = match self.policy {
            FailurePolicy::FailFast => {
                try_join_all(issued.iter().map(|q| self.source.search_by_name(q))).await?
            }
            FailurePolicy::BestEffort => self.search_best_effort(&issued).await?,
        };

        let results = merge(lists);
        info!("Search completed: {} unique meals", results.len());
        Ok(results)
    }

    async fn search_best_effort(&self, issued: &[&str]) -> Result<Vec<Vec<MealRecord>>> {
        let outcomes = join_all(issued.iter().map(|q| self.source.search_by_name(q))).await;

        let mut lists = Vec::with_capacity(outcomes.len());
        let mut first_error = None;

        for (query, outcome) in issued.iter().zip(outcomes) {
            match outcome {
                Ok(meals) => lists.push(meals),
                Err(e) => {
                    warn!("Lookup for {:?} failed: {}", query, e.log_safe());
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) if lists.is_empty() => Err(e),
            _ => Ok(lists),
        }
    }
}

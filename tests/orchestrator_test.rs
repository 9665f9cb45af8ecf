use mealsearch::config::SearchConfig;
use mealsearch::mealdb::{MealRecord, MealSearch};
use mealsearch::query::CandidateQuerySet;
use mealsearch::search::{merge, FailurePolicy, SearchOrchestrator};
use mealsearch::{Error, Result};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio_test::{assert_err, assert_ok};

/// In-memory search source that records every query it receives
#[derive(Default)]
struct FakeSearch {
    responses: HashMap<String, Vec<MealRecord>>,
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeSearch {
    fn with(mut self, query: &str, meals: Vec<MealRecord>) -> Self {
        self.responses.insert(query.to_string(), meals);
        self
    }

    fn failing(mut self, query: &str) -> Self {
        self.failing.push(query.to_string());
        self
    }

    fn calls(&self) -> Vec<String> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort();
        calls
    }
}

impl MealSearch for FakeSearch {
    async fn search_by_name(&self, name: &str) -> Result<Vec<MealRecord>> {
        self.calls.lock().unwrap().push(name.to_string());

        if self.failing.iter().any(|q| q == name) {
            return Err(Error::Lookup(format!("HTTP 500 for query {name:?}")));
        }
        Ok(self.responses.get(name).cloned().unwrap_or_default())
    }
}

fn meal(id: &str, name: &str) -> MealRecord {
    serde_json::from_value(json!({"idMeal": id, "strMeal": name})).unwrap()
}

fn config(failure_policy: FailurePolicy) -> SearchConfig {
    SearchConfig {
        failure_policy,
        skip_empty_queries: true,
    }
}

fn ids(results: &mealsearch::ResultSet) -> Vec<&str> {
    results.iter().map(|m| m.id.as_str()).collect()
}

#[tokio::test]
async fn test_results_merge_in_candidate_order() {
    let source = FakeSearch::default()
        .with("chicken curry", vec![meal("2", "Chicken Curry"), meal("1", "Katsu")])
        .with("chicken", vec![meal("3", "Chicken Pie"), meal("2", "Chicken Curry (dup)")])
        .with("curry", vec![meal("1", "Katsu (dup)"), meal("4", "Bean Curry")]);

    let orchestrator = SearchOrchestrator::new(source, &config(FailurePolicy::FailFast));
    let queries: CandidateQuerySet = ["Chicken Curry!", "chicken curry", "curry chicken", "chicken", "curry"]
        .into_iter()
        .collect();

    let results = assert_ok!(orchestrator.search(&queries).await);

    assert_eq!(ids(&results), vec!["2", "1", "3", "4"]);
    assert_eq!(results.get(0).unwrap().display_name(), "Chicken Curry");
    assert_eq!(results.get(1).unwrap().display_name(), "Katsu");
    assert_eq!(orchestrator.source().calls().len(), 5);
}

#[tokio::test]
async fn test_first_query_wins_on_conflicting_records() {
    let source = FakeSearch::default()
        .with("q1", vec![meal("1", "A from Q1")])
        .with("q2", vec![meal("1", "A from Q2")]);

    let orchestrator = SearchOrchestrator::new(source, &config(FailurePolicy::FailFast));
    let queries: CandidateQuerySet = ["q1", "q2"].into_iter().collect();
    let results = assert_ok!(orchestrator.search(&queries).await);

    assert_eq!(results.len(), 1);
    assert_eq!(results.get(0).unwrap().display_name(), "A from Q1");
}

#[tokio::test]
async fn test_identical_records_collapse() {
    let source = FakeSearch::default()
        .with("a", vec![meal("1", "A")])
        .with("b", vec![meal("1", "A")]);

    let orchestrator = SearchOrchestrator::new(source, &config(FailurePolicy::BestEffort));
    let queries: CandidateQuerySet = ["a", "b"].into_iter().collect();
    let results = assert_ok!(orchestrator.search(&queries).await);

    assert_eq!(ids(&results), vec!["1"]);
}

#[tokio::test]
async fn test_no_matches_is_an_empty_result_not_an_error() {
    let orchestrator =
        SearchOrchestrator::new(FakeSearch::default(), &config(FailurePolicy::FailFast));
    let queries: CandidateQuerySet = ["zzzz"].into_iter().collect();

    let results = assert_ok!(orchestrator.search(&queries).await);
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_fail_fast_aborts_on_any_failure() {
    let source = FakeSearch::default()
        .with("good", vec![meal("1", "A")])
        .failing("bad");

    let orchestrator = SearchOrchestrator::new(source, &config(FailurePolicy::FailFast));
    let queries: CandidateQuerySet = ["good", "bad"].into_iter().collect();

    let err = assert_err!(orchestrator.search(&queries).await);
    assert!(err.is_lookup_failure());
}

#[tokio::test]
async fn test_best_effort_keeps_successful_lookups() {
    let source = FakeSearch::default()
        .with("good", vec![meal("1", "A")])
        .failing("bad");

    let orchestrator = SearchOrchestrator::new(source, &config(FailurePolicy::BestEffort));
    let queries: CandidateQuerySet = ["bad", "good"].into_iter().collect();

    let results = assert_ok!(orchestrator.search(&queries).await);
    assert_eq!(ids(&results), vec!["1"]);
}

#[tokio::test]
async fn test_best_effort_fails_when_every_lookup_fails() {
    let source = FakeSearch::default().failing("x").failing("y");
    let orchestrator = SearchOrchestrator::new(source, &config(FailurePolicy::BestEffort));
    let queries: CandidateQuerySet = ["x", "y"].into_iter().collect();

    let err = assert_err!(orchestrator.search(&queries).await);
    assert!(matches!(err, Error::Lookup(_)));
}

#[tokio::test]
async fn test_empty_candidate_is_skipped_by_default() {
    let source = FakeSearch::default().with("", vec![meal("9", "Everything")]);
    let orchestrator = SearchOrchestrator::new(source, &config(FailurePolicy::FailFast));
    let queries: CandidateQuerySet = ["the", ""].into_iter().collect();

    let results = assert_ok!(orchestrator.search(&queries).await);
    assert!(results.is_empty());
    assert_eq!(orchestrator.source().calls(), vec!["the"]);
}

#[tokio::test]
async fn test_whitespace_only_query_is_skipped_by_default() {
    let source = FakeSearch::default().with("   ", vec![meal("9", "Everything")]);
    let orchestrator = SearchOrchestrator::new(source, &config(FailurePolicy::BestEffort));

    let queries = mealsearch::expand("   ");
    assert_eq!(queries.as_slice(), ["   ", ""]);

    let results = assert_ok!(orchestrator.search(&queries).await);
    assert!(results.is_empty());
    assert!(orchestrator.source().calls().is_empty());
}

#[tokio::test]
async fn test_empty_candidate_is_sent_when_enabled() {
    let source = FakeSearch::default().with("", vec![meal("9", "Everything")]);
    let orchestrator = SearchOrchestrator::new(source, &config(FailurePolicy::FailFast))
        .with_skip_empty_queries(false);
    let queries: CandidateQuerySet = ["the", ""].into_iter().collect();

    let results = assert_ok!(orchestrator.search(&queries).await);
    assert_eq!(ids(&results), vec!["9"]);
    assert_eq!(orchestrator.source().calls(), vec!["", "the"]);
}

#[tokio::test]
async fn test_search_of_empty_set_issues_nothing() {
    let orchestrator =
        SearchOrchestrator::new(FakeSearch::default(), &config(FailurePolicy::BestEffort));
    let results = assert_ok!(orchestrator.search(&CandidateQuerySet::new()).await);

    assert!(results.is_empty());
    assert!(orchestrator.source().calls().is_empty());
}

#[test]
fn test_merge_is_idempotent() {
    let once = merge(vec![vec![meal("1", "A"), meal("2", "B")], vec![meal("2", "B")]]);
    let again = merge(vec![once.clone().into_vec(), once.clone().into_vec()]);
    assert_eq!(once, again);
}

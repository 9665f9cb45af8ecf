//! Search session state machine.
//!
//! The session owns what the presentation layer shows: the current view,
//! the page size and the search generation. Every search bumps the
//! generation; a search may only commit its outcome while its generation is
//! still the latest, so a slow earlier search can never overwrite a newer one.

use crate::config::DEFAULT_PAGE_SIZE_OPTIONS;
use crate::mealdb::{MealRecord, MealSearch};
use crate::query::QueryExpander;
use crate::search::pagination::{self, Page};
use crate::search::{ResultSet, SearchOrchestrator};
use crate::utils::validation;
use crate::{Error, Result};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum View {
    Idle,
    Searching {
        query: String,
        generation: u64,
    },
    Results {
        query: String,
        results: ResultSet,
        page: usize,
    },
    Error {
        query: String,
        message: String,
    },
    Detail {
        query: String,
        results: ResultSet,
        page: usize,
        selected: usize,
    },
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Idle => "idle",
            View::Searching { .. } => "searching",
            View::Results { .. } => "results",
            View::Error { .. } => "error",
            View::Detail { .. } => "detail",
        }
    }
}

/// What happened to a finished search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results (or the failure) became the current view
    Committed,
    /// A newer search started meanwhile; the outcome was discarded
    Stale,
}

/// Point-in-time copy of the session for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub view: View,
    pub page_size: usize,
    pub generation: u64,
}

impl Snapshot {
    /// The visible page when showing results
    pub fn page(&self) -> Option<Page<MealRecord>> {
        match &self.view {
            View::Results { results, page, .. } => {
                Some(pagination::paginate(results.as_slice(), *page, self.page_size))
            }
            _ => None,
        }
    }

    /// The selected record when showing a detail view
    pub fn selected(&self) -> Option<&MealRecord> {
        match &self.view {
            View::Detail {
                results, selected, ..
            } => results.get(*selected),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct SessionState {
    generation: u64,
    page_size: usize,
    view: View,
}

#[derive(Debug, Clone)]
pub struct Session {
    state: Arc<RwLock<SessionState>>,
    page_size_options: Arc<[usize]>,
}

impl Session {
    /// Session offering the default page sizes (5, 10 and 25)
    pub fn new(page_size: usize) -> Result<Self> {
        Self::with_page_size_options(page_size, &DEFAULT_PAGE_SIZE_OPTIONS)
    }

    /// Session that only accepts page sizes from `options`
    pub fn with_page_size_options(page_size: usize, options: &[usize]) -> Result<Self> {
        validation::validate_page_size_option(page_size, options)?;
        Ok(Self {
            state: Arc::new(RwLock::new(SessionState {
                generation: 0,
                page_size,
                view: View::Idle,
            })),
            page_size_options: options.into(),
        })
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    pub async fn snapshot(&self) -> Snapshot {
        let state = self.state.read().await;
        Snapshot {
            view: state.view.clone(),
            page_size: state.page_size,
            generation: state.generation,
        }
    }

    /// Enter `Searching` under a fresh generation and return it
    pub async fn begin_search(&self, query: &str) -> u64 {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.view = View::Searching {
            query: query.to_string(),
            generation: state.generation,
        };
        debug!("Search generation {} started for {:?}", state.generation, query);
        state.generation
    }

    /// Commit a finished search if its generation is still current
    pub async fn complete(&self, generation: u64, outcome: Result<ResultSet>) -> SearchOutcome {
        let mut state = self.state.write().await;

        let query = match &state.view {
            View::Searching {
                query,
                generation: current,
            } if *current == generation && state.generation == generation => query.clone(),
            _ => {
                debug!(
                    "Discarding stale search generation {} (current {})",
                    generation, state.generation
                );
                return SearchOutcome::Stale;
            }
        };

        state.view = match outcome {
            Ok(results) => {
                info!("{} results for {:?}", results.len(), query);
                View::Results {
                    query,
                    results,
                    page: 1,
                }
            }
            Err(e) => {
                if e.is_lookup_failure() {
                    warn!("Search for {:?} failed: {}", query, e.log_safe());
                } else {
                    error!("Search for {:?} failed: {}", query, e.log_safe());
                }
                View::Error {
                    query,
                    message: e.to_string(),
                }
            }
        };

        SearchOutcome::Committed
    }

    /// Expand, search and commit in one go. Failures end in the `Error` view.
    pub async fn run_search<S: MealSearch>(
        &self,
        expander: &QueryExpander,
        orchestrator: &SearchOrchestrator<S>,
        raw_query: &str,
    ) -> SearchOutcome {
        let generation = self.begin_search(raw_query).await;
        let candidates = expander.expand(raw_query);
        let outcome = orchestrator.search(&candidates).await;
        self.complete(generation, outcome).await
    }

    pub async fn set_page(&self, page: usize) -> Result<()> {
        let mut state = self.state.write().await;
        let page_size = state.page_size;

        match &mut state.view {
            View::Results {
                results,
                page: current,
                ..
            } => {
                let total = pagination::total_pages(results.len(), page_size);
                if page == 0 || page > total.max(1) {
                    return Err(Error::Validation(format!(
                        "Page {page} is out of range (1-{})",
                        total.max(1)
                    )));
                }
                *current = page;
                Ok(())
            }
            other => Err(invalid("change page", other)),
        }
    }

    pub async fn next_page(&self) -> Result<usize> {
        self.step_page(|page, total| (page + 1).min(total.max(1)))
            .await
    }

    pub async fn prev_page(&self) -> Result<usize> {
        self.step_page(|page, _| page.saturating_sub(1).max(1)).await
    }

    async fn step_page(&self, step: impl FnOnce(usize, usize) -> usize) -> Result<usize> {
        let mut state = self.state.write().await;
        let page_size = state.page_size;

        match &mut state.view {
            View::Results { results, page, .. } => {
                let total = pagination::total_pages(results.len(), page_size);
                *page = step(*page, total);
                Ok(*page)
            }
            other => Err(invalid("change page", other)),
        }
    }

    /// Change the page size. The current page is kept, clamped to the new
    /// page count.
    pub async fn set_page_size(&self, page_size: usize) -> Result<()> {
        validation::validate_page_size_option(page_size, &self.page_size_options)?;

        let mut state = self.state.write().await;
        state.page_size = page_size;

        if let View::Results { results, page, .. } | View::Detail { results, page, .. } =
            &mut state.view
        {
            let total = pagination::total_pages(results.len(), page_size);
            *page = pagination::clamp_page(*page, total);
        }

        Ok(())
    }

    /// Open the record at a 1-based position on the visible page
    pub async fn open(&self, position: usize) -> Result<()> {
        let mut state = self.state.write().await;
        let page_size = state.page_size;

        let index = match &state.view {
            View::Results { results, page, .. } => {
                let range = pagination::page_range(results.len(), *page, page_size);
                let index = range.start + position.saturating_sub(1);
                if position == 0 || !range.contains(&index) {
                    return Err(Error::Validation(format!(
                        "No result at position {position} on this page"
                    )));
                }
                index
            }
            other => return Err(invalid("open a result", other)),
        };

        select_index(&mut state.view, index);
        Ok(())
    }

    /// Open a record of the current results by meal id
    pub async fn select(&self, id: &str) -> Result<()> {
        let mut state = self.state.write().await;

        let index = match &state.view {
            View::Results { results, .. } => results
                .position(id)
                .ok_or_else(|| Error::NotFound(format!("Meal {id} is not in the results")))?,
            other => return Err(invalid("select a result", other)),
        };

        select_index(&mut state.view, index);
        Ok(())
    }

    /// Leave the detail view, back to the results page it was opened from
    pub async fn back(&self) -> Result<()> {
        let mut state = self.state.write().await;

        let view = std::mem::replace(&mut state.view, View::Idle);
        match view {
            View::Detail {
                query,
                results,
                page,
                ..
            } => {
                state.view = View::Results {
                    query,
                    results,
                    page,
                };
                Ok(())
            }
            other => {
                let err = invalid("go back", &other);
                state.view = other;
                Err(err)
            }
        }
    }
}

fn select_index(view: &mut View, index: usize) {
    let current = std::mem::replace(view, View::Idle);
    *view = match current {
        View::Results {
            query,
            results,
            page,
        } => View::Detail {
            query,
            results,
            page,
            selected: index,
        },
        other => other,
    };
}

fn invalid(action: &str, view: &View) -> Error {
    Error::State(format!("cannot {action} while {}", view.name()))
}

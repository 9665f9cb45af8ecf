// Command-line presentation layer

pub mod browse;
pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mealsearch")]
#[command(about = "Search TheMealDB with query expansion", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for meals and print one page of results
    Search {
        /// Free-text search query
        query: String,

        /// Page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Results per page, one of PAGE_SIZE_OPTIONS
        #[arg(long, env = "RESULTS_PER_PAGE")]
        per_page: Option<usize>,

        /// Fail the whole search if any lookup fails
        #[arg(long)]
        fail_fast: bool,

        /// Also send the empty query left by all-stop-word input
        #[arg(long)]
        keep_empty: bool,
    },

    /// Show how a query is expanded into candidate queries
    Expand {
        /// Free-text search query
        query: String,
    },

    /// Show the full details of one meal
    Show {
        /// Meal ID
        id: String,
    },

    /// Interactive search session
    Browse,
}

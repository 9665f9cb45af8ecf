use crate::config::Settings;
use crate::mealdb::{MealDbClient, MealRecord};
use crate::query::{Expansion, QueryExpander};
use crate::search::pagination::{self, Page};
use crate::search::{FailurePolicy, SearchOrchestrator};
use crate::session::{Snapshot, View};
use crate::utils::sanitize::{preview, sanitize_text, truncate};
use crate::utils::validation;
use crate::{Error, Result};
use std::fmt::Write as _;
use tracing::warn;

pub const NO_RESULTS: &str = "There are no results matching your query.";

/// Run one search and print the requested page
pub async fn search(
    settings: &Settings,
    query: &str,
    page: usize,
    per_page: Option<usize>,
    fail_fast: bool,
    keep_empty: bool,
) -> Result<()> {
    let page_size = validation::validate_page_size_option(
        per_page.unwrap_or(settings.pagination.default_page_size),
        &settings.pagination.page_size_options,
    )?;

    let client = MealDbClient::new(&settings.api)?;
    let mut orchestrator = SearchOrchestrator::new(client, &settings.search);
    if fail_fast {
        orchestrator = orchestrator.with_policy(FailurePolicy::FailFast);
    }
    if keep_empty {
        orchestrator = orchestrator.with_skip_empty_queries(false);
    }

    let candidates = QueryExpander::new().expand(query);
    println!("Searching...");
    let results = orchestrator.search(&candidates).await?;

    let total_pages = pagination::total_pages(results.len(), page_size);
    let page_number = pagination::clamp_page(page, total_pages);
    if page_number != page {
        warn!(
            "Page {} is out of range, showing page {} of {}",
            page, page_number, total_pages
        );
    }

    let page = pagination::paginate(results.as_slice(), page_number, page_size);
    print!(
        "{}",
        format_page(&page, settings.pagination.preview_length)
    );

    Ok(())
}

/// Print every step of a query expansion
pub fn expand(query: &str) {
    let expansion = QueryExpander::new().analyze(query);
    print!("{}", format_expansion(&expansion));
}

/// Look up one meal and print its detail view
pub async fn show(settings: &Settings, id: &str) -> Result<()> {
    let client = MealDbClient::new(&settings.api)?;

    let meal = client
        .lookup_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Meal {id} not found")))?;

    print!("{}", format_meal_detail(&meal));
    Ok(())
}

// Rendering

pub fn format_expansion(expansion: &Expansion) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Query:      {:?}", expansion.raw);
    let _ = writeln!(out, "Tokens:     {:?}", expansion.tokens);
    let _ = writeln!(out, "Lemmas:     {:?}", expansion.lemmas);
    let _ = writeln!(out, "Variants:   {:?}", expansion.variants);
    let _ = writeln!(out, "Candidates ({}):", expansion.candidates.len());
    for candidate in &expansion.candidates {
        let _ = writeln!(out, "  {candidate:?}");
    }
    out
}

pub fn format_page(page: &Page<MealRecord>, preview_length: usize) -> String {
    let mut out = String::new();

    if page.total == 0 {
        let _ = writeln!(out, "{NO_RESULTS}");
        return out;
    }

    let _ = writeln!(out, "\nResults ({} meals):\n", page.total);
    let _ = writeln!(
        out,
        "{:<4} {:<7} {:<40} {:<15} {:<15}",
        "#", "ID", "Name", "Category", "Cuisine"
    );
    let _ = writeln!(out, "{}", "-".repeat(83));

    for (position, meal) in page.items.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4} {:<7} {:<40} {:<15} {:<15}",
            position + 1,
            truncate(&meal.id, 7),
            truncate(&sanitize_text(meal.display_name()), 40),
            truncate(&sanitize_text(meal.category().unwrap_or("N/A")), 15),
            truncate(&sanitize_text(meal.area().unwrap_or("N/A")), 15),
        );
        if let Some(instructions) = meal.instructions() {
            let _ = writeln!(out, "     {}", preview(instructions, preview_length));
        }
    }

    let _ = write!(out, "\nPage {} of {}", page.page, page.total_pages);
    match (page.has_previous(), page.has_next()) {
        (true, true) => {
            let _ = write!(out, "  (prev | next)");
        }
        (true, false) => {
            let _ = write!(out, "  (prev)");
        }
        (false, true) => {
            let _ = write!(out, "  (next)");
        }
        (false, false) => {}
    }
    let _ = writeln!(out);
    out
}

pub fn format_meal_detail(meal: &MealRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", sanitize_text(meal.display_name()));
    let _ = writeln!(out, "{}", "=".repeat(meal.display_name().chars().count().min(60)));
    if let Some(thumbnail) = meal.thumbnail.as_deref() {
        let _ = writeln!(out, "Image:    {}", sanitize_text(thumbnail));
    }
    let _ = writeln!(
        out,
        "Category: {}",
        sanitize_text(meal.category().unwrap_or("N/A"))
    );
    let _ = writeln!(
        out,
        "Cuisine:  {}",
        sanitize_text(meal.area().unwrap_or("N/A"))
    );

    let tags = meal.tag_list();
    if !tags.is_empty() {
        let _ = writeln!(out, "Tags:     {}", sanitize_text(&tags.join(", ")));
    }

    let _ = writeln!(out, "\nInstructions:");
    let _ = writeln!(
        out,
        "{}",
        sanitize_text(meal.instructions().unwrap_or("N/A"))
    );

    let _ = writeln!(out, "\nIngredients:");
    for ingredient in meal.ingredients() {
        let _ = writeln!(
            out,
            "  - {} - {}",
            sanitize_text(&ingredient.name),
            sanitize_text(ingredient.measure.as_deref().unwrap_or(""))
        );
    }

    if let Some(youtube) = meal.youtube.as_deref().filter(|s| !s.trim().is_empty()) {
        let _ = writeln!(out, "\nVideo:  {}", sanitize_text(youtube));
    }
    if let Some(source) = meal.source.as_deref().filter(|s| !s.trim().is_empty()) {
        let _ = writeln!(out, "Source: {}", sanitize_text(source));
    }

    out
}

/// Render whatever the session currently shows
pub fn format_snapshot(snapshot: &Snapshot, preview_length: usize) -> String {
    match &snapshot.view {
        View::Idle => "Type `search <text>` to find meals, `help` for commands.\n".to_string(),
        View::Searching { query, .. } => format!("Searching for {query:?}...\n"),
        View::Results { .. } => snapshot
            .page()
            .map(|page| {
                let mut out = format_page(&page, preview_length);
                if page.total > 0 {
                    let _ = writeln!(
                        out,
                        "{} per page. `open <n>` to view a meal.",
                        snapshot.page_size
                    );
                }
                out
            })
            .unwrap_or_default(),
        View::Error { query, message } => {
            format!("Search for {query:?} failed: {}\n", sanitize_text(message))
        }
        View::Detail { .. } => snapshot
            .selected()
            .map(|meal| format!("{}\n`back` to return to results.\n", format_meal_detail(meal)))
            .unwrap_or_default(),
    }
}

// Interactive search session driven from stdin

use crate::cli::commands::format_snapshot;
use crate::config::Settings;
use crate::mealdb::MealDbClient;
use crate::query::QueryExpander;
use crate::search::SearchOrchestrator;
use crate::session::{SearchOutcome, Session};
use crate::{Error, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

const HELP: &str = "\
Commands:
  search <text>   run a new search (alias: s)
  next | prev     move between result pages (alias: n, p)
  page <n>        jump to a result page
  size <n>        change results per page (see below for choices)
  open <n>        show the n-th meal on the current page (alias: o)
  back            return from a meal to the results (alias: b)
  help            show this help
  quit            leave (alias: q)
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    Next,
    Prev,
    Page(usize),
    Size(usize),
    Open(usize),
    Back,
    Help,
    Quit,
}

/// Parse one line of interactive input
pub fn parse_command(line: &str) -> Result<BrowseCommand> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(w, r)| (w, r.trim()))
        .unwrap_or((line, ""));

    let number = |what: &str| -> Result<usize> {
        rest.parse()
            .map_err(|_| Error::Validation(format!("`{what}` needs a number, got {rest:?}")))
    };

    match word.to_lowercase().as_str() {
        "search" | "s" => Ok(BrowseCommand::Search(rest.to_string())),
        "next" | "n" => Ok(BrowseCommand::Next),
        "prev" | "p" => Ok(BrowseCommand::Prev),
        "page" => number("page").map(BrowseCommand::Page),
        "size" => number("size").map(BrowseCommand::Size),
        "open" | "o" => number("open").map(BrowseCommand::Open),
        "back" | "b" => Ok(BrowseCommand::Back),
        "help" | "h" | "?" => Ok(BrowseCommand::Help),
        "quit" | "q" | "exit" => Ok(BrowseCommand::Quit),
        "" => Err(Error::Validation("Empty command".to_string())),
        other => Err(Error::Validation(format!("Unknown command: {other}"))),
    }
}

/// Apply one command to the session. Returns false when the user quits.
pub async fn apply<S: crate::mealdb::MealSearch>(
    session: &Session,
    expander: &QueryExpander,
    orchestrator: &SearchOrchestrator<S>,
    command: BrowseCommand,
) -> Result<bool> {
    match command {
        BrowseCommand::Search(query) => {
            if session.run_search(expander, orchestrator, &query).await == SearchOutcome::Stale {
                debug!("Search for {:?} was superseded", query);
            }
        }
        BrowseCommand::Next => {
            session.next_page().await?;
        }
        BrowseCommand::Prev => {
            session.prev_page().await?;
        }
        BrowseCommand::Page(page) => session.set_page(page).await?,
        BrowseCommand::Size(size) => session.set_page_size(size).await?,
        BrowseCommand::Open(position) => session.open(position).await?,
        BrowseCommand::Back => session.back().await?,
        BrowseCommand::Help => {}
        BrowseCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Run the interactive loop until `quit` or end of input
pub async fn browse(settings: &Settings) -> Result<()> {
    let client = MealDbClient::new(&settings.api)?;
    let orchestrator = SearchOrchestrator::new(client, &settings.search);
    let expander = QueryExpander::new();
    let session = Session::with_page_size_options(
        settings.pagination.default_page_size,
        &settings.pagination.page_size_options,
    )?;
    info!(
        "Interactive session with {:?} lookups, page sizes {:?}",
        orchestrator.policy(),
        session.page_size_options()
    );
    let preview_length = settings.pagination.preview_length;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(format_snapshot(&session.snapshot().await, preview_length).as_bytes())
        .await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                stdout.write_all(format!("{e}\n").as_bytes()).await?;
                continue;
            }
        };

        if command == BrowseCommand::Help {
            stdout.write_all(HELP.as_bytes()).await?;
            stdout
                .write_all(format!("Page sizes: {:?}\n", session.page_size_options()).as_bytes())
                .await?;
            continue;
        }

        match apply(&session, &expander, &orchestrator, command).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                stdout.write_all(format!("{e}\n").as_bytes()).await?;
                continue;
            }
        }

        let rendered = format_snapshot(&session.snapshot().await, preview_length);
        stdout.write_all(rendered.as_bytes()).await?;
    }

    Ok(())
}

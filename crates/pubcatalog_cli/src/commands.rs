//! Subcommand implementations.

use crate::error::CliError;
use crate::repl::{parse_command, ReplCommand, HELP};
use crate::source::load_catalog;
use crate::{BrowseArgs, OutputFormat};
use log::warn;
use pubcatalog_core::db::open_db;
use pubcatalog_core::store::load_json_documents;
use pubcatalog_core::{
    display_tag, Action, CatalogConfig, CatalogState, CatalogView, FilterSelection, LoadStatus,
    QueryMode, RenderFormat, SqliteDocumentStore, StoreError,
};
use serde_json::json;
use std::io::{BufRead, Write};
use std::path::Path;

const LOADING_MESSAGE: &str = "Loading publications...";

/// Builds a state for `mode` and runs the one-time load.
fn load_state(config: &CatalogConfig, mode: QueryMode) -> Result<CatalogState, CliError> {
    let mut state = CatalogState::new(config.presenter.page_size(), mode);

    eprintln!("{LOADING_MESSAGE}");
    match load_catalog(config) {
        Ok(publications) => {
            state.finish_load(Ok(publications));
            Ok(state)
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            Err(err.into())
        }
    }
}

fn query_mode(config: &CatalogConfig, compose: bool) -> QueryMode {
    if compose {
        QueryMode::Compose
    } else {
        config.query.mode
    }
}

pub fn browse(config: &CatalogConfig, args: &BrowseArgs) -> Result<(), CliError> {
    let mode = query_mode(config, args.compose);
    let mut state = load_state(config, mode)?;

    let has_filters = args.domain.is_some() || args.system.is_some() || args.year.is_some();
    if mode == QueryMode::Independent && args.search.is_some() && has_filters {
        warn!("event=cli_browse module=cli status=fallback reason=search_replaced_by_filters");
        eprintln!("note: filters replace the search term in independent mode; pass --compose to combine them");
    }

    if let Some(term) = args.search.clone() {
        state.dispatch(Action::Search(term));
    }
    if let Some(domain) = args.domain.clone() {
        state.dispatch(Action::SetFilter(FilterSelection::Domain(Some(domain))));
    }
    if let Some(system) = args.system.clone() {
        state.dispatch(Action::SetFilter(FilterSelection::System(Some(system))));
    }
    if let Some(year) = args.year {
        state.dispatch(Action::SetFilter(FilterSelection::Year(Some(year))));
    }
    state.dispatch(Action::GoToPage(args.page));

    let mut out = std::io::stdout().lock();
    print_state(&mut out, config, &state, args.format)?;
    Ok(())
}

pub fn facets(config: &CatalogConfig) -> Result<(), CliError> {
    let state = load_state(config, config.query.mode)?;
    let facets = state.facets();

    let mut out = std::io::stdout().lock();
    writeln!(out, "Domains:")?;
    for domain in &facets.domains {
        writeln!(out, "  {domain}  ({})", display_tag(domain))?;
    }
    writeln!(out, "Systems:")?;
    for system in &facets.systems {
        writeln!(out, "  {system}  ({})", display_tag(system))?;
    }
    writeln!(out, "Years:")?;
    for year in &facets.years {
        writeln!(out, "  {year}")?;
    }
    Ok(())
}

pub fn stats(config: &CatalogConfig) -> Result<(), CliError> {
    let state = load_state(config, config.query.mode)?;
    let mut out = std::io::stdout().lock();
    write_counters(&mut out, &state.view(RenderFormat::Text, &config.presenter.render_options()))?;
    Ok(())
}

pub fn interactive(config: &CatalogConfig, compose: bool, format: OutputFormat) -> Result<(), CliError> {
    let mut state = load_state(config, query_mode(config, compose))?;
    let stdin = std::io::stdin();
    let mut out = std::io::stdout().lock();

    print_state(&mut out, config, &state, format)?;
    writeln!(out, "Type `help` for commands.")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(ReplCommand::Quit)) => break,
            Ok(Some(ReplCommand::Help)) => writeln!(out, "{HELP}")?,
            Ok(Some(ReplCommand::Show)) => print_state(&mut out, config, &state, format)?,
            Ok(Some(ReplCommand::Apply(action))) => {
                if state.dispatch(action) {
                    print_state(&mut out, config, &state, format)?;
                } else {
                    writeln!(out, "(no change)")?;
                }
            }
            Err(message) => writeln!(out, "{message}")?,
        }
    }
    Ok(())
}

pub fn import(config: &CatalogConfig, from: &Path, into: &Path) -> Result<(), CliError> {
    let documents = load_json_documents(from)?;
    let conn = open_db(into).map_err(StoreError::from)?;
    let store = SqliteDocumentStore::try_new(&conn)?;
    let count = store.import_documents(&config.catalog.collection, &documents)?;

    println!(
        "imported {count} documents into `{}` ({})",
        config.catalog.collection,
        into.display()
    );
    Ok(())
}

fn print_state(
    out: &mut impl Write,
    config: &CatalogConfig,
    state: &CatalogState,
    format: OutputFormat,
) -> Result<(), CliError> {
    let options = config.presenter.render_options();

    let render_format = match format {
        OutputFormat::Html => RenderFormat::Html,
        OutputFormat::Text | OutputFormat::Json => RenderFormat::Text,
    };
    let view = state.view(render_format, &options);

    if format == OutputFormat::Json {
        let body = json!({
            "status": view.status,
            "stats": view.stats,
            "pager": view.pager,
            "search_term": view.search_term,
            "match_count": view.match_count,
            "publications": state.page_publications(),
        });
        let text = serde_json::to_string_pretty(&body)
            .map_err(|err| CliError::Io(std::io::Error::other(err)))?;
        writeln!(out, "{text}")?;
        return Ok(());
    }

    write_counters(out, &view)?;
    if *state.status() == LoadStatus::Ready {
        writeln!(out, "{}", view.results.trim_end())?;
    }
    if let Some(pager) = view.pager {
        let prev = if pager.prev_enabled { "[prev]" } else { "      " };
        let next = if pager.next_enabled { "[next]" } else { "      " };
        writeln!(out, "{prev} {} {next}", pager.label())?;
    }
    Ok(())
}

fn write_counters(out: &mut impl Write, view: &CatalogView) -> std::io::Result<()> {
    writeln!(
        out,
        "Publications: {}  Domains: {}  Avg. duration: {} days  Matches: {}",
        view.stats.total, view.stats.domain_count, view.stats.avg_duration_days, view.match_count
    )
}

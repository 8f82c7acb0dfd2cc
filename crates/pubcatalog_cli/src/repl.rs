//! Line commands for interactive browsing.

use pubcatalog_core::{Action, FilterSelection};

pub const HELP: &str = "\
commands:
  search <text>     search title, abstract and findings (empty clears)
  domain [tag|any]  filter by research domain
  system [tag|any]  filter by biological system
  year [year|any]   filter by publication year
  reset             clear search and filters
  next | prev       change page
  page <n>          jump to page n
  show              print the current page again
  help              show this help
  quit              leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Apply(Action),
    Show,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ReplCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word.to_ascii_lowercase().as_str() {
        "search" | "s" => ReplCommand::Apply(Action::Search(rest.to_string())),
        "domain" => ReplCommand::Apply(Action::SetFilter(FilterSelection::Domain(selection(rest)))),
        "system" => ReplCommand::Apply(Action::SetFilter(FilterSelection::System(selection(rest)))),
        "year" => {
            let year = match selection(rest) {
                None => None,
                Some(value) => Some(
                    value
                        .parse::<i64>()
                        .map_err(|_| format!("`{value}` is not a year"))?,
                ),
            };
            ReplCommand::Apply(Action::SetFilter(FilterSelection::Year(year)))
        }
        "reset" => ReplCommand::Apply(Action::Reset),
        "next" | "n" => ReplCommand::Apply(Action::ChangePage(1)),
        "prev" | "p" => ReplCommand::Apply(Action::ChangePage(-1)),
        "page" => {
            let page = rest
                .parse::<usize>()
                .map_err(|_| format!("`{rest}` is not a page number"))?;
            ReplCommand::Apply(Action::GoToPage(page))
        }
        "show" => ReplCommand::Show,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };
    Ok(Some(command))
}

fn selection(value: &str) -> Option<String> {
    if value.is_empty() || value.eq_ignore_ascii_case("any") {
        None
    } else {
        Some(value.to_string())
    }
}

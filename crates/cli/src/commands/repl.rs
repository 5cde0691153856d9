use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use shortlist_core::config::{AppConfig, DisplayConfig};
use shortlist_core::{ApplicationError, CompareChange, CompareOutcome, ProductId, ShopSession};

use crate::commands::{open_session, CommandResult};
use crate::render;

const HELP: &str = "commands:
  type <text>    set the search query (suggestions need at least the configured length)
  select <id>    add a product to the comparison
  remove <id>    remove a product from the comparison
  show           print the current session
  help           print this message
  quit           end the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Type(String),
    Select(ProductId),
    Remove(ProductId),
    Show,
    Help,
    Quit,
}

impl ReplCommand {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(None);
        }

        let trimmed = line.trim_start();
        let (verb, rest) = match trimmed.split_once(' ') {
            Some((verb, rest)) => (verb, rest),
            None => (trimmed, ""),
        };

        let command = match verb {
            // the query is kept verbatim, spaces included
            "type" => Self::Type(rest.to_string()),
            "select" => Self::Select(parse_id(rest)?),
            "remove" => Self::Remove(parse_id(rest)?),
            "show" => Self::Show,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command `{other}` (try `help`)")),
        };
        Ok(Some(command))
    }
}

fn parse_id(value: &str) -> Result<ProductId, String> {
    value
        .trim()
        .parse::<u32>()
        .map(ProductId)
        .map_err(|_| format!("expected a numeric product id, got `{}`", value.trim()))
}

pub fn run(config: &AppConfig) -> CommandResult {
    let mut session = match open_session("repl", config) {
        Ok(session) => session,
        Err(result) => return result,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    match run_with(&mut session, &config.display, stdin.lock(), stdout.lock()) {
        Ok(events) => CommandResult::success(
            "repl",
            format!("session {} ended after {events} commands", session.session_id()),
        ),
        Err(error) => CommandResult::failure("repl", "io", format!("{error:#}"), 5),
    }
}

/// Drives `session` from `input` until EOF or `quit`, writing each rendered
/// update to `output`. Returns the number of commands handled.
pub fn run_with<R, W>(
    session: &mut ShopSession,
    display: &DisplayConfig,
    input: R,
    mut output: W,
) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{HELP}").context("failed to write help")?;
    let mut handled = 0;

    for line in input.lines() {
        let line = line.context("failed to read command")?;
        let command = match ReplCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(output, "error: {message}").context("failed to write error")?;
                continue;
            }
        };
        handled += 1;

        let rendered = match command {
            ReplCommand::Type(text) => render::suggestions(session.type_query(text)),
            ReplCommand::Select(product_id) => match session.select(product_id) {
                Ok(outcome) => with_note(&outcome, render::view(&session.view(), display)),
                Err(error) => {
                    let interface =
                        ApplicationError::from(error).into_interface(session.session_id());
                    format!("error: {} ({interface})", interface.user_message())
                }
            },
            ReplCommand::Remove(product_id) => {
                let outcome = session.remove(product_id);
                with_note(&outcome, render::view(&session.view(), display))
            }
            ReplCommand::Show => render::view(&session.view(), display),
            ReplCommand::Help => HELP.to_string(),
            ReplCommand::Quit => break,
        };
        writeln!(output, "{rendered}").context("failed to write session update")?;
    }

    output.flush().context("failed to flush output")?;
    Ok(handled)
}

/// Prefixes `rendered` with a note when the command left the list unchanged.
fn with_note(outcome: &CompareOutcome, rendered: String) -> String {
    if !outcome.change.is_noop() {
        return rendered;
    }
    let note = match outcome.change {
        CompareChange::AlreadyPresent => "is already in the comparison",
        _ => "is not in the comparison",
    };
    format!("note: product {} {note}\n{rendered}", outcome.product_id)
}

//! Console input
//!
//! One command per line on stdin stands in for the search box and the theme
//! button. Anything that is not a `:` command is a search term.

use std::io::BufRead;
use std::thread::JoinHandle;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    Search(String),
    ClearSearch,
    ToggleTheme,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> ViewCommand {
    let line = line.trim_end_matches(['\r', '\n']);

    if line.is_empty() {
        return ViewCommand::ClearSearch;
    }

    match line.trim() {
        ":dark" | ":theme" => ViewCommand::ToggleTheme,
        ":clear" => ViewCommand::ClearSearch,
        ":q" | ":quit" => ViewCommand::Quit,
        cmd if cmd.starts_with(':') => ViewCommand::Unknown(cmd.to_string()),
        _ => ViewCommand::Search(line.to_string()),
    }
}

/// Forward parsed lines from `reader` until EOF or until the receiver goes away.
///
/// Runs on its own thread: a blocking stdin read must not hold up runtime
/// shutdown after `:q`.
pub fn spawn_line_reader<R>(reader: R, commands: mpsc::Sender<ViewCommand>) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    std::thread::spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("Failed to read input: {}", e);
                    break;
                }
            };
            if commands.blocking_send(parse_command(&line)).is_err() {
                break;
            }
        }
    })
}

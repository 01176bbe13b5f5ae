use super::config::load_config;
use super::prompts::is_interactive;
use crate::output::Output;
use crate::render;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use owo_colors::OwoColorize;
use rateit_core::{App, Completion, UiSignal};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Type a title to search. Commands:
  :select <N|ID>   open result N (or a movie id); selecting the open movie closes it
  :close           close the movie detail (Escape)
  :rate <1-10>     add the open movie to your watched list with your rating
  :rm <ID>         remove a movie from your watched list
  :list            show your watched list and its averages
  :retry           run the current search again
  :help            show this help
  :quit            leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Index(usize),
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionCommand {
    Query(String),
    Select(Target),
    Close,
    Rate(u8),
    Remove(String),
    List,
    Retry,
    Help,
    Quit,
}

fn parse_command(line: &str) -> std::result::Result<SessionCommand, String> {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix(':') else {
        return Ok(SessionCommand::Query(trimmed.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match (name, arg) {
        ("select" | "s", "") => Err("usage: :select <N|ID>".to_string()),
        ("select" | "s", arg) => Ok(SessionCommand::Select(match arg.parse::<usize>() {
            Ok(index) => Target::Index(index),
            Err(_) => Target::Id(arg.to_string()),
        })),
        ("close" | "c" | "back", _) => Ok(SessionCommand::Close),
        ("rate" | "r", arg) => arg
            .parse::<u8>()
            .map(SessionCommand::Rate)
            .map_err(|_| "usage: :rate <1-10>".to_string()),
        ("rm" | "remove", "") => Err("usage: :rm <ID>".to_string()),
        ("rm" | "remove", arg) => Ok(SessionCommand::Remove(arg.to_string())),
        ("list" | "l", _) => Ok(SessionCommand::List),
        ("retry", _) => Ok(SessionCommand::Retry),
        ("help" | "h" | "?", _) => Ok(SessionCommand::Help),
        ("quit" | "q" | "exit", _) => Ok(SessionCommand::Quit),
        _ => Err(format!("unknown command ':{}' (type :help)", name)),
    }
}

enum Input {
    Line(Option<String>),
    Completion(Option<Completion>),
}

struct Session<'a> {
    app: App,
    output: &'a Output,
    terminal_title: bool,
    last_title: String,
}

impl<'a> Session<'a> {
    fn new(app: App, output: &'a Output) -> Self {
        Self {
            app,
            output,
            terminal_title: output.is_human() && is_interactive(),
            last_title: String::new(),
        }
    }

    /// Returns `false` when the session should end.
    fn execute(&mut self, command: SessionCommand) -> bool {
        tracing::debug!(command = ?command, "Session command");
        match command {
            SessionCommand::Query(query) => {
                self.app.on_query_change(query);
                self.show_search();
            }
            SessionCommand::Select(target) => {
                let id = match target {
                    Target::Id(id) => id,
                    Target::Index(index) => match index.checked_sub(1).and_then(|i| self.app.search().results().get(i)) {
                        Some(result) => result.id.clone(),
                        None => {
                            self.output.warn(format!("No result #{} in the current list", index));
                            return true;
                        }
                    },
                };
                self.app.toggle_select(&id);
                if self.app.selection().selected_id().is_none() {
                    self.output.info(format!("Closed {}", id));
                }
                self.show_detail();
            }
            SessionCommand::Close => {
                self.app.handle_signal(UiSignal::Escape);
                self.show_detail();
            }
            SessionCommand::Rate(rating) => match self.app.add_selected(rating) {
                Ok(entry) => {
                    self.output.success(format!("Added {} with your rating {} ⭐", entry.title, entry.user_rating));
                    self.show_watched();
                }
                Err(e) => self.output.warn(e.to_string()),
            },
            SessionCommand::Remove(id) => match self.app.remove(&id) {
                Some(entry) => {
                    self.output.success(format!("Removed {} from your watched list", entry.title));
                    self.show_watched();
                }
                None => self.output.warn(format!("{} is not in your watched list", id)),
            },
            SessionCommand::List => self.show_watched(),
            SessionCommand::Retry => {
                self.app.retry_search();
                self.show_search();
            }
            SessionCommand::Help => self.output.block(HELP),
            SessionCommand::Quit => return false,
        }
        self.sync_title();
        true
    }

    /// Returns whether anything was redrawn.
    fn on_completion(&mut self, completion: Completion) -> bool {
        let is_search = matches!(completion, Completion::Search(_));
        if !self.app.apply(completion) {
            return false;
        }
        if is_search {
            self.show_search();
        } else {
            self.show_detail();
        }
        self.sync_title();
        true
    }

    fn show_search(&self) {
        let snapshot = self.app.snapshot();
        if self.output.is_human() {
            let view = render::search_view(&snapshot);
            if !view.is_empty() {
                self.output.block(view);
            }
        } else {
            self.emit_json();
        }
    }

    fn show_detail(&self) {
        let snapshot = self.app.snapshot();
        if self.output.is_human() {
            let view = render::detail_view(&snapshot);
            if !view.is_empty() {
                self.output.block(view);
            }
        } else {
            self.emit_json();
        }
    }

    fn show_watched(&self) {
        if self.output.is_human() {
            self.output.block(render::watched_view(&self.app.snapshot()));
        } else {
            self.emit_json();
        }
    }

    fn emit_json(&self) {
        match serde_json::to_value(self.app.snapshot()) {
            Ok(value) => self.output.json(&value),
            Err(e) => tracing::error!(error = %e, "Failed to serialize session state"),
        }
    }

    /// Mirror the window title onto the terminal title bar.
    fn sync_title(&mut self) {
        let title = self.app.window_title();
        if title == self.last_title {
            return;
        }
        if self.terminal_title {
            print!("\x1b]0;{}\x07", title);
            let _ = std::io::stdout().flush();
        }
        tracing::debug!(title = %title, "Window title changed");
        self.last_title = title;
    }
}

pub async fn run_interactive(output: &Output) -> Result<()> {
    let config = load_config(output)?;
    let app = super::build_app(&config);
    let mut session = Session::new(app, output);

    output.block(format!("{} {}", "🍿".bold(), "RateIt".bright_cyan().bold()));
    output.block(HELP);
    session.sync_title();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    output.prompt("> ").wrap_err("Failed to write prompt")?;

    loop {
        let input = tokio::select! {
            line = lines.next_line() => Input::Line(line.wrap_err("Failed to read from stdin")?),
            completion = session.app.recv_completion() => Input::Completion(completion),
        };

        match input {
            Input::Line(None) => break,
            Input::Line(Some(line)) => {
                let keep_going = match parse_command(&line) {
                    Ok(command) => session.execute(command),
                    Err(msg) => {
                        output.warn(msg);
                        true
                    }
                };
                if !keep_going {
                    break;
                }
                output.prompt("> ").wrap_err("Failed to write prompt")?;
            }
            Input::Completion(Some(completion)) => {
                if session.on_completion(completion) {
                    output.prompt("> ").wrap_err("Failed to write prompt")?;
                }
            }
            Input::Completion(None) => {
                tracing::warn!("Completion channel closed, ending session");
                break;
            }
        }
    }

    let summary = session.app.summary();
    tracing::info!(watched = summary.count, "Session ended");
    if summary.count > 0 {
        output.block(render::summary_line(&summary));
    }
    Ok(())
}

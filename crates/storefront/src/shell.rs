//! Line-oriented command shell over a shop session.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use goodshop_catalog::{Catalog, CategoryFilter, FilterPreset, ShopAction, ShopState, SortOrder};
use goodshop_core::DomainError;

use crate::render;

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Changes the session state and re-renders.
    Action(ShopAction),
    Presets,
    List,
    Help,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("no filter preset named `{0}` (try `presets`)")]
    UnknownPreset(String),

    #[error(transparent)]
    Parameter(#[from] DomainError),
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "filter" | "category" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "filter",
                    expected: "one or more categories",
                });
            }
            match rest.parse::<CategoryFilter>()? {
                CategoryFilter::All => Command::Action(ShopAction::ShowAll),
                filter => Command::Action(ShopAction::SelectCategory(filter)),
            }
        }
        "preset" => {
            let preset = FilterPreset::by_label(rest)
                .ok_or_else(|| CommandError::UnknownPreset(rest.to_string()))?;
            Command::Action(preset.action())
        }
        "all" => Command::Action(ShopAction::ShowAll),
        "search" => Command::Action(ShopAction::Search(rest.to_string())),
        "reset" => Command::Action(ShopAction::ResetSearch),
        "sort" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "sort",
                    expected: "asc, desc or none",
                });
            }
            Command::Action(ShopAction::SortBy(rest.parse::<SortOrder>()?))
        }
        "presets" => Command::Presets,
        "list" | "ls" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Interactive session bound to a loaded catalog.
#[derive(Debug)]
pub struct Shell<'c> {
    catalog: &'c Catalog,
    state: ShopState,
}

impl<'c> Shell<'c> {
    pub fn new(catalog: &'c Catalog, state: ShopState) -> Self {
        Self { catalog, state }
    }

    pub fn state(&self) -> &ShopState {
        &self.state
    }

    /// Execute one command. Returns `false` when the session should end.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<bool> {
        match command {
            Command::Action(action) => {
                self.state.apply(action);
                self.render(out)?;
            }
            Command::Presets => render::render_presets(out)?,
            Command::List => self.render(out)?,
            Command::Help => render::render_help(out)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let products = self.state.view(self.catalog);
        render::render_listing(out, self.state.query(), &products)
    }

    /// Read commands from `input` until EOF or `quit`.
    ///
    /// Bad commands print an error line and the session continues.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", render::BANNER)?;
        self.render(out)?;

        for line in input.lines() {
            let line = line?;
            match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(command)) => {
                    if !self.execute(command, out)? {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(input = %line, error = %e, "rejected shell command");
                    writeln!(out, "error: {e}")?;
                }
            }
            out.flush()?;
        }
        writeln!(out, "bye")?;
        Ok(())
    }
}

use std::{io, path::PathBuf};

use chrono::Utc;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::cli::{demo, output};
use crate::config::{ConfigError, ConfigManager};
use crate::errors::FormError;
use crate::utils::{build_info, paths, persistence};
use crate::wizard::{render_text, RenderModel, Transition, Wizard};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    InvalidArguments(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

const COMMANDS: &[(&str, &str)] = &[
    ("set", "Set the current input without moving on (`:set \"two words\"`)"),
    ("next", "Validate the current step and move on"),
    ("back", "Go back one step, keeping what was typed"),
    ("data", "Show the data collected so far"),
    ("help", "Show this help"),
    ("version", "Show build information"),
    ("quit", "Save the session and exit"),
    ("abort", "Discard the saved session and exit"),
];

/// Terminal host around a single demo-form wizard.
pub(crate) struct CliSession {
    wizard: Wizard,
    session_path: PathBuf,
    mode: CliMode,
}

impl CliSession {
    pub(crate) fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = paths::app_data_dir();
        let config = ConfigManager::with_base_dir(&base)?.load()?;
        output::set_preferences(output::OutputPreferences {
            color_enabled: config.ui_color_enabled,
            quiet_mode: config.quiet_mode,
        });

        let sessions_dir = config
            .sessions_dir
            .clone()
            .unwrap_or_else(|| paths::sessions_dir_in(&base));
        let session_path = paths::session_file_in(&sessions_dir, demo::FORM_NAME);

        let resume = match persistence::load_snapshot(&session_path) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(path = %session_path.display(), error = %err, "unreadable session");
                output::warning("The saved session could not be read; starting over.");
                None
            }
        };
        if resume.is_some() {
            output::info("Resumed your saved session.");
        }

        let wizard = demo::build_wizard(&config, resume, Utc::now().date_naive());
        Ok(Self {
            wizard,
            session_path,
            mode,
        })
    }

    pub(crate) fn command_names(&self) -> Vec<String> {
        COMMANDS.iter().map(|(name, _)| format!(":{name}")).collect()
    }

    pub(crate) fn prompt(&self) -> String {
        format!(
            "stepform [{}/{}]> ",
            (self.wizard.step_index() + 1).min(self.wizard.step_count()),
            self.wizard.step_count()
        )
    }

    pub(crate) fn show_current(&self) {
        let model = self.wizard.render_model();
        if let RenderModel::Step(step) = &model {
            output::section(&step.title);
        }
        output::plain(render_text(&model));
    }

    /// Plain text sets the input and advances; `:`-prefixed lines are commands.
    pub(crate) fn handle_line(&mut self, line: &str) -> Result<LoopControl, CliError> {
        let trimmed = line.trim();
        let Some(command_line) = trimmed.strip_prefix(':') else {
            if !trimmed.is_empty() && !self.set_input(trimmed) {
                return Ok(LoopControl::Continue);
            }
            return self.advance();
        };

        let tokens = shell_words::split(command_line)
            .map_err(|err| CliError::InvalidArguments(err.to_string()))?;
        let Some((command, args)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };

        match command.to_ascii_lowercase().as_str() {
            "set" => {
                if self.set_input(&args.join(" ")) {
                    self.show_current();
                }
                Ok(LoopControl::Continue)
            }
            "next" => self.advance(),
            "back" => {
                match self.wizard.retreat() {
                    Transition::Moved { .. } => self.show_current(),
                    _ => output::warning("Already at the first step."),
                }
                Ok(LoopControl::Continue)
            }
            "data" => {
                output::plain(serde_json::to_string_pretty(&self.wizard.data().to_json())?);
                Ok(LoopControl::Continue)
            }
            "help" => {
                print_help();
                Ok(LoopControl::Continue)
            }
            "version" => {
                output::info(build_info::current().summary());
                Ok(LoopControl::Continue)
            }
            "quit" => {
                self.persist()?;
                Ok(LoopControl::Exit)
            }
            "abort" => {
                if persistence::remove_snapshot(&self.session_path)? {
                    output::info("Saved session discarded.");
                }
                Ok(LoopControl::Exit)
            }
            other => {
                suggest_command(other);
                Ok(LoopControl::Continue)
            }
        }
    }

    /// Input ended without finishing the form: keep the session for later.
    pub(crate) fn on_end_of_input(&mut self) -> Result<(), CliError> {
        if !self.wizard.is_completed() {
            self.persist()?;
        }
        Ok(())
    }

    pub(crate) fn report_error(&self, err: CliError) {
        output::error(&err);
        if self.mode == CliMode::Interactive {
            if let CliError::InvalidArguments(_) = err {
                output::info("Type `:help` to see available commands.");
            }
        }
    }

    fn set_input(&mut self, raw: &str) -> bool {
        match self.wizard.update_input(raw) {
            Ok(()) => true,
            Err(err) => {
                output::warning(err);
                false
            }
        }
    }

    fn advance(&mut self) -> Result<LoopControl, CliError> {
        match self.wizard.advance() {
            Transition::Completed => {
                output::success("Form completed.");
                output::plain(render_text(&self.wizard.render_model()));
                output::plain(serde_json::to_string_pretty(&self.wizard.data().to_json())?);
                if let Err(err) = persistence::remove_snapshot(&self.session_path) {
                    tracing::warn!(
                        path = %self.session_path.display(),
                        error = %err,
                        "completed session not removed"
                    );
                    output::warning(format!("The saved session could not be removed: {err}"));
                }
                Ok(LoopControl::Exit)
            }
            Transition::Ignored | Transition::Busy => Ok(LoopControl::Continue),
            Transition::Moved { .. } | Transition::Rejected => {
                self.show_current();
                Ok(LoopControl::Continue)
            }
        }
    }

    fn persist(&mut self) -> Result<(), CliError> {
        let snapshot = self.wizard.suspend();
        persistence::save_snapshot(&snapshot, &self.session_path)?;
        output::info(format!(
            "Session saved at step {} of {}.",
            snapshot.step_index + 1,
            self.wizard.step_count()
        ));
        Ok(())
    }
}

fn print_help() {
    output::section("Commands");
    output::plain("Type a value and press Enter to answer the current step.");
    output::plain("An empty line keeps the current value and moves on.");
    for (name, description) in COMMANDS {
        output::plain(format!("  :{name:<8} {description}"));
    }
}

fn suggest_command(input: &str) {
    output::warning(format!(
        "Unknown command `:{input}`. Type `:help` to see available commands."
    ));

    let best = COMMANDS
        .iter()
        .map(|(name, _)| (levenshtein(name, input), *name))
        .min_by_key(|(distance, _)| *distance);

    if let Some((distance, name)) = best {
        if distance <= 3 {
            output::info(format!("Suggestion: `:{name}`?"));
        }
    }
}

use serde_json::Value;

use crate::step::{Affordance, InputView, TextKind};
use crate::store::DataStore;

const BAR_WIDTH: usize = 20;

/// What the presentation layer should show right now.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderModel<'a> {
    Step(StepRender),
    Finished {
        data: &'a DataStore,
        view: Option<&'a str>,
    },
}

/// Render data for the step the wizard is on.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRender {
    pub index: usize,
    pub total: usize,
    pub title: String,
    pub details: String,
    /// Set while the last validation attempt failed.
    pub error: Option<String>,
    pub is_final: bool,
    /// Fraction of steps already completed, in `[0, 1)`.
    pub progress: f64,
    pub input: InputView,
}

impl StepRender {
    /// Human position label, e.g. `2/6`.
    pub fn position(&self) -> String {
        format!("{}/{}", self.index + 1, self.total)
    }
}

/// Plain-text rendering of a model, one line per element.
pub fn render_text(model: &RenderModel<'_>) -> String {
    let mut lines = Vec::new();
    match model {
        RenderModel::Step(step) => {
            lines.push(format!("[{}] {}", step.position(), step.title));
            if !step.details.is_empty() {
                lines.push(step.details.clone());
            }
            lines.push(progress_bar(step.progress));
            render_input(&step.input, &mut lines);
            if let Some(error) = &step.error {
                lines.push(format!("! {error}"));
            }
        }
        RenderModel::Finished { data, view } => match view {
            Some(view) => lines.push((*view).to_string()),
            None => {
                lines.push("Completed.".to_string());
                for (key, fields) in data.iter() {
                    lines.push(format!("  {key}: {}", Value::Object(fields.clone())));
                }
            }
        },
    }
    lines.join("\n")
}

fn progress_bar(progress: f64) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let filled = (progress * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        (progress * 100.0).round() as u32
    )
}

fn render_input(input: &InputView, lines: &mut Vec<String>) {
    match input {
        InputView::Text {
            value,
            kind,
            affordance,
        } => {
            let shown = match kind {
                TextKind::Password => "*".repeat(value.chars().count()),
                _ => value.clone(),
            };
            if shown.is_empty() {
                lines.push("> (empty)".to_string());
            } else {
                lines.push(format!("> {shown}"));
            }
            let action = match affordance {
                Affordance::Next => "Next",
                Affordance::Done => "Done",
            };
            lines.push(format!("[{action}]"));
        }
        InputView::Choice { options, selected } => {
            for (index, option) in options.iter().enumerate() {
                let marker = if *selected == Some(index) { "(*)" } else { "( )" };
                lines.push(format!("{marker} {}. {option}", index + 1));
            }
        }
        InputView::Toggle { label, checked } => {
            let mark = if *checked { "x" } else { " " };
            lines.push(format!("[{mark}] {label}"));
        }
        InputView::Range { min, max, value } => {
            lines.push(format!("> {value} in [{min}, {max}]"));
        }
        InputView::Date { value } => match value {
            Some(date) => lines.push(format!("> {}", date.format("%Y-%m-%d"))),
            None => lines.push("> (not set, YYYY-MM-DD)".to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_scales_to_width() {
        assert_eq!(progress_bar(0.0), "[--------------------]   0%");
        assert_eq!(progress_bar(0.5), "[##########----------]  50%");
    }

    #[test]
    fn password_is_masked() {
        let mut lines = Vec::new();
        render_input(
            &InputView::Text {
                value: "hunter2".into(),
                kind: TextKind::Password,
                affordance: Affordance::Done,
            },
            &mut lines,
        );
        assert_eq!(lines, vec!["> *******", "[Done]"]);
    }
}

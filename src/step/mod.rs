//! The step contract: one page of a form.
//!
//! A step owns its input state, decides whether that state is acceptable, and
//! folds it into the shared [`DataStore`] under its own data key. The wizard
//! only ever talks to steps through the [`Step`] trait.

mod checkbox;
mod date;
mod option;
mod rule;
mod seekbar;
mod text;

pub use checkbox::{CheckBoxStep, DATA_CHECKED};
pub use date::{DateStep, DATA_DATE};
pub use option::{OptionStep, DATA_SELECTED_OPTION};
pub use rule::{Predicate, Rule};
pub use seekbar::{SeekBarStep, DATA_PROGRESS};
pub use text::{TextStep, DATA_TEXT};

use chrono::NaiveDate;
use thiserror::Error;

use crate::label::{Label, LabelContext};
use crate::store::{DataStore, StepData};

/// Title, details and error strings of a step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepLabels {
    pub title: Label,
    pub details: Label,
    pub error: Label,
}

impl StepLabels {
    pub fn new(title: impl Into<Label>) -> Self {
        Self {
            title: title.into(),
            details: Label::default(),
            error: Label::default(),
        }
    }

    pub fn with_details(mut self, details: impl Into<Label>) -> Self {
        self.details = details.into();
        self
    }

    pub fn with_error(mut self, error: impl Into<Label>) -> Self {
        self.error = error.into();
        self
    }

    /// Labels whose title, details and error are all localization keys
    /// named `<prefix>.title`, `<prefix>.details` and `<prefix>.error`.
    pub fn keyed(prefix: &str) -> Self {
        Self {
            title: Label::key(format!("{prefix}.title")),
            details: Label::key(format!("{prefix}.details")),
            error: Label::key(format!("{prefix}.error")),
        }
    }
}

/// How a text input is presented and which characters it accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextKind {
    #[default]
    Plain,
    Email,
    Password,
    Number,
}

/// Action offered next to the input: move on, or finish the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Affordance {
    #[default]
    Next,
    Done,
}

/// Read-only description of a step's input widget, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputView {
    Text {
        value: String,
        kind: TextKind,
        affordance: Affordance,
    },
    Choice {
        options: Vec<String>,
        selected: Option<usize>,
    },
    Toggle {
        label: String,
        checked: bool,
    },
    Range {
        min: i64,
        max: i64,
        value: i64,
    },
    Date {
        value: Option<NaiveDate>,
    },
}

/// Raw input the step's widget cannot hold. The step is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("`{0}` is not a yes/no answer")]
    NotABoolean(String),
    #[error("`{input}` is not one of: {options}")]
    UnknownOption { input: String, options: String },
    #[error("`{0}` is not a date (use YYYY-MM-DD)")]
    InvalidDate(String),
}

/// One page of a form.
///
/// Implementors provide [`Step::snapshot`] and [`Step::load`]; the provided
/// [`Step::save`] and [`Step::restore`] confine them to the step's own data
/// key, so saving one step can never remove or rewrite another step's data.
pub trait Step {
    /// Key under which this step's data lives in the [`DataStore`].
    fn data_key(&self) -> &str;

    fn labels(&self) -> &StepLabels;

    fn title(&self, ctx: &dyn LabelContext) -> String {
        self.labels().title.resolve(ctx)
    }

    fn details(&self, ctx: &dyn LabelContext) -> String {
        self.labels().details.resolve(ctx)
    }

    fn error(&self, ctx: &dyn LabelContext) -> String {
        self.labels().error.resolve(ctx)
    }

    /// Whether the current input is acceptable. Must not have side effects.
    fn validate(&self) -> bool;

    /// Current input as step data. Must succeed for every reachable state.
    fn snapshot(&self) -> StepData;

    /// Repopulates the input from previously saved step data.
    fn load(&mut self, data: &StepData);

    fn save(&self, store: &mut DataStore) {
        store.put(self.data_key(), self.snapshot());
    }

    /// No-op when the store holds nothing for this step.
    fn restore(&mut self, store: &DataStore) {
        if let Some(data) = store.get(self.data_key()) {
            self.load(data);
        }
    }

    /// Lets the step adapt to being (or not being) the last step.
    fn update_view(&mut self, _is_final: bool) {}

    fn view(&self, ctx: &dyn LabelContext) -> InputView;

    /// Data-field change coming from the presentation layer. Changes the
    /// input without validating it.
    fn apply_input(&mut self, raw: &str) -> Result<(), InputError>;
}

use serde_json::Value;

use super::{InputError, InputView, Step, StepLabels};
use crate::label::LabelContext;
use crate::store::{DataStore, StepData};

pub const DATA_SELECTED_OPTION: &str = "selected_option";

/// Single choice among a fixed list of options. Valid once something is picked.
#[derive(Debug, Clone)]
pub struct OptionStep {
    key: String,
    labels: StepLabels,
    options: Vec<String>,
    selected: Option<usize>,
}

impl OptionStep {
    pub fn new<I, S>(key: impl Into<String>, labels: StepLabels, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            labels,
            options: options.into_iter().map(Into::into).collect(),
            selected: None,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.options.get(index))
            .map(String::as_str)
    }

    /// Index of the option saved by the step with data key `key`.
    pub fn selected_option(store: &DataStore, key: &str) -> Option<usize> {
        store
            .field(key, DATA_SELECTED_OPTION)
            .and_then(Value::as_u64)
            .and_then(|index| usize::try_from(index).ok())
    }

    /// Accepts an option label (case-insensitive) or a 1-based position.
    /// An exact label wins over a position, so numeric labels stay selectable.
    fn resolve(&self, input: &str) -> Option<usize> {
        let trimmed = input.trim();
        if let Some(index) = self.options.iter().position(|option| option == trimmed) {
            return Some(index);
        }
        if let Ok(position) = trimmed.parse::<usize>() {
            if (1..=self.options.len()).contains(&position) {
                return Some(position - 1);
            }
        }
        self.options
            .iter()
            .position(|option| option.eq_ignore_ascii_case(trimmed))
    }
}

impl Step for OptionStep {
    fn data_key(&self) -> &str {
        &self.key
    }

    fn labels(&self) -> &StepLabels {
        &self.labels
    }

    fn validate(&self) -> bool {
        self.selected.is_some()
    }

    fn snapshot(&self) -> StepData {
        let mut data = StepData::new();
        let value = self.selected.map(Value::from).unwrap_or(Value::Null);
        data.insert(DATA_SELECTED_OPTION.into(), value);
        data
    }

    fn load(&mut self, data: &StepData) {
        self.selected = data
            .get(DATA_SELECTED_OPTION)
            .and_then(Value::as_u64)
            .and_then(|index| usize::try_from(index).ok())
            .filter(|index| *index < self.options.len());
    }

    fn view(&self, _ctx: &dyn LabelContext) -> InputView {
        InputView::Choice {
            options: self.options.clone(),
            selected: self.selected,
        }
    }

    fn apply_input(&mut self, raw: &str) -> Result<(), InputError> {
        match self.resolve(raw) {
            Some(index) => {
                self.selected = Some(index);
                Ok(())
            }
            None => Err(InputError::UnknownOption {
                input: raw.trim().to_string(),
                options: self.options.join(", "),
            }),
        }
    }
}

use serde_json::Value;

use super::{Affordance, InputError, InputView, Rule, Step, StepLabels, TextKind};
use crate::label::LabelContext;
use crate::store::{DataStore, StepData};

pub const DATA_TEXT: &str = "text";

/// Free text entry.
#[derive(Debug, Clone)]
pub struct TextStep {
    key: String,
    labels: StepLabels,
    kind: TextKind,
    rule: Rule<str>,
    value: String,
    affordance: Affordance,
}

impl TextStep {
    pub fn new(key: impl Into<String>, labels: StepLabels) -> Self {
        Self {
            key: key.into(),
            labels,
            kind: TextKind::Plain,
            rule: Rule::Any,
            value: String::new(),
            affordance: Affordance::Next,
        }
    }

    pub fn with_kind(mut self, kind: TextKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_rule(mut self, rule: Rule<str>) -> Self {
        self.rule = rule;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Text saved by the step with data key `key`.
    pub fn text<'a>(store: &'a DataStore, key: &str) -> Option<&'a str> {
        store.field(key, DATA_TEXT).and_then(Value::as_str)
    }
}

impl Step for TextStep {
    fn data_key(&self) -> &str {
        &self.key
    }

    fn labels(&self) -> &StepLabels {
        &self.labels
    }

    fn validate(&self) -> bool {
        self.rule.check(&self.value)
    }

    fn snapshot(&self) -> StepData {
        let mut data = StepData::new();
        data.insert(DATA_TEXT.into(), Value::String(self.value.clone()));
        data
    }

    fn load(&mut self, data: &StepData) {
        self.value = data
            .get(DATA_TEXT)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
    }

    fn update_view(&mut self, is_final: bool) {
        self.affordance = if is_final {
            Affordance::Done
        } else {
            Affordance::Next
        };
    }

    fn view(&self, _ctx: &dyn LabelContext) -> InputView {
        InputView::Text {
            value: self.value.clone(),
            kind: self.kind,
            affordance: self.affordance,
        }
    }

    fn apply_input(&mut self, raw: &str) -> Result<(), InputError> {
        if self.kind == TextKind::Number {
            let trimmed = raw.trim();
            if !trimmed.is_empty() && trimmed.parse::<f64>().is_err() {
                return Err(InputError::NotANumber(trimmed.to_string()));
            }
            self.value = trimmed.to_string();
        } else {
            self.value = raw.to_string();
        }
        Ok(())
    }
}

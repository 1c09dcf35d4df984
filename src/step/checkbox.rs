use serde_json::Value;

use super::{InputError, InputView, Rule, Step, StepLabels};
use crate::label::{Label, LabelContext};
use crate::store::{DataStore, StepData};

pub const DATA_CHECKED: &str = "checked";

/// A single labelled checkbox, e.g. accepting terms.
#[derive(Debug, Clone)]
pub struct CheckBoxStep {
    key: String,
    labels: StepLabels,
    text: Label,
    checked: bool,
    rule: Rule<bool>,
}

impl CheckBoxStep {
    pub fn new(key: impl Into<String>, labels: StepLabels, text: impl Into<Label>) -> Self {
        Self {
            key: key.into(),
            labels,
            text: text.into(),
            checked: false,
            rule: Rule::Any,
        }
    }

    pub fn with_rule(mut self, rule: Rule<bool>) -> Self {
        self.rule = rule;
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Checkbox state saved by the step with data key `key`.
    pub fn checked(store: &DataStore, key: &str) -> Option<bool> {
        store.field(key, DATA_CHECKED).and_then(Value::as_bool)
    }
}

fn parse_checked(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" | "x" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

impl Step for CheckBoxStep {
    fn data_key(&self) -> &str {
        &self.key
    }

    fn labels(&self) -> &StepLabels {
        &self.labels
    }

    fn validate(&self) -> bool {
        self.rule.check(&self.checked)
    }

    fn snapshot(&self) -> StepData {
        let mut data = StepData::new();
        data.insert(DATA_CHECKED.into(), Value::Bool(self.checked));
        data
    }

    fn load(&mut self, data: &StepData) {
        self.checked = data
            .get(DATA_CHECKED)
            .and_then(Value::as_bool)
            .unwrap_or(false);
    }

    fn view(&self, ctx: &dyn LabelContext) -> InputView {
        InputView::Toggle {
            label: self.text.resolve(ctx),
            checked: self.checked,
        }
    }

    fn apply_input(&mut self, raw: &str) -> Result<(), InputError> {
        if raw.trim().eq_ignore_ascii_case("toggle") {
            self.checked = !self.checked;
            return Ok(());
        }
        self.checked =
            parse_checked(raw).ok_or_else(|| InputError::NotABoolean(raw.trim().to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eula() -> CheckBoxStep {
        CheckBoxStep::new("eula", StepLabels::new("Terms"), "I accept the terms")
            .with_rule(Rule::<bool>::must_be_checked())
    }

    #[test]
    fn must_be_checked_to_validate() {
        let mut step = eula();
        assert!(!step.validate());
        step.apply_input("yes").unwrap();
        assert!(step.validate());
        step.apply_input("toggle").unwrap();
        assert!(!step.is_checked());
    }

    #[test]
    fn rejects_unclear_answers() {
        let mut step = eula();
        assert_eq!(
            step.apply_input("maybe"),
            Err(InputError::NotABoolean("maybe".into()))
        );
        assert!(!step.is_checked());
    }

    #[test]
    fn view_resolves_checkbox_text() {
        let step = eula();
        assert_eq!(
            step.view(&()),
            InputView::Toggle {
                label: "I accept the terms".into(),
                checked: false
            }
        );
    }
}

use serde_json::Value;

use super::{InputError, InputView, Rule, Step, StepLabels};
use crate::label::LabelContext;
use crate::store::{DataStore, StepData};

pub const DATA_PROGRESS: &str = "progress";

/// Integer picked on a bounded scale. The value never leaves `[min, max]`.
#[derive(Debug, Clone)]
pub struct SeekBarStep {
    key: String,
    labels: StepLabels,
    min: i64,
    max: i64,
    value: i64,
    rule: Rule<i64>,
}

impl SeekBarStep {
    pub fn new(key: impl Into<String>, labels: StepLabels, min: i64, max: i64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            key: key.into(),
            labels,
            min,
            max,
            value: min,
            rule: Rule::Any,
        }
    }

    pub fn with_rule(mut self, rule: Rule<i64>) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_value(mut self, value: i64) -> Self {
        self.value = value.clamp(self.min, self.max);
        self
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Value saved by the step with data key `key`.
    pub fn progress(store: &DataStore, key: &str) -> Option<i64> {
        store.field(key, DATA_PROGRESS).and_then(Value::as_i64)
    }
}

impl Step for SeekBarStep {
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
        data.insert(DATA_PROGRESS.into(), Value::from(self.value));
        data
    }

    fn load(&mut self, data: &StepData) {
        self.value = data
            .get(DATA_PROGRESS)
            .and_then(Value::as_i64)
            .map(|value| value.clamp(self.min, self.max))
            .unwrap_or(self.min);
    }

    fn view(&self, _ctx: &dyn LabelContext) -> InputView {
        InputView::Range {
            min: self.min,
            max: self.max,
            value: self.value,
        }
    }

    fn apply_input(&mut self, raw: &str) -> Result<(), InputError> {
        let trimmed = raw.trim();
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;
        self.value = value.clamp(self.min, self.max);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn height() -> SeekBarStep {
        SeekBarStep::new("height", StepLabels::new("Height"), 150, 180)
            .with_rule(Rule::<i64>::at_least(160))
    }

    #[test]
    fn starts_at_minimum_and_clamps_input() {
        let mut step = height();
        assert_eq!(step.value(), 150);
        assert!(!step.validate());

        step.apply_input("250").unwrap();
        assert_eq!(step.value(), 180);
        step.apply_input("-3").unwrap();
        assert_eq!(step.value(), 150);
        step.apply_input("165").unwrap();
        assert!(step.validate());
    }

    #[test]
    fn rejects_non_numeric_input() {
        let mut step = height().with_value(170);
        assert!(step.apply_input("tall").is_err());
        assert_eq!(step.value(), 170);
    }

    #[test]
    fn swapped_bounds_are_normalised() {
        let step = SeekBarStep::new("x", StepLabels::new("X"), 10, 1);
        assert_eq!(
            step.view(&()),
            InputView::Range {
                min: 1,
                max: 10,
                value: 1
            }
        );
    }
}

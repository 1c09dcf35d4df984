use chrono::NaiveDate;
use serde_json::Value;

use super::{InputError, InputView, Rule, Step, StepLabels};
use crate::label::LabelContext;
use crate::store::{DataStore, StepData};

pub const DATA_DATE: &str = "date";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar date entry. An unset date fails validation unless the step is
/// optional.
#[derive(Debug, Clone)]
pub struct DateStep {
    key: String,
    labels: StepLabels,
    value: Option<NaiveDate>,
    rule: Rule<NaiveDate>,
    optional: bool,
}

impl DateStep {
    pub fn new(key: impl Into<String>, labels: StepLabels) -> Self {
        Self {
            key: key.into(),
            labels,
            value: None,
            rule: Rule::Any,
            optional: false,
        }
    }

    pub fn with_rule(mut self, rule: Rule<NaiveDate>) -> Self {
        self.rule = rule;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn value(&self) -> Option<NaiveDate> {
        self.value
    }

    /// Date saved by the step with data key `key`.
    pub fn date(store: &DataStore, key: &str) -> Option<NaiveDate> {
        store
            .field(key, DATA_DATE)
            .and_then(Value::as_str)
            .and_then(|text| NaiveDate::parse_from_str(text, DATE_FORMAT).ok())
    }
}

impl Step for DateStep {
    fn data_key(&self) -> &str {
        &self.key
    }

    fn labels(&self) -> &StepLabels {
        &self.labels
    }

    fn validate(&self) -> bool {
        match &self.value {
            Some(date) => self.rule.check(date),
            None => self.optional,
        }
    }

    fn snapshot(&self) -> StepData {
        let mut data = StepData::new();
        let value = self
            .value
            .map(|date| Value::String(date.format(DATE_FORMAT).to_string()))
            .unwrap_or(Value::Null);
        data.insert(DATA_DATE.into(), value);
        data
    }

    fn load(&mut self, data: &StepData) {
        self.value = data
            .get(DATA_DATE)
            .and_then(Value::as_str)
            .and_then(|text| NaiveDate::parse_from_str(text, DATE_FORMAT).ok());
    }

    fn view(&self, _ctx: &dyn LabelContext) -> InputView {
        InputView::Date { value: self.value }
    }

    fn apply_input(&mut self, raw: &str) -> Result<(), InputError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.value = None;
            return Ok(());
        }
        let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map_err(|_| InputError::InvalidDate(trimmed.to_string()))?;
        self.value = Some(date);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unset_date_is_invalid_unless_optional() {
        let step = DateStep::new("birthday", StepLabels::new("Birthday"));
        assert!(!step.validate());
        assert!(step.optional().validate());
    }

    #[test]
    fn rule_applies_to_entered_date() {
        let mut step = DateStep::new("birthday", StepLabels::new("Birthday"))
            .with_rule(Rule::<NaiveDate>::min_age(14, ymd(2025, 1, 1)));
        step.apply_input("2015-05-05").unwrap();
        assert!(!step.validate());
        step.apply_input("1990-05-05").unwrap();
        assert!(step.validate());
    }

    #[test]
    fn invalid_text_is_rejected() {
        let mut step = DateStep::new("birthday", StepLabels::new("Birthday"));
        step.apply_input("1990-01-02").unwrap();
        assert_eq!(
            step.apply_input("02/01/1990"),
            Err(InputError::InvalidDate("02/01/1990".into()))
        );
        assert_eq!(step.value(), Some(ymd(1990, 1, 2)));
    }

    #[test]
    fn saves_iso_date() {
        let mut store = DataStore::new();
        let mut step = DateStep::new("birthday", StepLabels::new("Birthday"));
        step.apply_input("2001-09-30").unwrap();
        step.save(&mut store);
        assert_eq!(
            store.field("birthday", DATA_DATE),
            Some(&Value::String("2001-09-30".into()))
        );
        assert_eq!(DateStep::date(&store, "birthday"), Some(ymd(2001, 9, 30)));
    }
}

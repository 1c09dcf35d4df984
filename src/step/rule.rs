use std::fmt;
use std::sync::Arc;

use chrono::{Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// Acceptance rule for a step's input value.
pub enum Rule<T: ?Sized> {
    Any,
    Custom(Predicate<T>),
}

impl<T: ?Sized> Rule<T> {
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Rule::Custom(Arc::new(predicate))
    }

    pub fn check(&self, value: &T) -> bool {
        match self {
            Rule::Any => true,
            Rule::Custom(predicate) => predicate(value),
        }
    }
}

impl<T: ?Sized> Default for Rule<T> {
    fn default() -> Self {
        Rule::Any
    }
}

impl<T: ?Sized> Clone for Rule<T> {
    fn clone(&self) -> Self {
        match self {
            Rule::Any => Rule::Any,
            Rule::Custom(predicate) => Rule::Custom(Arc::clone(predicate)),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Any => f.write_str("Rule::Any"),
            Rule::Custom(_) => f.write_str("Rule::Custom(..)"),
        }
    }
}

impl Rule<str> {
    pub fn non_empty() -> Self {
        Rule::custom(|input: &str| !input.trim().is_empty())
    }

    pub fn min_length(min: usize) -> Self {
        Rule::custom(move |input: &str| input.chars().count() >= min)
    }

    pub fn email() -> Self {
        Rule::custom(|input: &str| EMAIL_PATTERN.is_match(input.trim()))
    }

    /// Accepts input matching `pattern` anywhere; anchor it for full matches.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        Ok(Rule::custom(move |input: &str| regex.is_match(input)))
    }
}

impl Rule<bool> {
    pub fn must_be_checked() -> Self {
        Rule::custom(|checked: &bool| *checked)
    }
}

impl Rule<i64> {
    pub fn at_least(min: i64) -> Self {
        Rule::custom(move |value: &i64| *value >= min)
    }

    pub fn at_most(max: i64) -> Self {
        Rule::custom(move |value: &i64| *value <= max)
    }
}

impl Rule<NaiveDate> {
    pub fn not_after(latest: NaiveDate) -> Self {
        Rule::custom(move |date: &NaiveDate| *date <= latest)
    }

    /// Accepts birthdays at least `years` before `today`.
    pub fn min_age(years: u32, today: NaiveDate) -> Self {
        let cutoff = today.checked_sub_months(Months::new(years.saturating_mul(12)));
        Rule::custom(move |birthday: &NaiveDate| cutoff.is_some_and(|cutoff| *birthday <= cutoff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rules() {
        assert!(Rule::<str>::Any.check(""));
        assert!(!Rule::<str>::non_empty().check("   "));
        assert!(Rule::<str>::min_length(5).check("hunter"));
        assert!(!Rule::<str>::min_length(5).check("abcd"));
        assert!(Rule::<str>::email().check("jane@example.com"));
        assert!(!Rule::<str>::email().check("jane@example"));
        assert!(!Rule::<str>::email().check("not an email"));
    }

    #[test]
    fn pattern_rule_reports_bad_regex() {
        assert!(Rule::<str>::pattern("(").is_err());
        let zip = Rule::<str>::pattern(r"^\d{5}$").unwrap();
        assert!(zip.check("10115"));
        assert!(!zip.check("1011"));
    }

    #[test]
    fn min_age_rule_compares_against_cutoff() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let rule = Rule::<NaiveDate>::min_age(14, today);
        assert!(rule.check(&NaiveDate::from_ymd_opt(2010, 6, 1).unwrap()));
        assert!(!rule.check(&NaiveDate::from_ymd_opt(2010, 6, 2).unwrap()));
    }

    #[test]
    fn numeric_and_boolean_rules() {
        assert!(Rule::<i64>::at_least(160).check(&160));
        assert!(!Rule::<i64>::at_least(160).check(&159));
        assert!(Rule::<i64>::at_most(3).check(&3));
        assert!(Rule::<bool>::must_be_checked().check(&true));
        assert!(!Rule::<bool>::must_be_checked().check(&false));
    }
}

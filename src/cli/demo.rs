//! The sign-up form run by `stepform_cli`.

use chrono::NaiveDate;

use crate::config::Config;
use crate::label::{Catalog, Label, LabelContext};
use crate::step::{
    CheckBoxStep, DateStep, Rule, SeekBarStep, Step, StepLabels, TextKind, TextStep,
};
use crate::store::DataStore;
use crate::wizard::{Snapshot, Wizard};

pub const FORM_NAME: &str = "Sign Up";

pub const EULA: &str = "eula";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const BIRTHDAY: &str = "birthday";
pub const HEIGHT: &str = "height";
pub const CITY: &str = "city";

const MIN_AGE_YEARS: u32 = 14;
const MIN_PASSWORD_LENGTH: usize = 5;
const HEIGHT_RANGE: (i64, i64) = (150, 180);
const MIN_HEIGHT: i64 = 160;

/// Steps of the sign-up form. `today` anchors the minimum-age check.
pub fn demo_steps(today: NaiveDate) -> Vec<Box<dyn Step>> {
    vec![
        Box::new(
            CheckBoxStep::new(
                EULA,
                StepLabels::keyed(EULA),
                Label::key("eula.checkbox"),
            )
            .with_rule(Rule::<bool>::must_be_checked()),
        ),
        Box::new(
            TextStep::new(EMAIL, StepLabels::keyed(EMAIL))
                .with_kind(TextKind::Email)
                .with_rule(Rule::<str>::email()),
        ),
        Box::new(
            TextStep::new(PASSWORD, StepLabels::keyed(PASSWORD))
                .with_kind(TextKind::Password)
                .with_rule(Rule::<str>::min_length(MIN_PASSWORD_LENGTH)),
        ),
        Box::new(
            DateStep::new(BIRTHDAY, StepLabels::keyed(BIRTHDAY))
                .with_rule(Rule::<NaiveDate>::min_age(MIN_AGE_YEARS, today)),
        ),
        Box::new(
            SeekBarStep::new(HEIGHT, StepLabels::keyed(HEIGHT), HEIGHT_RANGE.0, HEIGHT_RANGE.1)
                .with_rule(Rule::<i64>::at_least(MIN_HEIGHT)),
        ),
        Box::new(TextStep::new(CITY, StepLabels::keyed(CITY))),
    ]
}

/// Built-in strings for `locale`. Unknown locales get English.
pub fn catalog_for(locale: &str) -> Catalog {
    match locale {
        "de-DE" | "de" => german(),
        _ => english(),
    }
}

fn english() -> Catalog {
    Catalog::new("en-US")
        .with("eula.title", "Terms of use")
        .with("eula.details", "Please read and accept the terms to continue.")
        .with("eula.error", "You must accept the terms.")
        .with("eula.checkbox", "I accept the terms of use")
        .with("email.title", "Email")
        .with("email.details", "We will send a confirmation to this address.")
        .with("email.error", "Enter a valid email address.")
        .with("password.title", "Password")
        .with("password.details", "At least 5 characters.")
        .with("password.error", "The password is too short.")
        .with("birthday.title", "Birthday")
        .with("birthday.details", "Format: YYYY-MM-DD.")
        .with("birthday.error", "You must be at least 14 years old.")
        .with("height.title", "Height")
        .with("height.details", "Your height in centimetres.")
        .with("height.error", "Height must be at least 160 cm.")
        .with("city.title", "City")
        .with("city.details", "Where do you live? Optional.")
        .with("city.error", "")
        .with("summary.title", "Thanks for signing up!")
        .with("summary.yes", "yes")
        .with("summary.no", "no")
}

fn german() -> Catalog {
    Catalog::new("de-DE")
        .with("eula.title", "Nutzungsbedingungen")
        .with("eula.details", "Bitte lies und akzeptiere die Bedingungen.")
        .with("eula.error", "Du musst die Bedingungen akzeptieren.")
        .with("eula.checkbox", "Ich akzeptiere die Nutzungsbedingungen")
        .with("email.title", "E-Mail")
        .with("email.details", "Wir senden eine Bestätigung an diese Adresse.")
        .with("email.error", "Gib eine gültige E-Mail-Adresse ein.")
        .with("password.title", "Passwort")
        .with("password.details", "Mindestens 5 Zeichen.")
        .with("password.error", "Das Passwort ist zu kurz.")
        .with("birthday.title", "Geburtstag")
        .with("birthday.details", "Format: JJJJ-MM-TT.")
        .with("birthday.error", "Du musst mindestens 14 Jahre alt sein.")
        .with("height.title", "Größe")
        .with("height.details", "Deine Größe in Zentimetern.")
        .with("height.error", "Die Größe muss mindestens 160 cm betragen.")
        .with("city.title", "Stadt")
        .with("city.details", "Wo wohnst du? Optional.")
        .with("city.error", "")
        .with("summary.title", "Danke für deine Anmeldung!")
        .with("summary.yes", "ja")
        .with("summary.no", "nein")
}

/// Human-readable summary of a completed sign-up.
pub fn describe_result(data: &DataStore, labels: &dyn LabelContext) -> String {
    let text = |key: &str| Label::key(key).resolve(labels);
    let title = |step: &str| text(&format!("{step}.title"));

    let eula = match CheckBoxStep::checked(data, EULA) {
        Some(true) => text("summary.yes"),
        _ => text("summary.no"),
    };
    let password = TextStep::text(data, PASSWORD)
        .map(|value| "*".repeat(value.chars().count()))
        .unwrap_or_default();
    let birthday = DateStep::date(data, BIRTHDAY)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".into());
    let height = SeekBarStep::progress(data, HEIGHT)
        .map(|cm| format!("{cm} cm"))
        .unwrap_or_else(|| "-".into());
    let city = TextStep::text(data, CITY)
        .filter(|city| !city.trim().is_empty())
        .unwrap_or("-");

    [
        text("summary.title"),
        format!("  {}: {eula}", title(EULA)),
        format!("  {}: {}", title(EMAIL), TextStep::text(data, EMAIL).unwrap_or("-")),
        format!("  {}: {password}", title(PASSWORD)),
        format!("  {}: {birthday}", title(BIRTHDAY)),
        format!("  {}: {height}", title(HEIGHT)),
        format!("  {}: {city}", title(CITY)),
    ]
    .join("\n")
}

/// Wizard over the demo form, labelled and configured from `config`.
pub fn build_wizard(config: &Config, resume: Option<Snapshot>, today: NaiveDate) -> Wizard {
    let catalog = catalog_for(&config.locale);
    let summary_labels = catalog.clone();

    let mut builder = Wizard::builder(demo_steps(today))
        .form(FORM_NAME)
        .options(config.wizard_options())
        .labels(catalog)
        .on_finished(|data| tracing::info!(entries = data.len(), "sign-up collected"))
        .terminal_view(move |data| describe_result(data, &summary_labels));
    if let Some(snapshot) = resume {
        builder = builder.resume(snapshot);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{RenderModel, Transition};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        assert_eq!(catalog_for("fr-FR").locale(), "en-US");
        assert_eq!(catalog_for("de-DE").locale(), "de-DE");
    }

    #[test]
    fn sign_up_completes_with_summary_view() {
        let mut wizard = build_wizard(&Config::default(), None, today());
        for input in ["yes", "jane@example.com", "secret", "1990-05-05", "170", ""] {
            wizard.update_input(input).unwrap();
            assert_ne!(wizard.advance(), Transition::Rejected, "input {input:?}");
        }

        assert!(wizard.is_completed());
        let RenderModel::Finished { view: Some(view), .. } = wizard.render_model() else {
            panic!("expected finished view");
        };
        assert!(view.starts_with("Thanks for signing up!"));
        assert!(view.contains("  Password: ******"));
        assert!(view.contains("  Height: 170 cm"));
        assert!(view.contains("  City: -"));
    }

    #[test]
    fn too_young_is_rejected_with_localized_error() {
        let config = Config {
            locale: "de-DE".into(),
            ..Config::default()
        };
        let mut wizard = build_wizard(&config, None, today());
        for input in ["x", "jane@example.com", "secret"] {
            wizard.update_input(input).unwrap();
            wizard.advance();
        }
        wizard.update_input("2020-01-01").unwrap();
        assert_eq!(wizard.advance(), Transition::Rejected);
        assert_eq!(
            wizard.error_message(),
            Some("Du musst mindestens 14 Jahre alt sein.")
        );
    }
}

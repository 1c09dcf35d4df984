use insta::assert_snapshot;

use stepform_core::step::{CheckBoxStep, DateStep, OptionStep, SeekBarStep, TextKind, TextStep};
use stepform_core::{
    render_text, Catalog, Label, RenderModel, Rule, Step, StepLabels, Transition, Wizard,
};

fn sign_up() -> Wizard {
    let steps: Vec<Box<dyn Step>> = vec![
        Box::new(
            CheckBoxStep::new("eula", StepLabels::keyed("eula"), Label::key("eula.checkbox"))
                .with_rule(Rule::<bool>::must_be_checked()),
        ),
        Box::new(
            TextStep::new("password", StepLabels::new("Password"))
                .with_kind(TextKind::Password)
                .with_rule(Rule::<str>::min_length(5)),
        ),
        Box::new(OptionStep::new(
            "size",
            StepLabels::new("Size").with_details("Pick one."),
            ["S", "M", "L"],
        )),
    ];
    let catalog = Catalog::new("en-US")
        .with("eula.title", "Terms")
        .with("eula.details", "Read them first.")
        .with("eula.error", "Please accept.")
        .with("eula.checkbox", "I accept");
    Wizard::builder(steps).labels(catalog).build()
}

fn rendered(wizard: &Wizard) -> String {
    render_text(&wizard.render_model())
}

#[test]
fn renders_each_step_of_a_session() {
    let mut wizard = sign_up();
    assert_snapshot!(rendered(&wizard), @r"
    [1/3] Terms
    Read them first.
    [--------------------]   0%
    [ ] I accept
    ");

    assert_eq!(wizard.advance(), Transition::Rejected);
    assert_snapshot!(rendered(&wizard), @r"
    [1/3] Terms
    Read them first.
    [--------------------]   0%
    [ ] I accept
    ! Please accept.
    ");

    wizard.update_input("yes").unwrap();
    wizard.advance();
    wizard.update_input("hunter2").unwrap();
    assert_snapshot!(rendered(&wizard), @r"
    [2/3] Password
    [#######-------------]  33%
    > *******
    [Next]
    ");

    wizard.advance();
    wizard.update_input("2").unwrap();
    assert_snapshot!(rendered(&wizard), @r"
    [3/3] Size
    Pick one.
    [#############-------]  67%
    ( ) 1. S
    (*) 2. M
    ( ) 3. L
    ");

    assert_eq!(wizard.advance(), Transition::Completed);
    assert_snapshot!(rendered(&wizard), @r#"
    Completed.
      eula: {"checked":true}
      password: {"text":"hunter2"}
      size: {"selected_option":1}
    "#);
}

#[test]
fn render_model_reports_position_and_progress() {
    let mut wizard = sign_up();
    wizard.update_input("x").unwrap();
    wizard.advance();

    let RenderModel::Step(step) = wizard.render_model() else {
        panic!("expected a step");
    };
    assert_eq!(step.position(), "2/3");
    assert_eq!(step.total, 3);
    assert!(!step.is_final);
    assert!((step.progress - 1.0 / 3.0).abs() < f64::EPSILON);
    assert_eq!(step.error, None);
}

#[test]
fn renders_range_and_date_inputs() {
    let steps: Vec<Box<dyn Step>> = vec![
        Box::new(SeekBarStep::new("height", StepLabels::new("Height"), 150, 180)),
        Box::new(DateStep::new("birthday", StepLabels::new("Birthday"))),
    ];
    let mut wizard = Wizard::new(steps);
    assert_snapshot!(rendered(&wizard), @r"
    [1/2] Height
    [--------------------]   0%
    > 150 in [150, 180]
    ");

    wizard.advance();
    assert_snapshot!(rendered(&wizard), @r"
    [2/2] Birthday
    [##########----------]  50%
    > (not set, YYYY-MM-DD)
    ");
}

#![doc(test(attr(deny(warnings))))]

//! Stepform Core drives single-input, step-by-step forms: an ordered list of
//! steps, forward navigation gated on per-step validation, a cumulative data
//! store, and resumable sessions. Rendering is left to the host; the bundled
//! `stepform_cli` binary is a terminal reference host.

pub mod cli;
pub mod config;
pub mod errors;
pub mod label;
pub mod step;
pub mod store;
pub mod utils;
pub mod wizard;

pub use errors::FormError;
pub use label::{Catalog, Label, LabelContext};
pub use step::{InputError, InputView, Rule, Step, StepLabels};
pub use store::{DataStore, StepData};
pub use wizard::{
    render_text, RenderModel, SharedWizard, Snapshot, StepRender, Transition, Wizard,
    WizardBuilder, WizardOptions,
};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Stepform tracing initialized.");
    });
}

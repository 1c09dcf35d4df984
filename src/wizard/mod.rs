//! Navigation state machine driving an ordered list of steps.
//!
//! The wizard sits either on step `i` (`0..N`) or in the terminal completed
//! state (`i == N`). Forward navigation is gated on the current step's
//! validation; backward navigation commits the current input unvalidated.
//! Invalid operations (back from the first step, anything after completion)
//! are ignored rather than treated as errors.

mod render;
mod shared;
mod snapshot;

pub use render::{render_text, RenderModel, StepRender};
pub use shared::SharedWizard;
pub use snapshot::Snapshot;

use std::fmt;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::label::LabelContext;
use crate::step::{InputError, Step};
use crate::store::DataStore;

type FinishedCallback = Box<dyn FnOnce(&DataStore)>;
type TerminalView = Box<dyn Fn(&DataStore) -> String>;

const DEFAULT_FORM: &str = "form";

/// Policy switches for error display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardOptions {
    /// Keep the first error text while validation keeps failing instead of
    /// recomputing it on every attempt.
    pub latch_errors: bool,
    /// Drop a pending error when navigating back.
    pub clear_error_on_retreat: bool,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            latch_errors: true,
            clear_error_on_retreat: true,
        }
    }
}

/// Outcome of a navigation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: usize, to: usize },
    /// The current step failed validation; nothing moved and nothing was saved.
    Rejected,
    Completed,
    /// Not valid in the current state.
    Ignored,
    /// Another event was still being handled.
    Busy,
}

pub struct Wizard {
    steps: Vec<Box<dyn Step>>,
    index: usize,
    error: Option<String>,
    store: DataStore,
    options: WizardOptions,
    labels: Box<dyn LabelContext>,
    on_finished: Option<FinishedCallback>,
    terminal_view: Option<TerminalView>,
    finished_view: Option<String>,
    form: String,
    session_id: Uuid,
}

impl Wizard {
    /// Wizard over `steps` with default options and no callbacks.
    pub fn new(steps: Vec<Box<dyn Step>>) -> Self {
        Self::builder(steps).build()
    }

    pub fn builder(steps: Vec<Box<dyn Step>>) -> WizardBuilder {
        WizardBuilder {
            steps,
            resume: None,
            data: DataStore::new(),
            options: WizardOptions::default(),
            labels: Box::new(()),
            on_finished: None,
            terminal_view: None,
            form: DEFAULT_FORM.to_string(),
        }
    }

    /// Moves forward if the current step validates.
    pub fn advance(&mut self) -> Transition {
        let Some(step) = self.steps.get(self.index) else {
            return Transition::Ignored;
        };

        if !step.validate() {
            if self.error.is_none() || !self.options.latch_errors {
                self.error = Some(step.error(self.labels.as_ref()));
            }
            debug!(form = %self.form, step = self.index, "validation failed");
            return Transition::Rejected;
        }

        self.error = None;
        step.save(&mut self.store);
        let from = self.index;
        self.index += 1;
        self.enter_current();

        if self.is_completed() {
            Transition::Completed
        } else {
            debug!(form = %self.form, from, to = self.index, "advanced");
            Transition::Moved {
                from,
                to: self.index,
            }
        }
    }

    /// Moves back one step, committing the current input without validating it.
    pub fn retreat(&mut self) -> Transition {
        if self.index == 0 || self.is_completed() {
            return Transition::Ignored;
        }

        let from = self.index;
        self.steps[from].save(&mut self.store);
        if self.options.clear_error_on_retreat {
            self.error = None;
        }
        self.index -= 1;
        self.enter_current();
        debug!(form = %self.form, from, to = self.index, "retreated");
        Transition::Moved {
            from,
            to: self.index,
        }
    }

    /// Forwards raw input to the current step. Does nothing once completed.
    pub fn update_input(&mut self, raw: &str) -> Result<(), InputError> {
        match self.steps.get_mut(self.index) {
            Some(step) => step.apply_input(raw),
            None => Ok(()),
        }
    }

    /// Commits the current step and captures everything needed to resume here.
    ///
    /// After completion the snapshot records `step_index == step_count()`.
    /// Such a snapshot is not meant to be resumed: doing so reopens the last
    /// step, so hosts should discard it instead.
    pub fn suspend(&mut self) -> Snapshot {
        if let Some(step) = self.steps.get(self.index) {
            step.save(&mut self.store);
        }
        debug!(form = %self.form, step = self.index, "suspended");
        Snapshot {
            session_id: self.session_id,
            form: self.form.clone(),
            step_index: self.index,
            saved_at: Utc::now(),
            data: self.store.clone(),
        }
    }

    pub fn render_model(&self) -> RenderModel<'_> {
        let Some(step) = self.steps.get(self.index) else {
            return RenderModel::Finished {
                data: &self.store,
                view: self.finished_view.as_deref(),
            };
        };

        let ctx = self.labels.as_ref();
        let total = self.steps.len();
        RenderModel::Step(StepRender {
            index: self.index,
            total,
            title: step.title(ctx),
            details: step.details(ctx),
            error: self.error.clone(),
            is_final: self.index + 1 == total,
            progress: self.index as f64 / total as f64,
            input: step.view(ctx),
        })
    }

    pub fn step_index(&self) -> usize {
        self.index
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_completed(&self) -> bool {
        self.index >= self.steps.len()
    }

    pub fn error_active(&self) -> bool {
        self.error.is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn data(&self) -> &DataStore {
        &self.store
    }

    pub fn current_step(&self) -> Option<&dyn Step> {
        self.steps.get(self.index).map(|step| step.as_ref())
    }

    pub fn labels(&self) -> &dyn LabelContext {
        self.labels.as_ref()
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn options(&self) -> WizardOptions {
        self.options
    }

    /// Restores and decorates the step at the current index, or completes the
    /// form when the index has run past the last step.
    fn enter_current(&mut self) {
        let total = self.steps.len();
        match self.steps.get_mut(self.index) {
            Some(step) => {
                step.restore(&self.store);
                step.update_view(self.index + 1 == total);
            }
            None => self.finish(),
        }
    }

    fn finish(&mut self) {
        self.error = None;
        info!(form = %self.form, steps = self.steps.len(), "form completed");
        if let Some(callback) = self.on_finished.take() {
            callback(&self.store);
        }
        self.finished_view = self.terminal_view.as_ref().map(|view| view(&self.store));
    }
}

impl fmt::Debug for Wizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wizard")
            .field("form", &self.form)
            .field("session_id", &self.session_id)
            .field("step_index", &self.index)
            .field("step_count", &self.steps.len())
            .field("error", &self.error)
            .field("data", &self.store)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Collects construction parameters for a [`Wizard`].
pub struct WizardBuilder {
    steps: Vec<Box<dyn Step>>,
    resume: Option<Snapshot>,
    data: DataStore,
    options: WizardOptions,
    labels: Box<dyn LabelContext>,
    on_finished: Option<FinishedCallback>,
    terminal_view: Option<TerminalView>,
    form: String,
}

impl WizardBuilder {
    /// Resumes a suspended session: its position, data and session id.
    pub fn resume(mut self, snapshot: Snapshot) -> Self {
        self.resume = Some(snapshot);
        self
    }

    /// Initial data for a fresh session. Ignored when resuming.
    pub fn data(mut self, data: DataStore) -> Self {
        self.data = data;
        self
    }

    pub fn options(mut self, options: WizardOptions) -> Self {
        self.options = options;
        self
    }

    pub fn labels(mut self, labels: impl LabelContext + 'static) -> Self {
        self.labels = Box::new(labels);
        self
    }

    /// Called once, with the final data, when the last step is committed.
    pub fn on_finished(mut self, callback: impl FnOnce(&DataStore) + 'static) -> Self {
        self.on_finished = Some(Box::new(callback));
        self
    }

    /// Builds the completed-state view, once, on entering that state.
    pub fn terminal_view(mut self, view: impl Fn(&DataStore) -> String + 'static) -> Self {
        self.terminal_view = Some(Box::new(view));
        self
    }

    pub fn form(mut self, name: impl Into<String>) -> Self {
        self.form = name.into();
        self
    }

    pub fn build(self) -> Wizard {
        let total = self.steps.len();
        let (index, store, session_id) = match self.resume {
            Some(snapshot) => {
                if snapshot.form != self.form {
                    warn!(
                        expected = %self.form,
                        found = %snapshot.form,
                        "resuming a session saved by a different form"
                    );
                }
                let index = if snapshot.step_index < total {
                    snapshot.step_index
                } else {
                    warn!(
                        saved = snapshot.step_index,
                        steps = total,
                        "saved position past the last step; resuming at the last step"
                    );
                    total.saturating_sub(1)
                };
                info!(form = %self.form, step = index, "session resumed");
                (index, snapshot.data, snapshot.session_id)
            }
            None => (0, self.data, Uuid::new_v4()),
        };

        let mut wizard = Wizard {
            steps: self.steps,
            index,
            error: None,
            store,
            options: self.options,
            labels: self.labels,
            on_finished: self.on_finished,
            terminal_view: self.terminal_view,
            finished_view: None,
            form: self.form,
            session_id,
        };
        wizard.enter_current();
        wizard
    }
}

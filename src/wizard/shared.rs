use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use super::{Snapshot, Transition, Wizard};
use crate::step::InputError;

/// Handle for hosts whose event delivery can re-enter the wizard, e.g. a
/// completion callback that fires another navigation event.
///
/// Events arriving while another one is still being handled are dropped:
/// navigation reports [`Transition::Busy`], the other calls return `None`.
#[derive(Clone)]
pub struct SharedWizard {
    inner: Rc<RefCell<Wizard>>,
}

impl SharedWizard {
    pub fn new(wizard: Wizard) -> Self {
        Self {
            inner: Rc::new(RefCell::new(wizard)),
        }
    }

    pub fn advance(&self) -> Transition {
        match self.inner.try_borrow_mut() {
            Ok(mut wizard) => wizard.advance(),
            Err(_) => {
                debug!("advance dropped while another event is in progress");
                Transition::Busy
            }
        }
    }

    pub fn retreat(&self) -> Transition {
        match self.inner.try_borrow_mut() {
            Ok(mut wizard) => wizard.retreat(),
            Err(_) => {
                debug!("retreat dropped while another event is in progress");
                Transition::Busy
            }
        }
    }

    pub fn update_input(&self, raw: &str) -> Option<Result<(), InputError>> {
        let mut wizard = self.inner.try_borrow_mut().ok()?;
        Some(wizard.update_input(raw))
    }

    pub fn suspend(&self) -> Option<Snapshot> {
        let mut wizard = self.inner.try_borrow_mut().ok()?;
        Some(wizard.suspend())
    }

    /// Runs `f` against the wizard unless it is busy.
    pub fn with<R>(&self, f: impl FnOnce(&Wizard) -> R) -> Option<R> {
        let wizard = self.inner.try_borrow().ok()?;
        Some(f(&wizard))
    }
}

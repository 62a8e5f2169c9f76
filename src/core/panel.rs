//! Parameter panel binding
//!
//! Decides which UI event regenerates the galaxy. In instant mode every
//! change does; in deferred mode only a commit (drag released, text edit
//! finished) does. Exactly one of the two triggers is active at a time.

use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateMode {
    Instant,
    #[default]
    Deferred,
}

impl UpdateMode {
    pub fn from_instant(instant: bool) -> Self {
        if instant {
            UpdateMode::Instant
        } else {
            UpdateMode::Deferred
        }
    }
}

/// What a control reported this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelEvent {
    /// Value moved (every drag step)
    Changed,
    /// Edit finished
    Committed,
}

#[derive(Clone, Debug, Default)]
pub struct PanelBinding {
    mode: UpdateMode,
    /// A value changed and the edit has not finished yet
    pending_commit: bool,
}

impl PanelBinding {
    pub fn new(mode: UpdateMode) -> Self {
        Self { mode, pending_commit: false }
    }

    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    /// Rewire the trigger. Returns true if the mode actually changed.
    pub fn set_mode(&mut self, mode: UpdateMode) -> bool {
        if self.mode == mode {
            return false;
        }
        debug!(?mode, "Panel update mode changed");
        self.mode = mode;
        true
    }

    /// Whether `event` should regenerate under the current mode
    pub fn triggers(&self, event: PanelEvent) -> bool {
        matches!(
            (self.mode, event),
            (UpdateMode::Instant, PanelEvent::Changed) | (UpdateMode::Deferred, PanelEvent::Committed)
        )
    }

    /// Turn one frame of widget state into events.
    ///
    /// `changed`: some control's value moved this frame. `settled`: no
    /// pointer button is held and no text field is being edited. An edit
    /// commits on the first settled frame after a change, which covers
    /// slider release, finished typing and color picker drags alike.
    pub fn observe(&mut self, changed: bool, settled: bool) -> impl Iterator<Item = PanelEvent> {
        if changed {
            self.pending_commit = true;
        }
        let committed = self.pending_commit && settled;
        if committed {
            self.pending_commit = false;
        }
        changed
            .then_some(PanelEvent::Changed)
            .into_iter()
            .chain(committed.then_some(PanelEvent::Committed))
    }
}

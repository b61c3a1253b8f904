//! Toast notifications: options, handles and the per-toast lifecycle.

use std::{fmt, time::Duration};

use config::ToastKind;
use dom::NodeId;
use tokio::time::Instant;

use super::OverlayManager;
use crate::Result;

/// Identifier of one shown toast. Ids are never reused by a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub(super) u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Lifecycle of a single toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Attached at opacity 0, waiting for the fade-in tick.
    Entering,
    /// Fully shown until its duration elapses.
    Visible,
    /// Faded out, waiting for the grace period before removal.
    Leaving,
    /// Node removed from the document.
    Removed,
}

/// Options for [`OverlayManager::create_toast`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastOptions {
    /// Color scheme and class suffix.
    pub kind: ToastKind,
    /// Time on screen measured from `show`; the configured default when unset.
    pub duration: Option<Duration>,
}

impl ToastOptions {
    /// Options of the given kind with the default duration.
    pub fn kind(kind: ToastKind) -> Self {
        Self {
            kind,
            duration: None,
        }
    }

    /// Override the on-screen duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// A toast recorded in the manager's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacklogEntry {
    /// Toast id.
    pub id: ToastId,
    /// Toast kind.
    pub kind: ToastKind,
    /// Message text.
    pub message: String,
}

/// Reusable toast definition. Each [`ToastHandle::show`] creates an independent
/// notice.
#[derive(Clone)]
pub struct ToastHandle {
    /// Manager that owns the timers.
    pub(super) manager: OverlayManager,
    /// Message text.
    pub(super) message: String,
    /// Kind and duration.
    pub(super) options: ToastOptions,
}

impl fmt::Debug for ToastHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastHandle")
            .field("message", &self.message)
            .field("options", &self.options)
            .finish()
    }
}

impl ToastHandle {
    /// Attach a new notice and schedule its fade-in, fade-out and removal.
    pub fn show(&self) -> Result<ToastId> {
        self.manager.show_toast(&self.message, &self.options)
    }

    /// Message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Kind and duration.
    pub fn options(&self) -> &ToastOptions {
        &self.options
    }
}

/// Document mutation produced by one lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Effect {
    /// Set opacity to 1.
    Reveal(NodeId),
    /// Set opacity to 0.
    Fade(NodeId),
    /// Remove the node.
    Remove(NodeId),
}

/// State of one live toast.
#[derive(Debug)]
pub(super) struct LiveToast {
    /// The notice node.
    pub(super) node: NodeId,
    /// Current phase.
    pub(super) phase: ToastPhase,
    /// When `show` was called.
    shown_at: Instant,
    /// Time on screen measured from `shown_at`.
    duration: Duration,
}

impl LiveToast {
    /// A toast shown at `shown_at`.
    pub(super) fn new(node: NodeId, shown_at: Instant, duration: Duration) -> Self {
        Self {
            node,
            phase: ToastPhase::Entering,
            shown_at,
            duration,
        }
    }

    /// Advance one phase for a timer that was due at `due`. Returns the
    /// document effect and the deadline of the next step, if any.
    ///
    /// A duration too long to represent as an instant never fades; the toast
    /// stays visible until dismissed.
    pub(super) fn advance(&mut self, due: Instant, grace: Duration) -> (Option<Effect>, Option<Instant>) {
        match self.phase {
            ToastPhase::Entering => {
                self.phase = ToastPhase::Visible;
                let fade_at = self.shown_at.checked_add(self.duration).map(|at| at.max(due));
                (Some(Effect::Reveal(self.node)), fade_at)
            }
            ToastPhase::Visible => {
                self.phase = ToastPhase::Leaving;
                let remove_at = due.checked_add(grace).unwrap_or(due);
                (Some(Effect::Fade(self.node)), Some(remove_at))
            }
            ToastPhase::Leaving => {
                self.phase = ToastPhase::Removed;
                (Some(Effect::Remove(self.node)), None)
            }
            ToastPhase::Removed => (None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use dom::Document;

    use super::*;

    fn toast(duration_ms: u64) -> (LiveToast, Instant) {
        let doc = Document::new();
        let node = doc.create_element("div");
        let t0 = Instant::now();
        (
            LiveToast::new(node, t0, Duration::from_millis(duration_ms)),
            t0,
        )
    }

    #[test]
    fn phases_run_in_order() {
        let (mut t, t0) = toast(3000);
        let grace = Duration::from_millis(300);
        let node = t.node;

        let (e, next) = t.advance(t0 + Duration::from_millis(10), grace);
        assert_eq!(e, Some(Effect::Reveal(node)));
        assert_eq!(next, Some(t0 + Duration::from_millis(3000)));
        assert_eq!(t.phase, ToastPhase::Visible);

        let (e, next) = t.advance(t0 + Duration::from_millis(3000), grace);
        assert_eq!(e, Some(Effect::Fade(node)));
        assert_eq!(next, Some(t0 + Duration::from_millis(3300)));

        let (e, next) = t.advance(t0 + Duration::from_millis(3300), grace);
        assert_eq!(e, Some(Effect::Remove(node)));
        assert_eq!(next, None);
        assert_eq!(t.phase, ToastPhase::Removed);
        assert_eq!(t.advance(t0, grace), (None, None));
    }

    #[test]
    fn short_duration_still_fades_after_reveal() {
        let (mut t, t0) = toast(0);
        let due = t0 + Duration::from_millis(10);
        let (_, next) = t.advance(due, Duration::from_millis(300));
        assert_eq!(next, Some(due));
    }

    #[test]
    fn unrepresentable_duration_never_fades() {
        let doc = Document::new();
        let node = doc.create_element("div");
        let t0 = Instant::now();
        let mut t = LiveToast::new(node, t0, Duration::MAX);
        let (e, next) = t.advance(t0, Duration::from_millis(300));
        assert_eq!(e, Some(Effect::Reveal(node)));
        assert_eq!(next, None);
        assert_eq!(t.phase, ToastPhase::Visible);
    }

    #[test]
    fn huge_grace_removes_at_fade() {
        let (mut t, t0) = toast(0);
        t.advance(t0, Duration::MAX);
        let (e, next) = t.advance(t0, Duration::MAX);
        assert_eq!(e, Some(Effect::Fade(t.node)));
        assert_eq!(next, Some(t0));
    }
}

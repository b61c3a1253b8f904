//! Overlay widgets: modal dialogs and self-dismissing toasts.
//!
//! The [`OverlayManager`] owns one timer queue for every live toast. Each toast
//! is a small state machine (`Entering -> Visible -> Leaving -> Removed`); due
//! timers advance it and the resulting style changes or removal are applied to
//! the document after the manager's lock is released.
//!
//! Timers are driven either by calling [`OverlayManager::tick`] from a host
//! frame loop, or by spawning [`OverlayManager::run`] on a tokio runtime.

mod modal;
mod toast;

use std::{
    collections::{HashMap, VecDeque},
    fmt, future,
    sync::Arc,
};

use config::Config;
use dom::{Document, NodeId};
use parking_lot::Mutex;
use tokio::{
    sync::Notify,
    time::{self, Instant},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

pub use self::{
    modal::{ModalContent, ModalHandle},
    toast::{BacklogEntry, ToastHandle, ToastId, ToastOptions, ToastPhase},
};
use self::toast::{Effect, LiveToast};
use crate::{
    Result,
    element::{ElementOptions, build_element},
    timer::TimerQueue,
};

/// Toast bookkeeping guarded by one lock.
#[derive(Default)]
struct ToastBoard {
    /// Toasts that have not been removed yet.
    live: HashMap<ToastId, LiveToast>,
    /// Pending lifecycle steps.
    timers: TimerQueue<ToastId>,
    /// Shown toasts, most recent first.
    backlog: VecDeque<BacklogEntry>,
    /// Last issued id.
    counter: u64,
}

impl ToastBoard {
    /// Issue the next toast id.
    fn next_id(&mut self) -> ToastId {
        self.counter += 1;
        ToastId(self.counter)
    }
}

/// State shared by manager clones.
struct Inner {
    /// Document toasts attach to.
    doc: Document,
    /// Timing, theme and class prefix.
    config: Arc<Config>,
    /// Toast state.
    board: Mutex<ToastBoard>,
    /// Wakes the async driver when a new deadline is scheduled.
    wake: Notify,
}

/// Creates modals and toasts and drives toast lifecycles.
#[derive(Clone)]
pub struct OverlayManager {
    /// Shared state.
    inner: Arc<Inner>,
}

impl fmt::Debug for OverlayManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayManager")
            .field("live_toasts", &self.live_toasts())
            .finish()
    }
}

impl OverlayManager {
    /// Manager for overlays attached to `doc`.
    pub fn new(doc: Document, config: Arc<Config>) -> Self {
        Self {
            inner: Arc::new(Inner {
                doc,
                config,
                board: Mutex::new(ToastBoard::default()),
                wake: Notify::new(),
            }),
        }
    }

    /// The document overlays attach to.
    pub fn document(&self) -> &Document {
        &self.inner.doc
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// A closed modal with `title` and `content`.
    pub fn create_modal(
        &self,
        title: impl Into<String>,
        content: impl Into<ModalContent>,
    ) -> ModalHandle {
        ModalHandle::new(
            self.inner.doc.clone(),
            self.inner.config.clone(),
            title,
            content,
        )
    }

    /// A reusable toast definition.
    pub fn create_toast(&self, message: impl Into<String>, options: ToastOptions) -> ToastHandle {
        ToastHandle {
            manager: self.clone(),
            message: message.into(),
            options,
        }
    }

    /// Attach a toast node at opacity 0 and schedule its fade-in.
    fn show_toast(&self, message: &str, options: &ToastOptions) -> Result<ToastId> {
        let Inner { doc, config, .. } = &*self.inner;
        let kind = options.kind;
        let duration = options.duration.unwrap_or_else(|| config.toast.duration());
        let theme = config.toast.theme();
        let colors = theme.style_for(kind);

        let node = build_element(
            doc,
            "div",
            ElementOptions::new()
                .class(format!(
                    "{} {}",
                    config.class("toast"),
                    config.class(&format!("toast-{}", kind.as_str()))
                ))
                .text(message)
                .style("position", "fixed")
                .style("bottom", "20px")
                .style("right", "20px")
                .style("backgroundColor", colors.bg_css())
                .style("color", colors.fg_css())
                .style("padding", "10px 20px")
                .style("borderRadius", format!("{}px", config.toast.radius))
                .style("boxShadow", "0 2px 10px rgba(0, 0, 0, 0.2)")
                .style("zIndex", config.modal.z_index)
                .style("opacity", 0)
                .style("transition", "opacity 0.3s ease"),
        )?;
        doc.append_child(doc.body(), node)?;

        let now = Instant::now();
        let id = {
            let mut guard = self.inner.board.lock();
            let board = &mut *guard;
            let id = board.next_id();
            board.live.insert(id, LiveToast::new(node, now, duration));
            let reveal_at = now.checked_add(config.toast.fade_in()).unwrap_or(now);
            board.timers.schedule(reveal_at, id);
            board.backlog.push_front(BacklogEntry {
                id,
                kind,
                message: message.to_string(),
            });
            board.backlog.truncate(config.toast.backlog);
            id
        };
        self.inner.wake.notify_one();
        debug!(id = %id, kind = %kind, duration_ms = duration.as_millis(), "toast_shown");
        Ok(id)
    }

    /// Phase of toast `id`. Ids issued by this manager that are no longer live
    /// report [`ToastPhase::Removed`]; unknown ids report `None`.
    pub fn phase(&self, id: ToastId) -> Option<ToastPhase> {
        let board = self.inner.board.lock();
        match board.live.get(&id) {
            Some(t) => Some(t.phase),
            None if id.0 > 0 && id.0 <= board.counter => Some(ToastPhase::Removed),
            None => None,
        }
    }

    /// Node of a live toast.
    pub fn toast_node(&self, id: ToastId) -> Option<NodeId> {
        self.inner.board.lock().live.get(&id).map(|t| t.node)
    }

    /// Number of toasts not yet removed.
    pub fn live_toasts(&self) -> usize {
        self.inner.board.lock().live.len()
    }

    /// Recently shown toasts, most recent first.
    pub fn backlog(&self) -> Vec<BacklogEntry> {
        self.inner.board.lock().backlog.iter().cloned().collect()
    }

    /// Earliest pending lifecycle deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inner.board.lock().timers.next_deadline()
    }

    /// Advance every toast whose timer is due at `now`. Returns the number of
    /// lifecycle steps taken.
    pub fn tick(&self, now: Instant) -> usize {
        let grace = self.inner.config.toast.grace();
        let mut effects = Vec::new();
        {
            let mut guard = self.inner.board.lock();
            let board = &mut *guard;
            while let Some((due, id)) = board.timers.pop_due(now) {
                let Some(toast) = board.live.get_mut(&id) else {
                    continue;
                };
                let (effect, next) = toast.advance(due, grace);
                if let Some(at) = next {
                    board.timers.schedule(at, id);
                } else if toast.phase == ToastPhase::Removed {
                    board.live.remove(&id);
                }
                effects.extend(effect.map(|e| (id, e)));
            }
        }
        for (id, effect) in &effects {
            self.apply(*id, *effect);
        }
        effects.len()
    }

    /// Apply one lifecycle effect to the document.
    fn apply(&self, id: ToastId, effect: Effect) {
        let doc = &self.inner.doc;
        let outcome = match effect {
            Effect::Reveal(node) => doc.set_style(node, "opacity", "1"),
            Effect::Fade(node) => doc.set_style(node, "opacity", "0"),
            Effect::Remove(node) if doc.exists(node) => doc.destroy(node),
            Effect::Remove(_) => Ok(()),
        };
        match outcome {
            Ok(()) => trace!(id = %id, effect = ?effect, "toast_step"),
            Err(e) => trace!(id = %id, error = %e, "toast_node_gone"),
        }
    }

    /// Remove every live toast immediately. Returns how many were removed.
    pub fn dismiss_all(&self) -> usize {
        let drained: Vec<LiveToast> = {
            let mut board = self.inner.board.lock();
            board.timers.retain(|_| false);
            board.live.drain().map(|(_, t)| t).collect()
        };
        let doc = &self.inner.doc;
        for toast in &drained {
            if doc.exists(toast.node)
                && let Err(e) = doc.destroy(toast.node)
            {
                trace!(error = %e, "toast_dismiss_failed");
            }
        }
        if !drained.is_empty() {
            debug!(count = drained.len(), "toasts_dismissed");
        }
        drained.len()
    }

    /// Drive toast timers until `cancel` fires.
    pub async fn run(&self, cancel: CancellationToken) {
        debug!("overlay_driver_started");
        loop {
            let deadline = self.next_deadline();
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.inner.wake.notified() => {}
                _ = sleep_until(deadline) => {}
            }
            self.tick(Instant::now());
        }
        debug!("overlay_driver_stopped");
    }
}

/// Sleep until `deadline`, or forever when there is none.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => time::sleep_until(at).await,
        None => future::pending().await,
    }
}

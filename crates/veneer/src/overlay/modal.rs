//! Modal dialogs.

use std::{
    fmt,
    sync::{Arc, Weak},
};

use config::Config;
use dom::{Document, NodeId};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::{
    Result,
    element::{ElementOptions, build_element},
};

/// Body of a modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalContent {
    /// Raw markup, inserted as-is.
    Markup(String),
    /// A caller-built node. It is moved into the dialog on show and detached,
    /// not destroyed, on hide.
    Node(NodeId),
}

impl From<&str> for ModalContent {
    fn from(s: &str) -> Self {
        Self::Markup(s.to_string())
    }
}

impl From<String> for ModalContent {
    fn from(s: String) -> Self {
        Self::Markup(s)
    }
}

impl From<NodeId> for ModalContent {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

/// Nodes of an open modal.
#[derive(Debug, Clone, Copy)]
struct OpenModal {
    /// Full-viewport backdrop; the root of the overlay.
    backdrop: NodeId,
    /// Close control in the header.
    close_button: NodeId,
    /// Container holding the content.
    content_box: NodeId,
}

/// State shared by clones of a handle.
struct ModalInner {
    /// Document the modal attaches to.
    doc: Document,
    /// Styling and class prefix.
    config: Arc<Config>,
    /// Header text.
    title: String,
    /// Body content.
    content: ModalContent,
    /// Present while open.
    open: Mutex<Option<OpenModal>>,
}

/// A modal dialog that can be shown and hidden repeatedly.
///
/// At most one overlay exists per handle: `show` while open and `hide` while
/// closed are no-ops. Clicking the close control or the backdrop itself hides
/// the dialog.
#[derive(Clone)]
pub struct ModalHandle {
    /// Shared state.
    inner: Arc<ModalInner>,
}

impl fmt::Debug for ModalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalHandle")
            .field("title", &self.inner.title)
            .field("open", &self.is_open())
            .finish()
    }
}

impl ModalHandle {
    /// A closed modal over `doc`.
    pub fn new(
        doc: Document,
        config: Arc<Config>,
        title: impl Into<String>,
        content: impl Into<ModalContent>,
    ) -> Self {
        Self {
            inner: Arc::new(ModalInner {
                doc,
                config,
                title: title.into(),
                content: content.into(),
                open: Mutex::new(None),
            }),
        }
    }

    /// True while the overlay is attached.
    pub fn is_open(&self) -> bool {
        self.current().is_some()
    }

    /// Backdrop node while open.
    pub fn backdrop(&self) -> Option<NodeId> {
        self.current().map(|m| m.backdrop)
    }

    /// Close control while open.
    pub fn close_button(&self) -> Option<NodeId> {
        self.current().map(|m| m.close_button)
    }

    /// Content container while open.
    pub fn content_container(&self) -> Option<NodeId> {
        self.current().map(|m| m.content_box)
    }

    /// The open overlay, forgetting it if the host destroyed the backdrop.
    fn current(&self) -> Option<OpenModal> {
        let mut open = self.inner.open.lock();
        Self::prune(&self.inner.doc, &mut open, &self.inner.title);
        *open
    }

    /// Clear `open` when its backdrop no longer exists.
    fn prune(doc: &Document, open: &mut Option<OpenModal>, title: &str) {
        if let Some(m) = *open
            && !doc.exists(m.backdrop)
        {
            debug!(title, backdrop = ?m.backdrop, "modal_backdrop_gone");
            *open = None;
        }
    }

    /// Build the overlay and attach it to the body.
    pub fn show(&self) -> Result<()> {
        let doc = &self.inner.doc;
        let mut open = self.inner.open.lock();
        Self::prune(doc, &mut open, &self.inner.title);
        if open.is_some() {
            trace!(title = %self.inner.title, "modal_already_open");
            return Ok(());
        }
        let built = self.build()?;
        if let Err(e) = doc.append_child(doc.body(), built.backdrop) {
            self.discard(built.backdrop);
            return Err(e.into());
        }
        *open = Some(built);
        debug!(title = %self.inner.title, backdrop = ?built.backdrop, "modal_shown");
        Ok(())
    }

    /// Remove the overlay. Caller-supplied content is detached and kept.
    pub fn hide(&self) -> Result<()> {
        let Some(open) = self.inner.open.lock().take() else {
            trace!(title = %self.inner.title, "modal_already_closed");
            return Ok(());
        };
        let doc = &self.inner.doc;
        if let ModalContent::Node(node) = &self.inner.content
            && doc.exists(*node)
        {
            doc.detach(*node)?;
        }
        if doc.exists(open.backdrop) {
            doc.destroy(open.backdrop)?;
        }
        debug!(title = %self.inner.title, "modal_hidden");
        Ok(())
    }

    /// Hide from an event listener, where errors cannot propagate.
    fn hide_from_listener(inner: &Weak<ModalInner>) {
        let Some(inner) = inner.upgrade() else {
            return;
        };
        if let Err(e) = (Self { inner }).hide() {
            warn!(error = %e, "modal_hide_failed");
        }
    }

    /// Construct the detached overlay tree. Nothing is left behind on error.
    fn build(&self) -> Result<OpenModal> {
        let ModalInner { doc, config, .. } = &*self.inner;
        let style = &config.modal;

        let weak = Arc::downgrade(&self.inner);
        let backdrop = build_element(
            doc,
            "div",
            ElementOptions::new()
                .class(config.class("modal-container"))
                .style("position", "fixed")
                .style("top", 0)
                .style("left", 0)
                .style("width", "100%")
                .style("height", "100%")
                .style("backgroundColor", &style.backdrop)
                .style("zIndex", style.z_index)
                .style("display", "flex")
                .style("justifyContent", "center")
                .style("alignItems", "center")
                .on("click", move |_, ev| {
                    if ev.at_target() {
                        Self::hide_from_listener(&weak);
                    }
                }),
        )?;
        self.fill(backdrop).inspect_err(|_| self.discard(backdrop))
    }

    /// Populate `backdrop`. Every node is attached under it as soon as it is
    /// created, so destroying the backdrop reclaims a partial build.
    fn fill(&self, backdrop: NodeId) -> Result<OpenModal> {
        let ModalInner {
            doc,
            config,
            title,
            content,
            ..
        } = &*self.inner;
        let style = &config.modal;

        let panel = build_element(
            doc,
            "div",
            ElementOptions::new()
                .class(config.class("modal"))
                .style("backgroundColor", style.bg_css())
                .style("borderRadius", format!("{}px", style.radius))
                .style("padding", format!("{}px", style.padding))
                .style("maxWidth", "80%")
                .style("maxHeight", "80%")
                .style("overflow", "auto"),
        )?;
        doc.append_child(backdrop, panel)?;

        let header = build_element(
            doc,
            "div",
            ElementOptions::new()
                .class(config.class("modal-header"))
                .style("display", "flex")
                .style("justifyContent", "space-between")
                .style("alignItems", "center")
                .style("marginBottom", "15px"),
        )?;
        doc.append_child(panel, header)?;
        let heading = build_element(
            doc,
            "h4",
            ElementOptions::new()
                .text(title.as_str())
                .style("margin", 0)
                .style("color", style.title_css()),
        )?;
        doc.append_child(header, heading)?;

        let weak = Arc::downgrade(&self.inner);
        let close_button = build_element(
            doc,
            "button",
            ElementOptions::new()
                .text("\u{d7}")
                .style("background", "none")
                .style("border", "none")
                .style("fontSize", "24px")
                .style("cursor", "pointer")
                .style("color", style.close_css())
                .on("click", move |_, _| Self::hide_from_listener(&weak)),
        )?;
        doc.append_child(header, close_button)?;

        let content_box = build_element(
            doc,
            "div",
            ElementOptions::new().class(config.class("modal-content")),
        )?;
        doc.append_child(panel, content_box)?;
        match content {
            ModalContent::Markup(markup) => doc.set_inner_html(content_box, markup)?,
            ModalContent::Node(node) => doc.append_child(content_box, *node)?,
        }

        Ok(OpenModal {
            backdrop,
            close_button,
            content_box,
        })
    }

    /// Destroy a backdrop that never made it onto the page, keeping any
    /// caller-supplied content alive.
    fn discard(&self, backdrop: NodeId) {
        let doc = &self.inner.doc;
        if let ModalContent::Node(node) = &self.inner.content
            && doc.exists(*node)
            && doc.contains(backdrop, *node)
            && let Err(e) = doc.detach(*node)
        {
            warn!(error = %e, "modal_content_detach_failed");
        }
        if doc.exists(backdrop)
            && let Err(e) = doc.destroy(backdrop)
        {
            warn!(error = %e, "modal_discard_failed");
        }
        debug!(title = %self.inner.title, "modal_build_discarded");
    }
}

//! The toolkit composition root.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use config::{Config, ToastKind};
use dom::{Document, NodeId};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::{
    Result,
    element::{ElementOptions, build_element},
    host::{HostServices, MemoryHost},
    overlay::{ModalContent, ModalHandle, OverlayManager, ToastHandle, ToastOptions},
    settings::{FieldDescriptor, SettingsPanel, SettingsSchema, SettingsValues, render_settings_panel},
    style::{inject_style, remove_style},
};

/// Display name of the toolkit.
pub const NAME: &str = "Veneer";

/// How long the start-up toast stays on screen.
const LOADED_TOAST: Duration = Duration::from_millis(4000);

/// Namespace the demo panel persists under.
const DEMO_NAMESPACE: &str = "demo";

/// Static description of the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolkitInfo {
    /// Display name.
    pub name: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// Stylesheet injected on start when the config does not supply one.
pub fn default_stylesheet(prefix: &str) -> String {
    format!(
        r#".{prefix}-modal-container {{
    font-family: Whitney, "Helvetica Neue", Helvetica, Arial, sans-serif;
}}

.{prefix}-toast {{
    font-family: Whitney, "Helvetica Neue", Helvetica, Arial, sans-serif;
    font-size: 14px;
}}

.{prefix}-settings-panel {{
    padding: 15px;
}}

.{prefix}-setting-item {{
    margin-bottom: 15px;
}}

.{prefix}-setting-note {{
    font-size: 12px;
    color: #b9bbbe;
    margin-top: 5px;
}}
"#
    )
}

/// State shared by toolkit clones.
struct ToolkitInner {
    /// Document everything is built in.
    doc: Document,
    /// Active configuration.
    config: Arc<Config>,
    /// Modal and toast lifecycles.
    overlays: OverlayManager,
    /// Host collaborators.
    host: Arc<dyn HostServices>,
    /// Set between `start` and `stop`.
    active: AtomicBool,
}

/// Entry point that wires a document, a configuration and host services
/// together. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Toolkit {
    /// Shared state.
    inner: Arc<ToolkitInner>,
}

impl fmt::Debug for Toolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolkit")
            .field("prefix", &self.inner.config.prefix)
            .field("active", &self.is_active())
            .field("host", &self.inner.host)
            .finish()
    }
}

impl Toolkit {
    /// Toolkit over `doc` with an in-memory host.
    pub fn new(doc: Document, config: Config) -> Self {
        Self::with_host(doc, config, Arc::new(MemoryHost::new()))
    }

    /// Toolkit over `doc` using `host` for notices and storage.
    pub fn with_host(doc: Document, config: Config, host: Arc<dyn HostServices>) -> Self {
        let config = Arc::new(config);
        let overlays = OverlayManager::new(doc.clone(), config.clone());
        Self {
            inner: Arc::new(ToolkitInner {
                doc,
                config,
                overlays,
                host,
                active: AtomicBool::new(false),
            }),
        }
    }

    /// Name, version and description.
    pub fn info() -> ToolkitInfo {
        ToolkitInfo {
            name: NAME,
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
        }
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.inner.doc
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Overlay manager; spawn [`OverlayManager::run`] or call
    /// [`OverlayManager::tick`] to drive toasts.
    pub fn overlays(&self) -> &OverlayManager {
        &self.inner.overlays
    }

    /// Host services.
    pub fn host(&self) -> &dyn HostServices {
        self.inner.host.as_ref()
    }

    /// True between [`Toolkit::start`] and [`Toolkit::stop`].
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Id of the stylesheet injected on start.
    pub fn stylesheet_id(&self) -> String {
        self.config().class("library-css")
    }

    /// Name of the event dispatched on the document root after start.
    pub fn loaded_event(&self) -> String {
        format!("{}:loaded", self.config().prefix)
    }

    /// Inject the stylesheet, announce start-up with a toast, and dispatch
    /// the loaded event on the document root.
    pub fn start(&self) -> Result<()> {
        let config = self.config();
        let css = config
            .stylesheet
            .clone()
            .unwrap_or_else(|| default_stylesheet(&config.prefix));
        self.inject_style(&self.stylesheet_id(), &css)?;
        self.inner.active.store(true, Ordering::SeqCst);
        info!(version = Self::info().version, "toolkit_started");

        self.create_toast(
            format!("{NAME} has been loaded"),
            ToastOptions::kind(ToastKind::Success).with_duration(LOADED_TOAST),
        )
        .show()?;

        let doc = self.document();
        let listeners = doc.dispatch(doc.root(), &self.loaded_event())?;
        debug!(listeners, "loaded_event_dispatched");
        Ok(())
    }

    /// Remove the stylesheet, dismiss live toasts and mark inactive. The
    /// toolkit stays usable.
    pub fn stop(&self) -> Result<()> {
        self.remove_style(&self.stylesheet_id())?;
        self.overlays().dismiss_all();
        self.inner.active.store(false, Ordering::SeqCst);
        info!("toolkit_stopped");
        Ok(())
    }

    /// Drive overlay timers until `cancel` fires.
    pub async fn run(&self, cancel: CancellationToken) {
        self.overlays().run(cancel).await;
    }

    /// See [`build_element`].
    pub fn build_element(&self, tag: &str, options: ElementOptions) -> Result<NodeId> {
        build_element(self.document(), tag, options)
    }

    /// See [`render_settings_panel`].
    pub fn render_settings_panel<F>(&self, schema: &SettingsSchema, on_save: F) -> Result<SettingsPanel>
    where
        F: Fn(&SettingsValues) + Send + Sync + 'static,
    {
        render_settings_panel(self.document(), self.config(), schema, on_save)
    }

    /// See [`OverlayManager::create_modal`].
    pub fn create_modal(
        &self,
        title: impl Into<String>,
        content: impl Into<ModalContent>,
    ) -> ModalHandle {
        self.overlays().create_modal(title, content)
    }

    /// See [`OverlayManager::create_toast`].
    pub fn create_toast(&self, message: impl Into<String>, options: ToastOptions) -> ToastHandle {
        self.overlays().create_toast(message, options)
    }

    /// See [`inject_style`].
    pub fn inject_style(&self, id: &str, css: &str) -> Result<Option<NodeId>> {
        inject_style(self.document(), id, css)
    }

    /// See [`remove_style`].
    pub fn remove_style(&self, id: &str) -> Result<bool> {
        remove_style(self.document(), id)
    }

    /// Run a host call. A failure is logged and shown as an error toast
    /// instead of being returned.
    pub fn guard<T>(&self, label: &str, f: impl FnOnce(&dyn HostServices) -> Result<T>) -> Option<T> {
        match f(self.host()) {
            Ok(v) => Some(v),
            Err(e) => {
                error!(label, error = %e, "host_call_failed");
                let toast = self.create_toast(
                    format!("{label} failed: {e}"),
                    ToastOptions::kind(ToastKind::Error),
                );
                if let Err(e) = toast.show() {
                    warn!(error = %e, "error_toast_failed");
                }
                None
            }
        }
    }

    /// Persist `values` under `namespace`; see [`Toolkit::guard`].
    pub fn persist_settings(&self, namespace: &str, values: &SettingsValues) -> bool {
        self.guard("Saving settings", |host| host.persist(namespace, values))
            .is_some()
    }

    /// Load values stored under `namespace`; see [`Toolkit::guard`].
    pub fn load_settings(&self, namespace: &str) -> Option<SettingsValues> {
        self.guard("Loading settings", |host| host.load(namespace))
            .flatten()
    }

    /// Schema of the demo settings panel.
    pub fn demo_schema() -> SettingsSchema {
        SettingsSchema::new()
            .with(
                "enableFeature1",
                FieldDescriptor::switch("Enable Feature 1", true).with_note("Example toggle option"),
            )
            .with(
                "textOption",
                FieldDescriptor::text("Text Option", "Example text").with_note("Example text option"),
            )
            .with(
                "numberOption",
                FieldDescriptor::number("Number Option", 5.0, 0.0, 10.0)
                    .with_note("Example number option"),
            )
            .with(
                "selectOption",
                FieldDescriptor::select(
                    "Select Option",
                    "option1",
                    [
                        ("Option 1", "option1"),
                        ("Option 2", "option2"),
                        ("Option 3", "option3"),
                    ],
                )
                .with_note("Example select option"),
            )
    }

    /// Render the demo panel. Previously saved values are applied first; saving
    /// persists the values and shows a confirmation toast.
    pub fn demo_settings_panel(&self) -> Result<SettingsPanel> {
        let mut schema = Self::demo_schema();
        if let Some(saved) = self.load_settings(DEMO_NAMESPACE) {
            schema.apply(&saved);
        }
        let weak = Arc::downgrade(&self.inner);
        self.render_settings_panel(&schema, move |values| {
            info!(values = ?values, "demo_settings_saved");
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let toolkit = Self { inner };
            toolkit.persist_settings(DEMO_NAMESPACE, values);
            if let Err(e) = toolkit
                .create_toast("Settings saved", ToastOptions::kind(ToastKind::Success))
                .show()
            {
                warn!(error = %e, "settings_toast_failed");
            }
        })
    }
}

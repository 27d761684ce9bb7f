//! Headless widget.
//!
//! Does everything a rendering widget does up to the first frame except
//! drawing: claims the container, loads the style, and fetches one tile per
//! source plus the first glyph range and the sprite index. Signals follow the
//! browser widget's conventions:
//!
//! - glyph/sprite failures → `error("glyph fetch failed: ...")` /
//!   `error("sprite fetch failed: ...")`, loading continues
//! - style or tile failures → `error(...)`, no `load`
//! - otherwise → `load`
//!
//! All fetching runs on one tokio task that `remove()` aborts.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::fetch::AsyncHttpClient;
use crate::style::{
    resolve_glyph_url, resolve_tile_url, sprite_urls, Projection, StyleDocument,
    DEFAULT_GLYPH_RANGE,
};

use super::listeners::{Listeners, SharedListeners};
use super::types::{
    Container, EventKind, EventSink, MapWidget, WidgetError, WidgetEvent, WidgetFactory,
    WidgetOptions,
};

static NEXT_HEADLESS_ID: AtomicU64 = AtomicU64::new(1);

/// Non-rendering widget backed by an HTTP client.
pub struct HeadlessWidget {
    id: String,
    container: Container,
    listeners: SharedListeners,
    projection: Projection,
    task: Option<JoinHandle<()>>,
}

impl HeadlessWidget {
    /// Create the widget and start loading on the current tokio runtime.
    pub fn new<C: AsyncHttpClient>(
        container: &Container,
        options: &WidgetOptions,
        client: Arc<C>,
    ) -> Result<Self, WidgetError> {
        let runtime = Handle::try_current().map_err(|e| WidgetError::Runtime(e.to_string()))?;

        let id = format!("headless-{}", NEXT_HEADLESS_ID.fetch_add(1, Ordering::Relaxed));
        container.attach(&id)?;

        let listeners = Listeners::shared();
        let task = runtime.spawn(load_resources(
            id.clone(),
            client,
            Arc::clone(&options.style),
            Arc::clone(&listeners),
        ));

        tracing::info!(
            widget = %id,
            container = %container.id(),
            center = ?(options.center.lng, options.center.lat),
            zoom = options.zoom,
            pitch = options.pitch,
            projection = %options.projection,
            "Headless widget created"
        );

        Ok(Self {
            id,
            container: container.clone(),
            listeners,
            projection: options.projection,
            task: Some(task),
        })
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }
}

impl MapWidget for HeadlessWidget {
    fn id(&self) -> &str {
        &self.id
    }

    fn on(&mut self, kind: EventKind, sink: EventSink) {
        self.listeners.lock().register(kind, sink);
    }

    fn set_projection(&mut self, projection: Projection) {
        if self.projection != projection {
            tracing::debug!(widget = %self.id, from = %self.projection, to = %projection, "Projection changed");
        }
        self.projection = projection;
    }

    fn remove(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        task.abort();
        self.listeners.lock().close();
        self.container.detach(&self.id);
        tracing::info!(widget = %self.id, "Headless widget removed");
    }
}

impl Drop for HeadlessWidget {
    fn drop(&mut self) {
        self.remove();
    }
}

async fn load_resources<C: AsyncHttpClient>(
    widget_id: String,
    client: Arc<C>,
    style: Arc<StyleDocument>,
    listeners: SharedListeners,
) {
    if let Err(e) = style.validate() {
        tracing::warn!(widget = %widget_id, error = %e, "Style rejected");
        listeners.lock().emit(WidgetEvent::error(e.to_string()));
        return;
    }

    let tile_probes = style.sources.iter().filter_map(|(name, source)| {
        source.tiles.first().map(|template| {
            let zoom = source.minzoom.unwrap_or(0);
            (name.clone(), resolve_tile_url(template, zoom, 0, 0))
        })
    });
    let tile_results = join_all(tile_probes.map(|(name, url)| {
        let client = Arc::clone(&client);
        async move {
            let result = client.get(&url).await;
            (name, url, result)
        }
    }))
    .await;

    if let (Some(template), Some(stack)) = (&style.glyphs, style.font_stacks().first()) {
        let url = resolve_glyph_url(template, stack, DEFAULT_GLYPH_RANGE);
        if let Err(e) = client.get(&url).await {
            tracing::debug!(widget = %widget_id, url = %url, error = %e, "Glyph fetch failed");
            listeners
                .lock()
                .emit(WidgetEvent::error(format!("glyph fetch failed: {}", e)));
        }
    }

    if let Some(base) = &style.sprite {
        let url = sprite_urls(base).json;
        if let Err(e) = client.get(&url).await {
            tracing::debug!(widget = %widget_id, url = %url, error = %e, "Sprite fetch failed");
            listeners
                .lock()
                .emit(WidgetEvent::error(format!("sprite fetch failed: {}", e)));
        }
    }

    for (name, url, result) in tile_results {
        if let Err(e) = result {
            tracing::warn!(widget = %widget_id, source = %name, url = %url, error = %e, "Tile fetch failed");
            listeners.lock().emit(WidgetEvent::error(format!(
                "tile fetch failed for source '{}': {}",
                name, e
            )));
            return;
        }
    }

    tracing::info!(
        widget = %widget_id,
        sources = style.sources.len(),
        layers = style.layers.len(),
        "Style loaded"
    );
    listeners.lock().emit(WidgetEvent::Load);
}

/// Factory for [`HeadlessWidget`] sharing one HTTP client.
pub struct HeadlessWidgetFactory<C: AsyncHttpClient> {
    client: Arc<C>,
}

impl<C: AsyncHttpClient> HeadlessWidgetFactory<C> {
    pub fn new(client: C) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl<C: AsyncHttpClient> WidgetFactory for HeadlessWidgetFactory<C> {
    fn name(&self) -> &str {
        "headless"
    }

    fn create(
        &self,
        container: &Container,
        options: &WidgetOptions,
    ) -> Result<Box<dyn MapWidget>, WidgetError> {
        let widget = HeadlessWidget::new(container, options, Arc::clone(&self.client))?;
        Ok(Box::new(widget))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::tests::MockAsyncHttpClient;
    use crate::fetch::FetchError;
    use crate::style::{globe_style, LayerType, StyleLayer};
    use tokio::sync::mpsc;

    fn not_found(url: &str) -> FetchError {
        FetchError::Status {
            status: 404,
            url: url.to_string(),
        }
    }

    fn listen(widget: &mut HeadlessWidget) -> mpsc::UnboundedReceiver<WidgetEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        widget.on(EventKind::Load, EventSink::new(tx.clone()));
        widget.on(EventKind::Error, EventSink::new(tx));
        rx
    }

    #[tokio::test]
    async fn test_emits_load_when_everything_fetches() {
        let container = Container::new("globe", 800, 600);
        let client = Arc::new(MockAsyncHttpClient::default());
        let mut widget =
            HeadlessWidget::new(&container, &WidgetOptions::default(), Arc::clone(&client))
                .unwrap();
        let mut rx = listen(&mut widget);

        assert_eq!(rx.recv().await, Some(WidgetEvent::Load));

        let requested = client.requested.lock().clone();
        assert!(requested.iter().any(|u| u.contains("World_Imagery")));
        assert!(requested.iter().any(|u| u.contains("0-255.pbf")));
        assert!(requested.iter().any(|u| u.ends_with("sprite.json")));
    }

    #[tokio::test]
    async fn test_glyph_failure_is_reported_then_loads() {
        let container = Container::new("globe", 800, 600);
        let client = Arc::new(MockAsyncHttpClient::failing("/font/", not_found("font")));
        let mut widget =
            HeadlessWidget::new(&container, &WidgetOptions::default(), client).unwrap();
        let mut rx = listen(&mut widget);

        match rx.recv().await {
            Some(WidgetEvent::Error(msg)) => assert!(msg.starts_with("glyph fetch failed")),
            other => panic!("expected glyph error, got {:?}", other),
        }
        assert_eq!(rx.recv().await, Some(WidgetEvent::Load));
    }

    #[tokio::test]
    async fn test_tile_failure_prevents_load() {
        let container = Container::new("globe", 800, 600);
        let client = Arc::new(MockAsyncHttpClient::failing(
            "openfreemap",
            FetchError::Timeout("tiles".to_string()),
        ));
        let mut widget =
            HeadlessWidget::new(&container, &WidgetOptions::default(), client).unwrap();
        let mut rx = listen(&mut widget);

        match rx.recv().await {
            Some(WidgetEvent::Error(msg)) => {
                assert!(msg.contains("tile fetch failed for source 'openmaptiles'"))
            }
            other => panic!("expected tile error, got {:?}", other),
        }

        widget.remove();
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_invalid_style_reported_through_error_signal() {
        let mut style = (*globe_style()).clone();
        style
            .layers
            .push(StyleLayer::new("roads", LayerType::Line).with_source("streets"));
        let options = WidgetOptions::default().with_style(Arc::new(style));

        let container = Container::new("globe", 800, 600);
        let client = Arc::new(MockAsyncHttpClient::default());
        let mut widget = HeadlessWidget::new(&container, &options, Arc::clone(&client)).unwrap();
        let mut rx = listen(&mut widget);

        match rx.recv().await {
            Some(WidgetEvent::Error(msg)) => assert!(msg.contains("unknown source 'streets'")),
            other => panic!("expected style error, got {:?}", other),
        }
        assert!(client.requested.lock().is_empty());
    }

    #[tokio::test]
    async fn test_remove_frees_container() {
        let container = Container::new("globe", 800, 600);
        let client = Arc::new(MockAsyncHttpClient::default());
        let mut widget =
            HeadlessWidget::new(&container, &WidgetOptions::default(), client).unwrap();
        assert_eq!(container.child_count(), 1);

        widget.remove();
        widget.remove();
        assert_eq!(container.child_count(), 0);
    }

    #[test]
    fn test_requires_runtime() {
        let container = Container::new("globe", 800, 600);
        let client = Arc::new(MockAsyncHttpClient::default());
        let result = HeadlessWidget::new(&container, &WidgetOptions::default(), client);
        assert!(matches!(result, Err(WidgetError::Runtime(_))));
        assert_eq!(container.child_count(), 0);
    }
}

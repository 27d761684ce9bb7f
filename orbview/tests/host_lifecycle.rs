//! Integration tests for the map host lifecycle.
//!
//! These tests drive `MapHost` end to end:
//! - scripted widgets for exact signal sequences
//! - the headless widget over a mock HTTP client
//! - the no-op stand-in chosen by the capability check
//!
//! Run with: `cargo test --test host_lifecycle`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use orbview::fetch::{AsyncHttpClient, FetchError};
use orbview::host::{HostState, MapHost, STATUS_LOADING};
use orbview::style::Projection;
use orbview::widget::{
    select_factory, Capabilities, Container, EventKind, EventSink, HeadlessWidgetFactory,
    MapWidget, WidgetError, WidgetEvent, WidgetFactory, WidgetOptions,
};

// ============================================================================
// Helpers
// ============================================================================

/// Shared view into what a scripted widget saw.
#[derive(Default)]
struct Script {
    created: AtomicUsize,
    removed: AtomicUsize,
    projections: Mutex<Vec<Projection>>,
    sinks: Mutex<Vec<(EventKind, EventSink)>>,
}

impl Script {
    /// Emit an event the way the widget would, to every matching listener.
    fn emit(&self, event: WidgetEvent) {
        for (kind, sink) in self.sinks.lock().iter() {
            if *kind == event.kind() {
                sink.emit(event.clone());
            }
        }
    }
}

struct ScriptedWidget {
    id: String,
    container: Container,
    script: Arc<Script>,
}

impl MapWidget for ScriptedWidget {
    fn id(&self) -> &str {
        &self.id
    }

    fn on(&mut self, kind: EventKind, sink: EventSink) {
        self.script.sinks.lock().push((kind, sink));
    }

    fn set_projection(&mut self, projection: Projection) {
        self.script.projections.lock().push(projection);
    }

    fn remove(&mut self) {
        self.script.removed.fetch_add(1, Ordering::SeqCst);
        self.script.sinks.lock().clear();
        self.container.detach(&self.id);
    }
}

struct ScriptedFactory {
    script: Arc<Script>,
}

impl WidgetFactory for ScriptedFactory {
    fn name(&self) -> &str {
        "scripted"
    }

    fn create(
        &self,
        container: &Container,
        _options: &WidgetOptions,
    ) -> Result<Box<dyn MapWidget>, WidgetError> {
        let n = self.script.created.fetch_add(1, Ordering::SeqCst);
        let id = format!("scripted-{}", n);
        container.attach(&id)?;
        Ok(Box::new(ScriptedWidget {
            id,
            container: container.clone(),
            script: Arc::clone(&self.script),
        }))
    }
}

fn scripted_host() -> (MapHost, Arc<Script>) {
    let script = Arc::new(Script::default());
    let factory = ScriptedFactory {
        script: Arc::clone(&script),
    };
    (
        MapHost::new(Arc::new(factory), WidgetOptions::default()),
        script,
    )
}

/// HTTP client that fails every URL containing `pattern`.
struct FailingClient {
    pattern: &'static str,
}

impl AsyncHttpClient for FailingClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        if !self.pattern.is_empty() && url.contains(self.pattern) {
            Err(FetchError::Status {
                status: 503,
                url: url.to_string(),
            })
        } else {
            Ok(vec![0u8; 16])
        }
    }
}

async fn settle(host: &mut MapHost) -> HostState {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match host.next_event().await {
                Some(state) if state.is_settled() => return state,
                Some(_) => continue,
                None => return host.state(),
            }
        }
    })
    .await
    .expect("host did not settle")
}

// ============================================================================
// Scripted widget scenarios
// ============================================================================

#[test]
fn test_mount_creates_at_most_one_widget() {
    let (mut host, script) = scripted_host();
    let container = Container::new("globe", 1280, 720);

    for _ in 0..10 {
        host.start(&container);
    }

    assert_eq!(script.created.load(Ordering::SeqCst), 1);
    assert_eq!(container.child_count(), 1);
}

#[test]
fn test_two_listeners_registered() {
    let (mut host, script) = scripted_host();
    host.start(&Container::new("globe", 1280, 720));

    let kinds: Vec<EventKind> = script.sinks.lock().iter().map(|(k, _)| *k).collect();
    assert_eq!(kinds, vec![EventKind::Load, EventKind::Error]);
}

#[test]
fn test_load_signal_through_channel() {
    let (mut host, script) = scripted_host();
    host.start(&Container::new("globe", 1280, 720));
    assert_eq!(host.status(), STATUS_LOADING);

    script.emit(WidgetEvent::Load);
    assert_eq!(host.drain_events(), 1);

    assert_eq!(host.state(), HostState::Ready);
    assert_eq!(host.status(), "");
    assert_eq!(*script.projections.lock(), vec![Projection::Globe]);
}

#[test]
fn test_glyph_error_keeps_status() {
    let (mut host, script) = scripted_host();
    host.start(&Container::new("globe", 1280, 720));

    script.emit(WidgetEvent::error("glyph fetch failed"));
    host.drain_events();
    assert_eq!(host.status(), STATUS_LOADING);

    script.emit(WidgetEvent::Load);
    script.emit(WidgetEvent::error("glyph fetch failed"));
    host.drain_events();
    assert_eq!(host.status(), "");
    assert_eq!(host.state(), HostState::Ready);
}

#[test]
fn test_webgl_error_is_shown() {
    let (mut host, script) = scripted_host();
    host.start(&Container::new("globe", 1280, 720));

    script.emit(WidgetEvent::error("WebGL context lost"));
    host.drain_events();

    assert_eq!(host.state(), HostState::Error);
    assert_eq!(host.status(), "Error: WebGL context lost");
}

#[test]
fn test_invalid_container_reported() {
    let (mut host, script) = scripted_host();
    let container = Container::new("globe", 0, 0);

    assert_eq!(host.start(&container), HostState::Error);
    assert_eq!(host.status(), "Initialization Failed: invalid container");

    host.stop();
    assert_eq!(script.removed.load(Ordering::SeqCst), 0);
    assert!(!host.has_widget());
}

#[test]
fn test_unmount_disposes_once_and_frees_container() {
    let (mut host, script) = scripted_host();
    let container = Container::new("globe", 1280, 720);
    host.start(&container);

    host.stop();
    host.stop();
    drop(host);

    assert_eq!(script.removed.load(Ordering::SeqCst), 1);
    assert_eq!(container.child_count(), 0);
}

#[test]
fn test_signals_after_stop_are_discarded() {
    let (mut host, script) = scripted_host();
    let container = Container::new("globe", 1280, 720);
    host.start(&container);

    let stale: Vec<EventSink> = script.sinks.lock().iter().map(|(_, s)| s.clone()).collect();
    host.stop();
    for sink in &stale {
        assert!(!sink.emit(WidgetEvent::error("WebGL context lost")));
    }

    host.start(&container);
    assert_eq!(host.drain_events(), 0);
    assert_eq!(host.state(), HostState::Initializing);
}

// ============================================================================
// Headless widget scenarios
// ============================================================================

#[tokio::test]
async fn test_headless_widget_reaches_ready() {
    let factory = HeadlessWidgetFactory::new(FailingClient { pattern: "" });
    let mut host = MapHost::new(Arc::new(factory), WidgetOptions::default());
    let container = Container::new("globe", 1280, 720);

    host.start(&container);
    assert_eq!(settle(&mut host).await, HostState::Ready);
    assert_eq!(host.status(), "");

    host.stop();
    assert_eq!(container.child_count(), 0);
}

#[tokio::test]
async fn test_headless_sprite_failure_is_cosmetic() {
    let factory = HeadlessWidgetFactory::new(FailingClient { pattern: "sprite" });
    let mut host = MapHost::new(Arc::new(factory), WidgetOptions::default());

    host.start(&Container::new("globe", 1280, 720));
    assert_eq!(settle(&mut host).await, HostState::Ready);
}

#[tokio::test]
async fn test_headless_tile_failure_is_fatal() {
    let factory = HeadlessWidgetFactory::new(FailingClient {
        pattern: "World_Imagery",
    });
    let mut host = MapHost::new(Arc::new(factory), WidgetOptions::default());

    host.start(&Container::new("globe", 1280, 720));
    assert_eq!(settle(&mut host).await, HostState::Error);
    assert!(host
        .status()
        .starts_with("Error: tile fetch failed for source 'satellite'"));
}

// ============================================================================
// Capability check
// ============================================================================

#[tokio::test]
async fn test_noop_stand_in_loads() {
    let caps = Capabilities {
        async_runtime: true,
        network: false,
    };
    let mut host = MapHost::new(select_factory(&caps), WidgetOptions::default());

    host.start(&Container::new("globe", 1280, 720));
    assert_eq!(settle(&mut host).await, HostState::Ready);
}

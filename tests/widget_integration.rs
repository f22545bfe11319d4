/*
 *  tests/widget_integration.rs
 *
 *  Integration tests for the widget refresh cycle
 *
 *  kvdeck - keys on glass
 *  (c) 2026 Stuart Hunter
 */

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use kvdeck::canvas::Canvas;
use kvdeck::color;
use kvdeck::config::WidgetConfig;
use kvdeck::device::{DeviceSpecs, MockSink, MockSinkState};
use kvdeck::draw;
use kvdeck::fonts;
use kvdeck::store::{FALLBACK_VALUE, MemoryStore, SharedStore};
use kvdeck::widget::ValueWidget;

const SIDE: u32 = 72;

static COUNTER: AtomicUsize = AtomicUsize::new(0);

fn specs() -> DeviceSpecs {
    DeviceSpecs { pixels: SIDE, dpi: 141 }
}

/// Build a widget over a shared in-memory store and a recording sink.
/// Returns handles to both so tests can mutate values and inspect frames.
fn widget_under_test(
    cfg: &WidgetConfig,
    store: MemoryStore,
    base_dir: &Path,
) -> (ValueWidget, Arc<Mutex<MemoryStore>>, Arc<Mutex<MockSinkState>>) {
    let store = Arc::new(Mutex::new(store));
    let shared: SharedStore = store.clone();
    let sink = MockSink::new(specs());
    let sink_state = sink.state();
    let widget =
        ValueWidget::new(cfg, base_dir, shared, Box::new(sink)).expect("widget construction");
    (widget, store, sink_state)
}

/// What a single full-canvas slot showing `text` should look like.
fn expected_single_slot(text: &str) -> Canvas {
    let mut canvas = Canvas::new(SIDE);
    let frame = Rectangle::new(Point::zero(), Size::new(SIDE, SIDE));
    draw::draw_string(
        &mut canvas,
        frame,
        fonts::default_font(),
        text,
        color::DEFAULT_COLOR,
        draw::AUTO_POS,
    )
    .unwrap();
    canvas
}

/// Unique temp directory holding a solid-color test icon.
fn icon_dir(name: &str, color: [u8; 4]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "kvdeck-widget-test-{}-{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    std::fs::create_dir_all(&dir).unwrap();
    image::RgbaImage::from_pixel(8, 8, image::Rgba(color)).save(dir.join(name)).unwrap();
    dir
}

fn one_key_config(key: &str) -> WidgetConfig {
    WidgetConfig { keys: vec![key.to_string()], ..WidgetConfig::default() }
}

// Scenario A: a present value is drawn into the single computed frame.
#[test]
fn test_update_draws_stored_value() {
    let mut store = MemoryStore::new();
    store.insert("temp", "72\n");
    let (mut widget, _, sink) = widget_under_test(&one_key_config("temp"), store, Path::new("."));

    widget.update().unwrap();

    let state = sink.lock().unwrap();
    assert_eq!(state.render_count, 1);
    assert_eq!(state.frames[0], expected_single_slot("72"));
    assert_ne!(state.frames[0], Canvas::new(SIDE), "frame should not be blank");
}

// Scenario B: a missing key renders the sentinel, with no fatal error.
#[test]
fn test_update_draws_sentinel_for_missing_key() {
    let (mut widget, _, sink) =
        widget_under_test(&one_key_config("missing"), MemoryStore::new(), Path::new("."));

    widget.update().unwrap();

    let state = sink.lock().unwrap();
    assert_eq!(state.frames[0], expected_single_slot(FALLBACK_VALUE));
}

// A store that errors on every read is no worse than one that misses.
#[test]
fn test_update_survives_read_failures() {
    let mut store = MemoryStore::new();
    store.insert("temp", "72");
    let (mut widget, store, sink) = widget_under_test(&one_key_config("temp"), store, Path::new("."));

    store.lock().unwrap().set_fail_reads(true);
    widget.update().unwrap();

    let state = sink.lock().unwrap();
    assert_eq!(state.frames[0], expected_single_slot(FALLBACK_VALUE));
}

// Scenario C: the icon reloads exactly once, on the tick where the
// identifier changes.
#[test]
fn test_icon_reloads_only_on_identifier_change() {
    let dir = icon_dir("a.png", [255, 0, 0, 255]);
    image::RgbaImage::from_pixel(8, 8, image::Rgba([0, 0, 255, 255]))
        .save(dir.join("b.png"))
        .unwrap();

    let mut store = MemoryStore::new();
    store.insert("temp", "72");
    store.insert("icon_path", "a.png");
    let cfg = WidgetConfig {
        keys: vec!["temp".to_string()],
        icon_key: Some("icon_path".to_string()),
        ..WidgetConfig::default()
    };
    let (mut widget, store, sink) = widget_under_test(&cfg, store, &dir);
    assert_eq!(widget.icon_load_count(), 1, "construction performs the initial load");

    widget.update().unwrap(); // tick 1: identifier unchanged
    assert_eq!(widget.icon_load_count(), 1);

    store.lock().unwrap().insert("icon_path", "b.png");
    widget.update().unwrap(); // tick 2: identifier changed
    assert_eq!(widget.icon_load_count(), 2);

    let state = sink.lock().unwrap();
    assert_ne!(state.frames[0], state.frames[1], "new icon should change the frame");
}

// A bad icon path at runtime degrades to the blank placeholder and the
// widget keeps rendering.
#[test]
fn test_runtime_icon_failure_degrades_to_placeholder() {
    let dir = icon_dir("a.png", [255, 0, 0, 255]);
    let mut store = MemoryStore::new();
    store.insert("temp", "72");
    store.insert("icon_path", "a.png");
    let cfg = WidgetConfig {
        keys: vec!["temp".to_string()],
        icon_key: Some("icon_path".to_string()),
        ..WidgetConfig::default()
    };
    let (mut widget, store, sink) = widget_under_test(&cfg, store, &dir);

    store.lock().unwrap().insert("icon_path", "gone.png");
    widget.update().unwrap();
    widget.update().unwrap(); // no retry for the same bad source
    assert_eq!(widget.icon_load_count(), 2);

    // the placeholder is fully transparent, so only the slot text shows
    let state = sink.lock().unwrap();
    assert_eq!(state.frames[0], expected_single_slot("72"));
}

// Idempotence: unchanged store values produce pixel-identical frames.
#[test]
fn test_unchanged_values_render_identically() {
    let mut store = MemoryStore::new();
    store.insert("temp", "72");
    store.insert("humidity", "40");
    let cfg = WidgetConfig {
        keys: vec!["temp".to_string(), "humidity".to_string()],
        font: vec!["bold".to_string()],
        color: vec!["red".to_string()],
        ..WidgetConfig::default()
    };
    let (mut widget, _store, sink) = widget_under_test(&cfg, store, Path::new("."));

    widget.update().unwrap();
    widget.update().unwrap();

    let state = sink.lock().unwrap();
    assert_eq!(state.frames.len(), 2);
    assert_eq!(state.frames[0], state.frames[1]);
}

// A sink failure propagates out of update unchanged; the next tick recovers.
#[test]
fn test_sink_failure_propagates() {
    let mut store = MemoryStore::new();
    store.insert("temp", "72");
    let (mut widget, _, sink) = widget_under_test(&one_key_config("temp"), store, Path::new("."));

    sink.lock().unwrap().fail_next = true;
    assert!(widget.update().is_err());
    assert_eq!(sink.lock().unwrap().render_count, 0, "no partial frame reaches the device");

    widget.update().unwrap();
    assert_eq!(sink.lock().unwrap().render_count, 1);
}

// Three keys with no layout directives split the canvas into equal bands;
// each slot's value lands in its own band.
#[test]
fn test_default_layout_draws_each_slot_in_its_band() {
    let mut store = MemoryStore::new();
    store.insert("a", "1");
    store.insert("b", "2");
    store.insert("c", "3");
    let cfg = WidgetConfig {
        keys: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        ..WidgetConfig::default()
    };
    let (mut widget, _, sink) = widget_under_test(&cfg, store, Path::new("."));

    widget.update().unwrap();

    let state = sink.lock().unwrap();
    let frame = &state.frames[0];
    let band = SIDE / 3;
    for row in 0..3u32 {
        let lit = (row * band..(row + 1) * band)
            .flat_map(|y| (0..SIDE).map(move |x| (x, y)))
            .any(|(x, y)| frame.pixel(x, y) != embedded_graphics::pixelcolor::Rgb888::new(0, 0, 0));
        assert!(lit, "band {} should contain its slot's text", row);
    }
}

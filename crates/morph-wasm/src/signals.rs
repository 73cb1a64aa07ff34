//! Platform probing: turns what the browser exposes into `PlatformSignals`.
//!
//! `deviceMemory` and `connection` are non-standard, so they are read through
//! `Reflect` and simply come back `None` where unsupported.

use js_sys::Reflect;
use morph_core::capability::{ConnectionInfo, PlatformSignals};
use wasm_bindgen::JsValue;
use web_sys::Window;

fn property(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn number(target: &JsValue, key: &str) -> Option<f64> {
    property(target, key)?.as_f64()
}

fn connection(navigator: &JsValue) -> Option<ConnectionInfo> {
    let conn = property(navigator, "connection")?;
    Some(ConnectionInfo {
        effective_type: property(&conn, "effectiveType").and_then(|v| v.as_string()),
        downlink_mbps: number(&conn, "downlink").map(|v| v as f32),
    })
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|q| q.matches())
}

pub fn probe(window: &Window) -> PlatformSignals {
    let navigator = window.navigator();
    let nav: &JsValue = navigator.as_ref();

    let cores = navigator.hardware_concurrency();
    let has_touch = Reflect::has(window.as_ref(), &JsValue::from_str("ontouchstart"))
        .unwrap_or(false)
        || navigator.max_touch_points() > 0;

    PlatformSignals {
        device_memory_gb: number(nav, "deviceMemory").map(|v| v as f32),
        hardware_concurrency: (cores >= 1.0).then_some(cores as u32),
        viewport_width: window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32,
        viewport_height: window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32,
        device_pixel_ratio: window.device_pixel_ratio() as f32,
        prefers_reduced_motion: prefers_reduced_motion(window),
        has_touch,
        connection: connection(nav),
    }
}

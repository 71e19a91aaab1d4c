use chrono::NaiveTime;
use console_core::bootstrap::{PageMarkers, CONFIG_ELEMENT_ID, DASHBOARD_CONTAINER_ID};
use console_core::config::{ConsoleConfig, Notice};
use wasm_bindgen::JsValue;

/// Reads the page-kind markers the server rendered into the document.
pub fn read_markers() -> PageMarkers {
    let Some(window) = web_sys::window() else {
        return PageMarkers::default();
    };
    let notice = window
        .location()
        .search()
        .ok()
        .and_then(|query| Notice::from_query(&query));
    let Some(document) = window.document() else {
        return PageMarkers {
            notice,
            ..PageMarkers::default()
        };
    };

    let body_classes = document
        .body()
        .map(|body| {
            let list = body.class_list();
            (0..list.length()).filter_map(|i| list.item(i)).collect()
        })
        .unwrap_or_default();

    PageMarkers {
        body_classes,
        has_dashboard_container: document.get_element_by_id(DASHBOARD_CONTAINER_ID).is_some(),
        notice,
    }
}

/// Config the server embedded in the shell. A missing element means defaults;
/// an unreadable one is reported and also falls back to defaults.
pub fn read_config() -> ConsoleConfig {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    let Some(raw) = raw else {
        return ConsoleConfig::default();
    };
    ConsoleConfig::from_json(&raw).unwrap_or_else(|err| {
        report("config", &err.to_string());
        ConsoleConfig::default()
    })
}

pub fn navigate(href: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.location().set_href(href) {
        report("navigation failed", &format!("{err:?}"));
    }
}

pub fn viewport_width() -> u32 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map(|w| w.max(0.0) as u32)
        .unwrap_or(0)
}

/// Browser-local wall-clock time.
pub fn local_time() -> NaiveTime {
    let now = js_sys::Date::new_0();
    NaiveTime::from_hms_opt(now.get_hours(), now.get_minutes(), now.get_seconds()).unwrap_or_default()
}

pub fn report(context: &str, detail: &str) {
    web_sys::console::warn_1(&JsValue::from_str(&format!("{context}: {detail}")));
}

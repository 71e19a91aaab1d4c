//! Routes `tracing` events from the engine and the front end to the browser
//! console.

use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use wasm_bindgen::JsValue;

pub fn init() {
    let subscriber = tracing_subscriber::registry().with(ConsoleLayer::new(Level::INFO, write_console));
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logging: {err}")));
    }
}

fn write_console(level: Level, line: &str) {
    let line = JsValue::from_str(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&line),
        Level::WARN => web_sys::console::warn_1(&line),
        Level::INFO => web_sys::console::info_1(&line),
        _ => web_sys::console::debug_1(&line),
    }
}

struct ConsoleLayer<F> {
    max: Level,
    sink: F,
}

impl<F> ConsoleLayer<F> {
    fn new(max: Level, sink: F) -> Self {
        Self { max, sink }
    }
}

#[derive(Default)]
struct Line {
    message: String,
    fields: String,
}

impl Visit for Line {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }
}

impl<S, F> Layer<S> for ConsoleLayer<F>
where
    S: Subscriber,
    F: Fn(Level, &str) + 'static,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        *metadata.level() <= self.max
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let mut line = Line::default();
        event.record(&mut line);
        (self.sink)(
            *meta.level(),
            &format!("{} {}: {}{}", meta.level(), meta.target(), line.message, line.fields),
        );
    }
}

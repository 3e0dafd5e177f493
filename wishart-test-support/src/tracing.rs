//! Recording layer utilities for capturing spans and events in tests.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span::{Attributes, Id, Record},
};
use tracing_subscriber::{Layer, layer::Context, prelude::*, registry::LookupSpan};

/// Layer that keeps every closed span and emitted event for later
/// assertions.
///
/// Clones share storage, so a clone can be installed into a subscriber while
/// the original is kept for inspection.
#[derive(Clone, Default)]
pub struct RecordingLayer {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
    events: Arc<Mutex<Vec<EventRecord>>>,
}

impl RecordingLayer {
    /// Returns the closed spans in completion order.
    ///
    /// # Examples
    /// ```
    /// use wishart_test_support::tracing::RecordingLayer;
    ///
    /// let layer = RecordingLayer::default();
    /// assert!(layer.spans().is_empty());
    /// ```
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        lock(&self.spans).clone()
    }

    /// Returns the emitted events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        lock(&self.events).clone()
    }

    /// Returns the first closed span called `name`.
    #[must_use]
    pub fn span(&self, name: &str) -> Option<SpanRecord> {
        lock(&self.spans)
            .iter()
            .find(|span| span.name == name)
            .cloned()
    }

    /// Returns the events whose `message` field equals `message`.
    #[must_use]
    pub fn events_with_message(&self, message: &str) -> Vec<EventRecord> {
        lock(&self.events)
            .iter()
            .filter(|event| event.message() == Some(message))
            .cloned()
            .collect()
    }
}

/// Runs `f` with a fresh [`RecordingLayer`] installed as the thread's default
/// subscriber and returns the layer alongside the closure's output.
///
/// # Examples
/// ```
/// use wishart_test_support::tracing::with_recording;
///
/// let (value, layer) = with_recording(|| {
///     tracing::info_span!("demo", answer = 42).in_scope(|| 7)
/// });
/// assert_eq!(value, 7);
/// let span = layer.span("demo").expect("span closed");
/// assert_eq!(span.fields.get("answer").map(String::as_str), Some("42"));
/// ```
pub fn with_recording<T>(f: impl FnOnce() -> T) -> (T, RecordingLayer) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let output = tracing::subscriber::with_default(subscriber, f);
    (output, layer)
}

/// Snapshot of a closed span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRecord {
    /// Span name captured from the tracing metadata.
    pub name: String,
    /// Structured fields recorded against the span.
    pub fields: HashMap<String, String>,
}

/// Snapshot of an emitted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Level of the event.
    pub level: Level,
    /// Event target extracted from the metadata.
    pub target: String,
    /// Name of the innermost span the event was emitted in, if any.
    pub span: Option<String>,
    /// Structured fields attached to the event.
    pub fields: HashMap<String, String>,
}

impl EventRecord {
    /// Returns the event's formatted message.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }
}

struct SpanData {
    name: String,
    fields: HashMap<String, String>,
}

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = HashMap::new();
        attrs.record(&mut FieldRecorder(&mut fields));
        span.extensions_mut().insert(SpanData {
            name: attrs.metadata().name().to_owned(),
            fields,
        });
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(data) = span.extensions_mut().get_mut::<SpanData>() {
            values.record(&mut FieldRecorder(&mut data.fields));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let Some(data) = span.extensions_mut().remove::<SpanData>() else {
            return;
        };
        lock(&self.spans).push(SpanRecord {
            name: data.name,
            fields: data.fields,
        });
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldRecorder(&mut fields));
        let span = ctx.event_span(event).map(|span| span.name().to_owned());
        lock(&self.events).push(EventRecord {
            level: *event.metadata().level(),
            target: event.metadata().target().to_owned(),
            span,
            fields,
        });
    }
}

/// Stores every field as text. Strings and errors use their display form,
/// everything else its debug form.
struct FieldRecorder<'a>(&'a mut HashMap<String, String>);

impl Visit for FieldRecorder<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_owned(), value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.0.insert(field.name().to_owned(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_owned(), format!("{value:?}"));
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_remember_their_enclosing_span() {
        let ((), layer) = with_recording(|| {
            let span = tracing::info_span!("outer", items = 3_usize);
            span.in_scope(|| tracing::info!(count = 2_usize, "inside"));
            tracing::warn!("outside");
        });

        let inside = layer.events_with_message("inside");
        assert_eq!(inside.len(), 1);
        assert_eq!(inside[0].span.as_deref(), Some("outer"));
        assert_eq!(inside[0].fields.get("count").map(String::as_str), Some("2"));

        let outside = layer.events_with_message("outside");
        assert_eq!(outside[0].level, Level::WARN);
        assert_eq!(outside[0].span, None);

        let outer = layer.span("outer").expect("span must close");
        assert_eq!(outer.fields.get("items").map(String::as_str), Some("3"));
    }

    #[test]
    fn display_fields_are_recorded_verbatim() {
        let ((), layer) = with_recording(|| {
            tracing::info!(name = %"blobs", "named");
        });
        let event = &layer.events_with_message("named")[0];
        assert_eq!(event.fields.get("name").map(String::as_str), Some("blobs"));
    }
}

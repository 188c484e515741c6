//! Span capture for asserting on what the parser records.
//!
//! Only spans named `cachectl.*` are kept.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::Dispatch;
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

const SPAN_PREFIX: &str = "cachectl.";

/// Captured span information for testing.
#[derive(Debug, Clone)]
pub struct CapturedSpan {
    /// Unique span ID
    pub id: u64,
    /// The span name (e.g., "cachectl.parse")
    pub name: String,
    /// Captured field values as strings
    pub fields: Vec<(String, String)>,
}

struct FieldVisitor {
    fields: Vec<(String, String)>,
}

impl FieldVisitor {
    fn new() -> Self {
        Self { fields: Vec::new() }
    }

    fn push(&mut self, field: &tracing::field::Field, value: String) {
        self.fields.push((field.name().to_string(), value));
    }
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.push(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.push(field, value.to_string());
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.push(field, value.to_string());
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.push(field, value.to_string());
    }
}

/// A tracing layer that captures `cachectl.*` spans.
pub struct SpanCaptureLayer {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
}

impl<S> Layer<S> for SpanCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, _ctx: Context<'_, S>) {
        let metadata = attrs.metadata();
        if !metadata.name().starts_with(SPAN_PREFIX) {
            return;
        }

        let mut visitor = FieldVisitor::new();
        attrs.record(&mut visitor);

        let span = CapturedSpan {
            id: id.into_u64(),
            name: metadata.name().to_string(),
            fields: visitor.fields,
        };
        self.spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(span);
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span_ref) = ctx.span(id) else {
            return;
        };
        if !span_ref.metadata().name().starts_with(SPAN_PREFIX) {
            return;
        }

        let mut visitor = FieldVisitor::new();
        values.record(&mut visitor);

        let span_id = id.into_u64();
        let mut spans = self.spans.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(captured) = spans.iter_mut().find(|s| s.id == span_id) {
            for (key, value) in visitor.fields {
                if let Some(existing) = captured.fields.iter_mut().find(|(k, _)| k == &key) {
                    existing.1 = value;
                } else {
                    captured.fields.push((key, value));
                }
            }
        }
    }

    fn on_event(&self, _event: &Event<'_>, _ctx: Context<'_, S>) {}
}

/// Collector for captured spans.
#[derive(Clone)]
pub struct SpanCollector {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    dispatch: Dispatch,
}

impl std::fmt::Debug for SpanCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanCollector")
            .field("spans", &self.spans())
            .finish()
    }
}

/// Create a new span collector with its associated dispatch.
pub fn create_span_collector() -> SpanCollector {
    let spans = Arc::new(Mutex::new(Vec::new()));
    let layer = SpanCaptureLayer {
        spans: spans.clone(),
    };
    let subscriber = Registry::default().with(layer);
    SpanCollector {
        spans,
        dispatch: Dispatch::new(subscriber),
    }
}

impl SpanCollector {
    /// Get the dispatch the spans are captured through.
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Get all captured spans.
    pub fn spans(&self) -> Vec<CapturedSpan> {
        self.spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get captured span names in order.
    pub fn span_names(&self) -> Vec<String> {
        self.spans().into_iter().map(|s| s.name).collect()
    }

    /// Check if a span with the given name was captured.
    pub fn has_span(&self, name: &str) -> bool {
        self.spans().iter().any(|s| s.name == name)
    }

    /// Get field value from the last span with the given name.
    pub fn get_field(&self, span_name: &str, field_name: &str) -> Option<String> {
        self.spans()
            .into_iter()
            .rev()
            .find(|s| s.name == span_name)
            .and_then(|s| {
                s.fields
                    .into_iter()
                    .find(|(k, _)| k == field_name)
                    .map(|(_, v)| v)
            })
    }
}

/// Run a closure with span capturing enabled.
///
/// Returns the result of the closure and a collector with captured spans.
pub fn with_span_capture<F, R>(f: F) -> (R, SpanCollector)
where
    F: FnOnce() -> R,
{
    let collector = create_span_collector();
    let result = tracing::dispatcher::with_default(collector.dispatch(), f);
    (result, collector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_span_records_outcome() {
        let (result, collector) = with_span_capture(|| cachectl::parse("public, max-age=60"));
        assert!(result.is_ok());
        assert!(collector.has_span("cachectl.parse"));
        assert_eq!(
            collector.get_field("cachectl.parse", "directives"),
            Some("2".to_string())
        );
        assert_eq!(
            collector.get_field("cachectl.parse", "valid"),
            Some("true".to_string())
        );
    }

    #[test]
    fn test_invalid_parse_span() {
        let (_, collector) = with_span_capture(|| cachectl::parse("public, private"));
        assert_eq!(
            collector.get_field("cachectl.parse", "valid"),
            Some("false".to_string())
        );
    }

    #[test]
    fn test_other_spans_ignored() {
        let ((), collector) = with_span_capture(|| {
            let span = tracing::info_span!("unrelated");
            let _enter = span.enter();
        });
        assert!(collector.span_names().is_empty());
    }
}

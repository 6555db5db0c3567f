//! Explicit span scoping for manual instrumentation.
//!
//! Parent/child relationships are carried through the scope values
//! themselves rather than thread-local "current span" state: a child scope
//! is created from its parent scope, so the span tree mirrors the value
//! tree in the code. Dropping a scope ends its span, which guarantees the
//! span closes on every exit path, early returns and panics included.

use opentelemetry::trace::{SpanKind, TraceContextExt, Tracer};
use opentelemetry::Context;
use opentelemetry_sdk::trace::Tracer as SdkTracer;

/// RAII guard around an active span.
pub struct SpanScope {
    cx: Context,
}

impl SpanScope {
    /// Start a new root span with no parent.
    pub fn root(tracer: &SdkTracer, name: &'static str) -> Self {
        Self::start(tracer, name, &Context::new())
    }

    /// Start a span as a child of `parent`.
    pub fn child(tracer: &SdkTracer, name: &'static str, parent: &SpanScope) -> Self {
        Self::start(tracer, name, &parent.cx)
    }

    fn start(tracer: &SdkTracer, name: &'static str, parent: &Context) -> Self {
        let span = tracer
            .span_builder(name)
            .with_kind(SpanKind::Internal)
            .start_with_context(tracer, parent);
        Self {
            cx: parent.with_span(span),
        }
    }

    /// The context carrying this scope's span, for further propagation.
    pub fn context(&self) -> &Context {
        &self.cx
    }
}

impl Drop for SpanScope {
    fn drop(&mut self) {
        self.cx.span().end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_sdk::testing::trace::InMemorySpanExporter;
    use opentelemetry_sdk::trace::TracerProvider;

    fn capture() -> (SdkTracer, InMemorySpanExporter) {
        let exporter = InMemorySpanExporter::default();
        let provider = TracerProvider::builder()
            .with_simple_exporter(exporter.clone())
            .build();
        (provider.tracer("test"), exporter)
    }

    #[test]
    fn test_child_shares_trace_and_parents_to_root() {
        let (tracer, exporter) = capture();

        {
            let root = SpanScope::root(&tracer, "root");
            let _child = SpanScope::child(&tracer, "child", &root);
        }

        let spans = exporter.get_finished_spans().unwrap();
        assert_eq!(spans.len(), 2);

        // Inner scope ends first.
        let child = &spans[0];
        let root = &spans[1];
        assert_eq!(child.name, "child");
        assert_eq!(root.name, "root");
        assert_eq!(
            child.span_context.trace_id(),
            root.span_context.trace_id()
        );
        assert_eq!(child.parent_span_id, root.span_context.span_id());
    }

    #[test]
    fn test_span_ends_on_early_exit() {
        let (tracer, exporter) = capture();

        let result: Result<(), &str> = (|| {
            let _scope = SpanScope::root(&tracer, "failing");
            Err("boom")
        })();
        assert!(result.is_err());

        let spans = exporter.get_finished_spans().unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "failing");
    }
}

#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! These tests verify that the form controller emits structured events for
//! field mutations, submits, and panel toggles.
//!
//!   cargo test -p cactat-core --test tracing_tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use cactat_core::{FieldId, FormController, PanelKind};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured event with its level and fields.
#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
}

/// A tracing Layer that captures every event.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    fn new() -> (Self, CaptureHandle) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let handle = CaptureHandle {
            events: events.clone(),
        };
        (Self { events }, handle)
    }
}

/// Handle to read captured events after the form ran.
struct CaptureHandle {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureHandle {
    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn with_message(&self, message: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.message == message)
            .collect()
    }
}

/// Visitor that extracts event fields.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();

        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
        });
    }
}

fn with_captured<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let (layer, handle) = EventCapture::new();
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    handle
}

fn filled_form() -> FormController {
    let mut form = FormController::default();
    form.set_field(FieldId::FirstName, "Alexandre");
    form.set_field(FieldId::LastName, "Boer");
    form.set_field(FieldId::Email, "teste.ale@gmail.com");
    form.set_field(FieldId::OpenTextArea, "Hello");
    form
}

// ============================================================================
// Submit events
// ============================================================================

#[test]
fn successful_submit_emits_info_event() {
    let handle = with_captured(|| {
        let mut form = filled_form();
        form.submit();
    });

    let submits = handle.with_message("form submitted");
    assert_eq!(submits.len(), 1, "one submit event expected");
    let event = &submits[0];
    assert_eq!(event.level, tracing::Level::INFO);
    assert_eq!(event.fields.get("outcome").map(String::as_str), Some("Success"));
    assert_eq!(event.fields.get("violations").map(String::as_str), Some("0"));
    assert!(handle.with_message("rule failed").is_empty());
}

#[test]
fn failed_submit_reports_each_violation() {
    let handle = with_captured(|| {
        let mut form = FormController::default();
        form.set_field(FieldId::FirstName, "Alexandre");
        form.set_field(FieldId::Email, "teste.alegmail.com");
        form.submit();
    });

    let submit = &handle.with_message("form submitted")[0];
    assert_eq!(submit.fields.get("outcome").map(String::as_str), Some("Error"));
    assert_eq!(submit.fields.get("violations").map(String::as_str), Some("3"));

    let failures = handle.with_message("rule failed");
    let fields: Vec<&str> = failures
        .iter()
        .filter_map(|e| e.fields.get("field").map(String::as_str))
        .collect();
    assert_eq!(fields, vec!["lastName", "email", "open-text-area"]);
    assert!(failures.iter().all(|e| e.level == tracing::Level::DEBUG));
    assert_eq!(
        failures[1].fields.get("code").map(String::as_str),
        Some("email")
    );
}

// ============================================================================
// Field and panel events
// ============================================================================

#[test]
fn field_mutations_emit_debug_events() {
    let handle = with_captured(|| {
        let mut form = FormController::default();
        form.type_text(FieldId::Phone, "abc");
        form.clear_field(FieldId::Phone);
    });

    let events = handle.events();
    assert!(
        events
            .iter()
            .filter(|e| e.message != "field cleared")
            .any(|e| e.level == tracing::Level::DEBUG
                && e.fields.get("field").map(String::as_str) == Some("phone")),
        "typing must emit a debug event: {events:?}"
    );
    assert_eq!(handle.with_message("field cleared").len(), 1);
}

#[test]
fn panel_toggles_emit_trace_events_only_on_change() {
    let handle = with_captured(|| {
        let mut form = FormController::default();
        form.show_message(PanelKind::Success);
        form.show_message(PanelKind::Success);
        form.hide_message(PanelKind::Success);
    });

    let traces: Vec<_> = handle
        .events()
        .into_iter()
        .filter(|e| e.level == tracing::Level::TRACE)
        .collect();
    assert_eq!(traces.len(), 2, "show then hide: {traces:?}");
}

#[test]
fn no_subscriber_is_silent() {
    let mut form = filled_form();
    assert!(form.submit().is_success());
}

//! In-memory stand-ins for the browser-backed capabilities.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::estimate::draft::{Draft, DraftError, DraftStore, Restore};
use crate::estimate::fields::{FieldAccessor, FieldKind, FieldSnapshot};
use crate::estimate::pipeline::{FormSurface, SubmitState};
use crate::estimate::record::EncodedBody;
use crate::estimate::transport::{Sent, Transport, TransportFailure};
use crate::estimate::validate::InvalidReason;

pub struct MemoryForm {
    fields: RefCell<Vec<FieldSnapshot>>,
    marks: RefCell<BTreeMap<String, InvalidReason>>,
    scrolled: RefCell<Vec<String>>,
    resets: Cell<u32>,
}

impl MemoryForm {
    pub fn new(fields: Vec<FieldSnapshot>) -> Self {
        Self {
            fields: RefCell::new(fields),
            marks: RefCell::new(BTreeMap::new()),
            scrolled: RefCell::new(Vec::new()),
            resets: Cell::new(0),
        }
    }

    pub fn set_value(&self, name: &str, value: &str) {
        for field in self.fields.borrow_mut().iter_mut().filter(|f| f.name == name) {
            field.value = value.to_string();
        }
    }

    pub fn mark_of(&self, name: &str) -> Option<InvalidReason> {
        self.marks.borrow().get(name).copied()
    }

    pub fn scrolled_to(&self) -> Vec<String> {
        self.scrolled.borrow().clone()
    }

    pub fn resets(&self) -> u32 {
        self.resets.get()
    }
}

impl FieldAccessor for MemoryForm {
    fn snapshot(&self) -> Vec<FieldSnapshot> {
        self.fields.borrow().clone()
    }

    fn mark(&self, name: &str, reason: Option<InvalidReason>) {
        let mut marks = self.marks.borrow_mut();
        match reason {
            Some(reason) => {
                marks.insert(name.to_string(), reason);
            }
            None => {
                marks.remove(name);
            }
        }
    }

    fn scroll_to(&self, name: &str) {
        self.scrolled.borrow_mut().push(name.to_string());
    }

    fn reset(&self) {
        self.resets.set(self.resets.get() + 1);
        for field in self.fields.borrow_mut().iter_mut() {
            field.checked = false;
            field.file_count = 0;
            if !field.kind.is_choice() {
                field.value.clear();
            }
        }
    }

    fn restore(&self, draft: &Draft) {
        for field in self.fields.borrow_mut().iter_mut() {
            match draft.restore_for(field) {
                Some(Restore::Value(value)) => field.value = value,
                Some(Restore::Checked(checked)) => field.checked = checked,
                None => {}
            }
        }
    }
}

struct PostedError {
    message: String,
    posted_at: u32,
    expires_after: u32,
}

/// Records everything the pipeline shows, with a manual clock for expiry.
pub struct RecordingSurface {
    label: RefCell<String>,
    enabled: Cell<bool>,
    has_panel: bool,
    success_shown: Cell<bool>,
    form_hidden: Cell<bool>,
    confirmations: RefCell<Vec<String>>,
    errors: RefCell<Vec<PostedError>>,
    labels_seen: RefCell<Vec<String>>,
    states: RefCell<Vec<SubmitState>>,
    clock: Cell<u32>,
}

impl RecordingSurface {
    fn build(label: &str, has_panel: bool) -> Self {
        Self {
            label: RefCell::new(label.to_string()),
            enabled: Cell::new(true),
            has_panel,
            success_shown: Cell::new(false),
            form_hidden: Cell::new(false),
            confirmations: RefCell::new(Vec::new()),
            errors: RefCell::new(Vec::new()),
            labels_seen: RefCell::new(Vec::new()),
            states: RefCell::new(Vec::new()),
            clock: Cell::new(0),
        }
    }

    pub fn with_panel(label: &str) -> Self {
        Self::build(label, true)
    }

    pub fn without_panel(label: &str) -> Self {
        Self::build(label, false)
    }

    pub fn success_shown(&self) -> bool {
        self.success_shown.get()
    }

    pub fn form_hidden(&self) -> bool {
        self.form_hidden.get()
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations.borrow().clone()
    }

    pub fn labels_seen(&self) -> Vec<String> {
        self.labels_seen.borrow().clone()
    }

    pub fn states(&self) -> Vec<SubmitState> {
        self.states.borrow().clone()
    }

    pub fn advance(&self, ms: u32) {
        self.clock.set(self.clock.get() + ms);
    }

    pub fn visible_errors(&self) -> Vec<String> {
        let now = self.clock.get();
        self.errors
            .borrow()
            .iter()
            .filter(|e| now < e.posted_at + e.expires_after)
            .map(|e| e.message.clone())
            .collect()
    }
}

impl FormSurface for RecordingSurface {
    fn submit_label(&self) -> String {
        self.label.borrow().clone()
    }

    fn set_submit_label(&self, label: &str) {
        self.labels_seen.borrow_mut().push(label.to_string());
        *self.label.borrow_mut() = label.to_string();
    }

    fn submit_enabled(&self) -> bool {
        self.enabled.get()
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    fn show_success(&self) -> bool {
        if self.has_panel {
            self.success_shown.set(true);
            self.form_hidden.set(true);
        }
        self.has_panel
    }

    fn confirm(&self, message: &str) {
        self.confirmations.borrow_mut().push(message.to_string());
    }

    fn show_error(&self, message: &str, expires_after_ms: u32) {
        self.errors.borrow_mut().push(PostedError {
            message: message.to_string(),
            posted_at: self.clock.get(),
            expires_after: expires_after_ms,
        });
    }

    fn state_changed(&self, state: SubmitState) {
        self.states.borrow_mut().push(state);
    }
}

/// Transport that never touches the network.
pub struct MockTransport {
    failure: Option<String>,
    calls: RefCell<Vec<(String, EncodedBody)>>,
}

impl MockTransport {
    pub fn succeeding() -> Self {
        Self { failure: None, calls: RefCell::new(Vec::new()) }
    }

    pub fn failing(reason: &str) -> Self {
        Self { failure: Some(reason.to_string()), calls: RefCell::new(Vec::new()) }
    }

    pub fn calls(&self) -> Vec<(String, EncodedBody)> {
        self.calls.borrow().clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, endpoint: &str, body: EncodedBody) -> Result<Sent, TransportFailure> {
        self.calls.borrow_mut().push((endpoint.to_string(), body.clone()));
        match &self.failure {
            Some(reason) => Err(TransportFailure::Network {
                endpoint: endpoint.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(Sent {
                endpoint: endpoint.to_string(),
                encoding: body.encoding,
                bytes: body.payload.len(),
            }),
        }
    }
}

#[derive(Default)]
pub struct MemoryDrafts {
    saved: RefCell<Option<String>>,
}

impl DraftStore for MemoryDrafts {
    fn load(&self) -> Result<Option<Draft>, DraftError> {
        match self.saved.borrow().as_deref() {
            Some(raw) => Ok(Some(Draft::from_json(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, draft: &Draft) -> Result<(), DraftError> {
        *self.saved.borrow_mut() = Some(draft.to_json()?);
        Ok(())
    }

    fn clear(&self) -> Result<(), DraftError> {
        *self.saved.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_form_restore_applies_draft() {
        let form = MemoryForm::new(vec![
            FieldSnapshot::text("name", ""),
            FieldSnapshot::checkbox("features", "Blog", false),
            FieldSnapshot::checkbox("features", "Booking", false),
            FieldSnapshot::new("budget", FieldKind::Select, ""),
        ]);
        let saved = Draft::capture(&[
            FieldSnapshot::text("name", "Kim"),
            FieldSnapshot::checkbox("features", "Booking", true),
            FieldSnapshot::checkbox("features", "Blog", false),
            FieldSnapshot::new("budget", FieldKind::Select, "5m-10m"),
        ]);

        form.restore(&saved);
        let fields = form.snapshot();
        assert_eq!(fields[0].value, "Kim");
        assert!(!fields[1].checked);
        assert!(fields[2].checked);
        assert_eq!(fields[3].value, "5m-10m");
    }
}

use chrono::Utc;
use log::{debug, error, info, warn};

use crate::config::EstimateConfig;
use crate::estimate::context::ClientContext;
use crate::estimate::fields::FieldAccessor;
use crate::estimate::record::{BodyEncoding, SubmissionRecord};
use crate::estimate::transport::{Sent, Transport, TransportFailure};
use crate::estimate::validate::{self, ValidationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Validating,
    Invalid,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    Invalid(ValidationError),
    Sent(Sent),
    Failed(TransportFailure),
}

impl SubmitOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SubmitOutcome::Sent(_))
    }
}

/// The parts of the page that report a submission back to the user.
pub trait FormSurface {
    fn submit_label(&self) -> String;
    fn set_submit_label(&self, label: &str);
    fn submit_enabled(&self) -> bool;
    fn set_submit_enabled(&self, enabled: bool);

    /// Hides the form behind the success panel. Returns `false` when the
    /// page has no panel to show.
    fn show_success(&self) -> bool;

    /// Blocking confirmation used when there is no success panel.
    fn confirm(&self, message: &str);

    /// Dismissible inline error, removed after `expires_after_ms`.
    fn show_error(&self, message: &str, expires_after_ms: u32);

    fn state_changed(&self, _state: SubmitState) {}
}

/// Puts the submit control into its busy state and puts it back, label
/// and enabled flag both, when dropped.
pub struct BusyGuard<'a, S: FormSurface> {
    surface: &'a S,
    label: String,
    enabled: bool,
}

impl<'a, S: FormSurface> BusyGuard<'a, S> {
    pub fn engage(surface: &'a S, busy_label: &str) -> Self {
        let guard = Self {
            surface,
            label: surface.submit_label(),
            enabled: surface.submit_enabled(),
        };
        surface.set_submit_enabled(false);
        surface.set_submit_label(busy_label);
        guard
    }
}

impl<S: FormSurface> Drop for BusyGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.set_submit_label(&self.label);
        self.surface.set_submit_enabled(self.enabled);
    }
}

/// Turns one submit event into at most one outbound request.
#[derive(Clone, Debug)]
pub struct EstimatePipeline<T: Transport> {
    endpoint: String,
    transport: T,
    encoding: BodyEncoding,
    form_type: String,
    busy_label: String,
    error_message: String,
    error_expiry_ms: u32,
    success_message: String,
}

impl<T: Transport> EstimatePipeline<T> {
    pub fn new(endpoint: impl Into<String>, transport: T) -> Self {
        Self::from_config(&EstimateConfig::default().with_endpoint(endpoint), transport)
    }

    pub fn from_config(config: &EstimateConfig, transport: T) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            transport,
            encoding: config.encoding,
            form_type: config.form_type.clone(),
            busy_label: config.busy_label.clone(),
            error_message: config.error_message.clone(),
            error_expiry_ms: config.error_expiry_ms,
            success_message: crate::config::SUCCESS_CONFIRMATION.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Flags every invalid control, unflags the rest, and brings the first
    /// offender into view.
    pub fn validate<F: FieldAccessor>(&self, form: &F) -> Result<(), ValidationError> {
        let fields = form.snapshot();
        let result = validate::check(&fields);

        let mut seen: Vec<&str> = Vec::new();
        for field in &fields {
            if field.name.is_empty() || seen.contains(&field.name.as_str()) {
                continue;
            }
            seen.push(field.name.as_str());
            let reason = result
                .as_ref()
                .err()
                .and_then(|e| e.fields.iter().find(|f| f.name == field.name))
                .map(|f| f.reason);
            form.mark(&field.name, reason);
        }

        if let Err(err) = &result {
            if let Some(first) = err.first() {
                form.scroll_to(&first.name);
            }
        }
        result
    }

    pub fn build_record<F: FieldAccessor>(&self, form: &F, client: &ClientContext) -> SubmissionRecord {
        let mut record = SubmissionRecord::collect(&form.snapshot());
        record.enrich(client, &self.form_type, Utc::now());
        record
    }

    pub async fn transmit(&self, record: &SubmissionRecord) -> Result<Sent, TransportFailure> {
        if self.endpoint.trim().is_empty() {
            return Err(TransportFailure::MissingEndpoint);
        }
        let body = record.encode(self.encoding).map_err(|e| TransportFailure::Network {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })?;
        debug!("Posting {} byte estimate body to {}", body.payload.len(), self.endpoint);
        self.transport.send(&self.endpoint, body).await
    }

    /// Runs the whole submission: validate, collect, enrich, send, report.
    pub async fn submit<F, S>(&self, form: &F, surface: &S, client: &ClientContext) -> SubmitOutcome
    where
        F: FieldAccessor,
        S: FormSurface,
    {
        surface.state_changed(SubmitState::Validating);
        if let Err(err) = self.validate(form) {
            warn!("Estimate form blocked: {}", err);
            surface.state_changed(SubmitState::Invalid);
            surface.state_changed(SubmitState::Idle);
            return SubmitOutcome::Invalid(err);
        }

        let record = self.build_record(form, client);
        surface.state_changed(SubmitState::Submitting);

        let outcome = {
            let _busy = BusyGuard::engage(surface, &self.busy_label);
            match self.transmit(&record).await {
                Ok(sent) => {
                    info!("Estimate request dispatched to {}", sent.endpoint);
                    if !surface.show_success() {
                        surface.confirm(&self.success_message);
                    }
                    form.reset();
                    surface.state_changed(SubmitState::Succeeded);
                    SubmitOutcome::Sent(sent)
                }
                Err(failure) => {
                    error!("Estimate request failed: {}", failure);
                    surface.show_error(&self.error_message, self.error_expiry_ms);
                    surface.state_changed(SubmitState::Failed);
                    SubmitOutcome::Failed(failure)
                }
            }
        };

        surface.state_changed(SubmitState::Idle);
        outcome
    }
}

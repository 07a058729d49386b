use crate::estimate::record::BodyEncoding;

#[cfg(debug_assertions)]
pub fn get_estimate_endpoint() -> &'static str {
    "http://localhost:8787/estimate"  // Local mock sheet when running with trunk serve
}

#[cfg(not(debug_assertions))]
pub fn get_estimate_endpoint() -> &'static str {
    "https://script.google.com/macros/s/AKfycbwA5hopEstimateSheet/exec"  // Deployed Apps Script
}

pub const ESTIMATE_FORM_ID: &str = "estimateForm";
pub const SUCCESS_PANEL_ID: &str = "formSuccess";
pub const DROP_AREA_ID: &str = "dropArea";

pub const FORM_TYPE: &str = "estimate-request";
pub const BUSY_LABEL: &str = "⏳ Sending...";
pub const ERROR_MESSAGE: &str = "Something went wrong while sending your request. Please try again.";
pub const SUCCESS_CONFIRMATION: &str = "Your request has been sent! We will get back to you within 24 hours.";

pub const ERROR_EXPIRY_MS: u32 = 5_000;
pub const SUCCESS_RESET_MS: u32 = 10_000;

pub const DRAFT_STORAGE_KEY: &str = "ashop.estimate.draft";
pub const DRAFT_DEBOUNCE_MS: u32 = 800;

/// Everything the estimate pipeline and its page need to know about the
/// deployment. Built once per page mount.
#[derive(Clone, Debug, PartialEq)]
pub struct EstimateConfig {
    pub endpoint: String,
    pub encoding: BodyEncoding,
    pub form_type: String,
    pub busy_label: String,
    pub error_message: String,
    pub error_expiry_ms: u32,
    pub success_reset_ms: u32,
    pub draft_key: String,
    pub draft_debounce_ms: u32,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            endpoint: get_estimate_endpoint().to_string(),
            encoding: BodyEncoding::FormUrlEncoded,
            form_type: FORM_TYPE.to_string(),
            busy_label: BUSY_LABEL.to_string(),
            error_message: ERROR_MESSAGE.to_string(),
            error_expiry_ms: ERROR_EXPIRY_MS,
            success_reset_ms: SUCCESS_RESET_MS,
            draft_key: DRAFT_STORAGE_KEY.to_string(),
            draft_debounce_ms: DRAFT_DEBOUNCE_MS,
        }
    }
}

impl EstimateConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_encoding(mut self, encoding: BodyEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

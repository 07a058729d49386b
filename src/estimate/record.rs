use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::estimate::context::ClientContext;
use crate::estimate::fields::{group_fields, FieldGroup, FieldSnapshot};

/// Wire format of the outbound POST body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyEncoding {
    /// `application/x-www-form-urlencoded`. A CORS-safelisted type, so the
    /// header survives a `no-cors` request.
    #[default]
    FormUrlEncoded,
    Json,
}

impl BodyEncoding {
    pub fn content_type(self) -> &'static str {
        match self {
            BodyEncoding::FormUrlEncoded => "application/x-www-form-urlencoded",
            BodyEncoding::Json => "application/json",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedBody {
    pub encoding: BodyEncoding,
    pub payload: String,
}

impl EncodedBody {
    pub fn content_type(&self) -> &'static str {
        self.encoding.content_type()
    }
}

/// Flat field name to string map posted to the estimate sheet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionRecord(BTreeMap<String, String>);

impl SubmissionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the record from the current state of the form.
    ///
    /// Checkbox groups of several members join their checked values with
    /// `", "`, a lone checkbox becomes `"true"`/`"false"`, radio groups
    /// resolve to the checked value or `""`. File inputs only contribute
    /// `hasAttachments`/`attachmentCount`.
    pub fn collect(fields: &[FieldSnapshot]) -> Self {
        let mut record = Self::new();
        for group in group_fields(fields) {
            match &group {
                FieldGroup::Flag(field) => record.insert_flag(&field.name, field.checked),
                FieldGroup::Multi(_) => {
                    let joined = group.checked_values().join(", ");
                    record.insert(group.name(), joined);
                }
                FieldGroup::Exclusive(_) => {
                    let picked = group.checked_values().first().copied().unwrap_or_default();
                    record.insert(group.name(), picked);
                }
                FieldGroup::Files(members) => {
                    let count: u32 = members.iter().map(|f| f.file_count).sum();
                    if count > 0 {
                        record.insert_flag("hasAttachments", true);
                        record.insert("attachmentCount", count.to_string());
                    }
                }
                FieldGroup::Single(field) => record.insert(&field.name, field.value.trim()),
            }
        }
        record
    }

    /// Appends the metadata the sheet uses to tell submissions apart.
    pub fn enrich(&mut self, client: &ClientContext, form_type: &str, submitted_at: DateTime<Utc>) {
        self.insert("timestamp", submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true));
        self.insert("pageUrl", client.page_url.as_str());
        self.insert("userAgent", client.user_agent.as_str());
        self.insert("formType", form_type);
        if let Some(language) = &client.language {
            self.insert("language", language.as_str());
        }
        if let Some((width, height)) = client.screen {
            self.insert("screenResolution", format!("{}x{}", width, height));
        }
        if let Some(timezone) = &client.timezone {
            self.insert("timezone", timezone.as_str());
        }
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn insert_flag(&mut self, key: &str, flag: bool) {
        self.insert(key, if flag { "true" } else { "false" });
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn encode(&self, encoding: BodyEncoding) -> Result<EncodedBody, serde_json::Error> {
        let payload = match encoding {
            BodyEncoding::FormUrlEncoded => self.to_form_urlencoded(),
            BodyEncoding::Json => serde_json::to_string(self)?,
        };
        Ok(EncodedBody { encoding, payload })
    }

    fn to_form_urlencoded(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_sys::window;

use crate::estimate::fields::{group_fields, FieldGroup, FieldKind, FieldSnapshot};

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("local storage rejected the draft")]
    Rejected,
    #[error("draft is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// What restoring a draft does to one control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Restore {
    Value(String),
    Checked(bool),
}

/// In-progress field values mirrored to local storage so a reload does
/// not lose them. Consent flags and file inputs are left out.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Draft(BTreeMap<String, String>);

impl Draft {
    pub fn capture(fields: &[FieldSnapshot]) -> Self {
        let mut values = BTreeMap::new();
        for group in group_fields(fields) {
            match &group {
                FieldGroup::Flag(_) | FieldGroup::Files(_) => {}
                FieldGroup::Multi(_) | FieldGroup::Exclusive(_) => {
                    let checked = group.checked_values();
                    if !checked.is_empty() {
                        values.insert(group.name().to_string(), checked.join(", "));
                    }
                }
                FieldGroup::Single(field) => {
                    if field.kind != FieldKind::Hidden && !field.value.is_empty() {
                        values.insert(field.name.clone(), field.value.clone());
                    }
                }
            }
        }
        Self(values)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// How `field` should change to reflect this draft, if at all.
    pub fn restore_for(&self, field: &FieldSnapshot) -> Option<Restore> {
        let saved = self.get(&field.name)?;
        match field.kind {
            FieldKind::Checkbox | FieldKind::Radio => {
                let checked = saved.split(", ").any(|v| v == field.value);
                Some(Restore::Checked(checked))
            }
            FieldKind::File | FieldKind::Hidden => None,
            _ => Some(Restore::Value(saved.to_string())),
        }
    }

    pub fn to_json(&self) -> Result<String, DraftError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, DraftError> {
        Ok(serde_json::from_str(raw)?)
    }
}

pub trait DraftStore {
    fn load(&self) -> Result<Option<Draft>, DraftError>;
    fn save(&self, draft: &Draft) -> Result<(), DraftError>;
    fn clear(&self) -> Result<(), DraftError>;
}

/// Draft mirror kept under one fixed key of `window.localStorage`.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalStorageDrafts {
    key: String,
}

impl LocalStorageDrafts {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Result<web_sys::Storage, DraftError> {
        window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(DraftError::Unavailable)
    }
}

impl DraftStore for LocalStorageDrafts {
    fn load(&self) -> Result<Option<Draft>, DraftError> {
        match self.storage()?.get_item(&self.key) {
            Ok(Some(raw)) => Ok(Some(Draft::from_json(&raw)?)),
            Ok(None) => Ok(None),
            Err(_) => Err(DraftError::Unavailable),
        }
    }

    fn save(&self, draft: &Draft) -> Result<(), DraftError> {
        let storage = self.storage()?;
        if draft.is_empty() {
            return storage.remove_item(&self.key).map_err(|_| DraftError::Rejected);
        }
        storage
            .set_item(&self.key, &draft.to_json()?)
            .map_err(|_| DraftError::Rejected)
    }

    fn clear(&self) -> Result<(), DraftError> {
        self.storage()?
            .remove_item(&self.key)
            .map_err(|_| DraftError::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::testing::MemoryDrafts;

    fn fields() -> Vec<FieldSnapshot> {
        vec![
            FieldSnapshot::text("name", "Kim"),
            FieldSnapshot::email("email", ""),
            FieldSnapshot::checkbox("design-style", "Minimal", true),
            FieldSnapshot::checkbox("design-style", "Bold", true),
            FieldSnapshot::checkbox("design-style", "Retro", false),
            FieldSnapshot::radio("timeline", "1 month", false),
            FieldSnapshot::radio("timeline", "ASAP", true),
            FieldSnapshot::checkbox("privacyAgree", "on", true),
            FieldSnapshot::file("attachments", 3),
        ]
    }

    #[test]
    fn test_capture_skips_consent_files_and_empty_values() {
        let draft = Draft::capture(&fields());
        assert_eq!(draft.get("name"), Some("Kim"));
        assert_eq!(draft.get("design-style"), Some("Minimal, Bold"));
        assert_eq!(draft.get("timeline"), Some("ASAP"));
        assert_eq!(draft.get("email"), None);
        assert_eq!(draft.get("privacyAgree"), None);
        assert_eq!(draft.get("attachments"), None);
    }

    #[test]
    fn test_restore_for_choices_and_text() {
        let draft = Draft::capture(&fields());
        let retro = FieldSnapshot::checkbox("design-style", "Retro", true);
        let bold = FieldSnapshot::checkbox("design-style", "Bold", false);
        assert_eq!(draft.restore_for(&retro), Some(Restore::Checked(false)));
        assert_eq!(draft.restore_for(&bold), Some(Restore::Checked(true)));
        assert_eq!(
            draft.restore_for(&FieldSnapshot::text("name", "")),
            Some(Restore::Value("Kim".into()))
        );
        assert_eq!(draft.restore_for(&FieldSnapshot::text("company", "")), None);
    }

    #[test]
    fn test_json_round_trip_is_flat() {
        let draft = Draft::capture(&fields());
        let json = draft.to_json().unwrap();
        assert!(json.starts_with('{'));
        assert_eq!(Draft::from_json(&json).unwrap(), draft);
        assert!(matches!(Draft::from_json("[1,2]"), Err(DraftError::Serde(_))));
    }

    #[test]
    fn test_store_overwrites_and_clears() {
        let store = MemoryDrafts::default();
        store.save(&Draft::capture(&fields())).unwrap();
        store.save(&Draft::capture(&[FieldSnapshot::text("name", "Lee")])).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.get("name"), Some("Lee"));
        assert_eq!(loaded.get("timeline"), None);

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}

use crate::estimate::draft::Draft;
use crate::estimate::validate::InvalidReason;

/// The kind of control a field was read from. Mirrors the `type` of an
/// `<input>` plus the two other form elements we care about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    TextArea,
    Select,
    Checkbox,
    Radio,
    File,
    Hidden,
}

impl FieldKind {
    /// Maps an `<input type=...>` value. Buttons return `None` since they
    /// never contribute to a submission.
    pub fn from_input_type(input_type: &str) -> Option<Self> {
        match input_type.to_ascii_lowercase().as_str() {
            "submit" | "button" | "reset" | "image" => None,
            "email" => Some(Self::Email),
            "tel" => Some(Self::Tel),
            "checkbox" => Some(Self::Checkbox),
            "radio" => Some(Self::Radio),
            "file" => Some(Self::File),
            "hidden" => Some(Self::Hidden),
            _ => Some(Self::Text),
        }
    }

    pub fn is_choice(self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }
}

/// Point-in-time copy of one named form control.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSnapshot {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    pub checked: bool,
    pub file_count: u32,
}

impl FieldSnapshot {
    pub fn new(name: impl Into<String>, kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            value: value.into(),
            checked: false,
            file_count: 0,
        }
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text, value)
    }

    pub fn email(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Email, value)
    }

    pub fn checkbox(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self::new(name, FieldKind::Checkbox, value).with_checked(checked)
    }

    pub fn radio(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self::new(name, FieldKind::Radio, value).with_checked(checked)
    }

    pub fn file(name: impl Into<String>, file_count: u32) -> Self {
        let mut field = Self::new(name, FieldKind::File, "");
        field.file_count = file_count;
        field
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// True when the control holds nothing the user typed or picked.
    pub fn is_blank(&self) -> bool {
        match self.kind {
            FieldKind::Checkbox | FieldKind::Radio => !self.checked,
            FieldKind::File => self.file_count == 0,
            _ => self.value.trim().is_empty(),
        }
    }
}

/// How a group of same-named controls collapses into one record value.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldGroup<'a> {
    /// A single checkbox: serialized as "true" / "false".
    Flag(&'a FieldSnapshot),
    /// Several checkboxes sharing a name.
    Multi(Vec<&'a FieldSnapshot>),
    /// A radio group.
    Exclusive(Vec<&'a FieldSnapshot>),
    Files(Vec<&'a FieldSnapshot>),
    /// Text-like controls; the last one wins, as with `FormData`.
    Single(&'a FieldSnapshot),
}

impl<'a> FieldGroup<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            FieldGroup::Flag(f) | FieldGroup::Single(f) => &f.name,
            FieldGroup::Multi(fs) | FieldGroup::Exclusive(fs) | FieldGroup::Files(fs) => {
                fs.first().map(|f| f.name.as_str()).unwrap_or_default()
            }
        }
    }

    pub fn members(&self) -> Vec<&'a FieldSnapshot> {
        match self {
            FieldGroup::Flag(f) | FieldGroup::Single(f) => vec![*f],
            FieldGroup::Multi(fs) | FieldGroup::Exclusive(fs) | FieldGroup::Files(fs) => fs.clone(),
        }
    }

    pub fn is_required(&self) -> bool {
        self.members().iter().any(|f| f.required)
    }

    /// Values of the checked members, in document order.
    pub fn checked_values(&self) -> Vec<&'a str> {
        self.members()
            .into_iter()
            .filter(|f| f.kind.is_choice() && f.checked)
            .map(|f| f.value.as_str())
            .collect()
    }
}

/// Groups named controls by name, keeping first-appearance order.
pub fn group_fields(fields: &[FieldSnapshot]) -> Vec<FieldGroup<'_>> {
    let mut names: Vec<&str> = Vec::new();
    for field in fields {
        if !field.name.is_empty() && !names.contains(&field.name.as_str()) {
            names.push(field.name.as_str());
        }
    }

    names
        .into_iter()
        .map(|name| {
            let members: Vec<&FieldSnapshot> = fields.iter().filter(|f| f.name == name).collect();
            let kind = members[0].kind;
            match kind {
                FieldKind::Checkbox if members.len() == 1 => FieldGroup::Flag(members[0]),
                FieldKind::Checkbox => FieldGroup::Multi(members),
                FieldKind::Radio => FieldGroup::Exclusive(members),
                FieldKind::File => FieldGroup::Files(members),
                _ => FieldGroup::Single(members[members.len() - 1]),
            }
        })
        .collect()
}

/// Read/write access to the estimate form, whatever backs it.
pub trait FieldAccessor {
    /// Every named control of the form, in document order.
    fn snapshot(&self) -> Vec<FieldSnapshot>;

    /// Flags (`Some`) or clears (`None`) every control named `name`.
    fn mark(&self, name: &str, reason: Option<InvalidReason>);

    fn scroll_to(&self, name: &str);

    /// Clears all controls back to their initial values.
    fn reset(&self);

    fn restore(&self, draft: &Draft);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_type_skips_buttons() {
        assert_eq!(FieldKind::from_input_type("submit"), None);
        assert_eq!(FieldKind::from_input_type("BUTTON"), None);
        assert_eq!(FieldKind::from_input_type("email"), Some(FieldKind::Email));
        assert_eq!(FieldKind::from_input_type("date"), Some(FieldKind::Text));
    }

    #[test]
    fn test_group_fields_classifies_checkbox_groups() {
        let fields = vec![
            FieldSnapshot::text("name", "Kim"),
            FieldSnapshot::checkbox("website-type", "Brand", true),
            FieldSnapshot::checkbox("website-type", "Shop", false),
            FieldSnapshot::checkbox("privacyAgree", "on", true),
            FieldSnapshot::radio("timeline", "1 month", false),
            FieldSnapshot::radio("timeline", "3 months", true),
        ];

        let groups = group_fields(&fields);
        let names: Vec<&str> = groups.iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["name", "website-type", "privacyAgree", "timeline"]);
        assert!(matches!(groups[0], FieldGroup::Single(_)));
        assert!(matches!(groups[1], FieldGroup::Multi(ref m) if m.len() == 2));
        assert!(matches!(groups[2], FieldGroup::Flag(_)));
        assert_eq!(groups[3].checked_values(), vec!["3 months"]);
    }

    #[test]
    fn test_group_fields_ignores_nameless_controls() {
        let fields = vec![FieldSnapshot::text("", "stray"), FieldSnapshot::text("company", "Acme")];
        let groups = group_fields(&fields);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name(), "company");
    }

    #[test]
    fn test_is_blank_per_kind() {
        assert!(FieldSnapshot::text("name", "   ").is_blank());
        assert!(FieldSnapshot::checkbox("privacyAgree", "on", false).is_blank());
        assert!(FieldSnapshot::file("attachments", 0).is_blank());
        assert!(!FieldSnapshot::file("attachments", 2).is_blank());
    }
}

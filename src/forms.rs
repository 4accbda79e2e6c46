// SPDX-License-Identifier: MPL-2.0
//! Form model and required-field validation.

/// Message attached to a required field left blank.
pub const REQUIRED_FIELD_MESSAGE: &str = "This field is required";

/// Identifier of a form, used to derive its draft key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormId(String);

impl FormId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Uses `id` when it is present and non-blank, otherwise the shared
    /// default form id.
    #[must_use]
    pub fn or_default(id: Option<&str>) -> Self {
        match id.map(str::trim) {
            Some(id) if !id.is_empty() => Self::new(id),
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FormId {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_FORM_ID)
    }
}

impl std::fmt::Display for FormId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single input of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
    pub required: bool,
    error: Option<String>,
}

impl FormField {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            required: false,
            error: None,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Error shown under the field after the last validation, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces any previous error with `message`.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// A named collection of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub id: FormId,
    fields: Vec<FormField>,
}

impl Form {
    #[must_use]
    pub fn new(id: FormId) -> Self {
        Self {
            id,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|field| field.name == name)
    }

    /// Sets the value of the named field. Unknown names are ignored.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = self.field_mut(name) {
            field.value = value.into();
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter()
    }

    /// Returns whether any field currently displays an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|field| field.error.is_some())
    }
}

/// Validates every required field of `form`.
///
/// Required fields whose trimmed value is empty get [`REQUIRED_FIELD_MESSAGE`];
/// every other field has its error cleared. Returns whether the form is valid.
pub fn validate_form(form: &mut Form) -> bool {
    let mut valid = true;
    for field in &mut form.fields {
        if field.required && field.value.trim().is_empty() {
            field.show_error(REQUIRED_FIELD_MESSAGE);
            valid = false;
        } else {
            field.clear_error();
        }
    }
    valid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_form() -> Form {
        Form::new(FormId::new("notes"))
            .with_field(FormField::new("title").required())
            .with_field(FormField::new("body").required())
            .with_field(FormField::new("tags"))
    }

    #[test]
    fn empty_required_fields_fail_validation() {
        let mut form = note_form();
        assert!(!validate_form(&mut form));
        assert_eq!(form.field("title").unwrap().error(), Some(REQUIRED_FIELD_MESSAGE));
        assert_eq!(form.field("body").unwrap().error(), Some(REQUIRED_FIELD_MESSAGE));
        assert!(form.field("tags").unwrap().error().is_none());
    }

    #[test]
    fn whitespace_only_value_counts_as_empty() {
        let mut form = note_form();
        form.set_value("title", "   \n");
        form.set_value("body", "content");

        assert!(!validate_form(&mut form));
        assert!(form.field("title").unwrap().error().is_some());
        assert!(form.field("body").unwrap().error().is_none());
    }

    #[test]
    fn fixing_fields_clears_previous_errors() {
        let mut form = note_form();
        validate_form(&mut form);
        assert!(form.has_errors());

        form.set_value("title", "Cells");
        form.set_value("body", "Mitochondria");
        assert!(validate_form(&mut form));
        assert!(!form.has_errors());
    }

    #[test]
    fn form_id_defaults_when_missing_or_blank() {
        assert_eq!(FormId::or_default(None).as_str(), "default");
        assert_eq!(FormId::or_default(Some("  ")).as_str(), "default");
        assert_eq!(FormId::or_default(Some("notes")).as_str(), "notes");
    }

    #[test]
    fn set_value_ignores_unknown_fields() {
        let mut form = note_form();
        form.set_value("missing", "value");
        assert!(form.field("missing").is_none());
    }
}

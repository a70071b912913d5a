use crate::core::FieldId;
use crate::core::value::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum IssueTarget {
    Field(FieldId),
    Form,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub target: IssueTarget,
    pub message: String,
}

impl ValidationIssue {
    pub fn field(id: impl Into<FieldId>, message: impl Into<String>) -> Self {
        Self {
            target: IssueTarget::Field(id.into()),
            message: message.into(),
        }
    }

    pub fn form(message: impl Into<String>) -> Self {
        Self {
            target: IssueTarget::Form,
            message: message.into(),
        }
    }
}

/// Snapshot of a step's field values handed to cross-field validators.
#[derive(Debug, Clone)]
pub struct StepContext {
    step_id: String,
    values: HashMap<FieldId, Value>,
}

impl StepContext {
    pub fn new(step_id: impl Into<String>, values: HashMap<FieldId, Value>) -> Self {
        Self {
            step_id: step_id.into(),
            values,
        }
    }

    pub fn step_id(&self) -> &str {
        &self.step_id
    }

    pub fn value(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.value(id).and_then(Value::as_text)
    }

    pub fn bool_value(&self, id: &str) -> Option<bool> {
        self.value(id).and_then(Value::as_bool)
    }

    pub fn list(&self, id: &str) -> Option<&[String]> {
        self.value(id).and_then(Value::as_list)
    }

    pub fn is_empty(&self, id: &str) -> bool {
        self.value(id).map(Value::is_empty).unwrap_or(true)
    }
}

pub type StepValidator = Box<dyn Fn(&StepContext) -> Vec<ValidationIssue> + Send + Sync>;

/// Field-keyed diagnostics plus one form-level slot for the generic
/// submission error. Entries for a field set are recomputed per validation
/// attempt, never merged.
#[derive(Debug, Default, Clone)]
pub struct ErrorMap {
    entries: HashMap<FieldId, String>,
    form_error: Option<String>,
}

impl ErrorMap {
    pub fn set(&mut self, id: impl Into<FieldId>, message: impl Into<String>) {
        self.entries.insert(id.into(), message.into());
    }

    pub fn clear(&mut self, id: &str) {
        self.entries.remove(id);
    }

    pub fn clear_fields(&mut self, ids: &[FieldId]) {
        for id in ids {
            self.entries.remove(id.as_str());
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn set_form_error(&mut self, message: impl Into<String>) {
        self.form_error = Some(message.into());
    }

    pub fn clear_form_error(&mut self) {
        self.form_error = None;
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn field_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.form_error.is_none()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.form_error = None;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorMap, StepContext, ValidationIssue};
    use crate::core::value::Value;
    use std::collections::HashMap;

    #[test]
    fn clear_removes_exactly_one_entry() {
        let mut errors = ErrorMap::default();
        errors.set("email", "Enter a valid email address");
        errors.set("company_name", "This field is required");

        errors.clear("email");

        assert_eq!(errors.get("email"), None);
        assert_eq!(errors.get("company_name"), Some("This field is required"));
    }

    #[test]
    fn form_error_is_separate_from_field_entries() {
        let mut errors = ErrorMap::default();
        errors.set_form_error("Something went wrong. Please try again.");
        assert_eq!(errors.field_count(), 0);
        assert!(!errors.is_empty());

        errors.clear_form_error();
        assert!(errors.is_empty());
    }

    #[test]
    fn step_context_reads_typed_values() {
        let mut values = HashMap::new();
        values.insert("consent".into(), Value::Bool(true));
        values.insert("name".into(), Value::text(""));
        let ctx = StepContext::new("contact", values);

        assert_eq!(ctx.bool_value("consent"), Some(true));
        assert!(ctx.is_empty("name"));
        assert!(ctx.is_empty("missing"));
        assert_eq!(ctx.step_id(), "contact");
    }

    #[test]
    fn issue_constructors_tag_their_target() {
        let field = ValidationIssue::field("email", "bad");
        let form = ValidationIssue::form("transport failed");
        assert_ne!(field.target, form.target);
    }
}

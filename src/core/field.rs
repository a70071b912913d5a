use crate::core::FieldId;
use crate::core::validators::{self, Validator};
use crate::core::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Choice,
    MultiSelect,
    Checkbox,
}

/// Static description of one form field: identity, shape, whether it gates
/// its step, and the validators run against its value.
pub struct FieldSpec {
    pub id: FieldId,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
    pub options: Vec<String>,
    pub validators: Vec<Validator>,
}

impl FieldSpec {
    fn base(id: impl Into<FieldId>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            required: false,
            default: None,
            options: Vec::new(),
            validators: Vec::new(),
        }
    }

    pub fn text(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::base(id, label, FieldKind::Text)
    }

    pub fn email(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::base(id, label, FieldKind::Email).with_validator(validators::email())
    }

    pub fn phone(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::base(id, label, FieldKind::Phone).with_validator(validators::phone())
    }

    pub fn choice(id: impl Into<FieldId>, label: impl Into<String>, options: &[&str]) -> Self {
        let options: Vec<String> = options.iter().map(|s| s.to_string()).collect();
        let mut spec = Self::base(id, label, FieldKind::Choice)
            .with_validator(validators::one_of(options.clone()));
        spec.options = options;
        spec
    }

    pub fn multi_select(
        id: impl Into<FieldId>,
        label: impl Into<String>,
        options: &[&str],
    ) -> Self {
        let options: Vec<String> = options.iter().map(|s| s.to_string()).collect();
        let mut spec = Self::base(id, label, FieldKind::MultiSelect)
            .with_validator(validators::subset_of(options.clone()));
        spec.options = options;
        spec
    }

    /// Checkboxes read as unchecked until the user touches them.
    pub fn checkbox(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::base(id, label, FieldKind::Checkbox).with_default(Value::Bool(false))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldKind, FieldSpec};
    use crate::core::value::Value;

    #[test]
    fn checkbox_defaults_to_unchecked() {
        let spec = FieldSpec::checkbox("marketing_consent", "Keep me posted");
        assert_eq!(spec.default, Some(Value::Bool(false)));
        assert!(!spec.required);
    }

    #[test]
    fn default_can_be_overridden() {
        let spec =
            FieldSpec::checkbox("request_followup", "Request follow-up").with_default(Value::Bool(true));
        assert_eq!(spec.default, Some(Value::Bool(true)));
    }

    #[test]
    fn choice_carries_its_options() {
        let spec = FieldSpec::choice("industry", "Industry", &["tech", "finance"]);
        assert_eq!(spec.kind, FieldKind::Choice);
        assert_eq!(spec.options(), ["tech", "finance"]);
    }
}

use crate::core::FieldId;
use crate::core::validation::{StepContext, StepValidator, ValidationIssue};

/// One screen of the wizard: an ordered list of field ids plus optional
/// cross-field validators. Immutable once the blueprint is built.
pub struct StepDefinition {
    pub id: String,
    pub title: String,
    pub field_ids: Vec<FieldId>,
    pub validators: Vec<StepValidator>,
}

impl StepDefinition {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            field_ids: Vec::new(),
            validators: Vec::new(),
        }
    }

    pub fn field(mut self, id: impl Into<FieldId>) -> Self {
        self.field_ids.push(id.into());
        self
    }

    pub fn fields<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldId>,
    {
        self.field_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn validate(
        mut self,
        f: impl Fn(&StepContext) -> Vec<ValidationIssue> + Send + Sync + 'static,
    ) -> Self {
        self.validators.push(Box::new(f));
        self
    }
}

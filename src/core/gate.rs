use crate::core::field::FieldSpec;
use crate::core::record::FormRecord;
use crate::core::registry::FlowBlueprint;
use crate::core::step::StepDefinition;
use crate::core::validation::{StepContext, ValidationIssue};
use crate::core::value::Value;
use std::collections::HashMap;

/// Validates one step's fields against the record. Fields on other steps are
/// never consulted, so an untouched later step cannot block an earlier one.
pub fn validate_step(
    blueprint: &FlowBlueprint,
    step_index: usize,
    record: &FormRecord,
) -> Vec<ValidationIssue> {
    let Some(step) = blueprint.step_at(step_index) else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    for id in &step.field_ids {
        let Some(spec) = blueprint.field_spec(id.as_str()) else {
            continue;
        };
        if let Some(message) = field_issue(spec, record.value_or_none(id.as_str())) {
            issues.push(ValidationIssue::field(id.clone(), message));
        }
    }

    let ctx = step_context(step, record);
    for validator in &step.validators {
        issues.extend(validator(&ctx));
    }

    issues
}

/// The full-record superset check run before transmission: every step's
/// fields and cross-field validators, in step order.
pub fn validate_record(blueprint: &FlowBlueprint, record: &FormRecord) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for index in 0..blueprint.step_count() {
        issues.extend(validate_step(blueprint, index, record));
    }
    issues
}

fn field_issue(spec: &FieldSpec, value: &Value) -> Option<String> {
    if value.is_empty() {
        return spec
            .required
            .then(|| "This field is required".to_string());
    }
    for validator in &spec.validators {
        if let Err(message) = validator(value) {
            return Some(message);
        }
    }
    None
}

fn step_context(step: &StepDefinition, record: &FormRecord) -> StepContext {
    let mut values = HashMap::new();
    for id in &step.field_ids {
        values.insert(id.clone(), record.value_or_none(id.as_str()).clone());
    }
    StepContext::new(step.id.clone(), values)
}

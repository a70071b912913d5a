use crate::core::FieldId;
use crate::core::field::FieldSpec;
use crate::core::record::FormRecord;
use crate::core::step::StepDefinition;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Static description of one flow: its field table, its step sequence, and
/// where accepted submissions go. Built once per flow and never mutated.
pub struct FlowBlueprint {
    id: String,
    title: String,
    endpoint_path: String,
    lead_id_key: String,
    fields: IndexMap<FieldId, FieldSpec>,
    steps: Vec<StepDefinition>,
}

impl FlowBlueprint {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            endpoint_path: String::from("/"),
            lead_id_key: String::from("id"),
            fields: IndexMap::new(),
            steps: Vec::new(),
        }
    }

    pub fn with_endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = path.into();
        self
    }

    pub fn with_lead_id_key(mut self, key: impl Into<String>) -> Self {
        self.lead_id_key = key.into();
        self
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.insert(spec.id.clone(), spec);
        self
    }

    pub fn step(mut self, step: StepDefinition) -> Self {
        self.steps.push(step);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn endpoint_path(&self) -> &str {
        &self.endpoint_path
    }

    pub fn lead_id_key(&self) -> &str {
        &self.lead_id_key
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn step_at(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.get(index)
    }

    pub fn field_spec(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.get(id)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values()
    }

    /// The restricted schema for one step: its fields, in declared order.
    pub fn step_fields(&self, index: usize) -> Vec<&FieldSpec> {
        let Some(step) = self.steps.get(index) else {
            return Vec::new();
        };
        step.field_ids
            .iter()
            .filter_map(|id| self.fields.get(id.as_str()))
            .collect()
    }

    /// The field ids that gate a step. A step may legally have none.
    pub fn required_fields(&self, index: usize) -> Vec<&FieldId> {
        self.step_fields(index)
            .into_iter()
            .filter(|spec| spec.required)
            .map(|spec| &spec.id)
            .collect()
    }

    pub fn required_field_ids(&self) -> Vec<&FieldId> {
        self.fields
            .values()
            .filter(|spec| spec.required)
            .map(|spec| &spec.id)
            .collect()
    }

    /// Seeds a fresh record with the declared field defaults. Used on flow
    /// entry only.
    pub fn apply_defaults(&self, record: &mut FormRecord) {
        for spec in self.fields.values() {
            if let Some(default) = &spec.default {
                record.set(spec.id.clone(), default.clone());
            }
        }
    }

    /// Structural check: every step field resolves, and the steps partition
    /// the field table (each field on exactly one step). Violations are
    /// programming errors in a blueprint, reported as findings for tests.
    pub fn verify(&self) -> Vec<String> {
        let mut findings = Vec::new();

        if self.steps.is_empty() {
            findings.push(format!("flow `{}` declares no steps", self.id));
        }

        let mut seen: HashSet<&FieldId> = HashSet::new();
        for step in &self.steps {
            for id in &step.field_ids {
                if !self.fields.contains_key(id.as_str()) {
                    findings.push(format!(
                        "step `{}` references unknown field `{}`",
                        step.id, id
                    ));
                }
                if !seen.insert(id) {
                    findings.push(format!("field `{}` appears on more than one step", id));
                }
            }
        }

        for id in self.fields.keys() {
            if !seen.contains(id) {
                findings.push(format!("field `{}` is not assigned to any step", id));
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::FlowBlueprint;
    use crate::core::field::FieldSpec;
    use crate::core::record::FormRecord;
    use crate::core::step::StepDefinition;
    use crate::core::value::Value;

    fn sample() -> FlowBlueprint {
        FlowBlueprint::new("sample", "Sample")
            .field(FieldSpec::text("name", "Name").required())
            .field(FieldSpec::phone("phone", "Phone"))
            .field(FieldSpec::checkbox("consent", "Consent"))
            .step(StepDefinition::new("who", "Who").field("name").field("phone"))
            .step(StepDefinition::new("extras", "Extras").field("consent"))
    }

    #[test]
    fn required_fields_are_the_gating_subset() {
        let blueprint = sample();
        let required: Vec<_> = blueprint
            .required_fields(0)
            .into_iter()
            .map(|id| id.as_str().to_string())
            .collect();
        assert_eq!(required, ["name"]);
        assert!(blueprint.required_fields(1).is_empty());
    }

    #[test]
    fn defaults_seed_the_record() {
        let blueprint = sample();
        let mut record = FormRecord::new();
        blueprint.apply_defaults(&mut record);
        assert_eq!(record.get("consent"), Some(&Value::Bool(false)));
        assert_eq!(record.get("name"), None);
    }

    #[test]
    fn verify_accepts_a_well_formed_blueprint() {
        assert!(sample().verify().is_empty());
    }

    #[test]
    fn verify_reports_unknown_and_duplicated_fields() {
        let blueprint = FlowBlueprint::new("broken", "Broken")
            .field(FieldSpec::text("name", "Name"))
            .field(FieldSpec::text("orphan", "Orphan"))
            .step(StepDefinition::new("a", "A").field("name").field("ghost"))
            .step(StepDefinition::new("b", "B").field("name"));

        let findings = blueprint.verify();
        assert!(findings.iter().any(|f| f.contains("unknown field `ghost`")));
        assert!(findings.iter().any(|f| f.contains("more than one step")));
        assert!(findings.iter().any(|f| f.contains("`orphan` is not assigned")));
    }
}

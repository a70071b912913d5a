use crate::core::field::FieldSpec;
use crate::core::registry::FlowBlueprint;
use crate::core::step::StepDefinition;
use crate::core::validators;
use crate::core::value::Value;

const ORGANIZATION_TYPES: &[&str] = &["federal", "state", "local", "education"];

const COMPLIANCE_REQUIREMENTS: &[&str] =
    &["FedRAMP", "FISMA", "CMMC", "StateRAMP", "HIPAA", "CJIS"];

const DATA_SENSITIVITY: &[&str] = &["public", "internal", "sensitive", "regulated"];

/// Federal/SLED intake: four steps. The compliance step is entirely
/// optional, and follow-up contact is opt-out rather than opt-in.
pub fn federal_flow() -> FlowBlueprint {
    FlowBlueprint::new("federal", "Federal & SLED inquiries")
        .with_endpoint_path("/api/federal-contact")
        .with_lead_id_key("submissionId")
        .field(
            FieldSpec::text("first_name", "First name")
                .required()
                .with_validator(validators::max_length(100)),
        )
        .field(
            FieldSpec::text("last_name", "Last name")
                .required()
                .with_validator(validators::max_length(100)),
        )
        .field(FieldSpec::email("email", "Official email").required())
        .field(FieldSpec::phone("phone", "Phone"))
        .field(FieldSpec::text("job_title", "Role"))
        .field(FieldSpec::text("agency_name", "Agency or organization").required())
        .field(
            FieldSpec::choice("organization_type", "Organization type", ORGANIZATION_TYPES)
                .required(),
        )
        .field(FieldSpec::text("contracting_vehicle", "Contracting vehicle"))
        .field(FieldSpec::multi_select(
            "compliance_requirements",
            "Compliance requirements",
            COMPLIANCE_REQUIREMENTS,
        ))
        .field(FieldSpec::choice(
            "data_sensitivity",
            "Data sensitivity",
            DATA_SENSITIVITY,
        ))
        .field(
            FieldSpec::text("project_summary", "What does your mission need?")
                .required()
                .with_validator(validators::max_length(2000)),
        )
        .field(
            FieldSpec::checkbox("request_followup", "Request a follow-up call")
                .with_default(Value::Bool(true)),
        )
        .step(
            StepDefinition::new("contact", "Your contact details")
                .fields(["first_name", "last_name", "email", "phone", "job_title"]),
        )
        .step(
            StepDefinition::new("organization", "Your organization").fields([
                "agency_name",
                "organization_type",
                "contracting_vehicle",
            ]),
        )
        .step(
            StepDefinition::new("compliance", "Compliance posture")
                .fields(["compliance_requirements", "data_sensitivity"]),
        )
        .step(
            StepDefinition::new("project", "Your project")
                .fields(["project_summary", "request_followup"]),
        )
}

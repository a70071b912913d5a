use crate::core::field::FieldSpec;
use crate::core::registry::FlowBlueprint;
use crate::core::step::StepDefinition;
use crate::core::validators;

const COMPANY_SIZES: &[&str] = &["1-50", "51-200", "201-500", "501-1000", "1000+"];

const INDUSTRIES: &[&str] = &[
    "tech",
    "finance",
    "healthcare",
    "retail",
    "manufacturing",
    "other",
];

const TIMELINES: &[&str] = &["immediate", "1-3 months", "3-6 months", "exploring"];

/// Commercial intake: three steps, consent opt-in defaulted off.
pub fn commercial_flow() -> FlowBlueprint {
    FlowBlueprint::new("commercial", "Talk to our team")
        .with_endpoint_path("/api/contact")
        .with_lead_id_key("inquiryId")
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
        .field(FieldSpec::email("email", "Work email").required())
        .field(FieldSpec::phone("phone", "Phone"))
        .field(FieldSpec::text("job_title", "Job title"))
        .field(FieldSpec::text("company_name", "Company name").required())
        .field(FieldSpec::choice("company_size", "Company size", COMPANY_SIZES).required())
        .field(FieldSpec::choice("industry", "Industry", INDUSTRIES).required())
        .field(
            FieldSpec::text("project_summary", "What are you looking to build?")
                .required()
                .with_validator(validators::max_length(2000)),
        )
        .field(FieldSpec::choice("timeline", "Timeline", TIMELINES))
        .field(FieldSpec::checkbox(
            "marketing_consent",
            "Keep me up to date on products and events",
        ))
        .step(
            StepDefinition::new("contact", "Your contact details")
                .fields(["first_name", "last_name", "email", "phone", "job_title"]),
        )
        .step(
            StepDefinition::new("company", "About your company")
                .fields(["company_name", "company_size", "industry"]),
        )
        .step(
            StepDefinition::new("project", "Your project")
                .fields(["project_summary", "timeline", "marketing_consent"]),
        )
}

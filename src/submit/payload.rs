use crate::core::field::{FieldKind, FieldSpec};
use crate::core::registry::FlowBlueprint;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue, json};
use std::collections::HashMap;

/// One prepared submission: the flow-specific endpoint path and the record's
/// JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub path: String,
    pub body: JsonValue,
}

/// Happy-path backend response. The flow-specific id (`inquiryId`,
/// `submissionId`, ...) arrives in the flattened extras under the key the
/// blueprint declares.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, JsonValue>,
}

impl SubmitResponse {
    pub fn id_value(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(JsonValue::as_str)
    }
}

/// Backend rejection body (status 400/500).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, String>>,
}

/// JSON Schema of a flow's submission payload, derived from its field table.
/// The response/error shapes come from `schemars` on the types above; the
/// payload is data-driven, so its schema is assembled here.
pub fn payload_schema(blueprint: &FlowBlueprint) -> JsonValue {
    let mut properties = Map::new();
    for spec in blueprint.fields() {
        properties.insert(spec.id.to_string(), field_schema(spec));
    }
    let required: Vec<JsonValue> = blueprint
        .required_field_ids()
        .into_iter()
        .map(|id| json!(id.as_str()))
        .collect();

    json!({
        "title": format!("{}-lead", blueprint.id()),
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn field_schema(spec: &FieldSpec) -> JsonValue {
    match spec.kind {
        FieldKind::Text => json!({ "type": "string", "description": spec.label }),
        FieldKind::Email => json!({ "type": "string", "format": "email", "description": spec.label }),
        FieldKind::Phone => json!({ "type": "string", "description": spec.label }),
        FieldKind::Checkbox => json!({ "type": "boolean", "description": spec.label }),
        FieldKind::Choice => json!({
            "type": "string",
            "enum": spec.options(),
            "description": spec.label,
        }),
        FieldKind::MultiSelect => json!({
            "type": "array",
            "items": { "type": "string", "enum": spec.options() },
            "uniqueItems": true,
            "description": spec.label,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{SubmitResponse, payload_schema};
    use crate::flows::FlowKind;

    #[test]
    fn response_surfaces_the_flow_specific_id() {
        let raw = r#"{"success":true,"message":"ok","inquiryId":"abc-123"}"#;
        let response: SubmitResponse = serde_json::from_str(raw).expect("decode");
        assert!(response.success);
        assert_eq!(response.id_value("inquiryId"), Some("abc-123"));
        assert_eq!(response.id_value("submissionId"), None);
    }

    #[test]
    fn payload_schema_lists_required_fields() {
        let schema = payload_schema(&FlowKind::Commercial.blueprint());
        let required = schema["required"].as_array().expect("required array");
        assert!(required.contains(&serde_json::json!("company_name")));
        assert!(!required.contains(&serde_json::json!("phone")));
        assert_eq!(schema["properties"]["company_size"]["type"], "string");
        assert!(schema["properties"]["company_size"]["enum"].is_array());
    }
}

use crate::core::FieldId;
use crate::core::value::Value;
use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

/// Accumulating form record for one wizard session. Keys keep the order in
/// which fields were first written; fields not yet visited are simply absent.
#[derive(Debug, Default)]
pub struct FormRecord {
    values: IndexMap<FieldId, Value>,
}

impl FormRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets exactly one key. Every other entry is left untouched.
    pub fn set(&mut self, id: impl Into<FieldId>, value: Value) {
        self.values.insert(id.into(), value);
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    /// Absent keys read as the empty value so validators never need to care
    /// whether a field was visited.
    pub fn value_or_none(&self, id: &str) -> &Value {
        static NONE: Value = Value::None;
        self.values.get(id).unwrap_or(&NONE)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rebuilds a record from a captured JSON object (the relay's input
    /// path). Null entries are dropped; unsupported shapes are errors.
    pub fn from_json(json: &JsonValue) -> Result<Self, String> {
        let JsonValue::Object(object) = json else {
            return Err("lead payload must be a JSON object".to_string());
        };

        let mut record = Self::new();
        for (key, entry) in object {
            let value = match entry {
                JsonValue::Null => continue,
                JsonValue::String(text) => Value::Text(text.clone()),
                JsonValue::Bool(flag) => Value::Bool(*flag),
                JsonValue::Array(items) => {
                    let mut list = Vec::with_capacity(items.len());
                    for item in items {
                        let JsonValue::String(text) = item else {
                            return Err(format!("field `{}` holds a non-string entry", key));
                        };
                        list.push(text.clone());
                    }
                    Value::List(list)
                }
                _ => return Err(format!("field `{}` has an unsupported value shape", key)),
            };
            record.set(key.clone(), value);
        }
        Ok(record)
    }

    /// JSON object of the populated entries, in insertion order.
    pub fn to_json(&self) -> JsonValue {
        let mut object = Map::new();
        for (id, value) in &self.values {
            if !matches!(value, Value::None) {
                object.insert(id.to_string(), value.to_json());
            }
        }
        JsonValue::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::FormRecord;
    use crate::core::value::Value;

    #[test]
    fn set_preserves_unrelated_keys() {
        let mut record = FormRecord::new();
        record.set("first_name", Value::text("John"));
        record.set("email", Value::text("john@co.com"));
        record.set("first_name", Value::text("Jane"));

        assert_eq!(record.get("first_name"), Some(&Value::text("Jane")));
        assert_eq!(record.get("email"), Some(&Value::text("john@co.com")));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn absent_key_reads_as_none() {
        let record = FormRecord::new();
        assert_eq!(record.value_or_none("phone"), &Value::None);
        assert!(record.value_or_none("phone").is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut record = FormRecord::new();
        record.set("a", Value::Bool(true));
        record.reset();
        assert!(record.is_empty());
    }

    #[test]
    fn json_round_trip_restores_the_record() {
        let mut record = FormRecord::new();
        record.set("name", Value::text("Ada"));
        record.set("consent", Value::Bool(true));
        record.set("tags", Value::list(["a", "b"]));

        let restored = FormRecord::from_json(&record.to_json()).expect("decode");
        assert_eq!(restored.get("name"), Some(&Value::text("Ada")));
        assert_eq!(restored.get("consent"), Some(&Value::Bool(true)));
        assert_eq!(restored.get("tags"), Some(&Value::list(["a", "b"])));
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        assert!(FormRecord::from_json(&serde_json::json!([1, 2])).is_err());
        assert!(FormRecord::from_json(&serde_json::json!({ "n": 4 })).is_err());
    }

    #[test]
    fn json_skips_unset_values() {
        let mut record = FormRecord::new();
        record.set("name", Value::text("Ada"));
        record.set("phone", Value::None);
        assert_eq!(record.to_json(), serde_json::json!({ "name": "Ada" }));
    }
}

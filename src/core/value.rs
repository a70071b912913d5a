use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Text(String),
    Bool(bool),
    Choice(String),
    List(Vec<String>),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn choice(value: impl Into<String>) -> Self {
        Self::Choice(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(v) | Self::Choice(v) => v.is_empty(),
            Self::List(v) => v.is_empty(),
            Self::Bool(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) | Self::Choice(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::None => JsonValue::Null,
            Self::Text(v) | Self::Choice(v) => JsonValue::String(v.clone()),
            Self::Bool(v) => JsonValue::Bool(*v),
            Self::List(v) => {
                JsonValue::Array(v.iter().cloned().map(JsonValue::String).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Value;

    #[test]
    fn emptiness_by_shape() {
        assert!(Value::None.is_empty());
        assert!(Value::text("").is_empty());
        assert!(Value::List(vec![]).is_empty());
        assert!(!Value::Bool(false).is_empty());
        assert!(!Value::choice("tech").is_empty());
    }

    #[test]
    fn json_conversion_preserves_shape() {
        assert_eq!(Value::text("hi").to_json(), serde_json::json!("hi"));
        assert_eq!(Value::Bool(true).to_json(), serde_json::json!(true));
        assert_eq!(
            Value::list(["a", "b"]).to_json(),
            serde_json::json!(["a", "b"])
        );
        assert_eq!(Value::None.to_json(), serde_json::Value::Null);
    }
}

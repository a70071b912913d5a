use crate::core::value::Value;
use regex::Regex;
use std::sync::OnceLock;

pub type Validator = Box<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// Populated text of a value, if any. Format validators accept empty values;
/// emptiness is the required-field check's concern, not theirs.
fn populated_text(value: &Value) -> Option<&str> {
    match value.as_text() {
        Some(text) if !text.is_empty() => Some(text),
        _ => None,
    }
}

pub fn email() -> Validator {
    static RE: OnceLock<Regex> = OnceLock::new();
    Box::new(move |value: &Value| {
        let Some(text) = populated_text(value) else {
            return Ok(());
        };
        let re = RE.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
                .expect("email pattern")
        });
        if re.is_match(text) {
            Ok(())
        } else {
            Err("Enter a valid email address".to_string())
        }
    })
}

pub fn phone() -> Validator {
    static RE: OnceLock<Regex> = OnceLock::new();
    Box::new(move |value: &Value| {
        let Some(text) = populated_text(value) else {
            return Ok(());
        };
        let re = RE
            .get_or_init(|| Regex::new(r"^\+?[0-9()\-\s.]{7,20}$").expect("phone pattern"));
        if re.is_match(text) {
            Ok(())
        } else {
            Err("Enter a valid phone number".to_string())
        }
    })
}

pub fn min_length(min: usize) -> Validator {
    Box::new(move |value: &Value| match populated_text(value) {
        Some(text) if text.chars().count() < min => {
            Err(format!("Minimum length is {}", min))
        }
        _ => Ok(()),
    })
}

pub fn max_length(max: usize) -> Validator {
    Box::new(move |value: &Value| match populated_text(value) {
        Some(text) if text.chars().count() > max => {
            Err(format!("Maximum length is {}", max))
        }
        _ => Ok(()),
    })
}

pub fn regex(pattern: &str) -> Validator {
    let re = Regex::new(pattern).expect("Invalid regex pattern");
    Box::new(move |value: &Value| {
        let Some(text) = populated_text(value) else {
            return Ok(());
        };
        if re.is_match(text) {
            Ok(())
        } else {
            Err(format!("Value must match pattern: {}", re.as_str()))
        }
    })
}

/// Choice membership. Empty values pass.
pub fn one_of(options: Vec<String>) -> Validator {
    Box::new(move |value: &Value| {
        let Some(text) = populated_text(value) else {
            return Ok(());
        };
        if options.iter().any(|option| option == text) {
            Ok(())
        } else {
            Err("Choose one of the listed options".to_string())
        }
    })
}

/// Multi-select membership: every selected entry must be a listed option.
pub fn subset_of(options: Vec<String>) -> Validator {
    Box::new(move |value: &Value| {
        let Some(selected) = value.as_list() else {
            return Ok(());
        };
        for entry in selected {
            if !options.iter().any(|option| option == entry) {
                return Err(format!("{} is not a listed option", entry));
            }
        }
        Ok(())
    })
}

pub fn custom<F>(f: F, message: impl Into<String>) -> Validator
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    let msg = message.into();
    Box::new(move |value: &Value| if f(value) { Ok(()) } else { Err(msg.clone()) })
}

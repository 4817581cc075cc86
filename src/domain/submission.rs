use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The payload as received. Every field may be absent.
///
/// Non-string JSON values are accepted: falsy ones (`null`, `false`, `0`) count as absent,
/// anything else is kept as its textual form.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ContactForm {
    #[serde(default, deserialize_with = "truthy_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub query: Option<String>,
}

fn truthy_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_owned()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// A contact form with all five fields present and non-empty.
#[derive(Debug, Clone)]
pub struct Submission {
    name: String,
    email: String,
    number: String,
    category: String,
    query: String,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("All fields are required")]
pub struct MissingFields(pub Vec<&'static str>);

impl Submission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl TryFrom<ContactForm> for Submission {
    type Error = MissingFields;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let mut missing = Vec::new();
        let mut require = |value: Option<String>, field: &'static str| match value {
            Some(value) if !value.is_empty() => value,
            _ => {
                missing.push(field);
                String::new()
            }
        };

        let name = require(form.name, "name");
        let email = require(form.email, "email");
        let number = require(form.number, "number");
        let category = require(form.category, "category");
        let query = require(form.query, "query");

        if !missing.is_empty() {
            return Err(MissingFields(missing));
        }

        Ok(Self {
            name,
            email,
            number,
            category,
            query,
        })
    }
}

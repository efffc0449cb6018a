use crate::ReportError;
use serde_json::{Map, Value};

/// One item from a lookup response: a person, a phone number, a job period.
///
/// Records are read-only views over a JSON object. Every accessor treats a missing key,
/// `null`, and a blank string the same way: the value is absent. Numbers and booleans
/// read as their text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new() -> Record {
        Record::default()
    }

    /// A record for `value` if it's a JSON object
    pub fn from_value(value: Value) -> Option<Record> {
        match value {
            Value::Object(fields) => Some(Record { fields }),
            _ => None,
        }
    }

    /// Parse a lookup response body of the form `{"result": {...}}`. A response with no
    /// `result` object means nothing was found for the lookup.
    pub fn from_response(body: &[u8]) -> Result<Option<Record>, ReportError> {
        let response: Value = serde_json::from_slice(body)?;
        Ok(match response {
            Value::Object(mut fields) => fields.remove("result").and_then(Record::from_value),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The raw value stored under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(value_text)
    }

    /// Text found by following `keys` through nested objects
    pub fn path(&self, keys: &[&str]) -> Option<String> {
        let (first, rest) = keys.split_first()?;
        let mut value = self.get(first)?;
        for key in rest {
            value = value.get(key)?;
        }
        value_text(value)
    }

    /// The nested object under `key`
    pub fn record(&self, key: &str) -> Option<Record> {
        self.get(key).cloned().and_then(Record::from_value)
    }

    /// The records in the array under `key`. Anything other than an array reads as an
    /// empty list; array items that aren't objects read as empty records.
    pub fn list(&self, key: &str) -> Vec<Record> {
        match self.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| Record::from_value(item.clone()).unwrap_or_default())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The present values of `keys` joined with `separator`, or [None] if none of them
    /// are present
    pub fn join(&self, keys: &[&str], separator: &str) -> Option<String> {
        let parts: Vec<String> = keys.iter().filter_map(|key| self.text(key)).collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(separator))
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Record { fields }
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

// Error report object model

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use verdict_core::MetaValue;

/// One step of an error's location: a camel-cased member name or a
/// zero-based collection index.
#[derive(Clone, Debug, PartialEq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl Serialize for PathSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PathSegment::Key(key) => serializer.serialize_str(key),
            PathSegment::Index(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

/// One normalized validation failure: an error kind, the failing value's
/// path, and the rule's extracted metadata. Immutable once created.
#[derive(Clone, Debug)]
pub struct ValidationError {
    error: String,
    path: Vec<PathSegment>,
    properties: Vec<(String, MetaValue)>,
}

impl ValidationError {
    pub fn new(error: impl Into<String>, path: Vec<PathSegment>) -> Self {
        Self {
            error: error.into(),
            path,
            properties: Vec::new(),
        }
    }

    pub fn with_properties(
        error: impl Into<String>,
        path: Vec<PathSegment>,
        properties: Vec<(String, MetaValue)>,
    ) -> Self {
        Self {
            error: error.into(),
            path,
            properties,
        }
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    pub fn properties(&self) -> &[(String, MetaValue)] {
        &self.properties
    }
}

// Serialized by hand so the field order is pinned: `error`, then `path`,
// then the metadata keys in extraction order.
impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.properties.len()))?;
        map.serialize_entry("error", &self.error)?;
        map.serialize_entry("path", &self.path)?;
        for (key, value) in &self.properties {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The aggregated validation outcome: a title and at least one error.
///
/// "No errors" is represented by the absence of a response (`None`), which
/// serializes to a literal JSON `null`.
#[derive(Clone, Debug)]
pub struct ValidationResponse {
    title: String,
    errors: Vec<ValidationError>,
}

impl ValidationResponse {
    /// # Panics
    ///
    /// Panics when `errors` is empty; a response is never built without at
    /// least one error.
    pub fn new(title: impl Into<String>, errors: Vec<ValidationError>) -> Self {
        assert!(
            !errors.is_empty(),
            "a validation response must carry at least one error"
        );
        Self {
            title: title.into(),
            errors,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }
}

impl Serialize for ValidationResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("title", &self.title)?;
        map.serialize_entry("errors", &self.errors)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sets_properties_as_part_of_the_json() {
        let errors = vec![
            ValidationError::new(
                "required",
                vec!["experiences".into(), 0.into(), "company".into()],
            ),
            ValidationError::with_properties(
                "minLength",
                vec!["summary".into()],
                vec![("length".to_string(), MetaValue::Int(3))],
            ),
        ];
        let response = ValidationResponse::new("Validation", errors);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Validation",
                "errors": [
                    {"error": "required", "path": ["experiences", 0, "company"]},
                    {"error": "minLength", "path": ["summary"], "length": 3}
                ]
            })
        );
    }

    #[test]
    fn field_order_is_pinned() {
        let response = ValidationResponse::new(
            "Validation",
            vec![ValidationError::with_properties(
                "minLength",
                vec!["summary".into()],
                vec![("length".to_string(), MetaValue::Int(3))],
            )],
        );

        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"title":"Validation","errors":[{"error":"minLength","path":["summary"],"length":3}]}"#
        );
    }

    #[test]
    fn absent_response_serializes_to_null() {
        let absent: Option<ValidationResponse> = None;
        assert_eq!(serde_json::to_string(&absent).unwrap(), "null");
    }

    #[test]
    #[should_panic(expected = "at least one error")]
    fn response_rejects_an_empty_error_list() {
        ValidationResponse::new("Validation", Vec::new());
    }
}

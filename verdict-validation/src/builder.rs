// Rule evaluation and error aggregation

use once_cell::sync::Lazy;
use regex::Regex;
use verdict_core::{camel_case, Check, MetaValue, Reflect, Rule, Value};

use crate::{extract, BuildError, PathSegment, Property, PropertyNavigator, ValidationError, ValidationResponse};

static KEY_SEGMENTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<prop>\w+)(?:\[(?P<index>\d+)\]\.?|\.)?").unwrap());

static CONVERT_MESSAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Could not convert (?:\w+) to (?P<type>\w+)").unwrap());

/// One malformed-input field reported by the host's binding layer. The host
/// guarantees exactly one underlying conversion failure per entry.
#[derive(Clone, Debug, Default)]
pub struct ModelStateEntry {
    errors: Vec<String>,
}

impl ModelStateEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

/// Walks a model (or ingests the host's conversion-error state) and
/// accumulates normalized [`ValidationError`]s in traversal order.
///
/// Validation failures are the normal output and never abort the walk;
/// a [`BuildError`] signals a rule or host setup mistake and aborts the
/// build with no partial report.
#[derive(Default)]
pub struct ValidationResponseBuilder {
    errors: Vec<ValidationError>,
}

impl ValidationResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalid(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The aggregated report, or `None` when no errors were collected.
    pub fn result(&self) -> Option<ValidationResponse> {
        if self.invalid() {
            Some(ValidationResponse::new("Validation", self.errors.clone()))
        } else {
            None
        }
    }

    /// Evaluates every rule on every reachable member of `model`.
    pub fn build_from_model(&mut self, model: &dyn Reflect) -> Result<(), BuildError> {
        self.errors.clear();
        let mut navigator = PropertyNavigator::new(model);
        while let Some(property) = navigator.read() {
            for rule in property.rules() {
                self.check_rule(rule, &property)?;
            }
        }
        tracing::debug!(errors = self.errors.len(), "model validation complete");
        Ok(())
    }

    /// Ingests member-level conversion failures reported by the host's
    /// binding layer, one `"convert"` error per entry.
    pub fn build_from_model_state(
        &mut self,
        state: &[(String, ModelStateEntry)],
    ) -> Result<(), BuildError> {
        self.errors.clear();
        for (key, entry) in state {
            self.errors.push(ValidationError::with_properties(
                "convert",
                key_to_path(key),
                conversion_properties(key, entry)?,
            ));
        }
        tracing::debug!(errors = self.errors.len(), "model state ingestion complete");
        Ok(())
    }

    fn check_rule(&mut self, rule: &Rule, property: &Property<'_>) -> Result<(), BuildError> {
        if self.special_cases(rule, property) {
            return Ok(());
        }
        if !rule.is_valid(&property.value(), property.owner()) {
            self.errors.push(ValidationError::with_properties(
                error_kind(rule.name()),
                property.path().to_vec(),
                extract(rule)?,
            ));
        }
        Ok(())
    }

    /// A required rule on a collection value is redirected: emptiness is its
    /// own error kind, and the generic required check never runs for this
    /// combination.
    fn special_cases(&mut self, rule: &Rule, property: &Property<'_>) -> bool {
        if matches!(rule.check(), Check::Required) {
            if let Value::List(list) = property.value() {
                if list.is_empty() {
                    self.errors
                        .push(ValidationError::new("empty", property.path().to_vec()));
                }
                return true;
            }
        }
        false
    }
}

/// Error kind for a failed rule: the declared identifier with a trailing
/// `Attribute` or `Validator` suffix stripped, camel-cased.
fn error_kind(name: &str) -> String {
    let stripped = name
        .strip_suffix("Attribute")
        .or_else(|| name.strip_suffix("Validator"))
        .unwrap_or(name);
    camel_case(stripped)
}

/// Splits a binding key such as `people[1].surname` into path segments.
fn key_to_path(key: &str) -> Vec<PathSegment> {
    let mut path = Vec::new();
    for capture in KEY_SEGMENTS.captures_iter(key) {
        path.push(PathSegment::Key(capture["prop"].to_string()));
        if let Some(index) = capture.name("index") {
            if let Ok(index) = index.as_str().parse() {
                path.push(PathSegment::Index(index));
            }
        }
    }
    path
}

fn conversion_properties(
    key: &str,
    entry: &ModelStateEntry,
) -> Result<Vec<(String, MetaValue)>, BuildError> {
    if entry.errors().len() != 1 {
        return Err(BuildError::ConversionErrorCount {
            key: key.to_string(),
            count: entry.errors().len(),
        });
    }
    let message = &entry.errors()[0];
    let target = CONVERT_MESSAGE
        .captures(message)
        .and_then(|capture| capture.name("type"))
        .ok_or_else(|| BuildError::ConversionErrorFormat(message.clone()))?;
    Ok(vec![(
        "type".to_string(),
        MetaValue::Str(target.as_str().to_string()),
    )])
}

// Validation rules: declared configuration plus a pass/fail predicate

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::{Reflect, Value};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?\d[\d\s().-]{4,}$").unwrap());

/// Closed variant for rule configuration data and error metadata values.
#[derive(Clone, Debug, PartialEq)]
pub enum MetaValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl MetaValue {
    fn as_number(&self) -> Option<f64> {
        match self {
            MetaValue::Int(v) => Some(*v as f64),
            MetaValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl Serialize for MetaValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetaValue::Str(v) => serializer.serialize_str(v),
            MetaValue::Int(v) => serializer.serialize_i64(*v),
            MetaValue::Float(v) => serializer.serialize_f64(*v),
            MetaValue::Bool(v) => serializer.serialize_bool(*v),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Str(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Str(value)
    }
}

impl From<i32> for MetaValue {
    fn from(value: i32) -> Self {
        MetaValue::Int(i64::from(value))
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Int(value)
    }
}

impl From<usize> for MetaValue {
    fn from(value: usize) -> Self {
        MetaValue::Int(value as i64)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        MetaValue::Float(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

/// Predicate type for user-defined rules.
pub type Predicate = Arc<dyn Fn(&Value<'_>) -> bool + Send + Sync>;

/// The check a rule performs, tagged by kind.
///
/// Consumers dispatch on this tag both to evaluate the predicate and to pick
/// the metadata-extraction policy for the rule.
pub enum Check {
    Required,
    MinLength(usize),
    MaxLength(usize),
    StringLength { minimum: usize, maximum: usize },
    Range { minimum: MetaValue, maximum: MetaValue },
    Pattern(Regex),
    Compare { other_property: String },
    Enumeration(Vec<String>),
    Email,
    Url,
    Phone,
    CreditCard,
    FileExtensions(Vec<String>),
    Custom(Predicate),
}

/// A named validation rule attached to a model member.
///
/// Carries the declared type identifier (used to derive the error kind), the
/// check to perform, and the declared configuration fields consumed by the
/// generic metadata-extraction path.
pub struct Rule {
    name: &'static str,
    check: Check,
    params: Vec<(&'static str, MetaValue)>,
}

impl Rule {
    pub fn required() -> Self {
        Self {
            name: "Required",
            check: Check::Required,
            params: Vec::new(),
        }
    }

    pub fn min_length(length: usize) -> Self {
        Self {
            name: "MinLength",
            check: Check::MinLength(length),
            params: vec![("Length", MetaValue::from(length))],
        }
    }

    pub fn max_length(length: usize) -> Self {
        Self {
            name: "MaxLength",
            check: Check::MaxLength(length),
            params: vec![("Length", MetaValue::from(length))],
        }
    }

    pub fn string_length(minimum: usize, maximum: usize) -> Self {
        Self {
            name: "StringLength",
            check: Check::StringLength { minimum, maximum },
            params: vec![
                ("MinimumLength", MetaValue::from(minimum)),
                ("MaximumLength", MetaValue::from(maximum)),
            ],
        }
    }

    /// Inclusive numeric range. Bounds keep the representation they were
    /// declared with (integer or float) in the error metadata.
    pub fn range<T: Into<MetaValue>>(minimum: T, maximum: T) -> Self {
        Self {
            name: "Range",
            check: Check::Range {
                minimum: minimum.into(),
                maximum: maximum.into(),
            },
            params: Vec::new(),
        }
    }

    /// The pattern must cover the whole input, not just a substring of it.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: "RegularExpression",
            check: Check::Pattern(Regex::new(pattern)?),
            params: Vec::new(),
        })
    }

    /// Passes when the value equals the sibling member named
    /// `other_property` on the owning object.
    pub fn compare(other_property: impl Into<String>) -> Self {
        Self {
            name: "Compare",
            check: Check::Compare {
                other_property: other_property.into(),
            },
            params: Vec::new(),
        }
    }

    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: "EnumDataType",
            check: Check::Enumeration(values.into_iter().map(Into::into).collect()),
            params: Vec::new(),
        }
    }

    pub fn email() -> Self {
        Self {
            name: "EmailAddress",
            check: Check::Email,
            params: Vec::new(),
        }
    }

    pub fn url() -> Self {
        Self {
            name: "Url",
            check: Check::Url,
            params: Vec::new(),
        }
    }

    pub fn phone() -> Self {
        Self {
            name: "Phone",
            check: Check::Phone,
            params: Vec::new(),
        }
    }

    pub fn credit_card() -> Self {
        Self {
            name: "CreditCard",
            check: Check::CreditCard,
            params: Vec::new(),
        }
    }

    /// `extensions` is the comma-separated list as declared, e.g. `"jpg,png"`.
    pub fn file_extensions(extensions: &str) -> Self {
        Self {
            name: "FileExtensions",
            check: Check::FileExtensions(
                extensions
                    .split(',')
                    .map(|ext| ext.trim().to_ascii_lowercase())
                    .collect(),
            ),
            params: vec![("Extensions", MetaValue::from(extensions))],
        }
    }

    /// A user-defined rule. `name` follows the built-in naming convention
    /// (PascalCase, optionally suffixed `Attribute` or `Validator`), and
    /// `params` lists the rule's declared configuration fields.
    pub fn custom<F>(name: &'static str, params: Vec<(&'static str, MetaValue)>, predicate: F) -> Self
    where
        F: Fn(&Value<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            name,
            check: Check::Custom(Arc::new(predicate)),
            params,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn check(&self) -> &Check {
        &self.check
    }

    /// Declared configuration fields, in declaration order.
    pub fn params(&self) -> &[(&'static str, MetaValue)] {
        &self.params
    }

    /// Evaluates the rule against a member value. `owner` is the object the
    /// member was read from; only sibling-comparing rules consult it.
    ///
    /// Null values pass every check except `required`: absence is reported
    /// once, by the required rule, not by every rule on the member.
    pub fn is_valid(&self, value: &Value<'_>, owner: &dyn Reflect) -> bool {
        match &self.check {
            Check::Required => match value {
                Value::Null => false,
                Value::Str(s) => !s.trim().is_empty(),
                _ => true,
            },
            Check::MinLength(length) => value.length().is_none_or(|len| len >= *length),
            Check::MaxLength(length) => value.length().is_none_or(|len| len <= *length),
            Check::StringLength { minimum, maximum } => match value {
                Value::Str(s) => s.len() >= *minimum && s.len() <= *maximum,
                _ => true,
            },
            Check::Range { minimum, maximum } => match value.as_number() {
                Some(number) => match (minimum.as_number(), maximum.as_number()) {
                    (Some(low), Some(high)) => number >= low && number <= high,
                    _ => true,
                },
                None => true,
            },
            Check::Pattern(regex) => match value {
                Value::Str(s) if !s.is_empty() => whole_match(regex, s),
                _ => true,
            },
            Check::Compare { other_property } => {
                match owner.type_info().index_of(other_property) {
                    Some(index) => owner.member(index) == *value,
                    None => false,
                }
            }
            Check::Enumeration(values) => match value {
                Value::Str(s) => values.iter().any(|candidate| candidate == s),
                _ => true,
            },
            Check::Email => format_check(value, &EMAIL_REGEX),
            Check::Url => format_check(value, &URL_REGEX),
            Check::Phone => format_check(value, &PHONE_REGEX),
            Check::CreditCard => match value {
                Value::Null => true,
                Value::Str(s) => luhn(s),
                _ => false,
            },
            Check::FileExtensions(extensions) => match value {
                Value::Null => true,
                Value::Str(s) => {
                    let name = s.to_ascii_lowercase();
                    extensions.iter().any(|ext| {
                        name.len() > ext.len() + 1 && name.ends_with(ext)
                            && name.as_bytes()[name.len() - ext.len() - 1] == b'.'
                    })
                }
                _ => false,
            },
            Check::Custom(predicate) => predicate(value),
        }
    }
}

fn format_check(value: &Value<'_>, regex: &Regex) -> bool {
    match value {
        Value::Str(s) if !s.is_empty() => regex.is_match(s),
        _ => true,
    }
}

fn whole_match(regex: &Regex, input: &str) -> bool {
    regex
        .find(input)
        .is_some_and(|found| found.start() == 0 && found.end() == input.len())
}

/// Luhn checksum over the digits of `value`; spaces and dashes are ignored,
/// any other non-digit fails the check.
fn luhn(value: &str) -> bool {
    let digits: Option<Vec<u32>> = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .map(|c| c.to_digit(10))
        .collect();
    let Some(digits) = digits else {
        return false;
    };
    if digits.is_empty() {
        return false;
    }

    let mut sum = 0;
    let mut double = false;
    for digit in digits.iter().rev() {
        let mut digit = *digit;
        if double {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        double = !double;
    }
    sum % 10 == 0
}

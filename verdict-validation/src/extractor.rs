// Rule metadata extraction

use verdict_core::{camel_case, Check, MetaValue, Rule};

use crate::BuildError;

/// Turns a failed rule's declared configuration into error metadata.
///
/// Well-known rule classes have fixed shapes; everything else falls back to
/// reflecting the rule's declared configuration fields with camel-cased
/// keys. A declared field named `error` or `path` (case-insensitive) would
/// silently collide with the error record's own fields, so it is rejected as
/// a configuration mistake instead.
pub fn extract(rule: &Rule) -> Result<Vec<(String, MetaValue)>, BuildError> {
    match rule.check() {
        Check::Required | Check::Enumeration(_) => Ok(Vec::new()),
        Check::Compare { other_property } => Ok(vec![(
            "otherProperty".to_string(),
            MetaValue::Str(other_property.clone()),
        )]),
        Check::Range { minimum, maximum } => Ok(vec![
            ("minimum".to_string(), minimum.clone()),
            ("maximum".to_string(), maximum.clone()),
        ]),
        Check::Pattern(pattern) => Ok(vec![(
            "pattern".to_string(),
            MetaValue::Str(pattern.as_str().to_string()),
        )]),
        _ => declared_fields(rule),
    }
}

fn declared_fields(rule: &Rule) -> Result<Vec<(String, MetaValue)>, BuildError> {
    let mut properties = Vec::with_capacity(rule.params().len());
    for (name, value) in rule.params() {
        if name.eq_ignore_ascii_case("error") || name.eq_ignore_ascii_case("path") {
            return Err(BuildError::ReservedFieldName((*name).to_string()));
        }
        properties.push((camel_case(name), value.clone()));
    }
    Ok(properties)
}

//! Build-time structural validation
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. required single-valued elements are present
//! 2. required repeating elements are non-empty and within bounds
//! 3. every value belongs to one of its element's declared types
//! 4. primitive values (and leaf elements such as `Resource.id`) satisfy
//!    their lexical rule
//! 5. `Reference` values point at an allowed resource type
//! 6. `ele-1`: non-resource nodes carry a value or children
//! 7. containment rules of `DomainResource`
//!
//! Expression-based constraints (`ait-1`, `per-1`, ...) are not evaluated here.

use std::sync::OnceLock;

use regex::Regex;

use crate::containment;
use crate::error::{Error, Result};
use crate::model::Model;
use crate::node::{Field, Node};
use crate::primitive::check_lexical;
use crate::schema::ElementDefinition;

pub(crate) fn validate(node: &Node) -> Result<()> {
    let info = node.type_info();
    let config = node.model().config();

    check_required(node)?;
    check_sequences(node)?;
    check_types(node)?;
    check_value(node)?;
    if config.check_reference_types {
        check_references(node)?;
    }
    if config.require_value_or_children && !info.is_resource() {
        check_value_or_children(node)?;
    }
    if info.is_domain_resource() {
        containment::check(node)?;
    }
    Ok(())
}

fn check_required(node: &Node) -> Result<()> {
    for (element, field) in node.fields() {
        if element.is_required() && matches!(field, Field::Single(None)) {
            return Err(Error::MissingRequiredField(element.name.to_string()));
        }
    }
    Ok(())
}

fn check_sequences(node: &Node) -> Result<()> {
    for (element, field) in node.fields() {
        let Field::Many(values) = field else {
            continue;
        };
        if element.is_required() && values.is_empty() {
            return Err(Error::EmptyRequiredSequence(element.name.to_string()));
        }

        let count = values.len();
        let min = element.cardinality.min as usize;
        if count > 0 && count < min {
            return Err(Error::CardinalityMismatch {
                field: element.name.to_string(),
                message: format!("{count} values supplied, at least {min} required"),
            });
        }
        if let Some(max) = element.cardinality.max {
            if count > max as usize {
                return Err(Error::CardinalityMismatch {
                    field: element.name.to_string(),
                    message: format!("{count} values supplied, at most {max} allowed"),
                });
            }
        }
    }
    Ok(())
}

fn check_types(node: &Node) -> Result<()> {
    for (element, field) in node.fields() {
        for value in field.values() {
            if element.types.iter().any(|t| value.is_a(t)) {
                continue;
            }
            let supplied = value.type_name().to_string();
            return Err(if element.is_choice() {
                Error::InvalidChoiceType {
                    field: element.name.to_string(),
                    supplied,
                    allowed: element.types.iter().map(|t| t.to_string()).collect(),
                }
            } else {
                Error::InvalidElementType {
                    field: element.name.to_string(),
                    supplied,
                    expected: element.types.join(" | "),
                }
            });
        }
    }
    Ok(())
}

fn check_value(node: &Node) -> Result<()> {
    let info = node.type_info();
    let config = node.model().config();
    if let (Some(lexical), Some(value)) = (info.lexical(), node.value()) {
        check_lexical(info.name(), lexical, value, config)?;
    }

    // leaf elements with their own rule, e.g. Resource.id
    for (element, field) in node.fields() {
        let Some(lexical) = element.lexical else {
            continue;
        };
        for value in field.values().iter().filter_map(|v| v.as_primitive()) {
            check_lexical(element.name, lexical, value, config)?;
        }
    }
    Ok(())
}

fn check_references(node: &Node) -> Result<()> {
    for (element, field) in node.fields() {
        if element.target_profiles.is_empty() {
            continue;
        }
        for value in field.values() {
            if let Some(reference) = value.as_node().filter(|n| n.type_info().is_a("Reference")) {
                check_reference_type(node.model(), reference, element)?;
            }
        }
    }
    Ok(())
}

fn reference_pattern() -> &'static Regex {
    static REFERENCE_PATTERN: OnceLock<Regex> = OnceLock::new();
    REFERENCE_PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Z][A-Za-z]+)/[A-Za-z0-9\-.]{1,64}(?:/_history/[A-Za-z0-9\-.]{1,64})?$")
            .expect("reference pattern is valid")
    })
}

/// A prefix followed by ':' and a non-empty remainder
fn has_scheme(literal: &str) -> bool {
    matches!(literal.find(':'), Some(i) if i > 0 && literal.len() > i + 1)
}

fn check_reference_type(model: &Model, reference: &Node, element: &ElementDefinition) -> Result<()> {
    let targets = element.target_profiles;
    let any_target = targets.contains(&"Resource");
    let invalid = |message: String| Error::InvalidReferenceType {
        field: element.name.to_string(),
        message,
    };

    let mut resource_type = None;
    if let Some(literal) = reference.get_str("reference") {
        if !literal.starts_with('#') && !has_scheme(literal) {
            resource_type = match literal.find('?') {
                // conditional reference
                Some(i) => Some(&literal[..i]),
                None => reference_pattern()
                    .captures(literal)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str()),
            };

            let Some(found) = resource_type else {
                return Err(invalid(format!(
                    "invalid reference value or resource type not found in reference value: '{literal}'"
                )));
            };
            if !model.is_resource_type(found) {
                return Err(invalid(format!(
                    "resource type found in reference value: '{literal}' must be a valid resource type name"
                )));
            }
            if !any_target && !targets.contains(&found) {
                return Err(invalid(format!(
                    "resource type found in reference value: '{literal}' must be one of: [{}]",
                    targets.join(", ")
                )));
            }
        }
    }

    if let Some(declared) = reference.get_str("type") {
        if !model.is_resource_type(declared) {
            return Err(invalid(format!(
                "resource type found in Reference.type: '{declared}' must be a valid resource type name"
            )));
        }
        if !any_target && !targets.contains(&declared) {
            return Err(invalid(format!(
                "resource type found in Reference.type: '{declared}' must be one of: [{}]",
                targets.join(", ")
            )));
        }
        if let Some(found) = resource_type {
            if found != declared {
                return Err(invalid(format!(
                    "resource type found in reference value: '{found}' does not match Reference.type: {declared}"
                )));
            }
        }
    }
    Ok(())
}

fn check_value_or_children(node: &Node) -> Result<()> {
    if node.has_value() || node.has_children() {
        return Ok(());
    }
    Err(Error::EmptyElement(node.type_name().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_detection() {
        assert!(has_scheme("urn:uuid:1234"));
        assert!(has_scheme("http://example.org/Patient/1"));
        assert!(!has_scheme("Patient/1"));
        assert!(!has_scheme(":missing"));
        assert!(!has_scheme("trailing:"));
    }

    #[test]
    fn reference_pattern_extracts_resource_type() {
        let captures = reference_pattern().captures("Patient/123/_history/2").unwrap();
        assert_eq!(&captures[1], "Patient");
        assert!(reference_pattern().captures("patient/123").is_none());
        assert!(reference_pattern().captures("Patient").is_none());
    }
}

//! Shorthand constructors for common data types
//!
//! Each function builds against [`Model::global`] and runs the usual build
//! validation, so lexical errors surface here rather than on the enclosing
//! resource.

use rust_decimal::Decimal;

use crate::error::Result;
use crate::model::Model;
use crate::node::{Node, Value};
use crate::primitive::{PartialDate, PartialDateTime, Primitive};

fn primitive(type_name: &str, value: impl Into<Primitive>) -> Result<Node> {
    Model::global().primitive(type_name, value)
}

pub fn string(value: impl Into<String>) -> Result<Node> {
    primitive("string", value.into())
}

pub fn code(value: impl Into<String>) -> Result<Node> {
    primitive("code", value.into())
}

pub fn id(value: impl Into<String>) -> Result<Node> {
    primitive("id", value.into())
}

pub fn markdown(value: impl Into<String>) -> Result<Node> {
    primitive("markdown", value.into())
}

pub fn uri(value: impl Into<String>) -> Result<Node> {
    primitive("uri", value.into())
}

pub fn canonical(value: impl Into<String>) -> Result<Node> {
    primitive("canonical", value.into())
}

pub fn xhtml(value: impl Into<String>) -> Result<Node> {
    primitive("xhtml", value.into())
}

pub fn boolean(value: bool) -> Result<Node> {
    primitive("boolean", value)
}

pub fn integer(value: i32) -> Result<Node> {
    primitive("integer", value)
}

pub fn positive_int(value: i32) -> Result<Node> {
    primitive("positiveInt", value)
}

pub fn decimal(value: Decimal) -> Result<Node> {
    primitive("decimal", value)
}

/// `date` from its lexical form (`2021`, `2021-03`, `2021-03-15`)
pub fn date(value: &str) -> Result<Node> {
    primitive("date", value.parse::<PartialDate>()?)
}

/// `dateTime` from its lexical form
pub fn date_time(value: &str) -> Result<Node> {
    primitive("dateTime", value.parse::<PartialDateTime>()?)
}

/// `instant` from its lexical form; time and offset are required
pub fn instant(value: &str) -> Result<Node> {
    primitive("instant", value.parse::<PartialDateTime>()?)
}

pub fn coding(system: &str, code: &str) -> Result<Node> {
    Model::global()
        .builder("Coding")?
        .set("system", uri(system)?)
        .set("code", self::code(code)?)
        .build()
}

pub fn codeable_concept(system: &str, code: &str) -> Result<Node> {
    Model::global()
        .builder("CodeableConcept")?
        .add("coding", coding(system, code)?)
        .build()
}

/// `CodeableConcept` carrying only text
pub fn concept_text(text: &str) -> Result<Node> {
    Model::global()
        .builder("CodeableConcept")?
        .set("text", string(text)?)
        .build()
}

/// Literal reference such as `Patient/123` or `#contained-id`
pub fn reference(literal: &str) -> Result<Node> {
    Model::global()
        .builder("Reference")?
        .set("reference", string(literal)?)
        .build()
}

pub fn period(start: &str, end: &str) -> Result<Node> {
    Model::global()
        .builder("Period")?
        .set("start", date_time(start)?)
        .set("end", date_time(end)?)
        .build()
}

pub fn quantity(value: Decimal, unit: &str) -> Result<Node> {
    Model::global()
        .builder("Quantity")?
        .set("value", decimal(value)?)
        .set("unit", string(unit)?)
        .build()
}

/// `Age` in UCUM years
pub fn age_in_years(years: Decimal) -> Result<Node> {
    Model::global()
        .builder("Age")?
        .set("value", decimal(years)?)
        .set("unit", string("years")?)
        .set("system", uri("http://unitsofmeasure.org")?)
        .set("code", code("a")?)
        .build()
}

pub fn annotation(text: &str) -> Result<Node> {
    Model::global()
        .builder("Annotation")?
        .set("text", markdown(text)?)
        .build()
}

pub fn narrative(status: &str, div: &str) -> Result<Node> {
    Model::global()
        .builder("Narrative")?
        .set("status", code(status)?)
        .set("div", xhtml(div)?)
        .build()
}

pub fn extension(url: &str, value: impl Into<Value>) -> Result<Node> {
    Model::global()
        .builder("Extension")?
        .set("url", url)
        .set("value", value)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn primitives_validate_their_lexical_form() {
        assert!(code("active").is_ok());
        assert!(matches!(code(" active"), Err(Error::InvalidValue { .. })));
        assert!(matches!(id("bad id"), Err(Error::InvalidValue { .. })));
        assert!(matches!(positive_int(0), Err(Error::InvalidValue { .. })));
        assert!(matches!(instant("2020-01-01"), Err(Error::InvalidValue { .. })));
        assert!(instant("2020-01-01T10:00:00Z").is_ok());
    }

    #[test]
    fn composite_helpers_build() {
        let concept = codeable_concept("http://snomed.info/sct", "39579001").unwrap();
        let coding = concept.get_all("coding")[0].as_node().unwrap().clone();
        assert_eq!(coding.get_str("code"), Some("39579001"));

        let age = age_in_years(Decimal::new(42, 0)).unwrap();
        assert!(age.type_info().is_a("Quantity"));
    }
}

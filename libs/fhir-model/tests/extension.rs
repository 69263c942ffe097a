use ferrum_model::{
    ensure_modifiers_understood, unrecognized_modifier_extensions, values, Error,
};

mod test_support;

use test_support::{allergy_for, builder};

const DATA_ABSENT: &str = "http://hl7.org/fhir/StructureDefinition/data-absent-reason";
const KNOWN_MODIFIER: &str = "http://example.org/fhir/StructureDefinition/known-modifier";
const UNKNOWN_MODIFIER: &str = "http://example.org/fhir/StructureDefinition/unknown-modifier";

#[test]
fn extensions_are_found_by_url() {
    let allergy = allergy_for("Patient/1")
        .add("extension", values::extension(DATA_ABSENT, values::code("unknown").unwrap()).unwrap())
        .build()
        .unwrap();

    assert!(allergy.has_extension(DATA_ABSENT));
    assert!(!allergy.has_extension(KNOWN_MODIFIER));

    let found: Vec<_> = allergy.extensions_by_url(DATA_ABSENT).collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].extension_url(), Some(DATA_ABSENT));
    assert_eq!(found[0].get_node("value").and_then(|v| v.value()).and_then(|v| v.as_str()), Some("unknown"));
}

#[test]
fn unrecognized_modifiers_are_reported_with_paths() {
    let reaction = builder("AllergyIntolerance.Reaction")
        .add("manifestation", values::concept_text("Hives").unwrap())
        .add(
            "modifierExtension",
            values::extension(UNKNOWN_MODIFIER, values::boolean(true).unwrap()).unwrap(),
        )
        .build()
        .unwrap();

    let allergy = allergy_for("Patient/1")
        .add(
            "modifierExtension",
            values::extension(KNOWN_MODIFIER, values::boolean(true).unwrap()).unwrap(),
        )
        .add("reaction", reaction)
        .build()
        .unwrap();

    let found = unrecognized_modifier_extensions(&allergy, |url| url == KNOWN_MODIFIER);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].url, UNKNOWN_MODIFIER);
    assert_eq!(found[0].path, "AllergyIntolerance.reaction[0].modifierExtension[0]");

    let err = ensure_modifiers_understood(&allergy, |url| url == KNOWN_MODIFIER).unwrap_err();
    assert!(matches!(err, Error::UnrecognizedModifierExtension { ref url, .. } if url == UNKNOWN_MODIFIER));

    assert!(ensure_modifiers_understood(&allergy, |_| true).is_ok());
    assert_eq!(allergy.modifier_extensions_by_url(KNOWN_MODIFIER).count(), 1);
}

#[test]
fn extension_requires_url() {
    let err = builder("Extension")
        .set("value", values::boolean(true).unwrap())
        .build()
        .unwrap_err();
    assert_eq!(err, Error::MissingRequiredField("url".to_string()));
}

#[test]
fn extension_value_is_a_choice() {
    let err = builder("Extension")
        .set("url", DATA_ABSENT)
        .set("value", values::narrative("generated", r#"<div xmlns="http://www.w3.org/1999/xhtml">x</div>"#).unwrap())
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidChoiceType { ref supplied, .. } if supplied == "Narrative"));
}

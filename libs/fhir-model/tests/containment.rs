use ferrum_model::{values, Error};

mod test_support;

use test_support::{allergy_for, builder, organization, patient};

#[test]
fn referenced_contained_resource_is_accepted() {
    let allergy = builder("AllergyIntolerance")
        .add("contained", patient("p1"))
        .set("patient", values::reference("#p1").unwrap())
        .build()
        .unwrap();

    let contained = allergy.contained()[0].as_node().unwrap();
    assert_eq!(contained.type_name(), "Patient");
    assert_eq!(contained.id(), Some("p1"));
}

#[test]
fn nested_containment_is_rejected() {
    let inner = builder("Patient")
        .set("id", "p1")
        .add("contained", organization("org1", "Acme"))
        .set("managingOrganization", values::reference("#org1").unwrap())
        .build()
        .expect("one level of containment is fine");

    let err = builder("AllergyIntolerance")
        .add("contained", inner)
        .set("patient", values::reference("#p1").unwrap())
        .build()
        .unwrap_err();

    match err {
        Error::InvalidContainment(message) => assert!(message.starts_with("dom-2")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unreferenced_contained_resource_is_rejected() {
    let err = allergy_for("Patient/example")
        .add("contained", organization("org1", "Acme"))
        .build()
        .unwrap_err();

    assert!(matches!(err, Error::InvalidContainment(ref m) if m.starts_with("dom-3")));
}

#[test]
fn reference_from_an_extension_uri_counts() {
    let pointer = values::extension(
        "http://example.org/fhir/StructureDefinition/source-organization",
        values::uri("#org1").unwrap(),
    )
    .unwrap();

    let allergy = allergy_for("Patient/example")
        .add("contained", organization("org1", "Acme"))
        .add("extension", pointer)
        .build();
    assert!(allergy.is_ok());
}

#[test]
fn contained_resource_may_refer_to_its_container() {
    let back_reference = builder("Organization")
        .set("id", "org1")
        .set("name", values::string("Acme").unwrap())
        .set("partOf", values::reference("#").unwrap())
        .build()
        .unwrap();

    let allergy = allergy_for("Patient/example")
        .add("contained", back_reference)
        .build();
    assert!(allergy.is_ok());
}

#[test]
fn contained_meta_restrictions() {
    let versioned_meta = builder("Meta")
        .set("versionId", values::id("2").unwrap())
        .build()
        .unwrap();
    let versioned = builder("Patient")
        .set("id", "p1")
        .set("meta", versioned_meta)
        .build()
        .unwrap();
    let err = builder("AllergyIntolerance")
        .add("contained", versioned)
        .set("patient", values::reference("#p1").unwrap())
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidContainment(ref m) if m.starts_with("dom-4")));

    let labelled_meta = builder("Meta")
        .add(
            "security",
            values::coding("http://terminology.hl7.org/CodeSystem/v3-Confidentiality", "R").unwrap(),
        )
        .build()
        .unwrap();
    let labelled = builder("Patient")
        .set("id", "p1")
        .set("meta", labelled_meta)
        .build()
        .unwrap();
    let err = builder("AllergyIntolerance")
        .add("contained", labelled)
        .set("patient", values::reference("#p1").unwrap())
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidContainment(ref m) if m.starts_with("dom-5")));
}

#[test]
fn contained_values_must_be_resources() {
    let err = allergy_for("Patient/example")
        .add("contained", values::concept_text("not a resource").unwrap())
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidElementType { ref field, .. } if field == "contained"));
}

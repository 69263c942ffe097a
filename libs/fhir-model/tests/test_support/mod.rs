#![allow(dead_code)]

use ferrum_model::{values, Builder, Model, Node};

pub fn model() -> &'static Model {
    Model::global()
}

pub fn builder(type_name: &str) -> Builder {
    model()
        .builder(type_name)
        .unwrap_or_else(|e| panic!("no builder for {type_name}: {e}"))
}

pub fn reaction(manifestation: &str) -> Node {
    builder("AllergyIntolerance.Reaction")
        .add("manifestation", values::concept_text(manifestation).unwrap())
        .build()
        .expect("reaction should build")
}

pub fn allergy_for(patient: &str) -> Builder {
    builder("AllergyIntolerance").set("patient", values::reference(patient).unwrap())
}

pub fn organization(id: &str, name: &str) -> Node {
    builder("Organization")
        .set("id", id)
        .set("name", values::string(name).unwrap())
        .build()
        .expect("organization should build")
}

pub fn patient(id: &str) -> Node {
    builder("Patient")
        .set("id", id)
        .set("active", values::boolean(true).unwrap())
        .build()
        .expect("patient should build")
}

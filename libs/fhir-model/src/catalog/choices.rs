//! Typed views over the catalog's choice elements

use crate::choice_type;

choice_type! {
    /// `AllergyIntolerance.onset[x]`
    pub enum AllergyIntoleranceOnset("AllergyIntolerance", "onset") {
        DateTime => "dateTime",
        Age => "Age",
        Period => "Period",
        Range => "Range",
        String => "string",
    }
}

choice_type! {
    /// `Annotation.author[x]`
    pub enum AnnotationAuthor("Annotation", "author") {
        Reference => "Reference",
        String => "string",
    }
}

choice_type! {
    /// `Provenance.occurred[x]`
    pub enum ProvenanceOccurred("Provenance", "occurred") {
        Period => "Period",
        DateTime => "dateTime",
    }
}

choice_type! {
    /// `DeviceRequest.code[x]`
    pub enum DeviceRequestCode("DeviceRequest", "code") {
        Reference => "Reference",
        CodeableConcept => "CodeableConcept",
    }
}

choice_type! {
    /// `DeviceRequest.occurrence[x]`
    pub enum DeviceRequestOccurrence("DeviceRequest", "occurrence") {
        DateTime => "dateTime",
        Period => "Period",
        Timing => "Timing",
    }
}

choice_type! {
    /// `DeviceRequest.parameter.value[x]`
    pub enum DeviceRequestParameterValue("DeviceRequest.Parameter", "value") {
        CodeableConcept => "CodeableConcept",
        Quantity => "Quantity",
        Range => "Range",
        Boolean => "boolean",
    }
}

choice_type! {
    /// `Patient.deceased[x]`
    pub enum PatientDeceased("Patient", "deceased") {
        Boolean => "boolean",
        DateTime => "dateTime",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChoiceType, Model};

    fn declared<C: ChoiceType>() -> Vec<&'static str> {
        Model::global()
            .type_info(C::OWNER)
            .and_then(|t| t.element(C::ELEMENT))
            .map(|e| e.types.to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn typed_choices_match_the_schema() {
        assert_eq!(declared::<AllergyIntoleranceOnset>(), AllergyIntoleranceOnset::ALLOWED);
        assert_eq!(declared::<AnnotationAuthor>(), AnnotationAuthor::ALLOWED);
        assert_eq!(declared::<ProvenanceOccurred>(), ProvenanceOccurred::ALLOWED);
        assert_eq!(declared::<DeviceRequestCode>(), DeviceRequestCode::ALLOWED);
        assert_eq!(declared::<DeviceRequestOccurrence>(), DeviceRequestOccurrence::ALLOWED);
        assert_eq!(
            declared::<DeviceRequestParameterValue>(),
            DeviceRequestParameterValue::ALLOWED
        );
        assert_eq!(declared::<PatientDeceased>(), PatientDeceased::ALLOWED);
    }
}

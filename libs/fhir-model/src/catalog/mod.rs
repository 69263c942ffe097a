//! Built-in R4 type catalog
//!
//! The subset of R4 the crate ships with: the primitive types, the general
//! purpose data types, `Resource`/`DomainResource`, and the resources
//! `AllergyIntolerance`, `Provenance`, `DeviceRequest`, `Patient`,
//! `Practitioner` and `Organization`. Callers needing other shapes pass their
//! own definitions to [`Model::new`](crate::Model::new) alongside
//! [`DEFINITIONS`].

pub mod choices;
pub mod datatypes;
pub mod resources;

use crate::schema::TypeDefinition;

pub static DEFINITIONS: &[&TypeDefinition] = &[
    &datatypes::ELEMENT,
    &datatypes::BACKBONE_ELEMENT,
    &datatypes::BOOLEAN,
    &datatypes::INTEGER,
    &datatypes::POSITIVE_INT,
    &datatypes::UNSIGNED_INT,
    &datatypes::DECIMAL,
    &datatypes::STRING,
    &datatypes::CODE,
    &datatypes::ID,
    &datatypes::MARKDOWN,
    &datatypes::URI,
    &datatypes::URL,
    &datatypes::CANONICAL,
    &datatypes::BASE64_BINARY,
    &datatypes::DATE,
    &datatypes::DATE_TIME,
    &datatypes::INSTANT,
    &datatypes::TIME,
    &datatypes::XHTML,
    &datatypes::EXTENSION,
    &datatypes::CODING,
    &datatypes::CODEABLE_CONCEPT,
    &datatypes::REFERENCE,
    &datatypes::IDENTIFIER,
    &datatypes::PERIOD,
    &datatypes::QUANTITY,
    &datatypes::AGE,
    &datatypes::DURATION,
    &datatypes::RANGE,
    &datatypes::ANNOTATION,
    &datatypes::META,
    &datatypes::NARRATIVE,
    &datatypes::SIGNATURE,
    &datatypes::TIMING,
    &resources::RESOURCE,
    &resources::DOMAIN_RESOURCE,
    &resources::ALLERGY_INTOLERANCE,
    &resources::ALLERGY_INTOLERANCE_REACTION,
    &resources::PROVENANCE,
    &resources::PROVENANCE_AGENT,
    &resources::PROVENANCE_ENTITY,
    &resources::DEVICE_REQUEST,
    &resources::DEVICE_REQUEST_PARAMETER,
    &resources::PATIENT,
    &resources::PRACTITIONER,
    &resources::ORGANIZATION,
];

/// Every concrete R4 (4.0.1) resource type name, sorted
pub const RESOURCE_TYPE_NAMES: &[&str] = &[
    "Account",
    "ActivityDefinition",
    "AdverseEvent",
    "AllergyIntolerance",
    "Appointment",
    "AppointmentResponse",
    "AuditEvent",
    "Basic",
    "Binary",
    "BiologicallyDerivedProduct",
    "BodyStructure",
    "Bundle",
    "CapabilityStatement",
    "CarePlan",
    "CareTeam",
    "CatalogEntry",
    "ChargeItem",
    "ChargeItemDefinition",
    "Claim",
    "ClaimResponse",
    "ClinicalImpression",
    "CodeSystem",
    "Communication",
    "CommunicationRequest",
    "CompartmentDefinition",
    "Composition",
    "ConceptMap",
    "Condition",
    "Consent",
    "Contract",
    "Coverage",
    "CoverageEligibilityRequest",
    "CoverageEligibilityResponse",
    "DetectedIssue",
    "Device",
    "DeviceDefinition",
    "DeviceMetric",
    "DeviceRequest",
    "DeviceUseStatement",
    "DiagnosticReport",
    "DocumentManifest",
    "DocumentReference",
    "EffectEvidenceSynthesis",
    "Encounter",
    "Endpoint",
    "EnrollmentRequest",
    "EnrollmentResponse",
    "EpisodeOfCare",
    "EventDefinition",
    "Evidence",
    "EvidenceVariable",
    "ExampleScenario",
    "ExplanationOfBenefit",
    "FamilyMemberHistory",
    "Flag",
    "Goal",
    "GraphDefinition",
    "Group",
    "GuidanceResponse",
    "HealthcareService",
    "ImagingStudy",
    "Immunization",
    "ImmunizationEvaluation",
    "ImmunizationRecommendation",
    "ImplementationGuide",
    "InsurancePlan",
    "Invoice",
    "Library",
    "Linkage",
    "List",
    "Location",
    "Measure",
    "MeasureReport",
    "Media",
    "Medication",
    "MedicationAdministration",
    "MedicationDispense",
    "MedicationKnowledge",
    "MedicationRequest",
    "MedicationStatement",
    "MedicinalProduct",
    "MedicinalProductAuthorization",
    "MedicinalProductContraindication",
    "MedicinalProductIndication",
    "MedicinalProductIngredient",
    "MedicinalProductInteraction",
    "MedicinalProductManufactured",
    "MedicinalProductPackaged",
    "MedicinalProductPharmaceutical",
    "MedicinalProductUndesirableEffect",
    "MessageDefinition",
    "MessageHeader",
    "MolecularSequence",
    "NamingSystem",
    "NutritionOrder",
    "Observation",
    "ObservationDefinition",
    "OperationDefinition",
    "OperationOutcome",
    "Organization",
    "OrganizationAffiliation",
    "Parameters",
    "Patient",
    "PaymentNotice",
    "PaymentReconciliation",
    "Person",
    "PlanDefinition",
    "Practitioner",
    "PractitionerRole",
    "Procedure",
    "Provenance",
    "Questionnaire",
    "QuestionnaireResponse",
    "RelatedPerson",
    "RequestGroup",
    "ResearchDefinition",
    "ResearchElementDefinition",
    "ResearchStudy",
    "ResearchSubject",
    "RiskAssessment",
    "RiskEvidenceSynthesis",
    "Schedule",
    "SearchParameter",
    "ServiceRequest",
    "Slot",
    "Specimen",
    "SpecimenDefinition",
    "StructureDefinition",
    "StructureMap",
    "Subscription",
    "Substance",
    "SubstanceNucleicAcid",
    "SubstancePolymer",
    "SubstanceProtein",
    "SubstanceReferenceInformation",
    "SubstanceSourceMaterial",
    "SubstanceSpecification",
    "SupplyDelivery",
    "SupplyRequest",
    "Task",
    "TerminologyCapabilities",
    "TestReport",
    "TestScript",
    "ValueSet",
    "VerificationResult",
    "VisionPrescription",
];

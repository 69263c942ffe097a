//! R4 resources and their backbone elements

use crate::schema::{
    Cardinality, ConstraintDefinition as Rule, ElementDefinition as E, Lexical, TypeDefinition,
    TypeKind, SYSTEM_STRING,
};

const OPT: Cardinality = Cardinality::ZERO_TO_ONE;
const REQ: Cardinality = Cardinality::ONE_TO_ONE;
const MANY: Cardinality = Cardinality::ZERO_TO_MANY;
const SOME: Cardinality = Cardinality::ONE_TO_MANY;

const ANY_RESOURCE: &[&str] = &["Resource"];

pub static RESOURCE: TypeDefinition = TypeDefinition::new(
    "Resource",
    TypeKind::Resource,
    None,
    &[
        E::new("id", OPT, &[SYSTEM_STRING])
            .summary()
            .with_lexical(Lexical::Id),
        E::new("meta", OPT, &["Meta"]).summary(),
        E::new("implicitRules", OPT, &["uri"]).modifier().summary(),
        E::new("language", OPT, &["code"]),
    ],
)
.abstract_type();

pub static DOMAIN_RESOURCE: TypeDefinition = TypeDefinition::new(
    "DomainResource",
    TypeKind::Resource,
    Some("Resource"),
    &[
        E::new("text", OPT, &["Narrative"]),
        E::new("contained", MANY, &["Resource"]),
        E::new("extension", MANY, &["Extension"]),
        E::new("modifierExtension", MANY, &["Extension"]).modifier(),
    ],
)
.abstract_type()
.with_constraints(&[
    Rule::rule(
        "dom-2",
        "If the resource is contained in another resource, it SHALL NOT contain nested Resources",
        "contained.contained.empty()",
    ),
    Rule::rule(
        "dom-3",
        "If the resource is contained in another resource, it SHALL be referred to from elsewhere in the resource or SHALL refer to the containing resource",
        "contained.where((('#'+id in (%resource.descendants().reference | %resource.descendants().as(canonical) | %resource.descendants().as(uri) | %resource.descendants().as(url))) or descendants().where(reference = '#').exists() or descendants().where(as(canonical) = '#').exists() or descendants().where(as(uri) = '#').exists()).not()).trace('unmatched', id).empty()",
    ),
    Rule::rule(
        "dom-4",
        "If a resource is contained in another resource, it SHALL NOT have a meta.versionId or a meta.lastUpdated",
        "contained.meta.versionId.empty() and contained.meta.lastUpdated.empty()",
    ),
    Rule::rule(
        "dom-5",
        "If a resource is contained in another resource, it SHALL NOT have a security label",
        "contained.meta.security.empty()",
    ),
    Rule::warning(
        "dom-6",
        "A resource should have narrative for robust management",
        "text.`div`.exists()",
    ),
]);

// AllergyIntolerance

pub static ALLERGY_INTOLERANCE: TypeDefinition = TypeDefinition::new(
    "AllergyIntolerance",
    TypeKind::Resource,
    Some("DomainResource"),
    &[
        E::new("identifier", MANY, &["Identifier"]).summary(),
        E::new("clinicalStatus", OPT, &["CodeableConcept"]).modifier().summary(),
        E::new("verificationStatus", OPT, &["CodeableConcept"]).modifier().summary(),
        E::new("type", OPT, &["code"]).summary(),
        E::new("category", MANY, &["code"]).summary(),
        E::new("criticality", OPT, &["code"]).summary(),
        E::new("code", OPT, &["CodeableConcept"]).summary(),
        E::new("patient", REQ, &["Reference"])
            .targets(&["Patient"])
            .summary(),
        E::new("encounter", OPT, &["Reference"]).targets(&["Encounter"]),
        E::new("onset", OPT, &["dateTime", "Age", "Period", "Range", "string"]),
        E::new("recordedDate", OPT, &["dateTime"]),
        E::new("recorder", OPT, &["Reference"]).targets(&[
            "Practitioner",
            "PractitionerRole",
            "Patient",
            "RelatedPerson",
        ]),
        E::new("asserter", OPT, &["Reference"])
            .targets(&["Patient", "RelatedPerson", "Practitioner", "PractitionerRole"])
            .summary(),
        E::new("lastOccurrence", OPT, &["dateTime"]),
        E::new("note", MANY, &["Annotation"]),
        E::new("reaction", MANY, &["AllergyIntolerance.Reaction"]),
    ],
)
.with_constraints(&[
    Rule::rule(
        "ait-1",
        "AllergyIntolerance.clinicalStatus SHALL be present if verificationStatus is not entered-in-error.",
        "verificationStatus.coding.where(system = 'http://terminology.hl7.org/CodeSystem/allergyintolerance-verification' and code = 'entered-in-error').exists() or clinicalStatus.exists()",
    ),
    Rule::rule(
        "ait-2",
        "AllergyIntolerance.clinicalStatus SHALL NOT be present if verification Status is entered-in-error",
        "verificationStatus.coding.where(system = 'http://terminology.hl7.org/CodeSystem/allergyintolerance-verification' and code = 'entered-in-error').empty() or clinicalStatus.empty()",
    ),
]);

pub static ALLERGY_INTOLERANCE_REACTION: TypeDefinition = TypeDefinition::new(
    "AllergyIntolerance.Reaction",
    TypeKind::BackboneElement,
    Some("BackboneElement"),
    &[
        E::new("substance", OPT, &["CodeableConcept"]),
        E::new("manifestation", SOME, &["CodeableConcept"]),
        E::new("description", OPT, &["string"]),
        E::new("onset", OPT, &["dateTime"]),
        E::new("severity", OPT, &["code"]),
        E::new("exposureRoute", OPT, &["CodeableConcept"]),
        E::new("note", MANY, &["Annotation"]),
    ],
);

// Provenance

pub static PROVENANCE: TypeDefinition = TypeDefinition::new(
    "Provenance",
    TypeKind::Resource,
    Some("DomainResource"),
    &[
        E::new("target", SOME, &["Reference"])
            .targets(ANY_RESOURCE)
            .summary(),
        E::new("occurred", OPT, &["Period", "dateTime"]),
        E::new("recorded", REQ, &["instant"]).summary(),
        E::new("policy", MANY, &["uri"]),
        E::new("location", OPT, &["Reference"]).targets(&["Location"]),
        E::new("reason", MANY, &["CodeableConcept"]),
        E::new("activity", OPT, &["CodeableConcept"]),
        E::new("agent", SOME, &["Provenance.Agent"]),
        E::new("entity", MANY, &["Provenance.Entity"]),
        E::new("signature", MANY, &["Signature"]),
    ],
);

const PROVENANCE_AGENT_TARGETS: &[&str] = &[
    "Practitioner",
    "PractitionerRole",
    "RelatedPerson",
    "Patient",
    "Device",
    "Organization",
];

pub static PROVENANCE_AGENT: TypeDefinition = TypeDefinition::new(
    "Provenance.Agent",
    TypeKind::BackboneElement,
    Some("BackboneElement"),
    &[
        E::new("type", OPT, &["CodeableConcept"]).summary(),
        E::new("role", MANY, &["CodeableConcept"]),
        E::new("who", REQ, &["Reference"])
            .targets(PROVENANCE_AGENT_TARGETS)
            .summary(),
        E::new("onBehalfOf", OPT, &["Reference"]).targets(PROVENANCE_AGENT_TARGETS),
    ],
);

pub static PROVENANCE_ENTITY: TypeDefinition = TypeDefinition::new(
    "Provenance.Entity",
    TypeKind::BackboneElement,
    Some("BackboneElement"),
    &[
        E::new("role", REQ, &["code"]).summary(),
        E::new("what", REQ, &["Reference"])
            .targets(ANY_RESOURCE)
            .summary(),
        E::new("agent", MANY, &["Provenance.Agent"]),
    ],
);

// DeviceRequest

pub static DEVICE_REQUEST: TypeDefinition = TypeDefinition::new(
    "DeviceRequest",
    TypeKind::Resource,
    Some("DomainResource"),
    &[
        E::new("identifier", MANY, &["Identifier"]).summary(),
        E::new("instantiatesCanonical", MANY, &["canonical"]).summary(),
        E::new("instantiatesUri", MANY, &["uri"]).summary(),
        E::new("basedOn", MANY, &["Reference"])
            .targets(ANY_RESOURCE)
            .summary(),
        E::new("priorRequest", MANY, &["Reference"])
            .targets(ANY_RESOURCE)
            .summary(),
        E::new("groupIdentifier", OPT, &["Identifier"]).summary(),
        E::new("status", OPT, &["code"]).modifier().summary(),
        E::new("intent", REQ, &["code"]).modifier().summary(),
        E::new("priority", OPT, &["code"]).summary(),
        E::new("code", REQ, &["Reference", "CodeableConcept"])
            .targets(&["Device"])
            .summary(),
        E::new("parameter", MANY, &["DeviceRequest.Parameter"]),
        E::new("subject", REQ, &["Reference"])
            .targets(&["Patient", "Group", "Location", "Device"])
            .summary(),
        E::new("encounter", OPT, &["Reference"])
            .targets(&["Encounter"])
            .summary(),
        E::new("occurrence", OPT, &["dateTime", "Period", "Timing"]).summary(),
        E::new("authoredOn", OPT, &["dateTime"]).summary(),
        E::new("requester", OPT, &["Reference"])
            .targets(&["Device", "Practitioner", "PractitionerRole", "Organization"])
            .summary(),
        E::new("performerType", OPT, &["CodeableConcept"]).summary(),
        E::new("performer", OPT, &["Reference"])
            .targets(&[
                "Practitioner",
                "PractitionerRole",
                "Organization",
                "CareTeam",
                "HealthcareService",
                "Patient",
                "Device",
                "RelatedPerson",
            ])
            .summary(),
        E::new("reasonCode", MANY, &["CodeableConcept"]).summary(),
        E::new("reasonReference", MANY, &["Reference"])
            .targets(&["Condition", "Observation", "DiagnosticReport", "DocumentReference"])
            .summary(),
        E::new("supportingInfo", MANY, &["Reference"]).targets(ANY_RESOURCE),
        E::new("note", MANY, &["Annotation"]),
        E::new("relevantHistory", MANY, &["Reference"]).targets(&["Provenance"]),
    ],
);

pub static DEVICE_REQUEST_PARAMETER: TypeDefinition = TypeDefinition::new(
    "DeviceRequest.Parameter",
    TypeKind::BackboneElement,
    Some("BackboneElement"),
    &[
        E::new("code", OPT, &["CodeableConcept"]),
        E::new("value", OPT, &["CodeableConcept", "Quantity", "Range", "boolean"]),
    ],
);

// Actors

pub static PATIENT: TypeDefinition = TypeDefinition::new(
    "Patient",
    TypeKind::Resource,
    Some("DomainResource"),
    &[
        E::new("identifier", MANY, &["Identifier"]).summary(),
        E::new("active", OPT, &["boolean"]).modifier().summary(),
        E::new("gender", OPT, &["code"]).summary(),
        E::new("birthDate", OPT, &["date"]).summary(),
        E::new("deceased", OPT, &["boolean", "dateTime"]).modifier().summary(),
        E::new("generalPractitioner", MANY, &["Reference"]).targets(&[
            "Organization",
            "Practitioner",
            "PractitionerRole",
        ]),
        E::new("managingOrganization", OPT, &["Reference"])
            .targets(&["Organization"])
            .summary(),
    ],
);

pub static PRACTITIONER: TypeDefinition = TypeDefinition::new(
    "Practitioner",
    TypeKind::Resource,
    Some("DomainResource"),
    &[
        E::new("identifier", MANY, &["Identifier"]).summary(),
        E::new("active", OPT, &["boolean"]).summary(),
        E::new("gender", OPT, &["code"]).summary(),
        E::new("birthDate", OPT, &["date"]).summary(),
    ],
);

pub static ORGANIZATION: TypeDefinition = TypeDefinition::new(
    "Organization",
    TypeKind::Resource,
    Some("DomainResource"),
    &[
        E::new("identifier", MANY, &["Identifier"]).summary(),
        E::new("active", OPT, &["boolean"]).summary(),
        E::new("type", MANY, &["CodeableConcept"]).summary(),
        E::new("name", OPT, &["string"]).summary(),
        E::new("alias", MANY, &["string"]),
        E::new("partOf", OPT, &["Reference"])
            .targets(&["Organization"])
            .summary(),
    ],
)
.with_constraints(&[Rule::rule(
    "org-1",
    "The organization SHALL at least have a name or an identifier, and possibly more than one",
    "(identifier.count() + name.count()) > 0",
)]);

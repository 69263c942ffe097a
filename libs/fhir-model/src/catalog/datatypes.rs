//! R4 primitive and general-purpose data types

use crate::schema::{
    Cardinality, ConstraintDefinition as Rule, ElementDefinition as E, Lexical, TypeDefinition,
    TypeKind, SYSTEM_BOOLEAN, SYSTEM_DATE, SYSTEM_DATE_TIME, SYSTEM_DECIMAL, SYSTEM_INTEGER,
    SYSTEM_STRING, SYSTEM_TIME,
};

const OPT: Cardinality = Cardinality::ZERO_TO_ONE;
const REQ: Cardinality = Cardinality::ONE_TO_ONE;
const MANY: Cardinality = Cardinality::ZERO_TO_MANY;
const SOME: Cardinality = Cardinality::ONE_TO_MANY;

pub(crate) const REFERENCE_TARGETS_ACTOR: &[&str] = &[
    "Practitioner",
    "PractitionerRole",
    "RelatedPerson",
    "Patient",
    "Device",
    "Organization",
];

pub static ELEMENT: TypeDefinition = TypeDefinition::new(
    "Element",
    TypeKind::ComplexType,
    None,
    &[
        E::new("id", OPT, &[SYSTEM_STRING]),
        E::new("extension", MANY, &["Extension"]),
    ],
)
.abstract_type()
.with_constraints(&[Rule::rule(
    "ele-1",
    "All FHIR elements must have a @value or children",
    "hasValue() or (children().count() > id.count())",
)]);

pub static BACKBONE_ELEMENT: TypeDefinition = TypeDefinition::new(
    "BackboneElement",
    TypeKind::BackboneElement,
    Some("Element"),
    &[E::new("modifierExtension", MANY, &["Extension"]).modifier().summary()],
)
.abstract_type();

// Primitive types

pub static BOOLEAN: TypeDefinition = TypeDefinition::new(
    "boolean",
    TypeKind::PrimitiveType,
    Some("Element"),
    &[E::new("value", OPT, &[SYSTEM_BOOLEAN])],
)
.with_lexical(Lexical::Any);

pub static INTEGER: TypeDefinition = TypeDefinition::new(
    "integer",
    TypeKind::PrimitiveType,
    Some("Element"),
    &[E::new("value", OPT, &[SYSTEM_INTEGER])],
)
.with_lexical(Lexical::Any);

pub static POSITIVE_INT: TypeDefinition =
    TypeDefinition::primitive("positiveInt", "integer", Lexical::PositiveInt);

pub static UNSIGNED_INT: TypeDefinition =
    TypeDefinition::primitive("unsignedInt", "integer", Lexical::UnsignedInt);

pub static DECIMAL: TypeDefinition = TypeDefinition::new(
    "decimal",
    TypeKind::PrimitiveType,
    Some("Element"),
    &[E::new("value", OPT, &[SYSTEM_DECIMAL])],
)
.with_lexical(Lexical::Any);

pub static STRING: TypeDefinition = TypeDefinition::new(
    "string",
    TypeKind::PrimitiveType,
    Some("Element"),
    &[E::new("value", OPT, &[SYSTEM_STRING])],
)
.with_lexical(Lexical::String);

pub static CODE: TypeDefinition = TypeDefinition::primitive("code", "string", Lexical::Code);

pub static ID: TypeDefinition = TypeDefinition::primitive("id", "string", Lexical::Id);

pub static MARKDOWN: TypeDefinition =
    TypeDefinition::primitive("markdown", "string", Lexical::String);

pub static URI: TypeDefinition = TypeDefinition::new(
    "uri",
    TypeKind::PrimitiveType,
    Some("Element"),
    &[E::new("value", OPT, &[SYSTEM_STRING])],
)
.with_lexical(Lexical::Uri);

pub static URL: TypeDefinition = TypeDefinition::primitive("url", "uri", Lexical::Uri);

pub static CANONICAL: TypeDefinition = TypeDefinition::primitive("canonical", "uri", Lexical::Uri);

pub static BASE64_BINARY: TypeDefinition = TypeDefinition::new(
    "base64Binary",
    TypeKind::PrimitiveType,
    Some("Element"),
    &[E::new("value", OPT, &[SYSTEM_STRING])],
)
.with_lexical(Lexical::Base64);

pub static DATE: TypeDefinition = TypeDefinition::new(
    "date",
    TypeKind::PrimitiveType,
    Some("Element"),
    &[E::new("value", OPT, &[SYSTEM_DATE])],
)
.with_lexical(Lexical::Any);

pub static DATE_TIME: TypeDefinition = TypeDefinition::new(
    "dateTime",
    TypeKind::PrimitiveType,
    Some("Element"),
    &[E::new("value", OPT, &[SYSTEM_DATE_TIME])],
)
.with_lexical(Lexical::Any);

pub static INSTANT: TypeDefinition = TypeDefinition::new(
    "instant",
    TypeKind::PrimitiveType,
    Some("Element"),
    &[E::new("value", OPT, &[SYSTEM_DATE_TIME])],
)
.with_lexical(Lexical::Instant);

pub static TIME: TypeDefinition = TypeDefinition::new(
    "time",
    TypeKind::PrimitiveType,
    Some("Element"),
    &[E::new("value", OPT, &[SYSTEM_TIME])],
)
.with_lexical(Lexical::Any);

pub static XHTML: TypeDefinition = TypeDefinition::new(
    "xhtml",
    TypeKind::PrimitiveType,
    Some("Element"),
    &[E::new("value", OPT, &[SYSTEM_STRING])],
)
.with_lexical(Lexical::Xhtml);

// General-purpose types

pub static EXTENSION: TypeDefinition = TypeDefinition::new(
    "Extension",
    TypeKind::ComplexType,
    Some("Element"),
    &[
        E::new("url", REQ, &[SYSTEM_STRING]),
        E::new(
            "value",
            OPT,
            &[
                "base64Binary",
                "boolean",
                "canonical",
                "code",
                "date",
                "dateTime",
                "decimal",
                "id",
                "instant",
                "integer",
                "markdown",
                "positiveInt",
                "string",
                "time",
                "unsignedInt",
                "uri",
                "url",
                "Age",
                "Annotation",
                "CodeableConcept",
                "Coding",
                "Duration",
                "Identifier",
                "Period",
                "Quantity",
                "Range",
                "Reference",
                "Signature",
                "Timing",
                "Meta",
            ],
        ),
    ],
)
.with_constraints(&[Rule::rule(
    "ext-1",
    "Must have either extensions or value[x], not both",
    "extension.exists() != value.exists()",
)]);

pub static CODING: TypeDefinition = TypeDefinition::new(
    "Coding",
    TypeKind::ComplexType,
    Some("Element"),
    &[
        E::new("system", OPT, &["uri"]).summary(),
        E::new("version", OPT, &["string"]).summary(),
        E::new("code", OPT, &["code"]).summary(),
        E::new("display", OPT, &["string"]).summary(),
        E::new("userSelected", OPT, &["boolean"]).summary(),
    ],
);

pub static CODEABLE_CONCEPT: TypeDefinition = TypeDefinition::new(
    "CodeableConcept",
    TypeKind::ComplexType,
    Some("Element"),
    &[
        E::new("coding", MANY, &["Coding"]).summary(),
        E::new("text", OPT, &["string"]).summary(),
    ],
);

pub static REFERENCE: TypeDefinition = TypeDefinition::new(
    "Reference",
    TypeKind::ComplexType,
    Some("Element"),
    &[
        E::new("reference", OPT, &["string"]).summary(),
        E::new("type", OPT, &["uri"]).summary(),
        E::new("identifier", OPT, &["Identifier"]).summary(),
        E::new("display", OPT, &["string"]).summary(),
    ],
)
.with_constraints(&[Rule::rule(
    "ref-1",
    "SHALL have a contained resource if a local reference is provided",
    "reference.startsWith('#').not() or (reference.substring(1).trace('url') in %rootResource.contained.id.trace('ids'))",
)]);

pub static IDENTIFIER: TypeDefinition = TypeDefinition::new(
    "Identifier",
    TypeKind::ComplexType,
    Some("Element"),
    &[
        E::new("use", OPT, &["code"]).modifier().summary(),
        E::new("type", OPT, &["CodeableConcept"]).summary(),
        E::new("system", OPT, &["uri"]).summary(),
        E::new("value", OPT, &["string"]).summary(),
        E::new("period", OPT, &["Period"]).summary(),
        E::new("assigner", OPT, &["Reference"])
            .targets(&["Organization"])
            .summary(),
    ],
);

pub static PERIOD: TypeDefinition = TypeDefinition::new(
    "Period",
    TypeKind::ComplexType,
    Some("Element"),
    &[
        E::new("start", OPT, &["dateTime"]).summary(),
        E::new("end", OPT, &["dateTime"]).summary(),
    ],
)
.with_constraints(&[Rule::rule(
    "per-1",
    "If present, start SHALL have a lower value than end",
    "start.hasValue().not() or end.hasValue().not() or (start <= end)",
)]);

pub static QUANTITY: TypeDefinition = TypeDefinition::new(
    "Quantity",
    TypeKind::ComplexType,
    Some("Element"),
    &[
        E::new("value", OPT, &["decimal"]).summary(),
        E::new("comparator", OPT, &["code"]).modifier().summary(),
        E::new("unit", OPT, &["string"]).summary(),
        E::new("system", OPT, &["uri"]).summary(),
        E::new("code", OPT, &["code"]).summary(),
    ],
)
.with_constraints(&[Rule::rule(
    "qty-3",
    "If a code for the unit is present, the system SHALL also be present",
    "code.empty() or system.exists()",
)]);

pub static AGE: TypeDefinition =
    TypeDefinition::new("Age", TypeKind::ComplexType, Some("Quantity"), &[]).with_constraints(&[
        Rule::rule(
            "age-1",
            "There SHALL be a code if there is a value and it SHALL be an expression of time.  If system is present, it SHALL be UCUM.  If value is present, it SHALL be positive.",
            "(code.exists() or value.empty()) and (system.empty() or system = %ucum) and (value.empty() or value.hasValue().not() or value > 0)",
        ),
    ]);

pub static DURATION: TypeDefinition =
    TypeDefinition::new("Duration", TypeKind::ComplexType, Some("Quantity"), &[])
        .with_constraints(&[Rule::rule(
            "drt-1",
            "There SHALL be a code if there is a value and it SHALL be an expression of time.  If system is present, it SHALL be UCUM.",
            "code.exists() implies ((system = %ucum) and value.exists())",
        )]);

pub static RANGE: TypeDefinition = TypeDefinition::new(
    "Range",
    TypeKind::ComplexType,
    Some("Element"),
    &[
        E::new("low", OPT, &["Quantity"]).summary(),
        E::new("high", OPT, &["Quantity"]).summary(),
    ],
)
.with_constraints(&[Rule::rule(
    "rng-2",
    "If present, low SHALL have a lower value than high",
    "low.empty() or high.empty() or (low <= high)",
)]);

pub static ANNOTATION: TypeDefinition = TypeDefinition::new(
    "Annotation",
    TypeKind::ComplexType,
    Some("Element"),
    &[
        E::new("author", OPT, &["Reference", "string"])
            .targets(&["Practitioner", "Patient", "RelatedPerson", "Organization"])
            .summary(),
        E::new("time", OPT, &["dateTime"]).summary(),
        E::new("text", REQ, &["markdown"]).summary(),
    ],
);

pub static META: TypeDefinition = TypeDefinition::new(
    "Meta",
    TypeKind::ComplexType,
    Some("Element"),
    &[
        E::new("versionId", OPT, &["id"]).summary(),
        E::new("lastUpdated", OPT, &["instant"]).summary(),
        E::new("source", OPT, &["uri"]).summary(),
        E::new("profile", MANY, &["canonical"]).summary(),
        E::new("security", MANY, &["Coding"]).summary(),
        E::new("tag", MANY, &["Coding"]).summary(),
    ],
);

pub static NARRATIVE: TypeDefinition = TypeDefinition::new(
    "Narrative",
    TypeKind::ComplexType,
    Some("Element"),
    &[
        E::new("status", REQ, &["code"]),
        E::new("div", REQ, &["xhtml"]),
    ],
);

pub static SIGNATURE: TypeDefinition = TypeDefinition::new(
    "Signature",
    TypeKind::ComplexType,
    Some("Element"),
    &[
        E::new("type", SOME, &["Coding"]).summary(),
        E::new("when", REQ, &["instant"]).summary(),
        E::new("who", REQ, &["Reference"])
            .targets(REFERENCE_TARGETS_ACTOR)
            .summary(),
        E::new("onBehalfOf", OPT, &["Reference"])
            .targets(REFERENCE_TARGETS_ACTOR)
            .summary(),
        E::new("targetFormat", OPT, &["code"]),
        E::new("sigFormat", OPT, &["code"]),
        E::new("data", OPT, &["base64Binary"]),
    ],
);

pub static TIMING: TypeDefinition = TypeDefinition::new(
    "Timing",
    TypeKind::ComplexType,
    Some("BackboneElement"),
    &[
        E::new("event", MANY, &["dateTime"]).summary(),
        E::new("code", OPT, &["CodeableConcept"]).summary(),
    ],
);

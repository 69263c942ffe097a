//! Declarative type metadata
//!
//! A [`TypeDefinition`] is everything the generic engine needs to know about one
//! structural shape: its name, kind, base type, and the ordered list of elements
//! it declares. Generated code declares these as `static` items; the
//! [`Model`](crate::Model) resolves inheritance and indexes them.
//!
//! Element types are referenced by name. Names starting with `System.` are leaf
//! value types (see [`Primitive`](crate::Primitive)); every other name must be a
//! type known to the model.

/// Prefix of leaf value types
pub const SYSTEM_PREFIX: &str = "System.";

pub const SYSTEM_BOOLEAN: &str = "System.Boolean";
pub const SYSTEM_INTEGER: &str = "System.Integer";
pub const SYSTEM_LONG: &str = "System.Long";
pub const SYSTEM_DECIMAL: &str = "System.Decimal";
pub const SYSTEM_STRING: &str = "System.String";
pub const SYSTEM_DATE: &str = "System.Date";
pub const SYSTEM_DATE_TIME: &str = "System.DateTime";
pub const SYSTEM_TIME: &str = "System.Time";

/// Kind of structural type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    PrimitiveType,
    ComplexType,
    BackboneElement,
    Resource,
}

/// Lexical rule applied to the value of a primitive type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lexical {
    String,
    Code,
    Id,
    Uri,
    Base64,
    PositiveInt,
    UnsignedInt,
    Instant,
    /// Well-formed XHTML with a root `div` in the XHTML namespace
    Xhtml,
    /// No lexical restriction beyond the leaf type
    Any,
}

/// Lower and upper bound on the number of values an element may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cardinality {
    pub min: u32,
    pub max: Option<u32>, // None = unbounded
}

impl Cardinality {
    pub const ZERO_TO_ONE: Cardinality = Cardinality {
        min: 0,
        max: Some(1),
    };

    pub const ONE_TO_ONE: Cardinality = Cardinality {
        min: 1,
        max: Some(1),
    };

    pub const ZERO_TO_MANY: Cardinality = Cardinality { min: 0, max: None };

    pub const ONE_TO_MANY: Cardinality = Cardinality { min: 1, max: None };

    pub const fn is_required(&self) -> bool {
        self.min >= 1
    }

    pub const fn is_repeating(&self) -> bool {
        match self.max {
            Some(max) => max > 1,
            None => true,
        }
    }
}

/// One declared element (field) of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementDefinition {
    pub name: &'static str,
    pub cardinality: Cardinality,
    /// Allowed types; more than one makes this a choice element
    pub types: &'static [&'static str],
    /// Resource types a `Reference` value may target (empty = unchecked)
    pub target_profiles: &'static [&'static str],
    pub is_modifier: bool,
    pub is_summary: bool,
    /// Lexical rule for a `System.*` leaf value held directly by this element
    pub lexical: Option<Lexical>,
}

impl ElementDefinition {
    pub const fn new(
        name: &'static str,
        cardinality: Cardinality,
        types: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            cardinality,
            types,
            target_profiles: &[],
            is_modifier: false,
            is_summary: false,
            lexical: None,
        }
    }

    pub const fn targets(self, target_profiles: &'static [&'static str]) -> Self {
        Self {
            target_profiles,
            ..self
        }
    }

    pub const fn modifier(self) -> Self {
        Self {
            is_modifier: true,
            ..self
        }
    }

    pub const fn summary(self) -> Self {
        Self {
            is_summary: true,
            ..self
        }
    }

    pub const fn with_lexical(self, lexical: Lexical) -> Self {
        Self {
            lexical: Some(lexical),
            ..self
        }
    }

    pub const fn is_choice(&self) -> bool {
        self.types.len() > 1
    }

    pub const fn is_required(&self) -> bool {
        self.cardinality.is_required()
    }

    pub const fn is_repeating(&self) -> bool {
        self.cardinality.is_repeating()
    }

    /// The single declared type of a non-choice element
    pub fn type_name(&self) -> Option<&'static str> {
        match self.types {
            [only] => Some(*only),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintSeverity {
    Rule,
    Warning,
}

/// Expression-based invariant declared by a type. Exposed for the external
/// constraint evaluator; the model never evaluates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintDefinition {
    pub key: &'static str,
    pub severity: ConstraintSeverity,
    pub human: &'static str,
    pub expression: &'static str,
}

impl ConstraintDefinition {
    pub const fn rule(key: &'static str, human: &'static str, expression: &'static str) -> Self {
        Self {
            key,
            severity: ConstraintSeverity::Rule,
            human,
            expression,
        }
    }

    pub const fn warning(
        key: &'static str,
        human: &'static str,
        expression: &'static str,
    ) -> Self {
        Self {
            key,
            severity: ConstraintSeverity::Warning,
            human,
            expression,
        }
    }
}

/// Declarative description of one structural shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDefinition {
    pub name: &'static str,
    pub kind: TypeKind,
    pub base: Option<&'static str>,
    pub is_abstract: bool,
    /// Lexical rule for primitive types
    pub lexical: Option<Lexical>,
    /// Elements declared by this type, in order (inherited ones excluded)
    pub elements: &'static [ElementDefinition],
    pub constraints: &'static [ConstraintDefinition],
}

impl TypeDefinition {
    pub const fn new(
        name: &'static str,
        kind: TypeKind,
        base: Option<&'static str>,
        elements: &'static [ElementDefinition],
    ) -> Self {
        Self {
            name,
            kind,
            base,
            is_abstract: false,
            lexical: None,
            elements,
            constraints: &[],
        }
    }

    pub const fn primitive(name: &'static str, base: &'static str, lexical: Lexical) -> Self {
        Self {
            lexical: Some(lexical),
            ..Self::new(name, TypeKind::PrimitiveType, Some(base), &[])
        }
    }

    pub const fn abstract_type(self) -> Self {
        Self {
            is_abstract: true,
            ..self
        }
    }

    pub const fn with_lexical(self, lexical: Lexical) -> Self {
        Self {
            lexical: Some(lexical),
            ..self
        }
    }

    pub const fn with_constraints(self, constraints: &'static [ConstraintDefinition]) -> Self {
        Self {
            constraints,
            ..self
        }
    }
}

pub fn is_system_type(name: &str) -> bool {
    name.starts_with(SYSTEM_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinality_bounds() {
        assert!(!Cardinality::ZERO_TO_ONE.is_required());
        assert!(!Cardinality::ZERO_TO_ONE.is_repeating());
        assert!(Cardinality::ONE_TO_MANY.is_required());
        assert!(Cardinality::ONE_TO_MANY.is_repeating());
        assert!(Cardinality { min: 0, max: Some(3) }.is_repeating());
    }

    #[test]
    fn element_builders_compose() {
        const PATIENT: ElementDefinition =
            ElementDefinition::new("patient", Cardinality::ONE_TO_ONE, &["Reference"])
                .targets(&["Patient"])
                .summary();

        assert!(PATIENT.is_summary);
        assert!(!PATIENT.is_modifier);
        assert!(!PATIENT.is_choice());
        assert_eq!(PATIENT.type_name(), Some("Reference"));
        assert_eq!(PATIENT.target_profiles, &["Patient"]);
    }
}

//! Resolved type registry
//!
//! [`Model::new`] takes the static [`TypeDefinition`]s, resolves their base
//! chains and flattens inherited elements into one ordered list per type. The
//! result is immutable and shared between threads; every [`Node`] holds a
//! handle to the model it was built against.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::trace;

use crate::builder::Builder;
use crate::catalog;
use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::primitive::Primitive;
use crate::schema::{
    is_system_type, ConstraintDefinition, ElementDefinition, Lexical, TypeDefinition, TypeKind,
};

/// A type with its inheritance resolved.
#[derive(Debug)]
pub struct TypeInfo {
    definition: &'static TypeDefinition,
    /// Own and inherited elements, base first
    elements: Vec<&'static ElementDefinition>,
    index: HashMap<&'static str, usize>,
    /// This type followed by its bases, nearest first
    ancestors: Vec<&'static str>,
    constraints: Vec<&'static ConstraintDefinition>,
    lexical: Option<Lexical>,
}

impl TypeInfo {
    pub fn name(&self) -> &'static str {
        self.definition.name
    }

    pub fn kind(&self) -> TypeKind {
        self.definition.kind
    }

    pub fn definition(&self) -> &'static TypeDefinition {
        self.definition
    }

    pub fn base(&self) -> Option<&'static str> {
        self.definition.base
    }

    pub fn is_abstract(&self) -> bool {
        self.definition.is_abstract
    }

    pub fn elements(&self) -> &[&'static ElementDefinition] {
        &self.elements
    }

    pub fn element(&self, name: &str) -> Option<&'static ElementDefinition> {
        self.position(name).map(|i| self.elements[i])
    }

    /// Slot index of the named element
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn ancestors(&self) -> &[&'static str] {
        &self.ancestors
    }

    /// True when `type_name` is this type or one of its bases
    pub fn is_a(&self, type_name: &str) -> bool {
        self.ancestors.iter().any(|a| *a == type_name)
    }

    pub fn is_primitive(&self) -> bool {
        self.kind() == TypeKind::PrimitiveType
    }

    pub fn is_resource(&self) -> bool {
        self.kind() == TypeKind::Resource
    }

    pub fn is_domain_resource(&self) -> bool {
        self.is_a("DomainResource")
    }

    pub fn is_backbone_element(&self) -> bool {
        self.kind() == TypeKind::BackboneElement
    }

    /// Constraints declared by this type and its bases, base first
    pub fn constraints(&self) -> &[&'static ConstraintDefinition] {
        &self.constraints
    }

    /// Lexical rule of a primitive type (inherited when not declared)
    pub fn lexical(&self) -> Option<Lexical> {
        self.lexical
    }
}

struct ModelInner {
    config: ModelConfig,
    types: HashMap<&'static str, Arc<TypeInfo>>,
}

/// Shared, immutable set of resolved types plus the validation config.
#[derive(Clone)]
pub struct Model {
    inner: Arc<ModelInner>,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("types", &self.inner.types.len())
            .field("config", &self.inner.config)
            .finish()
    }
}

static GLOBAL: OnceLock<Model> = OnceLock::new();

impl Model {
    /// Resolve `definitions` into a model.
    ///
    /// Fails with [`Error::Schema`] when a base or element type is unknown, a
    /// type name or element name is declared twice, or a base chain loops.
    pub fn new(definitions: &[&'static TypeDefinition], config: ModelConfig) -> Result<Self> {
        let mut by_name: HashMap<&'static str, &'static TypeDefinition> = HashMap::new();
        for definition in definitions {
            if by_name.insert(definition.name, definition).is_some() {
                return Err(Error::Schema(format!(
                    "type '{}' is defined more than once",
                    definition.name
                )));
            }
        }

        let mut types = HashMap::with_capacity(by_name.len());
        for definition in by_name.values() {
            let info = resolve(definition, &by_name)?;
            types.insert(definition.name, Arc::new(info));
        }

        trace!(types = types.len(), "resolved model");
        Ok(Self {
            inner: Arc::new(ModelInner { config, types }),
        })
    }

    /// The built-in R4 catalog under the default (strict) configuration.
    pub fn global() -> &'static Model {
        GLOBAL.get_or_init(|| {
            Model::with_config(ModelConfig::default()).expect("built-in catalog must resolve")
        })
    }

    /// The built-in R4 catalog under `config`
    pub fn with_config(config: ModelConfig) -> Result<Self> {
        Model::new(catalog::DEFINITIONS, config)
    }

    pub fn config(&self) -> &ModelConfig {
        &self.inner.config
    }

    pub fn type_info(&self, type_name: &str) -> Option<&Arc<TypeInfo>> {
        self.inner.types.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.inner.types.contains_key(type_name)
    }

    pub fn types(&self) -> impl Iterator<Item = &Arc<TypeInfo>> + '_ {
        self.inner.types.values()
    }

    /// Concrete resource types of this model, sorted by name
    pub fn resource_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .types()
            .filter(|t| t.is_resource() && !t.is_abstract())
            .map(|t| t.name())
            .collect();
        names.sort_unstable();
        names
    }

    /// True for any R4 resource type name, whether or not this model defines it.
    pub fn is_resource_type(&self, type_name: &str) -> bool {
        self.type_info(type_name).is_some_and(|t| t.is_resource())
            || catalog::RESOURCE_TYPE_NAMES.binary_search(&type_name).is_ok()
    }

    /// A fresh builder for a concrete type
    pub fn builder(&self, type_name: &str) -> Result<Builder> {
        let info = self
            .type_info(type_name)
            .ok_or_else(|| Error::UnknownType(type_name.to_string()))?;
        if info.is_abstract() {
            return Err(Error::AbstractType(type_name.to_string()));
        }
        Ok(Builder::new(self.clone(), Arc::clone(info)))
    }

    /// Build a primitive node holding only a value
    pub fn primitive(&self, type_name: &str, value: impl Into<Primitive>) -> Result<Node> {
        self.builder(type_name)?.set("value", value.into()).build()
    }

    pub fn ptr_eq(&self, other: &Model) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

fn resolve(
    definition: &'static TypeDefinition,
    by_name: &HashMap<&'static str, &'static TypeDefinition>,
) -> Result<TypeInfo> {
    // nearest first
    let mut chain = vec![definition];
    let mut seen = HashSet::from([definition.name]);
    let mut current = definition;
    while let Some(base) = current.base {
        let next = by_name.get(base).copied().ok_or_else(|| {
            Error::Schema(format!(
                "type '{}' has unknown base type '{base}'",
                current.name
            ))
        })?;
        if !seen.insert(next.name) {
            return Err(Error::Schema(format!(
                "base chain of type '{}' is circular",
                definition.name
            )));
        }
        chain.push(next);
        current = next;
    }

    let mut elements = Vec::new();
    let mut index = HashMap::new();
    let mut constraints = Vec::new();
    for ancestor in chain.iter().rev() {
        for element in ancestor.elements {
            check_element(definition, element, by_name)?;
            if index.insert(element.name, elements.len()).is_some() {
                return Err(Error::Schema(format!(
                    "element '{}' is declared more than once on type '{}'",
                    element.name, definition.name
                )));
            }
            elements.push(element);
        }
        constraints.extend(ancestor.constraints.iter());
    }

    if definition.kind == TypeKind::PrimitiveType && !index.contains_key("value") {
        return Err(Error::Schema(format!(
            "primitive type '{}' has no 'value' element",
            definition.name
        )));
    }

    Ok(TypeInfo {
        definition,
        elements,
        index,
        ancestors: chain.iter().map(|d| d.name).collect(),
        constraints,
        lexical: chain.iter().find_map(|d| d.lexical),
    })
}

fn check_element(
    owner: &TypeDefinition,
    element: &ElementDefinition,
    by_name: &HashMap<&'static str, &'static TypeDefinition>,
) -> Result<()> {
    if element.types.is_empty() {
        return Err(Error::Schema(format!(
            "element '{}.{}' declares no type",
            owner.name, element.name
        )));
    }
    if let Some(max) = element.cardinality.max {
        if max < element.cardinality.min || max == 0 {
            return Err(Error::Schema(format!(
                "element '{}.{}' has invalid cardinality {}..{max}",
                owner.name, element.name, element.cardinality.min
            )));
        }
    }
    for type_name in element.types {
        if !is_system_type(type_name) && !by_name.contains_key(type_name) {
            return Err(Error::Schema(format!(
                "element '{}.{}' refers to unknown type '{type_name}'",
                owner.name, element.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Cardinality;

    static ROOT: TypeDefinition = TypeDefinition::new(
        "Root",
        TypeKind::ComplexType,
        None,
        &[ElementDefinition::new("id", Cardinality::ZERO_TO_ONE, &["System.String"])],
    )
    .abstract_type();

    static LEAF: TypeDefinition = TypeDefinition::new(
        "Leaf",
        TypeKind::ComplexType,
        Some("Root"),
        &[ElementDefinition::new("label", Cardinality::ONE_TO_ONE, &["System.String"])],
    );

    static ORPHAN: TypeDefinition =
        TypeDefinition::new("Orphan", TypeKind::ComplexType, Some("Missing"), &[]);

    static SHADOW: TypeDefinition = TypeDefinition::new(
        "Shadow",
        TypeKind::ComplexType,
        Some("Root"),
        &[ElementDefinition::new("id", Cardinality::ZERO_TO_ONE, &["System.String"])],
    );

    #[test]
    fn flattens_inherited_elements_base_first() {
        let model = Model::new(&[&ROOT, &LEAF], ModelConfig::default()).unwrap();
        let leaf = model.type_info("Leaf").unwrap();

        let names: Vec<_> = leaf.elements().iter().map(|e| e.name).collect();
        assert_eq!(names, ["id", "label"]);
        assert_eq!(leaf.position("label"), Some(1));
        assert!(leaf.is_a("Root"));
        assert!(!leaf.is_a("Other"));
    }

    #[test]
    fn rejects_unknown_base_and_duplicate_elements() {
        let err = Model::new(&[&ORPHAN], ModelConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));

        let err = Model::new(&[&ROOT, &SHADOW], ModelConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));

        let err = Model::new(&[&ROOT, &ROOT], ModelConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn abstract_types_have_no_builder() {
        let model = Model::new(&[&ROOT, &LEAF], ModelConfig::default()).unwrap();
        assert!(matches!(model.builder("Root"), Err(Error::AbstractType(_))));
        assert!(matches!(model.builder("Nope"), Err(Error::UnknownType(_))));
        assert!(model.builder("Leaf").is_ok());
    }

    #[test]
    fn global_catalog_resolves() {
        let model = Model::global();
        assert!(model.type_info("AllergyIntolerance").unwrap().is_domain_resource());
        assert!(model.type_info("Age").unwrap().is_a("Quantity"));
        assert!(model.type_info("code").unwrap().is_a("string"));
        assert_eq!(model.type_info("code").unwrap().lexical(), Some(Lexical::Code));
        assert!(model.is_resource_type("Group"));
        assert!(!model.is_resource_type("Quantity"));
        assert!(model.resource_types().contains(&"Provenance"));
    }
}

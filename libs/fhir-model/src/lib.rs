//! FHIR data model
//!
//! An immutable, schema-driven model of FHIR R4 resources and data types.
//!
//! # Module Organization
//!
//! - `schema`: static type metadata (`TypeDefinition`, `ElementDefinition`)
//! - `model`: resolved type registry shared by all nodes
//! - `node` / `builder`: immutable instances and their staging builders
//! - `validate` / `containment`: structural checks run by `Builder::build`
//! - `visit`: depth-first traversal
//! - `choice` / `extension`: typed choice elements and extension helpers
//! - `catalog`: the built-in R4 definitions
//! - `values`: shorthand constructors for common data types
//!
//! # Design Philosophy
//!
//! - **One engine, many types**: every type is a `TypeDefinition` interpreted by
//!   the same builder, validator and visitor
//! - **Immutable**: a built node never changes; `to_builder` starts a modified copy
//! - **Fail fast**: structural errors are reported by `build()`, never later
//!
//! # Example
//!
//! ```rust
//! use ferrum_model::{values, Error, Model};
//!
//! let model = Model::global();
//!
//! let reaction = model
//!     .builder("AllergyIntolerance.Reaction")?
//!     .add("manifestation", values::concept_text("Hives")?)
//!     .build()?;
//!
//! let allergy = model
//!     .builder("AllergyIntolerance")?
//!     .set("patient", values::reference("Patient/example")?)
//!     .add("reaction", reaction)
//!     .build()?;
//!
//! assert_eq!(allergy.get_all("reaction").len(), 1);
//!
//! let err = model.builder("AllergyIntolerance.Reaction")?.build().unwrap_err();
//! assert_eq!(err, Error::EmptyRequiredSequence("manifestation".into()));
//! # Ok::<(), Error>(())
//! ```

pub mod builder;
pub mod catalog;
pub mod choice;
pub mod config;
mod containment;
pub mod error;
pub mod extension;
mod identity;
pub mod model;
pub mod node;
pub mod primitive;
pub mod schema;
mod validate;
pub mod values;
pub mod visit;

// Re-export commonly used types
pub use builder::Builder;
pub use choice::{choice_element_name, ChoiceType};
pub use config::{ModelConfig, ModelConfigBuilder};
pub use error::{Error, Result};
pub use extension::{ensure_modifiers_understood, unrecognized_modifier_extensions, UnrecognizedModifier};
pub use model::{Model, TypeInfo};
pub use node::{Field, Node, Value};
pub use primitive::{PartialDate, PartialDateTime, Primitive, Timestamp};
pub use schema::{
    Cardinality, ConstraintDefinition, ConstraintSeverity, ElementDefinition, Lexical,
    TypeDefinition, TypeKind,
};
pub use visit::{PathStack, Visitor};

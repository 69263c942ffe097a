//! Immutable model nodes
//!
//! A [`Node`] is one built instance of a type: a resource, a data type, a
//! backbone element or a primitive wrapper. It is a cheap handle over shared,
//! frozen storage, so cloning a node never copies its contents and a node can
//! be sent to and read from any thread.

use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::builder::Builder;
use crate::model::{Model, TypeInfo};
use crate::primitive::Primitive;
use crate::schema::{ElementDefinition, TypeKind};

/// Content of one element slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Primitive(Primitive),
    Node(Node),
}

impl Value {
    /// `System.*` name for leaf values, the model type name for nodes
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Primitive(p) => p.system_type(),
            Value::Node(node) => node.type_name(),
        }
    }

    /// Type membership, following the base chain for nodes
    pub fn is_a(&self, type_name: &str) -> bool {
        match self {
            Value::Primitive(p) => p.system_type() == type_name,
            Value::Node(node) => node.type_info().is_a(type_name),
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            Value::Primitive(_) => None,
        }
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Value::Primitive(p) => Some(p),
            Value::Node(_) => None,
        }
    }

    /// String content of a leaf, or of a primitive node's `value`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Primitive(p) => p.as_str(),
            Value::Node(node) => node.value().and_then(Primitive::as_str),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(node)
    }
}

impl From<Primitive> for Value {
    fn from(value: Primitive) -> Self {
        Value::Primitive(value)
    }
}

macro_rules! value_from_primitive {
    ($($ty:ty),+) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::Primitive(Primitive::from(value))
            }
        })+
    };
}

value_from_primitive!(bool, i32, i64, Decimal, &str, String);

/// Storage for one element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Slot {
    Single(Option<Value>),
    Many(Vec<Value>),
}

impl Slot {
    pub(crate) fn empty_for(element: &ElementDefinition) -> Self {
        if element.is_repeating() {
            Slot::Many(Vec::new())
        } else {
            Slot::Single(None)
        }
    }

    pub(crate) fn as_field(&self) -> Field<'_> {
        match self {
            Slot::Single(value) => Field::Single(value.as_ref()),
            Slot::Many(values) => Field::Many(values),
        }
    }
}

/// Read-only view of one element of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    Single(Option<&'a Value>),
    Many(&'a [Value]),
}

impl<'a> Field<'a> {
    /// Present values, in order
    pub fn values(&self) -> &'a [Value] {
        match *self {
            Field::Single(Some(value)) => std::slice::from_ref(value),
            Field::Single(None) => &[],
            Field::Many(values) => values,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Field::Many(_))
    }
}

pub(crate) struct NodeData {
    pub(crate) model: Model,
    pub(crate) ty: Arc<TypeInfo>,
    /// Aligned with `ty.elements()`
    pub(crate) slots: Box<[Slot]>,
    /// Structural hash, 0 until first computed
    pub(crate) hash: AtomicU64,
}

/// Immutable instance of a model type
#[derive(Clone)]
pub struct Node {
    pub(crate) inner: Arc<NodeData>,
}

impl Node {
    pub(crate) fn freeze(model: Model, ty: Arc<TypeInfo>, slots: Vec<Slot>) -> Self {
        Self {
            inner: Arc::new(NodeData {
                model,
                ty,
                slots: slots.into_boxed_slice(),
                hash: AtomicU64::new(0),
            }),
        }
    }

    pub(crate) fn slots(&self) -> &[Slot] {
        &self.inner.slots
    }

    pub fn model(&self) -> &Model {
        &self.inner.model
    }

    pub fn type_info(&self) -> &TypeInfo {
        &self.inner.ty
    }

    pub fn type_name(&self) -> &'static str {
        self.inner.ty.name()
    }

    pub fn kind(&self) -> TypeKind {
        self.inner.ty.kind()
    }

    pub fn is_resource(&self) -> bool {
        self.inner.ty.is_resource()
    }

    /// View of the named element, `None` when the type does not declare it
    pub fn field(&self, name: &str) -> Option<Field<'_>> {
        self.inner
            .ty
            .position(name)
            .map(|i| self.inner.slots[i].as_field())
    }

    /// Every declared element in declaration order, inherited ones first
    pub fn fields(&self) -> impl Iterator<Item = (&'static ElementDefinition, Field<'_>)> + '_ {
        self.inner
            .ty
            .elements()
            .iter()
            .copied()
            .zip(self.inner.slots.iter().map(Slot::as_field))
    }

    /// Value of a single-valued element
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self.field(name)? {
            Field::Single(value) => value,
            Field::Many(_) => None,
        }
    }

    /// Values of an element (a single value is returned as a one-element slice)
    pub fn get_all(&self, name: &str) -> &[Value] {
        match self.field(name) {
            Some(field) => field.values(),
            None => &[],
        }
    }

    pub fn get_node(&self, name: &str) -> Option<&Node> {
        self.get(name).and_then(Value::as_node)
    }

    /// String content of a single-valued element (leaf or primitive node)
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.get_str("id")
    }

    /// Raw value of a primitive node
    pub fn value(&self) -> Option<&Primitive> {
        if !self.inner.ty.is_primitive() {
            return None;
        }
        self.get("value").and_then(Value::as_primitive)
    }

    pub fn extensions(&self) -> &[Value] {
        self.get_all("extension")
    }

    pub fn modifier_extensions(&self) -> &[Value] {
        self.get_all("modifierExtension")
    }

    pub fn contained(&self) -> &[Value] {
        self.get_all("contained")
    }

    pub fn has_value(&self) -> bool {
        self.value().is_some()
    }

    /// True when any element other than `id` (and a primitive's `value`) is populated
    pub fn has_children(&self) -> bool {
        let primitive = self.inner.ty.is_primitive();
        self.fields().any(|(element, field)| {
            element.name != "id" && !(primitive && element.name == "value") && !field.is_empty()
        })
    }

    /// Builder pre-populated with this node's contents
    pub fn to_builder(&self) -> Builder {
        Builder::from_node(self)
    }

    /// True when both handles share the same storage
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.type_name());
        for (element, field) in self.fields() {
            match field {
                Field::Single(Some(value)) => {
                    out.field(element.name, value);
                }
                Field::Many(values) if !values.is_empty() => {
                    out.field(element.name, &values);
                }
                _ => {}
            }
        }
        out.finish()
    }
}

//! Staging area for nodes
//!
//! Setters take and return the builder by value so construction chains. Misuse
//! (an unknown element name, `set` on a repeating element, `add` on a single
//! one) does not panic: the first such error is kept and returned by
//! [`Builder::build`] before any validation runs.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::choice::ChoiceType;
use crate::error::{Error, Result};
use crate::model::{Model, TypeInfo};
use crate::node::{Field, Node, Slot, Value};
use crate::validate;

#[derive(Debug)]
pub struct Builder {
    model: Model,
    ty: Arc<TypeInfo>,
    slots: Vec<Slot>,
    error: Option<Error>,
}

impl Builder {
    pub(crate) fn new(model: Model, ty: Arc<TypeInfo>) -> Self {
        let slots = ty.elements().iter().map(|e| Slot::empty_for(e)).collect();
        Self {
            model,
            ty,
            slots,
            error: None,
        }
    }

    pub(crate) fn from_node(node: &Node) -> Self {
        Self {
            model: node.model().clone(),
            ty: Arc::clone(&node.inner.ty),
            slots: node.slots().to_vec(),
            error: None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    pub fn type_info(&self) -> &TypeInfo {
        &self.ty
    }

    fn record(&mut self, error: Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn position(&mut self, name: &str) -> Option<usize> {
        let position = self.ty.position(name);
        if position.is_none() {
            self.record(Error::UnknownElement {
                type_name: self.ty.name().to_string(),
                element: name.to_string(),
            });
        }
        position
    }

    /// Set a single-valued element, replacing any previous value.
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Self {
        let Some(index) = self.position(name) else {
            return self;
        };
        if self.ty.elements()[index].is_repeating() {
            self.record(Error::CardinalityMismatch {
                field: name.to_string(),
                message: "element is repeating; use add".to_string(),
            });
            return self;
        }
        self.slots[index] = Slot::Single(Some(value.into()));
        self
    }

    /// Set a single-valued element when `value` is present, clear it otherwise.
    pub fn set_opt<V: Into<Value>>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(name, value),
            None => self.clear(name),
        }
    }

    /// Append to a repeating element.
    pub fn add(mut self, name: &str, value: impl Into<Value>) -> Self {
        let Some(index) = self.position(name) else {
            return self;
        };
        if !self.ty.elements()[index].is_repeating() {
            self.record(Error::CardinalityMismatch {
                field: name.to_string(),
                message: "element is not repeating; use set".to_string(),
            });
            return self;
        }
        if let Slot::Many(values) = &mut self.slots[index] {
            values.push(value.into());
        }
        self
    }

    pub fn add_all<I>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        for value in values {
            self = self.add(name, value);
        }
        self
    }

    /// Replace every value of a repeating element.
    pub fn replace_all<I>(self, name: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.clear(name).add_all(name, values)
    }

    /// Remove the value(s) of an element.
    pub fn clear(mut self, name: &str) -> Self {
        if let Some(index) = self.position(name) {
            self.slots[index] = Slot::empty_for(self.ty.elements()[index]);
        }
        self
    }

    /// Set the choice element `C` belongs to.
    pub fn set_choice<C: ChoiceType>(mut self, choice: C) -> Self {
        if !self.ty.is_a(C::OWNER) {
            self.record(Error::UnknownElement {
                type_name: self.ty.name().to_string(),
                element: format!("{}.{}", C::OWNER, C::ELEMENT),
            });
            return self;
        }
        self.set(C::ELEMENT, choice.into_value())
    }

    /// Staged value of a single-valued element
    pub fn get(&self, name: &str) -> Option<&Value> {
        let index = self.ty.position(name)?;
        match self.slots[index].as_field() {
            Field::Single(value) => value,
            Field::Many(_) => None,
        }
    }

    /// Staged values of an element
    pub fn get_all(&self, name: &str) -> &[Value] {
        match self.ty.position(name) {
            Some(index) => self.slots[index].as_field().values(),
            None => &[],
        }
    }

    /// Freeze the staged values into a node after structural validation.
    pub fn build(self) -> Result<Node> {
        let type_name = self.ty.name();
        if let Some(error) = self.error {
            debug!(type_name, %error, "rejected builder");
            return Err(error);
        }

        let node = Node::freeze(self.model, self.ty, self.slots);
        match validate::validate(&node) {
            Ok(()) => {
                trace!(type_name, "built node");
                Ok(node)
            }
            Err(error) => {
                debug!(type_name, %error, "node failed validation");
                Err(error)
            }
        }
    }
}

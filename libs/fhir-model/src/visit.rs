//! Depth-first traversal
//!
//! [`Node::accept`] walks a tree in declaration order. For each node the
//! visitor sees `pre_visit`; when that returns false the node is skipped
//! entirely. Otherwise it sees `visit_start`, `visit` and, when `visit` returns
//! true, every populated child; then `visit_end` and `post_visit`. Non-empty
//! repeating elements are bracketed by `visit_sequence_start` and
//! `visit_sequence_end`. Leaf values are reported through `visit_primitive`,
//! which by default forwards to the typed hook for the value's kind.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::node::{Field, Node, Value};
use crate::primitive::{PartialDate, PartialDateTime, Primitive};

pub trait Visitor {
    /// Return false to skip `node` and everything below it
    fn pre_visit(&mut self, _node: &Node) -> bool {
        true
    }

    fn visit_start(&mut self, _name: &str, _index: Option<usize>, _node: &Node) {}

    /// Return false to skip the children of `node`
    fn visit(&mut self, _name: &str, _index: Option<usize>, _node: &Node) -> bool {
        true
    }

    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: &Node) {}

    fn post_visit(&mut self, _node: &Node) {}

    fn visit_sequence_start(&mut self, _name: &str, _len: usize) {}

    fn visit_sequence_end(&mut self, _name: &str) {}

    fn visit_primitive(&mut self, name: &str, index: Option<usize>, value: &Primitive) {
        match value {
            Primitive::Boolean(b) => self.visit_boolean(name, index, *b),
            Primitive::Integer(i) => self.visit_integer(name, index, *i),
            Primitive::Long(l) => self.visit_long(name, index, *l),
            Primitive::Decimal(d) => self.visit_decimal(name, index, d),
            Primitive::String(s) => self.visit_string(name, index, s),
            Primitive::Date(d) => self.visit_date(name, index, d),
            Primitive::DateTime(dt) => self.visit_date_time(name, index, dt),
            Primitive::Time(t) => self.visit_time(name, index, t),
        }
    }

    fn visit_boolean(&mut self, _name: &str, _index: Option<usize>, _value: bool) {}
    fn visit_integer(&mut self, _name: &str, _index: Option<usize>, _value: i32) {}
    fn visit_long(&mut self, _name: &str, _index: Option<usize>, _value: i64) {}
    fn visit_decimal(&mut self, _name: &str, _index: Option<usize>, _value: &Decimal) {}
    fn visit_string(&mut self, _name: &str, _index: Option<usize>, _value: &str) {}
    fn visit_date(&mut self, _name: &str, _index: Option<usize>, _value: &PartialDate) {}
    fn visit_date_time(&mut self, _name: &str, _index: Option<usize>, _value: &PartialDateTime) {}
    fn visit_time(&mut self, _name: &str, _index: Option<usize>, _value: &NaiveTime) {}
}

/// Walk `node` as element `name` (at `index` within a sequence).
pub fn walk<V: Visitor + ?Sized>(name: &str, index: Option<usize>, node: &Node, visitor: &mut V) {
    if !visitor.pre_visit(node) {
        return;
    }
    visitor.visit_start(name, index, node);
    if visitor.visit(name, index, node) {
        for (element, field) in node.fields() {
            match field {
                Field::Single(Some(value)) => walk_value(element.name, None, value, visitor),
                Field::Single(None) => {}
                Field::Many([]) => {}
                Field::Many(values) => {
                    visitor.visit_sequence_start(element.name, values.len());
                    for (i, value) in values.iter().enumerate() {
                        walk_value(element.name, Some(i), value, visitor);
                    }
                    visitor.visit_sequence_end(element.name);
                }
            }
        }
    }
    visitor.visit_end(name, index, node);
    visitor.post_visit(node);
}

fn walk_value<V: Visitor + ?Sized>(name: &str, index: Option<usize>, value: &Value, visitor: &mut V) {
    match value {
        Value::Node(node) => walk(name, index, node, visitor),
        Value::Primitive(primitive) => visitor.visit_primitive(name, index, primitive),
    }
}

impl Node {
    /// Walk this node as a root, named after its type
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        walk(self.type_name(), None, self, visitor);
    }
}

/// Element path of the node currently being visited, e.g.
/// `AllergyIntolerance.reaction[0].manifestation[1]`.
#[derive(Debug, Default, Clone)]
pub struct PathStack {
    segments: Vec<String>,
}

impl PathStack {
    pub fn push(&mut self, name: &str, index: Option<usize>) {
        self.segments.push(match index {
            Some(i) => format!("{name}[{i}]"),
            None => name.to_string(),
        });
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }

    pub fn path(&self) -> String {
        self.segments.join(".")
    }
}

struct Collect<F> {
    predicate: F,
    found: Vec<Node>,
}

impl<F: FnMut(&Node) -> bool> Visitor for Collect<F> {
    fn visit(&mut self, _name: &str, _index: Option<usize>, node: &Node) -> bool {
        if (self.predicate)(node) {
            self.found.push(node.clone());
        }
        true
    }
}

/// Every node in the tree (root included) matching `predicate`, in visit order
pub fn collect<F: FnMut(&Node) -> bool>(root: &Node, predicate: F) -> Vec<Node> {
    let mut collector = Collect {
        predicate,
        found: Vec::new(),
    };
    root.accept(&mut collector);
    collector.found
}

/// Every node that is, or derives from, `type_name`
pub fn collect_type(root: &Node, type_name: &str) -> Vec<Node> {
    collect(root, |node| node.type_info().is_a(type_name))
}

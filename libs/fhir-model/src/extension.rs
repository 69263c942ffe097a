//! Extension lookup and modifier-extension checks
//!
//! A modifier extension changes the meaning of the element that carries it, so
//! a consumer must refuse content with modifier extensions it does not
//! understand. Which URLs are understood is up to the caller.

use crate::error::{Error, Result};
use crate::node::{Node, Value};
use crate::visit::{PathStack, Visitor};

impl Node {
    /// `Extension.url` of an extension node
    pub fn extension_url(&self) -> Option<&str> {
        if !self.type_info().is_a("Extension") {
            return None;
        }
        self.get_str("url")
    }

    /// Extensions (not modifier extensions) with the given URL
    pub fn extensions_by_url<'a>(&'a self, url: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        by_url(self.extensions(), url)
    }

    pub fn modifier_extensions_by_url<'a>(
        &'a self,
        url: &'a str,
    ) -> impl Iterator<Item = &'a Node> + 'a {
        by_url(self.modifier_extensions(), url)
    }

    pub fn has_extension(&self, url: &str) -> bool {
        self.extensions_by_url(url).next().is_some()
    }
}

fn by_url<'a>(values: &'a [Value], url: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
    values
        .iter()
        .filter_map(Value::as_node)
        .filter(move |node| node.extension_url() == Some(url))
}

/// A modifier extension the caller does not recognise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedModifier {
    /// Element path of the extension, e.g. `Patient.modifierExtension[0]`
    pub path: String,
    pub url: String,
}

struct ModifierScan<F> {
    path: PathStack,
    is_recognized: F,
    found: Vec<UnrecognizedModifier>,
}

impl<F: Fn(&str) -> bool> Visitor for ModifierScan<F> {
    fn visit_start(&mut self, name: &str, index: Option<usize>, _node: &Node) {
        self.path.push(name, index);
    }

    fn visit(&mut self, name: &str, _index: Option<usize>, node: &Node) -> bool {
        if name == "modifierExtension" {
            let url = node.extension_url().unwrap_or_default();
            if !(self.is_recognized)(url) {
                self.found.push(UnrecognizedModifier {
                    path: self.path.path(),
                    url: url.to_string(),
                });
            }
        }
        true
    }

    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: &Node) {
        self.path.pop();
    }
}

/// Every modifier extension in the tree whose URL `is_recognized` rejects
pub fn unrecognized_modifier_extensions<F>(root: &Node, is_recognized: F) -> Vec<UnrecognizedModifier>
where
    F: Fn(&str) -> bool,
{
    let mut scan = ModifierScan {
        path: PathStack::default(),
        is_recognized,
        found: Vec::new(),
    };
    root.accept(&mut scan);
    scan.found
}

/// Fail on the first modifier extension `is_recognized` rejects
pub fn ensure_modifiers_understood<F>(root: &Node, is_recognized: F) -> Result<()>
where
    F: Fn(&str) -> bool,
{
    match unrecognized_modifier_extensions(root, is_recognized).into_iter().next() {
        Some(UnrecognizedModifier { path, url }) => {
            Err(Error::UnrecognizedModifierExtension { path, url })
        }
        None => Ok(()),
    }
}

//! Containment rules of `DomainResource`
//!
//! - dom-2: a contained resource has no contained resources of its own
//! - dom-3: a contained resource is referenced from elsewhere in the container
//!   (`#id`) or itself references the container (`#`)
//! - dom-4: a contained resource has no `meta.versionId` or `meta.lastUpdated`
//! - dom-5: a contained resource has no `meta.security` labels

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::node::Node;
use crate::visit::Visitor;

pub(crate) fn check(resource: &Node) -> Result<()> {
    let contained: Vec<&Node> = resource
        .contained()
        .iter()
        .filter_map(|value| value.as_node())
        .collect();
    if contained.is_empty() {
        return Ok(());
    }

    for child in &contained {
        if !child.contained().is_empty() {
            return Err(violation(
                "dom-2",
                child,
                "a contained resource SHALL NOT contain nested resources",
            ));
        }
    }

    let references = LocalReferences::of(resource);
    for child in &contained {
        let referenced = child
            .id()
            .is_some_and(|id| references.contains(&format!("#{id}")));
        if !referenced && !LocalReferences::of(child).contains("#") {
            return Err(violation(
                "dom-3",
                child,
                "a contained resource SHALL be referred to from elsewhere in the resource or SHALL refer to the containing resource",
            ));
        }
    }

    for child in &contained {
        let Some(meta) = child.get_node("meta") else {
            continue;
        };
        if meta.get("versionId").is_some() || meta.get("lastUpdated").is_some() {
            return Err(violation(
                "dom-4",
                child,
                "a contained resource SHALL NOT have a meta.versionId or a meta.lastUpdated",
            ));
        }
        if !meta.get_all("security").is_empty() {
            return Err(violation(
                "dom-5",
                child,
                "a contained resource SHALL NOT have a security label",
            ));
        }
    }
    Ok(())
}

fn violation(key: &str, child: &Node, message: &str) -> Error {
    let label = match child.id() {
        Some(id) => format!("{}/#{id}", child.type_name()),
        None => child.type_name().to_string(),
    };
    Error::InvalidContainment(format!("{key}: {message} ({label})"))
}

/// Local (`#...`) references found in `Reference.reference` and uri-family values
#[derive(Default)]
struct LocalReferences {
    found: HashSet<String>,
}

impl LocalReferences {
    fn of(root: &Node) -> HashSet<String> {
        let mut collector = LocalReferences::default();
        root.accept(&mut collector);
        collector.found
    }
}

impl Visitor for LocalReferences {
    fn visit(&mut self, _name: &str, _index: Option<usize>, node: &Node) -> bool {
        let info = node.type_info();
        let candidate = if info.is_a("Reference") {
            node.get_str("reference")
        } else if info.is_a("uri") {
            node.value().and_then(|v| v.as_str())
        } else {
            None
        };
        if let Some(target) = candidate.filter(|t| t.starts_with('#')) {
            self.found.insert(target.to_string());
        }
        true
    }
}

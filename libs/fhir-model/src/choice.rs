//! Typed choice (`[x]`) elements
//!
//! A choice element stores whichever alternative was supplied as a plain
//! [`Value`]; the build-time type check restricts it to the declared
//! alternatives. [`ChoiceType`] gives a closed, typed view over one choice
//! element, and [`choice_type!`](crate::choice_type) declares one.

use crate::model::TypeInfo;
use crate::node::{Node, Value};
use crate::schema::ElementDefinition;

pub trait ChoiceType: Sized {
    /// Type declaring the choice element
    const OWNER: &'static str;
    /// Element name without the `[x]` suffix
    const ELEMENT: &'static str;
    /// Allowed alternatives, in declaration order
    const ALLOWED: &'static [&'static str];

    fn into_value(self) -> Value;

    /// The alternative `value` belongs to; an exact type match wins over a
    /// derived one (an `Age` is offered as `Age` before `Quantity`).
    fn from_value(value: &Value) -> Option<Self>;

    fn type_name(&self) -> &'static str;
}

/// Declare a closed enum over the alternatives of one choice element.
///
/// ```
/// use ferrum_model::{choice_type, ChoiceType};
///
/// choice_type! {
///     /// Patient.deceased[x]
///     pub enum Deceased("Patient", "deceased") {
///         Boolean => "boolean",
///         DateTime => "dateTime",
///     }
/// }
///
/// assert_eq!(Deceased::ALLOWED, &["boolean", "dateTime"]);
/// ```
#[macro_export]
macro_rules! choice_type {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($owner:literal, $element:literal) {
            $($variant:ident => $ty:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant($crate::Node)),+
        }

        impl $name {
            pub fn as_node(&self) -> &$crate::Node {
                match self {
                    $($name::$variant(node) => node),+
                }
            }
        }

        impl $crate::ChoiceType for $name {
            const OWNER: &'static str = $owner;
            const ELEMENT: &'static str = $element;
            const ALLOWED: &'static [&'static str] = &[$($ty),+];

            fn into_value(self) -> $crate::Value {
                match self {
                    $($name::$variant(node) => $crate::Value::Node(node)),+
                }
            }

            fn from_value(value: &$crate::Value) -> Option<Self> {
                let node = value.as_node()?;
                $(
                    if node.type_name() == $ty {
                        return Some($name::$variant(node.clone()));
                    }
                )+
                $(
                    if node.type_info().is_a($ty) {
                        return Some($name::$variant(node.clone()));
                    }
                )+
                None
            }

            fn type_name(&self) -> &'static str {
                match self {
                    $($name::$variant(_) => $ty),+
                }
            }
        }
    };
}

/// Serialized name of a choice alternative: `onset` + `dateTime` = `onsetDateTime`
pub fn choice_element_name(element: &str, type_name: &str) -> String {
    let mut chars = type_name.chars();
    match chars.next() {
        Some(first) => format!("{element}{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => element.to_string(),
    }
}

impl TypeInfo {
    /// Find the choice element and alternative a serialized name such as
    /// `onsetDateTime` stands for.
    pub fn resolve_choice_element(
        &self,
        name: &str,
    ) -> Option<(&'static ElementDefinition, &'static str)> {
        self.elements()
            .iter()
            .filter(|e| e.is_choice() && name.starts_with(e.name))
            .find_map(|e| {
                e.types
                    .iter()
                    .find(|t| choice_element_name(e.name, t) == name)
                    .map(|t| (*e, *t))
            })
    }
}

impl Node {
    /// Typed view of the choice element `C`; `None` when unset or when this
    /// node is not a `C::OWNER`.
    pub fn choice<C: ChoiceType>(&self) -> Option<C> {
        if !self.type_info().is_a(C::OWNER) {
            return None;
        }
        self.get(C::ELEMENT).and_then(C::from_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Model;

    #[test]
    fn alternative_names() {
        assert_eq!(choice_element_name("onset", "dateTime"), "onsetDateTime");
        assert_eq!(choice_element_name("value", "CodeableConcept"), "valueCodeableConcept");
    }

    #[test]
    fn resolves_serialized_choice_names() {
        let info = Model::global().type_info("AllergyIntolerance").unwrap();

        let (element, type_name) = info.resolve_choice_element("onsetAge").unwrap();
        assert_eq!(element.name, "onset");
        assert_eq!(type_name, "Age");

        assert!(info.resolve_choice_element("onsetBoolean").is_none());
        assert!(info.resolve_choice_element("patient").is_none());
    }
}

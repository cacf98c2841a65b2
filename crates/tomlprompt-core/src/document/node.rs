//! Node classification and recursive listings

use crate::config::consts::document::{RESERVED_PREFIX, TEXT_FIELD, VARS_FIELD};
use serde::Serialize;
use toml::{Table, Value};

/// Classification of a document node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    /// Plain string leaf
    Text(&'a str),

    /// Table with a `_t` text field (and maybe a `_v` variable table)
    Templated { text: &'a str, table: &'a Table },

    /// Table used only for traversal
    Interior(&'a Table),

    /// Any other TOML value; never yields text
    Other,
}

impl<'a> Node<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::String(s) => Node::Text(s),
            Value::Table(table) => match table.get(TEXT_FIELD) {
                Some(Value::String(text)) => Node::Templated { text, table },
                _ => Node::Interior(table),
            },
            _ => Node::Other,
        }
    }

    /// Whether this node directly yields prompt text
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Text(_) | Node::Templated { .. })
    }

    /// A leaf with nothing below it to recurse into
    pub fn is_atomic(&self) -> bool {
        match *self {
            Node::Text(_) => true,
            Node::Templated { table, .. } => !table.keys().any(|k| is_enumerable(k)),
            _ => false,
        }
    }

    /// Raw template text of a leaf
    pub fn template(&self) -> Option<&'a str> {
        match *self {
            Node::Text(text) | Node::Templated { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Local variable table of a templated leaf
    pub fn local_vars(&self) -> Option<&'a Table> {
        match *self {
            Node::Templated { table, .. } => table.get(VARS_FIELD).and_then(Value::as_table),
            _ => None,
        }
    }
}

fn is_enumerable(key: &str) -> bool {
    !key.starts_with(RESERVED_PREFIX)
}

/// Selectable child keys of a node, in declaration order
pub fn enumerable_keys(value: &Value) -> Vec<&str> {
    match value {
        Value::Table(table) => table
            .keys()
            .filter(|k| is_enumerable(k))
            .map(String::as_str)
            .collect(),
        _ => Vec::new(),
    }
}

/// Recursive listing of everything a `**` or `??` can reach
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectablePaths {
    /// Leaves with nothing below them, in pre-order
    pub leaves: Vec<String>,
    /// Templated tables that also have children, in pre-order
    pub templated: Vec<String>,
}

impl SelectablePaths {
    /// Templated ancestors of `leaf` (top-down) followed by `leaf` itself
    pub fn chain_to(&self, leaf: &str) -> Vec<String> {
        self.templated
            .iter()
            .filter(|ancestor| {
                leaf.strip_prefix(ancestor.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
            })
            .cloned()
            .chain(std::iter::once(leaf.to_string()))
            .collect()
    }

    /// Templated interiors first, then leaves
    pub fn all(&self) -> Vec<String> {
        self.templated
            .iter()
            .chain(self.leaves.iter())
            .cloned()
            .collect()
    }
}

/// List every leaf and templated interior below `value`
pub fn selectable_paths(value: &Value) -> SelectablePaths {
    let mut paths = SelectablePaths::default();
    collect_paths(value, &mut Vec::new(), &mut paths);
    paths
}

fn collect_paths<'a>(value: &'a Value, prefix: &mut Vec<&'a str>, paths: &mut SelectablePaths) {
    let Value::Table(table) = value else {
        return;
    };

    for (key, child) in table.iter().filter(|(k, _)| is_enumerable(k)) {
        prefix.push(key);
        match Node::classify(child) {
            Node::Text(_) => paths.leaves.push(prefix.join(".")),
            node @ (Node::Templated { .. } | Node::Interior(_)) => {
                let has_children = !enumerable_keys(child).is_empty();
                let templated = matches!(node, Node::Templated { .. });
                if !has_children {
                    if templated {
                        paths.leaves.push(prefix.join("."));
                    }
                } else {
                    if templated {
                        paths.templated.push(prefix.join("."));
                    }
                    collect_paths(child, prefix, paths);
                }
            }
            Node::Other => {}
        }
        prefix.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::toml;

    fn value(table: Table) -> Value {
        Value::Table(table)
    }

    #[test]
    fn test_classify_nodes() {
        let data = value(toml! {
            plain = "text"
            count = 3

            [tmpl]
            _t = "templated"

            [inner]
            leaf = "x"
        });

        assert_eq!(Node::classify(&data["plain"]), Node::Text("text"));
        assert!(matches!(
            Node::classify(&data["tmpl"]),
            Node::Templated { text: "templated", .. }
        ));
        assert!(matches!(Node::classify(&data["inner"]), Node::Interior(_)));
        assert_eq!(Node::classify(&data["count"]), Node::Other);
    }

    #[test]
    fn test_non_string_text_field_is_interior() {
        let data = value(toml! {
            [odd]
            _t = 5
        });
        assert!(matches!(Node::classify(&data["odd"]), Node::Interior(_)));
    }

    #[test]
    fn test_atomic_leaves() {
        let data = value(toml! {
            [solo]
            _t = "solo"
            _v = { x = ["1"] }

            [parent]
            _t = "parent"
            child = "c"
        });

        assert!(Node::classify(&data["solo"]).is_atomic());
        assert!(!Node::classify(&data["parent"]).is_atomic());
        assert!(Node::classify(&data["parent"]["child"]).is_atomic());
    }

    #[test]
    fn test_enumerable_keys_skip_metadata() {
        let data = value(toml! {
            _v = { a = ["1"] }
            b = "B"
            c = "C"
        });
        assert_eq!(enumerable_keys(&data), vec!["b", "c"]);
        assert!(enumerable_keys(&data["b"]).is_empty());
    }

    #[test]
    fn test_selectable_paths_listing() {
        let data = value(toml! {
            top = "T"

            [hair]
            _t = "hair"
            long = "long hair"

            [hair.color]
            red = "red hair"

            [empty]

            [solo]
            _t = "solo"
        });

        let paths = selectable_paths(&data);
        assert_eq!(
            paths.leaves,
            vec!["top", "hair.long", "hair.color.red", "solo"]
        );
        assert_eq!(paths.templated, vec!["hair"]);
        assert_eq!(
            paths.all(),
            vec!["hair", "top", "hair.long", "hair.color.red", "solo"]
        );
    }

    #[test]
    fn test_chain_to_includes_templated_ancestors() {
        let paths = SelectablePaths {
            leaves: vec!["a.b.c".to_string(), "ab.x".to_string()],
            templated: vec!["a".to_string(), "a.b".to_string(), "ab".to_string()],
        };
        assert_eq!(paths.chain_to("a.b.c"), vec!["a", "a.b", "a.b.c"]);
        assert_eq!(paths.chain_to("ab.x"), vec!["ab", "ab.x"]);
    }
}

//! The guideline tree data type.
//!
//! A guideline document is a tree of string-keyed mappings whose leaves are
//! plain JSON values. JSON objects always become [`Node::Branch`]; everything
//! else (strings, numbers, booleans, null and arrays) is an atomic [`Node::Leaf`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An insertion-ordered mapping node.
pub type Tree = IndexMap<String, Node>;

/// A node of a guideline document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Nested mapping
    Branch(Tree),
    /// Any non-mapping value
    Leaf(Value),
}

impl Node {
    /// An empty mapping node
    pub fn empty_branch() -> Self {
        Node::Branch(Tree::new())
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Node::Branch(_))
    }

    pub fn as_branch(&self) -> Option<&Tree> {
        match self {
            Node::Branch(tree) => Some(tree),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_branch_mut(&mut self) -> Option<&mut Tree> {
        match self {
            Node::Branch(tree) => Some(tree),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Branch(_) => None,
        }
    }

    /// The string content of a string leaf
    pub fn as_str(&self) -> Option<&str> {
        self.as_leaf().and_then(Value::as_str)
    }

    /// The numeric content of a number leaf
    pub fn as_f64(&self) -> Option<f64> {
        self.as_leaf().and_then(Value::as_f64)
    }

    /// Textual form used when a node is substituted into a string.
    ///
    /// Strings are used verbatim; every other value uses its compact JSON form.
    pub fn to_property_string(&self) -> String {
        match self {
            Node::Leaf(Value::String(s)) => s.clone(),
            Node::Leaf(value) => value.to_string(),
            Node::Branch(_) => self.to_value().to_string(),
        }
    }

    /// Convert back into a plain JSON value
    pub fn to_value(&self) -> Value {
        match self {
            Node::Leaf(value) => value.clone(),
            Node::Branch(tree) => Value::Object(
                tree.iter()
                    .map(|(key, node)| (key.clone(), node.to_value()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Node::Branch(
                map.into_iter()
                    .map(|(key, value)| (key, Node::from(value)))
                    .collect(),
            ),
            other => Node::Leaf(other),
        }
    }
}

impl From<Tree> for Node {
    fn from(tree: Tree) -> Self {
        Node::Branch(tree)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Leaf(Value::String(s.to_string()))
    }
}

/// Build a [`Tree`] from a JSON value, treating non-objects as an empty tree.
pub fn tree_from_value(value: Value) -> Tree {
    match Node::from(value) {
        Node::Branch(tree) => tree,
        Node::Leaf(_) => Tree::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_objects_become_branches() {
        let node = Node::from(json!({"a": {"b": 1}, "c": [1, {"d": 2}]}));
        let tree = node.as_branch().unwrap();
        assert!(tree["a"].is_branch());
        // arrays are atomic even when they hold objects
        assert!(!tree["c"].is_branch());
    }

    #[test]
    fn test_to_value_preserves_order() {
        let value = json!({"z": 1, "a": {"y": true, "b": null}});
        let node = Node::from(value.clone());
        assert_eq!(node.to_value(), value);
        let keys: Vec<&String> = node.as_branch().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_property_string() {
        assert_eq!(Node::from(json!("km")).to_property_string(), "km");
        assert_eq!(Node::from(json!(28992)).to_property_string(), "28992");
        assert_eq!(Node::from(json!(0.5)).to_property_string(), "0.5");
        assert_eq!(Node::from(json!(true)).to_property_string(), "true");
        assert_eq!(Node::from(json!([1, 2])).to_property_string(), "[1,2]");
    }

    #[test]
    fn test_deserialize_untagged() {
        let node: Node = serde_json::from_str(r#"{"styles": {"cmap": "viridis"}, "n": 3}"#).unwrap();
        let tree = node.as_branch().unwrap();
        assert_eq!(tree["styles"].as_branch().unwrap()["cmap"].as_str(), Some("viridis"));
        assert_eq!(tree["n"].as_f64(), Some(3.0));
    }
}

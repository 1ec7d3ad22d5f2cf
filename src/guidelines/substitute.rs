//! Literal `@key` property substitution in string leaves.

use serde_json::Value;
use tracing::warn;

use super::node::{Node, Tree};
use super::PROJECT_KEY;

/// Replace every occurrence of `token` with `value` in all string leaves.
///
/// Mappings are descended recursively; arrays and other leaves are left
/// alone. A missing (or empty) token or a missing value makes this a no-op.
pub fn substitute(mut tree: Tree, token: Option<&str>, value: Option<&str>) -> Tree {
    let (Some(token), Some(value)) = (token, value) else {
        return tree;
    };
    if token.is_empty() {
        return tree;
    }

    substitute_in_place(&mut tree, token, value);
    tree
}

fn substitute_in_place(tree: &mut Tree, token: &str, value: &str) {
    for node in tree.values_mut() {
        match node {
            Node::Branch(child) => substitute_in_place(child, token, value),
            Node::Leaf(Value::String(s)) => {
                if s.contains(token) {
                    *s = s.replace(token, value);
                }
            }
            Node::Leaf(_) => {}
        }
    }
}

/// Substitute each `project` property into the whole document.
///
/// Properties are applied one after another in the order they appear in the
/// `project` mapping, so later passes see the output of earlier ones. A
/// property value that itself holds another property token is not expanded
/// recursively; it is reported with a warning instead.
pub fn substitute_properties(tree: Tree) -> Tree {
    let properties: Vec<(String, String)> = match tree.get(PROJECT_KEY).and_then(Node::as_branch) {
        Some(project) => project
            .iter()
            .map(|(key, value)| (key.clone(), value.to_property_string()))
            .collect(),
        None => return tree,
    };

    for (key, value) in &properties {
        for (other, _) in &properties {
            if value.contains(&format!("@{}", other)) {
                warn!(
                    property = %key,
                    token = %format!("@{}", other),
                    "Project property value contains another property token; it will not be expanded recursively"
                );
            }
        }
    }

    properties.iter().fold(tree, |tree, (key, value)| {
        let token = format!("@{}", key);
        substitute(tree, Some(token.as_str()), Some(value.as_str()))
    })
}

//! Resolution of `inherits` references between sibling nodes.

use tracing::debug;

use super::merge::merge;
use super::node::{Node, Tree};
use super::{DEFAULT_MAX_DEPTH, INHERITS_KEY};
use crate::error::{Result, ResplotError};

/// Resolve every `inherits` reference in `tree`, down to `max_depth` levels.
///
/// Children are resolved bottom-up. Once all children of a level are resolved,
/// each child carrying an `inherits` key is re-based on the named sibling: the
/// sibling's content is merged underneath the child's own content and the
/// result's keys are sorted. A sibling that inherits in turn is re-based first,
/// whatever its position in the document. The merge itself always combines
/// [`DEFAULT_MAX_DEPTH`] levels, independent of `max_depth`.
pub fn resolve_inheritance(tree: Tree, max_depth: usize) -> Result<Tree> {
    resolve_level(tree, max_depth)
}

fn resolve_level(tree: Tree, depth: usize) -> Result<Tree> {
    if depth == 0 {
        return Ok(tree);
    }

    let mut resolved = Tree::with_capacity(tree.len());
    for (key, node) in tree {
        let node = match node {
            Node::Branch(child) => Node::Branch(resolve_level(child, depth - 1)?),
            leaf => leaf,
        };
        resolved.insert(key, node);
    }

    let keys: Vec<String> = resolved.keys().cloned().collect();
    let mut chain = Vec::new();
    for key in &keys {
        rebase(&mut resolved, key, &keys, &mut chain)?;
    }

    Ok(resolved)
}

/// Re-base `key` on the sibling it inherits from, re-basing that sibling first.
///
/// `chain` holds the keys currently being re-based on this level.
fn rebase(level: &mut Tree, key: &str, keys: &[String], chain: &mut Vec<String>) -> Result<()> {
    let Some(raw_reference) = level
        .get(key)
        .and_then(Node::as_branch)
        .and_then(|child| child.get(INHERITS_KEY))
    else {
        return Ok(());
    };

    let reference = reference_name(key, raw_reference)?;
    let available: Vec<String> = keys.iter().filter(|k| *k != key).cloned().collect();
    if !available.contains(&reference) {
        return Err(ResplotError::UnresolvedInheritance {
            reference,
            key: key.to_string(),
            available,
        });
    }

    if chain.contains(&reference) {
        let mut cycle = chain.clone();
        cycle.push(key.to_string());
        cycle.push(reference);
        return Err(ResplotError::Config {
            message: format!("Inheritance cycle: {}", cycle.join(" -> ")),
        });
    }

    chain.push(key.to_string());
    rebase(level, &reference, keys, chain)?;
    chain.pop();

    debug!(key = %key, reference = %reference, "Applying inheritance");

    let base = level[reference.as_str()].clone();
    let Some(slot) = level.get_mut(key) else {
        return Ok(());
    };
    let mut own = std::mem::replace(slot, Node::empty_branch());
    if let Node::Branch(tree) = &mut own {
        tree.shift_remove(INHERITS_KEY);
    }
    let mut combined = merge(base, own, DEFAULT_MAX_DEPTH);
    if let Node::Branch(tree) = &mut combined {
        tree.sort_keys();
    }
    *slot = combined;

    Ok(())
}

/// Name of the sibling an `inherits` value points to, without its `@` prefix.
fn reference_name(key: &str, value: &Node) -> Result<String> {
    let raw = value.as_str().ok_or_else(|| ResplotError::Config {
        message: format!(
            "Inheritance reference in '{}' must be a string, found {}",
            key,
            value.to_property_string()
        ),
    })?;
    Ok(raw.strip_prefix('@').unwrap_or(raw).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidelines::node::tree_from_value;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn tree(value: Value) -> Tree {
        tree_from_value(value)
    }

    #[test]
    fn test_inherits_sibling() {
        let doc = tree(json!({
            "A": {"color": "red", "size": 1},
            "B": {"inherits": "@A", "size": 2}
        }));
        let resolved = resolve_inheritance(doc, DEFAULT_MAX_DEPTH).unwrap();
        let b = resolved["B"].as_branch().unwrap();
        assert_eq!(resolved["B"], Node::from(json!({"color": "red", "size": 2})));
        let keys: Vec<&String> = b.keys().collect();
        assert_eq!(keys, vec!["color", "size"]);
        // the referenced sibling is left untouched
        assert_eq!(resolved["A"], Node::from(json!({"color": "red", "size": 1})));
    }

    #[test]
    fn test_reference_without_prefix() {
        let doc = tree(json!({"A": {"x": 1}, "B": {"inherits": "A"}}));
        let resolved = resolve_inheritance(doc, DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(resolved["B"], Node::from(json!({"x": 1})));
    }

    #[test]
    fn test_self_reference_fails() {
        let doc = tree(json!({"A": {"inherits": "@A"}}));
        match resolve_inheritance(doc, DEFAULT_MAX_DEPTH) {
            Err(ResplotError::UnresolvedInheritance { reference, key, available }) => {
                assert_eq!(reference, "A");
                assert_eq!(key, "A");
                assert!(available.is_empty());
            }
            other => panic!("expected inheritance error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_sibling_fails() {
        let doc = tree(json!({"A": {"size": 1}, "B": {"inherits": "@Z"}}));
        match resolve_inheritance(doc, DEFAULT_MAX_DEPTH) {
            Err(ResplotError::UnresolvedInheritance { reference, key, available }) => {
                assert_eq!(reference, "Z");
                assert_eq!(key, "B");
                assert_eq!(available, vec!["A".to_string()]);
            }
            other => panic!("expected inheritance error, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_resolved_before_parent() {
        let doc = tree(json!({
            "styles": {
                "imshow": {
                    "default": {"cmap": "viridis", "interpolation": "nearest"},
                    "dark": {"inherits": "@default", "cmap": "magma"}
                },
                "pcolormesh": {
                    "inherits": "@imshow",
                    "default": {"shading": "auto"}
                }
            }
        }));
        let resolved = resolve_inheritance(doc, DEFAULT_MAX_DEPTH).unwrap();
        let styles = resolved["styles"].as_branch().unwrap();

        assert_eq!(
            styles["imshow"].as_branch().unwrap()["dark"],
            Node::from(json!({"cmap": "magma", "interpolation": "nearest"}))
        );
        // pcolormesh picks up the already-resolved imshow styles
        let pcolormesh = styles["pcolormesh"].as_branch().unwrap();
        assert_eq!(
            pcolormesh["default"],
            Node::from(json!({"cmap": "viridis", "interpolation": "nearest", "shading": "auto"}))
        );
        assert_eq!(
            pcolormesh["dark"],
            Node::from(json!({"cmap": "magma", "interpolation": "nearest"}))
        );
    }

    #[test]
    fn test_depth_limit_leaves_deep_references() {
        let doc = tree(json!({"a": {"b": {"X": {"k": 1}, "Y": {"inherits": "@X"}}}}));
        let resolved = resolve_inheritance(doc, 1).unwrap();
        let y = &resolved["a"].as_branch().unwrap()["b"].as_branch().unwrap()["Y"];
        assert_eq!(y, &Node::from(json!({"inherits": "@X"})));
    }

    #[test]
    fn test_non_string_reference_fails() {
        let doc = tree(json!({"A": {"k": 1}, "B": {"inherits": 3}}));
        assert!(matches!(
            resolve_inheritance(doc, DEFAULT_MAX_DEPTH),
            Err(ResplotError::Config { .. })
        ));
    }

    #[test]
    fn test_inherit_from_scalar_sibling_keeps_own_content() {
        let doc = tree(json!({"A": "plain", "B": {"inherits": "@A", "k": 1}}));
        let resolved = resolve_inheritance(doc, DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(resolved["B"], Node::from(json!({"k": 1})));
    }

    #[test]
    fn test_forward_chain_uses_resolved_sibling() {
        let doc = tree(json!({
            "C": {"inherits": "@B", "own": 3},
            "B": {"inherits": "@A", "x": 1},
            "A": {"y": 2}
        }));
        let resolved = resolve_inheritance(doc, DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(resolved["B"], Node::from(json!({"x": 1, "y": 2})));
        assert_eq!(resolved["C"], Node::from(json!({"own": 3, "x": 1, "y": 2})));
        let keys: Vec<&String> = resolved["C"].as_branch().unwrap().keys().collect();
        assert_eq!(keys, vec!["own", "x", "y"]);
    }

    #[test]
    fn test_cycle_fails() {
        let doc = tree(json!({
            "A": {"inherits": "@B", "a": 1},
            "B": {"inherits": "@A", "b": 2}
        }));
        match resolve_inheritance(doc, DEFAULT_MAX_DEPTH) {
            Err(ResplotError::Config { message }) => {
                assert!(message.contains("A -> B -> A"), "{message}");
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn test_inherited_merge_ignores_shallow_depth() {
        let doc = tree(json!({
            "A": {"k": {"a": 1, "b": 2}},
            "B": {"inherits": "@A", "k": {"a": 9}}
        }));
        let resolved = resolve_inheritance(doc, 1).unwrap();
        assert_eq!(resolved["B"], Node::from(json!({"k": {"a": 9, "b": 2}})));
    }
}

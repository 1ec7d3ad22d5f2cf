//! Recursive, depth-limited combination of two guideline documents.

use serde_json::Value;

use super::node::{Node, Tree};

/// Combine `a` and `b`, giving `b` priority at every level.
///
/// Once `max_depth` reaches zero, `b` replaces `a` wholesale. A mapping is
/// only ever replaced by another mapping: a scalar `b` on top of a mapping
/// `a` leaves `a` in place.
pub fn merge(a: Node, b: Node, max_depth: usize) -> Node {
    if max_depth == 0 {
        return b;
    }

    match (a, b) {
        (Node::Branch(a), Node::Branch(b)) => Node::Branch(merge_trees(a, b, max_depth)),
        (Node::Leaf(_), b) => b,
        (a @ Node::Branch(_), Node::Leaf(_)) => a,
    }
}

/// Combine two mappings. Keys of `a` come first, followed by keys only in `b`.
pub fn merge_trees(mut a: Tree, b: Tree, max_depth: usize) -> Tree {
    if max_depth == 0 {
        return b;
    }

    for (key, b_value) in b {
        match a.get_mut(&key) {
            Some(slot) => {
                let a_value = std::mem::replace(slot, Node::Leaf(Value::Null));
                *slot = merge(a_value, b_value, max_depth - 1);
            }
            None => {
                a.insert(key, b_value);
            }
        }
    }

    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidelines::DEFAULT_MAX_DEPTH;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn node(value: Value) -> Node {
        Node::from(value)
    }

    #[test]
    fn test_merge_identity() {
        let doc = node(json!({
            "styles": {"imshow": {"default": {"cmap": "viridis", "alpha": 1.0}}},
            "project": {"crs": "EPSG:28992"}
        }));
        for depth in 0..6 {
            assert_eq!(merge(doc.clone(), doc.clone(), depth), doc);
        }
    }

    #[test]
    fn test_scalar_override() {
        for depth in 0..5 {
            assert_eq!(merge(node(json!(1)), node(json!("two")), depth), node(json!("two")));
        }
    }

    #[test]
    fn test_depth_cutoff_replaces_subtree() {
        let a = node(json!({"x": {"y": 1}}));
        let b = node(json!({"x": {"y": 2}}));
        assert_eq!(merge(a.clone(), b.clone(), 0), node(json!({"x": {"y": 2}})));

        // at depth one the top level is combined but "x" is taken from b as a whole
        let a = node(json!({"x": {"y": 1, "z": 3}}));
        assert_eq!(merge(a, b, 1), node(json!({"x": {"y": 2}})));
    }

    #[test]
    fn test_mapping_beats_scalar() {
        let mapping = node(json!({"k": 1}));
        let scalar = node(json!("flat"));
        assert_eq!(merge(scalar.clone(), mapping.clone(), 3), mapping);
        assert_eq!(merge(mapping.clone(), scalar, 3), mapping);
    }

    #[test]
    fn test_key_order_and_union() {
        let a = node(json!({"b": 1, "a": {"x": 1}}));
        let b = node(json!({"c": 3, "a": {"y": 2}, "b": 5}));
        let merged = merge(a, b, DEFAULT_MAX_DEPTH);
        assert_eq!(merged, node(json!({"b": 5, "a": {"x": 1, "y": 2}, "c": 3})));
        let keys: Vec<&String> = merged.as_branch().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_default_depth_stops_at_fifth_level() {
        let a = node(json!({"l1": {"l2": {"l3": {"l4": {"l5": 1, "keep": 0}}}}}));
        let b = node(json!({"l1": {"l2": {"l3": {"l4": {"l5": 2}}}}}));
        // four levels are combined; the fifth-level mapping is replaced
        let merged = merge(a, b, DEFAULT_MAX_DEPTH);
        assert_eq!(merged, node(json!({"l1": {"l2": {"l3": {"l4": {"l5": 2}}}}})));
    }
}

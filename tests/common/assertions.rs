//! Assertion utilities for testing.

use resplot::Guidelines;

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that no `inherits` key survives anywhere in a resolved document
pub fn assert_no_inherits(guidelines: &Guidelines) {
    fn walk(tree: &resplot::Tree, path: &mut Vec<String>) {
        for (key, node) in tree {
            assert_ne!(
                key,
                "inherits",
                "unresolved inheritance at {}",
                path.join(".")
            );
            if let Some(child) = node.as_branch() {
                path.push(key.clone());
                walk(child, path);
                path.pop();
            }
        }
    }

    walk(guidelines.tree(), &mut Vec::new());
}

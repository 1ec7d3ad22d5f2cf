//! Guideline documents written to temporary files.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A project document overriding imshow and adding a project-only style
pub const PROJECT_GUIDELINES: &str = r#"{
    "metadata": {"name": "north sea model"},
    "project": {"crs": "EPSG:32631", "rescale_unit": "km", "model": "dcsm"},
    "styles": {
        "imshow": {
            "default": {"cmap": "plasma", "alpha": 0.5},
            "water_level": {"inherits": "@default", "cmap": "cmo.balance", "title": "@model water level"}
        }
    },
    "extents": {
        "north_sea": {"xlim": [300000, 700000], "ylim": [5600000, 6300000]}
    }
}"#;

/// A document with an `inherits` reference to a missing sibling
pub const BROKEN_INHERITANCE: &str = r#"{
    "project": {"rescale_unit": "km"},
    "styles": {"contour": {"thin": {"inherits": "@hairline"}}}
}"#;

/// Write `content` to `name` inside a fresh temporary directory
pub fn write_guidelines(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write guidelines");
    (dir, path)
}

//! # resplot
//!
//! Layered plotting guidelines for geospatial figures.
//!
//! Plotting functions take their keyword arguments from a guideline document:
//! a JSON tree of named styles per function, named extents and project
//! properties. A shipped default document is combined with an optional
//! project document, then resolved once.
//!
//! ## Key Features
//!
//! - **Layered documents**: project guidelines override defaults at any depth
//! - **Inheritance**: a style can re-base itself on a sibling with `"inherits": "@name"`
//! - **Project properties**: `@key` tokens in strings are filled from the `project` mapping
//! - **Rescaling**: unit abbreviations and scale factors for plot coordinates
//!
//! ## Example
//!
//! ```
//! use resplot::{Guidelines, Node};
//! use serde_json::json;
//!
//! let default = Guidelines::from_value(json!({
//!     "project": {"unit": "km"},
//!     "styles": {"imshow": {
//!         "default": {"cmap": "viridis", "label": "[@unit]"},
//!         "dark": {"inherits": "@default", "cmap": "magma"}
//!     }}
//! })).unwrap();
//! let project = Guidelines::from_value(json!({
//!     "styles": {"imshow": {"default": {"alpha": 0.5}}}
//! })).unwrap();
//!
//! let resolved = Guidelines::combine(default, project).finalize().unwrap();
//! assert_eq!(
//!     resolved.get(&["styles", "imshow", "dark"]).unwrap(),
//!     &Node::from(json!({"alpha": 0.5, "cmap": "magma", "label": "[km]"}))
//! );
//! ```

pub mod config;
pub mod error;
pub mod guidelines;
pub mod logging;
pub mod mapview;
pub mod plotter;
pub mod rescale;

pub use config::Config;
pub use error::{Result, ResplotError};
pub use guidelines::{GuidelineOptions, Guidelines, Node, Tree};
pub use logging::{
    init_tracing, log_error, log_guideline_stats, log_operation_end, log_operation_start,
};
pub use plotter::{PlotKwargs, PlotRequest, Resplot};

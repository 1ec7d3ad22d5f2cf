//! The plot configuration owned by an application.
//!
//! [`Resplot`] combines the shipped default guidelines with an optional
//! project document, resolves them once, and then answers keyword-argument
//! queries for plotting functions. Construct one explicitly at startup and
//! keep it for as long as plots are made; it is never shared mutably.

use serde_json::Value;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::{Result, ResplotError};
use crate::guidelines::{
    merge_trees, GuidelineOptions, Guidelines, Node, Tree, EXTENTS_KEY, PROJECT_KEY, STYLES_KEY,
};
use crate::logging::{log_guideline_stats, log_operation_end, log_operation_start};
use crate::rescale::{rescale_parameters_for, CrsDescription, RescaleParameters};

/// The default guideline document shipped with the crate
pub const DEFAULT_GUIDELINES_JSON: &str = include_str!("../guidelines/default_guidelines.json");

/// `metadata.file_path` recorded for the shipped default document
pub const BUILTIN_SOURCE: &str = "<builtin>";

/// Style applied when none is requested
pub const DEFAULT_STYLE: &str = "default";

/// Style name that skips style guidelines altogether
pub const NO_STYLE: &str = "none";

/// Functions that fall back to the project CRS when none is given
const CRS_DEFAULTING_FUNCTIONS: &[&str] = &["basemap"];

/// Prefix of interactive-map functions, which ignore extents
const EXPLORE_PREFIX: &str = "explore_";

/// Parse the shipped default document
pub fn builtin_default_guidelines() -> Result<Guidelines> {
    let mut guidelines = Guidelines::from_json_str(DEFAULT_GUIDELINES_JSON)?;
    guidelines.set_file_path(BUILTIN_SOURCE);
    Ok(guidelines)
}

/// A request for the keyword arguments of one plotting call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotRequest {
    /// Named style; `None` means `"default"`, `"none"` skips styles
    pub style: Option<String>,
    /// Named extent to apply
    pub extent: Option<String>,
    /// Rescale unit; `None` falls back to `project.rescale_unit`
    pub rescale_unit: Option<String>,
    /// Explicit CRS for functions that need one
    pub crs: Option<String>,
    /// Caller-supplied keyword arguments, which win over guidelines
    pub kwargs: Tree,
}

impl PlotRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn extent(mut self, extent: impl Into<String>) -> Self {
        self.extent = Some(extent.into());
        self
    }

    pub fn rescale_unit(mut self, unit: impl Into<String>) -> Self {
        self.rescale_unit = Some(unit.into());
        self
    }

    pub fn crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = Some(crs.into());
        self
    }

    pub fn kwarg(mut self, key: impl Into<String>, value: Value) -> Self {
        self.kwargs.insert(key.into(), Node::from(value));
        self
    }
}

/// Resolved keyword arguments for one plotting call
#[derive(Debug, Clone, PartialEq)]
pub struct PlotKwargs {
    /// Guideline kwargs with caller kwargs layered on top
    pub kwargs: Tree,
    /// Unit coordinates should be rescaled to
    pub rescale_unit: Option<String>,
    /// CRS for the call, if any
    pub crs: Option<String>,
}

/// Plotting configuration: default, project and effective guidelines
#[derive(Debug, Clone)]
pub struct Resplot {
    default_guidelines: Guidelines,
    project_guidelines: Guidelines,
    guidelines: Guidelines,
    options: GuidelineOptions,
}

impl Resplot {
    /// Build from the shipped defaults and an optional project file
    pub fn new(project_path: Option<&Path>) -> Result<Self> {
        Self::with_options(None, project_path, GuidelineOptions::default())
    }

    /// Build from an optional replacement default file and an optional project file
    pub fn with_options(
        default_path: Option<&Path>,
        project_path: Option<&Path>,
        options: GuidelineOptions,
    ) -> Result<Self> {
        let default_guidelines = match default_path {
            Some(path) => Guidelines::load(path)?,
            None => builtin_default_guidelines()?,
        };

        let project_guidelines = match project_path {
            Some(path) => Guidelines::load(path)?,
            None => Guidelines::default(),
        };

        Self::from_guidelines(default_guidelines, project_guidelines, options)
    }

    /// Build from documents already in memory
    pub fn from_guidelines(
        default_guidelines: Guidelines,
        project_guidelines: Guidelines,
        options: GuidelineOptions,
    ) -> Result<Self> {
        let start = Instant::now();
        let source = project_guidelines
            .get(&["metadata", "file_path"])
            .or_else(|_| default_guidelines.get(&["metadata", "file_path"]))
            .ok()
            .and_then(Node::as_str)
            .unwrap_or(BUILTIN_SOURCE)
            .to_string();
        log_operation_start("set_guidelines", &source);

        let outcome = Guidelines::combine_with(
            default_guidelines.clone(),
            project_guidelines.clone(),
            options,
        )
        .finalize_with(options);
        log_operation_end("set_guidelines", start, &outcome);
        let guidelines = outcome?;

        let keys: Vec<&str> = guidelines.tree().keys().map(String::as_str).collect();
        let style_functions = guidelines
            .get_tree(&[STYLES_KEY])
            .map(|styles| styles.len())
            .unwrap_or(0);
        log_guideline_stats(&source, &keys, style_functions);

        Ok(Self {
            default_guidelines,
            project_guidelines,
            guidelines,
            options,
        })
    }

    /// Replace the project document and re-resolve
    pub fn set_guidelines(&mut self, project_path: Option<&Path>) -> Result<()> {
        let project_guidelines = match project_path {
            Some(path) => Guidelines::load(path)?,
            None => Guidelines::default(),
        };

        *self = Self::from_guidelines(
            self.default_guidelines.clone(),
            project_guidelines,
            self.options,
        )?;
        Ok(())
    }

    /// The effective, resolved guidelines
    pub fn guidelines(&self) -> &Guidelines {
        &self.guidelines
    }

    pub fn default_guidelines(&self) -> &Guidelines {
        &self.default_guidelines
    }

    pub fn project_guidelines(&self) -> &Guidelines {
        &self.project_guidelines
    }

    pub fn options(&self) -> GuidelineOptions {
        self.options
    }

    /// A property from the `project` mapping
    pub fn project_property(&self, name: &str) -> Result<&Node> {
        self.guidelines.get(&[PROJECT_KEY, name])
    }

    /// Keyword arguments of a named style for a plotting function
    pub fn style_kwargs(&self, function: &str, style: &str) -> Result<&Tree> {
        let styles = self.guidelines.get_tree(&[STYLES_KEY])?;
        let function_styles = styles
            .get(function)
            .ok_or_else(|| ResplotError::key_not_found("Function", function, styles.keys()))?
            .as_branch()
            .ok_or_else(|| ResplotError::Config {
                message: format!("Styles of function '{}' must be a mapping", function),
            })?;

        function_styles
            .get(style)
            .ok_or_else(|| {
                ResplotError::key_not_found(
                    &format!("Style for function '{}':", function),
                    style,
                    function_styles.keys(),
                )
            })?
            .as_branch()
            .ok_or_else(|| ResplotError::Config {
                message: format!("Style '{}' of function '{}' must be a mapping", style, function),
            })
    }

    /// Keyword arguments of a named extent
    pub fn extent_kwargs(&self, extent: &str) -> Result<&Tree> {
        let extents = self.guidelines.get_tree(&[EXTENTS_KEY])?;
        extents
            .get(extent)
            .ok_or_else(|| ResplotError::key_not_found("Extent", extent, extents.keys()))?
            .as_branch()
            .ok_or_else(|| ResplotError::Config {
                message: format!("Extent '{}' must be a mapping", extent),
            })
    }

    /// Combine guideline and caller keyword arguments for one plotting call.
    ///
    /// Caller kwargs set to `null` are dropped first. Style kwargs sit below the
    /// caller's, and extent kwargs below both. Interactive `explore_*`
    /// functions never take an extent.
    pub fn plot_kwargs(&self, function: &str, request: &PlotRequest) -> Result<PlotKwargs> {
        let mut kwargs: Tree = request
            .kwargs
            .iter()
            .filter(|(_, value)| !matches!(value, Node::Leaf(Value::Null)))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let style = request.style.as_deref().unwrap_or(DEFAULT_STYLE);
        if style != NO_STYLE {
            let style_kwargs = self.style_kwargs(function, style)?;
            kwargs = merge_trees(style_kwargs.clone(), kwargs, self.options.max_depth);
        }

        if let Some(extent) = request.extent.as_deref() {
            if !function.starts_with(EXPLORE_PREFIX) {
                let extent_kwargs = self.extent_kwargs(extent)?;
                kwargs = merge_trees(extent_kwargs.clone(), kwargs, self.options.max_depth);
            }
        }

        let rescale_unit = match &request.rescale_unit {
            Some(unit) => Some(unit.clone()),
            None => Some(self.project_property("rescale_unit")?.to_property_string()),
        };

        let crs = match &request.crs {
            Some(crs) => Some(crs.clone()),
            None if CRS_DEFAULTING_FUNCTIONS.contains(&function) => {
                Some(self.project_property("crs")?.to_property_string())
            }
            None => None,
        };

        debug!(
            function = function,
            style = style,
            kwarg_count = kwargs.len(),
            "Resolved plot kwargs"
        );

        Ok(PlotKwargs {
            kwargs,
            rescale_unit,
            crs,
        })
    }

    /// Rescale parameters for data in `crs`, defaulting to the project rescale unit
    pub fn rescale_parameters(
        &self,
        crs: Option<&CrsDescription>,
        rescale_unit: Option<&str>,
    ) -> Result<RescaleParameters> {
        let project_unit = match rescale_unit {
            Some(_) => None,
            None => self
                .project_property("rescale_unit")
                .ok()
                .map(Node::to_property_string),
        };
        let params = rescale_parameters_for(crs, rescale_unit.or(project_unit.as_deref()))?;
        info!(
            unit = params.unit.as_deref().unwrap_or("-"),
            factor = params.factor,
            "Rescale parameters"
        );
        Ok(params)
    }
}

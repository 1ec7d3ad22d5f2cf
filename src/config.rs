//! Configuration management for the resplot command-line tool.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ResplotError};
use crate::guidelines::{GuidelineOptions, DEFAULT_MAX_DEPTH};

/// Command-line arguments for resplot
#[derive(Parser, Debug, Default)]
#[command(name = "resplot")]
#[command(author, version, about = "Resolve and inspect plotting guidelines", long_about = None)]
pub struct Args {
    /// Path to the project guidelines JSON file
    pub guidelines: Option<PathBuf>,

    /// Replacement for the built-in default guidelines
    #[arg(short = 'd', long = "default", env = "RESPLOT_DEFAULT_GUIDELINES")]
    pub default_guidelines: Option<PathBuf>,

    /// Maximum merge and inheritance depth
    #[arg(long, env = "RESPLOT_MAX_DEPTH")]
    pub max_depth: Option<usize>,

    /// Output format for the resolved guidelines
    #[arg(short, long, env = "RESPLOT_FORMAT", value_enum)]
    pub format: Option<OutputFormat>,

    /// Print the resolved kwargs of this plotting function instead of the whole document
    #[arg(long)]
    pub function: Option<String>,

    /// Style to resolve together with --function
    #[arg(long, requires = "function")]
    pub style: Option<String>,

    /// Extent to resolve together with --function
    #[arg(long, requires = "function")]
    pub extent: Option<String>,

    /// Print map center and zoom for "min_x,min_y,max_x,max_y"
    #[arg(long)]
    pub bounds: Option<String>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "RESPLOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RESPLOT_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// How the resolved document is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Collapsible HTML tree
    Html,
    /// Indented text outline
    Tree,
}

/// Guideline file locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuidelineFiles {
    /// Replacement default document (None = built-in)
    #[serde(default)]
    pub default_file: Option<PathBuf>,

    /// Project document layered over the defaults
    #[serde(default)]
    pub project_file: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Render HTML sections expanded
    #[serde(default = "default_open")]
    pub open: bool,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub guidelines: GuidelineFiles,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// What a single invocation asks for, beyond printing the document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub function: Option<String>,
    pub style: Option<String>,
    pub extent: Option<String>,
    pub bounds: Option<String>,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, Query)> {
        Self::from_args(Args::parse())
    }

    /// Resolve configuration from already-parsed arguments
    pub fn from_args(args: Args) -> Result<(Self, Query)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            config = Self::load_from_file(config_path)?;
        }

        // Override with command-line arguments and environment
        if args.guidelines.is_some() {
            config.guidelines.project_file = args.guidelines;
        }
        if args.default_guidelines.is_some() {
            config.guidelines.default_file = args.default_guidelines;
        }
        if let Some(max_depth) = args.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(format) = args.format {
            config.output.format = format;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        let query = Query {
            function: args.function,
            style: args.style,
            extent: args.extent,
            bounds: args.bounds,
        };

        Ok((config, query))
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Options for combining and resolving guidelines
    pub fn guideline_options(&self) -> GuidelineOptions {
        GuidelineOptions {
            max_depth: self.max_depth,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(ResplotError::Config {
                message: "max_depth must be at least 1".to_string(),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ResplotError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        for path in [&self.guidelines.default_file, &self.guidelines.project_file]
            .into_iter()
            .flatten()
        {
            if !path.is_file() {
                return Err(ResplotError::Config {
                    message: format!("Guidelines file not found: {}", path.display()),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            guidelines: GuidelineFiles::default(),
            max_depth: default_max_depth(),
            output: OutputConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            open: default_open(),
        }
    }
}

// Default value functions for serde
fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_open() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

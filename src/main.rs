//! resplot - resolve and inspect plotting guidelines
//!
//! This is the command-line entry point. It resolves the default and project
//! guidelines and prints either the whole effective document, the kwargs of a
//! single plotting function, or a map view for given bounds.

use serde_json::json;
use tracing::{error, info};

use resplot::config::{OutputFormat, Query};
use resplot::guidelines::Node;
use resplot::mapview::Bounds;
use resplot::plotter::PlotRequest;
use resplot::{init_tracing, log_error, Config, Resplot, Result};

fn main() -> Result<()> {
    // Load configuration before logging so the configured level applies
    let (config, query) = Config::load()?;

    init_tracing(&config.log_level)?;
    info!("Starting resplot v{}", env!("CARGO_PKG_VERSION"));

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let resplot = Resplot::with_options(
        config.guidelines.default_file.as_deref(),
        config.guidelines.project_file.as_deref(),
        config.guideline_options(),
    )
    .map_err(|e| {
        log_error(&e, "resolving guidelines");
        e
    })?;

    let output = render(&config, &query, &resplot).map_err(|e| {
        log_error(&e, "rendering output");
        e
    })?;
    println!("{}", output);

    Ok(())
}

fn render(config: &Config, query: &Query, resplot: &Resplot) -> Result<String> {
    if let Some(bounds) = &query.bounds {
        let bounds = Bounds::parse(bounds)?;
        let (lat, lon) = bounds.center();
        let view = json!({"center": [lat, lon], "zoom": bounds.zoom()});
        return Ok(serde_json::to_string_pretty(&view)?);
    }

    if let Some(function) = &query.function {
        let request = PlotRequest {
            style: query.style.clone(),
            extent: query.extent.clone(),
            ..PlotRequest::default()
        };
        let resolved = resplot.plot_kwargs(function, &request)?;
        let view = json!({
            "function": function,
            "kwargs": Node::Branch(resolved.kwargs).to_value(),
            "rescale_unit": resolved.rescale_unit,
            "crs": resolved.crs,
        });
        return Ok(serde_json::to_string_pretty(&view)?);
    }

    let guidelines = resplot.guidelines();
    match config.output.format {
        OutputFormat::Json => guidelines.to_json_pretty(),
        OutputFormat::Html => Ok(guidelines.to_html(config.output.open)),
        OutputFormat::Tree => Ok(guidelines.to_text_tree()),
    }
}

use framelab_core::{AnnotatorConfig, FrameStyle};
use framelab_processing::OverlaySpec;

/// Split a `LABEL=VALUE` argument into its parts.
pub fn parse_field(raw: &str) -> Result<(&str, &str), String> {
    match raw.split_once('=') {
        Some((label, value)) if !label.trim().is_empty() => Ok((label.trim(), value.trim())),
        _ => Err(format!("invalid field: {} (expected LABEL=VALUE)", raw)),
    }
}

/// Pick the overlay mode for a compose invocation.
///
/// Flags passed on the command line take precedence: `--style`, then
/// `--frame`, then `--logo`. Assets configured through the environment
/// only select a mode when no overlay flag was given at all.
pub fn select_overlay(
    style: Option<FrameStyle>,
    frame_flag: bool,
    logo_flag: bool,
    config: &AnnotatorConfig,
) -> OverlaySpec {
    if let Some(style) = style {
        OverlaySpec::Style(style)
    } else if frame_flag {
        OverlaySpec::FullBleed
    } else if logo_flag {
        OverlaySpec::BottomBand
    } else if config.frame_asset_path.is_some() {
        OverlaySpec::FullBleed
    } else if config.logo_asset_path.is_some() {
        OverlaySpec::BottomBand
    } else {
        OverlaySpec::None
    }
}


/// Initialize tracing for the CLI binary.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

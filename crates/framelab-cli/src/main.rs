//! Framelab CLI for framing and annotating product images.
//!
//! Overlay assets and the font can be set via FRAMELAB_FRAME_ASSET,
//! FRAMELAB_LOGO_ASSET, and FRAMELAB_FONT, or per-invocation flags.

use anyhow::Context;
use clap::{Parser, Subcommand};
use framelab_cli::{init_tracing, parse_field, select_overlay};
use framelab_core::{AnnotateError, AnnotationFields, AnnotatorConfig, FrameStyle};
use framelab_processing::Annotator;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "framelab", about = "Image framing and annotation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a framed, annotated image and write it as PNG
    Compose {
        /// Path to the source image (JPEG or PNG)
        input: PathBuf,
        /// Border frame style: classic, modern, or vintage
        #[arg(long, conflicts_with_all = ["frame", "logo"])]
        style: Option<FrameStyle>,
        /// Full-bleed frame asset (PNG with alpha)
        #[arg(long, conflicts_with = "logo")]
        frame: Option<PathBuf>,
        /// Bottom-band logo asset (PNG with alpha)
        #[arg(long)]
        logo: Option<PathBuf>,
        /// Annotation field, repeatable (e.g. --field "Price=1200")
        #[arg(long = "field", value_name = "LABEL=VALUE")]
        fields: Vec<String>,
        /// Output path; defaults to the suggested download filename
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print source image metadata as JSON
    Inspect {
        /// Path to the image to inspect
        input: PathBuf,
    },
}

fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(err) = run() {
        match err.downcast_ref::<AnnotateError>() {
            Some(e) => {
                tracing::error!(code = e.error_code(), error = %e, "Composition failed");
                eprintln!("{}", e.client_message());
            }
            None => eprintln!("{err:#}"),
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compose {
            input,
            style,
            frame,
            logo,
            fields,
            out,
        } => {
            let frame_flag = frame.is_some();
            let logo_flag = logo.is_some();

            let mut config = AnnotatorConfig::from_env();
            if let Some(path) = frame {
                config.frame_asset_path = Some(path);
            }
            if let Some(path) = logo {
                config.logo_asset_path = Some(path);
            }

            let overlay = select_overlay(style, frame_flag, logo_flag, &config);

            let mut annotation = AnnotationFields::new();
            for raw in &fields {
                let (label, value) = parse_field(raw).map_err(|e| anyhow::anyhow!(e))?;
                annotation.push(label, value);
            }

            let data = std::fs::read(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;

            let annotator = Annotator::new(config)?;
            let composed = annotator.compose(&data, overlay, &annotation)?;

            let out_path = out.unwrap_or_else(|| PathBuf::from(composed.suggested_filename()));
            std::fs::write(&out_path, &composed.png)
                .with_context(|| format!("failed to write {}", out_path.display()))?;

            println!(
                "{} ({}x{})",
                out_path.display(),
                composed.width,
                composed.height
            );
        }
        Commands::Inspect { input } => {
            let data = std::fs::read(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let annotator = Annotator::new(AnnotatorConfig::from_env())?;
            let metadata = annotator.inspect(&data)?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
    }

    Ok(())
}

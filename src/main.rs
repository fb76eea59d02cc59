//! # Posterforge CLI
//!
//! Command-line interface for rendering posters from template files.
//!
//! ## Usage
//!
//! ```bash
//! # Render a personalized poster
//! posterforge render --template offer.json --customer acme.json --out acme.png
//!
//! # Render the design-time preview (literal sample text, capped width)
//! posterforge preview --template offer.json --out preview.png
//!
//! # Tighten the image-load deadline for flaky hosts
//! posterforge render --template offer.json --customer acme.json --out acme.png --timeout 3
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use posterforge::{
    render::{render, render_preview, RenderContext},
    PosterError, PosterTemplate,
};

/// Posterforge - poster template rendering utility
#[derive(Parser, Debug)]
#[command(name = "posterforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a personalized poster for one customer
    Render {
        /// Template JSON file (native-space placeholders)
        #[arg(long)]
        template: PathBuf,

        /// Customer field map JSON file ({"companyName": "Acme", ...})
        #[arg(long)]
        customer: PathBuf,

        /// Output PNG path
        #[arg(long)]
        out: PathBuf,

        /// Image load deadline in seconds
        #[arg(long, default_value = "10")]
        timeout: u64,
    },
    /// Render the editor preview of a template
    Preview {
        /// Template JSON file
        #[arg(long)]
        template: PathBuf,

        /// Output PNG path
        #[arg(long)]
        out: PathBuf,

        /// Preview width cap in pixels
        #[arg(long, default_value = "400")]
        max_width: u32,

        /// Image load deadline in seconds
        #[arg(long, default_value = "10")]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), PosterError> {
    match cli.command {
        Commands::Render {
            template,
            customer,
            out,
            timeout,
        } => {
            let template = load_template(&template)?;
            let fields: HashMap<String, String> =
                serde_json::from_str(&std::fs::read_to_string(customer)?)?;
            let ctx = RenderContext::new()?.with_timeout(Duration::from_secs(timeout));

            let outcome = render(&ctx, &template, &fields).await?;
            report_warnings(&outcome.warnings);
            outcome.image.save(&out)?;
            println!("Wrote {}", out.display());
        }
        Commands::Preview {
            template,
            out,
            max_width,
            timeout,
        } => {
            let template = load_template(&template)?;
            let ctx = RenderContext::new()?.with_timeout(Duration::from_secs(timeout));

            let outcome = render_preview(&ctx, &template, Some(max_width)).await?;
            report_warnings(&outcome.warnings);
            outcome.image.save(&out)?;
            println!("Wrote {}", out.display());
        }
    }
    Ok(())
}

fn load_template(path: &PathBuf) -> Result<PosterTemplate, PosterError> {
    Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
}

fn report_warnings(warnings: &[posterforge::render::RenderWarning]) {
    for warning in warnings {
        eprintln!("warning: placeholder '{}': {}", warning.key, warning.message);
    }
}

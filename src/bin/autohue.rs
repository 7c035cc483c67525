use anyhow::{Context, Result};
use autohue::extract::GradientDirection;
use autohue::{Options, RegionThresholds, Threshold, extract_palette_path};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Extract primary, secondary and edge colors from images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON options file, e.g. {"maxSize": 100, "threshold": {"primary": 8}}
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Longest side after downsampling
    #[arg(short = 's', long)]
    max_size: Option<u32>,

    /// Lab distance threshold for every region
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Threshold override for the whole-image pass
    #[arg(long)]
    primary: Option<f64>,

    /// Threshold override for the top band
    #[arg(long)]
    top: Option<f64>,

    /// Threshold override for the right band
    #[arg(long)]
    right: Option<f64>,

    /// Threshold override for the bottom band
    #[arg(long)]
    bottom: Option<f64>,

    /// Threshold override for the left band
    #[arg(long)]
    left: Option<f64>,

    /// Edge band width in pixels
    #[arg(short, long)]
    margin: Option<u32>,

    /// Print results as JSON
    #[arg(long, conflicts_with = "css")]
    json: bool,

    /// Print a CSS linear-gradient built from the edge colors
    #[arg(long, value_enum)]
    css: Option<GradientDirection>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn options(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => Options::default(),
        };

        if let Some(max_size) = self.max_size {
            options.max_size = max_size;
        }
        if let Some(margin) = self.margin {
            options.margin = margin;
        }
        if let Some(t) = self.threshold {
            options.threshold = Threshold::Uniform(t);
        }

        let overrides = [self.primary, self.top, self.right, self.bottom, self.left];
        if overrides.iter().any(Option::is_some) {
            let mut per_region = match options.threshold {
                Threshold::Uniform(t) => RegionThresholds {
                    primary: Some(t),
                    top: Some(t),
                    right: Some(t),
                    bottom: Some(t),
                    left: Some(t),
                },
                Threshold::PerRegion(t) => t,
            };
            let slots = [
                &mut per_region.primary,
                &mut per_region.top,
                &mut per_region.right,
                &mut per_region.bottom,
                &mut per_region.left,
            ];
            for (slot, value) in slots.into_iter().zip(overrides) {
                if value.is_some() {
                    *slot = value;
                }
            }
            options.threshold = Threshold::PerRegion(per_region);
        }

        Ok(options)
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let options = args.options()?;
    tracing::debug!(?options, "resolved options");

    let mut results = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let palette = extract_palette_path(input, &options)
            .with_context(|| format!("extracting palette from {}", input.display()))?;

        if args.json {
            results.push(serde_json::json!({
                "path": input.display().to_string(),
                "palette": palette,
            }));
        } else if let Some(direction) = args.css {
            println!("{}: {}", input.display(), palette.css_gradient(direction));
        } else {
            let bg = &palette.background_color;
            println!("{}", input.display());
            println!("  primary    {}", palette.primary_color);
            println!("  secondary  {}", palette.secondary_color);
            println!(
                "  edges      top {}  right {}  bottom {}  left {}",
                bg.top, bg.right, bg.bottom, bg.left
            );
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}

use clap::{Parser, Subcommand};
use hotel_carousel::{config, output, scan, simulate};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "hotel-carousel")]
#[command(about = "Headless lightbox and hero slideshow for hotel sites")]
#[command(long_about = "\
Headless lightbox and hero slideshow for hotel sites

Your filesystem is the data source. Hero slides and gallery photos are
ordered by numeric prefix, gallery subdirectories become filter categories,
and sidecar .txt files provide captions.

Content structure:

  site/
  ├── carousel.toml                # Carousel config (optional)
  ├── hero/                        # Hero slideshow
  │   ├── 010-Lobby-at-Dusk.jpg    # Alt text \"Lobby at Dusk\"
  │   └── 020-Rooftop-Pool.jpg
  └── gallery/                     # Lightbox gallery
      ├── 900-Map.png              # Uncategorized (shown under \"all\")
      ├── 010-rooms/               # Category \"rooms\"
      │   ├── 001-Deluxe-King.jpg
      │   └── 001-Deluxe-King.txt  # Caption sidecar
      └── 020-dining/
          └── 001-Terrace.jpg

Run 'hotel-carousel simulate' with a script of events (open 2, next,
key Escape, swipe 200 100 140 90, tick 5000, ...) to replay a visit
against the scanned site.

Run 'hotel-carousel gen-config' to generate a documented carousel.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site content directory
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Log library events to stderr (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the site directory and list slides, photos and categories
    Scan {
        /// Print the manifest as JSON instead of the listing
        #[arg(long)]
        json: bool,
    },
    /// Validate the site directory and config
    Check,
    /// Replay an event script against the scanned site
    Simulate {
        /// Script file; reads stdin when omitted or "-"
        #[arg(long)]
        script: Option<PathBuf>,
    },
    /// Print a stock carousel.toml with all options documented
    GenConfig,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_script(path: Option<&PathBuf>) -> std::io::Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan { json } => {
            let manifest = scan::scan(&cli.source)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                output::print_scan_output(&manifest, &cli.source);
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            println!("{}", output::format_check_output(&manifest));
        }
        Command::Simulate { script } => {
            let text = read_script(script.as_ref()).map_err(simulate::SimulateError::from)?;
            let simulation = simulate::simulate(&cli.source, &text)?;
            output::print_simulation(&simulation);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

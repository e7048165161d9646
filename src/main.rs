use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sitegen::Config;

#[derive(Parser)]
#[command(name = "sitegen", version)]
#[command(about = "Render a tree of Markdown pages into a static HTML site")]
struct Cli {
    /// Prefix for root-relative links and assets (overrides site.base_path)
    base_path: Option<String>,

    /// Config file; defaults are used when it does not exist
    #[arg(short, long, default_value = "sitegen.toml")]
    config: PathBuf,

    /// Log build progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load config
    let mut config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading {}: {}", cli.config.display(), e);
            std::process::exit(1);
        }
    };
    if let Some(base_path) = cli.base_path {
        config.site.base_path = base_path;
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Build site
    let report = match sitegen::site::build(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Built {} pages and copied {} static files into {}",
        report.pages,
        report.assets,
        config.paths.output.display()
    );
}

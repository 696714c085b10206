use grindtrack::config::Config;
use grindtrack::error::Result;
use grindtrack::session::Session;
use grindtrack::store::{JsonStore, Template};
use grindtrack::terminal::TerminalPrompter;

use clap::Parser;
use crossterm::style::Stylize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Work through the problem curriculum one problem at a time, with reviews of solved problems
/// scheduled a few days later.
#[derive(Parser, Debug)]
#[clap(version, long_about = None)]
struct Args {
    /// Configuration file, defaults to config.yaml in the user's config directory.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Problem data file, overrides the configuration.
    #[clap(short, long)]
    data: Option<PathBuf>,

    /// Starter document used when the data file does not exist yet.
    #[clap(short, long)]
    template: Option<PathBuf>,
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::discover(args.config.as_deref())?;
    if let Some(data) = args.data {
        config.data_file = data;
    }
    if let Some(template) = args.template {
        config.template_file = Some(template);
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::info!(?config, "starting");

    let template: Template = config.template();
    let store = JsonStore::new(&config.data_file, template);
    let mut session = Session::new(Box::new(store), Box::new(TerminalPrompter::new()))?
        .with_recent_limit(config.recent_limit);
    println!("{}", "Grind75 Manager".bold().green());
    session.run()
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

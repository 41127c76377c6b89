use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use matsort::logging;
use matsort::service::{ClassificationService, ServiceConfig};
use matsort::ui::cli::args::{Cli, Command};
use matsort::ui::cli::console::run_console;
use matsort::ui::cli::drivers::InquireDriver;
use matsort::ui::cli::render;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GREEN: &str = "\x1b[32m";

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let command = match cli.command {
        Some(Command::ConfigSchema) => {
            println!("{}", ServiceConfig::json_schema()?);
            return Ok(());
        }
        other => other,
    };

    let config = ServiceConfig::load(cli.config.as_deref(), &cli.overrides)
        .context("failed to load configuration")?;
    let data_file = config.data_file.clone();
    let mut service = ClassificationService::open(config)
        .with_context(|| format!("failed to open storage at {}", data_file.display()))?;
    let projection = service.projection();

    match command {
        None => {
            println!(
                "{BOLD}{FG_CYAN}▶ Material classifier{RESET}  {DIM}projection={projection}  samples={}{RESET}",
                service.list_samples().len()
            );
            run_console(&InquireDriver, &mut service, projection, &mut io::stdout())
                .context("interactive session ended")?;
        }
        Some(Command::Add(args)) => {
            let counts = service
                .add_sample(args.features(), args.class_id)
                .context("sample was not added")?;
            println!("{FG_GREEN}✓ sample added{RESET}");
            print!("{}", render::statistics(&counts));
        }
        Some(Command::Classify(args)) => {
            let features = args.features(projection)?;
            let label = service
                .classify(&features)
                .context("could not classify")?;
            println!("{BOLD}{}{RESET}", label.display_name());
        }
        Some(Command::Samples) => print!("{}", render::sample_table(service.list_samples())),
        Some(Command::Stats) => print!("{}", render::statistics(&service.list_statistics())),
        Some(Command::Tree) => {
            let model = service.model();
            println!("{DIM}{}{RESET}", model.summary());
            if model.is_degenerate() {
                println!("{DIM}single label in training set{RESET}");
            }
            print!("{}", model.describe());
        }
        Some(Command::ConfigSchema) => {}
    }

    Ok(())
}

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::classifiers::FeatureProjection;
use crate::core::sample::Features;
use crate::service::config::{KeyValue, parse_key_value};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Record labeled material measurements and classify new ones"
)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Override configuration values (key=value, nested keys with dots)
    #[arg(
        long = "set",
        global = true,
        value_name = "KEY=VALUE",
        value_parser = parse_key_value
    )]
    pub overrides: Vec<KeyValue>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Omit to start the interactive menu
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store a labeled sample and retrain
    Add(AddArgs),
    /// Predict the material of a measurement
    Classify(ClassifyArgs),
    /// Print the stored samples
    Samples,
    /// Print per-class counts
    Stats,
    /// Print the current decision tree
    Tree,
    /// Print the JSON Schema of the configuration file
    ConfigSchema,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Length in cm
    #[arg(long, allow_negative_numbers = true)]
    pub length: f64,

    /// Width in cm
    #[arg(long, allow_negative_numbers = true)]
    pub width: f64,

    /// Weight in g
    #[arg(long, allow_negative_numbers = true)]
    pub weight: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub conductivity: f64,

    /// Class id: 0 Glass, 1 Paper, 2 Plastic, 3 Metal, 4 Organic, 5 Unknown
    #[arg(long = "class", value_name = "ID", allow_negative_numbers = true)]
    pub class_id: i64,
}

impl AddArgs {
    pub fn features(&self) -> Features {
        Features::new(self.length, self.width, self.weight, self.conductivity)
    }
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Length in cm (required unless the projection is conductivity-only)
    #[arg(long, allow_negative_numbers = true)]
    pub length: Option<f64>,

    /// Width in cm (required unless the projection is conductivity-only)
    #[arg(long, allow_negative_numbers = true)]
    pub width: Option<f64>,

    /// Weight in g (required unless the projection is conductivity-only)
    #[arg(long, allow_negative_numbers = true)]
    pub weight: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub conductivity: f64,
}

impl ClassifyArgs {
    /// Fields the projection ignores default to 0; fields it reads must be
    /// given.
    pub fn features(&self, projection: FeatureProjection) -> Result<Features> {
        let used = projection.attribute_names();
        let mut values = [0.0; 3];
        for ((slot, name), given) in values
            .iter_mut()
            .zip(Features::NAMES)
            .zip([self.length, self.width, self.weight])
        {
            match given {
                Some(v) => *slot = v,
                None if used.contains(&name) => {
                    bail!("--{name} is required under the {projection} projection")
                }
                None => {}
            }
        }
        let [length, width, weight] = values;
        Ok(Features::new(length, width, weight, self.conductivity))
    }
}

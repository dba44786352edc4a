pub mod binary;
pub mod cli;
pub mod column;
pub mod config;
pub mod error;
pub mod export;
pub mod files;
pub mod histogram;
pub mod pipeline;
pub mod shuffle;
pub mod synth;
pub mod uniques;

use std::io;

use clap_complete::Shell;

pub use crate::config::{CellsConfig, ColumnsConfig, SynthConfig};
pub use crate::error::{Error, Result};
pub use crate::uniques::UniquenessReport;

/// Runs the subcommand selected on the command line.
pub fn run(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("columns", sub_matches)) => {
            let config = ColumnsConfig::from_matches(sub_matches)?;
            pipeline::run_columns(&config)?;
        }
        Some(("cells", sub_matches)) => {
            let config = CellsConfig::from_matches(sub_matches)?;
            let mut rng = shuffle::make_rng(config.seed);
            pipeline::run_cells(&config, &mut rng)?;
        }
        Some(("synth", sub_matches)) => {
            let config = SynthConfig::from_matches(sub_matches)?;
            let mut rng = shuffle::make_rng(config.seed);
            pipeline::run_synth(&config, &mut rng)?;
        }
        Some(("completions", sub_matches)) => {
            if let Some(shell) = sub_matches.get_one::<Shell>("shell") {
                let mut cmd = cli::build_cli();
                clap_complete::generate(*shell, &mut cmd, "sortbench_data", &mut io::stdout());
            }
        }
        _ => {}
    };
    Ok(())
}

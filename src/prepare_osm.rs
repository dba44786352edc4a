// Prepares the OSM dataset: the binary file OSM in the given directory
// (default: current directory) is reported on, shuffled and written out
// as Cell_IDs.txt.

use sortbench_data::pipeline::run_cells;
use sortbench_data::shuffle::make_rng;
use sortbench_data::CellsConfig;

use std::env;
use std::path::PathBuf;

fn main() {
    let args: Vec<String> = env::args().collect();
    let dir = args.get(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let config = CellsConfig::in_dir(&dir);
    let mut rng = make_rng(config.seed);
    if let Err(e) = run_cells(&config, &mut rng) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

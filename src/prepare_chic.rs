// Prepares the Chic dataset: Start.txt and Tot.txt in the given directory
// (default: current directory) get a uniqueness report and a histogram each.

use sortbench_data::pipeline::run_columns;
use sortbench_data::ColumnsConfig;

use std::env;
use std::path::PathBuf;

fn main() {
    let args: Vec<String> = env::args().collect();
    let dir = args.get(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let config = ColumnsConfig::in_dir(&dir);
    if let Err(e) = run_columns(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

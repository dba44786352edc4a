use sortbench_data::cli::build_cli;

fn main() {
    let matches = build_cli().get_matches();

    if let Err(e) = sortbench_data::run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

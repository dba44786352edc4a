use clap::{value_parser, Arg, ArgAction, Command};
use clap_complete::Shell;
use std::path::PathBuf;

fn bins_arg() -> Arg {
    Arg::new("bins")
        .long("bins")
        .value_parser(value_parser!(u64).range(1..))
        .help("Number of histogram bins [default: 50]")
}

fn print_histogram_arg() -> Arg {
    Arg::new("print-histogram")
        .long("print-histogram")
        .action(ArgAction::SetTrue)
        .help("Also print the histogram to stdout")
}

fn output_dir_arg() -> Arg {
    Arg::new("output-dir")
        .short('o')
        .long("output-dir")
        .value_parser(value_parser!(PathBuf))
        .help("Directory for the report, histogram and exported files [default: .]")
}

fn dataset_arg(default: &'static str) -> Arg {
    Arg::new("dataset")
        .long("dataset")
        .default_value(default)
        .help("Dataset name used in output file names and titles")
}

pub fn build_cli() -> Command {
    Command::new("sortbench_data")
        .version("0.1.1")
        .about("Uniqueness statistics and histograms for sorting benchmark datasets")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("columns")
                .about("Process text columns with one value per line (<column>.txt).")
                .arg(
                    Arg::new("input-dir")
                        .short('i')
                        .long("input-dir")
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory holding the column files [default: .]"),
                )
                .arg(output_dir_arg())
                .arg(dataset_arg("Chic"))
                .arg(
                    Arg::new("column")
                        .short('c')
                        .long("column")
                        .action(ArgAction::Append)
                        .help(
                            "Column as NAME:u64 or NAME:f64, repeatable \
                             [default: Start:u64 Tot:f64]",
                        ),
                )
                .arg(bins_arg())
                .arg(print_histogram_arg()),
        )
        .subcommand(
            Command::new("cells")
                .about("Process a binary array of u64 cell ids, shuffle it and export it as text.")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .value_parser(value_parser!(PathBuf))
                        .help("Binary input file [default: <dataset>]"),
                )
                .arg(output_dir_arg())
                .arg(dataset_arg("OSM"))
                .arg(
                    Arg::new("column-name")
                        .long("column-name")
                        .default_value("Cell_IDs")
                        .help("Name of the values, used in output file names and titles"),
                )
                .arg(
                    Arg::new("export")
                        .short('e')
                        .long("export")
                        .value_parser(value_parser!(PathBuf))
                        .help(
                            "Text file for the shuffled values, gzipped if it ends in .gz \
                             [default: <column-name>.txt]",
                        ),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Seed for the shuffle. Without it every run gives a different order"),
                )
                .arg(
                    Arg::new("skip-header-check")
                        .long("skip-header-check")
                        .action(ArgAction::SetTrue)
                        .help(
                            "Drop the leading size element without checking it \
                             against the element count",
                        ),
                )
                .arg(bins_arg())
                .arg(print_histogram_arg()),
        )
        .subcommand(
            Command::new("synth")
                .about("Generate a synthetic dataset with one value per line.")
                .arg(
                    Arg::new("distribution")
                        .required(true)
                        .value_parser([
                            "exponential",
                            "lognormal",
                            "normal",
                            "uniform",
                            "mix-of-gauss",
                            "chi-squared",
                            "zipf",
                            "root-dups",
                            "sorted-uniform",
                            "reverse-sorted-uniform",
                            "identical",
                        ])
                        .help("Distribution to draw the values from"),
                )
                .arg(
                    Arg::new("size")
                        .short('n')
                        .long("size")
                        .required(true)
                        .value_parser(value_parser!(u64).range(1..))
                        .help("Number of values"),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["u64", "f64"])
                        .default_value("u64")
                        .help("Value type"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Seed for the generator. Without it every run gives new values"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_parser(value_parser!(PathBuf))
                        .help(
                            "Output text file, gzipped if it ends in .gz \
                             [default: <distribution>_<size>.txt]",
                        ),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Print a shell completion script.")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(value_parser!(Shell)),
                ),
        )
}

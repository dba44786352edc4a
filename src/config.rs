use std::path::{Path, PathBuf};

use crate::binary::HeaderCheck;
use crate::column::{ColumnKind, ColumnSpec};
use crate::error::Result;
use crate::histogram::DEFAULT_BINS;
use crate::synth::Shape;

pub fn report_name(column: Option<&str>) -> String {
    match column {
        Some(name) => format!("uniques_cnt_{}", name),
        None => "uniques_cnt".to_owned(),
    }
}

pub fn histogram_name(dataset: &str, column: &str) -> String {
    format!("hist_{}_{}.png", dataset, column)
}

pub fn histogram_title(dataset: &str, column: &str) -> String {
    format!("Distribution of {}/{}", dataset, column)
}

/// Settings of the text-column pipeline.
#[derive(Debug, Clone)]
pub struct ColumnsConfig {
    pub dataset: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub columns: Vec<ColumnSpec>,
    pub bins: usize,
    pub print_histogram: bool,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        ColumnsConfig {
            dataset: "Chic".to_owned(),
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            columns: vec![
                ColumnSpec::new("Start", ColumnKind::Unsigned),
                ColumnSpec::new("Tot", ColumnKind::Float),
            ],
            bins: DEFAULT_BINS,
            print_histogram: false,
        }
    }
}

impl ColumnsConfig {
    pub fn in_dir(dir: &Path) -> Self {
        ColumnsConfig {
            input_dir: dir.to_path_buf(),
            output_dir: dir.to_path_buf(),
            ..Default::default()
        }
    }

    pub fn from_matches(args: &clap::ArgMatches) -> Result<Self> {
        let mut config = ColumnsConfig::default();
        if let Some(dataset) = args.get_one::<String>("dataset") {
            config.dataset = dataset.clone();
        }
        if let Some(dir) = args.get_one::<PathBuf>("input-dir") {
            config.input_dir = dir.clone();
        }
        if let Some(dir) = args.get_one::<PathBuf>("output-dir") {
            config.output_dir = dir.clone();
        }
        if let Some(specs) = args.get_many::<String>("column") {
            config.columns = specs.map(|s| s.parse::<ColumnSpec>()).collect::<Result<Vec<_>>>()?;
        }
        if let Some(bins) = args.get_one::<u64>("bins") {
            config.bins = *bins as usize;
        }
        config.print_histogram = args.get_flag("print-histogram");
        Ok(config)
    }

    pub fn report_path(&self, column: &ColumnSpec) -> PathBuf {
        self.output_dir.join(report_name(Some(&column.name)))
    }

    pub fn histogram_path(&self, column: &ColumnSpec) -> PathBuf {
        self.output_dir.join(histogram_name(&self.dataset, &column.name))
    }
}

/// Settings of the binary cell-id pipeline.
#[derive(Debug, Clone)]
pub struct CellsConfig {
    pub dataset: String,
    pub column: String,
    /// Defaults to `<dataset>` in the current directory.
    pub input: Option<PathBuf>,
    pub output_dir: PathBuf,
    /// Defaults to `<column>.txt` in the output directory.
    pub export: Option<PathBuf>,
    pub seed: Option<u64>,
    pub header_check: HeaderCheck,
    pub bins: usize,
    pub print_histogram: bool,
}

impl Default for CellsConfig {
    fn default() -> Self {
        CellsConfig {
            dataset: "OSM".to_owned(),
            column: "Cell_IDs".to_owned(),
            input: None,
            output_dir: PathBuf::from("."),
            export: None,
            seed: None,
            header_check: HeaderCheck::Strict,
            bins: DEFAULT_BINS,
            print_histogram: false,
        }
    }
}

impl CellsConfig {
    pub fn in_dir(dir: &Path) -> Self {
        let mut config = CellsConfig { output_dir: dir.to_path_buf(), ..Default::default() };
        config.input = Some(dir.join(&config.dataset));
        config
    }

    pub fn from_matches(args: &clap::ArgMatches) -> Result<Self> {
        let mut config = CellsConfig::default();
        if let Some(dataset) = args.get_one::<String>("dataset") {
            config.dataset = dataset.clone();
        }
        if let Some(column) = args.get_one::<String>("column-name") {
            config.column = column.clone();
        }
        config.input = args.get_one::<PathBuf>("input").cloned();
        if let Some(dir) = args.get_one::<PathBuf>("output-dir") {
            config.output_dir = dir.clone();
        }
        config.export = args.get_one::<PathBuf>("export").cloned();
        config.seed = args.get_one::<u64>("seed").copied();
        if args.get_flag("skip-header-check") {
            config.header_check = HeaderCheck::Skip;
        }
        if let Some(bins) = args.get_one::<u64>("bins") {
            config.bins = *bins as usize;
        }
        config.print_histogram = args.get_flag("print-histogram");
        Ok(config)
    }

    pub fn input_path(&self) -> PathBuf {
        match &self.input {
            Some(path) => path.clone(),
            None => PathBuf::from(&self.dataset),
        }
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(report_name(None))
    }

    pub fn export_path(&self) -> PathBuf {
        match &self.export {
            Some(path) => path.clone(),
            None => self.output_dir.join(format!("{}.txt", self.column)),
        }
    }

    pub fn histogram_path(&self) -> PathBuf {
        self.output_dir.join(histogram_name(&self.dataset, &self.column))
    }
}

/// Settings of the synthetic dataset generator.
#[derive(Debug, Clone)]
pub struct SynthConfig {
    pub shape: Shape,
    pub size: usize,
    pub kind: ColumnKind,
    pub seed: Option<u64>,
    /// Defaults to `<shape>_<size>.txt` in the current directory.
    pub output: Option<PathBuf>,
}

impl SynthConfig {
    pub fn new(shape: Shape, size: usize) -> Self {
        SynthConfig { shape, size, kind: ColumnKind::Unsigned, seed: None, output: None }
    }

    pub fn from_matches(args: &clap::ArgMatches) -> Result<Self> {
        let shape = match args.get_one::<String>("distribution") {
            Some(name) => name.parse::<Shape>()?,
            None => Shape::Normal,
        };
        let size = args.get_one::<u64>("size").copied().unwrap_or(0) as usize;
        let mut config = SynthConfig::new(shape, size);
        if let Some(kind) = args.get_one::<String>("type") {
            config.kind = match kind.as_str() {
                "f64" => ColumnKind::Float,
                _ => ColumnKind::Unsigned,
            };
        }
        config.seed = args.get_one::<u64>("seed").copied();
        config.output = args.get_one::<PathBuf>("output").cloned();
        Ok(config)
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => PathBuf::from(format!("{}_{}.txt", self.shape, self.size)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::build_cli;

    #[test]
    fn defaults_match_the_fixed_file_names() {
        let columns = ColumnsConfig::default();
        assert_eq!(columns.bins, 50);
        assert_eq!(columns.report_path(&columns.columns[0]), Path::new("./uniques_cnt_Start"));
        assert_eq!(columns.histogram_path(&columns.columns[1]), Path::new("./hist_Chic_Tot.png"));

        let cells = CellsConfig::default();
        assert_eq!(cells.input_path(), Path::new("OSM"));
        assert_eq!(cells.report_path(), Path::new("./uniques_cnt"));
        assert_eq!(cells.export_path(), Path::new("./Cell_IDs.txt"));
        assert_eq!(cells.histogram_path(), Path::new("./hist_OSM_Cell_IDs.png"));
        assert_eq!(histogram_title(&cells.dataset, &cells.column), "Distribution of OSM/Cell_IDs");
    }

    #[test]
    fn columns_from_command_line() {
        let matches = build_cli().get_matches_from([
            "sortbench_data", "columns", "-i", "data", "-o", "out",
            "--column", "Start:u64", "--column", "End:u64", "--bins", "10",
        ]);
        let (_, sub) = matches.subcommand().unwrap();
        let config = ColumnsConfig::from_matches(sub).unwrap();
        assert_eq!(config.input_dir, Path::new("data"));
        assert_eq!(config.output_dir, Path::new("out"));
        assert_eq!(config.columns, vec![
            ColumnSpec::new("Start", ColumnKind::Unsigned),
            ColumnSpec::new("End", ColumnKind::Unsigned),
        ]);
        assert_eq!(config.bins, 10);
        assert!(!config.print_histogram);
    }

    #[test]
    fn cells_from_command_line() {
        let matches = build_cli().get_matches_from([
            "sortbench_data", "cells", "-i", "data/OSM", "--seed", "3", "--skip-header-check",
        ]);
        let (_, sub) = matches.subcommand().unwrap();
        let config = CellsConfig::from_matches(sub).unwrap();
        assert_eq!(config.input_path(), Path::new("data/OSM"));
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.header_check, HeaderCheck::Skip);
        assert_eq!(config.bins, 50);
    }

    #[test]
    fn synth_from_command_line() {
        let matches = build_cli().get_matches_from([
            "sortbench_data", "synth", "zipf", "-n", "1000", "--type", "f64", "--seed", "5",
        ]);
        let (_, sub) = matches.subcommand().unwrap();
        let config = SynthConfig::from_matches(sub).unwrap();
        assert_eq!(config.shape, Shape::Zipf);
        assert_eq!(config.size, 1000);
        assert_eq!(config.kind, ColumnKind::Float);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.output_path(), Path::new("zipf_1000.txt"));
    }

    #[test]
    fn every_listed_distribution_parses() {
        let cli = build_cli();
        let synth = cli.find_subcommand("synth").unwrap();
        let arg = synth.get_arguments().find(|a| a.get_id() == "distribution").unwrap();
        let names: Vec<String> =
            arg.get_possible_values().iter().map(|v| v.get_name().to_owned()).collect();
        assert_eq!(names.len(), Shape::ALL.len());
        for name in names {
            assert!(name.parse::<Shape>().is_ok(), "{}", name);
        }
    }

    #[test]
    fn bad_column_spec_is_rejected() {
        let matches =
            build_cli().get_matches_from(["sortbench_data", "columns", "--column", "Start"]);
        let (_, sub) = matches.subcommand().unwrap();
        assert!(ColumnsConfig::from_matches(sub).is_err());
    }
}

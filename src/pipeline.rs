use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;

use crate::binary::load_cells;
use crate::column::{load_column_data, ColumnData, ColumnSpec};
use crate::config::{histogram_title, CellsConfig, ColumnsConfig, SynthConfig};
use crate::error::{Error, Result};
use crate::export::write_values;
use crate::files::resolve_input;
use crate::histogram::{render_histogram, Histogram};
use crate::shuffle::shuffle_cells;
use crate::synth::generate;
use crate::uniques::{write_report, UniquenessReport};

fn announce(report: &UniquenessReport) {
    println!("{} unique elements ({:.2}%).", report.distinct, report.percentage());
}

fn draw(
    values: impl IntoIterator<Item = f64> + Clone,
    bins: usize,
    title: &str,
    path: &Path,
    print: bool,
) -> Result<()> {
    let hist = Histogram::from_values(values, bins);
    render_histogram(&hist, title, path)?;
    if print {
        hist.print(&mut io::stdout().lock()).map_err(|e| Error::io(path, e))?;
    }
    eprintln!("Histogram written to {}", path.display());
    Ok(())
}

/// Text-column pipeline: per column, load it, report its uniqueness and
/// render its histogram. All inputs are located before anything is written.
pub fn run_columns(config: &ColumnsConfig) -> Result<Vec<(ColumnSpec, UniquenessReport)>> {
    let inputs: Vec<PathBuf> = config
        .columns
        .iter()
        .map(|column| resolve_input(&column.input_candidates(&config.input_dir)))
        .collect::<Result<_>>()?;

    let mut reports = Vec::with_capacity(config.columns.len());
    for (column, input) in config.columns.iter().zip(inputs) {
        eprintln!("Processing {}/{}", config.dataset, column.name);

        let data = load_column_data(&input, column.kind)?;
        eprintln!("Loaded {} values from {}", data.len(), input.display());

        let report = match &data {
            ColumnData::Unsigned(v) => UniquenessReport::from_values(&column.name, v)?,
            ColumnData::Float(v) => UniquenessReport::from_values(&column.name, v)?,
        };
        announce(&report);
        write_report(&config.report_path(column), &report)?;

        let values = data.as_f64();
        draw(
            values.iter().copied(),
            config.bins,
            &histogram_title(&config.dataset, &column.name),
            &config.histogram_path(column),
            config.print_histogram,
        )?;

        reports.push((column.clone(), report));
    }
    Ok(reports)
}

/// Binary pipeline: load the cells, report their uniqueness, shuffle them,
/// export the shuffled order as text and render the histogram.
pub fn run_cells<R: Rng + ?Sized>(config: &CellsConfig, rng: &mut R) -> Result<UniquenessReport> {
    let input = config.input_path();
    let mut cells = load_cells(&input, config.header_check)?;
    eprintln!("Loaded {} values from {}", cells.len(), input.display());

    let report = UniquenessReport::from_values(&config.column, &cells)?;
    announce(&report);
    write_report(&config.report_path(), &report)?;

    shuffle_cells(&mut cells, rng);
    eprintln!("Values shuffled");

    let export = config.export_path();
    write_values(&export, &cells)?;
    eprintln!("Shuffled values written to {}", export.display());

    draw(
        cells.iter().map(|x| *x as f64),
        config.bins,
        &histogram_title(&config.dataset, &config.column),
        &config.histogram_path(),
        config.print_histogram,
    )?;

    Ok(report)
}

/// Synthetic datasets: draw the values, report their uniqueness and write
/// them one per line.
pub fn run_synth<R: Rng + ?Sized>(config: &SynthConfig, rng: &mut R) -> Result<UniquenessReport> {
    eprintln!("Drawing {} {} values", config.size, config.shape);
    let data = generate(config.shape, config.size, config.kind, rng)?;

    let name = config.shape.name();
    let report = match &data {
        ColumnData::Unsigned(v) => UniquenessReport::from_values(name, v)?,
        ColumnData::Float(v) => UniquenessReport::from_values(name, v)?,
    };
    announce(&report);

    let output = config.output_path();
    match &data {
        ColumnData::Unsigned(v) => write_values(&output, v)?,
        ColumnData::Float(v) => write_values(&output, v)?,
    }
    eprintln!("Values written to {}", output.display());
    Ok(report)
}

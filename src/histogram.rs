use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};

use crate::error::{Error, Result};

pub const DEFAULT_BINS: usize = 50;

// 4 x 4 inches at 144 dpi
pub const IMAGE_SIZE: (u32, u32) = (576, 576);

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Equal-width bins over the range of the values. The last bin is closed,
/// so the maximum lands in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub counts: Vec<u64>,
}

impl Histogram {
    // Non-finite values are left out. Offsets are taken on halved values so
    // that `max - min` can not overflow for values near f64::MAX.
    pub fn from_values(values: impl IntoIterator<Item = f64> + Clone, n_bins: usize) -> Self {
        let n_bins = n_bins.max(1);
        let finite = values.clone().into_iter().filter(|x| x.is_finite());
        let (mut min, mut max) = finite
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| (lo.min(x), hi.max(x)));
        if min > max {
            // No data
            min = 0.0;
            max = 1.0;
        } else if min == max {
            let pad = 0.5f64.max(min.abs() * 1e-6);
            min = (min - pad).max(f64::MIN);
            max = (max + pad).min(f64::MAX);
        }

        let mut counts = vec![0u64; n_bins];
        let half_span = max / 2.0 - min / 2.0;
        for x in values.into_iter().filter(|x| x.is_finite()) {
            let bin = ((x / 2.0 - min / 2.0) / half_span * n_bins as f64) as usize;
            counts[bin.min(n_bins - 1)] += 1;
        }

        Histogram { min, max, counts }
    }

    fn half_step(&self) -> f64 {
        (self.max / 2.0 - self.min / 2.0) / self.counts.len() as f64
    }

    /// Infinite when a single bin spans more than f64::MAX.
    pub fn bin_width(&self) -> f64 {
        2.0 * self.half_step()
    }

    pub fn bin_range(&self, i: usize) -> (f64, f64) {
        let edge = |k: usize| 2.0 * (self.min / 2.0 + k as f64 * self.half_step());
        let lo = edge(i);
        let hi = if i + 1 == self.counts.len() { self.max } else { edge(i + 1) };
        (lo, hi)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Prints the histogram as rows of '#', scaled so the fullest bin is
    /// 40 characters wide.
    pub fn print(&self, out: &mut impl Write) -> std::io::Result<()> {
        let max_counter = self.counts.iter().copied().max().unwrap_or(0).max(1);
        let n_columns: u64 = 40;

        for (i, c) in self.counts.iter().enumerate() {
            let n_chars = ((*c as f64 / max_counter as f64) * n_columns as f64) as usize;
            write!(out, "{}\t", format_tick(self.bin_range(i).0))?;
            out.write_all(vec![b'#'; n_chars].as_slice())?;
            writeln!(out)?;
        }
        Ok(())
    }
}

fn format_tick(x: f64) -> String {
    if x != 0.0 && (x.abs() >= 1e5 || x.abs() < 1e-2) {
        format!("{:.1e}", x)
    } else if x.fract() == 0.0 {
        format!("{:.0}", x)
    } else {
        format!("{:.2}", x)
    }
}

// Registers the first system font found under the "sans-serif" family.
fn text_available() -> bool {
    static FONT_REGISTERED: OnceLock<bool> = OnceLock::new();
    *FONT_REGISTERED.get_or_init(|| {
        for candidate in FONT_CANDIDATES {
            if let Ok(bytes) = std::fs::read(candidate) {
                let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
                if register_font("sans-serif", FontStyle::Normal, bytes).is_ok() {
                    return true;
                }
            }
        }
        eprintln!("No usable font found, histograms are rendered without title and labels");
        false
    })
}

fn plot_error<E: std::fmt::Display>(path: &Path) -> impl Fn(E) -> Error + '_ {
    move |e| Error::Plot { path: path.to_path_buf(), reason: e.to_string() }
}

/// Renders the histogram as a PNG bar chart with the given title.
pub fn render_histogram(hist: &Histogram, title: &str, path: &Path) -> Result<()> {
    // Plot in halved coordinates when the axis span overflows.
    let scale = if (hist.max - hist.min).is_finite() { 1.0 } else { 0.5 };
    let (x_min, x_max) = (hist.min * scale, hist.max * scale);
    let span = x_max - x_min;
    if !span.is_finite() || span <= 0.0 {
        return Err(Error::Plot {
            path: path.to_path_buf(),
            reason: format!("can not draw an axis from {} to {}", hist.min, hist.max),
        });
    }

    let with_text = text_available();

    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error(path))?;

    let y_max = hist.counts.iter().copied().max().unwrap_or(0).max(1) as f64 * 1.05;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(12);
    if with_text {
        builder
            .caption(title, ("sans-serif", 24))
            .x_label_area_size(32)
            .y_label_area_size(56);
    }
    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)
        .map_err(plot_error(path))?;

    if with_text {
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(5)
            .y_labels(6)
            .label_style(("sans-serif", 14))
            .x_label_formatter(&|x| format_tick(*x / scale))
            .y_label_formatter(&|y| format_tick(*y))
            .draw()
            .map_err(plot_error(path))?;
    }

    chart
        .draw_series(hist.counts.iter().enumerate().map(|(i, c)| {
            let (lo, hi) = hist.bin_range(i);
            Rectangle::new([(lo * scale, 0.0), (hi * scale, *c as f64)], BAR_COLOR.filled())
        }))
        .map_err(plot_error(path))?;

    root.present().map_err(plot_error(path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_cover_min_and_max() {
        let values = vec![0.0, 1.0, 2.0, 3.0, 4.0, 10.0];
        let hist = Histogram::from_values(values.iter().copied(), 5);
        assert_eq!(hist.min, 0.0);
        assert_eq!(hist.max, 10.0);
        assert_eq!(hist.counts, vec![2, 2, 1, 0, 1]);
        assert_eq!(hist.total(), 6);
    }

    #[test]
    fn single_value_gets_a_unit_range() {
        let hist = Histogram::from_values(vec![7.0; 3], 50);
        assert_eq!(hist.min, 6.5);
        assert_eq!(hist.max, 7.5);
        assert_eq!(hist.counts.len(), 50);
        assert_eq!(hist.total(), 3);
        assert_eq!(hist.counts.iter().filter(|c| **c == 3).count(), 1);
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let hist = Histogram::from_values(vec![1.0, f64::NAN, 2.0, f64::INFINITY], 2);
        assert_eq!(hist.counts, vec![1, 1]);
    }

    #[test]
    fn last_bin_ends_at_max() {
        let hist = Histogram::from_values(vec![0.0, 3.0], 3);
        assert_eq!(hist.bin_range(2).1, 3.0);
        assert_eq!(hist.bin_range(0), (0.0, 1.0));
    }

    #[test]
    fn printed_rows_scale_to_forty_columns() {
        let hist = Histogram::from_values(vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0], 2);
        let mut out = Vec::<u8>::new();
        hist.print(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], format!("0\t{}", "#".repeat(40)));
        assert_eq!(rows[1], format!("0.50\t{}", "#".repeat(20)));
    }

    #[test]
    fn extreme_range_does_not_overflow() {
        let hist = Histogram::from_values(vec![-1e308, 0.0, 1e308], DEFAULT_BINS);
        let mut expected = vec![0u64; DEFAULT_BINS];
        expected[0] = 1;
        expected[25] = 1;
        expected[49] = 1;
        assert_eq!(hist.counts, expected);
        assert_eq!(hist.bin_range(0).0, -1e308);
        assert_eq!(hist.bin_range(49).1, 1e308);
        assert!(hist.bin_range(25).0.abs() < 1e300);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hist_Chic_Tot.png");
        render_histogram(&hist, "Distribution of Chic/Tot", &path).unwrap();
        assert_eq!(&std::fs::read(&path).unwrap()[1..4], b"PNG");
    }

    #[test]
    fn single_huge_value_keeps_a_finite_range() {
        let hist = Histogram::from_values(vec![f64::MAX, f64::MAX], 10);
        assert!(hist.min < hist.max);
        assert_eq!(hist.max, f64::MAX);
        assert_eq!(hist.total(), 2);
    }

    #[test]
    fn non_finite_axis_is_a_plot_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        let hist = Histogram { min: 0.0, max: f64::INFINITY, counts: vec![1] };
        assert!(matches!(render_histogram(&hist, "bad", &path), Err(Error::Plot { .. })));
    }

    #[test]
    fn renders_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hist_Chic_Start.png");
        let hist = Histogram::from_values(vec![1.0, 2.0, 2.0, 3.0], DEFAULT_BINS);
        render_histogram(&hist, "Distribution of Chic/Start", &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}

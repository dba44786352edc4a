//! Synthetic benchmark datasets.
//!
//! Values are drawn as `f64` and truncated towards zero for `u64` output;
//! negative draws become 0. Scale-free shapes (exponential, lognormal,
//! chi-squared) are multiplied by the dataset size for `u64` output so the
//! integer values stay mostly distinct.

use std::fmt;
use std::str::FromStr;

use rand::distr::weighted::WeightedIndex;
use rand::Rng;
use rand_distr::{ChiSquared, Distribution, Exp, LogNormal, Normal, Uniform, Zipf};

use crate::column::{ColumnData, ColumnKind};
use crate::error::{Error, Result};

const EXPONENTIAL_LAMBDA: f64 = 2.0;
const LOGNORMAL_MEAN: f64 = 0.0;
const LOGNORMAL_STDDEV: f64 = 0.5;
const NORMAL_MEAN: f64 = 4096.0;
const NORMAL_STDDEV: f64 = 1024.0;
const CHI_SQUARED_K: f64 = 4.0;
const GAUSS_COMPONENTS: usize = 5;
const ZIPF_SKEW: f64 = 0.5;
const ZIPF_CARDINALITY: f64 = 1e8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Exponential,
    Lognormal,
    Normal,
    Uniform,
    MixOfGauss,
    ChiSquared,
    Zipf,
    RootDups,
    SortedUniform,
    ReverseSortedUniform,
    Identical,
}

impl Shape {
    pub const ALL: [Shape; 11] = [
        Shape::Exponential,
        Shape::Lognormal,
        Shape::Normal,
        Shape::Uniform,
        Shape::MixOfGauss,
        Shape::ChiSquared,
        Shape::Zipf,
        Shape::RootDups,
        Shape::SortedUniform,
        Shape::ReverseSortedUniform,
        Shape::Identical,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Shape::Exponential => "exponential",
            Shape::Lognormal => "lognormal",
            Shape::Normal => "normal",
            Shape::Uniform => "uniform",
            Shape::MixOfGauss => "mix-of-gauss",
            Shape::ChiSquared => "chi-squared",
            Shape::Zipf => "zipf",
            Shape::RootDups => "root-dups",
            Shape::SortedUniform => "sorted-uniform",
            Shape::ReverseSortedUniform => "reverse-sorted-uniform",
            Shape::Identical => "identical",
        }
    }
}

impl FromStr for Shape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Shape::ALL
            .iter()
            .find(|shape| shape.name() == s)
            .copied()
            .ok_or_else(|| Error::InvalidDistribution(format!("unknown distribution {:?}", s)))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn invalid<E: fmt::Display>(e: E) -> Error {
    Error::InvalidDistribution(e.to_string())
}

fn draw<D, R>(dist: &D, size: usize, scale: f64, rng: &mut R) -> Vec<f64>
where
    D: Distribution<f64>,
    R: Rng + ?Sized,
{
    (0..size).map(|_| dist.sample(rng) * scale).collect()
}

fn mix_of_gauss<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Vec<f64>> {
    let means = draw(&Uniform::new(-500.0, 500.0).map_err(invalid)?, GAUSS_COMPONENTS, 1.0, rng);
    let stddevs = draw(&Uniform::new(0.0, 100.0).map_err(invalid)?, GAUSS_COMPONENTS, 1.0, rng);
    let weights = draw(&Uniform::new(0.0, 1.0).map_err(invalid)?, GAUSS_COMPONENTS, 1.0, rng);

    let components = means
        .iter()
        .zip(&stddevs)
        .map(|(m, s)| Normal::new(*m, *s).map_err(invalid))
        .collect::<Result<Vec<_>>>()?;
    let selector = WeightedIndex::new(&weights).map_err(invalid)?;

    Ok((0..size).map(|_| components[selector.sample(rng)].sample(rng)).collect())
}

// Raw draws before conversion to the requested value type.
fn draw_shape<R: Rng + ?Sized>(
    shape: Shape,
    size: usize,
    kind: ColumnKind,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let scale = match kind {
        ColumnKind::Unsigned => size as f64,
        ColumnKind::Float => 1.0,
    };
    let values = match shape {
        Shape::Exponential => {
            draw(&Exp::new(EXPONENTIAL_LAMBDA).map_err(invalid)?, size, scale, rng)
        }
        Shape::Lognormal => {
            let dist = LogNormal::new(LOGNORMAL_MEAN, LOGNORMAL_STDDEV).map_err(invalid)?;
            draw(&dist, size, scale, rng)
        }
        Shape::Normal => {
            let dist = Normal::new(NORMAL_MEAN, NORMAL_STDDEV).map_err(invalid)?;
            draw(&dist, size, 1.0, rng)
        }
        Shape::Uniform | Shape::SortedUniform | Shape::ReverseSortedUniform => {
            let upper = (size as f64).max(1.0);
            draw(&Uniform::new(0.0, upper).map_err(invalid)?, size, 1.0, rng)
        }
        Shape::MixOfGauss => mix_of_gauss(size, rng)?,
        Shape::ChiSquared => {
            draw(&ChiSquared::new(CHI_SQUARED_K).map_err(invalid)?, size, scale, rng)
        }
        Shape::Zipf => {
            draw(&Zipf::new(ZIPF_CARDINALITY, ZIPF_SKEW).map_err(invalid)?, size, 1.0, rng)
        }
        Shape::RootDups => {
            let root = ((size as f64).sqrt() as usize).max(1);
            (0..size).map(|i| (i % root) as f64).collect()
        }
        Shape::Identical => vec![0.0; size],
    };
    Ok(values)
}

/// Draws `size` values of the given shape and type.
pub fn generate<R: Rng + ?Sized>(
    shape: Shape,
    size: usize,
    kind: ColumnKind,
    rng: &mut R,
) -> Result<ColumnData> {
    let raw = draw_shape(shape, size, kind, rng)?;
    let mut data = match kind {
        ColumnKind::Unsigned => ColumnData::Unsigned(raw.into_iter().map(|x| x as u64).collect()),
        ColumnKind::Float => ColumnData::Float(raw),
    };

    if matches!(shape, Shape::SortedUniform | Shape::ReverseSortedUniform) {
        match &mut data {
            ColumnData::Unsigned(v) => v.sort_unstable(),
            ColumnData::Float(v) => v.sort_unstable_by(|a, b| a.total_cmp(b)),
        }
        if shape == Shape::ReverseSortedUniform {
            match &mut data {
                ColumnData::Unsigned(v) => v.reverse(),
                ColumnData::Float(v) => v.reverse(),
            }
        }
    }
    Ok(data)
}

use std::fmt;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indicatif::ProgressBar;

use crate::error::{Error, Result};
use crate::files::open_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Unsigned,
    Float,
}

impl ColumnKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnKind::Unsigned => "u64",
            ColumnKind::Float => "f64",
        }
    }
}

/// A named column of a text dataset, stored in `<name>.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(name: &str, kind: ColumnKind) -> Self {
        ColumnSpec { name: name.to_owned(), kind }
    }

    // Plain text is preferred over the gzipped variant if both exist.
    pub fn input_candidates(&self, dir: &Path) -> Vec<PathBuf> {
        vec![
            dir.join(format!("{}.txt", self.name)),
            dir.join(format!("{}.txt.gz", self.name)),
        ]
    }
}

impl FromStr for ColumnSpec {
    type Err = Error;

    // Parses "Start:u64" or "Tot:f64"
    fn from_str(s: &str) -> Result<Self> {
        let (name, kind) = s
            .rsplit_once(':')
            .ok_or_else(|| Error::InvalidColumnSpec(s.to_owned()))?;
        let kind = match kind {
            "u64" => ColumnKind::Unsigned,
            "f64" => ColumnKind::Float,
            _ => return Err(Error::InvalidColumnSpec(s.to_owned())),
        };
        if name.is_empty() {
            return Err(Error::InvalidColumnSpec(s.to_owned()));
        }
        Ok(ColumnSpec::new(name, kind))
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.kind.type_name())
    }
}

/// Values of a loaded column, typed by its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Unsigned(Vec<u64>),
    Float(Vec<f64>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Unsigned(v) => v.len(),
            ColumnData::Float(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_f64(&self) -> Vec<f64> {
        match self {
            ColumnData::Unsigned(v) => v.iter().map(|x| *x as f64).collect(),
            ColumnData::Float(v) => v.clone(),
        }
    }
}

pub fn load_column_data(path: &Path, kind: ColumnKind) -> Result<ColumnData> {
    match kind {
        ColumnKind::Unsigned => {
            load_column::<u64>(path, kind.type_name()).map(ColumnData::Unsigned)
        }
        ColumnKind::Float => load_column::<f64>(path, kind.type_name()).map(ColumnData::Float),
    }
}

// Reads one value per line. Blank lines are skipped, there is no header.
pub fn load_column<T: FromStr>(path: &Path, expected: &'static str) -> Result<Vec<T>> {
    let reader = open_text(path)?;
    read_column(reader, path, expected)
}

pub fn read_column<T: FromStr>(
    reader: impl BufRead,
    path: &Path,
    expected: &'static str,
) -> Result<Vec<T>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Loading {}", path.display()));

    let mut values = Vec::<T>::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io(path, e))?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let x = text.parse::<T>().map_err(|_| Error::Parse {
            path: path.to_path_buf(),
            line: i + 1,
            text: text.to_owned(),
            expected,
        })?;
        values.push(x);
        if values.len() % (1 << 20) == 0 {
            spinner.tick();
        }
    }

    spinner.finish_and_clear();
    Ok(values)
}

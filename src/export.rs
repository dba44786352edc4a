use std::fmt::Display;
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;
use crate::files::write_atomically;

/// Writes the values in decimal, one per line. Lines are joined with '\n'
/// so the file does not end in a newline.
pub fn write_values<T: Display>(path: &Path, values: &[T]) -> Result<()> {
    let bar = ProgressBar::new(values.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}") {
        bar.set_style(style);
    }
    bar.set_message(format!("Writing {}", path.display()));

    write_atomically(path, |out| {
        for (i, x) in values.iter().enumerate() {
            if i > 0 {
                out.write_all(b"\n")?;
            }
            write!(out, "{}", x)?;
            if i % (1 << 16) == 0 {
                bar.set_position(i as u64);
            }
        }
        Ok(())
    })?;

    bar.finish_and_clear();
    Ok(())
}

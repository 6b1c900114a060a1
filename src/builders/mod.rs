//! Builders for the lookup tables consumed by a conversion run.
//!
//! Both builders stream a single triple dump with the same line conventions as
//! the converter: the first line is a header, `#` lines are comments, and an
//! optional ceiling stops reading early.

pub mod instance_types;
pub mod vertex_set;

pub use instance_types::{build_instance_types, generate_instance_types};
pub use vertex_set::{build_vertex_set, generate_vertex_set};

use std::time::Instant;

use tracing::info;

use crate::error::Result;

/// Line handling shared by the builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Line ceiling; 0 reads everything.
    pub max_lines: u64,
    pub progress_interval: u64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self { max_lines: 0, progress_interval: 100_000 }
    }
}

/// Feed every data line to `visit` and return how many lines followed the header.
fn scan_data_lines<I, F>(lines: I, options: ScanOptions, mut visit: F) -> Result<u64>
where
    I: IntoIterator<Item = Result<String>>,
    F: FnMut(u64, &str),
{
    let started = Instant::now();
    let mut current_line: u64 = 0;

    for line in lines {
        let line = line?;
        if current_line != 0 && !line.starts_with('#') {
            visit(current_line, &line);
        }
        current_line += 1;

        if options.progress_interval > 0 && current_line % options.progress_interval == 0 {
            info!(
                lines = current_line,
                elapsed_secs = started.elapsed().as_secs_f64(),
                "progress"
            );
        }
        if options.max_lines > 0 && current_line > options.max_lines {
            break;
        }
    }

    Ok(current_line.saturating_sub(1))
}

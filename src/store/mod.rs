//! The flat-file table engine.
//!
//! Every entity lives in a plain text table: one file, one record per line,
//! comma-separated fields. Records are created by append, mutated by a full
//! rewrite through a temp sibling, and deleted by omission during a rewrite.
//! There is no cache and no index; every operation re-reads from disk.

pub mod alloc;
pub mod rewrite;
pub mod scan;

pub use alloc::next_id;
pub use rewrite::{rewrite_where, swap_in, RewriteAction};
pub use scan::{find_first, scan_all, scan_where};

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{Result, ShopError};

/// A parsed row of a flat-file table.
pub trait TableRecord: Sized {
    /// Table name used in diagnostics.
    const TABLE: &'static str;

    /// Parse a single table line into a record.
    fn parse_line(line: &str) -> Result<Self>;

    /// Serialize back to a table line: fixed field order, fixed precision.
    fn to_line(&self) -> String;
}

/// Append one record to a table, creating the file if needed.
pub fn append_record<R: TableRecord>(path: &Path, record: &R) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", record.to_line())?;
    Ok(())
}

/// Required numeric field; a missing or malformed value fails the line.
pub(crate) fn req_u32(fields: &[&str], idx: usize, table: &'static str) -> Result<u32> {
    let raw = fields.get(idx).map_or("", |s| s.trim());
    raw.parse().map_err(|_| ShopError::Parse {
        table,
        detail: format!("field {idx} is not a number: {raw:?}"),
    })
}

/// Optional trailing numeric field; missing or empty yields zero, but a
/// value that is present and malformed still fails the line.
pub(crate) fn opt_u32(fields: &[&str], idx: usize, table: &'static str) -> Result<u32> {
    match fields.get(idx).map(|s| s.trim()) {
        None | Some("") => Ok(0),
        Some(raw) => raw.parse().map_err(|_| ShopError::Parse {
            table,
            detail: format!("field {idx} is not a number: {raw:?}"),
        }),
    }
}

/// Optional trailing decimal field, same rules as [`opt_u32`].
pub(crate) fn opt_f64(fields: &[&str], idx: usize, table: &'static str) -> Result<f64> {
    match fields.get(idx).map(|s| s.trim()) {
        None | Some("") => Ok(0.0),
        Some(raw) => raw.parse().map_err(|_| ShopError::Parse {
            table,
            detail: format!("field {idx} is not a number: {raw:?}"),
        }),
    }
}

/// Optional trailing string field; missing yields an empty string.
pub(crate) fn opt_str(fields: &[&str], idx: usize) -> String {
    fields.get(idx).map_or_else(String::new, |s| (*s).to_string())
}

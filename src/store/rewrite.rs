use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Decision for a single line during a table rewrite.
pub enum RewriteAction {
    /// Carry the line through unchanged.
    Keep,
    /// Write this serialization instead of the original line.
    Replace(String),
    /// Omit the line from the replacement file.
    Drop,
}

/// Sibling temp path used while a replacement file is being built.
fn temp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".tmp");
    PathBuf::from(os)
}

/// Rewrite a table by streaming every line through a decision function.
///
/// The replacement is built in a `<file>.tmp` sibling and then swapped in
/// via remove + rename. Returns `Ok(false)` without touching the original
/// when no line was replaced or dropped; the temp file is deleted in that
/// case and on any failure that leaves the original in place. Empty lines
/// are carried through; the decision function only sees non-empty lines,
/// so unparseable rows can be kept verbatim by returning `Keep`.
pub fn rewrite_where<F>(path: &Path, decide: F) -> Result<bool>
where
    F: FnMut(&str) -> RewriteAction,
{
    let tmp = temp_path(path);
    match write_temp(path, &tmp, decide) {
        Ok(false) => {
            let _ = fs::remove_file(&tmp);
            Ok(false)
        }
        Ok(true) => {
            replace_original(path, &tmp)?;
            Ok(true)
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

/// Replace a table wholesale with fully materialized lines, through the
/// same temp-then-swap protocol as [`rewrite_where`].
pub fn swap_in(path: &Path, lines: &[String]) -> Result<()> {
    let tmp = temp_path(path);
    let write = || -> Result<()> {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        for line in lines {
            writeln!(writer, "{line}")?;
        }
        writer.flush()?;
        Ok(())
    };
    if let Err(e) = write() {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    replace_original(path, &tmp)
}

/// Stream the input through the decision function into the temp file.
/// Returns whether anything was replaced or dropped.
fn write_temp<F>(path: &Path, tmp: &Path, mut decide: F) -> Result<bool>
where
    F: FnMut(&str) -> RewriteAction,
{
    let input = File::open(path)?;
    let mut writer = BufWriter::new(File::create(tmp)?);
    let mut changed = false;

    for line in BufReader::new(input).lines() {
        let line = line?;
        if line.trim().is_empty() {
            writeln!(writer)?;
            continue;
        }
        match decide(&line) {
            RewriteAction::Keep => writeln!(writer, "{line}")?,
            RewriteAction::Replace(new_line) => {
                changed = true;
                writeln!(writer, "{new_line}")?;
            }
            RewriteAction::Drop => changed = true,
        }
    }
    writer.flush()?;
    Ok(changed)
}

/// Remove the original and move the temp file into its place.
///
/// If the remove fails the original is intact and the temp is cleaned up.
/// If the rename fails after a successful remove, the temp file is left on
/// disk as the only copy of the new data; there is no backup-then-swap
/// protecting this window.
fn replace_original(path: &Path, tmp: &Path) -> Result<()> {
    if let Err(e) = fs::remove_file(path) {
        let _ = fs::remove_file(tmp);
        return Err(e.into());
    }
    fs::rename(tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn table(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("table.txt");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn replace_rewrites_matching_line() {
        let tmp = TempDir::new().unwrap();
        let path = table(&tmp, "1,a\n2,b\n3,c\n");
        let found = rewrite_where(&path, |line| {
            if line.starts_with("2,") {
                RewriteAction::Replace("2,B".to_string())
            } else {
                RewriteAction::Keep
            }
        })
        .unwrap();
        assert!(found);
        assert_eq!(fs::read_to_string(&path).unwrap(), "1,a\n2,B\n3,c\n");
    }

    #[test]
    fn drop_removes_line() {
        let tmp = TempDir::new().unwrap();
        let path = table(&tmp, "1,a\n2,b\n3,c\n");
        let found = rewrite_where(&path, |line| {
            if line.starts_with("2,") {
                RewriteAction::Drop
            } else {
                RewriteAction::Keep
            }
        })
        .unwrap();
        assert!(found);
        assert_eq!(fs::read_to_string(&path).unwrap(), "1,a\n3,c\n");
    }

    #[test]
    fn no_match_leaves_original_and_no_temp() {
        let tmp = TempDir::new().unwrap();
        let path = table(&tmp, "1,a\n2,b\n");
        let found = rewrite_where(&path, |_| RewriteAction::Keep).unwrap();
        assert!(!found);
        assert_eq!(fs::read_to_string(&path).unwrap(), "1,a\n2,b\n");
        assert!(!path.with_extension("txt.tmp").exists());
    }

    #[test]
    fn empty_lines_are_preserved() {
        let tmp = TempDir::new().unwrap();
        let path = table(&tmp, "1,a\n\n2,b\n");
        rewrite_where(&path, |line| {
            if line.starts_with("2,") {
                RewriteAction::Replace("2,B".to_string())
            } else {
                RewriteAction::Keep
            }
        })
        .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1,a\n\n2,B\n");
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = rewrite_where(&tmp.path().join("missing.txt"), |_| RewriteAction::Keep);
        assert!(result.is_err());
    }

    #[test]
    fn swap_in_replaces_whole_file() {
        let tmp = TempDir::new().unwrap();
        let path = table(&tmp, "old\n");
        swap_in(&path, &["1,a".to_string(), "2,b".to_string()]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1,a\n2,b\n");
        assert!(!path.with_extension("txt.tmp").exists());
    }
}

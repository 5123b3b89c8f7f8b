use std::fs;
use std::path::Path;

use tracing::warn;

use super::TableRecord;

/// Scan a table for records matching a predicate.
///
/// Two full passes over the file's lines: the first counts matches so the
/// result buffer is allocated at its exact final length, the second
/// populates it. Results keep file order.
///
/// An absent or unreadable file yields an empty result, not an error.
/// Empty lines are skipped silently; malformed lines are skipped with a
/// warning and the scan continues.
pub fn scan_where<R, F>(path: &Path, pred: F) -> Vec<R>
where
    R: TableRecord,
    F: Fn(&R) -> bool,
{
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(table = R::TABLE, path = %path.display(), "cannot open table: {e}");
            return Vec::new();
        }
    };

    // Counting pass: parse failures are silent here, the fill pass warns.
    let matches = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| R::parse_line(line).ok())
        .filter(|record| pred(record))
        .count();

    let mut records = Vec::with_capacity(matches);
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match R::parse_line(line) {
            Ok(record) => {
                if pred(&record) {
                    records.push(record);
                }
            }
            Err(e) => warn!(table = R::TABLE, "skipping malformed line: {e}"),
        }
    }
    records
}

/// All records of a table, in file order.
pub fn scan_all<R: TableRecord>(path: &Path) -> Vec<R> {
    scan_where(path, |_| true)
}

/// First record matching the predicate; single pass, stops at the match.
pub fn find_first<R, F>(path: &Path, pred: F) -> Option<R>
where
    R: TableRecord,
    F: Fn(&R) -> bool,
{
    let content = fs::read_to_string(path).ok()?;
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match R::parse_line(line) {
            Ok(record) => {
                if pred(&record) {
                    return Some(record);
                }
            }
            Err(e) => warn!(table = R::TABLE, "skipping malformed line: {e}"),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::Product;
    use tempfile::TempDir;

    fn write_table(dir: &TempDir, lines: &str) -> std::path::PathBuf {
        let path = dir.path().join("products.txt");
        std::fs::write(&path, lines).unwrap();
        path
    }

    #[test]
    fn absent_file_yields_empty() {
        let tmp = TempDir::new().unwrap();
        let records: Vec<Product> = scan_all(&tmp.path().join("missing.txt"));
        assert!(records.is_empty());
    }

    #[test]
    fn scan_keeps_file_order() {
        let tmp = TempDir::new().unwrap();
        let path = write_table(
            &tmp,
            "103,Webcam,Electronics,49.99,4.0,3\n101,Mouse,Electronics,19.99,4.5,10\n",
        );
        let records: Vec<Product> = scan_all(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 103);
        assert_eq!(records[1].id, 101);
    }

    #[test]
    fn malformed_and_empty_lines_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let path = write_table(
            &tmp,
            "101,Mouse,Electronics,19.99,4.5,10\n\nnot-a-record\n102,Desk,Furniture,89.00,0.0,2\n",
        );
        let records: Vec<Product> = scan_all(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "Desk");
    }

    #[test]
    fn predicate_filters() {
        let tmp = TempDir::new().unwrap();
        let path = write_table(
            &tmp,
            "101,Mouse,Electronics,19.99,4.5,10\n102,Desk,Furniture,89.00,0.0,2\n",
        );
        let records: Vec<Product> = scan_where(&path, |p: &Product| p.category == "Furniture");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 102);
    }

    #[test]
    fn find_first_returns_first_match() {
        let tmp = TempDir::new().unwrap();
        let path = write_table(
            &tmp,
            "101,Mouse,Electronics,19.99,4.5,10\n102,Desk,Furniture,89.00,0.0,2\n",
        );
        let record: Option<Product> = find_first(&path, |p: &Product| p.id == 102);
        assert_eq!(record.unwrap().name, "Desk");
        let missing: Option<Product> = find_first(&path, |p: &Product| p.id == 999);
        assert!(missing.is_none());
    }
}

use std::fs;
use std::path::Path;

use tracing::warn;

/// Compute the next record ID for a table.
///
/// One linear scan taking the max of the first field; the result is
/// `max + 1`, or `base` when the file is absent or holds no parseable IDs.
/// Malformed ID fields are warned and do not influence the max. The value
/// is a pure function of file contents; there is no counter state, so
/// calling this twice without a write returns the same ID.
pub fn next_id(path: &Path, base: u32) -> u32 {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return base,
    };

    let mut max_id = 0u32;
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let first = line.split(',').next().unwrap_or("").trim();
        match first.parse::<u32>() {
            Ok(id) => max_id = max_id.max(id),
            Err(_) => {
                warn!(path = %path.display(), "ignoring unparseable id: {first:?}");
            }
        }
    }

    if max_id == 0 {
        base
    } else {
        max_id + 1
    }
}

//! Write the lookup result to a flat text file.

use crate::error::StageError;
use std::io::Write;
use std::path::Path;

/// File content: the zone, then the regions joined by `", "`.
pub fn render(time_zone: &str, regions: &[String]) -> String {
    format!("{time_zone}\n{}\n", regions.join(", "))
}

/// Create or truncate `path` and write the result.
pub fn write_regions(path: &Path, time_zone: &str, regions: &[String]) -> Result<(), StageError> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(render(time_zone, regions).as_bytes())?;
    file.flush()?;
    Ok(())
}

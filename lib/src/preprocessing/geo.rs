//! Postal code to coordinate lookup.
//!
//! The reference table is a semicolon-separated file with at least the columns
//! `Post code` and `Geo Point`, where `Geo Point` reads `"<lat>,<lon>"`:
//!
//! ```text
//! Post code;Municipality name;Geo Point
//! 1000;Brussel;50.8427501,4.3515499
//! ```
//!
//! The index is built once at startup and is read-only afterwards.

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{info, warn};

use crate::error::StartupError;
use crate::record::PostalCode;

const POST_CODE_COLUMN: &str = "Post code";
const GEO_POINT_COLUMN: &str = "Geo Point";

/// WGS84 coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse a `"<lat>,<lon>"` string.
    pub fn parse(text: &str) -> Option<Self> {
        let (lat, lon) = text.split_once(',')?;
        let latitude: f64 = lat.trim().parse().ok()?;
        let longitude: f64 = lon.trim().parse().ok()?;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Self::new(latitude, longitude))
    }
}

/// Immutable postal code to coordinate index.
#[derive(Clone, Debug, Default)]
pub struct GeoIndex {
    points: HashMap<u16, GeoPoint>,
}

impl GeoIndex {
    /// Load the reference table from disk.
    ///
    /// # Errors
    /// A missing file, a missing column, an unparsable row or an empty table
    /// are all [`StartupError::GeoTable`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StartupError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| StartupError::GeoTable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let index = Self::from_reader(BufReader::new(file)).map_err(|reason| {
            StartupError::GeoTable {
                path: path.to_path_buf(),
                reason,
            }
        })?;
        info!(path = %path.display(), entries = index.len(), "geo index loaded");
        Ok(index)
    }

    /// Build the index from any reader over the semicolon-separated table.
    ///
    /// When a postal code appears more than once the first row wins.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, String> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b';')
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| format!("failed to read header: {}", e))?
            .clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == name)
                .ok_or_else(|| format!("missing column '{}'", name))
        };
        let code_idx = column(POST_CODE_COLUMN)?;
        let point_idx = column(GEO_POINT_COLUMN)?;

        let mut points = HashMap::new();
        for (row, result) in rdr.records().enumerate() {
            // header is line 1
            let line = row + 2;
            let record = result.map_err(|e| format!("line {}: {}", line, e))?;
            let code_text = record
                .get(code_idx)
                .ok_or_else(|| format!("line {}: missing '{}'", line, POST_CODE_COLUMN))?;
            let code = PostalCode::parse(code_text)
                .map_err(|e| format!("line {}: {}", line, e))?
                .value();
            let point_text = record
                .get(point_idx)
                .ok_or_else(|| format!("line {}: missing '{}'", line, GEO_POINT_COLUMN))?;
            let point = GeoPoint::parse(point_text)
                .ok_or_else(|| format!("line {}: invalid geo point '{}'", line, point_text))?;

            if points.contains_key(&code) {
                warn!(code, line, "duplicate postal code in geo table, keeping first");
                continue;
            }
            points.insert(code, point);
        }

        if points.is_empty() {
            return Err("table has no rows".to_string());
        }
        Ok(Self { points })
    }

    /// Build an index from in-memory pairs.
    pub fn from_points<I: IntoIterator<Item = (PostalCode, GeoPoint)>>(points: I) -> Self {
        let mut index = HashMap::new();
        for (code, point) in points {
            index.entry(code.value()).or_insert(point);
        }
        Self { points: index }
    }

    /// Coordinates for a postal code, `None` when the table has no entry.
    pub fn lookup(&self, code: PostalCode) -> Option<GeoPoint> {
        self.points.get(&code.value()).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TABLE: &str = "\
Post code;Municipality name (French);Geo Point
1000;Bruxelles;50.8427501,4.3515499
9000;Gent;51.0500000,3.7166700
4000;Liège;50.6325574,5.5796662
";

    fn code(text: &str) -> PostalCode {
        PostalCode::parse(text).unwrap()
    }

    #[test]
    fn test_geo_index_lookup() {
        let index = GeoIndex::from_reader(TABLE.as_bytes()).unwrap();
        assert_eq!(index.len(), 3);

        let brussels = index.lookup(code("1000")).unwrap();
        assert!((brussels.latitude - 50.8427501).abs() < 1e-9);
        assert!((brussels.longitude - 4.3515499).abs() < 1e-9);

        assert_eq!(index.lookup(code("8000")), None);
    }

    #[test]
    fn test_geo_index_first_row_wins() {
        let table = "Post code;Geo Point\n1000;50.0,4.0\n1000;51.0,5.0\n";
        let index = GeoIndex::from_reader(table.as_bytes()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup(code("1000")), Some(GeoPoint::new(50.0, 4.0)));
    }

    #[test]
    fn test_geo_index_missing_column() {
        let table = "Post code;Municipality\n1000;Bruxelles\n";
        let err = GeoIndex::from_reader(table.as_bytes()).unwrap_err();
        assert!(err.contains("Geo Point"));
    }

    #[test]
    fn test_geo_index_malformed_point() {
        let table = "Post code;Geo Point\n1000;50.84\n";
        let err = GeoIndex::from_reader(table.as_bytes()).unwrap_err();
        assert!(err.contains("line 2"));
    }

    #[test]
    fn test_geo_index_malformed_code() {
        let table = "Post code;Geo Point\nABCD;50.8,4.3\n";
        assert!(GeoIndex::from_reader(table.as_bytes()).is_err());
    }

    #[test]
    fn test_geo_index_empty_table() {
        let table = "Post code;Geo Point\n";
        assert!(GeoIndex::from_reader(table.as_bytes()).is_err());
    }

    #[test]
    fn test_geo_index_load_from_file() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("georef.csv");
        let mut file = File::create(&path)?;
        file.write_all(TABLE.as_bytes())?;

        let index = GeoIndex::load(&path)?;
        assert!(index.lookup(code("9000")).is_some());
        Ok(())
    }

    #[test]
    fn test_geo_index_missing_file_is_fatal() {
        let result = GeoIndex::load("/nonexistent/georef.csv");
        assert!(matches!(result, Err(StartupError::GeoTable { .. })));
    }

    #[test]
    fn test_geo_point_parse() {
        assert_eq!(GeoPoint::parse("50.5, 4.5"), Some(GeoPoint::new(50.5, 4.5)));
        assert_eq!(GeoPoint::parse("50.5"), None);
        assert_eq!(GeoPoint::parse("north,east"), None);
        assert_eq!(GeoPoint::parse("95.0,4.0"), None);
    }
}

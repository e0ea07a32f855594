//! CSV Loading
//!
//! Reads the metrics and coordinates tables, normalizing every header key
//! before records are deserialized, and joins them on the country key.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::error::{DatasetError, DatasetResult};
use super::types::{CoordinateRow, JoinedRow, Metric, MetricsRow, WORLD};

/// Header renames applied after normalization
const COLUMN_ALIASES: [(&str, &str); 2] = [("entity", "country"), ("prevelance", "prevalence")];

const COORDINATE_COLUMNS: [&str; 4] = ["country", "latitude", "longitude", "population"];

/// Normalize a column key: trimmed, lower-cased, whitespace runs as `_`,
/// known aliases resolved.
pub fn normalize_column_key(raw: &str) -> String {
    let key = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();

    COLUMN_ALIASES
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| to.to_string())
        .unwrap_or(key)
}

/// Normalize every key of a header record
pub fn normalize_headers(headers: &csv::StringRecord) -> csv::StringRecord {
    headers.iter().map(normalize_column_key).collect()
}

fn metrics_columns() -> Vec<&'static str> {
    let mut columns = vec!["country", "year"];
    columns.extend(Metric::ALL.iter().map(|m| m.key()));
    columns
}

fn csv_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).trim(csv::Trim::All);
    builder
}

/// Deserialize every record after normalizing and checking the header
fn read_table<T, R>(
    mut reader: csv::Reader<R>,
    source: &Path,
    required: &[&str],
) -> DatasetResult<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let headers = reader
        .headers()
        .map_err(|e| DatasetError::csv(source, e))?
        .clone();
    let headers = normalize_headers(&headers);

    if let Some(column) = required.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        return Err(DatasetError::MissingColumn {
            path: source.to_path_buf(),
            column: column.to_string(),
        });
    }

    reader.set_headers(headers);

    reader
        .deserialize()
        .map(|record| record.map_err(|e| DatasetError::csv(source, e)))
        .collect()
}

fn drop_world(rows: Vec<MetricsRow>) -> Vec<MetricsRow> {
    let total = rows.len();
    let rows: Vec<MetricsRow> = rows.into_iter().filter(|r| r.country != WORLD).collect();
    if rows.len() < total {
        tracing::debug!(excluded = total - rows.len(), "Dropped aggregate World rows");
    }
    rows
}

/// Load the metrics table from a file, excluding the aggregate World rows
pub fn load_metrics(path: &Path) -> DatasetResult<Vec<MetricsRow>> {
    let reader = csv_builder()
        .from_path(path)
        .map_err(|e| DatasetError::csv(path, e))?;
    let rows = drop_world(read_table(reader, path, &metrics_columns())?);

    tracing::info!(rows = rows.len(), path = ?path, "Loaded metrics table");
    Ok(rows)
}

/// Load the metrics table from any reader; `source` names it in errors
pub fn metrics_from_reader<R: Read>(reader: R, source: &Path) -> DatasetResult<Vec<MetricsRow>> {
    let reader = csv_builder().from_reader(reader);
    Ok(drop_world(read_table(reader, source, &metrics_columns())?))
}

/// Load the coordinates table from a file
pub fn load_coordinates(path: &Path) -> DatasetResult<Vec<CoordinateRow>> {
    let reader = csv_builder()
        .from_path(path)
        .map_err(|e| DatasetError::csv(path, e))?;
    let rows: Vec<CoordinateRow> = read_table(reader, path, &COORDINATE_COLUMNS)?;

    tracing::info!(rows = rows.len(), path = ?path, "Loaded coordinates table");
    Ok(rows)
}

/// Load the coordinates table from any reader
pub fn coordinates_from_reader<R: Read>(
    reader: R,
    source: &Path,
) -> DatasetResult<Vec<CoordinateRow>> {
    let reader = csv_builder().from_reader(reader);
    read_table(reader, source, &COORDINATE_COLUMNS)
}

/// Inner join on country, keeping metrics-table order.
///
/// Rows without a coordinate match are dropped; a country listed several
/// times in the coordinates table produces one joined row per listing.
pub fn inner_join(metrics: &[MetricsRow], coordinates: &[CoordinateRow]) -> Vec<JoinedRow> {
    let mut by_country: HashMap<&str, Vec<&CoordinateRow>> = HashMap::new();
    for coords in coordinates {
        by_country
            .entry(coords.country.as_str())
            .or_default()
            .push(coords);
    }

    let joined: Vec<JoinedRow> = metrics
        .iter()
        .flat_map(|row| {
            by_country
                .get(row.country.as_str())
                .into_iter()
                .flatten()
                .map(move |coords| JoinedRow::new(row.clone(), coords))
        })
        .collect();

    if joined.is_empty() && !metrics.is_empty() {
        tracing::warn!("Join produced no rows; geo chart will be empty");
    }

    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const METRICS_CSV: &str = "\
Country,Year,prevelance,suicide_rate,anxiety_disorder,eating_disorder,drug_use_disorders,bipolar_disorder,alcohol_use_disorders ,prevalence_in_males,prevalence_in_females
France,2015,4.1,13.1,6.2,0.3,0.9,0.8,1.4,3.0,5.1
World,2015,3.4,10.5,3.8,0.2,0.9,0.6,1.4,2.7,4.1
Chile,2015,3.2,10.2,5.1,,0.7,0.9,2.5,2.4,4.0
";

    const COORDS_CSV: &str = "\
entity,latitude,longitude,population
France,46.2,2.2,67000000
World,0,0,7300000000
";

    #[test]
    fn test_normalize_column_key() {
        assert_eq!(normalize_column_key("alcohol_use_disorders "), "alcohol_use_disorders");
        assert_eq!(normalize_column_key(" Suicide Rate"), "suicide_rate");
        assert_eq!(normalize_column_key("Entity"), "country");
        assert_eq!(normalize_column_key("prevelance"), "prevalence");
        assert_eq!(normalize_column_key("year"), "year");
    }

    #[test]
    fn test_metrics_from_reader() {
        let rows = metrics_from_reader(METRICS_CSV.as_bytes(), Path::new("merged.csv")).unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.country != WORLD));
        assert_eq!(rows[0].prevalence, 4.1);
        assert_eq!(rows[0].alcohol_use_disorders, 1.4);
        assert_eq!(rows[0].prevalence_in_females, Some(5.1));
        // Empty cell loads as NaN
        assert!(rows[1].eating_disorder.is_nan());
    }

    #[test]
    fn test_coordinates_entity_renamed() {
        let rows =
            coordinates_from_reader(COORDS_CSV.as_bytes(), Path::new("coordinates.csv")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].country, "France");
        assert_eq!(rows[0].population, 67_000_000.0);
    }

    #[test]
    fn test_missing_column() {
        let csv = "country,year,prevalence\nFrance,2015,4.1\n";
        let err = metrics_from_reader(csv.as_bytes(), Path::new("merged.csv")).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MissingColumn { ref column, .. } if column == "suicide_rate"
        ));
    }

    #[test]
    fn test_malformed_record() {
        let csv = "entity,latitude,longitude,population\nFrance,north,2.2,1\n";
        let err = coordinates_from_reader(csv.as_bytes(), Path::new("coordinates.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Csv { .. }));
    }

    #[test]
    fn test_load_from_files() {
        let mut metrics = tempfile::NamedTempFile::new().unwrap();
        metrics.write_all(METRICS_CSV.as_bytes()).unwrap();
        let mut coords = tempfile::NamedTempFile::new().unwrap();
        coords.write_all(COORDS_CSV.as_bytes()).unwrap();

        assert_eq!(load_metrics(metrics.path()).unwrap().len(), 2);
        assert_eq!(load_coordinates(coords.path()).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_file_fails() {
        let err = load_metrics(Path::new("/nonexistent/merged.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Csv { .. }));
    }

    #[test]
    fn test_inner_join() {
        let metrics = vec![
            MetricsRow::new("France", 2015, 1.0),
            MetricsRow::new("Chile", 2015, 1.0),
            MetricsRow::new("France", 2016, 1.0),
        ];
        let coords = vec![
            CoordinateRow::new("France", 46.2, 2.2, 67e6),
            CoordinateRow::new("Peru", -9.2, -75.0, 32e6),
        ];

        let joined = inner_join(&metrics, &coords);

        assert_eq!(joined.len(), 2);
        assert!(joined.iter().all(|r| r.country() == "France"));
        assert_eq!(joined[0].year(), 2015);
        assert_eq!(joined[1].year(), 2016);
        assert_eq!(joined[0].latitude, 46.2);
    }

    #[test]
    fn test_inner_join_duplicate_coordinates() {
        let metrics = vec![MetricsRow::new("France", 2015, 1.0)];
        let coords = vec![
            CoordinateRow::new("France", 46.2, 2.2, 67e6),
            CoordinateRow::new("France", 4.0, -53.0, 0.3e6),
        ];
        assert_eq!(inner_join(&metrics, &coords).len(), 2);
    }

    #[test]
    fn test_inner_join_empty() {
        let metrics = vec![MetricsRow::new("France", 2015, 1.0)];
        assert!(inner_join(&metrics, &[]).is_empty());
    }
}

//! Output formatting and persistence for derived views.
//!
//! Supports pretty-printing, JSON serialization, and CSV export for the
//! download path.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::Observation;
use crate::table::{DATE_FORMAT, Line, NormalizedTable};
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;

/// Logs a derived view using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(view: &T) {
    debug!("{:#?}", view);
}

/// Logs a derived view as pretty-printed JSON.
pub fn print_json(view: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

/// Writes the normalized table as comma-separated UTF-8 text: a header
/// row, then one row per record, dates as `YYYY-MM-DD`, missing counts as
/// empty fields. Round-trips losslessly through the parser.
pub fn write_table_csv<W: Write>(table: &NormalizedTable, writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);

    for record in table.to_records() {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Writes a per-line projection as two-column CSV: `date` and the line's
/// identifier.
pub fn write_projection_csv<W: Write>(
    line: Line,
    points: &[Observation],
    writer: W,
) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);

    csv_writer.write_record(["date", line.as_str()])?;
    for point in points {
        csv_writer.write_record([
            point.date.format(DATE_FORMAT).to_string(),
            point.value.to_string(),
        ])?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Writes the normalized table to a file for user download.
pub fn export_table(path: &str, table: &NormalizedTable) -> Result<()> {
    debug!(path, rows = table.len(), "Exporting table as CSV");
    write_table_csv(table, File::create(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RawRecord;
    use std::env;
    use std::fs;
    use std::path::Path;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_table() -> NormalizedTable {
        NormalizedTable::normalize(vec![
            RawRecord {
                date: "2024-01-01".to_string(),
                bus_rkl: Some(100),
                ..Default::default()
            },
            RawRecord {
                date: "2024-01-02".to_string(),
                bus_rkl: None,
                rail_lrt_kj: Some(250),
                ..Default::default()
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_table());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_table()).unwrap();
    }

    #[test]
    fn test_write_table_csv_header_and_blanks() {
        let mut buffer = Vec::new();
        write_table_csv(&sample_table(), &mut buffer).unwrap();

        let content = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = content.lines().collect();
        // 1 header + 2 data rows
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("date,bus_rkl,"));
        // Missing bus_rkl on the second row is an empty field
        assert!(lines[2].starts_with("2024-01-02,,"));
    }

    #[test]
    fn test_write_projection_csv_format() {
        let points = vec![Observation {
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            value: 100,
        }];

        let mut buffer = Vec::new();
        write_projection_csv(Line::BusRkl, &points, &mut buffer).unwrap();

        let content = String::from_utf8(buffer).unwrap();
        assert_eq!(content, "date,bus_rkl\n2024-01-01,100\n");
    }

    #[test]
    fn test_export_table_creates_file() {
        let path = temp_path("ridership_insights_test_export.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        export_table(&path, &sample_table()).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("2024-01-01"));

        fs::remove_file(&path).unwrap();
    }
}

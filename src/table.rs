//! The line vocabulary and the normalized ridership table.
//!
//! The table is built once from raw CSV records and is immutable
//! afterwards; every derived view reads it by reference and allocates
//! its own output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Date representation used for parsing input and formatting exports.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One of the 12 known bus and rail services in the headline dataset.
///
/// Variants are declared in the dataset's published column order, which
/// is also the index order of [`RidershipRow`] counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Line {
    BusRkl,
    BusRkn,
    BusRpn,
    RailLrtAmpang,
    RailLrtKj,
    RailMonorail,
    RailMrtKajang,
    RailMrtPjy,
    RailEts,
    RailKomuter,
    RailTebrau,
    RailIntercity,
}

impl Line {
    /// Every known line, in column order.
    pub const ALL: [Line; 12] = [
        Line::BusRkl,
        Line::BusRkn,
        Line::BusRpn,
        Line::RailLrtAmpang,
        Line::RailLrtKj,
        Line::RailMonorail,
        Line::RailMrtKajang,
        Line::RailMrtPjy,
        Line::RailEts,
        Line::RailKomuter,
        Line::RailTebrau,
        Line::RailIntercity,
    ];

    /// The dataset column name for this line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Line::BusRkl => "bus_rkl",
            Line::BusRkn => "bus_rkn",
            Line::BusRpn => "bus_rpn",
            Line::RailLrtAmpang => "rail_lrt_ampang",
            Line::RailLrtKj => "rail_lrt_kj",
            Line::RailMonorail => "rail_monorail",
            Line::RailMrtKajang => "rail_mrt_kajang",
            Line::RailMrtPjy => "rail_mrt_pjy",
            Line::RailEts => "rail_ets",
            Line::RailKomuter => "rail_komuter",
            Line::RailTebrau => "rail_tebrau",
            Line::RailIntercity => "rail_intercity",
        }
    }

    /// Human-readable service name, as published in the dataset description.
    ///
    /// Counts are trips, not unique riders, for every line.
    pub fn description(&self) -> &'static str {
        match self {
            Line::BusRkl => "Rapid Bus (KL)",
            Line::BusRkn => "Rapid Bus (Kuantan)",
            Line::BusRpn => "Rapid Bus (Penang)",
            Line::RailLrtAmpang => "LRT Ampang Line",
            Line::RailLrtKj => "LRT Kelana Jaya Line",
            Line::RailMonorail => "Monorail Line",
            Line::RailMrtKajang => "MRT Kajang Line",
            Line::RailMrtPjy => "MRT Putrajaya Line",
            Line::RailEts => "KTMB ETS",
            Line::RailKomuter => "KTM Komuter Utara",
            Line::RailTebrau => "KTM Shuttle Tebrau",
            Line::RailIntercity => "KTM Intercity",
        }
    }

    /// Validates a user-selected column name against the known vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownColumn`] for anything outside the 12
    /// line identifiers, so a bad selection fails at the call boundary
    /// instead of deep inside an aggregation.
    pub fn parse(name: &str) -> Result<Line, EngineError> {
        Line::ALL
            .iter()
            .copied()
            .find(|line| line.as_str() == name)
            .ok_or_else(|| EngineError::UnknownColumn(name.to_string()))
    }
}

/// A single row as read from the published CSV: the date still a string,
/// one optional count per line (empty field = no report that day).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: String,
    pub bus_rkl: Option<u64>,
    pub bus_rkn: Option<u64>,
    pub bus_rpn: Option<u64>,
    pub rail_lrt_ampang: Option<u64>,
    pub rail_lrt_kj: Option<u64>,
    pub rail_monorail: Option<u64>,
    pub rail_mrt_kajang: Option<u64>,
    pub rail_mrt_pjy: Option<u64>,
    pub rail_ets: Option<u64>,
    pub rail_komuter: Option<u64>,
    pub rail_tebrau: Option<u64>,
    pub rail_intercity: Option<u64>,
}

impl RawRecord {
    /// Counts in [`Line::ALL`] order.
    fn counts(&self) -> [Option<u64>; 12] {
        [
            self.bus_rkl,
            self.bus_rkn,
            self.bus_rpn,
            self.rail_lrt_ampang,
            self.rail_lrt_kj,
            self.rail_monorail,
            self.rail_mrt_kajang,
            self.rail_mrt_pjy,
            self.rail_ets,
            self.rail_komuter,
            self.rail_tebrau,
            self.rail_intercity,
        ]
    }
}

/// One day of ridership with the date parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RidershipRow {
    pub date: NaiveDate,
    counts: [Option<u64>; 12],
}

impl RidershipRow {
    /// The reported count for `line` on this date, if any.
    pub fn value(&self, line: Line) -> Option<u64> {
        self.counts[line as usize]
    }

    /// All counts, in [`Line::ALL`] order.
    pub fn counts(&self) -> &[Option<u64>; 12] {
        &self.counts
    }
}

/// The ridership table after one-time date normalization.
///
/// Row order is exactly the input order; views that imply "over time"
/// restore chronological order themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedTable {
    rows: Vec<RidershipRow>,
}

impl NormalizedTable {
    /// Parses every row's date, keeping row count, order, and counts intact.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyTable`] for zero-row input and
    /// [`EngineError::DateParse`] naming the first offending row if any
    /// date is missing or not `YYYY-MM-DD`.
    pub fn normalize(raw: Vec<RawRecord>) -> Result<Self, EngineError> {
        if raw.is_empty() {
            return Err(EngineError::EmptyTable);
        }

        let mut rows = Vec::with_capacity(raw.len());
        for (row, record) in raw.iter().enumerate() {
            let date = NaiveDate::parse_from_str(record.date.trim(), DATE_FORMAT).map_err(|_| {
                EngineError::DateParse {
                    row,
                    value: record.date.clone(),
                }
            })?;

            rows.push(RidershipRow {
                date,
                counts: record.counts(),
            });
        }

        Ok(NormalizedTable { rows })
    }

    pub fn rows(&self) -> &[RidershipRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rebuilds raw records (dates formatted as `YYYY-MM-DD`) for export.
    pub fn to_records(&self) -> Vec<RawRecord> {
        self.rows
            .iter()
            .map(|row| RawRecord {
                date: row.date.format(DATE_FORMAT).to_string(),
                bus_rkl: row.value(Line::BusRkl),
                bus_rkn: row.value(Line::BusRkn),
                bus_rpn: row.value(Line::BusRpn),
                rail_lrt_ampang: row.value(Line::RailLrtAmpang),
                rail_lrt_kj: row.value(Line::RailLrtKj),
                rail_monorail: row.value(Line::RailMonorail),
                rail_mrt_kajang: row.value(Line::RailMrtKajang),
                rail_mrt_pjy: row.value(Line::RailMrtPjy),
                rail_ets: row.value(Line::RailEts),
                rail_komuter: row.value(Line::RailKomuter),
                rail_tebrau: row.value(Line::RailTebrau),
                rail_intercity: row.value(Line::RailIntercity),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str) -> RawRecord {
        RawRecord {
            date: date.to_string(),
            bus_rkl: Some(100),
            rail_lrt_kj: Some(250),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_accepts_every_known_line() {
        for line in Line::ALL {
            assert_eq!(Line::parse(line.as_str()).unwrap(), line);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_column() {
        let err = Line::parse("bus_xyz").unwrap_err();
        assert_eq!(err, EngineError::UnknownColumn("bus_xyz".to_string()));
    }

    #[test]
    fn test_normalize_preserves_rows_and_counts() {
        let raw = vec![record("2024-01-02"), record("2024-01-01")];
        let table = NormalizedTable::normalize(raw.clone()).unwrap();

        assert_eq!(table.len(), 2);
        // Input order kept, not re-sorted
        assert_eq!(
            table.rows()[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(table.rows()[0].value(Line::BusRkl), Some(100));
        assert_eq!(table.rows()[0].value(Line::RailLrtKj), Some(250));
        assert_eq!(table.rows()[0].value(Line::RailEts), None);
        assert_eq!(table.to_records(), raw);
    }

    #[test]
    fn test_normalize_reports_offending_row() {
        let raw = vec![record("2024-01-01"), record("01/02/2024")];
        let err = NormalizedTable::normalize(raw).unwrap_err();

        assert_eq!(
            err,
            EngineError::DateParse {
                row: 1,
                value: "01/02/2024".to_string()
            }
        );
    }

    #[test]
    fn test_normalize_rejects_missing_date() {
        let raw = vec![record("")];
        assert!(matches!(
            NormalizedTable::normalize(raw),
            Err(EngineError::DateParse { row: 0, .. })
        ));
    }

    #[test]
    fn test_normalize_rejects_empty_table() {
        assert_eq!(
            NormalizedTable::normalize(Vec::new()).unwrap_err(),
            EngineError::EmptyTable
        );
    }
}

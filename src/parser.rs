//! CSV parser for the ridership headline dataset.

use anyhow::Result;

use crate::table::RawRecord;

/// Decodes the published CSV (header row + one record per day) from raw
/// bytes. Empty count fields deserialize to `None`; columns are matched by
/// header name, so their order is free.
///
/// # Errors
///
/// Returns an error if the header is missing a known column or a count
/// field is not an unsigned integer.
pub fn parse_table(bytes: &[u8]) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut rows = Vec::new();

    for result in reader.deserialize() {
        let record: RawRecord = result?;
        rows.push(record);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_table() {
        let csv = "\
date,bus_rkl,bus_rkn,bus_rpn,rail_lrt_ampang,rail_lrt_kj,rail_monorail,rail_mrt_kajang,rail_mrt_pjy,rail_ets,rail_komuter,rail_tebrau,rail_intercity
2024-01-01,100,,30,40,50,60,70,80,90,110,120,130
2024-01-02,200,20,,41,51,61,71,81,91,111,121,131
";
        let rows = parse_table(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2024-01-01");
        assert_eq!(rows[0].bus_rkl, Some(100));
        assert_eq!(rows[0].bus_rkn, None);
        assert_eq!(rows[1].bus_rpn, None);
        assert_eq!(rows[1].rail_intercity, Some(131));
    }

    #[test]
    fn test_parse_matches_columns_by_header_name() {
        // Reordered header still lands in the right fields
        let csv = "\
rail_lrt_kj,date,bus_rkl,bus_rkn,bus_rpn,rail_lrt_ampang,rail_monorail,rail_mrt_kajang,rail_mrt_pjy,rail_ets,rail_komuter,rail_tebrau,rail_intercity
500,2024-01-01,100,10,30,40,60,70,80,90,110,120,130
";
        let rows = parse_table(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].rail_lrt_kj, Some(500));
        assert_eq!(rows[0].bus_rkl, Some(100));
    }

    #[test]
    fn test_parse_rejects_non_numeric_count() {
        let csv = "\
date,bus_rkl,bus_rkn,bus_rpn,rail_lrt_ampang,rail_lrt_kj,rail_monorail,rail_mrt_kajang,rail_mrt_pjy,rail_ets,rail_komuter,rail_tebrau,rail_intercity
2024-01-01,lots,,30,40,50,60,70,80,90,110,120,130
";
        assert!(parse_table(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_empty_input_yields_no_rows() {
        let rows = parse_table(b"").unwrap();
        assert!(rows.is_empty());
    }
}

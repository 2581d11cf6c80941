//! CSV export of a computed dataset.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::model::{Dataset, Mode, Period};

/// Row-key column header, matching the input table layout.
const KEY_HEADER: &str = "metric";

/// Exports a computed dataset to a CSV file at the given path.
///
/// Writes the same wide layout the loader accepts: a row-key column
/// followed by one column per mode, with pkt, vkt, and emissions rows
/// for every period. Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(ds: &Dataset, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(ds, buf)
}

/// Writes a computed dataset as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(ds: &Dataset, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    let mut header = vec![KEY_HEADER.to_string()];
    header.extend(Mode::ALL.iter().map(|m| m.as_str().to_string()));
    wtr.write_record(&header)?;

    // One pkt/vkt/emissions row per period
    for period in Period::ALL {
        let table = ds.table(period);
        let suffix = period.key_suffix();
        for (metric, row) in [
            ("pkt", &table.pkt),
            ("vkt", &table.vkt),
            ("emissions", &table.emissions),
        ] {
            let mut record = vec![format!("{metric}_{suffix}")];
            record.extend(Mode::ALL.iter().map(|&m| format!("{:.3}", row[m])));
            wtr.write_record(&record)?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EmissionFactors, ModeVec};

    fn demo_dataset() -> Dataset {
        let factors = EmissionFactors {
            observed: ModeVec::from_fn(|_| 0.5),
            baseline: ModeVec::from_fn(|_| 0.4),
            scenario: ModeVec::from_fn(|_| 0.4),
        };
        let pkt = ModeVec::from_fn(|m| (m as usize + 1) as f64 * 100.0);
        let vkt = ModeVec::from_fn(|m| (m as usize + 1) as f64 * 10.0);
        Dataset::from_rows(pkt, vkt, pkt, vkt, pkt, vkt, &factors)
    }

    #[test]
    fn header_lists_key_column_and_all_modes() {
        let mut buf = Vec::new();
        write_csv(&demo_dataset(), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "metric,passenger_light,electric_light,walking,cycling,\
             diesel_bus,electric_bus,heavy_rail,light_rail"
        );
    }

    #[test]
    fn writes_nine_rows_plus_header() {
        let mut buf = Vec::new();
        write_csv(&demo_dataset(), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        // 1 header + 3 periods x 3 metrics
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().any(|l| l.starts_with("pkt_2018,")));
        assert!(lines.iter().any(|l| l.starts_with("emissions_2030_scenario,")));
    }

    #[test]
    fn deterministic_output() {
        let ds = demo_dataset();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(&ds, &mut buf1).ok();
        write_csv(&ds, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn round_trip_parseable() {
        let mut buf = Vec::new();
        write_csv(&demo_dataset(), &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(
            headers.as_ref().map(csv::StringRecord::len),
            Some(Mode::COUNT + 1)
        );
        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            for i in 1..=Mode::COUNT {
                let val: Result<f64, _> = rec.as_ref().map(|r| r[i].parse()).unwrap();
                assert!(val.is_ok(), "column {i} should parse as f64");
            }
            row_count += 1;
        }
        assert_eq!(row_count, 9);
    }
}

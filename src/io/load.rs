//! CSV loaders for the three static input tables.
//!
//! Wide tables (`base_numbers`, `emission_factors`) carry a leading
//! row-key column followed by one column per mode; the project table has
//! one row per project. Loading happens once at startup, and every error
//! names the offending table plus row/column context.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;

use crate::error::ModelError;
use crate::model::{Dataset, EmissionFactors, Mode, ModeVec};
use crate::projects::ProjectDescriptor;

/// File name of the pkt/vkt table within a data directory.
pub const BASE_NUMBERS_FILE: &str = "base_numbers.csv";
/// File name of the project descriptor table.
pub const PROJECT_DETAILS_FILE: &str = "pt_details.csv";
/// File name of the emission factor table.
pub const EMISSION_FACTORS_FILE: &str = "emission_factors.csv";

/// Everything loaded from a data directory.
#[derive(Debug, Clone)]
pub struct LoadedTables {
    /// Assembled dataset with all emissions rows derived from factors.
    pub dataset: Dataset,
    /// Per-mode, per-period emission factors.
    pub factors: EmissionFactors,
    /// Candidate transit project descriptors.
    pub projects: Vec<ProjectDescriptor>,
}

/// Loads and assembles the three input tables from `dir`.
///
/// # Errors
///
/// Returns a [`ModelError`] for unreadable files, malformed headers or
/// cells, or missing contract rows.
pub fn load_dir(dir: &Path) -> Result<LoadedTables, ModelError> {
    let open = |name: &str| -> Result<File, ModelError> {
        let path = dir.join(name);
        File::open(&path).map_err(|source| ModelError::Io { path, source })
    };

    let factors = read_emission_factors(open(EMISSION_FACTORS_FILE)?)?;
    let dataset = read_base_numbers(open(BASE_NUMBERS_FILE)?, &factors)?;
    let projects = read_project_details(open(PROJECT_DETAILS_FILE)?)?;
    info!(
        "loaded {} from {}: {} project(s)",
        PROJECT_DETAILS_FILE,
        dir.display(),
        projects.len()
    );
    Ok(LoadedTables {
        dataset,
        factors,
        projects,
    })
}

/// A wide table parsed into `(row key, per-mode values)` pairs.
struct WideTable {
    name: String,
    rows: Vec<(String, ModeVec)>,
}

impl WideTable {
    fn from_reader(reader: impl Read, name: &str) -> Result<Self, ModelError> {
        let table_err = |message: String| ModelError::Table {
            table: name.to_string(),
            message,
        };

        let mut rdr = csv::ReaderBuilder::new().from_reader(reader);
        let headers = rdr
            .headers()
            .map_err(|e| table_err(format!("cannot read header: {e}")))?
            .clone();
        if headers.len() != Mode::COUNT + 1 {
            return Err(table_err(format!(
                "expected 1 key column plus {} mode columns, found {}",
                Mode::COUNT,
                headers.len()
            )));
        }

        // Column order comes from the header, not from the enum.
        let mut columns = Vec::with_capacity(Mode::COUNT);
        for h in headers.iter().skip(1) {
            let mode = Mode::from_name(h)
                .ok_or_else(|| table_err(format!("unknown mode column \"{h}\"")))?;
            if columns.contains(&mode) {
                return Err(table_err(format!("duplicate mode column \"{h}\"")));
            }
            columns.push(mode);
        }

        let mut rows: Vec<(String, ModeVec)> = Vec::new();
        for (line, record) in rdr.records().enumerate() {
            let record = record.map_err(|e| table_err(format!("row {}: {e}", line + 2)))?;
            let key = record.get(0).unwrap_or("").to_string();
            if rows.iter().any(|(k, _)| *k == key) {
                return Err(table_err(format!("duplicate row key \"{key}\"")));
            }
            let mut values = ModeVec::ZERO;
            for (i, mode) in columns.iter().enumerate() {
                let cell = record.get(i + 1).unwrap_or("");
                let value: f64 = cell.trim().parse().map_err(|_| {
                    table_err(format!(
                        "row \"{key}\", column \"{mode}\": cannot parse \"{cell}\" as a number"
                    ))
                })?;
                values[*mode] = value;
            }
            rows.push((key, values));
        }

        Ok(Self {
            name: name.to_string(),
            rows,
        })
    }

    fn row(&self, key: &str) -> Result<ModeVec, ModelError> {
        self.rows
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
            .ok_or_else(|| ModelError::Table {
                table: self.name.clone(),
                message: format!("missing row \"{key}\""),
            })
    }
}

/// Reads the pkt/vkt table and assembles the dataset.
///
/// Emissions rows in the input are placeholders and are ignored; the
/// dataset derives them from `factors` instead.
pub fn read_base_numbers(
    reader: impl Read,
    factors: &EmissionFactors,
) -> Result<Dataset, ModelError> {
    let table = WideTable::from_reader(reader, "base_numbers")?;
    Ok(Dataset::from_rows(
        table.row("pkt_2018")?,
        table.row("vkt_2018")?,
        table.row("pkt_2030_baseline")?,
        table.row("vkt_2030_baseline")?,
        table.row("pkt_2030_scenario")?,
        table.row("vkt_2030_scenario")?,
        factors,
    ))
}

/// Reads the per-mode, per-period emission factor table.
pub fn read_emission_factors(reader: impl Read) -> Result<EmissionFactors, ModelError> {
    let table = WideTable::from_reader(reader, "emission_factors")?;
    Ok(EmissionFactors {
        observed: table.row("values_2018")?,
        baseline: table.row("values_2030_baseline")?,
        scenario: table.row("values_2030_scenario")?,
    })
}

/// Reads the project descriptor table.
pub fn read_project_details(reader: impl Read) -> Result<Vec<ProjectDescriptor>, ModelError> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);
    let mut projects = Vec::new();
    for (line, record) in rdr.deserialize::<ProjectDescriptor>().enumerate() {
        let p = record.map_err(|e| ModelError::Table {
            table: "pt_details".to_string(),
            message: format!("row {}: {e}", line + 2),
        })?;
        projects.push(p);
    }
    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACTORS_CSV: &str = "\
values,passenger_light,electric_light,walking,cycling,diesel_bus,electric_bus,heavy_rail,light_rail
values_2018,0.240,0.035,0,0,1.350,0.210,1.800,0.900
values_2030_baseline,0.225,0.030,0,0,1.300,0.180,1.500,0.110
values_2030_scenario,0.225,0.030,0,0,1.300,0.180,1.500,0.110
";

    const BASE_CSV: &str = "\
metric,passenger_light,electric_light,walking,cycling,diesel_bus,electric_bus,heavy_rail,light_rail
pkt_2018,1000,100,50,25,400,10,200,0
vkt_2018,633,63,50,25,40,1,10,0
pkt_2030_baseline,1200,150,60,30,500,20,250,0
vkt_2030_baseline,759,95,60,30,50,2,12,0
pkt_2030_scenario,1200,150,60,30,500,20,250,0
vkt_2030_scenario,759,95,60,30,50,2,12,0
";

    const PROJECTS_CSV: &str = "\
project,primary_mode,peak_freq,off_peak_freq,vehicle_capacity,distance,num_peak_hrs,num_hours
CRL,heavy_rail,5,10,750,3.5,6,18
AMETI,diesel_bus,4,8,90,7,6,18
";

    #[test]
    fn factors_table_parses() {
        let factors = read_emission_factors(FACTORS_CSV.as_bytes()).expect("table is well-formed");
        assert_eq!(factors.observed[Mode::PassengerLight], 0.240);
        assert_eq!(factors.baseline[Mode::LightRail], 0.110);
        assert_eq!(factors.scenario[Mode::DieselBus], 1.300);
    }

    #[test]
    fn base_numbers_assemble_a_dataset_with_derived_emissions() {
        let factors = read_emission_factors(FACTORS_CSV.as_bytes()).expect("table is well-formed");
        let ds = read_base_numbers(BASE_CSV.as_bytes(), &factors).expect("table is well-formed");
        assert_eq!(ds.observed.pkt[Mode::PassengerLight], 1000.0);
        assert_eq!(ds.baseline.vkt[Mode::DieselBus], 50.0);
        assert_eq!(ds.scenario.pkt, ds.baseline.pkt);
        // derived, not read: 633 * 0.240
        assert!((ds.observed.emissions[Mode::PassengerLight] - 151.92).abs() < 1e-9);
    }

    #[test]
    fn project_table_parses_descriptors() {
        let projects =
            read_project_details(PROJECTS_CSV.as_bytes()).expect("table is well-formed");
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].id, "CRL");
        assert_eq!(projects[0].primary_mode, Mode::HeavyRail);
        assert_eq!(projects[1].vehicle_capacity, 90.0);
    }

    #[test]
    fn unknown_mode_column_is_rejected() {
        let bad = BASE_CSV.replace("light_rail", "gondola");
        let factors = read_emission_factors(FACTORS_CSV.as_bytes()).expect("table is well-formed");
        let err = read_base_numbers(bad.as_bytes(), &factors);
        assert!(matches!(err, Err(ModelError::Table { ref message, .. }) if message.contains("gondola")));
    }

    #[test]
    fn missing_row_is_rejected() {
        let bad = BASE_CSV.replace("pkt_2030_baseline", "pkt_2029_baseline");
        let factors = read_emission_factors(FACTORS_CSV.as_bytes()).expect("table is well-formed");
        let err = read_base_numbers(bad.as_bytes(), &factors);
        assert!(matches!(
            err,
            Err(ModelError::Table { ref message, .. }) if message.contains("pkt_2030_baseline")
        ));
    }

    #[test]
    fn unparseable_cell_is_rejected_with_context() {
        let bad = BASE_CSV.replace("pkt_2018,1000", "pkt_2018,lots");
        let factors = read_emission_factors(FACTORS_CSV.as_bytes()).expect("table is well-formed");
        let err = read_base_numbers(bad.as_bytes(), &factors);
        assert!(matches!(
            err,
            Err(ModelError::Table { ref message, .. })
                if message.contains("pkt_2018") && message.contains("passenger_light")
        ));
    }

    #[test]
    fn duplicate_row_key_is_rejected() {
        let bad = format!("{FACTORS_CSV}values_2018,0,0,0,0,0,0,0,0\n");
        let err = read_emission_factors(bad.as_bytes());
        assert!(matches!(
            err,
            Err(ModelError::Table { ref message, .. }) if message.contains("duplicate row key")
        ));
    }

    #[test]
    fn bad_project_row_is_rejected() {
        let bad = PROJECTS_CSV.replace("heavy_rail", "zeppelin");
        let err = read_project_details(bad.as_bytes());
        assert!(matches!(err, Err(ModelError::Table { .. })));
    }
}

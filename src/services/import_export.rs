//! Dataset import / export.
//!
//! # Formats
//!
//! - **CSV:** header row first, comma-delimited. Cells that parse as finite
//!   numbers become numbers, empty cells are treated as absent. Descriptive
//!   columns (`id`, `name`, `state`, `district`, `sector`) always stay text.
//! - **JSON:** a single object or an array of objects using the dashboard
//!   field names (`solarScore`, `capacityMW`, ...). Export is pretty-printed
//!   with two-space indentation.
//!
//! Parsed records with GHI and DNI go through the metric deriver before they
//! are returned; the rest pass through as supplied.

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::ImportError;
use crate::models::dashboard::DataFormat;
use crate::models::location::LocationRecord;
use crate::services::deriver::derive_when_complete;

const TEXT_COLUMNS: [&str; 5] = ["id", "name", "state", "district", "sector"];

// ============================================================================
// Parsing
// ============================================================================

fn auto_type(column: &str, cell: &str) -> Value {
    if TEXT_COLUMNS.contains(&column) {
        return Value::String(cell.to_string());
    }
    // integers stay integers so they can land in integer fields
    if let Ok(int) = cell.parse::<i64>() {
        return Value::Number(int.into());
    }
    cell.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(cell.to_string()))
}

/// Parse CSV text into untyped row objects.
pub fn parse_csv_rows(text: &str) -> Result<Vec<Map<String, Value>>, ImportError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let row: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(column, cell)| (column.to_string(), auto_type(column, cell)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Parse JSON text that is either one object or an array of objects.
pub fn parse_json_rows(text: &str) -> Result<Vec<Map<String, Value>>, ImportError> {
    let value: Value = serde_json::from_str(text)?;
    let items = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        _ => {
            return Err(ImportError::Record {
                index: 0,
                message: "expected an object or an array of objects".to_string(),
            });
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map),
            _ => Err(ImportError::Record {
                index,
                message: "not an object".to_string(),
            }),
        })
        .collect()
}

fn to_record(index: usize, row: Map<String, Value>) -> Result<LocationRecord, ImportError> {
    serde_json::from_value(Value::Object(row)).map_err(|e| ImportError::Record {
        index,
        message: e.to_string(),
    })
}

/// Parse, assign missing ids and derive every record that carries both
/// GHI and DNI. Rows without them are kept underived.
pub fn import_records(text: &str, format: DataFormat) -> Result<Vec<LocationRecord>, ImportError> {
    let rows = match format {
        DataFormat::Csv => parse_csv_rows(text)?,
        DataFormat::Json => parse_json_rows(text)?,
    };
    if rows.is_empty() {
        return Err(ImportError::Empty);
    }

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            let mut record = to_record(index, row)?;
            if record.id.trim().is_empty() {
                record.id = format!("imported-{}", index);
            }
            derive_when_complete(record).map_err(|e| ImportError::Record {
                index,
                message: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(count = records.len(), ?format, "imported locations");
    Ok(records)
}

// ============================================================================
// Export
// ============================================================================

#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    name: &'a str,
    state: &'a str,
    district: Option<&'a str>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    ghi: Option<f64>,
    dni: Option<f64>,
    #[serde(rename = "solarScore")]
    solar_score: Option<u8>,
    #[serde(rename = "capacityMW")]
    capacity_mw: Option<u32>,
    #[serde(rename = "generationMWh")]
    generation_mwh: Option<u64>,
}

impl<'a> From<&'a LocationRecord> for CsvRow<'a> {
    fn from(r: &'a LocationRecord) -> Self {
        Self {
            id: &r.id,
            name: &r.name,
            state: &r.state,
            district: r.district.as_deref(),
            latitude: r.latitude,
            longitude: r.longitude,
            ghi: r.ghi,
            dni: r.dni,
            solar_score: r.solar_score,
            capacity_mw: r.capacity_mw,
            generation_mwh: r.generation_mwh,
        }
    }
}

/// Flat CSV; nested monthly / hourly series are not exported.
pub fn export_csv(records: &[LocationRecord]) -> Result<String, ImportError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn export_json(records: &[LocationRecord]) -> Result<String, ImportError> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn export_records(records: &[LocationRecord], format: DataFormat) -> Result<String, ImportError> {
    match format {
        DataFormat::Csv => export_csv(records),
        DataFormat::Json => export_json(records),
    }
}

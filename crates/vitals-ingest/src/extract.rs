//! Record extraction from monitor export documents.
//!
//! An export holds its records under `ZOLL.FullDisclosure[0].FullDisclosureRecord`.
//! The first entry carrying `DeviceConfiguration` supplies the device serial;
//! every entry carrying `TrendRpt` becomes one [`ObservationRecord`].

use serde_json::Value;
use tracing::{debug, trace};

use vitals_model::{ObservationRecord, VitalFields};

use crate::datetime::parse_device_timestamp;
use crate::document::{PathSegment, lookup, lookup_keys};
use crate::error::{IngestError, Result};
use crate::resolver::resolve_vital;

const RECORD_LIST_PATH: [PathSegment<'static>; 4] = [
    PathSegment::Key("ZOLL"),
    PathSegment::Key("FullDisclosure"),
    PathSegment::Index(0),
    PathSegment::Key("FullDisclosureRecord"),
];

/// Single-channel vitals: column name and path below `Trend` to the trend-data node.
const TREND_CHANNELS: [(&str, &[&str]); 12] = [
    ("Hr", &["Hr", "TrendData"]),
    ("FiCO2", &["Fico2", "TrendData"]),
    ("SpO2", &["Spo2", "TrendData"]),
    ("SpMet", &["Spo2", "SpMet", "TrendData"]),
    ("SpCo", &["Spo2", "SpCo", "TrendData"]),
    ("PVI", &["Spo2", "PVI", "TrendData"]),
    ("PI", &["Spo2", "PI", "TrendData"]),
    ("SpOC", &["Spo2", "SpOC", "TrendData"]),
    ("SpHb", &["Spo2", "SpHb", "TrendData"]),
    ("NIBP_SYS", &["Nibp", "Sys", "TrendData"]),
    ("NIBP_DIA", &["Nibp", "Dia", "TrendData"]),
    ("NIBP_MAP", &["Nibp", "Map", "TrendData"]),
];

/// Channels that follow the invasive pressure columns.
const TRAILING_CHANNELS: [(&str, &[&str]); 2] = [
    ("EtCO2", &["Etco2", "TrendData"]),
    ("RespRate", &["Resp", "TrendData"]),
];

static NULL: Value = Value::Null;

const PRESSURE_COMPONENTS: [(&str, &str); 3] = [("SYS", "Sys"), ("DIA", "Dia"), ("MAP", "Map")];

/// Parse one file's text and extract its records.
///
/// Only a JSON syntax error is reported; a well-formed document without the
/// expected structure simply yields no records.
pub fn parse_document(filename: &str, content: &str) -> Result<Vec<ObservationRecord>> {
    let document: Value = serde_json::from_str(content).map_err(|source| IngestError::Json {
        filename: filename.to_string(),
        source,
    })?;
    Ok(extract_records(&document, filename))
}

/// Extract one record per trend-report node of a parsed document.
pub fn extract_records(document: &Value, source_file: &str) -> Vec<ObservationRecord> {
    let Some(entries) = lookup(document, &RECORD_LIST_PATH).and_then(Value::as_array) else {
        debug!(source_file, "no record list, skipping document");
        return Vec::new();
    };

    let device_serial = entries
        .iter()
        .find_map(|entry| lookup_keys(entry, &["DeviceConfiguration"]))
        .and_then(|config| lookup_keys(config, &["DeviceSerialNumber"]))
        .and_then(scalar_text);

    let records: Vec<ObservationRecord> = entries
        .iter()
        .filter_map(|entry| lookup_keys(entry, &["TrendRpt"]))
        .map(|report| trend_record(report, device_serial.as_deref(), source_file))
        .collect();
    trace!(source_file, records = records.len(), "extracted trend reports");
    records
}

fn trend_record(report: &Value, device_serial: Option<&str>, source_file: &str) -> ObservationRecord {
    let raw_timestamp = lookup_keys(report, &["StdHdr", "DevDateTime"]).and_then(scalar_text);
    let timestamp = raw_timestamp.as_deref().and_then(parse_device_timestamp);
    let trend = report.get("Trend").unwrap_or(&NULL);

    let mut vitals = VitalFields::new();
    for (index, probe) in array_at(trend, "Temp").iter().enumerate() {
        vitals.insert(
            format!("Temp{}", index + 1),
            resolve_vital(lookup_keys(probe, &["TrendData"])),
        );
    }
    for (column, path) in TREND_CHANNELS {
        vitals.insert(column, resolve_vital(lookup_keys(trend, path)));
    }
    for channel in array_at(trend, "Ibp") {
        let number = channel.get("@ChanNum").and_then(scalar_text).unwrap_or_default();
        for (suffix, key) in PRESSURE_COMPONENTS {
            vitals.insert(
                format!("IBP{number}_{suffix}"),
                resolve_vital(lookup_keys(channel, &[key, "TrendData"])),
            );
        }
    }
    for (column, path) in TRAILING_CHANNELS {
        vitals.insert(column, resolve_vital(lookup_keys(trend, path)));
    }

    ObservationRecord {
        timestamp,
        raw_timestamp,
        device_serial: device_serial.map(str::to_string),
        source_file: source_file.to_string(),
        vitals,
    }
}

fn array_at<'v>(value: &'v Value, key: &str) -> &'v [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

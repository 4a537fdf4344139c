// Slicing of the source datasets fed to the RML mapping
use crate::domain::error::DatasetError;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Keep the CSV rows whose `column` equals `value`.
///
/// The header is always written, even when nothing matches. The input is read
/// in full before `output` is created, so a bad row leaves no partial file.
pub fn filter_csv(
    input: &Path,
    output: &Path,
    column: &str,
    value: &str,
) -> Result<usize, DatasetError> {
    let mut reader = csv::Reader::from_path(input)?;
    let headers = reader.headers()?.clone();
    let idx = headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| DatasetError::MissingColumn(column.to_string()))?;

    let mut kept = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.get(idx) == Some(value) {
            kept.push(record);
        }
    }

    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record(&headers)?;
    for record in &kept {
        writer.write_record(record)?;
    }
    writer.flush()?;

    info!("Kept {} rows of {} where {} = {}", kept.len(), input.display(), column, value);
    Ok(kept.len())
}

fn read_array(input: &Path) -> Result<Vec<Value>, DatasetError> {
    let file = File::open(input)?;
    match serde_json::from_reader(BufReader::new(file))? {
        Value::Array(items) => Ok(items),
        _ => Err(DatasetError::NotAnArray),
    }
}

fn write_array(output: &Path, items: &[Value]) -> Result<(), DatasetError> {
    let mut writer = BufWriter::new(File::create(output)?);
    serde_json::to_writer_pretty(&mut writer, items)?;
    writer.flush()?;
    Ok(())
}

/// Keep the objects of a JSON array whose string `field` equals `value`.
pub fn filter_json(
    input: &Path,
    output: &Path,
    field: &str,
    value: &str,
) -> Result<usize, DatasetError> {
    let items = read_array(input)?;
    let subset: Vec<Value> = items
        .into_iter()
        .filter(|item| item.get(field).and_then(Value::as_str) == Some(value))
        .collect();

    write_array(output, &subset)?;
    info!("Kept {} records of {} where {} = {}", subset.len(), input.display(), field, value);
    Ok(subset.len())
}

/// Keep the first `count` elements of a JSON array.
pub fn sample_json(input: &Path, output: &Path, count: usize) -> Result<usize, DatasetError> {
    let mut items = read_array(input)?;
    items.truncate(count);

    write_array(output, &items)?;
    info!("Kept the first {} records of {}", items.len(), input.display());
    Ok(items.len())
}

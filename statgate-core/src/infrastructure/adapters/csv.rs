// statgate-core/src/infrastructure/adapters/csv.rs
//
// Arrow-backed CSV adapter: infers the schema from the file itself, so any
// header is accepted and the validator decides what is missing.

use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use datafusion::arrow::csv::reader::Format;
use datafusion::arrow::csv::{ReaderBuilder, WriterBuilder};
use datafusion::arrow::datatypes::{DataType, Field, Schema};
use regex::Regex;
use tracing::{debug, instrument};

use crate::domain::dataset::Dataset;
use crate::error::StatgateError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::dataset_source::DatasetSource;

/// Cells read as missing: empty, plus the usual spreadsheet and dataframe
/// spellings of "no value" (`NA`, `N/A`, `null`, `NaN`, `None`, ...).
const NULL_TOKENS_PATTERN: &str = r"^(?:|#N/A|#N/A N/A|#NA|-1\.#IND|-1\.#QNAN|-NaN|-nan|1\.#IND|1\.#QNAN|<NA>|N/A|NA|NULL|NaN|None|n/a|nan|null)$";

pub struct CsvSource;

impl DatasetSource for CsvSource {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn load(&self, path: &Path) -> Result<Dataset, StatgateError> {
        let bytes = fs::read(path).map_err(InfrastructureError::Io)?;
        let dataset = read_csv(&bytes)?;
        debug!(
            rows = dataset.num_rows(),
            columns = dataset.column_names().len(),
            "CSV loaded"
        );
        Ok(dataset)
    }
}

/// Parses CSV bytes (header row required) into a [`Dataset`].
/// Empty cells and null tokens are nulls. Columns with no value at all are read as text.
pub fn read_csv(bytes: &[u8]) -> Result<Dataset, StatgateError> {
    let null_tokens = Regex::new(NULL_TOKENS_PATTERN).map_err(InfrastructureError::Pattern)?;
    let format = Format::default()
        .with_header(true)
        .with_null_regex(null_tokens);
    let (inferred, _) = format
        .infer_schema(Cursor::new(bytes), None)
        .map_err(InfrastructureError::Arrow)?;

    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .map(|f| match f.data_type() {
            DataType::Null => Field::new(f.name(), DataType::Utf8, true),
            _ => f.as_ref().clone(),
        })
        .collect();
    let schema = Arc::new(Schema::new(fields));

    // Same format for inference and reading, so a token typed as null stays null.
    let reader = ReaderBuilder::new(schema.clone())
        .with_format(format)
        .build(Cursor::new(bytes))
        .map_err(InfrastructureError::Arrow)?;
    let batches = reader
        .collect::<Result<Vec<_>, _>>()
        .map_err(InfrastructureError::Arrow)?;

    Ok(Dataset::from_batches(schema, &batches)?)
}

pub fn parse_csv(text: &str) -> Result<Dataset, StatgateError> {
    read_csv(text.as_bytes())
}

/// Serializes the whole dataset (header + rows, input order) to CSV bytes.
pub fn write_csv(dataset: &Dataset) -> Result<Vec<u8>, InfrastructureError> {
    let mut writer = WriterBuilder::new().with_header(true).build(Vec::new());
    writer.write(dataset.record_batch())?;
    Ok(writer.into_inner())
}

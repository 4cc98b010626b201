// statgate-core/src/domain/dataset.rs

use datafusion::arrow::array::{Array, ArrayRef, Float64Array, Int64Array};
use datafusion::arrow::compute::{cast, concat_batches};
use datafusion::arrow::datatypes::{DataType, SchemaRef};
use datafusion::arrow::record_batch::RecordBatch;

use crate::domain::error::DomainError;

/// A rectangular table of microdata records backed by a single Arrow batch.
///
/// No schema is enforced. Columns are looked up by name and an absent column is
/// reported as `None`, never as an error: missing columns are a quality signal
/// for the validator, not a loading failure.
#[derive(Debug, Clone)]
pub struct Dataset {
    batch: RecordBatch,
}

impl Dataset {
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    /// Assembles the batches produced by a reader into one table.
    /// An empty `batches` slice gives a zero-row dataset with `schema`.
    pub fn from_batches(schema: SchemaRef, batches: &[RecordBatch]) -> Result<Self, DomainError> {
        let batch = concat_batches(&schema, batches)
            .map_err(|e| DomainError::DatasetError(e.to_string()))?;
        Ok(Self { batch })
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }

    pub fn record_batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Number of missing entries in `name`, or `None` when the column is absent.
    /// NaN counts as missing in floating point columns.
    pub fn missing_count(&self, name: &str) -> Option<usize> {
        let column = self.column(name)?;
        if column.data_type().is_floating() {
            let values = self.float_values(name)?;
            return Some(values.iter().filter(|v| v.is_none()).count());
        }
        Some(column.logical_null_count())
    }

    /// Values of `name` read as `f64`.
    ///
    /// Entries that are null, NaN, or cannot be read as a number come back as
    /// `None`. Returns `None` only when the column is absent.
    pub fn float_values(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let column = self.column(name)?;
        let values = cast(column, &DataType::Float64)
            .ok()
            .and_then(|array| {
                array
                    .as_any()
                    .downcast_ref::<Float64Array>()
                    .map(|floats| {
                        floats
                            .iter()
                            .map(|v| v.filter(|x| !x.is_nan()))
                            .collect::<Vec<_>>()
                    })
            })
            .unwrap_or_else(|| vec![None; column.len()]);
        Some(values)
    }

    /// Values of `name` read as `i64`, with the same conventions as [`Dataset::float_values`].
    pub fn integer_values(&self, name: &str) -> Option<Vec<Option<i64>>> {
        let column = self.column(name)?;
        let values = cast(column, &DataType::Int64)
            .ok()
            .and_then(|array| {
                array
                    .as_any()
                    .downcast_ref::<Int64Array>()
                    .map(|ints| ints.iter().collect::<Vec<_>>())
            })
            .unwrap_or_else(|| vec![None; column.len()]);
        Some(values)
    }
}

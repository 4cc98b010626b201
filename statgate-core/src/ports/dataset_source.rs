// statgate-core/src/ports/dataset_source.rs

// Where datasets come from (an uploaded CSV, a bundled sample...). The validator
// and the publisher only ever see the resulting `Dataset`.

use std::path::Path;

use crate::domain::dataset::Dataset;
use crate::error::StatgateError;

pub trait DatasetSource {
    fn load(&self, path: &Path) -> Result<Dataset, StatgateError>;
}

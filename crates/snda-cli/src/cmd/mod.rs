pub mod analyze;
pub mod weekly;

use std::path::PathBuf;

use snda_core::Edge;

use crate::ingest;
use crate::output::{CliError, OutputMode, render_error};

/// A labelled edge-list file, given on the command line as `LABEL=PATH`.
///
/// A bare `PATH` is accepted too; its file stem becomes the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetArg {
    pub label: String,
    pub path: PathBuf,
}

/// clap value parser for [`DatasetArg`].
pub fn parse_dataset(raw: &str) -> Result<DatasetArg, String> {
    let (label, path) = match raw.split_once('=') {
        Some((label, path)) => (label.trim().to_string(), PathBuf::from(path)),
        None => {
            let path = PathBuf::from(raw);
            let label = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            (label, path)
        }
    };

    if label.is_empty() {
        return Err(format!("dataset '{raw}' needs a label (LABEL=PATH)"));
    }
    if path.as_os_str().is_empty() {
        return Err(format!("dataset '{raw}' needs a path (LABEL=PATH)"));
    }
    Ok(DatasetArg { label, path })
}

/// Load a dataset, reporting ingestion failures through the output layer.
pub fn load_dataset(dataset: &DatasetArg, output: OutputMode) -> anyhow::Result<Vec<Edge>> {
    match ingest::read_edges(&dataset.path) {
        Ok(edges) => Ok(edges),
        Err(err) => {
            render_error(output, &CliError::from_code(err.code(), err.to_string()))?;
            Err(anyhow::Error::new(err)
                .context(format!("failed to load dataset '{}'", dataset.label)))
        }
    }
}

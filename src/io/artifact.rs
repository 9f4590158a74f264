use crate::error::{PipelineError, Result};
use crate::linear_model::FittedModel;
use crate::preprocessing::CleaningStrategy;
use crate::table::Table;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Output layout of one run below an output directory.
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    root: PathBuf,
}

impl RunArtifacts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Snapshot of one ingested input, named after its file stem.
    pub fn source_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "input".to_string());
        self.root
            .join("interim")
            .join("sources")
            .join(format!("{}.json", stem))
    }

    pub fn concat_path(&self) -> PathBuf {
        self.root.join("interim").join("concat.json")
    }

    pub fn clean_path(&self, strategy: CleaningStrategy) -> PathBuf {
        self.root
            .join("processed")
            .join(format!("clean_{}.json", strategy))
    }

    pub fn model_path(&self, strategy: CleaningStrategy) -> PathBuf {
        model_path(&self.root, strategy)
    }

    pub fn report_path(&self) -> PathBuf {
        self.root.join("report.json")
    }
}

pub fn model_path(root: &Path, strategy: CleaningStrategy) -> PathBuf {
    root.join("models")
        .join(format!("linear_regression_{}.bin", strategy))
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }
    fs::write(path, bytes).map_err(|e| PipelineError::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote artifact");
    Ok(())
}

/// Pretty-printed JSON, parent directories created as needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    write_bytes(path, &bytes)
}

pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    write_json(path, table)
}

pub fn write_model(path: &Path, model: &FittedModel) -> Result<()> {
    write_bytes(path, &model.to_bytes()?)
}

pub fn read_model(path: &Path) -> Result<FittedModel> {
    if !path.exists() {
        return Err(PipelineError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|e| PipelineError::io(path, e))?;
    FittedModel::from_bytes(&bytes)
}

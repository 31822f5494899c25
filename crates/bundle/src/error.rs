use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BundleError>;

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("input file does not exist: {0}")]
    MissingInput(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to run {compiler}: {source}")]
    Spawn {
        compiler: String,
        source: std::io::Error,
    },

    #[error("dependency scan failed ({status}):\n{stderr}")]
    DepScan { status: ExitStatus, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

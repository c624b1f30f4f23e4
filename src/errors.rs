use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileOperation {
    #[error("reading a file")]
    Read,
    #[error("writing a file")]
    Write,
    #[error("creating a directory")]
    Mkdir,
}

#[derive(Debug, Error, Diagnostic)]
#[error("I/O error: {operation} at '{path}'")]
#[diagnostic(
    code(ossa::io),
    help("Check permissions, disk space, and that nothing else already occupies this path.")
)]
pub struct IoError {
    pub operation: FileOperation,
    pub path: std::path::PathBuf,
    #[source]
    pub source: std::io::Error,
}
impl IoError {
    pub fn new(operation: FileOperation, path: std::path::PathBuf, error: std::io::Error) -> Self {
        Self {
            operation,
            path,
            source: error,
        }
    }
}

use codespan_derive::IntoDiagnostic;
use sap_files::{FileError, FileId};

pub type DriverResult<T> = std::result::Result<T, DriverError>;

#[derive(IntoDiagnostic, Debug)]
#[file_id(FileId)]
pub enum DriverError {
    #[render(FileError::into_diagnostic)]
    File(FileError),

    #[message = "Cannot write {0}: {1}"]
    Write(camino::Utf8PathBuf, String),
}

impl From<FileError> for DriverError {
    fn from(e: FileError) -> Self {
        DriverError::File(e)
    }
}

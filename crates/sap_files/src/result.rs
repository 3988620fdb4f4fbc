use std::io::{Error as IoError, ErrorKind as IoErrorKind};

use camino::{FromPathBufError, Utf8PathBuf};
use codespan_derive::IntoDiagnostic;

use crate::FileId;

pub type FileResult<T> = std::result::Result<T, FileError>;

#[derive(IntoDiagnostic, Debug, PartialEq, Eq, Clone)]
#[file_id(FileId)]
pub enum FileError {
    #[message = "IO Error: {1}"]
    Io(IoErrorKind, String),
    #[message = "Path is not UTF-8: {0}"]
    NotUtf8(FromPathBufError),
    #[message = "Path does not exist or is not a file: {0}"]
    NotFile(Utf8PathBuf),
}

impl From<IoError> for FileError {
    fn from(e: IoError) -> Self {
        FileError::Io(e.kind(), e.to_string())
    }
}

impl From<FromPathBufError> for FileError {
    fn from(e: FromPathBufError) -> Self {
        FileError::NotUtf8(e)
    }
}

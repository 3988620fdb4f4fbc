//! File loading for the rewriter: UTF-8 paths in, whole-file sources out,
//! with a store that codespan diagnostics can render from.

use std::{convert::TryInto, sync::Arc};

use camino::{Utf8Path, Utf8PathBuf};
use codespan_reporting::files::SimpleFiles;
use log::debug;
use sap_util::id_type;

mod result;

pub use crate::result::{FileError, FileResult};

id_type!(pub FileId);

pub struct Files {
    files: SimpleFiles<Utf8PathBuf, Arc<str>>,
}

impl Files {
    pub fn new() -> Files {
        Files {
            files: SimpleFiles::new(),
        }
    }

    pub fn open(&mut self, path: &Utf8Path) -> FileResult<(FileId, Arc<str>)> {
        let canonical_path: Utf8PathBuf = path.canonicalize()?.try_into()?;

        if !canonical_path.is_file() {
            return Err(FileError::NotFile(canonical_path));
        }

        let contents: Arc<str> = std::fs::read_to_string(&canonical_path)?.into();
        debug!("opened {} ({} bytes)", canonical_path, contents.len());

        Ok((
            self.files.add(canonical_path, contents.clone()).into(),
            contents,
        ))
    }
}

impl Default for Files {
    fn default() -> Files {
        Files::new()
    }
}

impl<'a> codespan_reporting::files::Files<'a> for Files {
    type FileId = FileId;
    type Name = Utf8PathBuf;
    type Source = &'a str;

    fn name(&'a self, id: Self::FileId) -> Result<Self::Name, codespan_reporting::files::Error> {
        self.files.name(id.0)
    }

    fn source(
        &'a self,
        id: Self::FileId,
    ) -> Result<Self::Source, codespan_reporting::files::Error> {
        self.files.source(id.0)
    }

    fn line_index(
        &'a self,
        id: Self::FileId,
        byte_index: usize,
    ) -> Result<usize, codespan_reporting::files::Error> {
        self.files.line_index(id.0, byte_index)
    }

    fn line_range(
        &'a self,
        id: Self::FileId,
        line_index: usize,
    ) -> Result<std::ops::Range<usize>, codespan_reporting::files::Error> {
        self.files.line_range(id.0, line_index)
    }
}

use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{BrcError, Result};

/// Read-only view of a measurements file.
pub enum Source {
    Mapped(Mmap),
    /// FIFOs, character devices and other streams, read to the end.
    Owned(Vec<u8>),
    /// Zero-length regular files can't be mapped.
    Empty,
}

impl Source {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let unavailable = |source| BrcError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(unavailable)?;
        let metadata = file.metadata().map_err(unavailable)?;

        if !metadata.is_file() {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf).map_err(unavailable)?;
            return Ok(Source::Owned(buf));
        }

        if metadata.len() == 0 {
            return Ok(Source::Empty);
        }

        // SAFETY: the file is only read; truncation by another process while mapped is not guarded against.
        let map = unsafe { Mmap::map(&file) }.map_err(unavailable)?;
        Ok(Source::Mapped(map))
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Source::Mapped(map) => &map[..],
            Source::Owned(buf) => &buf[..],
            Source::Empty => &[],
        }
    }
}

impl Deref for Source {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.bytes()
    }
}

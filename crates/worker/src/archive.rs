//! Zip archive builder for export staging.

use serde::Serialize;
use std::fs;
use std::io::{self, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ExportError;

/// Sequential write-only zip container.
///
/// One entry is open at a time: `begin_entry` starts a named entry and hands
/// back a writer that borrows the builder, so a second entry cannot be
/// opened until the first writer is dropped. `flush` pushes previously
/// written entry data down to the underlying writer. `finalize` writes the
/// trailing central directory and consumes the builder, which makes writes
/// after finalize impossible by construction.
pub struct ArchiveBuilder<W: Write + Seek> {
    zip: ZipWriter<W>,
}

impl<W: Write + Seek> ArchiveBuilder<W> {
    pub fn new(inner: W) -> Self {
        Self {
            zip: ZipWriter::new(inner),
        }
    }

    fn entry_options() -> SimpleFileOptions {
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
    }

    /// Start a named entry and return a writer for its contents.
    pub fn begin_entry(&mut self, path: &str) -> Result<EntryWriter<'_, W>, ExportError> {
        self.zip.start_file(path, Self::entry_options())?;
        Ok(EntryWriter { zip: &mut self.zip })
    }

    /// Write one complete pretty-printed JSON entry and flush it.
    pub fn put_json<T: Serialize>(&mut self, path: &str, value: &T) -> Result<(), ExportError> {
        let body = serde_json::to_vec_pretty(value)?;
        self.zip.start_file(path, Self::entry_options())?;
        self.zip.write_all(&body)?;
        self.zip.flush()?;
        Ok(())
    }

    /// Make previously written entries readable by downstream readers.
    pub fn flush(&mut self) -> io::Result<()> {
        self.zip.flush()
    }

    /// Write the central directory and return the inner writer.
    pub fn finalize(mut self) -> Result<W, ExportError> {
        Ok(self.zip.finish()?)
    }
}

/// Writer for the currently open archive entry.
pub struct EntryWriter<'a, W: Write + Seek> {
    zip: &'a mut ZipWriter<W>,
}

impl<W: Write + Seek> Write for EntryWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.zip.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.zip.flush()
    }
}

/// Remove leftover archives from a previous instance.
///
/// Runs before the first poll so an interrupted predecessor's partial
/// archives never linger. A `.gitkeep` marker survives; the directory is
/// created if missing.
pub fn clean_staging_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name() == ".gitkeep" {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

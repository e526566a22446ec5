//! # Invoice Storage
//!
//! Resolves the folder rendered documents are written to and performs the
//! writes. The business convention is a "Facturas" folder on the user's
//! desktop, preferring the localized "Escritorio" folder name when it
//! exists, then "Desktop", then the platform documents directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::UserDirs;
use tracing::debug;

/// Folder name the invoices land in.
pub const INVOICE_FOLDER: &str = "Facturas";

/// A writable documents folder for rendered invoices and quotes.
#[derive(Debug, Clone)]
pub struct InvoiceStorage {
    root: PathBuf,
}

impl InvoiceStorage {
    /// Resolves the platform folder and creates it if missing.
    pub fn resolve() -> io::Result<Self> {
        let base = desktop_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "could not resolve a documents directory",
            )
        })?;
        let storage = InvoiceStorage {
            root: base.join(INVOICE_FOLDER),
        };
        fs::create_dir_all(&storage.root)?;
        Ok(storage)
    }

    /// Uses an explicit root instead of the platform folder.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        InvoiceStorage { root: root.into() }
    }

    /// The folder documents are written into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a rendered document and returns its full path.
    pub fn write_document(&self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(file_name);
        fs::write(&path, bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "document written");
        Ok(path)
    }
}

/// The user's desktop folder, localized name first.
fn desktop_dir() -> Option<PathBuf> {
    let user_dirs = UserDirs::new()?;
    let home = user_dirs.home_dir();

    let localized = home.join("Escritorio");
    if localized.is_dir() {
        return Some(localized);
    }
    let desktop = home.join("Desktop");
    if desktop.is_dir() {
        return Some(desktop);
    }

    user_dirs
        .document_dir()
        .map(Path::to_path_buf)
        .or_else(|| Some(home.to_path_buf()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_document_creates_folder_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = InvoiceStorage::at(dir.path().join(INVOICE_FOLDER));

        let path = storage
            .write_document("factura-20260807042.pdf", b"%PDF-1.3 test")
            .unwrap();

        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.3 test");
        assert!(path.starts_with(storage.root()));
    }

    #[test]
    fn test_write_document_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = InvoiceStorage::at(dir.path());

        storage.write_document("doc.pdf", b"first").unwrap();
        let path = storage.write_document("doc.pdf", b"second").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }
}

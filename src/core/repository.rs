use crate::core::cipher::PayloadCipher;
use crate::core::codec::SnapshotCodec;
use crate::core::{ConfigProvider, Storage};
use crate::domain::model::{Book, BookId, CirculationError, Library, Member, MemberId};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Owns the library for the lifetime of the process and writes a full
/// snapshot after every successful mutation.
pub struct LibraryRepository<S: Storage> {
    storage: S,
    codec: SnapshotCodec,
    path: PathBuf,
    library: Library,
}

impl<S: Storage> LibraryRepository<S> {
    /// Restores the library from `path`, starting empty if it cannot be read.
    pub fn open(storage: S, codec: SnapshotCodec, path: impl Into<PathBuf>) -> Self {
        let mut repo = Self {
            storage,
            codec,
            path: path.into(),
            library: Library::new(),
        };
        repo.library = repo.load();
        repo
    }

    pub fn from_config<C: ConfigProvider>(storage: S, config: &C) -> Result<Self> {
        let cipher = PayloadCipher::new(config.cipher_key(), config.cipher_mode())?;
        Ok(Self::open(
            storage,
            SnapshotCodec::new(cipher),
            config.data_file(),
        ))
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn add_book(&mut self, title: &str, author: &str) -> Book {
        let book = self.library.add_book(title, author).clone();
        tracing::info!("Added book {} ({} by {})", book.id, book.title, book.author);
        self.save();
        book
    }

    pub fn add_member(&mut self, name: &str) -> Member {
        let member = self.library.add_member(name).clone();
        tracing::info!("Added member {} ({})", member.id, member.name);
        self.save();
        member
    }

    pub fn issue_book(
        &mut self,
        book_id: BookId,
        member_id: MemberId,
    ) -> std::result::Result<(), CirculationError> {
        self.library.issue_book(book_id, member_id).inspect_err(|e| {
            tracing::warn!("Issue rejected: {}", e);
        })?;
        tracing::info!("Book {} issued to member {}", book_id, member_id);
        self.save();
        Ok(())
    }

    pub fn return_book(
        &mut self,
        book_id: BookId,
        member_id: MemberId,
    ) -> std::result::Result<(), CirculationError> {
        self.library.return_book(book_id, member_id).inspect_err(|e| {
            tracing::warn!("Return rejected: {}", e);
        })?;
        tracing::info!("Book {} returned by member {}", book_id, member_id);
        self.save();
        Ok(())
    }

    /// Writes the snapshot, logging instead of returning any failure.
    /// In-memory state is kept either way.
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            tracing::error!(
                "Failed to save library to {}: {} ({:?})",
                self.path.display(),
                e,
                e.category()
            );
        }
    }

    pub fn try_save(&self) -> Result<()> {
        let blob = self.codec.encode(&self.library)?;
        self.storage.write_file(&self.path, &blob)?;
        tracing::debug!("Saved {} bytes to {}", blob.len(), self.path.display());
        Ok(())
    }

    /// Reads the snapshot from storage. Never fails: a missing or unreadable
    /// file yields an empty library.
    pub fn load(&self) -> Library {
        if !self.storage.exists(&self.path) {
            tracing::info!(
                "No data file at {}, starting with an empty library",
                self.path.display()
            );
            return Library::new();
        }

        match self.try_load() {
            Ok(library) => {
                tracing::info!(
                    "Loaded {} books, {} members from {}",
                    library.books().len(),
                    library.members().len(),
                    self.path.display()
                );
                library
            }
            Err(e) => {
                tracing::warn!(
                    "Could not restore {} ({}), starting with an empty library",
                    self.path.display(),
                    e
                );
                Library::new()
            }
        }
    }

    pub fn try_load(&self) -> Result<Library> {
        let data = self.storage.read_file(&self.path)?;
        self.codec.decode(&data)
    }

    /// Re-reads the file, replacing the in-memory library.
    pub fn reload(&mut self) {
        self.library = self.load();
    }
}

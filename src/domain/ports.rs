use crate::core::cipher::CipherMode;
use crate::utils::error::Result;
use std::path::Path;

/// Byte-level access to wherever snapshots are kept.
pub trait Storage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
}

pub trait ConfigProvider {
    fn data_file(&self) -> &Path;
    fn cipher_mode(&self) -> CipherMode;
    fn cipher_key(&self) -> &[u8];
}

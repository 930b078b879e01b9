pub mod cipher;
pub mod codec;
pub mod repository;

pub use crate::domain::model::{Book, Library, Member};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;

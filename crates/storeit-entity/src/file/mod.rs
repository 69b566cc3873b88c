//! File domain entities.

pub mod kind;
pub mod model;

pub use kind::{Category, FileType, classify, extension_of};
pub use model::{CreateFile, File};

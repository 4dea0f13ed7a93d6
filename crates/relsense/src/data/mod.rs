//! Data layer: CSV loading, name lookup and result export

pub mod export;
pub mod loader;
pub mod names;

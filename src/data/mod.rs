//! Record ingestion and result export layer.

pub mod export;
pub mod records;

pub mod asset;
pub mod error;
pub mod stats;
pub mod trade;
pub mod upload;

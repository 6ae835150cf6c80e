pub mod asset;
pub mod trade;

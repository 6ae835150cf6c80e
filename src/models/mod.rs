pub mod trade;
pub mod asset;

pub use trade::{NewTrade, Trade, UpdateTrade};
pub use asset::{Asset, NewAsset};

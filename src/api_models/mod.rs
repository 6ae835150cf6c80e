pub mod asset;
pub mod trade;

pub use asset::{AssetResponse, CreateAssetRequest};
pub use trade::{parse_new_trade, parse_trade_patch, FieldError, TradeResponse};

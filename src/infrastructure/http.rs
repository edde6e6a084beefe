//! HTTP access to the market API.

pub mod dto;
pub mod market_api;

pub use dto::decode_payload;
pub use market_api::{MarketApiClient, MarketEndpoint};

//! Market data aggregate: assets, candles, search and the source abstraction.

pub mod entities;
pub mod repositories;
pub mod search;
pub mod value_objects;

pub use entities::*;
pub use repositories::MarketDataSource;
pub use search::{AssetCatalog, filter_assets};
pub use value_objects::*;

pub mod http;
pub mod rendering;
pub mod services;

pub use http::MarketApiClient;
pub use services::{BrowserTimeProvider, ConsoleLogger};

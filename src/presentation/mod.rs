pub mod overview;
pub mod wasm_api;

pub use overview::OverviewApp;
pub use wasm_api::{mount_overview, mount_terminal};

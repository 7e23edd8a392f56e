pub mod config;
pub mod data_dir;
pub mod error;
pub mod json_bridge;
pub mod schema;
pub mod store;

pub use config::{EngineConfig, MultiplierOverride};
pub use data_dir::{DataDir, default_base_dir};
pub use error::{Result, StoreError};
pub use json_bridge::export_json_file;
pub use store::Store;

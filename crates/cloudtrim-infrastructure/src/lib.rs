pub mod config_service;
pub mod paths;
pub mod token_storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::CloudTrimPaths;
pub use crate::token_storage::FileTokenStore;

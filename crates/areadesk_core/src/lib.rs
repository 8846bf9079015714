//! Client-side core for managing the Area/Folder hierarchy.
//! Controllers here are the single source of truth for selection and tree
//! invariants; the REST backend is reached through `HierarchyGateway`.

pub mod config;
pub mod controller;
pub mod gateway;
pub mod logging;
pub mod model;

pub use config::{
    ClientConfig, ConfigError, LoggingConfig, ServerConfig, ENV_BASE_URL, ENV_LOG_DIR,
    ENV_LOG_LEVEL,
};
pub use controller::dialog::{AreaDialog, DialogError, FolderDialog, SubmitOutcome};
pub use controller::explorer::{AreaNode, ChildView, ProjectExplorer, TreeView};
pub use controller::notice::{Notice, NoticeLevel};
pub use controller::selector::{folders_in_area, FolderSelector, Selection, SelectionEvent};
pub use gateway::http::HttpGateway;
pub use gateway::memory::InMemoryGateway;
pub use gateway::{list_or_empty, GatewayError, GatewayResult, HierarchyGateway, Listing};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::area::Area;
pub use model::draft::{is_valid_uid, DraftError, NewArea, NewFolder};
pub use model::folder::Folder;
pub use model::ResourceName;
pub use tokio_util::sync::CancellationToken;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

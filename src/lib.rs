pub mod config;
pub mod probe;
pub mod sort;
pub mod tracked_folder;
pub mod tracker;

pub use config::{Config, ConfigError, ExternalApplication, FolderEntry};
pub use probe::{GitPromptProbe, ProbeError, StatusProbe};
pub use sort::SortOrder;
pub use tracked_folder::TrackedFolder;
pub use tracker::Tracker;

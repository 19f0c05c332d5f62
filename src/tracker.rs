use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{Config, ConfigError, ExternalApplication};
use crate::probe::StatusProbe;
use crate::sort::SortOrder;
use crate::tracked_folder::TrackedFolder;

/// Keeps the tracked folder records in step with the configuration.
///
/// `refresh` is a full rebuild: records are constructed fresh from the
/// configured entries and the previous sequence is replaced wholesale, so
/// readers never observe a half-updated listing.
pub struct Tracker {
    config: Config,
    config_path: PathBuf,
    probe: Box<dyn StatusProbe>,
    folders: Vec<TrackedFolder>,
    external_applications: Vec<ExternalApplication>,
}

impl Tracker {
    pub fn new(config: Config, config_path: PathBuf, probe: Box<dyn StatusProbe>) -> Self {
        let mut tracker = Tracker {
            config,
            config_path,
            probe,
            folders: Vec::new(),
            external_applications: Vec::new(),
        };
        tracker.refresh();
        tracker
    }

    /// Rebuilds every record from the configured folder list.
    pub fn refresh(&mut self) {
        let mut folders = Vec::with_capacity(self.config.repositories.len());
        for entry in &self.config.repositories {
            folders.push(TrackedFolder::from_entry(entry, self.probe.as_ref()));
        }

        self.folders = folders;
        self.external_applications = self.config.external_applications.clone();
        info!(folders = self.folders.len(), "refreshed tracked folders");
    }

    pub fn folders(&self) -> &[TrackedFolder] {
        &self.folders
    }

    pub fn add_repository(&mut self, path: &str, image_path: &str, is_favorite: bool) {
        self.config.add_repository(path, image_path, is_favorite);
        self.refresh();
    }

    /// Untracks the folder at `path`. Unknown paths are ignored.
    pub fn remove_repository(&mut self, path: &str) {
        self.config.remove_repository(path.trim());
        self.refresh();
    }

    /// Writes the in-memory state back through the configuration, so edits
    /// made on the records (favorites, paths, icons) become durable.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        self.config.clear_repositories();
        for folder in &self.folders {
            self.config.add_repository(
                &folder.path().display().to_string(),
                folder.image_path(),
                folder.is_favorite(),
            );
        }

        self.config.clear_external_applications();
        for application in &self.external_applications {
            self.config.add_external_application(
                &application.name,
                &application.command,
                &application.argument,
            );
        }

        self.config.save(&self.config_path)
    }

    /// Callers only pass indices they were just handed; anything out of
    /// range is a bug and panics.
    pub fn folder_by_index(&self, index: usize) -> &TrackedFolder {
        &self.folders[index]
    }

    pub fn folder_by_path(&self, path: &str) -> Option<&TrackedFolder> {
        let wanted = Path::new(path.trim());
        self.folders.iter().find(|folder| folder.path() == wanted)
    }

    /// Folder names are last path segments and may repeat across parents,
    /// so this returns every match.
    pub fn folders_by_name(&self, name: &str) -> Vec<&TrackedFolder> {
        self.folders
            .iter()
            .filter(|folder| folder.name() == name)
            .collect()
    }

    pub fn set_folder_path(&mut self, index: usize, path: &str) {
        self.folders[index].set_path(path, self.probe.as_ref());
    }

    pub fn set_folder_image_path(&mut self, index: usize, image_path: &str) {
        self.folders[index].set_image_path(image_path);
    }

    pub fn set_folder_favorite(&mut self, index: usize, is_favorite: bool) {
        self.folders[index].set_is_favorite(is_favorite);
    }

    pub fn external_applications(&self) -> &[ExternalApplication] {
        &self.external_applications
    }

    pub fn external_application_by_index(&self, index: usize) -> &ExternalApplication {
        &self.external_applications[index]
    }

    pub fn external_application_by_name(&self, name: &str) -> Option<&ExternalApplication> {
        self.external_applications
            .iter()
            .find(|application| application.name == name)
    }

    pub fn sort(&mut self, order: SortOrder) {
        self.folders.sort_by(|left, right| order.compare(left, right));
    }

    pub fn date_format(&self) -> &str {
        &self.config.date_format
    }

    pub fn path_column_width(&self) -> usize {
        self.config.path_column_width
    }
}

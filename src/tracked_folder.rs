use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tracing::debug;

use crate::config::FolderEntry;
use crate::probe::{StatusProbe, STATUS_FORMAT, TOOLCHAIN_FORMAT};

/// One tracked folder: a git repository or a plain directory.
///
/// Every derived field is recomputed from scratch by `refresh`; nothing is
/// carried over from a previous state. A folder that stops being a git
/// repository loses its status fields on the next refresh.
#[derive(Debug, Clone)]
pub struct TrackedFolder {
    name: String,
    path: PathBuf,
    image_path: String,
    is_git: bool,
    modified_date: Option<OffsetDateTime>,
    git_status: String,
    go_status: String,
    changes: u32,
    has_remote: bool,
    is_favorite: bool,
}

impl TrackedFolder {
    pub fn new(path: &str, probe: &dyn StatusProbe) -> Self {
        let mut folder = TrackedFolder {
            name: String::new(),
            path: PathBuf::from(path.trim()),
            image_path: String::new(),
            is_git: false,
            modified_date: None,
            git_status: String::new(),
            go_status: String::new(),
            changes: 0,
            has_remote: false,
            is_favorite: false,
        };
        folder.refresh(probe);
        folder
    }

    pub fn from_entry(entry: &FolderEntry, probe: &dyn StatusProbe) -> Self {
        let mut folder = TrackedFolder::new(&entry.path, probe);
        folder.image_path = entry.image_path.clone();
        folder.is_favorite = entry.is_favorite;
        folder
    }

    /// Recomputes every derived field. Failed filesystem or probe lookups
    /// degrade to empty values; one unreadable folder never aborts a listing.
    pub fn refresh(&mut self, probe: &dyn StatusProbe) {
        self.name = folder_name(&self.path);
        self.is_git = self.path.join(".git").exists();
        self.modified_date = modified_date(&self.path);

        if self.is_git {
            self.has_remote = has_remote(&self.path);
            self.git_status = self.probe_field(probe, STATUS_FORMAT);
            self.go_status = self.probe_field(probe, TOOLCHAIN_FORMAT);
            self.changes = count_changes(&self.git_status);
        } else {
            self.has_remote = false;
            self.git_status.clear();
            self.go_status.clear();
            self.changes = 0;
        }
    }

    fn probe_field(&self, probe: &dyn StatusProbe, format: &str) -> String {
        match probe.query(&self.path, format) {
            Ok(output) => output.replace('\n', ""),
            Err(error) => {
                debug!(path = %self.path.display(), %error, "status probe degraded to empty");
                String::new()
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-points the folder and recomputes its fields.
    pub fn set_path(&mut self, path: &str, probe: &dyn StatusProbe) {
        self.path = PathBuf::from(path.trim());
        self.refresh(probe);
    }

    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    pub fn set_image_path(&mut self, image_path: &str) {
        self.image_path = image_path.to_string();
    }

    pub fn is_git(&self) -> bool {
        self.is_git
    }

    /// Last-modified timestamp of the folder itself; `None` when the folder
    /// could not be stat'ed, which sorts as older than any real timestamp.
    pub fn modified_date(&self) -> Option<OffsetDateTime> {
        self.modified_date
    }

    pub fn git_status(&self) -> &str {
        &self.git_status
    }

    pub fn go_status(&self) -> &str {
        &self.go_status
    }

    pub fn changes(&self) -> u32 {
        self.changes
    }

    pub fn has_remote(&self) -> bool {
        self.has_remote
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn set_is_favorite(&mut self, is_favorite: bool) {
        self.is_favorite = is_favorite;
    }
}

fn folder_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn modified_date(path: &Path) -> Option<OffsetDateTime> {
    let metadata = fs::metadata(path).ok()?;
    metadata.modified().ok().map(OffsetDateTime::from)
}

/// A repository has a remote when `.git/config` mentions a `[remote` section.
/// This is a plain substring scan, not an INI parse.
fn has_remote(path: &Path) -> bool {
    match fs::read_to_string(path.join(".git").join("config")) {
        Ok(contents) => contents.contains("[remote"),
        Err(_) => false,
    }
}

/// Sums every maximal digit run in the compact status encoding. The result
/// is a coarse total over branch counters and change counters alike.
pub(crate) fn count_changes(status: &str) -> u32 {
    status
        .split(|ch: char| !ch.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| run.parse::<u32>().unwrap_or(0))
        .sum()
}

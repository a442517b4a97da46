use crate::git_ops::GitOps;
use crate::habit::HabitData;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based TOML storage for habit data, with optional git sync
pub struct Storage {
    file_path: PathBuf,
    sync_git: bool,
    git: GitOps,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>, sync_git: bool) -> Self {
        let file_path = file_path.as_ref().to_path_buf();
        let git = GitOps::new(&file_path);
        Self {
            file_path,
            sync_git,
            git,
        }
    }

    /// Pull remote changes before the first load when sync is enabled
    /// and the file is inside a repository
    pub fn startup(&self) -> Result<()> {
        if self.sync_git && self.git.is_git_managed() {
            self.git.pull()?;
        }
        Ok(())
    }

    /// Load habit data; a missing file is an empty data set
    pub fn load(&self) -> Result<HabitData> {
        if !self.file_path.exists() {
            return Ok(HabitData::new());
        }

        let content = fs::read_to_string(&self.file_path)?;
        let data: HabitData = toml::from_str(&content)?;
        Ok(data)
    }

    /// Save habit data with a default commit message
    pub fn save(&self, data: &HabitData) -> Result<()> {
        self.save_with_message(data, "Update habits")
    }

    /// Save habit data, committing to git with the given message when
    /// sync is enabled and the file is inside a repository
    pub fn save_with_message(&self, data: &HabitData, message: &str) -> Result<()> {
        let content = toml::to_string_pretty(data)?;
        fs::write(&self.file_path, content)?;

        if self.sync_git {
            self.git.commit(&self.file_path, message)?;
        }

        Ok(())
    }

    /// Push any pending commits on shutdown
    pub fn shutdown(&self) -> Result<()> {
        if self.sync_git && self.git.is_git_managed() {
            self.git.push()?;
        }
        Ok(())
    }
}

//! Story Service - writes story drafts to disk.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        AppRequest, DomainError, StoryDraft, StoryScope, render_app_story, render_story,
        story::app_story_id, story_slug,
    },
    error::MonokitResult,
};

/// Where a story was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryReport {
    pub id: String,
    pub path: PathBuf,
}

pub struct StoryService {
    filesystem: Box<dyn Filesystem>,
}

impl StoryService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Directory a story with this scope belongs in.
    pub fn story_dir(scope: &StoryScope, stories_dir: &Path, apps_root: &Path) -> PathBuf {
        match scope {
            StoryScope::Shared => stories_dir.to_path_buf(),
            StoryScope::App(app) => apps_root.join(app.as_str()).join("docs").join("stories"),
        }
    }

    /// Write the draft story for a freshly scaffolded app.
    ///
    /// The draft is derived from the request alone, so an existing draft with
    /// the same id is replaced.
    #[instrument(skip_all, fields(app = %request.name()))]
    pub fn write_app_story(
        &self,
        request: &AppRequest,
        stories_dir: &Path,
        date: &str,
    ) -> MonokitResult<StoryReport> {
        let id = app_story_id(request);
        let path = stories_dir.join(format!("{id}.md"));

        self.filesystem.create_dir_all(stories_dir)?;
        self.filesystem
            .write_file(&path, &render_app_story(request, date))?;
        info!(path = %path.display(), "app story written");

        Ok(StoryReport { id, path })
    }

    /// Write a free-form story. Never overwrites an existing story.
    ///
    /// # Errors
    ///
    /// - `InvalidStoryTitle` when the title slugs to nothing
    /// - `FileExists` when a story with the same slug is already there
    #[instrument(skip_all, fields(title = %draft.title, scope = %draft.scope.label()))]
    pub fn create_story(
        &self,
        draft: &StoryDraft,
        stories_dir: &Path,
        apps_root: &Path,
        date: &str,
    ) -> MonokitResult<StoryReport> {
        let id = story_slug(&draft.title);
        if id.is_empty() {
            return Err(DomainError::InvalidStoryTitle {
                title: draft.title.clone(),
            }
            .into());
        }

        let dir = Self::story_dir(&draft.scope, stories_dir, apps_root);
        let path = dir.join(format!("{id}.md"));
        if self.filesystem.exists(&path) {
            return Err(ApplicationError::FileExists { path }.into());
        }

        self.filesystem.create_dir_all(&dir)?;
        self.filesystem.create_file(&path, &render_story(draft, date))?;
        info!(path = %path.display(), "story written");

        Ok(StoryReport { id, path })
    }
}

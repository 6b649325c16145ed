//! Video gallery screen, two session-only collections.
//!
//! # Responsibility
//! - Hold the memories and goals video collections for this app session.
//! - Stage one picked video while the user fills in its details.
//!
//! # Invariants
//! - Collections are never persisted; a restart always starts empty.
//! - At most one video is staged at a time; saving consumes the stage.
//! - Video ids are epoch-millisecond strings assigned at save.

use crate::model::{next_entity_id, require, FormError, FormResult, VideoCollection, VideoItem};
use chrono::NaiveDate;
use log::{info, warn};

/// A picked video waiting for its details before being saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedVideo {
    pub uri: String,
    pub thumbnail: Option<String>,
}

#[derive(Default)]
pub struct VideosScreen {
    memories: Vec<VideoItem>,
    goals: Vec<VideoItem>,
    staged: Option<StagedVideo>,
}

impl VideosScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a picked video. The uri is required; thumbnail is optional.
    pub fn stage_video(&mut self, uri: &str, thumbnail: Option<String>) -> FormResult<()> {
        let uri = require("video", uri)?.to_string();
        self.staged = Some(StagedVideo { uri, thumbnail });
        Ok(())
    }

    /// Saves the staged video into a collection and returns its id.
    ///
    /// A blank date falls back to `today`. Fails when nothing is staged.
    pub fn save_staged(
        &mut self,
        collection: VideoCollection,
        details: &str,
        location: &str,
        date: &str,
        today: NaiveDate,
    ) -> FormResult<String> {
        let Some(staged) = self.staged.take() else {
            return Err(FormError::MissingField("video"));
        };

        let id = next_entity_id().to_string();
        let date = if date.trim().is_empty() {
            today.format("%Y-%m-%d").to_string()
        } else {
            date.to_string()
        };
        self.rows_mut(collection).push(VideoItem::new(
            id.clone(),
            staged.uri,
            staged.thumbnail,
            details,
            location,
            date,
        ));
        info!(
            "event=save_video module=screens status=ok id={id} collection={collection:?} items={}",
            self.rows(collection).len()
        );
        Ok(id)
    }

    /// Drops the staged video without saving.
    pub fn discard_staged(&mut self) {
        self.staged = None;
    }

    pub fn staged(&self) -> Option<&StagedVideo> {
        self.staged.as_ref()
    }

    /// Removes the video with `id` from a collection. Unknown ids are ignored.
    pub fn delete_video(&mut self, collection: VideoCollection, id: &str) {
        let rows = self.rows_mut(collection);
        let before = rows.len();
        rows.retain(|item| item.id != id);
        if rows.len() == before {
            warn!(
                "event=delete_video module=screens status=ignored reason=unknown_id collection={collection:?}"
            );
            return;
        }
        info!(
            "event=delete_video module=screens status=ok collection={collection:?} items={}",
            self.rows(collection).len()
        );
    }

    pub fn rows(&self, collection: VideoCollection) -> &[VideoItem] {
        match collection {
            VideoCollection::Memories => &self.memories,
            VideoCollection::Goals => &self.goals,
        }
    }

    fn rows_mut(&mut self, collection: VideoCollection) -> &mut Vec<VideoItem> {
        match collection {
            VideoCollection::Memories => &mut self.memories,
            VideoCollection::Goals => &mut self.goals,
        }
    }
}

//! Viewer-side collections: uploads, watch later, playlists, history, reports.
//!
//! Collections hold copies of videos. Editing an upload does not touch the
//! copies already saved to playlists or history.

use crate::namespace::{self, INTRO_SHOWN, PLAYLISTS, REPORTS, UPLOADED_VIDEOS, WATCH_HISTORY, WATCH_LATER};
use crate::storage::Storage;
use chrono::Utc;
use starlight_core::types::{Playlist, Report, ReportReason, ReportStatus};
use starlight_core::{StarlightError, StarlightResult, Video};
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct Library {
    storage: Storage,
}

impl Library {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    // ─── Uploads ───────────────────────────────────────────────────────────

    pub fn uploads(&self) -> Vec<Video> {
        self.storage.read_list(&UPLOADED_VIDEOS)
    }

    /// Save an upload. An existing video with the same id is rewritten in
    /// place; a new one goes to the front.
    pub fn save_upload(&self, video: Video) -> StarlightResult<Video> {
        if video.title.trim().is_empty() {
            return Err(StarlightError::validation("video title is required"));
        }
        let saved = video.clone();
        self.storage.update_list(&UPLOADED_VIDEOS, |videos| {
            match videos.iter_mut().find(|v| v.id == video.id) {
                Some(existing) => *existing = video,
                None => videos.insert(0, video),
            }
        })?;
        info!(video_id = %saved.id, "Upload saved");
        Ok(saved)
    }

    pub fn delete_upload(&self, id: &str) -> StarlightResult<bool> {
        remove_by_id(&self.storage, &UPLOADED_VIDEOS, id)
    }

    // ─── Watch later ───────────────────────────────────────────────────────

    pub fn watch_later(&self) -> Vec<Video> {
        self.storage.read_list(&WATCH_LATER)
    }

    /// Returns false when the video was already saved.
    pub fn add_to_watch_later(&self, video: Video) -> StarlightResult<bool> {
        let mut added = false;
        self.storage.update_list(&WATCH_LATER, |videos| {
            if !videos.iter().any(|v| v.id == video.id) {
                videos.insert(0, video);
                added = true;
            }
        })?;
        Ok(added)
    }

    pub fn remove_from_watch_later(&self, id: &str) -> StarlightResult<bool> {
        remove_by_id(&self.storage, &WATCH_LATER, id)
    }

    // ─── Playlists ─────────────────────────────────────────────────────────

    pub fn playlists(&self) -> Vec<Playlist> {
        self.storage.read_list(&PLAYLISTS)
    }

    pub fn create_playlist(&self, name: &str) -> StarlightResult<Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StarlightError::validation("playlist name is required"));
        }
        let playlist = Playlist {
            id: format!("pl-{}", Uuid::new_v4()),
            name: name.to_string(),
            videos: Vec::new(),
            created_at: Utc::now(),
        };
        let created = playlist.clone();
        self.storage.update_list(&PLAYLISTS, |lists| lists.push(playlist))?;
        info!(playlist_id = %created.id, name = %created.name, "Playlist created");
        Ok(created)
    }

    /// Append a copy of `video` unless the playlist already holds it.
    pub fn add_to_playlist(&self, playlist_id: &str, video: Video) -> StarlightResult<Playlist> {
        let mut result = None;
        self.storage.update_list(&PLAYLISTS, |lists| {
            if let Some(pl) = lists.iter_mut().find(|p| p.id == playlist_id) {
                if !pl.videos.iter().any(|v| v.id == video.id) {
                    pl.videos.push(video);
                }
                result = Some(pl.clone());
            }
        })?;
        result.ok_or_else(|| StarlightError::not_found(format!("playlist {playlist_id}")))
    }

    pub fn remove_from_playlist(&self, playlist_id: &str, video_id: &str) -> StarlightResult<Playlist> {
        let mut result = None;
        self.storage.update_list(&PLAYLISTS, |lists| {
            if let Some(pl) = lists.iter_mut().find(|p| p.id == playlist_id) {
                pl.videos.retain(|v| v.id != video_id);
                result = Some(pl.clone());
            }
        })?;
        result.ok_or_else(|| StarlightError::not_found(format!("playlist {playlist_id}")))
    }

    pub fn delete_playlist(&self, playlist_id: &str) -> StarlightResult<bool> {
        let mut removed = false;
        self.storage.update_list(&PLAYLISTS, |lists| {
            let before = lists.len();
            lists.retain(|p| p.id != playlist_id);
            removed = lists.len() != before;
        })?;
        Ok(removed)
    }

    // ─── History ───────────────────────────────────────────────────────────

    pub fn history(&self) -> Vec<Video> {
        self.storage.read_list(&WATCH_HISTORY)
    }

    /// Most recent first; re-watching moves the video to the front.
    pub fn record_watch(&self, video: Video) -> StarlightResult<()> {
        self.storage.update_list(&WATCH_HISTORY, |videos| {
            videos.retain(|v| v.id != video.id);
            videos.insert(0, video);
        })?;
        Ok(())
    }

    pub fn clear_history(&self) -> StarlightResult<()> {
        self.storage.remove(&WATCH_HISTORY)
    }

    // ─── Reports ───────────────────────────────────────────────────────────

    pub fn reports(&self) -> Vec<Report> {
        self.storage.read_list(&REPORTS)
    }

    pub fn submit_report(&self, video: Video, reason: ReportReason, reporter_id: &str) -> StarlightResult<Report> {
        let report = Report {
            id: format!("rep-{}", Uuid::new_v4()),
            video,
            reason,
            report_date: Utc::now(),
            reporter_id: reporter_id.to_string(),
            status: ReportStatus::InReview,
        };
        let created = report.clone();
        self.storage.update_list(&REPORTS, |reports| reports.insert(0, report))?;
        metrics::counter!("library.reports.submitted").increment(1);
        info!(report_id = %created.id, video_id = %created.video.id, reason = ?created.reason, "Report submitted");
        Ok(created)
    }

    // ─── Session ───────────────────────────────────────────────────────────

    /// True the first time it is called in a session; marks the intro shown.
    pub fn take_intro(&self) -> StarlightResult<bool> {
        let shown = self.storage.read(&INTRO_SHOWN).unwrap_or(None).unwrap_or(false);
        if !shown {
            self.storage.write(&INTRO_SHOWN, &true)?;
        }
        Ok(!shown)
    }
}

fn remove_by_id(storage: &Storage, key: &namespace::Key<Vec<Video>>, id: &str) -> StarlightResult<bool> {
    let mut removed = false;
    storage.update_list(key, |videos| {
        let before = videos.len();
        videos.retain(|v| v.id != id);
        removed = videos.len() != before;
    })?;
    Ok(removed)
}

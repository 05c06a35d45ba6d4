//! Registry of persisted namespaces. Each key is bound to the type stored
//! under it, so call sites never parse or stringify by hand.

use starlight_core::quiz::QuizQuestion;
use starlight_core::types::{Comment, Playlist, PressRelease, Report};
use starlight_core::{Campaign, PlacementConfig, Video};
use std::borrow::Cow;
use std::marker::PhantomData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Survives restarts (browser local storage).
    Local,
    /// Lives for the current session only.
    Session,
}

pub struct Key<T> {
    name: Cow<'static, str>,
    scope: Scope,
    _type: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    pub const fn fixed(name: &'static str, scope: Scope) -> Self {
        Self {
            name: Cow::Borrowed(name),
            scope,
            _type: PhantomData,
        }
    }

    fn dynamic(prefix: &str, input: &str) -> Self {
        Self {
            name: Cow::Owned(format!("{prefix}{}", normalize(input))),
            scope: Scope::Local,
            _type: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }
}

impl<T> std::fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Cache-key normalization: trimmed, lowercased, whitespace runs → `_`.
pub fn normalize(input: &str) -> String {
    input
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

pub static UPLOADED_VIDEOS: Key<Vec<Video>> = Key::fixed("starlight_uploaded_videos", Scope::Local);
pub static WATCH_LATER: Key<Vec<Video>> = Key::fixed("starlight_watch_later", Scope::Local);
pub static PLAYLISTS: Key<Vec<Playlist>> = Key::fixed("starlight_playlists", Scope::Local);
pub static WATCH_HISTORY: Key<Vec<Video>> = Key::fixed("starlight_watch_history", Scope::Local);
pub static SKIPPABLE_ADS: Key<Vec<Campaign>> = Key::fixed("starlight_skippable_ads", Scope::Local);
pub static UNSKIPPABLE_ADS: Key<Vec<Campaign>> =
    Key::fixed("starlight_unskippable_ads", Scope::Local);
pub static SHORTS_ADS: Key<Vec<Campaign>> = Key::fixed("starlight_shorts_ads", Scope::Local);
pub static USER_ADS: Key<Vec<Campaign>> = Key::fixed("starlight_user_ads", Scope::Local);
pub static AD_PLACEMENTS: Key<PlacementConfig> = Key::fixed("starlight_ad_placements", Scope::Local);
pub static REPORTS: Key<Vec<Report>> = Key::fixed("starlight_reports", Scope::Local);
pub static PRESS_RELEASE: Key<PressRelease> = Key::fixed("starlight_press_release", Scope::Local);
pub static INTRO_SHOWN: Key<bool> = Key::fixed("starlight_intro_shown", Scope::Session);

pub const SEARCH_CACHE_PREFIX: &str = "starlight_search_cache_";
pub const COMMENTS_CACHE_PREFIX: &str = "starlight_comments_cache_";
pub const QUIZ_CACHE_PREFIX: &str = "starlight_quiz_cache_";

pub fn search_cache(query: &str) -> Key<Vec<Video>> {
    Key::dynamic(SEARCH_CACHE_PREFIX, query)
}

pub fn comments_cache(title: &str) -> Key<Vec<Comment>> {
    Key::dynamic(COMMENTS_CACHE_PREFIX, title)
}

pub fn quiz_cache(language: &str) -> Key<Vec<QuizQuestion>> {
    Key::dynamic(QUIZ_CACHE_PREFIX, language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Lo-Fi   Beats "), "lo-fi_beats");
        assert_eq!(normalize("Cats"), normalize("cats "));
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_dynamic_keys_share_namespace_by_normalized_input() {
        assert_eq!(search_cache("Street Food").name(), "starlight_search_cache_street_food");
        assert_eq!(search_cache("street   food").name(), search_cache("Street Food").name());
        assert_eq!(comments_cache("My Vlog").name(), "starlight_comments_cache_my_vlog");
        assert_eq!(INTRO_SHOWN.scope(), Scope::Session);
    }
}

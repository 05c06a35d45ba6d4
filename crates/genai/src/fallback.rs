//! Deterministic stand-ins returned when a generative call fails.
//! Each is recognisable by an `error-` id or an "unavailable" headline.

use crate::service::AdCopy;
use starlight_core::types::{Comment, PressRelease};
use starlight_core::{Campaign, CampaignFormat, CampaignStatus, Targeting, Video};

pub const PLACEHOLDER_THUMBNAIL: &str = "https://placehold.co/1280x720?text=Thumbnail+unavailable";
pub const SEARCH_UNAVAILABLE_ID: &str = "error-search";

pub fn search_results(query: &str) -> Vec<Video> {
    vec![Video {
        id: SEARCH_UNAVAILABLE_ID.to_string(),
        title: "Search unavailable".to_string(),
        thumbnail_url: PLACEHOLDER_THUMBNAIL.to_string(),
        channel_name: "StarLight".to_string(),
        channel_avatar_url: String::new(),
        community_name: None,
        community_avatar_url: None,
        views: "0".to_string(),
        upload_time: String::new(),
        upload_date: None,
        duration: "0:00".to_string(),
        description: format!("Results for \"{query}\" could not be loaded due to an API error."),
        category: None,
        subcategory: None,
        country: None,
        state: None,
        city: None,
        is_short: None,
    }]
}

pub fn comments() -> Vec<Comment> {
    vec![Comment {
        author: "StarLight".to_string(),
        text: "Could not load comments due to an API error.".to_string(),
        likes: "0".to_string(),
        timestamp: "just now".to_string(),
    }]
}

pub fn ad_copy() -> AdCopy {
    AdCopy {
        headline: "Ad copy unavailable".to_string(),
        body: "An error occurred while generating ad copy. Please try again.".to_string(),
        call_to_action: "Try again".to_string(),
    }
}

pub fn campaign_suggestions() -> Vec<Campaign> {
    vec![Campaign {
        id: "error-suggestions".to_string(),
        title: "Campaign suggestions unavailable".to_string(),
        status: CampaignStatus::Paused,
        spend: "$0".to_string(),
        thumbnail_url: PLACEHOLDER_THUMBNAIL.to_string(),
        targeting: Targeting::default(),
        format: CampaignFormat::Skippable {
            ctr: "0%".to_string(),
            views: "0".to_string(),
        },
    }]
}

pub fn press_release() -> PressRelease {
    PressRelease {
        headline: "Press release unavailable".to_string(),
        body: "The press release could not be generated due to an API error.".to_string(),
    }
}

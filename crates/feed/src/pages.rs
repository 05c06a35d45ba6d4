//! Page assembly for the home, search and shorts surfaces.

use crate::composer::{compose, FeedItem};
use rand::Rng;
use serde::Serialize;
use starlight_ads::{AdAggregator, SlotResolver};
use starlight_core::{AdSlot, Campaign, CampaignKind, Video};
use starlight_store::{Library, Storage};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub items: Vec<FeedItem>,
    pub sidebar_ad: Option<Campaign>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub query: String,
    pub results: Vec<Video>,
    pub sponsored: Option<Campaign>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortsFeed {
    pub videos: Vec<Video>,
    pub campaigns: Vec<Campaign>,
}

#[derive(Clone)]
pub struct FeedBuilder {
    library: Library,
    aggregator: AdAggregator,
    resolver: SlotResolver,
}

impl FeedBuilder {
    pub fn new(storage: Storage) -> Self {
        Self {
            library: Library::new(storage.clone()),
            aggregator: AdAggregator::new(storage.clone()),
            resolver: SlotResolver::new(storage),
        }
    }

    pub fn home(&self, discovered: Vec<Video>) -> HomePage {
        self.home_with(discovered, &mut rand::thread_rng())
    }

    /// Uploaded videos first, then discovered ones not already uploaded.
    pub fn home_with<R: Rng + ?Sized>(&self, discovered: Vec<Video>, rng: &mut R) -> HomePage {
        let videos = merge_unique(self.library.uploads(), discovered);
        let in_feed = self.resolver.resolve_with(AdSlot::HomeInFeed, rng);
        let sidebar_ad = self.resolver.resolve_with(AdSlot::HomeSidebar, rng);
        let items = compose(videos, in_feed);
        metrics::counter!("feed.pages.composed", "page" => "home").increment(1);
        debug!(items = items.len(), has_sidebar_ad = sidebar_ad.is_some(), "Home feed composed");
        HomePage { items, sidebar_ad }
    }

    pub fn search(&self, query: &str, results: Vec<Video>) -> SearchPage {
        self.search_with(query, results, &mut rand::thread_rng())
    }

    pub fn search_with<R: Rng + ?Sized>(&self, query: &str, results: Vec<Video>, rng: &mut R) -> SearchPage {
        metrics::counter!("feed.pages.composed", "page" => "search").increment(1);
        SearchPage {
            query: query.trim().to_string(),
            results,
            sponsored: self.resolver.resolve_with(AdSlot::SearchSponsored, rng),
        }
    }

    /// Shorts from uploads and the given videos, plus every Active shorts campaign.
    pub fn shorts(&self, videos: Vec<Video>) -> ShortsFeed {
        let videos: Vec<Video> = merge_unique(self.library.uploads(), videos)
            .into_iter()
            .filter(Video::is_short)
            .collect();
        let campaigns: Vec<Campaign> = self
            .aggregator
            .all()
            .into_iter()
            .filter(|c| c.kind() == CampaignKind::Shorts && c.is_active())
            .collect();
        metrics::counter!("feed.pages.composed", "page" => "shorts").increment(1);
        ShortsFeed { videos, campaigns }
    }
}

fn merge_unique(first: Vec<Video>, second: Vec<Video>) -> Vec<Video> {
    let mut seen = HashSet::new();
    first
        .into_iter()
        .chain(second)
        .filter(|v| seen.insert(v.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use starlight_ads::AdConsole;
    use starlight_ads::models::SetPlacementRequest;

    fn video(id: &str, short: bool) -> Video {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": id,
            "thumbnailUrl": "",
            "channelName": "c",
            "isShort": short,
        }))
        .unwrap()
    }

    #[test]
    fn test_home_puts_uploads_first_and_uses_pins() {
        let storage = Storage::in_memory();
        let library = Library::new(storage.clone());
        library.save_upload(video("mine", false)).unwrap();

        let console = AdConsole::new(storage.clone());
        for (slot, id) in [(AdSlot::HomeInFeed, "ad-01"), (AdSlot::HomeSidebar, "sh-01")] {
            console
                .set_placement(SetPlacementRequest {
                    slot,
                    campaign_id: Some(id.into()),
                })
                .unwrap();
        }

        let discovered: Vec<Video> = ["a", "b", "c", "d", "e", "mine"].iter().map(|id| video(id, false)).collect();
        let page = FeedBuilder::new(storage).home_with(discovered, &mut StdRng::seed_from_u64(1));

        // 6 unique videos + poll + ad
        assert_eq!(page.items.len(), 8);
        assert!(matches!(&page.items[0], FeedItem::Video(v) if v.id == "mine"));
        assert!(page.items[2].is_poll());
        assert!(matches!(&page.items[5], FeedItem::Sponsored(c) if c.id == "ad-01"));
        assert_eq!(page.sidebar_ad.unwrap().id, "sh-01");
    }

    #[test]
    fn test_search_page_carries_sponsored_ad() {
        let page = FeedBuilder::new(Storage::in_memory()).search_with(
            "  cats ",
            vec![video("x", false)],
            &mut StdRng::seed_from_u64(3),
        );
        assert_eq!(page.query, "cats");
        assert!(page.sponsored.unwrap().is_active());
    }

    #[test]
    fn test_shorts_feed_filters_videos_and_campaigns() {
        let storage = Storage::in_memory();
        Library::new(storage.clone()).save_upload(video("my-short", true)).unwrap();

        let feed = FeedBuilder::new(storage).shorts(vec![video("long", false), video("s1", true)]);
        let ids: Vec<&str> = feed.videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["my-short", "s1"]);

        let campaign_ids: Vec<&str> = feed.campaigns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(campaign_ids, vec!["sh-01", "sh-03"]);
    }
}

use serde::Serialize;
use starlight_core::{Campaign, Video};

/// Index the sponsored card takes in a long enough feed.
pub const AD_INDEX: usize = 4;
/// Index of the community poll card.
pub const POLL_INDEX: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPoll {
    pub id: &'static str,
    pub question: &'static str,
    pub options: [&'static str; 4],
}

/// The single fixed poll card shown in feeds.
pub const COMMUNITY_POLL: CommunityPoll = CommunityPoll {
    id: "community-poll",
    question: "What should we feature next week?",
    options: ["Music", "Gaming", "Cooking", "Travel"],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "item", rename_all = "lowercase")]
pub enum FeedItem {
    Video(Video),
    Sponsored(Campaign),
    Poll(CommunityPoll),
}

#[cfg(test)]
impl FeedItem {
    pub fn is_poll(&self) -> bool {
        matches!(self, FeedItem::Poll(_))
    }

    pub fn is_sponsored(&self) -> bool {
        matches!(self, FeedItem::Sponsored(_))
    }
}

/// Splice the sponsored campaign and the community poll into a video list.
///
/// The ad goes at [`AD_INDEX`] when there are more than `AD_INDEX` videos and
/// is appended otherwise. The poll then goes at [`POLL_INDEX`] when the video
/// list itself has more than `POLL_INDEX` entries. Because the poll splice runs
/// second, the ad ends up at index 5 whenever both are present.
// NOTE: the ad shift looks unintended but is the observed layout; keep it
// until product decides otherwise.
pub fn compose(videos: Vec<Video>, ad: Option<Campaign>) -> Vec<FeedItem> {
    let base_len = videos.len();
    let mut feed: Vec<FeedItem> = videos.into_iter().map(FeedItem::Video).collect();

    if let Some(campaign) = ad {
        if base_len > AD_INDEX {
            feed.insert(AD_INDEX, FeedItem::Sponsored(campaign));
        } else {
            feed.push(FeedItem::Sponsored(campaign));
        }
    }

    if base_len > POLL_INDEX {
        feed.insert(POLL_INDEX, FeedItem::Poll(COMMUNITY_POLL));
    }

    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use starlight_core::{CampaignFormat, CampaignStatus, Targeting};

    fn video(i: usize) -> Video {
        serde_json::from_value(serde_json::json!({
            "id": format!("v{i}"),
            "title": format!("Video {i}"),
            "thumbnailUrl": "",
            "channelName": "c",
        }))
        .unwrap()
    }

    fn videos(n: usize) -> Vec<Video> {
        (0..n).map(video).collect()
    }

    fn ad() -> Campaign {
        Campaign {
            id: "ad-01".into(),
            title: "Ad".into(),
            status: CampaignStatus::Active,
            spend: "$1".into(),
            thumbnail_url: String::new(),
            targeting: Targeting::default(),
            format: CampaignFormat::Shorts {
                impressions: "1".into(),
            },
        }
    }

    fn position(feed: &[FeedItem], pred: fn(&FeedItem) -> bool) -> Option<usize> {
        feed.iter().position(pred)
    }

    #[test]
    fn test_long_feed_gets_ad_and_poll() {
        for n in [5, 6, 12] {
            let feed = compose(videos(n), Some(ad()));
            assert_eq!(feed.len(), n + 2);
            assert_eq!(position(&feed, FeedItem::is_poll), Some(2));
            assert_eq!(position(&feed, FeedItem::is_sponsored), Some(5));
        }
    }

    #[test]
    fn test_short_feed_appends_ad_without_poll() {
        for n in 0..=2 {
            let feed = compose(videos(n), Some(ad()));
            assert_eq!(feed.len(), n + 1);
            assert!(!feed.iter().any(FeedItem::is_poll));
            assert!(feed.last().unwrap().is_sponsored());
        }
    }

    #[test]
    fn test_mid_length_feed_appends_ad_then_poll() {
        let feed = compose(videos(3), Some(ad()));
        assert_eq!(feed.len(), 5);
        assert_eq!(position(&feed, FeedItem::is_poll), Some(2));
        assert!(feed.last().unwrap().is_sponsored());

        let feed = compose(videos(4), Some(ad()));
        assert_eq!(feed.len(), 6);
        assert!(feed[5].is_sponsored());
    }

    #[test]
    fn test_no_ad() {
        let feed = compose(videos(6), None);
        assert_eq!(feed.len(), 7);
        assert!(feed[2].is_poll());
        assert!(!feed.iter().any(FeedItem::is_sponsored));
        assert_eq!(compose(Vec::new(), None), Vec::new());
    }

    #[test]
    fn test_videos_keep_their_order() {
        let feed = compose(videos(6), Some(ad()));
        let ids: Vec<&str> = feed
            .iter()
            .filter_map(|item| match item {
                FeedItem::Video(v) => Some(v.id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec!["v0", "v1", "v2", "v3", "v4", "v5"]);
    }

    #[test]
    fn test_item_wire_shape() {
        let json = serde_json::to_value(FeedItem::Poll(COMMUNITY_POLL)).unwrap();
        assert_eq!(json["type"], "poll");
        assert_eq!(json["item"]["id"], "community-poll");
    }
}

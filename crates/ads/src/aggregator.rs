//! Merges vendor and user campaign buckets into one aggregate set.

use crate::vendor;
use starlight_core::{Campaign, StarlightResult};
use starlight_store::namespace::USER_ADS;
use starlight_store::Storage;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Deduplicate by id. Sources are applied in argument order; a later
/// campaign with a colliding id replaces the earlier value but keeps the
/// position where that id was first seen.
pub fn aggregate(
    user: Vec<Campaign>,
    skippable: Vec<Campaign>,
    unskippable: Vec<Campaign>,
    shorts: Vec<Campaign>,
) -> Vec<Campaign> {
    let mut merged: Vec<Campaign> = Vec::with_capacity(user.len() + skippable.len() + unskippable.len() + shorts.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(merged.capacity());

    for campaign in user.into_iter().chain(skippable).chain(unskippable).chain(shorts) {
        match index.get(&campaign.id) {
            Some(&pos) => merged[pos] = campaign,
            None => {
                index.insert(campaign.id.clone(), merged.len());
                merged.push(campaign);
            }
        }
    }
    merged
}

/// Reads every bucket from storage and aggregates them.
#[derive(Clone)]
pub struct AdAggregator {
    storage: Storage,
}

impl AdAggregator {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// The aggregate set. Any storage or decoding failure yields an empty
    /// list, which callers read as "no ads available".
    pub fn all(&self) -> Vec<Campaign> {
        match self.try_all() {
            Ok(campaigns) => {
                debug!(count = campaigns.len(), "Aggregated campaigns");
                campaigns
            }
            Err(e) => {
                warn!(error = %e, "Campaign aggregation failed, serving no ads");
                metrics::counter!("ads.aggregate.failures").increment(1);
                Vec::new()
            }
        }
    }

    fn try_all(&self) -> StarlightResult<Vec<Campaign>> {
        let user = self.storage.read(&USER_ADS)?.unwrap_or_default();
        let buckets = vendor::load_buckets(&self.storage)?;
        Ok(aggregate(user, buckets.skippable, buckets.unskippable, buckets.shorts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starlight_core::{CampaignFormat, CampaignStatus, Targeting};
    use starlight_store::namespace::SKIPPABLE_ADS;
    use std::collections::HashSet;

    fn campaign(id: &str, title: &str) -> Campaign {
        Campaign {
            id: id.into(),
            title: title.into(),
            status: CampaignStatus::Active,
            spend: "$0".into(),
            thumbnail_url: String::new(),
            targeting: Targeting::default(),
            format: CampaignFormat::Shorts {
                impressions: "0".into(),
            },
        }
    }

    #[test]
    fn test_every_id_once() {
        let user = vec![campaign("user-1", "u"), campaign("x", "user x")];
        let skippable = vec![campaign("ad-01", "s1"), campaign("ad-02", "s2")];
        let unskippable = vec![campaign("un-01", "n1"), campaign("ad-01", "dup")];
        let shorts = vec![campaign("sh-01", "h1"), campaign("x", "vendor x")];

        let inputs: HashSet<String> = user
            .iter()
            .chain(&skippable)
            .chain(&unskippable)
            .chain(&shorts)
            .map(|c| c.id.clone())
            .collect();

        let merged = aggregate(user, skippable, unskippable, shorts);
        let ids: Vec<&str> = merged.iter().map(|c| c.id.as_str()).collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len());
        assert_eq!(unique.len(), inputs.len());
        assert!(inputs.iter().all(|id| unique.contains(id.as_str())));
    }

    #[test]
    fn test_later_source_wins_but_first_position_kept() {
        let merged = aggregate(
            vec![campaign("x", "user copy"), campaign("user-2", "mine")],
            vec![campaign("ad-01", "s")],
            vec![],
            vec![campaign("x", "vendor copy")],
        );
        let ids: Vec<&str> = merged.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "user-2", "ad-01"]);
        assert_eq!(merged[0].title, "vendor copy");
    }

    #[test]
    fn test_empty_inputs() {
        assert!(aggregate(vec![], vec![], vec![], vec![]).is_empty());
    }

    #[test]
    fn test_corrupt_bucket_yields_no_ads() {
        let storage = Storage::in_memory();
        let aggregator = AdAggregator::new(storage.clone());
        assert!(!aggregator.all().is_empty());

        storage.local().set(SKIPPABLE_ADS.name(), "[{\"id\": 5}]").unwrap();
        assert!(aggregator.all().is_empty());
    }
}

//! Ad console operations: user-created campaigns, status changes, deletion
//! and slot placements.
//!
//! Buckets are plain read-modify-write values in storage. Two consoles
//! editing the same bucket concurrently race; the last write wins.

use crate::aggregator::AdAggregator;
use crate::models::*;
use crate::resolver::SlotResolver;
use crate::vendor;
use starlight_core::{
    AdSlot, Campaign, CampaignFormat, CampaignKind, CampaignStatus, PlacementConfig, StarlightError,
    StarlightResult, MANUAL_ID_PREFIX, USER_ID_PREFIX,
};
use starlight_store::namespace::{Key, AD_PLACEMENTS, SHORTS_ADS, SKIPPABLE_ADS, UNSKIPPABLE_ADS, USER_ADS};
use starlight_store::Storage;
use tracing::info;
use uuid::Uuid;

const DEFAULT_UNSKIPPABLE_DURATION: &str = "15s";

#[derive(Clone)]
pub struct AdConsole {
    storage: Storage,
    aggregator: AdAggregator,
    resolver: SlotResolver,
}

impl AdConsole {
    pub fn new(storage: Storage) -> Self {
        Self {
            aggregator: AdAggregator::new(storage.clone()),
            resolver: SlotResolver::new(storage.clone()),
            storage,
        }
    }

    pub fn resolver(&self) -> &SlotResolver {
        &self.resolver
    }

    // ─── Campaigns ─────────────────────────────────────────────────────────

    pub fn list_campaigns(&self) -> Vec<Campaign> {
        self.aggregator.all()
    }

    pub fn get_campaign(&self, id: &str) -> Option<Campaign> {
        self.aggregator.all().into_iter().find(|c| c.id == id)
    }

    /// Create a campaign in the user-ads bucket. New campaigns start In Review
    /// unless the request says otherwise, with zeroed metrics.
    pub fn create_campaign(&self, req: CreateAdRequest) -> StarlightResult<Campaign> {
        let title = req.title.trim();
        if title.is_empty() {
            return Err(StarlightError::validation("campaign title is required"));
        }

        let format = match req.kind {
            CampaignKind::Skippable => CampaignFormat::Skippable {
                ctr: "0%".to_string(),
                views: "0".to_string(),
            },
            CampaignKind::Unskippable => CampaignFormat::Unskippable {
                impressions: "0".to_string(),
                duration: req
                    .duration
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_UNSKIPPABLE_DURATION.to_string()),
            },
            CampaignKind::Shorts => CampaignFormat::Shorts {
                impressions: "0".to_string(),
            },
        };

        let campaign = Campaign {
            id: format!("{USER_ID_PREFIX}{}", Uuid::new_v4()),
            title: title.to_string(),
            status: req.status.unwrap_or(CampaignStatus::InReview),
            spend: req.spend.unwrap_or_else(|| "$0".to_string()),
            thumbnail_url: req.thumbnail_url,
            targeting: req.targeting,
            format,
        };

        let created = campaign.clone();
        self.storage.update_list(&USER_ADS, |ads| ads.insert(0, campaign))?;
        metrics::counter!("ads.campaigns.created").increment(1);
        info!(campaign_id = %created.id, kind = ?created.kind(), "User campaign created");
        Ok(created)
    }

    /// Save a generated suggestion under its own `manual-` id. Saving the
    /// same suggestion again replaces the stored copy.
    pub fn save_suggestion(&self, campaign: Campaign) -> StarlightResult<Campaign> {
        if !campaign.id.starts_with(MANUAL_ID_PREFIX) {
            return Err(StarlightError::validation(format!(
                "suggested campaign id must start with '{MANUAL_ID_PREFIX}'"
            )));
        }
        if campaign.title.trim().is_empty() {
            return Err(StarlightError::validation("campaign title is required"));
        }

        let saved = campaign.clone();
        self.storage.update_list(&USER_ADS, |ads| {
            ads.retain(|c| c.id != campaign.id);
            ads.insert(0, campaign);
        })?;
        metrics::counter!("ads.campaigns.saved").increment(1);
        info!(campaign_id = %saved.id, "Suggested campaign saved");
        Ok(saved)
    }

    /// Delete by id. `user-`/`manual-` ids are removed from the user bucket;
    /// anything else from the vendor bucket that holds it.
    pub fn delete_campaign(&self, id: &str) -> StarlightResult<bool> {
        let removed = if Campaign::is_user_owned_id(id) {
            remove_from(&self.storage, &USER_ADS, id)?
        } else {
            vendor::load_buckets(&self.storage)?;
            let mut removed = false;
            for key in [&SKIPPABLE_ADS, &UNSKIPPABLE_ADS, &SHORTS_ADS] {
                if remove_from(&self.storage, key, id)? {
                    removed = true;
                    break;
                }
            }
            removed
        };
        if removed {
            metrics::counter!("ads.campaigns.deleted").increment(1);
            info!(campaign_id = id, "Campaign deleted");
        }
        Ok(removed)
    }

    /// Change a campaign's status in whichever bucket holds it.
    pub fn set_status(&self, id: &str, status: CampaignStatus) -> StarlightResult<Campaign> {
        // Vendor buckets must be materialized before they can be edited
        vendor::load_buckets(&self.storage)?;

        let keys: Vec<&'static Key<Vec<Campaign>>> = if Campaign::is_user_owned_id(id) {
            vec![&USER_ADS]
        } else {
            vec![&SKIPPABLE_ADS, &UNSKIPPABLE_ADS, &SHORTS_ADS]
        };

        for key in keys {
            let mut updated = None;
            let mut items = self.storage.read(key)?.unwrap_or_default();
            if let Some(c) = items.iter_mut().find(|c| c.id == id) {
                c.status = status;
                updated = Some(c.clone());
            }
            if let Some(campaign) = updated {
                self.storage.write(key, &items)?;
                info!(campaign_id = id, status = status.as_str(), "Campaign status changed");
                return Ok(campaign);
            }
        }
        Err(StarlightError::not_found(format!("campaign {id}")))
    }

    // ─── Placements ────────────────────────────────────────────────────────

    pub fn placements(&self) -> Vec<SlotPlacement> {
        let config = self.resolver.placements();
        let campaigns = self.aggregator.all();
        AdSlot::ALL
            .iter()
            .map(|&slot| {
                let pinned = config.pinned(slot).map(str::to_string);
                let pin_effective = pinned
                    .as_deref()
                    .map(|id| campaigns.iter().any(|c| c.id == id && c.is_active()))
                    .unwrap_or(false);
                SlotPlacement {
                    slot,
                    label: slot.label(),
                    pinned_campaign_id: pinned,
                    pin_effective,
                }
            })
            .collect()
    }

    /// Pin (or unpin) a campaign. Pins are stored as given; whether the
    /// campaign is Active is only checked at resolution time.
    pub fn set_placement(&self, req: SetPlacementRequest) -> StarlightResult<PlacementConfig> {
        let mut config = self.resolver.placements();
        config.set(req.slot, req.campaign_id.clone());
        self.storage.write(&AD_PLACEMENTS, &config)?;
        info!(slot = %req.slot, campaign_id = ?req.campaign_id, "Placement updated");
        Ok(config)
    }

    // ─── Overview ──────────────────────────────────────────────────────────

    pub fn overview(&self) -> AdOverview {
        let mut overview = AdOverview::default();
        for c in self.aggregator.all() {
            overview.total_campaigns += 1;
            match c.status {
                CampaignStatus::Active => overview.active_campaigns += 1,
                CampaignStatus::Paused => overview.paused_campaigns += 1,
                CampaignStatus::Ended => overview.ended_campaigns += 1,
                CampaignStatus::InReview => overview.in_review_campaigns += 1,
            }
            match c.kind() {
                CampaignKind::Skippable => overview.skippable += 1,
                CampaignKind::Unskippable => overview.unskippable += 1,
                CampaignKind::Shorts => overview.shorts += 1,
            }
            if Campaign::is_user_owned_id(&c.id) {
                overview.user_created += 1;
            }
        }
        overview
    }
}

fn remove_from(storage: &Storage, key: &Key<Vec<Campaign>>, id: &str) -> StarlightResult<bool> {
    let Some(mut items) = storage.read(key)? else {
        return Ok(false);
    };
    let before = items.len();
    items.retain(|c| c.id != id);
    if items.len() == before {
        return Ok(false);
    }
    storage.write(key, &items)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use starlight_core::Targeting;

    fn request(title: &str, kind: CampaignKind) -> CreateAdRequest {
        CreateAdRequest {
            title: title.into(),
            kind,
            thumbnail_url: String::new(),
            spend: None,
            duration: None,
            status: None,
            targeting: Targeting::default(),
        }
    }

    #[test]
    fn test_create_prepends_user_ad() {
        let console = AdConsole::new(Storage::in_memory());
        let first = console.create_campaign(request("First", CampaignKind::Shorts)).unwrap();
        let second = console.create_campaign(request("Second", CampaignKind::Unskippable)).unwrap();

        assert!(first.id.starts_with("user-"));
        assert_eq!(second.status, CampaignStatus::InReview);
        assert!(matches!(&second.format, CampaignFormat::Unskippable { duration, .. } if duration == "15s"));

        let all = console.list_campaigns();
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
        assert!(console.create_campaign(request("   ", CampaignKind::Skippable)).is_err());
    }

    #[test]
    fn test_delete_routes_by_prefix() {
        let storage = Storage::in_memory();
        let console = AdConsole::new(storage.clone());
        let mine = console.create_campaign(request("Mine", CampaignKind::Skippable)).unwrap();
        let vendor_before = console.list_campaigns().len() - 1;

        assert!(console.delete_campaign(&mine.id).unwrap());
        assert!(!console.delete_campaign(&mine.id).unwrap());
        assert_eq!(console.list_campaigns().len(), vendor_before);

        // Vendor id goes to its own bucket and leaves the others alone
        assert!(console.delete_campaign("un-02").unwrap());
        let unskippable = storage.read(&UNSKIPPABLE_ADS).unwrap().unwrap();
        assert!(unskippable.iter().all(|c| c.id != "un-02"));
        assert_eq!(storage.read(&SKIPPABLE_ADS).unwrap().unwrap().len(), 4);

        // A user-prefixed id never touches vendor buckets
        assert!(!console.delete_campaign("user-ad-01").unwrap());
    }

    fn suggestion(id: &str) -> Campaign {
        Campaign {
            id: id.into(),
            title: "Festive Offers".into(),
            status: CampaignStatus::Paused,
            spend: "$900".into(),
            thumbnail_url: String::new(),
            targeting: Targeting::default(),
            format: CampaignFormat::Skippable {
                ctr: "3.4%".into(),
                views: "54K".into(),
            },
        }
    }

    #[test]
    fn test_saved_suggestion_keeps_manual_id() {
        let storage = Storage::in_memory();
        let console = AdConsole::new(storage.clone());

        let saved = console.save_suggestion(suggestion("manual-42")).unwrap();
        console.save_suggestion(suggestion("manual-42")).unwrap();
        let user_ads = storage.read(&USER_ADS).unwrap().unwrap();
        assert_eq!(user_ads.len(), 1);
        assert_eq!(user_ads[0].id, "manual-42");
        assert_eq!(console.overview().user_created, 1);

        let paused = console.set_status(&saved.id, CampaignStatus::Active).unwrap();
        assert_eq!(paused.status, CampaignStatus::Active);

        assert!(console.delete_campaign("manual-42").unwrap());
        assert!(storage.read(&USER_ADS).unwrap().unwrap().is_empty());
        assert!(console.get_campaign("manual-42").is_none());

        assert!(matches!(
            console.save_suggestion(suggestion("ad-01")),
            Err(StarlightError::Validation(_))
        ));
    }

    #[test]
    fn test_set_status_on_vendor_and_user() {
        let console = AdConsole::new(Storage::in_memory());
        let c = console.set_status("ad-02", CampaignStatus::Active).unwrap();
        assert_eq!(c.status, CampaignStatus::Active);
        assert_eq!(console.get_campaign("ad-02").unwrap().status, CampaignStatus::Active);

        let mine = console.create_campaign(request("Mine", CampaignKind::Shorts)).unwrap();
        console.set_status(&mine.id, CampaignStatus::Paused).unwrap();
        assert_eq!(console.get_campaign(&mine.id).unwrap().status, CampaignStatus::Paused);

        assert!(matches!(
            console.set_status("nope", CampaignStatus::Ended),
            Err(StarlightError::NotFound(_))
        ));
    }

    #[test]
    fn test_placements_report_pin_effectiveness() {
        let console = AdConsole::new(Storage::in_memory());
        console
            .set_placement(SetPlacementRequest {
                slot: AdSlot::HomeSidebar,
                campaign_id: Some("ad-02".into()),
            })
            .unwrap();
        console
            .set_placement(SetPlacementRequest {
                slot: AdSlot::WatchPreRoll,
                campaign_id: Some("un-01".into()),
            })
            .unwrap();

        let placements = console.placements();
        assert_eq!(placements.len(), AdSlot::ALL.len());
        let home = placements.iter().find(|p| p.slot == AdSlot::HomeSidebar).unwrap();
        assert!(!home.pin_effective);
        let pre_roll = placements.iter().find(|p| p.slot == AdSlot::WatchPreRoll).unwrap();
        assert!(pre_roll.pin_effective);
        assert_eq!(console.resolver().resolve(AdSlot::WatchPreRoll).unwrap().id, "un-01");
    }

    #[test]
    fn test_overview_counts() {
        let console = AdConsole::new(Storage::in_memory());
        console.create_campaign(request("Mine", CampaignKind::Skippable)).unwrap();
        let o = console.overview();
        assert_eq!(o.total_campaigns, 11);
        assert_eq!(o.skippable, 5);
        assert_eq!(o.unskippable, 3);
        assert_eq!(o.shorts, 3);
        assert_eq!(o.user_created, 1);
        assert_eq!(o.active_campaigns, 6);
        assert_eq!(o.in_review_campaigns, 2);
    }
}

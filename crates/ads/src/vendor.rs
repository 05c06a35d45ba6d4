//! Vendor-seeded campaigns. Each bucket is materialized into storage the
//! first time it is read and served from the cache afterwards.

use starlight_core::{Campaign, CampaignFormat, CampaignStatus, StarlightResult, Targeting};
use starlight_store::namespace::{Key, SHORTS_ADS, SKIPPABLE_ADS, UNSKIPPABLE_ADS};
use starlight_store::Storage;
use tracing::info;

pub struct VendorBuckets {
    pub skippable: Vec<Campaign>,
    pub unskippable: Vec<Campaign>,
    pub shorts: Vec<Campaign>,
}

pub fn load_buckets(storage: &Storage) -> StarlightResult<VendorBuckets> {
    Ok(VendorBuckets {
        skippable: load_or_seed(storage, &SKIPPABLE_ADS, seed_skippable)?,
        unskippable: load_or_seed(storage, &UNSKIPPABLE_ADS, seed_unskippable)?,
        shorts: load_or_seed(storage, &SHORTS_ADS, seed_shorts)?,
    })
}

fn load_or_seed(
    storage: &Storage,
    key: &Key<Vec<Campaign>>,
    seed: fn() -> Vec<Campaign>,
) -> StarlightResult<Vec<Campaign>> {
    if let Some(cached) = storage.read(key)? {
        return Ok(cached);
    }
    let campaigns = seed();
    storage.write(key, &campaigns)?;
    info!(key = key.name(), count = campaigns.len(), "Vendor campaigns materialized");
    Ok(campaigns)
}

fn vendor(id: &str, title: &str, status: CampaignStatus, spend: &str, category: &str, format: CampaignFormat) -> Campaign {
    Campaign {
        id: id.to_string(),
        title: title.to_string(),
        status,
        spend: spend.to_string(),
        thumbnail_url: format!("https://picsum.photos/seed/{id}/640/360"),
        targeting: Targeting {
            category: Some(category.to_string()),
            ..Default::default()
        },
        format,
    }
}

fn skippable(ctr: &str, views: &str) -> CampaignFormat {
    CampaignFormat::Skippable {
        ctr: ctr.to_string(),
        views: views.to_string(),
    }
}

fn unskippable(impressions: &str, duration: &str) -> CampaignFormat {
    CampaignFormat::Unskippable {
        impressions: impressions.to_string(),
        duration: duration.to_string(),
    }
}

fn shorts(impressions: &str) -> CampaignFormat {
    CampaignFormat::Shorts {
        impressions: impressions.to_string(),
    }
}

pub fn seed_skippable() -> Vec<Campaign> {
    use CampaignStatus::*;
    vec![
        vendor("ad-01", "Summer Sneaker Launch", Active, "$1,250", "Fashion", skippable("3.2%", "48K")),
        vendor("ad-02", "Cloud Storage Pro", Paused, "$890", "Technology", skippable("2.1%", "31K")),
        vendor("ad-03", "Weekend Food Fest", Active, "$430", "Food", skippable("4.5%", "12K")),
        vendor("ad-04", "Budget Travel Deals", Ended, "$2,100", "Travel", skippable("1.8%", "96K")),
    ]
}

pub fn seed_unskippable() -> Vec<Campaign> {
    use CampaignStatus::*;
    vec![
        vendor("un-01", "Festival Smartphone Sale", Active, "$3,400", "Technology", unskippable("210K", "15s")),
        vendor("un-02", "Insurance Made Simple", InReview, "$0", "Finance", unskippable("0", "20s")),
        vendor("un-03", "Morning Chai Blend", Active, "$760", "Food", unskippable("58K", "6s")),
    ]
}

pub fn seed_shorts() -> Vec<Campaign> {
    use CampaignStatus::*;
    vec![
        vendor("sh-01", "60-Second Workout", Active, "$310", "Fitness", shorts("75K")),
        vendor("sh-02", "Street Style Drop", Paused, "$95", "Fashion", shorts("9K")),
        vendor("sh-03", "Gaming Headset Teaser", Active, "$520", "Gaming", shorts("140K")),
    ]
}

//! Ad campaigns in their three formats.
//!
//! A campaign always carries an explicit [`CampaignKind`]. Records written
//! before the kind was persisted (or produced by external sources that never
//! set it) are classified structurally on read:
//! `ctr` → skippable, `impressions` + `duration` → unskippable,
//! `impressions` alone → shorts.

use crate::error::StarlightError;
use serde::{Deserialize, Serialize};

/// Identifier prefixes of campaigns created in the ad console.
pub const USER_ID_PREFIX: &str = "user-";
pub const MANUAL_ID_PREFIX: &str = "manual-";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CampaignStatus {
    Active,
    Paused,
    Ended,
    #[serde(rename = "In Review")]
    InReview,
}

impl CampaignStatus {
    pub const ALL: [CampaignStatus; 4] = [
        CampaignStatus::Active,
        CampaignStatus::Paused,
        CampaignStatus::Ended,
        CampaignStatus::InReview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "Active",
            CampaignStatus::Paused => "Paused",
            CampaignStatus::Ended => "Ended",
            CampaignStatus::InReview => "In Review",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CampaignKind {
    Skippable,
    Unskippable,
    Shorts,
}

/// Format-specific metrics. All values are display strings ("2.4%", "1.2M", "15s").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignFormat {
    Skippable { ctr: String, views: String },
    Unskippable { impressions: String, duration: String },
    Shorts { impressions: String },
}

impl CampaignFormat {
    pub fn kind(&self) -> CampaignKind {
        match self {
            CampaignFormat::Skippable { .. } => CampaignKind::Skippable,
            CampaignFormat::Unskippable { .. } => CampaignKind::Unskippable,
            CampaignFormat::Shorts { .. } => CampaignKind::Shorts,
        }
    }
}

/// Optional audience targeting attached to a campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Targeting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constituency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CampaignRecord", into = "CampaignRecord")]
pub struct Campaign {
    pub id: String,
    pub title: String,
    pub status: CampaignStatus,
    pub spend: String,
    pub thumbnail_url: String,
    pub targeting: Targeting,
    pub format: CampaignFormat,
}

impl Campaign {
    pub fn kind(&self) -> CampaignKind {
        self.format.kind()
    }

    pub fn is_active(&self) -> bool {
        self.status == CampaignStatus::Active
    }

    /// Console-created campaigns live in the user-ads bucket; everything else
    /// is vendor-seeded. Decided purely by identifier prefix.
    pub fn is_user_owned_id(id: &str) -> bool {
        id.starts_with(USER_ID_PREFIX) || id.starts_with(MANUAL_ID_PREFIX)
    }
}

/// Flat wire representation shared by persisted data and provider responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CampaignRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<CampaignKind>,
    id: String,
    title: String,
    status: CampaignStatus,
    #[serde(default)]
    spend: String,
    #[serde(default)]
    thumbnail_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ctr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    views: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    impressions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration: Option<String>,
    #[serde(flatten)]
    targeting: Targeting,
}

/// Structural classification of a raw record. Returns `None` when the
/// record carries none of the format fields.
pub fn classify_structurally(
    has_ctr: bool,
    has_impressions: bool,
    has_duration: bool,
) -> Option<CampaignKind> {
    if has_ctr {
        Some(CampaignKind::Skippable)
    } else if has_impressions && has_duration {
        Some(CampaignKind::Unskippable)
    } else if has_impressions {
        Some(CampaignKind::Shorts)
    } else {
        None
    }
}

impl TryFrom<CampaignRecord> for Campaign {
    type Error = StarlightError;

    fn try_from(r: CampaignRecord) -> Result<Self, Self::Error> {
        let kind = match r.kind {
            Some(kind) => kind,
            None => classify_structurally(
                r.ctr.is_some(),
                r.impressions.is_some(),
                r.duration.is_some(),
            )
            .ok_or_else(|| {
                StarlightError::MalformedCampaign(format!(
                    "campaign '{}' has no ctr or impressions field",
                    r.id
                ))
            })?,
        };

        let missing = |field: &str| {
            StarlightError::MalformedCampaign(format!(
                "{kind:?} campaign '{}' is missing '{field}'",
                r.id
            ))
        };

        let format = match kind {
            CampaignKind::Skippable => CampaignFormat::Skippable {
                ctr: r.ctr.clone().ok_or_else(|| missing("ctr"))?,
                views: r.views.clone().unwrap_or_default(),
            },
            CampaignKind::Unskippable => CampaignFormat::Unskippable {
                impressions: r.impressions.clone().ok_or_else(|| missing("impressions"))?,
                duration: r.duration.clone().ok_or_else(|| missing("duration"))?,
            },
            CampaignKind::Shorts => CampaignFormat::Shorts {
                impressions: r.impressions.clone().ok_or_else(|| missing("impressions"))?,
            },
        };

        Ok(Campaign {
            id: r.id,
            title: r.title,
            status: r.status,
            spend: r.spend,
            thumbnail_url: r.thumbnail_url,
            targeting: r.targeting,
            format,
        })
    }
}

impl From<Campaign> for CampaignRecord {
    fn from(c: Campaign) -> Self {
        let kind = c.kind();
        let (ctr, views, impressions, duration) = match c.format {
            CampaignFormat::Skippable { ctr, views } => (Some(ctr), Some(views), None, None),
            CampaignFormat::Unskippable {
                impressions,
                duration,
            } => (None, None, Some(impressions), Some(duration)),
            CampaignFormat::Shorts { impressions } => (None, None, Some(impressions), None),
        };
        CampaignRecord {
            kind: Some(kind),
            id: c.id,
            title: c.title,
            status: c.status,
            spend: c.spend,
            thumbnail_url: c.thumbnail_url,
            ctr,
            views,
            impressions,
            duration,
            targeting: c.targeting,
        }
    }
}

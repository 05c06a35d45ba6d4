//! Ad console request/response types.

use serde::{Deserialize, Serialize};
use starlight_core::{AdSlot, CampaignKind, CampaignStatus, Targeting};

// ─── Requests ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdRequest {
    pub title: String,
    pub kind: CampaignKind,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub spend: Option<String>,
    /// Ad length for unskippable campaigns, e.g. "15s".
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub status: Option<CampaignStatus>,
    #[serde(flatten)]
    pub targeting: Targeting,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: CampaignStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPlacementRequest {
    pub slot: AdSlot,
    /// `None` (or empty) clears the pin.
    #[serde(default)]
    pub campaign_id: Option<String>,
}

// ─── Responses ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotPlacement {
    pub slot: AdSlot,
    pub label: &'static str,
    pub pinned_campaign_id: Option<String>,
    /// False when the pin points at a missing or non-Active campaign.
    pub pin_effective: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdOverview {
    pub total_campaigns: usize,
    pub active_campaigns: usize,
    pub paused_campaigns: usize,
    pub ended_campaigns: usize,
    pub in_review_campaigns: usize,
    pub skippable: usize,
    pub unskippable: usize,
    pub shorts: usize,
    pub user_created: usize,
}

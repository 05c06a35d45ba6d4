//! Named ad placements and the operator's pin configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A placement location where at most one campaign is shown.
///
/// The string names are part of the persisted placement format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdSlot {
    HomeSidebar,
    HomeInFeed,
    WatchPreRoll,
    WatchSidebar,
    SearchSponsored,
    AdminDashboardBanner,
    LabsSidebar,
    LiveSidebar,
}

impl AdSlot {
    pub const ALL: [AdSlot; 8] = [
        AdSlot::HomeSidebar,
        AdSlot::HomeInFeed,
        AdSlot::WatchPreRoll,
        AdSlot::WatchSidebar,
        AdSlot::SearchSponsored,
        AdSlot::AdminDashboardBanner,
        AdSlot::LabsSidebar,
        AdSlot::LiveSidebar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdSlot::HomeSidebar => "HOME_SIDEBAR",
            AdSlot::HomeInFeed => "HOME_IN_FEED",
            AdSlot::WatchPreRoll => "WATCH_PRE_ROLL",
            AdSlot::WatchSidebar => "WATCH_SIDEBAR",
            AdSlot::SearchSponsored => "SEARCH_SPONSORED",
            AdSlot::AdminDashboardBanner => "ADMIN_DASHBOARD_BANNER",
            AdSlot::LabsSidebar => "LABS_SIDEBAR",
            AdSlot::LiveSidebar => "LIVE_SIDEBAR",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdSlot::HomeSidebar => "Home sidebar",
            AdSlot::HomeInFeed => "Home in-feed",
            AdSlot::WatchPreRoll => "Watch pre-roll",
            AdSlot::WatchSidebar => "Watch sidebar",
            AdSlot::SearchSponsored => "Search sponsored result",
            AdSlot::AdminDashboardBanner => "Admin dashboard banner",
            AdSlot::LabsSidebar => "Labs sidebar",
            AdSlot::LiveSidebar => "Live page sidebar",
        }
    }
}

impl fmt::Display for AdSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSlot(pub String);

impl fmt::Display for UnknownSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown ad slot '{}'", self.0)
    }
}

impl std::error::Error for UnknownSlot {}

impl FromStr for AdSlot {
    type Err = UnknownSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdSlot::ALL
            .iter()
            .copied()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| UnknownSlot(s.to_string()))
    }
}

/// Slot name → pinned campaign id. A missing entry means "random".
///
/// Keyed by raw slot name so that entries written for slots this build does
/// not know about survive a read/write cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementConfig(BTreeMap<String, String>);

impl PlacementConfig {
    pub fn pinned(&self, slot: AdSlot) -> Option<&str> {
        self.0.get(slot.as_str()).map(String::as_str)
    }

    /// Pin a campaign to a slot, or clear the pin with `None`.
    pub fn set(&mut self, slot: AdSlot, campaign_id: Option<String>) {
        match campaign_id {
            Some(id) if !id.is_empty() => {
                self.0.insert(slot.as_str().to_string(), id);
            }
            _ => {
                self.0.remove(slot.as_str());
            }
        }
    }
}

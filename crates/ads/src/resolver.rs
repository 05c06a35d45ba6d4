//! Slot resolution: pinned-if-active, otherwise a random campaign.

use crate::aggregator::AdAggregator;
use rand::seq::SliceRandom;
use rand::Rng;
use starlight_core::{AdSlot, Campaign, PlacementConfig};
use starlight_store::namespace::AD_PLACEMENTS;
use starlight_store::Storage;
use tracing::{debug, warn};

/// Pick the campaign for `slot` from an aggregate set.
///
/// A pin only wins while its campaign is Active; a pin to a Paused, Ended or
/// In Review campaign is ignored. Without a usable pin: uniformly among
/// Active campaigns, or among all campaigns when none is Active.
pub fn resolve_from<R: Rng + ?Sized>(
    campaigns: &[Campaign],
    placements: &PlacementConfig,
    slot: AdSlot,
    rng: &mut R,
) -> Option<Campaign> {
    if let Some(pinned_id) = placements.pinned(slot) {
        if let Some(pinned) = campaigns.iter().find(|c| c.id == pinned_id && c.is_active()) {
            return Some(pinned.clone());
        }
        debug!(slot = %slot, pinned_id, "Pinned campaign unavailable, falling back to random");
    }

    let active: Vec<&Campaign> = campaigns.iter().filter(|c| c.is_active()).collect();
    if let Some(choice) = active.choose(rng) {
        return Some((*choice).clone());
    }
    campaigns.choose(rng).cloned()
}

#[derive(Clone)]
pub struct SlotResolver {
    storage: Storage,
    aggregator: AdAggregator,
}

impl SlotResolver {
    pub fn new(storage: Storage) -> Self {
        let aggregator = AdAggregator::new(storage.clone());
        Self { storage, aggregator }
    }

    pub fn resolve(&self, slot: AdSlot) -> Option<Campaign> {
        self.resolve_with(slot, &mut rand::thread_rng())
    }

    pub fn resolve_with<R: Rng + ?Sized>(&self, slot: AdSlot, rng: &mut R) -> Option<Campaign> {
        let campaigns = self.aggregator.all();
        let placements = self.placements();
        let resolved = resolve_from(&campaigns, &placements, slot, rng);
        let outcome = if resolved.is_some() { "filled" } else { "empty" };
        metrics::counter!("ads.slot.resolutions", "slot" => slot.as_str(), "outcome" => outcome).increment(1);
        resolved
    }

    /// Current placement configuration; unreadable config means no pins.
    pub fn placements(&self) -> PlacementConfig {
        match self.storage.read(&AD_PLACEMENTS) {
            Ok(config) => config.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Placement config unreadable, resolving all slots randomly");
                PlacementConfig::default()
            }
        }
    }
}

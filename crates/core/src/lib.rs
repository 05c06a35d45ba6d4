pub mod campaign;
pub mod config;
pub mod error;
pub mod quiz;
pub mod slots;
pub mod types;

pub use campaign::{
    Campaign, CampaignFormat, CampaignKind, CampaignStatus, Targeting, MANUAL_ID_PREFIX, USER_ID_PREFIX,
};
pub use config::AppConfig;
pub use error::{StarlightError, StarlightResult};
pub use slots::{AdSlot, PlacementConfig};
pub use types::Video;

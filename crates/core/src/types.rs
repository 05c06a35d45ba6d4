use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog video or short. Display fields (views, upload time, duration)
/// are pre-formatted strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub channel_name: String,
    #[serde(default)]
    pub channel_avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_avatar_url: Option<String>,
    #[serde(default)]
    pub views: String,
    #[serde(default)]
    pub upload_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_short: Option<bool>,
}

impl Video {
    pub fn is_short(&self) -> bool {
        self.is_short.unwrap_or(false)
    }
}

/// A named, ordered collection of video copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub videos: Vec<Video>,
    pub created_at: DateTime<Utc>,
}

// ─── Reports ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportReason {
    #[serde(rename = "Sexual content")]
    SexualContent,
    #[serde(rename = "Violent or repulsive content")]
    ViolentContent,
    #[serde(rename = "Hateful or abusive content")]
    HatefulContent,
    #[serde(rename = "Harassment or bullying")]
    Harassment,
    #[serde(rename = "Harmful or dangerous acts")]
    DangerousActs,
    #[serde(rename = "Misinformation")]
    Misinformation,
    #[serde(rename = "Child abuse")]
    ChildAbuse,
    #[serde(rename = "Promotes terrorism")]
    Terrorism,
    #[serde(rename = "Spam or misleading")]
    Spam,
    #[serde(rename = "Infringes my rights")]
    Infringement,
    #[serde(rename = "Captions issue")]
    CaptionsIssue,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportStatus {
    #[serde(rename = "In Review")]
    InReview,
    #[serde(rename = "Action Taken")]
    ActionTaken,
    Dismissed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub video: Video,
    pub reason: ReportReason,
    pub report_date: DateTime<Utc>,
    pub reporter_id: String,
    pub status: ReportStatus,
}

// ─── Payments ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub sponsor_name: String,
    pub campaign_id: String,
    pub amount: String,
    pub date: String,
    pub status: TransactionStatus,
    pub method: String,
}

// ─── Generated content ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author: String,
    pub text: String,
    #[serde(default)]
    pub likes: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressRelease {
    pub headline: String,
    pub body: String,
}

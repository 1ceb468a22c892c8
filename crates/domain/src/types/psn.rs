//! Remote payload models
//!
//! Shapes returned by the profile, search, and messaging services. Fields
//! an operation depends on are typed; everything else defaults, and a remote
//! `null` in a scalar field reads as that field's default. Every record keeps
//! the fields it does not name in `extra`, so responses reach callers with
//! nothing dropped.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Read `null` as the type's default.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Profiles
// ============================================================================

/// Envelope returned by the `profile2` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub profile: Profile,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Envelope returned by the friends endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendProfiles {
    pub profiles: Vec<Profile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    #[serde(deserialize_with = "nullable")]
    pub online_id: String,
    #[serde(deserialize_with = "nullable")]
    pub account_id: String,
    #[serde(deserialize_with = "nullable")]
    pub np_id: String,
    #[serde(deserialize_with = "nullable")]
    pub about_me: String,
    #[serde(deserialize_with = "nullable")]
    pub avatar_urls: Vec<AvatarUrl>,
    #[serde(deserialize_with = "nullable")]
    pub plus: u8,
    #[serde(deserialize_with = "nullable")]
    pub languages_used: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub is_officially_verified: bool,
    pub personal_detail: Option<PersonalDetail>,
    pub personal_detail_sharing: Option<String>,
    pub trophy_summary: Option<TrophySummary>,
    pub primary_online_status: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub presences: Vec<Presence>,
    pub friend_relation: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub blocking: bool,
    #[serde(deserialize_with = "nullable")]
    pub following: bool,
    #[serde(deserialize_with = "nullable")]
    pub request_message_flag: bool,
    pub console_availability: Option<ConsoleAvailability>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvatarUrl {
    #[serde(deserialize_with = "nullable")]
    pub avatar_url: String,
    #[serde(deserialize_with = "nullable")]
    pub size: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Real-name details; `profilePictureUrls` and similar arrive in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalDetail {
    #[serde(deserialize_with = "nullable")]
    pub first_name: String,
    #[serde(deserialize_with = "nullable")]
    pub last_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrophySummary {
    #[serde(deserialize_with = "nullable")]
    pub level: u32,
    #[serde(deserialize_with = "nullable")]
    pub progress: u32,
    #[serde(deserialize_with = "nullable")]
    pub earned_trophies: EarnedTrophies,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarnedTrophies {
    #[serde(deserialize_with = "nullable")]
    pub bronze: u32,
    #[serde(deserialize_with = "nullable")]
    pub silver: u32,
    #[serde(deserialize_with = "nullable")]
    pub gold: u32,
    #[serde(deserialize_with = "nullable")]
    pub platinum: u32,
}

/// Online presence; `platform` and `titleInfo` arrive in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Presence {
    #[serde(deserialize_with = "nullable")]
    pub online_status: String,
    pub last_online_date: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub has_broadcast_data: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsoleAvailability {
    #[serde(deserialize_with = "nullable")]
    pub availability_status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Search
// ============================================================================

/// Raw universal-search response. Only the first domain response is
/// surfaced to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub domain_responses: Vec<DomainResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainResponse {
    #[serde(deserialize_with = "nullable")]
    pub domain: String,
    #[serde(deserialize_with = "nullable")]
    pub domain_title: String,
    pub next: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub results: Vec<SearchResult>,
    #[serde(deserialize_with = "nullable")]
    pub total_result_count: u32,
    #[serde(deserialize_with = "nullable")]
    pub zero_state: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub result_type: String,
    #[serde(deserialize_with = "nullable")]
    pub score: f64,
    #[serde(deserialize_with = "nullable")]
    pub relevancy_score: f64,
    pub social_metadata: Option<SocialMetadata>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialMetadata {
    #[serde(deserialize_with = "nullable")]
    pub account_id: String,
    #[serde(deserialize_with = "nullable")]
    pub online_id: String,
    pub account_type: Option<String>,
    pub avatar_url: Option<String>,
    pub profile_pic_url: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub is_officially_verified: bool,
    #[serde(deserialize_with = "nullable")]
    pub is_ps_plus: bool,
    #[serde(deserialize_with = "nullable")]
    pub mutual_friends_count: i32,
    pub relationship_state: Option<String>,
    pub verified_user_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Groups and messaging
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupList {
    pub groups: Vec<Group>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Group {
    #[serde(deserialize_with = "nullable")]
    pub group_id: String,
    #[serde(deserialize_with = "nullable")]
    pub group_type: i32,
    pub group_name: Option<GroupName>,
    #[serde(deserialize_with = "nullable")]
    pub is_favorite: bool,
    #[serde(deserialize_with = "nullable")]
    pub exists_new_arrival: bool,
    pub joined_timestamp: Option<String>,
    pub modified_timestamp: Option<String>,
    pub main_thread: Option<MainThread>,
    #[serde(deserialize_with = "nullable")]
    pub members: Vec<Member>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Group {
    /// Thread id of the group's main conversation, if the remote sent one.
    #[must_use]
    pub fn main_thread_id(&self) -> Option<&str> {
        self.main_thread
            .as_ref()
            .map(|thread| thread.thread_id.as_str())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupName {
    #[serde(deserialize_with = "nullable")]
    pub status: i32,
    #[serde(deserialize_with = "nullable")]
    pub value: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MainThread {
    #[serde(deserialize_with = "nullable")]
    pub thread_id: String,
    #[serde(deserialize_with = "nullable")]
    pub exists_unread_message: bool,
    pub modified_timestamp: Option<String>,
    pub latest_message: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Member {
    #[serde(deserialize_with = "nullable")]
    pub account_id: String,
    #[serde(deserialize_with = "nullable")]
    pub online_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response to group creation. `groupId` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedGroup {
    pub group_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub has_all_account_invited: bool,
    #[serde(default)]
    pub main_thread: Option<MainThread>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response to a resource upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedResource {
    pub resource_id: String,
}

/// Messages of the first group's main thread, together with that group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirstGroupMessages {
    pub group: Group,
    pub messages: Value,
}

/// Raw bytes of a downloaded resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedResource {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Response of the SSO cookie endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpssoResponse {
    pub npsso: String,
}

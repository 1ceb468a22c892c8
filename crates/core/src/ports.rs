//! Port interfaces for the PSN facade
//!
//! These traits define the boundary between the route layer and the
//! infrastructure that talks to the remote network. Every operation
//! resolves a usable access token first and fails fast without a network
//! call when none is available.

use async_trait::async_trait;
use psnlink_domain::{
    CreatedGroup, DomainResponse, DownloadedResource, FirstGroupMessages, FriendProfiles,
    GroupList, MessagingTarget, ResourceKind, Result, SessionHandle, TokenPair, UserProfile,
};
use serde_json::Value;

/// Source of a usable access token
///
/// Also owns the session handle the token pair is acquired from.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Return a usable token pair, acquiring or refreshing as needed.
    async fn access_token(&self) -> Result<TokenPair>;

    /// Look up a session handle from the SSO cookie endpoint and install it.
    async fn fetch_session_handle(&self) -> Result<SessionHandle>;

    /// Replace the session handle used for future acquisitions.
    async fn replace_session_handle(&self, session: SessionHandle);
}

/// Typed operations over the remote network
#[async_trait]
pub trait PsnGateway: Send + Sync {
    /// Acquire or refresh the token pair without calling any service.
    async fn ensure_access_token(&self) -> Result<TokenPair>;

    /// Profile of `name`, or of the caller when `None`.
    async fn get_profile(&self, name: Option<&str>) -> Result<UserProfile>;

    async fn get_friends(&self) -> Result<FriendProfiles>;

    /// Remove `name` from the caller's friend list.
    async fn delete_friend(&self, name: &str) -> Result<()>;

    /// First domain response of a universal search.
    async fn search(&self, term: &str, domain: &str) -> Result<DomainResponse>;

    async fn create_group(&self, account_ids: &[String]) -> Result<CreatedGroup>;

    async fn get_groups(&self) -> Result<GroupList>;

    /// Raw message listing of a thread. An absent thread means the group's
    /// main thread.
    async fn get_messages(&self, group_id: &str, thread_id: Option<&str>) -> Result<Value>;

    /// Messages of the first group's main thread.
    async fn get_first_group_messages(&self) -> Result<FirstGroupMessages>;

    async fn send_message(&self, target: &MessagingTarget, text: &str) -> Result<()>;

    /// Upload a local file or remote image to a group; returns the resource id.
    async fn add_resource(&self, target: &MessagingTarget, source: &str) -> Result<String>;

    /// Post a message referencing an uploaded resource.
    async fn send_resource(
        &self,
        target: &MessagingTarget,
        resource_id: &str,
        kind: ResourceKind,
    ) -> Result<()>;

    async fn get_resource(&self, group_id: &str, resource_id: &str) -> Result<DownloadedResource>;

    /// Look up a session handle from the SSO cookie endpoint.
    async fn fetch_session_handle(&self) -> Result<SessionHandle>;

    /// Replace the session handle used for future acquisitions.
    async fn replace_session_handle(&self, session: SessionHandle);
}

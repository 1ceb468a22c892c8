//! Gateway client for the PSN services

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use psnlink_core::{
    classify_source, resource_message, text_message, AccessTokenProvider, OutboundMessage,
    PsnGateway,
};
use psnlink_domain::constants::{
    CONTENT_TYPE_JSON, GROUP_LIST_QUERY, MESSAGING_LANGUAGE, PROFILE_FIELDS,
};
use psnlink_domain::{
    ApiConfig, CreatedGroup, DomainResponse, DownloadedResource, FirstGroupMessages,
    FriendProfiles, GroupList, MessagingTarget, PsnEndpoints, PsnError, ResourceConfig,
    ResourceKind, Result, SearchResponse, SessionHandle, TokenPair, UserProfile,
};
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use super::path_segment;
use super::resources::ResourceTransferManager;
use crate::http::{HttpClient, RequestDescriptor, ResponsePayload};

/// PSN gateway backed by the authenticated HTTP client
pub struct PsnApiClient {
    http: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    endpoints: PsnEndpoints,
    resources: ResourceTransferManager,
}

impl PsnApiClient {
    /// Create a new gateway client
    ///
    /// # Arguments
    ///
    /// * `api` - Endpoints and request timeout
    /// * `resources` - Staging directory for URL-sourced uploads
    /// * `auth` - Access token provider
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new(
        api: &ApiConfig,
        resources: &ResourceConfig,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(api.request_timeout_secs))
            .build()?;

        let transfers = ResourceTransferManager::new(
            http.clone(),
            auth.clone(),
            api.endpoints.messaging_base_url.clone(),
            resources.temp_dir.clone(),
        );

        Ok(Self { http, auth, endpoints: api.endpoints.clone(), resources: transfers })
    }

    #[must_use]
    pub fn resources(&self) -> &ResourceTransferManager {
        &self.resources
    }

    /// Resolve a token, then perform one call.
    async fn dispatch(&self, descriptor: RequestDescriptor) -> Result<ResponsePayload> {
        let tokens = self.auth.access_token().await?;
        Ok(self.http.call(&descriptor, &tokens.access).await?)
    }

    fn messages_url(&self, target: &MessagingTarget) -> String {
        format!(
            "{}/v1/groups/{}/threads/{}/messages",
            self.endpoints.messaging_base_url,
            path_segment(target.group_id()),
            path_segment(target.thread_id())
        )
    }

    async fn post_message(&self, target: &MessagingTarget, message: OutboundMessage) -> Result<()> {
        let descriptor = RequestDescriptor::post(self.messages_url(target))
            .content_type(message.content_type)
            .text(message.to_json()?);
        self.dispatch(descriptor).await?;
        Ok(())
    }
}

#[async_trait]
impl PsnGateway for PsnApiClient {
    async fn ensure_access_token(&self) -> Result<TokenPair> {
        self.auth.access_token().await
    }

    #[instrument(skip(self))]
    async fn get_profile(&self, name: Option<&str>) -> Result<UserProfile> {
        let user = name.filter(|n| !n.trim().is_empty()).unwrap_or("me");
        let url = format!(
            "{}/v1/users/{}/profile2?fields={}",
            self.endpoints.profile_base_url,
            path_segment(user),
            PROFILE_FIELDS
        );
        self.dispatch(RequestDescriptor::get(url)).await?.json()
    }

    #[instrument(skip(self))]
    async fn get_friends(&self) -> Result<FriendProfiles> {
        let url = format!(
            "{}/v1/users/me/friends/profiles2?fields={}",
            self.endpoints.profile_base_url, PROFILE_FIELDS
        );
        self.dispatch(RequestDescriptor::get(url)).await?.json()
    }

    #[instrument(skip(self))]
    async fn delete_friend(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(PsnError::InvalidInput("friend name is required".into()));
        }

        let own = self.get_profile(None).await?;
        if own.profile.online_id.is_empty() {
            return Err(PsnError::MalformedResponse("own profile has no onlineId".into()));
        }

        let url = format!(
            "{}/v1/users/{}/friendList/{}",
            self.endpoints.profile_base_url,
            path_segment(&own.profile.online_id),
            path_segment(name)
        );
        self.dispatch(RequestDescriptor::delete(url)).await?;
        info!(friend = name, "friend removed");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn search(&self, term: &str, domain: &str) -> Result<DomainResponse> {
        let body = json!({
            "searchTerm": term,
            "domainRequests": [{ "domain": domain }],
        });
        let url = format!("{}/v1/universalSearch", self.endpoints.search_base_url);
        let descriptor =
            RequestDescriptor::post(url).content_type(CONTENT_TYPE_JSON).text(body.to_string());

        let response: SearchResponse = self.dispatch(descriptor).await?.json()?;
        response
            .domain_responses
            .into_iter()
            .next()
            .ok_or_else(|| {
                PsnError::MalformedResponse("search returned no domain responses".into())
            })
    }

    #[instrument(skip(self))]
    async fn create_group(&self, account_ids: &[String]) -> Result<CreatedGroup> {
        if account_ids.is_empty() {
            return Err(PsnError::InvalidInput("at least one invitee is required".into()));
        }

        let invitees: Vec<Value> =
            account_ids.iter().map(|id| json!({ "accountId": id })).collect();
        let descriptor =
            RequestDescriptor::post(format!("{}/v1/groups", self.endpoints.messaging_base_url))
                .content_type(CONTENT_TYPE_JSON)
                .text(json!({ "invitees": invitees }).to_string());

        let created: CreatedGroup = self.dispatch(descriptor).await?.json()?;
        info!(group_id = %created.group_id, "group created");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn get_groups(&self) -> Result<GroupList> {
        let url = format!(
            "{}/v1/members/me/groups?{}",
            self.endpoints.messaging_base_url, GROUP_LIST_QUERY
        );
        let descriptor = RequestDescriptor::get(url).header("Accept-Language", MESSAGING_LANGUAGE);
        self.dispatch(descriptor).await?.json()
    }

    #[instrument(skip(self))]
    async fn get_messages(&self, group_id: &str, thread_id: Option<&str>) -> Result<Value> {
        let target = MessagingTarget::new(group_id, thread_id.map(ToString::to_string));
        let url = format!(
            "{}/v1/members/me/groups/{}/threads/{}/messages",
            self.endpoints.messaging_base_url,
            path_segment(target.group_id()),
            path_segment(target.thread_id())
        );
        let descriptor = RequestDescriptor::get(url).header("Accept-Language", MESSAGING_LANGUAGE);
        self.dispatch(descriptor).await?.json()
    }

    #[instrument(skip(self))]
    async fn get_first_group_messages(&self) -> Result<FirstGroupMessages> {
        let groups = self.get_groups().await?;
        let group = groups
            .groups
            .into_iter()
            .next()
            .ok_or_else(|| PsnError::MalformedResponse("no groups found".into()))?;
        let thread_id = group
            .main_thread_id()
            .ok_or_else(|| {
                PsnError::MalformedResponse(format!("group {} has no main thread", group.group_id))
            })?
            .to_string();

        debug!(group_id = %group.group_id, %thread_id, "reading first group's main thread");
        let messages = self.get_messages(&group.group_id, Some(&thread_id)).await?;
        Ok(FirstGroupMessages { group, messages })
    }

    #[instrument(
        skip(self, text),
        fields(group_id = %target.group_id(), thread_id = %target.thread_id())
    )]
    async fn send_message(&self, target: &MessagingTarget, text: &str) -> Result<()> {
        self.post_message(target, text_message(text)).await
    }

    async fn add_resource(&self, target: &MessagingTarget, source: &str) -> Result<String> {
        let source = classify_source(source)?;
        self.resources.upload(target, &source).await
    }

    #[instrument(
        skip(self),
        fields(group_id = %target.group_id(), thread_id = %target.thread_id())
    )]
    async fn send_resource(
        &self,
        target: &MessagingTarget,
        resource_id: &str,
        kind: ResourceKind,
    ) -> Result<()> {
        let message = resource_message(kind, resource_id)?;
        self.post_message(target, message).await
    }

    async fn get_resource(&self, group_id: &str, resource_id: &str) -> Result<DownloadedResource> {
        self.resources.download(group_id, resource_id).await
    }

    async fn fetch_session_handle(&self) -> Result<SessionHandle> {
        self.auth.fetch_session_handle().await
    }

    async fn replace_session_handle(&self, session: SessionHandle) {
        self.auth.replace_session_handle(session).await;
    }
}

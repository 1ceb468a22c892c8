#![allow(dead_code)]

//! In-memory gateway and request helpers for route tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use psnlink_api::{build_router, AppContext};
use psnlink_core::PsnGateway;
use psnlink_domain::{
    ApiConfig, AppConfig, AuthConfig, CreatedGroup, DomainResponse, DownloadedResource,
    FirstGroupMessages, FriendProfiles, Group, GroupList, MessagingTarget, Profile, PsnError,
    ResourceConfig, ResourceKind, Result, ServerConfig, SessionHandle, Token, TokenPair,
    UserProfile,
};
use serde_json::{json, Map, Value};
use tower::ServiceExt;

/// Records calls and answers with canned data, or with `failure` if set.
#[derive(Default)]
pub struct MockGateway {
    pub failure: Mutex<Option<PsnError>>,
    pub calls: Mutex<Vec<String>>,
    pub sessions: Mutex<Vec<String>>,
    pub last_target: Mutex<Option<MessagingTarget>>,
    pub last_kind: Mutex<Option<ResourceKind>>,
    pub last_text: Mutex<Option<String>>,
}

impl MockGateway {
    pub fn failing(err: PsnError) -> Self {
        let gateway = Self::default();
        *gateway.failure.lock().unwrap() = Some(err);
        gateway
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) -> Result<()> {
        self.calls.lock().unwrap().push(call.into());
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn profile(online_id: &str) -> Profile {
        Profile { online_id: online_id.to_string(), ..Profile::default() }
    }
}

#[async_trait]
impl PsnGateway for MockGateway {
    async fn ensure_access_token(&self) -> Result<TokenPair> {
        self.record("ensure_access_token")?;
        Ok(TokenPair::new(Token::new("A1", 3600), Token::new("R1", 864_000)))
    }

    async fn get_profile(&self, name: Option<&str>) -> Result<UserProfile> {
        self.record(format!("get_profile:{}", name.unwrap_or("me")))?;
        Ok(UserProfile { profile: Self::profile(name.unwrap_or("me")), extra: Map::new() })
    }

    async fn get_friends(&self) -> Result<FriendProfiles> {
        self.record("get_friends")?;
        Ok(FriendProfiles { profiles: vec![Self::profile("friend_one")], extra: Map::new() })
    }

    async fn delete_friend(&self, name: &str) -> Result<()> {
        self.record(format!("delete_friend:{name}"))
    }

    async fn search(&self, term: &str, domain: &str) -> Result<DomainResponse> {
        self.record(format!("search:{term}:{domain}"))?;
        Ok(DomainResponse { domain: domain.to_string(), ..DomainResponse::default() })
    }

    async fn create_group(&self, account_ids: &[String]) -> Result<CreatedGroup> {
        self.record(format!("create_group:{}", account_ids.join(",")))?;
        Ok(CreatedGroup {
            group_id: "g-new".to_string(),
            has_all_account_invited: true,
            main_thread: None,
            extra: Map::new(),
        })
    }

    async fn get_groups(&self) -> Result<GroupList> {
        self.record("get_groups")?;
        Ok(GroupList {
            groups: vec![Group { group_id: "g-1".into(), ..Group::default() }],
            extra: Map::new(),
        })
    }

    async fn get_messages(&self, group_id: &str, thread_id: Option<&str>) -> Result<Value> {
        self.record(format!("get_messages:{group_id}:{}", thread_id.unwrap_or("-")))?;
        Ok(json!({ "messages": [] }))
    }

    async fn get_first_group_messages(&self) -> Result<FirstGroupMessages> {
        self.record("get_first_group_messages")?;
        Ok(FirstGroupMessages {
            group: Group { group_id: "g-1".into(), ..Group::default() },
            messages: json!({ "messages": [{ "body": "hi" }] }),
        })
    }

    async fn send_message(&self, target: &MessagingTarget, text: &str) -> Result<()> {
        self.record("send_message")?;
        *self.last_target.lock().unwrap() = Some(target.clone());
        *self.last_text.lock().unwrap() = Some(text.to_string());
        Ok(())
    }

    async fn add_resource(&self, target: &MessagingTarget, source: &str) -> Result<String> {
        self.record(format!("add_resource:{source}"))?;
        *self.last_target.lock().unwrap() = Some(target.clone());
        Ok("res-1".to_string())
    }

    async fn send_resource(
        &self,
        target: &MessagingTarget,
        resource_id: &str,
        kind: ResourceKind,
    ) -> Result<()> {
        self.record(format!("send_resource:{resource_id}"))?;
        *self.last_target.lock().unwrap() = Some(target.clone());
        *self.last_kind.lock().unwrap() = Some(kind);
        Ok(())
    }

    async fn get_resource(&self, group_id: &str, resource_id: &str) -> Result<DownloadedResource> {
        self.record(format!("get_resource:{group_id}:{resource_id}"))?;
        Ok(DownloadedResource { bytes: vec![0xFF, 0xD8], content_type: "image/png".into() })
    }

    async fn fetch_session_handle(&self) -> Result<SessionHandle> {
        self.record("fetch_session_handle")?;
        Ok(SessionHandle::new("fetched-npsso"))
    }

    async fn replace_session_handle(&self, session: SessionHandle) {
        self.sessions.lock().unwrap().push(session.as_str().to_string());
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        auth: AuthConfig {
            client_id: "test-client".into(),
            client_secret: None,
            npsso: None,
            token_store_path: "data/psn_tokens.json".into(),
        },
        api: ApiConfig::default(),
        resources: ResourceConfig::default(),
        server: ServerConfig::default(),
    }
}

pub fn router_with(gateway: Arc<MockGateway>) -> Router {
    router_with_config(test_config(), gateway)
}

pub fn router_with_config(config: AppConfig, gateway: Arc<MockGateway>) -> Router {
    build_router(Arc::new(AppContext::with_gateway(config, gateway)))
}

/// Send one request through the router and decode the JSON response.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

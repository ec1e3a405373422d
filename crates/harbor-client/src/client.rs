//! HTTP client for the hub chat-server API.
//!
//! One method per server endpoint. Every method builds a request, hands it to
//! the shared transport helper, and returns the unwrapped `success` payload or
//! an [`Error`](crate::Error). The GraphQL call is the one exception: it
//! returns the raw parsed body with no envelope unwrapping.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};
use uuid::Uuid;

use harbor_types::{
    Channel, ChannelPermission, ChannelUpdate, Hub, HubMember, HubPermission, HubUpdate,
    MemberStatus, Message, PermissionSetting,
};

use crate::error::{Error, Result, TransportError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Hub API client.
///
/// Holds only the immutable base URL, the bearer token, and a
/// `reqwest::Client` (which owns its own connection pool), so it is cheap to
/// clone and safe to share across tasks. Each call is one independent round
/// trip; no retries, no caching.
#[derive(Debug, Clone)]
pub struct HubClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

/// Moderation actions that share the `/member/{hub}/{member}/{action}` route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberAction {
    Ban,
    Unban,
    Mute,
    Unmute,
    Kick,
}

impl MemberAction {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Ban => "ban",
            Self::Unban => "unban",
            Self::Mute => "mute",
            Self::Unmute => "unmute",
            Self::Kick => "kick",
        }
    }
}

impl HubClient {
    /// Create a client for `base_url`, authenticating every request with the
    /// given opaque bearer token.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("harbor-client/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client with static configuration");

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            http,
            base_url,
            token: token.into(),
        }
    }

    /// Create a client from `HARBOR_BASE_URL` / `HARBOR_TOKEN`, loading `.env`
    /// first if one is present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let base_url = std::env::var("HARBOR_BASE_URL")
            .map_err(|_| Error::Config("HARBOR_BASE_URL is not set".into()))?;
        let token = std::env::var("HARBOR_TOKEN")
            .map_err(|_| Error::Config("HARBOR_TOKEN is not set".into()))?;
        Ok(Self::new(base_url, token))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Hubs ───────────────────────────────────────────────────────────

    pub async fn get_hub(&self, hub: Uuid) -> Result<Hub> {
        self.request(Method::GET, &format!("/hub/{hub}"), None).await
    }

    /// Create a hub owned by the authenticated user. Returns the new hub id.
    pub async fn create_hub(&self, name: &str, description: &str) -> Result<Uuid> {
        let body = json!({"name": name, "description": description});
        self.request(Method::POST, "/hub", Some(body)).await
    }

    pub async fn delete_hub(&self, hub: Uuid) -> Result<String> {
        self.request(Method::DELETE, &format!("/hub/{hub}"), None).await
    }

    /// Partial update; the server echoes the accepted update back.
    pub async fn update_hub(&self, hub: Uuid, update: &HubUpdate) -> Result<HubUpdate> {
        let body = serde_json::to_value(update).map_err(TransportError::Json)?;
        self.request(Method::PUT, &format!("/hub/{hub}"), Some(body)).await
    }

    pub async fn join_hub(&self, hub: Uuid) -> Result<String> {
        self.request(Method::POST, &format!("/hub/{hub}/join"), None).await
    }

    pub async fn leave_hub(&self, hub: Uuid) -> Result<String> {
        self.request(Method::POST, &format!("/hub/{hub}/leave"), None).await
    }

    // ── Channels ───────────────────────────────────────────────────────

    pub async fn get_channel(&self, hub: Uuid, channel: Uuid) -> Result<Channel> {
        self.request(Method::GET, &format!("/channel/{hub}/{channel}"), None).await
    }

    /// Returns the new channel id.
    pub async fn create_channel(&self, hub: Uuid, name: &str, description: &str) -> Result<Uuid> {
        let body = json!({"name": name, "description": description});
        self.request(Method::POST, &format!("/channel/{hub}"), Some(body)).await
    }

    pub async fn update_channel(
        &self,
        hub: Uuid,
        channel: Uuid,
        update: &ChannelUpdate,
    ) -> Result<ChannelUpdate> {
        let body = serde_json::to_value(update).map_err(TransportError::Json)?;
        self.request(Method::PUT, &format!("/channel/{hub}/{channel}"), Some(body)).await
    }

    pub async fn delete_channel(&self, hub: Uuid, channel: Uuid) -> Result<String> {
        self.request(Method::DELETE, &format!("/channel/{hub}/{channel}"), None).await
    }

    // ── Members ────────────────────────────────────────────────────────

    pub async fn get_member(&self, hub: Uuid, member: Uuid) -> Result<HubMember> {
        self.request(Method::GET, &format!("/member/{hub}/{member}"), None).await
    }

    pub async fn get_member_status(&self, hub: Uuid, member: Uuid) -> Result<MemberStatus> {
        self.request(Method::GET, &format!("/member/{hub}/{member}/status"), None).await
    }

    pub async fn set_hub_permission(
        &self,
        hub: Uuid,
        member: Uuid,
        permission: HubPermission,
        setting: PermissionSetting,
    ) -> Result<MemberStatus> {
        let path = format!("/member/{hub}/{member}/hub_permission/{permission}");
        self.request(Method::PUT, &path, Some(json!({"setting": setting}))).await
    }

    /// Reads back as `Unset` when the permission has never been set.
    pub async fn get_hub_permission(
        &self,
        hub: Uuid,
        member: Uuid,
        permission: HubPermission,
    ) -> Result<PermissionSetting> {
        let path = format!("/member/{hub}/{member}/hub_permission/{permission}");
        self.request(Method::GET, &path, None).await
    }

    pub async fn set_channel_permission(
        &self,
        hub: Uuid,
        member: Uuid,
        channel: Uuid,
        permission: ChannelPermission,
        setting: PermissionSetting,
    ) -> Result<MemberStatus> {
        let path = format!("/member/{hub}/{member}/channel_permission/{channel}/{permission}");
        self.request(Method::PUT, &path, Some(json!({"setting": setting}))).await
    }

    pub async fn get_channel_permission(
        &self,
        hub: Uuid,
        member: Uuid,
        channel: Uuid,
        permission: ChannelPermission,
    ) -> Result<PermissionSetting> {
        let path = format!("/member/{hub}/{member}/channel_permission/{channel}/{permission}");
        self.request(Method::GET, &path, None).await
    }

    pub async fn ban_member(&self, hub: Uuid, member: Uuid) -> Result<String> {
        self.member_action(hub, member, MemberAction::Ban).await
    }

    pub async fn unban_member(&self, hub: Uuid, member: Uuid) -> Result<String> {
        self.member_action(hub, member, MemberAction::Unban).await
    }

    pub async fn mute_member(&self, hub: Uuid, member: Uuid) -> Result<String> {
        self.member_action(hub, member, MemberAction::Mute).await
    }

    pub async fn unmute_member(&self, hub: Uuid, member: Uuid) -> Result<String> {
        self.member_action(hub, member, MemberAction::Unmute).await
    }

    pub async fn kick_member(&self, hub: Uuid, member: Uuid) -> Result<String> {
        self.member_action(hub, member, MemberAction::Kick).await
    }

    async fn member_action(
        &self,
        hub: Uuid,
        member: Uuid,
        action: MemberAction,
    ) -> Result<String> {
        let path = format!("/member/{hub}/{member}/{}", action.as_str());
        self.request(Method::POST, &path, None).await
    }

    // ── Messages ───────────────────────────────────────────────────────

    /// Send a message; returns the new message id.
    pub async fn send_message(&self, hub: Uuid, channel: Uuid, message: &str) -> Result<Uuid> {
        let path = format!("/message/{hub}/{channel}");
        self.request(Method::POST, &path, Some(json!({"message": message}))).await
    }

    pub async fn get_message(&self, hub: Uuid, channel: Uuid, message: Uuid) -> Result<Message> {
        self.request(Method::GET, &format!("/message/{hub}/{channel}/{message}"), None).await
    }

    /// Up to `max` messages strictly after the message id `from`.
    pub async fn get_messages_after(
        &self,
        hub: Uuid,
        channel: Uuid,
        from: Uuid,
        max: usize,
    ) -> Result<Vec<Message>> {
        let path = format!("/message/{hub}/{channel}/after");
        self.request(Method::GET, &path, Some(json!({"from": from, "max": max}))).await
    }

    /// Up to `max` messages created inside `[from, to]`, newest first when
    /// `new_to_old` is set.
    pub async fn get_messages_in_period(
        &self,
        hub: Uuid,
        channel: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        max: usize,
        new_to_old: bool,
    ) -> Result<Vec<Message>> {
        let path = format!("/message/{hub}/{channel}/time_period");
        let body = json!({"from": from, "to": to, "max": max, "new_to_old": new_to_old});
        self.request(Method::GET, &path, Some(body)).await
    }

    // ── GraphQL ────────────────────────────────────────────────────────

    /// POST a GraphQL query. The response is returned exactly as parsed;
    /// the `success`/`error` envelope convention does not apply here.
    pub async fn graphql(&self, query: &str, variables: Value) -> Result<Value> {
        let url = format!("{}/graphql", self.base_url);
        debug!("POST /graphql");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({"query": query, "variables": variables}))
            .send()
            .await
            .map_err(TransportError::Http)?;
        let body = response.json().await.map_err(TransportError::Http)?;
        Ok(body)
    }

    // ── Transport ──────────────────────────────────────────────────────

    /// Shared transport helper: every envelope-wrapped endpoint goes through
    /// here. A body, when given, is serialized as JSON regardless of verb
    /// (the two message-history GETs carry one).
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, path);

        let mut request = self.http.request(method, &url).bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(TransportError::Http)?;
        let body: Value = response.json().await.map_err(TransportError::Http)?;

        unwrap_envelope(body).inspect_err(|e| {
            if let Error::Remote(msg) = e {
                warn!("{} answered with error: {}", path, msg);
            }
        })
    }
}

/// Unwrap a `{success?, error?}` envelope.
///
/// Presence of the `success` key is the test, not truthiness: `false`, `0`,
/// `""` and `null` are all legitimate payloads and must unwrap, so the key is
/// checked before its value is looked at.
fn unwrap_envelope<T: DeserializeOwned>(body: Value) -> Result<T> {
    match body {
        Value::Object(mut envelope) => {
            if let Some(success) = envelope.remove("success") {
                Ok(serde_json::from_value(success).map_err(TransportError::Json)?)
            } else if let Some(error) = envelope.get("error") {
                let message = match error.as_str() {
                    Some(s) => s.to_string(),
                    None => error.to_string(),
                };
                Err(Error::Remote(message))
            } else {
                Err(TransportError::MalformedEnvelope(Value::Object(envelope).to_string()).into())
            }
        }
        other => Err(TransportError::MalformedEnvelope(other.to_string()).into()),
    }
}

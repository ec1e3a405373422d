use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::permission::{ChannelPermission, HubPermission, PermissionSetting};

/// Top-level chat community. Root aggregate: channels, members, and
/// permission groups only exist inside a hub.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hub {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub members: HashMap<Uuid, HubMember>,
    #[serde(default)]
    pub channels: HashMap<Uuid, Channel>,
    #[serde(default)]
    pub groups: HashMap<Uuid, PermissionGroup>,
    pub default_group: Uuid,
    pub owner: Uuid,
    #[serde(default)]
    pub bans: Vec<Uuid>,
    #[serde(default)]
    pub mutes: Vec<Uuid>,
}

/// A message stream scoped to one hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub hub_id: Uuid,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubMember {
    pub user_id: Uuid,
    pub joined: DateTime<Utc>,
    #[serde(default)]
    pub groups: Vec<Uuid>,
    #[serde(default)]
    pub hub_permissions: HashMap<HubPermission, PermissionSetting>,
    #[serde(default)]
    pub channel_permissions: HashMap<Uuid, HashMap<ChannelPermission, PermissionSetting>>,
}

impl HubMember {
    /// Setting for a hub permission; absent keys read as `Unset`.
    pub fn hub_permission(&self, permission: HubPermission) -> PermissionSetting {
        self.hub_permissions.get(&permission).copied().unwrap_or_default()
    }

    /// Setting for a channel permission; absent keys read as `Unset`.
    pub fn channel_permission(
        &self,
        channel: Uuid,
        permission: ChannelPermission,
    ) -> PermissionSetting {
        self.channel_permissions
            .get(&channel)
            .and_then(|perms| perms.get(&permission))
            .copied()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionGroup {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub members: Vec<Uuid>,
    #[serde(default)]
    pub hub_permissions: HashMap<HubPermission, PermissionSetting>,
    #[serde(default)]
    pub channel_permissions: HashMap<Uuid, HashMap<ChannelPermission, PermissionSetting>>,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub hub_id: Uuid,
    pub channel_id: Uuid,
    pub sender: Uuid,
    pub created: DateTime<Utc>,
    pub content: String,
}

/// Snapshot of a member's standing in a hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberStatus {
    pub member: Uuid,
    pub banned: bool,
    pub muted: bool,
}

/// Partial-update payload for a hub. Fields left `None` are omitted from the
/// wire entirely and stay unchanged on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HubUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_group: Option<Uuid>,
}

/// Partial-update payload for a channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

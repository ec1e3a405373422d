use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Hub-wide permissions. The same token is used both in JSON maps and in
/// URL path segments, so `Display`/`FromStr` must agree with the serde names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HubPermission {
    All,
    ViewChannels,
    ConfigureChannels,
    Administrate,
    CreateChannel,
    DeleteChannel,
    Mute,
    Unmute,
    Kick,
    Ban,
    Unban,
}

impl HubPermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::ViewChannels => "VIEW_CHANNELS",
            Self::ConfigureChannels => "CONFIGURE_CHANNELS",
            Self::Administrate => "ADMINISTRATE",
            Self::CreateChannel => "CREATE_CHANNEL",
            Self::DeleteChannel => "DELETE_CHANNEL",
            Self::Mute => "MUTE",
            Self::Unmute => "UNMUTE",
            Self::Kick => "KICK",
            Self::Ban => "BAN",
            Self::Unban => "UNBAN",
        }
    }
}

impl fmt::Display for HubPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HubPermission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ALL" => Self::All,
            "VIEW_CHANNELS" => Self::ViewChannels,
            "CONFIGURE_CHANNELS" => Self::ConfigureChannels,
            "ADMINISTRATE" => Self::Administrate,
            "CREATE_CHANNEL" => Self::CreateChannel,
            "DELETE_CHANNEL" => Self::DeleteChannel,
            "MUTE" => Self::Mute,
            "UNMUTE" => Self::Unmute,
            "KICK" => Self::Kick,
            "BAN" => Self::Ban,
            "UNBAN" => Self::Unban,
            other => return Err(UnknownPermission(other.to_string())),
        })
    }
}

/// Per-channel permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelPermission {
    All,
    ViewChannel,
    Configure,
    SendMessage,
    ReadMessage,
}

impl ChannelPermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::ViewChannel => "VIEW_CHANNEL",
            Self::Configure => "CONFIGURE",
            Self::SendMessage => "SEND_MESSAGE",
            Self::ReadMessage => "READ_MESSAGE",
        }
    }
}

impl fmt::Display for ChannelPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelPermission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ALL" => Self::All,
            "VIEW_CHANNEL" => Self::ViewChannel,
            "CONFIGURE" => Self::Configure,
            "SEND_MESSAGE" => Self::SendMessage,
            "READ_MESSAGE" => Self::ReadMessage,
            other => return Err(UnknownPermission(other.to_string())),
        })
    }
}

/// A permission token that is not part of either enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPermission(pub String);

impl fmt::Display for UnknownPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown permission token '{}'", self.0)
    }
}

impl std::error::Error for UnknownPermission {}

/// Tri-state permission setting.
///
/// On the wire this is `true` (allow), `false` (deny), or `null`/absent
/// (inherit from group or hub default). `Unset` must survive serialization
/// distinctly from `Deny`, so this is a three-variant enum rather than a
/// nullable boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionSetting {
    Allow,
    Deny,
    #[default]
    Unset,
}

impl PermissionSetting {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl Serialize for PermissionSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Allow => serializer.serialize_bool(true),
            Self::Deny => serializer.serialize_bool(false),
            Self::Unset => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for PermissionSetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<bool>::deserialize(deserializer)? {
            Some(true) => Self::Allow,
            Some(false) => Self::Deny,
            None => Self::Unset,
        })
    }
}

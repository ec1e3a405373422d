pub mod models;
pub mod permission;

pub use models::{
    Channel, ChannelUpdate, Hub, HubMember, HubUpdate, MemberStatus, Message, PermissionGroup,
};
pub use permission::{ChannelPermission, HubPermission, PermissionSetting, UnknownPermission};

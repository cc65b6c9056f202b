use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 权限标签，只做成员判断
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    CanCreateUsers,
    CanReadUsers,
    CanUpdateUsers,
    CanDeleteUsers,
    CanSearchOrder,
    CanPlaceOrder,
    CanCancelOrder,
    CanTrackOrder,
    CanScheduleOrder,
}

impl Permission {
    pub const ALL: [Permission; 9] = [
        Permission::CanCreateUsers,
        Permission::CanReadUsers,
        Permission::CanUpdateUsers,
        Permission::CanDeleteUsers,
        Permission::CanSearchOrder,
        Permission::CanPlaceOrder,
        Permission::CanCancelOrder,
        Permission::CanTrackOrder,
        Permission::CanScheduleOrder,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Permission::CanCreateUsers => "can_create_users",
            Permission::CanReadUsers => "can_read_users",
            Permission::CanUpdateUsers => "can_update_users",
            Permission::CanDeleteUsers => "can_delete_users",
            Permission::CanSearchOrder => "can_search_order",
            Permission::CanPlaceOrder => "can_place_order",
            Permission::CanCancelOrder => "can_cancel_order",
            Permission::CanTrackOrder => "can_track_order",
            Permission::CanScheduleOrder => "can_schedule_order",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

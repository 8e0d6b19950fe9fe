use serde::{Deserialize, Serialize};

use super::de::null_as_default;

/// What RoVer was allowed to do in the guild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateActions {
    #[serde(alias = "can_manage_roles", deserialize_with = "null_as_default")]
    pub can_manage_roles: bool,
    #[serde(alias = "can_manage_nicknames", deserialize_with = "null_as_default")]
    pub can_manage_nicknames: bool,
}

/// Outcome of an update (role / nickname sync) request.
///
/// Keys are accepted in either camelCase or snake_case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateResult {
    #[serde(deserialize_with = "null_as_default")]
    pub actions: UpdateActions,
    #[serde(deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
    #[serde(alias = "unmanageable_bound_roles", deserialize_with = "null_as_default")]
    pub unmanageable_bound_roles: Vec<String>,
    #[serde(alias = "added_roles", deserialize_with = "null_as_default")]
    pub added_roles: Vec<String>,
    #[serde(alias = "removed_roles", deserialize_with = "null_as_default")]
    pub removed_roles: Vec<String>,
    #[serde(alias = "failed_roles", deserialize_with = "null_as_default")]
    pub failed_roles: Vec<String>,
    pub nickname: Option<String>,
}

impl UpdateResult {
    /// True when the update added or removed at least one role.
    pub fn changed_roles(&self) -> bool {
        !self.added_roles.is_empty() || !self.removed_roles.is_empty()
    }
}

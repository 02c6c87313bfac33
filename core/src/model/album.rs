use chrono::{DateTime, Utc};
use strum::{Display, EnumString};

use super::{AlbumId, Principal};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Album {
    pub id: AlbumId,
    pub owner: Principal,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub changed_at: DateTime<Utc>,
    /// In the order they were added
    pub collaborators: Vec<Collaborator>,
}

impl Album {
    pub fn is_owner_or_editor(&self, principal: &Principal) -> bool {
        self.owner == *principal
            || self
                .collaborators
                .iter()
                .any(|c| c.principal == *principal && c.permission == Permission::Editor)
    }

    pub fn can_view(&self, principal: &Principal) -> bool {
        self.owner == *principal || self.collaborators.iter().any(|c| c.principal == *principal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Collaborator {
    pub principal: Principal,
    pub permission: Permission,
}

/// Ordered: `Viewer < Editor`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Permission {
    Viewer,
    Editor,
}

/// What sharing an album with a principal did to the collaborator list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShareOutcome {
    Added(Permission),
    Upgraded,
    /// Already a collaborator with the same or a higher permission
    Unchanged(Permission),
}

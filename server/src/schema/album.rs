use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use memorybox_core::model;

use super::AlbumId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Viewer,
    Editor,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    pub principal: String,
    pub permission: Permission,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: AlbumId,
    pub owner: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub changed_at: DateTime<Utc>,
    /// In the order they were added
    pub collaborators: Vec<Collaborator>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShareAlbumRequest {
    #[validate(email)]
    pub principal: String,
    pub permission: Permission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ShareOutcome {
    Added,
    Upgraded,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareAlbumResponse {
    pub outcome: ShareOutcome,
    /// Permission the principal has after sharing
    pub permission: Permission,
}

impl From<model::Permission> for Permission {
    fn from(value: model::Permission) -> Self {
        match value {
            model::Permission::Viewer => Permission::Viewer,
            model::Permission::Editor => Permission::Editor,
        }
    }
}

impl From<Permission> for model::Permission {
    fn from(value: Permission) -> Self {
        match value {
            Permission::Viewer => model::Permission::Viewer,
            Permission::Editor => model::Permission::Editor,
        }
    }
}

impl From<&model::Album> for Album {
    fn from(value: &model::Album) -> Self {
        Album {
            id: value.id.into(),
            owner: value.owner.as_str().to_owned(),
            name: value.name.clone(),
            description: value.description.clone(),
            created_at: value.created_at,
            changed_at: value.changed_at,
            collaborators: value
                .collaborators
                .iter()
                .map(|c| Collaborator {
                    principal: c.principal.as_str().to_owned(),
                    permission: c.permission.into(),
                })
                .collect(),
        }
    }
}

impl From<model::ShareOutcome> for ShareAlbumResponse {
    fn from(value: model::ShareOutcome) -> Self {
        let (outcome, permission) = match value {
            model::ShareOutcome::Added(permission) => (ShareOutcome::Added, permission),
            model::ShareOutcome::Upgraded => (ShareOutcome::Upgraded, model::Permission::Editor),
            model::ShareOutcome::Unchanged(permission) => (ShareOutcome::Unchanged, permission),
        };
        ShareAlbumResponse {
            outcome,
            permission: permission.into(),
        }
    }
}

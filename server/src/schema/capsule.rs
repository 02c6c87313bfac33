use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use memorybox_core::model;

use super::{AlbumId, CapsuleId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    Vintage,
    Modern,
    Dark,
    Nature,
    Sunset,
    Ocean,
    Royal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReminderPolicy {
    #[default]
    #[serde(alias = "never")]
    None,
    Daily,
    Weekly,
    Monthly,
}

/// Capsule metadata. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Capsule {
    pub id: CapsuleId,
    pub album_id: AlbumId,
    pub owner: String,
    pub unlock_at: DateTime<Utc>,
    pub theme: Theme,
    pub password_protected: bool,
    pub reminder_policy: ReminderPolicy,
    pub last_reminder_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCapsuleRequest {
    pub album_id: AlbumId,
    pub unlock_at: DateTime<Utc>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub password_protected: bool,
    pub password: Option<String>,
    #[serde(default)]
    pub reminder_policy: ReminderPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCapsuleRequest {
    pub theme: Option<Theme>,
    pub unlock_at: Option<DateTime<Utc>>,
    pub reminder_policy: Option<ReminderPolicy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenCapsuleRequest {
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum OpenCapsuleResponse {
    #[serde(rename_all = "camelCase")]
    Locked { unlock_at: DateTime<Utc> },
    PasswordRequired,
    Granted,
}

impl From<model::Theme> for Theme {
    fn from(value: model::Theme) -> Self {
        match value {
            model::Theme::Classic => Theme::Classic,
            model::Theme::Vintage => Theme::Vintage,
            model::Theme::Modern => Theme::Modern,
            model::Theme::Dark => Theme::Dark,
            model::Theme::Nature => Theme::Nature,
            model::Theme::Sunset => Theme::Sunset,
            model::Theme::Ocean => Theme::Ocean,
            model::Theme::Royal => Theme::Royal,
        }
    }
}

impl From<Theme> for model::Theme {
    fn from(value: Theme) -> Self {
        match value {
            Theme::Classic => model::Theme::Classic,
            Theme::Vintage => model::Theme::Vintage,
            Theme::Modern => model::Theme::Modern,
            Theme::Dark => model::Theme::Dark,
            Theme::Nature => model::Theme::Nature,
            Theme::Sunset => model::Theme::Sunset,
            Theme::Ocean => model::Theme::Ocean,
            Theme::Royal => model::Theme::Royal,
        }
    }
}

impl From<model::ReminderPolicy> for ReminderPolicy {
    fn from(value: model::ReminderPolicy) -> Self {
        match value {
            model::ReminderPolicy::None => ReminderPolicy::None,
            model::ReminderPolicy::Daily => ReminderPolicy::Daily,
            model::ReminderPolicy::Weekly => ReminderPolicy::Weekly,
            model::ReminderPolicy::Monthly => ReminderPolicy::Monthly,
        }
    }
}

impl From<ReminderPolicy> for model::ReminderPolicy {
    fn from(value: ReminderPolicy) -> Self {
        match value {
            ReminderPolicy::None => model::ReminderPolicy::None,
            ReminderPolicy::Daily => model::ReminderPolicy::Daily,
            ReminderPolicy::Weekly => model::ReminderPolicy::Weekly,
            ReminderPolicy::Monthly => model::ReminderPolicy::Monthly,
        }
    }
}

impl From<&model::Capsule> for Capsule {
    fn from(value: &model::Capsule) -> Self {
        Capsule {
            id: value.id.into(),
            album_id: value.album_id.into(),
            owner: value.owner.as_str().to_owned(),
            unlock_at: value.unlock_at,
            theme: value.theme.into(),
            password_protected: value.password_protected(),
            reminder_policy: value.reminder_policy.into(),
            last_reminder_sent_at: value.last_reminder_sent_at,
            created_at: value.created_at,
        }
    }
}

impl From<model::AccessResult> for OpenCapsuleResponse {
    fn from(value: model::AccessResult) -> Self {
        match value {
            model::AccessResult::Locked { unlock_at } => OpenCapsuleResponse::Locked { unlock_at },
            model::AccessResult::PasswordRequired => OpenCapsuleResponse::PasswordRequired,
            model::AccessResult::Granted => OpenCapsuleResponse::Granted,
        }
    }
}

impl From<UpdateCapsuleRequest> for model::CapsulePatch {
    fn from(value: UpdateCapsuleRequest) -> Self {
        model::CapsulePatch {
            theme: value.theme.map(Into::into),
            unlock_at: value.unlock_at,
            reminder_policy: value.reminder_policy.map(Into::into),
        }
    }
}

use eyre::eyre;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use memorybox_core::model;

macro_rules! impl_api_id {
    ($ident:ident) => {
        impl From<&model::$ident> for $ident {
            fn from(value: &model::$ident) -> Self {
                $ident(value.0.to_string())
            }
        }

        impl From<model::$ident> for $ident {
            fn from(value: model::$ident) -> Self {
                (&value).into()
            }
        }

        impl TryFrom<&$ident> for model::$ident {
            type Error = eyre::Report;
            fn try_from(value: &$ident) -> Result<Self, Self::Error> {
                match value.0.parse::<i64>() {
                    Ok(id) => Ok(model::$ident(id)),
                    Err(_) => Err(eyre!(
                        concat!("Invalid ", stringify!($ident), " {}"),
                        value.0
                    )),
                }
            }
        }

        impl TryFrom<$ident> for model::$ident {
            type Error = eyre::Report;
            fn try_from(value: $ident) -> Result<Self, Self::Error> {
                (&value).try_into()
            }
        }
    };
}

// Declarations stay outside the macro so the ToSchema derive is visible at the definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash, ToSchema)]
pub struct AlbumId(pub String);
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash, ToSchema)]
pub struct CapsuleId(pub String);
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash, ToSchema)]
pub struct NotificationId(pub String);

impl_api_id!(AlbumId);
impl_api_id!(CapsuleId);
impl_api_id!(NotificationId);

//! Wire format of the send-email request.

use std::fmt;

use hdtrades_core::booking::BookingNotice;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Body of `POST /api/send-email`.
///
/// Missing or `null` strings deserialise as empty so that the required-field
/// check treats absent and blank the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub phone: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub address: String,

    #[serde(default)]
    pub services: Option<ServiceList>,

    #[serde(default)]
    pub preferred_time: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

/// Services arrive either pre-joined or as the list of selected identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceList {
    One(String),
    Many(Vec<String>),
}

impl fmt::Display for ServiceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceList::One(s) => f.write_str(s),
            ServiceList::Many(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&BookingNotice> for SendEmailRequest {
    fn from(notice: &BookingNotice) -> Self {
        Self {
            name: notice.name.clone(),
            email: notice.email.clone(),
            phone: notice.phone.clone(),
            address: notice.address.clone(),
            services: Some(ServiceList::Many(notice.services.clone())),
            preferred_time: notice.preferred_time.clone(),
            message: notice.message.clone(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;

use super::referral::ReferralType;

/// Server-assigned user identifier.
///
/// Backends differ on whether ids are integers or strings; both are accepted
/// and written back in the form they arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(id) => write!(f, "{}", id),
            UserId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId::Number(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::Text(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default, deserialize_with = "deserialize_date_of_birth")]
    pub date_of_birth: Option<DateTime<Utc>>,
    pub referral_type: ReferralType,
}

/// Request body for creating a user (the server assigns the id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default, deserialize_with = "deserialize_date_of_birth")]
    pub date_of_birth: Option<DateTime<Utc>>,
    pub referral_type: ReferralType,
}

impl NewUser {
    /// Full record for an update addressed at `id`.
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            full_name: self.full_name,
            email: self.email,
            phone_number: self.phone_number,
            date_of_birth: self.date_of_birth,
            referral_type: self.referral_type,
        }
    }
}

/// Reads a wire timestamp as a UTC instant.
///
/// Accepts RFC 3339 (any offset), a date-time without offset and a bare date.
/// The last two are taken as UTC, a bare date as its midnight.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = text.parse::<NaiveDateTime>() {
        return Some(naive.and_utc());
    }
    text.parse::<NaiveDate>()
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

fn deserialize_date_of_birth<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_timestamp(&text).map(Some).ok_or_else(|| {
        de::Error::invalid_value(de::Unexpected::Str(&text), &"an ISO-8601 date or date-time")
    })
}

/// Envelope of the list endpoint: `{ "data": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub data: Vec<User>,
}

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// How a user learned of the service.
///
/// Closed set with stable integer codes; serialized on the wire as the code.
/// `Display` yields the human-readable label used by the selector and the
/// user table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum ReferralType {
    #[default]
    None = 0,
    Friend = 1,
    Advertisement = 2,
    #[strum(serialize = "Social Media")]
    SocialMedia = 3,
    Others = 4,
}

/// Rejected integer code, e.g. from a malformed response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown referral type code {0}")]
pub struct UnknownReferralType(pub u8);

impl ReferralType {
    /// Every referral type in code order.
    pub const ALL: [ReferralType; 5] = [
        ReferralType::None,
        ReferralType::Friend,
        ReferralType::Advertisement,
        ReferralType::SocialMedia,
        ReferralType::Others,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            ReferralType::None => "None",
            ReferralType::Friend => "Friend",
            ReferralType::Advertisement => "Advertisement",
            ReferralType::SocialMedia => "Social Media",
            ReferralType::Others => "Others",
        }
    }

    /// Ordered `(code, label)` pairs for populating a selection control.
    pub fn options() -> impl Iterator<Item = (u8, &'static str)> {
        Self::ALL.into_iter().map(|kind| (kind.code(), kind.label()))
    }
}

impl TryFrom<u8> for ReferralType {
    type Error = UnknownReferralType;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or(UnknownReferralType(code))
    }
}

impl From<ReferralType> for u8 {
    fn from(kind: ReferralType) -> Self {
        kind.code()
    }
}

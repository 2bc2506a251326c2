pub mod referral;
pub mod users;

pub use referral::{ReferralType, UnknownReferralType};
pub use users::{ListUsersResponse, NewUser, User, UserId};

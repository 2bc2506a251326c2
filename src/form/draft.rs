use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::{
    error::Result,
    models::{NewUser, ReferralType, User},
    validation::{self, DATE_INPUT_FORMAT},
};

/// The record currently being composed or edited.
///
/// `date_of_birth` holds date-input text (`yyyy-mm-dd`) or is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: String,
    pub referral_type: ReferralType,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Populate from a located record, rendering its date for the date input.
    pub fn from_user(user: &User) -> Self {
        Self {
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            date_of_birth: user
                .date_of_birth
                .map(|dob| dob.format(DATE_INPUT_FORMAT).to_string())
                .unwrap_or_default(),
            referral_type: user.referral_type,
        }
    }

    /// Validate and build the outgoing record.
    ///
    /// Checks run in order email, phone, full name, date of birth; the first
    /// failure is returned.
    pub fn to_new_user(&self) -> Result<NewUser> {
        validation::validate_email(&self.email)?;
        validation::validate_phone_number(&self.phone_number)?;
        validation::validate_full_name(&self.full_name)?;
        let date_of_birth = validation::validate_date_of_birth(&self.date_of_birth)?;

        Ok(NewUser {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            date_of_birth: date_of_birth.map(start_of_day_utc),
            referral_type: self.referral_type,
        })
    }
}

/// A date-only input denotes midnight UTC of that day.
fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

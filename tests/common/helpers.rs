//! Shared test helper functions

use chrono::{TimeZone, Utc};
use std::sync::Mutex;
use userform::{
    Error, UserForm,
    form::{FormObserver, FormOperation},
    models::{ReferralType, User, UserId},
};

/// Generates a unique, valid test email
///
/// # Example
/// ```no_run
/// let email = generate_test_email();
/// // Returns something like "test_V1StGXR8_Z5jdHi6B-myT@example.com"
/// ```
pub fn generate_test_email() -> String {
    format!("test_{}@example.com", nanoid::nanoid!())
}

/// A stored record with a fixed date of birth and `Friend` referral
pub fn sample_user(id: i64) -> User {
    User {
        id: UserId::Number(id),
        full_name: format!("Sample User {}", id),
        email: generate_test_email(),
        phone_number: "012-345 6789".to_string(),
        date_of_birth: Some(Utc.with_ymd_and_hms(1992, 3, 14, 0, 0, 0).unwrap()),
        referral_type: ReferralType::Friend,
    }
}

/// A record as a backend might write it, with `dateOfBirth` given verbatim
pub fn raw_user(id: i64, date_of_birth: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "fullName": format!("Raw User {}", id),
        "email": format!("raw{}@example.com", id),
        "phoneNumber": "013-222 3333",
        "dateOfBirth": date_of_birth,
        "referralType": 1
    })
}

/// Fill every field of the draft with input that passes validation
pub fn fill_valid_draft(form: &mut UserForm) {
    let draft = form.draft_mut();
    draft.full_name = "Farah Lim".to_string();
    draft.email = generate_test_email();
    draft.phone_number = "011 234 5678".to_string();
    draft.date_of_birth = "1999-11-30".to_string();
    draft.referral_type = ReferralType::Advertisement;
}

/// URL of a port nothing listens on
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api/v1/user")
}

/// Observer that keeps every reported failure for assertions
#[derive(Default)]
pub struct RecordingObserver {
    failures: Mutex<Vec<(FormOperation, String)>>,
}

impl RecordingObserver {
    pub fn operations(&self) -> Vec<FormOperation> {
        self.failures.lock().unwrap().iter().map(|(op, _)| *op).collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.failures.lock().unwrap().iter().map(|(_, m)| m.clone()).collect()
    }
}

impl FormObserver for RecordingObserver {
    fn on_failure(&self, operation: FormOperation, error: &Error) {
        self.failures.lock().unwrap().push((operation, error.to_string()));
    }
}

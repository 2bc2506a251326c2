pub mod helpers;
pub mod test_backend;

pub use helpers::{RecordingObserver, closed_port_url, fill_valid_draft, generate_test_email, raw_user, sample_user};
pub use test_backend::{RecordedRequest, TestBackend};

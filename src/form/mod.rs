//! User form controller
//!
//! [`UserForm`] owns the editable draft, the create/edit mode and the last
//! fetched user list, and mediates between them and a [`UserApi`]. Capabilities
//! it cannot own itself (asking the user to confirm a delete, reporting
//! swallowed failures) are injected as trait objects.
//!
//! [`UserApi`]: crate::client::UserApi

pub mod confirm;
pub mod controller;
pub mod draft;
pub mod observer;
pub mod state;
pub mod view;


pub use confirm::{Confirm, DELETE_PROMPT, FixedAnswer};
pub use controller::{DeleteOutcome, SearchOutcome, SubmitOutcome, UserForm};
pub use draft::Draft;
pub use observer::{FormObserver, FormOperation, TracingObserver};
pub use state::{FormState, Mode};
pub use view::{FormView, UserRow};

use std::fmt;
use std::sync::Arc;

use super::{
    confirm::{Confirm, DELETE_PROMPT},
    draft::Draft,
    observer::{FormObserver, FormOperation, TracingObserver},
    state::{FormState, Mode},
    view::{FormView, UserRow},
};
use crate::{
    client::UserApi,
    config::DisplayConfig,
    error::Error,
    models::User,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the error line is set and nothing was sent
    Invalid,
    Created,
    Updated,
    /// The call failed; draft and mode are kept for a retry
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Empty query: list reloaded and form reset
    Cleared,
    Found,
    NotFound,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Not editing a located record
    Unavailable,
    Cancelled,
    Deleted,
    Failed,
}

/// Dual-purpose create/edit form over a remote user list.
///
/// Operations never return errors: validation problems land in
/// [`error_message`](Self::error_message), everything else goes to the
/// [`FormObserver`] and the form is left in a well-defined state. All
/// operations take `&mut self`, so one controller runs at most one
/// submit/search/delete at a time.
pub struct UserForm {
    api: Arc<dyn UserApi>,
    confirm: Arc<dyn Confirm>,
    observer: Arc<dyn FormObserver>,
    date_format: String,
    draft: Draft,
    mode: Mode,
    search_query: String,
    error_message: Option<String>,
    users: Vec<User>,
}

impl fmt::Debug for UserForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserForm")
            .field("draft", &self.draft)
            .field("mode", &self.mode)
            .field("search_query", &self.search_query)
            .field("error_message", &self.error_message)
            .field("users", &self.users.len())
            .finish()
    }
}

impl UserForm {
    /// An empty form in create mode. Call [`load_users`](Self::load_users) to
    /// populate the list.
    pub fn new(api: Arc<dyn UserApi>, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            api,
            confirm,
            observer: Arc::new(TracingObserver),
            date_format: DisplayConfig::default().date_format,
            draft: Draft::default(),
            mode: Mode::Creating,
            search_query: String::new(),
            error_message: None,
            users: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn FormObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// chrono pattern for the date column of [`view`](Self::view)
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Field edits go straight into the draft.
    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn state(&self) -> FormState {
        FormState::of(&self.mode, &self.draft)
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Last fetched snapshot of the backend's records.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn view(&self) -> FormView {
        FormView {
            full_name: self.draft.full_name.clone(),
            email: self.draft.email.clone(),
            phone_number: self.draft.phone_number.clone(),
            date_of_birth: self.draft.date_of_birth.clone(),
            referral_type: self.draft.referral_type,
            error_message: self.error_message.clone(),
            submit_label: if self.mode.is_editing() { "Update" } else { "Submit" },
            show_delete: self.mode.is_editing(),
            search_query: self.search_query.clone(),
            rows: self
                .users
                .iter()
                .map(|user| UserRow::from_user(user, &self.date_format))
                .collect(),
        }
    }

    /// Replace the list with the backend's current records, or with nothing if
    /// the fetch fails.
    pub async fn load_users(&mut self) {
        match self.api.list_users().await {
            Ok(users) => {
                self.observer.on_users_loaded(users.len());
                self.users = users;
            }
            Err(err) => {
                self.report(FormOperation::LoadUsers, &err);
                self.users = Vec::new();
            }
        }
    }

    /// Validate the draft, then create (201) or update (200) depending on mode.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let new_user = match self.draft.to_new_user() {
            Ok(new_user) => new_user,
            Err(err) => {
                tracing::debug!(operation = %FormOperation::Submit, error = %err, "Draft rejected");
                self.error_message = Some(
                    err.user_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| err.to_string()),
                );
                return SubmitOutcome::Invalid;
            }
        };
        self.error_message = None;

        let result = match &self.mode {
            Mode::Editing(id) => {
                let user = new_user.with_id(id.clone());
                tracing::info!(operation = %FormOperation::Submit, user_id = %id, "Updating user");
                self.api.update_user(&user).await.map(|()| SubmitOutcome::Updated)
            }
            Mode::Creating => {
                tracing::info!(operation = %FormOperation::Submit, "Creating user");
                self.api.create_user(&new_user).await.map(|()| SubmitOutcome::Created)
            }
        };

        match result {
            Ok(outcome) => {
                self.refresh().await;
                outcome
            }
            Err(err) => {
                self.report(FormOperation::Submit, &err);
                SubmitOutcome::Failed
            }
        }
    }

    /// Look up the record named by the search query and switch to editing it.
    ///
    /// An empty query reloads the full list instead.
    pub async fn search(&mut self) -> SearchOutcome {
        let query = self.search_query.trim().to_string();
        if query.is_empty() {
            self.refresh().await;
            return SearchOutcome::Cleared;
        }

        match self.api.get_user(&query).await {
            Ok(Some(user)) => {
                tracing::info!(operation = %FormOperation::Search, user_id = %user.id, "User located");
                self.draft = Draft::from_user(&user);
                self.mode = Mode::Editing(user.id);
                SearchOutcome::Found
            }
            Ok(None) => {
                tracing::info!(operation = %FormOperation::Search, query = %query, "No user with that id");
                self.reset();
                SearchOutcome::NotFound
            }
            Err(err) => {
                self.report(FormOperation::Search, &err);
                self.reset();
                SearchOutcome::Failed
            }
        }
    }

    /// Delete the record being edited, after the injected confirmation agrees.
    pub async fn delete(&mut self) -> DeleteOutcome {
        let Some(id) = self.mode.editing_id().cloned() else {
            return DeleteOutcome::Unavailable;
        };

        if !self.confirm.confirm(DELETE_PROMPT).await {
            tracing::debug!(operation = %FormOperation::Delete, user_id = %id, "Delete cancelled");
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete_user(&id).await {
            Ok(()) => {
                tracing::info!(operation = %FormOperation::Delete, user_id = %id, "User deleted");
                self.refresh().await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                self.report(FormOperation::Delete, &err);
                DeleteOutcome::Failed
            }
        }
    }

    /// Back to an empty draft in create mode.
    pub fn reset(&mut self) {
        self.draft = Draft::default();
        self.error_message = None;
        self.search_query.clear();
        self.mode = Mode::Creating;
    }

    async fn refresh(&mut self) {
        self.load_users().await;
        self.reset();
    }

    fn report(&self, operation: FormOperation, error: &Error) {
        self.observer.on_failure(operation, error);
    }
}

//! Form mode and derived state.

use super::draft::Draft;
use crate::models::UserId;

/// Whether a save creates a new record or updates a located one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Creating,
    Editing(UserId),
}

impl Mode {
    pub fn is_editing(&self) -> bool {
        matches!(self, Mode::Editing(_))
    }

    pub fn editing_id(&self) -> Option<&UserId> {
        match self {
            Mode::Editing(id) => Some(id),
            Mode::Creating => None,
        }
    }
}

/// Coarse state of the form.
///
/// # State Transitions
///
/// - Idle → Populated: a field is edited or a search locates a record
/// - Populated → Idle: reset, successful save or delete, failed or empty search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// Empty draft in create mode
    Idle,
    /// Draft holds an in-progress or located record
    Populated,
}

impl FormState {
    pub fn of(mode: &Mode, draft: &Draft) -> Self {
        if !mode.is_editing() && draft.is_empty() {
            FormState::Idle
        } else {
            FormState::Populated
        }
    }
}

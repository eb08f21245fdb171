//! State of the voting form.
//!
//! The form is either browsing results (`Default`) or composing a ballot
//! (`Edit`). All transitions are plain methods so they can be driven without
//! a browser; the components keep one `BallotEditor` in a signal.

use crate::model::types::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Default,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("the poll is closed")]
    PollClosed,
    #[error("not possible in {0:?} mode")]
    WrongMode(Mode),
    #[error("no participant is selected")]
    NoSelection,
    #[error("participant {0} is not part of this poll")]
    UnknownParticipant(ParticipantId),
    #[error("only the poll admin can delete participants")]
    NotAdmin,
    #[error("a submission is already in progress")]
    SubmissionPending,
    #[error(transparent)]
    Invalid(#[from] Error),
}

/// What the form sends once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create {
        poll_id: PollId,
        form: BallotForm,
    },
    Update {
        poll_id: PollId,
        participant_id: ParticipantId,
        form: BallotForm,
    },
}

impl Submission {
    pub fn form(&self) -> &BallotForm {
        match self {
            Submission::Create { form, .. } | Submission::Update { form, .. } => form,
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, Submission::Create { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteIndicator {
    Yes,
    No,
}

/// Buttons offered in `Default` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Actions {
    pub new: bool,
    pub edit: bool,
    pub delete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Create,
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallotEditor {
    mode: Mode,
    selected: Option<ParticipantId>,
    form: BallotForm,
    pending: Option<Pending>,
}

impl BallotEditor {
    /// An open poll nobody answered yet starts in the form.
    pub fn new(poll: &Poll) -> Self {
        let mode = if poll.participants.is_empty() && poll.can_vote() {
            Mode::Edit
        } else {
            Mode::Default
        };
        Self {
            mode,
            selected: None,
            form: BallotForm::default(),
            pending: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Edit
    }

    /// Whether the name input, checkboxes and Save are rendered. A poll closed
    /// while the form was open hides them.
    pub fn shows_form(&self, poll: &Poll) -> bool {
        self.is_editing() && poll.can_vote()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn form(&self) -> &BallotForm {
        &self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn selected_participant<'a>(&self, poll: &'a Poll) -> Option<&'a Participant> {
        self.selected.as_deref().and_then(|id| poll.participant(id))
    }

    /// Changes whose votes are shown; `None` shows everyone.
    pub fn select(&mut self, id: Option<ParticipantId>) -> Result<(), EditorError> {
        self.require_mode(Mode::Default)?;
        self.selected = id;
        Ok(())
    }

    pub fn actions(&self, poll: &Poll, role: Role) -> Actions {
        if poll.closed || self.mode != Mode::Default {
            return Actions::default();
        }
        let has_selection = self.selected_participant(poll).is_some();
        Actions {
            new: !has_selection,
            edit: has_selection,
            delete: has_selection && role.is_admin(),
        }
    }

    /// Starts a fresh ballot for someone who has not voted yet.
    pub fn start_new(&mut self, poll: &Poll) -> Result<(), EditorError> {
        Self::require_open(poll)?;
        self.require_mode(Mode::Default)?;
        self.form = BallotForm::default();
        self.selected = None;
        self.mode = Mode::Edit;
        Ok(())
    }

    /// Opens the selected participant's ballot, pre-filled with their votes.
    pub fn start_edit(&mut self, poll: &Poll) -> Result<(), EditorError> {
        Self::require_open(poll)?;
        self.require_mode(Mode::Default)?;
        let participant = self.require_selected(poll)?;
        self.form = BallotForm::new(participant.name.clone(), participant.option_ids());
        self.mode = Mode::Edit;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), EditorError> {
        self.require_mode(Mode::Edit)?;
        self.require_idle()?;
        self.mode = Mode::Default;
        Ok(())
    }

    pub fn set_name(&mut self, name: String) -> Result<(), EditorError> {
        self.require_mode(Mode::Edit)?;
        self.require_idle()?;
        self.form.name = name;
        Ok(())
    }

    pub fn set_vote(&mut self, option_id: &str, selected: bool) -> Result<(), EditorError> {
        self.require_mode(Mode::Edit)?;
        self.require_idle()?;
        self.form.set_selected(option_id, selected);
        Ok(())
    }

    /// Validates the form and marks a submission as in flight.
    ///
    /// A failed validation leaves the editor untouched, no request is made.
    pub fn begin_submit(&mut self, poll: &Poll) -> Result<Submission, EditorError> {
        Self::require_open(poll)?;
        self.require_mode(Mode::Edit)?;
        self.require_idle()?;
        self.form.validate(poll)?;

        let form = self.form.normalized();
        let submission = match self.selected_participant(poll) {
            Some(participant) => Submission::Update {
                poll_id: poll.id.clone(),
                participant_id: participant.id.clone(),
                form,
            },
            None => Submission::Create {
                poll_id: poll.id.clone(),
                form,
            },
        };
        self.pending = Some(if submission.is_create() {
            Pending::Create
        } else {
            Pending::Update
        });
        Ok(submission)
    }

    /// Applies the outcome of the request started by [`Self::begin_submit`].
    ///
    /// On failure the editor stays in `Edit` with the entered values.
    pub fn finish_submit(&mut self, result: &Result<Participant, Error>) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        if let Ok(participant) = result {
            self.mode = Mode::Default;
            if pending == Pending::Create {
                self.selected = Some(participant.id.clone());
            }
        }
    }

    /// Id of the participant an admin asked to delete. The mode does not change.
    pub fn request_delete(&self, poll: &Poll, role: Role) -> Result<ParticipantId, EditorError> {
        Self::require_open(poll)?;
        if !role.is_admin() {
            return Err(EditorError::NotAdmin);
        }
        self.require_mode(Mode::Default)?;
        Ok(self.require_selected(poll)?.id.clone())
    }

    pub fn participant_deleted(&mut self, id: &str) {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
    }

    /// Read-only yes/no for the selected participant, `None` while editing or without selection.
    pub fn indicator(&self, poll: &Poll, option_id: &str) -> Option<VoteIndicator> {
        if self.mode != Mode::Default {
            return None;
        }
        self.selected_participant(poll).map(|participant| {
            if participant.voted_for(option_id) {
                VoteIndicator::Yes
            } else {
                VoteIndicator::No
            }
        })
    }

    fn require_open(poll: &Poll) -> Result<(), EditorError> {
        if poll.closed {
            Err(EditorError::PollClosed)
        } else {
            Ok(())
        }
    }

    fn require_mode(&self, mode: Mode) -> Result<(), EditorError> {
        if self.mode == mode {
            Ok(())
        } else {
            Err(EditorError::WrongMode(self.mode))
        }
    }

    fn require_idle(&self) -> Result<(), EditorError> {
        if self.pending.is_some() {
            Err(EditorError::SubmissionPending)
        } else {
            Ok(())
        }
    }

    fn require_selected<'a>(&self, poll: &'a Poll) -> Result<&'a Participant, EditorError> {
        let id = self.selected.as_deref().ok_or(EditorError::NoSelection)?;
        poll.participant(id)
            .ok_or_else(|| EditorError::UnknownParticipant(id.to_string()))
    }
}

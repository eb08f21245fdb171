use crate::model::editor::{BallotEditor, EditorError, Submission};
use crate::model::types::*;

/// Persists ballots. Implemented over server functions in the browser and by
/// fakes in tests.
#[allow(async_fn_in_trait)]
pub trait BallotService {
    async fn create_participant(
        &self,
        poll_id: &str,
        form: BallotForm,
    ) -> Result<Participant, Error>;

    async fn update_participant(
        &self,
        poll_id: &str,
        participant_id: &str,
        form: BallotForm,
    ) -> Result<Participant, Error>;
}

impl Submission {
    pub async fn send<S: BallotService>(self, service: &S) -> Result<Participant, Error> {
        match self {
            Submission::Create { poll_id, form } => {
                service.create_participant(&poll_id, form).await
            }
            Submission::Update {
                poll_id,
                participant_id,
                form,
            } => {
                service
                    .update_participant(&poll_id, &participant_id, form)
                    .await
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error("saving the ballot failed: {0}")]
    Mutation(#[from] Error),
}

/// Creates or updates the ballot in `editor`, depending on whether a
/// participant is selected, and feeds the outcome back into the editor.
pub async fn submit_ballot<S: BallotService>(
    editor: &mut BallotEditor,
    poll: &Poll,
    service: &S,
) -> Result<Participant, SubmitError> {
    let submission = editor.begin_submit(poll)?;
    let result = submission.send(service).await;
    editor.finish_submit(&result);
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::editor::Mode;
    use crate::model::types::poll::fixtures::{poll, vote};
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Create(String, BallotForm),
        Update(String, String, BallotForm),
    }

    #[derive(Default)]
    struct FakeService {
        calls: RefCell<Vec<Call>>,
        fail: bool,
    }

    impl FakeService {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn respond(&self, id: &str, form: &BallotForm) -> Result<Participant, Error> {
            if self.fail {
                return Err(Error::Database("connection reset".into()));
            }
            Ok(Participant {
                id: id.to_string(),
                name: form.name.clone(),
                votes: form.votes.iter().map(|option| vote(option, id)).collect(),
            })
        }
    }

    impl BallotService for FakeService {
        async fn create_participant(
            &self,
            poll_id: &str,
            form: BallotForm,
        ) -> Result<Participant, Error> {
            self.calls
                .borrow_mut()
                .push(Call::Create(poll_id.to_string(), form.clone()));
            self.respond("new", &form)
        }

        async fn update_participant(
            &self,
            poll_id: &str,
            participant_id: &str,
            form: BallotForm,
        ) -> Result<Participant, Error> {
            self.calls.borrow_mut().push(Call::Update(
                poll_id.to_string(),
                participant_id.to_string(),
                form.clone(),
            ));
            self.respond(participant_id, &form)
        }
    }

    #[test]
    fn creates_when_nobody_is_selected() {
        let poll = poll(&[]);
        let service = FakeService::default();
        let mut editor = BallotEditor::new(&poll);
        editor.set_name("Ana".into()).unwrap();
        editor.set_vote("o1", true).unwrap();

        let participant = block_on(submit_ballot(&mut editor, &poll, &service)).unwrap();
        assert_eq!(participant.id, "new");
        assert_eq!(
            service.calls.borrow().as_slice(),
            &[Call::Create(
                "poll".into(),
                BallotForm::new("Ana", vec!["o1".into()])
            )]
        );
        assert_eq!(editor.mode(), Mode::Default);
        assert_eq!(editor.selected(), Some("new"));
    }

    #[test]
    fn updates_the_selected_participant() {
        let poll = poll(&[("p1", "Ana", &["o1"])]);
        let service = FakeService::default();
        let mut editor = BallotEditor::new(&poll);
        editor.select(Some("p1".into())).unwrap();
        editor.start_edit(&poll).unwrap();
        editor.set_vote("o1", false).unwrap();
        editor.set_vote("o2", true).unwrap();

        block_on(submit_ballot(&mut editor, &poll, &service)).unwrap();
        assert_eq!(
            service.calls.borrow().as_slice(),
            &[Call::Update(
                "poll".into(),
                "p1".into(),
                BallotForm::new("Ana", vec!["o2".into()])
            )]
        );
        assert_eq!(editor.mode(), Mode::Default);
        assert_eq!(editor.selected(), Some("p1"));
    }

    #[test]
    fn validation_failure_makes_no_call() {
        let poll = poll(&[]);
        let service = FakeService::default();
        let mut editor = BallotEditor::new(&poll);

        let err = block_on(submit_ballot(&mut editor, &poll, &service)).unwrap_err();
        assert!(matches!(err, SubmitError::Editor(EditorError::Invalid(_))));
        assert!(service.calls.borrow().is_empty());
    }

    #[test]
    fn mutation_failure_keeps_form_in_edit() {
        let poll = poll(&[]);
        let service = FakeService::failing();
        let mut editor = BallotEditor::new(&poll);
        editor.set_name("Ana".into()).unwrap();
        editor.set_vote("o3", true).unwrap();

        let err = block_on(submit_ballot(&mut editor, &poll, &service)).unwrap_err();
        assert!(matches!(err, SubmitError::Mutation(Error::Database(_))));
        assert_eq!(editor.mode(), Mode::Edit);
        assert_eq!(editor.form(), &BallotForm::new("Ana", vec!["o3".into()]));
        assert!(!editor.is_submitting());
    }
}

use super::{Error, OptionId, Poll};
use serde::{Deserialize, Serialize};

/// Name and selected options of one participant, as entered in the voting form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct BallotForm {
    pub name: String,
    pub votes: Vec<OptionId>,
}

impl BallotForm {
    pub fn new(name: impl Into<String>, votes: Vec<OptionId>) -> Self {
        Self {
            name: name.into(),
            votes,
        }
    }

    pub fn is_selected(&self, option_id: &str) -> bool {
        self.votes.iter().any(|id| id == option_id)
    }

    pub fn toggle(&mut self, option_id: &str) {
        match self.votes.iter().position(|id| id == option_id) {
            Some(index) => {
                self.votes.remove(index);
            }
            None => self.votes.push(option_id.to_string()),
        }
    }

    pub fn set_selected(&mut self, option_id: &str, selected: bool) {
        if selected != self.is_selected(option_id) {
            self.toggle(option_id);
        }
    }

    pub fn name_is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Checks the name and that every vote points at an option of `poll`.
    pub fn validate(&self, poll: &Poll) -> Result<(), Error> {
        if !self.name_is_valid() {
            return Err(Error::Validation("name is required".to_string()));
        }
        if let Some(unknown) = self.votes.iter().find(|id| !poll.has_option(id)) {
            return Err(Error::Validation(format!(
                "option {} does not belong to poll {}",
                unknown, poll.id
            )));
        }
        Ok(())
    }

    /// Trimmed name and deduplicated votes, the shape that gets stored.
    pub fn normalized(&self) -> Self {
        let mut votes = Vec::with_capacity(self.votes.len());
        for id in &self.votes {
            if !votes.contains(id) {
                votes.push(id.clone());
            }
        }
        Self {
            name: self.name.trim().to_string(),
            votes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::poll::fixtures::poll;

    #[test]
    fn empty_or_blank_name_is_rejected() {
        let poll = poll(&[]);
        let form = BallotForm::new("   ", vec![]);
        assert!(matches!(form.validate(&poll), Err(Error::Validation(_))));
        assert!(BallotForm::default().validate(&poll).is_err());
    }

    #[test]
    fn votes_must_belong_to_the_poll() {
        let poll = poll(&[]);
        assert!(BallotForm::new("Ana", vec!["o1".into(), "o3".into()])
            .validate(&poll)
            .is_ok());
        let err = BallotForm::new("Ana", vec!["o1".into(), "o7".into()])
            .validate(&poll)
            .unwrap_err();
        assert!(err.to_string().contains("o7"));
    }

    #[test]
    fn toggling_adds_and_removes_options() {
        let mut form = BallotForm::new("Ana", vec![]);
        form.toggle("o1");
        form.set_selected("o2", true);
        form.set_selected("o2", true);
        assert_eq!(form.votes, vec!["o1".to_string(), "o2".to_string()]);
        form.toggle("o1");
        form.set_selected("o2", false);
        assert!(form.votes.is_empty());
    }

    #[test]
    fn normalized_trims_and_dedups() {
        let form = BallotForm::new(" Ana ", vec!["o1".into(), "o2".into(), "o1".into()]);
        let normalized = form.normalized();
        assert_eq!(normalized.name, "Ana");
        assert_eq!(normalized.votes, vec!["o1".to_string(), "o2".to_string()]);
    }
}

use crate::model::types::*;
use std::collections::HashMap;

/// How many voter avatars an option shows before collapsing into `+N`.
pub const MAX_AVATARS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionScore {
    pub option_id: OptionId,
    pub votes: usize,
}

/// Vote counts per option, in option order, and the highest of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VoteSummary {
    pub scores: Vec<OptionScore>,
    pub high_score: usize,
}

impl VoteSummary {
    pub fn new(options: &[PollOption]) -> Self {
        let scores: Vec<OptionScore> = options
            .iter()
            .map(|option| OptionScore {
                option_id: option.id.clone(),
                votes: option.votes.len(),
            })
            .collect();
        let high_score = scores.iter().map(|score| score.votes).max().unwrap_or(0);
        Self { scores, high_score }
    }

    pub fn votes_for(&self, option_id: &str) -> usize {
        self.scores
            .iter()
            .find(|score| score.option_id == option_id)
            .map(|score| score.votes)
            .unwrap_or(0)
    }

    ///all options sharing the high score are highlighted, with no votes that is every option
    pub fn is_top(&self, votes: usize) -> bool {
        votes == self.high_score
    }
}

pub fn high_score(options: &[PollOption]) -> usize {
    VoteSummary::new(options).high_score
}

pub fn participants_by_id(participants: &[Participant]) -> HashMap<&str, &Participant> {
    participants
        .iter()
        .map(|participant| (participant.id.as_str(), participant))
        .collect()
}

/// Returns how many avatars to draw and the size of the `+N` chip.
pub fn avatar_overflow(voters: usize) -> (usize, Option<usize>) {
    if voters <= MAX_AVATARS {
        (voters, None)
    } else {
        let shown = MAX_AVATARS - 1;
        (shown, Some(voters - shown))
    }
}

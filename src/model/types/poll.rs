use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type PollId = String;
pub type OptionId = String;
pub type ParticipantId = String;

/// Whether the page was opened through the admin link.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Participant,
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// A single "yes" for one option by one participant.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub id: String,
    pub option_id: OptionId,
    pub participant_id: ParticipantId,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PollOption {
    pub id: OptionId,
    /// either `2022-03-14` or `2022-03-14T08:00:00/2022-03-14T09:00:00`
    pub value: String,
    pub votes: Vec<Vote>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub votes: Vec<Vote>,
}

impl Participant {
    pub fn voted_for(&self, option_id: &str) -> bool {
        self.votes.iter().any(|vote| vote.option_id == option_id)
    }

    pub fn option_ids(&self) -> Vec<OptionId> {
        self.votes.iter().map(|vote| vote.option_id.clone()).collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Poll {
    pub id: PollId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// time zone the options were created in, none for floating times
    pub time_zone: Option<String>,
    /// id of the user who created the poll, it is their only credential and
    /// stays on the server
    #[serde(skip)]
    pub user_id: String,
    /// whether the viewer that fetched the poll created it
    pub is_owner: bool,
    pub participant_url_id: String,
    ///only present when the poll was fetched through the admin link or by its owner
    pub admin_url_id: Option<String>,
    pub closed: bool,
    pub created_at: DateTime<Utc>,
    pub options: Vec<PollOption>,
    pub participants: Vec<Participant>,
}

impl Poll {
    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|participant| participant.id == id)
    }

    pub fn has_option(&self, id: &str) -> bool {
        self.options.iter().any(|option| option.id == id)
    }

    pub fn can_vote(&self) -> bool {
        !self.closed
    }
}

/// Row of the poll listing page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct PollSummary {
    pub id: PollId,
    pub title: String,
    pub admin_url_id: String,
    pub participant_url_id: String,
    pub closed: bool,
    pub participant_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Input of the create poll form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct NewPoll {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub time_zone: Option<String>,
    pub options: Vec<String>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn vote(option_id: &str, participant_id: &str) -> Vote {
        Vote {
            id: format!("{option_id}-{participant_id}"),
            option_id: option_id.to_string(),
            participant_id: participant_id.to_string(),
        }
    }

    /// options `o1`..`o3`, participants given as (id, name, voted option ids)
    pub fn poll(participants: &[(&str, &str, &[&str])]) -> Poll {
        let option_ids = ["o1", "o2", "o3"];
        let participants: Vec<Participant> = participants
            .iter()
            .map(|(id, name, voted)| Participant {
                id: id.to_string(),
                name: name.to_string(),
                votes: voted.iter().map(|option_id| vote(option_id, id)).collect(),
            })
            .collect();
        let options = option_ids
            .iter()
            .enumerate()
            .map(|(day, id)| PollOption {
                id: id.to_string(),
                value: format!("2022-03-{:02}", day + 14),
                votes: participants
                    .iter()
                    .flat_map(|participant| participant.votes.iter())
                    .filter(|vote| vote.option_id == *id)
                    .cloned()
                    .collect(),
            })
            .collect();
        Poll {
            id: "poll".to_string(),
            title: "Team lunch".to_string(),
            description: None,
            location: None,
            time_zone: None,
            user_id: "owner".to_string(),
            is_owner: false,
            participant_url_id: "invite".to_string(),
            admin_url_id: None,
            closed: false,
            created_at: DateTime::<Utc>::default(),
            options,
            participants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn participant_lookup_and_votes() {
        let poll = poll(&[("p1", "Ana", &["o1", "o3"])]);
        let ana = poll.participant("p1").unwrap();
        assert!(ana.voted_for("o1"));
        assert!(!ana.voted_for("o2"));
        assert_eq!(ana.option_ids(), vec!["o1".to_string(), "o3".to_string()]);
        assert!(poll.participant("nobody").is_none());
        assert!(poll.has_option("o2"));
        assert!(!poll.has_option("o9"));
    }
}

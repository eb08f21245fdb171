use crate::model::date_option::{decode_date_option, parse_time_zone};
use crate::model::types::*;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use sqlx::PgPool;

const MAX_TITLE_LEN: usize = 100;
const MAX_OPTIONS: usize = 100;

#[derive(sqlx::FromRow, Debug, Clone)]
struct PollRow {
    id: String,
    title: String,
    description: Option<String>,
    location: Option<String>,
    time_zone: Option<String>,
    user_id: String,
    participant_url_id: String,
    admin_url_id: String,
    closed: bool,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Debug, Clone)]
struct OptionRow {
    id: String,
    value: String,
}

#[derive(sqlx::FromRow, Debug, Clone)]
struct ParticipantRow {
    id: String,
    name: String,
}

#[derive(sqlx::FromRow, Debug, Clone)]
struct VoteRow {
    id: String,
    option_id: String,
    participant_id: String,
}

const POLL_COLUMNS: &str = "id, title, description, location, time_zone, user_id, \
     participant_url_id, admin_url_id, closed, created_at";

/// Which link a poll is being looked up by.
#[derive(Debug, Clone, Copy)]
enum Lookup<'a> {
    Invite(&'a str),
    Admin(&'a str),
    Id(&'a str),
}

async fn find_poll(lookup: Lookup<'_>, pool: &PgPool) -> Result<PollRow, Error> {
    let (column, key) = match lookup {
        Lookup::Invite(key) => ("participant_url_id", key),
        Lookup::Admin(key) => ("admin_url_id", key),
        Lookup::Id(key) => ("id", key),
    };
    let query = format!("SELECT {POLL_COLUMNS} FROM polls WHERE {column} = $1");
    sqlx::query_as::<_, PollRow>(&query)
        .bind(key)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("poll {key} does not exist")))
}

async fn load_aggregate(
    row: PollRow,
    expose_admin: bool,
    viewer: Option<&User>,
    pool: &PgPool,
) -> Result<Poll, Error> {
    let options = sqlx::query_as::<_, OptionRow>(
        "SELECT id, value FROM options WHERE poll_id = $1 ORDER BY position, value",
    )
    .bind(&row.id)
    .fetch_all(pool)
    .await?;

    let participants = sqlx::query_as::<_, ParticipantRow>(
        "SELECT id, name FROM participants WHERE poll_id = $1 ORDER BY created_at, id",
    )
    .bind(&row.id)
    .fetch_all(pool)
    .await?;

    let votes = sqlx::query_as::<_, VoteRow>(
        "SELECT id, option_id, participant_id FROM votes WHERE poll_id = $1 ORDER BY id",
    )
    .bind(&row.id)
    .fetch_all(pool)
    .await?;

    Ok(assemble(row, options, participants, votes, expose_admin, viewer))
}

fn assemble(
    row: PollRow,
    options: Vec<OptionRow>,
    participants: Vec<ParticipantRow>,
    votes: Vec<VoteRow>,
    expose_admin: bool,
    viewer: Option<&User>,
) -> Poll {
    let votes: Vec<Vote> = votes
        .into_iter()
        .map(|vote| Vote {
            id: vote.id,
            option_id: vote.option_id,
            participant_id: vote.participant_id,
        })
        .collect();
    let mut by_option = votes
        .iter()
        .cloned()
        .into_group_map_by(|vote| vote.option_id.clone());
    let mut by_participant = votes
        .into_iter()
        .into_group_map_by(|vote| vote.participant_id.clone());

    let mut poll = Poll {
        options: options
            .into_iter()
            .map(|option| PollOption {
                votes: by_option.remove(&option.id).unwrap_or_default(),
                id: option.id,
                value: option.value,
            })
            .collect(),
        participants: participants
            .into_iter()
            .map(|participant| Participant {
                votes: by_participant.remove(&participant.id).unwrap_or_default(),
                id: participant.id,
                name: participant.name,
            })
            .collect(),
        admin_url_id: expose_admin.then_some(row.admin_url_id),
        id: row.id,
        title: row.title,
        description: row.description,
        location: row.location,
        time_zone: row.time_zone,
        user_id: row.user_id,
        participant_url_id: row.participant_url_id,
        closed: row.closed,
        created_at: row.created_at,
        is_owner: false,
    };
    poll.is_owner = owns_object(viewer, &poll);
    poll
}

/// Fetches a poll through its invite link, or its admin link when `admin` is set.
/// `viewer` only decides `is_owner`, the owner id itself never leaves the server.
pub async fn get_poll(
    url_id: &str,
    admin: bool,
    viewer: Option<&User>,
    pool: &PgPool,
) -> Result<Poll, Error> {
    let lookup = if admin {
        Lookup::Admin(url_id)
    } else {
        Lookup::Invite(url_id)
    };
    let row = find_poll(lookup, pool).await?;
    load_aggregate(row, admin, viewer, pool).await
}

/// Fetches a poll by id for its owner, anyone else is turned away.
pub async fn get_owned_poll(poll_id: &str, user_id: &str, pool: &PgPool) -> Result<Poll, Error> {
    let row = find_poll(Lookup::Id(poll_id), pool).await?;
    if user_id.is_empty() || row.user_id != user_id {
        tracing::warn!(%poll_id, "rejected manage request from non-owner");
        return Err(Error::Forbidden(format!("you do not own poll {poll_id}")));
    }
    load_aggregate(row, true, Some(&User::new(user_id)), pool).await
}

pub async fn list_polls(user_id: &str, pool: &PgPool) -> Result<Vec<PollSummary>, Error> {
    let polls = sqlx::query_as::<_, PollSummary>(
        "SELECT p.id, p.title, p.admin_url_id, p.participant_url_id, p.closed, p.created_at,
                COUNT(pa.id) AS participant_count
         FROM polls p
         LEFT JOIN participants pa ON pa.poll_id = p.id
         WHERE p.user_id = $1
         GROUP BY p.id
         ORDER BY p.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(polls)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Checks a new poll and returns it with blank fields dropped.
pub fn validate_new_poll(poll: NewPoll) -> Result<NewPoll, Error> {
    let title = poll.title.trim().to_string();
    if title.is_empty() || title.chars().count() > MAX_TITLE_LEN {
        return Err(Error::Validation(format!(
            "title must be between 1 and {MAX_TITLE_LEN} characters"
        )));
    }
    let time_zone = non_empty(poll.time_zone);
    if let Some(time_zone) = &time_zone {
        parse_time_zone(time_zone)?;
    }

    let options: Vec<String> = poll
        .options
        .iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unique()
        .collect();
    if options.is_empty() || options.len() > MAX_OPTIONS {
        return Err(Error::Validation(format!(
            "a poll needs between 1 and {MAX_OPTIONS} options, got {}",
            options.len()
        )));
    }
    for value in &options {
        decode_date_option(value, time_zone.as_deref(), time_zone.as_deref())?;
    }

    Ok(NewPoll {
        title,
        description: non_empty(poll.description),
        location: non_empty(poll.location),
        time_zone,
        options,
    })
}

/// Stores a new poll owned by `user_id` and returns it as seen through the admin link.
pub async fn create_poll(poll: NewPoll, user_id: &str, pool: &PgPool) -> Result<Poll, Error> {
    if user_id.is_empty() {
        return Err(Error::Forbidden("a user id is required to create a poll".to_string()));
    }
    let poll = validate_new_poll(poll)?;
    let poll_id = new_id();
    let url_ids = UrlIds::generate();

    let mut transaction = pool.begin().await?;
    sqlx::query(
        "INSERT INTO polls
            (id, title, description, location, time_zone, user_id, participant_url_id, admin_url_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(&poll_id)
    .bind(&poll.title)
    .bind(&poll.description)
    .bind(&poll.location)
    .bind(&poll.time_zone)
    .bind(user_id)
    .bind(&url_ids.participant)
    .bind(&url_ids.admin)
    .execute(&mut *transaction)
    .await?;

    for (position, value) in poll.options.iter().enumerate() {
        sqlx::query("INSERT INTO options (id, poll_id, value, position) VALUES ($1, $2, $3, $4)")
            .bind(new_id())
            .bind(&poll_id)
            .bind(value)
            .bind(position as i32)
            .execute(&mut *transaction)
            .await?;
    }
    transaction.commit().await?;

    tracing::info!(%poll_id, options = poll.options.len(), "poll created");
    get_poll(&url_ids.admin, true, Some(&User::new(user_id)), pool).await
}

pub async fn set_poll_closed(admin_url_id: &str, closed: bool, pool: &PgPool) -> Result<(), Error> {
    let result = sqlx::query("UPDATE polls SET closed = $1 WHERE admin_url_id = $2")
        .bind(closed)
        .bind(admin_url_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!(
            "poll {admin_url_id} does not exist, could not change it"
        )));
    }
    tracing::info!(closed, "poll status changed");
    Ok(())
}

/// Removes a poll with its options, participants and votes.
pub async fn delete_poll(admin_url_id: &str, pool: &PgPool) -> Result<(), Error> {
    let result = sqlx::query("DELETE FROM polls WHERE admin_url_id = $1")
        .bind(admin_url_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!(
            "poll {admin_url_id} does not exist, could not delete it"
        )));
    }
    tracing::info!("poll deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> PollRow {
        PollRow {
            id: "poll".into(),
            title: "Dinner".into(),
            description: None,
            location: Some("Pizzeria".into()),
            time_zone: Some("Europe/Rome".into()),
            user_id: "owner".into(),
            participant_url_id: "invite".into(),
            admin_url_id: "secret".into(),
            closed: false,
            created_at: DateTime::<Utc>::default(),
        }
    }

    fn vote(id: &str, option_id: &str, participant_id: &str) -> VoteRow {
        VoteRow {
            id: id.into(),
            option_id: option_id.into(),
            participant_id: participant_id.into(),
        }
    }

    #[test]
    fn assemble_groups_votes_both_ways() {
        let options = vec![
            OptionRow {
                id: "o1".into(),
                value: "2022-03-14".into(),
            },
            OptionRow {
                id: "o2".into(),
                value: "2022-03-15".into(),
            },
        ];
        let participants = vec![
            ParticipantRow {
                id: "p1".into(),
                name: "Ana".into(),
            },
            ParticipantRow {
                id: "p2".into(),
                name: "Ben".into(),
            },
        ];
        let votes = vec![vote("v1", "o1", "p1"), vote("v2", "o2", "p1"), vote("v3", "o2", "p2")];

        let poll = assemble(row(), options, participants, votes, false, None);
        assert_eq!(poll.admin_url_id, None);
        assert_eq!(poll.options[0].votes.len(), 1);
        assert_eq!(poll.options[1].votes.len(), 2);
        assert_eq!(poll.participants[0].option_ids(), vec!["o1".to_string(), "o2".to_string()]);
        assert_eq!(poll.participants[1].option_ids(), vec!["o2".to_string()]);
    }

    #[test]
    fn assemble_exposes_admin_link_only_for_admins() {
        let poll = assemble(row(), vec![], vec![], vec![], true, None);
        assert_eq!(poll.admin_url_id.as_deref(), Some("secret"));
        assert!(poll.options.is_empty());
    }

    #[test]
    fn invite_view_never_carries_owner_credentials() {
        let row = PollRow {
            user_id: "owner-secret".into(),
            ..row()
        };
        let poll = assemble(row, vec![], vec![], vec![], false, Some(&User::new("guest")));
        assert!(!poll.is_owner);

        let wire = serde_json::to_string(&poll).unwrap();
        assert!(!wire.contains("owner-secret"));
        assert!(!wire.contains("\"secret\""));
        let received: Poll = serde_json::from_str(&wire).unwrap();
        assert_eq!(received.user_id, "");
        assert_eq!(received.admin_url_id, None);
    }

    #[test]
    fn owner_is_recognised_on_the_server() {
        let poll = assemble(row(), vec![], vec![], vec![], false, Some(&User::new("owner")));
        assert!(poll.is_owner);
        let wire = serde_json::to_string(&poll).unwrap();
        let received: Poll = serde_json::from_str(&wire).unwrap();
        assert!(received.is_owner);
        assert!(!assemble(row(), vec![], vec![], vec![], false, None).is_owner);
    }

    #[test]
    fn new_poll_is_cleaned_up() {
        let poll = validate_new_poll(NewPoll {
            title: "  Dinner ".into(),
            description: Some("   ".into()),
            location: Some(" Rome ".into()),
            time_zone: Some("Europe/Rome".into()),
            options: vec![
                "2022-03-14".into(),
                " ".into(),
                "2022-03-14".into(),
                "2022-03-15T19:00:00/2022-03-15T21:00:00".into(),
            ],
        })
        .unwrap();
        assert_eq!(poll.title, "Dinner");
        assert_eq!(poll.description, None);
        assert_eq!(poll.location.as_deref(), Some("Rome"));
        assert_eq!(poll.options.len(), 2);
    }

    #[test]
    fn new_poll_rejects_bad_input() {
        let valid = NewPoll {
            title: "Dinner".into(),
            options: vec!["2022-03-14".into()],
            ..Default::default()
        };
        assert!(validate_new_poll(valid.clone()).is_ok());
        assert!(validate_new_poll(NewPoll {
            title: " ".into(),
            ..valid.clone()
        })
        .is_err());
        assert!(validate_new_poll(NewPoll {
            options: vec![],
            ..valid.clone()
        })
        .is_err());
        assert!(matches!(
            validate_new_poll(NewPoll {
                options: vec!["someday".into()],
                ..valid.clone()
            }),
            Err(Error::InvalidDateOption { .. })
        ));
        assert!(validate_new_poll(NewPoll {
            time_zone: Some("Nowhere/Land".into()),
            ..valid
        })
        .is_err());
    }
}

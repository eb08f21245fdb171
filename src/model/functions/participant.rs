use crate::model::types::*;
use sqlx::{PgConnection, PgPool};
use std::collections::HashSet;

/// Server-side check of a submitted ballot against the poll's option ids.
pub fn check_ballot(form: &BallotForm, option_ids: &HashSet<String>) -> Result<BallotForm, Error> {
    let form = form.normalized();
    if !form.name_is_valid() {
        return Err(Error::Validation("name is required".to_string()));
    }
    if let Some(unknown) = form.votes.iter().find(|id| !option_ids.contains(*id)) {
        return Err(Error::InvalidRequest(format!(
            "option {unknown} does not belong to this poll"
        )));
    }
    Ok(form)
}

/// Option ids of an open poll; closed polls do not take votes.
async fn open_poll_options(
    poll_id: &str,
    connection: &mut PgConnection,
) -> Result<HashSet<String>, Error> {
    let closed = sqlx::query_scalar::<_, bool>("SELECT closed FROM polls WHERE id = $1")
        .bind(poll_id)
        .fetch_optional(&mut *connection)
        .await?
        .ok_or_else(|| Error::NotFound(format!("poll {poll_id} does not exist")))?;
    if closed {
        return Err(Error::Forbidden(format!("poll {poll_id} is closed")));
    }

    let ids = sqlx::query_scalar::<_, String>("SELECT id FROM options WHERE poll_id = $1")
        .bind(poll_id)
        .fetch_all(&mut *connection)
        .await?;
    Ok(ids.into_iter().collect())
}

async fn insert_votes(
    poll_id: &str,
    participant_id: &str,
    option_ids: &[OptionId],
    connection: &mut PgConnection,
) -> Result<Vec<Vote>, Error> {
    let mut votes = Vec::with_capacity(option_ids.len());
    for option_id in option_ids {
        let vote = Vote {
            id: new_id(),
            option_id: option_id.clone(),
            participant_id: participant_id.to_string(),
        };
        sqlx::query(
            "INSERT INTO votes (id, poll_id, option_id, participant_id) VALUES ($1, $2, $3, $4)",
        )
        .bind(&vote.id)
        .bind(poll_id)
        .bind(&vote.option_id)
        .bind(&vote.participant_id)
        .execute(&mut *connection)
        .await?;
        votes.push(vote);
    }
    Ok(votes)
}

pub async fn add_participant(
    poll_id: &str,
    form: &BallotForm,
    user_id: Option<&str>,
    pool: &PgPool,
) -> Result<Participant, Error> {
    let mut transaction = pool.begin().await?;
    let option_ids = open_poll_options(poll_id, &mut *transaction).await?;
    let form = check_ballot(form, &option_ids)?;

    let participant_id = new_id();
    sqlx::query("INSERT INTO participants (id, poll_id, name, user_id) VALUES ($1, $2, $3, $4)")
        .bind(&participant_id)
        .bind(poll_id)
        .bind(&form.name)
        .bind(user_id)
        .execute(&mut *transaction)
        .await?;
    let votes = insert_votes(poll_id, &participant_id, &form.votes, &mut *transaction).await?;
    transaction.commit().await?;

    tracing::info!(%poll_id, %participant_id, votes = votes.len(), "participant added");
    Ok(Participant {
        id: participant_id,
        name: form.name,
        votes,
    })
}

/// Replaces name and votes of a participant; the latest save wins.
pub async fn update_participant(
    poll_id: &str,
    participant_id: &str,
    form: &BallotForm,
    pool: &PgPool,
) -> Result<Participant, Error> {
    let mut transaction = pool.begin().await?;
    let option_ids = open_poll_options(poll_id, &mut *transaction).await?;
    let form = check_ballot(form, &option_ids)?;

    let result = sqlx::query("UPDATE participants SET name = $1 WHERE id = $2 AND poll_id = $3")
        .bind(&form.name)
        .bind(participant_id)
        .bind(poll_id)
        .execute(&mut *transaction)
        .await?;
    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!(
            "participant {participant_id} is not part of poll {poll_id}"
        )));
    }

    sqlx::query("DELETE FROM votes WHERE participant_id = $1")
        .bind(participant_id)
        .execute(&mut *transaction)
        .await?;
    let votes = insert_votes(poll_id, participant_id, &form.votes, &mut *transaction).await?;
    transaction.commit().await?;

    tracing::info!(%poll_id, %participant_id, votes = votes.len(), "participant updated");
    Ok(Participant {
        id: participant_id.to_string(),
        name: form.name,
        votes,
    })
}

/// Deletes a participant of the poll behind `admin_url_id`.
pub async fn delete_participant(
    admin_url_id: &str,
    participant_id: &str,
    pool: &PgPool,
) -> Result<(), Error> {
    let result = sqlx::query(
        "DELETE FROM participants
         WHERE id = $1 AND poll_id = (SELECT id FROM polls WHERE admin_url_id = $2 AND NOT closed)",
    )
    .bind(participant_id)
    .bind(admin_url_id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!(
            "participant {participant_id} does not exist in an open poll you manage"
        )));
    }
    tracing::info!(%participant_id, "participant deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> HashSet<String> {
        ["o1", "o2"].iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn accepts_known_options() {
        let form = BallotForm::new(" Ana", vec!["o2".into(), "o2".into()]);
        let checked = check_ballot(&form, &options()).unwrap();
        assert_eq!(checked, BallotForm::new("Ana", vec!["o2".into()]));
    }

    #[test]
    fn rejects_unknown_options_and_blank_names() {
        let unknown = BallotForm::new("Ana", vec!["o1".into(), "o5".into()]);
        assert!(matches!(
            check_ballot(&unknown, &options()),
            Err(Error::InvalidRequest(_))
        ));
        let blank = BallotForm::new("", vec![]);
        assert!(matches!(
            check_ballot(&blank, &options()),
            Err(Error::Validation(_))
        ));
    }
}

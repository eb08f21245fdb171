use crate::model::types::*;

/// What the poll page shows for the state of its fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollView<'a> {
    Loading,
    Loaded(&'a Poll),
    NotFound,
}

/// Any failed fetch shows the not-found page, there is no retry.
pub fn poll_view<E>(fetched: Option<&Result<Poll, E>>) -> PollView<'_> {
    match fetched {
        None => PollView::Loading,
        Some(Ok(poll)) => PollView::Loaded(poll),
        Some(Err(_)) => PollView::NotFound,
    }
}

pub fn is_admin_path(path: &str) -> bool {
    path.starts_with("/admin")
}

pub fn invite_path(participant_url_id: &str) -> String {
    format!("/invite/{}", participant_url_id)
}

pub fn admin_path(admin_url_id: &str) -> String {
    format!("/admin/{}", admin_url_id)
}

pub fn manage_path(poll_id: &str) -> String {
    format!("/poll/{}", poll_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::poll::fixtures::poll;

    #[test]
    fn fetch_states_map_to_views() {
        let poll = poll(&[]);
        assert_eq!(poll_view::<Error>(None), PollView::Loading);
        let loaded: Result<Poll, Error> = Ok(poll.clone());
        assert_eq!(poll_view(Some(&loaded)), PollView::Loaded(&poll));
        let missing: Result<Poll, Error> = Err(Error::NotFound("poll".into()));
        assert_eq!(poll_view(Some(&missing)), PollView::NotFound);
        let failed: Result<Poll, Error> = Err(Error::Database("down".into()));
        assert_eq!(poll_view(Some(&failed)), PollView::NotFound);
    }

    #[test]
    fn admin_paths() {
        assert!(is_admin_path("/admin/abc"));
        assert!(!is_admin_path("/invite/abc"));
        assert_eq!(admin_path("abc"), "/admin/abc");
        assert_eq!(invite_path("xyz"), "/invite/xyz");
        assert_eq!(manage_path("p1"), "/poll/p1");
    }
}

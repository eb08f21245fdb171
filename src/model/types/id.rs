/// Primary key for any stored row.
pub fn new_id() -> String {
    cuid2::create_id()
}

/// Ids that end up in shareable links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlIds {
    pub participant: String,
    pub admin: String,
}

impl UrlIds {
    pub fn generate() -> Self {
        let participant = cuid2::create_id();
        let mut admin = cuid2::create_id();
        while admin == participant {
            admin = cuid2::create_id();
        }
        Self { participant, admin }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_ids_are_distinct() {
        let ids = UrlIds::generate();
        assert_ne!(ids.participant, ids.admin);
        assert!(!new_id().is_empty());
    }
}

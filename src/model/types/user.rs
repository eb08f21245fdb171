use serde::{Deserialize, Serialize};

/// Browser-local identity of the person looking at a page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn generate() -> Self {
        Self::new(cuid2::create_id())
    }
}

/// Anything created by a user.
pub trait Owned {
    fn owner_id(&self) -> &str;
}

impl Owned for super::Poll {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

pub fn owns_object(user: Option<&User>, object: &impl Owned) -> bool {
    user.is_some_and(|user| !user.id.is_empty() && user.id == object.owner_id())
}

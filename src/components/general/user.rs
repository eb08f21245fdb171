use crate::model::User;
use gloo::storage::{LocalStorage, Storage};
use leptos::{logging::*, prelude::*, task::spawn_local};

const USER_ID_KEY: &str = "user_id";
const USER_NAME_KEY: &str = "user_name";

/// Identity of the browser and the name it last voted with.
#[derive(Clone, Copy)]
pub struct UserContext {
    pub user: ReadSignal<Option<User>>,
    pub name: RwSignal<String>,
}

impl UserContext {
    /// Remembers the name used for the last ballot, an empty name forgets it.
    pub fn set_name(&self, name: String) {
        let stored = if name.is_empty() {
            LocalStorage::delete(USER_NAME_KEY);
            Ok(())
        } else {
            LocalStorage::set(USER_NAME_KEY, &name)
        };
        if let Err(e) = stored {
            warn!("could not store user name: {}", e);
        }
        self.name.set(name);
    }

    pub fn user_id(&self) -> Option<String> {
        self.user.with_untracked(|user| user.as_ref().map(|user| user.id.clone()))
    }
}

#[server]
async fn new_user_id() -> Result<String, ServerFnError> {
    Ok(User::generate().id)
}

fn store_user_id(set_user: WriteSignal<Option<User>>) {
    match LocalStorage::get::<String>(USER_ID_KEY) {
        Ok(id) if !id.is_empty() => set_user.set(Some(User::new(id))),
        _ => spawn_local(async move {
            match new_user_id().await {
                Ok(id) => {
                    if let Err(e) = LocalStorage::set(USER_ID_KEY, &id) {
                        warn!("could not store user id: {}", e);
                    }
                    set_user.set(Some(User::new(id)));
                }
                Err(e) => error!("could not create a user id: {}", e),
            }
        }),
    }
}

/// Loads the user in the browser and makes it available to every page.
pub fn provide_user_context() {
    let (user, set_user) = signal(None::<User>);
    let name = RwSignal::new(String::new());

    Effect::new(move |_| {
        store_user_id(set_user);
        name.set(LocalStorage::get::<String>(USER_NAME_KEY).unwrap_or_default());
    });
    provide_context(UserContext { user, name });
}

pub fn use_user() -> UserContext {
    expect_context::<UserContext>()
}

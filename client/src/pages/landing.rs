//! Landing page.

use serde::Serialize;

use crate::net::types::User;
use crate::routing::routes::{LOG_IN_PATH, SIGN_UP_PATH};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Landing {
    pub user: Option<User>,
}

impl Landing {
    /// Paths offered from the landing page: the user's dashboard when logged
    /// in, sign-up and log-in otherwise.
    #[must_use]
    pub fn links(&self) -> Vec<&'static str> {
        match &self.user {
            Some(user) => vec![user.group.home_path()],
            None => vec![SIGN_UP_PATH, LOG_IN_PATH],
        }
    }
}

//! Sign-up page action.

use crate::app::App;
use crate::error::ActionError;
use crate::net::types::{SignUpForm, User};
use crate::routing::routes::LOG_IN_PATH;

/// Create the account, then send the user to the log-in page.
///
/// # Errors
///
/// Returns the sign-up error without navigating, or the navigation error.
pub async fn submit(app: &mut App, form: &SignUpForm) -> Result<User, ActionError> {
    let user = app.auth().sign_up(form).await?;
    app.navigate(LOG_IN_PATH).await?;
    Ok(user)
}

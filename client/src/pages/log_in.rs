//! Log-in page action.

use crate::app::App;
use crate::error::ActionError;
use crate::net::types::{LogInCredentials, User};
use crate::routing::routes::LANDING_PATH;

/// Log in, then return to the landing page.
///
/// # Errors
///
/// Returns the log-in error without navigating, or the navigation error.
pub async fn submit(app: &mut App, credentials: &LogInCredentials) -> Result<User, ActionError> {
    let user = app.auth().log_in(credentials).await?;
    app.navigate(LANDING_PATH).await?;
    Ok(user)
}

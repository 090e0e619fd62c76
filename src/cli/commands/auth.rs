use crate::cli::error::CliResult;
use crate::config::ConfigStore;
use crate::remote::FlowApi;

/// Request a magic link for the given email.
pub async fn login<A: FlowApi + Sync>(api: &A, email: &str) -> CliResult<String> {
    api.send_magic_link(email).await?;
    Ok(format!(
        "✓ Magic link sent to {}. Open it, copy the token and run 'flowstate auth token <token>'.",
        email
    ))
}

/// Store an API token, verifying it against the service first.
///
/// The caller builds `api` with the candidate token already applied; the
/// token is only persisted once the account lookup succeeds.
pub async fn token<A: FlowApi + Sync>(
    store: &ConfigStore,
    api: &A,
    token: &str,
) -> CliResult<String> {
    let user = api.get_current_user().await?;

    let mut settings = store.load();
    settings.auth_token = Some(token.to_string());
    store.save(&settings)?;

    Ok(format!("✓ Logged in as {}", user.username))
}

/// Drop the stored token.
pub fn logout(store: &ConfigStore) -> CliResult<String> {
    let mut settings = store.load();
    if settings.auth_token.take().is_none() {
        return Ok("Not logged in.".to_string());
    }
    store.save(&settings)?;
    Ok("✓ Logged out".to_string())
}

use std::future::Future;

use log::{info, warn};
use reqwest::Client;
use url::Url;

use crate::utils::portal::{self, PortalError};

// Credentials are taken from the environment, which `.env` is loaded into.
const USERNAME_VAR: &str = "THI_USERNAME";
const PASSWORD_VAR: &str = "THI_PASSWORD";

/// Runs `fetch` with an authenticated session.
///
/// Opens the session first, so the fetch can rely on the session cookie
/// sitting on the client's jar. Fails with [`PortalError::NoSession`] when no
/// session can be opened (missing credentials included), which callers treat
/// as "go through the login flow again". Every other failure passes through
/// untouched.
pub async fn call_with_session<T, F, Fut>(
    client: &Client,
    base: &Url,
    fetch: F,
) -> Result<T, PortalError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, PortalError>>,
{
    let (username, password) = credentials()?;
    portal::login(client, base, &username, &password).await?;
    info!("Session opened for {}", username);
    fetch().await
}

fn credentials() -> Result<(String, String), PortalError> {
    match (std::env::var(USERNAME_VAR), std::env::var(PASSWORD_VAR)) {
        (Ok(username), Ok(password)) => Ok((username, password)),
        _ => {
            warn!("{} and {} must be set to open a session", USERNAME_VAR, PASSWORD_VAR);
            Err(PortalError::NoSession)
        }
    }
}

use anyhow::Context;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::models::Grade;

// Production webservice of the portal. Every method goes through this one
// endpoint as a form POST.
const WEBSERVICE_URL: &str = "https://hiplan.thi.de/webservice/production2/index.php";

// Replies the webservice uses for a dead or missing session.
const NO_SESSION_REPLIES: [&str; 2] = ["No Session", "Session is invalid"];

// Reply while the transcripts are being rebuilt upstream; comes back as
// `{ "status": -102, "data": "Query not possible" }` and goes away on its own.
const QUERY_NOT_POSSIBLE: &str = "Query not possible";

/// Everything that can go wrong between this client and the webservice.
#[derive(Debug, Error)]
pub enum PortalError {
    /// There is no usable session and none could be opened.
    #[error("no valid portal session")]
    NoSession,
    /// The transcripts are being rebuilt; transient, never retried.
    #[error("grades are temporarily unavailable (Query not possible)")]
    GradesUnavailable,
    /// Any other webservice reply with a non-zero status.
    #[error("portal request failed with status {status}: {message}")]
    Api { status: i64, message: String },
    /// Transport-level failure.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The reply's payload did not decode into grade records.
    #[error("unexpected portal payload: {0}")]
    Decode(#[from] serde_json::Error),
}

// Envelope every webservice method answers with. On success the payload sits
// under `data`; on failure `data` carries the message.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: i64,
    #[serde(default)]
    data: serde_json::Value,
}

fn unwrap_envelope(envelope: Envelope) -> Result<serde_json::Value, PortalError> {
    if envelope.status == 0 {
        return Ok(envelope.data);
    }
    let message = match envelope.data.as_str() {
        Some(text) => text.to_string(),
        None => envelope.data.to_string(),
    };
    if NO_SESSION_REPLIES.contains(&message.as_str()) {
        return Err(PortalError::NoSession);
    }
    if message == QUERY_NOT_POSSIBLE {
        return Err(PortalError::GradesUnavailable);
    }
    Err(PortalError::Api {
        status: envelope.status,
        message,
    })
}

// The session id rides on the cookie jar, so one client is shared between
// login and the calls after it.
pub fn build_client() -> anyhow::Result<Client> {
    Client::builder()
        .cookie_store(true)
        .build()
        .context("Failed to build the client")
}

// Endpoint to talk to; `THI_WEBSERVICE_URL` overrides the production one.
pub fn webservice_url() -> anyhow::Result<Url> {
    match std::env::var("THI_WEBSERVICE_URL") {
        Ok(raw) => Url::parse(&raw).context("THI_WEBSERVICE_URL is not a valid URL"),
        Err(_) => Ok(Url::parse(WEBSERVICE_URL).expect("production webservice URL parses")),
    }
}

// Opens a session for the given account. The portal sets the session cookie
// on success and answers the usual envelope.
pub async fn login(
    client: &Client,
    base: &Url,
    username: &str,
    password: &str,
) -> Result<(), PortalError> {
    let form = [
        ("method", "open"),
        ("format", "json"),
        ("username", username),
        ("passwd", password),
    ];

    let response = client.post(base.clone()).form(&form).send().await?;
    if !response.status().is_success() {
        return Err(PortalError::NoSession);
    }

    let envelope: Envelope = response.json().await?;
    // Whatever reason the portal gives for refusing the login, the caller
    // ends up without a session.
    if unwrap_envelope(envelope).is_err() {
        return Err(PortalError::NoSession);
    }
    Ok(())
}

// Fetches the raw grade sheet for the logged-in account.
pub async fn retrieve_grades(client: &Client, base: &Url) -> Result<Vec<Grade>, PortalError> {
    let form = [("method", "grades"), ("format", "json")];

    let response = client
        .post(base.clone())
        .form(&form)
        .send()
        .await?
        .error_for_status()?;

    let envelope: Envelope = response.json().await?;
    let data = unwrap_envelope(envelope)?;
    Ok(serde_json::from_value(data)?)
}

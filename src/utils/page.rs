use std::future::Future;
use std::io::Write;

use log::{error, info};

use crate::models::Grade;
use crate::utils::grades::classify_grades;
use crate::utils::portal::PortalError;
use crate::utils::render::{self, Notify};

/// Shown when the portal answers its "Query not possible" sentinel.
pub const GRADES_UNAVAILABLE_NOTICE: &str =
    "Noten sind vorübergehend nicht verfügbar. Eventuell werden die Notenblätter gerade aktualisiert.";

/// Runs the page once: resolve the fetch, classify, print.
///
/// Failures do not bubble out of here. They land on the log and, where the
/// user has to act, on `notify`; nothing is retried.
pub async fn show<Fut, W, N>(fetch: Fut, out: &mut W, notify: &mut N)
where
    Fut: Future<Output = Result<Vec<Grade>, PortalError>>,
    W: Write,
    N: Notify,
{
    match fetch.await {
        Ok(list) => {
            info!("Grades retrieved successfully");
            let (finished, outstanding) = classify_grades(list);
            let page = render::grades_page(Some(&finished), Some(&outstanding));
            if let Err(e) = write!(out, "{}", page) {
                error!("Error writing the page: {}", e);
            }
        }
        Err(PortalError::NoSession) => {
            info!("No session, sending the user back through the login flow");
            notify.request_login();
        }
        Err(err @ PortalError::GradesUnavailable) => {
            error!("Error retrieving grades: {}", err);
            notify.alert(GRADES_UNAVAILABLE_NOTICE);
        }
        Err(err) => {
            error!("Error retrieving grades: {}", err);
            notify.alert(&err.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingNotify {
        alerts: Vec<String>,
        login_requests: usize,
    }

    impl Notify for RecordingNotify {
        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }

        fn request_login(&mut self) {
            self.login_requests += 1;
        }
    }

    fn grade(titel: &str, note: &str) -> Grade {
        Grade {
            titel: titel.to_string(),
            note: note.to_string(),
            ects: Some(5.0),
            anrech: String::new(),
            stg: "IF".to_string(),
            frist: None,
        }
    }

    #[tokio::test]
    async fn success_renders_both_lists_and_stays_quiet() {
        let mut out = Vec::new();
        let mut notify = RecordingNotify::default();
        let rows = vec![grade("Analysis", "1,7"), grade("Projektarbeit", "")];

        show(async { Ok(rows) }, &mut out, &mut notify).await;

        let page = String::from_utf8(out).unwrap();
        assert!(page.contains("Analysis"));
        assert!(page.contains("Projektarbeit"));
        assert!(notify.alerts.is_empty());
        assert_eq!(notify.login_requests, 0);
    }

    #[tokio::test]
    async fn no_session_requests_the_login_flow() {
        let mut out = Vec::new();
        let mut notify = RecordingNotify::default();

        show(async { Err(PortalError::NoSession) }, &mut out, &mut notify).await;

        assert!(out.is_empty());
        assert!(notify.alerts.is_empty());
        assert_eq!(notify.login_requests, 1);
    }

    #[tokio::test]
    async fn unavailable_grades_alert_the_fixed_notice() {
        let mut out = Vec::new();
        let mut notify = RecordingNotify::default();

        show(
            async { Err(PortalError::GradesUnavailable) },
            &mut out,
            &mut notify,
        )
        .await;

        assert!(out.is_empty());
        assert_eq!(notify.alerts, [GRADES_UNAVAILABLE_NOTICE]);
        assert_eq!(notify.login_requests, 0);
    }

    struct ClosedOut;

    impl Write for ClosedOut {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "stdout closed",
            ))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn failed_page_write_stays_on_the_log_channel() {
        let mut out = ClosedOut;
        let mut notify = RecordingNotify::default();

        show(
            async { Ok(vec![grade("Analysis", "1,7")]) },
            &mut out,
            &mut notify,
        )
        .await;

        // The write failure must not panic and must not surface as a user
        // notification; it belongs on the log.
        assert!(notify.alerts.is_empty());
        assert_eq!(notify.login_requests, 0);
    }

    #[tokio::test]
    async fn other_errors_alert_their_own_message() {
        let mut out = Vec::new();
        let mut notify = RecordingNotify::default();
        let err = PortalError::Api {
            status: -34,
            message: "Wrong credentials".to_string(),
        };

        show(async { Err(err) }, &mut out, &mut notify).await;

        assert_eq!(notify.alerts.len(), 1);
        assert!(notify.alerts[0].contains("status -34"));
        assert!(notify.alerts[0].contains("Wrong credentials"));
        assert_eq!(notify.login_requests, 0);
    }
}

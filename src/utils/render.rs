use crate::models::Grade;

const PAGE_TITLE: &str = "Noten & Fächer";
const FINISHED_HEADING: &str = "Noten";
const OUTSTANDING_HEADING: &str = "Ausstehende Fächer";
const PLACEHOLDER: &str = "  … wird geladen";
const NONE_LABEL: &str = "(keine)";

/// Channel for messages the user has to see.
///
/// The terminal in production; tests swap in a recorder.
pub trait Notify {
    /// An error the user should read (the alert box of the portal page).
    fn alert(&mut self, message: &str);
    /// The session is gone and the user has to log in again. Deliberately
    /// not an alert: an expired session is routine, not an error.
    fn request_login(&mut self);
}

pub struct TerminalNotify;

impl Notify for TerminalNotify {
    fn alert(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn request_login(&mut self) {
        println!(
            "Keine gültige Sitzung. Bitte THI_USERNAME und THI_PASSWORD setzen (z.B. in .env) und erneut starten."
        );
    }
}

/// Renders the whole page.
///
/// `None` stands for a list the fetch has not filled in yet and renders the
/// loading placeholder for that section.
pub fn grades_page(finished: Option<&[Grade]>, outstanding: Option<&[Grade]>) -> String {
    let mut page = String::new();
    page.push_str(PAGE_TITLE);
    page.push_str("\n\n");
    push_section(&mut page, FINISHED_HEADING, finished, finished_item);
    push_section(&mut page, OUTSTANDING_HEADING, outstanding, outstanding_item);
    page
}

fn push_section(
    page: &mut String,
    heading: &str,
    grades: Option<&[Grade]>,
    item: fn(&Grade) -> String,
) {
    page.push_str(heading);
    page.push_str("\n\n");
    match grades {
        Some(list) => {
            for grade in list {
                page.push_str(&item(grade));
                page.push('\n');
            }
        }
        None => {
            page.push_str(PLACEHOLDER);
            page.push_str("\n\n");
        }
    }
}

fn finished_item(grade: &Grade) -> String {
    format!(
        "  {} ({})\n    Note: {}\n    ECTS: {}\n",
        grade.titel,
        grade.stg,
        soften_note(&grade.note),
        ects_label(grade)
    )
}

fn outstanding_item(grade: &Grade) -> String {
    format!(
        "  {} ({})\n    Frist: {}\n    ECTS: {}\n",
        grade.titel,
        grade.stg,
        frist_label(grade),
        ects_label(grade)
    )
}

// The transcript marks recognized courses with a bare `*`; spell it out for
// the reader. Render-time only, classification sees the raw note.
fn soften_note(note: &str) -> String {
    note.replace('*', " (angerechnet)")
}

fn ects_label(grade: &Grade) -> String {
    match grade.ects {
        Some(ects) if ects != 0.0 => ects.to_string(),
        _ => NONE_LABEL.to_string(),
    }
}

fn frist_label(grade: &Grade) -> &str {
    match grade.frist.as_deref() {
        Some(frist) if !frist.is_empty() => frist,
        _ => NONE_LABEL,
    }
}

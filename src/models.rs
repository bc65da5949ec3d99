use serde::Deserialize;

/// One row of the grade sheet as the webservice returns it.
///
/// Field names follow the portal's JSON, hence the German.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Grade {
    /// Course title.
    pub titel: String,
    /// Grade as printed on the transcript; empty while ungraded.
    #[serde(default)]
    pub note: String,
    /// Credit points; missing or zero means none were booked.
    #[serde(default)]
    pub ects: Option<f64>,
    /// `"*"` when the course was recognized from outside, empty otherwise.
    #[serde(default)]
    pub anrech: String,
    /// Program of study the row belongs to.
    #[serde(default)]
    pub stg: String,
    /// Deadline for courses that still have to be taken.
    #[serde(default)]
    pub frist: Option<String>,
}

impl Grade {
    // Zero counts the same as absent, the portal sends both for "no credits".
    pub fn has_ects(&self) -> bool {
        self.ects.is_some_and(|ects| ects != 0.0)
    }
}

use crate::models::Grade;

/// Splits the raw grade sheet into finished and outstanding courses.
///
/// The same course can show up more than once, e.g. as a recognized credit
/// and again as a graded attempt, so the list is deduplicated by title
/// before it is partitioned.
pub fn classify_grades(mut grades: Vec<Grade>) -> (Vec<Grade>, Vec<Grade>) {
    // Recognized courses come back without a grade; mark them.
    for grade in &mut grades {
        if grade.anrech == "*" && grade.note.is_empty() {
            grade.note = "E*".to_string();
        }
    }

    // A row survives when it carries ECTS or its title shows up nowhere else
    // in the full list. Rows with ECTS always stay, even when that leaves the
    // same title twice; the portal books those separately on purpose.
    let deduplicated: Vec<Grade> = grades
        .iter()
        .enumerate()
        .filter(|(i, grade)| {
            grade.has_ects()
                || !grades
                    .iter()
                    .enumerate()
                    .any(|(j, other)| *i != j && grade.titel.trim() == other.titel.trim())
        })
        .map(|(_, grade)| grade.clone())
        .collect();

    let finished: Vec<Grade> = deduplicated
        .iter()
        .filter(|grade| !grade.note.is_empty())
        .cloned()
        .collect();

    // Not the complement of `finished`: a title that already got a grade
    // through one row must not show up as outstanding through another.
    let outstanding: Vec<Grade> = deduplicated
        .into_iter()
        .filter(|grade| {
            !finished
                .iter()
                .any(|done| done.titel.trim() == grade.titel.trim())
        })
        .collect();

    (finished, outstanding)
}

//! Trailing-slash exceptions.
//!
//! The upstream API only routes two endpoint families when the path ends in
//! `/`. Everything else is relayed exactly as received.
//!
//! # Design Decisions
//! - Two independent predicates, each anchored at the end of the path
//! - Segment comparison instead of regex (same O(n) guarantee as prefix matching)
//! - Normalization is idempotent: a path that already ends in `/` never matches

/// Matches `.../extensionists/<digits>/(summary|export-excel)`.
pub fn is_extensionist_report(path: &str) -> bool {
    let mut segments = path.rsplitn(4, '/');
    let (Some(action), Some(id), Some(resource), Some(_)) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return false;
    };

    matches!(action, "summary" | "export-excel") && is_digits(id) && resource == "extensionists"
}

/// Matches `.../admin/surveys/<digits>/<digits>/state`.
pub fn is_survey_state_transition(path: &str) -> bool {
    let segments: Vec<&str> = path.rsplitn(6, '/').collect();
    match segments.as_slice() {
        ["state", survey_id, kind, "surveys", "admin", _] => is_digits(survey_id) && is_digits(kind),
        _ => false,
    }
}

/// Append `/` to paths the upstream only routes with a trailing slash.
pub fn normalize_trailing_slash(path: &str) -> String {
    if is_extensionist_report(path) || is_survey_state_transition(path) {
        format!("{}/", path)
    } else {
        path.to_string()
    }
}

fn is_digits(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

//! Experience-years comparison

/// Three-tier experience score in `[0, 100]`.
///
/// Meeting the requirement (or no requirement at all) is full credit, being
/// within 30% of it is a flat 70, anything further short scales linearly
/// below 50.
pub fn experience_score(candidate_years: u32, required_years: u32) -> f64 {
    if required_years == 0 || candidate_years >= required_years {
        return 100.0;
    }

    let candidate = candidate_years as f64;
    let required = required_years as f64;

    if candidate >= required * 0.7 {
        70.0
    } else {
        candidate / required * 50.0
    }
}

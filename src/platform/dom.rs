//! DOM helpers that do not need a browser

/// `classes` (a space-separated class attribute) with `class` present or
/// absent, leaving every other class in place
pub fn with_class(classes: &str, class: &str, present: bool) -> String {
    let mut kept: Vec<&str> = classes
        .split_whitespace()
        .filter(|c| *c != class)
        .collect();
    if present {
        kept.push(class);
    }
    kept.join(" ")
}

/// Filters raw amount keystrokes down to digits and a single decimal point.
///
/// Applied while the user types; anything else, including a second `.`, is dropped.
pub fn filter_amount_input(raw: &str) -> String {
    let mut seen_point = false;

    raw.chars()
        .filter(|character| match character {
            '0'..='9' => true,
            '.' if !seen_point => {
                seen_point = true;
                true
            }
            _ => false
        })
        .collect()
}

/// Uppercases the first character of a title for display.
pub fn capitalize_first(raw: &str) -> String {
    let mut characters = raw.chars();

    match characters.next() {
        Some(first) => first.to_uppercase().chain(characters).collect(),
        None => String::new()
    }
}

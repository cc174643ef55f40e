//! The narrow percent-escaper the search API expects.
//!
//! Only five characters are rewritten; `&`, `=`, `?` and `$` pass through
//! because the serializer emits them as URL structure.

const SUBSTITUTIONS: [(char, &str); 5] = [
    ('\'', "%27"),
    ('"', "%27"),
    ('+', "%2b"),
    (' ', "%20"),
    (':', "%3a"),
];

/// Escape a fully assembled parameter string.
///
/// Replacement text never contains a character from the table, so one pass
/// yields the same output as applying the substitutions one after another.
///
/// ```
/// use bing_search::escape_query;
///
/// assert_eq!(escape_query("?Query='hello world'"), "?Query=%27hello%20world%27");
/// assert_eq!(escape_query("Size:Large+Aspect:Wide"), "Size%3aLarge%2bAspect%3aWide");
/// ```
pub fn escape_query(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 4);
    for ch in raw.chars() {
        match SUBSTITUTIONS.iter().find(|(c, _)| *c == ch) {
            Some((_, replacement)) => out.push_str(replacement),
            None => out.push(ch),
        }
    }
    out
}

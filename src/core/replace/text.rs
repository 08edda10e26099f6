use super::ReplaceResult;

/// Replace every non-overlapping occurrence of `old` in `text` with `new`,
/// ignoring ASCII case.
///
/// Matching runs against lowercased copies, but untouched spans are copied from
/// the original `text` and `new` is inserted verbatim. Occurrences are consumed
/// leftmost-first. ASCII lowercasing keeps byte lengths, so offsets found in the
/// lowered copy are valid in the original.
///
/// An empty `old` matches nothing.
pub fn replace_case_insensitive(text: &str, old: &str, new: &str) -> ReplaceResult {
    if old.is_empty() {
        return ReplaceResult {
            text: text.to_string(),
            count: 0,
        };
    }

    let lower_text = text.to_ascii_lowercase();
    let lower_old = old.to_ascii_lowercase();

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut count = 0;

    while let Some(pos) = lower_text[cursor..].find(&lower_old) {
        let start = cursor + pos;
        out.push_str(&text[cursor..start]);
        out.push_str(new);
        cursor = start + old.len();
        count += 1;
    }
    out.push_str(&text[cursor..]);

    ReplaceResult { text: out, count }
}

/// Cheap pre-check used before attempting a rename.
pub fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    !needle.is_empty()
        && haystack
            .to_ascii_lowercase()
            .contains(&needle.to_ascii_lowercase())
}

//! Fuzzy matching for list filtering.

/// Check whether `query` matches `text`.
///
/// Both inputs are expected to be lower-cased already. A match is either a
/// contiguous substring or, failing that, the query's characters appearing in
/// `text` in order with arbitrary gaps. The gap rule is deliberately loose:
/// `"abc"` matches `"xaxbxc"`, and short queries match a lot of unrelated
/// entries.
pub fn matches(text: &str, query: &str) -> bool {
    if text.contains(query) {
        return true;
    }

    let mut pending = query.chars().peekable();
    for c in text.chars() {
        match pending.peek() {
            Some(&q) if q == c => {
                pending.next();
            }
            Some(_) => {}
            None => break,
        }
    }

    pending.peek().is_none()
}

//! HTML entity unescaping for script text.
//!
//! Only the three entities an HTML host escapes when embedding code are
//! recognized: `&lt;`, `&gt;` and `&amp;`. Anything else is left as is.

const ENTITIES: &[(&str, char)] = &[("&lt;", '<'), ("&gt;", '>'), ("&amp;", '&')];

/// Replace `&lt;`, `&gt;` and `&amp;` with their literal characters.
///
/// Replacement is a single left-to-right pass, so `&amp;lt;` becomes `&lt;`
/// rather than `<`.
pub fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        result.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        match ENTITIES
            .iter()
            .find(|(entity, _)| tail.starts_with(entity))
        {
            Some((entity, ch)) => {
                result.push(*ch);
                rest = &tail[entity.len()..];
            }
            None => {
                result.push('&');
                rest = &tail[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

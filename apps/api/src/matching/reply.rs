//! Isolates the JSON-boundary scan over free-form model text so it can be
//! unit-tested with literal reply strings.

/// Returns the substring between the first `{` and the last `}`, inclusive.
/// `None` when no such pair exists — including a lone brace or a `}` that
/// precedes every `{`.
pub fn json_object_slice(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&reply[start..=end])
}

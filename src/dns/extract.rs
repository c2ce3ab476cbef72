//! Payload extraction from raw TXT answer strings.

/// Extracts the first quoted segment of a TXT answer.
///
/// Resolvers and zone files commonly render TXT data as one or more
/// quoted character-strings. When the answer contains a complete quoted
/// segment, its content is the payload. An answer with no complete quoted
/// segment is returned whole so an unparseable record is surfaced to the
/// user rather than dropped.
pub fn quoted_payload(answer: &str) -> String {
    if let Some(open) = answer.find('"') {
        let rest = &answer[open + 1..];
        if let Some(close) = rest.find('"') {
            return rest[..close].to_string();
        }
    }
    answer.to_string()
}

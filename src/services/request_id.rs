use uuid::Uuid;

/// Identifier attached to one listing request in the logs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Creates a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Span wrapping one listing request
///
/// `sequence` is the supersede token of the request, so a stale response can be
/// matched to the request that was overtaken.
pub fn make_span_with_request_id(
    request_id: &RequestId,
    listing: &'static str,
    page: u32,
    sequence: u64,
) -> tracing::Span {
    tracing::info_span!(
        "list_request",
        listing = listing,
        page = page,
        sequence = sequence,
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
    }

    #[test]
    fn test_display_is_hyphenated_uuid() {
        let id = RequestId::new();
        assert_eq!(id.to_string(), id.0.to_string());
        assert_eq!(id.to_string().len(), 36);
    }
}

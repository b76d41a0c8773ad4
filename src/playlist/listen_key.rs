//! Per-user listen key

use std::fmt;

/// Secret listen key appended to every stream URL as its query string
///
/// The key is substituted verbatim and never validated. `Debug` is redacted
/// and there is no `Display` impl, so it cannot end up in a log line by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct ListenKey(String);

impl ListenKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Raw key, for URL construction only
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ListenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ListenKey(<redacted>)")
    }
}

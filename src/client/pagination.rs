//! Pagination guards for cursor-based query responses
//!
//! The queries endpoint hands back an opaque `next_page_token`. The backend has been
//! observed echoing the same token forever, so callers pair the fetch loop with
//! [`StuckTokenDetector`] and a hard [`MAX_PAGES`] ceiling.

/// Upper bound on page fetches for a single query.
pub const MAX_PAGES: usize = 1000;

/// Consecutive repeats of one token after which pagination is considered stalled.
pub const STUCK_TOKEN_REPEATS: usize = 3;

/// Tracks consecutive identical page tokens.
///
/// Create one per query run and feed it every `next_page_token`, including absent ones.
#[derive(Debug, Default)]
pub struct StuckTokenDetector {
    previous: Option<String>,
    repeats: usize,
}

impl StuckTokenDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the token returned by the latest fetch.
    ///
    /// Returns `true` once the same non-empty token has been repeated
    /// [`STUCK_TOKEN_REPEATS`] times in a row.
    pub fn observe(&mut self, token: Option<&str>) -> bool {
        let repeated = match (self.previous.as_deref(), token) {
            (Some(prev), Some(next)) => !prev.is_empty() && prev == next,
            _ => false,
        };

        if repeated {
            self.repeats += 1;
        } else {
            self.repeats = 0;
        }
        self.previous = token.map(str::to_string);

        self.is_stuck()
    }

    pub fn is_stuck(&self) -> bool {
        self.repeats >= STUCK_TOKEN_REPEATS
    }

    /// Number of consecutive repeats seen so far
    pub fn repeats(&self) -> usize {
        self.repeats
    }
}

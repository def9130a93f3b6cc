//! Ordered fallback chains.
//!
//! A chain is a list of strategies tried in order; the first one to produce a
//! value wins and the rest are never consulted.

/// Runs `attempt` over `strategies` in order and returns the first `Some`.
pub fn first_success<S, O, F>(strategies: impl IntoIterator<Item = S>, mut attempt: F) -> Option<O>
where
    F: FnMut(S) -> Option<O>,
{
    for strategy in strategies {
        if let Some(output) = attempt(strategy) {
            return Some(output);
        }
    }
    None
}

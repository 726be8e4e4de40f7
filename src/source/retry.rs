pub const DEFAULT_MAX_RETRIES: u32 = 3;
const BACKOFF_SECONDS: &[u64] = &[1, 2, 4];

/// Wait before retry number `attempt` (0-based). Clamps to the last step.
pub fn backoff_secs(attempt: u32) -> u64 {
    BACKOFF_SECONDS
        .get(attempt as usize)
        .copied()
        .unwrap_or(BACKOFF_SECONDS[BACKOFF_SECONDS.len() - 1])
}

/// Retry a Sheets call expression on transient errors (429 and 5xx)
/// with bounded backoff. Anything else is returned immediately.
///
/// Usage: `retry_transient!(max_retries, client.get_json(url, token))`
///
/// The expression is re-evaluated on each attempt; a macro because async
/// closures that return borrowed futures can't satisfy `Fn`.
macro_rules! retry_transient {
    ($max:expr, $expr:expr) => {{
        let max_retries: u32 = $max;
        let mut _attempt: u32 = 0;
        loop {
            match $expr.await {
                Ok(val) => break Ok::<_, $crate::error::Error>(val),
                Err(e) => {
                    if e.is_transient() && _attempt < max_retries {
                        let wait = $crate::source::retry::backoff_secs(_attempt);
                        log::warn!(
                            "{e}. Waiting {wait}s before retry {}/{max_retries}",
                            _attempt + 1
                        );
                        tokio::time::sleep(std::time::Duration::from_secs(wait)).await;
                        _attempt += 1;
                    } else {
                        break Err(e);
                    }
                }
            }
        }
    }};
}

pub(crate) use retry_transient;

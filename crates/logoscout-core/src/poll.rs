use std::time::Duration;
use tracing::debug;

/// Call `attempt` up to `attempts` times with a fixed pause between calls,
/// returning the first `Some` it produces, or `None` once every attempt has
/// been exhausted.
///
/// This is the bounded-poll pattern used for clipboard reads: each attempt
/// may re-trigger the UI action that feeds the source and then read it, so a
/// handful of spaced retries is enough and anything beyond that is treated as
/// a failure.
pub async fn poll_until<T, F>(attempts: usize, pause: Duration, mut attempt: F) -> Option<T>
where
    F: AsyncFnMut(usize) -> Option<T>,
{
    for n in 1..=attempts {
        if let Some(value) = attempt(n).await {
            return Some(value);
        }
        debug!("Poll attempt {}/{} produced nothing", n, attempts);
        if n < attempts {
            tokio::time::sleep(pause).await;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_poll_returns_first_some() {
        let calls = AtomicUsize::new(0);
        let result = poll_until(3, Duration::ZERO, async |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Some(42)
        })
        .await;

        assert_eq!(result, Some(42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_poll_succeeds_on_second_attempt() {
        let result = poll_until(3, Duration::ZERO, async |n| {
            if n == 2 {
                Some("https://img.example/logo.png".to_string())
            } else {
                None
            }
        })
        .await;

        assert_eq!(result, Some("https://img.example/logo.png".to_string()));
    }

    #[tokio::test]
    async fn test_poll_attempts_can_borrow_mutable_state() {
        let mut reads = vec![None, Some(7), Some(9)].into_iter();
        let result = poll_until(3, Duration::ZERO, async |_| reads.next().flatten()).await;

        assert_eq!(result, Some(7));
    }

    #[tokio::test]
    async fn test_poll_exhaustion_returns_none() {
        let calls = AtomicUsize::new(0);
        let result: Option<u32> = poll_until(3, Duration::ZERO, async |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            None
        })
        .await;

        assert_eq!(result, None);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_attempts_is_a_noop() {
        let result: Option<u32> = poll_until(0, Duration::ZERO, async |_| Some(1)).await;
        assert_eq!(result, None);
    }
}

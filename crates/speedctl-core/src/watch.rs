// ── Watch mode ──
//
// A cooperative poll loop: fetch, render, sleep, repeat. The caller hands
// in a shutdown future (Ctrl-C in the CLI); it races both the in-flight
// fetch and the sleep, so an interrupt never waits for a round trip. Any
// error ends the loop.

use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use tracing::debug;

use crate::config::MIN_REFRESH_INTERVAL;
use crate::error::CoreError;
use crate::model::WifiInterface;
use crate::router::Router;

/// Why a watch loop ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchExit {
    /// The shutdown future resolved.
    Interrupted,
    /// The watched interface went down after at least one render.
    InterfaceDown { id: u32 },
}

/// Run `fetch` every `interval` (never faster than
/// [`MIN_REFRESH_INTERVAL`]) and hand each result to `render`.
pub async fn poll<T, F, Fut, R>(
    interval: Duration,
    shutdown: impl Future<Output = ()>,
    mut fetch: F,
    mut render: R,
) -> Result<WatchExit, CoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CoreError>>,
    R: FnMut(&T),
{
    let interval = interval.max(MIN_REFRESH_INTERVAL);
    let mut shutdown = pin!(shutdown);
    let mut rounds: u64 = 0;

    loop {
        let value = tokio::select! {
            biased;
            () = &mut shutdown => return Ok(WatchExit::Interrupted),
            result = fetch() => match result {
                Ok(value) => value,
                Err(CoreError::InterfaceDown { id }) if rounds > 0 => {
                    return Ok(WatchExit::InterfaceDown { id });
                }
                Err(e) => return Err(e),
            },
        };

        render(&value);
        rounds += 1;
        debug!(rounds, ?interval, "refresh rendered");

        tokio::select! {
            biased;
            () = &mut shutdown => return Ok(WatchExit::Interrupted),
            () = tokio::time::sleep(interval) => {}
        }
    }
}

/// Re-render the client view of interface `id` until interrupted or the
/// interface goes down.
pub async fn watch_interface(
    router: &Router,
    id: u32,
    interval: Duration,
    shutdown: impl Future<Output = ()>,
    render: impl FnMut(&WifiInterface),
) -> Result<WatchExit, CoreError> {
    poll(interval, shutdown, || router.interface_with_clients(id), render).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use tokio_test::assert_err;

    use super::*;

    fn counting_fetch(calls: &Cell<u32>) -> impl FnMut() -> std::future::Ready<Result<u32, CoreError>> + '_ {
        move || {
            calls.set(calls.get() + 1);
            std::future::ready(Ok(calls.get()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn renders_until_shutdown() {
        let calls = Cell::new(0);
        let mut seen = Vec::new();

        let exit = poll(
            Duration::from_secs(2),
            tokio::time::sleep(Duration::from_secs(5)),
            counting_fetch(&calls),
            |n| seen.push(*n),
        )
        .await
        .unwrap();

        assert_eq!(exit, WatchExit::Interrupted);
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn interval_is_clamped_to_floor() {
        let calls = Cell::new(0);
        let mut renders = 0;

        poll(
            Duration::from_millis(100),
            tokio::time::sleep(Duration::from_secs(5)),
            counting_fetch(&calls),
            |_| renders += 1,
        )
        .await
        .unwrap();

        // t = 0, 2, 4
        assert_eq!(renders, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn interface_going_down_ends_loop() {
        let calls = Cell::new(0);
        let fetch = || {
            calls.set(calls.get() + 1);
            let result = if calls.get() < 3 {
                Ok(())
            } else {
                Err(CoreError::InterfaceDown { id: 2 })
            };
            std::future::ready(result)
        };

        let exit = poll(
            Duration::from_secs(2),
            std::future::pending(),
            fetch,
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(exit, WatchExit::InterfaceDown { id: 2 });
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn first_error_is_returned() {
        let err = assert_err!(
            poll(
                Duration::from_secs(2),
                std::future::pending(),
                || std::future::ready(Err::<(), _>(CoreError::InterfaceDown { id: 4 })),
                |_| {},
            )
            .await
        );

        assert!(matches!(err, CoreError::InterfaceDown { id: 4 }));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_wins_over_pending_fetch() {
        let exit = poll(
            Duration::from_secs(2),
            tokio::time::sleep(Duration::from_secs(1)),
            std::future::pending::<Result<(), CoreError>>,
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(exit, WatchExit::Interrupted);
    }
}

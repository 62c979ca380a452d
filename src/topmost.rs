//! Keeping the overlay above other windows.
//!
//! Window managers may drop the always-on-top flag when other topmost windows show up,
//! so the flag is re-asserted periodically. Failures are logged and retried on the next
//! tick.

use std::time::{Duration, Instant};

use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use tracing::{debug, info, warn};

use crate::Error;

pub trait Topmost {
    /// Raise the window to the top of the z-order without moving or resizing it.
    fn reassert_topmost(&mut self) -> Result<(), Error>;
}

/// Used where the platform offers no way to do this.
#[derive(Debug, Default)]
pub struct NoTopmost;

impl Topmost for NoTopmost {
    fn reassert_topmost(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(windows)]
fn platform_topmost(raw: RawWindowHandle) -> Result<Option<Box<dyn Topmost>>, Error> {
    crate::windows::topmost(raw)
}

#[cfg(target_os = "linux")]
fn platform_topmost(raw: RawWindowHandle) -> Result<Option<Box<dyn Topmost>>, Error> {
    crate::linux::topmost(raw)
}

#[cfg(not(any(windows, target_os = "linux")))]
fn platform_topmost(_raw: RawWindowHandle) -> Result<Option<Box<dyn Topmost>>, Error> {
    Ok(None)
}

/// Topmost implementation for the given window, falls back to [`NoTopmost`].
pub fn native_topmost<W: HasWindowHandle + ?Sized>(window: &W) -> Box<dyn Topmost> {
    let raw = match window.window_handle() {
        Ok(handle) => handle.as_raw(),
        Err(e) => {
            warn!("no window handle, topmost reassertion disabled: {e}");
            return Box::new(NoTopmost);
        }
    };
    match platform_topmost(raw) {
        Ok(Some(topmost)) => topmost,
        Ok(None) => {
            info!("topmost reassertion not supported for {raw:?}");
            Box::new(NoTopmost)
        }
        Err(e) => {
            warn!("topmost reassertion disabled: {e}");
            Box::new(NoTopmost)
        }
    }
}

pub struct KeepOnTop {
    topmost: Box<dyn Topmost>,
    interval: Duration,
    last: Instant,
}

impl KeepOnTop {
    /// The first reassertion happens one interval after `now`.
    pub fn new(topmost: Box<dyn Topmost>, interval: Duration, now: Instant) -> Self {
        KeepOnTop {
            topmost,
            interval,
            last: now,
        }
    }

    /// Reassert if an interval has passed, returns the time until the next tick is due.
    pub fn tick(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed < self.interval {
            return self.interval - elapsed;
        }
        self.last = now;
        match self.topmost.reassert_topmost() {
            Ok(()) => debug!("reasserted topmost"),
            Err(e) => warn!("failed to reassert topmost: {e}"),
        }
        self.interval
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl Topmost for Counting {
        fn reassert_topmost(&mut self) -> Result<(), Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err("invalid window handle".into())
            } else {
                Ok(())
            }
        }
    }

    fn keep_on_top(fail: bool, start: Instant) -> (KeepOnTop, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let topmost = Counting {
            calls: calls.clone(),
            fail,
        };
        let interval = Duration::from_millis(10_000);
        (KeepOnTop::new(Box::new(topmost), interval, start), calls)
    }

    #[test]
    fn test_interval() {
        let start = Instant::now();
        let (mut k, calls) = keep_on_top(false, start);
        assert_eq!(k.tick(start), Duration::from_millis(10_000));
        assert_eq!(
            k.tick(start + Duration::from_millis(4_000)),
            Duration::from_millis(6_000)
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let t = start + Duration::from_millis(10_000);
        assert_eq!(k.tick(t), Duration::from_millis(10_000));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            k.tick(t + Duration::from_millis(1)),
            Duration::from_millis(9_999)
        );
        k.tick(t + Duration::from_millis(25_000));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failures_retry() {
        let start = Instant::now();
        let (mut k, calls) = keep_on_top(true, start);
        for i in 1..=3 {
            let next = k.tick(start + Duration::from_millis(10_000 * i));
            assert_eq!(next, Duration::from_millis(10_000));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_no_topmost() {
        assert!(NoTopmost.reassert_topmost().is_ok());
    }
}

use tokio::sync::watch;

/// Where a shared load currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Load {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// A latch for an external capability that loads once per page.
///
/// The first caller of [`Readiness::begin`] starts the load; everyone awaits
/// [`Readiness::wait`], which resolves on success and on failure alike. Each
/// waiter holds its own subscription, so dropping one (a component
/// unmounting) leaves the others untouched.
pub struct Readiness {
    state: watch::Sender<Load>,
}

impl Readiness {
    pub fn new() -> Self {
        let (state, _) = watch::channel(Load::Idle);
        Self { state }
    }

    /// Returns `true` for exactly one caller while no load is running or
    /// done. A failed load can be begun again.
    pub fn begin(&self) -> bool {
        self.state.send_if_modified(|state| {
            if matches!(state, Load::Idle | Load::Failed) {
                *state = Load::Loading;
                true
            } else {
                false
            }
        })
    }

    pub fn mark_ready(&self) {
        self.state.send_replace(Load::Ready);
    }

    /// Record a failed load and wake everyone waiting on it. A library that is
    /// already ready stays ready.
    pub fn fail(&self) {
        self.state.send_if_modified(|state| {
            if *state == Load::Loading {
                *state = Load::Failed;
                true
            } else {
                false
            }
        });
    }

    pub fn state(&self) -> Load {
        *self.state.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == Load::Ready
    }

    /// Resolves once the current load settles, with whether it succeeded.
    /// Immediately if it already has.
    pub async fn wait(&self) -> bool {
        let mut rx = self.state.subscribe();
        // The sender lives as long as `self`, so this cannot fail while we
        // hold a borrow of it.
        let ready = rx
            .wait_for(|state| matches!(state, Load::Ready | Load::Failed))
            .await
            .is_ok_and(|state| *state == Load::Ready);
        ready
    }
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn only_first_caller_begins() {
        let latch = Readiness::new();
        assert!(latch.begin());
        assert!(!latch.begin());
        assert!(!latch.begin());
        assert_eq!(latch.state(), Load::Loading);
    }

    #[test]
    fn failure_allows_a_retry() {
        let latch = Readiness::new();
        assert!(latch.begin());
        latch.fail();
        assert_eq!(latch.state(), Load::Failed);
        assert!(latch.begin());

        latch.mark_ready();
        latch.fail();
        assert!(latch.is_ready());
        assert!(!latch.begin());
    }

    #[tokio::test]
    async fn already_ready_resolves_immediately() {
        let latch = Readiness::new();
        latch.mark_ready();
        let ready = tokio::time::timeout(Duration::from_millis(50), latch.wait())
            .await
            .expect("wait resolves");
        assert!(ready);
    }

    #[tokio::test]
    async fn every_waiter_is_released() {
        let latch = Arc::new(Readiness::new());
        assert!(latch.begin());
        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let latch = Arc::clone(&latch);
                tokio::spawn(async move { latch.wait().await })
            })
            .collect();

        tokio::task::yield_now().await;
        latch.mark_ready();

        for waiter in waiters {
            let ready = tokio::time::timeout(Duration::from_millis(100), waiter)
                .await
                .expect("waiter released")
                .expect("task did not panic");
            assert!(ready);
        }
        assert!(latch.is_ready());
    }

    #[tokio::test]
    async fn failure_wakes_waiters() {
        let latch = Arc::new(Readiness::new());
        assert!(latch.begin());
        let waiters: Vec<_> = (0..2)
            .map(|_| {
                let latch = Arc::clone(&latch);
                tokio::spawn(async move { latch.wait().await })
            })
            .collect();

        tokio::task::yield_now().await;
        latch.fail();

        for waiter in waiters {
            let ready = tokio::time::timeout(Duration::from_millis(100), waiter)
                .await
                .expect("waiter released on failure")
                .expect("task did not panic");
            assert!(!ready);
        }
        assert!(latch.begin());
    }

    #[tokio::test]
    async fn dropping_a_waiter_does_not_affect_others() {
        let latch = Arc::new(Readiness::new());
        assert!(latch.begin());

        let cancelled = {
            let latch = Arc::clone(&latch);
            tokio::spawn(async move { latch.wait().await })
        };
        let kept = {
            let latch = Arc::clone(&latch);
            tokio::spawn(async move { latch.wait().await })
        };

        tokio::task::yield_now().await;
        cancelled.abort();
        assert!(cancelled.await.unwrap_err().is_cancelled());

        latch.mark_ready();
        let ready = tokio::time::timeout(Duration::from_millis(100), kept)
            .await
            .expect("remaining waiter released")
            .expect("task did not panic");
        assert!(ready);
    }
}

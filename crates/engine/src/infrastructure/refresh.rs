//! Refresh signal backed by a `tokio::sync::watch` generation counter.

use tokio::sync::watch;

use crate::infrastructure::ports::RefreshPort;

/// Each refresh bumps a generation number. Subscribers wake on change and
/// re-read whatever they derive from server state.
pub struct WatchRefresh {
    tx: watch::Sender<u64>,
}

impl WatchRefresh {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }

    /// Number of refreshes fired so far.
    pub fn generation(&self) -> u64 {
        *self.tx.borrow()
    }
}

impl Default for WatchRefresh {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshPort for WatchRefresh {
    fn refresh(&self) {
        // send_modify updates the value even when nobody is subscribed.
        self.tx.send_modify(|generation| *generation += 1);
        tracing::debug!(generation = self.generation(), "Refresh signalled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_without_subscribers_still_counts() {
        let refresh = WatchRefresh::new();
        refresh.refresh();
        refresh.refresh();
        assert_eq!(refresh.generation(), 2);
    }

    #[tokio::test]
    async fn subscribers_observe_refresh() {
        let refresh = WatchRefresh::new();
        let mut rx = refresh.subscribe();

        refresh.refresh();
        rx.changed().await.expect("sender alive");
        assert_eq!(*rx.borrow_and_update(), 1);
    }
}

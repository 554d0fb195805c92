//! Preload Hint Listener
//!
//! Consumes preload hints on behalf of the data-fetch layer.

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cache::PreloadHint;

/// Spawns a task that calls `on_hint` for every preload hint received.
///
/// Lagging is logged and skipped; the task ends when the cache is dropped.
pub fn spawn_preload_listener<F>(
    mut receiver: broadcast::Receiver<PreloadHint>,
    mut on_hint: F,
) -> JoinHandle<()>
where
    F: FnMut(PreloadHint) + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(hint) => on_hint(hint),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Preload listener lagged, skipped {} hints", skipped);
                }
                Err(RecvError::Closed) => {
                    info!("Preload hint channel closed");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[tokio::test]
    async fn test_listener_receives_hints() {
        let (tx, rx) = broadcast::channel(8);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let handle = spawn_preload_listener(rx, move |hint| {
            sink.lock().unwrap().push(hint.key);
        });

        tx.send(PreloadHint { key: "dashboard".into() }).unwrap();
        tx.send(PreloadHint { key: "schedule".into() }).unwrap();
        drop(tx);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("listener should stop when the channel closes")
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["dashboard", "schedule"]);
    }
}

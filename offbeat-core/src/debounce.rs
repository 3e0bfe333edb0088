//! Debounced observation of a changing value.

use std::time::Duration;

use tokio::sync::watch;

/// Follow `source`, publishing a value only once it has stayed unchanged
/// for `delay`.
///
/// The returned receiver starts with the source's current value. When the
/// source's sender goes away, a pending value is flushed immediately and the
/// output closes. Must be called from within a Tokio runtime.
pub fn debounce<T>(
    mut source: watch::Receiver<T>,
    delay: Duration,
) -> watch::Receiver<T>
where
    T: Clone + Send + Sync + 'static,
{
    let initial = source.borrow_and_update().clone();
    let (sender, receiver) = watch::channel(initial);

    tokio::spawn(async move {
        while source.changed().await.is_ok() {
            loop {
                match tokio::time::timeout(delay, source.changed()).await {
                    Ok(Ok(())) => continue,
                    Ok(Err(_)) => {
                        let _ = sender.send(source.borrow().clone());
                        return;
                    }
                    Err(_elapsed) => break,
                }
            }

            let settled = source.borrow_and_update().clone();
            if sender.send(settled).is_err() {
                tracing::trace!("[debounce] All receivers dropped, stopping");
                return;
            }
        }
    });

    receiver
}

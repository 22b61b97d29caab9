use std::future::Future;

/// Spawns `future` in the background without waiting for it.
///
/// Inside a tokio runtime the task joins that runtime; otherwise it runs to completion
/// on a dedicated thread driving its own current-thread runtime.
pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    use tokio::runtime::{Builder, Handle};

    if let Ok(handle) = Handle::try_current() {
        handle.spawn(future);
        return;
    }

    std::thread::spawn(move || match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime.block_on(future),
        Err(err) => crate::loader::LOGGER.error(format!(
            "failed to build background runtime, dropping task: {err}"
        )),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn runs_outside_of_a_runtime() {
        let (tx, rx) = mpsc::channel();
        spawn_detached(async move {
            let _ = tx.send(42);
        });
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 42);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn joins_the_current_runtime() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        spawn_detached(async move {
            let _ = tx.send("done");
        });
        assert_eq!(rx.await.unwrap(), "done");
    }
}

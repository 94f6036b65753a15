use std::{fmt::Display, future::Future, time::Instant};

use bizgloss_core::ViewState;
use chrono::Utc;
use metrics::{counter, histogram};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, error, info};

/// A mounted list view.
///
/// Mounting spawns the view's single fetch. The spawned task owns the sending
/// half of the state channel and settles it once; the view keeps the
/// receiving half. Dropping the view unmounts it: the fetch is aborted and a
/// result that still arrives is discarded.
pub struct ListView<T> {
    name: &'static str,
    state: watch::Receiver<ViewState<T>>,
    task: JoinHandle<()>,
}

impl<T> ListView<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn mount<F, E>(name: &'static str, fetch: F) -> Self
    where
        F: Future<Output = Result<Vec<T>, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let (sender, state) = watch::channel(ViewState::Loading);
        let task = tokio::spawn(async move {
            let started = Instant::now();
            let result = fetch.await;
            histogram!("catalog_fetch_latency_seconds", "view" => name)
                .record(started.elapsed().as_secs_f64());

            match &result {
                Ok(items) => {
                    counter!("catalog_fetch_total", "view" => name, "result" => "ok").increment(1);
                    info!(stage = "view", view = name, count = items.len(), "fetch completed");
                }
                Err(err) => {
                    counter!("catalog_fetch_total", "view" => name, "result" => "error")
                        .increment(1);
                    error!(stage = "view", view = name, error = %err, "fetch failed");
                }
            }

            if sender.send(ViewState::settle(result, Utc::now())).is_err() {
                debug!(stage = "view", view = name, "view unmounted before fetch settled");
            }
        });

        Self { name, state, task }
    }

    /// Current state of the view.
    pub fn state(&self) -> ViewState<T> {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn is_failed(&self) -> bool {
        self.state.borrow().error().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.state.clone()
    }
}

impl<T> Drop for ListView<T> {
    fn drop(&mut self) {
        self.task.abort();
        debug!(stage = "view", view = self.name, "view unmounted");
    }
}

/// Waits until the view behind `state` leaves the loading state.
///
/// Returns the last published state when the view is unmounted first.
pub async fn settled<T: Clone>(mut state: watch::Receiver<ViewState<T>>) -> ViewState<T> {
    let settled = state
        .wait_for(|current| !current.is_loading())
        .await
        .map(|current| current.clone());
    settled.unwrap_or_else(|_| state.borrow().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::{sync::oneshot, time::timeout};

    #[tokio::test]
    async fn starts_loading_and_settles_with_items() {
        let (release, gate) = oneshot::channel::<()>();
        let view = ListView::mount("numbers", async move {
            let _ = gate.await;
            Ok::<_, String>(vec![3, 1, 2])
        });
        assert!(view.state().is_loading());

        release.send(()).expect("release fetch");
        let state = timeout(Duration::from_secs(1), settled(view.subscribe()))
            .await
            .expect("view settles");
        assert_eq!(state.items(), Some(&[3, 1, 2][..]));
        assert_eq!(view.state(), state);
    }

    #[tokio::test]
    async fn failed_fetch_moves_to_failed_state() {
        let view: ListView<u32> = ListView::mount("numbers", async {
            Err::<Vec<u32>, _>("API Error 502: bad gateway")
        });

        let state = timeout(Duration::from_secs(1), settled(view.subscribe()))
            .await
            .expect("view settles");
        assert_eq!(state.error(), Some("API Error 502: bad gateway"));
        assert!(!view.is_loading());
        assert!(view.is_failed());
    }

    #[tokio::test]
    async fn views_settle_independently() {
        let (_hold, blocked_gate) = oneshot::channel::<()>();
        let blocked: ListView<u32> = ListView::mount("blocked", async move {
            let _ = blocked_gate.await;
            Ok::<_, String>(vec![1])
        });
        let ready = ListView::mount("ready", async { Ok::<_, String>(vec!["a"]) });

        let state = timeout(Duration::from_secs(1), settled(ready.subscribe()))
            .await
            .expect("ready view settles");
        assert_eq!(state.items(), Some(&["a"][..]));
        assert!(blocked.state().is_loading());
    }

    #[tokio::test]
    async fn unmounting_aborts_pending_fetch() {
        let (mut release, gate) = oneshot::channel::<()>();
        let view: ListView<u32> = ListView::mount("numbers", async move {
            let _ = gate.await;
            Ok::<_, String>(vec![1])
        });
        let observer = view.subscribe();

        drop(view);
        timeout(Duration::from_secs(1), release.closed())
            .await
            .expect("fetch future dropped after unmount");

        let state = timeout(Duration::from_secs(1), settled(observer))
            .await
            .expect("observer returns once the task is gone");
        assert!(state.is_loading());
    }
}

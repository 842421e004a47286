use std::io;
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use postlist_core::{Generation, PageRequest, PostId, TimerToken};
use postlist_logging::{postlist_debug, postlist_info};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, PostsApi};

enum Job {
    FetchPage {
        generation: Generation,
        request: PageRequest,
    },
    DeletePost {
        post_id: PostId,
    },
    Settle {
        token: TimerToken,
        delay: Duration,
    },
}

enum EngineCommand {
    /// The token is the one current when the job was queued.
    Run(Job, CancellationToken),
    Shutdown,
}

/// Runs API calls and timers on a background tokio runtime.
///
/// Results come back as [`EngineEvent`]s through [`try_recv`]. Work that is
/// cancelled with [`cancel_pending`] reports nothing.
///
/// [`try_recv`]: EngineHandle::try_recv
/// [`cancel_pending`]: EngineHandle::cancel_pending
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    cancel: Mutex<CancellationToken>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn PostsApi>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let cancel = Mutex::new(CancellationToken::new());
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("postlist-io")
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("postlist-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let (job, token) = match command {
                        EngineCommand::Run(job, token) => (job, token),
                        EngineCommand::Shutdown => break,
                    };
                    let api = api.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        run_job(api.as_ref(), job, event_tx, token).await;
                    });
                }
                postlist_info!("engine stopping");
                runtime.shutdown_background();
            })?;

        Ok(Self {
            cmd_tx,
            event_rx,
            cancel,
        })
    }

    pub fn fetch_page(&self, generation: Generation, request: PageRequest) {
        self.send(Job::FetchPage {
            generation,
            request,
        });
    }

    pub fn delete_post(&self, post_id: PostId) {
        self.send(Job::DeletePost { post_id });
    }

    pub fn schedule_settle(&self, token: TimerToken, delay: Duration) {
        self.send(Job::Settle { token, delay });
    }

    /// Drops everything started so far; later commands run normally.
    pub fn cancel_pending(&self) {
        let mut guard = self.cancel.lock().unwrap_or_else(PoisonError::into_inner);
        guard.cancel();
        *guard = CancellationToken::new();
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn shutdown(&self) {
        self.cancel_pending();
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }

    fn send(&self, job: Job) {
        let token = current_token(&self.cancel);
        let _ = self.cmd_tx.send(EngineCommand::Run(job, token));
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn current_token(cancel: &Mutex<CancellationToken>) -> CancellationToken {
    cancel
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

async fn run_job(
    api: &dyn PostsApi,
    job: Job,
    event_tx: mpsc::Sender<EngineEvent>,
    cancel: CancellationToken,
) {
    let event = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            postlist_debug!("engine job cancelled");
            return;
        }
        event = execute(api, job) => event,
    };
    let _ = event_tx.send(event);
}

async fn execute(api: &dyn PostsApi, job: Job) -> EngineEvent {
    match job {
        Job::FetchPage {
            generation,
            request,
        } => {
            let result = api.fetch_page(&request).await;
            EngineEvent::PageFetched { generation, result }
        }
        Job::DeletePost { post_id } => {
            let result = api.delete_post(&post_id).await;
            EngineEvent::PostDeleted { post_id, result }
        }
        Job::Settle { token, delay } => {
            tokio::time::sleep(delay).await;
            EngineEvent::SettleElapsed { token }
        }
    }
}

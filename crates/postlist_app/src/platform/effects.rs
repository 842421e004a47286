use postlist_core::{
    DeleteFailure, Effect, ErrorKind, FetchFailure, Msg, PageFetch, ParamStore, Post, QueryParams,
};
use postlist_engine::{ApiError, EngineEvent, EngineHandle, FailureKind};
use postlist_logging::{postlist_debug, postlist_info, postlist_warn};

/// Carries out core effects against the engine and the parameter store,
/// and turns engine events back into messages.
pub struct EffectRunner<S> {
    engine: EngineHandle,
    store: S,
}

impl<S: ParamStore> EffectRunner<S> {
    pub fn new(engine: EngineHandle, store: S) -> Self {
        Self { engine, store }
    }

    pub fn params(&self) -> QueryParams {
        self.store.snapshot()
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Runs `effects`. Posts handed over for editing are returned to the
    /// caller, which owns the editor.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Post> {
        let mut edits = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchPage(PageFetch {
                    generation,
                    request,
                }) => {
                    postlist_info!(
                        "FetchPage generation={} offset={} query={:?} sort={}",
                        generation.0,
                        request.offset,
                        request.criteria.query,
                        request.criteria.sort
                    );
                    self.engine.fetch_page(generation, request);
                }
                Effect::ScheduleSettle(timer) => {
                    self.engine.schedule_settle(timer.token, timer.delay);
                }
                Effect::SetQueryParam { name, value } => {
                    postlist_debug!("SetQueryParam {}={:?}", name, value);
                    self.store.set(name, value.as_deref());
                }
                Effect::EditPost(post) => {
                    postlist_info!("EditPost id={}", post.id);
                    edits.push(post);
                }
                Effect::DeletePost { post_id } => {
                    postlist_info!("DeletePost id={}", post_id);
                    self.engine.delete_post(post_id);
                }
                Effect::CancelPending => self.engine.cancel_pending(),
            }
        }
        edits
    }

    /// Everything the engine finished since the last call.
    pub fn drain_events(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(map_event)
            .collect()
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched { generation, result } => Msg::PageLoaded {
            generation,
            result: result.map_err(|err| {
                postlist_warn!("Page fetch (generation {}) failed: {}", generation.0, err);
                fetch_failure(err)
            }),
        },
        EngineEvent::PostDeleted { post_id, result } => Msg::DeleteCompleted {
            result: result.map_err(|err| {
                postlist_warn!("Delete of {} failed: {}", post_id, err);
                delete_failure(err)
            }),
            post_id,
        },
        EngineEvent::SettleElapsed { token } => Msg::SettleElapsed(token),
    }
}

fn fetch_failure(err: ApiError) -> FetchFailure {
    FetchFailure::new(map_kind(&err.kind), err.message)
}

fn delete_failure(err: ApiError) -> DeleteFailure {
    let failure = DeleteFailure::new(map_kind(&err.kind));
    match err.code {
        Some(code) => failure.with_code(code),
        None => failure,
    }
}

fn map_kind(kind: &FailureKind) -> ErrorKind {
    match kind {
        FailureKind::HttpStatus(404) => ErrorKind::NotFound,
        FailureKind::HttpStatus(status) => ErrorKind::Server(*status),
        FailureKind::Timeout => ErrorKind::Timeout,
        FailureKind::InvalidUrl | FailureKind::Network => ErrorKind::Network,
        FailureKind::Decode | FailureKind::TooLarge { .. } => ErrorKind::InvalidResponse,
        FailureKind::Cancelled => ErrorKind::Cancelled,
    }
}

use std::collections::HashSet;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any record held by a [`StoreActor`] must implement.
pub trait Record: Clone + Debug + PartialEq + Send + Sync + 'static {
    type Key: Eq + Hash + Display;

    /// Collection name used in log fields.
    const KIND: &'static str;

    fn key(&self) -> &Self::Key;
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

/// Monotonic tag handed out by [`StoreClient::begin_fetch`]. Only the latest
/// token issued by a store may complete a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchToken(pub u64);

impl Display for FetchToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What consumers of a store observe. `revision` increments on every change.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub revision: u64,
}

impl<T> Default for StoreSnapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            revision: 0,
        }
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<T>;

#[derive(Debug)]
pub enum StoreRequest<T: Record> {
    Set {
        items: Vec<T>,
        respond_to: Response<()>,
    },
    SetLoading {
        loading: bool,
        respond_to: Response<()>,
    },
    SetError {
        error: Option<String>,
        respond_to: Response<()>,
    },
    BeginFetch {
        respond_to: Response<FetchToken>,
    },
    FinishFetch {
        token: FetchToken,
        outcome: Result<Vec<T>, String>,
        respond_to: Response<bool>,
    },
    Snapshot {
        respond_to: Response<StoreSnapshot<T>>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct StoreActor<T: Record> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    state: StoreSnapshot<T>,
    latest_token: u64,
    publisher: watch::Sender<StoreSnapshot<T>>,
}

impl<T: Record> StoreActor<T> {
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, observer) = watch::channel(StoreSnapshot::default());
        let actor = Self {
            receiver,
            state: StoreSnapshot::default(),
            latest_token: 0,
            publisher,
        };
        let client = StoreClient { sender, observer };
        (actor, client)
    }

    #[instrument(name = "store_actor", fields(kind = T::KIND), skip(self))]
    pub async fn run(mut self) {
        info!("Store starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Set { items, respond_to } => {
                    self.replace_items(items);
                    self.publish();
                    let _ = respond_to.send(());
                }
                StoreRequest::SetLoading { loading, respond_to } => {
                    self.state.loading = loading;
                    self.publish();
                    let _ = respond_to.send(());
                }
                StoreRequest::SetError { error, respond_to } => {
                    self.state.error = error;
                    self.publish();
                    let _ = respond_to.send(());
                }
                StoreRequest::BeginFetch { respond_to } => {
                    let token = self.handle_begin_fetch();
                    let _ = respond_to.send(token);
                }
                StoreRequest::FinishFetch { token, outcome, respond_to } => {
                    let applied = self.handle_finish_fetch(token, outcome);
                    let _ = respond_to.send(applied);
                }
                StoreRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(self.state.clone());
                }
            }
        }
        info!("Store stopped");
    }

    fn handle_begin_fetch(&mut self) -> FetchToken {
        self.latest_token += 1;
        let token = FetchToken(self.latest_token);
        debug!(%token, "Fetch started");
        self.state.loading = true;
        self.state.error = None;
        self.publish();
        token
    }

    fn handle_finish_fetch(&mut self, token: FetchToken, outcome: Result<Vec<T>, String>) -> bool {
        if token.0 != self.latest_token {
            debug!(%token, latest = self.latest_token, "Discarding stale fetch result");
            return false;
        }
        match outcome {
            Ok(items) => {
                debug!(%token, count = items.len(), "Fetch succeeded");
                self.replace_items(items);
                self.state.error = None;
            }
            Err(message) => {
                debug!(%token, error = %message, "Fetch failed");
                self.state.error = Some(message);
            }
        }
        self.state.loading = false;
        self.publish();
        true
    }

    fn replace_items(&mut self, items: Vec<T>) {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.key()) {
                warn!(key = %item.key(), "Duplicate key in store contents");
            }
        }
        self.state.items = items;
    }

    fn publish(&mut self) {
        self.state.revision += 1;
        self.publisher.send_replace(self.state.clone());
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct StoreClient<T: Record> {
    sender: mpsc::Sender<StoreRequest<T>>,
    observer: watch::Receiver<StoreSnapshot<T>>,
}

impl<T: Record> StoreClient<T> {
    #[cfg(test)]
    pub fn new(
        sender: mpsc::Sender<StoreRequest<T>>,
        observer: watch::Receiver<StoreSnapshot<T>>,
    ) -> Self {
        Self { sender, observer }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> StoreRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    pub async fn set(&self, items: Vec<T>) -> Result<(), FrameworkError> {
        self.request(|respond_to| StoreRequest::Set { items, respond_to }).await
    }

    pub async fn set_loading(&self, loading: bool) -> Result<(), FrameworkError> {
        self.request(|respond_to| StoreRequest::SetLoading { loading, respond_to }).await
    }

    pub async fn set_error(&self, error: Option<String>) -> Result<(), FrameworkError> {
        self.request(|respond_to| StoreRequest::SetError { error, respond_to }).await
    }

    pub async fn begin_fetch(&self) -> Result<FetchToken, FrameworkError> {
        self.request(|respond_to| StoreRequest::BeginFetch { respond_to }).await
    }

    pub async fn finish_fetch(
        &self,
        token: FetchToken,
        outcome: Result<Vec<T>, String>,
    ) -> Result<bool, FrameworkError> {
        self.request(|respond_to| StoreRequest::FinishFetch { token, outcome, respond_to })
            .await
    }

    pub async fn snapshot(&self) -> Result<StoreSnapshot<T>, FrameworkError> {
        self.request(|respond_to| StoreRequest::Snapshot { respond_to }).await
    }

    /// A receiver that observes every published change.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot<T>> {
        self.observer.clone()
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

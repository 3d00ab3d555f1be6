//! Content service seams and in-flight request tracking.
//!
//! The UI never blocks on extraction or polishing. A request is dispatched
//! onto a worker thread and the frame loop polls an [`InFlight`] handle until
//! the result (or an error) lands. Implementations live behind traits so the
//! app can run against a remote service, a local model, or the no-op stub
//! used in tests.

use crate::binder::ExtractedArticle;
use futures::channel::oneshot;
use futures::future::BoxFuture;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("extraction failed: {0}")]
    Extraction(String),
    #[error("request cancelled")]
    Cancelled,
}

/// What the user handed us to extract from.
#[derive(Debug, Clone)]
pub enum ArticleSource {
    Url(String),
    /// An uploaded file: display name plus raw bytes.
    Upload { name: String, bytes: Vec<u8> },
}

/// Turns an article source into structured content for binding.
pub trait ArticleExtractor: Send + Sync {
    fn extract(&self, source: ArticleSource) -> BoxFuture<'static, Result<ExtractedArticle, ServiceError>>;
}

/// Rewrites a section's prose per an instruction, e.g. tightening it into
/// abstract-panel phrasing. Callers keep the original text on failure.
pub trait TextPolisher: Send + Sync {
    fn polish(
        &self,
        text: String,
        instruction: String,
    ) -> BoxFuture<'static, Result<String, ServiceError>>;
}

/// Handle to a request running on a worker thread. Poll with [`try_take`]
/// once per frame; dropping the handle cancels the request's delivery.
///
/// [`try_take`]: InFlight::try_take
pub struct InFlight<T> {
    rx: Option<oneshot::Receiver<Result<T, ServiceError>>>,
}

impl<T> InFlight<T> {
    pub fn idle() -> Self {
        Self { rx: None }
    }

    pub fn is_pending(&self) -> bool {
        self.rx.is_some()
    }

    /// Non-blocking poll. Returns `Some` exactly once per request: either
    /// the worker's result, or `Cancelled` if the worker died without
    /// sending.
    pub fn try_take(&mut self) -> Option<Result<T, ServiceError>> {
        let rx = self.rx.as_mut()?;
        match rx.try_recv() {
            Ok(Some(result)) => {
                self.rx = None;
                Some(result)
            }
            Ok(None) => None,
            Err(oneshot::Canceled) => {
                self.rx = None;
                Some(Err(ServiceError::Cancelled))
            }
        }
    }

    pub fn cancel(&mut self) {
        self.rx = None;
    }
}

impl<T: Send + 'static> InFlight<T> {
    /// Run `fut` on a worker thread, replacing any previous request on this
    /// handle. The old request's result is discarded when it lands.
    pub fn dispatch(&mut self, fut: BoxFuture<'static, Result<T, ServiceError>>) {
        let (tx, rx) = oneshot::channel();
        std::thread::spawn(move || {
            let result = futures::executor::block_on(fut);
            // The receiver may be gone if the request was cancelled.
            let _ = tx.send(result);
        });
        self.rx = Some(rx);
    }
}

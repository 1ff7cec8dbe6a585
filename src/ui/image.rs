/// Completion handle for an image load.
///
/// Assigning an image source starts a load somewhere else (a helper thread in
/// the terminal port, nothing at all in test doubles). The result arrives
/// over a channel, the way an `<img>` element's `load`/`error` event arrives
/// after its `src` is set.
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

/// Details of a successfully loaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    /// Final URL after redirects.
    pub url: String,
    pub content_type: Option<String>,
    pub bytes: usize,
    pub saved_to: Option<PathBuf>,
}

impl LoadedImage {
    /// One-line summary for logs.
    pub fn describe(&self) -> String {
        let kind = self.content_type.as_deref().unwrap_or("unknown type");
        match &self.saved_to {
            Some(path) => format!("{} bytes ({kind}) saved to {}", self.bytes, path.display()),
            None => format!("{} bytes ({kind}) from {}", self.bytes, self.url),
        }
    }
}

/// Outcome of an image load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLoadResult {
    Loaded(LoadedImage),
    Failed(String),
}

impl ImageLoadResult {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Sending half, held by whoever performs the load.
#[derive(Debug)]
pub struct ImageLoadCompleter {
    tx: Sender<ImageLoadResult>,
}

impl ImageLoadCompleter {
    pub fn complete(self, result: ImageLoadResult) {
        // The receiver may already be gone if the fetch was abandoned.
        let _ = self.tx.send(result);
    }
}

/// Receiving half: resolves once with the load result.
#[derive(Debug)]
pub struct ImageLoad {
    rx: Receiver<ImageLoadResult>,
}

impl ImageLoad {
    pub fn channel() -> (ImageLoadCompleter, ImageLoad) {
        let (tx, rx) = mpsc::channel();
        (ImageLoadCompleter { tx }, ImageLoad { rx })
    }

    /// A load that has already finished.
    pub fn ready(result: ImageLoadResult) -> Self {
        let (completer, load) = Self::channel();
        completer.complete(result);
        load
    }

    /// Run `load` on a helper thread.
    pub fn spawn<F>(load: F) -> Self
    where
        F: FnOnce() -> ImageLoadResult + Send + 'static,
    {
        let (completer, handle) = Self::channel();
        thread::spawn(move || completer.complete(load()));
        handle
    }

    /// Block until the load resolves or `timeout` elapses.
    pub fn wait(self, timeout: Duration) -> ImageLoadResult {
        match self.rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                ImageLoadResult::Failed(format!("image load timed out after {timeout:?}"))
            }
            Err(RecvTimeoutError::Disconnected) => {
                ImageLoadResult::Failed("image load was abandoned".to_string())
            }
        }
    }

    /// Non-blocking check. `None` while the load is still running.
    pub fn try_result(&self) -> Option<ImageLoadResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(ImageLoadResult::Failed(
                "image load was abandoned".to_string(),
            )),
        }
    }
}

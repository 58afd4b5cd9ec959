//! Logger handle owned by every handler
//!
//! A [`Logger`] is a shared reference to a `tracing` dispatcher. Library code
//! emits its events inside [`Logger::in_scope`], so the usual `tracing` macros
//! reach whichever subscriber the handler was configured with.

use std::fmt;
use std::sync::Arc;

use tracing::{Dispatch, Subscriber, dispatcher};

/// Cloneable logger handle; clones share identity
#[derive(Clone)]
pub struct Logger {
    dispatch: Arc<Dispatch>,
}

impl Logger {
    /// Wrap a subscriber in a new logger
    pub fn new<S>(subscriber: S) -> Self
    where
        S: Subscriber + Send + Sync + 'static,
    {
        Self::from_dispatch(Dispatch::new(subscriber))
    }

    pub fn from_dispatch(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Arc::new(dispatch),
        }
    }

    /// Capture the dispatcher that is currently the default for this thread
    ///
    /// When a global subscriber is installed (e.g. `tracing_subscriber::fmt::init`)
    /// this is that subscriber; otherwise events are dropped.
    pub fn current() -> Self {
        Self::from_dispatch(dispatcher::get_default(|current| current.clone()))
    }

    /// Plain-text logger writing to stdout
    pub fn stdout() -> Self {
        Self::new(
            tracing_subscriber::fmt()
                .with_writer(std::io::stdout)
                .finish(),
        )
    }

    /// Logger that drops every event
    pub fn discard() -> Self {
        Self::from_dispatch(Dispatch::none())
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Run `f` with this logger as the scoped default dispatcher
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }

    /// Identity comparison: true only for clones of the same logger
    pub fn same_as(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.dispatch, &other.dispatch)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::current()
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for Logger {}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("dispatch", &Arc::as_ptr(&self.dispatch))
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::Logger;

    /// In-memory sink for asserting on log output
    #[derive(Clone, Default)]
    pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        pub fn contents(&self) -> String {
            let buf = self.0.lock().unwrap();
            String::from_utf8_lossy(&buf).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Logger that records every event (all levels) into the returned buffer
    pub fn capturing_logger() -> (Logger, CapturedLogs) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .without_time()
            .finish();
        (Logger::new(subscriber), logs)
    }
}

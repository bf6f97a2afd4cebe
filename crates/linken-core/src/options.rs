use linken_logger::LogSink;

/// Settings for one linking run.
#[derive(Debug, Clone, Default)]
pub struct LinkOptions {
    /// Remove links instead of creating them.
    pub unlink: bool,
    /// Report per-module detail.
    pub debug: bool,
    pub log: LogSink,
}

impl LinkOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_unlink(mut self, unlink: bool) -> Self {
        self.unlink = unlink;
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn with_log(mut self, log: LogSink) -> Self {
        self.log = log;
        self
    }

    #[must_use]
    pub fn silent(self) -> Self {
        self.with_log(LogSink::Silent)
    }

    pub(crate) fn debug(&self, message: &str) {
        if self.debug {
            self.log.debug(message);
        }
    }
}

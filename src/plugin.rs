use {
    crate::error::Result,
    async_trait::async_trait,
    std::fmt,
    tokio::sync::mpsc,
    tokio_util::sync::CancellationToken,
};

/// Capabilities the engine drives an enumeration mode through.
#[async_trait]
pub trait Plugin: Send + Sync {
    type Output: fmt::Display + Send + 'static;

    fn name(&self) -> &'static str;

    /// Resolution slots one word consumes, for rate accounting.
    fn requests_per_run(&self) -> usize;

    /// One-time setup before the first `run`.
    async fn pre_run(&self, token: &CancellationToken) -> Result<()>;

    /// Processes one word. Outcomes go to `results`; only fatal conditions are
    /// returned as errors.
    async fn run(
        &self,
        token: &CancellationToken,
        word: &str,
        results: &mpsc::Sender<Self::Output>,
    ) -> Result<()>;

    fn config_summary(&self) -> String;
}

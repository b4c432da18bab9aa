//! Product listing state with debounced search input.

use std::time::Duration;
use storefront_commerce::search::{FilterChange, FilterSet};
use storefront_commerce::CommerceError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Quiet period before typed search text is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Coalesces bursts of values into the last one, after a quiet period.
///
/// At most one timer is pending; every [`Debouncer::push`] aborts it and starts a new
/// one. Must be used inside a Tokio runtime.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    latest: Option<T>,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<(u64, T)>,
    rx: mpsc::UnboundedReceiver<(u64, T)>,
}

impl<T: Clone + Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            generation: 0,
            latest: None,
            pending: None,
            tx,
            rx,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a new value and restart the timer.
    pub fn push(&mut self, value: T) {
        self.abort_pending();
        self.generation += 1;
        self.latest = Some(value.clone());

        let generation = self.generation;
        let delay = self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver lives as long as the debouncer.
            let _ = tx.send((generation, value));
        }));
    }

    /// Whether a value is waiting to be committed.
    pub fn is_pending(&self) -> bool {
        self.latest.is_some()
    }

    /// Wait for the pending value to settle. Returns `None` when nothing is pending.
    pub async fn next(&mut self) -> Option<T> {
        while self.latest.is_some() {
            let (generation, value) = self.rx.recv().await?;
            // Values from superseded timers that fired before being aborted.
            if generation == self.generation {
                self.latest = None;
                self.pending = None;
                return Some(value);
            }
        }
        None
    }

    /// Take the pending value now, without waiting.
    pub fn flush(&mut self) -> Option<T> {
        self.abort_pending();
        self.generation += 1;
        self.latest.take()
    }

    /// Drop the pending value.
    pub fn cancel(&mut self) {
        self.abort_pending();
        self.generation += 1;
        self.latest = None;
    }

    fn abort_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

/// Filter state behind a product listing view.
///
/// Filter edits apply immediately and reset to page 1. Search text is buffered
/// until the input has been quiet for the debounce period.
#[derive(Debug)]
pub struct ProductListing {
    defaults: FilterSet,
    filters: FilterSet,
    search_input: String,
    debouncer: Debouncer<String>,
}

impl ProductListing {
    pub fn new(debounce: Duration) -> Self {
        Self::with_defaults(FilterSet::default(), debounce)
    }

    /// Start from `defaults`; [`ProductListing::clear_filters`] returns here.
    pub fn with_defaults(defaults: FilterSet, debounce: Duration) -> Self {
        let search_input = defaults.search.clone();
        Self {
            filters: defaults.clone(),
            defaults,
            search_input,
            debouncer: Debouncer::new(debounce),
        }
    }

    /// The committed filter set, what the next fetch should use.
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Raw search box contents, committed or not.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Record a keystroke in the search box.
    pub fn input_search(&mut self, raw: impl Into<String>) {
        let raw = raw.into();
        self.search_input = raw.clone();
        self.debouncer.push(raw);
    }

    pub fn has_pending_search(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Wait for typing to settle and commit the search.
    ///
    /// Returns the updated filters, or `None` if no input was pending.
    pub async fn next_search_commit(&mut self) -> Option<&FilterSet> {
        let value = self.debouncer.next().await?;
        self.commit_search(value);
        Some(&self.filters)
    }

    /// Commit pending search input immediately, e.g. on Enter.
    pub fn apply_pending_search(&mut self) -> bool {
        match self.debouncer.flush() {
            Some(value) => {
                self.commit_search(value);
                true
            }
            None => false,
        }
    }

    /// Apply a filter edit. Resets to page 1.
    pub fn apply(&mut self, change: FilterChange) {
        if let FilterChange::Search(value) = &change {
            self.debouncer.cancel();
            self.search_input = value.clone();
        }
        self.filters.apply(change);
    }

    pub fn set_page(&mut self, page: u32) -> Result<(), CommerceError> {
        self.filters.set_page(page)
    }

    pub fn set_limit(&mut self, limit: u32) -> Result<(), CommerceError> {
        self.filters.set_limit(limit)
    }

    /// Restore the default filters and discard pending search input.
    pub fn clear_filters(&mut self) {
        self.debouncer.cancel();
        self.filters = self.defaults.clone();
        self.search_input = self.defaults.search.clone();
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.has_active_filters()
    }

    fn commit_search(&mut self, value: String) {
        tracing::debug!(search = %value.trim(), "search committed");
        self.filters.apply(FilterChange::Search(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::search::SortBy;

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_coalesces_burst() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.push("a".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.push("ap".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.push("app".to_string());

        assert_eq!(debouncer.next().await.as_deref(), Some("app"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_waits_full_delay() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let start = tokio::time::Instant::now();
        debouncer.push(1u32);
        tokio::time::sleep(Duration::from_millis(250)).await;
        debouncer.push(2);

        assert_eq!(debouncer.next().await, Some(2));
        assert!(start.elapsed() >= Duration::from_millis(550));
    }

    #[tokio::test]
    async fn test_debouncer_flush_and_cancel() {
        let mut debouncer = Debouncer::new(Duration::from_secs(60));
        debouncer.push("x".to_string());
        assert_eq!(debouncer.flush().as_deref(), Some("x"));
        assert_eq!(debouncer.flush(), None);

        debouncer.push("y".to_string());
        debouncer.cancel();
        assert_eq!(debouncer.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_burst_commits_once() {
        let mut listing = ProductListing::new(DEFAULT_DEBOUNCE);
        listing.set_page(4).unwrap();

        for text in ["a", "ap", "app "] {
            listing.input_search(text);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert_eq!(listing.filters().search, "");
        assert_eq!(listing.search_input(), "app ");

        let filters = listing.next_search_commit().await.unwrap();
        assert_eq!(filters.search, "app");
        assert_eq!(filters.page, Some(1));
        assert!(listing.next_search_commit().await.is_none());
    }

    #[tokio::test]
    async fn test_apply_pending_search() {
        let mut listing = ProductListing::new(DEFAULT_DEBOUNCE);
        assert!(!listing.apply_pending_search());

        listing.input_search("  mug ");
        assert!(listing.has_pending_search());
        assert!(listing.apply_pending_search());
        assert_eq!(listing.filters().search, "mug");
    }

    #[tokio::test]
    async fn test_clear_filters() {
        let mut listing = ProductListing::new(DEFAULT_DEBOUNCE);
        listing.apply(FilterChange::SortBy(SortBy::Price));
        listing.input_search("hat");
        assert!(listing.has_active_filters());

        listing.clear_filters();
        assert_eq!(listing.filters(), &FilterSet::default());
        assert!(!listing.has_pending_search());
        assert_eq!(listing.search_input(), "");
    }

    #[tokio::test]
    async fn test_limit_keeps_page() {
        let mut listing = ProductListing::new(DEFAULT_DEBOUNCE);
        listing.set_page(3).unwrap();
        listing.set_limit(24).unwrap();
        assert_eq!(listing.filters().page, Some(3));

        listing.apply(FilterChange::Category("hats".into()));
        assert_eq!(listing.filters().page, Some(1));
        assert!(listing.set_limit(7).is_err());
    }
}

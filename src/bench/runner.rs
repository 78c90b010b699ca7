//! Benchmark runner
//!
//! Implements the volume policy gate, the sequential test-case scheduler,
//! and the per-endpoint timing loop with optional warm-up. Results are
//! observable only as markup appended to the output surface; `run_tests`
//! itself never fails.

use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, error, warn};

use crate::config::{RunnerConfig, VolumeDecision};
use crate::models::TestCase;
use crate::net::{NetworkClient, RequestOptions};
use crate::notify::{Notice, Notifier};
use crate::render::{OutputSurface, TableHandle};
use crate::util::{average_label, elapsed_millis, request_time_label};
use crate::Result;

/// Sequential endpoint benchmark executor.
///
/// Owns its configuration and three injected collaborators: the network
/// client performing requests, the output surface receiving rendered
/// markup, and the notifier carrying volume-policy notices to the user.
pub struct BenchmarkRunner<S: OutputSurface> {
    config: RunnerConfig,
    client: Box<dyn NetworkClient>,
    surface: S,
    notifier: Box<dyn Notifier>,
}

impl<S: OutputSurface> BenchmarkRunner<S> {
    /// Create a new runner over the given collaborators.
    pub fn new(
        config: RunnerConfig,
        client: Box<dyn NetworkClient>,
        surface: S,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            client,
            surface,
            notifier,
        })
    }

    /// The runner's configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// The output surface holding everything rendered so far.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Consume the runner and hand the output surface back to the host.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Run every test case in list order.
    ///
    /// Each case's full timing loop completes before the next case starts;
    /// no two requests are ever in flight at once. Failures are logged or
    /// surfaced through the notifier, never returned: all results are side
    /// effects on the output surface.
    pub async fn run_tests(&mut self, tests: &[TestCase]) {
        match self.config.volume_policy() {
            VolumeDecision::Abort => {
                self.notifier.notify(&Notice::VolumeCapExceeded {
                    request_count: self.config.request_count,
                });
                return;
            }
            VolumeDecision::ProceedWithCaution => {
                self.notifier.notify(&Notice::HighVolumeCaution {
                    request_count: self.config.request_count,
                });
            }
            VolumeDecision::Proceed => {}
        }

        debug!(
            tests = tests.len(),
            request_count = self.config.request_count,
            "starting benchmark run"
        );

        // Table numbering is seeded from the surface once per run and
        // advances only for cases that actually mount a table.
        let mut table_number = self.surface.table_count();

        for test in tests {
            let Some(url) = test.url() else {
                error!("Missing URL, skipping test case");
                continue;
            };

            table_number += 1;

            if let Err(err) = self.run_test(url, test.body.as_ref(), table_number).await {
                error!(url, %err, "abandoning test case");
            }
        }
    }

    /// Run the timing loop for a single endpoint.
    async fn run_test(
        &mut self,
        url: &str,
        body: Option<&Value>,
        table_number: usize,
    ) -> Result<()> {
        let options = RequestOptions::for_body(body)?;
        let table = self.mount_table(url, table_number);

        let mut timings = Vec::with_capacity(self.config.request_count as usize);

        if self.config.warmup_call {
            debug!(url, "issuing warm-up call before the timed loop");
            // Warm-up primes caches and connections; its timing is discarded
            // and no row is rendered for it.
            self.timed_request(url, &options).await;
        }

        for _ in 0..self.config.request_count {
            let elapsed_ms = self.timed_request(url, &options).await;
            timings.push(elapsed_ms);

            let row = self
                .config
                .templates
                .render_request_row(&request_time_label(elapsed_ms));
            self.surface.append_to_table(&table, &row);
        }

        let average_row = self
            .config
            .templates
            .render_average_row(&average_label(&timings));
        self.surface.append_to_table(&table, &average_row);

        Ok(())
    }

    /// Issue one request and return its wall-clock duration in whole
    /// milliseconds. A transport failure still counts as a completed
    /// attempt: the loop measures the attempt, not its success.
    async fn timed_request(&self, url: &str, options: &RequestOptions) -> u64 {
        let started = Instant::now();

        if let Err(err) = self.client.request(url, options).await {
            warn!(url, %err, "request failed, recording attempt duration");
        }

        elapsed_millis(started.elapsed())
    }

    /// Mount a new table for a test case and render its header row.
    fn mount_table(&mut self, url: &str, table_number: usize) -> TableHandle {
        let table = TableHandle::new(format!(
            "{}-{}",
            self.config.table_name_prefix, table_number
        ));

        let boundary = self.config.templates.render_table(table.name());
        self.surface.mount_table(&table, &boundary);

        let header = self.config.templates.render_header(url);
        self.surface.append_to_table(&table, &header);

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HtmlSurface;
    use crate::BenchtabError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Client resolving immediately, counting every issued request.
    struct StubClient {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl StubClient {
        fn new(calls: Arc<AtomicUsize>) -> Self {
            Self { calls, fail: false }
        }

        fn failing(calls: Arc<AtomicUsize>) -> Self {
            Self { calls, fail: true }
        }
    }

    #[async_trait]
    impl NetworkClient for StubClient {
        async fn request(&self, _url: &str, _options: &RequestOptions) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(BenchtabError::TransportError("connection refused".to_string()))
            } else {
                Ok(json!({"ok": true}))
            }
        }
    }

    #[derive(Default, Clone)]
    struct CollectingNotifier {
        notices: Arc<Mutex<Vec<Notice>>>,
    }

    impl Notifier for CollectingNotifier {
        fn notify(&self, notice: &Notice) {
            self.notices.lock().unwrap().push(notice.clone());
        }
    }

    fn runner_with(
        config: RunnerConfig,
        calls: Arc<AtomicUsize>,
        notifier: CollectingNotifier,
    ) -> BenchmarkRunner<HtmlSurface> {
        let surface = HtmlSurface::new(config.container_name.clone());
        BenchmarkRunner::new(
            config,
            Box::new(StubClient::new(calls)),
            surface,
            Box::new(notifier),
        )
        .expect("valid config")
    }

    #[tokio::test]
    async fn test_run_over_cap_aborts_without_side_effects() {
        let calls = Arc::new(AtomicUsize::new(0));
        let notifier = CollectingNotifier::default();
        let config = RunnerConfig::new().with_request_count(101);
        let mut runner = runner_with(config, calls.clone(), notifier.clone());

        runner
            .run_tests(&[TestCase::get("/a"), TestCase::get("/b")])
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(runner.surface().table_count(), 0);

        let notices = notifier.notices.lock().unwrap();
        assert_eq!(
            notices.as_slice(),
            &[Notice::VolumeCapExceeded { request_count: 101 }]
        );
    }

    #[tokio::test]
    async fn test_caution_band_notifies_once_per_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        let notifier = CollectingNotifier::default();
        let config = RunnerConfig::new().with_request_count(25);
        let mut runner = runner_with(config, calls.clone(), notifier.clone());

        runner
            .run_tests(&[TestCase::get("/a"), TestCase::get("/b")])
            .await;

        assert_eq!(runner.surface().table_count(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 50);

        let notices = notifier.notices.lock().unwrap();
        assert_eq!(
            notices.as_slice(),
            &[Notice::HighVolumeCaution { request_count: 25 }]
        );
    }

    #[tokio::test]
    async fn test_small_run_stays_silent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let notifier = CollectingNotifier::default();
        let mut runner = runner_with(RunnerConfig::new(), calls, notifier.clone());

        runner.run_tests(&[TestCase::get("/a")]).await;

        assert!(notifier.notices.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_table_shape_is_header_rows_average() {
        let calls = Arc::new(AtomicUsize::new(0));
        let config = RunnerConfig::new().with_request_count(3);
        let mut runner = runner_with(config, calls, CollectingNotifier::default());

        runner.run_tests(&[TestCase::get("/ping")]).await;

        let table = runner.surface().table("Table-1").expect("mounted");
        let fragments = table.fragments();
        // header + 3 request rows + average row
        assert_eq!(fragments.len(), 5);
        assert_eq!(fragments[0], "<tr><th>/ping</th></tr>");
        for row in &fragments[1..4] {
            assert!(row.contains(" ms"), "request row renders a timing: {row}");
        }
        assert!(fragments[4].contains("Average:"));
    }

    #[tokio::test]
    async fn test_warmup_issues_one_extra_unrendered_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let config = RunnerConfig::new().with_request_count(3).with_warmup_call(true);
        let mut runner = runner_with(config, calls.clone(), CollectingNotifier::default());

        runner.run_tests(&[TestCase::get("/ping")]).await;

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        let table = runner.surface().table("Table-1").expect("mounted");
        // still header + 3 request rows + average row
        assert_eq!(table.fragments().len(), 5);
    }

    #[tokio::test]
    async fn test_zero_requests_render_na_average() {
        let calls = Arc::new(AtomicUsize::new(0));
        let config = RunnerConfig::new().with_request_count(0);
        let mut runner = runner_with(config, calls.clone(), CollectingNotifier::default());

        runner.run_tests(&[TestCase::get("/ping")]).await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        let table = runner.surface().table("Table-1").expect("mounted");
        assert_eq!(
            table.fragments(),
            &[
                "<tr><th>/ping</th></tr>".to_string(),
                "<tr><td><strong>Average: N/A</strong></td></tr>".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_url_skips_case_without_consuming_a_number() {
        let calls = Arc::new(AtomicUsize::new(0));
        let config = RunnerConfig::new().with_request_count(1);
        let mut runner = runner_with(config, calls, CollectingNotifier::default());

        runner
            .run_tests(&[TestCase::default(), TestCase::get("/b")])
            .await;

        assert_eq!(runner.surface().table_count(), 1);
        let table = runner.surface().table("Table-1").expect("valid case mounts first table");
        assert_eq!(table.fragments()[0], "<tr><th>/b</th></tr>");
    }

    #[tokio::test]
    async fn test_numbering_seeded_from_existing_tables() {
        let calls = Arc::new(AtomicUsize::new(0));
        let config = RunnerConfig::new().with_request_count(1);

        let mut surface = HtmlSurface::new("Tables");
        for name in ["unrelated-1", "unrelated-2"] {
            surface.mount_table(
                &TableHandle::new(name),
                &format!("<table class=\"{name}\"></table>"),
            );
        }

        let mut runner = BenchmarkRunner::new(
            config,
            Box::new(StubClient::new(calls)),
            surface,
            Box::new(CollectingNotifier::default()),
        )
        .expect("valid config");

        runner
            .run_tests(&[TestCase::get("/a"), TestCase::get("/b")])
            .await;

        assert!(runner.surface().table("Table-3").is_some());
        assert!(runner.surface().table("Table-4").is_some());
    }

    #[tokio::test]
    async fn test_transport_failures_still_record_and_render_timings() {
        let calls = Arc::new(AtomicUsize::new(0));
        let config = RunnerConfig::new().with_request_count(2);
        let surface = HtmlSurface::new("Tables");
        let mut runner = BenchmarkRunner::new(
            config,
            Box::new(StubClient::failing(calls.clone())),
            surface,
            Box::new(CollectingNotifier::default()),
        )
        .expect("valid config");

        runner.run_tests(&[TestCase::get("/down")]).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let table = runner.surface().table("Table-1").expect("mounted");
        // failures still produce header + 2 request rows + a numeric average
        assert_eq!(table.fragments().len(), 4);
        assert!(table.fragments()[3].contains("Average: 0.00 ms"));
    }

    #[tokio::test]
    async fn test_post_body_selects_post_once_per_case() {
        let calls = Arc::new(AtomicUsize::new(0));

        struct MethodAssertingClient {
            calls: Arc<AtomicUsize>,
        }

        #[async_trait]
        impl NetworkClient for MethodAssertingClient {
            async fn request(&self, _url: &str, options: &RequestOptions) -> Result<Value> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                assert_eq!(options.method.as_str(), "POST");
                let body = options.body.as_deref().expect("POST carries a body");
                let value: Value = serde_json::from_str(body).expect("encoded JSON");
                assert_eq!(value, json!({"n": 1}));
                Ok(json!({"ok": true}))
            }
        }

        let config = RunnerConfig::new().with_request_count(2);
        let mut runner = BenchmarkRunner::new(
            config,
            Box::new(MethodAssertingClient { calls: calls.clone() }),
            HtmlSurface::new("Tables"),
            Box::new(CollectingNotifier::default()),
        )
        .expect("valid config");

        runner
            .run_tests(&[TestCase::post("/echo", json!({"n": 1}))])
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_construction_rejects_invalid_config() {
        let config = RunnerConfig::new().with_table_name_prefix("");
        let result = BenchmarkRunner::new(
            config,
            Box::new(StubClient::new(Arc::new(AtomicUsize::new(0)))),
            HtmlSurface::new("Tables"),
            Box::new(CollectingNotifier::default()),
        );

        assert!(matches!(result, Err(BenchtabError::ConfigError(_))));
    }
}

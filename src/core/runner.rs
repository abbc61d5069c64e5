use crate::core::batch::BatchProcessor;
use crate::domain::model::{ActorInput, Summary};
use crate::domain::ports::{DomainSearch, OutputSink};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use crate::utils::validation::Validate;

pub const SUMMARY_KEY: &str = "SUMMARY";

/// Drives one actor run: validate, search, persist results and the summary.
pub struct ActorRunner<C: DomainSearch, O: OutputSink> {
    processor: BatchProcessor<C>,
    sink: O,
    monitor: SystemMonitor,
}

/// Run scope. Dropping it is the actor's exit, on success and on error alike.
struct RunScope<'a> {
    monitor: &'a SystemMonitor,
}

impl<'a> RunScope<'a> {
    fn enter(monitor: &'a SystemMonitor) -> Self {
        tracing::info!("🚀 Tomba Email Finder Actor started");
        monitor.log_stats("Start");
        Self { monitor }
    }
}

impl Drop for RunScope<'_> {
    fn drop(&mut self) {
        self.monitor.log_final_stats();
        tracing::info!("👋 Actor exited");
    }
}

impl<C: DomainSearch, O: OutputSink> ActorRunner<C, O> {
    pub fn new(processor: BatchProcessor<C>, sink: O) -> Self {
        Self::new_with_monitoring(processor, sink, false)
    }

    pub fn new_with_monitoring(processor: BatchProcessor<C>, sink: O, monitor_enabled: bool) -> Self {
        Self {
            processor,
            sink,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self, input: &ActorInput) -> Result<Summary> {
        let _scope = RunScope::enter(&self.monitor);

        let result = self.run_inner(input).await;
        if let Err(e) = &result {
            tracing::error!("💥 Actor failed: {}", e);
        }
        result
    }

    async fn run_inner(&self, input: &ActorInput) -> Result<Summary> {
        // 沒通過驗證就不呼叫 API，也不寫任何輸出
        input.validate()?;

        tracing::info!("📧 Processing {} domain(s)", input.domains.len());
        tracing::info!(
            "⏱️ Rate limiting: {}s delay between requests (respecting 15 req/sec limit)",
            self.processor.delay().as_secs_f64()
        );

        let results = self
            .processor
            .process(&input.domains, &input.search_params())
            .await;
        self.monitor.log_stats("Search");

        tracing::info!("✅ Found {} email results", results.len());

        if !results.is_empty() {
            self.sink.push_data(&results).await?;
        }

        let summary = Summary::new(input, results.len());
        let summary_value = serde_json::to_value(&summary)?;
        self.sink.set_value(SUMMARY_KEY, &summary_value).await?;

        tracing::info!("📊 Summary: {}", summary_value);
        Ok(summary)
    }
}

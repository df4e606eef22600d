use crate::core::Pipeline;
use crate::domain::model::RunReport;
use crate::utils::error::Result;
use crate::utils::monitor::ResourceMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: ResourceMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: ResourceMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("🚀 Starting balance check");
        self.monitor.log_stats("Start");

        let addresses = self.pipeline.extract().await?;
        tracing::info!("📋 Loaded {} addresses", addresses.len());
        self.monitor.log_stats("Extract");

        let records = self.pipeline.transform(addresses).await?;
        tracing::info!("🔧 Queried {} addresses", records.len());
        self.monitor.log_stats("Transform");

        let report = self.pipeline.load(records).await?;
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        report.print_summary();
        Ok(report)
    }
}

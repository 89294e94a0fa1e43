use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Counters the boundary layer records. The engine itself emits nothing;
/// whoever hosts the engine decides where the numbers go.
pub trait MetricsSink: Send + Sync {
    fn placement(&self, outcome: &str);
    fn assignment(&self, outcome: &str);
    fn status_update(&self, outcome: &str);
}

/// For callers that do not collect metrics, and for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl MetricsSink for NoopSink {
    fn placement(&self, _outcome: &str) {}
    fn assignment(&self, _outcome: &str) {}
    fn status_update(&self, _outcome: &str) {}
}

/// Prometheus-backed sink with its own registry, exposable on whatever
/// scrape endpoint the host process runs.
#[derive(Clone)]
pub struct PrometheusSink {
    registry: Registry,
    placements_total: IntCounterVec,
    assignments_total: IntCounterVec,
    status_updates_total: IntCounterVec,
}

impl PrometheusSink {
    pub fn new() -> Self {
        let registry = Registry::new();

        let placements_total = IntCounterVec::new(
            Opts::new("order_placements_total", "Order placements by outcome"),
            &["outcome"],
        )
        .expect("valid order_placements_total metric");

        let assignments_total = IntCounterVec::new(
            Opts::new("driver_assignments_total", "Driver assignments by outcome"),
            &["outcome"],
        )
        .expect("valid driver_assignments_total metric");

        let status_updates_total = IntCounterVec::new(
            Opts::new("order_status_updates_total", "Status updates by outcome"),
            &["outcome"],
        )
        .expect("valid order_status_updates_total metric");

        registry
            .register(Box::new(placements_total.clone()))
            .expect("register order_placements_total");
        registry
            .register(Box::new(assignments_total.clone()))
            .expect("register driver_assignments_total");
        registry
            .register(Box::new(status_updates_total.clone()))
            .expect("register order_status_updates_total");

        Self {
            registry,
            placements_total,
            assignments_total,
            status_updates_total,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for PrometheusSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSink for PrometheusSink {
    fn placement(&self, outcome: &str) {
        self.placements_total.with_label_values(&[outcome]).inc();
    }

    fn assignment(&self, outcome: &str) {
        self.assignments_total.with_label_values(&[outcome]).inc();
    }

    fn status_update(&self, outcome: &str) {
        self.status_updates_total.with_label_values(&[outcome]).inc();
    }
}

use loan_decider::config::{AppConfig, PolicyConfig};
use loan_decider::decision::LoanDecider;
use loan_decider::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds a decider from an explicit policy file, falling back to `LOAN_POLICY_PATH`.
pub(crate) fn load_decider(policy_path: Option<PathBuf>) -> Result<LoanDecider, AppError> {
    let policy_config = match policy_path {
        Some(path) => PolicyConfig { path: Some(path) },
        None => AppConfig::load()?.policy,
    };
    decider_from(&policy_config)
}

pub(crate) fn decider_from(config: &PolicyConfig) -> Result<LoanDecider, AppError> {
    let policy = config.load_policy()?;
    Ok(LoanDecider::new(policy)?)
}

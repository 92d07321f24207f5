//! Status aggregation across external collaborators
//!
//! Not part of the scoring path; used by the readiness endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;

use crate::model::{HealthReport, HealthState, ServiceStatus};

/// A collaborator that can report whether it is responsive
#[async_trait]
pub trait HealthCheck: Send + Sync {
    fn service_name(&self) -> &str;

    async fn check(&self) -> Result<(), String>;
}

/// Query every service in parallel and grade by the fraction that responded
pub async fn aggregate_health(services: &[Arc<dyn HealthCheck>]) -> HealthReport {
    let checks = services.iter().map(|service| async move {
        let result = service.check().await;
        if let Err(ref e) = result {
            tracing::warn!(service = service.service_name(), error = %e, "Health check failed");
        }
        ServiceStatus {
            name: service.service_name().to_string(),
            available: result.is_ok(),
            detail: result.err(),
        }
    });

    let statuses = join_all(checks).await;
    let status = grade(&statuses);

    tracing::debug!(status = ?status, services = statuses.len(), "Health aggregated");

    HealthReport {
        status,
        services: statuses,
    }
}

fn grade(statuses: &[ServiceStatus]) -> HealthState {
    if statuses.is_empty() {
        return HealthState::Healthy;
    }
    let available = statuses.iter().filter(|s| s.available).count();
    let fraction = available as f64 / statuses.len() as f64;

    if available == statuses.len() {
        HealthState::Healthy
    } else if fraction >= 0.5 {
        HealthState::Degraded
    } else {
        HealthState::Unhealthy
    }
}

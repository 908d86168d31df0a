// src/output/writer.rs
//! Executes output operations by performing actual I/O.
//!
//! This module is the only place where the digest leaves the process,
//! keeping the rest of the codebase pure and testable. Failures are
//! recorded in the report and never retried.

use super::types::*;
use super::webhook::WebhookPublisher;
use crate::error::AppError;
use reqwest::StatusCode;
use std::io::Write;
use std::time::Instant;

/// Delivers the output plan, performing all I/O operations.
pub async fn deliver(plan: OutputPlan, publisher: &WebhookPublisher) -> OutputReport {
    let mut report = OutputReport::new();
    let start_time = Instant::now();

    log::info!(
        "Executing output plan with {} operations",
        plan.operations.len()
    );

    for operation in plan.operations {
        let op_start = Instant::now();
        match execute_operation(&operation, publisher).await {
            Ok(status) => {
                if let Some(status) = status {
                    log::info!("Payload delivered successfully, code {}.", status.as_u16());
                }
                report = report.with_completed(CompletedOperation {
                    operation,
                    status,
                    duration_ms: op_start.elapsed().as_millis() as u64,
                });
            }
            Err(e) => {
                log::error!("Delivery to {} failed: {}", operation.describe(), e);
                report = report.with_failed(FailedOperation {
                    operation,
                    error: e.to_string(),
                });
            }
        }
    }

    report.stats.total_duration_ms = start_time.elapsed().as_millis() as u64;

    log::info!(
        "Output plan execution complete: {} succeeded, {} failed in {}ms",
        report.stats.operations_completed,
        report.stats.operations_failed,
        report.stats.total_duration_ms
    );

    report
}

/// Executes a single output operation.
async fn execute_operation(
    operation: &DeliveryTarget,
    publisher: &WebhookPublisher,
) -> Result<Option<StatusCode>, AppError> {
    match operation {
        DeliveryTarget::PostWebhook { url, digest } => {
            publisher.publish(url, digest).await.map(Some)
        }
        DeliveryTarget::PrintToStdout { digest } => {
            print_to_stdout(digest.as_str())?;
            Ok(None)
        }
    }
}

/// Prints content to stdout.
fn print_to_stdout(content: &str) -> Result<(), AppError> {
    print!("{}", content);
    std::io::stdout().flush()?;
    Ok(())
}

// src/output/writer.rs
//! Carries out an output plan. The only module that writes rendered output.

use super::types::*;
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Performs every delivery in the plan.
///
/// Each target is attempted even when an earlier one failed; the failures
/// are collected into [`AppError::DeliveryFailed`].
pub fn deliver(plan: OutputPlan) -> Result<OutputReport, AppError> {
    let mut report = OutputReport::new();

    log::info!("Delivering output to {} target(s)", plan.targets.len());

    for target in plan.targets {
        match execute(&target) {
            Ok(bytes_written) => {
                report = report.with_completed(CompletedDelivery {
                    target,
                    bytes_written,
                });
            }
            Err(e) => {
                log::error!("Delivery to {} failed: {}", target.describe(), e);
                report = report.with_failed(FailedDelivery {
                    error: format!("{}: {}", target.describe(), e),
                    target,
                });
            }
        }
    }

    if !report.is_success() {
        return Err(AppError::DeliveryFailed {
            failures: report.failed.into_iter().map(|f| f.error).collect(),
        });
    }

    log::info!("Delivered {} bytes", report.bytes_written);
    Ok(report)
}

fn execute(target: &DeliveryTarget) -> Result<usize, AppError> {
    match target {
        DeliveryTarget::WriteFile { path, content } => write_file(path, content),
        DeliveryTarget::PrintToStdout { content } => {
            print_to_stdout(content)?;
            Ok(content.len())
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;

    log::info!("Wrote file: {}", path.display());
    Ok(content.len())
}

fn print_to_stdout(content: &str) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

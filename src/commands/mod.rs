// src/commands/mod.rs
//
// Commands module - presentation-facing handlers organized by feature.
// Each returns `Result<_, String>` so errors cross the host boundary as text.

mod dtos;
pub mod categories;
pub mod stats;
pub mod trackers;

pub use categories::*;
pub use dtos::*;
pub use stats::*;
pub use trackers::*;

use crate::error::AppError;

/// Log a failed command and convert its error for transport.
fn report_failure(action: &str) -> impl FnOnce(AppError) -> String + '_ {
    move |e| {
        log::error!("Failed to {action}: {e}");
        e.into()
    }
}

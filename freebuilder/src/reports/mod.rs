//! Report data structures for commands.
//!
//! Commands build reports, then render them to an [`Output`] target.

mod check;
mod generate;
mod output;

use freebuilder_processor::pipeline::{Diagnostic, Severity};

pub use check::CheckReport;
pub use generate::{GenerateReport, GeneratedEntry};
use output::Output;
pub use output::{Report, TerminalOutput};

/// Print each diagnostic at its severity.
fn render_diagnostics(diagnostics: &[Diagnostic], out: &mut dyn Output) {
    for diag in diagnostics {
        let msg = match &diag.location {
            Some(loc) => format!("{}\n  --> {}", diag.message, loc),
            None => diag.message.clone(),
        };
        match diag.severity {
            Severity::Error => out.error(&msg),
            Severity::Warning => out.warning(&msg),
            Severity::Info => out.note(&msg),
        }
    }
}

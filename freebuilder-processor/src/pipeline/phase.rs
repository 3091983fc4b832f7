//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

/// A step in the per-round pipeline.
///
/// Phases read and extend the [`CompilationContext`]. Problems with a
/// single type are recorded as diagnostics; an `Err` aborts the round.
pub trait Phase: Send + Sync {
    /// The name used in diagnostics.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run this phase on the compilation context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase cannot run at all, for instance when
    /// an earlier phase it depends on did not populate the context.
    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()>;
}

//! Completions command handler

use anyhow::{anyhow, Result};
use clap::CommandFactory;
use clap_complete::{generate, Shell as CompletionShell};
use std::io::{self, Write};

/// Handle completions command.
///
/// Writes the clap completion script for `shell` to stdout.
#[cfg(not(tarpaulin_include))]
pub fn handle<C: CommandFactory>(shell: Option<CompletionShell>) -> Result<()> {
    let shell = shell.ok_or_else(|| {
        anyhow!("Usage: hvp completions --shell <bash|zsh|fish|powershell|elvish>")
    })?;
    generate_completions::<C>(shell, &mut io::stdout())
}

/// Generate a shell completion script into `out`.
pub(crate) fn generate_completions<C: CommandFactory>(
    shell: CompletionShell,
    out: &mut dyn Write,
) -> Result<()> {
    let mut cmd = C::command();
    generate(shell, &mut cmd, "hvp", out);
    Ok(())
}

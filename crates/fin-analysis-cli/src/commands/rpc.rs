use std::io::{self, BufRead, Write};

use fin_analysis_core::tools;

/// Read one JSON-RPC message per line from stdin and answer each on stdout.
/// Blank lines are skipped; the loop ends at EOF.
pub fn serve_stdio() -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    tracing::info!("serving JSON-RPC on stdio");
    for line in stdin.lock().lines() {
        let line = line?;
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        tracing::debug!(bytes = message.len(), "request");
        let response = tools::handle_message(message);
        writeln!(out, "{response}")?;
        out.flush()?;
    }
    tracing::info!("stdin closed, stopping");
    Ok(())
}

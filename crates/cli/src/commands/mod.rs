pub(crate) mod ast;
pub(crate) mod check;
pub(crate) mod repl;

use robolang_core::Verdict;

use crate::OutputFormat;

/// One verdict as printed on stdout.
pub(crate) fn render_verdict(verdict: &Verdict, output: OutputFormat) -> String {
    match output {
        OutputFormat::Text => verdict.to_string(),
        OutputFormat::Json => serde_json::to_string(&verdict.to_json_value())
            .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e)),
    }
}

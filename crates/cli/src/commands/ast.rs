use std::io::ErrorKind;
use std::path::Path;
use std::process;

use robolang_core::{lexer, parse, FileSystemProvider, SourceProvider, REJECT_PREFIX};

use crate::{report_error, OutputFormat};

/// Print the parsed program as pretty JSON. Only lexing and parsing run;
/// declarations are not checked.
pub(crate) fn cmd_ast(file: &Path, output: OutputFormat, quiet: bool) {
    let src = match FileSystemProvider.read_source(file) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            report_error(&format!("file not found: {}", file.display()), output, quiet);
            process::exit(1);
        }
        Err(e) => {
            report_error(
                &format!("could not read '{}': {}", file.display(), e),
                output,
                quiet,
            );
            process::exit(1);
        }
    };

    match lexer::lex(&src).and_then(|tokens| parse(&tokens)) {
        Ok(program) => {
            let pretty = serde_json::to_string_pretty(&program)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        Err(e) => {
            if !quiet {
                match output {
                    OutputFormat::Json => {
                        let err_json = serde_json::to_string_pretty(&e.to_json_value())
                            .unwrap_or_else(|_| format!("{{\"error\": \"{:?}\"}}", e));
                        eprintln!("{}", err_json);
                    }
                    OutputFormat::Text => eprintln!("{}{}", REJECT_PREFIX, e),
                }
            }
            process::exit(1);
        }
    }
}

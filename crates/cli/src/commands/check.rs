use std::path::Path;
use std::process;

use robolang_core::{check_path, FileSystemProvider};

use super::render_verdict;
use crate::config::Settings;

pub(crate) fn cmd_check(file: &Path, settings: &Settings, quiet: bool) {
    let verdict = check_path(&FileSystemProvider, file, &settings.options);
    if !quiet {
        println!("{}", render_verdict(&verdict, settings.output));
    }
    if !verdict.is_accepted() {
        process::exit(1);
    }
}

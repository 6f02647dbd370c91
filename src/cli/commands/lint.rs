//! Lint command implementation - offline format check for a script file.

use crate::cli::Output;
use crate::script::ScriptDraft;
use anyhow::Result;
use std::io::Read;

/// Run the lint command.
pub fn run_lint(file: &str) -> Result<()> {
    let text = if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file)?
    };

    let draft = ScriptDraft::new(text);

    Output::kv("Words", &draft.word_count().to_string());
    let bold = draft.bold_terms();
    if !bold.is_empty() {
        Output::kv("Bold terms", &bold.join(", "));
    }

    let findings = draft.lint();
    if findings.is_empty() {
        Output::success("Script matches the format rules.");
    } else {
        Output::warning(&format!("{} finding(s):", findings.len()));
        for finding in &findings {
            Output::finding(finding);
        }
    }

    Ok(())
}

//! The three sequential pipeline stages: research, write, edit.
//!
//! Each stage consumes the previous stage's textual output. The researcher
//! and writer run tool-calling agents; the editor is a single completion.

mod editor;
mod researcher;
mod writer;

pub use editor::ScriptEditor;
pub use researcher::{ResearchBrief, TopicResearcher};
pub use writer::ScriptWriter;

/// Append the current date to a stage system prompt.
///
/// Keeps searches and "latest chapter" style claims anchored in time.
pub(crate) fn date_stamped(system: &str) -> String {
    format!(
        "{}\n\nCurrent date: {}",
        system,
        chrono::Utc::now().format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_stamped_appends_date() {
        let stamped = date_stamped("You are an editor.");
        assert!(stamped.starts_with("You are an editor."));
        assert!(stamped.contains("Current date: 20"));
    }
}

//! The script draft entity passed between pipeline stages.
//!
//! A draft is plain markdown-ish text. The format rules (word count, one
//! sentence per line, bold only on character names) are instructions to
//! the model, not hard constraints; `lint` reports deviations as advisory
//! findings and nothing ever rejects a draft over them.

use regex::Regex;

/// Target word count range for a finished script.
pub const MIN_WORDS: usize = 80;
/// Upper word bound for both draft and finished script.
pub const MAX_WORDS: usize = 120;

/// A script draft or final script.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptDraft {
    text: String,
}

impl ScriptDraft {
    /// Create a draft from raw model output.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into().trim().to_string(),
        }
    }

    /// The draft text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the draft has no content.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Word count with bold markers stripped.
    pub fn word_count(&self) -> usize {
        self.text.replace("**", "").split_whitespace().count()
    }

    /// Bolded terms, in order of first appearance, deduplicated.
    pub fn bold_terms(&self) -> Vec<String> {
        let re = Regex::new(r"\*\*([^*]+?)\*\*").expect("Invalid regex");
        let mut seen = Vec::new();
        for caps in re.captures_iter(&self.text) {
            let term = caps[1].trim().to_string();
            if !term.is_empty() && !seen.contains(&term) {
                seen.push(term);
            }
        }
        seen
    }

    /// Check the draft against the format contract and report deviations.
    pub fn lint(&self) -> Vec<LintFinding> {
        let mut findings = Vec::new();

        if self.is_empty() {
            findings.push(LintFinding::new(None, "script is empty"));
            return findings;
        }

        let words = self.word_count();
        if words < MIN_WORDS {
            findings.push(LintFinding::new(
                None,
                format!("only {} words (target {}-{})", words, MIN_WORDS, MAX_WORDS),
            ));
        } else if words > MAX_WORDS {
            findings.push(LintFinding::new(
                None,
                format!("{} words (target {}-{})", words, MIN_WORDS, MAX_WORDS),
            ));
        }

        let label_re = Regex::new(r"(?i)^(hook|facts?|contradiction|twist|reveal|title|intro|outro)\s*:")
            .expect("Invalid regex");
        // A sentence end followed by the start of another sentence on the same line
        let multi_sentence_re = Regex::new(r"[.!?]\s+[A-Z]").expect("Invalid regex");

        for (i, line) in self.text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line == "---" {
                continue;
            }

            if label_re.is_match(line) {
                findings.push(LintFinding::new(
                    Some(i + 1),
                    "section label (the format forbids HOOK:/FACTS: style headers)",
                ));
            }

            if multi_sentence_re.is_match(line) {
                findings.push(LintFinding::new(
                    Some(i + 1),
                    "multiple sentences on one line (expected one per line)",
                ));
            }
        }

        let first_line = self.text.lines().find(|l| !l.trim().is_empty());
        if let Some(first) = first_line {
            if !first.trim().starts_with("**") {
                findings.push(LintFinding::new(
                    Some(1),
                    "first line is not a bold title (expected **SHORT n: ...**)",
                ));
            }
        }

        findings
    }
}

impl std::fmt::Display for ScriptDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A single advisory lint finding.
#[derive(Debug, Clone, PartialEq)]
pub struct LintFinding {
    /// 1-based line number, when the finding points at a line.
    pub line: Option<usize>,
    pub message: String,
}

impl LintFinding {
    fn new(line: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for LintFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_script() -> ScriptDraft {
        ScriptDraft::new(
            "**SHORT 22: The Dumbest Character in One Piece**\n\n\
             **Luffy** might be the dumbest captain in One Piece...\n\n\
             But the dumbest character overall is someone else.\n\n\
             **Luffy** is basically Einstein compared to this guy.\n\n\
             And that guy is **Gedatsu**.\n\n\
             **Gedatsu** is so stupid that he literally forgets to breathe.\n\n\
             He rolls his eyes so far back that he cannot see anything.\n\n\
             Then he wonders why the world went dark around him.\n\n\
             He once climbed through a window next to an open door.\n\n\
             He puts food in his ears instead of his mouth.\n\n\
             Yes, **Luffy** is an idiot on most days.\n\n\
             But at least he remembers basic human functions.\n\n\
             **Gedatsu** literally has to remind himself to breathe and blink.",
        )
    }

    #[test]
    fn test_word_count_strips_bold() {
        let draft = ScriptDraft::new("**Gedatsu** forgets to breathe.");
        assert_eq!(draft.word_count(), 4);
    }

    #[test]
    fn test_bold_terms_deduplicated_in_order() {
        let draft = sample_script();
        assert_eq!(draft.bold_terms().first().map(String::as_str), Some("SHORT 22: The Dumbest Character in One Piece"));
        assert!(draft.bold_terms().contains(&"Gedatsu".to_string()));
        // Luffy appears three times but is listed once
        let luffys = draft
            .bold_terms()
            .iter()
            .filter(|t| *t == "Luffy")
            .count();
        assert_eq!(luffys, 1);
    }

    #[test]
    fn test_lint_clean_script() {
        let draft = sample_script();
        let words = draft.word_count();
        assert!(
            (MIN_WORDS..=MAX_WORDS).contains(&words),
            "sample should be in range, got {}",
            words
        );
        assert!(draft.lint().is_empty(), "findings: {:?}", draft.lint());
    }

    #[test]
    fn test_lint_empty_script() {
        let draft = ScriptDraft::new("   ");
        let findings = draft.lint();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("empty"));
    }

    #[test]
    fn test_lint_flags_short_script() {
        let draft = ScriptDraft::new("**SHORT 1: Tiny**\n\nToo short to count.");
        let findings = draft.lint();
        assert!(findings.iter().any(|f| f.message.contains("words")));
    }

    #[test]
    fn test_lint_flags_section_labels() {
        let draft = ScriptDraft::new("**SHORT 1: X**\n\nHOOK: something surprising.");
        let findings = draft.lint();
        assert!(findings.iter().any(|f| f.message.contains("section label")));
    }

    #[test]
    fn test_lint_flags_multiple_sentences_per_line() {
        let draft =
            ScriptDraft::new("**SHORT 1: X**\n\nFirst sentence here. Second sentence here.");
        let findings = draft.lint();
        assert!(findings
            .iter()
            .any(|f| f.message.contains("multiple sentences")));
    }

    #[test]
    fn test_lint_flags_missing_title() {
        let draft = ScriptDraft::new("No title on this one.");
        let findings = draft.lint();
        assert!(findings.iter().any(|f| f.message.contains("bold title")));
    }
}

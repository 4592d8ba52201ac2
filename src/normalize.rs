//! Spoken-punctuation normalization.
//!
//! Dictated transcripts spell punctuation out ("comma", "new line",
//! "question mark"). This module rewrites those cues into literal
//! punctuation through a fixed, ORDER-SENSITIVE rule list, then cleans up
//! the artifacts the insertions leave behind.
//!
//! Order matters twice over: "semicolon" must be rewritten before "colon"
//! (the former contains the latter), and the cleanup rules must run after
//! every insertion rule so they can trim the spacing and duplicate full
//! stops those insertions produce.

use std::sync::OnceLock;

use regex_lite::Regex;

/// A single rewrite applied to the transcript.
///
/// Spoken-phrase rules match case-insensitively and consume an optional
/// trailing period, so "comma." and "comma" both rewrite. Cleanup rules
/// match exactly as written.
#[derive(Debug)]
pub struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn spoken(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(&format!("(?i)(?:{pattern})\\.?")).unwrap(),
            replacement,
        }
    }

    fn cleanup(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }

    /// Apply this rule to `text`, replacing every match.
    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.replacement).into_owned()
    }
}

/// The canonical rule sequence, compiled once.
///
/// New rules can be inserted, but mind the order: later rules interact
/// with punctuation inserted by earlier ones.
pub fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            // Correct common mis-hearings of "copied to".
            Rule::spoken(r"cobb into|can't be to", "copied to"),
            // Before the plain "colon" rule: "semicolon" contains it.
            Rule::spoken(r"semicolon|semi colon|semi call in", ":"),
            Rule::spoken(r"new line|you line|new paragraph", "\n"),
            Rule::spoken(r"(?:full|four)[\s-]?(?:stop|step)", "."),
            Rule::spoken(r"closed brackets", ")"),
            Rule::spoken(r"open brackets", "("),
            Rule::spoken(r"question mark", "?"),
            Rule::spoken(r"colon|call in", ":"),
            Rule::spoken(r"comma|come up", ","),
            Rule::spoken(r"dash|hyphen", "-"),
            // Cleanup: trim spacing and stray full stops around the
            // punctuation inserted above.
            Rule::cleanup(r"\.\s*\)", ")"),
            Rule::cleanup(r"\s+\)", ")"),
            Rule::cleanup(r"\(\s+", "("),
            Rule::cleanup(r"\s+\.", "."),
            Rule::cleanup(r"\.{2,}", "."),
            Rule::cleanup(r",\s+", " "),
        ]
    })
}

/// Run the full pipeline over a raw transcript: every rule in order,
/// sentence-start capitalization, then a leading-whitespace strip.
pub fn normalize(raw: &str) -> String {
    let rewritten = rules()
        .iter()
        .fold(raw.to_string(), |text, rule| rule.apply(&text));

    let capitalized = capitalize_sentence_starts(&rewritten);

    capitalized.trim_start().to_string()
}

/// Uppercase the first word character after a literal ". ".
///
/// A bare newline does not start a sentence here; only ". " does.
fn capitalize_sentence_starts(text: &str) -> String {
    static SENTENCE_START: OnceLock<Regex> = OnceLock::new();
    let pattern = SENTENCE_START.get_or_init(|| Regex::new(r"\. \w").unwrap());

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for found in pattern.find_iter(text) {
        out.push_str(&text[last..found.start()]);
        out.push_str(&found.as_str().to_uppercase());
        last = found.end();
    }
    out.push_str(&text[last..]);
    out
}

//! Purpose: Classify JSON decode failures into stable diagnostic categories.
//! Exports: `ParseFailureCategory`, `categorize_error`, `hint_for_error`.
//! Role: Keeps parse diagnostics uniform across lookups and the CLI.
//! Invariants: Categories and their labels are stable once published.
//! Invariants: Hints never echo document content, only category and context.

use serde_json::error::Category;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseFailureCategory {
    Syntax,
    Eof,
    Data,
    Io,
}

impl ParseFailureCategory {
    pub(crate) fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Eof => "truncated",
            ParseFailureCategory::Data => "shape",
            ParseFailureCategory::Io => "io",
        }
    }
}

pub(crate) fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match err.classify() {
        Category::Syntax => ParseFailureCategory::Syntax,
        Category::Eof => ParseFailureCategory::Eof,
        Category::Data => ParseFailureCategory::Data,
        Category::Io => ParseFailureCategory::Io,
    }
}

pub(crate) fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    let category = categorize_error(err);
    let advice = match category {
        ParseFailureCategory::Syntax => "check the file is valid JSON",
        ParseFailureCategory::Eof => "the file ends before the JSON value is complete",
        ParseFailureCategory::Data => "the top-level value must be a JSON object",
        ParseFailureCategory::Io => "the file could not be read while decoding",
    };
    format!(
        "parse category: {}; context: {context}; {advice}",
        category.label()
    )
}

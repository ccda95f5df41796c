//! Snapshot text source.
//!
//! Producers emit snapshots either as plain JSON or as a JavaScript assignment
//! (`const root = { ... };`) with trailing commas. Both forms are reduced to a
//! `serde_json::Value` here; the loader only ever sees the parsed value.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

const DECLARATION_KEYWORDS: [&str; 3] = ["const", "let", "var"];

/// Errors raised while turning snapshot text into a JSON value.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The text contains nothing to parse.
    #[error("Snapshot is empty")]
    Empty,

    /// The text is not a parsable snapshot. Positions refer to the original text.
    #[error("Snapshot syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// The snapshot file could not be read.
    #[error("Failed to read snapshot `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Parses snapshot text in either JSON or JavaScript-assignment form.
///
/// # Errors
///
/// Returns `Empty` for blank input and `Syntax` when the remaining text is not
/// valid JSON after the declaration and trailing commas are removed.
pub fn parse_snapshot_text(text: &str) -> Result<Value, SourceError> {
    let (body, skipped) = strip_declaration(text)?;
    let body = body.trim_end();
    let body = body.strip_suffix(';').unwrap_or(body).trim_end();
    if body.trim_start().is_empty() {
        return Err(SourceError::Empty);
    }

    let line_offset = skipped.matches('\n').count();
    let column_offset = skipped.len() - skipped.rfind('\n').map_or(0, |nl| nl + 1);
    let cleaned = strip_trailing_commas(body);
    serde_json::from_str(&cleaned).map_err(|e| {
        let column = if e.line() == 1 {
            e.column() + column_offset
        } else {
            e.column()
        };
        SourceError::syntax(e.line() + line_offset, column, syntax_message(&e))
    })
}

/// serde_json's message without its own ` at line L column C` suffix, which
/// refers to the stripped body rather than the original text.
fn syntax_message(e: &serde_json::Error) -> String {
    let message = e.to_string();
    match message.rfind(" at line ") {
        Some(pos) => message[..pos].to_owned(),
        None => message,
    }
}

/// Reads and parses a snapshot file.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, otherwise see [`parse_snapshot_text`].
pub fn read_snapshot_file(path: &Path) -> Result<Value, SourceError> {
    let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "read snapshot file");
    parse_snapshot_text(&text)
}

/// Splits off an optional `[export] const|let|var <ident> =` prefix.
///
/// Returns the remaining body and the skipped prefix.
fn strip_declaration(text: &str) -> Result<(&str, &str), SourceError> {
    let trimmed = text.trim_start();
    let leading = &text[..text.len() - trimmed.len()];

    let after_export = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    let Some(after_keyword) = DECLARATION_KEYWORDS.iter().find_map(|kw| {
        after_export
            .strip_prefix(*kw)
            .filter(|rest| rest.starts_with(char::is_whitespace))
    }) else {
        return Ok((trimmed, leading));
    };

    let Some(eq) = after_keyword.find('=') else {
        let line = leading.matches('\n').count() + 1;
        return Err(SourceError::syntax(line, 1, "declaration without `=`"));
    };
    let ident = after_keyword[..eq].trim();
    if ident.is_empty() || !ident.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
        let line = leading.matches('\n').count() + 1;
        return Err(SourceError::syntax(
            line,
            1,
            format!("invalid declaration name `{ident}`"),
        ));
    }

    let body_start = text.len() - after_keyword.len() + eq + 1;
    Ok((&text[body_start..], &text[..body_start]))
}

/// Removes commas that directly precede `}` or `]`, ignoring string contents.
fn strip_trailing_commas(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut in_string = false;
    let mut escaped = false;

    for (pos, c) in body.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            out.push(c);
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = body[pos + 1..].trim_start().chars().next();
                if !matches!(next, Some('}' | ']')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json() {
        let value = parse_snapshot_text(r#"{"types": [], "packages": ["a"]}"#).unwrap();
        assert_eq!(value, json!({"types": [], "packages": ["a"]}));
    }

    #[test]
    fn test_js_assignment_with_trailing_commas() {
        let text = r##"const root = {
	"docs": [],
	"types": [
		{
			"modifiers": {
				"#": "java.util.Collections$UnmodifiableSet",},
			"name": "Color",
		},
	]
};
"##;
        let value = parse_snapshot_text(text).unwrap();
        assert_eq!(
            value,
            json!({
                "docs": [],
                "types": [{
                    "modifiers": {"#": "java.util.Collections$UnmodifiableSet"},
                    "name": "Color"
                }]
            })
        );
    }

    #[test]
    fn test_other_declaration_forms() {
        assert_eq!(parse_snapshot_text("let x = [1,]").unwrap(), json!([1]));
        assert_eq!(parse_snapshot_text("var $r = {}").unwrap(), json!({}));
        assert_eq!(
            parse_snapshot_text("export const root = {\"a\": 1,};").unwrap(),
            json!({"a": 1})
        );
    }

    #[test]
    fn test_commas_inside_strings_are_kept() {
        let value = parse_snapshot_text(r#"{"a": "x,}", "b": "q\",]",}"#).unwrap();
        assert_eq!(value, json!({"a": "x,}", "b": "q\",]"}));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_snapshot_text("   \n"), Err(SourceError::Empty)));
        assert!(matches!(
            parse_snapshot_text("const root = ;"),
            Err(SourceError::Empty)
        ));
    }

    #[test]
    fn test_syntax_error_reports_original_line() {
        let text = "\nconst root =\n{\n  \"a\": 1\n  \"b\": 2\n}";
        match parse_snapshot_text(text) {
            Err(SourceError::Syntax { line, .. }) => assert_eq!(line, 5),
            other => panic!("Expected Syntax, got {other:?}"),
        }
    }

    #[test]
    fn test_syntax_error_column_on_declaration_line() {
        let body = r#"{"documents": [] "modules": []}"#;
        let Err(SourceError::Syntax { line, column, .. }) = parse_snapshot_text(body) else {
            panic!("Expected Syntax for plain body");
        };
        assert_eq!(line, 1);

        let declared = format!("const root = {body}");
        match parse_snapshot_text(&declared) {
            Err(SourceError::Syntax {
                line: declared_line,
                column: declared_column,
                message,
            }) => {
                assert_eq!(declared_line, 1);
                assert_eq!(declared_column, column + "const root = ".len());
                assert!(!message.contains("at line"), "message: {message}");
                assert!(!message.is_empty());
            }
            other => panic!("Expected Syntax, got {other:?}"),
        }
    }

    #[test]
    fn test_syntax_message_has_single_position() {
        let text = "\nconst root =\n{\n  \"a\": 1\n  \"b\": 2\n}";
        let err = parse_snapshot_text(text).unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.starts_with("Snapshot syntax error at line 5, column "));
        assert_eq!(rendered.matches("line").count(), 1, "{rendered}");
    }

    #[test]
    fn test_bad_declaration() {
        assert!(matches!(
            parse_snapshot_text("const root {}"),
            Err(SourceError::Syntax { .. })
        ));
        assert!(matches!(
            parse_snapshot_text("const a b = {}"),
            Err(SourceError::Syntax { .. })
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_snapshot_file(&dir.path().join("missing.js")).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("missing.js"));
    }
}

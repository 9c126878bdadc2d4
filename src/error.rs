use thiserror::Error;

/// Errors produced while decoding, validating, or re-encoding cutscene
/// scripts. Parsing and serialization never panic on malformed input; every
/// failure path surfaces one of these variants with enough context to point
/// the user at the offending command.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CsError {
    /// Unknown command name, or a parameter list that does not match the
    /// grammar table (wrong count, wrong shape).
    #[error("line {line}: `{command}`: {message}")]
    Schema {
        command: String,
        message: String,
        line: usize,
    },

    /// A decoded or to-be-encoded value falls outside the declared range of
    /// its field. Fatal to the command/cutscene being processed, but never
    /// to sibling cutscenes in the same file.
    #[error("line {line}: `{command}.{field}`: `{raw}` is out of range ({message})")]
    Range {
        command: String,
        field: String,
        raw: String,
        message: String,
        line: usize,
    },

    /// Unbalanced parentheses, a list entry outside an open list, mismatched
    /// Eye/AT lists, a missing dummy cue, and similar shape violations.
    #[error("line {line}: {message}")]
    Structural { message: String, line: usize },

    /// Actor cues whose end state does not match the next cue's start state.
    /// Reported by validation; callers decide whether it is fatal.
    #[error("{message}")]
    Continuity { message: String },
}

impl CsError {
    pub fn schema(command: impl Into<String>, message: impl Into<String>, line: usize) -> Self {
        Self::Schema {
            command: command.into(),
            message: message.into(),
            line,
        }
    }

    pub fn range(
        command: impl Into<String>,
        field: impl Into<String>,
        raw: impl Into<String>,
        message: impl Into<String>,
        line: usize,
    ) -> Self {
        Self::Range {
            command: command.into(),
            field: field.into(),
            raw: raw.into(),
            message: message.into(),
            line,
        }
    }

    pub fn structural(message: impl Into<String>, line: usize) -> Self {
        Self::Structural {
            message: message.into(),
            line,
        }
    }

    pub fn continuity(message: impl Into<String>) -> Self {
        Self::Continuity {
            message: message.into(),
        }
    }
}

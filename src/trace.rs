// Per-candidate reasoning trace
//
// Each scoring task owns its own TraceLog; the orchestrator only reads them
// once the task has reported, so nothing here is shared between threads.

use std::fmt;

/// Append-only buffer of human-readable lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceLog {
    prefix: String,
    messages: Vec<String>,
}

impl TraceLog {
    /// Creates an empty trace whose lines are indented with `prefix`
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        TraceLog {
            prefix: prefix.into(),
            messages: Vec::new(),
        }
    }

    pub fn log(&mut self, message: impl AsRef<str>) {
        self.messages.push(format!("{}{}", self.prefix, message.as_ref()));
    }

    pub fn lines(&self) -> &[String] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl fmt::Display for TraceLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages.join("\n"))
    }
}

/// Traces of every candidate that reported during one decision
#[derive(Debug, Default)]
pub struct DecisionTrace {
    sections: Vec<(String, TraceLog)>,
}

impl DecisionTrace {
    pub fn new() -> Self {
        DecisionTrace::default()
    }

    /// Adds one candidate's trace under a heading
    pub fn merge(&mut self, heading: impl Into<String>, trace: TraceLog) {
        self.sections.push((heading.into(), trace));
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl fmt::Display for DecisionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (heading, trace)) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", heading)?;
            if !trace.is_empty() {
                write!(f, "\n{}", trace)?;
            }
        }
        Ok(())
    }
}

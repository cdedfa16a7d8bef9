//! Sinatra-style path pattern compilation.
//!
//! `/users/:id/posts/:post_id` compiles to the anchored regex
//! `^/users/([^#?/]+)/posts/([^#?/]+)$` with parameter names
//! `["id", "post_id"]`. Everything that is not a placeholder is escaped and
//! matched literally.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// A `:` followed by identifier characters. An empty identifier is reported
/// as an error by the compiler.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r":([A-Za-z0-9_]*)").expect("placeholder regex is valid")
});

/// Capture used in place of each placeholder: one or more characters within
/// a single segment, stopping at query and fragment delimiters.
const SEGMENT_CAPTURE: &str = "([^#?/]+)";

/// Error raised when a pattern cannot be turned into a matcher.
#[derive(Debug, Clone)]
pub enum PatternError {
    /// A `:` with no identifier after it
    EmptyPlaceholder {
        /// The offending pattern
        pattern: String,
        /// Byte offset of the `:`
        offset: usize,
    },
    /// The generated regex was rejected (for example it exceeded size limits)
    Regex {
        /// The offending pattern
        pattern: String,
        /// Error reported by the regex engine
        source: regex::Error,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::EmptyPlaceholder { pattern, offset } => write!(
                f,
                "invalid route pattern '{pattern}': placeholder at byte {offset} has no name"
            ),
            PatternError::Regex { pattern, source } => {
                write!(f, "invalid route pattern '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatternError::EmptyPlaceholder { .. } => None,
            PatternError::Regex { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    /// Accepts every path; used by catch-all routes.
    Anything,
}

/// Compiled, immutable path matcher plus its ordered parameter names.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    matcher: Matcher,
    names: Vec<String>,
}

impl Pattern {
    /// Compile a pattern string.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let (regex, names) = compile_pattern(pattern)?;
        Ok(Self {
            source: pattern.to_string(),
            matcher: Matcher::Regex(regex),
            names,
        })
    }

    /// A matcher that accepts every path and captures nothing.
    #[must_use]
    pub fn anything() -> Self {
        Self {
            source: "*".to_string(),
            matcher: Matcher::Anything,
            names: Vec::new(),
        }
    }

    /// Source text this pattern was compiled from (`*` for catch-all).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Parameter names in left-to-right order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        matches!(self.matcher, Matcher::Anything)
    }

    /// Whether `path` matches the whole pattern.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        match &self.matcher {
            Matcher::Regex(regex) => regex.is_match(path),
            Matcher::Anything => true,
        }
    }

    /// Captured segment values, positionally aligned with [`Pattern::names`].
    ///
    /// `None` when the path does not match.
    #[must_use]
    pub fn captures<'p>(&self, path: &'p str) -> Option<Vec<&'p str>> {
        match &self.matcher {
            Matcher::Regex(regex) => {
                let caps = regex.captures(path)?;
                Some(
                    caps.iter()
                        .skip(1)
                        .map(|m| m.map_or("", |m| m.as_str()))
                        .collect(),
                )
            }
            Matcher::Anything => Some(Vec::new()),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.source)
    }
}

/// Convert a pattern to an anchored regex and its parameter names.
///
/// Segments are split on `/` with empty segments preserved, so leading and
/// trailing slashes are significant.
pub(crate) fn compile_pattern(pattern: &str) -> Result<(Regex, Vec<String>), PatternError> {
    let mut regex = String::with_capacity(pattern.len() + 8);
    regex.push('^');
    let mut names = Vec::new();
    let mut offset = 0;

    for (i, segment) in pattern.split('/').enumerate() {
        if i > 0 {
            regex.push('/');
        }
        let mut literal_start = 0;
        for caps in PLACEHOLDER.captures_iter(segment) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if name.as_str().is_empty() {
                return Err(PatternError::EmptyPlaceholder {
                    pattern: pattern.to_string(),
                    offset: offset + whole.start(),
                });
            }
            regex.push_str(&regex::escape(&segment[literal_start..whole.start()]));
            regex.push_str(SEGMENT_CAPTURE);
            names.push(name.as_str().to_string());
            literal_start = whole.end();
        }
        regex.push_str(&regex::escape(&segment[literal_start..]));
        offset += segment.len() + 1;
    }

    regex.push('$');
    let compiled = Regex::new(&regex).map_err(|source| PatternError::Regex {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok((compiled, names))
}

//! Pattern compilation.
//!
//! # Responsibilities
//! - Split pattern strings and request paths on `/`, dropping empty parts
//! - Classify segments as literal or `:param`
//! - Validate segment lists built by hand
//!
//! # Design Decisions
//! - `/foo`, `foo` and `/foo/` compile to the same path
//! - No escaping: only a leading `:` is special
//! - String patterns never fail to compile; hand-built segments can

use std::fmt;

use crate::routing::types::{RouteError, RouteResult};

const SEPARATOR: char = '/';

/// One step of a pattern path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matches exactly this text.
    Literal(String),
    /// Matches any single segment, captured under this name.
    Param(String),
}

impl Segment {
    pub fn literal(text: impl Into<String>) -> Self {
        Segment::Literal(text.into())
    }

    pub fn param(name: impl Into<String>) -> Self {
        Segment::Param(name.into())
    }

    /// Classify one raw path component.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(':') {
            Some(name) => Segment::Param(name.to_string()),
            None => Segment::Literal(raw.to_string()),
        }
    }

    fn check(&self) -> Result<(), &'static str> {
        match self {
            Segment::Literal(text) if text.is_empty() => Err("empty literal segment"),
            Segment::Literal(text) | Segment::Param(text) if text.contains(SEPARATOR) => {
                Err("segment contains a path separator")
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Param(name) => write!(f, ":{name}"),
        }
    }
}

/// A compiled route pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PatternPath(Vec<Segment>);

impl PatternPath {
    /// The pattern matching only the root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Compile a pattern string.
    pub fn parse(pattern: &str) -> Self {
        PatternPath(split_path(pattern).map(Segment::parse).collect())
    }

    /// Accept a hand-built segment list after checking every segment.
    pub fn from_segments(segments: Vec<Segment>) -> RouteResult<Self> {
        for segment in &segments {
            if let Err(reason) = segment.check() {
                return Err(RouteError::MalformedPattern {
                    pattern: format!("{:?}", segments),
                    reason: reason.to_string(),
                });
            }
        }
        Ok(PatternPath(segments))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// This path followed by `other`.
    pub fn join(&self, other: &PatternPath) -> PatternPath {
        PatternPath(self.0.iter().chain(&other.0).cloned().collect())
    }

    pub(crate) fn push(&mut self, segment: Segment) {
        self.0.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Display for PatternPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// A pattern as accepted by route tables: source text or segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Source(String),
    Segments(Vec<Segment>),
    Compiled(PatternPath),
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Pattern::Source(source.to_string())
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        Pattern::Source(source)
    }
}

impl From<&String> for Pattern {
    fn from(source: &String) -> Self {
        Pattern::Source(source.clone())
    }
}

impl From<Vec<Segment>> for Pattern {
    fn from(segments: Vec<Segment>) -> Self {
        Pattern::Segments(segments)
    }
}

impl From<PatternPath> for Pattern {
    fn from(path: PatternPath) -> Self {
        Pattern::Compiled(path)
    }
}

/// Compile any accepted pattern form.
pub fn compile(pattern: impl Into<Pattern>) -> RouteResult<PatternPath> {
    match pattern.into() {
        Pattern::Source(source) => Ok(PatternPath::parse(&source)),
        Pattern::Segments(segments) => PatternPath::from_segments(segments),
        Pattern::Compiled(path) => Ok(path),
    }
}

/// Non-empty components of a path, in order.
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|part| !part.is_empty())
}

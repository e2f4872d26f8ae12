//! Styled text sinks.
//!
//! The host UI owns the concrete sink; renderers only see the
//! [`StyledTextSink`] trait for the duration of one render call.

use std::fmt::Write as _;

use super::types::{SegmentStyle, StyleKind, StyledSegment};

/// Receives styled text segments in emission order.
pub trait StyledTextSink {
    /// Append one segment. Segments are never merged by the caller.
    fn append(&mut self, text: &str, style: SegmentStyle);
}

/// Collects segments in memory.
#[derive(Debug, Default, Clone)]
pub struct SegmentBuffer {
    segments: Vec<StyledSegment>,
}

impl SegmentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[StyledSegment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<StyledSegment> {
        self.segments
    }

    /// Concatenated text of every segment.
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// `(text, kind)` pairs, convenient for assertions.
    pub fn kinds(&self) -> Vec<(&str, StyleKind)> {
        self.segments
            .iter()
            .map(|s| (s.text.as_str(), s.style.kind))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl StyledTextSink for SegmentBuffer {
    fn append(&mut self, text: &str, style: SegmentStyle) {
        self.segments.push(StyledSegment::new(text, style));
    }
}

/// Writes segments as 24-bit ANSI-colored text for terminal output.
#[derive(Debug, Default, Clone)]
pub struct AnsiSink {
    out: String,
    plain: bool,
}

impl AnsiSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that drops all styling.
    pub fn plain() -> Self {
        Self {
            out: String::new(),
            plain: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

impl StyledTextSink for AnsiSink {
    fn append(&mut self, text: &str, style: SegmentStyle) {
        let attrs = style.attributes;
        let mut codes: Vec<String> = Vec::new();
        if !self.plain {
            if attrs.bold {
                codes.push("1".to_string());
            }
            if attrs.italic {
                codes.push("3".to_string());
            }
            if let Some(fg) = attrs.fg {
                let [r, g, b] = fg.as_array();
                codes.push(format!("38;2;{r};{g};{b}"));
            }
            if let Some(bg) = attrs.bg {
                let [r, g, b] = bg.as_array();
                codes.push(format!("48;2;{r};{g};{b}"));
            }
        }

        if codes.is_empty() {
            self.out.push_str(text);
        } else {
            let _ = write!(self.out, "\x1b[{}m{}\x1b[0m", codes.join(";"), text);
        }
    }
}

//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that ties an error kind to the regions of input it came from.

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::Debug, io::{self, Write}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns the error kind as [`Any`], so that callers can recover the concrete error type.
    fn as_any(&self) -> &dyn Any;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns the error kind as the concrete type `K`, if it is one.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Returns true if the error kind is of the concrete type `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.downcast_ref::<K>().is_some()
    }

    /// Build a report from this error kind, for the given source code.
    ///
    /// The spans of an [`Error`] are byte offsets, while [`ariadne`] counts characters, so the
    /// spans are converted using `input` first.
    pub fn build_report_for<'a>(&self, src_id: &'a str, input: &str) -> Report<(&'a str, Range<usize>)> {
        let spans = self.spans
            .iter()
            .map(|span| char_offset(input, span.start)..char_offset(input, span.end))
            .collect::<Vec<_>>();
        self.kind.build_report(src_id, &spans)
    }

    /// Writes the report of this error to the given writer, using `input` as the source code the
    /// spans point into.
    pub fn write_report(&self, src_id: &str, input: &str, w: impl Write) -> io::Result<()> {
        self.build_report_for(src_id, input).write((src_id, Source::from(input)), w)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report_for(src_id, input).eprint((src_id, Source::from(input)))
    }
}

/// Converts a byte offset into `input` to a character offset.
fn char_offset(input: &str, byte: usize) -> usize {
    input.get(..byte).map_or(byte, |prefix| prefix.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_to_char_offsets() {
        assert_eq!(char_offset("8 ÷ 3", 0), 0);
        assert_eq!(char_offset("8 ÷ 3", 4), 3);
        assert_eq!(char_offset("8 ÷ 3", 6), 5);
        assert_eq!(char_offset("abc", 10), 10);
    }
}

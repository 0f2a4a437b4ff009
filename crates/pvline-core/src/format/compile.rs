//! Directive string to segment layout.

use super::field::{Field, FieldSet};

/// Most segments a layout holds; directives past this are dropped.
pub const MAX_SEGMENTS: usize = 99;

/// Widest `%A` preview, in bytes.
pub const MAX_LAST_OUTPUT: usize = 256;

/// Minimum column width of the `%N` label before its `:` suffix.
const NAME_WIDTH: usize = 9;
/// Longest name kept in the label, in bytes.
const NAME_MAX_BYTES: usize = 500;

/// One piece of the status line, in render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Constant text copied from the format string.
    Literal(String),
    /// A field whose width is known once its text has been rendered.
    Fixed(Field),
    /// A field sized from whatever width the fixed segments leave over.
    Variable(Field),
}

/// A compiled directive string. Rendering never mutates it; a change of
/// format or name produces a new one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layout {
    segments: Vec<Segment>,
    fields: FieldSet,
    last_output_len: usize,
    name_label: String,
}

impl Layout {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn fields(&self) -> FieldSet {
        self.fields
    }

    pub fn uses(&self, field: Field) -> bool {
        self.fields.contains(field)
    }

    /// Number of bytes shown by `%A`; 0 when the layout has none.
    pub fn last_output_len(&self) -> usize {
        self.last_output_len
    }

    /// Text rendered for `%N`, empty without a name.
    pub fn name_label(&self) -> &str {
        &self.name_label
    }
}

/// Format a transfer name for the `%N` field: right-aligned to nine
/// columns and followed by a colon. Names longer than 500 bytes are cut on
/// a character boundary.
pub fn name_label(name: &str) -> String {
    let mut end = name.len().min(NAME_MAX_BYTES);
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    format!("{:>width$}:", &name[..end], width = NAME_WIDTH)
}

/// Compile `directives` into a layout.
///
/// Never fails: unknown directives pass through as literal text, a trailing
/// `%` stays a literal `%`, and anything past `MAX_SEGMENTS` is dropped.
pub fn compile(directives: &str, name: Option<&str>) -> Layout {
    let mut layout = Layout {
        name_label: name.map(name_label).unwrap_or_default(),
        ..Layout::default()
    };

    let mut rest = directives;
    while !rest.is_empty() && layout.segments.len() < MAX_SEGMENTS {
        let Some(after) = rest.strip_prefix('%') else {
            let end = rest.find('%').unwrap_or(rest.len());
            layout.segments.push(Segment::Literal(rest[..end].to_owned()));
            rest = &rest[end..];
            continue;
        };

        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let width = after[..digits].bytes().fold(0usize, |n, d| {
            n.saturating_mul(10).saturating_add(usize::from(d - b'0'))
        });
        let tail = &after[digits..];

        let Some(letter) = tail.chars().next() else {
            layout.segments.push(Segment::Literal("%".to_owned()));
            rest = "";
            break;
        };
        rest = &tail[letter.len_utf8()..];

        let segment = match (letter, Field::from_directive(letter)) {
            ('%', _) => Segment::Literal("%".to_owned()),
            (_, Some(Field::Progress)) => Segment::Variable(Field::Progress),
            (_, Some(Field::LastOutput)) => {
                layout.last_output_len = width.clamp(1, MAX_LAST_OUTPUT);
                Segment::Fixed(Field::LastOutput)
            }
            (_, Some(field)) => Segment::Fixed(field),
            (other, None) => Segment::Literal(format!("%{other}")),
        };
        if let Segment::Fixed(field) | Segment::Variable(field) = segment {
            layout.fields.insert(field);
        }
        layout.segments.push(segment);
    }

    if !rest.is_empty() {
        tracing::debug!(
            dropped = rest.len(),
            "format string exceeds {} segments, remainder ignored",
            MAX_SEGMENTS
        );
    }
    layout
}

#[cfg(test)]
mod tests;

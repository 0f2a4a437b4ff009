//! Field kinds and the set of fields a layout uses.

use std::fmt;

/// A status-line component produced by a `%` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Progress,
    Timer,
    Eta,
    FinishTime,
    LastOutput,
    Rate,
    AverageRate,
    Bytes,
    BufferPercent,
    Name,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Progress,
        Field::Timer,
        Field::Eta,
        Field::FinishTime,
        Field::LastOutput,
        Field::Rate,
        Field::AverageRate,
        Field::Bytes,
        Field::BufferPercent,
        Field::Name,
    ];

    /// Directive letter selecting this field.
    pub fn directive(self) -> char {
        match self {
            Field::Progress => 'p',
            Field::Timer => 't',
            Field::Eta => 'e',
            Field::FinishTime => 'I',
            Field::LastOutput => 'A',
            Field::Rate => 'r',
            Field::AverageRate => 'a',
            Field::Bytes => 'b',
            Field::BufferPercent => 'T',
            Field::Name => 'N',
        }
    }

    pub fn from_directive(c: char) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.directive() == c)
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Progress => "progress",
            Field::Timer => "timer",
            Field::Eta => "eta",
            Field::FinishTime => "finish-time",
            Field::LastOutput => "last-output",
            Field::Rate => "rate",
            Field::AverageRate => "average-rate",
            Field::Bytes => "bytes",
            Field::BufferPercent => "buffer-percent",
            Field::Name => "name",
        };
        f.write_str(name)
    }
}

/// Set of fields enabled by a compiled layout: one bit per `Field`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSet(u16);

impl FieldSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, field: Field) {
        self.0 |= field.bit();
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Enabled fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(|f| self.contains(*f))
    }
}

impl FromIterator<Field> for FieldSet {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut set = FieldSet::empty();
        for f in iter {
            set.insert(f);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_letters_roundtrip() {
        for f in Field::ALL {
            assert_eq!(Field::from_directive(f.directive()), Some(f));
        }
        assert_eq!(Field::from_directive('z'), None);
        assert_eq!(Field::from_directive('%'), None);
    }

    #[test]
    fn set_insert_and_contains() {
        let mut set = FieldSet::empty();
        assert!(set.is_empty());
        set.insert(Field::Rate);
        set.insert(Field::Name);
        set.insert(Field::Rate);
        assert!(set.contains(Field::Rate));
        assert!(set.contains(Field::Name));
        assert!(!set.contains(Field::Timer));
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Field::Rate, Field::Name]);
    }
}

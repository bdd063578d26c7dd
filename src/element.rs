// src/element.rs
//
// Layout policy per documentation tag. Unknown tags are inline.

use bitflags::bitflags;

bitflags! {
    /// How an element's tags break from the surrounding words.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct ElementFormatting: u8 {
        /// Tags are broken from the words before and after by line breaks.
        const BLOCK = 1 << 0;
        /// No word break and no self-induced line break after the start tag.
        const SNUG_START = 1 << 1;
        /// No word break and no self-induced line break before the end tag.
        const SNUG_END = 1 << 2;
        const SNUG = Self::SNUG_START.bits() | Self::SNUG_END.bits();
        /// Content is indented by the indent size.
        const INDENT = 1 << 3;
        /// Breaks inside the content are kept as written.
        const PRESERVE = 1 << 4;
    }
}

impl ElementFormatting {
    /// No flags: tags flow with the words around them.
    pub const INLINE: Self = Self::empty();
}

type F = ElementFormatting;

static ELEMENTS: &[(&str, ElementFormatting)] = &[
    ("c", F::INLINE),
    ("paramref", F::INLINE),
    ("see", F::INLINE),
    ("typeparamref", F::INLINE),
    ("code", F::BLOCK.union(F::PRESERVE)),
    ("example", F::BLOCK),
    ("exception", F::BLOCK.union(F::SNUG).union(F::INDENT)),
    ("include", F::BLOCK.union(F::INDENT)),
    ("list", F::BLOCK.union(F::INDENT)),
    ("para", F::BLOCK),
    ("param", F::BLOCK.union(F::SNUG).union(F::INDENT)),
    ("permission", F::BLOCK.union(F::SNUG).union(F::INDENT)),
    ("remarks", F::BLOCK),
    ("returns", F::BLOCK.union(F::SNUG).union(F::INDENT)),
    ("seealso", F::BLOCK.union(F::SNUG).union(F::INDENT)),
    ("summary", F::BLOCK),
    ("value", F::BLOCK),
    ("typeparam", F::BLOCK.union(F::SNUG).union(F::INDENT)),
    ("listheader", F::BLOCK.union(F::INDENT)),
    ("item", F::BLOCK.union(F::INDENT)),
    ("term", F::BLOCK.union(F::SNUG).union(F::INDENT)),
    ("description", F::BLOCK.union(F::SNUG).union(F::INDENT)),
];

/// Formatting flags for a tag name. Names are case-sensitive, as in XML.
pub fn classify(name: &str) -> ElementFormatting {
    ELEMENTS
        .iter()
        .find(|(n, _)| *n == name)
        .map_or(ElementFormatting::INLINE, |&(_, f)| f)
}

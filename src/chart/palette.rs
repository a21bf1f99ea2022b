//! @ai:module:intent Deterministic pattern-to-colour assignment
//! @ai:module:layer domain
//! @ai:module:public_api TAB10, color_at, color_for
//! @ai:module:stateless true

use crate::chart::spec::SeriesColor;

/// Qualitative ten-colour palette (matplotlib `tab10`)
pub const TAB10: [SeriesColor; 10] = [
    SeriesColor(31, 119, 180),
    SeriesColor(255, 127, 14),
    SeriesColor(44, 160, 44),
    SeriesColor(214, 39, 40),
    SeriesColor(148, 103, 189),
    SeriesColor(140, 86, 75),
    SeriesColor(227, 119, 194),
    SeriesColor(127, 127, 127),
    SeriesColor(188, 189, 34),
    SeriesColor(23, 190, 207),
];

/// @ai:intent Colour for a position in the canonical pattern order
/// @ai:effects pure
pub fn color_at(index: usize) -> SeriesColor {
    TAB10[index % TAB10.len()]
}

/// @ai:intent Colour for a pattern given the sorted pattern list
/// @ai:pre sorted_patterns is in canonical (lexicographic) order
/// @ai:post None when the pattern is not in the list
/// @ai:effects pure
pub fn color_for(sorted_patterns: &[&str], pattern: &str) -> Option<SeriesColor> {
    sorted_patterns
        .iter()
        .position(|p| *p == pattern)
        .map(color_at)
}

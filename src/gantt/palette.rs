// src/gantt/palette.rs

/// Twenty-colour categorical palette (four shades of five hues).
const TAB20C: [&str; 20] = [
    "#3182bd", "#6baed6", "#9ecae1", "#c6dbef", "#e6550d", "#fd8d3c", "#fdae6b", "#fdd0a2",
    "#31a354", "#74c476", "#a1d99b", "#c7e9c0", "#756bb1", "#9e9ac8", "#bcbddc", "#dadaeb",
    "#636363", "#969696", "#bdbdbd", "#d9d9d9",
];

/// Colour for row `i`; wraps after twenty rows.
pub fn color_for_row(i: usize) -> &'static str {
    TAB20C[i % TAB20C.len()]
}

/// Outline for critical bars.
pub const CRITICAL_OUTLINE: &str = "#d62728";

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Terminal cells a string occupies.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

/// Width of one grapheme cluster; clusters with zero-width joiners or
/// combining marks still take the width of their widest scalar.
fn grapheme_width(g: &str) -> usize {
    if g == "\t" {
        return 4;
    }
    UnicodeWidthStr::width(g).min(2)
}

/// Cut `s` to at most `max_cells`, ending in `…` when anything was dropped.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = grapheme_width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Truncate or right-pad with spaces to exactly `cells` columns.
pub fn fit_to_width(s: &str, cells: usize) -> String {
    let mut out = truncate_to_width(s, cells);
    let w = display_width(&out);
    out.extend(std::iter::repeat_n(' ', cells.saturating_sub(w)));
    out
}

/// Byte offset of the grapheme after the one at `offset`, or None at the end.
pub fn next_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    let g = s.get(offset..)?.graphemes(true).next()?;
    Some(offset + g.len())
}

/// Byte offset of the grapheme before `offset`, or None at the start.
pub fn prev_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    let g = s.get(..offset)?.graphemes(true).next_back()?;
    Some(offset - g.len())
}

/// Start of the word left of `offset`, skipping whitespace first.
pub fn word_boundary_left(s: &str, offset: usize) -> usize {
    let Some(prefix) = s.get(..offset) else {
        return 0;
    };
    let mut start = offset;
    let mut in_word = false;
    for (i, g) in prefix.grapheme_indices(true).rev() {
        let blank = g.chars().all(char::is_whitespace);
        if blank && in_word {
            break;
        }
        in_word |= !blank;
        start = i;
    }
    start
}

//! Five-row block letters for presentation mode.

/// Height of a glyph in rows.
pub const GLYPH_HEIGHT: u16 = 5;

/// Width of a glyph in columns, not counting the gap.
const GLYPH_WIDTH: usize = 5;

/// Bitmap rows for a supported character, `#` marking a filled cell.
fn glyph(c: char) -> Option<[&'static str; 5]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [" ### ", "#   #", "#####", "#   #", "#   #"],
        'B' => ["#### ", "#   #", "#### ", "#   #", "#### "],
        'C' => [" ####", "#    ", "#    ", "#    ", " ####"],
        'D' => ["#### ", "#   #", "#   #", "#   #", "#### "],
        'E' => ["#####", "#    ", "#### ", "#    ", "#####"],
        'F' => ["#####", "#    ", "#### ", "#    ", "#    "],
        'G' => [" ####", "#    ", "#  ##", "#   #", " ####"],
        'H' => ["#   #", "#   #", "#####", "#   #", "#   #"],
        'I' => ["#####", "  #  ", "  #  ", "  #  ", "#####"],
        'J' => ["#####", "   # ", "   # ", "#  # ", " ##  "],
        'K' => ["#   #", "#  # ", "###  ", "#  # ", "#   #"],
        'L' => ["#    ", "#    ", "#    ", "#    ", "#####"],
        'M' => ["#   #", "## ##", "# # #", "#   #", "#   #"],
        'N' => ["#   #", "##  #", "# # #", "#  ##", "#   #"],
        'O' => [" ### ", "#   #", "#   #", "#   #", " ### "],
        'P' => ["#### ", "#   #", "#### ", "#    ", "#    "],
        'Q' => [" ### ", "#   #", "# # #", "#  # ", " ## #"],
        'R' => ["#### ", "#   #", "#### ", "#  # ", "#   #"],
        'S' => [" ####", "#    ", " ### ", "    #", "#### "],
        'T' => ["#####", "  #  ", "  #  ", "  #  ", "  #  "],
        'U' => ["#   #", "#   #", "#   #", "#   #", " ### "],
        'V' => ["#   #", "#   #", "#   #", " # # ", "  #  "],
        'W' => ["#   #", "#   #", "# # #", "## ##", "#   #"],
        'X' => ["#   #", " # # ", "  #  ", " # # ", "#   #"],
        'Y' => ["#   #", " # # ", "  #  ", "  #  ", "  #  "],
        'Z' => ["#####", "   # ", "  #  ", " #   ", "#####"],
        '?' => [" ### ", "#   #", "  ## ", "     ", "  #  "],
        '!' => ["  #  ", "  #  ", "  #  ", "     ", "  #  "],
        '-' => ["     ", "     ", "#####", "     ", "     "],
        ' ' => ["     ", "     ", "     ", "     ", "     "],
        _ => return None,
    };
    Some(rows)
}

/// Columns needed to render `word` in block letters.
pub fn width_of(word: &str) -> usize {
    let n = word.chars().count();
    if n == 0 { 0 } else { n * (GLYPH_WIDTH + 1) - 1 }
}

/// Render `word` as five lines of block letters.
///
/// Returns `None` if any character has no glyph.
pub fn render(word: &str) -> Option<Vec<String>> {
    let glyphs: Vec<[&str; 5]> = word.chars().map(glyph).collect::<Option<_>>()?;
    let lines = (0..GLYPH_HEIGHT as usize)
        .map(|row| {
            glyphs
                .iter()
                .map(|g| g[row].replace('#', "\u{2588}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    Some(lines)
}

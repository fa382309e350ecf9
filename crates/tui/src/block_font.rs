use std::collections::HashMap;

use once_cell::sync::Lazy;

const FONT_HEIGHT: usize = 5;
const FONT_WIDTH: usize = 5;
const SPACING: usize = 1;
const SHADOW_OFFSET: usize = 1;
const FILL_CHAR: char = '█';
const SHADOW_CHAR: char = '░';

type Glyph = [&'static str; FONT_HEIGHT];

const UNKNOWN: Glyph = [" 111 ", "1   1", "  11 ", "     ", "  1  "];

static GLYPHS: Lazy<HashMap<char, Glyph>> = Lazy::new(|| {
    HashMap::from([
        ('A', [" 111 ", "1   1", "11111", "1   1", "1   1"]),
        ('D', ["1111 ", "1   1", "1   1", "1   1", "1111 "]),
        ('E', ["11111", "1    ", "1111 ", "1    ", "11111"]),
        ('G', [" 1111", "1    ", "1  11", "1   1", " 111 "]),
        ('H', ["1   1", "1   1", "11111", "1   1", "1   1"]),
        ('I', ["11111", "  1  ", "  1  ", "  1  ", "11111"]),
        ('N', ["1   1", "11  1", "1 1 1", "1  11", "1   1"]),
        ('O', [" 111 ", "1   1", "1   1", "1   1", " 111 "]),
        ('R', ["1111 ", "1   1", "1111 ", "1  1 ", "1   1"]),
        ('T', ["11111", "  1  ", "  1  ", "  1  ", "  1  "]),
        ('W', ["1   1", "1   1", "1 1 1", "11 11", "1   1"]),
        ('Y', ["1   1", " 1 1 ", "  1  ", "  1  ", "  1  "]),
        ('?', UNKNOWN),
        (' ', ["     ", "     ", "     ", "     ", "     "]),
    ])
});

/// Rows produced by [`render`].
pub const fn height() -> usize {
    FONT_HEIGHT + SHADOW_OFFSET
}

/// Columns needed to render `text`.
pub fn width(text: &str) -> usize {
    let glyphs = text.chars().count();
    if glyphs == 0 {
        return 0;
    }
    glyphs * FONT_WIDTH + (glyphs - 1) * SPACING + SHADOW_OFFSET
}

/// Render `text` in the banner font with a drop shadow.
///
/// Letters without a glyph are drawn as `?`.
pub fn render(text: &str) -> Vec<String> {
    let content: Vec<char> = text.chars().map(|c| c.to_ascii_uppercase()).collect();
    if content.is_empty() {
        return vec![String::new(); height()];
    }

    let mut canvas = vec![vec![' '; width(text)]; height()];
    for (index, ch) in content.iter().enumerate() {
        let glyph = GLYPHS.get(ch).unwrap_or(&UNKNOWN);
        paint_glyph(&mut canvas, glyph, index * (FONT_WIDTH + SPACING));
    }

    canvas
        .into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
        .collect()
}

fn paint_glyph(canvas: &mut [Vec<char>], glyph: &Glyph, x_offset: usize) {
    for (y, row) in glyph.iter().enumerate() {
        for (col, symbol) in row.chars().enumerate() {
            if symbol == '1' {
                let x = x_offset + col;
                place(canvas, y + SHADOW_OFFSET, x + SHADOW_OFFSET, SHADOW_CHAR);
                place(canvas, y, x, FILL_CHAR);
            }
        }
    }
}

fn place(canvas: &mut [Vec<char>], y: usize, x: usize, ch: char) {
    if y >= canvas.len() || x >= canvas[y].len() {
        return;
    }
    let cell = &mut canvas[y][x];
    // Fill always wins over shadow, whichever glyph painted first.
    if *cell == ' ' || (*cell == SHADOW_CHAR && ch == FILL_CHAR) {
        *cell = ch;
    }
}

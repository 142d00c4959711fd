//! Pre-laid-out card faces.
//!
//! A face is built once per card at mount time: every text row is resolved
//! into fixed display cells so the carousel widget can clip a card at any
//! column without re-measuring strings each frame.  Wide (CJK) glyphs take
//! two cells, the second of which is a [`FaceCell::Continuation`].

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::card::Card;

/// Columns between the card border and its text, on each side.
const PADDING: u16 = 1;

/// What a text cell is used for; picks the style at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Title,
    Subtitle,
    Blurb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceCell {
    Blank,
    Glyph(char, Role),
    /// Right half of the wide glyph in the previous cell.
    Continuation,
}

/// A card's text content laid out on a fixed cell grid.
#[derive(Debug, Clone)]
pub struct CardFace {
    /// Text rows, each exactly `text_width` cells.
    rows: Vec<Vec<FaceCell>>,
    width: u16,
    height: u16,
}

impl CardFace {
    /// Lay out `card` for a box of `width × height` cells (border included).
    pub fn build(card: &Card, width: u16, height: u16) -> Self {
        let text_width = width.saturating_sub(2 + 2 * PADDING) as usize;
        let text_rows = height.saturating_sub(2) as usize;

        let mut lines: Vec<(String, Role)> = vec![
            (card.title.clone(), Role::Title),
            (card.subtitle.clone(), Role::Subtitle),
        ];
        lines.extend(
            wrap(&card.blurb, text_width)
                .into_iter()
                .map(|l| (l, Role::Blurb)),
        );

        // The last visible row gets an ellipsis when the blurb runs over.
        let overflow = lines.len() > text_rows;
        lines.truncate(text_rows);
        let rows = lines
            .iter()
            .enumerate()
            .map(|(i, (text, role))| {
                let mut text = text.clone();
                if overflow && i + 1 == text_rows && *role == Role::Blurb {
                    text.push('…');
                }
                fit(&text, text_width, *role)
            })
            .collect();

        Self {
            rows,
            width,
            height,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Cell at the given position inside the padded text area.
    pub fn cell(&self, row: usize, col: usize) -> FaceCell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(FaceCell::Blank)
    }

    /// Map a card-local column (0 = left border) to a text column.
    pub fn text_col(&self, local_col: u16) -> Option<usize> {
        let first = 1 + PADDING;
        let last = self.width.saturating_sub(1 + PADDING);
        (local_col >= first && local_col < last).then(|| (local_col - first) as usize)
    }
}

/// Lay `text` out into exactly `width` cells, ending in `…` when cut.
fn fit(text: &str, width: usize, role: Role) -> Vec<FaceCell> {
    let budget = if text.width() > width {
        width.saturating_sub(1)
    } else {
        width
    };

    let mut cells = Vec::with_capacity(width);
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if w == 0 {
            continue;
        }
        if cells.len() + w > budget {
            break;
        }
        cells.push(FaceCell::Glyph(c, role));
        if w == 2 {
            cells.push(FaceCell::Continuation);
        }
    }
    if budget < width && width > 0 {
        cells.push(FaceCell::Glyph('…', role));
    }
    cells.resize(width, FaceCell::Blank);
    cells
}

/// Greedy word wrap by display width.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut used = 0;
    for word in text.split_whitespace() {
        let w = word.width();
        if used > 0 && used + 1 + w > width {
            lines.push(std::mem::take(&mut line));
            used = 0;
        }
        if used > 0 {
            line.push(' ');
            used += 1;
        }
        line.push_str(word);
        used += w;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

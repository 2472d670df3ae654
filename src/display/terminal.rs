//! crossterm backend for `Canvas`.
//!
//! The 800x600 surface is scaled onto the terminal grid; each cell covers
//! `CANVAS_WIDTH / cols` by `CANVAS_HEIGHT / rows` surface units. Draw calls
//! only touch an in-memory cell buffer, `present` writes it out in one go.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use super::Canvas;
use crate::constants::{Rgb, CANVAS_HEIGHT, CANVAS_WIDTH, C_BACKGROUND};
use crate::error::GameError;

pub const MIN_COLS: u16 = 80;
pub const MIN_ROWS: u16 = 24;

const GLYPH_SOLID: char = '█';
const GLYPH_SPECK: char = '·';

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    glyph: char,
    fg: Rgb,
}

pub struct TerminalCanvas<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    cell_w: f32,
    cell_h: f32,
    background: Rgb,
    cells: Vec<Cell>,
    /// Actual terminal size while it is below the minimum.
    undersized: Option<(u16, u16)>,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Result<Self, GameError> {
        let mut canvas = TerminalCanvas {
            out,
            cols: 0,
            rows: 0,
            cell_w: 1.0,
            cell_h: 1.0,
            background: C_BACKGROUND,
            cells: Vec::new(),
            undersized: None,
        };
        canvas.resize(cols, rows)?;
        Ok(canvas)
    }

    /// Re-fit the surface to a new terminal size. A size below the minimum is
    /// an error and leaves the grid as it was; `present` then only shows a
    /// notice until a large enough size arrives.
    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<(), GameError> {
        if cols < MIN_COLS || rows < MIN_ROWS {
            self.undersized = Some((cols, rows));
            return Err(GameError::TerminalTooSmall {
                cols,
                rows,
                min_cols: MIN_COLS,
                min_rows: MIN_ROWS,
            });
        }
        self.undersized = None;
        self.cols = cols;
        self.rows = rows;
        self.cell_w = CANVAS_WIDTH / f32::from(cols);
        self.cell_h = CANVAS_HEIGHT / f32::from(rows);
        self.cells = vec![self.blank(); usize::from(cols) * usize::from(rows)];
        Ok(())
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn is_undersized(&self) -> bool {
        self.undersized.is_some()
    }

    pub fn glyph_at(&self, col: u16, row: u16) -> Option<char> {
        self.index(col, row).map(|i| self.cells[i].glyph)
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Write the whole cell buffer to the terminal.
    pub fn present(&mut self) -> io::Result<()> {
        if let Some((cols, rows)) = self.undersized {
            return self.present_notice(cols, rows);
        }
        self.out.queue(style::SetBackgroundColor(to_color(self.background)))?;
        let mut current: Option<Rgb> = None;
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            for col in 0..self.cols {
                let cell = self.cells[usize::from(row) * usize::from(self.cols) + usize::from(col)];
                if current != Some(cell.fg) {
                    self.out.queue(style::SetForegroundColor(to_color(cell.fg)))?;
                    current = Some(cell.fg);
                }
                self.out.queue(Print(cell.glyph))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }

    fn present_notice(&mut self, cols: u16, rows: u16) -> io::Result<()> {
        self.out.queue(style::ResetColor)?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out.queue(Print(format!(
            "TERMINAL PEQUENO DEMAIS: {cols}x{rows} (MÍNIMO {MIN_COLS}x{MIN_ROWS})"
        )))?;
        self.out.flush()
    }

    fn blank(&self) -> Cell {
        Cell {
            glyph: ' ',
            fg: self.background,
        }
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        (col < self.cols && row < self.rows)
            .then(|| usize::from(row) * usize::from(self.cols) + usize::from(col))
    }

    /// Inclusive range of cells a span `[start, start + len)` touches along one axis.
    fn span(start: f32, len: f32, unit: f32, limit: u16) -> Option<(u16, u16)> {
        if len <= 0.0 {
            return None;
        }
        let first = (start / unit).floor();
        let last = ((start + len) / unit).ceil() - 1.0;
        if last < 0.0 || first >= f32::from(limit) {
            return None;
        }
        let first = first.max(0.0) as u16;
        let last = last.min(f32::from(limit) - 1.0) as u16;
        Some((first, last))
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn clear(&mut self, color: Rgb) {
        self.background = color;
        let blank = self.blank();
        self.cells.fill(blank);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        let Some((c0, c1)) = Self::span(x, w, self.cell_w, self.cols) else {
            return;
        };
        let Some((r0, r1)) = Self::span(y, h, self.cell_h, self.rows) else {
            return;
        };
        // Tiny rects (stars, small sparks) become specks instead of blocks.
        let glyph = if color == self.background {
            ' '
        } else if w * h * 8.0 < self.cell_w * self.cell_h {
            GLYPH_SPECK
        } else {
            GLYPH_SOLID
        };
        for row in r0..=r1 {
            for col in c0..=c1 {
                if let Some(i) = self.index(col, row) {
                    self.cells[i] = Cell { glyph, fg: color };
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgb) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let row = (y / self.cell_h) as u16;
        let start = (x / self.cell_w) as u16;
        for (offset, glyph) in text.chars().enumerate() {
            let col = usize::from(start) + offset;
            let Ok(col) = u16::try_from(col) else { break };
            match self.index(col, row) {
                Some(i) => self.cells[i] = Cell { glyph, fg: color },
                None => break,
            }
        }
    }

    fn char_width(&self) -> f32 {
        self.cell_w
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

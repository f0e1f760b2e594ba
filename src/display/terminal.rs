/// Crossterm-backed `Surface`.
///
/// The game works in surface units; each terminal cell covers
/// `cell_width` × `cell_height` of them.  Anything outside the screen is
/// clipped, which matters because the player and stray shots can wander off.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use super::Surface;
use crate::entities::{Paint, Rect};
use crate::error::Result;

// ── Colour palette ────────────────────────────────────────────────────────────

fn color_for(paint: Paint) -> Color {
    match paint {
        Paint::Blue => Color::Blue,
        Paint::Red => Color::Red,
        Paint::Green => Color::Green,
        // Terminals are usually dark, so "black" ink is drawn light.
        Paint::Black => Color::White,
    }
}

const BLOCK: &str = "█";

pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    cell_width: i32,
    cell_height: i32,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16, cell_width: i32, cell_height: i32) -> Self {
        TerminalSurface {
            out,
            cols,
            rows,
            cell_width,
            cell_height,
        }
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Terminal cell span `[first, last)` covered by `[start, end)` units,
    /// clipped to `0..limit`.
    fn cell_span(start: i32, end: i32, unit: i32, limit: u16) -> (u16, u16) {
        let first = start.div_euclid(unit).max(0);
        let last = (end + unit - 1).div_euclid(unit).min(limit as i32);
        if first >= last {
            (0, 0)
        } else {
            (first as u16, last as u16)
        }
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn size(&self) -> (i32, i32) {
        (
            self.cols as i32 * self.cell_width,
            self.rows as i32 * self.cell_height,
        )
    }

    fn clear(&mut self) -> Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, paint: Paint) -> Result<()> {
        if rect.width <= 0 || rect.height <= 0 {
            return Ok(());
        }
        let (c0, c1) = Self::cell_span(rect.x, rect.right(), self.cell_width, self.cols);
        let (r0, r1) = Self::cell_span(rect.y, rect.bottom(), self.cell_height, self.rows);
        if c0 == c1 || r0 == r1 {
            return Ok(());
        }

        let run = BLOCK.repeat((c1 - c0) as usize);
        self.out.queue(style::SetForegroundColor(color_for(paint)))?;
        for row in r0..r1 {
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out.queue(Print(&run))?;
        }
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32, _font_px: u16, paint: Paint) -> Result<()> {
        let row = y.div_euclid(self.cell_height);
        if row < 0 || row >= self.rows as i32 {
            return Ok(());
        }
        let col = x.div_euclid(self.cell_width);
        // Drop leading characters that fall left of the screen.
        let skip = (-col).max(0) as usize;
        let col = col.max(0);
        let room = (self.cols as i32 - col).max(0) as usize;
        let visible: String = text.chars().skip(skip).take(room).collect();
        if visible.is_empty() {
            return Ok(());
        }

        self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
        self.out.queue(style::SetForegroundColor(color_for(paint)))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_in_surface_units() {
        let s = TerminalSurface::new(Vec::new(), 80, 24, 10, 20);
        assert_eq!(s.size(), (800, 480));
    }

    #[test]
    fn cell_span_rounds_outward() {
        // 50 units starting at 95 touches columns 9..=14
        assert_eq!(TerminalSurface::<Vec<u8>>::cell_span(95, 145, 10, 80), (9, 15));
    }

    #[test]
    fn cell_span_clips_to_screen() {
        assert_eq!(TerminalSurface::<Vec<u8>>::cell_span(-30, 20, 10, 80), (0, 2));
        assert_eq!(TerminalSurface::<Vec<u8>>::cell_span(790, 850, 10, 80), (79, 80));
        assert_eq!(TerminalSurface::<Vec<u8>>::cell_span(900, 950, 10, 80), (0, 0));
    }

    #[test]
    fn offscreen_rect_writes_nothing() {
        let mut s = TerminalSurface::new(Vec::new(), 10, 10, 10, 20);
        s.fill_rect(Rect::new(-500, -500, 50, 50), Paint::Blue).unwrap();
        assert!(s.into_inner().is_empty());
    }

    #[test]
    fn onscreen_rect_prints_blocks() {
        let mut s = TerminalSurface::new(Vec::new(), 10, 10, 10, 20);
        s.fill_rect(Rect::new(0, 0, 30, 20), Paint::Red).unwrap();
        let out = String::from_utf8(s.into_inner()).unwrap();
        assert!(out.contains("███"));
    }
}

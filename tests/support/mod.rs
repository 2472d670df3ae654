#![allow(dead_code)]

use astrobit_defender::constants::Rgb;
use astrobit_defender::display::Canvas;

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Clear(Rgb),
    Rect { x: f32, y: f32, w: f32, h: f32, color: Rgb },
    Text { text: String, x: f32, y: f32, color: Rgb },
}

/// Canvas that just remembers what was drawn.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<Op>,
}

impl RecordingCanvas {
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text_containing(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    pub fn rects_with(&self, color: Rgb) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Rect { color: c, .. } if *c == color))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Rgb) {
        self.ops.push(Op::Clear(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.ops.push(Op::Rect { x, y, w, h, color });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgb) {
        self.ops.push(Op::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }

    fn char_width(&self) -> f32 {
        8.0
    }
}

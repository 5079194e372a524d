//! Drawing primitives used by robots to paint themselves.
//!
//! Robots never touch pixels. Every visual effect is one call on a [`Painter`], which lets a
//! front end render them however it likes and lets tests simply log the calls.

use std::fmt::{self, Write};

use crate::domain::{Color, Image, Position};

pub trait Painter {
    /// Draws the outline of a rectangle whose top left corner is at (x, y).
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32);

    /// Draws the outline of the oval inscribed in the given rectangle.
    fn draw_oval(&mut self, x: i32, y: i32, width: i32, height: i32);

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32);

    fn color(&self) -> Color;

    fn set_color(&mut self, color: Color);

    /// Moves the origin of the coordinate system by (dx, dy).
    fn translate(&mut self, dx: i32, dy: i32);

    /// Draws `text` centred within the given rectangle.
    fn draw_centred_text(&mut self, text: &str, x: i32, y: i32, width: i32, height: i32);

    fn draw_scaled_image(&mut self, image: &Image, x: i32, y: i32, width: i32, height: i32);

    /// Draws `image` at its natural size.
    fn draw_image(&mut self, image: &Image, x: i32, y: i32) {
        let size = image.size();
        self.draw_scaled_image(image, x, y, size.width(), size.height());
    }
}

/// Moves the painter's origin for as long as it is alive and moves it back when dropped.
pub struct Translation<'a> {
    painter: &'a mut dyn Painter,
    dx: i32,
    dy: i32,
}

impl<'a> Translation<'a> {
    pub fn new(painter: &'a mut dyn Painter, position: Position) -> Self {
        let (dx, dy) = (position.x(), position.y());
        painter.translate(dx, dy);
        Self { painter, dx, dy }
    }

    pub fn painter(&mut self) -> &mut (dyn Painter + 'a) {
        &mut *self.painter
    }
}

impl Drop for Translation<'_> {
    fn drop(&mut self) {
        self.painter.translate(-self.dx, -self.dy);
    }
}

/// Painter that draws nothing and logs every drawing request instead. The log is available
/// through the [`fmt::Display`] implementation.
///
/// Translations are not logged and do not change logged coordinates; the resulting origin is
/// available through [`RecordingPainter::origin`].
#[derive(Clone, Debug, Default)]
pub struct RecordingPainter {
    log: String,
    color: Color,
    origin: Position,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }

    fn record(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.log.write_fmt(args);
    }
}

impl fmt::Display for RecordingPainter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.log)
    }
}

impl Painter for RecordingPainter {
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.record(format_args!("(rectangle {x},{y},{width},{height})"));
    }

    fn draw_oval(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.record(format_args!("(oval {x},{y},{width},{height})"));
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.record(format_args!("(line {x1},{y1},{x2},{y2})"));
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.record(format_args!("(filled rectangle {x},{y},{width},{height})"));
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.record(format_args!("(colour {color})"));
        self.color = color;
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.origin = Position::new(self.origin.x() + dx, self.origin.y() + dy);
    }

    fn draw_centred_text(&mut self, text: &str, x: i32, y: i32, width: i32, height: i32) {
        self.record(format_args!("(text {text:?} {x},{y},{width},{height})"));
    }

    fn draw_scaled_image(&mut self, image: &Image, x: i32, y: i32, width: i32, height: i32) {
        let source = image.source();
        self.record(format_args!("(image {source} {x},{y},{width},{height})"));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::Size;

    #[test]
    fn test_recording_painter_log() {
        let mut painter = RecordingPainter::new();
        painter.draw_rect(1, 2, 3, 4);
        painter.draw_line(0, 0, 5, 5);
        painter.draw_centred_text("Robot", 1, 2, 3, 4);
        insta::assert_snapshot!(painter.to_string(), @r#"(rectangle 1,2,3,4)(line 0,0,5,5)(text "Robot" 1,2,3,4)"#);

        painter.clear();
        assert_eq!(painter.to_string(), "");
    }

    #[test]
    fn test_draw_image_uses_natural_size() {
        let mut painter = RecordingPainter::new();
        painter.draw_image(&Image::new("robot.png", Size::new(7, 9)), 3, 4);
        assert_eq!(painter.to_string(), "(image robot.png 3,4,7,9)");
    }

    #[test]
    fn test_translation_is_undone_on_drop() {
        let mut painter = RecordingPainter::new();
        {
            let mut translation = Translation::new(&mut painter, Position::new(10, 20));
            translation.painter().translate(1, 1);
            translation.painter().translate(-1, -1);
        }
        assert_eq!(painter.origin(), Position::new(0, 0));
    }

    #[test]
    fn test_color_is_tracked() {
        let mut painter = RecordingPainter::new();
        assert_eq!(painter.color(), Color::BLACK);
        painter.set_color(Color::RED);
        assert_eq!(painter.color(), Color::RED);
        assert_eq!(painter.to_string(), "(colour 255,0,0)");
    }
}

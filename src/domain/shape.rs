//! The closed set of robot looks. Movement and bookkeeping live in the robot node; a shape
//! only knows how to draw itself into a bounding box.

use std::{fmt, str::FromStr};

use thiserror::Error;

use super::{Bounce, Color, Image, Position, Size};
use crate::painter::Painter;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Shape {
    /// Outlined rectangle.
    Wheeled,
    /// Oval.
    Flying,
    /// Hexagonal line art, or a diamond when the robot is narrower than 40 on either side.
    Tracked,
    /// Outlined rectangle that turns into a rectangle filled with `color` after bouncing off
    /// a vertical wall, and turns back after a horizontal-only bounce.
    DynamicWheeled { color: Color, filled: bool },
    /// Picture scaled to the bounding box.
    Image(Image),
}

impl Shape {
    pub fn dynamic_wheeled(color: Color) -> Self {
        Shape::DynamicWheeled {
            color,
            filled: false,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Wheeled => ShapeKind::Wheeled,
            Shape::Flying => ShapeKind::Flying,
            Shape::Tracked => ShapeKind::Tracked,
            Shape::DynamicWheeled { .. } => ShapeKind::DynamicWheeled,
            Shape::Image(_) => ShapeKind::Image,
        }
    }

    /// Updates the look from the walls hit by the last move.
    pub(super) fn bounced(&mut self, bounce: Bounce) {
        if let Shape::DynamicWheeled { filled, .. } = self {
            if bounce.vertical {
                *filled = true;
            } else if bounce.horizontal {
                *filled = false;
            }
        }
    }

    pub(super) fn paint(&self, painter: &mut dyn Painter, position: Position, size: Size) {
        let (x, y) = (position.x(), position.y());
        let (width, height) = (size.width(), size.height());

        match self {
            Shape::Wheeled => painter.draw_rect(x, y, width, height),
            Shape::Flying => painter.draw_oval(x, y, width, height),
            Shape::Tracked => paint_tracks(painter, x, y, width, height),
            Shape::DynamicWheeled { color, filled } => {
                if *filled {
                    let previous = painter.color();
                    painter.set_color(*color);
                    painter.fill_rect(x, y, width, height);
                    painter.set_color(previous);
                } else {
                    painter.draw_rect(x, y, width, height);
                }
            }
            Shape::Image(image) => painter.draw_scaled_image(image, x, y, width, height),
        }
    }
}

fn paint_tracks(painter: &mut dyn Painter, x: i32, y: i32, width: i32, height: i32) {
    const BEVEL: i32 = 20;

    let middle_y = y + height / 2;
    let points = if width >= 40 && height >= 40 {
        vec![
            (x, middle_y),
            (x + BEVEL, y),
            (x + width - BEVEL, y),
            (x + width, middle_y),
            (x + width - BEVEL, y + height),
            (x + BEVEL, y + height),
        ]
    } else {
        let middle_x = x + width / 2;
        vec![
            (x, middle_y),
            (middle_x, y),
            (x + width, middle_y),
            (middle_x, y + height),
        ]
    };

    for (i, &(x1, y1)) in points.iter().enumerate() {
        let (x2, y2) = points[(i + 1) % points.len()];
        painter.draw_line(x1, y1, x2, y2);
    }
}

/// Kind of a robot, without its per-instance data.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum ShapeKind {
    Carrier,
    DynamicWheeled,
    Flying,
    Image,
    Tracked,
    Wheeled,
}

impl ShapeKind {
    pub fn iter() -> impl Iterator<Item = ShapeKind> {
        [
            ShapeKind::Carrier,
            ShapeKind::DynamicWheeled,
            ShapeKind::Flying,
            ShapeKind::Image,
            ShapeKind::Tracked,
            ShapeKind::Wheeled,
        ]
        .into_iter()
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Carrier => "carrier",
            ShapeKind::DynamicWheeled => "dynamic_wheeled",
            ShapeKind::Flying => "flying",
            ShapeKind::Image => "image",
            ShapeKind::Tracked => "tracked",
            ShapeKind::Wheeled => "wheeled",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ShapeKindError::Unknown(s.to_string()))
    }
}

#[derive(Error, Debug, Eq, PartialEq)]
pub enum ShapeKindError {
    #[error("unknown robot kind {0:?}")]
    Unknown(String),
}

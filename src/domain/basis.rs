//! Basic building blocks.

use std::{fmt, ops::Neg};

const DEFAULT_DELTA_X: i32 = 5;
const DEFAULT_DELTA_Y: i32 = 5;
const DEFAULT_WIDTH: i32 = 25;
const DEFAULT_HEIGHT: i32 = 35;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }
}

impl From<Position> for (i32, i32) {
    fn from(value: Position) -> Self {
        (value.x, value.y)
    }
}

/// Speed per tick; the sign of each component encodes the direction.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Velocity {
    dx: i32,
    dy: i32,
}

impl Velocity {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn dx(&self) -> i32 {
        self.dx
    }

    pub fn dy(&self) -> i32 {
        self.dy
    }
}

impl Neg for Velocity {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Velocity::new(self.dx.saturating_neg(), self.dy.saturating_neg())
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Size {
    width: i32,
    height: i32,
}

impl Size {
    /// Extents below 1 are raised to 1.
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width: positive(width),
            height: positive(height),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

const fn positive(extent: i32) -> i32 {
    if extent < 1 {
        1
    } else {
        extent
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const CYAN: Color = Color::new(0, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// Handle to a picture that has already been loaded elsewhere. Only its label and pixel
/// dimensions are known here.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Image {
    source: String,
    size: Size,
}

impl Image {
    pub fn new(source: impl Into<String>, size: Size) -> Self {
        Self {
            source: source.into(),
            size,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

/// Which walls were hit during the last move.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Bounce {
    pub vertical: bool,
    pub horizontal: bool,
}

/// Position, velocity and size of a robot.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Body {
    position: Position,
    velocity: Velocity,
    size: Size,
}

impl Body {
    pub const fn new(x: i32, y: i32, delta_x: i32, delta_y: i32, width: i32, height: i32) -> Self {
        Self {
            position: Position::new(x, y),
            velocity: Velocity::new(delta_x, delta_y),
            size: Size::new(width, height),
        }
    }

    /// Body of default size.
    pub const fn at(x: i32, y: i32, delta_x: i32, delta_y: i32) -> Self {
        Body::new(x, y, delta_x, delta_y, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn with_size(self, size: Size) -> Self {
        Self { size, ..self }
    }

    /// Moves one step within a world of the given size, bouncing off its walls. Each axis is
    /// handled independently: a step that would end at or beyond a wall is clamped to that
    /// wall and the velocity on that axis is reversed.
    pub fn advance(&mut self, world: Size) -> Bounce {
        let mut bounce = Bounce::default();

        let (x, dx) = bounce_axis(
            self.position.x,
            self.velocity.dx,
            self.size.width,
            world.width,
            &mut bounce.vertical,
        );
        let (y, dy) = bounce_axis(
            self.position.y,
            self.velocity.dy,
            self.size.height,
            world.height,
            &mut bounce.horizontal,
        );

        self.position = Position::new(x, y);
        self.velocity = Velocity::new(dx, dy);
        bounce
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::at(0, 0, DEFAULT_DELTA_X, DEFAULT_DELTA_Y)
    }
}

fn bounce_axis(
    position: i32,
    delta: i32,
    extent: i32,
    limit: i32,
    bounced: &mut bool,
) -> (i32, i32) {
    let next = position.saturating_add(delta);
    if next <= 0 {
        *bounced = true;
        (0, delta.saturating_neg())
    } else if next.saturating_add(extent) >= limit {
        *bounced = true;
        (limit.saturating_sub(extent), delta.saturating_neg())
    } else {
        (next, delta)
    }
}

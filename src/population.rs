//! Initial robots of a world: the fixed demo scene and randomly generated robots.

use rand::{seq::IndexedRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::domain::{Body, Carrier, Color, Image, Robot, RobotModel, Shape, ShapeKind, Size};

/// Adds the demo scene to the root of `model`: a few robots of every simple kind plus a
/// carrier with two robots of its own.
pub fn populate_demo(model: &mut RobotModel) {
    let root = model.root().clone();

    let robots = [
        Robot::new(Shape::Wheeled, Body::new(440, 0, 10, 10, 4, 2)),
        Robot::new(Shape::Wheeled, Body::at(0, 0, 5, 7)),
        Robot::named(
            Shape::Tracked,
            Body::new(20, 20, 4, 4, 200, 20),
            "Robot",
        ),
        Robot::new(Shape::Wheeled, Body::new(0, 0, 2, 2, 10, 10)),
        Robot::named(
            Shape::dynamic_wheeled(Color::CYAN),
            Body::new(0, 0, 2, 3, 180, 130),
            "I change color when I bounce",
        ),
        Robot::new(Shape::Flying, Body::at(50, 110, 2, 2)),
    ];
    for robot in &robots {
        add(model, robot, &root);
    }

    let carrier = Carrier::new(Body::new(10, 10, 2, 2, 100, 100));
    add(
        model,
        &Robot::new(
            Shape::dynamic_wheeled(Color::RED),
            Body::new(0, 0, 2, 3, 50, 80),
        ),
        &carrier,
    );
    add(
        model,
        &Robot::new(Shape::Flying, Body::new(10, 10, 2, 2, 60, 60)),
        &carrier,
    );
    add(model, &carrier, &root);
}

fn add(model: &mut RobotModel, robot: &Robot, parent: &Carrier) {
    if !model.add(robot, parent) {
        warn!(kind = %robot.kind(), "demo robot does not fit into world");
    }
}

const RNG_SEED: u64 = 19878367467712;
const MIN_EXTENT: i32 = 10;
const MAX_EXTENT: i32 = 60;
const MAX_SPEED: i32 = 5;
const IMAGE_SOURCE: &str = "robot.png";
const PALETTE: [Color; 6] = [
    Color::BLACK,
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::CYAN,
    Color::WHITE,
];

/// Creates robots with random position, velocity and size. The sequence is reproducible for
/// a given seed.
pub struct RobotFactory {
    rng: ChaCha8Rng,
}

impl Default for RobotFactory {
    fn default() -> Self {
        Self::new(RNG_SEED)
    }
}

impl RobotFactory {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Robot of the given kind lying entirely within `bounds`.
    pub fn spawn(&mut self, kind: ShapeKind, bounds: Size) -> Robot {
        let width = self.extent(bounds.width());
        let height = self.extent(bounds.height());
        let x = self.rng.random_range(0..=(bounds.width() - width).max(0));
        let y = self.rng.random_range(0..=(bounds.height() - height).max(0));
        let body = Body::new(x, y, self.speed(), self.speed(), width, height);

        match kind {
            ShapeKind::Carrier => Carrier::new(body).into(),
            ShapeKind::DynamicWheeled => {
                let color = PALETTE.choose(&mut self.rng).copied().unwrap_or_default();
                Robot::new(Shape::dynamic_wheeled(color), body)
            }
            ShapeKind::Flying => Robot::new(Shape::Flying, body),
            ShapeKind::Image => Robot::new(
                Shape::Image(Image::new(IMAGE_SOURCE, body.size())),
                body,
            ),
            ShapeKind::Tracked => Robot::new(Shape::Tracked, body),
            ShapeKind::Wheeled => Robot::new(Shape::Wheeled, body),
        }
    }

    /// Adds `count` robots of kinds picked from `kinds` to the root of `model`, or of any kind
    /// if `kinds` is empty. Returns the number of robots added.
    pub fn populate(&mut self, model: &mut RobotModel, kinds: &[ShapeKind], count: usize) -> usize {
        let all: Vec<ShapeKind> = ShapeKind::iter().collect();
        let kinds = if kinds.is_empty() { &all[..] } else { kinds };
        let root = model.root().clone();

        let mut added = 0;
        for _ in 0..count {
            let Some(&kind) = kinds.choose(&mut self.rng) else {
                break;
            };
            let robot = self.spawn(kind, root.size());
            if model.add(&robot, &root) {
                added += 1;
            }
        }

        debug!(requested = count, added, "random robots added");
        added
    }

    fn extent(&mut self, limit: i32) -> i32 {
        let max = limit.clamp(1, MAX_EXTENT);
        self.rng.random_range(max.min(MIN_EXTENT)..=max)
    }

    fn speed(&mut self) -> i32 {
        let speed = self.rng.random_range(1..=MAX_SPEED);
        if self.rng.random_bool(0.5) {
            speed
        } else {
            -speed
        }
    }
}

//! The domain module encapsulates the robot composition: the `Robot` and `Carrier` nodes of
//! the tree, the rules by which they move and bounce, and the `RobotModel` that reports every
//! change to its listeners.
//!
//! Rendering is only reached through the [`Painter`](crate::painter::Painter) trait, so the
//! module stays independent of any particular drawing surface.

mod basis;
mod carrier;
mod event;
mod model;
mod robot;
mod shape;

pub use basis::{Body, Bounce, Color, Image, Position, Size, Velocity};
pub use carrier::{Carrier, CarrierError};
pub use event::{EventKind, RobotModelEvent};
pub use model::{ListenerId, RobotModel, RobotModelListener};
pub use robot::Robot;
pub use shape::{Shape, ShapeKind, ShapeKindError};

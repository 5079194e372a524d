//! Composite robots bouncing around a rectangular world.
//!
//! Robots form a tree: a [`Carrier`](domain::Carrier) holds other robots, which move and are
//! painted relative to it. A [`RobotModel`](domain::RobotModel) owns the tree and notifies
//! listeners such as the [`views`] adapters about every change.

pub mod config;
pub mod domain;
pub mod painter;
pub mod population;
pub mod simulator;
pub mod views;

//! Robot composition with change notification.
//!
//! A [`RobotModel`] owns the root carrier and the world bounds. Every change made through
//! the model, and every animation tick, is reported synchronously to all registered
//! [`RobotModelListener`]s, so views never need to poll the tree.

use std::{cell::RefCell, fmt, rc::Rc};

use tracing::{debug, trace};

use super::{Body, Carrier, Robot, RobotModelEvent, Size};
use crate::config::WorldConfig;

pub trait RobotModelListener {
    fn update(&mut self, event: &RobotModelEvent<'_>);
}

impl<L: RobotModelListener> RobotModelListener for Rc<RefCell<L>> {
    fn update(&mut self, event: &RobotModelEvent<'_>) {
        self.borrow_mut().update(event);
    }
}

/// Token returned on registration, needed to deregister the listener.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ListenerId(u64);

pub struct RobotModel {
    root: Carrier,
    bounds: Size,
    listeners: Vec<(ListenerId, RefCell<Box<dyn RobotModelListener>>)>,
    next_listener_id: u64,
}

impl RobotModel {
    pub fn new(bounds: Size) -> Self {
        Self {
            root: Carrier::new(Body::new(0, 0, 0, 0, bounds.width(), bounds.height())),
            bounds,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.bounds())
    }

    pub fn root(&self) -> &Carrier {
        &self.root
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Adds `robot` to `parent` and notifies listeners. Returns `false` without changing
    /// anything or notifying anyone if the robot cannot be placed there.
    pub fn add(&mut self, robot: &Robot, parent: &Carrier) -> bool {
        match parent.add(robot) {
            Ok(()) => {
                debug!(kind = %robot.kind(), "robot added");
                self.fire(&RobotModelEvent::added(robot, self));
                true
            }
            Err(error) => {
                debug!(kind = %robot.kind(), %error, "robot rejected");
                false
            }
        }
    }

    /// Removes `robot` from its parent and notifies listeners. Has no effect on a robot
    /// without parent.
    pub fn remove(&mut self, robot: &Robot) {
        let Some(parent) = robot.parent() else {
            return;
        };

        let index = parent.index_of(robot);
        parent.remove(robot);

        debug!(kind = %robot.kind(), ?index, "robot removed");
        self.fire(&RobotModelEvent::removed(robot, parent, index, self));
    }

    /// Moves every robot once and then sends a single event identifying the root.
    pub fn clock(&mut self) {
        self.root
            .move_within(self.bounds.width(), self.bounds.height());

        trace!("clock");
        self.fire(&RobotModelEvent::moved(&self.root, self));
    }

    pub fn add_listener(&mut self, listener: impl RobotModelListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, RefCell::new(Box::new(listener))));
        id
    }

    /// Returns whether a listener was registered under `id`.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let count = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != count
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Calls every listener in registration order. A panicking listener unwinds to the caller
    /// and leaves the registrations untouched.
    fn fire(&self, event: &RobotModelEvent<'_>) {
        for (_, listener) in &self.listeners {
            listener.borrow_mut().update(event);
        }
    }
}

impl fmt::Debug for RobotModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RobotModel")
            .field("root", &self.root)
            .field("bounds", &self.bounds)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

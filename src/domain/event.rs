//! Change notifications sent by a [`RobotModel`] to its listeners.

use std::fmt;

use super::{Carrier, Robot, RobotModel};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EventKind {
    Added,
    Removed,
    Moved,
}

/// Describes one change to a model: a robot added or removed, or one animation tick.
#[derive(Clone)]
pub struct RobotModelEvent<'a> {
    kind: EventKind,
    operand: Robot,
    parent: Option<Carrier>,
    index: Option<usize>,
    source: &'a RobotModel,
}

impl<'a> RobotModelEvent<'a> {
    /// Reads the parent and index from the tree, so it must be built after the robot has
    /// been linked in.
    pub(super) fn added(robot: &Robot, source: &'a RobotModel) -> Self {
        Self::located(EventKind::Added, robot, source)
    }

    /// The link between `robot` and its parent is already gone at this point, so the former
    /// parent and index have to be captured by the caller before removal.
    pub(super) fn removed(
        robot: &Robot,
        former_parent: Carrier,
        index: Option<usize>,
        source: &'a RobotModel,
    ) -> Self {
        Self {
            kind: EventKind::Removed,
            operand: robot.clone(),
            parent: Some(former_parent),
            index,
            source,
        }
    }

    pub(super) fn moved(robot: &Robot, source: &'a RobotModel) -> Self {
        Self::located(EventKind::Moved, robot, source)
    }

    fn located(kind: EventKind, robot: &Robot, source: &'a RobotModel) -> Self {
        let parent = robot.parent();
        let index = parent.as_ref().and_then(|parent| parent.index_of(robot));
        Self {
            kind,
            operand: robot.clone(),
            parent,
            index,
            source,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Robot the event is about; the model's root for [`EventKind::Moved`].
    pub fn operand(&self) -> &Robot {
        &self.operand
    }

    /// Carrier holding the operand, or the carrier that held it for [`EventKind::Removed`].
    /// `None` for a robot without parent, normally the root.
    pub fn parent(&self) -> Option<&Carrier> {
        self.parent.as_ref()
    }

    /// Position of the operand within [`RobotModelEvent::parent`].
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn source(&self) -> &'a RobotModel {
        self.source
    }
}

impl fmt::Debug for RobotModelEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RobotModelEvent")
            .field("kind", &self.kind)
            .field("operand", &self.operand)
            .field("parent", &self.parent)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

//! Carrier node: a robot that carries other robots.
//!
//! Children are kept in insertion order and move and paint in the carrier's own coordinate
//! frame, bouncing off the carrier's walls rather than the world's.

use std::{cell::Ref, fmt, ops::Deref};

use thiserror::Error;

use super::{robot::Kind, Body, Position, Robot, Size};

#[derive(Clone, PartialEq, Eq)]
pub struct Carrier(pub(super) Robot);

impl Carrier {
    pub fn new(body: Body) -> Self {
        Self(Robot::from_kind(Kind::Carrier(Vec::new()), body))
    }

    pub fn named(body: Body, name: impl Into<String>) -> Self {
        let carrier = Self::new(body);
        carrier.set_name(name);
        carrier
    }

    pub fn as_robot(&self) -> &Robot {
        &self.0
    }

    /// Adds `robot` as the last child and links it back to this carrier.
    ///
    /// Fails without changing anything if the robot already has a parent, if it is this
    /// carrier or one of its ancestors, or if it does not fit within this carrier's bounds.
    pub fn add(&self, robot: &Robot) -> Result<(), CarrierError> {
        if robot.parent().is_some() {
            return Err(CarrierError::AlreadyParented);
        }
        if self.path().contains(robot) {
            return Err(CarrierError::Cycle);
        }

        let (position, size, bounds) = (robot.position(), robot.size(), self.size());
        if position.x().saturating_add(size.width()) > bounds.width()
            || position.y().saturating_add(size.height()) > bounds.height()
        {
            return Err(CarrierError::DoesNotFit {
                position,
                size,
                bounds,
            });
        }

        if let Kind::Carrier(children) = &mut self.0.node_mut().kind {
            children.push(robot.clone());
        }
        robot.node_mut().parent = self.0.downgrade();
        Ok(())
    }

    /// Removes `robot` from the children and clears its link to this carrier.
    ///
    /// The parent link is cleared only when it points at this carrier. A robot held by another
    /// carrier keeps its link, so it stays listed in exactly that carrier's children.
    pub fn remove(&self, robot: &Robot) {
        if let Kind::Carrier(children) = &mut self.0.node_mut().kind {
            if let Some(index) = children.iter().position(|child| child == robot) {
                children.remove(index);
            }
        }
        if robot.parent().is_some_and(|parent| parent == *self) {
            robot.node_mut().parent = Default::default();
        }
    }

    pub fn robot_at(&self, index: usize) -> Result<Robot, CarrierError> {
        let children = self.children();
        children
            .get(index)
            .cloned()
            .ok_or(CarrierError::IndexOutOfRange {
                index,
                count: children.len(),
            })
    }

    pub fn robot_count(&self) -> usize {
        self.children().len()
    }

    pub fn index_of(&self, robot: &Robot) -> Option<usize> {
        self.children().iter().position(|child| child == robot)
    }

    pub fn contains(&self, robot: &Robot) -> bool {
        self.index_of(robot).is_some()
    }

    /// Snapshot of the children in insertion order.
    pub fn robots(&self) -> Vec<Robot> {
        self.children().to_vec()
    }

    fn children(&self) -> Ref<'_, [Robot]> {
        Ref::map(self.0.node(), |node| match &node.kind {
            Kind::Carrier(children) => children.as_slice(),
            Kind::Shape(_) => &[][..],
        })
    }
}

impl Deref for Carrier {
    type Target = Robot;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Carrier> for Robot {
    fn from(value: Carrier) -> Self {
        value.0
    }
}

impl fmt::Debug for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carrier")
            .field("name", &self.name())
            .field("body", &self.body())
            .field("robots", &self.robot_count())
            .finish()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarrierError {
    #[error("robot already belongs to a carrier")]
    AlreadyParented,
    #[error("robot cannot be carried by itself or by one of the robots it carries")]
    Cycle,
    #[error("robot at {position:?} with {size:?} does not fit into carrier with {bounds:?}")]
    DoesNotFit {
        position: Position,
        size: Size,
        bounds: Size,
    },
    #[error("index {index} out of range for carrier with {count} robots")]
    IndexOutOfRange { index: usize, count: usize },
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{
        domain::Shape,
        painter::RecordingPainter,
        tests::{nest, Nest},
    };

    #[rstest]
    fn test_basic_movement_and_painting(nest: Nest) {
        let mut painter = RecordingPainter::new();

        nest.top.move_within(500, 500);
        nest.top.paint(&mut painter);

        insta::assert_snapshot!(painter.to_string(), @"(rectangle 2,2,100,100)(rectangle 2,2,50,50)(rectangle 7,7,10,10)(rectangle 2,2,5,5)");
        assert_eq!(painter.origin(), Position::new(0, 0));
    }

    #[test]
    fn test_children_bounce_within_their_carrier() {
        let carrier = Carrier::new(Body::new(0, 0, 2, 0, 30, 30));
        let robot = Robot::new(Shape::Wheeled, Body::new(18, 0, 2, 0, 10, 10));
        carrier.add(&robot).unwrap();

        carrier.move_within(500, 500);
        assert!(!carrier.did_bounce_off_vertical());
        assert!(robot.did_bounce_off_vertical());
        assert_eq!(robot.position(), Position::new(20, 0));
        assert_eq!(robot.delta_x(), -2);
    }

    #[rstest]
    fn test_add(nest: Nest) {
        assert_eq!(nest.mid.parent(), Some(nest.top.clone()));
        assert!(nest.top.contains(&nest.mid));

        assert_eq!(nest.bottom.parent(), Some(nest.mid.clone()));
        assert!(nest.mid.contains(&nest.bottom));
    }

    #[rstest]
    fn test_add_with_argument_that_is_a_child_of_some_other_carrier(
        nest: Nest,
    ) {
        assert_eq!(
            nest.top.add(&nest.bottom),
            Err(CarrierError::AlreadyParented)
        );
        assert!(!nest.top.contains(&nest.bottom));
        assert_eq!(nest.bottom.parent(), Some(nest.mid.clone()));
    }

    #[rstest]
    fn test_add_twice_to_same_carrier(nest: Nest) {
        assert_eq!(nest.mid.add(&nest.simple), Err(CarrierError::AlreadyParented));
        assert_eq!(nest.mid.robot_count(), 2);
    }

    #[test]
    fn test_add_with_out_of_bounds_argument() {
        let carrier = Carrier::new(Body::new(0, 0, 2, 2, 100, 100));
        let rectangle = Robot::new(Shape::Wheeled, Body::new(80, 80, 2, 2, 50, 50));

        assert_eq!(
            carrier.add(&rectangle),
            Err(CarrierError::DoesNotFit {
                position: Position::new(80, 80),
                size: Size::new(50, 50),
                bounds: Size::new(100, 100),
            })
        );
        assert!(!carrier.contains(&rectangle));
        assert_eq!(rectangle.parent(), None);
    }

    #[test]
    fn test_add_exactly_fitting_robot() {
        let carrier = Carrier::new(Body::new(0, 0, 2, 2, 100, 100));
        let rectangle = Robot::new(Shape::Wheeled, Body::new(50, 50, 2, 2, 50, 50));
        assert_eq!(carrier.add(&rectangle), Ok(()));
    }

    #[rstest]
    fn test_add_cycle(nest: Nest) {
        assert_eq!(nest.top.add(&nest.top), Err(CarrierError::Cycle));
        assert_eq!(nest.bottom.add(&nest.top), Err(CarrierError::Cycle));
        assert_eq!(nest.top.robot_count(), 1);
        assert_eq!(nest.bottom.robot_count(), 0);
    }

    #[rstest]
    fn test_remove(nest: Nest) {
        nest.top.remove(&nest.mid);
        assert!(!nest.top.contains(&nest.mid));
        assert_eq!(nest.mid.parent(), None);
        assert_eq!(nest.mid.robot_count(), 2);
    }

    #[rstest]
    fn test_remove_robot_of_other_carrier(nest: Nest) {
        nest.top.remove(&nest.simple);
        assert_eq!(nest.simple.parent(), Some(nest.mid.clone()));
        assert!(nest.mid.contains(&nest.simple));
    }

    #[test]
    fn test_add_far_out_of_bounds() {
        let carrier = Carrier::new(Body::new(0, 0, 2, 2, 100, 100));
        let robot = Robot::new(Shape::Wheeled, Body::new(i32::MAX, 0, 2, 2, 50, 50));

        assert!(matches!(
            carrier.add(&robot),
            Err(CarrierError::DoesNotFit { .. })
        ));
        assert_eq!(carrier.robot_count(), 0);
    }

    #[test]
    fn test_remove_loose_robot() {
        let carrier = Carrier::new(Body::new(0, 0, 2, 2, 100, 100));
        let robot = Robot::new(Shape::Wheeled, Body::default());

        carrier.remove(&robot);
        assert_eq!(robot.parent(), None);
        assert_eq!(carrier.robot_count(), 0);
    }

    #[rstest]
    fn test_add_after_remove(nest: Nest) {
        nest.mid.remove(&nest.simple);
        assert_eq!(nest.top.add(&nest.simple), Ok(()));
        assert_eq!(nest.top.index_of(&nest.simple), Some(1));
    }

    #[rstest]
    fn test_robot_at(nest: Nest) {
        assert_eq!(nest.top.robot_at(0), Ok(nest.mid.clone().into()));
    }

    #[rstest]
    fn test_robot_at_with_invalid_index(nest: Nest) {
        assert_eq!(
            nest.top.robot_at(1),
            Err(CarrierError::IndexOutOfRange { index: 1, count: 1 })
        );
    }

    #[rstest]
    fn test_robot_count(nest: Nest) {
        assert_eq!(nest.bottom.robot_count(), 0);
        assert_eq!(nest.mid.robot_count(), 2);
    }

    #[rstest]
    fn test_index_of(nest: Nest) {
        assert_eq!(nest.top.index_of(&nest.mid), Some(0));
        assert_eq!(nest.mid.index_of(&nest.simple), Some(1));
        assert_eq!(nest.top.index_of(&nest.bottom), None);
    }

    #[rstest]
    fn test_path(nest: Nest) {
        assert_eq!(
            nest.simple.path(),
            vec![
                nest.top.clone().into(),
                nest.mid.clone().into(),
                nest.simple.clone()
            ]
        );
        assert_eq!(nest.top.path(), vec![nest.top.clone().into()]);
    }

    #[rstest]
    fn test_two_way_links_are_consistent(nest: Nest) {
        let carriers = [&nest.top, &nest.mid, &nest.bottom];
        let robots: Vec<Robot> = vec![
            nest.top.clone().into(),
            nest.mid.clone().into(),
            nest.bottom.clone().into(),
            nest.simple.clone(),
        ];

        for robot in &robots {
            for carrier in carriers {
                let linked = robot.parent().as_ref() == Some(carrier);
                assert_eq!(linked, carrier.contains(robot));
                assert_eq!(linked, carrier.index_of(robot).is_some());
            }
        }
    }

    #[test]
    fn test_named_carrier_paints_name_in_parent_frame() {
        let carrier = Carrier::named(Body::new(10, 10, 0, 0, 40, 40), "Box");
        let inner = Robot::new(Shape::Flying, Body::new(1, 1, 0, 0, 5, 5));
        carrier.add(&inner).unwrap();

        let mut painter = RecordingPainter::new();
        carrier.paint(&mut painter);
        insta::assert_snapshot!(painter.to_string(), @r#"(text "Box" 10,10,40,40)(rectangle 10,10,40,40)(oval 1,1,5,5)"#);
    }

    #[test]
    fn test_as_carrier() {
        let carrier = Carrier::new(Body::default());
        let robot: Robot = carrier.clone().into();
        assert_eq!(robot.as_carrier(), Some(carrier));
    }
}

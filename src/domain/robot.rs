//! Robot node: a positioned, sized entity that bounces around inside its world.
//!
//! A [`Robot`] is a shared handle; cloning it yields another handle to the same robot and
//! equality is identity. A robot owned by a carrier keeps a weak link back to it, so the
//! carrier's child list is the only owning reference in the tree.

use std::{
    cell::{Ref, RefCell, RefMut},
    fmt,
    rc::{Rc, Weak},
};

use super::{Body, Bounce, Carrier, Image, Position, Shape, ShapeKind, Size, Velocity};
use crate::painter::{Painter, Translation};

#[derive(Clone)]
pub struct Robot(Rc<RefCell<Node>>);

pub(super) struct Node {
    pub(super) body: Body,
    pub(super) bounce: Bounce,
    pub(super) name: Option<String>,
    pub(super) parent: Weak<RefCell<Node>>,
    pub(super) kind: Kind,
}

pub(super) enum Kind {
    Shape(Shape),
    Carrier(Vec<Robot>),
}

impl Node {
    fn kind(&self) -> ShapeKind {
        match &self.kind {
            Kind::Shape(shape) => shape.kind(),
            Kind::Carrier(_) => ShapeKind::Carrier,
        }
    }
}

impl Robot {
    pub fn new(shape: Shape, body: Body) -> Self {
        Self::from_kind(Kind::Shape(shape), body)
    }

    pub fn named(shape: Shape, body: Body, name: impl Into<String>) -> Self {
        let robot = Self::new(shape, body);
        robot.set_name(name);
        robot
    }

    /// Robot drawn as `image`, sized after the image.
    pub fn from_image(x: i32, y: i32, delta_x: i32, delta_y: i32, image: Image) -> Self {
        let size = image.size();
        Self::new(
            Shape::Image(image),
            Body::new(x, y, delta_x, delta_y, size.width(), size.height()),
        )
    }

    pub(super) fn from_kind(kind: Kind, body: Body) -> Self {
        Self(Rc::new(RefCell::new(Node {
            body,
            bounce: Bounce::default(),
            name: None,
            parent: Weak::new(),
            kind,
        })))
    }

    pub(super) fn node(&self) -> Ref<'_, Node> {
        self.0.borrow()
    }

    pub(super) fn node_mut(&self) -> RefMut<'_, Node> {
        self.0.borrow_mut()
    }

    pub(super) fn downgrade(&self) -> Weak<RefCell<Node>> {
        Rc::downgrade(&self.0)
    }

    pub fn x(&self) -> i32 {
        self.position().x()
    }

    pub fn y(&self) -> i32 {
        self.position().y()
    }

    pub fn delta_x(&self) -> i32 {
        self.velocity().dx()
    }

    pub fn delta_y(&self) -> i32 {
        self.velocity().dy()
    }

    pub fn width(&self) -> i32 {
        self.size().width()
    }

    pub fn height(&self) -> i32 {
        self.size().height()
    }

    pub fn position(&self) -> Position {
        self.node().body.position()
    }

    pub fn velocity(&self) -> Velocity {
        self.node().body.velocity()
    }

    pub fn size(&self) -> Size {
        self.node().body.size()
    }

    pub fn body(&self) -> Body {
        self.node().body
    }

    pub fn did_bounce_off_vertical(&self) -> bool {
        self.node().bounce.vertical
    }

    pub fn did_bounce_off_horizontal(&self) -> bool {
        self.node().bounce.horizontal
    }

    pub fn name(&self) -> Option<String> {
        self.node().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.node_mut().name = Some(name.into());
    }

    pub fn kind(&self) -> ShapeKind {
        self.node().kind()
    }

    pub fn is_carrier(&self) -> bool {
        matches!(self.node().kind, Kind::Carrier(_))
    }

    pub fn as_carrier(&self) -> Option<Carrier> {
        self.is_carrier().then(|| Carrier(self.clone()))
    }

    pub fn parent(&self) -> Option<Carrier> {
        self.node()
            .parent
            .upgrade()
            .map(|node| Carrier(Robot(node)))
    }

    /// Robots from the outermost carrier down to and including this robot.
    pub fn path(&self) -> Vec<Robot> {
        let mut path = vec![self.clone()];
        let mut ancestor = self.parent();
        while let Some(carrier) = ancestor {
            ancestor = carrier.parent();
            path.push(carrier.into());
        }
        path.reverse();
        path
    }

    /// Moves this robot one step within a world of the given size. A carrier then moves each
    /// of its children within its own bounds.
    pub fn move_within(&self, width: i32, height: i32) {
        let mut node = self.node_mut();
        let bounce = node.body.advance(Size::new(width, height));
        node.bounce = bounce;

        let size = node.body.size();
        match &mut node.kind {
            Kind::Shape(shape) => shape.bounced(bounce),
            Kind::Carrier(children) => {
                for child in children.iter() {
                    child.move_within(size.width(), size.height());
                }
            }
        }
    }

    /// Paints the name, if any, centred over the robot and then the robot itself. A carrier
    /// draws its outline and then paints its children relative to its own position.
    pub fn paint(&self, painter: &mut dyn Painter) {
        let node = self.node();
        let (position, size) = (node.body.position(), node.body.size());

        if let Some(name) = &node.name {
            painter.draw_centred_text(
                name,
                position.x(),
                position.y(),
                size.width(),
                size.height(),
            );
        }

        match &node.kind {
            Kind::Shape(shape) => shape.paint(painter, position, size),
            Kind::Carrier(children) => {
                painter.draw_rect(position.x(), position.y(), size.width(), size.height());
                let mut translation = Translation::new(painter, position);
                for child in children {
                    child.paint(translation.painter());
                }
            }
        }
    }
}

impl PartialEq for Robot {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Robot {}

impl fmt::Debug for Robot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.node();
        f.debug_struct("Robot")
            .field("kind", &node.kind())
            .field("name", &node.name)
            .field("body", &node.body)
            .finish_non_exhaustive()
    }
}

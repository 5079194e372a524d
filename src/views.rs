//! Headless views of a robot composition.
//!
//! The adapters translate [`RobotModelEvent`]s into the notifications a tree or table widget
//! expects and queue them until the front end collects them with `take_changes`. Register
//! them with a model wrapped in `Rc<RefCell<_>>` to keep access to them.

use std::fmt;

use crate::domain::{Carrier, EventKind, Robot, RobotModelEvent, RobotModelListener};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TreeChangeKind {
    Inserted,
    Removed,
}

/// One node inserted into or removed from the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeChange {
    pub kind: TreeChangeKind,
    /// Path from the root to the parent of the node, both included.
    pub path: Vec<Robot>,
    pub index: usize,
    pub node: Robot,
}

/// Presents the robots below a root carrier as a tree. Every carrier is an inner node, every
/// other robot a leaf.
pub struct TreeAdapter {
    root: Carrier,
    changes: Vec<TreeChange>,
}

impl TreeAdapter {
    pub fn new(root: Carrier) -> Self {
        Self {
            root,
            changes: Vec::new(),
        }
    }

    pub fn root(&self) -> &Carrier {
        &self.root
    }

    pub fn child(&self, parent: &Robot, index: usize) -> Option<Robot> {
        parent.as_carrier()?.robot_at(index).ok()
    }

    pub fn child_count(&self, parent: &Robot) -> usize {
        parent
            .as_carrier()
            .map_or(0, |carrier| carrier.robot_count())
    }

    pub fn index_of_child(&self, parent: &Robot, child: &Robot) -> Option<usize> {
        parent.as_carrier()?.index_of(child)
    }

    pub fn is_leaf(&self, node: &Robot) -> bool {
        !node.is_carrier()
    }

    pub fn take_changes(&mut self) -> Vec<TreeChange> {
        std::mem::take(&mut self.changes)
    }
}

impl RobotModelListener for TreeAdapter {
    fn update(&mut self, event: &RobotModelEvent<'_>) {
        let kind = match event.kind() {
            EventKind::Added => TreeChangeKind::Inserted,
            EventKind::Removed => TreeChangeKind::Removed,
            EventKind::Moved => return,
        };
        let (Some(parent), Some(index)) = (event.parent(), event.index()) else {
            return;
        };

        self.changes.push(TreeChange {
            kind,
            path: parent.path(),
            index,
            node: event.operand().clone(),
        });
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TableChange {
    RowsInserted(usize),
    DataChanged,
}

pub const COLUMNS: [&str; 8] = [
    "Type", "X-pos", "Y-pos", "X-delta", "Y-delta", "Width", "Height", "Text",
];

/// Presents a robot as a table: one row per child for a carrier, a single row otherwise.
pub struct TableAdapter {
    adaptee: Robot,
    changes: Vec<TableChange>,
}

impl TableAdapter {
    pub fn new(adaptee: impl Into<Robot>) -> Self {
        Self {
            adaptee: adaptee.into(),
            changes: Vec::new(),
        }
    }

    pub fn adaptee(&self) -> &Robot {
        &self.adaptee
    }

    pub fn set_adaptee(&mut self, robot: impl Into<Robot>) {
        self.adaptee = robot.into();
        self.changes.push(TableChange::DataChanged);
    }

    pub fn column_count(&self) -> usize {
        COLUMNS.len()
    }

    pub fn column_name(&self, column: usize) -> Option<&'static str> {
        COLUMNS.get(column).copied()
    }

    pub fn row_count(&self) -> usize {
        match self.adaptee.as_carrier() {
            Some(carrier) => carrier.robot_count(),
            None => 1,
        }
    }

    pub fn value_at(&self, row: usize, column: usize) -> Option<String> {
        let robot = self.robot_at(row)?;
        let value = match column {
            0 => robot.kind().to_string(),
            1 => robot.x().to_string(),
            2 => robot.y().to_string(),
            3 => robot.delta_x().to_string(),
            4 => robot.delta_y().to_string(),
            5 => robot.width().to_string(),
            6 => robot.height().to_string(),
            7 => robot.name().unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        (0..self.row_count())
            .map(|row| {
                (0..COLUMNS.len())
                    .filter_map(|column| self.value_at(row, column))
                    .collect()
            })
            .collect()
    }

    pub fn take_changes(&mut self) -> Vec<TableChange> {
        std::mem::take(&mut self.changes)
    }

    fn robot_at(&self, row: usize) -> Option<Robot> {
        match self.adaptee.as_carrier() {
            Some(carrier) => carrier.robot_at(row).ok(),
            None => (row == 0).then(|| self.adaptee.clone()),
        }
    }
}

impl RobotModelListener for TableAdapter {
    fn update(&mut self, event: &RobotModelEvent<'_>) {
        match event.kind() {
            EventKind::Added => {
                if let Some(parent) = event.operand().parent() {
                    if *parent.as_robot() == self.adaptee {
                        self.changes
                            .push(TableChange::RowsInserted(parent.robot_count() - 1));
                    }
                }
            }
            EventKind::Removed => {
                if event
                    .parent()
                    .is_some_and(|parent| *parent.as_robot() == self.adaptee)
                {
                    self.changes.push(TableChange::DataChanged);
                }
            }
            EventKind::Moved => self.changes.push(TableChange::DataChanged),
        }
    }
}

/// Left-aligned columns separated by two spaces, header first.
impl fmt::Display for TableAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        let widths: Vec<usize> = COLUMNS
            .iter()
            .enumerate()
            .map(|(column, name)| {
                rows.iter()
                    .filter_map(|row| row.get(column))
                    .map(String::len)
                    .fold(name.len(), usize::max)
            })
            .collect();

        let header = COLUMNS.map(String::from);
        for row in std::iter::once(&header[..]).chain(rows.iter().map(Vec::as_slice)) {
            let line = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{
        domain::{Body, RobotModel, Shape, Size},
        tests::{nest, Nest},
    };

    fn model_with(nest: &Nest) -> RobotModel {
        let mut model = RobotModel::new(Size::new(500, 500));
        let root = model.root().clone();
        assert!(model.add(&nest.top, &root));
        model
    }

    #[rstest]
    fn test_tree_structure(nest: Nest) {
        let model = model_with(&nest);
        let tree = TreeAdapter::new(model.root().clone());
        let root: Robot = tree.root().clone().into();

        assert_eq!(tree.child_count(&root), 1);
        assert_eq!(tree.child(&root, 0), Some(nest.top.clone().into()));
        assert_eq!(tree.child(&root, 1), None);
        assert_eq!(tree.child_count(&nest.mid), 2);
        assert_eq!(tree.index_of_child(&nest.mid, &nest.simple), Some(1));
        assert_eq!(tree.index_of_child(&nest.top, &nest.simple), None);
        assert_eq!(tree.index_of_child(&nest.simple, &nest.mid), None);
        assert_eq!(tree.child_count(&nest.simple), 0);
        assert_eq!(tree.child(&nest.simple, 0), None);
        assert!(tree.is_leaf(&nest.simple));
        assert!(!tree.is_leaf(&nest.bottom));
    }

    #[rstest]
    fn test_tree_changes(nest: Nest) {
        let mut model = model_with(&nest);
        let tree = Rc::new(RefCell::new(TreeAdapter::new(model.root().clone())));
        model.add_listener(tree.clone());

        let robot = Robot::new(Shape::Flying, Body::new(0, 0, 1, 1, 5, 5));
        assert!(model.add(&robot, &nest.bottom));
        model.clock();
        model.remove(&nest.mid);

        let root: Robot = model.root().clone().into();
        assert_eq!(
            tree.borrow_mut().take_changes(),
            vec![
                TreeChange {
                    kind: TreeChangeKind::Inserted,
                    path: vec![
                        root.clone(),
                        nest.top.clone().into(),
                        nest.mid.clone().into(),
                        nest.bottom.clone().into(),
                    ],
                    index: 0,
                    node: robot,
                },
                TreeChange {
                    kind: TreeChangeKind::Removed,
                    path: vec![root, nest.top.clone().into()],
                    index: 0,
                    node: nest.mid.clone().into(),
                },
            ]
        );
        assert_eq!(tree.borrow_mut().take_changes(), vec![]);
    }

    #[rstest]
    fn test_table_over_carrier(nest: Nest) {
        nest.simple.set_name("Bob");
        let table = TableAdapter::new(nest.mid.clone());

        assert_eq!(table.column_count(), 8);
        assert_eq!(table.column_name(7), Some("Text"));
        assert_eq!(table.column_name(8), None);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.rows(),
            vec![
                vec!["carrier", "5", "5", "2", "2", "10", "10", ""],
                vec!["wheeled", "1", "1", "1", "1", "5", "5", "Bob"],
            ]
        );
        assert_eq!(table.value_at(2, 0), None);
        assert_eq!(table.value_at(0, 8), None);
    }

    #[rstest]
    fn test_table_over_leaf(nest: Nest) {
        let mut table = TableAdapter::new(nest.mid.clone());
        table.set_adaptee(nest.simple.clone());

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.value_at(0, 0).as_deref(), Some("wheeled"));
        assert_eq!(table.value_at(1, 0), None);
        assert_eq!(table.take_changes(), vec![TableChange::DataChanged]);
    }

    #[rstest]
    fn test_table_changes(nest: Nest) {
        let mut model = model_with(&nest);
        let table = Rc::new(RefCell::new(TableAdapter::new(nest.mid.clone())));
        model.add_listener(table.clone());

        let robot = Robot::new(Shape::Flying, Body::new(0, 0, 1, 1, 5, 5));
        assert!(model.add(&robot, &nest.mid));
        assert!(model.add(&Robot::new(Shape::Flying, Body::default()), &nest.top));
        model.remove(&nest.bottom);
        model.remove(&nest.mid);
        model.clock();

        assert_eq!(
            table.borrow_mut().take_changes(),
            vec![
                TableChange::RowsInserted(2),
                TableChange::DataChanged,
                TableChange::DataChanged,
            ]
        );
    }

    #[rstest]
    fn test_table_display(nest: Nest) {
        let table = TableAdapter::new(nest.top.clone());
        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Type     X-pos  Y-pos  X-delta  Y-delta  Width  Height  Text",
                "carrier  0      0      2        2        50     50",
            ]
        );
    }
}

//! Tree builder for the hierarchical cut-list view.

use crate::model::{CutListRecord, TreeKey, TreeNode};

/// Arrange records into a length → room → cabinet hierarchy.
///
/// With `width_first` the top level groups by thickness instead, and the
/// default levels follow beneath it. Every level is sorted by ascending key.
/// A record is attached to each cabinet leaf it occurs in, once per leaf
/// even when it lists the same cabinet more than once.
pub fn build_tree<'a, I>(records: I, width_first: bool) -> TreeNode<'a>
where
    I: IntoIterator<Item = &'a CutListRecord>,
{
    let mut root = TreeNode::new(TreeKey::Root);

    for record in records {
        let mut locations: Vec<(u32, u32)> = record
            .occurrences()
            .iter()
            .map(|o| o.location())
            .collect();
        locations.sort_unstable();
        locations.dedup();

        for (room, cabinet) in locations {
            let mut node = &mut root;
            if width_first {
                node = node.child_mut(TreeKey::Thickness(record.thickness()));
            }
            let leaf = node
                .child_mut(TreeKey::Length(record.length()))
                .child_mut(TreeKey::Room(room))
                .child_mut(TreeKey::Cabinet(cabinet));
            leaf.records.push(record);
        }
    }

    root.sort_children();
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_row;
    use rust_decimal::Decimal;

    fn row(quantity: &str, thickness: &str, length: &str, expr: &str) -> CutListRecord {
        parse_row(&[quantity, thickness, length, "RS", expr], false).unwrap()
    }

    fn keys(node: &TreeNode<'_>) -> Vec<TreeKey> {
        node.children.iter().map(|c| c.key).collect()
    }

    #[test]
    fn test_empty_tree() {
        let records = Vec::<CutListRecord>::new();
        let tree = build_tree(&records, false);
        assert_eq!(tree.key, TreeKey::Root);
        assert!(tree.children.is_empty());
        assert_eq!(tree.leaf_count(), 0);
    }

    #[test]
    fn test_default_ordering() {
        let records = vec![
            row("2", "1.5", "30", "R2:5&1"),
            row("1", "0.75", "12.5", "R1:3"),
        ];
        let tree = build_tree(&records, false);

        assert_eq!(
            keys(&tree),
            vec![
                TreeKey::Length(Decimal::new(125, 1)),
                TreeKey::Length(Decimal::from(30))
            ]
        );
        let length_30 = &tree.children[1];
        assert_eq!(keys(length_30), vec![TreeKey::Room(2)]);
        assert_eq!(
            keys(&length_30.children[0]),
            vec![TreeKey::Cabinet(1), TreeKey::Cabinet(5)]
        );
        let leaf = &length_30.children[0].children[0];
        assert_eq!(leaf.records, vec![&records[0]]);
        assert_eq!(tree.leaf_count(), 3);
    }

    #[test]
    fn test_width_first_ordering() {
        let records = vec![
            row("1", "1.5", "30", "R1:1"),
            row("1", "0.75", "30", "R1:1"),
        ];
        let tree = build_tree(&records, true);

        assert_eq!(
            keys(&tree),
            vec![
                TreeKey::Thickness(Decimal::new(75, 2)),
                TreeKey::Thickness(Decimal::new(15, 1))
            ]
        );
        let cabinet = &tree.children[0].children[0].children[0].children[0];
        assert_eq!(cabinet.key, TreeKey::Cabinet(1));
        assert_eq!(cabinet.records, vec![&records[1]]);
    }

    #[test]
    fn test_leaf_lists_record_once() {
        let records = vec![row("3", "1.5", "30", "R1:1&1(2)")];
        let tree = build_tree(&records, false);
        let leaf = &tree.children[0].children[0].children[0];
        assert_eq!(leaf.records.len(), 1);
    }

    #[test]
    fn test_records_sharing_a_cabinet() {
        let records = vec![
            row("1", "1.5", "30", "R1:1"),
            row("1", "1.5", "30", "R1:1&2"),
        ];
        let tree = build_tree(&records, false);
        let room = &tree.children[0].children[0];
        assert_eq!(room.children[0].records, vec![&records[0], &records[1]]);
        assert_eq!(room.children[1].records, vec![&records[1]]);
    }

    #[test]
    fn test_render_shows_counted_quantity() {
        let records = vec![row(
            "12",
            "1.5",
            "86.50001",
            "R5:1&2&3&4&5&6&10&11 R7:1&2&3&7&8",
        )];
        let rendered = build_tree(&records, false).render();
        assert_eq!(rendered.matches("        13 x RS 1.5x86.50001\n").count(), 13);
        assert!(!rendered.contains("12 x RS"));
    }

    #[test]
    fn test_render_outline() {
        let records = vec![row("1", "1.5", "30", "R1:2")];
        let tree = build_tree(&records, false);
        assert_eq!(
            tree.render(),
            "Cut list\n  Length 30\n    Room 1\n      Cabinet 2\n        1 x RS 1.5x30\n"
        );
    }
}

//! Keyed grouping of relation slots.
//!
//! Used when attaching fetched child rows to their parents: every parent
//! reachable along a path is keyed by its join-column values, and the slot
//! that will receive its children is filed under that key. Parents sharing
//! a key share an entry, in visit order.

use std::collections::HashMap;

use relwalk_core::{Error, FieldDescriptor, PathErrorKind, RelationPath, Result, Slot, Step};

use crate::fragment::append_model_id;
use crate::walk::walk_mut;

/// Relation slots grouped by parent composite key.
pub type KeyedSlots<'a> = HashMap<String, Vec<&'a mut dyn Slot>>;

/// Group the `relation` slot of every parent reachable along `parent_path`
/// by the parent's composite key over `key_fields`.
///
/// The returned slots alias into `root`, so the caller can fill them in
/// place. Nil intermediate pointers are skipped, never materialized.
#[tracing::instrument(level = "debug", skip_all, fields(path = %parent_path, relation = %relation))]
pub fn group_by_parent_key<'a>(
    root: &'a mut dyn Slot,
    parent_path: &RelationPath,
    relation: Step,
    key_fields: &[FieldDescriptor],
) -> Result<KeyedSlots<'a>> {
    let mut groups: KeyedSlots<'a> = HashMap::new();
    let mut key = Vec::new();
    let mut parents = 0usize;

    walk_mut(root, parent_path, |parent| {
        key.clear();
        append_model_id(&mut key, &*parent, key_fields)?;
        let record_type = parent.record_type();
        let slot = parent.slot_mut(relation.index).ok_or_else(|| {
            Error::path(
                PathErrorKind::NoSuchField,
                record_type.name,
                format!("no relation field at index {}", relation.index),
            )
        })?;
        groups
            .entry(String::from_utf8_lossy(&key).into_owned())
            .or_default()
            .push(slot);
        parents += 1;
        Ok(())
    })?;

    tracing::debug!(parents, keys = groups.len(), "grouped relation slots");
    Ok(groups)
}

/// Like [`group_by_parent_key`], taking the full path to the relation.
///
/// The last step of `relation_path` names the relation; the steps before it
/// lead to the parents.
pub fn group_relation<'a>(
    root: &'a mut dyn Slot,
    relation_path: &RelationPath,
    key_fields: &[FieldDescriptor],
) -> Result<KeyedSlots<'a>> {
    let Some((parent_path, relation)) = relation_path.split_last() else {
        return Err(Error::path(
            PathErrorKind::NoSuchField,
            "<root>",
            "relation path is empty",
        ));
    };
    group_by_parent_key(root, &parent_path, relation, key_fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Item, Note, Order, item, order};
    use relwalk_core::{Node, Typed};

    fn qty_color_fields() -> Vec<FieldDescriptor> {
        FieldDescriptor::lookup_all(Item::static_type(), &["qty", "color"]).unwrap()
    }

    fn notes_of(slot: &mut dyn Slot) -> &mut Vec<Note> {
        slot.any_mut().downcast_mut::<Vec<Note>>().unwrap()
    }

    #[test]
    fn test_groups_share_entry_in_visit_order() {
        let mut first = item("a", 7);
        first.color = Some("red".to_string());
        let mut second = item("b", 9);
        second.color = Some("blue".to_string());
        let mut third = item("c", 7);
        third.color = Some("red".to_string());

        let mut root = order(1, &[]);
        root.items = Some(vec![first, second, third]);

        let mut groups = group_by_parent_key(
            &mut root,
            &RelationPath::new([Order::ITEMS]),
            Step::new(Item::NOTES),
            &qty_color_fields(),
        )
        .unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups["7,red"].len(), 2);
        assert_eq!(groups["9,blue"].len(), 1);

        for (n, slot) in groups.get_mut("7,red").unwrap().iter_mut().enumerate() {
            notes_of(&mut **slot).push(Note::new(&format!("red-{n}")));
        }
        drop(groups);

        let items = root.items.unwrap();
        assert_eq!(items[0].notes, [Note::new("red-0")]);
        assert!(items[1].notes.is_empty());
        assert_eq!(items[2].notes, [Note::new("red-1")]);
    }

    #[test]
    fn test_group_relation_splits_path() {
        let mut roots = vec![order(1, &[("a", 1)]), order(2, &[("b", 2)])];
        let id = FieldDescriptor::lookup_all(Order::static_type(), &["id"]).unwrap();
        let groups =
            group_relation(&mut roots, &RelationPath::new([Order::ITEMS]), &id).unwrap();
        assert_eq!(groups.len(), 2);
        for slots in groups.values() {
            assert_eq!(slots.len(), 1);
            assert!(matches!(slots[0].node(), Node::Collection(c) if c.len() == 1));
        }
    }

    #[test]
    fn test_no_parents_yields_empty_map() {
        let mut root = order(1, &[]);
        root.items = None;
        let groups = group_by_parent_key(
            &mut root,
            &RelationPath::new([Order::ITEMS]),
            Step::new(Item::NOTES),
            &qty_color_fields(),
        )
        .unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_missing_relation_field() {
        let mut root = order(1, &[("a", 1)]);
        let err = group_by_parent_key(
            &mut root,
            &RelationPath::new([Order::ITEMS]),
            Step::new(99),
            &qty_color_fields(),
        )
        .err().unwrap();
        assert_eq!(err.path_kind(), Some(PathErrorKind::NoSuchField));
    }

    #[test]
    fn test_empty_relation_path_is_rejected() {
        let mut root = order(1, &[]);
        assert!(group_relation(&mut root, &RelationPath::root(), &[]).is_err());
    }
}

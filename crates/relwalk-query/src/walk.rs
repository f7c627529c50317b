//! Tree walking and value access over record graphs.
//!
//! A walk follows a [`RelationPath`] from a root slot and visits every
//! terminal record it reaches, depth-first and left to right:
//!
//! - a pointer step is dereferenced; a nil pointer ends that branch silently
//! - a collection fans out over its elements in iteration order
//! - when the path is used up, the current record is visited once
//!
//! The read-only walkers never mutate the graph. [`field_by_path_mut`] and
//! [`prepare`] are the write-preparing accessors: they materialize nil
//! intermediate pointers so the caller can attach data below them.

use std::any::TypeId;

use relwalk_core::{
    Collection, Error, Node, NodeMut, PathError, PathErrorKind, Record, RecordType, RelationPath,
    Result, Slot, Step,
};

const ROOT: &str = "<root>";

/// Visit every terminal record reachable from `root` along `path`.
///
/// `root` may be a record, a pointer to one, or a collection of them.
/// An error from `visit` aborts the walk and is returned as is.
#[tracing::instrument(level = "trace", skip_all, fields(path = %path))]
pub fn walk<'a, F>(root: &'a dyn Slot, path: &RelationPath, mut visit: F) -> Result<()>
where
    F: FnMut(&'a dyn Record) -> Result<()>,
{
    walk_node(root.node(), path.steps(), 0, ROOT, &mut visit)
}

/// Like [`walk`], handing out mutable terminal records.
///
/// Nil pointers are still skipped, never materialized.
#[tracing::instrument(level = "trace", skip_all, fields(path = %path))]
pub fn walk_mut<'a, F>(root: &'a mut dyn Slot, path: &RelationPath, mut visit: F) -> Result<()>
where
    F: FnMut(&'a mut dyn Record) -> Result<()>,
{
    walk_node_mut(root.node_mut(), path.steps(), 0, ROOT, &mut visit)
}

/// Collect the terminal records reachable from `root` along `path`, in
/// visit order.
pub fn resolve<'a>(root: &'a dyn Slot, path: &RelationPath) -> Result<Vec<&'a dyn Record>> {
    let mut found = Vec::new();
    walk(root, path, |record| {
        found.push(record);
        Ok(())
    })?;
    Ok(found)
}

/// Return the slot addressed by `path`, materializing every nil pointer
/// before the last step.
///
/// The terminal slot itself is returned untouched. Paths through a
/// collection are rejected: there is no single slot to return.
pub fn field_by_path_mut<'a>(root: &'a mut dyn Slot, path: &RelationPath) -> Result<&'a mut dyn Slot> {
    let mut slot = root;
    let mut owner = ROOT;
    for (pos, step) in path.steps().iter().enumerate() {
        let record = match slot.node_or_init() {
            NodeMut::Record(record) => record,
            NodeMut::Collection(_) => {
                return Err(PathError::new(
                    PathErrorKind::CollectionInWritePath,
                    owner,
                    format!("cannot apply step '{step}' to a collection"),
                )
                .at_step(pos)
                .into());
            }
            other => {
                return Err(PathError::new(
                    PathErrorKind::NotARecord,
                    owner,
                    format!("cannot apply step '{step}' to a {}", other.describe()),
                )
                .at_step(pos)
                .into());
            }
        };
        let record_type = record.record_type();
        slot = record
            .slot_mut(step.index)
            .ok_or_else(|| no_such_field(record_type, *step, pos))?;
        owner = record_type.name;
    }
    Ok(slot)
}

/// Write-preparing resolution: like [`field_by_path_mut`], and the terminal
/// slot is materialized as well.
///
/// Use this when assembling a value to attach child data to. A following
/// read-only walk over the same path observes the materialized value.
#[tracing::instrument(level = "trace", skip_all, fields(path = %path))]
pub fn prepare<'a>(root: &'a mut dyn Slot, path: &RelationPath) -> Result<NodeMut<'a>> {
    Ok(field_by_path_mut(root, path)?.node_or_init())
}

/// Record type of the first element of a collection.
///
/// For interface collections this is the type every element must share.
/// Returns `None` for an empty collection or a non-record first element.
pub fn element_type(items: &dyn Collection) -> Option<&'static RecordType> {
    items
        .slot_at(0)?
        .node()
        .as_record()
        .map(|record| record.record_type())
}

fn walk_node<'a, F>(
    node: Node<'a>,
    steps: &[Step],
    pos: usize,
    owner: &'static str,
    visit: &mut F,
) -> Result<()>
where
    F: FnMut(&'a dyn Record) -> Result<()>,
{
    match node {
        Node::Collection(items) => {
            let expected = first_element(items);
            for slot in items.slots() {
                let elem = slot.node();
                if slot.is_interface() {
                    check_element(expected, elem.as_record(), owner, pos)?;
                }
                visit_field(elem, steps, pos, owner, visit)?;
            }
            Ok(())
        }
        other => visit_field(other, steps, pos, owner, visit),
    }
}

fn visit_field<'a, F>(
    node: Node<'a>,
    steps: &[Step],
    pos: usize,
    owner: &'static str,
    visit: &mut F,
) -> Result<()>
where
    F: FnMut(&'a dyn Record) -> Result<()>,
{
    let record = match node {
        Node::Record(record) => record,
        Node::Nil => return Ok(()),
        Node::Collection(_) => return Err(nested_collection(owner, pos)),
        Node::Scalar(_) => return Err(not_a_record(owner, steps.first(), pos)),
    };
    let Some((step, rest)) = steps.split_first() else {
        return visit(record);
    };
    let record_type = record.record_type();
    let slot = record
        .slot(step.index)
        .ok_or_else(|| no_such_field(record_type, *step, pos))?;
    match slot.node() {
        Node::Nil => {
            tracing::trace!(
                record_type = record_type.name,
                step = %step,
                "nil pointer, branch contributes nothing"
            );
            Ok(())
        }
        child => walk_node(child, rest, pos + 1, record_type.name, visit),
    }
}

fn walk_node_mut<'a, F>(
    node: NodeMut<'a>,
    steps: &[Step],
    pos: usize,
    owner: &'static str,
    visit: &mut F,
) -> Result<()>
where
    F: FnMut(&'a mut dyn Record) -> Result<()>,
{
    match node {
        NodeMut::Collection(items) => {
            let expected = first_element(&*items);
            for slot in items.slots_mut() {
                let interface = slot.is_interface();
                let elem = slot.node_mut();
                if interface {
                    let actual = match &elem {
                        NodeMut::Record(record) => Some(&**record),
                        _ => None,
                    };
                    check_element(expected, actual, owner, pos)?;
                }
                visit_field_mut(elem, steps, pos, owner, visit)?;
            }
            Ok(())
        }
        other => visit_field_mut(other, steps, pos, owner, visit),
    }
}

fn visit_field_mut<'a, F>(
    node: NodeMut<'a>,
    steps: &[Step],
    pos: usize,
    owner: &'static str,
    visit: &mut F,
) -> Result<()>
where
    F: FnMut(&'a mut dyn Record) -> Result<()>,
{
    let record = match node {
        NodeMut::Record(record) => record,
        NodeMut::Nil => return Ok(()),
        NodeMut::Collection(_) => return Err(nested_collection(owner, pos)),
        NodeMut::Scalar(_) => return Err(not_a_record(owner, steps.first(), pos)),
    };
    let Some((step, rest)) = steps.split_first() else {
        return visit(record);
    };
    let record_type = record.record_type();
    let slot = record
        .slot_mut(step.index)
        .ok_or_else(|| no_such_field(record_type, *step, pos))?;
    match slot.node_mut() {
        NodeMut::Nil => {
            tracing::trace!(
                record_type = record_type.name,
                step = %step,
                "nil pointer, branch contributes nothing"
            );
            Ok(())
        }
        child => walk_node_mut(child, rest, pos + 1, record_type.name, visit),
    }
}

/// Metadata and concrete type of a collection's first record element.
fn first_element(items: &dyn Collection) -> Option<(&'static RecordType, TypeId)> {
    let record = items.slot_at(0)?.node().as_record()?;
    Some((record.record_type(), record.as_any().type_id()))
}

/// Elements of an interface collection must share the concrete type of the
/// first one. Record type names are not unique, so types are compared by id.
fn check_element(
    expected: Option<(&'static RecordType, TypeId)>,
    actual: Option<&dyn Record>,
    owner: &'static str,
    pos: usize,
) -> Result<()> {
    let (Some((expected, expected_id)), Some(actual)) = (expected, actual) else {
        return Ok(());
    };
    if actual.as_any().type_id() == expected_id {
        return Ok(());
    }
    let found = actual.record_type();
    let message = if found.name == expected.name {
        format!(
            "interface collection resolved to '{}' from its first element, found a different type with the same name",
            expected.name
        )
    } else {
        format!(
            "interface collection resolved to '{}' from its first element, found '{}'",
            expected.name, found.name
        )
    };
    Err(PathError::new(PathErrorKind::HeterogeneousCollection, owner, message)
        .at_step(pos.saturating_sub(1))
        .into())
}

fn no_such_field(record_type: &'static RecordType, step: Step, pos: usize) -> Error {
    PathError::new(
        PathErrorKind::NoSuchField,
        record_type.name,
        format!(
            "no field at index {} ({} has {} fields)",
            step.index,
            record_type.name,
            record_type.fields.len()
        ),
    )
    .at_step(pos)
    .into()
}

fn nested_collection(owner: &'static str, pos: usize) -> Error {
    PathError::new(
        PathErrorKind::NestedCollection,
        owner,
        "collection element is itself a collection",
    )
    .at_step(pos.saturating_sub(1))
    .into()
}

fn not_a_record(owner: &'static str, next: Option<&Step>, pos: usize) -> Error {
    let message = match next {
        Some(step) => format!("cannot apply step '{step}' to a scalar"),
        None => "path ends on a scalar, not a record".to_string(),
    };
    let err = PathError::new(PathErrorKind::NotARecord, owner, message);
    match next {
        Some(_) => err.at_step(pos),
        None => err.at_step(pos.saturating_sub(1)),
    }
    .into()
}

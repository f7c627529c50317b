//! Relation paths.
//!
//! A relation path is the ordered list of field-access steps leading from an
//! ancestor record to a descendant record or collection. Paths are computed
//! once per relation and reused for every traversal.

use std::fmt;

use crate::error::{PathError, PathErrorKind, Result};
use crate::model::{RecordType, SlotKind};

/// One field-access step: a slot index, plus the field name when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub index: usize,
    pub name: Option<&'static str>,
}

impl Step {
    pub const fn new(index: usize) -> Self {
        Self { index, name: None }
    }

    pub const fn named(index: usize, name: &'static str) -> Self {
        Self {
            index,
            name: Some(name),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "#{}", self.index),
        }
    }
}

/// An ordered sequence of field-access steps.
///
/// The empty path addresses the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationPath {
    steps: Vec<Step>,
}

impl RelationPath {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from raw slot indices.
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            steps: indices.into_iter().map(Step::new).collect(),
        }
    }

    pub fn from_steps(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Resolve field names against static record metadata.
    ///
    /// Each name may be a field name or a column name. Resolution follows
    /// each slot's target type, so it stops with an error at a scalar slot
    /// or at an interface collection whose element type is only known at
    /// runtime (use [`RelationPath::new`] with indices there).
    pub fn resolve(root: &'static RecordType, names: &[&str]) -> Result<Self> {
        let mut steps = Vec::with_capacity(names.len());
        let mut current = root;
        for (pos, name) in names.iter().enumerate() {
            let index = current.index_of(name).ok_or_else(|| {
                PathError::new(
                    PathErrorKind::UnknownName,
                    current.name,
                    format!("no field named '{name}'"),
                )
                .at_step(pos)
            })?;
            let info = &current.fields[index];
            steps.push(Step::named(index, info.name));

            if pos + 1 == names.len() {
                break;
            }
            current = match (info.kind, info.target_type()) {
                (SlotKind::Scalar, _) => {
                    return Err(PathError::new(
                        PathErrorKind::NotARecord,
                        current.name,
                        format!("'{}' is a scalar and cannot be traversed", info.name),
                    )
                    .at_step(pos)
                    .into());
                }
                (SlotKind::Interface, _) | (_, None) => {
                    return Err(PathError::new(
                        PathErrorKind::Unresolvable,
                        current.name,
                        format!("record type behind '{}' is not statically known", info.name),
                    )
                    .at_step(pos)
                    .into());
                }
                (_, Some(target)) => target,
            };
        }
        Ok(Self { steps })
    }

    /// Resolve a dotted path such as `"items.product"`.
    ///
    /// Surrounding whitespace and empty segments are ignored, so `""` and
    /// `"."` both resolve to the empty path.
    pub fn parse(root: &'static RecordType, dotted: &str) -> Result<Self> {
        let parts: Vec<&str> = dotted
            .trim()
            .split('.')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        Self::resolve(root, &parts)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Extend the path by one step.
    #[must_use]
    pub fn child(&self, step: Step) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    /// Split into the parent path and the final step.
    pub fn split_last(&self) -> Option<(RelationPath, Step)> {
        let (last, parent) = self.steps.split_last()?;
        Some((Self::from_steps(parent.to_vec()), *last))
    }

    /// The record type reached at the end of this path, if statically known.
    ///
    /// Collection slots resolve to their element type. Returns `None` when
    /// the path crosses a scalar or interface slot or names a missing index.
    pub fn terminal_type(&self, root: &'static RecordType) -> Option<&'static RecordType> {
        let mut current = root;
        for step in &self.steps {
            current = current.field(step.index)?.target_type()?;
        }
        Some(current)
    }
}

impl fmt::Display for RelationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl FromIterator<Step> for RelationPath {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<usize>> for RelationPath {
    fn from(indices: Vec<usize>) -> Self {
        Self::new(indices)
    }
}

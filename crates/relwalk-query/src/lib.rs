//! Object-graph walking and SQL fragment generation for relwalk.
//!
//! `relwalk-query` is the **fragment layer**. It walks record graphs built on
//! the `relwalk-core` reflection contract and renders what it finds into SQL
//! text that a caller splices into larger statements.
//!
//! # Role In The Architecture
//!
//! - **Walker**: [`walk`], [`walk_mut`] and [`resolve`] visit every record
//!   reachable along a [`RelationPath`](relwalk_core::RelationPath);
//!   [`prepare`] materializes nil pointers on the way down.
//! - **Fragments**: column lists, `(...)` value rows and composite keys,
//!   always in descriptor order.
//! - **Deduplication**: value lists that write each distinct row once.
//! - **Grouping**: relation slots keyed by parent composite key, for
//!   attaching fetched children to their parents.
//!
//! Nothing here talks to a database; the output is plain bytes.

pub mod builder;
pub mod config;
pub mod dedup;
pub mod fragment;
pub mod group;
pub mod walk;

#[cfg(test)]
mod testing;

pub use builder::FragmentBuilder;
pub use config::{Dialect, FragmentConfig};
pub use dedup::{ROW_SEPARATOR, RowDeduper, append_child_values};
pub use fragment::{
    append_columns, append_model_id, append_model_id_map, append_quoted_columns, append_row,
    append_table_columns,
};
pub use group::{KeyedSlots, group_by_parent_key, group_relation};
pub use walk::{element_type, field_by_path_mut, prepare, resolve, walk, walk_mut};

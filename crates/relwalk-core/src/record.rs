//! The record reflection contract.
//!
//! Object graphs are walked without runtime type inspection: each record type
//! exposes its field slots by index through [`Record`], and each field type
//! says what it holds through [`Slot`]. Pointers (`Option`, `Box`) are
//! dereferenced transparently, `Vec` is a [`Collection`] (`Vec<u8>` excepted,
//! it holds binary data), and `Box<dyn Record>` is an interface slot whose
//! concrete type is known only at runtime.
//!
//! Reading never mutates. The one controlled mutation is
//! [`Slot::node_or_init`], which replaces a nil optional with its default
//! value so traversal can continue through it.

use std::any::Any;
use std::fmt;

use crate::model::RecordType;
use crate::value::Value;

/// A record in an object graph: a value with indexed field slots.
pub trait Record: Any {
    /// Metadata for the concrete type of this record.
    fn record_type(&self) -> &'static RecordType;

    /// The field slot at `index`, or `None` if the type has no such field.
    fn slot(&self, index: usize) -> Option<&dyn Slot>;

    /// Mutable access to the field slot at `index`.
    fn slot_mut(&mut self, index: usize) -> Option<&mut dyn Slot>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A read-only view of what a slot currently holds.
pub enum Node<'a> {
    /// An absent pointer.
    Nil,
    Scalar(Value),
    Record(&'a dyn Record),
    Collection(&'a dyn Collection),
}

/// A mutable view of what a slot currently holds.
pub enum NodeMut<'a> {
    /// An absent pointer. Never produced by [`Slot::node_or_init`].
    Nil,
    Scalar(Value),
    Record(&'a mut dyn Record),
    Collection(&'a mut dyn Collection),
}

impl<'a> Node<'a> {
    /// Short description for diagnostics: the record type name or the kind.
    pub fn describe(&self) -> &'static str {
        match self {
            Node::Nil => "nil",
            Node::Scalar(_) => "scalar",
            Node::Record(r) => r.record_type().name,
            Node::Collection(_) => "collection",
        }
    }

    pub fn as_record(&self) -> Option<&'a dyn Record> {
        match self {
            Node::Record(r) => Some(*r),
            _ => None,
        }
    }
}

impl NodeMut<'_> {
    pub fn describe(&self) -> &'static str {
        match self {
            NodeMut::Nil => "nil",
            NodeMut::Scalar(_) => "scalar",
            NodeMut::Record(r) => r.record_type().name,
            NodeMut::Collection(_) => "collection",
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            Node::Collection(c) => f.debug_struct("Collection").field("len", &c.len()).finish(),
            other => f.debug_tuple("Node").field(&other.describe()).finish(),
        }
    }
}

impl fmt::Debug for NodeMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeMut::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            NodeMut::Collection(c) => {
                f.debug_struct("Collection").field("len", &c.len()).finish()
            }
            other => f.debug_tuple("NodeMut").field(&other.describe()).finish(),
        }
    }
}

/// A field slot: anything a record field can hold.
pub trait Slot: 'static {
    /// Read-only view. Nil pointers are reported as [`Node::Nil`].
    fn node(&self) -> Node<'_>;

    /// Mutable view without materialization.
    fn node_mut(&mut self) -> NodeMut<'_>;

    /// Mutable view that first replaces a nil pointer with a default value.
    fn node_or_init(&mut self) -> NodeMut<'_>;

    /// Whether the slot holds a dynamically typed record.
    fn is_interface(&self) -> bool {
        false
    }

    /// The slot's own value, for downcasting (`Vec<T>`, `Option<T>`, ...).
    fn any_ref(&self) -> &dyn Any;

    fn any_mut(&mut self) -> &mut dyn Any;
}

/// A sequence of slots that traversal fans out over.
pub trait Collection: 'static {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot_at(&self, index: usize) -> Option<&dyn Slot>;

    fn slots(&self) -> Box<dyn Iterator<Item = &dyn Slot> + '_>;

    fn slots_mut(&mut self) -> Box<dyn Iterator<Item = &mut dyn Slot> + '_>;
}

macro_rules! scalar_slot {
    (copy: $($copy:ty),* ; clone: $($cloned:ty),*) => {
        $(
            impl Slot for $copy {
                fn node(&self) -> Node<'_> {
                    Node::Scalar(Value::from(*self))
                }

                fn node_mut(&mut self) -> NodeMut<'_> {
                    NodeMut::Scalar(Value::from(*self))
                }

                fn node_or_init(&mut self) -> NodeMut<'_> {
                    self.node_mut()
                }

                fn any_ref(&self) -> &dyn Any {
                    self
                }

                fn any_mut(&mut self) -> &mut dyn Any {
                    self
                }
            }
        )*
        $(
            impl Slot for $cloned {
                fn node(&self) -> Node<'_> {
                    Node::Scalar(Value::from(self.clone()))
                }

                fn node_mut(&mut self) -> NodeMut<'_> {
                    NodeMut::Scalar(Value::from(self.clone()))
                }

                fn node_or_init(&mut self) -> NodeMut<'_> {
                    self.node_mut()
                }

                fn any_ref(&self) -> &dyn Any {
                    self
                }

                fn any_mut(&mut self) -> &mut dyn Any {
                    self
                }
            }
        )*
    };
}

scalar_slot!(
    copy: bool, i8, i16, i32, i64, u16, u32, u64, f32, f64, [u8; 16];
    clone: String, Value, serde_json::Value
);

/// Binary data. `u8` itself is not a slot, so a byte vector is a scalar
/// rather than a collection.
impl Slot for Vec<u8> {
    fn node(&self) -> Node<'_> {
        Node::Scalar(Value::Bytes(self.clone()))
    }

    fn node_mut(&mut self) -> NodeMut<'_> {
        NodeMut::Scalar(Value::Bytes(self.clone()))
    }

    fn node_or_init(&mut self) -> NodeMut<'_> {
        self.node_mut()
    }

    fn any_ref(&self) -> &dyn Any {
        self
    }

    fn any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T: Slot + Default> Slot for Option<T> {
    fn node(&self) -> Node<'_> {
        match self {
            Some(inner) => inner.node(),
            None => Node::Nil,
        }
    }

    fn node_mut(&mut self) -> NodeMut<'_> {
        match self {
            Some(inner) => inner.node_mut(),
            None => NodeMut::Nil,
        }
    }

    fn node_or_init(&mut self) -> NodeMut<'_> {
        if self.is_none() {
            tracing::trace!(
                target_type = std::any::type_name::<T>(),
                "materializing nil pointer"
            );
        }
        self.get_or_insert_with(T::default).node_or_init()
    }

    fn is_interface(&self) -> bool {
        self.as_ref().is_some_and(|inner| inner.is_interface())
    }

    fn any_ref(&self) -> &dyn Any {
        self
    }

    fn any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T: Slot + ?Sized> Slot for Box<T> {
    fn node(&self) -> Node<'_> {
        (**self).node()
    }

    fn node_mut(&mut self) -> NodeMut<'_> {
        (**self).node_mut()
    }

    fn node_or_init(&mut self) -> NodeMut<'_> {
        (**self).node_or_init()
    }

    fn is_interface(&self) -> bool {
        (**self).is_interface()
    }

    fn any_ref(&self) -> &dyn Any {
        (**self).any_ref()
    }

    fn any_mut(&mut self) -> &mut dyn Any {
        (**self).any_mut()
    }
}

impl Slot for dyn Record {
    fn node(&self) -> Node<'_> {
        Node::Record(self)
    }

    fn node_mut(&mut self) -> NodeMut<'_> {
        NodeMut::Record(self)
    }

    fn node_or_init(&mut self) -> NodeMut<'_> {
        NodeMut::Record(self)
    }

    fn is_interface(&self) -> bool {
        true
    }

    fn any_ref(&self) -> &dyn Any {
        Record::as_any(self)
    }

    fn any_mut(&mut self) -> &mut dyn Any {
        Record::as_any_mut(self)
    }
}

impl<T: Slot> Slot for Vec<T> {
    fn node(&self) -> Node<'_> {
        Node::Collection(self)
    }

    fn node_mut(&mut self) -> NodeMut<'_> {
        NodeMut::Collection(self)
    }

    fn node_or_init(&mut self) -> NodeMut<'_> {
        NodeMut::Collection(self)
    }

    fn any_ref(&self) -> &dyn Any {
        self
    }

    fn any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T: Slot> Collection for Vec<T> {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn slot_at(&self, index: usize) -> Option<&dyn Slot> {
        <[T]>::get(self, index).map(|v| v as &dyn Slot)
    }

    fn slots(&self) -> Box<dyn Iterator<Item = &dyn Slot> + '_> {
        Box::new(<[T]>::iter(self).map(|v| v as &dyn Slot))
    }

    fn slots_mut(&mut self) -> Box<dyn Iterator<Item = &mut dyn Slot> + '_> {
        Box::new(<[T]>::iter_mut(self).map(|v| v as &mut dyn Slot))
    }
}

/// Implement [`Slot`] for a record type so it can sit directly in a field,
/// a `Box`, an `Option` or a `Vec`.
///
/// `#[derive(Record)]` emits the same impl; this macro is for hand-written
/// [`Record`] impls.
#[macro_export]
macro_rules! record_slot {
    ($ty:ty) => {
        impl $crate::Slot for $ty {
            fn node(&self) -> $crate::Node<'_> {
                $crate::Node::Record(self)
            }

            fn node_mut(&mut self) -> $crate::NodeMut<'_> {
                $crate::NodeMut::Record(self)
            }

            fn node_or_init(&mut self) -> $crate::NodeMut<'_> {
                $crate::NodeMut::Record(self)
            }

            fn any_ref(&self) -> &dyn ::std::any::Any {
                self
            }

            fn any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
        }
    };
}

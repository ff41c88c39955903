//! Runtime type descriptors used to validate type-erased access.

use std::any::{self, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::sync::{PoisonError, RwLock};

lazy_static::lazy_static! {
    static ref TYPES: RwLock<HashMap<TypeId, &'static Type>> = RwLock::new(HashMap::new());
}

/// Descriptor of a reflected type.
///
/// There is exactly one descriptor per type for the whole process:
/// [`Type::of`] creates it on first use and returns the same reference afterwards.
///
#[derive(Debug)]
pub struct Type {
    id: TypeId,
    name: &'static str,
    size: usize,
    align: usize,
}

impl Type {
    /// Returns memoized descriptor of type `T`.
    pub fn of<T>() -> &'static Type
    where
        T: 'static,
    {
        let id = TypeId::of::<T>();
        if let Some(ty) = TYPES
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
        {
            return *ty;
        }

        let mut types = TYPES.write().unwrap_or_else(PoisonError::into_inner);
        *types.entry(id).or_insert_with(|| {
            log::trace!("reflecting type `{}`", any::type_name::<T>());
            let ty: &'static Type = Box::leak(Box::new(Type {
                id,
                name: any::type_name::<T>(),
                size: mem::size_of::<T>(),
                align: mem::align_of::<T>(),
            }));
            ty
        })
    }

    /// [`TypeId`] of the described type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Human readable name of the described type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Size of the described type in bytes, as [`mem::size_of`] reports it.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Minimum alignment of the described type in bytes.
    pub fn align(&self) -> usize {
        self.align
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Objects of this trait can be described by [`Type`] at runtime.
pub trait Reflect: 'static {
    /// Returns memoized descriptor of this type.
    fn reflect() -> &'static Type
    where
        Self: Sized,
    {
        Type::of::<Self>()
    }
}

impl<T> Reflect for T where T: 'static {}

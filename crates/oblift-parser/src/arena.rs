//! Arena allocator for expression trees.
//!
//! One arena backs a whole parse+lift run: parsed nodes, argument and field
//! slices, and the names synthesized by the lifting pass. Nothing is freed
//! until the arena is dropped or reset.

use bumpalo::Bump;
use std::fmt::{self, Write};

/// Arena allocator for AST nodes.
pub struct Arena {
    bump: Bump,
}

impl Arena {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Create a new arena with the specified capacity in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    /// Copy a slice into the arena.
    #[inline]
    pub fn alloc_slice<T: Copy>(&self, slice: &[T]) -> &[T] {
        self.bump.alloc_slice_copy(slice)
    }

    /// Move the items of an exact-size iterator into an arena slice.
    #[inline]
    pub fn alloc_slice_from_iter<T, I>(&self, iter: I) -> &[T]
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.bump.alloc_slice_fill_iter(iter)
    }

    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Format directly into the arena, e.g. for synthesized names.
    pub fn alloc_fmt(&self, args: fmt::Arguments<'_>) -> &str {
        let mut s = bumpalo::collections::String::new_in(&self.bump);
        // Writing into a bump string cannot fail.
        let _ = s.write_fmt(args);
        s.into_bump_str()
    }

    /// Reset the arena, deallocating all memory.
    pub fn reset(&mut self) {
        self.bump.reset();
    }

    /// Get the total bytes allocated.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

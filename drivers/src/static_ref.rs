// Licensed under the Apache-2.0 license

use core::ops::Deref;

/// A pointer to statically allocated memory, typically a memory-mapped
/// register block.
pub struct StaticRef<T> {
    ptr: *const T,
}

impl<T> StaticRef<T> {
    /// Create a new `StaticRef` from a raw pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be aligned, non-null and point to memory that stays valid
    /// for the rest of the program.
    pub const unsafe fn new(ptr: *const T) -> StaticRef<T> {
        StaticRef { ptr }
    }
}

impl<T> Clone for StaticRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StaticRef<T> {}

impl<T: 'static> Deref for StaticRef<T> {
    type Target = T;

    fn deref(&self) -> &'static T {
        // SAFETY: the constructor requires a pointer valid for 'static.
        unsafe { &*self.ptr }
    }
}

// SAFETY: register blocks are only accessed with volatile loads and stores,
// which the bus serializes. The latch/read protocol built on top tolerates
// concurrent readers.
unsafe impl<T> Send for StaticRef<T> {}
unsafe impl<T> Sync for StaticRef<T> {}

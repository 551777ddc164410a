// Copyright (C) 2020  Pierre Krieger
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Native memory regions and their owners.
//!
//! An [`Arena`] owns everything that must stay alive while native code might still access it:
//! allocations, the state of upcalls, and the cleanup actions of reinterpreted regions. All of
//! it is released at once when the arena is dropped.
//!
//! A [`Segment`] is a view on a region of memory with a known size. It doesn't own anything.
//! Its lifetime is tied to the arena the region belongs to.

use crate::value::Carrier;
use core::{
    cell::{Cell, RefCell},
    ffi::c_void,
    fmt,
    marker::PhantomData,
    mem,
    ptr::{self, NonNull},
};
use std::{
    alloc,
    ffi::CStr,
    os::raw::c_char,
};

/// Owner of native memory. Frees everything it owns when dropped.
///
/// An arena is meant to be used from a single thread, and the segments allocated from it
/// can't be sent to another thread.
pub struct Arena {
    /// Allocations made with [`SegmentAllocator::allocate`], and their layouts.
    allocations: RefCell<Vec<(NonNull<u8>, alloc::Layout)>>,
    /// Actions to run when the arena closes, in reverse order.
    cleanups: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl Arena {
    /// Builds a new empty arena.
    pub fn new() -> Self {
        Arena {
            allocations: RefCell::new(Vec::new()),
            cleanups: RefCell::new(Vec::new()),
        }
    }

    /// Moves `value` to the heap and keeps it alive until the arena closes. Returns a pointer
    /// to it, which stays valid for the same duration.
    pub fn retain<T: 'static>(&self, value: T) -> NonNull<T> {
        let ptr = NonNull::from(Box::leak(Box::new(value)));
        self.on_close(move || unsafe {
            drop(Box::from_raw(ptr.as_ptr()));
        });
        ptr
    }

    /// Registers an action to run when the arena closes.
    ///
    /// Actions run in the reverse order of their registration, and before memory allocated
    /// from the arena is freed.
    pub fn on_close(&self, action: impl FnOnce() + 'static) {
        self.cleanups.borrow_mut().push(Box::new(action));
    }

    /// Builds a segment of `byte_size` bytes starting at `ptr`, whose lifetime is bound to the
    /// arena. `cleanup` runs with a copy of the segment when the arena closes.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes of `byte_size` bytes until the arena closes.
    pub unsafe fn reinterpret<C>(&self, ptr: *mut c_void, byte_size: usize, cleanup: C) -> Segment<'_>
    where
        C: FnOnce(Segment<'static>) + 'static,
    {
        let for_cleanup = Segment::from_raw_parts(ptr as *mut u8, byte_size);
        self.on_close(move || cleanup(for_cleanup));
        Segment::from_raw_parts(ptr as *mut u8, byte_size)
    }

    /// Copies `text` in a new allocation, followed with a NUL terminator.
    ///
    /// # Panic
    ///
    /// Panics if `text` contains a NUL byte.
    pub fn allocate_c_str(&self, text: &str) -> Segment<'_> {
        assert!(!text.as_bytes().contains(&0), "string contains a NUL byte");
        let segment = self.allocate(text.len() + 1, 1);
        segment.as_slice(0, text.len()).copy_from(text.as_bytes());
        segment
    }
}

impl Default for Arena {
    fn default() -> Self {
        Arena::new()
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        let cleanups = mem::take(self.cleanups.get_mut());
        let allocations = mem::take(self.allocations.get_mut());
        log::trace!(
            "closing arena: {} cleanup(s), {} allocation(s)",
            cleanups.len(),
            allocations.len()
        );

        for cleanup in cleanups.into_iter().rev() {
            cleanup();
        }

        for (ptr, layout) in allocations {
            unsafe { alloc::dealloc(ptr.as_ptr(), layout) };
        }
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Arena")
            .field("allocations", &self.allocations.borrow().len())
            .field("cleanups", &self.cleanups.borrow().len())
            .finish()
    }
}

/// Source of new zeroed segments.
pub trait SegmentAllocator {
    /// Allocates `byte_size` zeroed bytes aligned to `byte_alignment`.
    ///
    /// # Panic
    ///
    /// Panics if `byte_alignment` isn't a power of two, or if the allocator is exhausted.
    fn allocate(&self, byte_size: usize, byte_alignment: usize) -> Segment<'_>;
}

impl SegmentAllocator for Arena {
    fn allocate(&self, byte_size: usize, byte_alignment: usize) -> Segment<'_> {
        let layout = match alloc::Layout::from_size_align(byte_size, byte_alignment) {
            Ok(l) => l,
            Err(_) => panic!(
                "invalid allocation of {} bytes aligned to {}",
                byte_size, byte_alignment
            ),
        };

        if layout.size() == 0 {
            // The global allocator doesn't support zero-sized allocations. Any non-null
            // aligned pointer does the job.
            let dangling = layout.align() as *mut u8;
            return unsafe { Segment::from_raw_parts(dangling, 0) };
        }

        let ptr = match NonNull::new(unsafe { alloc::alloc_zeroed(layout) }) {
            Some(p) => p,
            None => alloc::handle_alloc_error(layout),
        };
        self.allocations.borrow_mut().push((ptr, layout));
        unsafe { Segment::from_raw_parts(ptr.as_ptr(), byte_size) }
    }
}

/// Allocator that hands out consecutive pieces of an existing segment.
///
/// Useful to place a struct and everything it points to in a single block.
pub struct SlicingAllocator<'a> {
    segment: Segment<'a>,
    cursor: Cell<usize>,
}

impl<'a> SlicingAllocator<'a> {
    /// Builds an allocator that starts at the beginning of `segment`.
    pub fn new(segment: Segment<'a>) -> Self {
        SlicingAllocator {
            segment,
            cursor: Cell::new(0),
        }
    }

    /// Number of bytes not handed out yet, ignoring alignment.
    pub fn remaining(&self) -> usize {
        self.segment.byte_size() - self.cursor.get()
    }
}

impl<'a> SegmentAllocator for SlicingAllocator<'a> {
    fn allocate(&self, byte_size: usize, byte_alignment: usize) -> Segment<'_> {
        assert!(byte_alignment.is_power_of_two());

        let base = self.segment.as_ptr() as usize;
        let start = (base + self.cursor.get() + byte_alignment - 1) & !(byte_alignment - 1);
        let offset = start - base;
        if offset.checked_add(byte_size).map_or(true, |end| end > self.segment.byte_size()) {
            panic!(
                "slicing allocator exhausted: {} bytes requested, {} remaining",
                byte_size,
                self.remaining()
            );
        }

        self.cursor.set(offset + byte_size);
        let out = self.segment.as_slice(offset, byte_size);
        out.fill(0);
        out
    }
}

impl<'a> fmt::Debug for SlicingAllocator<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SlicingAllocator")
            .field("segment", &self.segment)
            .field("cursor", &self.cursor.get())
            .finish()
    }
}

/// Region of native memory of a known size.
///
/// A segment is a plain pointer and length. Copying it doesn't copy the memory. All accesses
/// are bounds-checked and don't require any alignment.
#[derive(Copy, Clone)]
pub struct Segment<'a> {
    ptr: *mut u8,
    byte_size: usize,
    marker: PhantomData<&'a Arena>,
}

impl<'a> Segment<'a> {
    /// Returns a segment of size 0 pointing to address 0. This is what C calls `NULL`.
    pub const fn null() -> Self {
        Segment {
            ptr: ptr::null_mut(),
            byte_size: 0,
            marker: PhantomData,
        }
    }

    /// Builds a segment from a pointer and a size.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes of `byte_size` bytes for the lifetime `'a`.
    pub const unsafe fn from_raw_parts(ptr: *mut u8, byte_size: usize) -> Self {
        Segment {
            ptr,
            byte_size,
            marker: PhantomData,
        }
    }

    /// Address of the first byte of the segment.
    pub fn as_ptr(&self) -> *mut c_void {
        self.ptr as *mut c_void
    }

    /// Same as [`Segment::as_ptr`], casted to a pointer to `T`.
    pub fn cast<T>(&self) -> *mut T {
        self.ptr as *mut T
    }

    /// Size of the segment in bytes.
    pub fn byte_size(&self) -> usize {
        self.byte_size
    }

    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    /// Returns the sub-segment of `len` bytes starting at `offset`.
    ///
    /// # Panic
    ///
    /// Panics if the sub-segment isn't within the bounds of `self`.
    pub fn as_slice(&self, offset: usize, len: usize) -> Segment<'a> {
        self.check_bounds(offset, len);
        unsafe { Segment::from_raw_parts(self.ptr.add(offset), len) }
    }

    /// Reads a value at `offset` bytes from the start of the segment.
    ///
    /// # Panic
    ///
    /// Panics if the value isn't within the bounds of `self`.
    pub fn get<T: Carrier>(&self, offset: usize) -> T {
        self.check_bounds(offset, mem::size_of::<T>());
        unsafe { ptr::read_unaligned(self.ptr.add(offset) as *const T) }
    }

    /// Writes a value at `offset` bytes from the start of the segment.
    ///
    /// # Panic
    ///
    /// Panics if the value isn't within the bounds of `self`.
    pub fn set<T: Carrier>(&self, offset: usize, value: T) {
        self.check_bounds(offset, mem::size_of::<T>());
        unsafe { ptr::write_unaligned(self.ptr.add(offset) as *mut T, value) }
    }

    /// Reads element `index` of an array of `T`s starting at the beginning of the segment.
    pub fn get_at_index<T: Carrier>(&self, index: usize) -> T {
        self.get(element_offset::<T>(index))
    }

    /// Writes element `index` of an array of `T`s starting at the beginning of the segment.
    pub fn set_at_index<T: Carrier>(&self, index: usize, value: T) {
        self.set(element_offset::<T>(index), value)
    }

    /// Sets every byte of the segment to `byte`.
    pub fn fill(&self, byte: u8) {
        if self.byte_size != 0 {
            unsafe { ptr::write_bytes(self.ptr, byte, self.byte_size) }
        }
    }

    /// Copies `bytes` at the start of the segment.
    ///
    /// # Panic
    ///
    /// Panics if `bytes` is larger than the segment.
    pub fn copy_from(&self, bytes: &[u8]) {
        self.check_bounds(0, bytes.len());
        if !bytes.is_empty() {
            unsafe { ptr::copy(bytes.as_ptr(), self.ptr, bytes.len()) }
        }
    }

    /// Copies the content of the segment into a `Vec`.
    pub fn to_vec(&self) -> Vec<u8> {
        if self.byte_size == 0 {
            return Vec::new();
        }
        unsafe { core::slice::from_raw_parts(self.ptr, self.byte_size).to_vec() }
    }

    /// Reads the NUL-terminated string whose address is stored at `offset`. Returns `None`
    /// if that address is null. Invalid UTF-8 sequences are replaced.
    ///
    /// # Safety
    ///
    /// The address, if not null, must point to a NUL-terminated string.
    pub unsafe fn get_c_str(&self, offset: usize) -> Option<String> {
        let ptr = self.get::<*const c_char>(offset);
        if ptr.is_null() {
            return None;
        }
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }

    fn check_bounds(&self, offset: usize, len: usize) {
        let in_bounds = offset
            .checked_add(len)
            .map_or(false, |end| end <= self.byte_size);
        if !in_bounds {
            panic!(
                "access to {} bytes at offset {} out of bounds of {:?}",
                len, offset, self
            );
        }
    }
}

fn element_offset<T>(index: usize) -> usize {
    match index.checked_mul(mem::size_of::<T>()) {
        Some(o) => o,
        None => panic!("index {} overflows", index),
    }
}

impl<'a> fmt::Debug for Segment<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Segment({:p}, {} bytes)", self.ptr, self.byte_size)
    }
}

#[cfg(test)]
mod tests {
    use super::{Arena, Segment, SegmentAllocator as _, SlicingAllocator};
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn allocations_are_zeroed_and_aligned() {
        let arena = Arena::new();
        let segment = arena.allocate(24, 8);
        assert_eq!(segment.byte_size(), 24);
        assert_eq!(segment.as_ptr() as usize % 8, 0);
        assert!(segment.to_vec().iter().all(|b| *b == 0));
    }

    #[test]
    fn zero_sized_allocation() {
        let arena = Arena::new();
        let segment = arena.allocate(0, 4);
        assert!(!segment.is_null());
        assert_eq!(segment.byte_size(), 0);
        assert!(segment.to_vec().is_empty());
    }

    #[test]
    fn unaligned_get_set() {
        let arena = Arena::new();
        let segment = arena.allocate(16, 8);
        segment.set::<u32>(1, 0xdead_beef);
        assert_eq!(segment.get::<u32>(1), 0xdead_beef);
        assert_eq!(segment.get::<u8>(1), 0xef);
    }

    #[test]
    #[should_panic]
    fn get_out_of_bounds() {
        let arena = Arena::new();
        let segment = arena.allocate(8, 8);
        segment.get::<u64>(1);
    }

    #[test]
    #[should_panic]
    fn null_segment_has_no_bytes() {
        Segment::null().get::<u8>(0);
    }

    #[test]
    fn indexed_access() {
        let arena = Arena::new();
        let segment = arena.allocate(4 * 8, 8);
        for n in 0..4u64 {
            segment.set_at_index(n as usize, n * 100);
        }
        assert_eq!(segment.get_at_index::<u64>(3), 300);
        assert_eq!(segment.get::<u64>(16), 200);
    }

    #[test]
    fn fill_and_copy() {
        let arena = Arena::new();
        let segment = arena.allocate(6, 1);
        segment.fill(0xff);
        segment.as_slice(2, 3).copy_from(&[1, 2]);
        assert_eq!(segment.to_vec(), vec![0xff, 0xff, 1, 2, 0xff, 0xff]);
    }

    #[test]
    fn c_strings() {
        let arena = Arena::new();
        let text = arena.allocate_c_str("hello");
        assert_eq!(text.to_vec(), b"hello\0".to_vec());

        let holder = arena.allocate(8, 8);
        assert_eq!(unsafe { holder.get_c_str(0) }, None);
        holder.set(0, text.as_ptr() as *const u8);
        assert_eq!(unsafe { holder.get_c_str(0) }.as_deref(), Some("hello"));
    }

    #[test]
    #[should_panic]
    fn c_string_with_nul() {
        Arena::new().allocate_c_str("a\0b");
    }

    #[test]
    fn cleanups_run_in_reverse() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let arena = Arena::new();
        for n in 0..3 {
            let order = order.clone();
            arena.on_close(move || order.borrow_mut().push(n));
        }
        assert!(order.borrow().is_empty());
        drop(arena);
        assert_eq!(*order.borrow(), vec![2, 1, 0]);
    }

    #[test]
    fn retained_values_dropped_on_close() {
        let marker = Rc::new(());
        let arena = Arena::new();
        let ptr = arena.retain(marker.clone());
        assert_eq!(Rc::strong_count(&marker), 2);
        assert!(Rc::ptr_eq(unsafe { ptr.as_ref() }, &marker));
        drop(arena);
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn reinterpret_runs_cleanup() {
        let mut native = [7u8; 4];
        let seen = Rc::new(RefCell::new(None));

        let arena = Arena::new();
        let seen2 = seen.clone();
        let segment = unsafe {
            arena.reinterpret(native.as_mut_ptr() as *mut _, 4, move |s| {
                *seen2.borrow_mut() = Some(s.to_vec());
            })
        };
        segment.set::<u8>(3, 9);
        drop(arena);

        assert_eq!(*seen.borrow(), Some(vec![7, 7, 7, 9]));
    }

    #[test]
    fn slicing_allocator() {
        let arena = Arena::new();
        let block = arena.allocate(32, 8);
        block.fill(0xaa);

        let slicer = SlicingAllocator::new(block);
        let a = slicer.allocate(3, 1);
        let b = slicer.allocate(8, 8);
        assert_eq!(a.as_ptr(), block.as_ptr());
        assert_eq!(b.as_ptr() as usize - block.as_ptr() as usize, 8);
        assert_eq!(b.to_vec(), vec![0; 8]);
        assert_eq!(slicer.remaining(), 16);
    }

    #[test]
    #[should_panic]
    fn slicing_allocator_exhausted() {
        let arena = Arena::new();
        let slicer = SlicingAllocator::new(arena.allocate(8, 8));
        slicer.allocate(4, 4);
        slicer.allocate(8, 4);
    }
}

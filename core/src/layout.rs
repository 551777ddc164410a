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

//! Layouts of native structs.
//!
//! A native struct is declared with the [`foreign_struct!`](crate::foreign_struct) macro.
//! The macro produces a `#[repr(C)]` Rust struct, which makes the Rust compiler apply the same
//! field placement rules as the C compiler of the target. The [`StructLayout`] of the struct
//! is then read back from the Rust type with `core::mem::offset_of!`, meaning that the layout
//! table and the actual type can't disagree.
//!
//! For each field, the macro also generates an associated constant of type [`Field`] with the
//! same name as the field. This constant is how one reads and writes the field in a
//! [`Segment`]:
//!
//! ```
//! use wgpu_ffm_core::{foreign_struct, Arena, ForeignStruct as _};
//!
//! foreign_struct! {
//!     pub struct Extent {
//!         pub width: u32,
//!         pub height: u32,
//!     }
//! }
//!
//! let arena = Arena::new();
//! let extent = Extent::allocate(&arena);
//! Extent::height.set(&extent, 768);
//! assert_eq!(Extent::height.get(&extent), 768);
//! assert_eq!(Extent::height.offset(), 4);
//! ```

use crate::memory::{Arena, Segment, SegmentAllocator};
use crate::value::{Carrier, MemberKind};
use core::{ffi::c_void, fmt, marker::PhantomData, mem};
use smallvec::SmallVec;

/// Description of a native struct.
#[derive(Debug, Copy, Clone)]
pub struct StructLayout {
    /// Name of the struct in the C header.
    pub name: &'static str,
    /// Total size in bytes, including trailing padding.
    pub size: usize,
    /// Alignment in bytes.
    pub align: usize,
    /// Fields, in declaration order.
    pub fields: &'static [FieldLayout],
}

impl StructLayout {
    /// Returns the field with the given name, as written in the C header.
    pub fn field(&self, name: &str) -> Option<&'static FieldLayout> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns the holes that the C compiler inserts between the fields and after the last
    /// field, in order.
    pub fn padding(&self) -> SmallVec<[Padding; 4]> {
        let mut out = SmallVec::new();
        let mut cursor = 0;

        for field in self.fields {
            if field.offset > cursor {
                out.push(Padding {
                    offset: cursor,
                    len: field.offset - cursor,
                });
            }
            cursor = field.offset + field.size;
        }

        if self.size > cursor {
            out.push(Padding {
                offset: cursor,
                len: self.size - cursor,
            });
        }

        out
    }
}

impl fmt::Display for StructLayout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "struct {} {{ // size = {}, align = {}", self.name, self.size, self.align)?;
        for field in self.fields {
            writeln!(f, "    {}", field)?;
        }
        write!(f, "}}")
    }
}

/// Range of bytes not covered by any field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Padding {
    pub offset: usize,
    pub len: usize,
}

/// Description of one field of a native struct.
#[derive(Debug, Copy, Clone)]
pub struct FieldLayout {
    name: &'static str,
    offset: usize,
    size: usize,
    kind: MemberKind,
}

impl FieldLayout {
    /// Name of the field, as written in the C header.
    pub fn name(&self) -> &'static str {
        // Fields named after a Rust keyword are declared as raw identifiers.
        self.name.trim_start_matches("r#")
    }

    /// Offset in bytes from the start of the struct.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Size in bytes.
    pub const fn size(&self) -> usize {
        self.size
    }

    pub const fn kind(&self) -> MemberKind {
        self.kind
    }
}

impl fmt::Display for FieldLayout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            MemberKind::Value(ty) => write!(f, "{:?} {}", ty, self.name())?,
            MemberKind::Struct(layout) => write!(f, "struct {} {}", layout.name, self.name())?,
        }
        write!(f, "; // offset = {}, size = {}", self.offset, self.size)
    }
}

/// Accessor for a field of type `T` inside of a struct of type `S`.
///
/// Generated by [`foreign_struct!`](crate::foreign_struct) as an associated constant of `S`.
pub struct Field<S, T> {
    layout: FieldLayout,
    marker: PhantomData<fn() -> (S, T)>,
}

impl<S, T: Carrier> Field<S, T> {
    /// Builds the accessor of the field at the given offset.
    ///
    /// Only meant to be called from the `foreign_struct!` macro, with the value of
    /// `offset_of!`.
    pub const fn new(name: &'static str, offset: usize) -> Self {
        Field {
            layout: FieldLayout {
                name,
                offset,
                size: mem::size_of::<T>(),
                kind: T::KIND,
            },
            marker: PhantomData,
        }
    }

    /// Returns the layout of this field.
    pub const fn layout(&self) -> FieldLayout {
        self.layout
    }

    /// Offset of this field in bytes from the start of the struct.
    pub const fn offset(&self) -> usize {
        self.layout.offset
    }

    /// Size of this field in bytes.
    pub const fn byte_size(&self) -> usize {
        self.layout.size
    }

    /// Reads the field from the struct starting at the beginning of `segment`.
    ///
    /// # Panic
    ///
    /// Panics if `segment` is too small to contain the field.
    pub fn get(&self, segment: &Segment) -> T {
        segment.get(self.layout.offset)
    }

    /// Writes the field of the struct starting at the beginning of `segment`.
    ///
    /// # Panic
    ///
    /// Panics if `segment` is too small to contain the field.
    pub fn set(&self, segment: &Segment, value: T) {
        segment.set(self.layout.offset, value)
    }

    /// Returns the bytes of the field as a segment. Mostly useful for fields that are
    /// themselves structs.
    pub fn slice<'a>(&self, segment: &Segment<'a>) -> Segment<'a> {
        segment.as_slice(self.layout.offset, self.layout.size)
    }
}

impl<S, T> Clone for Field<S, T> {
    fn clone(&self) -> Self {
        Field {
            layout: self.layout,
            marker: PhantomData,
        }
    }
}

impl<S, T> Copy for Field<S, T> {}

impl<S, T> fmt::Debug for Field<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.layout, f)
    }
}

/// Native struct declared with [`foreign_struct!`](crate::foreign_struct).
///
/// # Safety
///
/// [`ForeignStruct::LAYOUT`] must exactly describe the type.
pub unsafe trait ForeignStruct: Carrier {
    /// Layout of the struct.
    const LAYOUT: &'static StructLayout;

    /// Size of the struct in bytes.
    fn sizeof() -> usize {
        Self::LAYOUT.size
    }

    /// Allocates a zeroed region big enough for one struct.
    fn allocate<A: SegmentAllocator + ?Sized>(allocator: &A) -> Segment<'_> {
        allocator.allocate(Self::LAYOUT.size, Self::LAYOUT.align)
    }

    /// Allocates a zeroed region big enough for `count` consecutive structs.
    ///
    /// # Panic
    ///
    /// Panics if the total size overflows.
    fn allocate_array<A: SegmentAllocator + ?Sized>(count: usize, allocator: &A) -> Segment<'_> {
        allocator.allocate(array_size::<Self>(count), Self::LAYOUT.align)
    }

    /// Returns element `index` of an array of structs. The returned segment starts at
    /// `array + index * sizeof()`.
    ///
    /// # Panic
    ///
    /// Panics if `index` is out of the bounds of `array`.
    fn as_slice<'a>(array: &Segment<'a>, index: usize) -> Segment<'a> {
        array.as_slice(array_size::<Self>(index), Self::LAYOUT.size)
    }

    /// Reads the whole struct from the start of `segment`.
    fn read(segment: &Segment) -> Self {
        segment.get(0)
    }

    /// Writes the whole struct at the start of `segment`.
    fn write(segment: &Segment, value: Self) {
        segment.set(0, value)
    }

    /// Builds a segment of one struct pointing to `ptr`, valid for the lifetime of `arena`.
    /// `cleanup` runs when the arena is dropped.
    ///
    /// # Safety
    ///
    /// `ptr` must point to memory valid for reads and writes of one struct for the whole
    /// lifetime of `arena`.
    unsafe fn reinterpret<C>(ptr: *mut c_void, arena: &Arena, cleanup: C) -> Segment<'_>
    where
        C: FnOnce(Segment<'static>) + 'static,
    {
        arena.reinterpret(ptr, Self::LAYOUT.size, cleanup)
    }

    /// Same as [`ForeignStruct::reinterpret`], but for `count` consecutive structs.
    ///
    /// # Safety
    ///
    /// See [`ForeignStruct::reinterpret`].
    unsafe fn reinterpret_array<C>(
        ptr: *mut c_void,
        count: usize,
        arena: &Arena,
        cleanup: C,
    ) -> Segment<'_>
    where
        C: FnOnce(Segment<'static>) + 'static,
    {
        arena.reinterpret(ptr, array_size::<Self>(count), cleanup)
    }
}

fn array_size<S: ForeignStruct + ?Sized>(count: usize) -> usize {
    match count.checked_mul(S::LAYOUT.size) {
        Some(size) => size,
        None => panic!("array of {} `{}` overflows", count, S::LAYOUT.name),
    }
}

/// Declares one or more native structs.
///
/// Each struct becomes a `#[repr(C)]` Rust struct with the same fields in the same order,
/// implements [`ForeignStruct`](crate::layout::ForeignStruct), and gets one associated
/// [`Field`](crate::layout::Field) constant per field.
///
/// Field types must implement [`Carrier`](crate::value::Carrier): primitives, raw pointers,
/// nullable function pointers, or other structs declared with this macro.
#[macro_export]
macro_rules! foreign_struct {
    ($(
        $(#[$attr:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_attr:meta])*
                pub $field:ident: $ty:ty,
            )*
        }
    )*) => {$(
        $(#[$attr])*
        #[repr(C)]
        #[derive(Debug, Copy, Clone)]
        #[allow(non_snake_case)]
        pub struct $name {
            $(
                $(#[$field_attr])*
                pub $field: $ty,
            )*
        }

        #[allow(non_upper_case_globals)]
        impl $name {
            $(
                #[doc = concat!("Accessor of the `", stringify!($field), "` field.")]
                pub const $field: $crate::layout::Field<$name, $ty> =
                    $crate::layout::Field::new(stringify!($field), ::core::mem::offset_of!($name, $field));
            )*
        }

        unsafe impl $crate::value::Carrier for $name {
            const KIND: $crate::value::MemberKind =
                $crate::value::MemberKind::Struct(<$name as $crate::layout::ForeignStruct>::LAYOUT);
        }

        unsafe impl $crate::layout::ForeignStruct for $name {
            const LAYOUT: &'static $crate::layout::StructLayout = &$crate::layout::StructLayout {
                name: stringify!($name),
                size: ::core::mem::size_of::<$name>(),
                align: ::core::mem::align_of::<$name>(),
                fields: &[$($name::$field.layout(),)*],
            };
        }
    )*};
}

#[cfg(test)]
mod tests;

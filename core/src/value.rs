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

//! Types of the values that cross the native boundary.

use crate::function::FunctionPointer;
use crate::layout::StructLayout;
use core::mem;

/// Primitive type of a value stored in native memory or passed to a native function.
///
/// There is no distinction between a pointer to data and a pointer to a function. Both are
/// [`ValueType::Pointer`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Pointer,
}

impl ValueType {
    /// Type of a C `size_t` on the compilation target.
    #[cfg(target_pointer_width = "64")]
    pub const SIZE_T: ValueType = ValueType::U64;
    /// Type of a C `size_t` on the compilation target.
    #[cfg(target_pointer_width = "32")]
    pub const SIZE_T: ValueType = ValueType::U32;

    /// Number of bytes occupied by a value of this type.
    pub const fn byte_size(self) -> usize {
        match self {
            ValueType::U8 | ValueType::I8 => 1,
            ValueType::U16 | ValueType::I16 => 2,
            ValueType::U32 | ValueType::I32 | ValueType::F32 => 4,
            ValueType::U64 | ValueType::I64 | ValueType::F64 => 8,
            ValueType::Pointer => mem::size_of::<usize>(),
        }
    }

    /// Alignment that the C compiler of the compilation target uses for this type.
    ///
    /// Note that this isn't always equal to [`ValueType::byte_size`]. For example, 64-bits
    /// integers are 4-bytes-aligned on 32-bits x86.
    pub const fn byte_alignment(self) -> usize {
        match self {
            ValueType::U8 | ValueType::I8 => 1,
            ValueType::U16 | ValueType::I16 => mem::align_of::<u16>(),
            ValueType::U32 | ValueType::I32 => mem::align_of::<u32>(),
            ValueType::F32 => mem::align_of::<f32>(),
            ValueType::U64 | ValueType::I64 => mem::align_of::<u64>(),
            ValueType::F64 => mem::align_of::<f64>(),
            ValueType::Pointer => mem::align_of::<usize>(),
        }
    }
}

/// What a member of a struct is made of.
#[derive(Debug, Copy, Clone)]
pub enum MemberKind {
    /// A primitive value.
    Value(ValueType),
    /// A struct nested by value.
    Struct(&'static StructLayout),
}

impl MemberKind {
    /// Returns the [`ValueType`] if this is a [`MemberKind::Value`].
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            MemberKind::Value(ty) => Some(*ty),
            MemberKind::Struct(_) => None,
        }
    }

    /// Returns the nested layout if this is a [`MemberKind::Struct`].
    pub fn struct_layout(&self) -> Option<&'static StructLayout> {
        match self {
            MemberKind::Value(_) => None,
            MemberKind::Struct(layout) => Some(*layout),
        }
    }
}

/// Rust type that can be stored in native memory as-is.
///
/// # Safety
///
/// The type must have the same representation as its C counterpart, and every bit pattern
/// (in particular all zeroes) must be a valid value of the type. This is what allows reading
/// it back from arbitrary native memory.
pub unsafe trait Carrier: Copy + 'static {
    /// Description of this type in a struct layout.
    const KIND: MemberKind;
}

macro_rules! primitive_carriers {
    ($($ty:ty => $value_ty:expr,)*) => {
        $(
            unsafe impl Carrier for $ty {
                const KIND: MemberKind = MemberKind::Value($value_ty);
            }
        )*
    };
}

primitive_carriers! {
    u8 => ValueType::U8,
    u16 => ValueType::U16,
    u32 => ValueType::U32,
    u64 => ValueType::U64,
    i8 => ValueType::I8,
    i16 => ValueType::I16,
    i32 => ValueType::I32,
    i64 => ValueType::I64,
    f32 => ValueType::F32,
    f64 => ValueType::F64,
    usize => ValueType::SIZE_T,
}

unsafe impl<T: 'static> Carrier for *const T {
    const KIND: MemberKind = MemberKind::Value(ValueType::Pointer);
}

unsafe impl<T: 'static> Carrier for *mut T {
    const KIND: MemberKind = MemberKind::Value(ValueType::Pointer);
}

// Function pointers are never null in Rust, hence the `Option`. The `None` variant is the
// null pointer of C.
unsafe impl<F: FunctionPointer> Carrier for Option<F> {
    const KIND: MemberKind = MemberKind::Value(ValueType::Pointer);
}

/// Type that can be returned by a native function. Either `()` or a [`Carrier`].
pub trait ReturnCarrier {
    /// `None` for `void`.
    const VALUE_TYPE: Option<ValueType>;
}

impl ReturnCarrier for () {
    const VALUE_TYPE: Option<ValueType> = None;
}

impl<T: Carrier> ReturnCarrier for T {
    const VALUE_TYPE: Option<ValueType> = Some(value_type_of::<T>());
}

/// Returns the [`ValueType`] of a primitive [`Carrier`].
///
/// Fails to compile when used in a constant with a struct type, as native functions never
/// receive or return structs by value in the APIs described with this crate.
pub const fn value_type_of<T: Carrier>() -> ValueType {
    match T::KIND {
        MemberKind::Value(ty) => ty,
        MemberKind::Struct(_) => panic!("structs can't be passed by value"),
    }
}

#[cfg(test)]
mod tests {
    use super::{value_type_of, ReturnCarrier, ValueType};
    use core::ffi::c_void;

    #[test]
    fn sizes_match_rust_types() {
        assert_eq!(ValueType::U8.byte_size(), 1);
        assert_eq!(ValueType::I16.byte_size(), 2);
        assert_eq!(ValueType::F32.byte_size(), 4);
        assert_eq!(ValueType::F64.byte_size(), 8);
        assert_eq!(ValueType::Pointer.byte_size(), core::mem::size_of::<*const c_void>());
        assert_eq!(ValueType::SIZE_T.byte_size(), core::mem::size_of::<usize>());
    }

    #[test]
    fn pointers_and_functions_are_pointers() {
        assert_eq!(value_type_of::<*const c_void>(), ValueType::Pointer);
        assert_eq!(value_type_of::<*mut u32>(), ValueType::Pointer);
        assert_eq!(
            value_type_of::<Option<unsafe extern "C" fn(u32)>>(),
            ValueType::Pointer
        );
    }

    #[test]
    fn void_returns_nothing() {
        assert_eq!(<() as ReturnCarrier>::VALUE_TYPE, None);
        assert_eq!(<u64 as ReturnCarrier>::VALUE_TYPE, Some(ValueType::U64));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn size_t_is_u64() {
        assert_eq!(value_type_of::<usize>(), ValueType::U64);
    }
}

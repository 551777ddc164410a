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

//! Foreign memory access for native C APIs.
//!
//! # Overview
//!
//! This crate contains the machinery that the `interfaces/*` crates build upon in order to
//! describe a native C ABI. It knows nothing about any specific API.
//!
//! - A [`Segment`] is a raw region of memory whose size is known, and whose lifetime is bound
//!   to an [`Arena`]. Segments are untyped. Reading and writing values happens through typed
//!   accessors at a given byte offset.
//! - A [`StructLayout`] describes the fields of a C struct: their names, offsets, sizes and
//!   types. Use the [`foreign_struct!`] macro to declare a `#[repr(C)]` struct alongside its
//!   layout and one [`Field`] accessor per field.
//! - A [`FunctionDescriptor`] describes the signature of a C function pointer. Use the
//!   [`foreign_callback!`] macro to declare a function-pointer typedef, which provides the
//!   downcall (calling a native pointer from Rust) and upcall (turning a Rust closure into a
//!   native pointer) adapters.
//! - A [`NativeLibrary`] is a loaded shared library in which symbols can be looked up.
//!
//! # Ownership
//!
//! This crate never decides on its own when memory is freed. Allocations, upcall stubs and
//! reinterpreted regions all belong to the [`Arena`] passed by the caller, and are released
//! when that arena is dropped. The borrow checker guarantees that no [`Segment`] or
//! [`Upcall`] outlives its arena.
//!
//! # Failures
//!
//! Calling a null function pointer, or letting a panic escape from an upcall into native code,
//! aborts the process. See the [`fatal`] module.

#![deny(rustdoc::broken_intra_doc_links)]

pub mod fatal;
pub mod function;
pub mod layout;
pub mod library;
pub mod memory;
pub mod value;

mod error;

pub use error::LoadError;
pub use function::{FunctionDescriptor, FunctionPointer, Upcall};
pub use layout::{Field, FieldLayout, ForeignStruct, Padding, StructLayout};
pub use library::{LibraryConfig, NativeLibrary};
pub use memory::{Arena, Segment, SegmentAllocator, SlicingAllocator};
pub use value::{Carrier, MemberKind, ReturnCarrier, ValueType};

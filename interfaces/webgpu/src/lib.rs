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

//! WebGPU, as exposed by the C ABI of `wgpu-native`.
//!
//! This crate is a transcription of the `webgpu.h` and `wgpu.h` headers. Each C struct is
//! declared with [`foreign_struct!`](wgpu_ffm_core::foreign_struct), and each callback
//! typedef with [`foreign_callback!`](wgpu_ffm_core::foreign_callback). Names are the ones
//! of the headers.
//!
//! Building a descriptor in native memory looks like this:
//!
//! ```
//! use wgpu_ffm_core::{Arena, ForeignStruct as _};
//! use wgpu_ffm_webgpu::*;
//!
//! let arena = Arena::new();
//! let entries = WGPUBindGroupEntry::allocate_array(2, &arena);
//! for index in 0..2 {
//!     let entry = WGPUBindGroupEntry::as_slice(&entries, index);
//!     WGPUBindGroupEntry::binding.set(&entry, index as u32);
//!     WGPUBindGroupEntry::size.set(&entry, WGPU_WHOLE_SIZE);
//! }
//!
//! let descriptor = WGPUBindGroupDescriptor::allocate(&arena);
//! WGPUBindGroupDescriptor::entryCount.set(&descriptor, 2);
//! WGPUBindGroupDescriptor::entries.set(&descriptor, entries.as_ptr() as *const _);
//! ```
//!
//! Nothing in this crate creates or destroys GPU objects. The [`procs`] module only loads the
//! few entry points needed to create an instance and to set up [`logging`].

#![deny(rustdoc::broken_intra_doc_links)]

pub use binding::*;
pub use callbacks::*;
pub use command::*;
pub use instance::*;
pub use native::*;
pub use pipeline::*;
pub use resource::*;
pub use surface::*;
pub use types::*;

pub mod callbacks;
pub mod logging;
pub mod procs;
pub mod types;

mod binding;
mod command;
mod instance;
mod native;
mod pipeline;
mod resource;
mod surface;

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

//! Bind groups and their layouts.

use crate::{instance::WGPUChainedStruct, types::*};
use libc::{c_char, size_t};
use wgpu_ffm_core::foreign_struct;

foreign_struct! {
    pub struct WGPUBufferBindingLayout {
        pub nextInChain: *const WGPUChainedStruct,
        pub r#type: WGPUBufferBindingType,
        pub hasDynamicOffset: WGPUBool,
        pub minBindingSize: u64,
    }

    pub struct WGPUSamplerBindingLayout {
        pub nextInChain: *const WGPUChainedStruct,
        pub r#type: WGPUSamplerBindingType,
    }

    pub struct WGPUTextureBindingLayout {
        pub nextInChain: *const WGPUChainedStruct,
        pub sampleType: WGPUTextureSampleType,
        pub viewDimension: WGPUTextureViewDimension,
        pub multisampled: WGPUBool,
    }

    pub struct WGPUStorageTextureBindingLayout {
        pub nextInChain: *const WGPUChainedStruct,
        pub access: WGPUStorageTextureAccess,
        pub format: WGPUTextureFormat,
        pub viewDimension: WGPUTextureViewDimension,
    }

    /// One binding of a layout. Exactly one of `buffer`, `sampler`, `texture` and
    /// `storageTexture` is meant to have a non-zero type.
    pub struct WGPUBindGroupLayoutEntry {
        pub nextInChain: *const WGPUChainedStruct,
        pub binding: u32,
        pub visibility: WGPUShaderStageFlags,
        pub buffer: WGPUBufferBindingLayout,
        pub sampler: WGPUSamplerBindingLayout,
        pub texture: WGPUTextureBindingLayout,
        pub storageTexture: WGPUStorageTextureBindingLayout,
    }

    pub struct WGPUBindGroupLayoutDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
        pub label: *const c_char,
        pub entryCount: size_t,
        pub entries: *const WGPUBindGroupLayoutEntry,
    }

    /// Resource bound at `binding`. Either `buffer` (with `offset` and `size`), `sampler` or
    /// `textureView` is set.
    pub struct WGPUBindGroupEntry {
        pub nextInChain: *const WGPUChainedStruct,
        pub binding: u32,
        pub buffer: WGPUBuffer,
        pub offset: u64,
        pub size: u64,
        pub sampler: WGPUSampler,
        pub textureView: WGPUTextureView,
    }

    pub struct WGPUBindGroupDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
        pub label: *const c_char,
        pub layout: WGPUBindGroupLayout,
        pub entryCount: size_t,
        pub entries: *const WGPUBindGroupEntry,
    }

    pub struct WGPUPipelineLayoutDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
        pub label: *const c_char,
        pub bindGroupLayoutCount: size_t,
        pub bindGroupLayouts: *const WGPUBindGroupLayout,
    }
}

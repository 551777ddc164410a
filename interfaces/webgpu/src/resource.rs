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

//! Buffers, textures, samplers and copies.

use crate::{instance::WGPUChainedStruct, types::*};
use libc::{c_char, size_t};
use wgpu_ffm_core::foreign_struct;

foreign_struct! {
    pub struct WGPUBufferDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
        pub label: *const c_char,
        pub usage: WGPUBufferUsageFlags,
        pub size: u64,
        pub mappedAtCreation: WGPUBool,
    }

    pub struct WGPUExtent3D {
        pub width: u32,
        pub height: u32,
        pub depthOrArrayLayers: u32,
    }

    pub struct WGPUOrigin3D {
        pub x: u32,
        pub y: u32,
        pub z: u32,
    }

    pub struct WGPUTextureDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
        pub label: *const c_char,
        pub usage: WGPUTextureUsageFlags,
        pub dimension: WGPUTextureDimension,
        pub size: WGPUExtent3D,
        pub format: WGPUTextureFormat,
        pub mipLevelCount: u32,
        pub sampleCount: u32,
        pub viewFormatCount: size_t,
        pub viewFormats: *const WGPUTextureFormat,
    }

    pub struct WGPUTextureViewDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
        pub label: *const c_char,
        pub format: WGPUTextureFormat,
        pub dimension: WGPUTextureViewDimension,
        pub baseMipLevel: u32,
        pub mipLevelCount: u32,
        pub baseArrayLayer: u32,
        pub arrayLayerCount: u32,
        pub aspect: WGPUTextureAspect,
    }

    pub struct WGPUSamplerDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
        pub label: *const c_char,
        pub addressModeU: WGPUAddressMode,
        pub addressModeV: WGPUAddressMode,
        pub addressModeW: WGPUAddressMode,
        pub magFilter: WGPUFilterMode,
        pub minFilter: WGPUFilterMode,
        pub mipmapFilter: WGPUMipmapFilterMode,
        pub lodMinClamp: f32,
        pub lodMaxClamp: f32,
        pub compare: WGPUCompareFunction,
        pub maxAnisotropy: u16,
    }

    pub struct WGPUTextureDataLayout {
        pub nextInChain: *const WGPUChainedStruct,
        pub offset: u64,
        pub bytesPerRow: u32,
        pub rowsPerImage: u32,
    }

    pub struct WGPUImageCopyBuffer {
        pub nextInChain: *const WGPUChainedStruct,
        pub layout: WGPUTextureDataLayout,
        pub buffer: WGPUBuffer,
    }

    pub struct WGPUImageCopyTexture {
        pub nextInChain: *const WGPUChainedStruct,
        pub texture: WGPUTexture,
        pub mipLevel: u32,
        pub origin: WGPUOrigin3D,
        pub aspect: WGPUTextureAspect,
    }
}

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

//! Presentation surfaces.

use crate::{
    instance::{WGPUChainedStruct, WGPUChainedStructOut},
    types::*,
};
use libc::{c_char, size_t};
use wgpu_ffm_core::foreign_struct;

foreign_struct! {
    pub struct WGPUSurfaceDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
        pub label: *const c_char,
    }

    pub struct WGPUSurfaceCapabilities {
        pub nextInChain: *mut WGPUChainedStructOut,
        pub formatCount: size_t,
        pub formats: *mut WGPUTextureFormat,
        pub presentModeCount: size_t,
        pub presentModes: *mut WGPUPresentMode,
        pub alphaModeCount: size_t,
        pub alphaModes: *mut WGPUCompositeAlphaMode,
    }

    pub struct WGPUSurfaceConfiguration {
        pub nextInChain: *const WGPUChainedStruct,
        pub device: WGPUDevice,
        pub format: WGPUTextureFormat,
        pub usage: WGPUTextureUsageFlags,
        pub viewFormatCount: size_t,
        pub viewFormats: *const WGPUTextureFormat,
        pub alphaMode: WGPUCompositeAlphaMode,
        pub width: u32,
        pub height: u32,
        pub presentMode: WGPUPresentMode,
    }

    pub struct WGPUSurfaceTexture {
        pub texture: WGPUTexture,
        pub suboptimal: WGPUBool,
        pub status: WGPUSurfaceGetCurrentTextureStatus,
    }
}

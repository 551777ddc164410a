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

//! Command encoding and render passes.

use crate::{instance::WGPUChainedStruct, types::*};
use libc::{c_char, size_t};
use wgpu_ffm_core::foreign_struct;

foreign_struct! {
    pub struct WGPUCommandEncoderDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
        pub label: *const c_char,
    }

    pub struct WGPUCommandBufferDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
        pub label: *const c_char,
    }

    pub struct WGPUColor {
        pub r: f64,
        pub g: f64,
        pub b: f64,
        pub a: f64,
    }

    pub struct WGPURenderPassColorAttachment {
        pub nextInChain: *const WGPUChainedStruct,
        pub view: WGPUTextureView,
        pub resolveTarget: WGPUTextureView,
        pub loadOp: WGPULoadOp,
        pub storeOp: WGPUStoreOp,
        pub clearValue: WGPUColor,
    }

    pub struct WGPURenderPassDepthStencilAttachment {
        pub view: WGPUTextureView,
        pub depthLoadOp: WGPULoadOp,
        pub depthStoreOp: WGPUStoreOp,
        pub depthClearValue: f32,
        pub depthReadOnly: WGPUBool,
        pub stencilLoadOp: WGPULoadOp,
        pub stencilStoreOp: WGPUStoreOp,
        pub stencilClearValue: u32,
        pub stencilReadOnly: WGPUBool,
    }

    pub struct WGPURenderPassTimestampWrites {
        pub querySet: WGPUQuerySet,
        pub beginningOfPassWriteIndex: u32,
        pub endOfPassWriteIndex: u32,
    }

    pub struct WGPURenderPassDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
        pub label: *const c_char,
        pub colorAttachmentCount: size_t,
        pub colorAttachments: *const WGPURenderPassColorAttachment,
        pub depthStencilAttachment: *const WGPURenderPassDepthStencilAttachment,
        pub occlusionQuerySet: WGPUQuerySet,
        pub timestampWrites: *const WGPURenderPassTimestampWrites,
    }
}

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

//! Chained structs, instance, adapter and device descriptors.

use crate::{callbacks::WGPUDeviceLostCallback, types::*};
use core::ffi::c_void;
use libc::{c_char, size_t};
use wgpu_ffm_core::foreign_struct;

foreign_struct! {
    /// Header of every extension struct. Extensions are linked through `nextInChain` and
    /// identified by `sType`.
    pub struct WGPUChainedStruct {
        pub next: *const WGPUChainedStruct,
        pub sType: WGPUSType,
    }

    /// Same as [`WGPUChainedStruct`], for structs filled by the native library.
    pub struct WGPUChainedStructOut {
        pub next: *mut WGPUChainedStructOut,
        pub sType: WGPUSType,
    }

    pub struct WGPUInstanceDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
    }

    pub struct WGPURequestAdapterOptions {
        pub nextInChain: *const WGPUChainedStruct,
        pub compatibleSurface: WGPUSurface,
        pub powerPreference: WGPUPowerPreference,
        pub backendType: WGPUBackendType,
        pub forceFallbackAdapter: WGPUBool,
    }

    pub struct WGPUAdapterProperties {
        pub nextInChain: *mut WGPUChainedStructOut,
        pub vendorID: u32,
        pub vendorName: *const c_char,
        pub architecture: *const c_char,
        pub deviceID: u32,
        pub name: *const c_char,
        pub driverDescription: *const c_char,
        pub adapterType: WGPUAdapterType,
        pub backendType: WGPUBackendType,
    }

    pub struct WGPULimits {
        pub maxTextureDimension1D: u32,
        pub maxTextureDimension2D: u32,
        pub maxTextureDimension3D: u32,
        pub maxTextureArrayLayers: u32,
        pub maxBindGroups: u32,
        pub maxBindGroupsPlusVertexBuffers: u32,
        pub maxBindingsPerBindGroup: u32,
        pub maxDynamicUniformBuffersPerPipelineLayout: u32,
        pub maxDynamicStorageBuffersPerPipelineLayout: u32,
        pub maxSampledTexturesPerShaderStage: u32,
        pub maxSamplersPerShaderStage: u32,
        pub maxStorageBuffersPerShaderStage: u32,
        pub maxStorageTexturesPerShaderStage: u32,
        pub maxUniformBuffersPerShaderStage: u32,
        pub maxUniformBufferBindingSize: u64,
        pub maxStorageBufferBindingSize: u64,
        pub minUniformBufferOffsetAlignment: u32,
        pub minStorageBufferOffsetAlignment: u32,
        pub maxVertexBuffers: u32,
        pub maxBufferSize: u64,
        pub maxVertexAttributes: u32,
        pub maxVertexBufferArrayStride: u32,
        pub maxInterStageShaderComponents: u32,
        pub maxInterStageShaderVariables: u32,
        pub maxColorAttachments: u32,
        pub maxColorAttachmentBytesPerSample: u32,
        pub maxComputeWorkgroupStorageSize: u32,
        pub maxComputeInvocationsPerWorkgroup: u32,
        pub maxComputeWorkgroupSizeX: u32,
        pub maxComputeWorkgroupSizeY: u32,
        pub maxComputeWorkgroupSizeZ: u32,
        pub maxComputeWorkgroupsPerDimension: u32,
    }

    pub struct WGPURequiredLimits {
        pub nextInChain: *const WGPUChainedStruct,
        pub limits: WGPULimits,
    }

    pub struct WGPUSupportedLimits {
        pub nextInChain: *mut WGPUChainedStructOut,
        pub limits: WGPULimits,
    }

    pub struct WGPUQueueDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
        pub label: *const c_char,
    }

    pub struct WGPUDeviceDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
        pub label: *const c_char,
        pub requiredFeatureCount: size_t,
        pub requiredFeatures: *const WGPUFeatureName,
        pub requiredLimits: *const WGPURequiredLimits,
        pub defaultQueue: WGPUQueueDescriptor,
        pub deviceLostCallback: WGPUDeviceLostCallback,
        pub deviceLostUserdata: *mut c_void,
    }
}

/// Returns limits set to [`WGPU_LIMIT_U32_UNDEFINED`] and [`WGPU_LIMIT_U64_UNDEFINED`], which
/// is how the native library is told that the caller doesn't care about a limit.
pub fn undefined_limits() -> WGPULimits {
    let u32_max = WGPU_LIMIT_U32_UNDEFINED;
    let u64_max = WGPU_LIMIT_U64_UNDEFINED;
    WGPULimits {
        maxTextureDimension1D: u32_max,
        maxTextureDimension2D: u32_max,
        maxTextureDimension3D: u32_max,
        maxTextureArrayLayers: u32_max,
        maxBindGroups: u32_max,
        maxBindGroupsPlusVertexBuffers: u32_max,
        maxBindingsPerBindGroup: u32_max,
        maxDynamicUniformBuffersPerPipelineLayout: u32_max,
        maxDynamicStorageBuffersPerPipelineLayout: u32_max,
        maxSampledTexturesPerShaderStage: u32_max,
        maxSamplersPerShaderStage: u32_max,
        maxStorageBuffersPerShaderStage: u32_max,
        maxStorageTexturesPerShaderStage: u32_max,
        maxUniformBuffersPerShaderStage: u32_max,
        maxUniformBufferBindingSize: u64_max,
        maxStorageBufferBindingSize: u64_max,
        minUniformBufferOffsetAlignment: u32_max,
        minStorageBufferOffsetAlignment: u32_max,
        maxVertexBuffers: u32_max,
        maxBufferSize: u64_max,
        maxVertexAttributes: u32_max,
        maxVertexBufferArrayStride: u32_max,
        maxInterStageShaderComponents: u32_max,
        maxInterStageShaderVariables: u32_max,
        maxColorAttachments: u32_max,
        maxColorAttachmentBytesPerSample: u32_max,
        maxComputeWorkgroupStorageSize: u32_max,
        maxComputeInvocationsPerWorkgroup: u32_max,
        maxComputeWorkgroupSizeX: u32_max,
        maxComputeWorkgroupSizeY: u32_max,
        maxComputeWorkgroupSizeZ: u32_max,
        maxComputeWorkgroupsPerDimension: u32_max,
    }
}

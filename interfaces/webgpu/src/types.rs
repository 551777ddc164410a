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

//! Scalar typedefs, enum values and object handles.
//!
//! C enums are `uint32_t`-sized in this ABI. They are represented as `u32` aliases with one
//! constant per value, named as in the header.

#![allow(non_camel_case_types, non_upper_case_globals)]

pub type WGPUFlags = u32;
pub type WGPUBool = u32;

macro_rules! enum_values {
    ($($ty:ident { $($value:ident = $num:expr,)* })*) => {$(
        pub type $ty = u32;
        $(pub const $value: $ty = $num;)*
    )*};
}

macro_rules! handles {
    ($($handle:ident => $opaque:ident,)*) => {$(
        #[repr(C)]
        pub struct $opaque {
            _private: [u8; 0],
        }
        pub type $handle = *mut $opaque;
    )*};
}

handles! {
    WGPUAdapter => WGPUAdapterImpl,
    WGPUBindGroup => WGPUBindGroupImpl,
    WGPUBindGroupLayout => WGPUBindGroupLayoutImpl,
    WGPUBuffer => WGPUBufferImpl,
    WGPUCommandBuffer => WGPUCommandBufferImpl,
    WGPUCommandEncoder => WGPUCommandEncoderImpl,
    WGPUComputePassEncoder => WGPUComputePassEncoderImpl,
    WGPUComputePipeline => WGPUComputePipelineImpl,
    WGPUDevice => WGPUDeviceImpl,
    WGPUInstance => WGPUInstanceImpl,
    WGPUPipelineLayout => WGPUPipelineLayoutImpl,
    WGPUQuerySet => WGPUQuerySetImpl,
    WGPUQueue => WGPUQueueImpl,
    WGPURenderBundle => WGPURenderBundleImpl,
    WGPURenderBundleEncoder => WGPURenderBundleEncoderImpl,
    WGPURenderPassEncoder => WGPURenderPassEncoderImpl,
    WGPURenderPipeline => WGPURenderPipelineImpl,
    WGPUSampler => WGPUSamplerImpl,
    WGPUShaderModule => WGPUShaderModuleImpl,
    WGPUSurface => WGPUSurfaceImpl,
    WGPUTexture => WGPUTextureImpl,
    WGPUTextureView => WGPUTextureViewImpl,
}

pub const WGPU_ARRAY_LAYER_COUNT_UNDEFINED: u32 = 0xffff_ffff;
pub const WGPU_COPY_STRIDE_UNDEFINED: u32 = 0xffff_ffff;
pub const WGPU_LIMIT_U32_UNDEFINED: u32 = 0xffff_ffff;
pub const WGPU_LIMIT_U64_UNDEFINED: u64 = 0xffff_ffff_ffff_ffff;
pub const WGPU_MIP_LEVEL_COUNT_UNDEFINED: u32 = 0xffff_ffff;
pub const WGPU_QUERY_SET_INDEX_UNDEFINED: u32 = 0xffff_ffff;
pub const WGPU_WHOLE_MAP_SIZE: usize = usize::MAX;
pub const WGPU_WHOLE_SIZE: u64 = 0xffff_ffff_ffff_ffff;

// Typedefs without any constant here. Their values are only ever passed through.
pub type WGPUAdapterType = u32;
pub type WGPUAddressMode = u32;
pub type WGPUBlendFactor = u32;
pub type WGPUBlendOperation = u32;
pub type WGPUBufferBindingType = u32;
pub type WGPUCompareFunction = u32;
pub type WGPUCullMode = u32;
pub type WGPUDx12Compiler = u32;
pub type WGPUFeatureName = u32;
pub type WGPUFilterMode = u32;
pub type WGPUFrontFace = u32;
pub type WGPUGles3MinorVersion = u32;
pub type WGPUIndexFormat = u32;
pub type WGPUMipmapFilterMode = u32;
pub type WGPUPrimitiveTopology = u32;
pub type WGPUSamplerBindingType = u32;
pub type WGPUStencilOperation = u32;
pub type WGPUStorageTextureAccess = u32;
pub type WGPUTextureAspect = u32;
pub type WGPUTextureDimension = u32;
pub type WGPUTextureFormat = u32;
pub type WGPUTextureSampleType = u32;
pub type WGPUTextureViewDimension = u32;
pub type WGPUVertexFormat = u32;
pub type WGPUVertexStepMode = u32;

pub type WGPUBufferUsageFlags = WGPUFlags;
pub type WGPUColorWriteMaskFlags = WGPUFlags;
pub type WGPUInstanceBackendFlags = WGPUFlags;
pub type WGPUInstanceFlags = WGPUFlags;
pub type WGPUShaderStageFlags = WGPUFlags;
pub type WGPUTextureUsageFlags = WGPUFlags;

enum_values! {
    WGPUSType {
        WGPUSType_Invalid = 0x0000_0000,
        WGPUSType_SurfaceDescriptorFromMetalLayer = 0x0000_0001,
        WGPUSType_SurfaceDescriptorFromWindowsHWND = 0x0000_0002,
        WGPUSType_SurfaceDescriptorFromXlibWindow = 0x0000_0003,
        WGPUSType_SurfaceDescriptorFromCanvasHTMLSelector = 0x0000_0004,
        WGPUSType_ShaderModuleSPIRVDescriptor = 0x0000_0005,
        WGPUSType_ShaderModuleWGSLDescriptor = 0x0000_0006,
        WGPUSType_PrimitiveDepthClipControl = 0x0000_0007,
        WGPUSType_SurfaceDescriptorFromWaylandSurface = 0x0000_0008,
        WGPUSType_SurfaceDescriptorFromAndroidNativeWindow = 0x0000_0009,
        WGPUSType_SurfaceDescriptorFromXcbWindow = 0x0000_000A,
        WGPUSType_RenderPassDescriptorMaxDrawCount = 0x0000_000F,
    }

    WGPUNativeSType {
        WGPUSType_DeviceExtras = 0x0003_0001,
        WGPUSType_RequiredLimitsExtras = 0x0003_0002,
        WGPUSType_PipelineLayoutExtras = 0x0003_0003,
        WGPUSType_ShaderModuleGLSLDescriptor = 0x0003_0004,
        WGPUSType_SupportedLimitsExtras = 0x0003_0005,
        WGPUSType_InstanceExtras = 0x0003_0006,
    }

    WGPULogLevel {
        WGPULogLevel_Off = 0,
        WGPULogLevel_Error = 1,
        WGPULogLevel_Warn = 2,
        WGPULogLevel_Info = 3,
        WGPULogLevel_Debug = 4,
        WGPULogLevel_Trace = 5,
    }

    WGPUErrorType {
        WGPUErrorType_NoError = 0,
        WGPUErrorType_Validation = 1,
        WGPUErrorType_OutOfMemory = 2,
        WGPUErrorType_Internal = 3,
        WGPUErrorType_Unknown = 4,
        WGPUErrorType_DeviceLost = 5,
    }

    WGPURequestAdapterStatus {
        WGPURequestAdapterStatus_Success = 0,
        WGPURequestAdapterStatus_Unavailable = 1,
        WGPURequestAdapterStatus_Error = 2,
        WGPURequestAdapterStatus_Unknown = 3,
    }

    WGPURequestDeviceStatus {
        WGPURequestDeviceStatus_Success = 0,
        WGPURequestDeviceStatus_Error = 1,
        WGPURequestDeviceStatus_Unknown = 2,
    }

    WGPUBufferMapAsyncStatus {
        WGPUBufferMapAsyncStatus_Success = 0,
        WGPUBufferMapAsyncStatus_ValidationError = 1,
        WGPUBufferMapAsyncStatus_Unknown = 2,
        WGPUBufferMapAsyncStatus_DeviceLost = 3,
        WGPUBufferMapAsyncStatus_DestroyedBeforeCallback = 4,
        WGPUBufferMapAsyncStatus_UnmappedBeforeCallback = 5,
        WGPUBufferMapAsyncStatus_MappingAlreadyPending = 6,
        WGPUBufferMapAsyncStatus_OffsetOutOfRange = 7,
        WGPUBufferMapAsyncStatus_SizeOutOfRange = 8,
    }

    WGPUQueueWorkDoneStatus {
        WGPUQueueWorkDoneStatus_Success = 0,
        WGPUQueueWorkDoneStatus_Error = 1,
        WGPUQueueWorkDoneStatus_Unknown = 2,
        WGPUQueueWorkDoneStatus_DeviceLost = 3,
    }

    WGPUDeviceLostReason {
        WGPUDeviceLostReason_Undefined = 0,
        WGPUDeviceLostReason_Destroyed = 1,
    }

    WGPUCreatePipelineAsyncStatus {
        WGPUCreatePipelineAsyncStatus_Success = 0,
        WGPUCreatePipelineAsyncStatus_ValidationError = 1,
        WGPUCreatePipelineAsyncStatus_InternalError = 2,
        WGPUCreatePipelineAsyncStatus_DeviceLost = 3,
        WGPUCreatePipelineAsyncStatus_DeviceDestroyed = 4,
        WGPUCreatePipelineAsyncStatus_Unknown = 5,
    }

    WGPUCompilationInfoRequestStatus {
        WGPUCompilationInfoRequestStatus_Success = 0,
        WGPUCompilationInfoRequestStatus_Error = 1,
        WGPUCompilationInfoRequestStatus_DeviceLost = 2,
        WGPUCompilationInfoRequestStatus_Unknown = 3,
    }

    WGPUCompilationMessageType {
        WGPUCompilationMessageType_Error = 0,
        WGPUCompilationMessageType_Warning = 1,
        WGPUCompilationMessageType_Info = 2,
    }

    WGPUSurfaceGetCurrentTextureStatus {
        WGPUSurfaceGetCurrentTextureStatus_Success = 0,
        WGPUSurfaceGetCurrentTextureStatus_Timeout = 1,
        WGPUSurfaceGetCurrentTextureStatus_Outdated = 2,
        WGPUSurfaceGetCurrentTextureStatus_Lost = 3,
        WGPUSurfaceGetCurrentTextureStatus_OutOfMemory = 4,
        WGPUSurfaceGetCurrentTextureStatus_DeviceLost = 5,
    }

    WGPULoadOp {
        WGPULoadOp_Undefined = 0,
        WGPULoadOp_Clear = 1,
        WGPULoadOp_Load = 2,
    }

    WGPUStoreOp {
        WGPUStoreOp_Undefined = 0,
        WGPUStoreOp_Store = 1,
        WGPUStoreOp_Discard = 2,
    }

    WGPUPowerPreference {
        WGPUPowerPreference_Undefined = 0,
        WGPUPowerPreference_LowPower = 1,
        WGPUPowerPreference_HighPerformance = 2,
    }

    WGPUBackendType {
        WGPUBackendType_Undefined = 0,
        WGPUBackendType_Null = 1,
        WGPUBackendType_WebGPU = 2,
        WGPUBackendType_D3D11 = 3,
        WGPUBackendType_D3D12 = 4,
        WGPUBackendType_Metal = 5,
        WGPUBackendType_Vulkan = 6,
        WGPUBackendType_OpenGL = 7,
        WGPUBackendType_OpenGLES = 8,
    }

    WGPUPresentMode {
        WGPUPresentMode_Fifo = 0,
        WGPUPresentMode_FifoRelaxed = 1,
        WGPUPresentMode_Immediate = 2,
        WGPUPresentMode_Mailbox = 3,
    }

    WGPUCompositeAlphaMode {
        WGPUCompositeAlphaMode_Auto = 0,
        WGPUCompositeAlphaMode_Opaque = 1,
        WGPUCompositeAlphaMode_Premultiplied = 2,
        WGPUCompositeAlphaMode_Unpremultiplied = 3,
        WGPUCompositeAlphaMode_Inherit = 4,
    }

    WGPUBufferUsage {
        WGPUBufferUsage_None = 0x0000,
        WGPUBufferUsage_MapRead = 0x0001,
        WGPUBufferUsage_MapWrite = 0x0002,
        WGPUBufferUsage_CopySrc = 0x0004,
        WGPUBufferUsage_CopyDst = 0x0008,
        WGPUBufferUsage_Index = 0x0010,
        WGPUBufferUsage_Vertex = 0x0020,
        WGPUBufferUsage_Uniform = 0x0040,
        WGPUBufferUsage_Storage = 0x0080,
        WGPUBufferUsage_Indirect = 0x0100,
        WGPUBufferUsage_QueryResolve = 0x0200,
    }

    WGPUTextureUsage {
        WGPUTextureUsage_None = 0x00,
        WGPUTextureUsage_CopySrc = 0x01,
        WGPUTextureUsage_CopyDst = 0x02,
        WGPUTextureUsage_TextureBinding = 0x04,
        WGPUTextureUsage_StorageBinding = 0x08,
        WGPUTextureUsage_RenderAttachment = 0x10,
    }

    WGPUShaderStage {
        WGPUShaderStage_None = 0x0,
        WGPUShaderStage_Vertex = 0x1,
        WGPUShaderStage_Fragment = 0x2,
        WGPUShaderStage_Compute = 0x4,
    }

    WGPUColorWriteMask {
        WGPUColorWriteMask_None = 0x0,
        WGPUColorWriteMask_Red = 0x1,
        WGPUColorWriteMask_Green = 0x2,
        WGPUColorWriteMask_Blue = 0x4,
        WGPUColorWriteMask_Alpha = 0x8,
        WGPUColorWriteMask_All = 0xF,
    }

    WGPUInstanceBackend {
        WGPUInstanceBackend_All = 0x00,
        WGPUInstanceBackend_Vulkan = 1 << 0,
        WGPUInstanceBackend_GL = 1 << 1,
        WGPUInstanceBackend_Metal = 1 << 2,
        WGPUInstanceBackend_DX12 = 1 << 3,
        WGPUInstanceBackend_DX11 = 1 << 4,
        WGPUInstanceBackend_BrowserWebGPU = 1 << 5,
        WGPUInstanceBackend_Primary = (1 << 0) | (1 << 2) | (1 << 3) | (1 << 5),
        WGPUInstanceBackend_Secondary = (1 << 1) | (1 << 4),
    }

    WGPUInstanceFlag {
        WGPUInstanceFlag_Default = 0x0,
        WGPUInstanceFlag_Debug = 1 << 0,
        WGPUInstanceFlag_Validation = 1 << 1,
        WGPUInstanceFlag_DiscardHalLabels = 1 << 2,
    }
}

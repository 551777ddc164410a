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

//! Shader modules, compute pipelines and render pipelines.

use crate::{instance::WGPUChainedStruct, types::*};
use libc::{c_char, size_t};
use wgpu_ffm_core::foreign_struct;

foreign_struct! {
    pub struct WGPUShaderModuleCompilationHint {
        pub nextInChain: *const WGPUChainedStruct,
        pub entryPoint: *const c_char,
        pub layout: WGPUPipelineLayout,
    }

    pub struct WGPUShaderModuleDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
        pub label: *const c_char,
        pub hintCount: size_t,
        pub hints: *const WGPUShaderModuleCompilationHint,
    }

    /// Chained to a [`WGPUShaderModuleDescriptor`] with
    /// [`WGPUSType_ShaderModuleWGSLDescriptor`].
    pub struct WGPUShaderModuleWGSLDescriptor {
        pub chain: WGPUChainedStruct,
        pub code: *const c_char,
    }

    pub struct WGPUCompilationMessage {
        pub nextInChain: *const WGPUChainedStruct,
        pub message: *const c_char,
        pub r#type: WGPUCompilationMessageType,
        pub lineNum: u64,
        pub linePos: u64,
        pub offset: u64,
        pub length: u64,
        pub utf16LinePos: u64,
        pub utf16Offset: u64,
        pub utf16Length: u64,
    }

    pub struct WGPUCompilationInfo {
        pub nextInChain: *const WGPUChainedStruct,
        pub messageCount: size_t,
        pub messages: *const WGPUCompilationMessage,
    }

    pub struct WGPUConstantEntry {
        pub nextInChain: *const WGPUChainedStruct,
        pub key: *const c_char,
        pub value: f64,
    }

    pub struct WGPUProgrammableStageDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
        pub module: WGPUShaderModule,
        pub entryPoint: *const c_char,
        pub constantCount: size_t,
        pub constants: *const WGPUConstantEntry,
    }

    pub struct WGPUComputePipelineDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
        pub label: *const c_char,
        pub layout: WGPUPipelineLayout,
        pub compute: WGPUProgrammableStageDescriptor,
    }

    pub struct WGPUBlendComponent {
        pub operation: WGPUBlendOperation,
        pub srcFactor: WGPUBlendFactor,
        pub dstFactor: WGPUBlendFactor,
    }

    pub struct WGPUBlendState {
        pub color: WGPUBlendComponent,
        pub alpha: WGPUBlendComponent,
    }

    pub struct WGPUColorTargetState {
        pub nextInChain: *const WGPUChainedStruct,
        pub format: WGPUTextureFormat,
        pub blend: *const WGPUBlendState,
        pub writeMask: WGPUColorWriteMaskFlags,
    }

    pub struct WGPUFragmentState {
        pub nextInChain: *const WGPUChainedStruct,
        pub module: WGPUShaderModule,
        pub entryPoint: *const c_char,
        pub constantCount: size_t,
        pub constants: *const WGPUConstantEntry,
        pub targetCount: size_t,
        pub targets: *const WGPUColorTargetState,
    }

    pub struct WGPUVertexAttribute {
        pub format: WGPUVertexFormat,
        pub offset: u64,
        pub shaderLocation: u32,
    }

    pub struct WGPUVertexBufferLayout {
        pub arrayStride: u64,
        pub stepMode: WGPUVertexStepMode,
        pub attributeCount: size_t,
        pub attributes: *const WGPUVertexAttribute,
    }

    pub struct WGPUVertexState {
        pub nextInChain: *const WGPUChainedStruct,
        pub module: WGPUShaderModule,
        pub entryPoint: *const c_char,
        pub constantCount: size_t,
        pub constants: *const WGPUConstantEntry,
        pub bufferCount: size_t,
        pub buffers: *const WGPUVertexBufferLayout,
    }

    pub struct WGPUPrimitiveState {
        pub nextInChain: *const WGPUChainedStruct,
        pub topology: WGPUPrimitiveTopology,
        pub stripIndexFormat: WGPUIndexFormat,
        pub frontFace: WGPUFrontFace,
        pub cullMode: WGPUCullMode,
    }

    /// Chained to a [`WGPUPrimitiveState`] with [`WGPUSType_PrimitiveDepthClipControl`].
    pub struct WGPUPrimitiveDepthClipControl {
        pub chain: WGPUChainedStruct,
        pub unclippedDepth: WGPUBool,
    }

    pub struct WGPUStencilFaceState {
        pub compare: WGPUCompareFunction,
        pub failOp: WGPUStencilOperation,
        pub depthFailOp: WGPUStencilOperation,
        pub passOp: WGPUStencilOperation,
    }

    pub struct WGPUDepthStencilState {
        pub nextInChain: *const WGPUChainedStruct,
        pub format: WGPUTextureFormat,
        pub depthWriteEnabled: WGPUBool,
        pub depthCompare: WGPUCompareFunction,
        pub stencilFront: WGPUStencilFaceState,
        pub stencilBack: WGPUStencilFaceState,
        pub stencilReadMask: u32,
        pub stencilWriteMask: u32,
        pub depthBias: i32,
        pub depthBiasSlopeScale: f32,
        pub depthBiasClamp: f32,
    }

    pub struct WGPUMultisampleState {
        pub nextInChain: *const WGPUChainedStruct,
        pub count: u32,
        pub mask: u32,
        pub alphaToCoverageEnabled: WGPUBool,
    }

    pub struct WGPURenderPipelineDescriptor {
        pub nextInChain: *const WGPUChainedStruct,
        pub label: *const c_char,
        pub layout: WGPUPipelineLayout,
        pub vertex: WGPUVertexState,
        pub primitive: WGPUPrimitiveState,
        pub depthStencil: *const WGPUDepthStencilState,
        pub multisample: WGPUMultisampleState,
        pub fragment: *const WGPUFragmentState,
    }
}

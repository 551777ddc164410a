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

//! Extensions specific to `wgpu-native`, declared in `wgpu.h` rather than `webgpu.h`.

use crate::{instance::WGPUChainedStruct, types::*};
use libc::c_char;
use wgpu_ffm_core::foreign_struct;

foreign_struct! {
    /// Chained to a [`WGPUInstanceDescriptor`](crate::WGPUInstanceDescriptor) with
    /// [`WGPUSType_InstanceExtras`].
    pub struct WGPUInstanceExtras {
        pub chain: WGPUChainedStruct,
        pub backends: WGPUInstanceBackendFlags,
        pub flags: WGPUInstanceFlags,
        pub dx12ShaderCompiler: WGPUDx12Compiler,
        pub gles3MinorVersion: WGPUGles3MinorVersion,
        pub dxilPath: *const c_char,
        pub dxcPath: *const c_char,
    }

    /// Chained to a [`WGPUDeviceDescriptor`](crate::WGPUDeviceDescriptor) with
    /// [`WGPUSType_DeviceExtras`].
    pub struct WGPUDeviceExtras {
        pub chain: WGPUChainedStruct,
        pub tracePath: *const c_char,
    }
}

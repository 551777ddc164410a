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

//! Function-pointer typedefs.
//!
//! Every callback of the API, except [`WGPUProc`], receives the `userdata` pointer that was
//! passed alongside it as its last parameter. The closures given to `upcall` don't see it.

use crate::{pipeline::WGPUCompilationInfo, types::*};
use core::ffi::c_void;
use libc::c_char;
use wgpu_ffm_core::{fatal, foreign_callback, FunctionDescriptor, FunctionPointer as _};

foreign_callback! {
    pub callback WGPUBufferMapCallback = BufferMapCallback(status: WGPUBufferMapAsyncStatus);

    pub callback WGPUCompilationInfoCallback = CompilationInfoCallback(
        status: WGPUCompilationInfoRequestStatus,
        compilation_info: *const WGPUCompilationInfo,
    );

    pub callback WGPUCreateComputePipelineAsyncCallback = CreateComputePipelineAsyncCallback(
        status: WGPUCreatePipelineAsyncStatus,
        pipeline: WGPUComputePipeline,
        message: *const c_char,
    );

    pub callback WGPUCreateRenderPipelineAsyncCallback = CreateRenderPipelineAsyncCallback(
        status: WGPUCreatePipelineAsyncStatus,
        pipeline: WGPURenderPipeline,
        message: *const c_char,
    );

    pub callback WGPUDeviceLostCallback = DeviceLostCallback(
        reason: WGPUDeviceLostReason,
        message: *const c_char,
    );

    /// Uncaptured errors of a device.
    pub callback WGPUErrorCallback = ErrorCallback(r#type: WGPUErrorType, message: *const c_char);

    pub callback WGPUQueueWorkDoneCallback = QueueWorkDoneCallback(status: WGPUQueueWorkDoneStatus);

    pub callback WGPURequestAdapterCallback = RequestAdapterCallback(
        status: WGPURequestAdapterStatus,
        adapter: WGPUAdapter,
        message: *const c_char,
    );

    pub callback WGPURequestDeviceCallback = RequestDeviceCallback(
        status: WGPURequestDeviceStatus,
        device: WGPUDevice,
        message: *const c_char,
    );

    /// Log messages of the native library. See [`crate::logging`].
    pub callback WGPULogCallback = LogCallback(level: WGPULogLevel, message: *const c_char);
}

/// Generic function pointer returned by `wgpuGetProcAddress`. It has no `userdata`, and is
/// meant to be cast to the actual signature of the function.
pub type WGPUProc = Option<unsafe extern "C" fn()>;

/// Signature and adapter of [`WGPUProc`].
///
/// Native code never calls back into Rust through a [`WGPUProc`], so there is no upcall.
pub enum Proc {}

impl Proc {
    pub const DESCRIPTOR: FunctionDescriptor = FunctionDescriptor {
        name: "WGPUProc",
        params: &[],
        ret_ty: None,
    };

    /// Turns a native address into a Rust callable.
    ///
    /// # Safety
    ///
    /// `address` must be null or point to a function that takes no parameter and returns
    /// nothing. Calling the callable aborts the process if the address is null.
    pub unsafe fn downcall(address: *const c_void) -> impl Fn() {
        let function: WGPUProc = wgpu_ffm_core::FunctionPointer::from_address(address);
        move || match function {
            Some(f) => unsafe { f() },
            None => fatal::null_function("WGPUProc"),
        }
    }

    /// Address of `function`, or null.
    pub fn address(function: WGPUProc) -> *const c_void {
        function.map_or(core::ptr::null(), |f| f.address())
    }
}

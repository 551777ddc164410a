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

//! Exported functions of the native library.
//!
//! The library is loaded at runtime, so its functions are looked up by name and stored in a
//! [`Procs`] table. Only the entry points used by this crate are listed.

use crate::{callbacks::WGPULogCallback, instance::WGPUInstanceDescriptor, types::*};
use core::{ffi::c_void, fmt};
use wgpu_ffm_core::{fatal, FunctionPointer, LibraryConfig, NativeLibrary};

/// Name of the native library, without prefix or extension.
pub const LIBRARY_NAME: &str = "wgpu_native";

/// Environment variable that can point to the native library.
pub const LIBRARY_PATH_ENV: &str = "WGPU_NATIVE_PATH";

/// Returns the default way to find the native library.
///
/// The [`LIBRARY_PATH_ENV`] environment variable is tried first, then the system loader.
pub fn default_library_config() -> LibraryConfig {
    LibraryConfig::new(LIBRARY_NAME).with_path_env(LIBRARY_PATH_ENV)
}

pub type WGPUProcCreateInstance =
    Option<unsafe extern "C" fn(descriptor: *const WGPUInstanceDescriptor) -> WGPUInstance>;
pub type WGPUProcInstanceRelease = Option<unsafe extern "C" fn(instance: WGPUInstance)>;
pub type WGPUProcGetVersion = Option<unsafe extern "C" fn() -> u32>;
pub type WGPUProcSetLogCallback =
    Option<unsafe extern "C" fn(callback: WGPULogCallback, userdata: *mut c_void)>;
pub type WGPUProcSetLogLevel = Option<unsafe extern "C" fn(level: WGPULogLevel)>;

/// Table of entry points of the native library.
///
/// Entry points that couldn't be found are `None`. Calling them aborts the process.
#[derive(Debug, Default, Copy, Clone)]
pub struct Procs {
    pub create_instance: WGPUProcCreateInstance,
    pub instance_release: WGPUProcInstanceRelease,
    pub get_version: WGPUProcGetVersion,
    pub set_log_callback: WGPUProcSetLogCallback,
    pub set_log_level: WGPUProcSetLogLevel,
}

impl Procs {
    /// Fills the table by calling `loader` with the name of each entry point.
    ///
    /// # Safety
    ///
    /// Every non-null address returned by `loader` must point to the function of that name,
    /// and stay valid as long as the table is in use.
    pub unsafe fn load_with(mut loader: impl FnMut(&str) -> Option<*const c_void>) -> Self {
        Procs {
            create_instance: lookup(&mut loader, "wgpuCreateInstance"),
            instance_release: lookup(&mut loader, "wgpuInstanceRelease"),
            get_version: lookup(&mut loader, "wgpuGetVersion"),
            set_log_callback: lookup(&mut loader, "wgpuSetLogCallback"),
            set_log_level: lookup(&mut loader, "wgpuSetLogLevel"),
        }
    }

    /// Fills the table from the exports of `library`.
    ///
    /// # Safety
    ///
    /// `library` must be a build of `wgpu-native` matching this crate, and must outlive the
    /// table.
    pub unsafe fn load(library: &NativeLibrary) -> Self {
        Procs::load_with(|symbol| library.find(symbol))
    }

    /// Returns the names of the entry points that couldn't be found.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.create_instance.is_none() {
            out.push("wgpuCreateInstance");
        }
        if self.instance_release.is_none() {
            out.push("wgpuInstanceRelease");
        }
        if self.get_version.is_none() {
            out.push("wgpuGetVersion");
        }
        if self.set_log_callback.is_none() {
            out.push("wgpuSetLogCallback");
        }
        if self.set_log_level.is_none() {
            out.push("wgpuSetLogLevel");
        }
        out
    }

    /// # Safety
    ///
    /// `descriptor` must be null or point to a valid descriptor and its chain.
    pub unsafe fn create_instance(&self, descriptor: *const WGPUInstanceDescriptor) -> WGPUInstance {
        require(self.create_instance, "wgpuCreateInstance")(descriptor)
    }

    /// # Safety
    ///
    /// `instance` must have been returned by [`Procs::create_instance`] and not be released
    /// yet.
    pub unsafe fn instance_release(&self, instance: WGPUInstance) {
        require(self.instance_release, "wgpuInstanceRelease")(instance)
    }

    /// Returns the version of the native library.
    pub fn version(&self) -> Version {
        let packed = unsafe { require(self.get_version, "wgpuGetVersion")() };
        Version::from_packed(packed)
    }

    /// Installs the function that receives the log messages of the native library, or removes
    /// it if `callback` is `None`.
    ///
    /// # Safety
    ///
    /// `callback` must stay valid to call with `userdata` until it is replaced.
    pub unsafe fn set_log_callback(&self, callback: WGPULogCallback, userdata: *mut c_void) {
        require(self.set_log_callback, "wgpuSetLogCallback")(callback, userdata)
    }

    pub fn set_log_level(&self, level: WGPULogLevel) {
        unsafe { require(self.set_log_level, "wgpuSetLogLevel")(level) }
    }
}

unsafe fn lookup<F: FunctionPointer>(
    loader: &mut impl FnMut(&str) -> Option<*const c_void>,
    name: &str,
) -> Option<F> {
    let function = loader(name).and_then(|address| F::from_address(address));
    if function.is_none() {
        log::debug!("native entry point {} not found", name);
    }
    function
}

fn require<F>(function: Option<F>, name: &str) -> F {
    match function {
        Some(f) => f,
        None => fatal::null_function(name),
    }
}

/// Version of the native library, as returned by `wgpuGetVersion`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
    pub build: u8,
}

impl Version {
    /// Decodes the packed value. Each component is one byte, the major version being the
    /// most significant one.
    pub fn from_packed(packed: u32) -> Self {
        let [major, minor, patch, build] = packed.to_be_bytes();
        Version {
            major,
            minor,
            patch,
            build,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.patch, self.build)
    }
}

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

//! Forwarding of the native log messages to the [`log`] crate.
//!
//! ```no_run
//! use wgpu_ffm_core::{Arena, NativeLibrary};
//! use wgpu_ffm_webgpu::{logging, procs};
//!
//! let library = NativeLibrary::open(&procs::default_library_config()).unwrap();
//! let procs = unsafe { procs::Procs::load(&library) };
//! let arena = Arena::new();
//! logging::forward_native_logs(&procs, &arena, log::LevelFilter::Warn);
//! ```

use crate::{callbacks::LogCallback, procs::Procs, types::*};
use core::{
    ffi::c_void,
    ptr,
    sync::atomic::{AtomicPtr, Ordering},
};
use std::{borrow::Cow, ffi::CStr};
use wgpu_ffm_core::Arena;

/// Target of the log records emitted on behalf of the native library.
pub const TARGET: &str = "wgpu_native";

/// Converts a native log level. Returns `None` for [`WGPULogLevel_Off`] and for unknown
/// values.
#[allow(non_upper_case_globals)]
pub fn level_from_native(level: WGPULogLevel) -> Option<log::Level> {
    match level {
        WGPULogLevel_Error => Some(log::Level::Error),
        WGPULogLevel_Warn => Some(log::Level::Warn),
        WGPULogLevel_Info => Some(log::Level::Info),
        WGPULogLevel_Debug => Some(log::Level::Debug),
        WGPULogLevel_Trace => Some(log::Level::Trace),
        _ => None,
    }
}

/// Converts a level filter to the native level with the same meaning.
pub fn level_to_native(filter: log::LevelFilter) -> WGPULogLevel {
    match filter {
        log::LevelFilter::Off => WGPULogLevel_Off,
        log::LevelFilter::Error => WGPULogLevel_Error,
        log::LevelFilter::Warn => WGPULogLevel_Warn,
        log::LevelFilter::Info => WGPULogLevel_Info,
        log::LevelFilter::Debug => WGPULogLevel_Debug,
        log::LevelFilter::Trace => WGPULogLevel_Trace,
    }
}

/// `userdata` of the callback most recently installed by [`forward_native_logs`].
///
/// The native library holds a single log callback for the whole process. Closing an arena
/// only uninstalls the callback if it is still the one registered here.
static REGISTERED: AtomicPtr<c_void> = AtomicPtr::new(ptr::null_mut());

/// Makes the native library send its log messages up to `filter` to the [`log`] crate,
/// under the [`TARGET`] target.
///
/// The callback is uninstalled when `arena` closes, unless another call to this function
/// has replaced it in the meantime.
pub fn forward_native_logs(procs: &Procs, arena: &Arena, filter: log::LevelFilter) {
    // Capturing `filter` also gives each registration its own `userdata` address.
    let upcall = LogCallback::upcall(arena, move |level, message| {
        let level = match level_from_native(level) {
            Some(l) if l <= filter => l,
            _ => return,
        };

        let message = if message.is_null() {
            Cow::Borrowed("")
        } else {
            unsafe { CStr::from_ptr(message) }.to_string_lossy()
        };

        log::log!(target: TARGET, level, "{}", message);
    });

    // The closure belongs to the arena. Registered after the upcall, this runs before the
    // closure is dropped.
    let userdata = upcall.userdata();
    let procs_on_close = *procs;
    arena.on_close(move || {
        let still_registered = REGISTERED
            .compare_exchange(userdata, ptr::null_mut(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if still_registered {
            reset_native_logs(&procs_on_close);
        }
    });

    REGISTERED.store(userdata, Ordering::Release);
    unsafe { procs.set_log_callback(upcall.function(), userdata) };
    procs.set_log_level(level_to_native(filter));
    log::debug!("forwarding native logs up to {}", filter);
}

/// Uninstalls the log callback and silences the native library.
pub fn reset_native_logs(procs: &Procs) {
    REGISTERED.store(ptr::null_mut(), Ordering::Release);
    unsafe { procs.set_log_callback(None, ptr::null_mut()) };
    procs.set_log_level(WGPULogLevel_Off);
}

#[cfg(test)]
mod tests;

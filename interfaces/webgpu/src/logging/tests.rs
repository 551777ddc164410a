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

use super::{forward_native_logs, level_from_native, level_to_native, reset_native_logs, TARGET};
use crate::{callbacks::LogCallback, procs::Procs, types::*, WGPULogCallback};
use core::{cell::Cell, cell::RefCell, ffi::c_void, ptr};
use std::{
    ffi::CStr,
    sync::{Mutex, MutexGuard, Once},
};
use wgpu_ffm_core::Arena;

thread_local! {
    static INSTALLED: Cell<(WGPULogCallback, *mut c_void)> = Cell::new((None, ptr::null_mut()));
    static LEVEL: Cell<WGPULogLevel> = Cell::new(WGPULogLevel_Off);
    static RECORDS: RefCell<Vec<(log::Level, String)>> = RefCell::new(Vec::new());
}

struct Capture;

impl log::Log for Capture {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        if record.target() == TARGET {
            let entry = (record.level(), record.args().to_string());
            RECORDS.with(|r| r.borrow_mut().push(entry));
        }
    }

    fn flush(&self) {}
}

static LOGGER: Capture = Capture;

fn init_logger() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
    });
}

/// The registered callback is process-wide while the mocks are per thread. Tests that
/// install or reset a callback hold this lock.
fn serial() -> MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

unsafe extern "C" fn mock_set_log_callback(callback: WGPULogCallback, userdata: *mut c_void) {
    INSTALLED.with(|i| i.set((callback, userdata)));
}

unsafe extern "C" fn mock_set_log_level(level: WGPULogLevel) {
    LEVEL.with(|l| l.set(level));
}

fn mock_procs() -> Procs {
    Procs {
        set_log_callback: Some(mock_set_log_callback),
        set_log_level: Some(mock_set_log_level),
        ..Procs::default()
    }
}

/// Emits a message the way the native library does.
fn native_log(level: WGPULogLevel, message: &CStr) {
    let (callback, userdata) = INSTALLED.with(|i| i.get());
    unsafe { LogCallback::invoke(callback, level, message.as_ptr(), userdata) }
}

fn records() -> Vec<(log::Level, String)> {
    RECORDS.with(|r| r.borrow_mut().drain(..).collect())
}

#[test]
fn level_mapping() {
    assert_eq!(level_from_native(WGPULogLevel_Off), None);
    assert_eq!(level_from_native(WGPULogLevel_Warn), Some(log::Level::Warn));
    assert_eq!(level_from_native(WGPULogLevel_Trace), Some(log::Level::Trace));
    assert_eq!(level_from_native(42), None);

    assert_eq!(level_to_native(log::LevelFilter::Off), WGPULogLevel_Off);
    assert_eq!(level_to_native(log::LevelFilter::Info), WGPULogLevel_Info);
    for filter in &[
        log::LevelFilter::Error,
        log::LevelFilter::Warn,
        log::LevelFilter::Info,
        log::LevelFilter::Debug,
        log::LevelFilter::Trace,
    ] {
        let filter = *filter;
        let native = level_to_native(filter);
        assert_eq!(level_from_native(native).map(|l| l.to_level_filter()), Some(filter));
    }
}

#[test]
fn messages_forwarded() {
    let _serial = serial();
    init_logger();
    let procs = mock_procs();
    let arena = Arena::new();

    forward_native_logs(&procs, &arena, log::LevelFilter::Warn);
    assert_eq!(LEVEL.with(|l| l.get()), WGPULogLevel_Warn);
    assert!(INSTALLED.with(|i| i.get().0.is_some()));

    native_log(WGPULogLevel_Error, CStr::from_bytes_with_nul(b"device lost\0").unwrap());
    native_log(WGPULogLevel_Off, CStr::from_bytes_with_nul(b"ignored\0").unwrap());
    native_log(WGPULogLevel_Warn, CStr::from_bytes_with_nul(b"slow path\0").unwrap());
    native_log(WGPULogLevel_Info, CStr::from_bytes_with_nul(b"above filter\0").unwrap());

    assert_eq!(
        records(),
        vec![
            (log::Level::Error, "device lost".to_owned()),
            (log::Level::Warn, "slow path".to_owned()),
        ]
    );
}

#[test]
fn uninstalled_when_arena_closes() {
    let _serial = serial();
    init_logger();
    let procs = mock_procs();
    let arena = Arena::new();
    forward_native_logs(&procs, &arena, log::LevelFilter::Trace);
    assert_eq!(LEVEL.with(|l| l.get()), WGPULogLevel_Trace);

    drop(arena);
    let (callback, userdata) = INSTALLED.with(|i| i.get());
    assert!(callback.is_none());
    assert!(userdata.is_null());
    assert_eq!(LEVEL.with(|l| l.get()), WGPULogLevel_Off);
}

#[test]
fn explicit_reset() {
    let _serial = serial();
    let procs = mock_procs();
    procs.set_log_level(WGPULogLevel_Debug);
    reset_native_logs(&procs);
    assert_eq!(LEVEL.with(|l| l.get()), WGPULogLevel_Off);
    assert!(INSTALLED.with(|i| i.get().0.is_none()));
}

#[test]
fn reconfigure_then_drop_old_arena() {
    let _serial = serial();
    init_logger();
    let procs = mock_procs();

    let old = Arena::new();
    forward_native_logs(&procs, &old, log::LevelFilter::Warn);
    let new = Arena::new();
    forward_native_logs(&procs, &new, log::LevelFilter::Trace);
    let (_, new_userdata) = INSTALLED.with(|i| i.get());

    drop(old);
    let (callback, userdata) = INSTALLED.with(|i| i.get());
    assert!(callback.is_some());
    assert_eq!(userdata, new_userdata);
    assert_eq!(LEVEL.with(|l| l.get()), WGPULogLevel_Trace);

    native_log(WGPULogLevel_Debug, CStr::from_bytes_with_nul(b"still here\0").unwrap());
    assert_eq!(records(), vec![(log::Level::Debug, "still here".to_owned())]);

    drop(new);
    assert!(INSTALLED.with(|i| i.get().0.is_none()));
    assert_eq!(LEVEL.with(|l| l.get()), WGPULogLevel_Off);
}

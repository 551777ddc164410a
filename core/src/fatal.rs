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

//! Unrecoverable failures at the native boundary.
//!
//! Unwinding through native frames is undefined behaviour, and a null function pointer can't
//! be called. In both situations there is no reasonable way to continue, and the process is
//! aborted after the reason has been logged.

use core::fmt;

/// Logs `reason` and aborts the process.
#[cold]
pub fn abort(reason: fmt::Arguments) -> ! {
    log::error!("fatal error at the native boundary: {}", reason);
    eprintln!("fatal error at the native boundary: {}", reason);
    std::process::abort()
}

/// Called when code tries to invoke a null pointer of the function type `name`.
#[cold]
pub fn null_function(name: &str) -> ! {
    abort(format_args!("call to a null `{}` pointer", name))
}

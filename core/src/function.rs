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

//! Native function pointers.
//!
//! The [`foreign_callback!`](crate::foreign_callback) macro declares the typedef of a C
//! function pointer whose last parameter is an opaque `void* userdata`. This is the
//! convention that C APIs use for callbacks.
//!
//! Two adapters are generated for each typedef:
//!
//! - A *downcall* turns a native function address into something callable from Rust.
//! - An *upcall* turns a Rust closure into a function pointer and a `userdata` pointer that
//!   can be handed to native code. The closure is moved into an [`Arena`] and stays alive
//!   until the arena is dropped. The function pointer is a monomorphized trampoline that finds
//!   the closure through `userdata`.
//!
//! ```
//! use wgpu_ffm_core::{foreign_callback, Arena};
//!
//! foreign_callback! {
//!     pub callback AddCallback = AddCallbackDesc(a: u32, b: u32) -> u32;
//! }
//!
//! let arena = Arena::new();
//! let upcall = AddCallbackDesc::upcall(&arena, |a, b| a + b);
//! let sum = unsafe { AddCallbackDesc::invoke(upcall.function(), 2, 3, upcall.userdata()) };
//! assert_eq!(sum, 5);
//! ```

use crate::{fatal, memory::Arena, value::ValueType};
use core::{ffi::c_void, fmt, marker::PhantomData, mem};
use std::panic::{self, AssertUnwindSafe};

/// Signature of a native function.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FunctionDescriptor {
    /// Name of the typedef in the C header.
    pub name: &'static str,
    /// Types of the parameters, in order.
    pub params: &'static [ValueType],
    /// Type of the return value. `None` for `void`.
    pub ret_ty: Option<ValueType>,
}

impl fmt::Display for FunctionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (n, param) in self.params.iter().enumerate() {
            if n != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", param)?;
        }
        write!(f, ")")?;
        if let Some(ret_ty) = self.ret_ty {
            write!(f, " -> {:?}", ret_ty)?;
        }
        Ok(())
    }
}

/// Rust type of a non-null C function pointer.
///
/// # Safety
///
/// Must only be implemented on `unsafe extern "C" fn` types.
pub unsafe trait FunctionPointer: Copy + 'static {
    /// Returns the address of the function.
    fn address(self) -> *const c_void;

    /// Turns an address into a function pointer. Returns `None` if the address is null.
    ///
    /// # Safety
    ///
    /// The address must be null or point to a function with this signature.
    unsafe fn from_address(address: *const c_void) -> Option<Self> {
        if address.is_null() {
            None
        } else {
            Some(mem::transmute_copy::<*const c_void, Self>(&address))
        }
    }
}

macro_rules! function_pointers {
    ($($($arg:ident),*;)*) => {$(
        unsafe impl<R: 'static, $($arg: 'static),*> FunctionPointer for unsafe extern "C" fn($($arg),*) -> R {
            fn address(self) -> *const c_void {
                self as *const c_void
            }
        }
    )*};
}

function_pointers! {
    ;
    A;
    A, B;
    A, B, C;
    A, B, C, D;
    A, B, C, D, E;
    A, B, C, D, E, F;
    A, B, C, D, E, F, G;
    A, B, C, D, E, F, G, H;
}

/// Rust closure exposed to native code, as a function pointer and its `userdata`.
///
/// Both pointers stay valid as long as the arena the upcall was created from.
#[derive(Copy, Clone)]
pub struct Upcall<'a, F> {
    function: F,
    userdata: *mut c_void,
    arena: PhantomData<&'a Arena>,
}

impl<'a, F: Copy> Upcall<'a, F> {
    /// # Safety
    ///
    /// `function` must be safe to call with `userdata` during the lifetime `'a`.
    pub unsafe fn new(function: F, userdata: *mut c_void) -> Self {
        Upcall {
            function,
            userdata,
            arena: PhantomData,
        }
    }

    /// Function pointer to pass to native code.
    pub fn function(&self) -> F {
        self.function
    }

    /// Value to pass as the `userdata` parameter alongside [`Upcall::function`].
    pub fn userdata(&self) -> *mut c_void {
        self.userdata
    }
}

impl<'a, P: FunctionPointer> Upcall<'a, Option<P>> {
    /// Address of the function pointer, or null.
    pub fn address(&self) -> *const c_void {
        self.function.map_or(core::ptr::null(), P::address)
    }
}

impl<'a, F> fmt::Debug for Upcall<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Upcall")
            .field("userdata", &self.userdata)
            .finish()
    }
}

/// Runs the body of an upcall. A panic can't unwind into native code, and aborts the
/// process instead.
pub fn guard<R>(name: &str, body: impl FnOnce() -> R) -> R {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(value) => value,
        Err(_) => fatal::abort(format_args!("panic in upcall `{}`", name)),
    }
}

/// Declares native function-pointer typedefs whose last parameter is `void* userdata`.
///
/// ```ignore
/// foreign_callback! {
///     /// Doc of the typedef.
///     pub callback WGPUBufferMapCallback = BufferMapCallback(status: u32);
/// }
/// ```
///
/// The `userdata` parameter is implicit. This declares:
///
/// - `type WGPUBufferMapCallback = Option<unsafe extern "C" fn(u32, *mut c_void)>`.
/// - An uninhabited `BufferMapCallback` type, with a `DESCRIPTOR` constant and the
///   `invoke`, `downcall` and `upcall` functions.
#[macro_export]
macro_rules! foreign_callback {
    (@emit $attrs:tt $vis:vis $typedef:ident $desc:ident $args:tt []) => {
        $crate::foreign_callback!(@impl $attrs $vis $typedef $desc $args ());
    };
    (@emit $attrs:tt $vis:vis $typedef:ident $desc:ident $args:tt [$ret:ty]) => {
        $crate::foreign_callback!(@impl $attrs $vis $typedef $desc $args $ret);
    };
    (@impl [$(#[$attr:meta])*] $vis:vis $typedef:ident $desc:ident ($($arg:ident: $ty:ty),*) $ret:ty) => {
        $(#[$attr])*
        $vis type $typedef = ::core::option::Option<
            unsafe extern "C" fn($($ty,)* *mut ::core::ffi::c_void) -> $ret
        >;

        #[doc = concat!("Signature and adapters of [`", stringify!($typedef), "`].")]
        $vis enum $desc {}

        #[allow(dead_code)]
        impl $desc {
            /// Signature of the function pointer, including the trailing `userdata`.
            pub const DESCRIPTOR: $crate::function::FunctionDescriptor =
                $crate::function::FunctionDescriptor {
                    name: stringify!($typedef),
                    params: &[
                        $($crate::value::value_type_of::<$ty>(),)*
                        $crate::value::ValueType::Pointer,
                    ],
                    ret_ty: <$ret as $crate::value::ReturnCarrier>::VALUE_TYPE,
                };

            /// Calls `function`. Aborts the process if it is null.
            ///
            /// # Safety
            ///
            /// `function` must be valid to call with these parameters.
            #[allow(clippy::too_many_arguments)]
            pub unsafe fn invoke(
                function: $typedef,
                $($arg: $ty,)*
                userdata: *mut ::core::ffi::c_void,
            ) -> $ret {
                match function {
                    ::core::option::Option::Some(f) => f($($arg,)* userdata),
                    ::core::option::Option::None => $crate::fatal::null_function(stringify!($typedef)),
                }
            }

            /// Turns a native address into a Rust callable. A null address is only detected
            /// when the callable is called, which aborts the process.
            ///
            /// # Safety
            ///
            /// `address` must be null or point to a function with this signature, and the
            /// callable must only be called while that function is valid.
            pub unsafe fn downcall(
                address: *const ::core::ffi::c_void,
            ) -> impl Fn($($ty,)* *mut ::core::ffi::c_void) -> $ret {
                let function: $typedef =
                    $crate::function::FunctionPointer::from_address(address);
                move |$($arg: $ty,)* userdata: *mut ::core::ffi::c_void| unsafe {
                    Self::invoke(function, $($arg,)* userdata)
                }
            }

            /// Turns `callback` into a function pointer that native code can call. The
            /// closure is dropped when `arena` closes.
            ///
            /// Native code may call the pointer again while a call is in progress, so the
            /// closure only gets shared access to its state. Use `Cell` or `RefCell` for
            /// anything it mutates. Native code that calls it from other threads must only be
            /// given closures that are safe to share between threads.
            pub fn upcall<'a, F>(
                arena: &'a $crate::memory::Arena,
                callback: F,
            ) -> $crate::function::Upcall<'a, $typedef>
            where
                F: 'static + Fn($($ty),*) -> $ret,
            {
                unsafe extern "C" fn trampoline<F: Fn($($ty),*) -> $ret>(
                    $($arg: $ty,)*
                    userdata: *mut ::core::ffi::c_void,
                ) -> $ret {
                    let callback = &*(userdata as *const F);
                    $crate::function::guard(stringify!($typedef), move || callback($($arg),*))
                }

                let userdata = arena.retain(callback);
                let function: $typedef = ::core::option::Option::Some(trampoline::<F>);
                unsafe {
                    $crate::function::Upcall::new(
                        function,
                        userdata.as_ptr() as *mut ::core::ffi::c_void,
                    )
                }
            }
        }
    };
    ($(
        $(#[$attr:meta])*
        $vis:vis callback $typedef:ident = $desc:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)?;
    )*) => {$(
        $crate::foreign_callback!(@emit [$(#[$attr])*] $vis $typedef $desc ($($arg: $ty),*) [$($ret)?]);
    )*};
}

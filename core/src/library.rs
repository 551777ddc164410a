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

//! Loading of the native shared library.
//!
//! Use a [`LibraryConfig`] to describe where the library can be found, then call
//! [`NativeLibrary::open`]. The candidates are tried in this order:
//!
//! - The path passed to [`LibraryConfig::with_path`], if any.
//! - The content of the environment variable passed to [`LibraryConfig::with_path_env`], if
//!   it is set. It can be either the path of the library or of the directory containing it.
//! - Each directory passed to [`LibraryConfig::with_search_path`], in order.
//! - The platform file name alone, which lets the system loader search its usual locations.

use crate::error::LoadError;
use core::{ffi::c_void, fmt};
use std::{
    env,
    path::{Path, PathBuf},
};

/// Returns the file name of the library called `name` on the compilation target.
///
/// For example `wgpu_native` becomes `libwgpu_native.so` on Linux and `wgpu_native.dll` on
/// Windows. Apple silicon builds of the library carry an `_aarch64` suffix.
pub fn platform_file_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{}.dll", name)
    } else if cfg!(all(target_os = "macos", target_arch = "aarch64")) {
        format!("lib{}_aarch64.dylib", name)
    } else if cfg!(target_os = "macos") {
        format!("lib{}.dylib", name)
    } else {
        format!("lib{}.so", name)
    }
}

/// Where to look for a native library.
#[derive(Debug, Clone)]
pub struct LibraryConfig {
    name: String,
    path: Option<PathBuf>,
    path_env: Option<String>,
    search_paths: Vec<PathBuf>,
}

impl LibraryConfig {
    /// Looks for the library called `name`, without `lib` prefix or extension.
    pub fn new(name: impl Into<String>) -> Self {
        LibraryConfig {
            name: name.into(),
            path: None,
            path_env: None,
            search_paths: Vec::new(),
        }
    }

    /// Tries this exact path first.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Tries the content of this environment variable, if set, after the explicit path.
    pub fn with_path_env(mut self, var: impl Into<String>) -> Self {
        self.path_env = Some(var.into());
        self
    }

    /// Adds a directory to look into. Directories are tried in the order they are added.
    pub fn with_search_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_paths.push(dir.into());
        self
    }

    /// Name passed to [`LibraryConfig::new`].
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name of the library on the compilation target.
    pub fn file_name(&self) -> String {
        platform_file_name(&self.name)
    }

    /// Returns the paths to try, in order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let file_name = self.file_name();
        let mut out = Vec::with_capacity(self.search_paths.len() + 3);

        if let Some(path) = &self.path {
            out.push(path.clone());
        }

        if let Some(value) = self.path_env.as_ref().and_then(env::var_os) {
            let path = PathBuf::from(value);
            if path.is_dir() {
                out.push(path.join(&file_name));
            } else {
                out.push(path);
            }
        }

        for dir in &self.search_paths {
            out.push(dir.join(&file_name));
        }

        out.push(PathBuf::from(file_name));
        out
    }
}

/// Shared library loaded in the process.
///
/// The library is unloaded when this object is dropped. Addresses returned by
/// [`NativeLibrary::find`] must not be used afterwards.
pub struct NativeLibrary {
    library: libloading::Library,
    path: PathBuf,
}

impl NativeLibrary {
    /// Tries each candidate of `config` until one loads.
    ///
    /// Candidates that contain a directory and don't exist are skipped. A file that exists but
    /// can't be loaded is an error, as it is most likely the library built for another target.
    pub fn open(config: &LibraryConfig) -> Result<Self, LoadError> {
        let mut tried = Vec::new();

        for candidate in config.candidates() {
            let bare = is_bare_file_name(&candidate);
            if !bare && !candidate.exists() {
                log::trace!("{} doesn't exist", candidate.display());
                tried.push(candidate);
                continue;
            }

            // Loading a library runs its initialization routines. There is nothing more we
            // can check beforehand.
            match unsafe { libloading::Library::new(&candidate) } {
                Ok(library) => {
                    log::debug!("loaded {} from {}", config.name, candidate.display());
                    return Ok(NativeLibrary {
                        library,
                        path: candidate,
                    });
                }
                Err(err) if bare => {
                    log::trace!("system loader can't find {}: {}", candidate.display(), err);
                    tried.push(candidate);
                }
                Err(source) => {
                    return Err(LoadError::Open {
                        path: candidate,
                        source,
                    })
                }
            }
        }

        Err(LoadError::NotFound {
            name: config.name.clone(),
            tried,
        })
    }

    /// Path the library was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the address of the exported symbol with this name, or `None` if the library
    /// doesn't export it.
    pub fn find(&self, symbol: &str) -> Option<*const c_void> {
        let address = unsafe {
            self.library
                .get::<unsafe extern "C" fn()>(symbol.as_bytes())
                .ok()
                .map(|sym| *sym as *const c_void)
        };

        if address.is_none() {
            log::trace!("symbol {} not found in {}", symbol, self.path.display());
        }
        address
    }
}

impl fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("NativeLibrary").field(&self.path).finish()
    }
}

fn is_bare_file_name(path: &Path) -> bool {
    path.parent().map_or(true, |p| p.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{platform_file_name, LibraryConfig, NativeLibrary};
    use crate::LoadError;
    use std::path::PathBuf;
    use tempdir::TempDir;

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_file_name() {
        assert_eq!(platform_file_name("wgpu_native"), "libwgpu_native.so");
    }

    #[cfg(windows)]
    #[test]
    fn windows_file_name() {
        assert_eq!(platform_file_name("wgpu_native"), "wgpu_native.dll");
    }

    #[test]
    fn candidates_order() {
        let config = LibraryConfig::new("foo")
            .with_path("/explicit/libfoo.so")
            .with_search_path("/first")
            .with_search_path("/second");
        let file_name = platform_file_name("foo");

        assert_eq!(
            config.candidates(),
            vec![
                PathBuf::from("/explicit/libfoo.so"),
                PathBuf::from("/first").join(&file_name),
                PathBuf::from("/second").join(&file_name),
                PathBuf::from(&file_name),
            ]
        );
    }

    #[test]
    fn env_var_directory() {
        let dir = TempDir::new("wgpu-ffm-env").unwrap();
        std::env::set_var("WGPU_FFM_TEST_ENV_DIR", dir.path());

        let config = LibraryConfig::new("foo").with_path_env("WGPU_FFM_TEST_ENV_DIR");
        let candidates = config.candidates();
        assert_eq!(candidates[0], dir.path().join(platform_file_name("foo")));
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn unset_env_var_ignored() {
        let config = LibraryConfig::new("foo").with_path_env("WGPU_FFM_TEST_ENV_UNSET");
        assert_eq!(config.candidates().len(), 1);
    }

    #[test]
    fn not_found_lists_everything_tried() {
        let dir = TempDir::new("wgpu-ffm-empty").unwrap();
        let config = LibraryConfig::new("wgpu_ffm_does_not_exist").with_search_path(dir.path());

        match NativeLibrary::open(&config) {
            Err(LoadError::NotFound { name, tried }) => {
                assert_eq!(name, "wgpu_ffm_does_not_exist");
                assert_eq!(tried, config.candidates());
            }
            other => panic!("{:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn invalid_file_is_open_error() {
        let dir = TempDir::new("wgpu-ffm-invalid").unwrap();
        let path = dir.path().join(platform_file_name("broken"));
        std::fs::write(&path, b"not a library").unwrap();

        let config = LibraryConfig::new("broken").with_search_path(dir.path());
        match NativeLibrary::open(&config) {
            Err(LoadError::Open { path: p, .. }) => assert_eq!(p, path),
            other => panic!("{:?}", other.map(|_| ())),
        }
    }

    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    #[test]
    fn find_libc_symbol() {
        let config = LibraryConfig::new("c").with_path("libc.so.6");
        let library = NativeLibrary::open(&config).unwrap();
        assert_eq!(library.path(), std::path::Path::new("libc.so.6"));
        assert!(library.find("strlen").is_some());
        assert!(library.find("wgpu_ffm_no_such_symbol").is_none());
    }
}

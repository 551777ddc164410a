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

use std::path::PathBuf;

/// Error that can happen when loading a native library.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// None of the candidate paths contains the library.
    #[error("could not find native library {name:?}, tried: {tried:?}")]
    NotFound {
        /// Name of the library, without prefix or extension.
        name: String,
        /// Paths that have been tried, in order.
        tried: Vec<PathBuf>,
    },

    /// A file exists at the path, but the dynamic linker rejected it.
    #[error("could not open native library {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::LoadError;
    use std::path::PathBuf;

    #[test]
    fn not_found_message() {
        let err = LoadError::NotFound {
            name: "wgpu_native".to_owned(),
            tried: vec![PathBuf::from("libwgpu_native.so")],
        };
        assert_eq!(
            err.to_string(),
            "could not find native library \"wgpu_native\", tried: [\"libwgpu_native.so\"]"
        );
    }
}

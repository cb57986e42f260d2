use std::path::{Path, PathBuf};
use nix::unistd::{access, AccessFlags};

/// Looks a program name up in an ordered list of directories.
pub struct PathResolver<'a> {
    search_path: &'a [String],
}

impl<'a> PathResolver<'a> {
    pub fn new(search_path: &'a [String]) -> Self {
        PathResolver { search_path }
    }

    /// `<dir>/<command>` for every search directory, in order.
    pub fn search<'b>(&'b self, command: &'b str) -> impl Iterator<Item = PathBuf> + 'b {
        self.search_path.iter().map(move |dir| Path::new(dir).join(command))
    }

    pub fn is_executable(path: &Path) -> bool {
        path.is_file() && access(path, AccessFlags::X_OK).is_ok()
    }

    /// Search-path matches that are executable files, in search order.
    pub fn executables<'b>(&'b self, command: &'b str) -> impl Iterator<Item = PathBuf> + 'b {
        self.search(command).filter(|p| Self::is_executable(p))
    }
}

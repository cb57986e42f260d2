/// Search path used when none is configured.
pub const DEFAULT_SEARCH_PATH: &[&str] = &["/bin"];

/// Interpreter state that outlives a single line.
///
/// Owned by the main loop and lent to everything that resolves programs.
/// Forked children get their own copy, so only the interpreter process ever
/// mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    search_path: Vec<String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::with_search_path(DEFAULT_SEARCH_PATH.iter().map(|s| s.to_string()).collect())
    }

    pub fn with_search_path(search_path: Vec<String>) -> Self {
        Environment { search_path }
    }

    pub fn search_path(&self) -> &[String] {
        &self.search_path
    }

    /// Replaces the whole list. An empty list is allowed.
    pub fn set_search_path(&mut self, dirs: Vec<String>) {
        log::debug!("search path is now {:?}", dirs);
        self.search_path = dirs;
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_path() {
        let env = Environment::new();
        assert_eq!(env.search_path(), &["/bin".to_string()]);
    }

    #[test]
    fn test_set_search_path_replaces_wholesale() {
        let mut env = Environment::new();
        env.set_search_path(vec!["/usr/bin".into(), "/a".into(), "/a".into()]);
        assert_eq!(env.search_path(), &["/usr/bin", "/a", "/a"]);
        env.set_search_path(Vec::new());
        assert!(env.search_path().is_empty());
    }
}

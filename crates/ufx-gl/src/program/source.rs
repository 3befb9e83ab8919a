use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolves shader source identifiers.
///
/// Program builders accept either literal GLSL or an identifier. An
/// identifier the lookup knows resolves to its text; anything else is used
/// as literal source.
pub trait SourceLookup {
    /// Source text registered under `id`, if any.
    fn find(&self, id: &str) -> Option<String>;

    /// `find(id)`, falling back to `id` itself.
    fn resolve(&self, id_or_source: &str) -> String {
        self.find(id_or_source)
            .unwrap_or_else(|| id_or_source.to_string())
    }
}

/// No lookup: every argument is literal source.
impl SourceLookup for () {
    fn find(&self, _: &str) -> Option<String> {
        None
    }
}

impl SourceLookup for HashMap<String, String> {
    fn find(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

impl SourceLookup for BTreeMap<String, String> {
    fn find(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

impl<T: SourceLookup + ?Sized> SourceLookup for &T {
    fn find(&self, id: &str) -> Option<String> {
        (**self).find(id)
    }
}

/// Shader files under a root directory, addressed by relative file name
/// (`"basic.vert"`).
#[derive(Debug, Clone)]
pub struct DirectorySources {
    root: PathBuf,
}

impl DirectorySources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceLookup for DirectorySources {
    fn find(&self, id: &str) -> Option<String> {
        // Literal GLSL is never a file name.
        if id.is_empty() || id.contains(['\n', '{', ';']) {
            return None;
        }
        let path = self.root.join(id);
        match fs::read_to_string(&path) {
            Ok(text) => {
                log::debug!("shader source {:?} loaded from {}", id, path.display());
                Some(text)
            }
            Err(_) => None,
        }
    }
}

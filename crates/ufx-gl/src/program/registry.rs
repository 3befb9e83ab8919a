use std::collections::BTreeMap;

use crate::context::GlContext;
use crate::error::GlError;

use super::{BuildOptions, Program, SourceLookup};

/// Named programs plus the one most recently made current through the registry.
pub struct Programs<C: GlContext> {
    programs: BTreeMap<String, Program<C>>,
    current: Option<String>,
}

impl<C: GlContext> Default for Programs<C> {
    fn default() -> Self {
        Self {
            programs: BTreeMap::new(),
            current: None,
        }
    }
}

impl<C: GlContext> Programs<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a program and stores it under `name`.
    ///
    /// A program previously stored under `name` is deleted. With
    /// `options.activate` the new program also becomes current.
    pub fn build<S>(
        &mut self,
        gl: &mut C,
        sources: &S,
        name: &str,
        vertex: &str,
        fragment: &str,
        options: BuildOptions,
    ) -> Result<&Program<C>, GlError>
    where
        S: SourceLookup + ?Sized,
    {
        let program = Program::build_with(gl, sources, vertex, fragment, options)?;
        if options.activate {
            self.current = Some(name.to_string());
        } else if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        if let Some(old) = self.programs.insert(name.to_string(), program) {
            log::debug!("program {:?} replaced", name);
            old.delete(gl);
        }
        self.programs
            .get(name)
            .ok_or_else(|| GlError::UnknownProgram(name.to_string()))
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Program<C>> {
        self.programs.get(name)
    }

    /// Makes the named program current.
    pub fn use_named(&mut self, gl: &mut C, name: &str) -> Result<&Program<C>, GlError> {
        let program = self
            .programs
            .get(name)
            .ok_or_else(|| GlError::UnknownProgram(name.to_string()))?;
        program.use_program(gl);
        self.current = Some(name.to_string());
        Ok(program)
    }

    /// Program last made current through this registry.
    pub fn current(&self) -> Option<&Program<C>> {
        self.current.as_deref().and_then(|name| self.programs.get(name))
    }

    #[inline]
    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Deletes the named program. Returns `false` if there was none.
    pub fn remove(&mut self, gl: &mut C, name: &str) -> bool {
        match self.programs.remove(name) {
            Some(program) => {
                if self.current.as_deref() == Some(name) {
                    self.current = None;
                }
                program.delete(gl);
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.programs.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

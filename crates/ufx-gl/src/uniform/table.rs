use std::collections::BTreeMap;
use std::rc::Rc;

use crate::context::ActiveUniform;
use crate::error::GlError;

use super::path::{parse_path, split_array_suffix, Segment};
use super::setter::Setter;
use super::ty::UniformType;

/// Prefix of driver-reserved uniforms that are never addressable by user code.
const RESERVED_PREFIX: &str = "gl_";

/// One node of the uniform tree.
///
/// A node may carry a setter and children at the same time: the base name of
/// an array (`lights`) writes the whole array while its `[i]` children write
/// single elements.
#[derive(Debug)]
pub struct UniformNode<L> {
    setter: Option<Rc<Setter<L>>>,
    children: BTreeMap<Segment, UniformNode<L>>,
}

impl<L> Default for UniformNode<L> {
    fn default() -> Self {
        Self {
            setter: None,
            children: BTreeMap::new(),
        }
    }
}

impl<L> UniformNode<L> {
    /// Setter attached exactly at this node.
    #[inline]
    pub fn setter(&self) -> Option<&Rc<Setter<L>>> {
        self.setter.as_ref()
    }

    #[inline]
    pub fn child(&self, segment: &Segment) -> Option<&UniformNode<L>> {
        self.children.get(segment)
    }

    /// Navigates one `.name` step.
    pub fn field(&self, name: &str) -> Option<&UniformNode<L>> {
        self.child(&Segment::Field(name.to_string()))
    }

    /// Navigates one `[i]` step.
    pub fn index(&self, i: usize) -> Option<&UniformNode<L>> {
        self.child(&Segment::Index(i))
    }

    /// Navigates a relative path (`b[0].c`, `[0].c`). Malformed paths resolve to `None`.
    pub fn node(&self, path: &str) -> Option<&UniformNode<L>> {
        let segments = parse_path(path).ok()?;
        segments.iter().try_fold(self, |node, segment| node.child(segment))
    }

    /// Setter at a relative path.
    pub fn get(&self, path: &str) -> Option<&Rc<Setter<L>>> {
        self.node(path)?.setter()
    }

    pub fn children(&self) -> impl Iterator<Item = (&Segment, &UniformNode<L>)> {
        self.children.iter()
    }

    fn insert(&mut self, segments: &[Segment], setter: Rc<Setter<L>>) {
        match segments.split_first() {
            None => {
                if let Some(previous) = self.setter.replace(setter) {
                    log::debug!("uniform {:?} reported twice; keeping the last", previous.name());
                }
            }
            Some((head, rest)) => self
                .children
                .entry(head.clone())
                .or_default()
                .insert(rest, setter),
        }
    }
}

/// Tree of setters for every addressable uniform name of one program.
///
/// Each setter is stored once, at the leaf its path names; flat and step-wise
/// lookups walk the same nodes, so all routes to a name yield the same `Rc`:
///
/// ```
/// use std::rc::Rc;
/// use ufx_gl::context::{consts, ActiveUniform};
/// use ufx_gl::uniform::UniformTable;
///
/// let uniforms = [ActiveUniform::new("a.b[0].c", consts::FLOAT, 1)];
/// let table = UniformTable::build(&uniforms, |name| Some(name.to_string())).unwrap();
///
/// let flat = table.get("a.b[0].c").unwrap();
/// let partial = table.field("a").unwrap().get("b[0].c").unwrap();
/// let nested = table
///     .field("a").unwrap()
///     .field("b").unwrap()
///     .index(0).unwrap()
///     .field("c").unwrap()
///     .setter().unwrap();
/// assert!(Rc::ptr_eq(flat, partial) && Rc::ptr_eq(flat, nested));
/// ```
#[derive(Debug)]
pub struct UniformTable<L> {
    root: UniformNode<L>,
    setters: Vec<Rc<Setter<L>>>,
}

impl<L> Default for UniformTable<L> {
    fn default() -> Self {
        Self {
            root: UniformNode::default(),
            setters: Vec::new(),
        }
    }
}

impl<L> UniformTable<L> {
    /// Builds the table from reflected uniforms.
    ///
    /// `locate` resolves an addressable name to its location. A name ending in
    /// `[k]` expands to the base name (covering all `size` elements) plus
    /// `base[0]..base[size-1]`.
    pub fn build<F>(uniforms: &[ActiveUniform], mut locate: F) -> Result<Self, GlError>
    where
        F: FnMut(&str) -> Option<L>,
    {
        let mut table = Self::default();

        for info in uniforms {
            if info.name.starts_with(RESERVED_PREFIX) {
                log::debug!("skipping reserved uniform {:?}", info.name);
                continue;
            }
            let ty = UniformType::from_raw(info.raw_type)?;

            match split_array_suffix(&info.name) {
                Some((base, _)) => {
                    let size = info.size.max(1);
                    let location = locate(base)
                        .or_else(|| locate(&info.name))
                        .ok_or_else(|| GlError::MissingLocation(base.to_string()))?;
                    table.attach(base, ty, size, location)?;

                    for i in 0..size {
                        let name = format!("{}[{}]", base, i);
                        let location = locate(&name)
                            .ok_or_else(|| GlError::MissingLocation(name.clone()))?;
                        table.attach(&name, ty, 1, location)?;
                    }
                }
                None => {
                    let location = locate(&info.name)
                        .ok_or_else(|| GlError::MissingLocation(info.name.clone()))?;
                    table.attach(&info.name, ty, 1, location)?;
                }
            }
        }

        log::debug!(
            "uniform table: {} active uniforms, {} addressable names",
            uniforms.len(),
            table.setters.len()
        );
        Ok(table)
    }

    fn attach(
        &mut self,
        name: &str,
        ty: UniformType,
        array_len: usize,
        location: L,
    ) -> Result<(), GlError> {
        let segments = parse_path(name)?;
        let reason = match segments.first() {
            None => Some("empty name"),
            Some(Segment::Index(_)) => Some("name must start with a field"),
            Some(Segment::Field(_)) => None,
        };
        if let Some(reason) = reason {
            return Err(GlError::MalformedName { name: name.to_string(), reason });
        }
        let setter = Rc::new(Setter::new(name, ty, array_len, location));
        self.root.insert(&segments, Rc::clone(&setter));
        self.setters.push(setter);
        Ok(())
    }

    #[inline]
    pub fn root(&self) -> &UniformNode<L> {
        &self.root
    }

    /// Setter for a full path such as `lights[1].color`.
    #[inline]
    pub fn get(&self, path: &str) -> Option<&Rc<Setter<L>>> {
        self.root.get(path)
    }

    #[inline]
    pub fn node(&self, path: &str) -> Option<&UniformNode<L>> {
        self.root.node(path)
    }

    #[inline]
    pub fn field(&self, name: &str) -> Option<&UniformNode<L>> {
        self.root.field(name)
    }

    /// All setters in reflection order (base names before their elements).
    pub fn setters(&self) -> impl Iterator<Item = &Rc<Setter<L>>> {
        self.setters.iter()
    }

    /// Addressable names in reflection order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.setters.iter().map(|s| s.name())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.setters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.setters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::consts;
    use crate::uniform::SetterForm;

    fn build(uniforms: &[ActiveUniform]) -> UniformTable<String> {
        UniformTable::build(uniforms, |name| Some(name.to_string())).unwrap()
    }

    fn u(name: &str, raw_type: u32, size: usize) -> ActiveUniform {
        ActiveUniform::new(name, raw_type, size)
    }

    // ── path attachment ───────────────────────────────────────────────────

    #[test]
    fn every_route_yields_the_same_setter() {
        let table = build(&[u("a.b[0].c", consts::FLOAT, 1)]);

        let flat = table.get("a.b[0].c").unwrap();
        let partial = table.field("a").unwrap().get("b[0].c").unwrap();
        let deeper = table.node("a.b").unwrap().get("[0].c").unwrap();
        let nested = table
            .field("a").unwrap()
            .field("b").unwrap()
            .index(0).unwrap()
            .field("c").unwrap()
            .setter().unwrap();

        assert!(Rc::ptr_eq(flat, partial));
        assert!(Rc::ptr_eq(flat, deeper));
        assert!(Rc::ptr_eq(flat, nested));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn intermediate_nodes_have_no_setter() {
        let table = build(&[u("material.diffuse", consts::FLOAT_VEC3, 1)]);
        assert!(table.get("material").is_none());
        assert!(table.field("material").is_some());
    }

    #[test]
    fn unknown_and_malformed_lookups_miss() {
        let table = build(&[u("u_time", consts::FLOAT, 1)]);
        assert!(table.get("u_missing").is_none());
        assert!(table.get("u_time[0]").is_none());
        assert!(table.get("u_time..x").is_none());
    }

    // ── array expansion ───────────────────────────────────────────────────

    #[test]
    fn array_expands_to_base_and_elements() {
        let table = build(&[u("arr[0]", consts::FLOAT_VEC3, 4)]);
        let names: Vec<_> = table.names().collect();
        assert_eq!(names, ["arr", "arr[0]", "arr[1]", "arr[2]", "arr[3]"]);

        let base = table.get("arr").unwrap();
        assert_eq!(base.array_len(), 4);
        assert_eq!(base.expected_len(SetterForm::Vector), 12);

        let element = table.field("arr").unwrap().index(2).unwrap().setter().unwrap();
        assert_eq!(element.expected_len(SetterForm::Vector), 3);
        assert!(Rc::ptr_eq(element, table.get("arr[2]").unwrap()));
    }

    #[test]
    fn base_location_prefers_base_name() {
        let table = build(&[u("w[0]", consts::FLOAT, 2)]);
        assert_eq!(table.get("w").unwrap().location(), "w");
    }

    #[test]
    fn struct_array_members() {
        let table = build(&[
            u("lights[0].color", consts::FLOAT_VEC3, 1),
            u("lights[0].power", consts::FLOAT, 1),
            u("lights[1].color", consts::FLOAT_VEC3, 1),
            u("lights[1].weights[0]", consts::FLOAT, 3),
        ]);
        let light1 = table.field("lights").unwrap().index(1).unwrap();
        assert!(light1.get("color").is_some());
        assert_eq!(light1.get("weights").unwrap().array_len(), 3);
        assert!(light1.get("weights[2]").is_some());
        assert!(table.get("lights[0].weights").is_none());
    }

    // ── errors ────────────────────────────────────────────────────────────

    #[test]
    fn unknown_type_fails() {
        let err = UniformTable::build(&[u("x", 0xBEEF, 1)], |n| Some(n.to_string())).unwrap_err();
        assert_eq!(err, GlError::UnrecognizedType(0xBEEF));
    }

    #[test]
    fn malformed_name_fails() {
        let err = UniformTable::build(&[u("a..b", consts::FLOAT, 1)], |n| Some(n.to_string()))
            .unwrap_err();
        assert!(matches!(err, GlError::MalformedName { .. }));

        for name in ["[0].c", "[1][0]"] {
            let err = UniformTable::build(&[u(name, consts::FLOAT, 2)], |n| Some(n.to_string()))
                .unwrap_err();
            assert!(
                matches!(err, GlError::MalformedName { reason: "name must start with a field", .. }),
                "{name}: {err:?}"
            );
        }
    }

    #[test]
    fn missing_location_fails() {
        let err = UniformTable::<String>::build(&[u("x", consts::FLOAT, 1)], |_| None).unwrap_err();
        assert_eq!(err, GlError::MissingLocation("x".into()));
    }

    #[test]
    fn reserved_names_are_skipped() {
        let table = build(&[
            u("gl_DepthRange.near", consts::FLOAT, 1),
            u("u_time", consts::FLOAT, 1),
        ]);
        assert_eq!(table.names().collect::<Vec<_>>(), ["u_time"]);
    }
}

use std::fmt;

use crate::context::GlContext;
use crate::error::GlError;

use super::ty::{ComponentKind, UniformType};
use super::value::{Scalar, UniformValue};

/// The write entry point a setter forwards to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SetterForm {
    /// Spread components: `uniform{N}{f,i}(loc, x, y, ...)`.
    Components,
    /// One flat sequence: `uniform{N}{f,i}v(loc, [..])`.
    Vector,
    /// One flat sequence: `uniformMatrix{N}fv(loc, false, [..])`.
    Matrix,
}

impl fmt::Display for SetterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SetterForm::Components => "component",
            SetterForm::Vector => "vector",
            SetterForm::Matrix => "matrix",
        })
    }
}

const MATRIX_FORMS: &[SetterForm] = &[SetterForm::Matrix];
const VECTOR_FORMS: &[SetterForm] = &[SetterForm::Components, SetterForm::Vector];

/// Validated writer for one addressable uniform name.
///
/// `array_len` is the number of array elements the name covers: the declared
/// length for a whole-array base name, 1 for a single element or a non-array.
///
/// Setters never write partial data: every call checks the value count for
/// its form first and fails with [`GlError::Arity`] on mismatch.
#[derive(Debug, Clone)]
pub struct Setter<L> {
    name: String,
    ty: UniformType,
    array_len: usize,
    location: L,
}

impl<L> Setter<L> {
    pub fn new(name: impl Into<String>, ty: UniformType, array_len: usize, location: L) -> Self {
        Self {
            name: name.into(),
            ty,
            array_len: array_len.max(1),
            location,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn ty(&self) -> UniformType {
        self.ty
    }

    #[inline]
    pub fn array_len(&self) -> usize {
        self.array_len
    }

    #[inline]
    pub fn location(&self) -> &L {
        &self.location
    }

    /// Forms available for this uniform's type. Matrices only get `Matrix`.
    pub fn forms(&self) -> &'static [SetterForm] {
        if self.ty.is_matrix() { MATRIX_FORMS } else { VECTOR_FORMS }
    }

    /// Form used by [`Setter::set`].
    pub fn default_form(&self) -> SetterForm {
        if self.ty.is_matrix() {
            SetterForm::Matrix
        } else if self.ty.size() == 1 && self.array_len == 1 {
            SetterForm::Components
        } else {
            SetterForm::Vector
        }
    }

    /// Value count `form` accepts.
    ///
    /// Component setters always take one element; sequence forms cover every
    /// element the name addresses.
    pub fn expected_len(&self, form: SetterForm) -> usize {
        match form {
            SetterForm::Components => self.ty.size(),
            SetterForm::Vector | SetterForm::Matrix => self.ty.components() * self.array_len,
        }
    }

    /// Writes `values` through the default form.
    pub fn set<C>(&self, gl: &mut C, values: &[Scalar]) -> Result<(), GlError>
    where
        C: GlContext<UniformLocation = L>,
    {
        self.write(gl, self.default_form(), values)
    }

    /// `uniform{N}{f,i}`: exactly `size` values.
    pub fn set_components<C>(&self, gl: &mut C, values: &[Scalar]) -> Result<(), GlError>
    where
        C: GlContext<UniformLocation = L>,
    {
        self.write(gl, SetterForm::Components, values)
    }

    /// `uniform{N}{f,i}v`: exactly `size * array_len` values.
    pub fn set_vector<C>(&self, gl: &mut C, values: &[Scalar]) -> Result<(), GlError>
    where
        C: GlContext<UniformLocation = L>,
    {
        self.write(gl, SetterForm::Vector, values)
    }

    /// `uniformMatrix{N}fv`: exactly `size² * array_len` values, column-major.
    pub fn set_matrix<C>(&self, gl: &mut C, values: &[Scalar]) -> Result<(), GlError>
    where
        C: GlContext<UniformLocation = L>,
    {
        self.write(gl, SetterForm::Matrix, values)
    }

    /// Writes a bulk-set value through the default form.
    ///
    /// A lone scalar is only accepted when the default form is a single component.
    pub fn set_value<C>(&self, gl: &mut C, value: &UniformValue) -> Result<(), GlError>
    where
        C: GlContext<UniformLocation = L>,
    {
        let form = self.default_form();
        if let UniformValue::Scalar(_) = value {
            if form != SetterForm::Components {
                return Err(GlError::NotASequence {
                    name: self.name.clone(),
                    type_name: self.ty.name(),
                    expected: self.expected_len(form),
                });
            }
        }
        self.write(gl, form, value.as_slice())
    }

    /// Checks that `form` exists for this type and `actual` values fit it.
    pub fn check(&self, form: SetterForm, actual: usize) -> Result<(), GlError> {
        if !self.forms().contains(&form) {
            return Err(GlError::SetterUnavailable {
                name: self.name.clone(),
                type_name: self.ty.name(),
                form,
            });
        }
        let expected = self.expected_len(form);
        if actual != expected {
            return Err(GlError::Arity {
                name: self.name.clone(),
                type_name: self.ty.name(),
                form,
                expected,
                actual,
            });
        }
        Ok(())
    }

    fn write<C>(&self, gl: &mut C, form: SetterForm, values: &[Scalar]) -> Result<(), GlError>
    where
        C: GlContext<UniformLocation = L>,
    {
        self.check(form, values.len())?;

        let size = self.ty.size();
        match (form, self.ty.kind()) {
            (SetterForm::Components, ComponentKind::Float) => {
                gl.uniform_f32(&self.location, &floats(values));
            }
            (SetterForm::Components, ComponentKind::Int) => {
                gl.uniform_i32(&self.location, &ints(values));
            }
            (SetterForm::Vector, ComponentKind::Float) => {
                gl.uniform_f32_slice(&self.location, size, &floats(values));
            }
            (SetterForm::Vector, ComponentKind::Int) => {
                gl.uniform_i32_slice(&self.location, size, &ints(values));
            }
            // check() only admits Matrix for matrix types, which are all float.
            (SetterForm::Matrix, _) => {
                gl.uniform_matrix_f32_slice(&self.location, size, false, &floats(values));
            }
        }
        Ok(())
    }
}

fn floats(values: &[Scalar]) -> Vec<f32> {
    values.iter().map(|v| v.as_f32()).collect()
}

fn ints(values: &[Scalar]) -> Vec<i32> {
    values.iter().map(|v| v.as_i32()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{HeadlessContext, UniformData};
    use crate::scalars;

    fn values(n: usize) -> Vec<Scalar> {
        (0..n).map(|i| Scalar::Float(i as f32)).collect()
    }

    /// One-uniform program on a fresh headless context.
    fn setup(decl: &str) -> (HeadlessContext, crate::program::Program<HeadlessContext>) {
        let mut gl = HeadlessContext::new();
        let vs = format!("{decl}\nvoid main() {{ gl_Position = vec4(0.0); }}");
        let fs = "void main() { gl_FragColor = vec4(1.0); }";
        let prog = crate::program::Program::build(&mut gl, &vs, fs).unwrap();
        (gl, prog)
    }

    // ── component form arity ──────────────────────────────────────────────

    #[test]
    fn components_accept_exactly_size() {
        let types = [
            ("float", 1),
            ("vec2", 2),
            ("vec3", 3),
            ("vec4", 4),
            ("int", 1),
            ("ivec2", 2),
            ("ivec3", 3),
            ("ivec4", 4),
            ("bool", 1),
            ("bvec4", 4),
            ("sampler2D", 1),
        ];
        for (glsl, size) in types {
            let (mut gl, prog) = setup(&format!("uniform {glsl} u;"));
            let setter = prog.setter("u").unwrap();
            assert!(setter.set_components(&mut gl, &values(size)).is_ok(), "{glsl}");
            let short = setter.set_components(&mut gl, &values(size - 1));
            assert!(matches!(short, Err(GlError::Arity { expected, actual, .. })
                if expected == size && actual == size - 1), "{glsl}");
            let long = setter.set_components(&mut gl, &values(size + 1));
            assert!(matches!(long, Err(GlError::Arity { .. })), "{glsl}");
        }
    }

    // ── matrix types ──────────────────────────────────────────────────────

    #[test]
    fn matrices_only_have_matrix_form() {
        for (glsl, dim) in [("mat2", 2), ("mat3", 3), ("mat4", 4)] {
            let (mut gl, prog) = setup(&format!("uniform {glsl} m;"));
            let setter = prog.setter("m").unwrap();
            assert_eq!(setter.forms(), &[SetterForm::Matrix]);
            assert_eq!(setter.default_form(), SetterForm::Matrix);

            let err = setter.set_components(&mut gl, &values(dim)).unwrap_err();
            assert!(matches!(err, GlError::SetterUnavailable { form: SetterForm::Components, .. }));
            let err = setter.set_vector(&mut gl, &values(dim * dim)).unwrap_err();
            assert!(matches!(err, GlError::SetterUnavailable { form: SetterForm::Vector, .. }));

            setter.set_matrix(&mut gl, &values(dim * dim)).unwrap();
            assert!(setter.set(&mut gl, &values(dim * dim - 1)).is_err());
        }
    }

    #[test]
    fn non_matrix_has_no_matrix_form() {
        let (mut gl, prog) = setup("uniform vec4 v;");
        let err = prog.setter("v").unwrap().set_matrix(&mut gl, &values(4)).unwrap_err();
        assert!(matches!(err, GlError::SetterUnavailable { form: SetterForm::Matrix, .. }));
    }

    // ── whole-array lengths ───────────────────────────────────────────────

    #[test]
    fn whole_array_expects_every_element() {
        let (mut gl, prog) = setup("uniform vec3 arr[4];");
        let base = prog.setter("arr").unwrap();
        assert_eq!(base.array_len(), 4);
        assert_eq!(base.expected_len(SetterForm::Vector), 12);
        assert!(base.set_vector(&mut gl, &values(12)).is_ok());
        assert!(base.set(&mut gl, &values(3)).is_err());
        // The component form still writes one element.
        assert!(base.set_components(&mut gl, &values(3)).is_ok());

        let element = prog.setter("arr[2]").unwrap();
        assert_eq!(element.expected_len(SetterForm::Vector), 3);
        assert!(element.set(&mut gl, &values(3)).is_ok());
        assert!(element.set(&mut gl, &values(12)).is_err());
    }

    #[test]
    fn float_array_default_is_vector() {
        let (mut gl, prog) = setup("uniform float w[3];");
        let base = prog.setter("w").unwrap();
        assert_eq!(base.default_form(), SetterForm::Vector);
        base.set(&mut gl, &scalars![0.25f32, 0.5f32, 0.25f32]).unwrap();
        assert_eq!(
            gl.uniform_value(prog.handle(), "w"),
            Some(UniformData::Float(vec![0.25, 0.5, 0.25]))
        );
        assert_eq!(gl.uniform_value(prog.handle(), "w[2]"), Some(UniformData::Float(vec![0.25])));

        prog.setter("w[1]").unwrap().set(&mut gl, &scalars![1.0f32]).unwrap();
        assert_eq!(
            gl.uniform_value(prog.handle(), "w"),
            Some(UniformData::Float(vec![0.25, 1.0, 0.25]))
        );
    }

    #[test]
    fn whole_array_matches_element_writes() {
        let (mut whole, a) = setup("uniform vec2 pts[2];");
        a.setter("pts").unwrap().set(&mut whole, &scalars![1.0f32, 2.0f32, 3.0f32, 4.0f32]).unwrap();

        let (mut each, b) = setup("uniform vec2 pts[2];");
        b.setter("pts[0]").unwrap().set(&mut each, &scalars![1.0f32, 2.0f32]).unwrap();
        b.setter("pts[1]").unwrap().set(&mut each, &scalars![3.0f32, 4.0f32]).unwrap();

        for name in ["pts", "pts[0]", "pts[1]"] {
            assert_eq!(
                whole.uniform_value(a.handle(), name),
                each.uniform_value(b.handle(), name),
                "{name}"
            );
        }
    }

    // ── conversions + error content ───────────────────────────────────────

    #[test]
    fn int_uniform_receives_ints() {
        let (mut gl, prog) = setup("uniform ivec2 cell;");
        prog.setter("cell").unwrap().set(&mut gl, &scalars![3, true]).unwrap();
        assert_eq!(
            gl.uniform_value(prog.handle(), "cell"),
            Some(UniformData::Int(vec![3, 1]))
        );
    }

    #[test]
    fn lone_scalar_rejected_for_vectors() {
        let (mut gl, prog) = setup("uniform vec2 offset;");
        let err = prog
            .setter("offset")
            .unwrap()
            .set_value(&mut gl, &UniformValue::from(1.0f32))
            .unwrap_err();
        assert_eq!(
            err,
            GlError::NotASequence { name: "offset".into(), type_name: "FLOAT_VEC2", expected: 2 }
        );
    }

    #[test]
    fn arity_error_names_uniform_and_type() {
        let (mut gl, prog) = setup("uniform vec3 u_color;");
        let err = prog.setter("u_color").unwrap().set(&mut gl, &values(2)).unwrap_err();
        assert_eq!(
            err,
            GlError::Arity {
                name: "u_color".into(),
                type_name: "FLOAT_VEC3",
                form: SetterForm::Vector,
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn failed_check_writes_nothing() {
        let (mut gl, prog) = setup("uniform vec2 offset;");
        let _ = prog.setter("offset").unwrap().set(&mut gl, &values(5));
        assert_eq!(gl.uniform_value(prog.handle(), "offset"), None);
    }
}

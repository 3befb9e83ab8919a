//! Minimal GLSL declaration scanner for the headless backend.
//!
//! Understands just enough of the language to stand in for a driver:
//! comments, `struct` blocks, and `uniform` / `attribute` declarations with
//! optional precision qualifiers and array sizes. Bodies are not parsed.

use std::collections::BTreeMap;

use crate::context::{consts, ActiveUniform};

#[derive(Debug, Clone, Eq, PartialEq)]
struct Declarator {
    ty: String,
    name: String,
    array: Option<usize>,
}

/// Result of a successful scan.
#[derive(Debug, Default, Clone)]
pub(super) struct Declarations {
    pub uniforms: Vec<ActiveUniform>,
    pub attributes: Vec<String>,
}

/// Checks structure and scans declarations. `Err` carries an info-log line.
pub(super) fn scan(source: &str) -> Result<Declarations, String> {
    let code = strip_comments(source);
    if code.trim().is_empty() {
        return Err("ERROR: 0:1: '' : syntax error: empty shader".into());
    }
    check_balance(&code)?;
    if !declares_main(&code) {
        return Err("ERROR: 0:1: 'main' : function not defined".into());
    }

    let (structs, rest) = extract_structs(&code)?;
    let mut decls = Declarations::default();

    for statement in top_level_statements(&rest) {
        let mut tokens = statement.split_whitespace();
        let Some(storage) = tokens.next() else { continue };
        let is_uniform = storage == "uniform";
        if !is_uniform && storage != "attribute" {
            continue;
        }
        let tokens: Vec<&str> = tokens
            .filter(|t| !matches!(*t, "lowp" | "mediump" | "highp"))
            .collect();
        let Some((ty, names)) = tokens.split_first() else {
            return Err(format!("ERROR: '{}' : syntax error", statement.trim()));
        };
        for declarator in parse_declarators(ty, &names.concat())? {
            if is_uniform {
                expand(&declarator.name, &declarator, &structs, &mut decls.uniforms);
            } else {
                decls.attributes.push(declarator.name);
            }
        }
    }

    Ok(decls)
}

fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("//") {
            rest = after.find('\n').map_or("", |i| &after[i..]);
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.find("*/").map_or("", |i| &after[i + 2..]);
            out.push(' ');
        } else {
            let ch = rest.chars().next().unwrap_or(' ');
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    out
}

fn check_balance(code: &str) -> Result<(), String> {
    let mut stack = Vec::new();
    for (line_no, line) in code.lines().enumerate() {
        for ch in line.chars() {
            match ch {
                '{' | '(' | '[' => stack.push(ch),
                '}' | ')' | ']' => {
                    let open = match ch {
                        '}' => '{',
                        ')' => '(',
                        _ => '[',
                    };
                    if stack.pop() != Some(open) {
                        return Err(format!("ERROR: 0:{}: '{}' : syntax error", line_no + 1, ch));
                    }
                }
                _ => {}
            }
        }
    }
    match stack.last() {
        Some(open) => Err(format!("ERROR: 0:{}: '{}' : unexpected end of file", code.lines().count(), open)),
        None => Ok(()),
    }
}

fn declares_main(code: &str) -> bool {
    let words: Vec<&str> = code
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .collect();
    words.windows(2).any(|w| w == ["void", "main"])
}

/// Pulls `struct Name { fields };` blocks out of `code`.
fn extract_structs(code: &str) -> Result<(BTreeMap<String, Vec<Declarator>>, String), String> {
    let mut structs = BTreeMap::new();
    let mut rest = String::new();
    let mut cursor = code;

    while let Some(start) = find_keyword(cursor, "struct") {
        rest.push_str(&cursor[..start]);
        let after = &cursor[start + "struct".len()..];
        let open = after.find('{').ok_or("ERROR: 'struct' : syntax error")?;
        let name = match after[..open].trim() {
            "" => format!("<anonymous#{}>", structs.len()),
            named => named.to_string(),
        };
        let close = after[open..].find('}').ok_or("ERROR: 'struct' : missing '}'")? + open;

        let mut fields = Vec::new();
        for field in after[open + 1..close].split(';') {
            let mut tokens = field.split_whitespace().filter(|t| !matches!(*t, "lowp" | "mediump" | "highp"));
            let Some(ty) = tokens.next() else { continue };
            let names: String = tokens.collect();
            fields.extend(parse_declarators(ty, &names)?);
        }
        // Declarators between `}` and `;` (`uniform struct S { .. } s;`) stay
        // behind as an ordinary `S s;` statement.
        let tail = &after[close + 1..];
        let end = tail
            .find(';')
            .ok_or_else(|| format!("ERROR: '{}' : missing ';' after struct definition", name))?;
        let declarators = tail[..end].trim();
        if !declarators.is_empty() {
            rest.push_str(&format!(" {} {};", name, declarators));
        }
        structs.insert(name, fields);
        cursor = &tail[end + 1..];
    }
    rest.push_str(cursor);
    Ok((structs, rest))
}

fn find_keyword(code: &str, keyword: &str) -> Option<usize> {
    let is_ident = |c: char| c.is_ascii_alphanumeric() || c == '_';
    code.match_indices(keyword).map(|(i, _)| i).find(|&i| {
        let before = code[..i].chars().next_back().is_none_or(|c| !is_ident(c));
        let after = code[i + keyword.len()..].chars().next().is_none_or(|c| !is_ident(c));
        before && after
    })
}

/// Statements outside any `{}` block.
fn top_level_statements(code: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for ch in code.chars() {
        match ch {
            '{' => {
                depth += 1;
                current.clear();
            }
            '}' => {
                depth = depth.saturating_sub(1);
                current.clear();
            }
            ';' if depth == 0 => out.push(std::mem::take(&mut current)),
            _ if depth == 0 => current.push(ch),
            _ => {}
        }
    }
    out
}

/// `a, b[4]` → declarators of type `ty`. Whitespace has already been removed.
fn parse_declarators(ty: &str, names: &str) -> Result<Vec<Declarator>, String> {
    names
        .split(',')
        .filter(|n| !n.is_empty())
        .map(|n| {
            let (name, array) = match n.find('[') {
                Some(open) => {
                    let len = n[open + 1..]
                        .strip_suffix(']')
                        .and_then(|d| d.parse::<usize>().ok())
                        .filter(|&d| d > 0)
                        .ok_or_else(|| format!("ERROR: '{}' : array size must be a positive integer", n))?;
                    (&n[..open], Some(len))
                }
                None => (n, None),
            };
            Ok(Declarator { ty: ty.to_string(), name: name.to_string(), array })
        })
        .collect()
}

fn glsl_type(ty: &str) -> Option<u32> {
    Some(match ty {
        "float" => consts::FLOAT,
        "vec2" => consts::FLOAT_VEC2,
        "vec3" => consts::FLOAT_VEC3,
        "vec4" => consts::FLOAT_VEC4,
        "int" => consts::INT,
        "ivec2" => consts::INT_VEC2,
        "ivec3" => consts::INT_VEC3,
        "ivec4" => consts::INT_VEC4,
        "bool" => consts::BOOL,
        "bvec2" => consts::BOOL_VEC2,
        "bvec3" => consts::BOOL_VEC3,
        "bvec4" => consts::BOOL_VEC4,
        "mat2" => consts::FLOAT_MAT2,
        "mat3" => consts::FLOAT_MAT3,
        "mat4" => consts::FLOAT_MAT4,
        "sampler2D" => consts::SAMPLER_2D,
        "samplerCube" => consts::SAMPLER_CUBE,
        _ => return None,
    })
}

/// Flattens a declarator into driver-style active uniforms.
///
/// Basic-type arrays report one entry named `x[0]`; struct members expand to
/// one entry per leaf (`s[1].field`).
fn expand(
    prefix: &str,
    decl: &Declarator,
    structs: &BTreeMap<String, Vec<Declarator>>,
    out: &mut Vec<ActiveUniform>,
) {
    if let Some(fields) = structs.get(&decl.ty) {
        let elements: Vec<String> = match decl.array {
            Some(n) => (0..n).map(|i| format!("{}[{}]", prefix, i)).collect(),
            None => vec![prefix.to_string()],
        };
        for element in elements {
            for field in fields {
                expand(&format!("{}.{}", element, field.name), field, structs, out);
            }
        }
    } else if let Some(raw) = glsl_type(&decl.ty) {
        match decl.array {
            Some(n) => out.push(ActiveUniform::new(format!("{}[0]", prefix), raw, n)),
            None => out.push(ActiveUniform::new(prefix, raw, 1)),
        }
    } else {
        log::debug!("headless: uniform {:?} has unknown type {:?}", prefix, decl.ty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniforms(src: &str) -> Vec<(String, u32, usize)> {
        scan(src)
            .unwrap()
            .uniforms
            .into_iter()
            .map(|u| (u.name, u.raw_type, u.size))
            .collect()
    }

    #[test]
    fn plain_and_array_uniforms() {
        let src = "
            precision mediump float;
            uniform highp vec3 u_color; // tint
            uniform float w[3], u_time;
            void main() { float x = 1.0; }
        ";
        assert_eq!(
            uniforms(src),
            [
                ("u_color".to_string(), consts::FLOAT_VEC3, 1),
                ("w[0]".to_string(), consts::FLOAT, 3),
                ("u_time".to_string(), consts::FLOAT, 1),
            ]
        );
    }

    #[test]
    fn struct_uniforms_flatten() {
        let src = "
            struct Light { vec3 color; float power; float weights[2]; };
            uniform Light lights[2];
            void main() {}
        ";
        let names: Vec<String> = uniforms(src).into_iter().map(|u| u.0).collect();
        assert_eq!(
            names,
            [
                "lights[0].color",
                "lights[0].power",
                "lights[0].weights[0]",
                "lights[1].color",
                "lights[1].power",
                "lights[1].weights[0]",
            ]
        );
    }

    #[test]
    fn inline_struct_uniforms_are_declared() {
        let src = "
            uniform struct Surface { vec3 tint; float gloss; } surface, layers[2];
            uniform struct { int mode; } flags;
            void main() {}
        ";
        let names: Vec<String> = uniforms(src).into_iter().map(|u| u.0).collect();
        assert_eq!(
            names,
            [
                "surface.tint",
                "surface.gloss",
                "layers[0].tint",
                "layers[0].gloss",
                "layers[1].tint",
                "layers[1].gloss",
                "flags.mode",
            ]
        );
    }

    #[test]
    fn struct_without_semicolon_fails() {
        let err = scan("struct S { float a; } void main() {}").unwrap_err();
        assert!(err.contains("missing ';'"), "{err}");
    }

    #[test]
    fn attributes_are_collected() {
        let decls = scan("attribute vec2 a_pos; /* uv */ attribute vec2 a_uv; void main() {}").unwrap();
        assert_eq!(decls.attributes, ["a_pos", "a_uv"]);
    }

    #[test]
    fn declarations_inside_bodies_are_ignored() {
        assert!(uniforms("void main() { vec2 uniform_like; }").is_empty());
    }

    #[test]
    fn structural_errors() {
        assert!(scan("").is_err());
        assert!(scan("void main() {").is_err());
        assert!(scan("void main() )").is_err());
        assert!(scan("void notmain() {}").is_err());
        assert!(scan("uniform float x[0]; void main() {}").is_err());
    }
}

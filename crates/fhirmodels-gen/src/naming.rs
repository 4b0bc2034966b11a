//! Name normalization between FHIR element paths, descriptor field
//! names and emitted Rust identifiers.

/// Rust keywords that need raw-identifier escaping when they show up as
/// field names (`type`, `use`, `abstract` are common in FHIR).
const RESERVED: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "final", "fn", "for", "if", "impl", "in", "let", "loop",
    "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return", "static",
    "struct", "trait", "true", "false", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

/// Uppercase the first character of a path segment.
pub fn title_case(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Normalize a path segment into a descriptor field name.
///
/// Well-known initialisms keep their casing; everything else is
/// title-cased. A `[x]` choice marker is stripped first.
pub fn field_name(segment: &str) -> String {
    let segment = segment.strip_suffix("[x]").unwrap_or(segment);
    match segment {
        "id" => "ID".to_string(),
        "url" => "URL".to_string(),
        "uri" => "URI".to_string(),
        other => title_case(other),
    }
}

/// Resolve a content reference (`#Patient.contact`) to the synthetic
/// type name of the referenced backbone element (`PatientContact`).
pub fn content_reference_type_name(reference: &str) -> String {
    reference
        .trim_start_matches('#')
        .split('.')
        .map(field_name)
        .collect()
}

/// Convert a JSON property name to the Rust field identifier used in
/// emitted code, escaping keywords as raw identifiers.
pub fn rust_field_ident(json_name: &str) -> String {
    let mut out = String::new();
    for (i, c) in json_name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    if RESERVED.contains(&out.as_str()) {
        format!("r#{out}")
    } else {
        out
    }
}

/// Convert a type name to the snake_case file stem of its emitted file.
pub fn file_stem(type_name: &str) -> String {
    let mut out = String::new();
    for (i, c) in type_name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Build a Rust enum variant name from a code string.
///
/// Codes can contain anything (`not-found`, `<=`, `4.0.1`); alphanumeric
/// runs are title-cased and concatenated, and a leading digit gets an
/// `N` prefix so the result is a valid identifier. Codes with no
/// alphanumeric content at all fall back to a positional name.
pub fn variant_name(code: &str, position: usize) -> String {
    let mut out = String::new();
    for part in code.split(|c: char| !c.is_alphanumeric()) {
        if !part.is_empty() {
            out.push_str(&title_case(part));
        }
    }
    if out.is_empty() {
        return format!("Code{position}");
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, 'N');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_special_cases() {
        assert_eq!(field_name("id"), "ID");
        assert_eq!(field_name("url"), "URL");
        assert_eq!(field_name("uri"), "URI");
        assert_eq!(field_name("birthDate"), "BirthDate");
        assert_eq!(field_name("value[x]"), "Value");
    }

    #[test]
    fn test_content_reference_resolution() {
        assert_eq!(content_reference_type_name("#Patient.contact"), "PatientContact");
        assert_eq!(
            content_reference_type_name("#ValueSet.compose.include"),
            "ValueSetComposeInclude"
        );
    }

    #[test]
    fn test_rust_field_ident_escapes_keywords() {
        assert_eq!(rust_field_ident("type"), "r#type");
        assert_eq!(rust_field_ident("use"), "r#use");
        assert_eq!(rust_field_ident("birthDate"), "birth_date");
        assert_eq!(rust_field_ident("status"), "status");
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("Patient"), "patient");
        assert_eq!(file_stem("OperationOutcome"), "operation_outcome");
        assert_eq!(file_stem("FooBaz"), "foo_baz");
    }

    #[test]
    fn test_variant_name_sanitizes_codes() {
        assert_eq!(variant_name("male", 0), "Male");
        assert_eq!(variant_name("not-found", 0), "NotFound");
        assert_eq!(variant_name("4.0.1", 0), "N401");
        assert_eq!(variant_name("<=", 3), "Code3");
    }
}

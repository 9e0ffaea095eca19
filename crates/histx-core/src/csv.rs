//! RFC 4180 field quoting.

/// Apply RFC 4180 quoting to a single field.
///
/// The value is wrapped in double quotes, with every embedded double quote
/// doubled, when it contains the delimiter, a double quote, a carriage
/// return, or a line feed. Absent values map to the empty string, never to a
/// "null" literal. Pure and total.
pub fn escape_csv_field(value: Option<&str>, delimiter: char) -> String {
    let Some(value) = value else {
        return String::new();
    };

    let needs_quoting = value.contains(delimiter)
        || value.contains('"')
        || value.contains('\r')
        || value.contains('\n');
    if !needs_quoting {
        return value.to_owned();
    }

    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    for ch in value.chars() {
        if ch == '"' {
            escaped.push('"');
        }
        escaped.push(ch);
    }
    escaped.push('"');
    escaped
}

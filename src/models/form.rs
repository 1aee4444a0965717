use std::collections::{BTreeMap, HashMap};

/// Field name to message, in field-name order.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Raw text fields of a submitted form, keyed by field name.
pub type FormFields = HashMap<String, String>;

pub(crate) fn take_field(fields: &mut FormFields, name: &str) -> Option<String> {
    fields.remove(name)
}

/// Trimmed, non-empty value or `None`.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub(crate) fn required(field: &'static str, errors: &mut FieldErrors) {
    errors.insert(field, format!("The {} field is required.", field));
}

pub(crate) fn invalid(field: &'static str, errors: &mut FieldErrors) {
    errors.insert(field, format!("The value is not valid for {}.", field));
}

/// Parses an optional integer field. Blank means `None`.
pub(crate) fn parse_optional_i32(
    field: &'static str,
    value: &Option<String>,
    errors: &mut FieldErrors,
) -> Option<i32> {
    let raw = non_blank(value)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            invalid(field, errors);
            None
        }
    }
}

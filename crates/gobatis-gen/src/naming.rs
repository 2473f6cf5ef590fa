//! Identifier casing for derived Go names and serialized keys.
//!
//! `to_identifier_case` produces exported Go names (`user_account` ->
//! `UserAccount`); `to_wire_case` produces snake_case keys and file stems
//! (`UserAccount` -> `user_account`). They invert each other for snake_case
//! input whose words start with a lowercase letter.

/// Split on `_`, `-` and space, capitalize each word, concatenate.
///
/// Each word is lowercased before its first letter is uppercased, so
/// `user_ID` becomes `UserId`.
pub fn to_identifier_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split(['_', '-', ' ']).filter(|w| !w.is_empty()) {
        let lower = word.to_lowercase();
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Insert `_` before each uppercase letter after the first character, then
/// lowercase.
pub fn to_wire_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
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

/// Remove `prefix` from the start of a table name when present.
pub fn strip_table_prefix<'a>(table: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return table;
    }
    table.strip_prefix(prefix).unwrap_or(table)
}

/// Go type name for a table: prefix stripped, then identifier-cased.
pub fn struct_name(table: &str, prefix: &str) -> String {
    to_identifier_case(strip_table_prefix(table, prefix))
}

/// Lowercase the first character, for Go parameter names (`Id` -> `id`).
pub fn to_lower_camel(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

/// Go parameter name for a field, avoiding keywords (`Type` -> `typeKey`).
pub fn go_param_name(field: &str) -> String {
    let name = to_lower_camel(field);
    if GO_KEYWORDS.contains(&name.as_str()) {
        format!("{}Key", name)
    } else {
        name
    }
}

/// Whether a derived name is usable as an exported Go identifier.
pub fn is_exported_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identifier_case() {
        assert_eq!(to_identifier_case("users"), "Users");
        assert_eq!(to_identifier_case("user_accounts"), "UserAccounts");
        assert_eq!(to_identifier_case("order-items"), "OrderItems");
        assert_eq!(to_identifier_case("line item"), "LineItem");
        assert_eq!(to_identifier_case("id"), "Id");
        assert_eq!(to_identifier_case("user_ID"), "UserId");
        assert_eq!(to_identifier_case("__leading"), "Leading");
        assert_eq!(to_identifier_case(""), "");
    }

    #[test]
    fn test_wire_case() {
        assert_eq!(to_wire_case("Users"), "users");
        assert_eq!(to_wire_case("UserAccounts"), "user_accounts");
        assert_eq!(to_wire_case("Id"), "id");
        assert_eq!(to_wire_case("createdAt"), "created_at");
        assert_eq!(to_wire_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_wire_case_is_not_acronym_aware() {
        assert_eq!(to_wire_case("HTTPServer"), "h_t_t_p_server");
    }

    #[test]
    fn test_strip_table_prefix() {
        assert_eq!(strip_table_prefix("t_users", "t_"), "users");
        assert_eq!(strip_table_prefix("users", "t_"), "users");
        assert_eq!(strip_table_prefix("users", ""), "users");
        assert_eq!(struct_name("t_order_items", "t_"), "OrderItems");
    }

    #[test]
    fn test_lower_camel() {
        assert_eq!(to_lower_camel("Id"), "id");
        assert_eq!(to_lower_camel("UserId"), "userId");
        assert_eq!(to_lower_camel(""), "");
    }

    #[test]
    fn test_go_param_name() {
        assert_eq!(go_param_name("Id"), "id");
        assert_eq!(go_param_name("OrderNo"), "orderNo");
        assert_eq!(go_param_name("Type"), "typeKey");
        assert_eq!(go_param_name("Range"), "rangeKey");
    }

    #[test]
    fn test_exported_identifier() {
        assert!(is_exported_identifier("Users"));
        assert!(is_exported_identifier("Order2"));
        assert!(!is_exported_identifier(""));
        assert!(!is_exported_identifier("2fa"));
        assert!(!is_exported_identifier("Price$"));
        assert!(!is_exported_identifier("Zählung"));
    }

    proptest! {
        #[test]
        fn prop_snake_case_round_trips(s in "[a-z][a-z0-9]{0,7}(_[a-z][a-z0-9]{0,7}){0,4}") {
            prop_assert_eq!(to_wire_case(&to_identifier_case(&s)), s);
        }

        #[test]
        fn prop_identifier_case_has_no_separators(s in "[a-zA-Z0-9_ -]{0,32}") {
            let ident = to_identifier_case(&s);
            prop_assert!(!ident.contains(['_', '-', ' ']));
        }
    }
}

//! Endpoint template resolution.
//!
//! # Design
//! A pure string transformation with no failure mode: `{name}` tokens are
//! substituted from the path parameters, then the query string is appended
//! in the order the query parameters were supplied. Values are interpolated
//! verbatim; callers must pre-encode reserved characters themselves.

use std::fmt;

/// A single `name=value` pair. The value is anything printable, so one
/// slice can mix strings, integers and other scalars.
pub type Param<'a> = (&'a str, &'a dyn fmt::Display);

/// Resolve an endpoint template into its final path-and-query form.
///
/// Every `{name}` occurrence with a matching path parameter is replaced by
/// the value's `Display` form. A token with no matching parameter is left
/// verbatim, and a parameter with no matching token is ignored. The first
/// query parameter is prefixed with `?`, every subsequent one with `&`.
pub fn resolve(template: &str, path_params: &[Param<'_>], query_params: &[Param<'_>]) -> String {
    let resolved = substitute_path_params(template, path_params);
    append_query_params(resolved, query_params)
}

fn substitute_path_params(template: &str, params: &[Param<'_>]) -> String {
    let mut resolved = template.to_string();
    for (name, value) in params {
        resolved = resolved.replace(&format!("{{{name}}}"), &value.to_string());
    }
    resolved
}

fn append_query_params(mut endpoint: String, params: &[Param<'_>]) -> String {
    for (i, (name, value)) in params.iter().enumerate() {
        let prefix = if i == 0 { '?' } else { '&' };
        endpoint.push_str(&format!("{prefix}{name}={value}"));
    }
    endpoint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_path_token() {
        let resolved = resolve("user/{id}", &[("id", &7)], &[]);
        assert_eq!(resolved, "user/7");
        assert!(!resolved.contains("{id}"));
    }

    #[test]
    fn substitutes_every_occurrence_of_a_token() {
        let resolved = resolve("{kind}/compare/{kind}", &[("kind", &"user")], &[]);
        assert_eq!(resolved, "user/compare/user");
    }

    #[test]
    fn unmatched_token_is_left_verbatim() {
        let resolved = resolve("user/{id}/posts/{post}", &[("id", &1)], &[]);
        assert_eq!(resolved, "user/1/posts/{post}");
    }

    #[test]
    fn parameter_without_token_is_ignored() {
        let resolved = resolve("user/me", &[("id", &1)], &[]);
        assert_eq!(resolved, "user/me");
    }

    #[test]
    fn query_params_keep_supplied_order() {
        let resolved = resolve("user", &[], &[("a", &1), ("b", &2)]);
        assert_eq!(resolved, "user?a=1&b=2");
    }

    #[test]
    fn first_query_param_uses_question_mark() {
        let resolved = resolve("user/me", &[], &[("role", &"admin")]);
        assert_eq!(resolved, "user/me?role=admin");
    }

    #[test]
    fn path_and_query_params_combine() {
        let resolved = resolve("user/{id}", &[("id", &1)], &[("role", &"admin"), ("id", &1)]);
        assert_eq!(resolved, "user/1?role=admin&id=1");
    }

    #[test]
    fn empty_params_leave_template_untouched() {
        assert_eq!(resolve("user/me", &[], &[]), "user/me");
    }

    #[test]
    fn values_are_not_url_encoded() {
        let resolved = resolve("search", &[], &[("q", &"a b&c")]);
        assert_eq!(resolved, "search?q=a b&c");
    }
}

//! Description helpers.
//!
//! Primitive matchers render as ``Name(`v1`,`v2`)``, key/value matchers as
//! ``Name(`key`)`` or ``Name(`key`,`value`)``, compounds as `(a && b)` or `(a || b)`.

use crate::{Matcher, SharedMatcher};
use std::collections::BTreeMap;

/// ``Name(`v1`,`v2`,...)``
pub(crate) fn values<S: AsRef<str>>(name: &str, values: &[S]) -> String {
    let mut out = String::with_capacity(name.len() + 4 + values.len() * 16);
    out.push_str(name);
    out.push('(');
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('`');
        out.push_str(v.as_ref());
        out.push('`');
    }
    out.push(')');
    out
}

/// ``Name(`key`)`` when `value` is empty, ``Name(`key`,`value`)`` otherwise.
pub(crate) fn kv(name: &str, key: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{name}(`{key}`)")
    } else {
        format!("{name}(`{key}`,`{value}`)")
    }
}

/// All pairs joined with ` && ` and wrapped in parentheses, in key order.
pub(crate) fn kvs(name: &str, pairs: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(18 * pairs.len() + 2);
    out.push('(');
    for (i, (key, value)) in pairs.iter().enumerate() {
        if i > 0 {
            out.push_str(" && ");
        }
        out.push_str(&kv(name, key, value));
    }
    out.push(')');
    out
}

/// Children joined with `sep` and wrapped in parentheses.
///
/// A single child renders as itself, no children as the empty string.
pub(crate) fn join(sep: &str, matchers: &[SharedMatcher]) -> String {
    match matchers {
        [] => String::new(),
        [only] => only.description().to_string(),
        _ => {
            let mut out = String::with_capacity(64);
            out.push('(');
            for (i, m) in matchers.iter().enumerate() {
                if i > 0 {
                    out.push_str(sep);
                }
                out.push_str(m.description());
            }
            out.push(')');
            out
        }
    }
}

/// Remove one enclosing pair of parentheses.
///
/// Returns `s` unchanged unless it both starts with `(` and ends with `)`.
/// Inner parentheses are never touched.
///
/// ```
/// use reqmatch::remove_parentheses;
///
/// assert_eq!(remove_parentheses("(abc)"), "abc");
/// assert_eq!(remove_parentheses("((a) && (b))"), "(a) && (b)");
/// assert_eq!(remove_parentheses("(abc"), "(abc");
/// ```
#[must_use]
pub fn remove_parentheses(s: &str) -> &str {
    s.strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(s)
}

// SPDX-License-Identifier: GPL-3.0-or-later

//! Cleans operator-entered names so they are usable as tag names and alarm labels.

/// Longest name the HMI accepts.
pub const MAX_NAME_LEN: usize = 200;

/// Strips everything but ASCII letters, digits, spaces and underscores, then drops a single leading
/// space or underscore and truncates to [`MAX_NAME_LEN`] characters.
///
/// Only one leading character is dropped, so `" _Foo"` becomes `"_Foo"`.
pub fn sanitize_name(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ' || *c == '_')
        .collect();

    if sanitized.starts_with(|c: char| c == ' ' || c == '_') {
        sanitized.remove(0);
    }

    // ASCII only at this point, so bytes and characters line up
    sanitized.truncate(MAX_NAME_LEN);
    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_clean(s: &str) -> bool {
        s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '_')
    }

    #[test]
    fn removes_disallowed_characters() {
        assert_eq!(sanitize_name("Full-Stall!"), "FullStall");
        assert_eq!(sanitize_name("Motor #2 (Overload)"), "Motor 2 Overload");
        assert_eq!(sanitize_name("Überlast_Ä"), "berlast_");
    }

    #[test]
    fn drops_one_leading_separator_only() {
        assert_eq!(sanitize_name(" Foo"), "Foo");
        assert_eq!(sanitize_name("_Foo"), "Foo");
        assert_eq!(sanitize_name(" _Foo"), "_Foo");
        assert_eq!(sanitize_name("__Foo"), "_Foo");
        assert_eq!(sanitize_name("-_Foo"), "Foo");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(sanitize_name(""), "");
        assert_eq!(sanitize_name("!!!"), "");
        assert_eq!(sanitize_name("_"), "");
    }

    #[test]
    fn truncates_to_max_len() {
        let long = "A".repeat(250);
        assert_eq!(sanitize_name(&long).len(), MAX_NAME_LEN);

        // Truncation happens after the leading strip
        let long = format!("_{}", "B".repeat(MAX_NAME_LEN));
        assert_eq!(sanitize_name(&long), "B".repeat(MAX_NAME_LEN));
    }

    #[test]
    fn output_is_bounded_and_clean() {
        let inputs = [
            "FullStall",
            " leading space",
            "tabs\tand\nnewlines",
            "ünïcödé ✓ names",
            "a.b.c[1]:Sts",
            &"x-".repeat(300),
        ];
        for input in inputs {
            let out = sanitize_name(input);
            assert!(out.len() <= MAX_NAME_LEN, "{input:?}");
            assert!(is_clean(&out), "{input:?} -> {out:?}");
        }
    }

    #[test]
    fn idempotent_for_clean_names() {
        for input in ["FullStall", "Motor 2 Overload", "a_b_c", "Tank-Level HiHi"] {
            let once = sanitize_name(input);
            assert_eq!(sanitize_name(&once), once);
        }
    }
}

// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

/// Escape the body of a double-quoted script string literal: `"` becomes
/// `\"`, a newline becomes the two-character sequence `\n`, a tab becomes
/// `\t`. Nothing else is altered; non-ASCII text passes through unchanged.
///
/// Single pass over the input, so replacement text is never re-examined.
/// Note that backslash itself is NOT escaped; the script source format only
/// escapes these three characters.
pub fn escape_string(s: &str) -> String {
    s.chars().fold(String::with_capacity(s.len()), |mut acc, c| {
        match c {
            '"' => acc.push_str("\\\""),
            '\n' => acc.push_str("\\n"),
            '\t' => acc.push_str("\\t"),
            _ => acc.push(c),
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use crate::util::escape_string;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("foo"), "foo");
        assert_eq!(escape_string(r#"foo"bar"#), r#"foo\"bar"#);
        assert_eq!(escape_string("foo\nbar"), r#"foo\nbar"#);
        assert_eq!(escape_string("foo\tbar"), r#"foo\tbar"#);
        assert_eq!(
            escape_string("the \"quote\"\ttab\nline"),
            r#"the \"quote\"\ttab\nline"#
        );
    }

    #[test]
    fn test_escape_string_no_specials_is_noop() {
        let plain = "It's a plain line with (punctuation) and 100% no specials.";
        assert_eq!(escape_string(plain), plain);
    }

    #[test]
    fn test_escape_string_backslash_passes_through() {
        // A literal backslash-t in the input must not be touched, only a real
        // tab character is rewritten.
        assert_eq!(escape_string(r"foo\tbar"), r"foo\tbar");
        assert_eq!(escape_string(r"back\slash"), r"back\slash");
    }

    #[test]
    fn test_escape_string_unicode_passes_through() {
        assert_eq!(escape_string("こんにちは「世界」"), "こんにちは「世界」");
        assert_eq!(escape_string("naïve café"), "naïve café");
    }
}

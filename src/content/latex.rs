/// Rewrites `\[...\]` to `$$...$$` and `\(...\)` to `$...$`, shortest match
/// first. An opener without a closer is left as is.
pub fn normalize_math(text: &str) -> String {
    let display = rewrite_pairs(text, r"\[", r"\]", "$$");
    rewrite_pairs(&display, r"\(", r"\)", "$")
}

fn rewrite_pairs(text: &str, open: &str, close: &str, fence: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(open) {
        let inner_start = start + open.len();
        let Some(end_rel) = rest[inner_start..].find(close) else {
            break;
        };
        let inner_end = inner_start + end_rel;

        out.push_str(&rest[..start]);
        out.push_str(fence);
        out.push_str(&rest[inner_start..inner_end]);
        out.push_str(fence);
        rest = &rest[inner_end + close.len()..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_display_and_inline_math() {
        assert_eq!(
            normalize_math(r"Area \(\pi r^2\) and \[E = mc^2\]"),
            r"Area $\pi r^2$ and $$E = mc^2$$"
        );
    }

    #[test]
    fn spans_lines() {
        assert_eq!(normalize_math("\\[\na\n\\]"), "$$\na\n$$");
    }

    #[test]
    fn leaves_unterminated_delimiters() {
        assert_eq!(normalize_math(r"cost \( 5"), r"cost \( 5");
        assert_eq!(normalize_math(r"\[x\] then \["), r"$$x$$ then \[");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(normalize_math("no math here"), "no math here");
    }
}

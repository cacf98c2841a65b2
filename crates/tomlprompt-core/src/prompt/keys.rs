//! Selector key-path grammar
//!
//! A selector is a dotted path whose segments may hold `+`-separated
//! alternatives (`a.b+c.d`) or one of the wildcard tokens handled by the
//! resolver (`?`, `??`, `*`, `**`).

/// One segment of a concrete (already `+`-expanded) path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal child key
    Key(&'a str),
    /// `?`: one random child key
    RandomKey,
    /// `??`: one random leaf anywhere below (terminal only)
    RandomLeaf,
    /// `*`: every child key
    AllKeys,
    /// `**`: every leaf anywhere below (terminal only)
    AllLeaves,
}

impl<'a> Segment<'a> {
    pub fn parse(segment: &'a str) -> Self {
        match segment {
            "?" => Segment::RandomKey,
            "??" => Segment::RandomLeaf,
            "*" => Segment::AllKeys,
            "**" => Segment::AllLeaves,
            key => Segment::Key(key),
        }
    }

    /// Whether the segment may only appear last in a path
    pub fn is_terminal_only(&self) -> bool {
        matches!(self, Segment::RandomLeaf | Segment::AllLeaves)
    }
}

/// Expand a selector into every concrete path and every path prefix
///
/// Alternatives are expanded as a cartesian product with the leftmost
/// segment varying slowest; each prefix is emitted before its extensions:
///
/// ```text
/// a.b+c.d  ->  a, a.b, a.b.d, a.c, a.c.d
/// ```
pub fn build_search_keys(selector: &str) -> Vec<String> {
    if selector.trim().is_empty() {
        return Vec::new();
    }

    let segments: Vec<Vec<&str>> = selector
        .split('.')
        .map(|segment| segment.split('+').collect())
        .collect();

    let mut keys = Vec::new();
    expand_segments(&segments, &mut Vec::new(), &mut keys);
    keys
}

fn expand_segments<'a>(segments: &[Vec<&'a str>], prefix: &mut Vec<&'a str>, out: &mut Vec<String>) {
    let Some((alternatives, rest)) = segments.split_first() else {
        return;
    };

    for &alternative in alternatives {
        prefix.push(alternative);
        out.push(prefix.join("."));
        expand_segments(rest, prefix, out);
        prefix.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_segment() {
        assert_eq!(build_search_keys("a"), vec!["a"]);
    }

    #[test]
    fn test_dotted_path_includes_prefixes() {
        assert_eq!(build_search_keys("a.b.c"), vec!["a", "a.b", "a.b.c"]);
    }

    #[test]
    fn test_alternatives_expand_in_order() {
        assert_eq!(
            build_search_keys("a.b+c.d"),
            vec!["a", "a.b", "a.b.d", "a.c", "a.c.d"]
        );
    }

    #[test]
    fn test_leftmost_segment_varies_slowest() {
        assert_eq!(
            build_search_keys("x+y.p+q"),
            vec!["x", "x.p", "x.q", "y", "y.p", "y.q"]
        );
    }

    #[test]
    fn test_wildcards_are_kept_verbatim() {
        assert_eq!(build_search_keys("a.*"), vec!["a", "a.*"]);
        assert_eq!(build_search_keys("a.?.??"), vec!["a", "a.?", "a.?.??"]);
    }

    #[test]
    fn test_empty_selector_has_no_keys() {
        assert!(build_search_keys("").is_empty());
        assert!(build_search_keys("   ").is_empty());
    }

    #[test]
    fn test_parse_segments() {
        assert_eq!(Segment::parse("?"), Segment::RandomKey);
        assert_eq!(Segment::parse("??"), Segment::RandomLeaf);
        assert_eq!(Segment::parse("*"), Segment::AllKeys);
        assert_eq!(Segment::parse("**"), Segment::AllLeaves);
        assert_eq!(Segment::parse("hair"), Segment::Key("hair"));
        assert!(Segment::RandomLeaf.is_terminal_only());
        assert!(!Segment::AllKeys.is_terminal_only());
    }
}

//! Line classification.
//!
//! The outline grammar is line oriented: what a line *is* depends only on its
//! own text, and the parser combines consecutive lines into elements. Hosts
//! that only need heading detection (cheap navigation without a parse) use
//! [`heading_level`] directly, which keeps their notion of "heading" identical
//! to the parser's.

/// What a single line looks like, judged without context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace only
    Blank,
    /// `*`-prefixed heading with its level
    Heading(usize),
    /// Starts with `|` after optional indentation
    TableRow,
    /// `#+begin_NAME`, name lowercased
    BlockBegin(String),
    /// `#+end_NAME`, name lowercased
    BlockEnd(String),
    /// Any other `#+` line
    Keyword,
    /// `#` alone or followed by whitespace
    Comment,
    /// `:NAME:` alone on the line
    DrawerBegin,
    /// `:END:` alone on the line
    DrawerEnd,
    /// List bullet, with the bullet's indentation
    Item { indent: usize },
    /// Anything else
    Text { indent: usize },
}

/// Heading level of a line, if the line is a heading.
///
/// A heading is one or more `*` at column 0 followed by a space or tab.
pub fn heading_level(line: &str) -> Option<usize> {
    let stars = line.bytes().take_while(|&b| b == b'*').count();
    if stars == 0 {
        return None;
    }
    match line.as_bytes().get(stars) {
        Some(b' ' | b'\t') => Some(stars),
        _ => None,
    }
}

/// Classify a line. The line may or may not include its line ending.
pub fn classify(line: &str) -> LineKind {
    let line = line.trim_end_matches(['\n', '\r']);
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    if let Some(level) = heading_level(line) {
        return LineKind::Heading(level);
    }

    let rest = line.trim_start_matches([' ', '\t']);
    let indent = line.len() - rest.len();

    if rest.starts_with('|') {
        return LineKind::TableRow;
    }

    if let Some(directive) = rest.strip_prefix("#+") {
        let lower = directive.to_ascii_lowercase();
        if let Some(name) = lower.strip_prefix("begin_") {
            return LineKind::BlockBegin(first_word(name));
        }
        if let Some(name) = lower.strip_prefix("end_") {
            return LineKind::BlockEnd(first_word(name));
        }
        return LineKind::Keyword;
    }

    if rest == "#" || rest.starts_with("# ") || rest.starts_with("#\t") {
        return LineKind::Comment;
    }

    if let Some(name) = drawer_name(rest) {
        return if name.eq_ignore_ascii_case("end") {
            LineKind::DrawerEnd
        } else {
            LineKind::DrawerBegin
        };
    }

    if is_bullet(rest, indent) {
        return LineKind::Item { indent };
    }

    LineKind::Text { indent }
}

fn first_word(s: &str) -> String {
    s.split_whitespace().next().unwrap_or_default().to_string()
}

/// `:NAME:` with nothing but trailing whitespace after it.
fn drawer_name(rest: &str) -> Option<&str> {
    let inner = rest.trim_end().strip_prefix(':')?.strip_suffix(':')?;
    let valid = !inner.is_empty()
        && inner
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
    valid.then_some(inner)
}

fn is_bullet(rest: &str, indent: usize) -> bool {
    let followed_by_space = |tail: &str| tail.is_empty() || tail.starts_with([' ', '\t']);

    if let Some(tail) = rest.strip_prefix(['-', '+']) {
        return followed_by_space(tail);
    }
    // At column 0 a star bullet would be a heading
    if indent > 0
        && let Some(tail) = rest.strip_prefix('*')
    {
        return followed_by_space(tail);
    }

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return false;
    }
    match rest[digits..].strip_prefix(['.', ')']) {
        Some(tail) => followed_by_space(tail),
        None => false,
    }
}

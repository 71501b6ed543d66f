//! SyntaxKind enum for every token and node in the outline CST.
//!
//! Tokens and nodes share one enum, rust-analyzer style. Every byte of the
//! source ends up inside exactly one token.

/// All syntax kinds for the outline CST.
///
/// Tokens come first (lexer output), then composite nodes (parser output).
/// `repr(u16)` keeps the raw kind small inside rowan's green tree.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Horizontal whitespace (spaces, tabs)
    WHITESPACE,
    /// Line ending
    NEWLINE,
    /// Plain text run
    TEXT,
    /// `*` (heading stars, bullets, emphasis)
    STAR,
    /// `#` (keywords, block delimiters, comments)
    HASH,
    /// `+` (keywords, bullets)
    PLUS,
    /// `-` (bullets, table rules)
    DASH,
    /// `|` table cell separator
    PIPE,
    /// `:` drawer delimiters
    COLON,
    /// Run of heading stars, glued from several `*` tokens by the parser
    STARS,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root document node
    ROOT,
    /// A heading together with its whole subtree
    HEADLINE,
    /// The heading line itself (stars + title)
    TITLE,
    /// Content between a heading line and its first child heading
    SECTION,
    /// Paragraph
    PARAGRAPH,
    /// Table (consecutive `|` rows)
    TABLE,
    /// A single table row
    TABLE_ROW,
    /// `#+begin_verse` block
    VERSE_BLOCK,
    /// `#+begin_quote` block
    QUOTE_BLOCK,
    /// `#+begin_src` block
    SRC_BLOCK,
    /// `#+begin_example` block
    EXAMPLE_BLOCK,
    /// Any other `#+begin_NAME` block
    SPECIAL_BLOCK,
    /// Run of list items sharing an indentation
    PLAIN_LIST,
    /// A single list item
    ITEM,
    /// `:NAME:` ... `:END:` drawer
    DRAWER,
    /// `#+KEY: value` line
    KEYWORD,
    /// `# comment` lines
    COMMENT,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace/newlines).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE)
    }

    /// Blocks that count as one paragraph when weighing a subtree.
    pub fn is_paragraph_like(self) -> bool {
        matches!(
            self,
            Self::PARAGRAPH
                | Self::TABLE
                | Self::VERSE_BLOCK
                | Self::QUOTE_BLOCK
                | Self::SRC_BLOCK
                | Self::EXAMPLE_BLOCK
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutlineLang {}

impl rowan::Language for OutlineLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: bounds checked above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<OutlineLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<OutlineLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<OutlineLang>;

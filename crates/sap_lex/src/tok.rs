use std::fmt::{Display, Formatter};

/// Byte range within a single line.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Span(pub usize, pub usize);

impl Span {
    pub fn until(self, other: Span) -> Span {
        Span(self.0.min(other.0), self.1.max(other.1))
    }

    pub fn start(self) -> usize {
        self.0
    }

    pub fn end(self) -> usize {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Attribute(TokenAttribute),
    Keyword(TokenKeyword),
    Punct(TokenPunct),
    Ident(TokenIdent),
}

impl Token {
    pub fn span(&self) -> Span {
        match self {
            Token::Attribute(t) => t.span,
            Token::Keyword(t) => t.span,
            Token::Punct(t) => t.span,
            Token::Ident(t) => t.span,
        }
    }
}

/// An `@`-prefixed marker such as `@objc` or `@available`. The argument list,
/// if any, is left to the fallback token category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAttribute {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenKeyword {
    pub keyword: Keyword,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPunct {
    pub punct: Punct,
    pub span: Span,
}

/// Anything the classifier does not recognize, including operator soup,
/// string literals and member accesses like `.init(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdent {
    pub ident: String,
    pub span: Span,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Punct {
    LCurly,
    RCurly,
    Colon,
    Eq,
}

impl Display for Punct {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Punct::LCurly => write!(f, "{{"),
            Punct::RCurly => write!(f, "}}"),
            Punct::Colon => write!(f, ":"),
            Punct::Eq => write!(f, "="),
        }
    }
}

/// The closed keyword set the rewriter understands. Multi-word forms such as
/// `unowned(safe)` and `private(set)` are single keywords, never decomposed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Structural
    Protocol,
    Extension,
    Struct,
    Class,
    Enum,
    Case,
    // Access levels
    Public,
    Private,
    Open,
    Fileprivate,
    Internal,
    // Setter-scoped access levels
    PublicSet,
    PrivateSet,
    OpenSet,
    FileprivateSet,
    InternalSet,
    // Declaration modifiers
    Static,
    Final,
    Override,
    Required,
    Convenience,
    Mutating,
    Nonmutating,
    Lazy,
    Weak,
    Unowned,
    UnownedSafe,
    UnownedUnsafe,
    // Declaration introducers
    Let,
    Var,
    Func,
    Init,
    Typealias,
    Subscript,
    Prefix,
    Postfix,
    Infix,
    // Control flow
    For,
    While,
    Repeat,
    Do,
    Catch,
    Defer,
}

impl Keyword {
    /// Matches a whole identifier-shaped word. `(safe)`, `(unsafe)` and
    /// `(set)` suffixes are merged by the lexer, not here.
    pub fn from_word(word: &str) -> Option<Keyword> {
        let keyword = match word {
            "protocol" => Keyword::Protocol,
            "extension" => Keyword::Extension,
            "struct" => Keyword::Struct,
            "class" => Keyword::Class,
            "enum" => Keyword::Enum,
            "case" => Keyword::Case,
            "public" => Keyword::Public,
            "private" => Keyword::Private,
            "open" => Keyword::Open,
            "fileprivate" => Keyword::Fileprivate,
            "internal" => Keyword::Internal,
            "static" => Keyword::Static,
            "final" => Keyword::Final,
            "override" => Keyword::Override,
            "required" => Keyword::Required,
            "convenience" => Keyword::Convenience,
            "mutating" => Keyword::Mutating,
            "nonmutating" => Keyword::Nonmutating,
            "lazy" => Keyword::Lazy,
            "weak" => Keyword::Weak,
            "unowned" => Keyword::Unowned,
            "let" => Keyword::Let,
            "var" => Keyword::Var,
            "func" => Keyword::Func,
            "init" => Keyword::Init,
            "typealias" => Keyword::Typealias,
            "subscript" => Keyword::Subscript,
            "prefix" => Keyword::Prefix,
            "postfix" => Keyword::Postfix,
            "infix" => Keyword::Infix,
            "for" => Keyword::For,
            "while" => Keyword::While,
            "repeat" => Keyword::Repeat,
            "do" => Keyword::Do,
            "catch" => Keyword::Catch,
            "defer" => Keyword::Defer,
            _ => return None,
        };

        Some(keyword)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Protocol => "protocol",
            Keyword::Extension => "extension",
            Keyword::Struct => "struct",
            Keyword::Class => "class",
            Keyword::Enum => "enum",
            Keyword::Case => "case",
            Keyword::Public => "public",
            Keyword::Private => "private",
            Keyword::Open => "open",
            Keyword::Fileprivate => "fileprivate",
            Keyword::Internal => "internal",
            Keyword::PublicSet => "public(set)",
            Keyword::PrivateSet => "private(set)",
            Keyword::OpenSet => "open(set)",
            Keyword::FileprivateSet => "fileprivate(set)",
            Keyword::InternalSet => "internal(set)",
            Keyword::Static => "static",
            Keyword::Final => "final",
            Keyword::Override => "override",
            Keyword::Required => "required",
            Keyword::Convenience => "convenience",
            Keyword::Mutating => "mutating",
            Keyword::Nonmutating => "nonmutating",
            Keyword::Lazy => "lazy",
            Keyword::Weak => "weak",
            Keyword::Unowned => "unowned",
            Keyword::UnownedSafe => "unowned(safe)",
            Keyword::UnownedUnsafe => "unowned(unsafe)",
            Keyword::Let => "let",
            Keyword::Var => "var",
            Keyword::Func => "func",
            Keyword::Init => "init",
            Keyword::Typealias => "typealias",
            Keyword::Subscript => "subscript",
            Keyword::Prefix => "prefix",
            Keyword::Postfix => "postfix",
            Keyword::Infix => "infix",
            Keyword::For => "for",
            Keyword::While => "while",
            Keyword::Repeat => "repeat",
            Keyword::Do => "do",
            Keyword::Catch => "catch",
            Keyword::Defer => "defer",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

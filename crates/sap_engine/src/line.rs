//! Per-line header analysis: finds the declaration a line introduces, its
//! explicit access spelling, and where an inserted keyword would go.

use sap_lex::{Keyword, Punct, Span, Token};

use crate::level::AccessLevel;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum DeclKind {
    Struct,
    Class,
    Enum,
    Protocol,
    Extension { conformance: bool },
    /// `func`, `init`, and type-level `class func` style members.
    Function,
    /// `let`/`var`/`typealias`. With an initializer, a trailing `{` opens a
    /// closure body; without one it opens an accessor block.
    Storage { initializer: bool },
    Subscript,
    /// `case` rows inside an enum are never annotated.
    Case,
}

#[derive(Debug, Clone)]
pub(crate) struct Declaration {
    pub kind: DeclKind,
    /// Explicit access keyword before the declaration introducer.
    pub access: Option<(AccessLevel, Span)>,
    /// Explicit `level(set)` annotation before the declaration introducer.
    pub setter: Option<(AccessLevel, Span)>,
    /// Byte offset where an inserted access keyword goes: the start of the
    /// first declaration-class keyword, after any modifiers.
    pub insert_at: usize,
}

#[derive(Debug)]
pub(crate) struct Header {
    pub decl: Option<Declaration>,
    /// A control-flow keyword opens the line (and no declaration does).
    pub control: bool,
}

/// Classifies the portion of a line before its first `{`.
pub(crate) fn scan(tokens: &[Token]) -> Header {
    let brace = tokens
        .iter()
        .position(|tok| matches!(tok, Token::Punct(t) if t.punct == Punct::LCurly));
    let header = &tokens[..brace.unwrap_or(tokens.len())];

    let decl = scan_declaration(header);
    let control = decl.is_none()
        && header.iter().any(|tok| {
            matches!(
                tok,
                Token::Keyword(t) if is_control(t.keyword)
            )
        });

    Header { decl, control }
}

fn scan_declaration(header: &[Token]) -> Option<Declaration> {
    // A declaration line leads with its modifiers; anything else (an
    // expression, a closing brace, a continuation) disqualifies the line.
    match header.first() {
        Some(Token::Keyword(_)) | Some(Token::Attribute(_)) => {}
        _ => return None,
    }

    let mut access = None;
    let mut setter = None;
    let mut insert_at = None;
    let mut primary = None;
    let mut initializer = false;
    let mut conformance = false;

    for (idx, tok) in header.iter().enumerate() {
        match tok {
            Token::Keyword(t) => {
                if primary.is_none() {
                    if let Some(level) = AccessLevel::from_keyword(t.keyword) {
                        if access.is_none() {
                            access = Some((level, t.span));
                        }
                        continue;
                    }
                    if let Some(level) = AccessLevel::from_setter_keyword(t.keyword) {
                        if setter.is_none() {
                            setter = Some((level, t.span));
                        }
                        continue;
                    }
                }

                if is_introducer(t.keyword) && insert_at.is_none() {
                    insert_at = Some(t.span.start());
                }
                if is_primary(t.keyword) && primary.is_none() {
                    primary = Some((idx, t.keyword));
                }
            }
            Token::Punct(t) => match t.punct {
                Punct::Eq => initializer = true,
                Punct::Colon => {
                    if matches!(primary, Some((_, Keyword::Extension))) {
                        conformance = true;
                    }
                }
                _ => {}
            },
            Token::Attribute(_) | Token::Ident(_) => {}
        }
    }

    let (primary_idx, primary) = primary?;
    let insert_at = insert_at?;

    let kind = match primary {
        Keyword::Struct => DeclKind::Struct,
        Keyword::Enum => DeclKind::Enum,
        Keyword::Protocol => DeclKind::Protocol,
        Keyword::Extension => DeclKind::Extension { conformance },
        Keyword::Func | Keyword::Init => DeclKind::Function,
        Keyword::Let | Keyword::Var => DeclKind::Storage { initializer },
        Keyword::Typealias => DeclKind::Storage { initializer: true },
        Keyword::Subscript => DeclKind::Subscript,
        Keyword::Case => DeclKind::Case,
        Keyword::Class => class_member_kind(&header[primary_idx + 1..], initializer),
        _ => return None,
    };

    Some(Declaration {
        kind,
        access,
        setter,
        insert_at,
    })
}

/// `class` doubles as a member modifier: `class func`, `class var` and
/// `class subscript` declare type members, not a class.
fn class_member_kind(rest: &[Token], initializer: bool) -> DeclKind {
    for tok in rest {
        if let Token::Keyword(t) = tok {
            match t.keyword {
                Keyword::Func | Keyword::Init => return DeclKind::Function,
                Keyword::Let | Keyword::Var => return DeclKind::Storage { initializer },
                Keyword::Subscript => return DeclKind::Subscript,
                _ => {}
            }
        }
    }

    DeclKind::Class
}

/// Keywords an inserted access level may directly precede.
fn is_introducer(keyword: Keyword) -> bool {
    is_primary(keyword)
        || matches!(
            keyword,
            Keyword::Prefix | Keyword::Postfix | Keyword::Infix
        )
}

/// Keywords that determine what kind of declaration the line introduces.
fn is_primary(keyword: Keyword) -> bool {
    matches!(
        keyword,
        Keyword::Struct
            | Keyword::Class
            | Keyword::Enum
            | Keyword::Protocol
            | Keyword::Extension
            | Keyword::Let
            | Keyword::Var
            | Keyword::Func
            | Keyword::Init
            | Keyword::Typealias
            | Keyword::Subscript
            | Keyword::Case
    )
}

fn is_control(keyword: Keyword) -> bool {
    matches!(
        keyword,
        Keyword::For
            | Keyword::While
            | Keyword::Repeat
            | Keyword::Do
            | Keyword::Catch
            | Keyword::Defer
    )
}

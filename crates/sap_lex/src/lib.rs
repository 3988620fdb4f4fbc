//! Line-local lexical classifier for Swift declaration headers.
//!
//! The classifier is deliberately shallow: it never parses expressions or
//! nested structure. Each line is tokenized independently into keywords,
//! attributes, the four structurally significant characters (`{ } : =`) and
//! opaque identifier blobs. Comments and string literals are skipped so that
//! keywords or braces inside them never surface as tokens. Classification is
//! total: there is no error case.

pub mod tok;

pub use crate::tok::{
    Keyword,
    Punct,
    Span,
    Token,
    TokenAttribute,
    TokenIdent,
    TokenKeyword,
    TokenPunct,
};

pub fn lex(line: &str) -> Vec<Token> {
    Lexer {
        rest: line,
        byte_offset: 0,
    }
    .lex()
}

struct Lexer<'line> {
    rest: &'line str,
    byte_offset: usize,
}

impl Lexer<'_> {
    fn lex(mut self) -> Vec<Token> {
        let mut tokens = vec![];

        loop {
            if !self.skip_whitespace() {
                // A line comment, or an unterminated block comment, blanks
                // the rest of the line.
                return tokens;
            }

            if let Some(first_char) = self.char() {
                tokens.push(match first_char {
                    '{' => self.punct(Punct::LCurly),
                    '}' => self.punct(Punct::RCurly),
                    ':' => self.punct(Punct::Colon),
                    '=' => self.punct(Punct::Eq),
                    '"' => self.string_literal(),
                    '@' => self.attribute(),
                    _ if is_ident_start(first_char) => self.word(first_char),
                    _ => self.blob(first_char),
                });
            } else {
                return tokens;
            }
        }
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.rest.starts_with(prefix)
    }

    fn char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn bump_n(&mut self, n_chars: usize) -> Span {
        let old_offset = self.byte_offset;

        if let Some((end_idx, _)) = self.rest.char_indices().nth(n_chars) {
            self.rest = &self.rest[end_idx..];
            self.byte_offset += end_idx;
        } else {
            self.byte_offset += self.rest.len();
            self.rest = "";
        }

        Span(old_offset, self.byte_offset)
    }

    fn bump(&mut self) -> Span {
        self.bump_n(1)
    }

    /// Skips whitespace and inline `/* ... */` comments. Returns false when
    /// the rest of the line is dead: a `//` comment, or a block comment with
    /// no closing `*/` before end of line.
    fn skip_whitespace(&mut self) -> bool {
        loop {
            if self.starts_with("//") {
                return false;
            } else if self.starts_with("/*") {
                self.bump_n(2);
                loop {
                    if self.char().is_none() {
                        return false;
                    } else if self.starts_with("*/") {
                        self.bump_n(2);
                        break;
                    }
                    self.bump();
                }
            } else if matches!(self.char(), Some(c) if char::is_whitespace(c)) {
                self.bump();
            } else {
                return true;
            }
        }
    }

    fn punct(&mut self, punct: Punct) -> Token {
        let span = self.bump();
        Token::Punct(TokenPunct { punct, span })
    }

    /// A double-quoted string is one opaque token. Interpolations may contain
    /// braces, so the whole literal must be swallowed, escapes included. An
    /// unterminated literal runs to end of line.
    fn string_literal(&mut self) -> Token {
        assert!(self.starts_with("\""));

        let mut literal = String::from('"');
        let begin_span = self.bump();
        let mut last_span = begin_span;

        while let Some(c) = self.char() {
            last_span = self.bump();
            literal.push(c);

            if c == '\\' {
                if let Some(escaped) = self.char() {
                    last_span = self.bump();
                    literal.push(escaped);
                }
            } else if c == '"' {
                break;
            }
        }

        Token::Ident(TokenIdent {
            ident: literal,
            span: begin_span.until(last_span),
        })
    }

    fn attribute(&mut self) -> Token {
        assert!(self.starts_with("@"));

        let begin_span = self.bump();
        let mut last_span = begin_span;
        let mut name = String::new();

        while let Some(c) = self.char() {
            if is_ident_continue(c) {
                name.push(c);
                last_span = self.bump();
            } else {
                break;
            }
        }

        Token::Attribute(TokenAttribute {
            name,
            span: begin_span.until(last_span),
        })
    }

    fn word(&mut self, first_char: char) -> Token {
        assert!(is_ident_start(first_char));

        let mut word = String::new();
        word.push(first_char);

        let begin_span = self.bump();
        let mut last_span = begin_span;

        while let Some(c) = self.char() {
            if is_ident_continue(c) {
                word.push(c);
                last_span = self.bump();
            } else {
                break;
            }
        }

        let keyword = if let Some(keyword) = Keyword::from_word(&word) {
            keyword
        } else {
            return Token::Ident(TokenIdent {
                ident: word,
                span: begin_span.until(last_span),
            });
        };

        // Multi-word keywords: merge the parenthesized suffix into the token.
        let merged = match keyword {
            Keyword::Unowned if self.starts_with("(safe)") => Some(Keyword::UnownedSafe),
            Keyword::Unowned if self.starts_with("(unsafe)") => Some(Keyword::UnownedUnsafe),
            Keyword::Public if self.starts_with("(set)") => Some(Keyword::PublicSet),
            Keyword::Private if self.starts_with("(set)") => Some(Keyword::PrivateSet),
            Keyword::Open if self.starts_with("(set)") => Some(Keyword::OpenSet),
            Keyword::Fileprivate if self.starts_with("(set)") => Some(Keyword::FileprivateSet),
            Keyword::Internal if self.starts_with("(set)") => Some(Keyword::InternalSet),
            _ => None,
        };

        let (keyword, last_span) = if let Some(merged) = merged {
            let suffix_len = merged.as_str().len() - word.len();
            (merged, self.bump_n(suffix_len))
        } else {
            (keyword, last_span)
        };

        Token::Keyword(TokenKeyword {
            keyword,
            span: begin_span.until(last_span),
        })
    }

    /// Everything else is swallowed as one blob up to the next whitespace or
    /// structurally significant character. `.init(foo` stays one identifier,
    /// which is what keeps member accesses from masquerading as keywords.
    fn blob(&mut self, first_char: char) -> Token {
        let mut blob = String::new();
        blob.push(first_char);

        let begin_span = self.bump();
        let mut last_span = begin_span;

        while let Some(c) = self.char() {
            if c.is_whitespace() || matches!(c, '{' | '}' | ':' | '=' | '"' | '@') {
                break;
            }
            if self.starts_with("//") || self.starts_with("/*") {
                break;
            }
            blob.push(c);
            last_span = self.bump();
        }

        Token::Ident(TokenIdent {
            ident: blob,
            span: begin_span.until(last_span),
        })
    }
}

fn is_ident_start(c: char) -> bool {
    matches!(c, 'a'..='z' | 'A'..='Z' | '_')
}

fn is_ident_continue(c: char) -> bool {
    matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '_')
}

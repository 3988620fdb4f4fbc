//! Scope-aware rewriting of Swift access-control annotations.
//!
//! The engine walks a file line by line, maintaining a stack of open brace
//! scopes. Lines that introduce declarations directly inside an eligible
//! scope (file scope, or the body of a type, extension or enum) have the
//! requested [`AccessChange`] applied to their access keyword; everything
//! inside function bodies, accessor blocks and control-flow statements is
//! local and left alone. The walk is total: malformed input degrades to
//! fewer rewrites, never to an error.

mod change;
mod level;
mod line;
mod scope;

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};
use sap_lex::{Punct, Span, Token};

pub use crate::change::AccessChange;
pub use crate::level::{AccessLevel, Rank};

use crate::change::{transition, LevelEdit, Transition};
use crate::line::{Declaration, DeclKind};
use crate::scope::{Scope, ScopeKind, ScopeStack};

/// Applies `change` to the lines whose indices appear in `targets`.
///
/// Returns the rewritten text for each targeted line that actually changed;
/// untouched lines have no entry. Scope tracking always covers the whole
/// file, and container lines influence their members' fate whether or not
/// they are targeted themselves. Out-of-range target indices are ignored.
pub fn rewrite<S: AsRef<str>>(
    lines: &[S],
    targets: &[usize],
    change: AccessChange,
) -> BTreeMap<usize, String> {
    let targets: BTreeSet<usize> = targets
        .iter()
        .copied()
        .filter(|&idx| idx < lines.len())
        .collect();

    let mut stack = ScopeStack::new();
    // A recognized header whose `{` has not arrived yet; a later bare `{`
    // resolves it, so wrapped signatures still open the right scope.
    let mut pending: Option<Scope> = None;
    let mut rewritten = BTreeMap::new();

    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let tokens = sap_lex::lex(line);
        let header = line::scan(&tokens);

        let mut header_scope = None;

        if stack.members_eligible() {
            if header.decl.is_some() || header.control {
                pending = None;
            }

            if let Some(decl) = &header.decl {
                let inherited = stack.member_default();
                let ceiling = stack.ceiling();
                let explicit = decl.access.map(|(level, _)| level);
                let effective = explicit.unwrap_or(inherited);

                let tr = if rewritable(decl) {
                    transition(change, explicit, inherited, ceiling)
                } else {
                    Transition::keep(effective)
                };

                if rewritable(decl) {
                    if let Some(new_line) = splice(line, decl, &tr, change) {
                        trace!("line {}: {:?} -> {:?}", idx, line, new_line);
                        if targets.contains(&idx) {
                            rewritten.insert(idx, new_line);
                        }
                    }
                }

                header_scope = scope_for(decl, explicit, effective, tr.new_level, &stack);
            } else if header.control {
                header_scope = Some(Scope::new(ScopeKind::ControlFlow, stack.ceiling()));
            }
        }

        for tok in &tokens {
            if let Token::Punct(t) = tok {
                match t.punct {
                    Punct::LCurly => {
                        if let Some(scope) = header_scope.take() {
                            stack.push(scope);
                        } else if let Some(scope) = pending.take() {
                            stack.push(scope);
                        } else {
                            stack.open_brace();
                        }
                    }
                    Punct::RCurly => stack.close_brace(),
                    _ => {}
                }
            }
        }

        if let Some(scope) = header_scope {
            pending = Some(scope);
        }
    }

    if stack.len() > 0 {
        debug!("{} scope(s) left open at end of input", stack.len());
    }
    debug!("{} line(s) rewritten", rewritten.len());

    rewritten
}

/// Enum cases never carry access keywords, and an extension header that
/// declares a conformance cannot change its own level (its members can).
fn rewritable(decl: &Declaration) -> bool {
    !matches!(
        decl.kind,
        DeclKind::Case | DeclKind::Extension { conformance: true }
    )
}

/// The scope a declaration's `{` would open, if any.
fn scope_for(
    decl: &Declaration,
    explicit: Option<AccessLevel>,
    pre_level: AccessLevel,
    post_level: AccessLevel,
    stack: &ScopeStack,
) -> Option<Scope> {
    let parent_ceiling = stack.ceiling();

    let scope = match decl.kind {
        DeclKind::Struct | DeclKind::Class | DeclKind::Enum => Scope::new(
            ScopeKind::Container {
                member_default: AccessLevel::Internal,
                members_eligible: true,
            },
            parent_ceiling.min(post_level),
        ),
        DeclKind::Protocol => Scope::new(
            ScopeKind::Container {
                member_default: AccessLevel::Internal,
                members_eligible: false,
            },
            parent_ceiling.min(post_level),
        ),
        DeclKind::Extension { conformance } => {
            // An unannotated conformance extension takes the extended type's
            // level, which a single file cannot see; its members keep the
            // surrounding ceiling.
            let ceiling = if conformance && explicit.is_none() {
                parent_ceiling
            } else {
                parent_ceiling.min(post_level)
            };
            Scope::new(
                ScopeKind::Container {
                    member_default: pre_level,
                    members_eligible: true,
                },
                ceiling,
            )
        }
        DeclKind::Function | DeclKind::Storage { initializer: true } => {
            Scope::new(ScopeKind::Body, parent_ceiling)
        }
        DeclKind::Storage { initializer: false } | DeclKind::Subscript => {
            Scope::new(ScopeKind::Accessor, parent_ceiling)
        }
        DeclKind::Case => return None,
    };

    Some(scope)
}

/// Applies the keyword edit and the setter-annotation rule to the line text.
///
/// A setter annotation is dropped when it no longer grants anything: after
/// the property's new effective level is computed, `level(set)` survives
/// only if it is strictly lower. `singleLevel` and `Strip` always drop it.
fn splice(
    line: &str,
    decl: &Declaration,
    tr: &Transition,
    change: AccessChange,
) -> Option<String> {
    let drop_setter = match (decl.setter, change) {
        (None, _) => false,
        (Some(_), AccessChange::SingleLevel(_) | AccessChange::Strip) => true,
        (Some((setter_level, _)), _) => tr.edit.is_some() && setter_level >= tr.new_level,
    };

    if tr.edit.is_none() && !drop_setter {
        return None;
    }

    let mut edits: Vec<(usize, usize, String)> = vec![];

    match (tr.edit, decl.access) {
        (Some(LevelEdit::Insert(level)), _) => {
            edits.push((decl.insert_at, decl.insert_at, format!("{} ", level)));
        }
        (Some(LevelEdit::Replace(level)), Some((_, span))) => {
            edits.push((span.start(), span.end(), level.as_str().to_string()));
        }
        (Some(LevelEdit::Clear), Some((_, span))) => edits.push(removal(line, span)),
        // Replace/Clear are only produced for explicit keywords.
        (Some(_), None) => return None,
        (None, _) => {}
    }

    if drop_setter {
        if let Some((_, span)) = decl.setter {
            edits.push(removal(line, span));
        }
    }

    edits.sort_by(|a, b| b.0.cmp(&a.0));

    let mut new_line = line.to_string();
    for (start, end, text) in edits {
        new_line.replace_range(start..end, &text);
    }

    if new_line == line {
        None
    } else {
        Some(new_line)
    }
}

/// A keyword removal takes one adjacent space with it, preferring the one
/// that follows.
fn removal(line: &str, span: Span) -> (usize, usize, String) {
    let mut start = span.start();
    let mut end = span.end();

    if line[end..].starts_with(' ') {
        end += 1;
    } else if line[..start].ends_with(' ') {
        start -= 1;
    }

    (start, end, String::new())
}

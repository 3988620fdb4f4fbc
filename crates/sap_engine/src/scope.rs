use log::trace;

use crate::level::AccessLevel;

/// What a brace-delimited region means to the rewriter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum ScopeKind {
    /// A type, extension or protocol body whose direct members are
    /// declarations.
    Container {
        /// Level an unannotated direct member holds.
        member_default: AccessLevel,
        /// Protocol members carry no access keywords of their own.
        members_eligible: bool,
    },
    /// A function, initializer or closure body. Everything inside is local.
    Body,
    /// A computed property or subscript accessor block.
    Accessor,
    /// `for`/`while`/`repeat`/`do`/`catch`/`defer` at declaration scope.
    ControlFlow,
}

#[derive(Debug)]
pub(crate) struct Scope {
    pub kind: ScopeKind,
    /// Tightest post-transformation container level up to here. Upward
    /// moves inside this scope clamp to it.
    pub ceiling: AccessLevel,
    /// Extra braces opened inside this scope that did not start a new one.
    depth: usize,
}

impl Scope {
    pub fn new(kind: ScopeKind, ceiling: AccessLevel) -> Scope {
        Scope {
            kind,
            ceiling,
            depth: 0,
        }
    }
}

/// Stack of open scopes. The empty stack is file scope: eligible, `internal`
/// member default, `open` ceiling.
pub(crate) struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    pub fn new() -> ScopeStack {
        ScopeStack { scopes: vec![] }
    }

    /// Whether a declaration directly at the current position may carry an
    /// access keyword.
    pub fn members_eligible(&self) -> bool {
        match self.scopes.last() {
            None => true,
            Some(Scope {
                kind: ScopeKind::Container {
                    members_eligible, ..
                },
                ..
            }) => *members_eligible,
            Some(_) => false,
        }
    }

    pub fn member_default(&self) -> AccessLevel {
        match self.scopes.last() {
            Some(Scope {
                kind: ScopeKind::Container { member_default, .. },
                ..
            }) => *member_default,
            _ => AccessLevel::Internal,
        }
    }

    pub fn ceiling(&self) -> AccessLevel {
        match self.scopes.last() {
            Some(scope) => scope.ceiling,
            None => AccessLevel::Open,
        }
    }

    pub fn push(&mut self, scope: Scope) {
        trace!("push {:?} (depth {})", scope.kind, self.scopes.len());
        self.scopes.push(scope);
    }

    /// A `{` with no recognized header deepens the current scope; at file
    /// scope it opens an anonymous local body.
    pub fn open_brace(&mut self) {
        match self.scopes.last_mut() {
            Some(top) => top.depth += 1,
            None => self.push(Scope::new(ScopeKind::Body, AccessLevel::Open)),
        }
    }

    /// A `}` closes the innermost brace; an unmatched one is ignored.
    pub fn close_brace(&mut self) {
        match self.scopes.last_mut() {
            Some(top) if top.depth > 0 => top.depth -= 1,
            Some(top) => {
                trace!("pop {:?}", top.kind);
                self.scopes.pop();
            }
            None => trace!("unmatched closing brace at file scope"),
        }
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }
}

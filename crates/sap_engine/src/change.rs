use crate::level::{AccessLevel, Rank};

/// A whole-file rewriting intent, applied uniformly to every target line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessChange {
    /// Set each declaration to exactly this level.
    SingleLevel(AccessLevel),
    /// Raise each declaration one rank.
    IncreaseAccess,
    /// Lower each declaration one rank.
    DecreaseAccess,
    /// Promote everything promotable to `public`.
    MakeApi,
    /// Demote explicit `public`/`open` back to the implicit default.
    RemoveApi,
    /// Delete all access notation, restoring the implicit form.
    Strip,
}

/// Textual edit to a line's access keyword.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum LevelEdit {
    /// Write this keyword before the declaration introducer.
    Insert(AccessLevel),
    /// Respell the existing explicit keyword.
    Replace(AccessLevel),
    /// Delete the existing explicit keyword.
    Clear,
}

/// Outcome of applying an [`AccessChange`] to one declaration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Transition {
    /// The level the declaration holds afterwards, explicit or inherited.
    pub new_level: AccessLevel,
    pub edit: Option<LevelEdit>,
}

impl Transition {
    pub(crate) fn keep(level: AccessLevel) -> Transition {
        Transition {
            new_level: level,
            edit: None,
        }
    }
}

/// Decides the keyword edit for one declaration line.
///
/// `explicit` is the spelled-out keyword, if any; `inherited` is the level an
/// unannotated member takes from its container; `ceiling` is the tightest
/// post-transformation container level along the scope chain. Upward moves
/// clamp to the ceiling and report no edit when clamping would demote.
pub(crate) fn transition(
    change: AccessChange,
    explicit: Option<AccessLevel>,
    inherited: AccessLevel,
    ceiling: AccessLevel,
) -> Transition {
    let effective = explicit.unwrap_or(inherited);

    match change {
        AccessChange::SingleLevel(level) => {
            let target = level.min(ceiling);
            if target < level && target <= effective {
                return Transition::keep(effective);
            }
            spell_exactly(explicit, effective, target)
        }

        AccessChange::IncreaseAccess => {
            let rank = effective.rank();
            let raised = rank.raised().min(ceiling.rank());

            if raised < rank {
                return Transition::keep(effective);
            }
            if raised == rank {
                // Saturated at the top: canonicalize a spelled-out `open`.
                if rank == Rank::Exposed && explicit == Some(AccessLevel::Open) {
                    return Transition {
                        new_level: AccessLevel::Public,
                        edit: Some(LevelEdit::Replace(AccessLevel::Public)),
                    };
                }
                return Transition::keep(effective);
            }

            spell_rank(explicit, effective, inherited, raised)
        }

        AccessChange::DecreaseAccess => {
            let rank = effective.rank();
            let lowered = rank.lowered();

            if lowered == rank {
                // Saturated at the bottom: canonicalize a spelled-out
                // `fileprivate`.
                if rank == Rank::Restricted && explicit == Some(AccessLevel::Fileprivate) {
                    return Transition {
                        new_level: AccessLevel::Private,
                        edit: Some(LevelEdit::Replace(AccessLevel::Private)),
                    };
                }
                return Transition::keep(effective);
            }

            spell_rank(explicit, effective, inherited, lowered)
        }

        AccessChange::MakeApi => {
            if effective.rank() == Rank::Restricted || ceiling < AccessLevel::Public {
                return Transition::keep(effective);
            }
            match explicit {
                Some(AccessLevel::Public | AccessLevel::Open) => Transition::keep(effective),
                Some(_) => Transition {
                    new_level: AccessLevel::Public,
                    edit: Some(LevelEdit::Replace(AccessLevel::Public)),
                },
                None if effective >= AccessLevel::Public => Transition::keep(effective),
                None => Transition {
                    new_level: AccessLevel::Public,
                    edit: Some(LevelEdit::Insert(AccessLevel::Public)),
                },
            }
        }

        AccessChange::RemoveApi => match explicit {
            Some(AccessLevel::Public | AccessLevel::Open) => Transition {
                new_level: inherited,
                edit: Some(LevelEdit::Clear),
            },
            _ => Transition::keep(effective),
        },

        AccessChange::Strip => match explicit {
            Some(_) => Transition {
                new_level: inherited,
                edit: Some(LevelEdit::Clear),
            },
            None => Transition::keep(effective),
        },
    }
}

/// Writes `target` exactly, touching the line only when the spelling differs.
fn spell_exactly(
    explicit: Option<AccessLevel>,
    effective: AccessLevel,
    target: AccessLevel,
) -> Transition {
    match explicit {
        Some(spelled) if spelled == target => Transition::keep(effective),
        Some(_) => Transition {
            new_level: target,
            edit: Some(LevelEdit::Replace(target)),
        },
        None if effective == target => Transition::keep(effective),
        None => Transition {
            new_level: target,
            edit: Some(LevelEdit::Insert(target)),
        },
    }
}

/// Lands on a rank, writing its canonical spelling. Landing on the Default
/// rank clears any explicit keyword; the declaration then holds whatever it
/// inherits.
fn spell_rank(
    explicit: Option<AccessLevel>,
    effective: AccessLevel,
    inherited: AccessLevel,
    rank: Rank,
) -> Transition {
    match rank.canonical() {
        None => match explicit {
            Some(_) => Transition {
                new_level: inherited,
                edit: Some(LevelEdit::Clear),
            },
            None => Transition::keep(effective),
        },
        Some(level) => spell_exactly(explicit, effective, level),
    }
}

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use sap_lex::Keyword;

/// The five Swift access levels, ordered from most to least restrictive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccessLevel {
    Private,
    Fileprivate,
    Internal,
    Public,
    Open,
}

impl AccessLevel {
    /// The coarse three-step ladder the incremental transformations walk.
    pub fn rank(self) -> Rank {
        match self {
            AccessLevel::Private | AccessLevel::Fileprivate => Rank::Restricted,
            AccessLevel::Internal => Rank::Default,
            AccessLevel::Public | AccessLevel::Open => Rank::Exposed,
        }
    }

    pub fn keyword(self) -> Keyword {
        match self {
            AccessLevel::Private => Keyword::Private,
            AccessLevel::Fileprivate => Keyword::Fileprivate,
            AccessLevel::Internal => Keyword::Internal,
            AccessLevel::Public => Keyword::Public,
            AccessLevel::Open => Keyword::Open,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.keyword().as_str()
    }

    /// The access level spelled by a plain (non-setter) keyword.
    pub fn from_keyword(keyword: Keyword) -> Option<AccessLevel> {
        match keyword {
            Keyword::Private => Some(AccessLevel::Private),
            Keyword::Fileprivate => Some(AccessLevel::Fileprivate),
            Keyword::Internal => Some(AccessLevel::Internal),
            Keyword::Public => Some(AccessLevel::Public),
            Keyword::Open => Some(AccessLevel::Open),
            _ => None,
        }
    }

    /// The access level named by a `level(set)` setter annotation.
    pub fn from_setter_keyword(keyword: Keyword) -> Option<AccessLevel> {
        match keyword {
            Keyword::PrivateSet => Some(AccessLevel::Private),
            Keyword::FileprivateSet => Some(AccessLevel::Fileprivate),
            Keyword::InternalSet => Some(AccessLevel::Internal),
            Keyword::PublicSet => Some(AccessLevel::Public),
            Keyword::OpenSet => Some(AccessLevel::Open),
            _ => None,
        }
    }
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<AccessLevel, String> {
        match s {
            "private" => Ok(AccessLevel::Private),
            "fileprivate" => Ok(AccessLevel::Fileprivate),
            "internal" => Ok(AccessLevel::Internal),
            "public" => Ok(AccessLevel::Public),
            "open" => Ok(AccessLevel::Open),
            _ => Err(format!(
                "unknown access level `{}` (expected private, fileprivate, internal, public or open)",
                s
            )),
        }
    }
}

/// Collapsed view of the lattice: `private`/`fileprivate` are Restricted,
/// `internal` is Default, `public`/`open` are Exposed. Increase and decrease
/// move one rank at a time and write the rank's canonical spelling.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    Restricted,
    Default,
    Exposed,
}

impl Rank {
    pub fn raised(self) -> Rank {
        match self {
            Rank::Restricted => Rank::Default,
            Rank::Default | Rank::Exposed => Rank::Exposed,
        }
    }

    pub fn lowered(self) -> Rank {
        match self {
            Rank::Exposed => Rank::Default,
            Rank::Default | Rank::Restricted => Rank::Restricted,
        }
    }

    /// The keyword a transformation writes when landing on this rank. The
    /// Default rank is spelled by omission.
    pub fn canonical(self) -> Option<AccessLevel> {
        match self {
            Rank::Restricted => Some(AccessLevel::Private),
            Rank::Default => None,
            Rank::Exposed => Some(AccessLevel::Public),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessLevel, Rank};

    #[test]
    fn lattice_order() {
        assert!(AccessLevel::Private < AccessLevel::Fileprivate);
        assert!(AccessLevel::Fileprivate < AccessLevel::Internal);
        assert!(AccessLevel::Internal < AccessLevel::Public);
        assert!(AccessLevel::Public < AccessLevel::Open);
    }

    #[test]
    fn ranks_collapse_spelling_variants() {
        assert_eq!(AccessLevel::Private.rank(), AccessLevel::Fileprivate.rank());
        assert_eq!(AccessLevel::Public.rank(), AccessLevel::Open.rank());
        assert!(Rank::Restricted < Rank::Default);
        assert!(Rank::Default < Rank::Exposed);
    }

    #[test]
    fn rank_walk_saturates() {
        assert_eq!(Rank::Exposed.raised(), Rank::Exposed);
        assert_eq!(Rank::Restricted.lowered(), Rank::Restricted);
        assert_eq!(Rank::Restricted.raised(), Rank::Default);
        assert_eq!(Rank::Exposed.lowered(), Rank::Default);
    }

    #[test]
    fn parses_cli_spellings() {
        assert_eq!("public".parse(), Ok(AccessLevel::Public));
        assert!("friend".parse::<AccessLevel>().is_err());
    }
}

//! Fixture identity: the equality key for "same fixture".

use crate::normalizer::NormalizedName;
use crate::timestamp::CanonicalTimestamp;

/// `(start minute, home, away)` with both names normalized.
///
/// Equality is exact: swapping home and away, or moving the start by one
/// minute, yields a different identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventIdentity {
    pub at: CanonicalTimestamp,
    pub team1: NormalizedName,
    pub team2: NormalizedName,
}

impl EventIdentity {
    pub fn new(at: CanonicalTimestamp, team1: &str, team2: &str) -> Self {
        Self {
            at,
            team1: NormalizedName::new(team1),
            team2: NormalizedName::new(team2),
        }
    }

    pub fn same_teams(&self, team1: &NormalizedName, team2: &NormalizedName) -> bool {
        self.team1 == *team1 && self.team2 == *team2
    }
}

impl std::fmt::Display for EventIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} vs {}", self.at, self.team1, self.team2)
    }
}

/// What a targeted lookup is looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureQuery {
    /// Start time and team pair must all match.
    Exact(EventIdentity),
    /// Team pair only; the start time is ignored.
    Teams {
        team1: NormalizedName,
        team2: NormalizedName,
    },
}

impl FixtureQuery {
    pub fn exact(at: CanonicalTimestamp, team1: &str, team2: &str) -> Self {
        FixtureQuery::Exact(EventIdentity::new(at, team1, team2))
    }

    pub fn teams(team1: &str, team2: &str) -> Self {
        FixtureQuery::Teams {
            team1: NormalizedName::new(team1),
            team2: NormalizedName::new(team2),
        }
    }

    pub fn matches(&self, identity: &EventIdentity) -> bool {
        match self {
            FixtureQuery::Exact(target) => target == identity,
            FixtureQuery::Teams { team1, team2 } => identity.same_teams(team1, team2),
        }
    }

    /// Whether a record with these (already normalized) names is a candidate,
    /// regardless of its start time.
    pub fn matches_teams(&self, team1: &NormalizedName, team2: &NormalizedName) -> bool {
        match self {
            FixtureQuery::Exact(target) => target.same_teams(team1, team2),
            FixtureQuery::Teams { team1: q1, team2: q2 } => q1 == team1 && q2 == team2,
        }
    }
}

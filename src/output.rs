//! Output records
//!
//! One line per in-scope target:
//! `<target>, <program url>, <title>, <criticality>, <reward type>, <description>`
//!
//! Fields are written verbatim. There is no header row and embedded commas are
//! not escaped, so the lines are only loosely CSV.

use std::fmt;

use crate::api::Scope;

/// One emitted line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeRecord<'a> {
    pub target: &'a str,
    pub program_url: &'a str,
    pub title: &'a str,
    pub criticality: &'a str,
    pub reward_type: &'a str,
    pub description: &'a str,
}

impl<'a> ScopeRecord<'a> {
    pub fn from_scope(scope: &'a Scope, program_url: &'a str) -> Self {
        Self {
            target: &scope.target,
            program_url,
            title: &scope.title,
            criticality: &scope.criticality,
            reward_type: &scope.reward_type,
            description: &scope.target_description,
        }
    }
}

impl fmt::Display for ScopeRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}, {}",
            self.target,
            self.program_url,
            self.title,
            self.criticality,
            self.reward_type,
            self.description
        )
    }
}

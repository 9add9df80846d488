//! Wire types for the programs API
//!
//! Decoding is lenient: a missing field or an explicit `null` takes the field's
//! zero value instead of failing the whole document, and unknown fields are
//! ignored. Only malformed JSON or a wrongly typed value is an error.

use serde::{Deserialize, Deserializer};

/// One page of `GET /programs-api/programs`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgramListing {
    #[serde(default, deserialize_with = "null_as_default")]
    pub programs: Vec<ProgramSummary>,
}

impl ProgramListing {
    /// Program slugs in document order
    pub fn slugs(self) -> Vec<String> {
        self.programs.into_iter().map(|p| p.slug).collect()
    }
}

/// Listing entry; only the slug is used
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgramSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
}

/// `GET /programs-api/programs/{slug}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProgramDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub scopes: Vec<Scope>,
}

/// A target declared in or out of a program's scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Scope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Domain, asset name or wildcard
    #[serde(default, deserialize_with = "null_as_default")]
    pub target: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub out_of_scope: bool,

    /// e.g. "bounty", "no_bounty"
    #[serde(default, deserialize_with = "null_as_default")]
    pub reward_type: String,

    /// e.g. "Critical", "High"
    #[serde(default, deserialize_with = "null_as_default")]
    pub criticality: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub target_description: String,
}

impl Scope {
    pub fn is_in_scope(&self) -> bool {
        !self.out_of_scope
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

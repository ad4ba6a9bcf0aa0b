//! Required header registry.
//!
//! Every accepted upload must carry each of these column headers, spelled
//! exactly as listed. Matching is case-sensitive with no trimming.

/// Required CSV headers in display order.
pub const REQUIRED_FIELDS: [&str; 14] = [
    "account_linkedin_url",
    "prospect_linkedin_url",
    "product pitched",
    "email",
    "first name",
    "last name",
    "title",
    "department",
    "domain",
    "company name",
    "industry",
    "country",
    "region",
    "esp host",
];

/// Read-only view over [`REQUIRED_FIELDS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequiredFields;

impl RequiredFields {
    /// Fields in registry order.
    pub fn iter(self) -> impl Iterator<Item = &'static str> {
        REQUIRED_FIELDS.iter().copied()
    }

    /// Exact, case-sensitive membership.
    pub fn contains(self, header: &str) -> bool {
        REQUIRED_FIELDS.contains(&header)
    }
}

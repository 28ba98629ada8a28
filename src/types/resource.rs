use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Lookup collections the backend serves whole, for forms and filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceList {
    Countries,
    Themes,
    Donors,
    LeadOrgUnits,
}

impl ReferenceList {
    /// Path segment under the API root.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Countries => "countries",
            Self::Themes => "themes",
            Self::Donors => "donors",
            Self::LeadOrgUnits => "lead-org-units",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Countries => "Countries",
            Self::Themes => "Themes",
            Self::Donors => "Donors",
            Self::LeadOrgUnits => "Lead org units",
        }
    }
}

impl fmt::Display for ReferenceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// Dimensions the project-count summaries are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryDimension {
    Country,
    OrgUnit,
    Theme,
}

impl SummaryDimension {
    /// Final path segment, e.g. `by_country`.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Country => "by_country",
            Self::OrgUnit => "by_org_unit",
            Self::Theme => "by_theme",
        }
    }

    /// Key holding the group name in each summary row.
    pub fn name_key(self) -> &'static str {
        match self {
            Self::Country => "country_name",
            Self::OrgUnit => "org_unit_name",
            Self::Theme => "name",
        }
    }
}

impl fmt::Display for SummaryDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

//! Path table for every backend endpoint the dashboard talks to.

use const_format::concatcp;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{Result, TrackerError};
use crate::types::{ProjectId, ReferenceList, SummaryDimension};

/// Characters left untouched when a caller-supplied value becomes a path
/// segment; matches the browser's `encodeURIComponent`.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const PROJECTS: &str = "/projects/";
const DASHBOARD: &str = "/dashboard/";
const SUMMARY: &str = concatcp!(PROJECTS, "summary/");

pub const DASHBOARD_KPIS: &str = concatcp!(DASHBOARD, "kpis/");
pub const VALUE_BY_COUNTRY: &str = concatcp!(DASHBOARD, "value-by-country/");
pub const VALUE_BY_LEAD_ORG: &str = concatcp!(DASHBOARD, "value-by-lead-org/");
pub const VALUE_BY_THEME: &str = concatcp!(DASHBOARD, "value-by-theme/");
pub const INSIGHTS: &str = concatcp!(PROJECTS, "insights/");
pub const WORLD_MAP_DATA: &str = concatcp!(SUMMARY, "world_map_data/");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Projects,
    Project(&'a ProjectId),
    ProjectsByCountry(&'a str),
    ProjectsByStatus(&'a str),
    Reference(ReferenceList),
    DashboardKpis,
    ValueByCountry,
    ValueByLeadOrg,
    ValueByTheme,
    Insights,
    ProjectCountBy(SummaryDimension),
    WorldMapData,
}

impl Endpoint<'_> {
    /// Path relative to the API base, always with a trailing slash.
    ///
    /// Fails for caller-supplied segments that a URL parser would collapse
    /// (empty, `.` or `..`), so no request can land on a parent path.
    pub fn path(&self) -> Result<String> {
        let path = match self {
            Endpoint::Projects => PROJECTS.to_string(),
            Endpoint::Project(id) => {
                format!("{PROJECTS}{}/", checked_segment("id", &id.to_string())?)
            }
            Endpoint::ProjectsByCountry(name) => {
                format!("{PROJECTS}country/{}/", checked_segment("country", name)?)
            }
            Endpoint::ProjectsByStatus(status) => {
                format!("{PROJECTS}status/{}/", checked_segment("status", status)?)
            }
            Endpoint::Reference(list) => format!("/{}/", list.segment()),
            Endpoint::DashboardKpis => DASHBOARD_KPIS.to_string(),
            Endpoint::ValueByCountry => VALUE_BY_COUNTRY.to_string(),
            Endpoint::ValueByLeadOrg => VALUE_BY_LEAD_ORG.to_string(),
            Endpoint::ValueByTheme => VALUE_BY_THEME.to_string(),
            Endpoint::Insights => INSIGHTS.to_string(),
            Endpoint::ProjectCountBy(dimension) => format!("{SUMMARY}{}/", dimension.segment()),
            Endpoint::WorldMapData => WORLD_MAP_DATA.to_string(),
        };
        Ok(path)
    }
}

fn checked_segment(field: &'static str, value: &str) -> Result<String> {
    let decoded = percent_decode_str(value).decode_utf8_lossy();
    if value.is_empty() || decoded == "." || decoded == ".." {
        return Err(TrackerError::InvalidSegment {
            field,
            value: value.to_string(),
        });
    }
    Ok(encode_segment(value))
}

pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

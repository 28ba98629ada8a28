//! Navigation table: which page renders for which path, and which path
//! segments are handed to that page as parameters.

use std::collections::BTreeMap;
use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use serde::Serialize;
use url::Url;

use crate::error::{Result, TrackerError};

/// RFC 3986 unreserved characters stay as they are.
const PARAM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Page {
    ProjectList,
    Dashboard,
    ProjectDetail,
    ProjectCreate,
    ProjectEdit,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::ProjectList => "Projects",
            Page::Dashboard => "Dashboard",
            Page::ProjectDetail => "Project details",
            Page::ProjectCreate => "New project",
            Page::ProjectEdit => "Edit project",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Serialize)]
pub struct RouteDef {
    /// Pattern; `:name` binds one path segment.
    pub path: &'static str,
    pub name: &'static str,
    pub page: Page,
    /// Whether bound segments are forwarded to the page as inputs.
    pub props: bool,
}

pub const ROUTES: &[RouteDef] = &[
    RouteDef {
        path: "/",
        name: "Projects",
        page: Page::ProjectList,
        props: false,
    },
    RouteDef {
        path: "/dashboard",
        name: "Dashboard",
        page: Page::Dashboard,
        props: false,
    },
    RouteDef {
        path: "/projects/:id",
        name: "ProjectDetails",
        page: Page::ProjectDetail,
        props: true,
    },
    RouteDef {
        path: "/projects/create",
        name: "ProjectCreate",
        page: Page::ProjectCreate,
        props: false,
    },
    RouteDef {
        path: "/projects/:id/edit",
        name: "ProjectEdit",
        page: Page::ProjectEdit,
        props: true,
    },
];

enum Segment {
    Static(&'static str),
    Param(&'static str),
}

struct CompiledRoute {
    def: &'static RouteDef,
    segments: Vec<Segment>,
    regex: Regex,
}

impl CompiledRoute {
    fn compile(def: &'static RouteDef) -> Self {
        let segments: Vec<Segment> = def
            .path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name),
                None => Segment::Static(s),
            })
            .collect();

        let mut pattern = String::from("(?i)^");
        for segment in &segments {
            match segment {
                Segment::Static(s) => {
                    pattern.push('/');
                    pattern.push_str(&regex::escape(s));
                }
                Segment::Param(name) => {
                    pattern.push_str(&format!("/(?P<{name}>[^/]+)"));
                }
            }
        }
        pattern.push_str("/?$");

        let regex = Regex::new(&pattern).expect("route patterns are static and valid");

        Self {
            def,
            segments,
            regex,
        }
    }

    /// Static segments outrank parameters; longer patterns outrank shorter.
    fn rank(&self) -> (usize, usize) {
        let statics = self
            .segments
            .iter()
            .filter(|s| matches!(s, Segment::Static(_)))
            .count();
        (statics, self.segments.len())
    }

    fn params(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(*name),
            Segment::Static(_) => None,
        })
    }
}

/// A path matched against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub route: &'static RouteDef,
    pub params: BTreeMap<String, String>,
}

impl PartialEq for RouteDef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for RouteDef {}

impl ResolvedRoute {
    pub fn page(&self) -> Page {
        self.route.page
    }

    pub fn name(&self) -> &'static str {
        self.route.name
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Inputs handed to the page: the bound params, or nothing when the
    /// route does not forward them.
    pub fn props(&self) -> Option<&BTreeMap<String, String>> {
        self.route.props.then_some(&self.params)
    }
}

pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    pub fn new(defs: &'static [RouteDef]) -> Self {
        Self {
            routes: defs.iter().map(CompiledRoute::compile).collect(),
        }
    }

    pub fn standard() -> Self {
        Self::new(ROUTES)
    }

    pub fn routes(&self) -> impl Iterator<Item = &'static RouteDef> + '_ {
        self.routes.iter().map(|r| r.def)
    }

    /// Match a path (or full URL) to a page. Query string and fragment are
    /// ignored. `None` means no page exists for the path.
    pub fn resolve(&self, location: &str) -> Option<ResolvedRoute> {
        let path = location_path(location);

        let mut best: Option<(&CompiledRoute, regex::Captures<'_>)> = None;
        for route in &self.routes {
            let Some(captures) = route.regex.captures(&path) else {
                continue;
            };
            let better = match &best {
                Some((current, _)) => route.rank() > current.rank(),
                None => true,
            };
            if better {
                best = Some((route, captures));
            }
        }

        best.map(|(route, captures)| {
            let params = route
                .params()
                .filter_map(|name| {
                    captures.name(name).map(|m| {
                        let value = percent_decode_str(m.as_str())
                            .decode_utf8_lossy()
                            .into_owned();
                        (name.to_string(), value)
                    })
                })
                .collect();
            ResolvedRoute {
                route: route.def,
                params,
            }
        })
    }

    /// Like [`resolve`](Self::resolve) but reports the miss as an error.
    pub fn resolve_or_err(&self, location: &str) -> Result<ResolvedRoute> {
        self.resolve(location)
            .ok_or_else(|| TrackerError::RouteNotFound(location.to_string()))
    }

    /// Build the path for a page, filling its parameters.
    pub fn href(&self, page: Page, params: &[(&str, &str)]) -> Result<String> {
        let route = self
            .routes
            .iter()
            .find(|r| r.def.page == page)
            .ok_or_else(|| TrackerError::RouteNotFound(page.title().to_string()))?;

        let mut path = String::new();
        let mut used = Vec::new();
        for segment in &route.segments {
            path.push('/');
            match segment {
                Segment::Static(s) => path.push_str(s),
                Segment::Param(name) => {
                    let value = params
                        .iter()
                        .find(|(k, _)| k == name)
                        .map(|(_, v)| *v)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| TrackerError::MissingRouteParam {
                            route: route.def.name,
                            param: name.to_string(),
                        })?;
                    path.push_str(&utf8_percent_encode(value, PARAM).to_string());
                    used.push((*name, value));
                }
            }
        }

        if path.is_empty() {
            path.push('/');
        }

        // A value equal to a static segment, e.g. id "create", lands on a more specific route
        if self.resolve(&path).map(|r| r.page()) != Some(page) {
            let (param, value) = used.first().copied().unwrap_or_default();
            return Err(TrackerError::AmbiguousRouteParam {
                route: route.def.name,
                param: param.to_string(),
                value: value.to_string(),
            });
        }
        Ok(path)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn location_path(location: &str) -> String {
    if let Ok(url) = Url::parse(location) {
        if !url.cannot_be_a_base() {
            return url.path().to_string();
        }
    }

    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

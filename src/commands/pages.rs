//! Render dashboard pages by path, the way the web front end would after
//! resolving a URL through the route table.

use colored::Colorize;
use serde_json::{json, Value};
use tabled::Tabled;
use tracing::debug;

use pag_tracker::api::{dashboard, projects, reference};
use pag_tracker::error::{Result, TrackerError};
use pag_tracker::routes::RouteDef;
use pag_tracker::types::{ListParams, ProjectId};
use pag_tracker::{ApiClient, Page, ResolvedRoute, RouteTable};

use crate::cli::ListView;
use crate::commands::projects::{print_details, print_list};
use crate::output;

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "Path")]
    path: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Page")]
    page: String,
    #[tabled(rename = "Params")]
    props: &'static str,
}

impl From<&&'static RouteDef> for RouteRow {
    fn from(def: &&'static RouteDef) -> Self {
        Self {
            path: def.path,
            name: def.name,
            page: def.page.title().to_string(),
            props: if def.props { "forwarded" } else { "-" },
        }
    }
}

pub fn routes(table: &RouteTable) {
    let defs: Vec<&'static RouteDef> = table.routes().collect();
    output::print_table(&defs, |d| RouteRow::from(d));
}

pub async fn open(client: &ApiClient, table: &RouteTable, location: &str) -> Result<()> {
    let route = table.resolve_or_err(location)?;
    debug!(route = route.name(), params = ?route.params, "resolved page");

    match route.page() {
        Page::ProjectList => project_list(client).await,
        Page::Dashboard => dashboard_page(client).await,
        Page::ProjectDetail => {
            let id = forwarded_id(&route)?;
            let body = projects::get_project(client, id).await?;
            heading(&route);
            output::print_item(&body, print_details);
            Ok(())
        }
        Page::ProjectCreate => {
            let options = form_options(client).await?;
            heading(&route);
            output::print_value(&options);
            print_hint(&route, None);
            Ok(())
        }
        Page::ProjectEdit => {
            let id = forwarded_id(&route)?;
            let (project, options) =
                tokio::try_join!(projects::get_project(client, id.clone()), form_options(client))?;
            heading(&route);
            if output::is_json_output() {
                output::print_value(&json!({ "project": project, "options": options }));
            } else {
                print_details(&project);
                println!();
                output::print_value(&options);
            }
            print_hint(&route, Some(&id));
            Ok(())
        }
    }
}

fn heading(route: &ResolvedRoute) {
    if !output::is_json_output() {
        println!("{}\n", route.page().title().bold().underline());
    }
}

/// Form pages end with the command that submits them; JSON output stays a
/// single document.
fn print_hint(route: &ResolvedRoute, id: Option<&ProjectId>) {
    if let Some(hint) = form_hint(route.page(), id, output::is_json_output()) {
        output::print_message(&hint);
    }
}

fn form_hint(page: Page, id: Option<&ProjectId>, json: bool) -> Option<String> {
    if json {
        return None;
    }
    match (page, id) {
        (Page::ProjectCreate, _) => {
            Some("Submit with: pagtrack project create --data '<json>'".to_string())
        }
        (Page::ProjectEdit, Some(id)) => Some(format!(
            "Save with: pagtrack project update {id} --data '<json>'"
        )),
        _ => None,
    }
}

/// The `id` a detail or edit page receives from its path.
fn forwarded_id(route: &ResolvedRoute) -> Result<ProjectId> {
    route
        .props()
        .and_then(|props| props.get("id"))
        .map(|id| ProjectId::parse(id))
        .ok_or_else(|| TrackerError::MissingRouteParam {
            route: route.name(),
            param: "id".to_string(),
        })
}

async fn project_list(client: &ApiClient) -> Result<()> {
    let body = projects::list_projects(client, &ListParams::new()).await?;
    print_list(&body, ListView::Table);
    Ok(())
}

async fn dashboard_page(client: &ApiClient) -> Result<()> {
    let (kpis, by_country, by_lead_org, by_theme) = tokio::try_join!(
        dashboard::kpis(client),
        dashboard::value_by_country(client),
        dashboard::value_by_lead_org(client),
        dashboard::value_by_theme(client),
    )?;

    output::print_value(&json!({
        "kpis": kpis,
        "value_by_country": by_country,
        "value_by_lead_org": by_lead_org,
        "value_by_theme": by_theme,
    }));
    Ok(())
}

/// Reference lists a project form offers as choices.
async fn form_options(client: &ApiClient) -> Result<Value> {
    let (countries, themes, donors, lead_org_units) = tokio::try_join!(
        reference::countries(client),
        reference::themes(client),
        reference::donors(client),
        reference::lead_org_units(client),
    )?;

    Ok(json!({
        "countries": countries,
        "themes": themes,
        "donors": donors,
        "lead_org_units": lead_org_units,
    }))
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn test_forwarded_id() {
        let table = RouteTable::standard();
        let route = table.resolve("/projects/31/edit").unwrap();
        assert_eq!(forwarded_id(&route).unwrap(), ProjectId::Number(31));

        let route = table.resolve("/projects/create").unwrap();
        assert!(matches!(
            forwarded_id(&route),
            Err(TrackerError::MissingRouteParam { .. })
        ));
    }

    #[test]
    fn test_form_hint_only_in_text_mode() {
        let id = ProjectId::Number(9);
        assert_eq!(
            form_hint(Page::ProjectEdit, Some(&id), false).as_deref(),
            Some("Save with: pagtrack project update 9 --data '<json>'")
        );
        assert!(form_hint(Page::ProjectCreate, None, false).is_some());
        assert_eq!(form_hint(Page::ProjectCreate, None, true), None);
        assert_eq!(form_hint(Page::ProjectEdit, Some(&id), true), None);
        assert_eq!(form_hint(Page::Dashboard, None, false), None);
    }

    #[tokio::test]
    async fn test_open_unknown_path_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let client = ApiClient::builder(format!("{}/api", server.uri()))
            .build()
            .unwrap();

        let result = open(&client, &RouteTable::standard(), "/nonexistent").await;
        assert!(matches!(result, Err(TrackerError::RouteNotFound(_))));
    }

    #[tokio::test]
    async fn test_open_detail_fetches_forwarded_project() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/projects/7/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": 7, "title": "Wells" })),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = ApiClient::builder(format!("{}/api", server.uri()))
            .build()
            .unwrap();

        open(&client, &RouteTable::standard(), "/projects/7")
            .await
            .unwrap();
    }
}

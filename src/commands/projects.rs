use std::path::Path;

use colored::Colorize;
use serde_json::Value;
use tabled::Tabled;

use pag_tracker::api::projects;
use pag_tracker::error::{Result, TrackerError};
use pag_tracker::types::{list_count, list_items, NamedRef, ProjectId, ProjectSummary};
use pag_tracker::ApiClient;

use crate::cli::{ListView, PayloadArgs, ProjectListArgs};
use crate::output::{self, format_date, format_money, status_colored, truncate};

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Lead org unit")]
    lead_org_unit: String,
    #[tabled(rename = "PAG value")]
    pag_value: String,
}

impl From<&ProjectSummary> for ProjectRow {
    fn from(project: &ProjectSummary) -> Self {
        Self {
            id: project
                .id
                .as_ref()
                .map(ProjectId::to_string)
                .unwrap_or_default(),
            title: truncate(&project.title, 50),
            status: project
                .status
                .as_deref()
                .map(status_colored)
                .unwrap_or_default(),
            country: project
                .country
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            lead_org_unit: project
                .lead_org_unit
                .as_ref()
                .map(|u| truncate(&u.name, 30))
                .unwrap_or_default(),
            pag_value: format_money(project.pag_value.as_ref()),
        }
    }
}

pub async fn list(client: &ApiClient, args: ProjectListArgs) -> Result<()> {
    let params = args.list_params();

    let body = match (&args.country, &args.status) {
        (Some(country), _) => projects::projects_by_country(client, country, &params).await?,
        (None, Some(status)) => projects::projects_by_status(client, status, &params).await?,
        (None, None) => projects::list_projects(client, &params).await?,
    };

    print_list(&body, args.view);
    Ok(())
}

pub fn print_list(body: &Value, view: ListView) {
    if output::is_json_output() || view == ListView::Full {
        output::print_value(body);
        return;
    }

    let summaries: Vec<ProjectSummary> = list_items(body)
        .iter()
        .filter_map(ProjectSummary::from_value)
        .collect();
    output::print_table(&summaries, |p| ProjectRow::from(p));

    if let Some(count) = list_count(body) {
        output::print_message(&format!("{} of {count} projects", summaries.len()));
    }
}

pub async fn view(client: &ApiClient, id: &str) -> Result<()> {
    let body = projects::get_project(client, ProjectId::parse(id)).await?;
    output::print_item(&body, print_details);
    Ok(())
}

pub fn print_details(body: &Value) {
    let Some(project) = ProjectSummary::from_value(body) else {
        println!("{}", output::render_value(body));
        return;
    };

    let id = project.id.as_ref().map(ProjectId::to_string).unwrap_or_default();
    println!("{} {}", format!("#{id}").bright_black(), project.title.bold());
    println!();

    println!(
        "Status:        {}",
        project.status.as_deref().map(status_colored).unwrap_or_else(|| "-".to_string())
    );
    println!("Fund:          {}", project.fund.as_deref().unwrap_or("-"));
    println!(
        "Country:       {}",
        project.country.as_ref().map(|c| c.name.as_str()).unwrap_or("-")
    );
    println!(
        "Lead org unit: {}",
        project
            .lead_org_unit
            .as_ref()
            .map(|u| u.name.as_str())
            .unwrap_or("-")
    );
    println!("Themes:        {}", join_names(&project.themes));
    println!("Donors:        {}", join_names(&project.donors));
    println!("PAG value:     {}", format_money(project.pag_value.as_ref()));
    println!("Budget:        {}", format_money(project.budget_amount.as_ref()));
    println!(
        "Period:        {} to {}",
        project.start_date.as_deref().unwrap_or("?"),
        project.end_date.as_deref().unwrap_or("?")
    );
    if let Some(created) = &project.created_at {
        println!("Created:       {}", format_date(created));
    }
}

fn join_names(refs: &[NamedRef]) -> String {
    if refs.is_empty() {
        "-".to_string()
    } else {
        refs.iter().map(|r| r.name.as_str()).collect::<Vec<_>>().join(", ")
    }
}

pub async fn create(client: &ApiClient, args: PayloadArgs) -> Result<()> {
    let payload = read_payload(&args)?;
    let body = projects::create_project(client, &payload).await?;
    report_saved("Created", &body);
    Ok(())
}

pub async fn update(client: &ApiClient, id: &str, args: PayloadArgs) -> Result<()> {
    let payload = read_payload(&args)?;
    let body = projects::update_project(client, ProjectId::parse(id), &payload).await?;
    report_saved("Updated", &body);
    Ok(())
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<()> {
    projects::delete_project(client, ProjectId::parse(id)).await?;
    output::print_message(&format!("Deleted project {id}"));
    Ok(())
}

fn report_saved(verb: &str, body: &Value) {
    if output::is_json_output() {
        output::print_value(body);
        return;
    }
    let project = ProjectSummary::from_value(body).unwrap_or_default();
    let id = project.id.map(|id| id.to_string()).unwrap_or_else(|| "?".to_string());
    output::print_message(&format!("{verb} project {id} - {}", project.title));
}

/// Load a create/update payload from `--data` or `--file`. It must be a
/// JSON object.
pub fn read_payload(args: &PayloadArgs) -> Result<Value> {
    let raw = match (&args.data, &args.file) {
        (Some(data), _) => data.clone(),
        (None, Some(path)) => read_file(path)?,
        (None, None) => {
            return Err(TrackerError::InvalidPayload(
                "provide --data '<json>' or --file <path>".to_string(),
            ))
        }
    };

    let value: Value = serde_json::from_str(&raw)
        .map_err(|e| TrackerError::InvalidPayload(format!("not valid JSON: {e}")))?;

    if !value.is_object() {
        return Err(TrackerError::InvalidPayload(
            "expected a JSON object".to_string(),
        ));
    }

    Ok(value)
}

fn read_file(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

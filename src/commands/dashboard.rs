use pag_tracker::api::{dashboard, summary};
use pag_tracker::error::Result;
use pag_tracker::ApiClient;

use crate::cli::{DashboardCommands, SummaryCommands};
use crate::output;

pub async fn show(client: &ApiClient, metric: DashboardCommands) -> Result<()> {
    let body = match metric {
        DashboardCommands::Kpis => dashboard::kpis(client).await?,
        DashboardCommands::ValueByCountry => dashboard::value_by_country(client).await?,
        DashboardCommands::ValueByLeadOrg => dashboard::value_by_lead_org(client).await?,
        DashboardCommands::ValueByTheme => dashboard::value_by_theme(client).await?,
        DashboardCommands::Insights => dashboard::ai_insights(client).await?,
    };

    output::print_value(&body);
    Ok(())
}

pub async fn show_summary(client: &ApiClient, view: SummaryCommands) -> Result<()> {
    let body = match view.dimension() {
        Some(dimension) => summary::project_count_by(client, dimension).await?,
        None => summary::world_map_data(client).await?,
    };

    output::print_value(&body);
    Ok(())
}

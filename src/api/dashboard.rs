//! Aggregate metrics for the dashboard page. Shapes are defined by the
//! backend; value-by-country, for instance, answers with
//! `{ "single_countries_data": [...], "combined_data": [...] }`.

use serde_json::Value;

use super::Endpoint;
use crate::client::ApiClient;
use crate::error::Result;

pub async fn kpis(client: &ApiClient) -> Result<Value> {
    client.get(&Endpoint::DashboardKpis.path()?, &[]).await
}

pub async fn value_by_country(client: &ApiClient) -> Result<Value> {
    client.get(&Endpoint::ValueByCountry.path()?, &[]).await
}

pub async fn value_by_lead_org(client: &ApiClient) -> Result<Value> {
    client.get(&Endpoint::ValueByLeadOrg.path()?, &[]).await
}

pub async fn value_by_theme(client: &ApiClient) -> Result<Value> {
    client.get(&Endpoint::ValueByTheme.path()?, &[]).await
}

pub async fn ai_insights(client: &ApiClient) -> Result<Value> {
    client.get(&Endpoint::Insights.path()?, &[]).await
}

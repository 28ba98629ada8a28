use serde_json::Value;

use super::Endpoint;
use crate::client::ApiClient;
use crate::error::Result;
use crate::types::ReferenceList;

pub async fn list_reference(client: &ApiClient, list: ReferenceList) -> Result<Value> {
    client.get(&Endpoint::Reference(list).path()?, &[]).await
}

pub async fn countries(client: &ApiClient) -> Result<Value> {
    list_reference(client, ReferenceList::Countries).await
}

pub async fn themes(client: &ApiClient) -> Result<Value> {
    list_reference(client, ReferenceList::Themes).await
}

pub async fn donors(client: &ApiClient) -> Result<Value> {
    list_reference(client, ReferenceList::Donors).await
}

pub async fn lead_org_units(client: &ApiClient) -> Result<Value> {
    list_reference(client, ReferenceList::LeadOrgUnits).await
}

use serde_json::Value;

use super::Endpoint;
use crate::client::ApiClient;
use crate::error::Result;
use crate::types::SummaryDimension;

/// Project counts grouped by one dimension, e.g.
/// `[{"country_name": "Kenya", "project_count": 4}]`.
pub async fn project_count_by(client: &ApiClient, dimension: SummaryDimension) -> Result<Value> {
    client
        .get(&Endpoint::ProjectCountBy(dimension).path()?, &[])
        .await
}

pub async fn world_map_data(client: &ApiClient) -> Result<Value> {
    client.get(&Endpoint::WorldMapData.path()?, &[]).await
}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

use pag_tracker::api::reference;
use pag_tracker::error::Result;
use pag_tracker::types::{list_items, ReferenceList};
use pag_tracker::ApiClient;

use crate::output::{self, truncate};

/// Country, theme, donor and org unit records all share this shape.
#[derive(Deserialize, Serialize)]
struct LookupEntry {
    id: Value,
    name: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Tabled)]
struct LookupRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&LookupEntry> for LookupRow {
    fn from(entry: &LookupEntry) -> Self {
        Self {
            id: output::cell(&entry.id),
            name: entry.name.clone(),
            description: entry
                .description
                .as_deref()
                .map(|d| truncate(d, 60))
                .unwrap_or_default(),
        }
    }
}

pub async fn list(client: &ApiClient, list: ReferenceList) -> Result<()> {
    let body = reference::list_reference(client, list).await?;

    if output::is_json_output() {
        output::print_value(&body);
        return Ok(());
    }

    let entries: Option<Vec<LookupEntry>> = list_items(&body)
        .iter()
        .map(|item| serde_json::from_value(item.clone()).ok())
        .collect();

    match entries {
        Some(entries) if !entries.is_empty() => {
            output::print_table(&entries, |e| LookupRow::from(e));
            output::print_message(&format!("{}: {}", list.label(), entries.len()));
        }
        _ => output::print_value(&body),
    }

    Ok(())
}

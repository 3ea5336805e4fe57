pub mod account;
pub mod activity;
pub mod auth;
pub mod participant;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cli::error::{CliError, CliResult};
use crate::controllers::{FieldName, RemoteCollection, SortDirection};

/// Common pagination and sorting parameters for all list commands
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    /// 1-based page number
    pub page: u32,
    pub size: u32,
    pub direction: SortDirection,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            direction: SortDirection::Desc,
        }
    }
}

/// Turns a failed load into an error, otherwise renders the page as
/// pretty JSON or through `table`.
fn render_page<T, S, K>(
    collection: &RemoteCollection<T, S, K>,
    what: &'static str,
    format: &str,
    table: impl FnOnce(&RemoteCollection<T, S, K>) -> String,
) -> CliResult<String>
where
    T: Serialize + DeserializeOwned,
    S: FieldName,
    K: FieldName,
{
    if let Some(message) = collection.error() {
        return Err(CliError::FetchFailed {
            what,
            message: message.to_string(),
        });
    }

    match format {
        "json" => Ok(serde_json::to_string_pretty(collection.data())?),
        _ if collection.data().is_empty() => Ok(format!("No {} found.", what)),
        _ => Ok(table(collection)),
    }
}

#[cfg(test)]
mod test_support;


#[cfg(test)]
#[path = "activity_test.rs"]
mod activity_test;

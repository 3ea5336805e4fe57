use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tabled::{Table, Tabled};

use crate::cli::api_client::ApiClient;
use crate::cli::commands::{PageParams, render_page};
use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, or_dash, page_footer, truncate_with_ellipsis};
use crate::controllers::validation::rules::{
    email, max, max_length, min, min_length, phone, required,
};
use crate::controllers::{
    AlwaysConfirm, CollectionConfig, Confirm, FieldName, FilterValue, FormValidation, NoRefresh,
    RemoteCollection, TableActionOptions,
};
use crate::models::{Activity, ActivityFilter, ActivityFormField, ActivitySort};

type Activities = RemoteCollection<Activity, ActivitySort, ActivityFilter>;

/// Filters accepted by `activity list`
#[derive(Debug, Default)]
pub struct ActivityQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub approved: bool,
    pub sort: Option<ActivitySort>,
}

#[derive(Tabled)]
struct ActivityDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Starts")]
    start_date: String,
    #[tabled(rename = "Seats")]
    seats: String,
    #[tabled(rename = "Organizer")]
    organizer: String,
}

impl From<&Activity> for ActivityDisplay {
    fn from(activity: &Activity) -> Self {
        let seats = match (activity.current_participants, activity.capacity_limit) {
            (Some(taken), Some(limit)) => format!("{}/{}", taken, limit),
            (None, Some(limit)) => format!("0/{}", limit),
            _ => "-".to_string(),
        };
        Self {
            id: activity.id.clone(),
            name: truncate_with_ellipsis(&activity.activity_name, 40),
            status: or_dash(activity.activity_status.as_deref()),
            start_date: or_dash(activity.start_date.as_deref()),
            seats,
            organizer: activity
                .organization_name
                .as_deref()
                .map(|o| truncate_with_ellipsis(o, 30))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// List activities, one server page at a time
pub async fn list_activities(
    api_client: &ApiClient,
    query: ActivityQuery,
    page: PageParams,
    format: &str,
) -> CliResult<String> {
    let mut config = CollectionConfig::new(
        api_client.url("/activities"),
        query.sort.unwrap_or(ActivitySort::StartDate),
    )
    .sort_direction(page.direction)
    .page_size(page.size)
    .filters([
        (ActivityFilter::Search, FilterValue::from(query.search.unwrap_or_default())),
        (ActivityFilter::Status, FilterValue::from(query.status)),
        (ActivityFilter::StartDate, FilterValue::from(query.from)),
        (ActivityFilter::EndDate, FilterValue::from(query.to)),
    ]);
    if query.approved {
        config = config.additional_param("isApproved", "true");
    }

    let activities: Activities = api_client.collection(config, page.page).await;
    render_page(&activities, "activities", format, format_table)
}

fn format_table(activities: &Activities) -> String {
    let rows: Vec<ActivityDisplay> = activities.data().iter().map(|a| a.into()).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    format!("{}\n{}", table, page_footer(activities))
}

/// Create an activity from a JSON document
pub async fn create_activity(api_client: &ApiClient, file: &Path) -> CliResult<String> {
    let body = read_activity_file(file)?;
    validate_activity(&body)?;

    let mut actions = api_client.table_actions(AlwaysConfirm);
    if actions
        .handle_create(&api_client.url("/activities"), body, &mut NoRefresh)
        .await
    {
        Ok("✓ Created activity".to_string())
    } else {
        Err(action_failed(actions.error()))
    }
}

/// Update an activity from a JSON document; the id in the path wins
pub async fn update_activity(api_client: &ApiClient, id: &str, file: &Path) -> CliResult<String> {
    let mut body = read_activity_file(file)?;
    validate_activity(&body)?;
    if let Value::Object(fields) = &mut body {
        fields.insert("id".to_string(), Value::String(id.to_string()));
    }

    let mut actions = api_client.table_actions(AlwaysConfirm);
    if actions
        .handle_update(&api_client.url(&format!("/activities/{}", id)), body, &mut NoRefresh)
        .await
    {
        Ok(format!("✓ Updated activity: {}", id))
    } else {
        Err(action_failed(actions.error()))
    }
}

/// Delete an activity. Without `force` the user is asked first.
pub async fn delete_activity(
    api_client: &ApiClient,
    id: &str,
    force: bool,
    confirm: impl Confirm + Send + 'static,
) -> CliResult<String> {
    let mut actions = api_client
        .table_actions(confirm)
        .with_options(TableActionOptions {
            confirm_delete: !force,
        });

    let name = format!("activity {}", id);
    if actions
        .handle_delete(&api_client.url("/activities"), id, Some(&name), &mut NoRefresh)
        .await
    {
        return Ok(format!("✓ Deleted activity: {}", id));
    }

    match actions.error() {
        Some(message) => Err(CliError::ActionFailed {
            message: message.to_string(),
        }),
        None => Ok("Delete cancelled.".to_string()),
    }
}

pub async fn change_status(api_client: &ApiClient, id: &str, status: &str) -> CliResult<String> {
    let mut actions = api_client.table_actions(AlwaysConfirm);
    if actions
        .handle_status_change(&api_client.url("/activities"), id, status, &mut NoRefresh)
        .await
    {
        Ok(format!("✓ Activity {} is now {}", id, status))
    } else {
        Err(action_failed(actions.error()))
    }
}

fn action_failed(error: Option<&str>) -> CliError {
    CliError::ActionFailed {
        message: error.unwrap_or("Operation failed").to_string(),
    }
}

fn read_activity_file(path: &Path) -> CliResult<Value> {
    let content = fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let body: Value = serde_json::from_str(&content).map_err(|e| CliError::InvalidInput {
        message: format!("{} is not valid JSON: {}", path.display(), e),
    })?;
    if !body.is_object() {
        return Err(CliError::InvalidInput {
            message: format!("{} must contain a JSON object", path.display()),
        });
    }
    Ok(body)
}

pub(crate) fn activity_form() -> FormValidation<ActivityFormField> {
    FormValidation::new(std::iter::empty::<(ActivityFormField, String)>())
        .with_rules(
            ActivityFormField::ActivityName,
            vec![required(), min_length(3), max_length(255)],
        )
        .with_rules(ActivityFormField::Description, vec![max_length(5000)])
        .with_rules(ActivityFormField::CapacityLimit, vec![min(1.0), max(100_000.0)])
        .with_rules(ActivityFormField::ContactEmail, vec![email()])
        .with_rules(ActivityFormField::ContactPhone, vec![phone()])
}

/// Runs the activity form rules over the document's fields.
fn validate_activity(body: &Value) -> CliResult<()> {
    const FIELDS: [ActivityFormField; 6] = [
        ActivityFormField::ActivityName,
        ActivityFormField::Description,
        ActivityFormField::Address,
        ActivityFormField::CapacityLimit,
        ActivityFormField::ContactEmail,
        ActivityFormField::ContactPhone,
    ];

    let mut form = activity_form();
    form.set_values(FIELDS.iter().map(|field| (*field, field_text(body, field.name()))));
    if form.validate_form() {
        return Ok(());
    }

    let message = form
        .errors()
        .iter()
        .map(|(field, error)| format!("{}: {}", field.name(), error))
        .collect::<Vec<_>>()
        .join("; ");
    Err(CliError::InvalidInput { message })
}

fn field_text(body: &Value, key: &str) -> String {
    match body.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

use tabled::{Table, Tabled};

use crate::cli::api_client::ApiClient;
use crate::cli::commands::{PageParams, render_page};
use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, or_dash, page_footer, truncate_with_ellipsis};
use crate::controllers::{AlwaysConfirm, CollectionConfig, FilterValue, RemoteCollection};
use crate::models::{Participant, ParticipantFilter, ParticipantSort};
use crate::transport::Method;

type Participants = RemoteCollection<Participant, ParticipantSort, ParticipantFilter>;

/// Filters accepted by `participant list`
#[derive(Debug, Default)]
pub struct ParticipantQuery {
    pub search: Option<String>,
    pub role: Option<String>,
    pub verified: Option<bool>,
    pub sort: Option<ParticipantSort>,
}

#[derive(Tabled)]
struct ParticipantDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Participant> for ParticipantDisplay {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id.clone(),
            name: participant
                .full_name
                .as_deref()
                .map(|n| truncate_with_ellipsis(n, 30))
                .unwrap_or_else(|| "-".to_string()),
            email: or_dash(participant.email.as_deref()),
            code: or_dash(participant.identify_code.as_deref()),
            role: or_dash(participant.participation_role.as_deref()),
            status: or_dash(participant.participation_status.as_deref()),
        }
    }
}

fn participants_config(
    api_client: &ApiClient,
    activity_id: &str,
    query: ParticipantQuery,
    page: PageParams,
) -> CollectionConfig<ParticipantSort, ParticipantFilter> {
    CollectionConfig::new(
        api_client.url(&format!("/activities/{}/participants", activity_id)),
        query.sort.unwrap_or(ParticipantSort::RegisteredAt),
    )
    .sort_direction(page.direction)
    .page_size(page.size)
    .filters([
        (ParticipantFilter::Search, FilterValue::from(query.search.unwrap_or_default())),
        (ParticipantFilter::Role, FilterValue::from(query.role)),
        (ParticipantFilter::Verified, FilterValue::from(query.verified)),
    ])
}

/// List the participants registered on an activity
pub async fn list_participants(
    api_client: &ApiClient,
    activity_id: &str,
    query: ParticipantQuery,
    page: PageParams,
    format: &str,
) -> CliResult<String> {
    let config = participants_config(api_client, activity_id, query, page);
    let participants: Participants = api_client.collection(config, page.page).await;
    render_page(&participants, "participants", format, format_table)
}

/// Verify one participant, then reload the list so the change shows up
pub async fn verify_participant(
    api_client: &ApiClient,
    activity_id: &str,
    participant_id: &str,
    page: PageParams,
    format: &str,
) -> CliResult<String> {
    let config = participants_config(api_client, activity_id, ParticipantQuery::default(), page);
    let mut participants: Participants = api_client.collection(config, page.page).await;

    let mut actions = api_client.table_actions(AlwaysConfirm);
    actions
        .handle_api_call(
            &api_client.url(&format!(
                "/activities/{}/participants/{}/verify",
                activity_id, participant_id
            )),
            Method::Post,
            None,
        )
        .await?;
    participants.refetch().await;

    let listing = render_page(&participants, "participants", format, format_table)?;
    match format {
        "json" => Ok(listing),
        _ => Ok(format!("✓ Verified participant: {}\n{}", participant_id, listing)),
    }
}

fn format_table(participants: &Participants) -> String {
    let rows: Vec<ParticipantDisplay> = participants.data().iter().map(|p| p.into()).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    format!("{}\n{}", table, page_footer(participants))
}

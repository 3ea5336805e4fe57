use tabled::{Table, Tabled};

use crate::cli::api_client::ApiClient;
use crate::cli::commands::{PageParams, render_page};
use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, or_dash, page_footer};
use crate::controllers::{CollectionConfig, FilterValue, RemoteCollection};
use crate::models::{Account, AccountFilter, AccountSort};

type Accounts = RemoteCollection<Account, AccountSort, AccountFilter>;

#[derive(Tabled)]
struct AccountDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&Account> for AccountDisplay {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            email: account.email.clone(),
            name: or_dash(account.full_name.as_deref()),
            role: or_dash(account.role.as_deref()),
            active: match account.is_active {
                Some(true) => "yes".to_string(),
                Some(false) => "no".to_string(),
                None => "-".to_string(),
            },
        }
    }
}

/// List accounts with optional role and text filters
pub async fn list_accounts(
    api_client: &ApiClient,
    role: Option<String>,
    search: Option<String>,
    sort: Option<AccountSort>,
    page: PageParams,
    format: &str,
) -> CliResult<String> {
    let config = CollectionConfig::new(
        api_client.url("/accounts"),
        sort.unwrap_or(AccountSort::CreatedAt),
    )
    .sort_direction(page.direction)
    .page_size(page.size)
    .filters([
        (AccountFilter::Search, FilterValue::from(search.unwrap_or_default())),
        (AccountFilter::Role, FilterValue::from(role)),
    ]);

    let accounts: Accounts = api_client.collection(config, page.page).await;
    render_page(&accounts, "accounts", format, format_table)
}

fn format_table(accounts: &Accounts) -> String {
    let rows: Vec<AccountDisplay> = accounts.data().iter().map(|a| a.into()).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    format!("{}\n{}", table, page_footer(accounts))
}

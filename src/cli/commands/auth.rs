use serde_json::json;
use tabled::builder::Builder;

use crate::cli::api_client::ApiClient;
use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, or_dash};
use crate::controllers::{ApiError, application_error, decode_envelope};
use crate::models::{LoginResponse, SessionUser};
use crate::transport::HttpRequest;

/// Store an access token obtained elsewhere
pub fn login_with_token(api_client: &ApiClient, token: &str) -> CliResult<String> {
    if token.trim().is_empty() {
        return Err(CliError::InvalidInput {
            message: "access token must not be empty".to_string(),
        });
    }
    api_client.session().login(token.trim(), None)?;
    Ok("✓ Access token saved".to_string())
}

/// Exchange credentials for an access token via `POST /auth/login`
pub async fn login(api_client: &ApiClient, email: &str, password: &str) -> CliResult<String> {
    let request = HttpRequest::post(api_client.url("/auth/login"))
        .with_json(json!({ "email": email, "password": password }));

    let response = api_client
        .transport()
        .send(request)
        .await
        .map_err(ApiError::from)?;
    let envelope = decode_envelope::<LoginResponse>(&response)?;

    let login = match envelope.data {
        Some(login) if envelope.status_code == 200 => login,
        _ => {
            return Err(
                application_error(envelope.status_code, envelope.message, "Login failed").into(),
            );
        }
    };

    let who = login
        .user
        .as_ref()
        .map(|user| user.email.clone())
        .unwrap_or_else(|| email.to_string());
    api_client.session().login(login.access_token, login.user)?;

    Ok(format!("✓ Logged in as {}", who))
}

pub fn logout(api_client: &ApiClient) -> CliResult<String> {
    api_client.session().logout()?;
    Ok("✓ Logged out".to_string())
}

pub fn whoami(api_client: &ApiClient, format: &str) -> CliResult<String> {
    if !api_client.session().is_authenticated() {
        return Err(ApiError::MissingToken.into());
    }

    let user = api_client.session().user();
    match (format, user) {
        ("json", user) => Ok(serde_json::to_string_pretty(&user)?),
        (_, Some(user)) => Ok(format_user(&user)),
        (_, None) => Ok("Authenticated with an access token (no profile stored).".to_string()),
    }
}

fn format_user(user: &SessionUser) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Account ID", &user.id]);
    builder.push_record(["Email", &user.email]);
    builder.push_record(["Name", &or_dash(user.full_name.as_deref())]);
    builder.push_record(["Role", &or_dash(user.role.as_deref())]);

    let mut table = builder.build();
    apply_table_style(&mut table);
    table.to_string()
}

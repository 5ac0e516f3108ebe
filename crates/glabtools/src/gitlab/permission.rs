//! Grant or update a user's role on a group or project

use std::time::Duration;

use chrono::{Datelike, Utc};
use colored::Colorize;
use glabtools_core::gitlab::{
    access_level, classify_target, owner_on_project, role_assignment_message, validate_inputs,
    MemberPayload, TargetKind, UserRecord, ValidationRequest,
};
use glabtools_core::outcome::Outcome;
use reqwest::StatusCode;

use crate::gitlab::{create_gitlab_client, GitLabConfig};
use crate::prelude::{println, *};

/// Only the user lookup carries an explicit timeout; the membership
/// create/update requests rely on the client defaults.
const USER_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Options for the permission command
#[derive(Debug, clap::Args, Clone)]
pub struct PermissionOptions {
    /// GitLab username to grant the role to
    #[clap(long)]
    pub username: String,

    /// Target group name or project path (a `/` marks a project)
    #[clap(long)]
    pub target: String,

    /// Role to assign: guest, reporter, developer, maintainer or owner
    #[clap(long)]
    pub role: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a successful role assignment
#[derive(Debug, Clone, serde::Serialize)]
pub struct SetRoleOutput {
    pub message: String,
    pub data: serde_json::Value,
}

/// Public data function - used by both CLI and HTTP service
///
/// Resolves the username to an id, classifies the target, and creates the
/// membership at the mapped access level, retrying as an update when the
/// user is already a member.
pub async fn set_role_data(
    config: &GitLabConfig,
    username: &str,
    target: &str,
    role: &str,
) -> Result<SetRoleOutput, Error> {
    let request = ValidationRequest {
        username: Some(username),
        target: Some(target),
        role: Some(role),
        ..Default::default()
    };
    let errors = validate_inputs(&request, &config.token, Utc::now().year());
    if !errors.is_empty() {
        log::error!("validation errors: {errors:?}");
        return Err(Error::Validation(errors));
    }

    // Projects cap out at maintainer; reject before touching the network.
    if owner_on_project(target, role) {
        log::error!("owner role requested for project '{target}'");
        return Err(Error::OwnerOnProject);
    }

    let client = create_gitlab_client(config)?;

    log::info!("looking up user id for username: {username}");
    let response = client
        .get(config.api_url("users"))
        .query(&[("username", username)])
        .timeout(USER_LOOKUP_TIMEOUT)
        .send()
        .await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(Error::UserLookupFailed {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        });
    }

    let users: Vec<UserRecord> = response.json().await?;
    let Some(user) = users.first() else {
        log::error!("user '{username}' not found");
        return Err(Error::UserNotFound(username.to_string()));
    };
    log::info!("found user id {} for username {username}", user.id);

    let endpoint = match classify_target(target) {
        TargetKind::Project => {
            log::info!("target '{target}' identified as a project");
            config.api_url(&format!(
                "projects/{}/members",
                urlencoding::encode(target)
            ))
        }
        TargetKind::Group => {
            log::info!("target '{target}' identified as a group");
            config.api_url(&format!("groups/{target}/members"))
        }
    };

    let level = access_level(role)
        .ok_or_else(|| Error::Unexpected(format!("no access level mapped for role '{role}'")))?;
    let payload = MemberPayload {
        user_id: user.id,
        access_level: level,
    };

    log::info!("attempting to add {username} to {target} with role {role}");
    let mut response = client.post(&endpoint).json(&payload).send().await?;

    if response.status() == StatusCode::NOT_FOUND {
        return Err(Error::TargetNotFound(target.to_string()));
    }

    // 409 means the user is already a member; retry as an update and treat
    // that response as the authoritative one.
    if response.status() == StatusCode::CONFLICT {
        log::info!("user {username} already exists in {target}, updating role");
        response = client
            .put(format!("{endpoint}/{}", user.id))
            .json(&payload)
            .send()
            .await?;
    }

    let status = response.status();
    if !status.is_success() {
        return Err(Error::MembershipRejected {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        });
    }

    let data = response.json::<serde_json::Value>().await?;
    log::info!("successfully set {username}'s role to {role} on {target}");

    Ok(SetRoleOutput {
        message: role_assignment_message(username, role, target),
        data,
    })
}

/// Handle the permission command
pub async fn run(options: PermissionOptions, config: GitLabConfig) -> Result<()> {
    let output = set_role_data(&config, &options.username, &options.target, &options.role)
        .await
        .map_err(|err| eyre!("{err}"))?;

    if options.json {
        let outcome = Outcome::success(output.message.clone(), output.data);
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", output.message.green());
    }

    Ok(())
}

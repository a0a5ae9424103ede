//! CLI argument parsing, validation, and startup helpers.

use std::collections::HashMap;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::error;

use crate::auth::access_cookie;
use crate::authz::{Cause, Policy, TokenPair, verify};
use crate::filters::build_list_filter;
use crate::jwt::{ACCESS_TOKEN_DURATION_SECS, REFRESH_TOKEN_DURATION_SECS, TokenCodec};

const MIN_JWT_SECRET_LENGTH: usize = 32;

#[derive(clap::ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PolicyKind {
    #[default]
    Simple,
    User,
    Admin,
    Group,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tollgate",
    about = "Inspect session tokens and list filters the way the request layer sees them"
)]
pub struct Args {
    /// Path to file containing JWT secret. Prefer using JWT_SECRET env var instead
    #[arg(long, global = true)]
    pub jwt_secret_file: Option<String>,

    /// Lifetime in seconds of renewed access tokens, at most the refresh token lifetime
    #[arg(
        long,
        global = true,
        default_value_t = ACCESS_TOKEN_DURATION_SECS,
        value_parser = clap::value_parser!(u64).range(1..=REFRESH_TOKEN_DURATION_SECS)
    )]
    pub access_ttl: u64,

    /// Mark emitted cookies as Secure (requires HTTPS)
    #[arg(long, global = true, env = "SECURE_COOKIES")]
    pub secure_cookies: bool,

    /// Log output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Verify an access/refresh token pair against a policy
    Verify {
        /// Access token cookie value
        #[arg(long)]
        access: Option<String>,

        /// Refresh token cookie value
        #[arg(long)]
        refresh: Option<String>,

        /// Policy to enforce
        #[arg(long, value_enum, default_value_t = PolicyKind::Simple)]
        policy: PolicyKind,

        /// Expected username for the user policy
        #[arg(long)]
        username: Option<String>,

        /// Allowed email for the group policy (repeatable)
        #[arg(long = "email")]
        emails: Vec<String>,
    },
    /// Build date and amount filters from query parameters
    Filter {
        /// Query parameters as key=value
        #[arg(value_parser = parse_query_param)]
        params: Vec<(String, String)>,
    },
}

fn parse_query_param(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("Expected key=value: {}", s))
}

/// Build the policy named on the command line.
pub fn build_policy(
    kind: PolicyKind,
    username: Option<&str>,
    emails: &[String],
) -> Result<Policy, String> {
    match kind {
        PolicyKind::Simple => Ok(Policy::Simple),
        PolicyKind::Admin => Ok(Policy::Admin),
        PolicyKind::User => username
            .map(Policy::user)
            .ok_or_else(|| "The user policy requires --username".to_string()),
        PolicyKind::Group if emails.is_empty() => {
            Err("The group policy requires at least one --email".to_string())
        }
        PolicyKind::Group => Ok(Policy::group(emails.iter().cloned())),
    }
}

/// Initialize logging based on the specified format.
pub fn init_logging(format: &LogFormat) {
    let builder = tracing_subscriber::fmt().with_writer(std::io::stderr);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

/// Load JWT secret from environment variable or file.
/// Returns None and logs an error if the secret cannot be loaded.
pub fn load_jwt_secret(jwt_secret_file: Option<&str>) -> Option<String> {
    let secret = if let Ok(secret) = std::env::var("JWT_SECRET") {
        // Clear the environment variable to prevent leaking
        // SAFETY: We're single-threaded at this point during startup,
        // and no other code is reading this environment variable.
        unsafe { std::env::remove_var("JWT_SECRET") };
        secret
    } else if let Some(path) = jwt_secret_file {
        match std::fs::read_to_string(path) {
            Ok(content) => content.trim().to_string(),
            Err(e) => {
                error!(path = %path, error = %e, "Failed to read JWT secret file");
                return None;
            }
        }
    } else {
        error!(
            "JWT secret is required. Set JWT_SECRET environment variable (recommended) or use --jwt-secret-file"
        );
        return None;
    };

    if !secret_long_enough(&secret) {
        error!(
            "JWT secret is shorter than {} characters. Use a longer secret",
            MIN_JWT_SECRET_LENGTH
        );
        return None;
    }

    Some(secret)
}

fn secret_long_enough(secret: &str) -> bool {
    secret.len() >= MIN_JWT_SECRET_LENGTH
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyReport<'a> {
    authorized: bool,
    cause: Cause,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    renewed_access_token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    set_cookie: Option<String>,
}

/// Run `verify` and return the JSON report.
pub fn run_verify(
    codec: &TokenCodec,
    access: Option<&str>,
    refresh: Option<&str>,
    policy: &Policy,
    secure_cookies: bool,
) -> serde_json::Result<String> {
    let outcome = verify(codec, TokenPair::new(access, refresh), policy);
    let report = VerifyReport {
        authorized: outcome.verdict.authorized,
        cause: outcome.verdict.cause,
        username: outcome.session.as_ref().map(|s| s.username.as_str()),
        renewed_access_token: outcome.renewal.as_ref().map(|r| r.token.as_str()),
        set_cookie: outcome
            .renewal
            .as_ref()
            .map(|r| access_cookie(r, secure_cookies)),
    };
    serde_json::to_string_pretty(&report)
}

/// Run `filter` and return the JSON filter, or the rejection message.
pub fn run_filter(params: &[(String, String)]) -> Result<String, String> {
    let query: HashMap<String, String> = params.iter().cloned().collect();
    let filter = build_list_filter(&query).map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&filter).map_err(|e| e.to_string())
}

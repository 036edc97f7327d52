use anyhow::Context;
use serde::Serialize;

use tg_config::SessionBackend;
use tg_core::Identity;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LoginArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct LoginResponse {
    authenticated: bool,
    email: String,
    display_name: Option<String>,
}

#[derive(Serialize)]
struct LogoutResponse {
    cleared: bool,
}

#[derive(Serialize)]
struct StatusResponse {
    authenticated: bool,
    email: Option<String>,
    display_name: Option<String>,
    backend: &'static str,
    session_path: Option<String>,
    service: String,
}

/// `tg login <email> [--name NAME]`
pub fn login(args: &LoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut identity = Identity::new(args.email.trim())?;
    if let Some(name) = args.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        identity = identity.with_display_name(name);
    }

    ctx.session
        .login(identity.clone())
        .context("failed to store session")?;

    output(
        &LoginResponse {
            authenticated: true,
            email: identity.email,
            display_name: identity.display_name,
        },
        flags.output_format(),
    )
}

/// `tg logout`
pub fn logout(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.session
        .logout()
        .context("signed out, but the stored session could not be removed")?;
    output(&LogoutResponse { cleared: true }, flags.output_format())
}

/// `tg status`
pub fn status(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = ctx.session.identity();
    let backend = match ctx.config.session.backend {
        SessionBackend::File => "file",
        SessionBackend::Keyring => "keyring",
    };
    output(
        &StatusResponse {
            authenticated: identity.is_some(),
            email: identity.as_ref().map(|id| id.email.clone()),
            display_name: identity.and_then(|id| id.display_name),
            backend,
            session_path: ctx
                .config
                .session
                .file_path()
                .map(|path| path.display().to_string()),
            service: ctx.config.service.base_url().to_string(),
        },
        flags.output_format(),
    )
}

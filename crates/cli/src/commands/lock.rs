// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock commands

use super::{Bot, Requester};
use anyhow::Result;
use clap::Args;
use lb_core::Response;

#[derive(Args)]
pub struct LockArgs {
    /// Resource to lock (omit for usage)
    #[arg(default_value = "")]
    pub resource: String,
}

#[derive(Args)]
pub struct UnlockArgs {
    /// Resource to unlock (omit for usage)
    #[arg(default_value = "")]
    pub resource: String,

    /// Pass `force` to release a lock someone else holds
    #[arg(value_parser = ["force"])]
    pub mode: Option<String>,
}

pub async fn lock(bot: &Bot, who: &Requester, args: LockArgs) -> Result<Response> {
    Ok(bot
        .lock(&args.resource, &who.user, &who.channel, &who.team)
        .await?)
}

pub async fn unlock(bot: &Bot, who: &Requester, args: UnlockArgs) -> Result<Response> {
    let force = args.mode.is_some();
    Ok(bot
        .unlock(&args.resource, &who.user, &who.channel, &who.team, force)
        .await?)
}

pub async fn locks(bot: &Bot, who: &Requester) -> Result<Response> {
    Ok(bot.locks(&who.channel, &who.team).await?)
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token command

use super::{Bot, Requester};
use anyhow::Result;
use clap::Args;
use lb_core::{LockbotConfig, Response};

#[derive(Args)]
pub struct TokenArgs {
    /// `new` issues a token, replacing any earlier one for this channel
    #[arg(default_value = "")]
    pub param: String,
}

pub async fn token(
    bot: &Bot,
    who: &Requester,
    config: &LockbotConfig,
    args: TokenArgs,
) -> Result<Response> {
    Ok(bot
        .lbtoken(
            &args.param,
            &who.user,
            &who.channel,
            &who.team,
            &config.api_url,
        )
        .await?)
}

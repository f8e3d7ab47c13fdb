// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chat command layer
//!
//! Maps `/lock`, `/unlock`, `/locks` and `/lbtoken` onto waitlist operations
//! and renders the result. Force unlock removes only the current holder, as
//! seen by the same read-modify-write cycle that removes it: the next waiter
//! is promoted and the rest of the line is left alone.

use crate::error::{BotError, WaitlistError};
use crate::waitlist::Waitlist;
use lb_adapters::{LockStore, TokenAuthorizer};
use lb_core::{Clock, LockKey, Response, Scope};

/// Resource argument that asks for usage instead of acting
const HELP: &str = "help";

/// The Lockbot command surface
#[derive(Clone)]
pub struct LockBot<S, T, C> {
    waitlist: Waitlist<S, C>,
    tokens: T,
}

impl<S, T, C> LockBot<S, T, C>
where
    S: LockStore,
    T: TokenAuthorizer,
    C: Clock,
{
    pub fn new(waitlist: Waitlist<S, C>, tokens: T) -> Self {
        Self { waitlist, tokens }
    }

    pub fn waitlist(&self) -> &Waitlist<S, C> {
        &self.waitlist
    }

    /// `/lock <resource>`: take the lock or join the line
    pub async fn lock(
        &self,
        resource: &str,
        user: &str,
        channel: &str,
        team: &str,
    ) -> Result<Response, BotError> {
        if is_help(resource) {
            return Ok(Response::lock_help(user));
        }
        let resource = resource.trim();
        let key = key(team, channel, resource)?;
        let outcome = self.waitlist.join(&key, user).await?;
        Ok(Response::for_join(resource, &outcome))
    }

    /// `/unlock <resource> [force]`: leave the line, or with `force` release
    /// whoever holds the lock
    pub async fn unlock(
        &self,
        resource: &str,
        user: &str,
        channel: &str,
        team: &str,
        force: bool,
    ) -> Result<Response, BotError> {
        if is_help(resource) {
            return Ok(Response::unlock_help(user));
        }
        let resource = resource.trim();
        let key = key(team, channel, resource)?;

        if force {
            let release = self.waitlist.release_holder(&key).await?;
            return Ok(match release.released {
                None => Response::for_unlocked(resource),
                // Forcing your own lock is a plain unlock
                Some(holder) if holder == user => {
                    Response::for_leave(resource, user, &release.leave)
                }
                Some(holder) => {
                    tracing::info!(%key, user, holder = %holder, "force unlock");
                    Response::for_force_release(resource, user, &holder, &release.leave)
                }
            });
        }

        let outcome = self.waitlist.leave(&key, user).await?;
        Ok(Response::for_leave(resource, user, &outcome))
    }

    /// `/locks`: every active lock in the channel
    pub async fn locks(&self, channel: &str, team: &str) -> Result<Response, BotError> {
        let scope = Scope::new(team, channel).map_err(WaitlistError::from)?;
        let locks = self.waitlist.list_all(&scope).await?;
        Ok(Response::for_list(&locks))
    }

    /// `/lbtoken [new]`: issue an API token for this user and channel
    pub async fn lbtoken(
        &self,
        param: &str,
        user: &str,
        channel: &str,
        team: &str,
        url: &str,
    ) -> Result<Response, BotError> {
        if param.trim() != "new" {
            return Ok(Response::token_help(user, channel, team, url));
        }
        let token = self.tokens.create_access_token(user, channel, team).await?;
        tracing::info!(user, channel, team, "issued access token");
        Ok(Response::token_issued(&token, user, channel, team, url))
    }
}

fn is_help(resource: &str) -> bool {
    let resource = resource.trim();
    resource.is_empty() || resource == HELP
}

fn key(team: &str, channel: &str, resource: &str) -> Result<LockKey, WaitlistError> {
    Ok(LockKey::new(team, channel, resource)?)
}

#[cfg(test)]
#[path = "bot_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Response assembler
//!
//! Turns waitlist outcomes into chat text plus a delivery destination.
//! Routing is fixed: no-op outcomes, help and listings go to the requester
//! only; successful joins and leaves are broadcast to the channel.

use crate::outcome::{JoinOutcome, LeaveOutcome};
use crate::queue::Queue;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a response should be delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    /// Only the user who issued the command
    Requester,
    /// Everyone in the channel
    Channel,
}

/// A rendered outcome ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub message: String,
    pub destination: Destination,
}

impl Response {
    pub fn private(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            destination: Destination::Requester,
        }
    }

    pub fn broadcast(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            destination: Destination::Channel,
        }
    }

    /// Render a join request
    pub fn for_join(resource: &str, outcome: &JoinOutcome) -> Self {
        if outcome.already_member {
            return Self::private(format!(
                "You are already in line for `{}`\n{}",
                resource,
                queue_message(resource, &outcome.queue)
            ));
        }
        Self::broadcast(queue_message(resource, &outcome.queue))
    }

    /// Render a leave requested by the member themselves
    pub fn for_leave(resource: &str, requester: &str, outcome: &LeaveOutcome) -> Self {
        if !outcome.was_member {
            return match outcome.queue.holder() {
                None => already_unlocked(resource),
                Some(holder) => Self::private(format!(
                    "Cannot unlock `{}`, locked by {} 🔒",
                    resource,
                    mention(&holder.name)
                )),
            };
        }

        if !outcome.was_holder {
            return Self::broadcast(format!(
                "{} has left the line for `{}`\n{}",
                mention(requester),
                resource,
                queue_message(resource, &outcome.queue)
            ));
        }

        let mut message = format!("{} has unlocked `{}` 🔓", mention(requester), resource);
        push_promotion(&mut message, resource, &outcome.queue);
        Self::broadcast(message)
    }

    /// Render a forced release of `holder` by someone else
    pub fn for_force_release(
        resource: &str,
        requester: &str,
        holder: &str,
        outcome: &LeaveOutcome,
    ) -> Self {
        if !outcome.was_member {
            return match outcome.queue.holder() {
                None => already_unlocked(resource),
                Some(_) => Self::private(queue_message(resource, &outcome.queue)),
            };
        }

        let mut message = format!(
            "{} has force unlocked `{}` 🔓 which was locked by {}",
            mention(requester),
            resource,
            mention(holder)
        );
        push_promotion(&mut message, resource, &outcome.queue);
        Self::broadcast(message)
    }

    /// Render an unlock on a resource nobody holds
    pub fn for_unlocked(resource: &str) -> Self {
        already_unlocked(resource)
    }

    /// Render the active locks of one channel
    pub fn for_list(locks: &BTreeMap<String, Queue>) -> Self {
        let active: Vec<_> = locks
            .iter()
            .filter_map(|(resource, queue)| queue.holder().map(|h| (resource, h, queue)))
            .collect();

        if active.is_empty() {
            return Self::private("No active locks in this channel 🔓");
        }

        let mut message = String::from("Active locks in this channel:");
        for (resource, holder, queue) in active {
            message.push_str(&format!(
                "\n> `{}` is locked by {} 🔒 _<!date^{}^{{date_pretty}} {{time}}|{}>_",
                resource,
                mention(&holder.name),
                holder.joined_at.timestamp(),
                holder.joined_at.format("%a, %d %b %Y %H:%M:%S GMT"),
            ));
            match queue.waiters().len() {
                0 => {}
                n => message.push_str(&format!(" ({} waiting)", n)),
            }
        }
        Self::private(message)
    }

    /// Usage for `/lock`
    pub fn lock_help(user: &str) -> Self {
        Self::private(format!(
            "How to use `/lock`\n\n\
             To lock a resource in this channel called `thingy`, use `/lock thingy`\n\
             If it is already locked you will join the line and get it next\n\n\
             _Example:_\n\
             > *{user}*: `/lock dev`\n\
             > *Lockbot*: {user} has locked `dev` 🔒",
            user = mention(user)
        ))
    }

    /// Usage for `/unlock`
    pub fn unlock_help(user: &str) -> Self {
        Self::private(format!(
            "How to use `/unlock`\n\n\
             To unlock a resource in this channel called `thingy`, use `/unlock thingy`\n\
             If you are waiting in line this takes you out of it\n\n\
             _Example:_\n\
             > *{user}*: `/unlock dev`\n\
             > *Lockbot*: {user} has unlocked `dev` 🔓\n\n\
             To force unlock a resource locked by someone else, use `/unlock thingy force`",
            user = mention(user)
        ))
    }

    /// Usage for `/lbtoken`
    pub fn token_help(user: &str, channel: &str, team: &str, url: &str) -> Self {
        Self::private(format!(
            "How to use `/lbtoken`\n\n\
             To generate a new access token for the Lockbot API use `/lbtoken new`\n\n\
             • The token is scoped to your user `{user}`, this team `{team}` and this channel `{channel}`\n\
             • Make a note of your token as it won't be displayed again\n\
             • If you generate a new token in this channel it will invalidate the existing token for this channel\n\n\
             The API is secured using basic access authentication. \
             To authenticate with the API you must set a header:\n\
             ```Authorization: Basic <credentials>```\n\
             where `<credentials>` is `user:token` base64 encoded\n\n\
             Explore the Lockbot API with OpenAPI 3 and Swagger UI: {url}/api-docs"
        ))
    }

    /// A freshly issued API token with example calls
    pub fn token_issued(token: &str, user: &str, channel: &str, team: &str, url: &str) -> Self {
        let credentials = STANDARD.encode(format!("{}:{}", user, token));
        let auth = format!("--header 'Authorization: Basic {}'", credentials);
        let base = format!("{}/api/teams/{}/channels/{}/locks", url, team, channel);
        let json = "--header 'Content-Type: application/json'";
        let body = format!(r#"--data-raw '{{ "name": "dev", "owner": "{}"}}'"#, user);

        Self::private(format!(
            "Here is your new access token: `{token}`\n\n\
             _Example API usage with `curl`:_\n\n\
             > Fetch all locks 📜\n\
             ```curl --request GET '{base}' {auth}```\n\n\
             > Fetch lock `dev` 👀\n\
             ```curl --request GET '{base}/dev' {auth}```\n\n\
             > Create lock `dev` 🔒\n\
             ```curl --request POST '{base}' {auth} {json} {body}```\n\n\
             > Delete lock `dev` 🔓\n\
             ```curl --request DELETE '{base}/dev' {auth}```"
        ))
    }
}

fn already_unlocked(resource: &str) -> Response {
    Response::private(format!("`{}` is already unlocked 🔓", resource))
}

fn mention(name: &str) -> String {
    format!("<@{}>", name)
}

/// "<@a>", "<@a> and <@b>", "<@a>, <@b> and <@c>"
fn name_list(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => mention(only),
        [rest @ .., last] => format!(
            "{} and {}",
            rest.iter().map(|n| mention(n)).collect::<Vec<_>>().join(", "),
            mention(last)
        ),
    }
}

fn waiting_suffix(queue: &Queue) -> String {
    let waiters: Vec<&str> = queue.waiters().iter().map(|e| e.name.as_str()).collect();
    match waiters.len() {
        0 => String::new(),
        1 => format!(", with {} waiting in line", name_list(&waiters)),
        n => format!(
            ", with {} others waiting in line ({})",
            n,
            name_list(&waiters)
        ),
    }
}

/// Summary of who holds a resource and who is waiting
pub fn queue_message(resource: &str, queue: &Queue) -> String {
    match queue.holder() {
        None => format!("No one is in line for `{}` 🔓", resource),
        Some(holder) => format!(
            "{} has locked `{}`{} 🔒",
            mention(&holder.name),
            resource,
            waiting_suffix(queue)
        ),
    }
}

fn push_promotion(message: &mut String, resource: &str, queue: &Queue) {
    if let Some(next) = queue.holder() {
        message.push_str(&format!(
            "\n{} now holds `{}`{} 🔒",
            mention(&next.name),
            resource,
            waiting_suffix(queue)
        ));
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;

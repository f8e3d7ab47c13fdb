// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use lb_core::{Destination, Response};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print a response, tagged with who would see it in chat
pub fn print_response(response: &Response, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", render(response)),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(response) {
                println!("{}", json);
            }
        }
    }
}

fn render(response: &Response) -> String {
    let tag = match response.destination {
        Destination::Channel => "[channel]",
        Destination::Requester => "[you]",
    };
    format!("{} {}", tag, response.message)
}

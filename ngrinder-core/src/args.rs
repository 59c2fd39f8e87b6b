// Copyright 2026 nGrinder Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Single-dash flag handling on top of `clap`.
//!
//! Operators write `-port=8080`, `-cluster-mode=easy` and `-Dkey=value`.
//! Tokens are rewritten to clap's `--name=value` form before parsing, and
//! usage or error text is rewritten back before it is shown.

use crate::error::ConfigError;
use clap::{CommandFactory, Parser};

/// Rewrites an operator token into the form clap expects.
pub fn to_clap_token(token: &str) -> String {
    if token == "-?" {
        return "--help".to_string();
    }
    if token.starts_with("--") || token.starts_with("-D") {
        return token.to_string();
    }
    match token.strip_prefix('-') {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_alphabetic()) => format!("--{rest}"),
        _ => token.to_string(),
    }
}

/// Returns the flag a rewritten token refers to: `port` for `--port=1`,
/// `D` for `-Dkey=value`, `None` for plain values.
pub fn flag_name(token: &str) -> Option<&str> {
    if let Some(long) = token.strip_prefix("--") {
        let name = long.split_once('=').map_or(long, |(name, _)| name);
        return (!name.is_empty()).then_some(name);
    }
    let short = token.strip_prefix('-')?;
    let end = short.chars().next()?.len_utf8();
    Some(&short[..end])
}

/// Turns clap's `--name` spelling back into `-name`.
pub fn to_operator_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let starts_word = prev.map_or(true, |p| !p.is_alphanumeric() && p != '-');
        if c == '-' && starts_word && chars.peek() == Some(&'-') {
            chars.next();
            if chars.peek().is_some_and(|n| n.is_ascii_alphabetic()) {
                out.push('-');
                prev = Some('-');
                continue;
            }
            out.push_str("--");
            prev = Some('-');
            continue;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Parses operator tokens against the schema `P`.
///
/// `program` is only used as the binary name in messages.
pub fn parse_tokens<P: Parser>(program: &str, tokens: &[String]) -> Result<P, ConfigError> {
    let argv = std::iter::once(program.to_string()).chain(tokens.iter().map(|t| to_clap_token(t)));
    P::try_parse_from(argv).map_err(|err| ConfigError::InvalidArguments {
        message: operator_message(&err),
    })
}

/// Renders the usage text of schema `P` in single-dash form.
pub fn render_usage<P: CommandFactory>(program: &str) -> String {
    let mut command = P::command().bin_name(program.to_string());
    to_operator_text(&command.render_help().to_string())
}

/// Keeps the headline of a clap error, without the usage block clap appends.
fn operator_message(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let headline = rendered.split("\n\n").next().unwrap_or_default();
    to_operator_text(headline.trim_start_matches("error: ").trim_end())
}

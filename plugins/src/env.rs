//! Environment overlays for the child process.
//!
//! Credentials are never looked at here; they either live in the inherited
//! environment or are forwarded opaquely from config / env files.

use std::collections::HashMap;

use anyhow::Result;
use nanogen_core::api::EnvProvider;

/// Adds nothing: the child sees exactly the parent's environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct InheritedEnv;

impl EnvProvider for InheritedEnv {
    fn envs(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// A fixed set of variables layered over the inherited environment.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    vars: HashMap<String, String>,
}

impl StaticEnv {
    pub fn new(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Later pairs win over earlier ones and over existing keys.
    pub fn extend(&mut self, pairs: impl IntoIterator<Item = (String, String)>) {
        self.vars.extend(pairs);
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvProvider for StaticEnv {
    fn envs(&self) -> HashMap<String, String> {
        self.vars.clone()
    }
}

/// Reads a `KEY=VALUE` file; `~` in the path is expanded.
pub fn parse_env_file(path: &str) -> Result<Vec<(String, String)>> {
    let expanded = shellexpand::tilde(path);
    let content = std::fs::read_to_string(expanded.as_ref())
        .map_err(|e| anyhow::anyhow!("failed to read env file {}: {}", expanded, e))?;
    parse_env_str(&content)
}

pub fn parse_env_str(content: &str) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let (key, value) = split_assignment(line)
            .map_err(|e| anyhow::anyhow!("invalid env line at {}: {}", idx + 1, e))?;
        let value = parse_env_value(value)
            .map_err(|e| anyhow::anyhow!("invalid env line at {}: {}", idx + 1, e))?;
        out.push((key.to_string(), value));
    }

    Ok(out)
}

/// Parses a single `KEY=VALUE` as given on the command line. The value is taken literally.
pub fn parse_env_assignment(raw: &str) -> Result<(String, String)> {
    let (key, value) =
        split_assignment(raw).map_err(|e| anyhow::anyhow!("invalid --env {:?}: {}", raw, e))?;
    Ok((key.to_string(), value.to_string()))
}

fn split_assignment(line: &str) -> Result<(&str, &str)> {
    let (k, v) = line
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("expected KEY=VALUE"))?;
    let key = k.trim();
    if key.is_empty() {
        return Err(anyhow::anyhow!("empty key"));
    }
    if key.chars().any(char::is_whitespace) {
        return Err(anyhow::anyhow!("key {:?} contains whitespace", key));
    }
    Ok((key, v.trim()))
}

fn parse_env_value(value: &str) -> Result<String> {
    if value.len() >= 2 {
        let first = value.as_bytes()[0];
        let last = value.as_bytes()[value.len() - 1];
        if first == b'"' && last == b'"' {
            return unescape_env_value(&value[1..value.len() - 1]);
        }
        if first == b'\'' && last == b'\'' {
            return Ok(value[1..value.len() - 1].to_string());
        }
    }
    Ok(value.to_string())
}

fn unescape_env_value(value: &str) -> Result<String> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(next) = chars.next() else {
            return Err(anyhow::anyhow!("trailing backslash"));
        };
        match next {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            other => out.push(other),
        }
    }
    Ok(out)
}

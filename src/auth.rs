use anyhow::{Result, bail};
use std::io::{self, BufRead, IsTerminal};
use zeroize::Zeroizing;

/// Where a secret may be read from when it is not in the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// First line of piped stdin, or a TTY prompt.
    StdinOrPrompt,
    /// TTY prompt only; stdin is reserved for the payload.
    PromptOnly,
}

/// Reads a secret (HMAC/RC4 key or PBKDF2 password).
///
/// Lookup order: the environment variable `env_var`, then piped stdin when
/// `fallback` allows it, then an interactive prompt.
pub fn read_secret(env_var: &str, prompt: &str, fallback: Fallback) -> Result<Zeroizing<String>> {
    //  HASHNEST_KEY="k" hashnest hmac sha3-256 "data"
    if let Ok(secret) = std::env::var(env_var) {
        if !secret.is_empty() {
            return Ok(Zeroizing::new(secret));
        }
    }

    //  printf "%s" "$PASSWORD" | hashnest pbkdf2 sha3-256
    if fallback == Fallback::StdinOrPrompt && !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().lock().read_line(&mut buf)?;
        trim_newline(&mut buf);

        if !buf.is_empty() {
            return Ok(buf);
        }
    }

    if io::stdin().is_terminal() {
        let secret = Zeroizing::new(rpassword::prompt_password(prompt)?);
        if !secret.is_empty() {
            return Ok(secret);
        }
    }

    bail!("no secret provided (set {env_var})")
}

fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}

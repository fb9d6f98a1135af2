use anyhow::{Result, bail};
use std::io::{self, BufRead, IsTerminal};
use zeroize::Zeroizing;

pub const PASSWORD_ENV: &str = "PWCODEC_PASSWORD";

/// Reads the password to hash or verify.
///
/// Sources, first match wins:
/// - `PWCODEC_PASSWORD="hunter2" pwcodec hash`
/// - `printf "%s" "$PW" | pwcodec verify <RECORD>` (first line of stdin)
/// - interactive prompt, with a confirmation prompt when `confirm` is set
pub fn read_password(confirm: bool) -> Result<Zeroizing<String>> {
    if let Some(pw) = from_env() {
        return Ok(pw);
    }

    if !io::stdin().is_terminal() {
        return from_pipe(&mut io::stdin().lock());
    }

    let pw = Zeroizing::new(rpassword::prompt_password("Password: ")?);
    if confirm {
        let again = Zeroizing::new(rpassword::prompt_password("Confirm password: ")?);
        if pw != again {
            bail!("passwords do not match");
        }
    }
    Ok(pw)
}

fn from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

fn from_pipe(input: &mut impl BufRead) -> Result<Zeroizing<String>> {
    let mut pw = Zeroizing::new(String::new());
    input.read_line(&mut pw)?;
    trim_newline(&mut pw);

    if pw.is_empty() {
        bail!("No password provided");
    }
    Ok(pw)
}

fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}

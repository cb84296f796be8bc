//! Admin login state

use anyhow::Result;
use std::io::{BufRead, Write};

use crate::auth::Gate;
use crate::Folio;

/// Log in with `password`, or with a password read from stdin
pub fn login(folio: &Folio, password: Option<&str>) -> Result<bool> {
    let password = match password {
        Some(password) => password.to_string(),
        None => read_password()?,
    };

    let gate = folio.auth_gate(folio.storage());
    if gate.login(&password)? {
        println!("Logged in.");
        Ok(true)
    } else {
        println!("Incorrect password. Please try again.");
        Ok(false)
    }
}

pub fn logout(folio: &Folio) -> Result<()> {
    folio.auth_gate(folio.storage()).logout()?;
    println!("Logged out.");
    Ok(())
}

/// Print whether the admin is logged in
pub fn status(folio: &Folio) -> Result<bool> {
    let authenticated = folio.auth_gate(folio.storage()).is_authenticated();
    if authenticated {
        println!("Logged in as admin.");
    } else {
        println!("Not logged in.");
    }
    Ok(authenticated)
}

fn read_password() -> Result<String> {
    print!("Password: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

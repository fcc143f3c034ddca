use academy::model::Provider;
use academy::redirect::{Location, RedirectOutcome};

use super::session::read_password;
use super::*;

pub(super) fn handle_login_command(
    client: &mut Client,
    email: &str,
    password: Option<String>,
) -> Result<()> {
    let password = read_password(password)?;
    client.sign_in(email, &password)?;
    Ok(())
}

pub(super) fn handle_signup_command(
    client: &mut Client,
    email: &str,
    password: Option<String>,
    name: &str,
) -> Result<()> {
    let password = read_password(password)?;
    client.sign_up(email, &password, name)?;
    Ok(())
}

pub(super) fn handle_logout_command(client: &mut Client) -> Result<()> {
    client.sign_out();
    Ok(())
}

pub(super) fn handle_whoami_command(client: &mut Client, json: bool) -> Result<()> {
    let session = client.current_session();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "session": session }))
                .context("serialize whoami json")?
        );
        return Ok(());
    }
    match session {
        Some(s) => {
            println!("email: {}", s.email);
            println!("name: {}", s.greeting_name());
            println!("user_id: {}", s.subject_id);
        }
        None => println!("Not logged in"),
    }
    Ok(())
}

pub(super) fn handle_oauth_command(client: &mut Client, provider: &str) -> Result<()> {
    let provider: Provider = provider.parse()?;
    let url = client.sign_in_with_provider(provider)?;
    println!("{}", url);
    println!(
        "note: open the URL, then run `academy redirect '<address you land on>'` to finish"
    );
    Ok(())
}

pub(super) fn handle_redirect_command(client: &mut Client, url: &str) -> Result<()> {
    let mut location = Location::parse(url)?;
    let outcome = client.complete_redirect(&mut location);
    println!("location: {}", location.as_str());
    match outcome {
        RedirectOutcome::SignedIn(_) => Ok(()),
        RedirectOutcome::NotApplicable => {
            println!("No sign-in data in the address");
            Ok(())
        }
        RedirectOutcome::Failed(reason) => anyhow::bail!(reason),
    }
}

pub(super) fn handle_delete_account_command(client: &mut Client, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("refusing to delete the account without --yes");
    }
    client.delete_account()
}

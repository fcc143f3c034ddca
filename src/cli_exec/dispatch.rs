use super::catalog::{
    handle_contact_command, handle_course_command, handle_courses_command,
    handle_profile_command, handle_quiz_command,
};
use super::config::handle_config_command;
use super::identity::{
    handle_delete_account_command, handle_login_command, handle_logout_command,
    handle_oauth_command, handle_redirect_command, handle_signup_command, handle_whoami_command,
};
use super::session::{with_client, with_started_client};
use super::*;

pub(super) fn handle_command(inv: &Invocation, command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => {
            with_client(inv, |client| handle_login_command(client, &args.email, args.password))?
        }
        Commands::Signup(args) => with_client(inv, |client| {
            handle_signup_command(client, &args.email, args.password, &args.name)
        })?,
        Commands::Logout => with_started_client(inv, handle_logout_command)?,
        Commands::Whoami(args) => {
            with_started_client(inv, |client| handle_whoami_command(client, args.json))?
        }
        Commands::Oauth(args) => {
            with_client(inv, |client| handle_oauth_command(client, &args.provider))?
        }
        Commands::Redirect(args) => {
            with_client(inv, |client| handle_redirect_command(client, &args.url))?
        }
        Commands::DeleteAccount(args) => {
            with_started_client(inv, |client| handle_delete_account_command(client, args.yes))?
        }
        Commands::Courses(args) => with_started_client(inv, |client| {
            handle_courses_command(
                client,
                args.category,
                args.difficulty,
                args.search,
                args.json,
            )
        })?,
        Commands::Course(args) => {
            with_started_client(inv, |client| handle_course_command(client, &args.id, args.json))?
        }
        Commands::Quiz(args) => with_started_client(inv, |client| {
            handle_quiz_command(client, &args.id, args.answers.as_deref(), args.json)
        })?,
        Commands::Profile(args) => {
            with_started_client(inv, |client| handle_profile_command(client, args.json))?
        }
        Commands::Contact(args) => with_started_client(inv, |client| {
            handle_contact_command(client, args.name, args.email, &args.message)
        })?,
        Commands::Config { command } => handle_config_command(inv, command)?,
    }
    Ok(())
}

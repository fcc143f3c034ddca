use super::*;

pub(super) fn open_store(inv: &Invocation) -> Result<LocalStore> {
    let root = LocalStore::resolve_dir(inv.data_dir.as_deref())?;
    LocalStore::open(&root)
}

pub(super) fn with_client<F>(inv: &Invocation, f: F) -> Result<()>
where
    F: FnOnce(&mut Client) -> Result<()>,
{
    let mut client = Client::open(open_store(inv)?, &inv.overrides)?;
    let res = f(&mut client);
    print_notices(&mut client);
    res
}

/// Like [`with_client`], after the startup session check has resolved.
pub(super) fn with_started_client<F>(inv: &Invocation, f: F) -> Result<()>
where
    F: FnOnce(&mut Client) -> Result<()>,
{
    with_client(inv, |client| {
        client.start();
        f(client)
    })
}

// Errors come back through the command's Result; printing them here too
// would repeat them.
fn print_notices(client: &mut Client) {
    for notice in client.take_notices() {
        match notice.level {
            NoticeLevel::Error => {}
            NoticeLevel::Info | NoticeLevel::Success => println!("{}", notice.text),
        }
    }
}

pub(super) fn read_password(given: Option<String>) -> Result<String> {
    if let Some(p) = given {
        return Ok(p);
    }
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("password required (pass --password or pipe it on stdin)");
    }
    Ok(password)
}

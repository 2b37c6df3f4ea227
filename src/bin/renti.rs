use std::sync::Arc;

use anyhow::Context;
use dialoguer::theme::ColorfulTheme;
use renti_client::push::PushPayload;
use renti_client::resources::bookings::BookingFilter;
use renti_client::resources::notifications::NotificationFilter;
use renti_client::{logger, Client, Config, FileStorage, Id, LogHooks};
use serde::Serialize;
use serde_json::Value;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "renti", about = "Renti.kz from the terminal")]
enum Command {
    /// Sign in and keep the session in the token file
    Login { phone: String },
    /// Sign out and forget the session
    Logout,
    /// Show the signed in user
    Me,
    /// List bookings
    Bookings {
        #[structopt(long)]
        status: Option<String>,
        #[structopt(long, default_value = "1")]
        page: u32,
    },
    /// Approve a pending booking
    Approve { id: Id },
    /// List notifications
    Notifications {
        /// Only unread ones
        #[structopt(long)]
        unread: bool,
    },
    /// Mark a notification as read
    Read { id: Id },
    /// Show a platform setting, or set it when a value is given
    Setting { key: String, value: Option<String> },
    /// Make the cleaner's apartments exactly the given ones
    AssignCleaner { cleaner: Id, apartments: Vec<Id> },
    /// Show the notification a push payload would produce
    Push { json: String },
}

async fn prompt_password(phone: &str) -> anyhow::Result<String> {
    let prompt = format!("Enter password for `{}`", phone);
    tokio::task::spawn_blocking(move || {
        dialoguer::Password::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty_password(false)
            .report(false)
            .interact()
    })
    .await
    .context("password prompt")?
    .context("read password")
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("format output")?;
    println!("{}", text);
    Ok(())
}

fn require_session(client: &Client) -> anyhow::Result<()> {
    if !client.is_authenticated() {
        anyhow::bail!("not signed in, run `renti login <phone>` first");
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let command = Command::from_args();
    let config = Config::from_env().context("load configuration")?;
    logger::init(config.log_level).context("initialize logger")?;

    let storage = FileStorage::open(&config.token_path)
        .with_context(|| format!("open token file {}", config.token_path.display()))?;
    let client = Client::new(&config, Arc::new(storage), Arc::new(LogHooks))?;

    match command {
        Command::Login { phone } => {
            let password = prompt_password(&phone).await?;
            let login = client.sign_in(&phone, &password).await?;
            print(&login.user)?;
        }
        Command::Logout => {
            if let Err(err) = client.sign_out().await {
                log::warn!("server side logout failed: {}", err);
            }
            log::info!("signed out");
        }
        Command::Me => {
            require_session(&client)?;
            print(&client.auth().me().await?)?;
        }
        Command::Bookings { status, page } => {
            require_session(&client)?;
            let filter = BookingFilter {
                status,
                page: Some(page),
                ..Default::default()
            };
            print(&client.bookings().list(&filter).await?)?;
        }
        Command::Approve { id } => {
            require_session(&client)?;
            print(&client.bookings().approve(id).await?)?;
        }
        Command::Notifications { unread } => {
            require_session(&client)?;
            let filter = NotificationFilter {
                unread_only: unread.then_some(true),
                ..Default::default()
            };
            print(&client.notifications().list(&filter).await?)?;
        }
        Command::Read { id } => {
            require_session(&client)?;
            print(&client.notifications().mark_read(id).await?)?;
        }
        Command::Setting { key, value } => {
            require_session(&client)?;
            let settings = client.platform_settings();
            let resp = match value {
                // plain words are sent as strings
                Some(raw) => {
                    let value: Value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
                    settings.update(&key, &value).await?
                }
                None => settings.get(&key).await?,
            };
            print(&resp)?;
        }
        Command::AssignCleaner {
            cleaner,
            apartments,
        } => {
            require_session(&client)?;
            let report = client
                .cleaners()
                .update_apartments(cleaner, &apartments)
                .await?;
            for outcome in &report.outcomes {
                match &outcome.result {
                    Ok(()) => log::info!("{} apartment {}: ok", outcome.change, outcome.apartment_id),
                    Err(err) => log::error!(
                        "{} apartment {}: {}",
                        outcome.change,
                        outcome.apartment_id,
                        err
                    ),
                }
            }
            if !report.is_complete() {
                anyhow::bail!(
                    "{} of {} changes failed, the assignment is only partially applied",
                    report.failed().count(),
                    report.outcomes.len()
                );
            }
        }
        Command::Push { json } => {
            print(&PushPayload::parse(Some(json.as_bytes())).to_notification())?;
        }
    }

    Ok(())
}

use std::collections::HashMap;
use std::path::PathBuf;

use base64::Engine as _;
use clap::{Parser, Subcommand};
use client::{ApiClient, ExtractionClient, Session, SessionStore, Snapshot, StateStore, Store};
use engine::ExpenseDraft;

mod settings;

const DEFAULT_STATE_PATH: &str = "config/divvy_state.json";

type AppResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "divvy", about = "Expense-splitting client", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account and sign in.
    Signup {
        email: String,
        display_name: String,
        #[arg(long, env = "DIVVY_PASSWORD")]
        password: String,
    },
    /// Sign in and cache the session.
    Signin {
        email: String,
        #[arg(long, env = "DIVVY_PASSWORD")]
        password: String,
    },
    /// Tear the session down.
    Signout,
    /// Net balance against every friend.
    Balances,
    /// Friend list plus pending requests.
    Friends,
    /// Send a friend request by email.
    Request { email: String },
    /// Accept a pending incoming request.
    Accept { request_id: String },
    /// Remove the friend connection with a user.
    Unfriend { user_id: String },
    /// List visible expenses.
    Expenses,
    /// Record an expense.
    Add {
        #[arg(long)]
        description: String,
        #[arg(long)]
        amount: f64,
        /// Profile ids sharing the cost equally. Defaults to all friends,
        /// you included.
        #[arg(long = "split")]
        split: Vec<String>,
        /// Payer as `id=amount`; repeatable. Defaults to you paying the
        /// whole amount.
        #[arg(long = "payer")]
        payers: Vec<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Draft an expense from free text via the extraction service.
    Quick {
        text: String,
        /// Print the draft without recording it.
        #[arg(long)]
        dry_run: bool,
    },
    /// Delete an expense.
    Delete { expense_id: String },
    /// Update your display name or avatar.
    Profile {
        #[arg(long)]
        name: Option<String>,
        /// Image file, inlined as base64.
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "divvy={level},client={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let http = reqwest::Client::new();
    let api = ApiClient::new(http.clone(), settings.server.base_url.clone());
    let store = Store::new(api.clone());
    let state = StateStore::new(PathBuf::from(
        settings
            .app
            .state_path
            .clone()
            .unwrap_or_else(|| DEFAULT_STATE_PATH.to_string()),
    ));

    let sessions = SessionStore::new();
    if let Some(saved) = state.load_session() {
        sessions.establish(saved);
    }

    match cli.command {
        Command::Signup {
            email,
            display_name,
            password,
        } => {
            let session = api.sign_up(&email, &password, &display_name).await?;
            state.save_session(Some(&session))?;
            sessions.establish(session.clone());
            println!("signed up and in as {}", session.email);
        }
        Command::Signin { email, password } => {
            let session = api.sign_in(&email, &password).await?;
            state.save_session(Some(&session))?;
            sessions.establish(session.clone());
            println!("signed in as {}", session.email);
        }
        Command::Signout => {
            if let Some(session) = sessions.current() {
                if let Err(err) = api.sign_out(&session).await {
                    tracing::warn!("server sign-out failed: {err}");
                }
            }
            sessions.clear();
            state.save_session(None)?;
            println!("signed out");
        }
        Command::Balances => {
            let session = require_session(&sessions)?;
            let snapshot = store.refresh(&session).await?;
            print_balances(&snapshot);
        }
        Command::Friends => {
            let session = require_session(&sessions)?;
            let snapshot = store.refresh(&session).await?;
            print_friends(&snapshot);
        }
        Command::Request { email } => {
            let session = require_session(&sessions)?;
            let request = api.send_friend_request(&session, &email).await?;
            println!("request {} sent", request.id);
        }
        Command::Accept { request_id } => {
            let session = require_session(&sessions)?;
            api.accept_friend_request(&session, &request_id).await?;
            println!("request {request_id} accepted");
        }
        Command::Unfriend { user_id } => {
            let session = require_session(&sessions)?;
            api.unfriend(&session, &user_id).await?;
            println!("unfriended {user_id}");
        }
        Command::Expenses => {
            let session = require_session(&sessions)?;
            let snapshot = store.refresh(&session).await?;
            for expense in &snapshot.expenses {
                let date = expense
                    .created_at
                    .map(|at| at.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "????-??-??".to_string());
                println!(
                    "{}  {}  {:>10.2}  {} payer(s), split {} ways  [{}]",
                    date,
                    expense.description,
                    expense.amount,
                    expense.paid_by.len(),
                    expense.split_between.len(),
                    expense.id,
                );
            }
        }
        Command::Add {
            description,
            amount,
            split,
            payers,
            category,
        } => {
            let session = require_session(&sessions)?;
            let snapshot = store.refresh(&session).await?;

            let split_between = if split.is_empty() {
                snapshot
                    .friends
                    .iter()
                    .map(|friend| friend.profile.id.clone())
                    .collect()
            } else {
                split
            };

            let mut draft = if payers.is_empty() {
                ExpenseDraft::single_payer(&description, amount, split_between, &session.user_id)
            } else {
                let mut paid_by = HashMap::new();
                for raw in &payers {
                    let (id, paid) = parse_payer(raw)?;
                    paid_by.insert(id, paid);
                }
                ExpenseDraft {
                    description,
                    amount,
                    paid_by,
                    split_between,
                    category: None,
                }
            };
            draft.category = category;

            let payload = draft.into_new(&session.user_id)?;
            let created = api.insert_expense(&session, payload).await?;
            println!("recorded expense {}", created.id);
        }
        Command::Quick { text, dry_run } => {
            let session = require_session(&sessions)?;
            let snapshot = store.refresh(&session).await?;

            let draft = match &settings.extraction {
                Some(extraction) => {
                    let extractor =
                        ExtractionClient::new(http.clone(), extraction.base_url.clone());
                    extractor
                        .draft_from_text(&text, &snapshot.friends, &session.user_id)
                        .await
                }
                None => {
                    tracing::warn!("no extraction service configured, using a blank draft");
                    ExpenseDraft::from_guess(
                        Default::default(),
                        &text,
                        &snapshot.friends,
                        &session.user_id,
                    )
                }
            };

            print_draft(&draft, &snapshot);
            if dry_run {
                return Ok(());
            }

            match draft.into_new(&session.user_id) {
                Ok(payload) => {
                    let created = api.insert_expense(&session, payload).await?;
                    println!("recorded expense {}", created.id);
                }
                Err(err) => {
                    println!("draft is incomplete ({err}); finish it with `divvy add`");
                }
            }
        }
        Command::Delete { expense_id } => {
            let session = require_session(&sessions)?;
            api.delete_expense(&session, &expense_id).await?;
            println!("deleted expense {expense_id}");
        }
        Command::Profile { name, avatar } => {
            let session = require_session(&sessions)?;
            let avatar = match avatar {
                Some(path) => Some(encode_avatar(&path)?),
                None => None,
            };
            let profile = api.update_profile(&session, name, avatar).await?;
            println!("profile updated: {}", profile.display_name);
        }
    }

    Ok(())
}

fn require_session(sessions: &SessionStore) -> AppResult<Session> {
    sessions
        .current()
        .ok_or_else(|| "not signed in (run `divvy signin` first)".into())
}

/// Parses a `--payer id=amount` argument.
fn parse_payer(raw: &str) -> AppResult<(String, f64)> {
    let (id, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected id=amount, got '{raw}'"))?;
    let amount: f64 = amount
        .parse()
        .map_err(|_| format!("invalid payer amount in '{raw}'"))?;
    Ok((id.to_string(), amount))
}

/// Inlines an image file as a base64 data string.
fn encode_avatar(path: &PathBuf) -> AppResult<String> {
    let bytes = std::fs::read(path)?;
    let mime = match path.extension().and_then(|ext| ext.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/png",
    };
    let encoded = base64::prelude::BASE64_STANDARD.encode(bytes);
    Ok(format!("data:{mime};base64,{encoded}"))
}

fn display_name(snapshot: &Snapshot, id: &str) -> String {
    snapshot
        .friends
        .iter()
        .find(|friend| friend.profile.id == id)
        .map(|friend| friend.profile.display_name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn print_balances(snapshot: &Snapshot) {
    let mut entries: Vec<(&String, &f64)> = snapshot.balances.iter().collect();
    entries.sort_by_key(|(id, _)| display_name(snapshot, id.as_str()));

    for (id, balance) in entries {
        let name = display_name(snapshot, id);
        if balance.abs() < 0.01 {
            println!("settled up with {name}");
        } else if *balance > 0.0 {
            println!("{name} owes you {balance:.2}");
        } else {
            println!("you owe {name} {:.2}", balance.abs());
        }
    }
}

fn print_friends(snapshot: &Snapshot) {
    for friend in &snapshot.friends {
        if friend.is_me {
            continue;
        }
        println!(
            "{}  <{}>  [{}]",
            friend.profile.display_name, friend.profile.email, friend.profile.id
        );
    }
    for request in &snapshot.pending.incoming {
        println!(
            "incoming request {} from {} (accept with `divvy accept {}`)",
            request.id, request.sender_id, request.id
        );
    }
    for request in &snapshot.pending.outgoing {
        println!("outgoing request {} to {}", request.id, request.receiver_id);
    }
}

fn print_draft(draft: &ExpenseDraft, snapshot: &Snapshot) {
    println!("draft: {} ({:.2})", draft.description, draft.amount);
    let split: Vec<String> = draft
        .split_between
        .iter()
        .map(|id| display_name(snapshot, id))
        .collect();
    println!("split between: {}", split.join(", "));
    for (id, paid) in &draft.paid_by {
        println!("paid by {}: {:.2}", display_name(snapshot, id), paid);
    }
}

#[cfg(test)]
mod tests {
    use super::parse_payer;

    #[test]
    fn payer_argument_parses_id_and_amount() {
        let (id, amount) = parse_payer("u1=150.5").unwrap();
        assert_eq!(id, "u1");
        assert_eq!(amount, 150.5);
    }

    #[test]
    fn malformed_payer_argument_is_rejected() {
        assert!(parse_payer("u1").is_err());
        assert!(parse_payer("u1=abc").is_err());
    }
}

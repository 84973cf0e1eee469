//! Client terminale: login, ingresso in una stanza, messaggi in tempo
//! quasi reale via polling.

use client::{ApiClient, ClientError, Message, RoomSubscription, TimelineEvent};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const POLL_INTERVAL: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let (base_url, username, password, room_name) =
        match (args.next(), args.next(), args.next(), args.next()) {
            (Some(u), Some(n), Some(p), Some(r)) => (u, n, p, r),
            _ => {
                eprintln!("Usage: client <base_url> <username> <password> <room>");
                std::process::exit(2);
            }
        };

    let mut api = ApiClient::new(base_url);

    // registrazione idempotente: 409 vuol dire che l'utente esiste già
    match api.register(&username, &password, None).await {
        Ok(_) | Err(ClientError::Api { code: 409, .. }) => {}
        Err(e) => return Err(e.into()),
    }

    let login = api.login(&username, &password).await?;
    api.set_token(login.token);
    println!("-- logged in as {}", login.user.nickname);

    // trova la stanza per nome, o creala
    let rooms = api.list_rooms().await?;
    let room_id = match rooms.iter().find(|r| r.room_name == room_name) {
        Some(room) => room.room_id,
        None => api.create_room(&room_name).await?.room_id,
    };

    let (subscription, mut events) = RoomSubscription::start(api, room_id, POLL_INTERVAL);

    println!("-- joined '{room_name}', type a message and press enter (/quit to exit)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(TimelineEvent::Baseline(messages))
                    | Some(TimelineEvent::Delta(messages)) => {
                        for message in &messages {
                            print_message(message);
                        }
                    }
                    None => break,
                }
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        let line = line.trim();
                        if line == "/quit" {
                            break;
                        }
                        if !line.is_empty() {
                            if let Err(e) = subscription.send(line).await {
                                eprintln!("-- send failed: {e}");
                            }
                        }
                    }
                    None => break,
                }
            }
        }
    }

    Ok(())
}

fn print_message(message: &Message) {
    println!("[{}] {}", message.sender, message.content);
}

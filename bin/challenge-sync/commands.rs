//! Subcommand handlers

use crate::style::*;
use anyhow::{anyhow, Context, Result};
use challenge_sync::{ChallengeStore, HttpTransport};
use std::time::Duration;

type Store = ChallengeStore<HttpTransport>;

pub async fn list(store: &Store) -> Result<()> {
    let challenges = store.fetch_list().await;

    print_header(&format!(
        "Challenges for {} ({})",
        store.player().player_id,
        challenges.len()
    ));
    if challenges.is_empty() {
        println!("No challenges available");
        return Ok(());
    }
    println!("{}", challenge_table(&challenges, store.tracker()));
    Ok(())
}

pub async fn show(store: &Store, id: &str) -> Result<()> {
    let challenge = store
        .fetch_single(id)
        .await
        .ok_or_else(|| anyhow!("Challenge {} not found", id))?;

    let json = serde_json::to_string_pretty(&challenge).context("Failed to render challenge")?;
    println!("{}", json);
    Ok(())
}

pub async fn progress(store: &Store, id: &str, value: i32) -> Result<()> {
    // list first so the update lands on a tracked challenge
    store.fetch_list().await;
    let mut challenge = store
        .cached(id)
        .ok_or_else(|| anyhow!("Challenge {} is not in the player's list", id))?;

    match store.update_progress(&mut challenge, value).await {
        Ok(()) => {
            print_success(&format!(
                "Challenge {} progress updated to {}%",
                id, challenge.progress
            ));
            Ok(())
        }
        Err(e) => {
            print_failure(&format!("Progress update for {} failed", id));
            Err(e).context("Progress update rejected")
        }
    }
}

pub async fn claim(store: &Store, id: &str) -> Result<()> {
    store.fetch_list().await;
    let challenge = store
        .cached(id)
        .ok_or_else(|| anyhow!("Challenge {} is not in the player's list", id))?;

    match store.claim(&challenge).await {
        Ok(()) => {
            print_success(&format!("Challenge {} claimed", id));
            Ok(())
        }
        Err(e) => {
            print_failure(&format!("Claim for {} failed", id));
            Err(e).context("Claim rejected")
        }
    }
}

pub async fn watch(store: &Store, interval_secs: u64, rounds: Option<u32>) -> Result<()> {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    let mut round = 0u32;

    loop {
        ticker.tick().await;
        round += 1;

        let challenges = store.fetch_list().await;
        print_header(&format!(
            "Round {} - {} challenges, {} tracked",
            round,
            challenges.len(),
            store.tracker().len()
        ));
        println!("{}", timing_table(&store.tracker().report()));

        if rounds.is_some_and(|max| round >= max) {
            return Ok(());
        }
    }
}

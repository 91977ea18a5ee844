pub mod client;

use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::models::Country;

pub use client::{CountryClient, FetchError};

/// Request to run one fetch cycle on the worker thread
pub struct FetchRequest;

/// What the worker sends back for each request
pub type FetchOutcome = Result<Vec<Country>, FetchError>;

/// Spawn the background fetch worker
///
/// The worker owns the blocking HTTP client and runs exactly one fetch per
/// request received; outcomes come back over the returned receiver in
/// completion order. The thread exits when either channel end is dropped.
pub fn spawn_fetch_worker(endpoint: String) -> (Sender<FetchRequest>, Receiver<FetchOutcome>) {
    let (request_tx, request_rx) = mpsc::channel::<FetchRequest>();
    let (outcome_tx, outcome_rx) = mpsc::channel::<FetchOutcome>();

    std::thread::spawn(move || {
        log::debug!("Dashboard fetch worker started");

        let client = CountryClient::new(endpoint);

        while let Ok(FetchRequest) = request_rx.recv() {
            let outcome = match &client {
                Ok(client) => client.fetch_all(),
                // Client construction failed at startup; every request gets
                // an answer so the panel never sticks in its loading state
                Err(e) => Err(FetchError::Client(e.to_string())),
            };

            if outcome_tx.send(outcome).is_err() {
                log::debug!("Fetch worker: main thread disconnected, exiting");
                break;
            }
        }

        log::debug!("Dashboard fetch worker exiting");
    });

    (request_tx, outcome_rx)
}

/// Sample up to `n` countries for display
///
/// The full collection is shuffled (an unbiased permutation, not a partial
/// one) and then truncated, so every record has the same chance of showing
/// up. With fewer than `n` records the whole collection is returned.
pub fn sample_countries(countries: Vec<Country>, n: usize) -> Vec<Country> {
    sample_with_rng(countries, n, &mut rand::rng())
}

fn sample_with_rng<R: Rng + ?Sized>(
    mut countries: Vec<Country>,
    n: usize,
    rng: &mut R,
) -> Vec<Country> {
    countries.shuffle(rng);
    countries.truncate(n);
    countries
}

//! Operator-facing collaborators: confirmation prompts, opening map links,
//! and rendering the queue table.

use std::fmt::Write as _;
use std::future::Future;
use std::sync::Arc;

use ride_queue_core::{Filter, Ride};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this ride?";
pub const FINISH_PROMPT: &str =
    "Are you sure you want to finish this ride? It will be removed from the queue forever.";
pub const NOTIFY_PROMPT: &str = "Would you like to notify the user that their ride is ready?";

pub trait Ui: Send + Sync + 'static {
    /// Ask the operator a yes/no question.
    fn confirm(&self, prompt: &str) -> impl Future<Output = bool> + Send;

    /// Hand a map link to whatever can display it.
    fn open_url(&self, url: &str);
}

pub type StdinLines = Arc<Mutex<Lines<BufReader<Stdin>>>>;

pub fn stdin_lines() -> StdinLines {
    Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()))
}

/// Prompts on stdout and reads answers from the same stdin stream the
/// command loop uses.
#[derive(Clone)]
pub struct TerminalUi {
    input: StdinLines,
}

impl TerminalUi {
    pub fn new(input: StdinLines) -> Self {
        Self { input }
    }
}

impl Ui for TerminalUi {
    async fn confirm(&self, prompt: &str) -> bool {
        let mut stdout = tokio::io::stdout();
        let question = format!("{prompt} [y/N] ");
        if stdout.write_all(question.as_bytes()).await.is_err() || stdout.flush().await.is_err() {
            return false;
        }
        match self.input.lock().await.next_line().await {
            Ok(Some(answer)) => is_yes(&answer),
            _ => false,
        }
    }

    fn open_url(&self, url: &str) {
        println!("open: {url}");
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Plain-text table of the displayed rides.
pub fn render(filter: Filter, rides: &[Ride]) -> String {
    let mut out = format!("-- {} ride(s), filter: {filter} --\n", rides.len());
    for ride in rides {
        let _ = writeln!(
            out,
            "#{:<5} {:>2} pax  {:<10} {} -> {}{}",
            ride.id,
            ride.num_passengers,
            if ride.on_campus { "on campus" } else { "off campus" },
            ride.pickup_address.as_deref().unwrap_or_default(),
            ride.dropoff_address.as_deref().unwrap_or_default(),
            ride.phone
                .as_deref()
                .map(|p| format!("  ({p})"))
                .unwrap_or_default(),
        );
    }
    out
}

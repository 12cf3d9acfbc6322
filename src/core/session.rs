use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use crate::core::pipeline::{Pipeline, RunOutcome};
use crate::models::Coordinate;
use crate::report::{format_minutes, NO_DATA};

/// Input that ends the session
pub const QUIT: &str = "q";

pub const PROMPT: &str = "Enter a Canadian postal code in the format 'A1A 1A1' (or 'q' to quit): ";

/// Where the interactive loop currently stands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    /// Waiting for a postal code
    Prompting,
    /// A postal code resolved; the pipeline runs next
    Resolved(Coordinate),
    Quitting,
}

/// What happened while in a state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// The user asked to stop, or input ended
    Quit,
    Resolved(Coordinate),
    /// Invalid format, unknown postal code or geocoder outage
    Rejected,
    /// A pipeline run ended, successfully or not
    RunFinished,
}

impl SessionState {
    /// Transition table of the prompt loop
    ///
    /// Pairs without a defined transition leave the state unchanged.
    pub fn next(self, event: SessionEvent) -> SessionState {
        match (self, event) {
            (SessionState::Quitting, _) => SessionState::Quitting,
            (_, SessionEvent::Quit) => SessionState::Quitting,
            (SessionState::Prompting, SessionEvent::Resolved(origin)) => SessionState::Resolved(origin),
            (SessionState::Prompting, SessionEvent::Rejected) => SessionState::Prompting,
            (SessionState::Resolved(_), SessionEvent::RunFinished) => SessionState::Prompting,
            (state, _) => state,
        }
    }
}

pub fn is_quit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(QUIT)
}

/// Interactive loop: prompt, resolve, run, repeat until the user quits
///
/// Bad input and provider outages are reported to the user and the loop
/// carries on; only I/O errors on the terminal end it.
pub struct Session<'a> {
    pipeline: &'a Pipeline,
    state: SessionState,
}

impl<'a> Session<'a> {
    pub fn new(pipeline: &'a Pipeline) -> Self {
        Self {
            pipeline,
            state: SessionState::Prompting,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drive the loop until `Quitting`, returning how many runs completed
    ///
    /// `on_outcome` is called after every successful run.
    pub async fn drive<R, W, F>(&mut self, input: &mut R, output: &mut W, mut on_outcome: F) -> io::Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        F: FnMut(&RunOutcome),
    {
        let mut completed = 0;

        loop {
            let event = match self.state {
                SessionState::Quitting => break,
                SessionState::Prompting => self.prompt(input, output).await?,
                SessionState::Resolved(origin) => {
                    match self.pipeline.run(origin).await {
                        Ok(outcome) => {
                            write_summary(output, &outcome).await?;
                            completed += 1;
                            on_outcome(&outcome);
                        }
                        Err(e) => {
                            tracing::error!("Run for {} aborted: {}", origin, e);
                            write_line(output, &format!("Search failed: {}. Try again or enter 'q' to quit.", e)).await?;
                        }
                    }
                    SessionEvent::RunFinished
                }
            };

            self.state = self.state.next(event);
        }

        output.flush().await?;
        Ok(completed)
    }

    async fn prompt<R, W>(&self, input: &mut R, output: &mut W) -> io::Result<SessionEvent>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let mut line = String::new();
        if input.read_line(&mut line).await? == 0 {
            write_line(output, "").await?;
            return Ok(SessionEvent::Quit);
        }

        let line = line.trim();
        if is_quit(line) {
            return Ok(SessionEvent::Quit);
        }

        match self.pipeline.resolve(line).await {
            Ok(origin) => Ok(SessionEvent::Resolved(origin)),
            Err(e) => {
                tracing::warn!("Could not resolve {:?}: {}", line, e);
                write_line(output, &format!("{}.", capitalize(&e.to_string()))).await?;
                Ok(SessionEvent::Rejected)
            }
        }
    }
}

async fn write_summary<W: AsyncWrite + Unpin>(output: &mut W, outcome: &RunOutcome) -> io::Result<()> {
    if outcome.report.is_empty() {
        write_line(output, &format!("No grocery stores found near {}.", outcome.origin)).await?;
    } else {
        write_line(
            output,
            &format!(
                "Top {} of {} stores near {}:",
                outcome.report.len(),
                outcome.report.considered,
                outcome.origin
            ),
        )
        .await?;

        for (i, entry) in outcome.report.iter().enumerate() {
            let candidate = &entry.candidate;
            write_line(
                output,
                &format!(
                    "  {}. {} (score {:.2}) travel: {}, wait: {}, popularity: {}",
                    i + 1,
                    candidate.name,
                    entry.score,
                    candidate.travel_time_text.as_deref().unwrap_or(NO_DATA),
                    candidate
                        .wait_minutes
                        .map(|m| format!("{} min", format_minutes(m)))
                        .unwrap_or_else(|| NO_DATA.to_string()),
                    candidate
                        .current_popularity
                        .map(|p| format!("{}%", p))
                        .unwrap_or_else(|| NO_DATA.to_string()),
                ),
            )
            .await?;
        }
    }

    write_line(
        output,
        &format!(
            "Saved {} and {}",
            outcome.csv_path.display(),
            outcome.map_path.display()
        ),
    )
    .await
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> io::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

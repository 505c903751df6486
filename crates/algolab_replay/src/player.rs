//! Tokio driver that owns a session and its playback timer.
//!
//! The player runs as a single task. Commands arrive over an `mpsc` channel
//! and are answered over `oneshot`; every change is published on a `watch`
//! channel before the reply goes out. The task keeps one
//! `tokio::time::Interval` per controller timer epoch, so a timer the
//! controller has abandoned is dropped on the next loop turn and can never
//! deliver a tick.

use crate::controller::TimerEpoch;
use crate::session::{Action, LabSession, ReadModel, SessionError};
use algolab_render::{StructureLayout, VisualDescription};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

const COMMAND_BUFFER: usize = 32;

/// Error talking to the player task
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    /// Task has stopped
    #[error("player task has stopped")]
    Closed,

    /// Session rejected the command
    #[error(transparent)]
    Session(#[from] SessionError),
}

enum Command {
    Apply {
        action: Action,
        reply: oneshot::Sender<Result<ReadModel, SessionError>>,
    },
    Render {
        layout: Option<StructureLayout>,
        reply: oneshot::Sender<Result<VisualDescription, SessionError>>,
    },
    Shutdown,
}

/// Handle to a running player.
///
/// Dropping the handle stops the task and its timer.
#[derive(Debug)]
pub struct PlayerHandle {
    commands: mpsc::Sender<Command>,
    model: watch::Receiver<ReadModel>,
    task: JoinHandle<LabSession>,
}

/// Spawns player tasks
#[derive(Debug, Clone, Copy, Default)]
pub struct Player;

impl Player {
    /// Move `session` into a new task on the current runtime
    #[must_use]
    pub fn spawn(session: LabSession) -> PlayerHandle {
        let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);
        let (publisher, model) = watch::channel(session.read_model());
        let task = tokio::spawn(run(session, receiver, publisher));
        info!("player started");
        PlayerHandle {
            commands,
            model,
            task,
        }
    }
}

impl PlayerHandle {
    /// Apply `action` and return the resulting read model
    ///
    /// # Errors
    ///
    /// Returns error if the session rejects the action or the task is gone
    pub async fn apply(&self, action: Action) -> Result<ReadModel, PlayerError> {
        let (reply, answer) = oneshot::channel();
        self.send(Command::Apply { action, reply }).await?;
        Ok(answer.await.map_err(|_| PlayerError::Closed)??)
    }

    /// Describe the current position; `None` uses the input's default layout
    ///
    /// # Errors
    ///
    /// Returns error if the layout does not fit or the task is gone
    pub async fn render(
        &self,
        layout: Option<StructureLayout>,
    ) -> Result<VisualDescription, PlayerError> {
        let (reply, answer) = oneshot::channel();
        self.send(Command::Render { layout, reply }).await?;
        Ok(answer.await.map_err(|_| PlayerError::Closed)??)
    }

    /// Latest published read model
    #[must_use]
    pub fn model(&self) -> ReadModel {
        self.model.borrow().clone()
    }

    /// Receiver that sees every published read model
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ReadModel> {
        self.model.clone()
    }

    /// Stop the task and take the session back
    ///
    /// # Errors
    ///
    /// Returns error if the task panicked or was cancelled
    pub async fn shutdown(self) -> Result<LabSession, PlayerError> {
        // A send failure means the loop already ended; the join reports how.
        let _ = self.commands.send(Command::Shutdown).await;
        self.task.await.map_err(|_| PlayerError::Closed)
    }

    async fn send(&self, command: Command) -> Result<(), PlayerError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| PlayerError::Closed)
    }
}

struct Ticker {
    epoch: TimerEpoch,
    interval: Interval,
}

/// Bring the running interval in line with the controller's timer
fn sync_ticker(session: &LabSession, ticker: &mut Option<Ticker>) {
    match session.controller().timer() {
        None => {
            if ticker.take().is_some() {
                debug!("timer stopped");
            }
        }
        Some(timer) if ticker.as_ref().map(|t| t.epoch) != Some(timer.epoch) => {
            let mut interval = interval_at(Instant::now() + timer.period, timer.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            debug!(
                epoch = timer.epoch.as_u64(),
                period_ms = timer.period.as_millis() as u64,
                "timer started"
            );
            *ticker = Some(Ticker {
                epoch: timer.epoch,
                interval,
            });
        }
        Some(_) => {}
    }
}

async fn next_tick(ticker: &mut Option<Ticker>) -> TimerEpoch {
    match ticker {
        Some(ticker) => {
            ticker.interval.tick().await;
            ticker.epoch
        }
        None => std::future::pending().await,
    }
}

async fn run(
    mut session: LabSession,
    mut commands: mpsc::Receiver<Command>,
    publisher: watch::Sender<ReadModel>,
) -> LabSession {
    let mut ticker: Option<Ticker> = None;

    loop {
        sync_ticker(&session, &mut ticker);

        tokio::select! {
            command = commands.recv() => match command {
                None | Some(Command::Shutdown) => break,
                Some(Command::Apply { action, reply }) => {
                    let result = session.apply(action).map(|()| session.read_model());
                    publisher.send_replace(session.read_model());
                    let _ = reply.send(result);
                }
                Some(Command::Render { layout, reply }) => {
                    let layout = layout.unwrap_or_else(|| session.default_layout());
                    let _ = reply.send(session.render(&layout));
                }
            },
            epoch = next_tick(&mut ticker) => {
                let outcome = session.tick(epoch);
                debug!(?outcome, "tick");
                publisher.send_replace(session.read_model());
            }
        }
    }

    info!("player stopped");
    session
}

//! Playback controller
//!
//! All playback state lives in one actor task. [`PlaybackController`] is a
//! cheap, cloneable handle that sends commands to it over a bounded channel
//! and awaits the reply, so operations from request handlers and the progress
//! poller are applied strictly one at a time, in arrival order.
//!
//! ```text
//! handler ─┐
//! handler ─┼─▶ mpsc::Sender<Command> ─▶ actor ─▶ ProcessSupervisor ─▶ player process
//! poller  ─┘                             │
//!                                        ├─ NowPlaying (clock)
//!                                        ├─ UpNext / History
//!                                        └─ ShufflePool
//! ```

use crate::backend::PlayerBackend;
use crate::error::{PlaybackError, Result};
use crate::history::History;
use crate::queue::UpNext;
use crate::session::{self, NowPlaying, NOT_PLAYING};
use crate::shuffle::ShufflePool;
use crate::supervisor::ProcessSupervisor;
use crate::types::{Advance, PlaybackConfig, PlaybackState, Snapshot};
use std::sync::Arc;
use std::time::Duration;
use stereo_core::{format_clock, LibraryStore, TrackId};
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

type Reply<T> = oneshot::Sender<T>;

/// Commands processed by the controller actor
#[derive(Debug)]
enum Command {
    PlayTrack(TrackId, Reply<Result<Snapshot>>),
    Enqueue {
        ids: Vec<TrackId>,
        priority: bool,
        reply: Reply<Result<Snapshot>>,
    },
    Next(Reply<Result<Snapshot>>),
    FinishTrack(u64, Reply<Result<Advance>>),
    Stop(Reply<Snapshot>),
    Pause(Reply<Snapshot>),
    Resume(Reply<Result<Snapshot>>),
    Rewind(Duration, Reply<Result<Snapshot>>),
    Forward(Duration, Reply<Result<Snapshot>>),
    BeginShuffle(Option<String>, Reply<Result<Snapshot>>),
    EndShuffle(Reply<Snapshot>),
    ClearQueue(Reply<Snapshot>),
    Snapshot(Reply<Snapshot>),
    Shutdown(Reply<()>),
}

/// Handle to the playback actor
///
/// Every mutating operation returns the snapshot taken right after it was
/// applied. Once the actor has shut down, every operation fails with
/// [`PlaybackError::ControllerClosed`].
#[derive(Debug, Clone)]
pub struct PlaybackController {
    commands: mpsc::Sender<Command>,
}

impl PlaybackController {
    /// Start the actor on the current tokio runtime
    pub fn spawn(
        backend: Arc<dyn PlayerBackend>,
        library: Arc<dyn LibraryStore>,
        config: PlaybackConfig,
    ) -> Self {
        let (tx, rx) = mpsc::channel(config.command_buffer.max(1));

        let actor = Player {
            supervisor: ProcessSupervisor::new(backend),
            library,
            now: None,
            generation: 0,
            queue: UpNext::new(),
            history: History::new(config.history_limit),
            shuffle: None,
        };

        tokio::spawn(actor.run(rx));

        Self { commands: tx }
    }

    async fn request<T>(&self, command: impl FnOnce(Reply<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| PlaybackError::ControllerClosed)?;
        response.await.map_err(|_| PlaybackError::ControllerClosed)
    }

    /// Stop whatever is playing and play `id` from the start
    pub async fn play_track(&self, id: TrackId) -> Result<Snapshot> {
        self.request(|reply| Command::PlayTrack(id, reply)).await?
    }

    /// Add `id` to the up-next queue
    ///
    /// Without `priority`, playback starts immediately when nothing is loaded.
    pub async fn enqueue(&self, id: TrackId, priority: bool) -> Result<Snapshot> {
        self.request(|reply| Command::Enqueue {
            ids: vec![id],
            priority,
            reply,
        })
        .await?
    }

    /// Add several ids to the up-next queue, keeping their order
    pub async fn enqueue_many(&self, ids: Vec<TrackId>) -> Result<Snapshot> {
        self.request(|reply| Command::Enqueue {
            ids,
            priority: false,
            reply,
        })
        .await?
    }

    /// Skip to the next track from the queue or shuffle pool
    pub async fn next(&self) -> Result<Snapshot> {
        self.request(Command::Next).await?
    }

    /// Report that track load `generation` has played to its end
    ///
    /// Only advances if that load is still current.
    pub async fn finish_track(&self, generation: u64) -> Result<Advance> {
        self.request(|reply| Command::FinishTrack(generation, reply))
            .await?
    }

    pub async fn stop(&self) -> Result<Snapshot> {
        self.request(Command::Stop).await
    }

    pub async fn pause(&self) -> Result<Snapshot> {
        self.request(Command::Pause).await
    }

    pub async fn resume(&self) -> Result<Snapshot> {
        self.request(Command::Resume).await?
    }

    pub async fn rewind(&self, by: Duration) -> Result<Snapshot> {
        self.request(|reply| Command::Rewind(by, reply)).await?
    }

    pub async fn forward(&self, by: Duration) -> Result<Snapshot> {
        self.request(|reply| Command::Forward(by, reply)).await?
    }

    /// Shuffle a playlist, or the whole library when `playlist` is `None`
    pub async fn begin_shuffle(&self, playlist: Option<String>) -> Result<Snapshot> {
        self.request(|reply| Command::BeginShuffle(playlist, reply))
            .await?
    }

    pub async fn end_shuffle(&self) -> Result<Snapshot> {
        self.request(Command::EndShuffle).await
    }

    pub async fn clear_queue(&self) -> Result<Snapshot> {
        self.request(Command::ClearQueue).await
    }

    pub async fn snapshot(&self) -> Result<Snapshot> {
        self.request(Command::Snapshot).await
    }

    /// Kill the output process and stop the actor
    pub async fn shutdown(&self) -> Result<()> {
        self.request(Command::Shutdown).await
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}

/// State owned by the actor task
struct Player {
    supervisor: ProcessSupervisor,
    library: Arc<dyn LibraryStore>,
    now: Option<NowPlaying>,
    generation: u64,
    queue: UpNext,
    history: History,
    /// `Some` while shuffle mode is active, even once the pool is empty
    shuffle: Option<ShufflePool>,
}

impl Player {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        tracing::debug!(
            "Playback controller started ({})",
            self.supervisor.backend().name()
        );

        while let Some(command) = commands.recv().await {
            match command {
                Command::PlayTrack(id, reply) => {
                    let result = self.play_track(id).await;
                    let _ = reply.send(result.map(|_| self.snapshot()));
                }
                Command::Enqueue {
                    ids,
                    priority,
                    reply,
                } => {
                    let result = self.enqueue(ids, priority).await;
                    let _ = reply.send(result.map(|()| self.snapshot()));
                }
                Command::Next(reply) => {
                    let result = self.advance().await;
                    let _ = reply.send(result.map(|_| self.snapshot()));
                }
                Command::FinishTrack(generation, reply) => {
                    let result = self.finish_track(generation).await;
                    let _ = reply.send(result);
                }
                Command::Stop(reply) => {
                    self.halt().await;
                    let _ = reply.send(self.snapshot());
                }
                Command::Pause(reply) => {
                    self.pause().await;
                    let _ = reply.send(self.snapshot());
                }
                Command::Resume(reply) => {
                    let result = self.resume().await;
                    let _ = reply.send(result.map(|()| self.snapshot()));
                }
                Command::Rewind(by, reply) => {
                    let result = self.seek_by(by, session::rewound).await;
                    let _ = reply.send(result.map(|()| self.snapshot()));
                }
                Command::Forward(by, reply) => {
                    let result = self.seek_by(by, session::forwarded).await;
                    let _ = reply.send(result.map(|()| self.snapshot()));
                }
                Command::BeginShuffle(playlist, reply) => {
                    let result = self.begin_shuffle(playlist).await;
                    let _ = reply.send(result.map(|_| self.snapshot()));
                }
                Command::EndShuffle(reply) => {
                    if self.shuffle.take().is_some() {
                        tracing::info!("Shuffle ended");
                    }
                    let _ = reply.send(self.snapshot());
                }
                Command::ClearQueue(reply) => {
                    self.queue.clear();
                    let _ = reply.send(self.snapshot());
                }
                Command::Snapshot(reply) => {
                    let _ = reply.send(self.snapshot());
                }
                Command::Shutdown(reply) => {
                    self.halt().await;
                    let _ = reply.send(());
                    break;
                }
            }
        }

        self.supervisor.stop().await;
        tracing::info!("Playback controller stopped");
    }

    /// Load `id` and start it from the beginning
    ///
    /// Any failure leaves nothing playing.
    async fn play_track(&mut self, id: TrackId) -> Result<TrackId> {
        let track = match self.library.track_by_id(id).await {
            Ok(Some(track)) => track,
            Ok(None) => {
                tracing::warn!("Track {} not found, stopping playback", id);
                self.halt().await;
                return Err(PlaybackError::TrackNotFound(id));
            }
            Err(e) => {
                tracing::warn!("Failed to look up track {}: {}", id, e);
                self.halt().await;
                return Err(e.into());
            }
        };

        self.history.push(id);
        self.generation += 1;

        match self.supervisor.start(&track.path, Duration::ZERO).await {
            Ok(offset) => {
                tracing::info!(
                    "Playing {} \"{}\" ({})",
                    id,
                    track.title,
                    format_clock(track.duration)
                );
                self.now = Some(NowPlaying::start(
                    track,
                    self.generation,
                    offset,
                    Instant::now(),
                ));
                Ok(id)
            }
            Err(e) => {
                tracing::error!("Failed to start track {}: {}", id, e);
                self.now = None;
                Err(e)
            }
        }
    }

    /// Start the next track from the shuffle pool or the queue, or stop
    async fn advance(&mut self) -> Result<Advance> {
        let next = match self.shuffle.as_mut() {
            Some(pool) => pool.draw(),
            None => self.queue.pop(),
        };

        match next {
            Some(id) => self.play_track(id).await.map(Advance::Started),
            None => {
                tracing::debug!("Nothing left to play");
                self.halt().await;
                Ok(Advance::Stopped)
            }
        }
    }

    async fn enqueue(&mut self, ids: Vec<TrackId>, priority: bool) -> Result<()> {
        tracing::debug!("Queueing {:?} (priority: {})", ids, priority);
        self.queue.extend(ids);

        if !priority && self.now.is_none() {
            self.advance().await?;
        }
        Ok(())
    }

    async fn finish_track(&mut self, generation: u64) -> Result<Advance> {
        let current = self
            .now
            .as_ref()
            .filter(|now| !now.is_paused())
            .map(|now| now.generation);

        if current != Some(generation) {
            tracing::debug!(
                "Ignoring completion of load {} (current: {:?})",
                generation,
                current
            );
            return Ok(Advance::Ignored);
        }

        self.advance().await
    }

    /// Kill the process and return to "Not playing"
    async fn halt(&mut self) {
        self.supervisor.stop().await;
        if let Some(now) = self.now.take() {
            tracing::debug!("Stopped {}", now.track.id);
        }
    }

    async fn pause(&mut self) {
        let Some(now) = self.now.as_mut().filter(|now| !now.is_paused()) else {
            return;
        };

        let elapsed = now.pause(Instant::now());
        self.supervisor.stop().await;
        tracing::debug!("Paused at {}", format_clock(elapsed));
    }

    async fn resume(&mut self) -> Result<()> {
        let Some(now) = self.now.as_ref().filter(|now| now.is_paused()) else {
            return Ok(());
        };

        let instant = Instant::now();
        let position = now.elapsed(instant);
        if let Some(paused_for) = now.paused_for(instant) {
            tracing::debug!(
                "Resuming at {} after {:?}",
                format_clock(position),
                paused_for
            );
        }

        self.restart_at(position).await
    }

    async fn seek_by(
        &mut self,
        by: Duration,
        step: fn(Duration, Duration) -> Duration,
    ) -> Result<()> {
        let Some(now) = self.now.as_mut() else {
            return Ok(());
        };

        let target = now.within_track(step(now.elapsed(Instant::now()), by));

        if now.is_paused() {
            now.set_paused_position(target);
            tracing::debug!("Paused position moved to {}", format_clock(target));
            return Ok(());
        }

        self.restart_at(target).await
    }

    /// Relaunch the loaded track at `position` and re-anchor the clock
    async fn restart_at(&mut self, position: Duration) -> Result<()> {
        let Some(path) = self.now.as_ref().map(|now| now.track.path.clone()) else {
            return Ok(());
        };

        match self.supervisor.start(&path, position).await {
            Ok(actual) => {
                if let Some(now) = self.now.as_mut() {
                    now.run_from(actual, Instant::now());
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to restart {}: {}", path.display(), e);
                self.now = None;
                Err(e)
            }
        }
    }

    async fn begin_shuffle(&mut self, playlist: Option<String>) -> Result<Advance> {
        let ids = match &playlist {
            Some(name) => self.library.playlist_track_ids(name).await?,
            None => self.library.all_track_ids().await?,
        };

        let pool = ShufflePool::new(ids);
        tracing::info!(
            "Shuffling {} ({} tracks)",
            playlist.as_deref().unwrap_or("library"),
            pool.remaining()
        );
        self.shuffle = Some(pool);

        self.advance().await
    }

    fn snapshot(&self) -> Snapshot {
        let instant = Instant::now();
        let queue = self.queue.to_vec();
        let history = self.history.to_vec();
        let shuffle = self.shuffle.is_some();
        let shuffle_remaining = self.shuffle.as_ref().map_or(0, ShufflePool::remaining);

        match &self.now {
            Some(now) => Snapshot {
                track_id: Some(now.track.id),
                song: now.track.title.clone(),
                album: now.track.album.clone(),
                track_number: now.track.track_number,
                length: format_clock(now.track.duration),
                length_seconds: now.track.length_seconds(),
                elapsed_seconds: now.elapsed(instant).as_secs(),
                state: now.state(),
                playing: true,
                paused: now.is_paused(),
                generation: now.generation,
                queue,
                history,
                shuffle,
                shuffle_remaining,
            },
            None => Snapshot {
                track_id: None,
                song: NOT_PLAYING.to_string(),
                album: NOT_PLAYING.to_string(),
                track_number: 0,
                length: format_clock(Duration::ZERO),
                length_seconds: 0,
                elapsed_seconds: 0,
                state: PlaybackState::Stopped,
                playing: false,
                paused: false,
                generation: self.generation,
                queue,
                history,
                shuffle,
                shuffle_remaining,
            },
        }
    }
}

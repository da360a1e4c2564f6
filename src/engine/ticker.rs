//! The scheduler's own thread.
//!
//! Everything the scheduler mutates is moved into the thread on start and
//! handed back on stop, so there is exactly one writer while playing and no
//! locking around composition state.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, unbounded, Sender};
use log::{debug, error};

use crate::compose::composer::Composer;
use crate::engine::scheduler::Scheduler;
use crate::engine::status::PlaybackStatus;
use crate::error::EngineError;
use crate::io::renderer::OutputPort;
use crate::synth::synthesizer::Synthesizer;

/// State owned by whichever thread drives the scheduler.
pub struct SchedulerTask {
    pub composer: Composer,
    pub scheduler: Scheduler,
    pub synth: Synthesizer,
    pub port: OutputPort,
    pub status: Arc<PlaybackStatus>,
}

impl SchedulerTask {
    /// One scheduler pass against the current audio clock.
    pub fn tick(&mut self) -> usize {
        let now = self.port.clock.now();
        let previous_bar = self.scheduler.current_bar().map(|bar| bar.index);

        let dispatched = self.scheduler.tick(
            now,
            &mut self.composer,
            &self.synth,
            &mut self.port.voices,
        );
        self.port.collect_retired();

        if let Some(bar) = self.scheduler.current_bar() {
            if previous_bar != Some(bar.index) {
                self.status.set_bar(bar);
            }
        }
        self.status
            .set_position(self.scheduler.step(), self.scheduler.bar_count());
        dispatched
    }

    /// Re-rolls patterns mid-playback. The step clock keeps running; the
    /// next step opens bar 0 of the new material.
    pub fn regenerate(&mut self, variation: u64) {
        let seed = self.composer.seed();
        let composition = self.composer.reseed(seed, variation);
        self.port.controls.apply_tone(&composition.tone);
        self.status.set_composition(composition);
        self.scheduler.restart_bar();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Regenerate { variation: u64 },
    Stop,
}

/// Handle to a running scheduler thread.
pub struct Ticker {
    control: Sender<Control>,
    handle: Option<JoinHandle<Option<SchedulerTask>>>,
}

impl Ticker {
    /// On failure the task comes back untouched alongside the error.
    pub fn spawn(
        task: SchedulerTask,
        interval: Duration,
    ) -> Result<Self, (EngineError, Option<SchedulerTask>)> {
        // The task travels through a channel so a failed spawn can't lose it.
        let (task_tx, task_rx) = bounded::<SchedulerTask>(1);
        if let Err(err) = task_tx.send(task) {
            return Err((
                EngineError::SchedulerSpawn(std::io::Error::other("task channel closed")),
                Some(err.into_inner()),
            ));
        }
        let (control_tx, control_rx) = unbounded::<Control>();
        let thread_rx = task_rx.clone();

        let spawned = thread::Builder::new()
            .name("lofi-scheduler".into())
            .spawn(move || {
                let mut task = thread_rx.recv().ok()?;
                let ticks = tick(interval);
                task.tick();
                loop {
                    select! {
                        recv(control_rx) -> msg => match msg {
                            Ok(Control::Regenerate { variation }) => {
                                debug!("regenerating patterns, variation {variation}");
                                task.regenerate(variation);
                            }
                            Ok(Control::Stop) | Err(_) => break,
                        },
                        recv(ticks) -> _ => {
                            task.tick();
                        }
                    }
                }
                Some(task)
            });

        match spawned {
            Ok(handle) => Ok(Self {
                control: control_tx,
                handle: Some(handle),
            }),
            Err(err) => Err((EngineError::SchedulerSpawn(err), task_rx.try_recv().ok())),
        }
    }

    pub fn send(&self, control: Control) {
        if self.control.send(control).is_err() {
            error!("scheduler thread is gone");
        }
    }

    /// Stops the thread and returns its state. `None` only if the thread
    /// panicked.
    pub fn stop(mut self) -> Option<SchedulerTask> {
        self.join()
    }

    fn join(&mut self) -> Option<SchedulerTask> {
        let handle = self.handle.take()?;
        let _ = self.control.send(Control::Stop);
        match handle.join() {
            Ok(task) => task,
            Err(_) => {
                error!("scheduler thread panicked");
                None
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        let _ = self.join();
    }
}

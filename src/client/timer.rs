//! Per-question countdown ticking into the game's input channel.

use std::time::Duration;

use tokio::{
    sync::mpsc::UnboundedSender,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};

use super::game::GameInput;

/// Running per-question countdown.
///
/// Emits [`GameInput::Tick`] every `period` until cancelled. Dropping the handle cancels the
/// task, so holding it in an `Option` is enough to guarantee a single live countdown.
#[derive(Debug)]
pub struct Countdown {
    id: u64,
    task: JoinHandle<()>,
}

impl Countdown {
    /// Spawn a countdown whose ticks carry `id`.
    pub fn start(id: u64, period: Duration, inputs: UnboundedSender<GameInput>) -> Self {
        let task = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if inputs.send(GameInput::Tick { timer: id }).is_err() {
                    break;
                }
            }
        });

        Self { id, task }
    }

    /// Identifier carried by this countdown's ticks.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Stop ticking.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
    }
}

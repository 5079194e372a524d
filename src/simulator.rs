//! Animation of a robot model.
//!
//! Each tick advances every robot of the model by one step. Listeners registered with the
//! model are notified once per tick.

use std::{
    thread,
    time::{Duration, Instant},
};

use tracing::{debug, info};

use crate::domain::RobotModel;

pub const DEFAULT_PERIOD: Duration = Duration::from_millis(25);

pub struct Animation {
    model: RobotModel,
    period: Duration,
    ticks: u64,
}

impl Animation {
    pub fn new(model: RobotModel, period: Duration) -> Self {
        Self {
            model,
            period,
            ticks: 0,
        }
    }

    pub fn model(&self) -> &RobotModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut RobotModel {
        &mut self.model
    }

    pub fn into_model(self) -> RobotModel {
        self.model
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of ticks since creation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick(&mut self) {
        self.model.clock();
        self.ticks += 1;
    }

    /// Ticks `ticks` times, one period apart. Blocks the calling thread until done.
    pub fn run(&mut self, ticks: u64) {
        info!(ticks, period = ?self.period, "animation started");

        let mut next = Instant::now();
        for _ in 0..ticks {
            self.tick();

            next += self.period;
            let now = Instant::now();
            if next > now {
                thread::sleep(next - now);
            } else {
                debug!(tick = self.ticks, "animation behind schedule");
                next = now;
            }
        }

        info!(ticks = self.ticks, "animation finished");
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(
            RobotModel::from_config(&Default::default()),
            DEFAULT_PERIOD,
        )
    }
}

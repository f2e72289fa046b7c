//! CorePlugin wires frame timing and the per-tick system ordering for the scene.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;
use std::time::Duration;

const DEFAULT_TIME_SCALE: f32 = 1.0;
const MIN_TIME_SCALE: f32 = 0.001;
const MAX_TIME_SCALE: f32 = 64.0;
const DEFAULT_MAX_STEP_SECS: f32 = 0.1;
const MAX_STEP_CEILING_SECS: f32 = 1.0;

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Ordered phases of a single scene tick.
///
/// Movement must resolve before proximity is evaluated against the new position,
/// and the trigger prompt reacts to proximity changes from the same frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    Input,
    Movement,
    Proximity,
    Trigger,
    Presentation,
}

/// Tracks scaled simulation time derived from real frame deltas.
///
/// Scaled deltas are capped at `max_step` so a long frame hitch cannot carry the
/// player across several tiles in one gate check.
#[derive(Resource, Debug)]
pub struct SimulationClock {
    time_scale: f32,
    max_step: Duration,
    last_real_delta: Duration,
    last_scaled_delta: Duration,
    elapsed: Duration,
    ticks: u64,
}

impl SimulationClock {
    /// Creates a new clock with the provided time-scale multiplier and step cap.
    pub fn new(time_scale: f32, max_step_secs: f32) -> Self {
        let max_step = if max_step_secs.is_finite() && max_step_secs > 0.0 {
            Duration::from_secs_f32(max_step_secs.min(MAX_STEP_CEILING_SECS))
        } else {
            Duration::from_secs_f32(DEFAULT_MAX_STEP_SECS)
        };
        Self {
            time_scale: clamp_time_scale(time_scale),
            max_step,
            last_real_delta: Duration::ZERO,
            last_scaled_delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            ticks: 0,
        }
    }

    /// Sets the time-scale multiplier (clamped to a finite positive range).
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = clamp_time_scale(scale);
    }

    /// Returns the current time-scale multiplier.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Last real (unscaled) delta reported by Bevy's Time resource.
    #[cfg_attr(not(any(test, feature = "core_debug")), allow(dead_code))]
    pub fn last_real_delta(&self) -> Duration {
        self.last_real_delta
    }

    /// Last scaled delta after applying the multiplier and step cap.
    pub fn last_scaled_delta(&self) -> Duration {
        self.last_scaled_delta
    }

    /// Scaled delta in seconds, the `dt` handed to the movement gate.
    pub fn delta_secs(&self) -> f32 {
        self.last_scaled_delta.as_secs_f32()
    }

    /// Returns the total scaled duration elapsed since the clock was initialised.
    #[cfg_attr(not(any(test, feature = "core_debug")), allow(dead_code))]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of ticks applied so far.
    #[cfg_attr(not(any(test, feature = "core_debug")), allow(dead_code))]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Applies a real delta to the clock, storing both the real and scaled durations.
    pub fn tick(&mut self, real_delta: Duration) {
        self.last_real_delta = real_delta;
        self.last_scaled_delta = real_delta.mul_f32(self.time_scale).min(self.max_step);
        self.elapsed += self.last_scaled_delta;
        self.ticks = self.ticks.saturating_add(1);
    }
}

fn clamp_time_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE)
    } else {
        DEFAULT_TIME_SCALE
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE, DEFAULT_MAX_STEP_SECS)
    }
}

/// Registers simulation timing, tick ordering and start-up logging.
#[derive(Debug, Clone, Copy)]
pub struct CorePlugin {
    time_scale: f32,
    max_step_secs: f32,
}

impl CorePlugin {
    /// Creates a CorePlugin with the provided time-scale multiplier and step cap.
    pub const fn new(time_scale: f32, max_step_secs: f32) -> Self {
        Self {
            time_scale,
            max_step_secs,
        }
    }
}

impl Default for CorePlugin {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE, DEFAULT_MAX_STEP_SECS)
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimulationClock::new(self.time_scale, self.max_step_secs))
            .configure_sets(
                Update,
                (
                    TickSet::Input,
                    TickSet::Movement,
                    TickSet::Proximity,
                    TickSet::Trigger,
                    TickSet::Presentation,
                )
                    .chain(),
            )
            .add_systems(Startup, log_startup_time_scale)
            .add_systems(PreUpdate, update_simulation_clock);

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_scaled_ticks);
        }
    }
}

fn update_simulation_clock(mut clock: ResMut<SimulationClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

fn log_startup_time_scale(clock: Res<SimulationClock>) {
    info!(
        "CorePlugin initialised with time scale {:.3} (max step {:.3}s)",
        clock.time_scale(),
        clock.max_step.as_secs_f32()
    );
}

#[cfg(feature = "core_debug")]
fn log_scaled_ticks(mut timer: ResMut<DebugTickTimer>, clock: Res<SimulationClock>) {
    if timer.timer.tick(clock.last_real_delta()).just_finished() {
        info!(
            target: "core_debug",
            "Tick {} | sim elapsed: {:.2}s | real dt: {:.4}s | scaled dt: {:.4}s",
            clock.ticks(),
            clock.elapsed().as_secs_f32(),
            clock.last_real_delta().as_secs_f32(),
            clock.last_scaled_delta().as_secs_f32(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_scales_delta_with_multiplier() {
        let mut clock = SimulationClock::new(2.0, 1.0);
        clock.tick(Duration::from_millis(20));

        assert_eq!(clock.time_scale(), 2.0);
        assert_eq!(clock.last_real_delta(), Duration::from_millis(20));
        assert!((clock.delta_secs() - 0.04).abs() < 1e-5);
        assert_eq!(clock.elapsed(), clock.last_scaled_delta());
        assert_eq!(clock.ticks(), 1);
    }

    #[test]
    fn clock_caps_long_frames() {
        let mut clock = SimulationClock::new(1.0, 0.05);
        clock.tick(Duration::from_secs(2));

        assert_eq!(clock.last_scaled_delta(), Duration::from_secs_f32(0.05));
        assert!((clock.delta_secs() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn clock_clamps_min_time_scale_and_rejects_bad_step() {
        let mut clock = SimulationClock::new(0.0, -1.0);
        assert!((clock.time_scale() - MIN_TIME_SCALE).abs() < f32::EPSILON);
        assert_eq!(clock.max_step, Duration::from_secs_f32(DEFAULT_MAX_STEP_SECS));

        clock.set_time_scale(-5.0);
        assert!((clock.time_scale() - MIN_TIME_SCALE).abs() < f32::EPSILON);
    }

    #[test]
    fn clock_survives_non_finite_and_huge_settings() {
        let mut clock = SimulationClock::new(f32::INFINITY, 1e20);
        assert_eq!(clock.time_scale(), DEFAULT_TIME_SCALE);
        assert_eq!(clock.max_step, Duration::from_secs_f32(MAX_STEP_CEILING_SECS));

        clock.set_time_scale(f32::NAN);
        assert_eq!(clock.time_scale(), DEFAULT_TIME_SCALE);

        clock.set_time_scale(1e9);
        assert_eq!(clock.time_scale(), MAX_TIME_SCALE);
        clock.tick(Duration::from_secs(10));
        assert_eq!(clock.last_scaled_delta(), clock.max_step);
    }
}

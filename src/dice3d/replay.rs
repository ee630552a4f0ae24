//! Headless replay of motion samples through the full plugin stack.
//!
//! A replay builds a Bevy app from `MinimalPlugins` and `ShakeRollPlugin`,
//! steps virtual time by a fixed `1/fps` per update, and hands each sample to
//! the `MotionInbox` once virtual time reaches its timestamp.

use bevy::app::AppExit;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::dice3d::plugin::{RollSystems, ShakeRollPlugin};
use crate::dice3d::roll::{MotionSample, RollController, RollOutcome, ShakeGate};
use crate::dice3d::shake_control::MotionInbox;
use crate::dice3d::types::{DieRollCompletedEvent, RollSettings};

/// Seconds between synthesized shakes; longer than any default roll.
pub const DEFAULT_SHAKE_SPACING: f64 = 3.0;

/// Where replayed samples come from.
#[derive(Debug, Clone)]
pub enum MotionSource {
    Samples(Vec<MotionSample>),
    /// JSON-lines file, one sample per line.
    File(PathBuf),
    /// JSON-lines on stdin, read on a background thread.
    Stdin,
    /// `shakes` bursts, `spacing` seconds apart, on a resting device.
    Synthesized { shakes: u32, spacing: f64 },
}

#[derive(Debug, Clone)]
pub struct ReplayOptions {
    pub source: MotionSource,
    pub fps: f64,
    pub seed: Option<u64>,
    /// Install Bevy's `LogPlugin`.
    pub log: bool,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            source: MotionSource::Synthesized {
                shakes: 3,
                spacing: DEFAULT_SHAKE_SPACING,
            },
            fps: 60.0,
            seed: None,
            log: true,
        }
    }
}

/// What happened during a replay.
#[derive(Resource, Debug, Clone, Default)]
pub struct ReplayReport {
    pub rolls: Vec<RollOutcome>,
    pub samples_delivered: usize,
    pub shakes_accepted: u64,
    pub frames: u64,
    pub elapsed: f64,
}

/// Samples waiting for virtual time to reach them.
#[derive(Resource)]
struct ReplayFeed {
    incoming: MotionInbox,
    queued: VecDeque<MotionSample>,
    reader_done: Arc<AtomicBool>,
}

impl ReplayFeed {
    fn is_exhausted(&self) -> bool {
        self.reader_done.load(Ordering::Acquire) && self.queued.is_empty() && self.incoming.is_empty()
    }
}

/// Parse JSON-lines motion samples. Blank lines and `#` comments are skipped.
pub fn parse_motion_lines(reader: impl BufRead) -> Result<Vec<MotionSample>, String> {
    let mut samples = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read motion line {}: {e}", index + 1))?;
        if let Some(sample) = parse_motion_line(&line, index + 1)? {
            samples.push(sample);
        }
    }
    Ok(samples)
}

fn parse_motion_line(line: &str, number: usize) -> Result<Option<MotionSample>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| format!("Invalid motion sample on line {number}: {e}"))
}

/// A resting device sampled at 10 Hz with `shakes` short, violent bursts.
pub fn synthesize_shake_bursts(shakes: u32, spacing: f64, gravity_g: f32) -> Vec<MotionSample> {
    const REST_INTERVAL: f64 = 0.1;
    const BURST_INTERVAL: f64 = 0.02;
    const BURST_LEN: u32 = 6;
    const FIRST_SHAKE: f64 = 0.5;

    let end = FIRST_SHAKE + f64::from(shakes) * spacing;
    let mut samples: Vec<MotionSample> = (0..)
        .map(|i| f64::from(i) * REST_INTERVAL)
        .take_while(|t| *t <= end)
        .map(|t| MotionSample::at_rest(gravity_g, t))
        .collect();

    for shake in 0..shakes {
        let start = FIRST_SHAKE + f64::from(shake) * spacing;
        for step in 0..BURST_LEN {
            let sign = if step % 2 == 0 { 1.0 } else { -1.0 };
            samples.push(MotionSample::new(
                2.5 * sign,
                -gravity_g + 1.5 * sign,
                1.0 * sign,
                start + f64::from(step) * BURST_INTERVAL,
            ));
        }
    }
    samples.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    samples
}

fn spawn_stdin_reader(inbox: MotionInbox, done: Arc<AtomicBool>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for (index, line) in stdin.lock().lines().enumerate() {
            match line {
                Ok(line) => match parse_motion_line(&line, index + 1) {
                    Ok(Some(sample)) => inbox.push(sample),
                    Ok(None) => {}
                    Err(e) => warn!("{e}"),
                },
                Err(e) => {
                    warn!("Stopped reading motion from stdin: {e}");
                    break;
                }
            }
        }
        done.store(true, Ordering::Release);
    });
}

fn feed_due_samples(
    time: Res<Time>,
    mut feed: ResMut<ReplayFeed>,
    inbox: Res<MotionInbox>,
    mut report: ResMut<ReplayReport>,
) {
    let incoming = feed.incoming.drain();
    if !incoming.is_empty() {
        feed.queued.extend(incoming);
        feed.queued
            .make_contiguous()
            .sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    }

    let now = time.elapsed_secs_f64();
    while feed.queued.front().is_some_and(|s| s.timestamp <= now) {
        if let Some(sample) = feed.queued.pop_front() {
            inbox.push(sample);
            report.samples_delivered += 1;
        }
    }
}

fn record_completed_rolls(
    mut completed: MessageReader<DieRollCompletedEvent>,
    mut report: ResMut<ReplayReport>,
) {
    for event in completed.read() {
        report.rolls.push(event.outcome);
    }
}

/// Stop once every sample is delivered and the die is at rest.
fn stop_when_finished(
    feed: Res<ReplayFeed>,
    controller: Res<RollController>,
    mut exit: MessageWriter<AppExit>,
) {
    if feed.is_exhausted() && controller.is_idle() {
        exit.write(AppExit::Success);
    }
}

/// Build the headless app for `options`. Call `update()` on it to advance.
pub fn build_replay_app(settings: RollSettings, options: &ReplayOptions) -> Result<App, String> {
    if !(options.fps.is_finite() && options.fps > 0.0) {
        return Err(format!("fps must be positive, got {}", options.fps));
    }
    settings.validate()?;

    let reader_done = Arc::new(AtomicBool::new(true));
    let incoming = MotionInbox::default();
    match &options.source {
        MotionSource::Samples(samples) => incoming.push_all(samples.iter().copied()),
        MotionSource::File(path) => {
            let file = File::open(path)
                .map_err(|e| format!("Failed to open motion file {}: {e}", path.display()))?;
            incoming.push_all(parse_motion_lines(BufReader::new(file))?);
        }
        MotionSource::Stdin => {
            reader_done.store(false, Ordering::Release);
            spawn_stdin_reader(incoming.clone(), Arc::clone(&reader_done));
        }
        MotionSource::Synthesized { shakes, spacing } => {
            incoming.push_all(synthesize_shake_bursts(*shakes, *spacing, settings.gravity_g));
        }
    }

    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    if options.log {
        app.add_plugins(LogPlugin::default());
    }
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / options.fps,
    )))
    .add_plugins(ShakeRollPlugin::new(settings).with_seed(options.seed))
    .insert_resource(ReplayFeed {
        incoming,
        queued: VecDeque::new(),
        reader_done,
    })
    .init_resource::<ReplayReport>()
    .add_systems(Update, feed_due_samples.in_set(RollSystems::Collect))
    .add_systems(
        Update,
        (record_completed_rolls, stop_when_finished).in_set(RollSystems::Present),
    );
    Ok(app)
}

/// Run a replay to completion and report the rolls it produced.
pub fn run_replay(settings: RollSettings, options: ReplayOptions) -> Result<ReplayReport, String> {
    let streaming = matches!(options.source, MotionSource::Stdin);
    let mut app = build_replay_app(settings, &options)?;

    let exit = loop {
        app.update();
        if let Some(exit) = app.should_exit() {
            break exit;
        }
        if streaming {
            // Don't race ahead of a slow producer.
            thread::sleep(Duration::from_millis(1));
        }
    };
    if let AppExit::Error(code) = exit {
        return Err(format!("Replay exited with error code {code}"));
    }

    let world = app.world();
    let mut report = world
        .get_resource::<ReplayReport>()
        .cloned()
        .ok_or_else(|| "Replay report missing".to_string())?;
    report.shakes_accepted = world
        .get_resource::<ShakeGate>()
        .map_or(0, ShakeGate::triggers);
    if let Some(time) = world.get_resource::<Time>() {
        report.elapsed = time.elapsed_secs_f64();
    }
    report.frames = world
        .get_resource::<bevy::diagnostic::FrameCount>()
        .map_or(0, |count| u64::from(count.0));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let text = "# recorded on a phone\n\n{\"x\":0.0,\"y\":-1.0,\"z\":0.0,\"timestamp\":0.1}\n";
        let samples = parse_motion_lines(text.as_bytes()).unwrap();
        assert_eq!(samples, vec![MotionSample::at_rest(1.0, 0.1)]);
    }

    #[test]
    fn test_parse_reports_line_number() {
        let text = "{\"x\":0.0,\"y\":-1.0,\"z\":0.0,\"timestamp\":0.1}\nnot json\n";
        let err = parse_motion_lines(text.as_bytes()).unwrap_err();
        assert!(err.contains("line 2"), "{err}");
    }

    #[test]
    fn test_bursts_trigger_once_each() {
        let settings = RollSettings::default();
        let samples = synthesize_shake_bursts(4, DEFAULT_SHAKE_SPACING, settings.gravity_g);
        let mut gate = ShakeGate::new(crate::dice3d::roll::ShakeDetector::from_settings(&settings));
        let fired = samples.iter().filter(|s| gate.offer(s)).count();
        assert_eq!(fired, 4);
    }

    #[test]
    fn test_rejects_zero_fps() {
        let options = ReplayOptions {
            fps: 0.0,
            log: false,
            ..Default::default()
        };
        assert!(build_replay_app(RollSettings::default(), &options).is_err());
    }
}

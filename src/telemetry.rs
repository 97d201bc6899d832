//! Telemetry: periodic state snapshots and a discrete event log
//!
//! Both logs are JSON lines. The first write of a run truncates the file,
//! later writes append. Sinks are best-effort: an I/O failure is reported
//! once and the sink goes quiet, the game never sees it.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use glam::Vec2;
use serde::Serialize;

use crate::round2;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Group, Slot};

/// One sampled entity; geometry fields are absent for entities without a body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySample {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<[f32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vel: Option<[f32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rad: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rot: Option<f32>,
}

fn pair(v: Vec2) -> [f32; 2] {
    [round2(v.x), round2(v.y)]
}

impl EntitySample {
    pub fn of(slot: &Slot) -> Self {
        let entity = slot.as_entity();
        Self {
            kind: slot.type_name(),
            pos: entity.map(|e| pair(e.position())),
            vel: entity.map(|e| pair(e.velocity())),
            rad: entity.map(|e| e.radius()),
            rot: slot.rotation().map(round2),
        }
    }
}

/// Size of one collection plus its first few members
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSample {
    pub count: usize,
    pub sprites: Vec<EntitySample>,
}

/// Explicit record of what a state log line contains
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSnapshot {
    /// Written by the sink in the line header
    #[serde(skip)]
    pub frame: u64,
    pub screen_size: [f32; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<EntitySample>,
    /// Keyed by collection name
    #[serde(flatten)]
    pub groups: BTreeMap<&'static str, GroupSample>,
}

impl StateSnapshot {
    /// Sample up to `limit` entities per collection, in id order
    pub fn capture(state: &GameState, frame: u64, limit: usize) -> Self {
        let world = &state.world;
        let groups = Group::ALL
            .into_iter()
            .map(|group| {
                let sprites = world
                    .groups()
                    .iter(group)
                    .filter_map(|id| world.get(id))
                    .take(limit)
                    .map(EntitySample::of)
                    .collect();
                let sample = GroupSample {
                    count: world.groups().len(group),
                    sprites,
                };
                (group.name(), sample)
            })
            .collect();

        Self {
            frame,
            screen_size: [state.settings.screen_width, state.settings.screen_height],
            player: world.get(state.player).map(EntitySample::of),
            groups,
        }
    }
}

/// Decides which frames get a state snapshot.
///
/// Counts frames; a snapshot is due on every `fps`-th frame. Once the count
/// passes `fps * max_seconds` it stops counting and nothing more is due.
#[derive(Debug, Clone)]
pub struct StateGate {
    frame: u64,
    fps: u64,
    limit: u64,
}

impl StateGate {
    pub fn new(fps: u32, max_seconds: u32) -> Self {
        let fps = u64::from(fps.max(1));
        Self {
            frame: 0,
            fps,
            limit: fps * u64::from(max_seconds),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.fps, settings.log_max_seconds)
    }

    /// Frames counted so far (stamped on every log line)
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Count one frame; true if a snapshot is due
    pub fn advance(&mut self) -> bool {
        if self.frame > self.limit {
            return false;
        }
        self.frame += 1;
        self.frame % self.fps == 0
    }
}

/// Where telemetry goes. Neither call can fail from the caller's view.
pub trait TelemetrySink {
    fn log_state(&mut self, snapshot: &StateSnapshot);

    fn log_event(&mut self, frame: u64, event: &GameEvent);
}

/// Drops everything
#[derive(Debug, Default)]
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn log_state(&mut self, _snapshot: &StateSnapshot) {}

    fn log_event(&mut self, _frame: u64, _event: &GameEvent) {}
}

/// Keeps everything in memory
#[derive(Debug, Default)]
pub struct MemoryTelemetry {
    pub states: Vec<StateSnapshot>,
    pub events: Vec<(u64, GameEvent)>,
}

impl TelemetrySink for MemoryTelemetry {
    fn log_state(&mut self, snapshot: &StateSnapshot) {
        self.states.push(snapshot.clone());
    }

    fn log_event(&mut self, frame: u64, event: &GameEvent) {
        self.events.push((frame, event.clone()));
    }
}

/// Wall clock as UTC `HH:MM:SS.mmm`
pub fn utc_timestamp(now: SystemTime) -> String {
    let ms = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
        % 86_400_000;
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        ms / 3_600_000,
        ms / 60_000 % 60,
        ms / 1000 % 60,
        ms % 1000
    )
}

/// Common fields in front of every log line
#[derive(Serialize)]
struct Line<'a, T: Serialize> {
    timestamp: String,
    elapsed_s: u64,
    frame: u64,
    #[serde(flatten)]
    body: &'a T,
}

/// One JSON-lines file: truncated by the first write, appended afterwards
#[derive(Debug)]
struct JsonlFile {
    path: PathBuf,
    started: bool,
    failed: bool,
}

impl JsonlFile {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            started: false,
            failed: false,
        }
    }

    fn append<T: Serialize>(&mut self, record: &T) {
        if self.failed {
            return;
        }
        if let Err(err) = self.write(record) {
            log::warn!(
                "Telemetry disabled for {}: {err}",
                self.path.display()
            );
            self.failed = true;
        }
    }

    fn write<T: Serialize>(&mut self, record: &T) -> io::Result<()> {
        let line = serde_json::to_string(record)?;
        let mut file = if self.started {
            OpenOptions::new().append(true).create(true).open(&self.path)?
        } else {
            File::create(&self.path)?
        };
        writeln!(file, "{line}")?;
        self.started = true;
        Ok(())
    }
}

/// Writes state and event logs to two JSON-lines files
#[derive(Debug)]
pub struct JsonlTelemetry {
    state: JsonlFile,
    events: JsonlFile,
    started: Instant,
}

impl JsonlTelemetry {
    pub fn new(state_path: &Path, event_path: &Path) -> Self {
        Self {
            state: JsonlFile::new(state_path),
            events: JsonlFile::new(event_path),
            started: Instant::now(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.state_log_path, &settings.event_log_path)
    }

    fn line<'a, T: Serialize>(&self, frame: u64, body: &'a T) -> Line<'a, T> {
        Line {
            timestamp: utc_timestamp(SystemTime::now()),
            elapsed_s: self.started.elapsed().as_secs(),
            frame,
            body,
        }
    }
}

impl TelemetrySink for JsonlTelemetry {
    fn log_state(&mut self, snapshot: &StateSnapshot) {
        let line = self.line(snapshot.frame, snapshot);
        self.state.append(&line);
    }

    fn log_event(&mut self, frame: u64, event: &GameEvent) {
        let line = self.line(frame, event);
        self.events.append(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Asteroid;
    use std::time::Duration;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rocks-{}-{name}", std::process::id()))
    }

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_gate_fires_once_per_second() {
        let mut gate = StateGate::new(60, 16);
        let due: Vec<u64> = (0..200)
            .filter_map(|_| gate.advance().then(|| gate.frame()))
            .collect();
        assert_eq!(due, vec![60, 120, 180]);
    }

    #[test]
    fn test_gate_stops_after_max_seconds() {
        let mut gate = StateGate::new(2, 3);
        let due: Vec<bool> = (0..12).map(|_| gate.advance()).collect();
        // Frames 1..=7 are counted, then the counter freezes
        assert_eq!(
            due,
            vec![false, true, false, true, false, true, false, false, false, false, false, false]
        );
        assert_eq!(gate.frame(), 7);
    }

    #[test]
    fn test_timestamp_format() {
        let t = UNIX_EPOCH + Duration::from_millis(86_400_000 * 3 + 13 * 3_600_000 + 5 * 60_000 + 9_042);
        assert_eq!(utc_timestamp(t), "13:05:09.042");
        assert_eq!(utc_timestamp(UNIX_EPOCH), "00:00:00.000");
    }

    #[test]
    fn test_snapshot_contents() {
        let mut state = GameState::new(Settings::default(), 5).unwrap();
        for i in 0..12 {
            state.world.spawn_asteroid(
                Asteroid::new(Vec2::new(i as f32 * 10.0, 1.0 / 3.0), Vec2::new(2.0 / 3.0, 0.0), 20.0)
                    .unwrap(),
            );
        }
        if let Some(crate::sim::Slot::Player(p)) = state.world.get_mut(state.player) {
            p.rotation = 12.3456;
        }

        let snapshot = StateSnapshot::capture(&state, 60, 10);
        let asteroids = &snapshot.groups["asteroids"];
        assert_eq!(asteroids.count, 12);
        assert_eq!(asteroids.sprites.len(), 10);
        assert_eq!(asteroids.sprites[0].pos, Some([0.0, 0.33]));
        assert_eq!(asteroids.sprites[0].vel, Some([0.67, 0.0]));
        assert_eq!(asteroids.sprites[0].rot, None);

        let updatable = &snapshot.groups["updatable"];
        assert_eq!(updatable.count, 14);
        assert_eq!(updatable.sprites[0].kind, "Player");
        assert_eq!(updatable.sprites[1].kind, "AsteroidField");
        assert_eq!(updatable.sprites[1].pos, None);

        let player = snapshot.player.as_ref().unwrap();
        assert_eq!(player.rot, Some(12.35));
        assert_eq!(player.pos, Some([640.0, 360.0]));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["shots"]["count"], 0);
        assert_eq!(json["screen_size"], serde_json::json!([1280.0, 720.0]));
        assert_eq!(json["updatable"]["sprites"][1], serde_json::json!({"type": "AsteroidField"}));
    }

    #[test]
    fn test_jsonl_truncates_then_appends() {
        let state_path = temp_path("state.jsonl");
        let event_path = temp_path("events.jsonl");
        std::fs::write(&event_path, "stale\n").unwrap();

        let mut sink = JsonlTelemetry::new(&state_path, &event_path);
        sink.log_event(3, &GameEvent::PlayerHit);
        sink.log_event(
            4,
            &GameEvent::AsteroidSplit {
                radius: 40.0,
                children: 2,
            },
        );

        let lines = read_lines(&event_path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "player_hit");
        assert_eq!(lines[0]["frame"], 3);
        assert_eq!(lines[0]["elapsed_s"], 0);
        assert_eq!(lines[1]["type"], "asteroid_split");
        assert_eq!(lines[1]["children"], 2);
        assert_eq!(lines[1]["timestamp"].as_str().unwrap().len(), 12);

        let state = GameState::new(Settings::default(), 1).unwrap();
        sink.log_state(&StateSnapshot::capture(&state, 60, 10));
        let lines = read_lines(&state_path);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["frame"], 60);
        assert_eq!(lines[0]["player"]["type"], "Player");

        // A new sink starts both files over
        let mut sink = JsonlTelemetry::new(&state_path, &event_path);
        sink.log_event(1, &GameEvent::AsteroidShot { radius: 20.0 });
        assert_eq!(read_lines(&event_path).len(), 1);

        let _ = std::fs::remove_file(&state_path);
        let _ = std::fs::remove_file(&event_path);
    }

    #[test]
    fn test_unwritable_sink_goes_quiet() {
        let dir = temp_path("missing-dir");
        let mut sink = JsonlTelemetry::new(&dir.join("state.jsonl"), &dir.join("events.jsonl"));
        sink.log_event(1, &GameEvent::PlayerHit);
        sink.log_event(2, &GameEvent::PlayerHit);
        assert!(sink.events.failed);
        assert!(!dir.exists());
    }

    #[test]
    fn test_memory_sink_records() {
        let mut sink = MemoryTelemetry::default();
        sink.log_event(9, &GameEvent::PlayerHit);
        assert_eq!(sink.events, vec![(9, GameEvent::PlayerHit)]);
    }
}

//! Fixed-Step Host Loop
//!
//! This example drives one character the way an engine host would:
//! - Render frames tick on a tokio interval at 30 Hz
//! - A fixed timestep turns frame time into 50 Hz simulation steps
//! - A jump press is delivered between steps
//! - The character walks off a platform, falls, and lands on the floor below
//!
//! Runnable examples live in `demos/` and are registered as `[[example]]`
//! targets in Cargo.toml.
//!
//! Run with: RUST_LOG=kinesis=debug cargo run --example fixed_step

use std::time::{Duration, Instant};

use glam::{Vec2, Vec3};
use kinesis::animation::RecordingAnimator;
use kinesis::builder::CharacterBuilder;
use kinesis::clock::FixedTimestep;
use kinesis::config::MotionConfig;
use kinesis::input::MoveInput;
use kinesis::motion::{Aabb, StaticWorld};
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

const FRAME_RATE_HZ: u64 = 30;
const SIMULATION_HZ: u32 = 50;
const FRAMES: u32 = 150;

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,kinesis=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Platform at y = 2 over a large floor at y = 0.
    let world = StaticWorld::new().with_floor(0.0, 100.0).with_box(Aabb::new(
        Vec3::new(-2.0, 0.0, -2.0),
        Vec3::new(2.0, 2.0, 2.0),
    ));

    let config = MotionConfig::from_json(r#"{ "move_speed": 2.5, "jump_force": 4.0 }"#)?;
    let mut machine = CharacterBuilder::new()
        .config(config)
        .spawn_at(Vec3::new(0.0, 2.0, 0.0))
        .animator(RecordingAnimator::new())
        .build()?;
    machine.start();

    let mut clock = FixedTimestep::from_hz(SIMULATION_HZ);
    let mut frames = interval(Duration::from_millis(1000 / FRAME_RATE_HZ));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut last = Instant::now();
    for frame in 0..FRAMES {
        frames.tick().await;
        let now = Instant::now();
        let steps = clock.advance(now - last);
        last = now;

        if frame == 10 {
            let jumped = machine.jump_intent();
            info!(frame, jumped, "jump pressed");
        }

        let input = if frame >= 40 {
            MoveInput::new(Vec2::new(0.0, 1.0))
        } else {
            MoveInput::idle()
        };

        for _ in 0..steps {
            machine.tick(clock.step(), &input, &world);
        }

        if frame % 15 == 0 {
            let pose = machine.pose();
            info!(
                frame,
                state = ?machine.state(),
                x = pose.position.x,
                y = pose.position.y,
                z = pose.position.z,
                "character"
            );
        }
    }

    let path: Vec<String> = machine
        .history()
        .get_path()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    info!(path = %path.join(" -> "), ticks = machine.ticks(), "done");

    let checkpoint = machine.checkpoint().to_json()?;
    info!(bytes = checkpoint.len(), "checkpoint captured");

    Ok(())
}

//! Headless soak harness for the raycasting core. Builds the demo world,
//! casts and sorts a configurable number of frames while the viewer
//! sweeps through it, and reports hit counts and timings. The pixel
//! compositor and windowing belong to the surrounding game and are not
//! part of this run.

mod cli;
mod config;
mod demo;

use cli::CLIOptions;
use config::UserConfig;
use gameplay::glam::Vec2;
use gameplay::log::{self, info};
use render_ray::{Raycaster, sort_hits};
use simplelog::TermLogger;
use std::error::Error;
use std::time::Instant;

const BASE_DIR: &str = "stackcast/";

fn main() -> Result<(), Box<dyn Error>> {
    let mut options: CLIOptions = argh::from_env();

    TermLogger::init(
        options.verbose.unwrap_or(log::LevelFilter::Info),
        simplelog::ConfigBuilder::default()
            .set_time_level(log::LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut user_config = UserConfig::load();
    user_config.sync_cli(&mut options);
    user_config.write();

    let mut level = demo::build_level();
    let mut sprites = demo::build_sprites();
    let mut caster = Raycaster::new(
        user_config.width as usize,
        (user_config.fov as f32).to_radians(),
        user_config.strip_width,
    );

    info!("Resolution   = {} x {}", user_config.width, user_config.height);
    info!(
        "Map size     = {} x {} x {}",
        level.stack.width(),
        level.stack.height(),
        level.stack.level_count()
    );
    info!("Wall size    = {} game units", level.stack.tile_size());
    info!("FOV          = {} degrees", user_config.fov);
    info!("Strip width  = {}", user_config.strip_width);
    info!("Ray count    = {}", caster.strip_count());
    info!("Distance to projection plane = {}", caster.view_dist());

    let mut pose = demo::player_start();
    let tile_size = level.stack.tile_size();

    let start = Instant::now();
    let mut total_hits = 0usize;
    let mut peak_hits = 0usize;
    for frame in 0..options.frames {
        // Sweep the view and drift forward with the same occupancy query
        // movement code uses
        pose.rot += 0.02;
        let forward = Vec2::new(pose.rot.cos(), -pose.rot.sin()) * 4.0;
        if !level.player_in_wall(pose.pos + forward, pose.z) {
            pose.pos += forward;
        }

        // Door events happen between frames, never during a cast
        if frame == options.frames / 2 {
            let (door_x, door_y) = demo::DEMO_DOOR;
            level.toggle_door(door_x, door_y);
            info!("toggled demo door at ({door_x},{door_y})");
        }

        let mut hits = caster.cast_world(&level, &mut sprites, &pose);
        sort_hits(&mut hits, tile_size, tile_size / 2.0 + pose.z);
        total_hits += hits.len();
        peak_hits = peak_hits.max(hits.len());
    }

    let elapsed = start.elapsed();
    info!(
        "Cast {} frames in {:.2?}, {:.3} ms per frame",
        options.frames,
        elapsed,
        elapsed.as_secs_f64() * 1000.0 / options.frames.max(1) as f64
    );
    info!("{total_hits} hits total, {peak_hits} peak in one frame");
    Ok(())
}

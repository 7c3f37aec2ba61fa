//! # Atelier Headless Runner
//!
//! Runs the exercises without a window: prints generated mazes and steps
//! simulations at a fixed timestep, reporting what they would draw.
//!
//! ## Usage:
//! ```bash
//! cargo run -- maze 15 21 7
//! cargo run -- run crab 5
//! RUST_LOG=debug cargo run -- run billiards 10
//! ```

use anyhow::{bail, Context, Result};
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use atelier::exercises::{
    BilliardGame, BilliardSettings, Canvas, Crab, LightingScene, LightingSettings, MazeWorld,
    WalkthroughSettings,
};
use atelier::maze::Maze;
use atelier::simulation::{Simulation, SimulationManager};
use winit::{event::ElementState, keyboard::KeyCode};

const STEP: f32 = 1.0 / 60.0;

fn usage() -> &'static str {
    "usage:\n  atelier maze [rows] [cols] [seed]\n  atelier run <crab|walkthrough|lighting|billiards|paint> [seconds]"
}

fn parse_arg<T: std::str::FromStr>(arg: Option<&String>, name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match arg {
        Some(value) => value
            .parse()
            .with_context(|| format!("invalid {name} {value:?}")),
        None => Ok(default),
    }
}

fn print_maze(args: &[String]) -> Result<()> {
    let rows = parse_arg(args.first(), "rows", 15usize)?;
    let cols = parse_arg(args.get(1), "cols", rows)?;
    let maze = match args.get(2) {
        Some(_) => {
            let seed = parse_arg(args.get(2), "seed", 0u64)?;
            Maze::generate_with_rng(rows, cols, &mut StdRng::seed_from_u64(seed))
        }
        None => Maze::generate(rows, cols),
    };

    print!("{maze}");
    let path = maze
        .solution()
        .context("generated maze has no path from entrance to exit")?;
    println!(
        "{}x{} maze, {} open cells, solution of {} cells",
        maze.rows(),
        maze.cols(),
        maze.open_cell_count(),
        path.len()
    );
    Ok(())
}

fn exercise(name: &str) -> Result<Box<dyn Simulation>> {
    let simulation: Box<dyn Simulation> = match name {
        "crab" | "puppet" => Box::new(Crab::new()),
        "walkthrough" | "maze" => Box::new(MazeWorld::new(WalkthroughSettings::new())),
        "lighting" => Box::new(LightingScene::new(LightingSettings::new())),
        "billiards" => Box::new(BilliardGame::new(BilliardSettings::new())),
        "paint" => Box::new(Canvas::new(800, 600)),
        other => bail!("unknown exercise {other:?}\n{}", usage()),
    };
    Ok(simulation)
}

fn run(args: &[String]) -> Result<()> {
    let name = args.first().context(usage())?;
    let seconds = parse_arg(args.get(1), "seconds", 3.0f32)?;

    let mut manager = SimulationManager::new();
    manager.set_fixed_timestep(Some(STEP));
    manager.attach_simulation(exercise(name)?);
    // Get the games that wait for input moving
    manager.process_key(KeyCode::Space, ElementState::Pressed);
    manager.process_key(KeyCode::Space, ElementState::Released);

    let frames = (seconds / STEP).round() as usize;
    let steps: usize = (0..frames).map(|_| manager.update(STEP)).sum();
    let objects = manager.draw_list();
    info!("{steps} steps over {seconds}s");

    println!(
        "{}: {} objects after {:.1}s",
        manager.current_simulation_name().unwrap_or(name),
        objects.len(),
        seconds
    );
    for object in objects.iter().take(8) {
        let t = object.position();
        println!("  {:<24} at ({:6.2}, {:6.2}, {:6.2})", object.name, t.x, t.y, t.z);
    }
    if objects.len() > 8 {
        println!("  ... {} more", objects.len() - 8);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("maze") => print_maze(&args[1..]),
        Some("run") => run(&args[1..]),
        _ => {
            println!("{}", usage());
            Ok(())
        }
    }
}

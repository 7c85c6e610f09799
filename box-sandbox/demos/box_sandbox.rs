// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Headless box sandbox
//!
//! Builds a world from a TOML description, lets a script drop spheres into
//! the first container, and steps the simulation at a fixed rate. Every
//! frame is rendered into a [`DrawList`] the way a real renderer would
//! consume it, and a summary is printed once a second of simulated time.
//!
//! # Running
//!
//! ```bash
//! # Built-in scene
//! RUST_LOG=info cargo run --example box_sandbox --release
//!
//! # Scene from a file, 30 seconds, 300 scripted spheres
//! cargo run --example box_sandbox --release -- --config scene.toml --duration 30 --spheres 300
//! ```

use box_sandbox::config::SandboxConfig;
use box_sandbox::render::DrawList;
use box_sandbox::scripting::{SandboxCommands, ScriptHook, ScriptRegistry};
use box_sandbox::World;
use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

const DEFAULT_SCENE: &str = r#"
timestep = 0.016666666666666666

[[containers]]
position = [0.0, 0.0, 0.0]
size = [20.0, 20.0, 20.0]

[containers.particles]
count = 300

[[containers]]
position = [40.0, 0.0, 0.0]
size = [10.0, 10.0, 10.0]

[[spheres]]
position = [-5.0, 0.0, 0.0]
velocity = [3.0, 0.0, 0.0]
radius = 1.5
mass = 4.0
color = [1.0, 0.3, 0.2]

[[spheres]]
position = [5.0, 0.0, 0.0]
velocity = [-3.0, 0.0, 0.0]
radius = 1.5
mass = 4.0
color = [0.2, 0.3, 1.0]
"#;

struct DemoOptions {
    config: Option<String>,
    duration: f64,
    spheres: usize,
    seed: u64,
}

impl Default for DemoOptions {
    fn default() -> Self {
        DemoOptions {
            config: None,
            duration: 10.0,
            spheres: 100,
            seed: 12345,
        }
    }
}

/// Drops randomly colored spheres from the top of the first container
struct Rain {
    rng: ChaCha8Rng,
    remaining: usize,
    half_extent: f64,
}

impl ScriptHook for Rain {
    fn name(&self) -> &str {
        "rain"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn on_frame(
        &mut self,
        commands: &mut dyn SandboxCommands,
        frame: u64,
        _dt: f64,
    ) -> Result<(), String> {
        if self.remaining == 0 || frame % 3 != 0 {
            return Ok(());
        }
        self.remaining -= 1;

        let span = self.half_extent - 1.0;
        let position = DVec3::new(
            self.rng.gen_range(-span..span),
            span,
            self.rng.gen_range(-span..span),
        );
        let velocity = DVec3::new(
            self.rng.gen_range(-2.0..2.0),
            self.rng.gen_range(-6.0..-1.0),
            self.rng.gen_range(-2.0..2.0),
        );
        let color = DVec3::new(self.rng.gen(), self.rng.gen(), self.rng.gen());
        let radius = self.rng.gen_range(0.2..0.6);

        let ball = commands
            .spawn(position, velocity, radius, color)
            .map_err(|e| e.to_string())?;
        commands.set_mass(ball, radius * radius * radius * 10.0);
        Ok(())
    }
}

fn parse_args() -> DemoOptions {
    let args: Vec<String> = std::env::args().collect();
    let mut options = DemoOptions::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--config", Some(path)) => options.config = Some(path.clone()),
            ("--duration", Some(v)) => match v.parse::<f64>() {
                Ok(d) => options.duration = d,
                Err(_) => {
                    eprintln!("Warning: invalid duration '{}', using {}", v, options.duration)
                }
            },
            ("--spheres", Some(v)) => match v.parse::<usize>() {
                Ok(n) => options.spheres = n,
                Err(_) => {
                    eprintln!("Warning: invalid sphere count '{}', using {}", v, options.spheres)
                }
            },
            ("--seed", Some(v)) => match v.parse::<u64>() {
                Ok(s) => options.seed = s,
                Err(_) => eprintln!("Warning: invalid seed '{}', using {}", v, options.seed),
            },
            (flag @ ("--config" | "--duration" | "--spheres" | "--seed"), None) => {
                eprintln!("Error: {} requires an argument", flag);
                std::process::exit(1);
            }
            (other, _) => {
                eprintln!("Warning: ignoring unknown argument '{}'", other);
                i += 1;
                continue;
            }
        }
        i += 2;
    }

    options
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let options = parse_args();

    let config = match &options.config {
        Some(path) => SandboxConfig::load(path)?,
        None => SandboxConfig::from_toml_str(DEFAULT_SCENE)?,
    };

    println!("==========================================================");
    println!("                  Box Sandbox (headless)");
    println!("==========================================================");
    println!("  Containers:  {}", config.containers.len());
    println!("  Timestep:    {:.4} s", config.timestep);
    println!("  Duration:    {:.1} s", options.duration);
    println!("  Script rain: {} spheres (seed {})", options.spheres, options.seed);
    println!();

    let mut world = World::from_config(&config)?;
    let half_extent = world
        .container(0)
        .map(|c| c.size().min_element() * 0.5)
        .unwrap_or(10.0);

    let mut scripts = ScriptRegistry::new();
    scripts.register(Box::new(Rain {
        rng: ChaCha8Rng::seed_from_u64(options.seed),
        remaining: options.spheres,
        half_extent,
    }))?;

    let dt = config.timestep;
    let frames = (options.duration / dt).round() as u64;
    let report_every = (1.0 / dt).round().max(1.0) as u64;
    let initial_energy = world.kinetic_energy();
    let mut draw_list = DrawList::new();
    let mut contacts = 0;
    let mut wall_hits = 0;
    let started = Instant::now();

    for frame in 0..frames {
        scripts.run_frame(&mut world, dt);
        let stats = world.update(dt);
        contacts += stats.contacts;
        wall_hits += stats.wall_hits;

        draw_list.clear();
        world.render(&mut draw_list);

        if (frame + 1) % report_every == 0 {
            println!(
                "t = {:6.2} s  spheres = {:4}  particles = {:4}  contacts = {:6}  \
                 wall hits = {:6}  KE = {:.3}",
                (frame + 1) as f64 * dt,
                draw_list.spheres.len(),
                draw_list.particles.len(),
                contacts,
                wall_hits,
                world.kinetic_energy(),
            );
        }
    }

    let elapsed = started.elapsed();
    println!();
    println!(
        "Finished {} frames in {:.2?} ({:.0} frames/s)",
        frames,
        elapsed,
        frames as f64 / elapsed.as_secs_f64()
    );
    println!("Initial kinetic energy: {:.3}", initial_energy);
    println!("Final kinetic energy:   {:.3}", world.kinetic_energy());
    if scripts.failures() > 0 {
        println!("Script failures: {}", scripts.failures());
    }
    Ok(())
}

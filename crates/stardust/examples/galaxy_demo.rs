//! Galaxy formation example
//!
//! Generates each preset system around a central black hole and runs it for
//! a few simulated seconds, printing population and conservation figures as
//! stars merge, shatter and escape.
//!
//! Run with: cargo run --package stardust --example galaxy_demo

use nalgebra::Point2;
use seeded_rng::SeededRng;
use stardust::body::VisualHandle;
use stardust::config::{SimConfig, TrailConfig};
use stardust::generator::GeneratorPreset;
use stardust::state::SystemState;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> stardust::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    println!("Stardust Galaxy Demo\n");
    println!("{}", "=".repeat(60));

    let dt = 1.0 / 60.0;
    let total_seconds = 10.0;
    let total_steps = (total_seconds / dt) as usize;
    let report_every = 120;

    for preset in GeneratorPreset::ALL {
        let settings = preset.settings();
        let mut system =
            SystemState::new(SimConfig::default(), TrailConfig::default(), SeededRng::new(42))?;
        system.populate(&settings, Point2::origin(), VisualHandle(0))?;

        println!("\n{}", settings.name);
        println!(
            "  {} stars, black hole mass {}, mass band {}..{}",
            settings.bodies_count, settings.black_hole_mass, settings.mass_min, settings.mass_max
        );

        let initial_mass = system.total_mass();
        let initial_l = system.total_angular_momentum();

        let mut merges = 0;
        let mut fragmentations = 0;
        for step in 0..total_steps {
            let report = system.step(dt)?;
            merges += report.merges;
            fragmentations += report.fragmentations;

            if step % report_every == 0 {
                let telemetry = system.telemetry();
                println!(
                    "  t={:5.2}s bodies={:4} mass={:10.3} merges={:3} fragmentations={:3}",
                    telemetry.time, telemetry.body_count, telemetry.universe_mass, merges, fragmentations
                );
            }
        }

        println!(
            "  mass change: {:+.3e}, angular momentum change: {:+.3e}",
            system.total_mass() - initial_mass,
            system.total_angular_momentum() - initial_l
        );
    }

    println!("\n{}", "=".repeat(60));
    println!("Demo complete!");
    Ok(())
}

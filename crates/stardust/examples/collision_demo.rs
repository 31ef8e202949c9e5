//! Head-on collision example
//!
//! Fires two stars at each other twice: once with a weak binding constant so
//! the impact shatters them, once with a strong one so they merge. Trace
//! logging prints each merge and fragmentation as it happens.
//!
//! Run with: cargo run --package stardust --example collision_demo

use nalgebra::Point2;
use seeded_rng::SeededRng;
use stardust::body::VisualHandle;
use stardust::config::{SimConfig, TrailConfig};
use stardust::generator::two_body_scenario;
use stardust::state::SystemState;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn run(label: &str, config: SimConfig) -> stardust::Result<()> {
    let mut system = SystemState::new(config, TrailConfig::default(), SeededRng::new(7))?;
    system.queue_bodies(two_body_scenario(Point2::origin(), VisualHandle(0)));
    system.admit_pending()?;

    println!("\n{label}");
    println!(
        "  before: bodies={} mass={:.3} momentum=({:.3}, {:.3})",
        system.body_count(),
        system.total_mass(),
        system.total_momentum().x,
        system.total_momentum().y
    );

    let report = system.step(0.01)?;
    println!(
        "  tick:   merges={} fragmentations={} spawned={} removed={:?}",
        report.merges, report.fragmentations, report.fragments_spawned, report.removed
    );

    let momentum = system.total_momentum();
    println!(
        "  after:  bodies={} mass={:.3} momentum=({:.3}, {:.3})",
        system.body_count(),
        system.total_mass(),
        momentum.x,
        momentum.y
    );

    for body in &system.bodies {
        println!(
            "    body {:3}: mass={:8.3} r={:6.3} pos=({:7.2}, {:7.2}) vel=({:7.2}, {:7.2})",
            body.id.0,
            body.mass,
            body.radius,
            body.position.x,
            body.position.y,
            body.velocity.x,
            body.velocity.y
        );
    }

    Ok(())
}

fn main() -> stardust::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    println!("Stardust Collision Demo");
    println!("{}", "=".repeat(60));

    run("Violent impact (binding constant 10)", SimConfig::default())?;
    run(
        "Gentle impact (binding constant 100)",
        SimConfig {
            binding_constant: 100.0,
            ..SimConfig::default()
        },
    )?;

    println!("\n{}", "=".repeat(60));
    println!("Demo complete!");
    Ok(())
}

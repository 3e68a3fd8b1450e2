// src/main.rs
//
// Exploratory CLI for zero-temperature Metropolis relaxation runs.
//
// Outputs are written to `runs/<run_id>/` (or the directory given via
// `out=`) and are not committed to version control.
//
// Examples:
//
//   cargo run --release -- nx=32 ny=32 steps=200000 d=1.0 b=0,0,0.2
//       -> relax a random 32x32 field with DMI and a perpendicular field,
//          the setup where chiral (skyrmion-like) textures appear.
//
//   cargo run --release -- nx=16 ny=16 steps=50000 j=1.0 d=0 k=0.1 seed=7
//       -> plain ferromagnetic relaxation toward the easy axis, seeded.
//
//   cargo run --release -- honeycomb na=12 nb=12 seed=3
//       -> randomise a honeycomb field and render both sublattices.
//
// Typical outputs (per run directory):
//   runs/<run_id>/
//     ├── config.json
//     ├── sz_initial.png
//     ├── sz_final.png
//     └── energy_vs_iteration.png

use std::env;
use std::fs::create_dir_all;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use tracing::info;

use mcspin::config::{HamiltonianConfig, LatticeConfig, RelaxationConfig, RunConfig, RunInfo};
use mcspin::visualisation::{save_energy_history_plot, save_honeycomb_plot, save_sz_plot};
use mcspin::{DriveSettings, Driver, HoneycombSpins, SpinField, System, SystemParams};

fn print_usage() {
    eprintln!(
        r#"Usage:
  cargo run -- [honeycomb]
             [nx=N] [ny=N] [na=N] [nb=N] [steps=N] [alpha=VAL] [seed=N]
             [b=BX,BY,BZ] [k=VAL] [u=UX,UY,UZ] [j=VAL] [d=VAL]
             [out=DIR] [run=RUN_ID]

Notes:
  - Spins start from a seeded isotropic random state.
  - u is used as supplied; pass a unit vector.
  - 'honeycomb' skips the relaxation and only renders a random
    two-sublattice field (na x nb cells).
"#
    );
}

fn sanitize_run_id(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn default_run_id(tag: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0));
    format!("{}{:03}_{}", now.as_secs(), now.subsec_millis(), tag)
}

fn unique_run_dir(out_root: &str, run_id: &str) -> PathBuf {
    let base = PathBuf::from(out_root);
    let mut dir = base.join(run_id);
    if !dir.exists() {
        return dir;
    }
    for k in 1..1000 {
        let cand = base.join(format!("{}_{}", run_id, k));
        if !cand.exists() {
            dir = cand;
            break;
        }
    }
    dir
}

fn parse_vec3(v: &str) -> Option<[f64; 3]> {
    let parts: Vec<f64> = v.split(',').filter_map(|p| p.trim().parse().ok()).collect();
    if parts.len() == 3 {
        Some([parts[0], parts[1], parts[2]])
    } else {
        None
    }
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let argv: Vec<String> = env::args().collect();

    let mut honeycomb_mode = false;

    let mut nx = 32usize;
    let mut ny = 32usize;
    let mut na = 12usize;
    let mut nb = 12usize;
    let mut steps: i64 = 200_000;
    let mut alpha = 0.1f64;
    let mut seed: u64 = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let mut b_ext = [0.0, 0.0, 0.2];
    let mut k_u = 0.05;
    let mut easy_axis = [0.0, 0.0, 1.0];
    let mut j_ex = 1.0;
    let mut dmi = 1.0;

    let mut out_root = "runs".to_string();
    let mut run_id_override: Option<String> = None;

    for arg in argv.iter().skip(1) {
        if arg == "-h" || arg == "--help" || arg == "help" {
            print_usage();
            return Ok(());
        }
        if arg == "honeycomb" {
            honeycomb_mode = true;
            continue;
        }

        let parsed = if let Some(v) = arg.strip_prefix("nx=") {
            v.parse().map(|x| nx = x).is_ok()
        } else if let Some(v) = arg.strip_prefix("ny=") {
            v.parse().map(|x| ny = x).is_ok()
        } else if let Some(v) = arg.strip_prefix("na=") {
            v.parse().map(|x| na = x).is_ok()
        } else if let Some(v) = arg.strip_prefix("nb=") {
            v.parse().map(|x| nb = x).is_ok()
        } else if let Some(v) = arg.strip_prefix("steps=") {
            v.parse().map(|x| steps = x).is_ok()
        } else if let Some(v) = arg.strip_prefix("alpha=") {
            v.parse().map(|x| alpha = x).is_ok()
        } else if let Some(v) = arg.strip_prefix("seed=") {
            v.parse().map(|x| seed = x).is_ok()
        } else if let Some(v) = arg.strip_prefix("b=") {
            parse_vec3(v).map(|x| b_ext = x).is_some()
        } else if let Some(v) = arg.strip_prefix("k=") {
            v.parse().map(|x| k_u = x).is_ok()
        } else if let Some(v) = arg.strip_prefix("u=") {
            parse_vec3(v).map(|x| easy_axis = x).is_some()
        } else if let Some(v) = arg.strip_prefix("j=") {
            v.parse().map(|x| j_ex = x).is_ok()
        } else if let Some(v) = arg.strip_prefix("d=") {
            v.parse().map(|x| dmi = x).is_ok()
        } else if let Some(v) = arg.strip_prefix("out=") {
            out_root = v.to_string();
            true
        } else if let Some(v) = arg.strip_prefix("run=") {
            run_id_override = Some(sanitize_run_id(v));
            true
        } else {
            false
        };

        if !parsed {
            eprintln!("Unrecognised argument '{arg}'");
            print_usage();
            std::process::exit(2);
        }
    }

    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);

    if honeycomb_mode {
        let run_id = run_id_override.unwrap_or_else(|| default_run_id("honeycomb"));
        let run_dir = unique_run_dir(&out_root, &run_id);
        create_dir_all(&run_dir)?;

        let mut field = match HoneycombSpins::new(na, nb) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        };
        field.randomise(&mut rng);

        let mean = field.mean();
        let mag = field.magnetization();
        info!(na, nb, seed, "randomised honeycomb field");
        println!("mean spin      = [{:+.4}, {:+.4}, {:+.4}]", mean[0], mean[1], mean[2]);
        println!("magnetization  = [{:+.4}, {:+.4}, {:+.4}]", mag[0], mag[1], mag[2]);

        let png = run_dir.join("honeycomb.png");
        if let Err(e) = save_honeycomb_plot(&field, png.to_str().unwrap()) {
            eprintln!("Plot failed: {e}");
        }
        println!("Outputs in {}", run_dir.display());
        return Ok(());
    }

    let run_id = run_id_override.unwrap_or_else(|| default_run_id("relax"));
    let run_dir = unique_run_dir(&out_root, &run_id);
    create_dir_all(&run_dir)?;

    let params = SystemParams {
        b_ext,
        k_u,
        easy_axis,
        j_ex,
        dmi,
    };

    let mut field = match SpinField::new(nx, ny) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    field.randomise(&mut rng);
    let mut system = System::new(field, params);

    let settings = DriveSettings {
        alpha,
        energy_stride: 0,
    };
    let driver = Driver::new(settings);

    RunConfig {
        lattice: LatticeConfig { nx, ny },
        hamiltonian: HamiltonianConfig::from_params(&params),
        relaxation: RelaxationConfig::new(steps, &settings, seed),
        run: RunInfo {
            binary: "mcspin".to_string(),
            run_id: run_id.clone(),
        },
    }
    .write_to_dir(&run_dir)?;

    if let Err(e) = save_sz_plot(&system.s, run_dir.join("sz_initial.png").to_str().unwrap()) {
        eprintln!("Plot failed: {e}");
    }

    info!(nx, ny, steps, seed, "starting relaxation");
    let e0 = system.energy();

    // Drive in chunks so the progress bar and the energy history both get a
    // sample per chunk; the driver itself is stateless across calls.
    let n_chunks: i64 = 100;
    let chunk = (steps + n_chunks - 1) / n_chunks.max(1);
    let pb = ProgressBar::new(steps.max(0) as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} iterations ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut iterations = vec![0usize];
    let mut energies = vec![e0];
    let mut accepted = 0usize;
    let mut rejected = 0usize;
    let mut done: i64 = 0;
    loop {
        // A negative `steps` falls straight through to the driver, which
        // reports it as an invalid iteration count.
        let this = chunk.min(steps - done);
        match driver.drive(&mut system, this, &mut rng) {
            Ok(report) => {
                accepted += report.accepted;
                rejected += report.rejected;
                done += this;
                iterations.push(done as usize);
                energies.push(report.final_energy);
                pb.set_position(done as u64);
            }
            Err(e) => {
                pb.abandon();
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        if done >= steps {
            break;
        }
    }
    pb.finish();

    let e1 = system.energy();
    let mean = system.mean();
    println!("energy         = {e0:.6} -> {e1:.6}");
    println!(
        "accepted moves = {} / {} ({:.1}%)",
        accepted,
        accepted + rejected,
        100.0 * accepted as f64 / (accepted + rejected).max(1) as f64
    );
    println!("mean spin      = [{:+.4}, {:+.4}, {:+.4}]", mean[0], mean[1], mean[2]);

    if let Err(e) = save_sz_plot(&system.s, run_dir.join("sz_final.png").to_str().unwrap()) {
        eprintln!("Plot failed: {e}");
    }
    if let Err(e) = save_energy_history_plot(
        &iterations,
        &energies,
        run_dir.join("energy_vs_iteration.png").to_str().unwrap(),
    ) {
        eprintln!("Plot failed: {e}");
    }

    println!("Outputs in {}", run_dir.display());
    Ok(())
}

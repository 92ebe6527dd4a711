use std::time::Instant;

use crate::error::Result;
use crate::interaction::dot::{pairwise_dot, DotMethod};
use crate::interaction::forces::{Acceleration, DirectGravity, TensorGravity};
use crate::interaction::params::Parameters;
use crate::interaction::separation::outer_difference;
use crate::interaction::states::{NVec3, Particle, ParticleSet};

/// Helper to build a deterministic particle set of size `n`
fn make_set(n: usize) -> ParticleSet {
    let particles = (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec3::new(
                (i_f * 0.37).sin() * 5.0,
                (i_f * 0.13).cos() * 5.0,
                (i_f * 0.07).sin() * 5.0 + i_f * 1e-3,
            );
            let v = NVec3::new((i_f * 0.11).cos(), (i_f * 0.29).sin(), 0.0);
            Particle::new(x, v, 1.0)
        })
        .collect();
    ParticleSet::new(particles)
}

fn make_params() -> Parameters {
    Parameters {
        G: 0.1,
        eps2: 1e-4,
        ..Parameters::default()
    }
}

/// Time direct pair loop vs. tensor broadcast gravity
pub fn bench_gravity() -> Result<()> {
    let ns = [100, 200, 400, 800, 1600];
    let params = make_params();

    println!("N,direct_ms,tensor_ms");
    for n in ns {
        let set = make_set(n);
        let mut out = vec![NVec3::zeros(); n];

        let direct = DirectGravity::from_params(&params);
        let tensor = TensorGravity::from_params(&params);

        // Warm up
        direct.acceleration(&set, &mut out)?;
        tensor.acceleration(&set, &mut out)?;

        let t0 = Instant::now();
        direct.acceleration(&set, &mut out)?;
        let ms_direct = t0.elapsed().as_secs_f64() * 1000.0;

        let t1 = Instant::now();
        tensor.acceleration(&set, &mut out)?;
        let ms_tensor = t1.elapsed().as_secs_f64() * 1000.0;

        println!("{},{:.6},{:.6}", n, ms_direct, ms_tensor);
    }
    Ok(())
}

/// Time the three pairwise dot-product formulations
/// Paste output directly into a spreadsheet to graph
pub fn bench_dot_products() -> Result<()> {
    let ns = [100, 200, 400, 800];
    let repeats = 3;

    let header: Vec<String> = DotMethod::ALL.iter().map(|m| format!("{}_ms", m.name())).collect();
    println!("N,{}", header.join(","));

    for n in ns {
        let set = make_set(n);
        let dx = outer_difference(&set.positions());
        let dv = outer_difference(&set.velocities()?);

        let mut line = format!("{n}");
        for method in DotMethod::ALL {
            // Warm up
            pairwise_dot(dx.view(), dv.view(), method)?;

            let t0 = Instant::now();
            for _ in 0..repeats {
                pairwise_dot(dx.view(), dv.view(), method)?;
            }
            let ms = t0.elapsed().as_secs_f64() * 1000.0 / repeats as f64;
            line.push_str(&format!(",{ms:.6}"));
        }
        println!("{line}");
    }
    Ok(())
}

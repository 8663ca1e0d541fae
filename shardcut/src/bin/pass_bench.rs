#[cfg(feature = "bench_pass")]
use shardcut::params::PuzzleParams;
#[cfg(feature = "bench_pass")]
use shardcut::Pass;
#[cfg(feature = "bench_pass")]
use std::time::Instant;

#[cfg(not(feature = "bench_pass"))]
fn main() {
    panic!("pass_bench requires --features bench_pass");
}

#[cfg(feature = "bench_pass")]
fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut params = PuzzleParams { noise_enabled: true, ..PuzzleParams::default() };
    let mut repeats = 10usize;
    for a in &args[1..] {
        if let Some(val) = a.strip_prefix("--angles=") {
            if let Ok(v) = val.parse() {
                params.angle_count = v;
            }
        } else if let Some(val) = a.strip_prefix("--rings=") {
            if let Ok(v) = val.parse() {
                params.ring_count = v;
            }
        } else if let Some(val) = a.strip_prefix("--segments=") {
            if let Ok(v) = val.parse() {
                params.edge_segments = v;
            }
        } else if let Some(val) = a.strip_prefix("--repeats=") {
            if let Ok(v) = val.parse() {
                repeats = v;
            }
        }
    }

    // Cold: fresh caches every time.
    let mut cold_times: Vec<f64> = Vec::with_capacity(repeats);
    let mut paths = 0usize;
    for _ in 0..repeats {
        let t0 = Instant::now();
        let t = Pass::new(&params).run();
        cold_times.push(t0.elapsed().as_secs_f64() * 1000.0);
        paths = t.paths.len();
    }

    // Warm: the same pass re-run, jitter and edge caches already filled.
    let mut pass = Pass::new(&params);
    let _ = pass.run();
    let t1 = Instant::now();
    for _ in 0..repeats {
        let _ = pass.run();
    }
    let warm_ms = t1.elapsed().as_secs_f64() * 1000.0 / repeats.max(1) as f64;

    let avg_cold = if cold_times.is_empty() {
        0.0
    } else {
        cold_times.iter().sum::<f64>() / (cold_times.len() as f64)
    };

    println!(
        "angles={} rings={} segments={} paths={} edges_cached={} avg_cold_ms={:.3} avg_warm_ms={:.3}",
        params.angle_count,
        params.ring_count,
        params.edge_segments,
        paths,
        pass.edge_cache().len(),
        avg_cold,
        warm_ms
    );
}

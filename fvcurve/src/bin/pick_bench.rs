use fvcurve::{Button, CurveGroup, EditorConfig, GroupData, LinearTransform, Point, PointerEvent, PointerKind, ScreenPos, ScreenTransform};
use std::time::Instant;

// Curves of `points` samples each, staggered in voltage so presses land between curves too.
fn build_group(curves: usize, points: usize) -> Option<CurveGroup> {
    let mut lists = Vec::with_capacity(curves);
    for c in 0..curves {
        let pts = (0..points).map(|i| Point::from_ints(300 + i as i64 * 2, 600 + (i as i64 % 400) + c as i64 * 5)).collect();
        lists.push((format!("Curve {}", c + 1), pts));
    }
    let data = GroupData::new(lists).ok()?;
    Some(CurveGroup::new("bench", data, &EditorConfig::default()))
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len()-1)]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut points = 5000usize;
    let mut curves = 2usize;
    let mut picks = 10000usize;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--points=") { if let Ok(v)=val.parse() { points=v; } }
        else if let Some(val)=a.strip_prefix("--curves=") { if let Ok(v)=val.parse() { curves=v; } }
        else if let Some(val)=a.strip_prefix("--picks=") { if let Ok(v)=val.parse() { picks=v; } }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }
    let points = points.min(fvcurve::config::MAX_POINTS_PER_CURVE);

    let Some(mut g) = build_group(curves.max(1), points) else {
        eprintln!("could not build bench group");
        std::process::exit(2);
    };
    let t = LinearTransform { x_min: 0.0, x_max: 30_000.0, y_min: 0.0, y_max: 1_500.0, left: 40.0, top: 20.0, width: 1200.0, height: 700.0 };
    let release = PointerEvent { kind: PointerKind::Release, button: Button::Primary, screen: ScreenPos { x: 0.0, y: 0.0 }, data: None };

    let mut times_ms: Vec<f64> = Vec::with_capacity(picks);
    let start_all = Instant::now();
    let mut hits = 0usize;
    for k in 0..picks {
        let p = Point::new(300.0 + (k % points.max(1)) as f64 * 2.0 + 0.7, 600.0 + (k % 400) as f64 + 1.3);
        let press = PointerEvent { kind: PointerKind::Press, button: Button::Primary, screen: t.to_screen(p), data: Some(p) };
        let t0 = Instant::now();
        if g.pointer(&press, &t).is_err() { continue; }
        if (0..g.curve_count()).any(|c| g.editor(c).is_some_and(|e| e.is_dragging())) { hits += 1; }
        let dt = t0.elapsed().as_secs_f64() * 1000.0;
        times_ms.push(dt);
        let _ = g.pointer(&release, &t);
    }
    let dur_all = start_all.elapsed().as_secs_f64() * 1000.0;
    times_ms.sort_by(|a,b| a.total_cmp(b));
    let med = percentile(&times_ms, 0.5);
    let p90 = percentile(&times_ms, 0.9);
    let p99 = percentile(&times_ms, 0.99);
    println!("curves={} points={} picks={} hits={} total_ms={:.3} median_ms={:.4} p90_ms={:.4} p99_ms={:.4}", curves, points, picks, hits, dur_all, med, p90, p99);
    if let Some(th) = assert_ms { if med > th { eprintln!("FAIL: median {:.4} ms > threshold {:.3} ms", med, th); std::process::exit(1); } }
}

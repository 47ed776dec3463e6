//! Replays a dump of detections (one JSON `Detection` per line) against a
//! calibrated config and prints every line call.
//!
//! cargo run --example replay -- config.json detections.jsonl

use std::collections::BTreeMap;
use std::io::BufRead;

use anyhow::{bail, Context};
use hawkeye::{Config, Detection, Frame, HawkEye, LineCalling};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let (config_path, dump_path) = match (args.next(), args.next()) {
        (Some(c), Some(d)) => (c, d),
        _ => bail!("usage: replay <config.json> <detections.jsonl>"),
    };

    let config = Config::load_or_default(&config_path);
    if config.court.is_none() {
        bail!("{} has no court geometry, calibrate first", config_path);
    }

    let file =
        std::fs::File::open(&dump_path).with_context(|| format!("opening {}", dump_path))?;
    let mut frames: BTreeMap<u64, Frame> = BTreeMap::new();

    for (lineno, line) in std::io::BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let det: Detection = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", dump_path, lineno + 1))?;

        frames
            .entry(det.frame_number)
            .or_insert_with(|| Frame::new(det.frame_number, det.timestamp, Vec::new()))
            .detections
            .push(det);
    }

    let frames: Vec<Frame> = frames.into_values().collect();
    let mut hawkeye = HawkEye::new(config)?;

    for res in hawkeye.update(&frames, &dump_path)? {
        println!(
            "frame {:>6} ({:>7.1}, {:>7.1}) {}{}",
            res.detection.frame_number,
            res.position.x,
            res.position.y,
            res.call.map(|c| c.as_str()).unwrap_or("-"),
            if res.bounce { " BOUNCE" } else { "" }
        );
    }

    if let Some(stats) = hawkeye.stats(&dump_path) {
        println!("{}", serde_json::to_string_pretty(&stats)?);

        if let Some(rate) = stats.detection_rate() {
            println!("detection rate: {:.1}%", rate);
        }
    }

    Ok(())
}

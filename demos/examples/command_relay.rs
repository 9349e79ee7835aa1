// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relay frames to a remote painter as JSON lines.
//!
//! Input arrives as a JSON script, one step per line: either
//! `{"event": <InputEvent>}` or `"frame"`. Every frame is written to stdout as
//! one JSON object holding the frame number, the painted bounds (computed with
//! Kurbo), and the tagged command list. The style table is loaded from
//! `style.toml` next to this crate.
//!
//! Run:
//! - `cargo run -p sprig_demos --example command_relay`
//! - `cargo run -p sprig_demos --example command_relay -- script.jsonl`

use std::io::Write as _;

use anyhow::{Context as _, Result};
use serde::Deserialize;
use sprig_engine::controls::{button_ex, label};
use sprig_engine::window::{begin_window, end_window};
use sprig_engine::{AUTO, Command, Context, InputEvent, MonospaceMetrics, Options, Rect, Style};

const STYLE: &str = include_str!("../style.toml");

const SCRIPT: &str = r#"
"frame"
{"event": {"type": "pointer_move", "data": {"x": 150, "y": 62}}}
"frame"
{"event": {"type": "pointer_down", "data": {"pos": {"x": 150, "y": 62}, "button": "LEFT"}}}
"frame"
{"event": {"type": "pointer_up", "data": {"pos": {"x": 150, "y": 62}, "button": "LEFT"}}}
"frame"
"frame"
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Step {
    Event(InputEvent),
    Frame,
}

fn build(ctx: &mut Context<MonospaceMetrics>, count: &mut i64) -> Result<()> {
    ctx.begin()?;
    if begin_window(ctx, "Counter", Rect::new(10, 10, 200, 100), Options::NO_CLOSE)? {
        ctx.layout_row(&[AUTO], 0)?;
        label(ctx, &format!("count = {count}"))?;
        ctx.layout_row(&[AUTO, AUTO], 0)?;
        if button_ex(ctx, "-", None, Options::ALIGN_CENTER)?.clicked() {
            *count -= 1;
        }
        if button_ex(ctx, "+", None, Options::ALIGN_CENTER)?.clicked() {
            *count += 1;
        }
        end_window(ctx)?;
    }
    ctx.end()?;
    Ok(())
}

fn bounds(commands: &[Command]) -> Option<kurbo::Rect> {
    commands
        .iter()
        .filter_map(Command::bounds)
        .map(kurbo::Rect::from)
        .reduce(|a, b| a.union(b))
}

fn main() -> Result<()> {
    let script = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => SCRIPT.to_owned(),
    };
    let style = Style::from_toml_str(STYLE).context("parsing style.toml")?;
    let mut ctx = Context::new(style, MonospaceMetrics::default());
    let mut count = 0_i64;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (n, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let step: Step =
            serde_json::from_str(line).with_context(|| format!("script line {}", n + 1))?;
        match step {
            Step::Event(ev) => ctx.input(ev),
            Step::Frame => {
                build(&mut ctx, &mut count)?;
                let b = bounds(ctx.commands()).unwrap_or(kurbo::Rect::ZERO);
                let record = serde_json::json!({
                    "frame": ctx.frame(),
                    "bounds": [b.x0, b.y0, b.x1, b.y1],
                    "commands": ctx.commands(),
                });
                writeln!(out, "{record}")?;
            }
        }
    }
    eprintln!("final count: {count}");
    Ok(())
}

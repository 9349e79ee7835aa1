// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A cooperative touch-panel host running a calculator.
//!
//! Three tasks share one thread:
//! - the poller samples a (simulated) touch controller every 10 ms, debounces
//!   new contacts, and sends edge events over a channel;
//! - the frame task owns the [`Context`], applies each event, and builds one
//!   frame per event so a press and its release land in different frames;
//! - the flush task wakes on "frame ready" and hands the newest command list
//!   to the (simulated) display.
//!
//! Run:
//! - `RUST_LOG=info cargo run -p sprig_demos --example touch_loop`
//! - `RUST_LOG=sprig_engine=debug,info cargo run -p sprig_demos --example touch_loop`

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, anyhow};
use sprig_engine::controls::{button_ex, label};
use sprig_engine::window::{begin_window, end_window};
use sprig_engine::{
    AUTO, Command, Context, InputEvent, MonospaceMetrics, MouseButtons, Options, Rect, Style, Vec2,
};
use tokio::sync::{Notify, mpsc};
use tokio::time::Instant;
use tracing_subscriber::EnvFilter;

const SAMPLE_PERIOD: Duration = Duration::from_millis(10);
const DEBOUNCE: Duration = Duration::from_millis(150);

const KEYS: [[&str; 4]; 4] = [
    ["7", "8", "9", "/"],
    ["4", "5", "6", "*"],
    ["1", "2", "3", "-"],
    ["C", "0", "=", "+"],
];

/// Center of a key cell for the default style on a 320x240 panel.
fn key_center(row: usize, col: usize) -> Vec2 {
    const XS: [i32; 4] = [42, 120, 198, 277];
    const YS: [i32; 4] = [49, 93, 137, 181];
    Vec2::new(XS[col], YS[row])
}

fn key_position(key: &str) -> Option<Vec2> {
    KEYS.iter().enumerate().find_map(|(r, row)| {
        row.iter()
            .position(|k| *k == key)
            .map(|c| key_center(r, c))
    })
}

#[derive(Debug)]
struct Calculator {
    display: String,
    acc: f64,
    op: Option<char>,
    fresh: bool,
    error: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            display: "0".to_owned(),
            acc: 0.0,
            op: None,
            fresh: true,
            error: false,
        }
    }
}

impl Calculator {
    fn press(&mut self, key: &str) {
        match key {
            "C" => *self = Self::default(),
            "=" => {
                self.apply();
                self.op = None;
            }
            "+" | "-" | "*" | "/" => {
                if !self.fresh {
                    self.apply();
                }
                self.op = key.chars().next();
                self.fresh = true;
            }
            digit => {
                if self.error {
                    *self = Self::default();
                }
                if self.fresh || self.display == "0" {
                    self.display = digit.to_owned();
                    self.fresh = false;
                } else if self.display.len() < 10 {
                    self.display.push_str(digit);
                }
            }
        }
    }

    fn apply(&mut self) {
        let Ok(cur) = self.display.parse::<f64>() else {
            return;
        };
        let value = match self.op {
            Some('+') => self.acc + cur,
            Some('-') => self.acc - cur,
            Some('*') => self.acc * cur,
            Some('/') if cur == 0.0 => {
                self.display = "Error".to_owned();
                self.error = true;
                return;
            }
            Some('/') => self.acc / cur,
            _ => cur,
        };
        self.acc = value;
        self.display = format!("{value}");
        self.fresh = true;
    }
}

fn build(ctx: &mut Context<MonospaceMetrics>, calc: &mut Calculator) -> Result<()> {
    ctx.begin()?;
    let opts = Options::NO_TITLE | Options::NO_RESIZE | Options::NO_SCROLL;
    if begin_window(ctx, "calculator", Rect::new(0, 0, 320, 240), opts)? {
        ctx.layout_row(&[AUTO], 0)?;
        label(ctx, &calc.display)?;
        for row in KEYS {
            ctx.layout_row(&[AUTO; 4], 40)?;
            for key in row {
                if button_ex(ctx, key, None, Options::ALIGN_CENTER)?.clicked() {
                    tracing::info!(key, "key pressed");
                    calc.press(key);
                }
            }
        }
        end_window(ctx)?;
    }
    ctx.end()?;
    Ok(())
}

/// Simulated touch controller: `(touching, x, y)` samples.
fn touch_samples(taps: &[&str]) -> Vec<(bool, i32, i32)> {
    let mut out = vec![(false, 0, 0); 5];
    for key in taps {
        let Some(p) = key_position(key) else {
            continue;
        };
        out.extend(std::iter::repeat_n((true, p.x, p.y), 4));
        out.extend(std::iter::repeat_n((false, p.x, p.y), 20));
    }
    out
}

async fn poll_touch(samples: Vec<(bool, i32, i32)>, tx: mpsc::Sender<InputEvent>) -> Result<()> {
    let mut last_pressed = false;
    let mut last_touch: Option<Instant> = None;
    let mut interval = tokio::time::interval(SAMPLE_PERIOD);
    for (pressed, x, y) in samples {
        interval.tick().await;
        let pos = Vec2::new(x, y);
        match (pressed, last_pressed) {
            (true, false) => {
                let now = Instant::now();
                if last_touch.is_some_and(|t| now.duration_since(t) < DEBOUNCE) {
                    tracing::debug!(x, y, "touch bounced");
                    continue;
                }
                last_touch = Some(now);
                tracing::info!(x, y, "touch down");
                tx.send(InputEvent::PointerMove(pos)).await?;
                tx.send(InputEvent::PointerDown {
                    pos,
                    button: MouseButtons::LEFT,
                })
                .await?;
            }
            (true, true) => tx.send(InputEvent::PointerMove(pos)).await?,
            (false, true) => {
                tracing::info!(x, y, "touch up");
                tx.send(InputEvent::PointerUp {
                    pos,
                    button: MouseButtons::LEFT,
                })
                .await?;
            }
            (false, false) => {}
        }
        last_pressed = pressed;
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Shared {
    frame: Mutex<(u64, Vec<Command>)>,
    ready: Notify,
    done: AtomicBool,
}

async fn run_frames(mut rx: mpsc::Receiver<InputEvent>, shared: Arc<Shared>) -> Result<String> {
    let mut ctx = Context::new(Style::default(), MonospaceMetrics::default());
    let mut calc = Calculator::default();
    let publish = |ctx: &Context<MonospaceMetrics>| -> Result<()> {
        let mut slot = shared
            .frame
            .lock()
            .map_err(|_| anyhow!("frame slot poisoned"))?;
        *slot = (ctx.frame(), ctx.commands().to_vec());
        shared.ready.notify_one();
        Ok(())
    };

    build(&mut ctx, &mut calc)?;
    publish(&ctx)?;
    while let Some(ev) = rx.recv().await {
        ctx.input(ev);
        build(&mut ctx, &mut calc)?;
        publish(&ctx)?;
    }
    // One more frame so the last release settles hover and active state.
    build(&mut ctx, &mut calc)?;
    publish(&ctx)?;
    shared.done.store(true, Ordering::Release);
    shared.ready.notify_one();
    Ok(calc.display)
}

async fn flush(shared: Arc<Shared>) -> Result<()> {
    let mut flushed = 0_u64;
    loop {
        shared.ready.notified().await;
        let (frame, count) = {
            let slot = shared
                .frame
                .lock()
                .map_err(|_| anyhow!("frame slot poisoned"))?;
            (slot.0, slot.1.len())
        };
        flushed += 1;
        tracing::debug!(frame, commands = count, "display flushed");
        if shared.done.load(Ordering::Acquire) {
            break;
        }
    }
    tracing::info!(flushed, "flush task finished");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (tx, rx) = mpsc::channel(32);
    let shared = Arc::new(Shared::default());

    let samples = touch_samples(&["1", "2", "+", "3", "0", "="]);
    let poller = tokio::spawn(poll_touch(samples, tx));
    let flusher = tokio::spawn(flush(Arc::clone(&shared)));
    let display = run_frames(rx, shared).await?;

    poller.await??;
    flusher.await??;
    println!("display: {display}");
    Ok(())
}

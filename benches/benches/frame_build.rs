// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sprig_engine::controls::{begin_treenode, button, checkbox, end_treenode, label, slider};
use sprig_engine::window::{begin_window, end_window};
use sprig_engine::{
    AUTO, CommandBuffer, Context, Id, IdStack, MonospaceMetrics, MouseButtons, Options, Rect,
    Style,
};

struct State {
    flags: Vec<bool>,
    values: Vec<f32>,
}

impl State {
    fn new(n: usize) -> Self {
        Self {
            flags: vec![false; n],
            values: (0..n).map(|i| i as f32).collect(),
        }
    }
}

/// One window per `windows`, each holding `rows` rows of mixed controls.
fn build(ctx: &mut Context<MonospaceMetrics>, windows: usize, rows: usize, state: &mut State) {
    ctx.begin().unwrap();
    for w in 0..windows {
        let title = format!("window {w}");
        let rect = Rect::new(20 * w as i32, 20 * w as i32, 400, 300);
        if !begin_window(ctx, &title, rect, Options::empty()).unwrap() {
            continue;
        }
        for r in 0..rows {
            let i = w * rows + r;
            ctx.layout_row(&[80, AUTO, 60], 0).unwrap();
            label(ctx, "row").unwrap();
            slider(ctx, &mut state.values[i], 0.0, 1000.0).unwrap();
            checkbox(ctx, &format!("c{r}"), &mut state.flags[i]).unwrap();
        }
        if begin_treenode(ctx, "more", Options::EXPANDED).unwrap() {
            ctx.layout_row(&[AUTO, AUTO], 0).unwrap();
            black_box(button(ctx, "apply").unwrap());
            black_box(button(ctx, "reset").unwrap());
            end_treenode(ctx).unwrap();
        }
        end_window(ctx).unwrap();
    }
    ctx.end().unwrap();
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    for &(windows, rows) in &[(1usize, 16usize), (4, 16), (8, 64)] {
        let mut state = State::new(windows * rows);
        group.throughput(Throughput::Elements((windows * rows) as u64));
        group.bench_function(format!("steady_w{windows}_r{rows}"), |b| {
            let mut ctx = Context::new(Style::default(), MonospaceMetrics::default());
            build(&mut ctx, windows, rows, &mut state);
            b.iter(|| {
                build(&mut ctx, windows, rows, &mut state);
                black_box(ctx.commands().len());
            });
        });
        group.bench_function(format!("cold_w{windows}_r{rows}"), |b| {
            b.iter_batched(
                || Context::new(Style::default(), MonospaceMetrics::default()),
                |mut ctx| {
                    build(&mut ctx, windows, rows, &mut state);
                    black_box(ctx.commands().len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("interaction");
    let mut state = State::new(64);
    group.bench_function("title_drag_w4_r16", |b| {
        let mut ctx = Context::new(Style::default(), MonospaceMetrics::default());
        ctx.pointer_move(30, 10);
        build(&mut ctx, 4, 16, &mut state);
        ctx.pointer_down(30, 10, MouseButtons::LEFT);
        build(&mut ctx, 4, 16, &mut state);
        let mut x = 30;
        b.iter(|| {
            x = if x > 200 { 30 } else { x + 1 };
            ctx.pointer_move(x, 10);
            build(&mut ctx, 4, 16, &mut state);
        });
    });
    group.finish();
}

fn bench_ids(c: &mut Criterion) {
    let labels: Vec<String> = (0..1024).map(|i| format!("control {i}")).collect();
    let mut group = c.benchmark_group("ids");
    group.throughput(Throughput::Elements(labels.len() as u64));
    group.bench_function("hash_1024_labels_nested", |b| {
        let mut ids = IdStack::new();
        ids.push_id(Id(0xDEAD_BEEF));
        b.iter(|| {
            let mut acc = 0_u32;
            for l in &labels {
                acc ^= ids.id(l.as_str()).0;
            }
            black_box(acc)
        });
    });
    group.finish();
}

fn bench_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer");
    for &spans in &[8usize, 64, 256] {
        group.throughput(Throughput::Elements(spans as u64 * 32));
        group.bench_function(format!("finish_{spans}_spans"), |b| {
            b.iter_batched(
                || {
                    let mut buf = CommandBuffer::new();
                    for s in 0..spans {
                        buf.begin_span((spans - s) as i32, s % 16 == 0);
                        for i in 0..32 {
                            buf.push_rect(Rect::new(i, s as i32, 4, 4), Default::default());
                        }
                        buf.end_span().unwrap();
                    }
                    buf
                },
                |mut buf| {
                    buf.finish().unwrap();
                    black_box(buf.commands().len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_frame, bench_drag, bench_ids, bench_buffer);
criterion_main!(benches);

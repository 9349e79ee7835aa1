// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A registration form driven by scripted taps, painted as text.
//!
//! Each frame's command list is printed the way a trivial host painter would
//! walk it. The script finds the submit button from the previous frame's
//! text commands, taps it, and the form reports the submission.
//!
//! Run:
//! - `cargo run -p sprig_demos --example basic_window`

use anyhow::{Context as _, Result};
use sprig_engine::controls::{
    begin_treenode, button_ex, checkbox, end_treenode, label, slider, textbox,
};
use sprig_engine::window::{begin_window, end_window};
use sprig_engine::{
    AUTO, Command, Context, MonospaceMetrics, MouseButtons, Options, Rect, Style, Vec2,
};

#[derive(Debug, Default)]
struct Form {
    name: String,
    age: f32,
    interests: [bool; 4],
    subscribe: bool,
    submitted: bool,
}

const INTERESTS: [&str; 4] = ["Technology", "Sports", "Music", "Art"];

fn build(ctx: &mut Context<MonospaceMetrics>, form: &mut Form) -> Result<()> {
    ctx.begin()?;
    if begin_window(ctx, "User Registration", Rect::new(10, 10, 300, 260), Options::empty())? {
        ctx.layout_row(&[AUTO], 0)?;
        label(ctx, "Full Name:")?;
        textbox(ctx, &mut form.name)?;

        ctx.layout_row(&[100, AUTO], 0)?;
        label(ctx, &format!("Age: {}", form.age as i32))?;
        slider(ctx, &mut form.age, 1.0, 100.0)?;

        if begin_treenode(ctx, "Interests", Options::empty())? {
            ctx.layout_row(&[120, 120], 0)?;
            for (name, on) in INTERESTS.iter().zip(form.interests.iter_mut()) {
                checkbox(ctx, name, on)?;
            }
            end_treenode(ctx)?;
        }

        ctx.layout_row(&[AUTO], 0)?;
        checkbox(ctx, "Subscribe to newsletter", &mut form.subscribe)?;
        if button_ex(ctx, "Submit", None, Options::ALIGN_CENTER)?.clicked() {
            form.submitted = true;
        }
        if form.submitted {
            label(ctx, "Form submitted successfully!")?;
        }
        end_window(ctx)?;
    }
    ctx.end()?;
    Ok(())
}

fn paint(frame: u64, commands: &[Command]) {
    println!("-- frame {frame}: {} commands", commands.len());
    for cmd in commands {
        match cmd {
            Command::Clip { rect } => println!("   clip  {rect:?}"),
            Command::Rect { rect, color } => println!(
                "   rect  ({}, {}) {}x{} #{:02x}{:02x}{:02x}",
                rect.x, rect.y, rect.w, rect.h, color.r, color.g, color.b
            ),
            Command::Text { pos, text, .. } => println!("   text  ({}, {}) {text:?}", pos.x, pos.y),
            Command::Icon { icon, rect, .. } => println!("   icon  {icon:?} at ({}, {})", rect.x, rect.y),
        }
    }
}

fn find_text(commands: &[Command], needle: &str) -> Option<Vec2> {
    commands.iter().find_map(|c| match c {
        Command::Text { pos, text, .. } if text == needle => Some(*pos),
        _ => None,
    })
}

fn main() -> Result<()> {
    let mut ctx = Context::new(Style::default(), MonospaceMetrics::default());
    let mut form = Form {
        age: 30.0,
        ..Form::default()
    };

    build(&mut ctx, &mut form)?;
    paint(ctx.frame(), ctx.commands());

    let target = find_text(ctx.commands(), "Submit").context("submit button not drawn")?;
    let tap = target + Vec2::new(2, 2);
    ctx.pointer_move(tap.x, tap.y);
    build(&mut ctx, &mut form)?;
    ctx.pointer_down(tap.x, tap.y, MouseButtons::LEFT);
    build(&mut ctx, &mut form)?;
    ctx.pointer_up(tap.x, tap.y, MouseButtons::LEFT);
    build(&mut ctx, &mut form)?;
    build(&mut ctx, &mut form)?;
    paint(ctx.frame(), ctx.commands());

    println!("submitted: {}", form.submitted);
    Ok(())
}

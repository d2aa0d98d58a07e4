// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive a canvas session with scripted input and print the resulting events and frame.
//!
//! Run:
//! - `RUST_LOG=gridscape_canvas=debug cargo run -p gridscape_demos --example canvas_session`

use gridscape_canvas::{
    CanvasConfig, CanvasEvent, CanvasSession, Color, Command, DisplayList, ImageId, Renderable,
};
use gridscape_index::Rect;
use kurbo::{Point, Size};
use tracing_subscriber::EnvFilter;

fn report(label: &str, event: Option<CanvasEvent>) {
    match event {
        Some(event) => println!("{label:>12}: {event:?}"),
        None => println!("{label:>12}: -"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut session = CanvasSession::new(CanvasConfig {
        tree_width: 40.0,
        tree_height: 40.0,
        ..CanvasConfig::default()
    })
    .expect("valid canvas configuration");
    report("resize", Some(session.resize(Size::new(640.0, 480.0))));

    for x in 0..8 {
        let color = if x % 2 == 0 { Color::GREEN } else { Color::PURPLE };
        let _ = session.insert(Renderable::plain(
            Rect::new(f64::from(x), 0.0, 1.0, 1.0),
            color,
        ));
    }
    let _ = session.insert(Renderable::image(Rect::new(0.0, 2.0, 2.0, 2.0), ImageId(1)));

    // Select the image, then drag the view.
    report("dblclick", Some(session.double_click(Point::new(150.0, 250.0))));
    session.pointer_down(Point::new(300.0, 300.0));
    report("drag", session.pointer_move(Point::new(280.0, 290.0)));
    report("release", session.pointer_up(Point::new(280.0, 290.0)));
    report("wheel", session.wheel(Point::new(320.0, 240.0), 25.0));

    // Create a 3x2 object with the draft keys, then try to place a cell on top of it.
    session.set_editing(true);
    report("hover", session.pointer_move(Point::new(320.0, 240.0)));
    report("key i", session.key('i'));
    report("hover", session.pointer_move(Point::new(520.0, 360.0)));
    report("key f", session.key('f'));
    report("key p", session.key('p'));

    let mut frame = DisplayList::new();
    session.draw(&mut frame);
    let bodies = frame
        .commands()
        .iter()
        .filter(|c| matches!(c, Command::FillRoundedRect(..) | Command::DrawImage(..)))
        .count();
    println!(
        "frame: {} commands, {bodies} object bodies, view ?{}",
        frame.len(),
        session.viewport().state().to_query()
    );
}

use std::sync::Arc;
use std::time::Duration;

use boxsizer::widgets::ChildFrame;
use boxsizer::window::{Backend, NullBackend, Window, WindowSettings};
use boxsizer::Timer;
use parking_lot::Mutex;

fn main() -> boxsizer::Result {
    let angle = Arc::new(Mutex::new(0.0_f32));
    let _timer = Timer::started(Duration::from_millis(100), {
        let angle = angle.clone();
        move || {
            let mut angle = angle.lock();
            *angle += 7.2;
            if *angle >= 360.0 {
                *angle -= 360.0;
            }
        }
    });

    let mut window = Window::new(WindowSettings::new("GUI: Ticker"));
    let dial = window.tree_mut().push_named(
        "dial",
        ChildFrame::new().on_render(move |context| {
            let angle = *angle.lock();
            context.text(&format!("{angle:.1} degrees"));
        }),
    )?;
    window.add_frame(dial)?;

    let mut backend = NullBackend::new(10);
    window.init(&mut backend)?;
    while window.render_begin(&mut backend) {
        window.render(backend.surface());
        window.render_end(&mut backend);
        for command in backend.last_frame() {
            println!("{command:?}");
        }
        std::thread::sleep(Duration::from_millis(250));
    }
    window.deinit(&mut backend);
    Ok(())
}

use boxsizer::widgets::Frame;
use boxsizer::window::NullBackend;
use boxsizer::{Application, Run};

fn main() -> boxsizer::Result {
    let mut app = Application::new("GUI: Hello World!");

    let window = app.window_mut();
    let main = window.tree_mut().push_named(
        "main",
        Frame::new().on_render(|context| context.text("Hello World!")),
    )?;
    window.add_frame(main)?;

    let mut backend = NullBackend::new(1);
    app.run(&mut backend)?;

    for command in backend.last_frame() {
        println!("{command:?}");
    }
    Ok(())
}

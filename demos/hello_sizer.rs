use boxsizer::widgets::{ChildFrame, Frame, HorizontalSizer, VerticalSizer};
use boxsizer::window::NullBackend;
use boxsizer::{Application, Run};

fn main() -> boxsizer::Result {
    let mut app = Application::new("GUI: Hello Sizer!");
    let window = app.window_mut();
    let tree = window.tree_mut();

    let top = tree.push_named(
        "top",
        ChildFrame::new().on_render(|context| context.text("Top Frame")),
    )?;
    let bottom = tree.push_named(
        "bottom",
        ChildFrame::new().on_render(|context| context.text("Bottom Frame")),
    )?;
    let left = tree.push_named(
        "left",
        ChildFrame::new().on_render(|context| context.text("Left Frame")),
    )?;

    // The right column is three times as wide as the left frame, and its top
    // frame is three times as tall as its bottom frame.
    let column = tree.push(VerticalSizer::new());
    tree.add_weighted(column, top, 3)?;
    tree.add_child(column, bottom)?;

    let row = tree.push(HorizontalSizer::new());
    tree.add_child(row, left)?;
    tree.add_weighted(row, column, 3)?;

    let main = tree.push_named("main", Frame::new())?;
    tree.add_child(main, row)?;
    window.add_frame(main)?;

    let mut backend = NullBackend::new(1);
    app.run(&mut backend)?;

    for command in backend.last_frame() {
        println!("{command:?}");
    }
    Ok(())
}

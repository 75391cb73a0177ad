use egui::{Color32, PointerButton, Pos2};
use printer_app::print::save_png;
use printer_app::{
    CanvasRaster, Command, InputEvent, Nudge, PageSetup, Pen, PrintDocument, Settings, Workspace,
};

fn raster_with_mark() -> CanvasRaster {
    let mut raster = CanvasRaster::blank(40, 30).unwrap();
    raster.draw_polyline(&[Pos2::new(0.0, 0.0), Pos2::new(39.0, 0.0)], Pen::default());
    raster
}

#[test]
fn test_page_renders_raster_at_offset_without_scaling() {
    let raster = raster_with_mark();
    let document = PrintDocument::new(Some(&raster), Pos2::new(100.0, 100.0));
    let page = document.render(PageSetup::default());

    assert_eq!(page.pixels().dimensions(), (850, 1100));
    // Top row of the raster lands on row 100, spanning exactly 40 columns
    assert_eq!(page.pixel(100, 100), Some(Color32::BLACK));
    assert_eq!(page.pixel(139, 100), Some(Color32::BLACK));
    assert_eq!(page.pixel(141, 100), Some(Color32::WHITE));
    assert_eq!(page.pixel(99, 100), Some(Color32::WHITE));
}

#[test]
fn test_nudged_workspace_prints_at_new_offset() {
    let mut workspace = Workspace::new(Settings::default());
    workspace.set_surface_size([60, 60]);
    workspace.handle_input(&[
        InputEvent::PointerDown {
            position: Pos2::new(0.0, 0.0),
            button: PointerButton::Primary,
        },
        InputEvent::PointerMove {
            position: Pos2::new(20.0, 0.0),
        },
        InputEvent::PointerUp {
            position: Pos2::new(20.0, 0.0),
            button: PointerButton::Primary,
        },
    ]);

    workspace.execute(Command::Nudge(Nudge::Left));
    workspace.execute(Command::Nudge(Nudge::Up));

    let page = workspace.document().render(PageSetup::default());
    assert_eq!(page.pixel(95, 90), Some(Color32::BLACK));
    assert_eq!(page.pixel(105, 100), Some(Color32::WHITE));
}

#[test]
fn test_exported_page_is_a_png_of_page_size() {
    let raster = raster_with_mark();
    let page = PrintDocument::new(Some(&raster), Pos2::new(-10.0, 5.0))
        .render(PageSetup { width: 120, height: 80 });

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.png");
    save_png(page.pixels(), &path).unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (120, 80));
    assert_eq!(decoded.get_pixel(0, 5).0, [0, 0, 0, 255]);
}

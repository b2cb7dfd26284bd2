//! End-to-end tests exercising the editing engine and export backends
//! together, the way the CLI and UI layers drive them.

use spritemaker::editor::{Editor, Tool};
use spritemaker::export::bmp::{self, BmpHeader};
use spritemaker::export::bytes::{pack_frame, PackOrder};
use spritemaker::export::export_sprite_bmps;
use spritemaker::frame::{Axis, PixelFrame};
use spritemaker::gif::export_sprite_gif;
use spritemaker::import::{sprite_from_gif, sprites_from_images, Threshold};
use spritemaker::render::render_frame;
use spritemaker::selection::Point;
use spritemaker::settings::Settings;
use tempfile::tempdir;

fn drag(editor: &mut Editor, path: &[(i32, i32)]) {
    let first = path[0];
    editor.pointer_down(Point::new(first.0, first.1));
    for &(x, y) in &path[1..] {
        editor.pointer_move(Point::new(x, y), true);
    }
    let last = *path.last().unwrap();
    editor.pointer_up(Point::new(last.0, last.1));
}

#[test]
fn test_draw_then_pack_vertical() {
    let mut editor = Editor::new();
    editor.resize_sprite(8, 8);
    editor.set_tool(Tool::Fill);
    drag(&mut editor, &[(0, 0)]);

    let packed = pack_frame(editor.document.frame(), PackOrder::Vertical);
    assert_eq!(packed, vec![0xFF; 8]);
    let packed = pack_frame(editor.document.frame(), PackOrder::Horizontal);
    assert_eq!(packed, vec![0xFF; 8]);
}

#[test]
fn test_edit_session_undo_unwinds_gestures() {
    let mut editor = Editor::new();

    drag(&mut editor, &[(0, 0), (1, 0), (2, 0)]);
    editor.set_tool(Tool::Line);
    drag(&mut editor, &[(0, 5), (7, 5)]);
    editor.set_tool(Tool::Fill);
    drag(&mut editor, &[(12, 12)]);
    editor.mirror_frame(Axis::Horizontal);
    assert_eq!(editor.history.undo_len(), 4);

    for _ in 0..4 {
        editor.undo();
    }
    assert!(editor.document.frame().data().iter().all(|&b| b == 0));

    for _ in 0..4 {
        editor.redo();
    }
    assert_eq!(editor.history.undo_len(), 4);
    assert_eq!(editor.document.frame().get(12, 12), Some(1));
}

#[test]
fn test_frame_workflow_duplicate_edit_undo() {
    let mut editor = Editor::new();
    drag(&mut editor, &[(3, 3)]);
    editor.duplicate_frame();
    drag(&mut editor, &[(4, 4)]);

    // The copy has both pixels; the original only the first.
    assert_eq!(editor.document.sprite().frames[1].get(4, 4), Some(1));
    assert_eq!(editor.document.sprite().frames[0].get(4, 4), Some(0));

    editor.undo();
    editor.undo();
    let sprite = editor.document.sprite();
    assert_eq!(sprite.frames.len(), 1);
    assert_eq!(sprite.frames[0].get(3, 3), Some(1));
}

#[test]
fn test_export_bmp_files_from_edited_sprite() {
    let dir = tempdir().unwrap();
    let mut editor = Editor::new();
    editor.resize_sprite(2, 2);
    drag(&mut editor, &[(0, 0)]);
    editor.duplicate_frame();
    editor.invert_frame();

    let palette = Settings::default().palette().unwrap();
    let paths = export_sprite_bmps(
        editor.document.sprite(),
        &palette,
        BmpHeader::Info,
        dir.path(),
    )
    .expect("export should succeed");

    assert_eq!(paths.len(), 2);
    let first = std::fs::read(&paths[0]).unwrap();
    // 54-byte header plus four 32-bit pixels.
    assert_eq!(first.len(), 70);
    assert_eq!(&first[0..2], b"BM");
    assert_eq!(u32::from_le_bytes(first[10..14].try_into().unwrap()), 54);
    // (0,0) is lit, rendered white, stored BGRA.
    assert_eq!(&first[54..58], &[255, 255, 255, 255]);

    let second = std::fs::read(&paths[1]).unwrap();
    // The inverted copy has (0,0) unlit, rendered black.
    assert_eq!(&second[54..58], &[0, 0, 0, 255]);
}

#[test]
fn test_bmp_v4_alpha_survives_encode() {
    let mut settings = Settings::default();
    settings.background = "#00000000".to_string();
    let palette = settings.palette().unwrap();

    let mut frame = PixelFrame::new(2, 1, 0);
    frame.set(0, 0, 1);
    let bytes = bmp::encode(&render_frame(&frame, &palette), BmpHeader::V4);

    assert_eq!(u32::from_le_bytes(bytes[10..14].try_into().unwrap()), 122);
    // Lit pixel opaque white, unlit pixel fully transparent.
    assert_eq!(&bytes[122..126], &[255, 255, 255, 255]);
    assert_eq!(&bytes[126..130], &[0, 0, 0, 0]);
}

#[test]
fn test_gif_export_import_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blink.gif");

    let mut editor = Editor::new();
    editor.resize_sprite(4, 4);
    editor.set_tool(Tool::Fill);
    drag(&mut editor, &[(0, 0)]);
    editor.add_frame();

    let palette = Settings::default().palette().unwrap();
    export_sprite_gif(editor.document.sprite(), &palette, 1, 100, true, &path)
        .expect("gif export should succeed");

    let imported = sprite_from_gif(&path, Threshold::Luminance).expect("import should succeed");
    assert_eq!(imported.frames.len(), 2);
    assert_eq!((imported.width, imported.height), (4, 4));
    assert!(imported.frames[0].data().iter().all(|&b| b == 1));
    assert!(imported.frames[1].data().iter().all(|&b| b == 0));
}

#[test]
fn test_split_import_exports_one_sprite_per_file() {
    let dir = tempdir().unwrap();
    let hero = dir.path().join("hero.png");
    let enemy = dir.path().join("enemy.png");
    let mut image = image::RgbaImage::new(4, 4);
    image.put_pixel(0, 0, image::Rgba([255, 255, 255, 255]));
    image.save(&hero).unwrap();
    image.save(&enemy).unwrap();

    let sprites = sprites_from_images(&[&hero, &enemy], Threshold::Alpha, None)
        .expect("split import should succeed");
    assert_eq!(sprites.len(), 2);

    let out = dir.path().join("out");
    let palette = Settings::default().palette().unwrap();
    for sprite in &sprites {
        export_sprite_bmps(sprite, &palette, BmpHeader::Info, &out)
            .expect("export should succeed");
    }

    // Each input file becomes its own named sprite with 1-indexed frames.
    assert!(out.join("hero_1.bmp").exists());
    assert!(out.join("enemy_1.bmp").exists());
    let bytes = std::fs::read(out.join("hero_1.bmp")).unwrap();
    assert_eq!(&bytes[0..2], b"BM");
}

#[test]
fn test_selection_cut_paste_between_positions() {
    let mut editor = Editor::new();
    drag(&mut editor, &[(0, 0), (1, 1)]);

    editor.set_tool(Tool::Select);
    drag(&mut editor, &[(0, 0), (2, 2)]);
    editor.cut();
    assert!(editor.document.frame().data().iter().all(|&b| b == 0));

    editor.pointer_move(Point::new(10, 10), false);
    editor.paste();
    assert_eq!(editor.document.frame().get(10, 10), Some(1));
    assert_eq!(editor.document.frame().get(11, 11), Some(1));

    // The whole session unwinds back to blank.
    while editor.history.undo_len() > 0 {
        editor.undo();
    }
    assert!(editor.document.frame().data().iter().all(|&b| b == 0));
}

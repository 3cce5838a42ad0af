//! End-to-end rendering tests against the bundled DejaVu fonts.

use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

use signlabel::barcode::encode_qr;
use signlabel::label::{DrawOp, encode_png};
use signlabel::source::Row;
use signlabel::text::{FontFace, LabelFont};
use signlabel::{LabelRenderer, LabelRequest, LayoutSpec, batch};

fn font_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fonts")
}

fn sign_renderer() -> LabelRenderer {
    LabelRenderer::with_font_dir(LayoutSpec::sign(), &font_dir()).unwrap()
}

#[test]
fn test_promo_label_end_to_end() {
    let renderer = sign_renderer();
    let request = LabelRequest::new(
        "V000123",
        "9000555",
        "PROMO2024 Red widget set with extra parts",
    );
    let plan = renderer.plan(&request).unwrap();

    match &plan.ops[0] {
        DrawOp::Barcode { x, y, image } => {
            assert_eq!((*x, *y), (563, -20));
            assert_eq!(image, &encode_qr("V000123").unwrap());
        }
        other => panic!("expected barcode first, got {other:?}"),
    }

    match plan.find_text("PROMO2024") {
        Some(DrawOp::Text { x, y, face, .. }) => {
            assert_eq!((*x, *y), (10, 10));
            assert_eq!(*face, FontFace::Bold);
        }
        other => panic!("missing leading code: {other:?}"),
    }

    let body = plan
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Text { y, text, face: FontFace::Regular, .. } if text.starts_with("Red") => {
                Some((*y, text.clone()))
            }
            _ => None,
        })
        .expect("body text op");
    assert_eq!(body.0, 60);
    assert_eq!(
        body.1.split('\n').collect::<Vec<_>>().join(" "),
        "Red widget set with extra parts"
    );

    let font = LabelFont::load(&font_dir().join("DejaVuSans.ttf")).unwrap();
    for line in body.1.lines() {
        assert!(font.width(line, 45.0) <= 503.0, "line too wide: {line:?}");
    }
}

#[test]
fn test_rendering_is_deterministic() {
    let renderer = sign_renderer();
    let request = LabelRequest::new(
        "V000123",
        "9000555",
        "PROMO2024 Red widget set with extra parts",
    );
    let first = encode_png(&renderer.render(&request).unwrap()).unwrap();
    let second = encode_png(&renderer.render(&request).unwrap()).unwrap();
    assert!(first == second, "two renders of the same request differ");
}

#[test]
fn test_rows_are_independent() {
    let renderer = sign_renderer();
    let a = LabelRequest::new("V1", "1000001", "Alpha");
    let b = LabelRequest::new("V2", "1000002", "Beta");

    let alone = renderer.render(&b).unwrap();
    renderer.render(&a).unwrap();
    let after = renderer.render(&b).unwrap();
    assert!(alone == after);
}

#[test]
fn test_batch_writes_square_labels() {
    let out = tempfile::tempdir().unwrap();
    let renderer = LabelRenderer::with_font_dir(LayoutSpec::square(), &font_dir()).unwrap();
    let rows = vec![
        Row::new("V000123", "9000555", "ignored"),
        Row::new("V000124", "1000556", ""),
    ];

    let written = batch::run(&rows, &renderer, out.path()).unwrap();
    assert_eq!(written.len(), 2);
    for path in written {
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (400, 450));
    }
}

#[test]
fn test_custom_layout_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut layout = LayoutSpec::sign();
    layout.name = "wide".to_string();
    if let Some(body) = layout.body.as_mut() {
        body.max_line_width = 2000.0;
    }
    let path = dir.path().join("wide.json");
    std::fs::write(&path, serde_json::to_string(&layout).unwrap()).unwrap();

    let loaded = LayoutSpec::load(path.to_str().unwrap()).unwrap();
    assert_eq!(loaded, layout);

    let renderer = LabelRenderer::with_font_dir(loaded, &font_dir()).unwrap();
    let plan = renderer
        .plan(&LabelRequest::new("V1", "1000001", "Red widget set with extra parts"))
        .unwrap();
    assert!(plan.find_text("Red widget set with extra parts").is_some());
}

#[test]
fn test_missing_font_is_a_configuration_error() {
    let err = LabelRenderer::with_font_dir(LayoutSpec::sign(), Path::new("/nonexistent/fonts"))
        .err()
        .expect("font loading should fail");
    assert!(err.is_fatal());
    assert!(err.to_string().contains("Font configuration error"));
}

use super::*;
use crate::test_support::system_font;

fn style() -> LabelStyle {
    LabelStyle {
        prefix: "My Way ".to_string(),
        font_size: 40.0,
        padding: 10,
    }
}

#[test]
fn text_is_prefixed() {
    assert_eq!(style().text_for("42"), "My Way 42");
}

#[test]
fn origin_follows_logo_placement() {
    let s = LabelStyle {
        prefix: String::new(),
        font_size: 140.0,
        padding: 40,
    };
    assert_eq!(s.origin(2000, 360, 360), (40 + 360 + 35, 2000 - 40 - 360 + 95));
    assert_eq!(s.origin(100, 360, 360), (435, -205));
}

#[test]
fn label_is_black_on_transparent() {
    let font = system_font();
    let img = render_label("7", 400, 200, &font, (100, 150), &style()).unwrap();
    assert_eq!((img.width, img.height), (400, 200));

    let mut inked = 0;
    for px in img.rgba8_premul.chunks_exact(4) {
        assert_eq!(&px[..3], &[0, 0, 0]);
        if px[3] > 0 {
            inked += 1;
        }
    }
    assert!(inked > 0);

    // Nothing is drawn left of the text origin.
    let (ox, _) = style().origin(200, 100, 150);
    for y in 0..img.height {
        for x in 0..(ox as u32 - 1) {
            assert_eq!(img.pixel(x, y)[3], 0);
        }
    }
}

#[test]
fn label_off_canvas_is_fully_transparent() {
    let font = system_font();
    let img = render_label("7", 10, 10, &font, (20, 20), &style()).unwrap();
    assert!(img.rgba8_premul.iter().all(|&b| b == 0));
}

#[test]
fn zero_sized_label_canvas_is_rejected() {
    let font = system_font();
    let err = render_label("1", 0, 5, &font, (1, 1), &style()).unwrap_err();
    assert!(matches!(err, StackError::EmptyComposition(_)));
}

use proptest::prelude::*;

use vlprep::coord::{
    adjust_bboxes_in_text, adjust_points_in_text, smart_resize, AdjustContext, Bbox2D,
    CoordRegime, Dimensions, Point2D,
};

fn arb_dims() -> impl Strategy<Value = Dimensions> {
    (1u32..=4096, 1u32..=4096).prop_map(|(height, width)| Dimensions::new(height, width))
}

proptest! {
    #[test]
    fn absolute_noop_resize_is_identity_for_points(
        dims in arb_dims(),
        x in -10_000i64..10_000,
        y in -10_000i64..10_000,
    ) {
        let point = Point2D::new(x, y);
        let adjusted = point.adjust_for_resize(dims, dims, CoordRegime::Absolute);
        prop_assert_eq!(adjusted, point);
    }

    #[test]
    fn absolute_noop_resize_is_identity_for_bboxes(
        dims in arb_dims(),
        coords in prop::array::uniform4(-10_000i64..10_000),
    ) {
        let bbox = Bbox2D::from(coords);
        let adjusted = bbox.adjust_for_resize(dims, dims, CoordRegime::Absolute);
        prop_assert_eq!(adjusted, bbox);
    }

    #[test]
    fn relative_in_range_is_scale_invariant(
        original in arb_dims(),
        resized in arb_dims(),
        x in -1000i64..=1000,
        y in -1000i64..=1000,
    ) {
        let point = Point2D::new(x, y);
        let adjusted = point.adjust_for_resize(original, resized, CoordRegime::Relative);
        prop_assert_eq!(adjusted, point);
    }

    #[test]
    fn absolute_transform_is_componentwise_truncation(
        original in arb_dims(),
        resized in arb_dims(),
        x in 0i64..100_000,
        y in 0i64..100_000,
    ) {
        let point = Point2D::new(x, y);
        let adjusted = point.adjust_for_resize(original, resized, CoordRegime::Absolute);

        let expected_x = (x as f64 * resized.width as f64 / original.width as f64) as i64;
        let expected_y = (y as f64 * resized.height as f64 / original.height as f64) as i64;
        prop_assert_eq!(adjusted, Point2D::new(expected_x, expected_y));
    }

    #[test]
    fn malformed_bbox_fragments_round_trip(
        a in 0i64..5000,
        b in 0i64..5000,
        c in 0i64..5000,
    ) {
        // Three numbers where four are expected: the text must come back
        // byte-identical.
        let text = format!(r#"{{"bbox_2d": [{a}, {b}, {c}], "label": "box"}}"#);
        let ctx = AdjustContext::new(
            Dimensions::new(600, 800),
            Dimensions::new(450, 600),
            CoordRegime::Absolute,
        );
        prop_assert_eq!(adjust_bboxes_in_text(&text, &ctx), text);
    }

    #[test]
    fn rewriting_preserves_surrounding_text(
        x in 0i64..2000,
        y in 0i64..2000,
        label in "[a-z]{1,12}",
    ) {
        let text = format!(r#"{{"point_2d": [{x}, {y}], "label": "{label}"}}"#);
        let ctx = AdjustContext::new(
            Dimensions::new(600, 800),
            Dimensions::new(450, 600),
            CoordRegime::Absolute,
        );
        let out = adjust_points_in_text(&text, &ctx);
        let keeps_leading_brace = out.starts_with('{');
        prop_assert!(keeps_leading_brace);
        let label_field = format!(r#""label": "{label}""#);
        let keeps_label_field = out.contains(&label_field);
        prop_assert!(keeps_label_field);
    }

    #[test]
    fn smart_resize_invariants(
        height in 1u32..4000,
        width in 1u32..4000,
    ) {
        const FACTOR: u32 = 28;
        const MIN_PIXELS: u32 = 256 * 28 * 28;
        const MAX_PIXELS: u32 = 1280 * 28 * 28;

        let ratio = f64::from(height.max(width)) / f64::from(height.min(width));
        prop_assume!(ratio <= 200.0);

        let dims = smart_resize(height, width, FACTOR, MIN_PIXELS, MAX_PIXELS).unwrap();

        prop_assert!(dims.height > 0 && dims.height % FACTOR == 0);
        prop_assert!(dims.width > 0 && dims.width % FACTOR == 0);

        // If the rounded-only area is already inside the pixel band, only
        // rounding applies; otherwise the output must land inside the band.
        let rounded_h = ((f64::from(height) / f64::from(FACTOR)).round()
            * f64::from(FACTOR)).max(f64::from(FACTOR)) as u64;
        let rounded_w = ((f64::from(width) / f64::from(FACTOR)).round()
            * f64::from(FACTOR)).max(f64::from(FACTOR)) as u64;
        let rounded_area = rounded_h * rounded_w;

        if rounded_area >= u64::from(MIN_PIXELS) && rounded_area <= u64::from(MAX_PIXELS) {
            prop_assert_eq!(dims.area(), rounded_area);
        } else {
            prop_assert!(dims.area() >= u64::from(MIN_PIXELS));
            prop_assert!(dims.area() <= u64::from(MAX_PIXELS));
        }
    }
}

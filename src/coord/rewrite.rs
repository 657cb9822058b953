//! Textual rewriting of coordinate fragments embedded in conversation text.
//!
//! Training data carries spatial annotations as `"point_2d": [x, y]` and
//! `"bbox_2d": [x1, y1, x2, y2]` fragments inside free-form assistant turns.
//! The surrounding text is not guaranteed to be valid JSON (Python-style dict
//! literals show up in some sources), so rewriting is a pure regex-driven
//! substring substitution: matched fragments are replaced, everything else is
//! preserved byte-for-byte. Do not replace this with a structural JSON
//! re-encode; that would change byte-level output on non-JSON carriers.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::bbox::Bbox2D;
use super::dims::Dimensions;
use super::point::Point2D;
use super::regime::CoordRegime;

static POINT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""point_2d"\s*:\s*\[([^\]]*)\]"#).expect("static regex"));
static BBOX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""bbox_2d"\s*:\s*\[([^\]]*)\]"#).expect("static regex"));

/// Which fragment key a rewrite pass targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FragmentKind {
    /// `"point_2d": [x, y]`
    Point,
    /// `"bbox_2d": [x1, y1, x2, y2]`
    Bbox,
}

impl FragmentKind {
    /// The JSON key this kind matches.
    pub fn key(&self) -> &'static str {
        match self {
            FragmentKind::Point => "point_2d",
            FragmentKind::Bbox => "bbox_2d",
        }
    }

    /// Expected number of components.
    pub fn arity(&self) -> usize {
        match self {
            FragmentKind::Point => 2,
            FragmentKind::Bbox => 4,
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            FragmentKind::Point => &POINT_RE,
            FragmentKind::Bbox => &BBOX_RE,
        }
    }
}

/// Parameters for one rewrite pass: a single image's dimensions and regime.
#[derive(Clone, Copy, Debug)]
pub struct AdjustContext {
    pub original: Dimensions,
    pub resized: Dimensions,
    pub regime: CoordRegime,
    /// When set, per-fragment adjustments and parse rejections are reported
    /// on stderr.
    pub debug: bool,
}

impl AdjustContext {
    /// Creates a context with debug reporting off.
    pub fn new(original: Dimensions, resized: Dimensions, regime: CoordRegime) -> Self {
        Self {
            original,
            resized,
            regime,
            debug: false,
        }
    }
}

/// Rewrites every `kind` fragment in `text`, adjusting its coordinates for
/// the resize described by `ctx`.
///
/// Matches are scanned left to right and replaced independently. A fragment
/// whose bracketed list has the wrong arity or a non-numeric token is left
/// verbatim. Replacement text uses the canonical form
/// `"<key>": [v1, v2, ...]`.
pub fn rewrite_fragments(text: &str, kind: FragmentKind, ctx: &AdjustContext) -> String {
    kind.pattern()
        .replace_all(text, |caps: &Captures| {
            let Some(values) = parse_components(&caps[1], kind.arity()) else {
                if ctx.debug {
                    eprintln!(
                        "Note: leaving malformed {} fragment unchanged: {}",
                        kind.key(),
                        &caps[0]
                    );
                }
                return caps[0].to_string();
            };

            let adjusted = adjust_values(&values, kind, ctx);
            if ctx.debug {
                eprintln!(
                    "Adjusted {} {:?} -> {:?} ({}, {} -> {})",
                    kind.key(),
                    values,
                    adjusted,
                    ctx.regime.name(),
                    ctx.original,
                    ctx.resized
                );
            }
            render_fragment(kind.key(), &adjusted)
        })
        .into_owned()
}

/// Rewrites all `"point_2d"` fragments in `text`.
pub fn adjust_points_in_text(text: &str, ctx: &AdjustContext) -> String {
    rewrite_fragments(text, FragmentKind::Point, ctx)
}

/// Rewrites all `"bbox_2d"` fragments in `text`.
pub fn adjust_bboxes_in_text(text: &str, ctx: &AdjustContext) -> String {
    rewrite_fragments(text, FragmentKind::Bbox, ctx)
}

/// Returns true if `text` contains any fragment of the given kind, meaning a
/// rewrite pass would have work to do.
pub fn contains_fragment(text: &str, kind: FragmentKind) -> bool {
    text.contains(kind.key())
}

/// Parses a comma-separated component list, tolerating stray whitespace and
/// float-formatted integers such as `12.0`. Returns `None` on a non-numeric
/// or non-finite token (`nan`, `inf`) or an arity mismatch.
fn parse_components(list: &str, arity: usize) -> Option<Vec<i64>> {
    let mut values = Vec::with_capacity(arity);
    for token in list.split(',') {
        let parsed: f64 = token.trim().parse().ok().filter(|v: &f64| v.is_finite())?;
        values.push(parsed as i64);
    }
    if values.len() == arity {
        Some(values)
    } else {
        None
    }
}

fn adjust_values(values: &[i64], kind: FragmentKind, ctx: &AdjustContext) -> Vec<i64> {
    match kind {
        FragmentKind::Point => {
            let point = Point2D::new(values[0], values[1]);
            let adjusted = point.adjust_for_resize(ctx.original, ctx.resized, ctx.regime);
            vec![adjusted.x, adjusted.y]
        }
        FragmentKind::Bbox => {
            let bbox = Bbox2D::new(values[0], values[1], values[2], values[3]);
            let adjusted = bbox.adjust_for_resize(ctx.original, ctx.resized, ctx.regime);
            vec![adjusted.x1, adjusted.y1, adjusted.x2, adjusted.y2]
        }
    }
}

fn render_fragment(key: &str, values: &[i64]) -> String {
    let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("\"{}\": [{}]", key, rendered.join(", "))
}

/// Fuzz-only entrypoint for the fragment rewriter.
#[cfg(feature = "fuzzing")]
pub fn fuzz_rewrite_fragments(text: &str) {
    let ctx = AdjustContext::new(
        Dimensions::new(600, 800),
        Dimensions::new(450, 600),
        CoordRegime::Absolute,
    );
    let _ = rewrite_fragments(text, FragmentKind::Point, &ctx);
    let _ = rewrite_fragments(text, FragmentKind::Bbox, &ctx);
}

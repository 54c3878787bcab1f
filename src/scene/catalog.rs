//! Built-in SmartyGym promo scenes.

use crate::animation::ease::Ease;
use crate::foundation::core::{Rgba8, Vec2};
use crate::scene::draw::rel_rect_centered;
use crate::scene::script::{Directive, Motion, SceneScript};

/// Brand blue.
pub const BRAND_BLUE: Rgba8 = Rgba8::rgb(41, 168, 224);
/// Brand gold accent.
pub const BRAND_GOLD: Rgba8 = Rgba8::rgb(245, 184, 46);
/// Primary text color.
pub const INK_LIGHT: Rgba8 = Rgba8::rgb(245, 248, 252);
/// Secondary text color.
pub const INK_MUTED: Rgba8 = Rgba8::rgb(160, 174, 192);
/// Card fill.
pub const CARD: Rgba8 = Rgba8([255, 255, 255, 22]);

const WORDMARK: &str = "SMARTYGYM";

fn v(x: f64, y: f64) -> Vec2 {
    Vec2::new(x, y)
}

fn text(
    t: &str,
    center: Vec2,
    size: f64,
    color: Rgba8,
    motion: Motion,
    delay_ms: f64,
) -> Directive {
    Directive::Text {
        text: t.to_string(),
        center,
        size,
        color,
        motion,
        delay_ms,
        ease: Ease::OutCubic,
    }
}

fn bar(center: Vec2, width: f64, delay_ms: f64) -> Directive {
    Directive::Bar {
        center,
        width,
        height: 0.008,
        color: BRAND_GOLD,
        delay_ms,
    }
}

fn logo(center: Vec2, size: f64, glow: bool, delay_ms: f64) -> Directive {
    Directive::Logo {
        center,
        size,
        glow,
        accent: BRAND_BLUE,
        wordmark: WORDMARK.to_string(),
        delay_ms,
    }
}

fn feature_card(y: f64, title: &str, line: &str, delay_ms: f64) -> [Directive; 3] {
    [
        Directive::Panel {
            rect: rel_rect_centered(v(0.5, y), 0.78, 0.16),
            radius: 0.03,
            color: CARD,
            border: Some(BRAND_BLUE.with_alpha(90)),
            motion: Motion::SlideLeft,
            delay_ms,
        },
        text(title, v(0.5, y - 0.025), 0.042, INK_LIGHT, Motion::SlideLeft, delay_ms),
        text(line, v(0.5, y + 0.03), 0.028, INK_MUTED, Motion::SlideLeft, delay_ms + 80.0),
    ]
}

/// The eight scenes, in timeline order.
pub fn smartygym_scripts() -> Vec<SceneScript> {
    vec![
        SceneScript {
            name: "intro".into(),
            directives: vec![
                logo(v(0.5, 0.44), 0.42, true, 0.0),
                text("SMARTYGYM", v(0.5, 0.72), 0.07, INK_LIGHT, Motion::Rise, 300.0),
            ],
        },
        SceneScript {
            name: "headline".into(),
            directives: vec![
                text("Your gym.", v(0.5, 0.40), 0.09, INK_LIGHT, Motion::Rise, 0.0),
                text("Re-imagined.", v(0.5, 0.52), 0.09, BRAND_BLUE, Motion::Rise, 150.0),
                bar(v(0.5, 0.61), 0.28, 300.0),
            ],
        },
        SceneScript {
            name: "claim".into(),
            directives: vec![
                text("Expert workouts", v(0.5, 0.38), 0.072, INK_LIGHT, Motion::Scale, 0.0),
                text(
                    "designed by real coaches",
                    v(0.5, 0.48),
                    0.05,
                    INK_MUTED,
                    Motion::Fade,
                    150.0,
                ),
                bar(v(0.5, 0.57), 0.22, 250.0),
                text("Ready when you are", v(0.5, 0.66), 0.04, BRAND_GOLD, Motion::Rise, 300.0),
            ],
        },
        SceneScript {
            name: "features".into(),
            directives: {
                let mut d = vec![text(
                    "Everything in one place",
                    v(0.5, 0.18),
                    0.055,
                    INK_LIGHT,
                    Motion::Fade,
                    0.0,
                )];
                d.extend(feature_card(0.36, "Workouts", "Strength, cardio, mobility", 100.0));
                d.extend(feature_card(
                    0.56,
                    "Training programs",
                    "Multi-week plans that progress",
                    220.0,
                ));
                d.extend(feature_card(0.76, "Smart tools", "Calculators and tracking", 340.0));
                d
            },
        },
        SceneScript {
            name: "categories".into(),
            directives: vec![
                text("Train your way", v(0.5, 0.24), 0.065, INK_LIGHT, Motion::Rise, 0.0),
                Directive::Chips {
                    labels: [
                        "Strength",
                        "Cardio",
                        "HIIT",
                        "Mobility",
                        "Pilates",
                        "Recovery",
                        "Calisthenics",
                        "Metabolic",
                        "Challenge",
                    ]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                    center_y: 0.55,
                    size: 0.036,
                    per_row: 3,
                    cycle_ms: 320.0,
                    stagger_ms: 40.0,
                    color: CARD,
                    text_color: INK_LIGHT,
                    accent: BRAND_BLUE,
                },
            ],
        },
        SceneScript {
            name: "coaches".into(),
            directives: vec![
                Directive::Panel {
                    rect: rel_rect_centered(v(0.5, 0.48), 0.8, 0.34),
                    radius: 0.04,
                    color: CARD,
                    border: None,
                    motion: Motion::Scale,
                    delay_ms: 0.0,
                },
                text("Built by coaches", v(0.5, 0.42), 0.068, INK_LIGHT, Motion::Rise, 120.0),
                text("not algorithms", v(0.5, 0.52), 0.05, BRAND_GOLD, Motion::Rise, 240.0),
            ],
        },
        SceneScript {
            name: "anywhere".into(),
            directives: vec![
                text("Train anywhere", v(0.5, 0.38), 0.085, INK_LIGHT, Motion::SlideLeft, 0.0),
                text(
                    "Home. Gym. Outdoors.",
                    v(0.5, 0.5),
                    0.048,
                    BRAND_BLUE,
                    Motion::SlideLeft,
                    150.0,
                ),
                bar(v(0.5, 0.59), 0.3, 300.0),
            ],
        },
        SceneScript {
            name: "outro".into(),
            directives: vec![
                logo(v(0.5, 0.36), 0.3, true, 0.0),
                text("Start training today", v(0.5, 0.62), 0.064, INK_LIGHT, Motion::Rise, 200.0),
                Directive::Panel {
                    rect: rel_rect_centered(v(0.5, 0.74), 0.46, 0.09),
                    radius: 0.045,
                    color: BRAND_BLUE,
                    border: None,
                    motion: Motion::Scale,
                    delay_ms: 350.0,
                },
                text("smartygym.com", v(0.5, 0.74), 0.042, INK_LIGHT, Motion::Scale, 350.0),
            ],
        },
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/scene/catalog.rs"]
mod tests;

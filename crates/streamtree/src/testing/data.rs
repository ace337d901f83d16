//! Fixture datasets and deterministic synthetic streams.

use rand::prelude::*;

use crate::data::{Attribute, MapInstance, Model};

// =============================================================================
// Fixtures
// =============================================================================

/// Weather classification: does the game get played?
///
/// 14 rows over `outlook` (nominal), `temperature`, `humidity` (numeric) and
/// `windy` (nominal); 9 `yes` and 5 `no`.
pub fn weather() -> (Model, Vec<MapInstance>) {
    let model = Model::new(
        Attribute::nominal("play", ["yes", "no"]),
        vec![
            Attribute::nominal("outlook", ["rainy", "overcast", "sunny"]),
            Attribute::numeric("temperature"),
            Attribute::numeric("humidity"),
            Attribute::nominal("windy", ["false", "true"]),
        ],
    )
    .expect("weather model is valid");

    let rows: [(&str, f64, f64, &str, &str); 14] = [
        ("rainy", 85.0, 85.0, "false", "no"),
        ("rainy", 80.0, 90.0, "true", "no"),
        ("overcast", 83.0, 86.0, "false", "yes"),
        ("sunny", 70.0, 96.0, "false", "yes"),
        ("sunny", 68.0, 80.0, "false", "yes"),
        ("sunny", 65.0, 70.0, "true", "no"),
        ("overcast", 64.0, 65.0, "true", "yes"),
        ("rainy", 72.0, 95.0, "false", "no"),
        ("rainy", 69.0, 70.0, "false", "yes"),
        ("sunny", 75.0, 80.0, "false", "yes"),
        ("rainy", 75.0, 70.0, "true", "yes"),
        ("overcast", 72.0, 90.0, "true", "yes"),
        ("overcast", 81.0, 75.0, "false", "yes"),
        ("sunny", 71.0, 91.0, "true", "no"),
    ];

    let instances = rows
        .iter()
        .map(|&(outlook, temperature, humidity, windy, play)| {
            MapInstance::new()
                .with("outlook", outlook)
                .with("temperature", temperature)
                .with("humidity", humidity)
                .with("windy", windy)
                .with("play", play)
        })
        .collect();
    (model, instances)
}

/// Golf regression: hours played.
///
/// 14 rows over `outlook`, `temperature`, `humidity`, `windy` (all nominal).
pub fn golf() -> (Model, Vec<MapInstance>) {
    let model = Model::new(
        Attribute::numeric("hours"),
        vec![
            Attribute::nominal("outlook", ["rainy", "overcast", "sunny"]),
            Attribute::nominal("temperature", ["hot", "mild", "cool"]),
            Attribute::nominal("humidity", ["high", "normal"]),
            Attribute::nominal("windy", ["false", "true"]),
        ],
    )
    .expect("golf model is valid");

    let rows: [(&str, &str, &str, &str, f64); 14] = [
        ("rainy", "hot", "high", "false", 25.0),
        ("rainy", "hot", "high", "true", 30.0),
        ("overcast", "hot", "high", "false", 46.0),
        ("sunny", "mild", "high", "false", 45.0),
        ("sunny", "cool", "normal", "false", 52.0),
        ("sunny", "cool", "normal", "true", 23.0),
        ("overcast", "cool", "normal", "true", 43.0),
        ("rainy", "mild", "high", "false", 35.0),
        ("rainy", "cool", "normal", "false", 38.0),
        ("sunny", "mild", "normal", "false", 46.0),
        ("rainy", "mild", "normal", "true", 48.0),
        ("overcast", "mild", "high", "true", 52.0),
        ("overcast", "hot", "normal", "false", 44.0),
        ("sunny", "mild", "high", "true", 30.0),
    ];

    let instances = rows
        .iter()
        .map(|&(outlook, temperature, humidity, windy, hours)| {
            MapInstance::new()
                .with("outlook", outlook)
                .with("temperature", temperature)
                .with("humidity", humidity)
                .with("windy", windy)
                .with("hours", hours)
        })
        .collect();
    (model, instances)
}

/// Petal length per class: `(len, class index)` for classes a, b, c.
pub const PETAL_LENGTHS: [(f64, usize); 12] = [
    (1.4, 0),
    (1.3, 0),
    (1.5, 0),
    (4.1, 1),
    (3.7, 1),
    (4.9, 1),
    (4.0, 1),
    (3.3, 1),
    (6.3, 2),
    (5.8, 2),
    (5.1, 2),
    (5.3, 2),
];

/// Living area vs. price: `(area, price)`.
pub const AREA_PRICES: [(f64, f64); 12] = [
    (1.1, 4.5),
    (1.2, 4.5),
    (1.5, 5.0),
    (0.9, 3.8),
    (1.3, 5.8),
    (1.5, 5.6),
    (0.8, 3.2),
    (2.6, 8.2),
    (1.0, 3.9),
    (1.6, 5.1),
    (1.8, 8.7),
    (1.6, 6.0),
];

// =============================================================================
// Synthetic streams
// =============================================================================

const COLORS: [&str; 3] = ["red", "green", "blue"];

/// Binary classification stream.
///
/// Predictors `x1`, `x2` are uniform in `[0, 1]` and `color` is uniform over
/// three labels. The label is `pos` when `x1 + 0.5·[color = red] > 0.75`;
/// with probability `noise` it is flipped. `x2` is irrelevant.
pub fn synthetic_classification(rows: usize, seed: u64, noise: f64) -> (Model, Vec<MapInstance>) {
    let model = Model::new(
        Attribute::nominal("label", ["neg", "pos"]),
        vec![
            Attribute::numeric("x1"),
            Attribute::numeric("x2"),
            Attribute::nominal("color", COLORS),
        ],
    )
    .expect("synthetic model is valid");

    let mut rng = StdRng::seed_from_u64(seed);
    let instances = (0..rows)
        .map(|_| {
            let x1: f64 = rng.r#gen();
            let x2: f64 = rng.r#gen();
            let color = COLORS[rng.gen_range(0..COLORS.len())];
            let bonus = if color == "red" { 0.5 } else { 0.0 };
            let mut positive = x1 + bonus > 0.75;
            if rng.r#gen::<f64>() < noise {
                positive = !positive;
            }

            MapInstance::new()
                .with("x1", x1)
                .with("x2", x2)
                .with("color", color)
                .with("label", if positive { "pos" } else { "neg" })
        })
        .collect();
    (model, instances)
}

/// Regression stream.
///
/// `y = 3·x1 + 2·[color = blue] + u`, with `x1`, `x2` uniform in `[0, 1]` and
/// `u` uniform in `[-noise, noise]`. `x2` is irrelevant.
pub fn synthetic_regression(rows: usize, seed: u64, noise: f64) -> (Model, Vec<MapInstance>) {
    let model = Model::new(
        Attribute::numeric("y"),
        vec![
            Attribute::numeric("x1"),
            Attribute::numeric("x2"),
            Attribute::nominal("color", COLORS),
        ],
    )
    .expect("synthetic model is valid");

    let mut rng = StdRng::seed_from_u64(seed);
    let instances = (0..rows)
        .map(|_| {
            let x1: f64 = rng.r#gen();
            let x2: f64 = rng.r#gen();
            let color = COLORS[rng.gen_range(0..COLORS.len())];
            let shift = if color == "blue" { 2.0 } else { 0.0 };
            let y = 3.0 * x1 + shift + (rng.r#gen::<f64>() * 2.0 - 1.0) * noise;

            MapInstance::new()
                .with("x1", x1)
                .with("x2", x2)
                .with("color", color)
                .with("y", y)
        })
        .collect();
    (model, instances)
}

//! Writes a deterministic synthetic observation table (10 countries ×
//! 2000–2026) to `sample_data.csv`, matching the canonical schema.

use anyhow::{Context, Result};

use thriftboard::data::export::write_filtered_csv;
use thriftboard::data::model::{Dataset, ObservationRow};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[(self.next_u64() % options.len() as u64) as usize]
    }
}

const EARLY_CHANNELS: [&str; 3] = ["Tienda de segunda mano", "Mercadillo", "Feria americana"];
const LATE_CHANNELS: [&str; 3] = ["Online", "Aplicación móvil", "Tienda de segunda mano"];
const EARLY_PLATFORMS: [&str; 2] = ["Foros", "Boca a boca"];
const LATE_PLATFORMS: [&str; 5] = ["Instagram", "Facebook Marketplace", "TikTok", "Vinted", "MercadoLibre"];
const CATEGORIES: [&str; 5] = ["Ropa casual", "Vestidos", "Abrigos", "Calzado", "Accesorios"];
const MOTIVATIONS: [&str; 4] = ["Precio", "Sostenibilidad", "Moda única", "Calidad"];

/// (name, base buyers in 2000, yearly growth, base avg spend, base income)
const COUNTRIES: [(&str, f64, f64, f64, f64); 10] = [
    ("Perú", 800.0, 1.065, 18.0, 950.0),
    ("México", 2200.0, 1.060, 24.0, 1400.0),
    ("Colombia", 1100.0, 1.070, 20.0, 1050.0),
    ("Argentina", 1300.0, 1.055, 22.0, 1250.0),
    ("Chile", 700.0, 1.062, 28.0, 1600.0),
    ("España", 1900.0, 1.058, 35.0, 2300.0),
    ("Ecuador", 500.0, 1.068, 17.0, 900.0),
    ("Venezuela", 600.0, 1.045, 12.0, 600.0),
    ("Bolivia", 350.0, 1.066, 14.0, 750.0),
    ("Uruguay", 280.0, 1.060, 26.0, 1500.0),
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut rows = Vec::new();

    for (country, base_buyers, growth, base_spend, base_income) in COUNTRIES {
        for year in 2000..=2026 {
            let age = (year - 2000) as f64;
            let buyers = (base_buyers * growth.powf(age) * rng.gauss(1.0, 0.08)).max(10.0);
            let avg_spend = (base_spend * (1.0 + 0.015 * age) * rng.gauss(1.0, 0.06)).max(1.0);
            let avg_income = (base_income * (1.0 + 0.012 * age) * rng.gauss(1.0, 0.04)).max(100.0);
            let avg_items = (2.2 + 0.05 * age + rng.gauss(0.0, 0.3)).max(0.5);
            let total_buyers = buyers.round() as u64;
            let total_items = (buyers * avg_items).round() as u64;

            // Online channels dominate from the mid-2010s.
            let online_era = year >= 2012 && rng.next_f64() < 0.2 + 0.04 * (year - 2012) as f64;
            let top_channel = if online_era {
                rng.pick(&LATE_CHANNELS)
            } else {
                rng.pick(&EARLY_CHANNELS)
            };
            let top_platform = if year >= 2010 {
                rng.pick(&LATE_PLATFORMS)
            } else {
                rng.pick(&EARLY_PLATFORMS)
            };

            rows.push(ObservationRow {
                country: country.to_string(),
                year,
                total_buyers,
                total_spend_usd: (buyers * avg_spend * 100.0).round() / 100.0,
                avg_spend_usd: (avg_spend * 100.0).round() / 100.0,
                avg_income_usd: (avg_income * 100.0).round() / 100.0,
                total_items,
                avg_items: (avg_items * 100.0).round() / 100.0,
                avg_age: (rng.gauss(31.0 - 0.12 * age, 1.5) * 10.0).round() / 10.0,
                pct_satisfied: rng.gauss(78.0 + 0.3 * age, 4.0).clamp(0.0, 100.0),
                pct_recommend: rng.gauss(72.0 + 0.35 * age, 5.0).clamp(0.0, 100.0),
                pct_first_time: rng.gauss(32.0 - 0.4 * age, 4.0).clamp(0.0, 100.0),
                top_channel: top_channel.to_string(),
                top_platform: top_platform.to_string(),
                top_category: rng.pick(&CATEGORIES).to_string(),
                top_motivation: rng.pick(&MOTIVATIONS).to_string(),
            });
        }
    }

    let dataset = Dataset::from_rows(rows);
    let indices: Vec<usize> = (0..dataset.len()).collect();

    let output_path = "sample_data.csv";
    let file = std::fs::File::create(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    write_filtered_csv(file, &dataset, &indices).context("writing sample data")?;

    println!(
        "Wrote {} observations ({} countries × 2000–2026) to {output_path}",
        dataset.len(),
        COUNTRIES.len()
    );
    Ok(())
}

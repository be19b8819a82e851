//! Writes `sample_findex.csv`: synthetic respondents shaped like the cleaned
//! Findex export, for running the dashboard without the real microdata.

use anyhow::{Context, Result};

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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// (economy, ISO code, World Bank region, baseline account ownership)
const ECONOMIES: [(&str, &str, &str, f64); 10] = [
    ("Kenya", "KEN", "Sub-Saharan Africa", 0.79),
    ("Nigeria", "NGA", "Sub-Saharan Africa", 0.45),
    ("India", "IND", "South Asia", 0.78),
    ("Bangladesh", "BGD", "South Asia", 0.53),
    ("Brazil", "BRA", "Latin America & Caribbean", 0.84),
    ("Peru", "PER", "Latin America & Caribbean", 0.57),
    ("Indonesia", "IDN", "East Asia & Pacific", 0.52),
    ("Germany", "DEU", "High income", 0.99),
    ("Turkiye", "TUR", "Europe & Central Asia", 0.74),
    ("Egypt, Arab Rep.", "EGY", "Middle East & North Africa", 0.27),
];

const RESPONDENTS_PER_ECONOMY: usize = 300;

fn age_group(age: u64) -> &'static str {
    match age {
        0..=24 => "15-24",
        25..=34 => "25-34",
        35..=44 => "35-44",
        45..=54 => "45-54",
        55..=64 => "55-64",
        _ => "65+",
    }
}

/// 1 = yes, 0 = no.
fn flag(yes: bool) -> &'static str {
    if yes {
        "1"
    } else {
        "0"
    }
}

/// 1 = yes, 2 = no; sometimes not asked.
fn coded(rng: &mut SimpleRng, p_yes: f64, p_missing: f64) -> &'static str {
    if rng.chance(p_missing) {
        ""
    } else if rng.chance(p_yes) {
        "1"
    } else {
        "2"
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_findex.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        "economy",
        "economycode",
        "regionwb",
        "wpid_random",
        "wgt",
        "female",
        "age",
        "age_group",
        "educ",
        "inc_q",
        "account",
        "saved",
        "borrowed",
        "fin14a",
        "fin44a",
        "mobileowner",
        "internetaccess",
        "anydigpayment",
        "year",
    ])?;

    let mut id: u64 = 100_000_000;
    for &(economy, code, region, base) in &ECONOMIES {
        for _ in 0..RESPONDENTS_PER_ECONOMY {
            id += 1 + rng.below(50);
            let female = if rng.chance(0.5) { "1" } else { "2" };
            let age = 15 + rng.below(70);
            let inc_q = 1 + rng.below(5);
            // Richer respondents are more likely to be banked.
            let lift = (inc_q as f64 - 3.0) * 0.05;
            let account = rng.chance((base + lift).clamp(0.02, 0.99));
            let saved = rng.chance(if account { 0.6 } else { 0.3 });
            let borrowed = rng.chance(0.45);
            let digital = account && rng.chance(0.85);
            let id_text = id.to_string();
            let weight = format!("{:.4}", 0.3 + rng.next_f64() * 1.7);
            let age_text = age.to_string();
            let educ = (1 + rng.below(3)).to_string();
            let inc_q_text = inc_q.to_string();
            let paid_online = coded(&mut rng, if digital { 0.4 } else { 0.05 }, 0.1);
            let worried = (1 + rng.below(3)).to_string();
            let mobile = coded(&mut rng, 0.85, 0.0);
            let internet = coded(&mut rng, 0.6, 0.0);

            writer.write_record([
                economy,
                code,
                region,
                id_text.as_str(),
                weight.as_str(),
                female,
                age_text.as_str(),
                age_group(age),
                educ.as_str(),
                inc_q_text.as_str(),
                flag(account),
                flag(saved),
                flag(borrowed),
                paid_online,
                worried.as_str(),
                mobile,
                internet,
                flag(digital),
                "2021",
            ])?;
        }
    }
    writer.flush().context("flushing CSV")?;

    println!(
        "Wrote {} respondents from {} economies to {output_path}",
        ECONOMIES.len() * RESPONDENTS_PER_ECONOMY,
        ECONOMIES.len()
    );
    Ok(())
}

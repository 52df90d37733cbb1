use crate::reference::{is_known_country, EU_MEMBER_STATES};
use crate::util::{random_alphanum_upper, random_upper_letters};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct GeneratorConfig {
    pub count: usize,
    /// Empty means the EU member states.
    pub countries: Vec<String>,
    /// Share of codes carrying a branch segment.
    pub branch_ratio: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 100,
            countries: Vec::new(),
            branch_ratio: 0.7,
        }
    }
}

/// Structurally valid codes with resolvable countries. Same seed, same codes.
pub fn generate_codes(config: &GeneratorConfig, seed: u64) -> Result<Vec<String>, String> {
    if !(0.0..=1.0).contains(&config.branch_ratio) {
        return Err("branch_ratio must be 0..1".to_string());
    }
    let countries: Vec<String> = if config.countries.is_empty() {
        EU_MEMBER_STATES.iter().map(|code| code.to_string()).collect()
    } else {
        config.countries.clone()
    };
    if let Some(unknown) = countries.iter().find(|code| !is_known_country(code)) {
        return Err(format!("unknown country code: {}", unknown));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut codes = Vec::with_capacity(config.count);
    for _ in 0..config.count {
        let country = countries
            .choose(&mut rng)
            .ok_or_else(|| "no countries to generate for".to_string())?;
        codes.push(generate_bic_for_country(&mut rng, country, config.branch_ratio));
    }
    log::debug!(
        "generated {} codes across {} countries (seed {})",
        codes.len(),
        countries.len(),
        seed
    );
    Ok(codes)
}

pub fn generate_bic_for_country<R: Rng + ?Sized>(
    rng: &mut R,
    country: &str,
    branch_ratio: f64,
) -> String {
    let bank = random_upper_letters(rng, 4);
    let location = random_alphanum_upper(rng, 2);
    let branch = if rng.gen_bool(branch_ratio) {
        Some(random_alphanum_upper(rng, 3))
    } else {
        None
    };

    match branch {
        Some(branch) => format!("{}{}{}{}", bank, country, location, branch),
        None => format!("{}{}{}", bank, country, location),
    }
}

use rand::Rng;

pub fn random_alphanum_upper<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    random_from(rng, CHARSET, len)
}

pub fn random_upper_letters<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    random_from(rng, CHARSET, len)
}

fn random_from<R: Rng + ?Sized>(rng: &mut R, charset: &[u8], len: usize) -> String {
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        let idx = rng.gen_range(0..charset.len());
        out.push(char::from(charset[idx]));
    }
    out
}

/// Splits a comma separated list of country codes, uppercased and deduplicated.
pub fn parse_country_list(input: &str) -> Result<Vec<String>, String> {
    let mut countries: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let code = trimmed.to_uppercase();
        if code.len() != 2 || !code.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Err(format!("invalid country code in list: {}", trimmed));
        }
        if !countries.contains(&code) {
            countries.push(code);
        }
    }
    Ok(countries)
}

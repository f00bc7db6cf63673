use rand::Rng;

const ADJECTIVES: [&str; 5] = ["Swift", "Clever", "Bold", "Calm", "Eager"];
const NOUNS: [&str; 5] = ["Coder", "Dev", "Hacker", "Builder", "Creator"];

pub fn generate_display_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.gen_range(0..NOUNS.len())];
    format!("{}{}", adjective, noun)
}

/// Uses the requested name unless it is missing or empty.
pub fn resolve_display_name<R: Rng + ?Sized>(rng: &mut R, requested: Option<String>) -> String {
    match requested {
        Some(name) if !name.is_empty() => name,
        _ => generate_display_name(rng),
    }
}

use rand::seq::SliceRandom;
use rand::Rng;

pub const USER_COLORS: [&str; 10] = [
    "#22d3ee", "#a78bfa", "#f472b6", "#fbbf24", "#34d399", "#fb7185", "#60a5fa", "#c084fc",
    "#4ade80", "#f97316",
];

/// Picks a palette color not in `in_use`, uniformly at random.
/// Falls back to the first palette color once every color is taken, so
/// colors may repeat past the palette size.
pub fn pick_color<R: Rng + ?Sized>(rng: &mut R, in_use: &[&str]) -> &'static str {
    let available = USER_COLORS
        .iter()
        .copied()
        .filter(|color| !in_use.contains(color))
        .collect::<Vec<_>>();
    available.choose(rng).copied().unwrap_or(USER_COLORS[0])
}

pub fn is_hex_color(color: &str) -> bool {
    let bytes = color.as_bytes();
    bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn it_should_prefer_unused_colors() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut in_use: Vec<&str> = Vec::new();
        for _ in 0..USER_COLORS.len() {
            let color = pick_color(&mut rng, &in_use);
            assert!(!in_use.contains(&color));
            in_use.push(color);
        }
    }

    #[test]
    fn it_should_fall_back_to_first_color_when_palette_is_exhausted() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_color(&mut rng, &USER_COLORS), USER_COLORS[0]);
    }

    #[test]
    fn palette_is_hex_rgb() {
        assert!(USER_COLORS.iter().all(|c| is_hex_color(c)));
        assert!(!is_hex_color("#12345"));
        assert!(!is_hex_color("1234567"));
    }
}

use crate::Coords;
use crate::config::FOOD_POINTS;
use rand::Rng;
use rand::seq::SliceRandom;
use std::env;

const FOOD_GLYPHS: [char; 15] = [
    '🍒', '🍍', '🍑', '🍇', '🍏', '🍌', '🍫', '🍭', '🍕', '🍩', '🍗', '🍖', '🍬', '🍤', '🍪',
];
const FALLBACK_GLYPH: char = '@';

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Food {
    pos: Coords,
    points: u32,
    glyph: char,
}

impl Food {
    pub fn place<R: Rng + ?Sized>(pos: Coords, rng: &mut R) -> Self {
        Food { pos, points: FOOD_POINTS, glyph: pick_glyph(has_unicode_support(), rng) }
    }

    pub fn pos(&self) -> Coords {
        self.pos
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }
}

fn pick_glyph<R: Rng + ?Sized>(unicode: bool, rng: &mut R) -> char {
    if !unicode {
        return FALLBACK_GLYPH;
    }

    FOOD_GLYPHS.choose(rng).copied().unwrap_or(FALLBACK_GLYPH)
}

/// Looks at the locale the same way libc does: the first of LC_ALL,
/// LC_CTYPE and LANG that is set wins.
fn has_unicode_support() -> bool {
    let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.is_empty());

    locale.map_or(false, |value| names_utf8(&value))
}

fn names_utf8(locale: &str) -> bool {
    let locale = locale.to_ascii_lowercase();
    locale.contains("utf-8") || locale.contains("utf8")
}

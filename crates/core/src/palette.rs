//! Palette module - colour sets and the sources that colour new blocks
//!
//! A grid never picks colours itself. It asks a [`ColourSource`] for one colour per
//! cell, so tests can script exact layouts and the game can seed a deterministic RNG.
//!
//! Also provides a simple LCG for deterministic colour draws.

use block_grid_types::{Colour, DEFAULT_PALETTE};

use crate::error::GridError;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state (for restarting with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// A non-empty, ordered set of distinct playable colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colours: Vec<Colour>,
}

impl Palette {
    /// Build a palette, rejecting empty sets, repeats and the cleared sentinel.
    pub fn new(colours: Vec<Colour>) -> Result<Self, GridError> {
        if colours.is_empty() {
            return Err(GridError::InvalidPalette("palette is empty".into()));
        }
        if colours.iter().any(Colour::is_cleared) {
            return Err(GridError::InvalidPalette(
                "the cleared sentinel cannot be a palette colour".into(),
            ));
        }
        for (i, c) in colours.iter().enumerate() {
            if colours[..i].contains(c) {
                return Err(GridError::InvalidPalette(format!(
                    "colour {} listed twice",
                    c.as_str()
                )));
            }
        }
        Ok(Self { colours })
    }

    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    pub fn contains(&self, colour: Colour) -> bool {
        self.colours.contains(&colour)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colours: DEFAULT_PALETTE.to_vec(),
        }
    }
}

/// Supplies the palette and the colour of every new block.
pub trait ColourSource {
    fn palette(&self) -> &Palette;

    /// Colour for the next block created. Must be a member of [`ColourSource::palette`].
    fn next_colour(&mut self) -> Colour;
}

/// Uniform random colours from a palette
#[derive(Debug, Clone)]
pub struct RandomColours {
    palette: Palette,
    rng: SimpleRng,
}

impl RandomColours {
    pub fn new(palette: Palette, seed: u32) -> Self {
        Self {
            palette,
            rng: SimpleRng::new(seed),
        }
    }

    /// Default four-colour palette with the given seed
    pub fn with_seed(seed: u32) -> Self {
        Self::new(Palette::default(), seed)
    }

    /// Get the current RNG state
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl ColourSource for RandomColours {
    fn palette(&self) -> &Palette {
        &self.palette
    }

    fn next_colour(&mut self) -> Colour {
        let i = self.rng.next_range(self.palette.len() as u32) as usize;
        self.palette.colours()[i]
    }
}

/// Replays a fixed colour sequence, cycling when it runs out.
///
/// Every scripted colour must belong to the palette.
#[derive(Debug, Clone)]
pub struct ScriptedColours {
    palette: Palette,
    script: Vec<Colour>,
    pos: usize,
}

impl ScriptedColours {
    pub fn new(palette: Palette, script: Vec<Colour>) -> Result<Self, GridError> {
        if script.is_empty() {
            return Err(GridError::InvalidArgument("colour script is empty".into()));
        }
        if let Some(c) = script.iter().find(|c| !palette.contains(**c)) {
            return Err(GridError::InvalidArgument(format!(
                "scripted colour {} is not in the palette",
                c.as_str()
            )));
        }
        Ok(Self {
            palette,
            script,
            pos: 0,
        })
    }

    /// Every block gets the same colour.
    pub fn uniform(colour: Colour) -> Result<Self, GridError> {
        Self::new(Palette::new(vec![colour])?, vec![colour])
    }
}

impl ColourSource for ScriptedColours {
    fn palette(&self) -> &Palette {
        &self.palette
    }

    fn next_colour(&mut self) -> Colour {
        let c = self.script[self.pos % self.script.len()];
        self.pos += 1;
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_not_stuck() {
        let mut rng = SimpleRng::new(0);
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, b);
    }

    #[test]
    fn test_next_range_stays_in_range() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(4) < 4);
        }
    }

    #[test]
    fn test_random_colours_cover_palette() {
        let mut source = RandomColours::with_seed(99);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let c = source.next_colour();
            let i = DEFAULT_PALETTE.iter().position(|p| *p == c).unwrap();
            seen[i] = true;
        }
        assert!(seen.iter().all(|s| *s), "all four colours should appear: {:?}", seen);
    }

    #[test]
    fn test_palette_rejects_bad_sets() {
        assert!(Palette::new(vec![]).is_err());
        assert!(Palette::new(vec![Colour::Red, Colour::Cleared]).is_err());
        assert!(Palette::new(vec![Colour::Red, Colour::Red]).is_err());
        assert!(Palette::new(vec![Colour::Cyan, Colour::Orange]).is_ok());
    }

    #[test]
    fn test_scripted_colours_cycle() {
        let palette = Palette::default();
        let mut source =
            ScriptedColours::new(palette, vec![Colour::Blue, Colour::Red]).unwrap();
        let drawn: Vec<_> = (0..5).map(|_| source.next_colour()).collect();
        assert_eq!(
            drawn,
            vec![
                Colour::Blue,
                Colour::Red,
                Colour::Blue,
                Colour::Red,
                Colour::Blue
            ]
        );
    }

    #[test]
    fn test_scripted_colours_must_be_in_palette() {
        let palette = Palette::new(vec![Colour::Red]).unwrap();
        assert!(ScriptedColours::new(palette, vec![Colour::Blue]).is_err());
    }
}

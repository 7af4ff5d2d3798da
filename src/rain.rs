use crate::{
    config::{EffectConfig, ResizePolicy},
    random::RandomSource,
    theme::RainPalette,
};

pub const RAIN_GLYPHS: &[char] = &[
    '0', '1', '<', '/', '>', '{', '}', '[', ']', '(', ')', ';', '=', '+', '-', '*', '&', '|', '!',
    '@', '#', '$', '%', '^',
];
pub const RAIN_FONT: &str = "15px monospace";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    pub glyph: char,
    pub x: f64,
    pub y: f64,
}

/// Everything one tick paints: a translucent wash over the whole canvas,
/// then one glyph per column.
#[derive(Clone, Debug, PartialEq)]
pub struct RainFrame {
    pub width: u32,
    pub height: u32,
    pub palette: RainPalette,
    pub glyphs: Vec<Glyph>,
}

#[derive(Clone, Debug)]
pub struct RainField {
    width: u32,
    height: u32,
    cell: u32,
    reset_probability: f64,
    policy: ResizePolicy,
    rows: Vec<u32>,
}

impl RainField {
    pub fn new(width: u32, height: u32, config: &EffectConfig) -> Self {
        let cell = config.rain_column_width.max(1);
        Self {
            width,
            height,
            cell,
            reset_probability: config.rain_reset_probability,
            policy: config.rain_resize,
            rows: vec![1; (width / cell) as usize],
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn column_count(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        if self.policy == ResizePolicy::Reflow {
            self.rows.resize((width / self.cell) as usize, 1);
        }
    }

    pub fn tick(&mut self, palette: RainPalette, rng: &mut impl RandomSource) -> RainFrame {
        let cell = f64::from(self.cell);
        let mut glyphs = Vec::with_capacity(self.rows.len());

        for (index, row) in self.rows.iter_mut().enumerate() {
            glyphs.push(Glyph {
                glyph: RAIN_GLYPHS[rng.below(RAIN_GLYPHS.len())],
                x: index as f64 * cell,
                y: f64::from(*row) * cell,
            });

            if u64::from(*row) * u64::from(self.cell) > u64::from(self.height)
                && rng.unit() < self.reset_probability
            {
                *row = 0;
            }
            *row = row.saturating_add(1);
        }

        RainFrame {
            width: self.width,
            height: self.height,
            palette,
            glyphs,
        }
    }
}

use crate::{ease::Ease, random::RandomSource};

/// Fraction of the viewport height a `.fade-in` element's top must reach.
pub const FADE_TRIGGER_LINE: f64 = 0.8;
/// Fraction of the viewport height a `.stagger-container` top must reach.
pub const STAGGER_TRIGGER_LINE: f64 = 0.7;

const FADE_OFFSET_PX: f64 = 50.0;
const FADE_DURATION_MS: f64 = 1_000.0;
const STAGGER_OFFSET_PX: f64 = 30.0;
const STAGGER_DURATION_MS: f64 = 800.0;
const STAGGER_STEP_MS: f64 = 150.0;
const HERO_OFFSET_PX: f64 = 100.0;
const HERO_DURATION_MS: f64 = 1_200.0;
const FLOAT_RANGE_PX: f64 = 20.0;
const FLOAT_DURATION_MS: (f64, f64) = (3_000.0, 5_000.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub opacity: f64,
    pub x: f64,
    pub y: f64,
}

impl Pose {
    pub const REST: Self = Self {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
    };

    fn entering(offset_y: f64, eased: f64) -> Self {
        Self {
            opacity: eased,
            x: 0.0,
            y: offset_y * (1.0 - eased),
        }
    }

    pub fn opacity(&self) -> String {
        format!("{:.3}", self.opacity)
    }

    pub fn transform(&self) -> String {
        format!("translate({:.2}px, {:.2}px)", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug)]
struct Playhead {
    anchor_ms: f64,
    anchor_progress: f64,
    forward: bool,
    duration_ms: f64,
}

impl Playhead {
    fn idle(duration_ms: f64) -> Self {
        Self {
            anchor_ms: 0.0,
            anchor_progress: 0.0,
            forward: false,
            duration_ms,
        }
    }

    fn progress(&self, now_ms: f64) -> f64 {
        let delta = (now_ms - self.anchor_ms).max(0.0) / self.duration_ms;
        let progress = if self.forward {
            self.anchor_progress + delta
        } else {
            self.anchor_progress - delta
        };
        progress.clamp(0.0, 1.0)
    }

    fn play(&mut self, forward: bool, now_ms: f64) {
        if self.forward == forward {
            return;
        }
        self.anchor_progress = self.progress(now_ms);
        self.anchor_ms = now_ms;
        self.forward = forward;
    }
}

#[derive(Clone, Debug)]
struct FadeTrigger {
    playhead: Playhead,
}

#[derive(Clone, Debug)]
struct StaggerGroup {
    items: usize,
    started_ms: Option<f64>,
}

#[derive(Clone, Debug)]
struct FloatDrift {
    x: f64,
    y: f64,
    duration_ms: f64,
    started_ms: f64,
}

#[derive(Clone, Debug)]
pub struct ScrollReveal {
    hero_started_ms: Option<f64>,
    fades: Vec<FadeTrigger>,
    groups: Vec<StaggerGroup>,
    floats: Vec<FloatDrift>,
    disposed: bool,
}

impl Default for ScrollReveal {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollReveal {
    pub fn new() -> Self {
        Self {
            hero_started_ms: None,
            fades: Vec::new(),
            groups: Vec::new(),
            floats: Vec::new(),
            disposed: false,
        }
    }

    pub fn start_hero(&mut self, now_ms: f64) {
        if !self.disposed {
            self.hero_started_ms = Some(now_ms);
        }
    }

    pub fn add_fade(&mut self) -> usize {
        self.fades.push(FadeTrigger {
            playhead: Playhead::idle(FADE_DURATION_MS),
        });
        self.fades.len() - 1
    }

    pub fn add_stagger_group(&mut self, items: usize) -> usize {
        self.groups.push(StaggerGroup {
            items,
            started_ms: None,
        });
        self.groups.len() - 1
    }

    pub fn add_float(&mut self, rng: &mut impl RandomSource, now_ms: f64) -> usize {
        self.floats.push(FloatDrift {
            x: rng.between(-FLOAT_RANGE_PX, FLOAT_RANGE_PX),
            y: rng.between(-FLOAT_RANGE_PX, FLOAT_RANGE_PX),
            duration_ms: rng.between(FLOAT_DURATION_MS.0, FLOAT_DURATION_MS.1),
            started_ms: now_ms,
        });
        self.floats.len() - 1
    }

    pub fn trigger_count(&self) -> usize {
        self.fades.len() + self.groups.len()
    }

    #[cfg(test)]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
        self.hero_started_ms = None;
        self.fades.clear();
        self.groups.clear();
        self.floats.clear();
    }

    pub fn update_fade(&mut self, id: usize, top: f64, viewport_height: f64, now_ms: f64) {
        if let Some(fade) = self.fades.get_mut(id) {
            let entered = top <= viewport_height * FADE_TRIGGER_LINE;
            fade.playhead.play(entered, now_ms);
        }
    }

    pub fn update_group(&mut self, id: usize, top: f64, viewport_height: f64, now_ms: f64) {
        if let Some(group) = self.groups.get_mut(id) {
            if group.started_ms.is_none() && top <= viewport_height * STAGGER_TRIGGER_LINE {
                group.started_ms = Some(now_ms);
            }
        }
    }

    pub fn hero_pose(&self, now_ms: f64) -> Pose {
        let Some(started) = self.hero_started_ms else {
            return Pose::REST;
        };
        let progress = ((now_ms - started) / HERO_DURATION_MS).clamp(0.0, 1.0);
        Pose::entering(HERO_OFFSET_PX, Ease::Power4Out.apply(progress))
    }

    pub fn fade_pose(&self, id: usize, now_ms: f64) -> Pose {
        match self.fades.get(id) {
            Some(fade) => Pose::entering(
                FADE_OFFSET_PX,
                Ease::Power3Out.apply(fade.playhead.progress(now_ms)),
            ),
            None => Pose::REST,
        }
    }

    pub fn group_item_pose(&self, id: usize, item: usize, now_ms: f64) -> Pose {
        let Some(group) = self.groups.get(id).filter(|group| item < group.items) else {
            return Pose::REST;
        };
        let Some(started) = group.started_ms else {
            return Pose::entering(STAGGER_OFFSET_PX, 0.0);
        };

        let delay = item as f64 * STAGGER_STEP_MS;
        let progress = ((now_ms - started - delay) / STAGGER_DURATION_MS).clamp(0.0, 1.0);
        Pose::entering(STAGGER_OFFSET_PX, Ease::Power3Out.apply(progress))
    }

    pub fn float_pose(&self, id: usize, now_ms: f64) -> Pose {
        let Some(drift) = self.floats.get(id) else {
            return Pose::REST;
        };

        let elapsed = (now_ms - drift.started_ms).max(0.0);
        let leg = (elapsed / drift.duration_ms).floor();
        let local = elapsed / drift.duration_ms - leg;
        let progress = if leg as u64 % 2 == 0 { local } else { 1.0 - local };
        let eased = Ease::SineInOut.apply(progress);

        Pose {
            opacity: 1.0,
            x: drift.x * eased,
            y: drift.y * eased,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::tests::Scripted;

    const VIEWPORT: f64 = 1_000.0;

    #[test]
    fn fade_waits_for_the_trigger_line() {
        let mut reveal = ScrollReveal::new();
        let id = reveal.add_fade();

        reveal.update_fade(id, 900.0, VIEWPORT, 0.0);
        assert_eq!(reveal.fade_pose(id, 500.0).opacity, 0.0);
        assert_eq!(reveal.fade_pose(id, 500.0).y, FADE_OFFSET_PX);

        reveal.update_fade(id, 800.0, VIEWPORT, 500.0);
        assert!(reveal.fade_pose(id, 700.0).opacity > 0.0);
        assert_eq!(reveal.fade_pose(id, 1_500.0), Pose::REST);
    }

    #[test]
    fn fade_reverses_from_where_it_is() {
        let mut reveal = ScrollReveal::new();
        let id = reveal.add_fade();

        reveal.update_fade(id, 100.0, VIEWPORT, 0.0);
        let halfway = reveal.fade_pose(id, 500.0);

        reveal.update_fade(id, 950.0, VIEWPORT, 500.0);
        assert_eq!(reveal.fade_pose(id, 500.0), halfway);
        assert!(reveal.fade_pose(id, 750.0).opacity < halfway.opacity);
        assert_eq!(reveal.fade_pose(id, 1_000.0).opacity, 0.0);
    }

    #[test]
    fn stagger_group_plays_once_with_per_item_delay() {
        let mut reveal = ScrollReveal::new();
        let id = reveal.add_stagger_group(3);

        reveal.update_group(id, 750.0, VIEWPORT, 0.0);
        assert_eq!(reveal.group_item_pose(id, 0, 100.0).opacity, 0.0);

        reveal.update_group(id, 700.0, VIEWPORT, 1_000.0);
        let first = reveal.group_item_pose(id, 0, 1_100.0);
        let last = reveal.group_item_pose(id, 2, 1_100.0);
        assert!(first.opacity > 0.0);
        assert_eq!(last.opacity, 0.0);

        // Scrolling back up does not hide the group again.
        reveal.update_group(id, 990.0, VIEWPORT, 3_000.0);
        assert_eq!(reveal.group_item_pose(id, 2, 3_000.0), Pose::REST);
    }

    #[test]
    fn hero_enters_from_below() {
        let mut reveal = ScrollReveal::new();
        reveal.start_hero(0.0);

        let start = reveal.hero_pose(0.0);
        assert_eq!(start.opacity, 0.0);
        assert_eq!(start.y, HERO_OFFSET_PX);
        assert_eq!(reveal.hero_pose(1_200.0), Pose::REST);
    }

    #[test]
    fn float_swings_out_and_back() {
        let mut reveal = ScrollReveal::new();
        // x = 20, y = -20, duration = 4s
        let id = reveal.add_float(&mut Scripted::new(vec![1.0, 0.0, 0.5]), 0.0);

        assert_eq!(reveal.float_pose(id, 0.0).x, 0.0);
        let out = reveal.float_pose(id, 4_000.0);
        assert!((out.x - 20.0).abs() < 1e-9);
        assert!((out.y + 20.0).abs() < 1e-9);
        assert!(reveal.float_pose(id, 8_000.0).x.abs() < 1e-9);
    }

    #[test]
    fn dispose_kills_every_trigger() {
        let mut reveal = ScrollReveal::new();
        let fade = reveal.add_fade();
        let group = reveal.add_stagger_group(2);
        reveal.start_hero(0.0);
        assert_eq!(reveal.trigger_count(), 2);

        reveal.dispose();
        reveal.update_fade(fade, 0.0, VIEWPORT, 10.0);
        reveal.update_group(group, 0.0, VIEWPORT, 10.0);

        assert!(reveal.is_disposed());
        assert_eq!(reveal.trigger_count(), 0);
        assert_eq!(reveal.fade_pose(fade, 5_000.0), Pose::REST);
        assert_eq!(reveal.hero_pose(0.0), Pose::REST);
    }

    #[test]
    fn pose_renders_style_values() {
        let pose = Pose {
            opacity: 0.5,
            x: 1.0,
            y: -2.5,
        };
        assert_eq!(pose.opacity(), "0.500");
        assert_eq!(pose.transform(), "translate(1.00px, -2.50px)");
    }
}

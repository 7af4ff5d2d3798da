use serde_json::json;

use crate::{
    config::EffectConfig,
    cursor::PointerFollower,
    lifecycle::{Liveness, Teardown},
    logging::Logger,
    rain::{RainField, RainFrame},
    reveal::{Pose, ScrollReveal},
    sections::{SectionId, SectionTracker, Visibility},
    theme::{ThemeController, ThemeMode, ThemeSink},
    typing::{TypingEffect, TypingStep, TERMINAL_COMMAND},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub theme: ThemeMode,
    pub active_section: SectionId,
    pub typed: &'static str,
    pub menu_open: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ScrollSample {
    pub viewport_height: f64,
    pub fade_tops: Vec<f64>,
    pub group_tops: Vec<f64>,
}

/// Owns every effect of the page for one mount.
pub struct Coordinator<S: ThemeSink> {
    config: EffectConfig,
    logger: Logger,
    theme: ThemeController<S>,
    tracker: SectionTracker,
    typing: TypingEffect,
    rain: Option<RainField>,
    cursor: PointerFollower,
    reveal: ScrollReveal,
    rng: fastrand::Rng,
    menu_open: bool,
    teardown: Teardown,
}

impl<S: ThemeSink> Coordinator<S> {
    pub fn mount(
        config: EffectConfig,
        sink: S,
        viewport: Option<(u32, u32)>,
        rng: fastrand::Rng,
        now_ms: f64,
    ) -> Self {
        let logger = Logger::new(config.log_level);
        logger.info(
            "effects_configured",
            serde_json::to_value(&config).unwrap_or_default(),
        );

        let rain = viewport.map(|(width, height)| RainField::new(width, height, &config));
        if let Some(field) = &rain {
            logger.debug("rain_laid_out", json!({ "columns": field.column_count() }));
        }

        let mut reveal = ScrollReveal::new();
        reveal.start_hero(now_ms);

        Self {
            tracker: SectionTracker::new(config.section_threshold),
            typing: TypingEffect::new(TERMINAL_COMMAND),
            cursor: PointerFollower::new(config.cursor_follow_ms),
            theme: ThemeController::mount(sink),
            config,
            logger,
            rain,
            reveal,
            rng,
            menu_open: false,
            teardown: Teardown::new(),
        }
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn logger(&self) -> Logger {
        self.logger
    }

    pub fn liveness(&self) -> Liveness {
        self.teardown.liveness()
    }

    pub fn is_alive(&self) -> bool {
        self.teardown.liveness().is_alive()
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            theme: self.theme.mode(),
            active_section: self.tracker.active(),
            typed: self.typing.text(),
            menu_open: self.menu_open,
        }
    }

    pub fn defer(&mut self, label: &'static str, hook: impl FnOnce() + 'static) {
        if self.is_alive() {
            self.teardown.defer(label, hook);
        } else {
            hook();
        }
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        if !self.is_alive() {
            return self.theme.mode();
        }
        let next = self.theme.toggle();
        self.logger.info("theme_changed", json!({ "theme": next }));
        next
    }

    pub fn toggle_menu(&mut self) {
        if self.is_alive() {
            self.menu_open = !self.menu_open;
        }
    }

    pub fn close_menu(&mut self) {
        if self.is_alive() {
            self.menu_open = false;
        }
    }

    pub fn typing_tick(&mut self) -> TypingStep {
        if !self.is_alive() {
            return TypingStep::Finished;
        }
        let step = self.typing.tick();
        if step == TypingStep::Finished {
            self.logger.debug("effect_finished", json!({ "effect": "typing" }));
        }
        step
    }

    pub fn observe_sections(&mut self, entries: &[Visibility<'_>]) -> Option<SectionId> {
        if !self.is_alive() {
            return None;
        }
        let changed = self.tracker.observe(entries);
        if let Some(section) = changed {
            self.logger.debug("section_changed", json!({ "section": section }));
        }
        changed
    }

    pub fn rain_tick(&mut self) -> Option<RainFrame> {
        if !self.is_alive() {
            return None;
        }
        let palette = self.theme.mode().rain_palette();
        let rng = &mut self.rng;
        self.rain.as_mut().map(|field| field.tick(palette, rng))
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.is_alive() {
            return;
        }
        if let Some(field) = self.rain.as_mut() {
            field.resize(width, height);
        }
    }

    pub fn rain(&self) -> Option<&RainField> {
        self.rain.as_ref()
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64, now_ms: f64) {
        if self.is_alive() {
            self.cursor.pointer_moved(x, y, now_ms);
        }
    }

    pub fn cursor_position(&self, now_ms: f64) -> (f64, f64) {
        self.cursor.position(now_ms)
    }

    pub fn register_reveals(&mut self, fades: usize, groups: &[usize], floats: usize, now_ms: f64) {
        if !self.is_alive() {
            return;
        }
        for _ in 0..fades {
            self.reveal.add_fade();
        }
        for items in groups {
            self.reveal.add_stagger_group(*items);
        }
        for _ in 0..floats {
            self.reveal.add_float(&mut self.rng, now_ms);
        }
        self.logger.debug(
            "effect_started",
            json!({ "effect": "scroll_reveal", "triggers": self.reveal.trigger_count(), "floats": floats }),
        );
    }

    pub fn scroll(&mut self, sample: &ScrollSample, now_ms: f64) {
        if !self.is_alive() {
            return;
        }
        for (id, top) in sample.fade_tops.iter().enumerate() {
            let natural_top = top - self.reveal.fade_pose(id, now_ms).y;
            self.reveal.update_fade(id, natural_top, sample.viewport_height, now_ms);
        }
        for (id, top) in sample.group_tops.iter().enumerate() {
            self.reveal.update_group(id, *top, sample.viewport_height, now_ms);
        }
    }

    pub fn reveal(&self) -> &ScrollReveal {
        &self.reveal
    }

    pub fn hero_pose(&self, now_ms: f64) -> Pose {
        self.reveal.hero_pose(now_ms)
    }

    pub fn unmount(&mut self) {
        if !self.is_alive() {
            return;
        }
        let cancelled = self.teardown.run();
        self.reveal.dispose();
        self.logger.info("effects_disposed", json!({ "cancelled": cancelled }));
    }
}

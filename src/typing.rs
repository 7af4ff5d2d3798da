pub const TERMINAL_COMMAND: &str = "npm run build-amazing-things";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingStep {
    Advanced,
    /// The text was already complete; the interval should be cancelled.
    Finished,
}

#[derive(Clone, Debug)]
pub struct TypingEffect {
    target: &'static str,
    revealed_chars: usize,
    finished: bool,
}

impl TypingEffect {
    pub fn new(target: &'static str) -> Self {
        Self {
            target,
            revealed_chars: 0,
            finished: false,
        }
    }

    pub fn text(&self) -> &'static str {
        let end = self
            .target
            .char_indices()
            .nth(self.revealed_chars)
            .map(|(index, _)| index)
            .unwrap_or(self.target.len());
        &self.target[..end]
    }

    #[cfg(test)]
    pub fn revealed_chars(&self) -> usize {
        self.revealed_chars
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn tick(&mut self) -> TypingStep {
        if self.finished || self.revealed_chars >= self.target.chars().count() {
            self.finished = true;
            return TypingStep::Finished;
        }

        self.revealed_chars += 1;
        TypingStep::Advanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fifteen_ticks_reveal_fifteen_characters() {
        let mut typing = TypingEffect::new(TERMINAL_COMMAND);
        for _ in 0..15 {
            assert_eq!(typing.tick(), TypingStep::Advanced);
        }

        assert_eq!(typing.text(), "npm run build-a");
        assert_eq!(typing.text().len(), 15);
    }

    #[test]
    fn tick_after_completion_finishes_and_freezes() {
        let mut typing = TypingEffect::new("abc");
        for _ in 0..3 {
            typing.tick();
        }
        assert_eq!(typing.text(), "abc");
        assert!(!typing.is_finished());

        assert_eq!(typing.tick(), TypingStep::Finished);
        assert_eq!(typing.tick(), TypingStep::Finished);
        assert_eq!(typing.text(), "abc");
        assert!(typing.is_finished());
    }

    #[test]
    fn multibyte_targets_split_on_char_boundaries() {
        let mut typing = TypingEffect::new("é→x");
        typing.tick();
        typing.tick();
        assert_eq!(typing.text(), "é→");
    }

    proptest! {
        #[test]
        fn text_is_growing_prefix_reaching_full_once(ticks in 0usize..64) {
            let mut typing = TypingEffect::new(TERMINAL_COMMAND);
            let mut previous = 0;
            let mut completions = 0;

            for _ in 0..ticks {
                let was_complete = typing.text() == TERMINAL_COMMAND;
                typing.tick();
                let text = typing.text();

                prop_assert!(TERMINAL_COMMAND.starts_with(text));
                prop_assert!(text.len() >= previous);
                if !was_complete && text == TERMINAL_COMMAND {
                    completions += 1;
                }
                previous = text.len();
            }

            prop_assert!(completions <= 1);
            prop_assert_eq!(typing.text().len(), ticks.min(TERMINAL_COMMAND.len()));
        }
    }
}

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    #[default]
    Home,
    About,
    Projects,
    Skills,
    Contact,
}

pub const NAV_SECTIONS: [SectionId; 4] = [
    SectionId::About,
    SectionId::Projects,
    SectionId::Skills,
    SectionId::Contact,
];

impl SectionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Contact => "contact",
        }
    }

    pub fn anchor(self) -> String {
        format!("#{}", self.as_str())
    }

    pub fn from_element_id(value: &str) -> Option<Self> {
        match value.trim() {
            "" | "home" => Some(Self::Home),
            "about" => Some(Self::About),
            "projects" => Some(Self::Projects),
            "skills" => Some(Self::Skills),
            "contact" => Some(Self::Contact),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Visibility<'a> {
    pub element_id: &'a str,
    pub is_intersecting: bool,
    pub ratio: f64,
}

// Browsers may report a threshold crossing a hair under the threshold.
const RATIO_TOLERANCE: f64 = 1e-3;

pub struct SectionTracker {
    active: SectionId,
    threshold: f64,
}

impl SectionTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            active: SectionId::Home,
            threshold,
        }
    }

    pub fn active(&self) -> SectionId {
        self.active
    }

    pub fn observe(&mut self, entries: &[Visibility<'_>]) -> Option<SectionId> {
        let before = self.active;

        for entry in entries {
            if !entry.is_intersecting || entry.ratio + RATIO_TOLERANCE < self.threshold {
                continue;
            }

            if let Some(section) = SectionId::from_element_id(entry.element_id) {
                self.active = section;
            }
        }

        (self.active != before).then_some(self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn visible(element_id: &str, ratio: f64) -> Visibility<'_> {
        Visibility {
            element_id,
            is_intersecting: true,
            ratio,
        }
    }

    #[test]
    fn projects_crossing_threshold_becomes_active() {
        let mut tracker = SectionTracker::new(0.3);
        tracker.observe(&[visible("skills", 0.9)]);

        assert_eq!(tracker.observe(&[visible("projects", 0.3)]), Some(SectionId::Projects));
        assert_eq!(tracker.active(), SectionId::Projects);
    }

    #[test]
    fn below_threshold_and_leaving_entries_are_ignored() {
        let mut tracker = SectionTracker::new(0.3);
        let leaving = Visibility {
            element_id: "about",
            is_intersecting: false,
            ratio: 0.0,
        };

        assert_eq!(tracker.observe(&[visible("contact", 0.29), leaving]), None);
        assert_eq!(tracker.active(), SectionId::Home);
    }

    #[test]
    fn crossing_reported_just_under_threshold_counts() {
        let mut tracker = SectionTracker::new(0.3);

        assert_eq!(
            tracker.observe(&[visible("skills", 0.299_999_9)]),
            Some(SectionId::Skills)
        );
    }

    #[test]
    fn last_entry_in_batch_wins() {
        let mut tracker = SectionTracker::new(0.3);
        tracker.observe(&[visible("about", 0.8), visible("skills", 0.4)]);
        assert_eq!(tracker.active(), SectionId::Skills);
    }

    #[test]
    fn empty_id_falls_back_to_home_and_unknown_is_dropped() {
        let mut tracker = SectionTracker::new(0.3);
        tracker.observe(&[visible("about", 1.0)]);

        tracker.observe(&[visible("", 1.0)]);
        assert_eq!(tracker.active(), SectionId::Home);

        assert_eq!(tracker.observe(&[visible("footer", 1.0)]), None);
        assert_eq!(tracker.active(), SectionId::Home);
    }

    #[test]
    fn nav_anchors_match_ids() {
        let anchors: Vec<String> = NAV_SECTIONS.iter().map(|section| section.anchor()).collect();
        assert_eq!(anchors, ["#about", "#projects", "#skills", "#contact"]);
    }

    proptest! {
        #[test]
        fn active_section_is_always_known(
            batches in proptest::collection::vec(
                proptest::collection::vec(("[a-z]{0,9}", 0.0f64..=1.0, any::<bool>()), 0..5),
                0..10,
            )
        ) {
            let mut tracker = SectionTracker::new(0.3);
            for batch in &batches {
                let entries: Vec<Visibility<'_>> = batch
                    .iter()
                    .map(|(id, ratio, is_intersecting)| Visibility {
                        element_id: id.as_str(),
                        is_intersecting: *is_intersecting,
                        ratio: *ratio,
                    })
                    .collect();
                tracker.observe(&entries);

                let active = tracker.active();
                prop_assert_eq!(SectionId::from_element_id(active.as_str()), Some(active));
            }
        }
    }
}

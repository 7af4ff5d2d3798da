#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectEntry {
    pub title: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
    pub live: &'static str,
    pub source: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillEntry {
    pub name: &'static str,
    pub icon: &'static str,
    pub level: u8,
    pub color: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
}

pub const OWNER_FIRST_NAME: &str = "Omar";
pub const OWNER_LAST_NAME: &str = "Abir";
pub const OWNER_ROLE: &str = "MERN Stack Developer";

pub const PROJECTS: &[ProjectEntry] = &[
    ProjectEntry {
        title: "SkillSwap Learning App",
        description: "A platform where users exchange skills: real-time updates, booking flow, and dynamic filters.",
        tech: &["React", "Firebase", "Tailwind"],
        live: "https://skilswapp.netlify.app/",
        source: "https://github.com/omarabir/SkillSwap",
        color: "#3B82F6",
        icon: "🚀",
    },
    ProjectEntry {
        title: "PawMart - Your Pet's Paradise",
        description: "PawMart is an online pet marketplace where users can discover, buy, and adopt everything related to pets in one place.",
        tech: &["React", "Firebase", "Tailwind"],
        live: "https://pawmart2.netlify.app/",
        source: "https://github.com/omarabir/PawMart-client-site",
        color: "#F97316",
        icon: "🌐",
    },
];

pub const SKILLS: &[SkillEntry] = &[
    SkillEntry { name: "JavaScript", icon: "📄", level: 90, color: "#F7DF1E" },
    SkillEntry { name: "React", icon: "{}", level: 85, color: "#61DAFB" },
    SkillEntry { name: "Node.js", icon: ">_", level: 80, color: "#339933" },
    SkillEntry { name: "MongoDB", icon: "🗄", level: 75, color: "#47A248" },
    SkillEntry { name: "Express", icon: "⚡", level: 80, color: "#000000" },
    SkillEntry { name: "HTML/CSS", icon: "</>", level: 95, color: "#E34F26" },
    SkillEntry { name: "Tailwind", icon: "▣", level: 90, color: "#06B6D4" },
    SkillEntry { name: "Git", icon: "⎇", level: 85, color: "#F05032" },
    SkillEntry { name: "REST APIs", icon: "🌐", level: 80, color: "#009688" },
    SkillEntry { name: "Firebase", icon: "🚀", level: 75, color: "#FFCA28" },
    SkillEntry { name: "JWT", icon: "</>", level: 70, color: "#000000" },
    SkillEntry { name: "MERN", icon: "{}", level: 85, color: "#00D9FF" },
];

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        label: "GitHub",
        href: "https://github.com/omarabir",
        icon: "⌥",
    },
    SocialLink {
        label: "LinkedIn",
        href: "https://linkedin.com/in/omarabir",
        icon: "in",
    },
    SocialLink {
        label: "Email",
        href: "mailto:abiromor506@gmail.com",
        icon: "✉",
    },
];

impl SkillEntry {
    pub fn bar_style(&self) -> String {
        format!("width: {}%; background-color: {};", self.level.min(100), self.color)
    }
}

impl SocialLink {
    pub fn opens_new_tab(&self) -> bool {
        !self.href.starts_with("mailto:")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SocialLayout {
    #[default]
    Compact,
    Labelled,
}

impl SocialLayout {
    pub fn is_labelled(self) -> bool {
        self == Self::Labelled
    }

    pub fn container_class(self) -> &'static str {
        match self {
            Self::Compact => "social-links",
            Self::Labelled => "social-links social-links-labelled stagger-container",
        }
    }

    pub fn item_class(self) -> &'static str {
        match self {
            Self::Compact => "social-link",
            Self::Labelled => "social-link stagger-item",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_levels_are_percentages() {
        assert!(SKILLS.iter().all(|skill| skill.level <= 100));
        assert_eq!(
            SKILLS[0].bar_style(),
            "width: 90%; background-color: #F7DF1E;"
        );
    }

    #[test]
    fn projects_link_out_over_https() {
        for project in PROJECTS {
            assert!(project.live.starts_with("https://"));
            assert!(project.source.starts_with("https://github.com/"));
            assert!(!project.tech.is_empty());
        }
    }

    #[test]
    fn only_mail_stays_in_tab() {
        let same_tab: Vec<&str> = SOCIAL_LINKS
            .iter()
            .filter(|link| !link.opens_new_tab())
            .map(|link| link.label)
            .collect();
        assert_eq!(same_tab, ["Email"]);
    }

    #[test]
    fn contact_links_reveal_as_a_stagger_group() {
        let layout = SocialLayout::Labelled;
        assert!(layout.container_class().split(' ').any(|class| class == "stagger-container"));
        assert!(layout.item_class().split(' ').any(|class| class == "stagger-item"));

        let compact = SocialLayout::Compact;
        assert!(!compact.container_class().contains("stagger"));
        assert!(!compact.item_class().contains("stagger"));
    }
}

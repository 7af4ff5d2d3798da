use std::{cell::RefCell, rc::Rc};
use web_sys::window;
use yew::prelude::*;

use crate::{
    content::{
        ProjectEntry, SkillEntry, SocialLayout, SocialLink, OWNER_FIRST_NAME, OWNER_LAST_NAME, OWNER_ROLE,
        PROJECTS, SKILLS, SOCIAL_LINKS,
    },
    coordinator::{Coordinator, ViewState},
    effects::{self, DocumentThemeSink, SharedCoordinator, CURSOR_ID, RAIN_CANVAS_ID},
    sections::{SectionId, NAV_SECTIONS},
    theme::ThemeMode,
};

type CoordinatorSlot = Rc<RefCell<Option<SharedCoordinator>>>;

fn dispatch(
    slot: &CoordinatorSlot,
    view: &UseStateHandle<ViewState>,
    action: impl FnOnce(&mut Coordinator<DocumentThemeSink>),
) {
    let Some(coordinator) = slot.borrow().clone() else {
        return;
    };

    let snapshot = {
        let mut coordinator = coordinator.borrow_mut();
        action(&mut coordinator);
        coordinator.view()
    };
    view.set(snapshot);
}

#[derive(Properties, PartialEq)]
struct SectionHeadingProps {
    index: &'static str,
    title: &'static str,
}

#[function_component(SectionHeading)]
fn section_heading(props: &SectionHeadingProps) -> Html {
    html! {
        <h2 class="fade-in section-heading">
            <span class="accent">{props.index}</span>
            <span>{props.title}</span>
            <div class="heading-rule" />
        </h2>
    }
}

#[derive(Properties, PartialEq)]
struct NavLinksProps {
    active: SectionId,
    #[prop_or_default]
    on_follow: Callback<()>,
    #[prop_or_default]
    stacked: bool,
}

#[function_component(NavLinks)]
fn nav_links(props: &NavLinksProps) -> Html {
    html! {
        <>
        { for NAV_SECTIONS.iter().map(|section| {
            let on_follow = props.on_follow.clone();
            let is_active = props.active == *section;
            html! {
                <a
                    key={section.as_str()}
                    href={section.anchor()}
                    class={classes!(
                        "nav-link",
                        props.stacked.then_some("nav-link-stacked"),
                        is_active.then_some("is-active"),
                    )}
                    aria-current={is_active.then_some("true")}
                    onclick={Callback::from(move |_: MouseEvent| on_follow.emit(()))}
                >
                    {section.as_str()}
                </a>
            }
        }) }
        </>
    }
}

#[function_component(Terminal)]
fn terminal(props: &TerminalProps) -> Html {
    let theme = use_context::<ThemeMode>().unwrap_or_default();
    html! {
        <div class={classes!("terminal", format!("terminal-{}", theme.as_str()))}>
            <div class="terminal-bar">
                <div class="terminal-lights">
                    <span class="light light-red" />
                    <span class="light light-yellow" />
                    <span class="light light-green" />
                </div>
                <span class="muted">{"terminal"}</span>
            </div>
            <div class="terminal-body">
                <div class="accent">
                    <span class="muted">{"$"}</span>
                    {" "}
                    {props.typed}
                    <span class="caret">{"|"}</span>
                </div>
                <div class="ok">{"✓ Building innovative web solutions..."}</div>
                <div class="keyword">{"const developer = {"}</div>
                <div class="prop">{"  name: "}<span class="string">{format!("\"{OWNER_FIRST_NAME} {OWNER_LAST_NAME}\"")}</span>{","}</div>
                <div class="prop">{"  role: "}<span class="string">{"\"MERN Developer\""}</span>{","}</div>
                <div class="prop">
                    {"  status: "}
                    <span class="string">{"\""}<span class="status-dot" />{"Available\""}</span>
                </div>
                <div class="keyword">{"};"}</div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TerminalProps {
    typed: &'static str,
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: ProjectEntry,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let project = &props.project;
    html! {
        <article class="stagger-item card project-card" style={format!("--project-color: {};", project.color)}>
            <div class="project-icon" aria-hidden="true">{project.icon}</div>
            <h3>{project.title}</h3>
            <p class="muted">{project.description}</p>
            <ul class="tag-list">
                { for project.tech.iter().map(|tag| html! { <li class="tag">{*tag}</li> }) }
            </ul>
            <div class="project-links">
                <a class="link" href={project.live} target="_blank" rel="noopener noreferrer">
                    {"Live Site"}<span class="external-mark" aria-hidden="true">{"↗"}</span>
                </a>
                <a class="link" href={project.source} target="_blank" rel="noopener noreferrer">
                    {"Source"}<span class="external-mark" aria-hidden="true">{"↗"}</span>
                </a>
            </div>
        </article>
    }
}

#[derive(Properties, PartialEq)]
struct SkillCardProps {
    skill: SkillEntry,
}

#[function_component(SkillCard)]
fn skill_card(props: &SkillCardProps) -> Html {
    let skill = &props.skill;
    html! {
        <div class="stagger-item card skill-card">
            <div class="skill-head">
                <span class="skill-icon" style={format!("color: {};", skill.color)} aria-hidden="true">{skill.icon}</span>
                <span class="skill-name">{skill.name}</span>
                <span class="accent">{format!("{}%", skill.level)}</span>
            </div>
            <div class="skill-track">
                <div class="skill-bar" style={skill.bar_style()} />
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SocialLinksProps {
    #[prop_or_default]
    layout: SocialLayout,
}

#[function_component(SocialLinks)]
fn social_links(props: &SocialLinksProps) -> Html {
    let layout = props.layout;
    let link = |social: &SocialLink| {
        let (target, rel) = if social.opens_new_tab() {
            (Some("_blank"), Some("noopener noreferrer"))
        } else {
            (None, None)
        };
        html! {
            <a class={layout.item_class()} href={social.href} target={target} rel={rel} title={social.label}>
                <span aria-hidden="true">{social.icon}</span>
                if layout.is_labelled() {
                    <span class="social-label">{social.label}</span>
                } else {
                    <span class="sr-only">{social.label}</span>
                }
            </a>
        }
    };

    html! {
        <div class={layout.container_class()}>
            { for SOCIAL_LINKS.iter().map(link) }
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let view = use_state_eq(ViewState::default);
    let slot: CoordinatorSlot = use_mut_ref(|| None::<SharedCoordinator>);

    {
        let view = view.clone();
        let slot = Rc::clone(&slot);
        use_effect_with((), move |_| {
            let publish = Callback::from(move |snapshot: ViewState| view.set(snapshot));
            let coordinator = effects::mount(publish);
            *slot.borrow_mut() = Some(Rc::clone(&coordinator));

            move || {
                slot.borrow_mut().take();
                coordinator.borrow_mut().unmount();
            }
        });
    }

    let on_toggle_theme = {
        let view = view.clone();
        let slot = Rc::clone(&slot);
        Callback::from(move |_: MouseEvent| {
            dispatch(&slot, &view, |coordinator| {
                coordinator.toggle_theme();
            })
        })
    };

    let on_toggle_menu = {
        let view = view.clone();
        let slot = Rc::clone(&slot);
        Callback::from(move |_: MouseEvent| dispatch(&slot, &view, |coordinator| coordinator.toggle_menu()))
    };

    let on_close_menu = {
        let view = view.clone();
        let slot = Rc::clone(&slot);
        Callback::from(move |_: ()| dispatch(&slot, &view, |coordinator| coordinator.close_menu()))
    };

    let theme = view.theme;

    html! {
        <ContextProvider<ThemeMode> context={theme}>
            <div class={classes!("page", theme.page_class())}>
                <canvas id={RAIN_CANVAS_ID} class="code-rain" aria-hidden="true" />

                <div id={CURSOR_ID} class="cursor" aria-hidden="true">
                    <div class="cursor-ping" />
                </div>

                <div class="floats" aria-hidden="true">
                    <div class="float blob blob-cyan" />
                    <div class="float blob blob-purple" />
                    <div class="float blob blob-pink" />
                </div>

                <nav class="site-nav">
                    <div class="nav-inner">
                        <a class="brand" href="#home">
                            <span class="accent brand-icon" aria-hidden="true">{">_"}</span>
                            {"<"}<span class="accent">{OWNER_FIRST_NAME}</span>{OWNER_LAST_NAME}{"/>"}
                        </a>

                        <div class="nav-links">
                            <NavLinks active={view.active_section} />
                            <button
                                class="theme-toggle"
                                type="button"
                                title="Toggle Theme"
                                aria-label={theme.toggle_label()}
                                onclick={on_toggle_theme.clone()}
                            >
                                <span aria-hidden="true">{theme.icon()}</span>
                            </button>
                        </div>

                        <button
                            class="menu-toggle"
                            type="button"
                            aria-expanded={view.menu_open.to_string()}
                            aria-label="Toggle menu"
                            onclick={on_toggle_menu}
                        >
                            {if view.menu_open { "✕" } else { "☰" }}
                        </button>
                    </div>

                    if view.menu_open {
                        <div class="mobile-menu">
                            <NavLinks active={view.active_section} on_follow={on_close_menu} stacked=true />
                            <button class="theme-toggle theme-toggle-wide" type="button" onclick={on_toggle_theme}>
                                <span aria-hidden="true">{theme.icon()}</span>
                                {" "}
                                {theme.menu_label()}
                            </button>
                        </div>
                    }
                </nav>

                <section id={SectionId::Home.as_str()} class="hero">
                    <div class="hero-content">
                        <div class="hero-grid">
                            <div>
                                <p class="accent mono">{"✦ Welcome to my digital space"}</p>
                                <h1 class="hero-title">
                                    <span class="hero-greeting">{"Hi, I'm"}</span>
                                    <span class="gradient-text">{format!("{OWNER_FIRST_NAME} {OWNER_LAST_NAME}")}</span>
                                </h1>
                                <p class="hero-lede">
                                    <strong>{OWNER_ROLE}</strong>
                                    {" crafting digital experiences with clean code & creative design"}
                                </p>
                                <div class="hero-actions">
                                    <a class="button button-primary" href={SectionId::Projects.anchor()}>{"View Projects →"}</a>
                                    <a class="button button-outline" href={SectionId::Contact.anchor()}>{"Contact Me"}</a>
                                </div>
                                <SocialLinks />
                            </div>
                            <Terminal typed={view.typed} />
                        </div>
                        <div class="scroll-indicator">
                            <span class="accent mono">{"Scroll Down"}</span>
                            <div class="scroll-line" />
                        </div>
                    </div>
                </section>

                <section id={SectionId::About.as_str()} class="section-block">
                    <SectionHeading index="01." title="About Me" />
                    <div class="two-column stagger-container">
                        <div class="stagger-item stack">
                            <div class="card">
                                <h3>{"Who I Am"}</h3>
                                <p class="muted">
                                    {"I'm a "}<strong>{"MERN stack developer"}</strong>
                                    {" passionate about crafting digital experiences that matter. I transform complex problems into elegant solutions through clean code and intuitive design."}
                                </p>
                            </div>
                            <div class="card">
                                <p class="muted">
                                    {"When I'm not coding, you'll find me exploring new technologies, contributing to open-source, or experimenting with creative UI concepts."}
                                </p>
                            </div>
                        </div>
                        <div class="stagger-item card code-card">
                            <p class="accent mono">{"☕ philosophy.js"}</p>
                            <pre class="mono">
{"const codeQuality = {
  readability: \"high\",
  maintainability: \"essential\",
  scalability: \"priority\",
  performance: \"optimized\"
};

// Clean code always looks like
// it was written by someone who cares."}
                            </pre>
                        </div>
                    </div>
                </section>

                <section id={SectionId::Projects.as_str()} class="section-block">
                    <SectionHeading index="02." title="Featured Projects" />
                    <div class="project-grid stagger-container">
                        { for PROJECTS.iter().map(|project| html! { <ProjectCard project={*project} /> }) }
                    </div>
                </section>

                <section id={SectionId::Skills.as_str()} class="section-block">
                    <SectionHeading index="03." title="Skills & Technologies" />
                    <div class="skill-grid stagger-container">
                        { for SKILLS.iter().map(|skill| html! { <SkillCard skill={*skill} /> }) }
                    </div>
                    <p class="fade-in card mono muted">
                        <span class="accent">{"// "}</span>{"Always learning and exploring new technologies..."}
                    </p>
                </section>

                <section id={SectionId::Contact.as_str()} class="section-block">
                    <SectionHeading index="04." title="Get In Touch" />
                    <div class="fade-in card code-card mono">
                        <p>{"if (you.need === \"developer\") {"}</p>
                        <p class="indent">{format!("contact(\"{OWNER_FIRST_NAME} {OWNER_LAST_NAME}\");")}</p>
                        <p class="indent">{"return \"Amazing Projects\";"}</p>
                        <p>{"}"}</p>
                    </div>
                    <SocialLinks layout={SocialLayout::Labelled} />
                </section>

                <footer class="site-footer mono">
                    <p>
                        <span class="accent">{"<"}</span>
                        {format!("© 2025 {OWNER_FIRST_NAME} {OWNER_LAST_NAME}")}
                        <span class="accent">{"/>"}</span>
                    </p>
                    <p class="muted">{"// Crafted with Rust, Yew & lots of coffee ☕"}</p>
                </footer>
            </div>
        </ContextProvider<ThemeMode>>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}

use gloo_timers::callback::{Interval, Timeout};
use js_sys::{Array, Function, Reflect};
use serde_json::json;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, Window,
};
use yew::Callback;

use crate::{
    config::EffectConfig,
    coordinator::{Coordinator, ScrollSample, ViewState},
    error::MountError,
    rain::{RainFrame, RAIN_FONT},
    reveal::Pose,
    sections::Visibility,
    theme::{ThemeMode, ThemeSink},
    typing::TypingStep,
};

pub const RAIN_CANVAS_ID: &str = "code-rain";
pub const CURSOR_ID: &str = "cursor";

pub type SharedCoordinator = Rc<RefCell<Coordinator<DocumentThemeSink>>>;

#[derive(Default)]
pub struct DocumentThemeSink {
    animated: Cell<bool>,
}

impl ThemeSink for DocumentThemeSink {
    fn apply(&self, mode: ThemeMode) {
        if self.animated.replace(true) {
            apply_theme_with_transition(mode);
        } else {
            apply_theme(mode);
        }
    }
}

fn apply_theme(theme: ThemeMode) {
    if let Some(document) = window().and_then(|w| w.document()) {
        if let Some(root) = document.document_element() {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
    }
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn apply_theme_with_transition(theme: ThemeMode) {
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let Some(document) = window().and_then(|w| w.document()) else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(theme);
        return;
    };

    let callback = Closure::once_into_js(move || apply_theme(theme));
    if start_view_transition.call1(&document_js, &callback).is_err() {
        apply_theme(theme);
    }
}

fn browser_window() -> Result<Window, MountError> {
    window().ok_or(MountError::MissingWindow)
}

fn browser_document() -> Result<Document, MountError> {
    browser_window()?.document().ok_or(MountError::MissingDocument)
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|performance| performance.now())
        .unwrap_or(0.0)
}

fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

fn page_url() -> String {
    window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default()
}

fn drop_later<T: 'static>(value: T) {
    let _ = Timeout::new(0, move || drop(value)).forget();
}

fn select_all(root: &Document, selector: &str) -> Result<Vec<HtmlElement>, MountError> {
    let nodes = root.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

fn select_all_within(root: &Element, selector: &str) -> Result<Vec<HtmlElement>, MountError> {
    let nodes = root.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

fn apply_pose(element: &HtmlElement, pose: Pose, with_opacity: bool) {
    let style = element.style();
    if with_opacity {
        let _ = style.set_property("opacity", &pose.opacity());
    }
    let _ = style.set_property("transform", &pose.transform());
}

struct RainSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl RainSurface {
    fn find(document: &Document) -> Result<Self, MountError> {
        let canvas = document
            .get_element_by_id(RAIN_CANVAS_ID)
            .ok_or(MountError::MissingElement(RAIN_CANVAS_ID))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| MountError::MissingElement(RAIN_CANVAS_ID))?;
        let context = canvas
            .get_context("2d")?
            .ok_or(MountError::MissingContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| MountError::MissingContext)?;

        Ok(Self { canvas, context })
    }

    fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn paint(&self, frame: &RainFrame) {
        let context = &self.context;
        context.set_fill_style_str(frame.palette.trail);
        context.fill_rect(0.0, 0.0, f64::from(frame.width), f64::from(frame.height));
        context.set_fill_style_str(frame.palette.glyph);
        context.set_font(RAIN_FONT);

        let mut buffer = [0u8; 4];
        for glyph in &frame.glyphs {
            let text = glyph.glyph.encode_utf8(&mut buffer);
            let _ = context.fill_text(text, glyph.x, glyph.y);
        }
    }
}

struct RevealTargets {
    hero: Option<HtmlElement>,
    fades: Vec<HtmlElement>,
    groups: Vec<(HtmlElement, Vec<HtmlElement>)>,
    floats: Vec<HtmlElement>,
    cursor: Option<HtmlElement>,
}

impl RevealTargets {
    fn collect(document: &Document) -> Result<Self, MountError> {
        let mut groups = Vec::new();
        for container in select_all(document, ".stagger-container")? {
            let items = select_all_within(&container, ".stagger-item")?;
            groups.push((container, items));
        }

        Ok(Self {
            hero: select_all(document, ".hero-content")?.into_iter().next(),
            fades: select_all(document, ".fade-in")?,
            groups,
            floats: select_all(document, ".float")?,
            cursor: document
                .get_element_by_id(CURSOR_ID)
                .and_then(|element| element.dyn_into::<HtmlElement>().ok()),
        })
    }

    fn sample(&self) -> ScrollSample {
        let top = |element: &HtmlElement| element.get_bounding_client_rect().top();
        ScrollSample {
            viewport_height: viewport_size().1,
            fade_tops: self.fades.iter().map(top).collect(),
            group_tops: self.groups.iter().map(|(container, _)| top(container)).collect(),
        }
    }

    fn render(&self, coordinator: &Coordinator<DocumentThemeSink>, now_ms: f64) {
        let reveal = coordinator.reveal();

        if let Some(hero) = &self.hero {
            apply_pose(hero, coordinator.hero_pose(now_ms), true);
        }
        for (id, element) in self.fades.iter().enumerate() {
            apply_pose(element, reveal.fade_pose(id, now_ms), true);
        }
        for (id, (_, items)) in self.groups.iter().enumerate() {
            for (item, element) in items.iter().enumerate() {
                apply_pose(element, reveal.group_item_pose(id, item, now_ms), true);
            }
        }
        for (id, element) in self.floats.iter().enumerate() {
            apply_pose(element, reveal.float_pose(id, now_ms), false);
        }
        if let Some(cursor) = &self.cursor {
            let (x, y) = coordinator.cursor_position(now_ms);
            let _ = cursor.style().set_property(
                "transform",
                &format!("translate({x:.2}px, {y:.2}px) translate(-50%, -50%)"),
            );
        }
    }
}

pub fn mount(publish: Callback<ViewState>) -> SharedCoordinator {
    let config = EffectConfig::from_page_url(&page_url());
    let surface = browser_document().and_then(|document| RainSurface::find(&document));
    let (width, height) = viewport_size();
    let viewport = surface.is_ok().then_some((width as u32, height as u32));

    let coordinator = Rc::new(RefCell::new(Coordinator::mount(
        config,
        DocumentThemeSink::default(),
        viewport,
        fastrand::Rng::new(),
        now_ms(),
    )));
    let logger = coordinator.borrow().logger();

    let started = [
        ("typing", start_typing(&coordinator, publish.clone())),
        ("section_tracker", start_section_tracker(&coordinator, publish.clone())),
        ("rain", surface.and_then(|surface| start_rain(&coordinator, surface))),
        ("pointer_follower", start_pointer_follower(&coordinator)),
        ("scroll_reveal", start_frame_loop(&coordinator)),
    ];

    for (effect, result) in started {
        match result {
            Ok(()) => logger.debug("effect_started", json!({ "effect": effect })),
            Err(err) => logger.info(
                "effect_skipped",
                json!({ "effect": effect, "kind": err.kind(), "reason": err.to_string() }),
            ),
        }
    }

    let snapshot = coordinator.borrow().view();
    publish.emit(snapshot);
    coordinator
}

fn start_typing(
    coordinator: &SharedCoordinator,
    publish: Callback<ViewState>,
) -> Result<(), MountError> {
    let interval_ms = coordinator.borrow().config().typing_interval_ms;
    let liveness = coordinator.borrow().liveness();
    let slot: Rc<RefCell<Option<Interval>>> = Rc::default();

    let interval = {
        let coordinator = Rc::clone(coordinator);
        let slot = Rc::clone(&slot);
        Interval::new(interval_ms, move || {
            if !liveness.is_alive() {
                return;
            }

            let step = coordinator.borrow_mut().typing_tick();
            let snapshot = coordinator.borrow().view();
            publish.emit(snapshot);

            if step == TypingStep::Finished {
                if let Some(interval) = slot.borrow_mut().take() {
                    drop_later(interval);
                }
            }
        })
    };
    *slot.borrow_mut() = Some(interval);

    coordinator.borrow_mut().defer("typing_interval", move || {
        slot.borrow_mut().take();
    });
    Ok(())
}

fn start_section_tracker(
    coordinator: &SharedCoordinator,
    publish: Callback<ViewState>,
) -> Result<(), MountError> {
    let document = browser_document()?;
    let sections = document.query_selector_all("section[id]")?;
    let threshold = coordinator.borrow().config().section_threshold;
    let liveness = coordinator.borrow().liveness();

    let callback = {
        let coordinator = Rc::clone(coordinator);
        Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                if !liveness.is_alive() {
                    return;
                }

                let observed: Vec<(String, bool, f64)> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| {
                        (
                            entry.target().id(),
                            entry.is_intersecting(),
                            entry.intersection_ratio(),
                        )
                    })
                    .collect();
                let visibility: Vec<Visibility<'_>> = observed
                    .iter()
                    .map(|(element_id, is_intersecting, ratio)| Visibility {
                        element_id: element_id.as_str(),
                        is_intersecting: *is_intersecting,
                        ratio: *ratio,
                    })
                    .collect();

                let changed = coordinator.borrow_mut().observe_sections(&visibility);
                if changed.is_some() {
                    let snapshot = coordinator.borrow().view();
                    publish.emit(snapshot);
                }
            },
        )
    };

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

    let mut targets = Vec::new();
    for index in 0..sections.length() {
        if let Some(element) = sections
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        {
            observer.observe(&element);
            targets.push(element);
        }
    }

    coordinator.borrow_mut().defer("section_observer", move || {
        for element in &targets {
            observer.unobserve(element);
        }
        observer.disconnect();
        drop(callback);
    });
    Ok(())
}

fn start_rain(coordinator: &SharedCoordinator, surface: RainSurface) -> Result<(), MountError> {
    let win = browser_window()?;
    let surface = Rc::new(surface);
    if let Some((width, height)) = coordinator.borrow().rain().map(|field| field.size()) {
        surface.set_size(width, height);
    }

    let interval_ms = coordinator.borrow().config().rain_interval_ms;
    let liveness = coordinator.borrow().liveness();

    let interval = {
        let coordinator = Rc::clone(coordinator);
        let surface = Rc::clone(&surface);
        let liveness = liveness.clone();
        Interval::new(interval_ms, move || {
            if !liveness.is_alive() {
                return;
            }
            let frame = coordinator.borrow_mut().rain_tick();
            if let Some(frame) = frame {
                surface.paint(&frame);
            }
        })
    };

    let on_resize = {
        let coordinator = Rc::clone(coordinator);
        Closure::<dyn FnMut()>::new(move || {
            if !liveness.is_alive() {
                return;
            }
            let (width, height) = viewport_size();
            let (width, height) = (width as u32, height as u32);
            coordinator.borrow_mut().resize(width, height);
            surface.set_size(width, height);
        })
    };
    win.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

    let mut coordinator = coordinator.borrow_mut();
    coordinator.defer("rain_interval", move || drop(interval));
    coordinator.defer("resize_listener", move || {
        let _ =
            win.remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
    });
    Ok(())
}

fn start_pointer_follower(coordinator: &SharedCoordinator) -> Result<(), MountError> {
    let win = browser_window()?;
    let liveness = coordinator.borrow().liveness();

    let on_move = {
        let coordinator = Rc::clone(coordinator);
        Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            if !liveness.is_alive() {
                return;
            }
            coordinator.borrow_mut().pointer_moved(
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                now_ms(),
            );
        })
    };
    win.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;

    coordinator.borrow_mut().defer("pointer_listener", move || {
        let _ =
            win.remove_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
    });
    Ok(())
}

fn start_frame_loop(coordinator: &SharedCoordinator) -> Result<(), MountError> {
    let win = browser_window()?;
    let targets = RevealTargets::collect(&browser_document()?)?;
    let group_sizes: Vec<usize> = targets.groups.iter().map(|(_, items)| items.len()).collect();
    coordinator.borrow_mut().register_reveals(
        targets.fades.len(),
        &group_sizes,
        targets.floats.len(),
        now_ms(),
    );

    let liveness = coordinator.borrow().liveness();
    let frame_id: Rc<Cell<Option<i32>>> = Rc::default();
    let tick: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::default();

    {
        let coordinator = Rc::clone(coordinator);
        let frame_id = Rc::clone(&frame_id);
        let tick_handle = Rc::clone(&tick);
        let win = win.clone();
        *tick.borrow_mut() = Some(Closure::new(move |now: f64| {
            if !liveness.is_alive() {
                return;
            }

            let sample = targets.sample();
            coordinator.borrow_mut().scroll(&sample, now);
            targets.render(&coordinator.borrow(), now);

            if let Some(callback) = tick_handle.borrow().as_ref() {
                frame_id.set(
                    win.request_animation_frame(callback.as_ref().unchecked_ref())
                        .ok(),
                );
            }
        }));
    }

    if let Some(callback) = tick.borrow().as_ref() {
        frame_id.set(Some(
            win.request_animation_frame(callback.as_ref().unchecked_ref())?,
        ));
    }

    coordinator.borrow_mut().defer("animation_frame", move || {
        if let Some(id) = frame_id.take() {
            let _ = win.cancel_animation_frame(id);
        }
        tick.borrow_mut().take();
    });
    Ok(())
}

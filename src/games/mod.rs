//! Mini-game suite shell.
//!
//! Owns the canvas, the DOM overlays (top bar, home button, success modal)
//! and the requestAnimationFrame loop, and routes pointer/touch input into
//! whichever game is active. Game rules live in the child modules as pure
//! state machines over `f64` millisecond timestamps; everything here is
//! translation: events in, confetti/modal effects out, pixels on screen.
//!
//! Input model: click-driven games (menu, memory, puzzle, odd-one-out,
//! Veo Veo) react to taps/clicks resolved against per-frame hit rectangles;
//! the two placement games react to drags, where mouse down/move/up and
//! touch start/move/end converge on the same registered-drop-zone lookup and
//! the same `attempt_placement` call. Switching screens replaces the active
//! game state wholesale, so its pending deadlines simply cease to exist.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, window};

use rand::thread_rng;

pub mod classification;
pub mod i_spy;
pub mod memory;
pub mod odd_one_out;
pub mod puzzle;
pub mod tidy_up;

use classification::ClassificationState;
use i_spy::ISpyState;
use memory::MemoryState;
use odd_one_out::OddOneOutState;
use puzzle::PuzzleState;
use tidy_up::TidyUpState;

// --- Shared contracts --------------------------------------------------------

/// Parameters for one confetti burst, passed through to the JS effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Celebration {
    pub particle_count: u32,
    pub spread: f64,
    pub origin_y: f64,
}

/// What a game's `tick` can ask the shell to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    Celebrate(Celebration),
    /// The completion signal: emitted at most once per play session.
    Completed,
}

/// Result of routing a drop into a placement game.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlacementOutcome {
    Placed(Celebration),
    Rejected,
    Ignored,
}

/// Axis-aligned hit region in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn centered(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self {
            x: cx - w / 2.0,
            y: cy - h / 2.0,
            w,
            h,
        }
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

/// In-flight drag: which item, and where the pointer currently is.
#[derive(Clone, Copy, Debug)]
pub struct DragState {
    pub item_id: usize,
    pub x: f64,
    pub y: f64,
}

// --- Game catalog ------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GameKind {
    Puzzle,
    Memory,
    Classification,
    OddOneOut,
    ISpy,
    TidyUp,
}

pub struct MenuItem {
    pub kind: GameKind,
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub accent_bg: &'static str,
    pub accent_fg: &'static str,
}

pub const MENU: &[MenuItem] = &[
    MenuItem {
        kind: GameKind::Puzzle,
        icon: "🧩",
        title: "Rompecabezas",
        description: "Arma las piezas",
        accent_bg: "#fce7f3",
        accent_fg: "#db2777",
    },
    MenuItem {
        kind: GameKind::Memory,
        icon: "🧠",
        title: "Memoria",
        description: "Encuentra parejas",
        accent_bg: "#dbeafe",
        accent_fg: "#2563eb",
    },
    MenuItem {
        kind: GameKind::Classification,
        icon: "🎨",
        title: "Clasificación",
        description: "Ordena por color",
        accent_bg: "#dcfce7",
        accent_fg: "#16a34a",
    },
    MenuItem {
        kind: GameKind::OddOneOut,
        icon: "🕵️",
        title: "El Intruso",
        description: "¿Cuál no encaja?",
        accent_bg: "#f3e8ff",
        accent_fg: "#9333ea",
    },
    MenuItem {
        kind: GameKind::ISpy,
        icon: "👀",
        title: "Veo Veo",
        description: "Busca objetos",
        accent_bg: "#fef9c3",
        accent_fg: "#ca8a04",
    },
    MenuItem {
        kind: GameKind::TidyUp,
        icon: "🧹",
        title: "¡A Ordenar!",
        description: "Guarda ropa y juguetes",
        accent_bg: "#ccfbf1",
        accent_fg: "#0d9488",
    },
];

pub const PLAYER_NAME_KEY: &str = "kidName";
pub const DEFAULT_PLAYER_NAME: &str = "Explorador";

// --- Confetti collaborator ---------------------------------------------------

// The host page exposes the particle effect as a global; fire-and-forget.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = launchConfetti)]
    fn launch_confetti(particle_count: u32, spread: f64, origin_y: f64);
}

fn fire_confetti(c: &Celebration) {
    launch_confetti(c.particle_count, c.spread, c.origin_y);
}

/// Burst accompanying the success modal, matching the per-game celebrations.
const MODAL_CELEBRATION: Celebration = Celebration {
    particle_count: 100,
    spread: 70.0,
    origin_y: 0.6,
};

// --- Shell state -------------------------------------------------------------

enum ActiveView {
    Menu,
    Classification(ClassificationState),
    Memory(MemoryState),
    Puzzle(PuzzleState),
    OddOneOut(OddOneOutState),
    ISpy(ISpyState),
    TidyUp(TidyUpState),
}

struct SuiteState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    player_name: String,
    view: ActiveView,
    modal_open: bool,
    drag: Option<DragState>,
    // Hit registries, rebuilt every rendered frame so lookups always match
    // what is on screen. `hit_rects` ids are view-specific (item id, card
    // index, slot, option index, object id); `zone_rects` ids index the
    // active game's ZONES table.
    menu_rects: Vec<(GameKind, Rect)>,
    hit_rects: Vec<(usize, Rect)>,
    zone_rects: Vec<(usize, Rect)>,
}

thread_local! {
    static SUITE_STATE: std::cell::RefCell<Option<SuiteState>> = std::cell::RefCell::new(None);
}

const CANVAS_W: f64 = 640.0;
const CANVAS_H: f64 = 640.0;

// --- Setup -------------------------------------------------------------------

pub fn start_suite() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Create / reuse the suite canvas.
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("ak-canvas") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("ak-canvas");
        c.set_width(CANVAS_W as u32);
        c.set_height(CANVAS_H as u32);
        c.set_attribute("style", "position:fixed; left:50%; top:54%; transform:translate(-50%,-50%); box-shadow:0 0 28px 0 rgba(0,0,0,0.14); border-radius:18px; background:#f8fafc; z-index:20; touch-action:none;").ok();
        doc.body().unwrap().append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d")?.unwrap().dyn_into()?;
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    ensure_chrome(&doc)?;

    let state = SuiteState {
        canvas: canvas.clone(),
        ctx,
        player_name: stored_player_name(),
        view: ActiveView::Menu,
        modal_open: false,
        drag: None,
        menu_rects: Vec::new(),
        hit_rects: Vec::new(),
        zone_rects: Vec::new(),
    };
    SUITE_STATE.with(|cell| cell.replace(Some(state)));

    attach_canvas_listeners(&canvas)?;
    start_suite_loop();
    Ok(())
}

/// Read the stored display name; absent or inaccessible storage falls back
/// to the default explorer.
fn stored_player_name() -> String {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(PLAYER_NAME_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string())
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

// --- DOM chrome (top bar, home button, success modal) ------------------------

const HOME_STYLE_VISIBLE: &str = "background:#facc15; color:#312e81; font-weight:bold; font-size:15px; padding:8px 20px; border:none; border-radius:999px; cursor:pointer; box-shadow:0 2px 6px rgba(0,0,0,0.2);";
const HOME_STYLE_HIDDEN: &str = "display:none;";
const MODAL_STYLE_HIDDEN: &str = "display:none;";
const MODAL_STYLE_VISIBLE: &str = "position:fixed; inset:0; background:rgba(0,0,0,0.5); display:flex; align-items:center; justify-content:center; z-index:60;";

fn ensure_overlay(doc: &Document, id: &str, style: &str) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el);
    }
    let el = doc.create_element("div")?;
    el.set_id(id);
    el.set_attribute("style", style).ok();
    doc.body().unwrap().append_child(&el)?;
    Ok(el)
}

fn ensure_chrome(doc: &Document) -> Result<(), JsValue> {
    let navbar = ensure_overlay(
        doc,
        "ak-navbar",
        "position:fixed; top:0; left:0; right:0; height:56px; background:#4f46e5; color:#fff; display:flex; align-items:center; justify-content:space-between; padding:0 18px; font-family:'Segoe UI',sans-serif; font-weight:bold; font-size:20px; z-index:40; box-shadow:0 2px 8px rgba(0,0,0,0.25);",
    )?;
    if doc.get_element_by_id("ak-home").is_none() {
        navbar.set_inner_html("<span>🚀 Aventura Kids</span>");
        let btn = doc.create_element("button")?;
        btn.set_id("ak-home");
        btn.set_text_content(Some("🏠 Inicio"));
        btn.set_attribute("style", HOME_STYLE_HIDDEN).ok();
        navbar.append_child(&btn)?;
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            return_to_menu();
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let modal = ensure_overlay(doc, "ak-modal", MODAL_STYLE_HIDDEN)?;
    if doc.get_element_by_id("ak-modal-btn").is_none() {
        modal.set_inner_html(
            "<div style='background:#fff; border-radius:18px; padding:36px 44px; text-align:center; box-shadow:0 12px 40px rgba(0,0,0,0.35); font-family:\"Segoe UI\",sans-serif;'>\
               <h2 style='color:#22c55e; font-size:30px; margin:0 0 22px 0;'>¡Muy Bien! 🎉</h2>\
               <button id='ak-modal-btn' style='background:#22c55e; color:#fff; font-size:20px; font-weight:bold; padding:12px 34px; border:none; border-radius:12px; cursor:pointer;'>Continuar</button>\
             </div>",
        );
        if let Some(btn) = doc.get_element_by_id("ak-modal-btn") {
            let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
                return_to_menu();
            }) as Box<dyn FnMut(_)>);
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
    }
    Ok(())
}

fn set_modal_visible(open: bool) {
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(modal) = doc.get_element_by_id("ak-modal") {
            let style = if open {
                MODAL_STYLE_VISIBLE
            } else {
                MODAL_STYLE_HIDDEN
            };
            modal.set_attribute("style", style).ok();
        }
    }
}

fn update_chrome(state: &SuiteState) {
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(btn) = doc.get_element_by_id("ak-home") {
            let style = if matches!(state.view, ActiveView::Menu) {
                HOME_STYLE_HIDDEN
            } else {
                HOME_STYLE_VISIBLE
            };
            btn.set_attribute("style", style).ok();
        }
    }
}

/// Abandon whatever is active and show the menu again. Dropping the view
/// value discards every pending deadline the game still had.
fn return_to_menu() {
    SUITE_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            state.view = ActiveView::Menu;
            state.drag = None;
            state.modal_open = false;
        }
    });
    set_modal_visible(false);
}

fn open_success_modal(state: &mut SuiteState) {
    state.modal_open = true;
    fire_confetti(&MODAL_CELEBRATION);
    set_modal_visible(true);
}

// --- Input listeners ---------------------------------------------------------

fn attach_canvas_listeners(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    // Mouse path: offset coordinates are already canvas-local.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            with_state(|state| {
                handle_click(state, evt.offset_x() as f64, evt.offset_y() as f64, now_ms());
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            with_state(|state| {
                pointer_down(state, evt.offset_x() as f64, evt.offset_y() as f64);
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            with_state(|state| {
                pointer_move(state, evt.offset_x() as f64, evt.offset_y() as f64);
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            with_state(|state| {
                pointer_up(state, evt.offset_x() as f64, evt.offset_y() as f64, now_ms());
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            with_state(|state| {
                state.drag = None;
                if let ActiveView::TidyUp(t) = &mut state.view {
                    t.clear_glow();
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Touch path: client coordinates mapped through the canvas rect, then
    // the exact same placement/click logic. preventDefault suppresses both
    // scrolling and the browser's synthetic click.
    {
        let canvas_ref = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::TouchEvent| {
            if let Some((x, y)) = touch_pos(&canvas_ref, evt.touches().get(0)) {
                evt.prevent_default();
                with_state(|state| pointer_down(state, x, y));
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let canvas_ref = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::TouchEvent| {
            if let Some((x, y)) = touch_pos(&canvas_ref, evt.touches().get(0)) {
                evt.prevent_default();
                with_state(|state| pointer_move(state, x, y));
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let canvas_ref = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::TouchEvent| {
            if let Some((x, y)) = touch_pos(&canvas_ref, evt.changed_touches().get(0)) {
                evt.prevent_default();
                let now = now_ms();
                with_state(|state| {
                    // A release that was not dragging anything is a tap.
                    if !pointer_up(state, x, y, now) {
                        handle_click(state, x, y, now);
                    }
                });
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn with_state(f: impl FnOnce(&mut SuiteState)) {
    SUITE_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            f(state);
        }
    });
}

fn touch_pos(canvas: &HtmlCanvasElement, touch: Option<web_sys::Touch>) -> Option<(f64, f64)> {
    let touch = touch?;
    let rect = canvas.get_bounding_client_rect();
    Some((
        touch.client_x() as f64 - rect.left(),
        touch.client_y() as f64 - rect.top(),
    ))
}

fn hit_id(rects: &[(usize, Rect)], x: f64, y: f64) -> Option<usize> {
    rects.iter().find(|(_, r)| r.contains(x, y)).map(|(id, _)| *id)
}

// --- Input routing -----------------------------------------------------------

fn launch(state: &mut SuiteState, kind: GameKind) {
    state.drag = None;
    state.view = match kind {
        GameKind::Puzzle => ActiveView::Puzzle(PuzzleState::new(&mut thread_rng())),
        GameKind::Memory => ActiveView::Memory(MemoryState::new()),
        GameKind::Classification => ActiveView::Classification(ClassificationState::new()),
        GameKind::OddOneOut => ActiveView::OddOneOut(OddOneOutState::new()),
        GameKind::ISpy => ActiveView::ISpy(ISpyState::new(&mut thread_rng())),
        GameKind::TidyUp => ActiveView::TidyUp(TidyUpState::new()),
    };
}

fn handle_click(state: &mut SuiteState, x: f64, y: f64, now: f64) {
    if state.modal_open {
        return;
    }
    if matches!(state.view, ActiveView::Menu) {
        let hit = state
            .menu_rects
            .iter()
            .find(|(_, r)| r.contains(x, y))
            .map(|(k, _)| *k);
        if let Some(kind) = hit {
            launch(state, kind);
        }
        return;
    }
    let hit = hit_id(&state.hit_rects, x, y);
    match &mut state.view {
        ActiveView::Memory(mem) => {
            if let Some(id) = hit {
                if mem.is_choosing_theme() {
                    mem.start(id, &mut thread_rng());
                } else {
                    mem.flip(id, now);
                }
            }
        }
        ActiveView::Puzzle(p) => {
            if let Some(slot) = hit {
                p.handle_click(slot, now);
            }
        }
        ActiveView::OddOneOut(o) => {
            if let Some(idx) = hit {
                let (_, fx) = o.answer(idx, now);
                if let Some(c) = fx {
                    fire_confetti(&c);
                }
            }
        }
        ActiveView::ISpy(s) => {
            if let Some(id) = hit {
                let (_, fx) = s.handle_click(id, now);
                if let Some(c) = fx {
                    fire_confetti(&c);
                }
            }
        }
        // Placement games are drag-driven; plain clicks do nothing.
        _ => {}
    }
}

fn pointer_down(state: &mut SuiteState, x: f64, y: f64) {
    if state.modal_open {
        return;
    }
    if !matches!(
        state.view,
        ActiveView::Classification(_) | ActiveView::TidyUp(_)
    ) {
        return;
    }
    if let Some(id) = hit_id(&state.hit_rects, x, y) {
        state.drag = Some(DragState { item_id: id, x, y });
    }
}

fn pointer_move(state: &mut SuiteState, x: f64, y: f64) {
    if let Some(drag) = state.drag.as_mut() {
        drag.x = x;
        drag.y = y;
    }
    // Hover glow, entered and left independently per zone.
    let over: Vec<usize> = state
        .zone_rects
        .iter()
        .filter(|(_, r)| r.contains(x, y))
        .map(|(z, _)| *z)
        .collect();
    let dragging = state.drag.is_some();
    if let ActiveView::TidyUp(t) = &mut state.view {
        for zone in tidy_up::ZONES {
            t.set_glow(zone, dragging && over.contains(&zone.index()));
        }
    }
}

/// Returns true when a drag was resolved (so touch-end can tell a drop from
/// a tap).
fn pointer_up(state: &mut SuiteState, x: f64, y: f64, now: f64) -> bool {
    let Some(drag) = state.drag.take() else {
        return false;
    };
    let zone_hit = state
        .zone_rects
        .iter()
        .find(|(_, r)| r.contains(x, y))
        .map(|(z, _)| *z);
    match &mut state.view {
        ActiveView::Classification(c) => {
            if let Some(z) = zone_hit {
                let outcome = c.attempt_placement(drag.item_id, classification::ZONES[z], now);
                if let PlacementOutcome::Placed(fx) = outcome {
                    fire_confetti(&fx);
                }
            }
        }
        ActiveView::TidyUp(t) => {
            t.clear_glow();
            if let Some(z) = zone_hit {
                let outcome = t.attempt_placement(drag.item_id, tidy_up::ZONES[z], now);
                if let PlacementOutcome::Placed(fx) = outcome {
                    fire_confetti(&fx);
                }
            }
        }
        _ => {}
    }
    true
}

// --- Frame loop --------------------------------------------------------------

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_suite_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        SUITE_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                suite_tick(state, ts);
            }
        });
        if let Some(w) = window() {
            let _ =
                w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

fn suite_tick(state: &mut SuiteState, now: f64) {
    let event = match &mut state.view {
        ActiveView::Menu => None,
        ActiveView::Classification(c) => c.tick(now),
        ActiveView::Memory(m) => m.tick(now),
        ActiveView::Puzzle(p) => p.tick(now),
        ActiveView::OddOneOut(o) => o.tick(now),
        ActiveView::ISpy(s) => s.tick(now, &mut thread_rng()),
        ActiveView::TidyUp(t) => t.tick(now),
    };
    match event {
        Some(GameEvent::Celebrate(c)) => fire_confetti(&c),
        Some(GameEvent::Completed) => open_success_modal(state),
        None => {}
    }
    update_chrome(state);
    render(state, now);
}

// --- Rendering ---------------------------------------------------------------

fn render(state: &mut SuiteState, now: f64) {
    let ctx = &state.ctx;
    ctx.set_global_alpha(1.0);
    ctx.set_fill_style_str("#f8fafc");
    ctx.fill_rect(
        0.0,
        0.0,
        state.canvas.width() as f64,
        state.canvas.height() as f64,
    );

    state.menu_rects.clear();
    state.hit_rects.clear();
    state.zone_rects.clear();

    match &state.view {
        ActiveView::Menu => {
            render_menu(&state.ctx, &state.player_name, &mut state.menu_rects);
        }
        ActiveView::Classification(c) => {
            render_classification(
                &state.ctx,
                c,
                state.drag.as_ref(),
                &mut state.hit_rects,
                &mut state.zone_rects,
            );
        }
        ActiveView::Memory(m) => {
            render_memory(&state.ctx, m, &mut state.hit_rects);
        }
        ActiveView::Puzzle(p) => {
            render_puzzle(&state.ctx, p, &mut state.hit_rects);
        }
        ActiveView::OddOneOut(o) => {
            render_odd_one_out(&state.ctx, o, &mut state.hit_rects, now);
        }
        ActiveView::ISpy(s) => {
            render_i_spy(&state.ctx, s, &mut state.hit_rects, now);
        }
        ActiveView::TidyUp(t) => {
            render_tidy_up(
                &state.ctx,
                t,
                state.drag.as_ref(),
                &mut state.hit_rects,
                &mut state.zone_rects,
            );
        }
    }
}

fn draw_panel(ctx: &CanvasRenderingContext2d, r: &Rect, fill: &str, stroke: &str, lw: f64) {
    ctx.set_fill_style_str(fill);
    ctx.fill_rect(r.x, r.y, r.w, r.h);
    if lw > 0.0 {
        ctx.set_stroke_style_str(stroke);
        ctx.set_line_width(lw);
        ctx.stroke_rect(r.x, r.y, r.w, r.h);
    }
}

fn draw_text(ctx: &CanvasRenderingContext2d, text: &str, x: f64, y: f64, font: &str, fill: &str) {
    ctx.set_font(font);
    ctx.set_fill_style_str(fill);
    ctx.fill_text(text, x, y).ok();
}

const EMOJI_FONT_LG: &str = "44px 'Segoe UI Emoji', 'Noto Color Emoji', sans-serif";
const EMOJI_FONT_MD: &str = "30px 'Segoe UI Emoji', 'Noto Color Emoji', sans-serif";
const EMOJI_FONT_SM: &str = "24px 'Segoe UI Emoji', 'Noto Color Emoji', sans-serif";

fn render_menu(
    ctx: &CanvasRenderingContext2d,
    player_name: &str,
    rects: &mut Vec<(GameKind, Rect)>,
) {
    draw_text(
        ctx,
        &format!("Hola, {player_name} 👋"),
        320.0,
        70.0,
        "bold 34px 'Segoe UI', sans-serif",
        "#4f46e5",
    );
    draw_text(
        ctx,
        "¿A qué quieres jugar hoy?",
        320.0,
        112.0,
        "20px 'Segoe UI', sans-serif",
        "#6b7280",
    );

    let (card_w, card_h, gap) = (186.0, 200.0, 16.0);
    let x0 = (CANVAS_W - (3.0 * card_w + 2.0 * gap)) / 2.0;
    let y0 = 150.0;
    for (i, item) in MENU.iter().enumerate() {
        let col = (i % 3) as f64;
        let row = (i / 3) as f64;
        let rect = Rect::new(x0 + col * (card_w + gap), y0 + row * (card_h + gap), card_w, card_h);
        draw_panel(ctx, &rect, item.accent_bg, item.accent_fg, 2.0);
        draw_text(ctx, item.icon, rect.x + card_w / 2.0, rect.y + 62.0, EMOJI_FONT_LG, "#000");
        draw_text(
            ctx,
            item.title,
            rect.x + card_w / 2.0,
            rect.y + 128.0,
            "bold 20px 'Segoe UI', sans-serif",
            item.accent_fg,
        );
        draw_text(
            ctx,
            item.description,
            rect.x + card_w / 2.0,
            rect.y + 160.0,
            "13px 'Segoe UI', sans-serif",
            "#64748b",
        );
        rects.push((item.kind, rect));
    }
}

fn render_classification(
    ctx: &CanvasRenderingContext2d,
    st: &ClassificationState,
    drag: Option<&DragState>,
    hit: &mut Vec<(usize, Rect)>,
    zones: &mut Vec<(usize, Rect)>,
) {
    draw_text(
        ctx,
        "🎨 Agrupa los colores",
        320.0,
        50.0,
        "bold 28px 'Segoe UI', sans-serif",
        "#4338ca",
    );

    // Pending tray.
    let tray = Rect::new(70.0, 80.0, 500.0, 110.0);
    draw_panel(ctx, &tray, "#ffffff", "#e2e8f0", 2.0);
    let dragged_id = drag.map(|d| d.item_id);
    let pending: Vec<&classification::ClassifyItem> = st.pending().collect();
    let n = pending.len() as f64;
    for (i, item) in pending.iter().enumerate() {
        let cx = 320.0 - (n * 76.0) / 2.0 + 38.0 + i as f64 * 76.0;
        let cy = tray.y + tray.h / 2.0;
        let slot = Rect::centered(cx, cy, 64.0, 64.0);
        if dragged_id != Some(item.id) {
            draw_text(ctx, item.icon, cx, cy, EMOJI_FONT_LG, "#000");
        }
        hit.push((item.id, slot));
    }

    // Drop zones.
    let zone_styles: [(classification::ColorZone, f64, &str, &str, &str); 2] = [
        (classification::ColorZone::Rojo, 90.0, "#fee2e2", "#ef4444", "#dc2626"),
        (classification::ColorZone::Amarillo, 350.0, "#fef9c3", "#eab308", "#ca8a04"),
    ];
    for (zone, x, fill, stroke, label_fill) in zone_styles {
        let rect = Rect::new(x, 380.0, 200.0, 200.0);
        let flashing = st.error_zone() == Some(zone);
        let (fill, stroke) = if flashing {
            ("#fecaca", "#b91c1c")
        } else {
            (fill, stroke)
        };
        draw_panel(ctx, &rect, fill, stroke, 4.0);
        draw_text(
            ctx,
            zone.label(),
            rect.x + rect.w / 2.0,
            rect.y + 28.0,
            "bold 20px 'Segoe UI', sans-serif",
            label_fill,
        );
        for (i, id) in st.placed_in(zone).iter().enumerate() {
            if let Some(icon) = st.icon_of(*id) {
                let col = (i % 2) as f64;
                let row = (i / 2) as f64;
                draw_text(
                    ctx,
                    icon,
                    rect.x + 60.0 + col * 80.0,
                    rect.y + 70.0 + row * 44.0,
                    EMOJI_FONT_MD,
                    "#000",
                );
            }
        }
        zones.push((zone.index(), rect));
    }

    // Item in flight follows the pointer.
    if let Some(d) = drag {
        if let Some(icon) = st.icon_of(d.item_id) {
            draw_text(ctx, icon, d.x, d.y, "48px 'Segoe UI Emoji', sans-serif", "#000");
        }
    }
}

fn render_tidy_up(
    ctx: &CanvasRenderingContext2d,
    st: &TidyUpState,
    drag: Option<&DragState>,
    hit: &mut Vec<(usize, Rect)>,
    zones: &mut Vec<(usize, Rect)>,
) {
    draw_text(
        ctx,
        "🧹 ¡A Ordenar el Cuarto!",
        320.0,
        42.0,
        "bold 26px 'Segoe UI', sans-serif",
        "#4338ca",
    );
    draw_text(
        ctx,
        "Arrastra cada cosa a su lugar",
        320.0,
        70.0,
        "15px 'Segoe UI', sans-serif",
        "#6b7280",
    );

    let (placed, total, pct) = st.progress();
    let bar = Rect::new(80.0, 84.0, 480.0, 12.0);
    draw_panel(ctx, &bar, "#e5e7eb", "#e5e7eb", 0.0);
    ctx.set_fill_style_str("#34d399");
    ctx.fill_rect(bar.x, bar.y, bar.w * pct as f64 / 100.0, bar.h);
    draw_text(
        ctx,
        &format!("{placed} / {total} ordenados"),
        320.0,
        112.0,
        "bold 13px 'Segoe UI', sans-serif",
        "#6b7280",
    );

    // Pending tray, two rows of five.
    let tray = Rect::new(40.0, 126.0, 560.0, 160.0);
    draw_panel(ctx, &tray, "#ffffff", "#c7d2fe", 2.0);
    let dragged_id = drag.map(|d| d.item_id);
    let pending: Vec<&tidy_up::TidyItem> = st.pending().collect();
    if pending.is_empty() {
        draw_text(
            ctx,
            "¡Todo ordenado! 🎉",
            320.0,
            tray.y + tray.h / 2.0,
            "bold 19px 'Segoe UI', sans-serif",
            "#22c55e",
        );
    }
    for (i, item) in pending.iter().enumerate() {
        let col = (i % 5) as f64;
        let row = (i / 5) as f64;
        let cx = tray.x + 60.0 + col * 110.0;
        let cy = tray.y + 45.0 + row * 78.0;
        let slot = Rect::centered(cx, cy, 70.0, 70.0);
        if dragged_id != Some(item.id) {
            draw_text(ctx, item.icon, cx, cy - 8.0, "38px 'Segoe UI Emoji', sans-serif", "#000");
            draw_text(ctx, item.label, cx, cy + 26.0, "11px 'Segoe UI', sans-serif", "#6b7280");
        }
        hit.push((item.id, slot));
    }

    // Closet and toy box.
    struct ZoneStyle {
        zone: tidy_up::TidyZone,
        x: f64,
        icon: &'static str,
        title: &'static str,
        hint: &'static str,
        fill: &'static str,
        stroke: &'static str,
        glow_fill: &'static str,
        glow_stroke: &'static str,
        fg: &'static str,
    }
    let styles = [
        ZoneStyle {
            zone: tidy_up::TidyZone::Ropa,
            x: 40.0,
            icon: "🚪",
            title: "Armario",
            hint: "Ropa aquí",
            fill: "#ede9fe",
            stroke: "#a78bfa",
            glow_fill: "#ddd6fe",
            glow_stroke: "#7c3aed",
            fg: "#6d28d9",
        },
        ZoneStyle {
            zone: tidy_up::TidyZone::Juguete,
            x: 330.0,
            icon: "📦",
            title: "Caja",
            hint: "Juguetes aquí",
            fill: "#fef3c7",
            stroke: "#fbbf24",
            glow_fill: "#fde68a",
            glow_stroke: "#d97706",
            fg: "#b45309",
        },
    ];
    for style in styles {
        let rect = Rect::new(style.x, 306.0, 270.0, 256.0);
        let flashing = st.error_zone() == Some(style.zone);
        let glowing = st.glowing(style.zone);
        let (fill, stroke, lw) = if flashing {
            ("#fee2e2", "#f87171", 4.0)
        } else if glowing {
            (style.glow_fill, style.glow_stroke, 6.0)
        } else {
            (style.fill, style.stroke, 4.0)
        };
        draw_panel(ctx, &rect, fill, stroke, lw);
        let cx = rect.x + rect.w / 2.0;
        draw_text(ctx, style.icon, cx, rect.y + 42.0, "40px 'Segoe UI Emoji', sans-serif", "#000");
        draw_text(ctx, style.title, cx, rect.y + 84.0, "bold 18px 'Segoe UI', sans-serif", style.fg);
        draw_text(ctx, style.hint, cx, rect.y + 108.0, "12px 'Segoe UI', sans-serif", style.stroke);
        for (i, id) in st.placed_in(style.zone).iter().enumerate() {
            if let Some(icon) = st.icon_of(*id) {
                let col = (i % 6) as f64;
                let row = (i / 6) as f64;
                draw_text(
                    ctx,
                    icon,
                    rect.x + 35.0 + col * 40.0,
                    rect.y + 145.0 + row * 40.0,
                    EMOJI_FONT_SM,
                    "#000",
                );
            }
        }
        zones.push((style.zone.index(), rect));
    }

    draw_text(
        ctx,
        "💡 Si sueltas algo en el lugar equivocado, ¡te avisamos!",
        320.0,
        595.0,
        "italic 12px 'Segoe UI', sans-serif",
        "#9ca3af",
    );

    if let Some(d) = drag {
        if let Some(icon) = st.icon_of(d.item_id) {
            draw_text(ctx, icon, d.x, d.y, "48px 'Segoe UI Emoji', sans-serif", "#000");
        }
    }
}

fn render_memory(ctx: &CanvasRenderingContext2d, st: &MemoryState, hit: &mut Vec<(usize, Rect)>) {
    if st.is_choosing_theme() {
        draw_text(
            ctx,
            "🧠 Memoria: Elige tus fichas",
            320.0,
            80.0,
            "bold 26px 'Segoe UI', sans-serif",
            "#4338ca",
        );
        let fills = ["#dbeafe", "#dcfce7", "#ffedd5"];
        let x0 = 320.0 - (3.0 * 110.0 + 2.0 * 24.0) / 2.0;
        for (i, glyph) in memory::THEME_BUTTONS.iter().enumerate() {
            let rect = Rect::new(x0 + i as f64 * 134.0, 240.0, 110.0, 110.0);
            draw_panel(ctx, &rect, fills[i], "#cbd5e1", 2.0);
            draw_text(
                ctx,
                glyph,
                rect.x + rect.w / 2.0,
                rect.y + rect.h / 2.0,
                "54px 'Segoe UI Emoji', sans-serif",
                "#000",
            );
            hit.push((i, rect));
        }
        return;
    }

    draw_text(
        ctx,
        "🧠 Encuentra las parejas",
        320.0,
        70.0,
        "bold 26px 'Segoe UI', sans-serif",
        "#4338ca",
    );
    let (card_w, card_h, gap) = (120.0, 92.0, 12.0);
    let x0 = (CANVAS_W - (4.0 * card_w + 3.0 * gap)) / 2.0;
    let y0 = 120.0;
    for card in st.cards() {
        let col = (card.id % 4) as f64;
        let row = (card.id / 4) as f64;
        let rect = Rect::new(x0 + col * (card_w + gap), y0 + row * (card_h + gap), card_w, card_h);
        if card.matched {
            ctx.set_global_alpha(0.5);
        }
        if card.flipped || card.matched {
            draw_panel(ctx, &rect, "#ffffff", "#facc15", 4.0);
            draw_text(
                ctx,
                card.face,
                rect.x + card_w / 2.0,
                rect.y + card_h / 2.0,
                "40px 'Segoe UI Emoji', sans-serif",
                "#000",
            );
        } else {
            draw_panel(ctx, &rect, "#6366f1", "#a5b4fc", 4.0);
            draw_text(
                ctx,
                "?",
                rect.x + card_w / 2.0,
                rect.y + card_h / 2.0,
                "bold 30px 'Segoe UI', sans-serif",
                "#ffffff",
            );
        }
        ctx.set_global_alpha(1.0);
        hit.push((card.id, rect));
    }
}

const PIECE_COLORS: [&str; puzzle::CELLS] = [
    "#ef4444", "#f97316", "#f59e0b", "#84cc16", "#22c55e", "#14b8a6", "#3b82f6", "#8b5cf6",
    "#ec4899",
];

fn render_puzzle(ctx: &CanvasRenderingContext2d, st: &PuzzleState, hit: &mut Vec<(usize, Rect)>) {
    draw_text(
        ctx,
        "🧩 Rompecabezas",
        320.0,
        50.0,
        "bold 28px 'Segoe UI', sans-serif",
        "#4338ca",
    );
    draw_text(
        ctx,
        "Toca las piezas para moverlas",
        320.0,
        84.0,
        "15px 'Segoe UI', sans-serif",
        "#6b7280",
    );

    let (cell, gap) = (104.0, 6.0);
    let side = 3.0 * cell + 2.0 * gap;
    let x0 = (CANVAS_W - side) / 2.0;
    let y0 = 140.0;
    for (slot, &piece) in st.pieces().iter().enumerate() {
        let col = (slot % puzzle::GRID) as f64;
        let row = (slot / puzzle::GRID) as f64;
        let rect = Rect::new(x0 + col * (cell + gap), y0 + row * (cell + gap), cell, cell);
        draw_panel(ctx, &rect, PIECE_COLORS[piece], "#ffffff", 2.0);
        draw_text(
            ctx,
            &(piece + 1).to_string(),
            rect.x + cell / 2.0,
            rect.y + cell / 2.0,
            "bold 34px 'Segoe UI', sans-serif",
            "#ffffff",
        );
        if st.selected() == Some(slot) {
            ctx.set_stroke_style_str("#facc15");
            ctx.set_line_width(5.0);
            ctx.stroke_rect(rect.x + 2.0, rect.y + 2.0, cell - 4.0, cell - 4.0);
        }
        hit.push((slot, rect));
    }
}

fn render_odd_one_out(
    ctx: &CanvasRenderingContext2d,
    st: &OddOneOutState,
    hit: &mut Vec<(usize, Rect)>,
    now: f64,
) {
    draw_text(
        ctx,
        "🕵️ Encuentra el Intruso",
        320.0,
        50.0,
        "bold 28px 'Segoe UI', sans-serif",
        "#4338ca",
    );
    let level = st.current();
    let qbox = Rect::centered(320.0, 130.0, 420.0, 56.0);
    draw_panel(ctx, &qbox, "#ffffff", "#e2e8f0", 2.0);
    draw_text(
        ctx,
        level.question,
        320.0,
        130.0,
        "18px 'Segoe UI', sans-serif",
        "#374151",
    );

    let x0 = 320.0 - (4.0 * 110.0 + 3.0 * 24.0) / 2.0;
    for (idx, icon) in level.items.iter().enumerate() {
        let shaking = st.shake_index() == Some(idx);
        let jitter = if shaking { (now / 25.0).sin() * 5.0 } else { 0.0 };
        let rect = Rect::new(x0 + idx as f64 * 134.0, 260.0, 110.0, 110.0);
        let fill = if shaking { "#fef2f2" } else { "#ffffff" };
        let stroke = if shaking { "#f87171" } else { "#c7d2fe" };
        draw_panel(ctx, &Rect::new(rect.x + jitter, rect.y, rect.w, rect.h), fill, stroke, 4.0);
        draw_text(
            ctx,
            icon,
            rect.x + jitter + rect.w / 2.0,
            rect.y + rect.h / 2.0,
            "48px 'Segoe UI Emoji', sans-serif",
            "#000",
        );
        hit.push((idx, rect));
    }

    draw_text(
        ctx,
        &format!("Nivel {} de {}", st.level_index() + 1, odd_one_out::LEVELS.len()),
        320.0,
        460.0,
        "15px 'Segoe UI', sans-serif",
        "#6b7280",
    );
}

fn render_i_spy(
    ctx: &CanvasRenderingContext2d,
    st: &ISpyState,
    hit: &mut Vec<(usize, Rect)>,
    now: f64,
) {
    // Without a target there is nothing sensible to show.
    let Some(target) = st.target() else {
        return;
    };

    let header = Rect::centered(320.0, 50.0, 500.0, 60.0);
    draw_panel(ctx, &header, "#4f46e5", "#4f46e5", 0.0);
    draw_text(
        ctx,
        &format!("Veo, veo algo de color... {}", target.color.to_uppercase()),
        320.0,
        50.0,
        "bold 19px 'Segoe UI', sans-serif",
        "#fde047",
    );

    let field = Rect::new(40.0, 100.0, 560.0, 400.0);
    draw_panel(ctx, &field, "#ffffff", "#d1d5db", 2.0);

    let revealing = st.revealing();
    let target_color = target.color;
    for obj in st.objects() {
        let px = field.x + obj.left_pct / 100.0 * field.w;
        let mut py = field.y + obj.top_pct / 100.0 * field.h;
        // Gentle bob, one cycle per object-specific duration.
        py += (now / (obj.duration_s * 1000.0) * std::f64::consts::TAU).sin() * 6.0;
        let jitter = if st.shake_id() == Some(obj.id) {
            (now / 25.0).sin() * 5.0
        } else {
            0.0
        };
        if revealing {
            if obj.color == target_color {
                draw_text(ctx, obj.icon, px + jitter, py, "64px 'Segoe UI Emoji', sans-serif", "#000");
            } else {
                ctx.set_global_alpha(0.3);
                draw_text(ctx, obj.icon, px + jitter, py, EMOJI_FONT_LG, "#000");
                ctx.set_global_alpha(1.0);
            }
        } else {
            draw_text(ctx, obj.icon, px + jitter, py, EMOJI_FONT_LG, "#000");
        }
        hit.push((obj.id, Rect::centered(px, py, 56.0, 56.0)));
    }

    draw_text(
        ctx,
        &format!("Intentos restantes: {}", st.attempts_left()),
        320.0,
        540.0,
        "bold 16px 'Segoe UI', sans-serif",
        "#4b5563",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(10.0, 10.0));
        assert!(r.contains(29.9, 29.9));
        assert!(!r.contains(30.0, 30.0));
        assert!(!r.contains(9.9, 15.0));
    }

    #[test]
    fn rect_centered_centers() {
        let r = Rect::centered(100.0, 50.0, 40.0, 20.0);
        assert_eq!((r.x, r.y), (80.0, 40.0));
        assert!(r.contains(100.0, 50.0));
    }

    #[test]
    fn menu_catalog_is_complete_and_unique() {
        assert_eq!(MENU.len(), 6);
        for (i, a) in MENU.iter().enumerate() {
            assert!(!a.title.is_empty());
            assert!(!a.description.is_empty());
            for b in &MENU[i + 1..] {
                assert_ne!(a.kind, b.kind, "duplicate menu kind");
                assert_ne!(a.icon, b.icon, "duplicate menu icon");
            }
        }
    }
}

//! `wasm-bindgen` exports: a 2D canvas surface, the host observers and the
//! `ElectricBorder` class.

use crate::{css_color, handle_from_js, parse_style, HostScheduler};
use electric_border_core::{
    BorderController, BorderSettings, BorderStyle, DrawSurface, LifecycleState, StrokeStyle,
    Subscription, SurfaceDimensions,
};
use glam::DVec2;
use js_sys::{Array, Function};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ResizeObserver,
};

/// Share of the host that must be on screen to count as visible.
const VISIBILITY_THRESHOLD: f64 = 0.1;

type Controller = BorderController<HostScheduler, CanvasSurface>;

/// [`DrawSurface`] over an `HtmlCanvasElement` and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    logical: (f64, f64),
}

impl CanvasSurface {
    /// `None` when the canvas cannot provide a 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            context,
            logical: (0.0, 0.0),
        })
    }
}

impl DrawSurface for CanvasSurface {
    fn configure(&mut self, dims: &SurfaceDimensions) {
        let (width, height) = dims.backing_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let style = self.canvas.style();
        for (property, value) in [("width", dims.width), ("height", dims.height)] {
            if style.set_property(property, &format!("{value}px")).is_err() {
                warn!(property, value, "canvas rejected css size");
            }
        }

        // Resizing the backing store resets the context, so the scale goes
        // back on every configure.
        let ratio = dims.device_pixel_ratio;
        if self
            .context
            .set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0)
            .is_err()
        {
            warn!(ratio, "canvas rejected device pixel ratio transform");
        }
        self.logical = (dims.width, dims.height);
    }

    fn clear(&mut self) {
        let (width, height) = self.logical;
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn stroke_closed_path(&mut self, points: &[DVec2], stroke: &StrokeStyle) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let ctx = &self.context;
        ctx.set_stroke_style_str(&stroke.color.to_hex());
        ctx.set_line_width(stroke.line_width);
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        ctx.begin_path();
        ctx.move_to(first.x, first.y);
        for p in rest {
            ctx.line_to(p.x, p.y);
        }
        ctx.close_path();
        ctx.stroke();
    }
}

enum HostObserver {
    Intersection(IntersectionObserver),
    Resize(ResizeObserver),
}

/// A browser observer plus the callback it invokes. The callback is dropped
/// only after the observer is disconnected.
struct ObserverSubscription {
    observer: HostObserver,
    _callback: Closure<dyn FnMut(Array)>,
}

impl Subscription for ObserverSubscription {
    fn disconnect(&mut self) {
        match &self.observer {
            HostObserver::Intersection(o) => o.disconnect(),
            HostObserver::Resize(o) => o.disconnect(),
        }
    }
}

/// Runs `event` on the controller if it is still alive, then tells JS a
/// frame may need scheduling.
fn dispatch(
    controller: &Weak<RefCell<Controller>>,
    wake: &Function,
    event: impl FnOnce(&mut Controller),
) {
    let Some(shared) = controller.upgrade() else {
        return;
    };
    match shared.try_borrow_mut() {
        Ok(mut c) => event(&mut c),
        Err(_) => {
            warn!("observer fired while the border was busy; event dropped");
            return;
        }
    }
    if wake.call0(&JsValue::NULL).is_err() {
        warn!("wake callback threw");
    }
}

fn observe_visibility(
    host: &HtmlElement,
    controller: Weak<RefCell<Controller>>,
    wake: Function,
) -> Result<ObserverSubscription, JsValue> {
    let callback = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
        let latest = entries
            .iter()
            .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
            .last();
        if let Some(entry) = latest {
            let visible = entry.is_intersecting();
            dispatch(&controller, &wake, |c| c.on_visibility_changed(visible));
        }
    });
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    observer.observe(host);
    Ok(ObserverSubscription {
        observer: HostObserver::Intersection(observer),
        _callback: callback,
    })
}

fn observe_size(
    host: &HtmlElement,
    controller: Weak<RefCell<Controller>>,
    wake: Function,
) -> Result<ObserverSubscription, JsValue> {
    let target = host.clone();
    let callback = Closure::<dyn FnMut(Array)>::new(move |_entries: Array| {
        let width = f64::from(target.offset_width());
        let height = f64::from(target.offset_height());
        let ratio = web_sys::window().map(|w| w.device_pixel_ratio());
        dispatch(&controller, &wake, |c| {
            if let Some(ratio) = ratio {
                c.set_device_pixel_ratio(ratio);
            }
            c.on_resized(width, height);
        });
    });
    let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
    observer.observe(host);
    Ok(ObserverSubscription {
        observer: HostObserver::Resize(observer),
        _callback: callback,
    })
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// One animated border bound to a canvas.
///
/// Drive it from JavaScript. With `attach`, the border watches its host
/// element itself and `dispose` disconnects those observers:
///
/// ```js
/// const border = new ElectricBorder(canvas, '{"color": "#3b82f6"}');
/// const raf = new Map();
/// const pump = () => {
///   for (const id of border.takeCancelledFrames()) cancelAnimationFrame(raf.get(id));
///   const id = border.pendingFrame();
///   if (id !== undefined && !raf.has(id)) {
///     raf.set(id, requestAnimationFrame((ts) => { raf.delete(id); border.frame(id, ts); pump(); }));
///   }
/// };
/// border.attach(host, pump);
/// // on unmount
/// border.dispose();
/// pump();
/// ```
///
/// Hosts that observe the element themselves call `onVisibilityChanged`,
/// `onResized` and `setDevicePixelRatio` instead of `attach`.
#[wasm_bindgen]
pub struct ElectricBorder {
    inner: Rc<RefCell<Controller>>,
}

impl ElectricBorder {
    fn with_style(canvas: HtmlCanvasElement, style: BorderStyle) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BorderController::new(
                style,
                BorderSettings::default(),
                HostScheduler::new(),
                CanvasSurface::new(canvas),
            ))),
        }
    }
}

#[wasm_bindgen]
impl ElectricBorder {
    /// Creates a border drawing into `canvas`. `style_json` may be empty.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, style_json: &str) -> Result<ElectricBorder, JsValue> {
        let style = parse_style(&BorderStyle::default(), style_json).map_err(js_error)?;
        Ok(Self::with_style(canvas, style))
    }

    /// Creates a border from a named preset.
    #[wasm_bindgen(js_name = fromPreset)]
    pub fn from_preset(canvas: HtmlCanvasElement, preset: &str) -> Result<ElectricBorder, JsValue> {
        let style = BorderStyle::preset(preset).map_err(js_error)?;
        Ok(Self::with_style(canvas, style))
    }

    /// Watches `host` for visibility (10% on screen) and size changes. The
    /// observers belong to the border and are disconnected by `dispose`.
    /// `wake` runs after every observer event so JS can schedule the
    /// pending frame.
    pub fn attach(&mut self, host: HtmlElement, wake: Function) -> Result<(), JsValue> {
        if let Some(window) = web_sys::window() {
            self.inner
                .borrow_mut()
                .set_device_pixel_ratio(window.device_pixel_ratio());
        }
        let visibility = observe_visibility(&host, Rc::downgrade(&self.inner), wake.clone())?;
        let size = match observe_size(&host, Rc::downgrade(&self.inner), wake) {
            Ok(size) => size,
            Err(e) => {
                let mut visibility = visibility;
                visibility.disconnect();
                return Err(e);
            }
        };
        let mut inner = self.inner.borrow_mut();
        inner.observe(Box::new(visibility));
        inner.observe(Box::new(size));
        Ok(())
    }

    /// Host observers currently owned by the border.
    #[wasm_bindgen(js_name = observerCount)]
    pub fn observer_count(&self) -> usize {
        self.inner.borrow().subscription_count()
    }

    #[wasm_bindgen(js_name = onVisibilityChanged)]
    pub fn on_visibility_changed(&mut self, visible: bool) {
        self.inner.borrow_mut().on_visibility_changed(visible);
    }

    /// Host box size in CSS pixels.
    #[wasm_bindgen(js_name = onResized)]
    pub fn on_resized(&mut self, width: f64, height: f64) {
        self.inner.borrow_mut().on_resized(width, height);
    }

    #[wasm_bindgen(js_name = setDevicePixelRatio)]
    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        self.inner.borrow_mut().set_device_pixel_ratio(ratio);
    }

    /// Overlays a JSON style object on the current style.
    #[wasm_bindgen(js_name = setStyle)]
    pub fn set_style(&mut self, style_json: &str) -> Result<(), JsValue> {
        let mut inner = self.inner.borrow_mut();
        let style = parse_style(inner.style(), style_json).map_err(js_error)?;
        inner.set_style(style);
        Ok(())
    }

    /// Overlays flat engine tuning keys (`octaves`, `line_width`, `perimeter`, ...).
    #[wasm_bindgen(js_name = setSettings)]
    pub fn set_settings(&mut self, settings_json: &str) -> Result<(), JsValue> {
        let value: serde_json::Value = serde_json::from_str(settings_json).map_err(js_error)?;
        let mut inner = self.inner.borrow_mut();
        let settings = inner.settings().merged_with(&value);
        inner.set_settings(settings);
        Ok(())
    }

    /// Runs frame `id` at `requestAnimationFrame` time `timestamp`. Returns
    /// whether anything was drawn; stale ids are ignored.
    pub fn frame(&mut self, id: f64, timestamp: f64) -> bool {
        let Some(handle) = handle_from_js(id) else {
            return false;
        };
        self.inner.borrow_mut().on_frame(handle, timestamp).is_some()
    }

    /// Id of the frame JS should schedule, if any.
    #[wasm_bindgen(js_name = pendingFrame)]
    pub fn pending_frame(&self) -> Option<f64> {
        self.inner.borrow().pending_frame().map(|h| h.id() as f64)
    }

    /// Ids cancelled since the last call, for `cancelAnimationFrame`.
    #[wasm_bindgen(js_name = takeCancelledFrames)]
    pub fn take_cancelled_frames(&mut self) -> Vec<f64> {
        self.inner
            .borrow_mut()
            .scheduler_mut()
            .take_cancelled()
            .into_iter()
            .map(|h| h.id() as f64)
            .collect()
    }

    /// `"uninitialized"`, `"idle"`, `"running"` or `"torn_down"`.
    pub fn state(&self) -> String {
        match self.inner.borrow().state() {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Idle => "idle",
            LifecycleState::Running => "running",
            LifecycleState::TornDown => "torn_down",
        }
        .to_string()
    }

    /// Current stroke color as CSS.
    #[wasm_bindgen(js_name = strokeColor)]
    pub fn stroke_color(&self) -> String {
        css_color(self.inner.borrow().style())
    }

    /// Unmounts the border: cancels the pending frame and disconnects the
    /// attached observers. Later calls are no-ops.
    pub fn dispose(&mut self) {
        self.inner.borrow_mut().teardown();
    }
}

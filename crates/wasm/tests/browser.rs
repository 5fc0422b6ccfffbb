#![cfg(target_arch = "wasm32")]

use electric_border_wasm::ElectricBorder;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn mount() -> (HtmlCanvasElement, HtmlElement) {
    let document = web_sys::window().unwrap().document().unwrap();
    let host: HtmlElement = document.create_element("div").unwrap().unchecked_into();
    let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().unchecked_into();
    host.append_child(&canvas).unwrap();
    document.body().unwrap().append_child(&host).unwrap();
    (canvas, host)
}

fn noop() -> js_sys::Function {
    js_sys::Function::new_no_args("")
}

#[wasm_bindgen_test]
fn attach_owns_both_observers_until_dispose() {
    let (canvas, host) = mount();
    let mut border = ElectricBorder::new(canvas, "").unwrap();
    border.attach(host, noop()).unwrap();
    assert_eq!(border.observer_count(), 2);

    border.dispose();
    assert_eq!(border.observer_count(), 0);
    assert_eq!(border.state(), "torn_down");

    border.dispose();
    assert_eq!(border.observer_count(), 0);
}

#[wasm_bindgen_test]
fn attach_after_dispose_keeps_nothing() {
    let (canvas, host) = mount();
    let mut border = ElectricBorder::from_preset(canvas, "card").unwrap();
    border.dispose();
    border.attach(host, noop()).unwrap();
    assert_eq!(border.observer_count(), 0);
}

#[wasm_bindgen_test]
fn manual_resize_still_drives_frames() {
    let (canvas, _host) = mount();
    let mut border = ElectricBorder::new(canvas, r#"{"color": "#22c55e"}"#).unwrap();
    border.on_resized(200.0, 120.0);
    border.on_visibility_changed(true);
    let id = border.pending_frame().unwrap();
    assert!(border.frame(id, 16.0));
    assert_eq!(border.stroke_color(), "#22c55e");
}

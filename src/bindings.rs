//! Plotly and Bootstrap, as loaded by the page's `<script>` tags.

use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = newPlot, catch)]
    pub fn new_plot(target: &Element, data: &JsValue, layout: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = Plotly, js_name = react, catch)]
    pub fn react(target: &Element, data: &JsValue, layout: &JsValue) -> Result<JsValue, JsValue>;

    /// `bootstrap.Toast` instance bound to one element.
    pub type BootstrapToast;

    #[wasm_bindgen(js_namespace = ["bootstrap", "Toast"], js_name = getOrCreateInstance, catch)]
    pub fn get_or_create_toast(element: &Element) -> Result<BootstrapToast, JsValue>;

    #[wasm_bindgen(method, catch)]
    pub fn show(this: &BootstrapToast) -> Result<(), JsValue>;
}

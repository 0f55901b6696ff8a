use hex_hero::{border_color, TooltipLayout, TooltipView};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

/// Hexagon clip used for the thumbnail inside the overlay.
const THUMB_CLIP: &str = "polygon(50% 2%, 98% 26%, 98% 74%, 50% 98%, 2% 74%, 2% 26%)";
/// Backdrop shown behind the thumbnail while it decodes.
const THUMB_BACKDROP: &str = "rgba(0, 180, 180, 0.6)";

/// Rebuild the overlay's children from `view`. Hidden views only toggle display.
pub fn render_content(
    document: &Document,
    el: &HtmlElement,
    view: &TooltipView,
    layout: &TooltipLayout,
) -> Result<(), JsValue> {
    if !view.visible {
        return el.style().set_property("display", "none");
    }

    el.set_inner_html("");
    let body = div(document, Some("p-4"), None)?;

    if let Some(url) = &view.thumbnail_url {
        let size = layout.image_size;
        let wrapper = div(document, Some("mb-2"), None)?;
        let frame = div(
            document,
            None,
            Some(&format!("width: {size}px; height: {size}px; position: relative; margin: 0 auto;")),
        )?;
        let backdrop = div(
            document,
            None,
            Some(&format!("width: 100%; height: 100%; clip-path: {THUMB_CLIP}; background: {THUMB_BACKDROP};")),
        )?;
        let image = div(
            document,
            None,
            Some(&format!(
                "width: 100%; height: 100%; position: absolute; top: 0; left: 0; clip-path: {THUMB_CLIP}; \
                 background-image: url('{}'); background-size: cover; background-position: center;",
                css_url(url)
            )),
        )?;
        frame.append_child(&backdrop)?;
        frame.append_child(&image)?;
        wrapper.append_child(&frame)?;
        body.append_child(&wrapper)?;
    }

    if !view.info.is_empty() {
        let info = div(document, Some("text-sm leading-relaxed"), None)?;
        info.set_text_content(Some(&view.info));
        body.append_child(&info)?;
    }

    el.append_child(&body)?;
    let style = el.style();
    // Same colour as the hovered hexagon's outline.
    style.set_property("border-color", &border_color(view.score).to_css())?;
    style.set_property("display", "block")
}

/// Move the overlay to the view's current position.
pub fn place(el: &HtmlElement, view: &TooltipView) -> Result<(), JsValue> {
    let style = el.style();
    style.set_property("left", &format!("{}px", view.position.x))?;
    style.set_property("top", &format!("{}px", view.position.y))
}

fn div(document: &Document, class: Option<&str>, style: Option<&str>) -> Result<Element, JsValue> {
    let el = document.create_element("div")?;
    if let Some(class) = class {
        el.set_class_name(class);
    }
    if let Some(style) = style {
        el.set_attribute("style", style)?;
    }
    Ok(el)
}

/// Keep a URL from breaking out of a single-quoted CSS `url()`.
fn css_url(url: &str) -> String {
    url.replace('\'', "%27").replace('\\', "%5C").replace(['\n', '\r'], "")
}

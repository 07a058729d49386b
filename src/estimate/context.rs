use wasm_bindgen::JsValue;
use web_sys::js_sys;

/// Browser facts appended to every submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientContext {
    pub page_url: String,
    pub user_agent: String,
    pub language: Option<String>,
    /// Screen width and height in CSS pixels.
    pub screen: Option<(i32, i32)>,
    /// IANA zone name, e.g. "Asia/Seoul".
    pub timezone: Option<String>,
}

impl ClientContext {
    /// Reads the context from the current window. Returns `None` outside a
    /// browser.
    pub fn capture() -> Option<Self> {
        let window = web_sys::window()?;
        let navigator = window.navigator();

        let screen = window
            .screen()
            .ok()
            .and_then(|s| Some((s.width().ok()?, s.height().ok()?)));

        Some(Self {
            page_url: window.location().href().unwrap_or_default(),
            user_agent: navigator.user_agent().unwrap_or_default(),
            language: navigator.language(),
            screen,
            timezone: detect_timezone(),
        })
    }
}

fn detect_timezone() -> Option<String> {
    let format = js_sys::Intl::DateTimeFormat::new(&js_sys::Array::new(), &js_sys::Object::new());
    let options = format.resolved_options();
    js_sys::Reflect::get(&options, &JsValue::from_str("timeZone"))
        .ok()
        .and_then(|tz| tz.as_string())
        .filter(|tz| !tz.is_empty())
}

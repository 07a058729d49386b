use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};
use yew::NodeRef;

use crate::estimate::draft::{Draft, Restore};
use crate::estimate::fields::{FieldAccessor, FieldKind, FieldSnapshot};
use crate::estimate::pipeline::FormSurface;
use crate::estimate::validate::InvalidReason;

const CONTROLS: &str = "input[name], select[name], textarea[name]";

fn set_display(element: &Element, display: &str) {
    if let Some(el) = element.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property("display", display);
    }
}

/// A rendered `<form>` element seen through [`FieldAccessor`].
#[derive(Clone, PartialEq)]
pub struct DomForm {
    form: HtmlFormElement,
}

impl DomForm {
    /// `None` when the form is not mounted on this page.
    pub fn from_ref(node: &NodeRef) -> Option<Self> {
        node.cast::<HtmlFormElement>().map(|form| Self { form })
    }

    pub fn element(&self) -> &HtmlFormElement {
        &self.form
    }

    fn controls(&self) -> Vec<Element> {
        let mut found = Vec::new();
        if let Ok(list) = self.form.query_selector_all(CONTROLS) {
            for i in 0..list.length() {
                if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    found.push(el);
                }
            }
        }
        found
    }

    fn named(&self, name: &str) -> Vec<Element> {
        self.controls()
            .into_iter()
            .filter(|el| el.get_attribute("name").as_deref() == Some(name))
            .collect()
    }

    fn read(el: &Element) -> Option<FieldSnapshot> {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            let kind = FieldKind::from_input_type(&input.type_())?;
            let mut field = FieldSnapshot::new(input.name(), kind, input.value());
            field.required = input.required();
            field.checked = kind.is_choice() && input.checked();
            if kind == FieldKind::File {
                field.file_count = input.files().map(|f| f.length()).unwrap_or(0);
            }
            return Some(field);
        }
        if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            let mut field = FieldSnapshot::new(select.name(), FieldKind::Select, select.value());
            field.required = select.required();
            return Some(field);
        }
        if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            let mut field = FieldSnapshot::new(area.name(), FieldKind::TextArea, area.value());
            field.required = area.required();
            return Some(field);
        }
        None
    }
}

impl FieldAccessor for DomForm {
    fn snapshot(&self) -> Vec<FieldSnapshot> {
        self.controls().iter().filter_map(Self::read).collect()
    }

    fn mark(&self, name: &str, reason: Option<InvalidReason>) {
        for el in self.named(name) {
            let _ = el.class_list().toggle_with_force("invalid", reason.is_some());
            match reason {
                Some(reason) => {
                    let _ = el.set_attribute("aria-invalid", "true");
                    let _ = el.set_attribute("title", reason.hint());
                }
                None => {
                    let _ = el.remove_attribute("aria-invalid");
                    let _ = el.remove_attribute("title");
                }
            }
        }
    }

    fn scroll_to(&self, name: &str) {
        if let Some(el) = self.named(name).into_iter().next() {
            el.scroll_into_view();
            if let Some(el) = el.dyn_ref::<HtmlElement>() {
                let _ = el.focus();
            }
        }
    }

    fn reset(&self) {
        self.form.reset();
        for el in self.controls() {
            let _ = el.class_list().remove_1("invalid");
        }
    }

    fn restore(&self, draft: &Draft) {
        for el in self.controls() {
            let Some(field) = Self::read(&el) else { continue };
            match draft.restore_for(&field) {
                Some(Restore::Value(value)) => {
                    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
                        input.set_value(&value);
                    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
                        select.set_value(&value);
                    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
                        area.set_value(&value);
                    }
                }
                Some(Restore::Checked(checked)) => {
                    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
                        input.set_checked(checked);
                    }
                }
                None => {}
            }
        }
    }
}

/// Submit button, success panel and inline errors around a [`DomForm`].
pub struct DomSurface {
    form: HtmlFormElement,
    submit: Option<HtmlButtonElement>,
    success_panel_id: String,
    success_reset_ms: u32,
}

impl DomSurface {
    pub fn new(form: &DomForm, success_panel_id: &str, success_reset_ms: u32) -> Self {
        let submit = form
            .element()
            .query_selector("button[type=\"submit\"]")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        if submit.is_none() {
            debug!("Estimate form has no submit button");
        }
        Self {
            form: form.element().clone(),
            submit,
            success_panel_id: success_panel_id.to_string(),
            success_reset_ms,
        }
    }

    fn success_panel(&self) -> Option<Element> {
        let by_id = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&self.success_panel_id));
        by_id
            .or_else(|| self.form.next_element_sibling())
            .filter(|el| el.class_list().contains("success-message"))
    }
}

impl FormSurface for DomSurface {
    fn submit_label(&self) -> String {
        self.submit.as_ref().map(|b| b.inner_html()).unwrap_or_default()
    }

    fn set_submit_label(&self, label: &str) {
        if let Some(button) = &self.submit {
            button.set_inner_html(label);
        }
    }

    fn submit_enabled(&self) -> bool {
        self.submit.as_ref().map(|b| !b.disabled()).unwrap_or(true)
    }

    fn set_submit_enabled(&self, enabled: bool) {
        if let Some(button) = &self.submit {
            button.set_disabled(!enabled);
        }
    }

    fn show_success(&self) -> bool {
        let Some(panel) = self.success_panel() else {
            return false;
        };
        set_display(&self.form, "none");
        set_display(&panel, "block");

        let form = self.form.clone();
        Timeout::new(self.success_reset_ms, move || {
            set_display(&form, "block");
            set_display(&panel, "none");
        })
        .forget();
        true
    }

    fn confirm(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn show_error(&self, message: &str, expires_after_ms: u32) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(banner) = document.create_element("div") else {
            return;
        };
        banner.set_class_name("error-message");
        let _ = banner.set_attribute("role", "alert");

        if let Ok(text) = document.create_element("span") {
            text.set_text_content(Some(message));
            let _ = banner.append_child(&text);
        }

        if let Ok(close) = document.create_element("button") {
            let _ = close.set_attribute("type", "button");
            let _ = close.set_attribute("aria-label", "Dismiss");
            close.set_text_content(Some("✕"));
            let target = banner.clone();
            let on_click = Closure::<dyn FnMut()>::new(move || target.remove());
            if let Some(close) = close.dyn_ref::<HtmlElement>() {
                close.set_onclick(Some(on_click.as_ref().unchecked_ref()));
            }
            on_click.forget();
            let _ = banner.append_child(&close);
        }

        let _ = self.form.insert_before(&banner, self.form.first_child().as_ref());

        Timeout::new(expires_after_ms, move || banner.remove()).forget();
    }
}

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlFormElement, HtmlInputElement, HtmlOptionElement,
    HtmlSelectElement, HtmlTextAreaElement, NodeList,
};

use crate::error::{AppError, Result};
use crate::models::FormFields;

pub const ACTIVE_CLASS: &str = "active";
const PAGE_SELECTOR: &str = ".page";
const CARD_SELECTOR: &str = "#dashboard .card";
const DATE_ID: &str = "current-date";

/// The slice of the page markup the router and submitters touch.
pub trait PageDom {
    fn hide_all_sections(&self) -> Result<()>;

    /// Marks the section with this id active. `false` when no such element exists.
    fn activate_section(&self, id: &str) -> Result<bool>;

    fn summary_card_count(&self) -> usize;

    fn set_summary_card(&self, index: usize, text: &str) -> Result<()>;

    /// Writes into the date header. `false` when the page has none.
    fn set_current_date(&self, text: &str) -> bool;

    fn alert(&self, message: &str);
}

pub trait EntryForm {
    fn fields(&self) -> FormFields;
    fn reset(&self);
}

#[derive(Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        WebDom { document }
    }

    pub fn current() -> Option<Self> {
        web_sys::window()
            .and_then(|w| w.document())
            .map(WebDom::new)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn cards(&self) -> Option<NodeList> {
        self.document.query_selector_all(CARD_SELECTOR).ok()
    }
}

fn elements(list: &NodeList) -> impl Iterator<Item = Element> + '_ {
    (0..list.length()).filter_map(move |i| list.item(i).and_then(|n| n.dyn_into::<Element>().ok()))
}

impl PageDom for WebDom {
    fn hide_all_sections(&self) -> Result<()> {
        let pages = self.document.query_selector_all(PAGE_SELECTOR)?;
        for page in elements(&pages) {
            page.class_list().remove_1(ACTIVE_CLASS)?;
        }
        Ok(())
    }

    fn activate_section(&self, id: &str) -> Result<bool> {
        match self.document.get_element_by_id(id) {
            Some(target) => {
                target.class_list().add_1(ACTIVE_CLASS)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn summary_card_count(&self) -> usize {
        self.cards().map(|list| list.length() as usize).unwrap_or(0)
    }

    fn set_summary_card(&self, index: usize, text: &str) -> Result<()> {
        let card = self
            .cards()
            .and_then(|list| list.item(index as u32))
            .and_then(|node| node.dyn_into::<Element>().ok())
            .ok_or_else(|| AppError::MissingElement(format!("{} #{}", CARD_SELECTOR, index)))?;
        card.set_text_content(Some(text));
        Ok(())
    }

    fn set_current_date(&self, text: &str) -> bool {
        match self.document.get_element_by_id(DATE_ID) {
            Some(el) => {
                el.set_text_content(Some(text));
                true
            }
            None => false,
        }
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.alert_with_message(message) {
                log::error!("alert failed: {:?}", err);
            }
        }
    }
}

#[derive(Clone)]
pub struct WebForm {
    form: HtmlFormElement,
}

impl WebForm {
    pub fn find(document: &Document, selector: &str) -> Option<Self> {
        document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
            .map(|form| WebForm { form })
    }

    pub fn element(&self) -> &HtmlFormElement {
        &self.form
    }
}

fn selected_values(select: &HtmlSelectElement) -> Vec<String> {
    let options = select.selected_options();
    (0..options.length())
        .filter_map(|i| options.item(i))
        .filter_map(|el| el.dyn_into::<HtmlOptionElement>().ok())
        .map(|option| option.value())
        .collect()
}

impl EntryForm for WebForm {
    fn fields(&self) -> FormFields {
        let mut fields = FormFields::new();
        let controls = self.form.elements();
        for i in 0..controls.length() {
            let Some(control) = controls.item(i) else {
                continue;
            };

            if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
                if input.name().is_empty() || input.disabled() {
                    continue;
                }
                match input.type_().as_str() {
                    "submit" | "button" | "reset" | "image" | "file" => continue,
                    "checkbox" | "radio" if !input.checked() => continue,
                    _ => fields.push(input.name(), input.value()),
                }
            } else if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
                if select.name().is_empty() || select.disabled() {
                    continue;
                }
                if select.multiple() {
                    fields.push_each(select.name(), selected_values(select));
                } else {
                    fields.push(select.name(), select.value());
                }
            } else if let Some(area) = control.dyn_ref::<HtmlTextAreaElement>() {
                if !area.name().is_empty() && !area.disabled() {
                    fields.push(area.name(), area.value());
                }
            }
        }
        fields
    }

    fn reset(&self) {
        self.form.reset();
    }
}

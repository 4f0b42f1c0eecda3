use std::rc::Rc;

use chrono::Local;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event};

use crate::api::HttpApi;
use crate::dom::{WebDom, WebForm};
use crate::error::{AppError, Result};
use crate::models::EntryKind;
use crate::settings::load_settings;
use crate::tracker::Tracker;
use crate::transactions::{TransactionsPanel, ROOT_ID};

pub type WebTracker = Tracker<WebDom, HttpApi>;

pub fn web_tracker() -> Option<WebTracker> {
    let dom = WebDom::current()?;
    let settings = load_settings();
    Some(Tracker::new(dom, HttpApi::new(settings.clone()), settings))
}

pub fn run() -> Result<()> {
    let tracker = web_tracker().ok_or_else(|| AppError::MissingElement("document".to_string()))?;
    let document = tracker.dom().document().clone();
    let tracker = Rc::new(tracker);

    if document.ready_state() != "loading" {
        start(tracker);
        return Ok(());
    }

    let on_ready = Closure::<dyn FnMut()>::once(move || start(tracker));
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
    Ok(())
}

fn start(tracker: Rc<WebTracker>) {
    {
        let tracker = tracker.clone();
        spawn_local(async move {
            tracker.start_page(Local::now().date_naive()).await;
        });
    }

    for kind in [EntryKind::Income, EntryKind::Expense] {
        match attach_submitter(&tracker, kind) {
            Ok(true) => log::debug!("{} form wired", kind),
            Ok(false) => log::debug!("no {} form on this page", kind),
            Err(err) => log::error!("could not wire {} form: {}", kind, err),
        }
    }

    match attach_navigation(&tracker) {
        Ok(count) => log::debug!("{} navigation links wired", count),
        Err(err) => log::error!("could not wire navigation: {}", err),
    }

    mount_transactions(tracker.dom().document());
}

fn attach_submitter(tracker: &Rc<WebTracker>, kind: EntryKind) -> Result<bool> {
    let Some(form) = WebForm::find(tracker.dom().document(), kind.form_selector()) else {
        return Ok(false);
    };

    let on_submit = {
        let tracker = tracker.clone();
        let form = form.clone();
        Closure::<dyn FnMut(Event)>::new(move |e: Event| {
            e.prevent_default();
            let tracker = tracker.clone();
            let form = form.clone();
            spawn_local(async move {
                if let Err(err) = tracker.submit_entry(kind, &form).await {
                    log::error!("failed to save {}: {}", kind, err);
                }
            });
        })
    };
    form.element()
        .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(true)
}

/// Every `[data-section]` element navigates to the section it names.
fn attach_navigation(tracker: &Rc<WebTracker>) -> Result<usize> {
    let links = tracker.dom().document().query_selector_all("[data-section]")?;
    let mut wired = 0;

    for i in 0..links.length() {
        let Some(link) = links.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(section) = link.get_attribute("data-section") else {
            continue;
        };

        let tracker = tracker.clone();
        let on_click = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
            e.prevent_default();
            let tracker = tracker.clone();
            let section = section.clone();
            spawn_local(async move {
                tracker.show_section(&section).await;
            });
        });
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
        wired += 1;
    }
    Ok(wired)
}

fn mount_transactions(document: &Document) {
    if let Some(root) = document.get_element_by_id(ROOT_ID) {
        yew::Renderer::<TransactionsPanel>::with_root(root).render();
    }
}

/// Lets markup keep calling `showSection('dashboard')` from inline handlers.
#[wasm_bindgen(js_name = showSection)]
pub fn show_section(section_id: String) {
    match web_tracker() {
        Some(tracker) => spawn_local(async move {
            tracker.show_section(&section_id).await;
        }),
        None => log::error!("showSection called without a document"),
    }
}

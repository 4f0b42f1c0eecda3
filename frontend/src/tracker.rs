use chrono::NaiveDate;

use crate::api::FinanceApi;
use crate::dom::{EntryForm, PageDom};
use crate::error::{AppError, Result};
use crate::models::{EntryKind, FormFields, Totals};
use crate::settings::Settings;

pub const HOME: &str = "home";
pub const DASHBOARD: &str = "dashboard";
const SUMMARY_CARDS: usize = 3;

pub struct Tracker<D, A> {
    dom: D,
    api: A,
    settings: Settings,
}

/// What the page knows about an entry right after the server accepted it.
#[derive(Debug, PartialEq)]
pub struct EntryDraft {
    pub amount: Option<f64>,
    pub category: Option<String>,
}

impl EntryDraft {
    pub fn from_fields(fields: &FormFields) -> Self {
        EntryDraft {
            amount: fields.get("amount").and_then(|a| a.trim().parse().ok()),
            category: fields.get("category").map(str::to_string),
        }
    }
}

/// `Monday, March 3, 2025`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

impl<D: PageDom, A: FinanceApi> Tracker<D, A> {
    pub fn new(dom: D, api: A, settings: Settings) -> Self {
        Tracker { dom, api, settings }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Shows exactly one section. Navigating to the dashboard refreshes the
    /// totals first; a failed refresh is logged and leaves the cards as they were.
    pub async fn show_section(&self, section_id: &str) {
        if let Err(err) = self.dom.hide_all_sections() {
            log::error!("could not hide sections: {}", err);
        }

        if section_id == DASHBOARD {
            if let Err(err) = self.refresh_totals().await {
                log::error!("failed to fetch totals: {}", err);
            }
        }

        match self.dom.activate_section(section_id) {
            Ok(true) => log::debug!("showing section {}", section_id),
            Ok(false) => log::warn!("no section with id {:?}", section_id),
            Err(err) => log::error!("could not show section {:?}: {}", section_id, err),
        }
    }

    pub async fn refresh_totals(&self) -> Result<Totals> {
        let totals = self.api.fetch_totals().await?;
        self.render_totals(&totals)?;
        Ok(totals)
    }

    pub fn render_totals(&self, totals: &Totals) -> Result<()> {
        let found = self.dom.summary_card_count();
        if found < SUMMARY_CARDS {
            return Err(AppError::MissingElement(format!(
                "expected {} summary cards, found {}",
                SUMMARY_CARDS, found
            )));
        }

        for (index, (label, figure)) in totals.labelled().into_iter().enumerate() {
            let text = format!("{}: {}", label, self.settings.money(figure));
            self.dom.set_summary_card(index, &text)?;
        }
        Ok(())
    }

    /// One submission attempt: exactly one alert, and on success one trip to the
    /// dashboard followed by a form reset. Failures keep the form and the section.
    pub async fn submit_entry<F: EntryForm>(&self, kind: EntryKind, form: &F) -> Result<()> {
        let fields = form.fields();

        if let Err(err) = self.api.submit_entry(kind, &fields).await {
            self.dom.alert(kind.failed_message());
            return Err(err);
        }

        note_saved_entry(kind, &fields);
        self.show_section(DASHBOARD).await;
        self.dom.alert(kind.saved_message());
        form.reset();
        Ok(())
    }

    pub async fn start_page(&self, today: NaiveDate) {
        self.show_section(HOME).await;

        if !self.dom.set_current_date(&format_long_date(today)) {
            log::debug!("page has no date header");
        }
    }
}

// Cards are never patched locally; the dashboard re-fetch is the source of truth.
fn note_saved_entry(kind: EntryKind, fields: &FormFields) {
    let draft = EntryDraft::from_fields(fields);
    log::debug!("{} saved: {:?}", kind, draft);
}

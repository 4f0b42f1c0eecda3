//! In-memory stand-ins for the page and the server.

use std::cell::{Cell, RefCell};

use crate::api::FinanceApi;
use crate::dom::{EntryForm, PageDom};
use crate::error::{AppError, Result};
use crate::models::{EntryKind, FormFields, Totals, TransactionFilter, TransactionRecord};

pub struct FakeDom {
    sections: RefCell<Vec<(String, bool)>>,
    cards: RefCell<Vec<String>>,
    date: RefCell<Option<String>>,
    has_date_header: bool,
    alerts: RefCell<Vec<String>>,
}

impl FakeDom {
    /// Home, dashboard and both entry forms, three zeroed cards, no date header.
    pub fn standard() -> Self {
        let sections = ["home", "dashboard", "addIncome", "addExpense"]
            .iter()
            .map(|id| (id.to_string(), false))
            .collect();
        FakeDom {
            sections: RefCell::new(sections),
            cards: RefCell::new(vec![
                "Income: $0".to_string(),
                "Expenses: $0".to_string(),
                "Remaining: $0".to_string(),
            ]),
            date: RefCell::new(None),
            has_date_header: false,
            alerts: RefCell::new(Vec::new()),
        }
    }

    pub fn with_cards(self, count: usize) -> Self {
        self.cards.borrow_mut().truncate(count);
        self
    }

    pub fn with_date_header(mut self) -> Self {
        self.has_date_header = true;
        self
    }

    pub fn active_sections(&self) -> Vec<String> {
        self.sections
            .borrow()
            .iter()
            .filter(|(_, active)| *active)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn card_texts(&self) -> Vec<String> {
        self.cards.borrow().clone()
    }

    pub fn date_text(&self) -> Option<String> {
        self.date.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl PageDom for FakeDom {
    fn hide_all_sections(&self) -> Result<()> {
        for (_, active) in self.sections.borrow_mut().iter_mut() {
            *active = false;
        }
        Ok(())
    }

    fn activate_section(&self, id: &str) -> Result<bool> {
        let mut sections = self.sections.borrow_mut();
        match sections.iter_mut().find(|(section, _)| section == id) {
            Some((_, active)) => {
                *active = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn summary_card_count(&self) -> usize {
        self.cards.borrow().len()
    }

    fn set_summary_card(&self, index: usize, text: &str) -> Result<()> {
        let mut cards = self.cards.borrow_mut();
        let card = cards
            .get_mut(index)
            .ok_or_else(|| AppError::MissingElement(format!("card {}", index)))?;
        *card = text.to_string();
        Ok(())
    }

    fn set_current_date(&self, text: &str) -> bool {
        if self.has_date_header {
            *self.date.borrow_mut() = Some(text.to_string());
        }
        self.has_date_header
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

#[derive(Clone)]
pub enum Reply<T> {
    Ok(T),
    Status(u16),
    NetworkDown,
}

impl<T: Clone> Reply<T> {
    fn resolve(&self) -> Result<T> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Status(status) => Err(AppError::Status {
                status: *status,
                status_text: "Scripted".to_string(),
            }),
            Reply::NetworkDown => Err(gloo_net::Error::GlooError("connection refused".to_string()).into()),
        }
    }
}

pub struct FakeApi {
    totals: Reply<Totals>,
    submit: Reply<()>,
    transactions: Vec<TransactionRecord>,
    totals_calls: Cell<usize>,
    submissions: RefCell<Vec<(EntryKind, FormFields)>>,
    filters: RefCell<Vec<TransactionFilter>>,
}

impl FakeApi {
    pub fn new() -> Self {
        FakeApi {
            totals: Reply::Ok(Totals::from_records(&[])),
            submit: Reply::Status(500),
            transactions: Vec::new(),
            totals_calls: Cell::new(0),
            submissions: RefCell::new(Vec::new()),
            filters: RefCell::new(Vec::new()),
        }
    }

    pub fn with_totals(mut self, reply: Reply<Totals>) -> Self {
        self.totals = reply;
        self
    }

    pub fn with_submit(mut self, reply: Reply<()>) -> Self {
        self.submit = reply;
        self
    }

    pub fn with_transactions(mut self, records: Vec<TransactionRecord>) -> Self {
        self.transactions = records;
        self
    }

    pub fn totals_calls(&self) -> usize {
        self.totals_calls.get()
    }

    pub fn submissions(&self) -> Vec<(EntryKind, FormFields)> {
        self.submissions.borrow().clone()
    }

    pub fn filters(&self) -> Vec<TransactionFilter> {
        self.filters.borrow().clone()
    }
}

impl FinanceApi for FakeApi {
    async fn fetch_totals(&self) -> Result<Totals> {
        self.totals_calls.set(self.totals_calls.get() + 1);
        self.totals.resolve()
    }

    async fn submit_entry(&self, kind: EntryKind, fields: &FormFields) -> Result<()> {
        self.submissions.borrow_mut().push((kind, fields.clone()));
        self.submit.resolve()
    }

    async fn fetch_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionRecord>> {
        self.filters.borrow_mut().push(filter.clone());
        Ok(self
            .transactions
            .iter()
            .filter(|r| filter.kind.map_or(true, |kind| r.kind == kind))
            .filter(|r| filter.category.is_empty() || r.category == filter.category)
            .cloned()
            .collect())
    }
}

pub struct FakeForm {
    fields: RefCell<FormFields>,
}

impl FakeForm {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        FakeForm {
            fields: RefCell::new(pairs.iter().copied().collect()),
        }
    }

    pub fn current(&self) -> FormFields {
        self.fields.borrow().clone()
    }
}

impl EntryForm for FakeForm {
    fn fields(&self) -> FormFields {
        self.fields.borrow().clone()
    }

    fn reset(&self) {
        *self.fields.borrow_mut() = FormFields::new();
    }
}

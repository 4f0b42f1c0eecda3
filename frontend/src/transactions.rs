use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api::{FinanceApi, HttpApi};
use crate::error::Result;
use crate::models::{distinct_categories, EntryKind, Totals, TransactionFilter, TransactionRecord};
use crate::settings::load_settings;

pub const ROOT_ID: &str = "transactions-root";

#[derive(Clone, Debug, PartialEq)]
pub struct TransactionView {
    pub records: Vec<TransactionRecord>,
    /// Computed over `records`, so it always matches the active filter.
    pub totals: Totals,
}

pub async fn load_transactions<A: FinanceApi>(
    api: &A,
    filter: &TransactionFilter,
) -> Result<TransactionView> {
    let records = api.fetch_transactions(filter).await?;
    let totals = Totals::from_records(&records);
    Ok(TransactionView { records, totals })
}

/// Counts loads started by the panel. Only the newest one may touch the view.
#[derive(Clone, Debug, Default)]
pub struct LoadGenerations(Rc<Cell<u64>>);

impl LoadGenerations {
    pub fn begin(&self) -> u64 {
        let generation = self.0.get() + 1;
        self.0.set(generation);
        generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.0.get() == generation
    }
}

/// `None` when a newer load began while this one was in flight.
pub async fn load_latest<A: FinanceApi>(
    api: &A,
    filter: &TransactionFilter,
    generations: &LoadGenerations,
    generation: u64,
) -> Option<Result<TransactionView>> {
    let loaded = load_transactions(api, filter).await;
    generations.is_current(generation).then_some(loaded)
}

fn event_value(e: &Event) -> String {
    e.target_dyn_into::<HtmlInputElement>()
        .map(|input| input.value())
        .or_else(|| e.target_dyn_into::<HtmlSelectElement>().map(|select| select.value()))
        .unwrap_or_default()
}

#[function_component(TransactionsPanel)]
pub fn transactions_panel() -> Html {
    let settings = use_state(load_settings);
    let filter = use_state(TransactionFilter::default);
    let view = use_state(|| None::<TransactionView>);
    let categories = use_state(Vec::<String>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let generations = use_state(LoadGenerations::default);

    {
        let generations = (*generations).clone();
        let settings = (*settings).clone();
        let view = view.clone();
        let categories = categories.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_effect_with_deps(
            move |filter: &TransactionFilter| {
                let filter = filter.clone();
                let generation = generations.begin();
                loading.set(true);

                let in_flight = generations.clone();
                spawn_local(async move {
                    let api = HttpApi::new(settings);
                    match load_latest(&api, &filter, &in_flight, generation).await {
                        None => {
                            log::debug!("dropping stale transactions load #{}", generation);
                            return;
                        }
                        Some(Ok(loaded)) => {
                            if filter.is_empty() {
                                categories.set(distinct_categories(&loaded.records));
                            }
                            error.set(None);
                            view.set(Some(loaded));
                        }
                        Some(Err(err)) => {
                            log::error!("failed to load transactions: {}", err);
                            error.set(Some("Could not load transactions.".to_string()));
                        }
                    }
                    loading.set(false);
                });

                move || {
                    generations.begin();
                }
            },
            (*filter).clone(),
        );
    }

    let update = |apply: fn(&mut TransactionFilter, String)| {
        let filter = filter.clone();
        Callback::from(move |e: Event| {
            let mut next = (*filter).clone();
            apply(&mut next, event_value(&e));
            filter.set(next);
        })
    };
    let on_type = update(|f, v| f.kind = EntryKind::parse(&v));
    let on_category = update(|f, v| f.category = v);
    let on_start = update(|f, v| f.start_date = v);
    let on_end = update(|f, v| f.end_date = v);

    let on_reset = {
        let filter = filter.clone();
        Callback::from(move |_| filter.set(TransactionFilter::default()))
    };

    let body = match &*view {
        None if *loading => html! { <p class="muted">{"Loading transactions..."}</p> },
        None => html! {},
        Some(current) if current.records.is_empty() => html! {
            <p class="muted">{"No transactions match these filters."}</p>
        },
        Some(current) => html! {
            <>
                <div class="summary">
                    { for current.totals.labelled().into_iter().map(|(label, figure)| html! {
                        <div class="card">{ format!("{}: {}", label, settings.money(figure)) }</div>
                    }) }
                </div>
                <table class="transactions-table">
                    <thead>
                        <tr>
                            <th>{"Date"}</th>
                            <th>{"Type"}</th>
                            <th>{"Category"}</th>
                            <th>{"Description"}</th>
                            <th>{"Amount"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for current.records.iter().map(|tx| html! {
                            <tr key={tx.id.to_string()} class={tx.kind.as_str()}>
                                <td>{ tx.day() }</td>
                                <td>{ tx.kind.as_str() }</td>
                                <td>{ tx.category.clone() }</td>
                                <td>{ tx.description.clone().unwrap_or_default() }</td>
                                <td>{ settings.money(format!("{:.2}", tx.amount)) }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </>
        },
    };

    html! {
        <section class="transactions">
            <form class="filters" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
                <select name="type" onchange={on_type}>
                    <option value="" selected={filter.kind.is_none()}>{"All types"}</option>
                    <option value="income" selected={filter.kind == Some(EntryKind::Income)}>{"Income"}</option>
                    <option value="expense" selected={filter.kind == Some(EntryKind::Expense)}>{"Expense"}</option>
                </select>
                <select name="category" onchange={on_category}>
                    <option value="" selected={filter.category.is_empty()}>{"All categories"}</option>
                    { for categories.iter().map(|c| html! {
                        <option value={c.clone()} selected={*c == filter.category}>{ c.clone() }</option>
                    }) }
                </select>
                <input type="date" name="start_date" value={filter.start_date.clone()} onchange={on_start} />
                <input type="date" name="end_date" value={filter.end_date.clone()} onchange={on_end} />
                <button type="button" onclick={on_reset}>{"Reset"}</button>
            </form>

            if let Some(msg) = &*error {
                <p class="error">{ msg.clone() }</p>
            }

            { body }
        </section>
    }
}

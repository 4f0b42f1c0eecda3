use gloo_net::http::{Request, Response};
use web_sys::{RequestCredentials, UrlSearchParams};

use crate::error::{AppError, Result};
use crate::models::{EntryKind, FormFields, Totals, TransactionFilter, TransactionRecord};
use crate::settings::Settings;

/// Server calls the page depends on. All of them carry same-origin credentials.
#[allow(async_fn_in_trait)]
pub trait FinanceApi {
    async fn fetch_totals(&self) -> Result<Totals>;

    async fn submit_entry(&self, kind: EntryKind, fields: &FormFields) -> Result<()>;

    async fn fetch_transactions(&self, filter: &TransactionFilter)
        -> Result<Vec<TransactionRecord>>;
}

#[derive(Clone, Debug)]
pub struct HttpApi {
    settings: Settings,
}

impl HttpApi {
    pub fn new(settings: Settings) -> Self {
        HttpApi { settings }
    }
}

fn ensure_ok(resp: Response) -> Result<Response> {
    if resp.ok() {
        Ok(resp)
    } else {
        Err(AppError::Status {
            status: resp.status(),
            status_text: resp.status_text(),
        })
    }
}

impl FinanceApi for HttpApi {
    async fn fetch_totals(&self) -> Result<Totals> {
        let url = self.settings.url("/api/totals");
        let resp = Request::get(&url)
            .credentials(RequestCredentials::SameOrigin)
            .send()
            .await?;
        let totals = ensure_ok(resp)?.json::<Totals>().await?;
        Ok(totals)
    }

    async fn submit_entry(&self, kind: EntryKind, fields: &FormFields) -> Result<()> {
        let url = self.settings.url(kind.endpoint());
        let params = UrlSearchParams::new()?;
        for (name, value) in fields.iter() {
            params.append(name, value);
        }

        let resp = Request::post(&url)
            .credentials(RequestCredentials::SameOrigin)
            .body(params)?
            .send()
            .await?;
        ensure_ok(resp)?;
        Ok(())
    }

    async fn fetch_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionRecord>> {
        let url = self.settings.url("/api/transactions");
        let pairs = filter.query_pairs();
        let resp = Request::get(&url)
            .query(pairs.iter().map(|(key, value)| (*key, value.as_str())))
            .credentials(RequestCredentials::SameOrigin)
            .send()
            .await?;
        let list = ensure_ok(resp)?.json::<Vec<TransactionRecord>>().await?;
        Ok(list)
    }
}

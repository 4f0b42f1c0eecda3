use serde::Deserialize;
use std::fmt;

/// A single aggregate figure as the server sends it: a JSON number or a string.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Figure {
    Number(f64),
    Text(String),
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Figure::Number(n) => write!(f, "{}", n),
            Figure::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Figure {
    fn from(value: f64) -> Self {
        Figure::Number(value)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Totals {
    pub total_income: Figure,
    pub total_expenses: Figure,
    pub remaining: Figure,
}

impl Totals {
    /// Aggregates a list of records the same way the server does for `/api/totals`.
    pub fn from_records(records: &[TransactionRecord]) -> Self {
        let sum = |kind: EntryKind| -> f64 {
            records
                .iter()
                .filter(|r| r.kind == kind)
                .map(|r| r.amount)
                .sum()
        };
        let income = sum(EntryKind::Income);
        let expenses = sum(EntryKind::Expense);
        Totals {
            total_income: income.into(),
            total_expenses: expenses.into(),
            remaining: (income - expenses).into(),
        }
    }

    pub fn labelled(&self) -> [(&'static str, &Figure); 3] {
        [
            ("Income", &self.total_income),
            ("Expenses", &self.total_expenses),
            ("Remaining", &self.remaining),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            EntryKind::Income => "/income",
            EntryKind::Expense => "/expense",
        }
    }

    pub fn form_selector(self) -> &'static str {
        match self {
            EntryKind::Income => "#addIncome form",
            EntryKind::Expense => "#addExpense form",
        }
    }

    pub fn saved_message(self) -> &'static str {
        match self {
            EntryKind::Income => "✅ Income saved!",
            EntryKind::Expense => "✅ Expense saved!",
        }
    }

    pub fn failed_message(self) -> &'static str {
        match self {
            EntryKind::Income => "❌ There was a problem saving your income.",
            EntryKind::Expense => "❌ There was a problem saving your expense.",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(EntryKind::Income),
            "expense" => Some(EntryKind::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name/value pairs captured from a form at submit time, in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new() -> Self {
        FormFields(Vec::new())
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// One pair per value, the way a multi-select submits.
    pub fn push_each(&mut self, name: impl Into<String>, values: impl IntoIterator<Item = String>) {
        let name = name.into();
        for value in values {
            self.0.push((name.clone(), value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FormFields(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TransactionRecord {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: String,
}

impl TransactionRecord {
    /// `YYYY-MM-DD` part of the ISO timestamp.
    pub fn day(&self) -> &str {
        self.date.get(..10).unwrap_or(&self.date)
    }
}

/// Query for `/api/transactions`. Empty fields are not sent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionFilter {
    pub kind: Option<EntryKind>,
    pub category: String,
    pub start_date: String,
    pub end_date: String,
}

impl TransactionFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(kind) = self.kind {
            pairs.push(("type", kind.as_str().to_string()));
        }
        for (key, value) in [
            ("category", &self.category),
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
        ] {
            let value = value.trim();
            if !value.is_empty() {
                pairs.push((key, value.to_string()));
            }
        }
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

pub fn distinct_categories(records: &[TransactionRecord]) -> Vec<String> {
    let mut categories: Vec<String> = records.iter().map(|r| r.category.clone()).collect();
    categories.sort();
    categories.dedup();
    categories
}

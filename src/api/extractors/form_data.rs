//! URL-encoded form extractor that keeps every submitted value.

use std::collections::BTreeMap;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Form,
};

use crate::errors::AppError;
use domain::FormFields;

/// Submitted form fields, grouped by name in submission order.
///
/// Missing fields read as empty strings through [`FormFields`]; a field
/// sent more than once is read by its first value.
///
/// ```rust,ignore
/// async fn submit(FormData(form): FormData) {
///     let login = form.field("login");
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData(pub FormValues);

/// Field name to every value submitted under it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, Vec<String>>);

impl FormValues {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in pairs {
            values.entry(name).or_default().push(value);
        }
        Self(values)
    }

    /// All values, for pages that echo the submission back.
    pub fn all(&self) -> &BTreeMap<String, Vec<String>> {
        &self.0
    }

    pub fn into_all(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }

    /// First value of each field, as a form redisplay expects.
    pub fn first_values(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .filter_map(|(name, values)| values.first().map(|v| (name.clone(), v.clone())))
            .collect()
    }
}

impl FormFields for FormValues {
    fn field(&self, name: &str) -> &str {
        self.0
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        Ok(FormData(FormValues::from_pairs(pairs)))
    }
}

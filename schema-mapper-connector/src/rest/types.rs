//! Request bodies for the mapping service endpoints.

use serde::Serialize;

use crate::types::TableChange;

/// Environment reference carried by every request.
#[derive(Debug, Serialize)]
pub(crate) struct EnvRef<'a> {
    pub dbname: &'a str,
}

/// Table reference for the field endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct SobjectRef<'a> {
    pub sobject: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CatalogRequest<'a> {
    pub db: EnvRef<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FieldsRequest<'a> {
    pub db: EnvRef<'a>,
    pub sobject: SobjectRef<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SaveRequest<'a> {
    pub db: EnvRef<'a>,
    pub changes: &'a [TableChange],
}

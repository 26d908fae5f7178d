//! Per-kind entry point for queries

use super::queryset::Queryset;
use super::transport::{EntityFactory, Transport};
use crate::error::{Error, Result};
use crate::model::{Model, ModelMeta};
use crate::pagination::{PageSource, Paginator};
use crate::types::{JsonObject, JsonValue, StringMap};
use std::sync::Arc;
use tracing::debug;

/// Builds querysets and performs single-object operations for one kind
pub struct Manager<E> {
    meta: Arc<ModelMeta>,
    transport: Arc<dyn Transport>,
    factory: Arc<dyn EntityFactory<E>>,
    paginator: Paginator,
}

impl Manager<Model> {
    /// Manager producing `Model` instances of `meta`
    pub fn for_model(meta: Arc<ModelMeta>, transport: Arc<dyn Transport>) -> Result<Self> {
        let bound = meta.clone();
        Self::new(meta, transport, move |record: &JsonValue| {
            Model::from_record(bound.clone(), record)
        })
    }
}

impl<E> Manager<E> {
    /// Create a manager with a custom entity factory
    pub fn new(
        meta: Arc<ModelMeta>,
        transport: Arc<dyn Transport>,
        factory: impl EntityFactory<E> + 'static,
    ) -> Result<Self> {
        meta.validate()?;
        let paginator = Paginator::for_config(&meta.pagination)?;
        Ok(Self {
            meta,
            transport,
            factory: Arc::new(factory),
            paginator,
        })
    }

    /// Descriptor of the managed kind
    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    /// Transport used for every request
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Queryset over the whole collection
    pub fn all(&self) -> Queryset<E> {
        let source = PageSource::new(
            self.transport.clone(),
            self.meta.base_url(),
            self.meta.pagination.strategy(),
        );
        Queryset::new(
            self.meta.name.clone(),
            source,
            self.paginator.clone(),
            self.factory.clone(),
        )
    }

    /// The explicit empty queryset
    pub fn none(&self) -> Queryset<E> {
        self.all().none()
    }

    /// Queryset restricted by query parameters
    pub fn filter<K, V>(&self, params: impl IntoIterator<Item = (K, V)>) -> Queryset<E>
    where
        K: Into<String>,
        V: Into<String>,
    {
        params
            .into_iter()
            .fold(self.all(), |qs, (key, value)| qs.filter(key, value))
    }

    /// Fetch one instance by slug from its detail URL
    pub async fn get(&self, slug: &str) -> Result<E> {
        let url = self.meta.url_for(&[slug])?;
        debug!(model = %self.meta.name, %url, "Fetching instance");
        match self.transport.get(&url, &StringMap::new()).await {
            Ok(record) => Ok(self.factory.materialize(&record)),
            Err(e) if e.is_not_found() => Err(Error::does_not_exist(self.meta.name.clone())),
            Err(e) => Err(e),
        }
    }

    /// The single instance matching `params`
    pub async fn get_by<K, V>(&self, params: impl IntoIterator<Item = (K, V)>) -> Result<E>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut qs = self.filter(params);
        match qs.len().await? {
            0 => Err(Error::does_not_exist(self.meta.name.clone())),
            1 => qs.get(0).await,
            count => Err(Error::MultipleObjectsReturned {
                model: self.meta.name.clone(),
                count,
            }),
        }
    }

    /// Create an instance on the server and return it as stored
    pub async fn create(&self, fields: JsonObject) -> Result<E> {
        let url = self.meta.base_url();
        debug!(model = %self.meta.name, %url, "Creating instance");
        let record = self
            .transport
            .post(&url, &JsonValue::Object(fields))
            .await?;
        Ok(self.factory.materialize(&record))
    }
}

impl<E> std::fmt::Debug for Manager<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("meta", &self.meta)
            .field("paginator", &self.paginator)
            .finish_non_exhaustive()
    }
}

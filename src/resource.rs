use crate::client::Client;
use crate::error::Result;
use crate::http::ApiRequest;
use crate::pagination::{Pagination, PaginationResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::marker::PhantomData;

/// One page of a list endpoint. `pagination` is `None` when the endpoint did
/// not send pagination headers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<PaginationResponse>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.pagination.is_some_and(|p| p.has_next())
    }

    /// Request for the following page, if there is one.
    pub fn next(&self) -> Option<Pagination> {
        self.pagination.and_then(|p| p.next_request())
    }
}

/// List/find/delete over one entity type rooted at a fixed path.
pub struct Resource<'a, T> {
    client: &'a Client,
    root: &'static str,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T> Resource<'a, T> {
    pub(crate) fn new(client: &'a Client, root: &'static str) -> Self {
        Self {
            client,
            root,
            _entity: PhantomData,
        }
    }

    pub fn root(&self) -> &'static str {
        self.root
    }

    pub(crate) fn client(&self) -> &'a Client {
        self.client
    }

    fn item_path(&self, id: impl Display) -> String {
        format!("{}/{}", self.root, id)
    }
}

impl<T: DeserializeOwned> Resource<'_, T> {
    /// `GET <root>`
    pub async fn list(&self, pagination: Option<&Pagination>) -> Result<Page<T>> {
        self.list_at(self.root, pagination).await
    }

    /// `GET <path>` decoded as a page of this resource.
    pub async fn list_at(&self, path: &str, pagination: Option<&Pagination>) -> Result<Page<T>> {
        self.client
            .fetch_page(ApiRequest::get(path).paginate(pagination))
            .await
    }

    /// `GET <parent>/<parent_id>/<root>`
    pub async fn list_under(
        &self,
        parent: &str,
        parent_id: impl Display,
        pagination: Option<&Pagination>,
    ) -> Result<Page<T>> {
        let path = format!("{}/{}/{}", parent, parent_id, self.root);
        self.list_at(&path, pagination).await
    }

    /// `GET <root>/<id>`
    pub async fn find(&self, id: impl Display) -> Result<T> {
        self.client.fetch(ApiRequest::get(self.item_path(id))).await
    }

    /// `DELETE <root>/<id>`
    pub async fn delete(&self, id: impl Display) -> Result<T> {
        self.client
            .fetch(ApiRequest::delete(self.item_path(id)))
            .await
    }
}

//! Class catalog operations.

use reqwest::Method;

use maktab_core::errors::ApiResult;
use maktab_models::classes::{ClassWithDetails, CreateClassRequest, UpdateClassRequest};
use maktab_models::ids::ClassId;

use crate::client::{ApiClient, with_json, with_query};

impl ApiClient {
    /// Lists classes, optionally narrowed to those accepting a child of
    /// `age`. The filter is applied server-side.
    pub async fn list_classes(&self, age: Option<u8>) -> ApiResult<Vec<ClassWithDetails>> {
        match age {
            Some(age) => {
                self.request(Method::GET, "/classes", with_query([("age", age)]))
                    .await
            }
            None => self.request(Method::GET, "/classes", |builder| builder).await,
        }
    }

    pub async fn get_class(&self, id: &ClassId) -> ApiResult<ClassWithDetails> {
        self.request(Method::GET, &format!("/classes/{id}"), |builder| builder)
            .await
    }

    pub async fn create_class(&self, request: &CreateClassRequest) -> ApiResult<ClassWithDetails> {
        Self::reject_invalid(request)?;
        self.request(Method::POST, "/classes", with_json(request))
            .await
    }

    pub async fn update_class(
        &self,
        id: &ClassId,
        request: &UpdateClassRequest,
    ) -> ApiResult<ClassWithDetails> {
        Self::reject_invalid(request)?;
        self.request(Method::PUT, &format!("/classes/{id}"), with_json(request))
            .await
    }

    pub async fn delete_class(&self, id: &ClassId) -> ApiResult<()> {
        self.request_unit(Method::DELETE, &format!("/classes/{id}"), |builder| builder)
            .await
    }
}

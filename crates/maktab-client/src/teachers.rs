//! Teacher operations.

use reqwest::Method;

use maktab_core::errors::ApiResult;
use maktab_models::ids::TeacherId;
use maktab_models::teachers::{CreateTeacherRequest, Teacher, UpdateTeacherRequest};

use crate::client::{ApiClient, with_json};

impl ApiClient {
    pub async fn list_teachers(&self) -> ApiResult<Vec<Teacher>> {
        self.request(Method::GET, "/teachers", |builder| builder)
            .await
    }

    pub async fn get_teacher(&self, id: &TeacherId) -> ApiResult<Teacher> {
        self.request(Method::GET, &format!("/teachers/{id}"), |builder| builder)
            .await
    }

    pub async fn create_teacher(&self, request: &CreateTeacherRequest) -> ApiResult<Teacher> {
        Self::reject_invalid(request)?;
        self.request(Method::POST, "/teachers", with_json(request))
            .await
    }

    pub async fn update_teacher(
        &self,
        id: &TeacherId,
        request: &UpdateTeacherRequest,
    ) -> ApiResult<Teacher> {
        Self::reject_invalid(request)?;
        self.request(Method::PUT, &format!("/teachers/{id}"), with_json(request))
            .await
    }

    pub async fn delete_teacher(&self, id: &TeacherId) -> ApiResult<()> {
        self.request_unit(Method::DELETE, &format!("/teachers/{id}"), |builder| builder)
            .await
    }
}

//! Registration operations.

use reqwest::Method;

use maktab_core::errors::ApiResult;
use maktab_core::pagination::Paginated;
use maktab_models::ids::{ClassId, StudentId};
use maktab_models::registrations::{
    ClassAssignmentRequest, RegistrationForm, RegistrationQuery, RegistrationReceipt,
    RegistrationRow, RegistrationStatus, StatusUpdateRequest,
};

use crate::client::{ApiClient, with_json, with_query};

impl ApiClient {
    /// Submits a public registration, returning the issued receipt.
    pub async fn create_registration(
        &self,
        form: &RegistrationForm,
    ) -> ApiResult<RegistrationReceipt> {
        Self::reject_invalid(form)?;
        self.request(Method::POST, "/registrations", with_json(form))
            .await
    }

    /// Lists registration rows with the backend's pagination block.
    ///
    /// Rows are returned as-is, joined relations possibly missing; callers
    /// parse them at their own boundary.
    pub async fn list_registrations(
        &self,
        query: &RegistrationQuery,
    ) -> ApiResult<Paginated<RegistrationRow>> {
        self.request_paginated(Method::GET, "/registrations", with_query(query))
            .await
    }

    pub async fn get_registration(&self, id: &StudentId) -> ApiResult<RegistrationRow> {
        self.request(Method::GET, &format!("/registrations/{id}"), |builder| {
            builder
        })
        .await
    }

    pub async fn update_registration_status(
        &self,
        id: &StudentId,
        status: RegistrationStatus,
    ) -> ApiResult<()> {
        self.request_unit(
            Method::PATCH,
            &format!("/registrations/{id}/status"),
            with_json(&StatusUpdateRequest { status }),
        )
        .await
    }

    /// Assigns the registration to a class, or clears the assignment when
    /// `class_id` is `None`.
    pub async fn update_registration_class(
        &self,
        id: &StudentId,
        class_id: Option<ClassId>,
    ) -> ApiResult<()> {
        self.request_unit(
            Method::PATCH,
            &format!("/registrations/{id}/class"),
            with_json(&ClassAssignmentRequest { class_id }),
        )
        .await
    }
}

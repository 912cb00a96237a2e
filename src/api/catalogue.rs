//! Domain endpoint catalogue
//!
//! Thin, mechanical mappings from typed domain operations onto the five
//! primitive verbs. The one multi-step orchestration is
//! [`LmsClient::delete_section`].

use super::LmsClient;
use crate::error::Result;
use crate::resources::{
    Account, Course, CourseListParams, CoursePayload, Enrollment, EnrollmentPayload,
    GradingStandard, Section, SectionPayload,
};
use crate::types::{CourseRef, Id, SectionRef, UserRef};
use futures::future;
use serde_json::Value;

impl LmsClient {
    // ========================================================================
    // Accounts
    // ========================================================================

    /// List the root accounts visible to the calling user
    pub async fn root_accounts(&self) -> Result<Vec<Account>> {
        self.getall("/accounts", &[]).await
    }

    /// The first visible root account, if any
    pub async fn root_account(&self) -> Result<Option<Account>> {
        let accounts = self.root_accounts().await?;
        Ok(accounts.into_iter().next())
    }

    /// List all sub-accounts beneath an account, recursively
    pub async fn sub_accounts(&self, account_id: Id) -> Result<Vec<Account>> {
        self.getall(
            &format!("/accounts/{account_id}/sub_accounts"),
            &[("recursive", "true")],
        )
        .await
    }

    // ========================================================================
    // Courses
    // ========================================================================

    /// List a user's courses; `UserRef::Current` lists the calling user's
    pub async fn user_courses(&self, user: &UserRef) -> Result<Vec<Course>> {
        self.getall(&format!("/users/{user}/courses"), &[]).await
    }

    /// List a user's courses by SIS user identifier
    pub async fn user_courses_by_sis(&self, sis_id: &str) -> Result<Vec<Course>> {
        self.user_courses(&UserRef::sis(sis_id)).await
    }

    /// Fetch a single course
    pub async fn course(&self, course_id: Id) -> Result<Course> {
        self.get(&format!("/courses/{course_id}"), &[]).await
    }

    /// List an account's courses; the account defaults to the root account
    ///
    /// Returns an empty list when no account is given and none is visible.
    pub async fn courses(
        &self,
        account_id: Option<Id>,
        params: &CourseListParams,
    ) -> Result<Vec<Course>> {
        let account_id = match account_id {
            Some(id) => id,
            None => match self.root_account().await? {
                Some(account) => account.id,
                None => return Ok(Vec::new()),
            },
        };

        let query = params.to_query();
        let query: Vec<(&str, &str)> = query
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        self.getall(&format!("/accounts/{account_id}/courses"), &query)
            .await
    }

    /// Create a course under an account
    ///
    /// Fills in the client's default course time zone when the payload
    /// leaves it unset.
    pub async fn create_course(&self, account_id: Id, mut payload: CoursePayload) -> Result<Course> {
        if payload.course.time_zone.is_none() {
            payload.course.time_zone = Some(self.default_course_time_zone().to_string());
        }
        self.post(&format!("/accounts/{account_id}/courses"), &payload)
            .await
    }

    // ========================================================================
    // Grading Standards
    // ========================================================================

    /// List an account's grading standards; defaults to the root account
    pub async fn grading_standards(&self, account_id: Option<Id>) -> Result<Vec<GradingStandard>> {
        let account_id = match account_id {
            Some(id) => id,
            None => match self.root_account().await? {
                Some(account) => account.id,
                None => return Ok(Vec::new()),
            },
        };
        self.getall(&format!("/accounts/{account_id}/grading_standards"), &[])
            .await
    }

    // ========================================================================
    // Sections
    // ========================================================================

    /// List a course's sections
    pub async fn course_sections(&self, course_id: Id) -> Result<Vec<Section>> {
        self.getall(&format!("/courses/{course_id}/sections"), &[])
            .await
    }

    /// List the sections of several courses concurrently, flattened
    pub async fn course_sections_batched(&self, course_ids: &[Id]) -> Result<Vec<Section>> {
        let batches =
            future::try_join_all(course_ids.iter().map(|id| self.course_sections(*id))).await?;
        Ok(batches.into_iter().flatten().collect())
    }

    /// Fetch a single section
    pub async fn section(&self, section: &SectionRef) -> Result<Section> {
        self.get(&format!("/sections/{section}"), &[]).await
    }

    /// Fetch a single section by SIS identifier
    pub async fn section_by_sis(&self, sis_id: &str) -> Result<Section> {
        self.section(&SectionRef::sis(sis_id)).await
    }

    /// Create a section in a course
    pub async fn create_section(&self, course_id: Id, payload: &SectionPayload) -> Result<Section> {
        self.post(&format!("/courses/{course_id}/sections"), payload)
            .await
    }

    /// Create several sections in a course concurrently
    pub async fn create_sections(
        &self,
        course_id: Id,
        payloads: &[SectionPayload],
    ) -> Result<Vec<Section>> {
        future::try_join_all(
            payloads
                .iter()
                .map(|payload| self.create_section(course_id, payload)),
        )
        .await
    }

    /// Delete a section after draining it
    ///
    /// Fetches the section's enrollments, deactivates all of them
    /// concurrently, voids the SIS binding, then deletes the section.
    /// Stages run strictly in that order; any failure aborts the remaining
    /// stages.
    pub async fn delete_section(&self, section: &SectionRef) -> Result<()> {
        let enrollments = self.section_enrollments(section).await?;
        future::try_join_all(
            enrollments
                .iter()
                .map(|enrollment| self.deactivate_enrollment(enrollment)),
        )
        .await?;
        self.remove_sis_from_section(section).await?;
        let _: Value = self.delete(&format!("/sections/{section}"), &[]).await?;
        Ok(())
    }

    /// Delete a section by SIS identifier
    pub async fn delete_section_by_sis(&self, sis_id: &str) -> Result<()> {
        self.delete_section(&SectionRef::sis(sis_id)).await
    }

    /// Overwrite a section's SIS binding with an explicit null
    pub async fn remove_sis_from_section(&self, section: &SectionRef) -> Result<()> {
        let _: Value = self
            .put(
                &format!("/sections/{section}"),
                &SectionPayload::void_sis_section_id(),
            )
            .await?;
        Ok(())
    }

    /// Void a section's SIS binding by SIS identifier
    pub async fn remove_sis_from_section_by_sis(&self, sis_id: &str) -> Result<()> {
        self.remove_sis_from_section(&SectionRef::sis(sis_id)).await
    }

    /// Void several sections' SIS bindings concurrently
    pub async fn remove_sis_from_sections_by_sis(&self, sis_ids: &[&str]) -> Result<()> {
        future::try_join_all(
            sis_ids
                .iter()
                .map(|sis_id| self.remove_sis_from_section_by_sis(sis_id)),
        )
        .await?;
        Ok(())
    }

    /// Whether a section exists; a pure probe that never fails
    pub async fn section_exists(&self, section: &SectionRef) -> bool {
        self.head(&format!("/sections/{section}")).await
    }

    /// Probe several sections concurrently, in input order
    pub async fn sections_exist(&self, sections: &[SectionRef]) -> Vec<bool> {
        future::join_all(sections.iter().map(|section| self.section_exists(section))).await
    }

    /// Whether a section exists, by SIS identifier
    pub async fn section_exists_by_sis(&self, sis_id: &str) -> bool {
        self.section_exists(&SectionRef::sis(sis_id)).await
    }

    /// Probe several sections by SIS identifier concurrently, in input order
    pub async fn sections_exist_by_sis(&self, sis_ids: &[&str]) -> Vec<bool> {
        future::join_all(
            sis_ids
                .iter()
                .map(|sis_id| self.section_exists_by_sis(sis_id)),
        )
        .await
    }

    // ========================================================================
    // Enrollments
    // ========================================================================

    /// List a course's enrollments
    pub async fn course_enrollments(&self, course: &CourseRef) -> Result<Vec<Enrollment>> {
        self.getall(&format!("/courses/{course}/enrollments"), &[])
            .await
    }

    /// List a section's enrollments
    pub async fn section_enrollments(&self, section: &SectionRef) -> Result<Vec<Enrollment>> {
        self.getall(&format!("/sections/{section}/enrollments"), &[])
            .await
    }

    /// List a section's enrollments by SIS identifier
    pub async fn section_enrollments_by_sis(&self, sis_id: &str) -> Result<Vec<Enrollment>> {
        self.section_enrollments(&SectionRef::sis(sis_id)).await
    }

    /// Enroll a user in a course
    pub async fn create_enrollment(
        &self,
        course_id: Id,
        payload: &EnrollmentPayload,
    ) -> Result<Enrollment> {
        self.post(&format!("/courses/{course_id}/enrollments"), payload)
            .await
    }

    /// Deactivate an enrollment within its section
    pub async fn deactivate_enrollment(&self, enrollment: &Enrollment) -> Result<Enrollment> {
        self.delete(
            &format!(
                "/courses/{}/enrollments/{}",
                enrollment.course_id, enrollment.id
            ),
            &[("task", "deactivate")],
        )
        .await
    }
}

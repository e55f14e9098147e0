//! Post-signup onboarding wizard
//!
//! Resume → Background → Community → Done. Only the background step writes
//! more than one resource, and it writes them concurrently.

use std::sync::Arc;

use futures::future::join_all;
use once_cell::sync::Lazy;
use regex::Regex;
use talentfolio_common::{FieldValidator, RangeValidator};
use talentfolio_domain::constants::{
    CGPA_MAX, CGPA_MIN, DEFAULT_WHATSAPP_LINK, IIT_PATTERN, IIT_WHATSAPP_LINK, ROUTE_PROFILE,
};
use talentfolio_domain::utils::normalize_country;
use talentfolio_domain::{
    ApiEnvelope, CreateEducationPayload, CreateWorkPayload, EducationItem, PortalError, Result,
    Upload, WorkCategory, WorkEnd, WorkItem, YearMonth,
};
use tracing::{info, instrument, warn};

use crate::profile::ProfileStore;
use crate::session::Navigator;
use crate::user::UserGateway;

static IIT_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(IIT_PATTERN).ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    Resume,
    Background,
    Community,
    Done,
}

/// Education row as typed into the wizard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EducationDraft {
    pub college: String,
    pub degree: String,
    pub major: String,
    /// Raw grade input, parsed on submit
    pub cgpa: String,
    pub start_date: Option<YearMonth>,
    pub graduation_date: Option<YearMonth>,
}

/// Experience row as typed into the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceDraft {
    pub category: WorkCategory,
    pub name: String,
    pub role: String,
    pub city: String,
    /// Country name or ISO code
    pub country: String,
    pub description: String,
    pub start_date: Option<YearMonth>,
    pub end_date: Option<YearMonth>,
    /// "Current role" checkbox
    pub current: bool,
}

impl Default for ExperienceDraft {
    fn default() -> Self {
        Self {
            category: WorkCategory::Work,
            name: String::new(),
            role: String::new(),
            city: String::new(),
            country: String::new(),
            description: String::new(),
            start_date: None,
            end_date: None,
            current: false,
        }
    }
}

impl ExperienceDraft {
    /// Untouched rows are dropped rather than rejected.
    pub fn is_blank(&self) -> bool {
        [&self.name, &self.role, &self.city, &self.country, &self.description]
            .iter()
            .all(|s| s.trim().is_empty())
            && self.start_date.is_none()
            && self.end_date.is_none()
            && !self.current
    }

    pub fn end(&self) -> Option<WorkEnd> {
        if self.current {
            Some(WorkEnd::Ongoing)
        } else {
            self.end_date.map(WorkEnd::Ended)
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parse an optional CGPA, `Err` when present but not a 0-10 number.
fn parse_cgpa(raw: &str) -> std::result::Result<Option<f64>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value: f64 = raw.parse().map_err(drop)?;
    let in_range = RangeValidator::new(CGPA_MIN, CGPA_MAX).validate(&value).is_ok();
    if value.is_finite() && in_range {
        Ok(Some(value))
    } else {
        Err(())
    }
}

fn invalid(message: String) -> PortalError {
    PortalError::Validation(message)
}

fn education_item(draft: &EducationDraft, index: usize) -> Result<EducationItem> {
    let n = index + 1;
    let college = non_blank(&draft.college)
        .ok_or_else(|| invalid(format!("Please fill in College/University for education {n}.")))?;
    let degree = non_blank(&draft.degree)
        .ok_or_else(|| invalid(format!("Please fill in Degree for education {n}.")))?;
    let graduation_date = draft
        .graduation_date
        .ok_or_else(|| invalid(format!("Please select Graduation Date for education {n}.")))?;
    let cgpa = parse_cgpa(&draft.cgpa)
        .map_err(|()| invalid(format!("CGPA must be between 0 and 10 for education {n}.")))?;

    Ok(EducationItem {
        college: Some(college),
        degree: Some(degree),
        major: non_blank(&draft.major),
        cgpa,
        start_date: draft.start_date,
        graduation_date: Some(graduation_date),
        ..EducationItem::default()
    })
}

fn work_item(draft: &ExperienceDraft, index: usize) -> Result<WorkItem> {
    let n = index + 1;
    let name = non_blank(&draft.name)
        .ok_or_else(|| invalid(format!("Please fill in Company Name for experience {n}, or remove it.")))?;
    let start_date = draft
        .start_date
        .ok_or_else(|| invalid(format!("Please select Start Date for experience {n}.")))?;
    let end = draft.end().ok_or_else(|| {
        invalid(format!("Please select End Date for experience {n}, or check \"Current role\"."))
    })?;

    Ok(WorkItem {
        id: None,
        backend_id: None,
        category: draft.category,
        name,
        role: non_blank(&draft.role),
        city: non_blank(&draft.city),
        country: normalize_country(Some(&draft.country)),
        description: draft.description.trim().to_string(),
        start_date,
        end_date: end.to_wire(),
    })
}

/// Request items tagged with the draft row they came from
type Rows<T> = Vec<(usize, T)>;

/// First failure by submission order, after keeping every success.
fn settle<T>(results: Rows<ApiEnvelope<T>>, mut keep: impl FnMut(usize, T)) -> Result<()> {
    let mut first_failure = None;
    for (row, result) in results {
        match result {
            ApiEnvelope::Success(item) => keep(row, item),
            ApiEnvelope::Failure(payload) => {
                first_failure.get_or_insert(payload);
            }
        }
    }
    first_failure.map_or(Ok(()), |payload| Err(PortalError::Api(payload)))
}

pub struct OnboardingWizard {
    users: Arc<dyn UserGateway>,
    store: Arc<ProfileStore>,
    navigator: Arc<dyn Navigator>,
    step: OnboardingStep,
    education: Vec<EducationDraft>,
    experience: Vec<ExperienceDraft>,
    /// Rows already created on the server, parallel to the draft lists
    education_saved: Vec<bool>,
    experience_saved: Vec<bool>,
}

impl OnboardingWizard {
    /// Start at the resume step with one empty education row.
    pub fn new(
        users: Arc<dyn UserGateway>,
        store: Arc<ProfileStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            users,
            store,
            navigator,
            step: OnboardingStep::Resume,
            education: vec![EducationDraft::default()],
            experience: Vec::new(),
            education_saved: vec![false],
            experience_saved: Vec::new(),
        }
    }

    pub const fn step(&self) -> OnboardingStep {
        self.step
    }

    fn expect_step(&self, expected: OnboardingStep) -> Result<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(PortalError::InvalidState(format!(
                "onboarding is at {:?}, not {expected:?}",
                self.step
            )))
        }
    }

    /// Upload the resume and continue to the background step.
    #[instrument(skip(self))]
    pub async fn upload_resume(&mut self, file: Option<Upload>) -> Result<()> {
        self.expect_step(OnboardingStep::Resume)?;
        let file = file.ok_or_else(|| invalid("Please select a PDF file to upload.".to_string()))?;
        if !file.is_pdf() {
            return Err(invalid("Please upload a PDF file.".to_string()));
        }

        let uploaded = self.users.upload_resume(file).await.into_result()?;
        self.store.set_user_resume(Some(uploaded.url));
        self.step = OnboardingStep::Background;
        Ok(())
    }

    pub fn skip_resume(&mut self) -> Result<()> {
        self.expect_step(OnboardingStep::Resume)?;
        self.step = OnboardingStep::Background;
        Ok(())
    }

    pub fn education(&self) -> &[EducationDraft] {
        &self.education
    }

    pub fn education_mut(&mut self, index: usize) -> Option<&mut EducationDraft> {
        self.education.get_mut(index)
    }

    pub fn add_education(&mut self) {
        self.education.push(EducationDraft::default());
        self.education_saved.push(false);
    }

    /// Remove a row. The last remaining row stays.
    pub fn remove_education(&mut self, index: usize) -> bool {
        if self.education.len() <= 1 || index >= self.education.len() {
            return false;
        }
        self.education.remove(index);
        self.education_saved.remove(index);
        true
    }

    pub fn experience(&self) -> &[ExperienceDraft] {
        &self.experience
    }

    pub fn experience_mut(&mut self, index: usize) -> Option<&mut ExperienceDraft> {
        self.experience.get_mut(index)
    }

    pub fn add_experience(&mut self) {
        self.experience.push(ExperienceDraft::default());
        self.experience_saved.push(false);
    }

    pub fn remove_experience(&mut self, index: usize) -> bool {
        if index >= self.experience.len() {
            return false;
        }
        self.experience.remove(index);
        self.experience_saved.remove(index);
        true
    }

    /// Check every row and build the request items.
    ///
    /// Messages number rows from 1 in display order; blank experience rows
    /// are skipped.
    pub fn validate_background(&self) -> Result<(Vec<EducationItem>, Vec<WorkItem>)> {
        let (education, work) = self.background_rows()?;
        Ok((
            education.into_iter().map(|(_, item)| item).collect(),
            work.into_iter().map(|(_, item)| item).collect(),
        ))
    }

    fn background_rows(&self) -> Result<(Rows<EducationItem>, Rows<WorkItem>)> {
        let education = self
            .education
            .iter()
            .enumerate()
            .map(|(i, draft)| education_item(draft, i).map(|item| (i, item)))
            .collect::<Result<Vec<_>>>()?;
        let work = self
            .experience
            .iter()
            .enumerate()
            .filter(|(_, draft)| !draft.is_blank())
            .map(|(i, draft)| work_item(draft, i).map(|item| (i, item)))
            .collect::<Result<Vec<_>>>()?;
        Ok((education, work))
    }

    /// Create every education entry, then every experience entry.
    ///
    /// Each batch is sent concurrently. Created entries land in the store even
    /// when a sibling fails; the wizard advances only when all succeed. Rows
    /// created by an earlier attempt are not sent again.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> Result<()> {
        self.expect_step(OnboardingStep::Background)?;
        let (education, work) = self.background_rows()?;

        let users = &self.users;
        let saved = &self.education_saved;
        let created = join_all(education.into_iter().filter(|(row, _)| !saved[*row]).map(
            |(row, item)| async move {
                (row, users.create_education(&CreateEducationPayload::new(item)).await)
            },
        ))
        .await;
        let store = &self.store;
        let saved = &mut self.education_saved;
        settle(created, |row, item| {
            saved[row] = true;
            store.add_education_local(item);
        })
        .inspect_err(|err| warn!(error = %err, "education create failed"))?;

        let saved = &self.experience_saved;
        let created = join_all(work.into_iter().filter(|(row, _)| !saved[*row]).map(
            |(row, item)| async move {
                (row, users.create_work(&CreateWorkPayload::new(item)).await)
            },
        ))
        .await;
        let saved = &mut self.experience_saved;
        settle(created, |row, item| {
            saved[row] = true;
            store.add_work_local(item);
        })
        .inspect_err(|err| warn!(error = %err, "experience create failed"))?;

        info!("background saved");
        self.step = OnboardingStep::Community;
        Ok(())
    }

    /// WhatsApp invite for the user's community.
    pub fn community_link(&self) -> &'static str {
        let is_iit = IIT_RE.as_ref().is_some_and(|re| {
            self.education.iter().any(|draft| re.is_match(draft.college.trim()))
        });
        if is_iit {
            IIT_WHATSAPP_LINK
        } else {
            DEFAULT_WHATSAPP_LINK
        }
    }

    /// Mark onboarding complete and open the profile.
    pub fn finish(&mut self) -> Result<()> {
        self.expect_step(OnboardingStep::Community)?;
        self.store.set_onboarding_complete();
        self.step = OnboardingStep::Done;
        self.navigator.navigate(ROUTE_PROFILE);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::profile::AuthIdentity;
    use crate::session::RecordingNavigator;
    use crate::testing::FakeUserGateway;

    struct Harness {
        users: Arc<FakeUserGateway>,
        store: Arc<ProfileStore>,
        nav: Arc<RecordingNavigator>,
        wizard: OnboardingWizard,
    }

    fn harness() -> Harness {
        let users = Arc::new(FakeUserGateway::new());
        let store = Arc::new(ProfileStore::new(users.clone()));
        store.set_user_from_auth(AuthIdentity { name: "Ada".into(), email: "a@b.com".into() });
        let nav = Arc::new(RecordingNavigator::at("/onboarding"));
        let wizard = OnboardingWizard::new(users.clone(), Arc::clone(&store), nav.clone());
        Harness { users, store, nav, wizard }
    }

    fn ym(s: &str) -> Option<YearMonth> {
        Some(s.parse().unwrap())
    }

    fn fill_education(wizard: &mut OnboardingWizard, index: usize, college: &str) {
        let row = wizard.education_mut(index).unwrap();
        row.college = college.into();
        row.degree = "B.Tech".into();
        row.graduation_date = ym("2024-05");
    }

    fn education_echo(id: &str, college: &str) -> serde_json::Value {
        json!({"_id": id, "college": college, "degree": "B.Tech", "graduation_date": "2024-05"})
    }

    #[tokio::test]
    async fn resume_requires_pdf() {
        let mut h = harness();
        let err = h.wizard.upload_resume(None).await.unwrap_err();
        assert_eq!(err.to_string(), "Please select a PDF file to upload.");

        let png = Upload::new("me.png", "image/png", vec![1, 2]);
        let err = h.wizard.upload_resume(Some(png)).await.unwrap_err();
        assert_eq!(err.to_string(), "Please upload a PDF file.");
        assert!(h.users.calls().is_empty());
    }

    #[tokio::test]
    async fn resume_upload_updates_store_and_advances() {
        let mut h = harness();
        h.users.respond("upload_resume", json!({"url": "https://cdn/cv.pdf"}));

        h.wizard.upload_resume(Some(Upload::new("cv.PDF", "application/octet-stream", vec![1]))).await.unwrap();

        assert_eq!(h.wizard.step(), OnboardingStep::Background);
        assert_eq!(h.store.user().unwrap().resume.as_deref(), Some("https://cdn/cv.pdf"));
    }

    #[test]
    fn last_education_row_cannot_be_removed() {
        let mut h = harness();
        assert!(!h.wizard.remove_education(0));
        h.wizard.add_education();
        assert!(h.wizard.remove_education(1));
        assert_eq!(h.wizard.education().len(), 1);
    }

    #[test]
    fn validation_messages_are_one_based() {
        let mut h = harness();
        h.wizard.add_education();
        fill_education(&mut h.wizard, 0, "MIT");
        h.wizard.education_mut(1).unwrap().college = "Stanford".into();

        let err = h.wizard.validate_background().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in Degree for education 2.");

        fill_education(&mut h.wizard, 1, "Stanford");
        h.wizard.education_mut(1).unwrap().cgpa = "11".into();
        let err = h.wizard.validate_background().unwrap_err();
        assert_eq!(err.to_string(), "CGPA must be between 0 and 10 for education 2.");
    }

    #[test]
    fn experience_rules_and_blank_rows() {
        let mut h = harness();
        fill_education(&mut h.wizard, 0, "MIT");
        h.wizard.add_experience();
        h.wizard.add_experience();
        {
            let row = h.wizard.experience_mut(1).unwrap();
            row.name = "Acme".into();
            row.start_date = ym("2022-01");
        }

        let err = h.wizard.validate_background().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please select End Date for experience 2, or check \"Current role\"."
        );

        h.wizard.experience_mut(1).unwrap().current = true;
        let (education, work) = h.wizard.validate_background().unwrap();
        assert_eq!(education.len(), 1);
        assert_eq!(work.len(), 1);
        assert_eq!(work[0].end_date, YearMonth::current());
    }

    #[test]
    fn cgpa_parsing() {
        assert_eq!(parse_cgpa(""), Ok(None));
        assert_eq!(parse_cgpa(" 8.5 "), Ok(Some(8.5)));
        assert_eq!(parse_cgpa("10"), Ok(Some(10.0)));
        assert!(parse_cgpa("abc").is_err());
        assert!(parse_cgpa("NaN").is_err());
        assert!(parse_cgpa("-0.5").is_err());
    }

    #[tokio::test]
    async fn submit_creates_all_and_advances() {
        let mut h = harness();
        h.wizard.skip_resume().unwrap();
        fill_education(&mut h.wizard, 0, "IIT Bombay");
        h.wizard.add_experience();
        {
            let row = h.wizard.experience_mut(0).unwrap();
            row.name = "Acme".into();
            row.country = "india".into();
            row.start_date = ym("2022-01");
            row.end_date = ym("2023-01");
        }
        h.users.respond("create_education", education_echo("e1", "IIT Bombay"));
        h.users.respond(
            "create_work",
            json!({"_id": "w1", "category": "WORK", "name": "Acme", "country": "IN",
                   "start_date": "2022-01", "end_date": "2023-01"}),
        );

        h.wizard.submit().await.unwrap();

        assert_eq!(h.wizard.step(), OnboardingStep::Community);
        let sent = &h.users.calls_to("create_work")[0].body;
        assert_eq!(sent["work"]["country"], "IN");
        assert!(sent["work"].get("id").is_none());
        assert_eq!(h.users.calls_to("create_education")[0].body["educations"]["college"], "IIT Bombay");
        let user = h.store.user().unwrap();
        assert_eq!(user.education[0].id.as_deref(), Some("e1"));
        assert_eq!(user.experience[0].id.as_deref(), Some("w1"));
        assert_eq!(h.wizard.community_link(), IIT_WHATSAPP_LINK);
    }

    #[tokio::test(start_paused = true)]
    async fn first_failure_by_order_wins() {
        let mut h = harness();
        h.wizard.skip_resume().unwrap();
        h.wizard.add_education();
        h.wizard.add_education();
        for (i, college) in ["A", "B", "C"].into_iter().enumerate() {
            fill_education(&mut h.wizard, i, college);
        }
        h.users.respond_after("create_education", Duration::from_millis(30), education_echo("e1", "A"));
        h.users.fail_after("create_education", Duration::from_millis(20), "second failed");
        h.users.fail_after("create_education", Duration::from_millis(10), "third failed");

        let err = h.wizard.submit().await.unwrap_err();

        assert_eq!(err.to_string(), "second failed");
        assert_eq!(h.wizard.step(), OnboardingStep::Background);
        assert_eq!(h.store.user().unwrap().education.len(), 1);
        assert!(h.users.calls_to("create_work").is_empty());
    }

    #[tokio::test]
    async fn retry_after_partial_failure_creates_only_missing_rows() {
        let mut h = harness();
        h.wizard.skip_resume().unwrap();
        h.wizard.add_education();
        fill_education(&mut h.wizard, 0, "A");
        fill_education(&mut h.wizard, 1, "B");
        h.users.respond("create_education", education_echo("e1", "A"));
        h.users.fail("create_education", "second failed");

        h.wizard.submit().await.unwrap_err();

        h.users.respond("create_education", education_echo("e2", "B"));
        h.wizard.submit().await.unwrap();

        let calls = h.users.calls_to("create_education");
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[2].body["educations"]["college"], "B");
        let colleges: Vec<_> =
            h.store.user().unwrap().education.into_iter().map(|e| e.college).collect();
        assert_eq!(colleges, vec![Some("A".to_string()), Some("B".to_string())]);
        assert_eq!(h.wizard.step(), OnboardingStep::Community);
    }

    #[tokio::test]
    async fn finish_marks_onboarded_and_opens_profile() {
        let mut h = harness();
        h.wizard.skip_resume().unwrap();
        fill_education(&mut h.wizard, 0, "Some College");
        h.users.respond("create_education", education_echo("e1", "Some College"));
        h.wizard.submit().await.unwrap();
        assert_eq!(h.wizard.community_link(), DEFAULT_WHATSAPP_LINK);

        h.wizard.finish().unwrap();

        assert!(h.store.user().unwrap().is_onboarded);
        assert_eq!(h.nav.last().as_deref(), Some("/profile"));
        assert_eq!(h.wizard.step(), OnboardingStep::Done);
    }

    #[test]
    fn iit_detection_matches_long_form() {
        let mut h = harness();
        h.wizard.education_mut(0).unwrap().college = "Indian Institute of Technology, Delhi".into();
        assert_eq!(h.wizard.community_link(), IIT_WHATSAPP_LINK);
    }
}

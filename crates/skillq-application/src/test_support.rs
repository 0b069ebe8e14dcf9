//! Fakes shared by the application tests.

use async_trait::async_trait;
use skillq_core::image::{EncodedImage, ImageEncoder, ImageFile};
use skillq_core::programmer::{CreateProgrammerRequest, DirectoryClient, Programmer, ProgrammerId};
use skillq_core::{Result, SkillqError};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

pub fn programmer(id: &str, skills: &[&str]) -> Programmer {
    Programmer {
        id: ProgrammerId::new(id),
        name: format!("Programmer {}", id),
        email: format!("{}@example.com", id),
        job_title: "Engineer".to_string(),
        image_url: format!("http://images/{}.png", id),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

/// Service-side skill match: exact, ignoring ASCII case.
pub fn has_skill(programmer: &Programmer, skill: &str) -> bool {
    programmer
        .skills
        .iter()
        .any(|s| s.eq_ignore_ascii_case(skill))
}

/// In-memory stand-in for the remote directory that records every call.
#[derive(Default)]
pub struct InMemoryDirectory {
    programmers: Mutex<Vec<Programmer>>,
    create_calls: Mutex<Vec<CreateProgrammerRequest>>,
    delete_calls: Mutex<Vec<String>>,
    filter_calls: Mutex<Vec<String>>,
    list_calls: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    write_delay: Mutex<Option<Duration>>,
    filter_delays: Mutex<HashMap<String, Duration>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_programmers<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let directory = Self::new();
        *directory.programmers.lock().unwrap() =
            ids.into_iter().map(|id| programmer(id, &[])).collect();
        directory
    }

    pub fn insert(&self, programmer: Programmer) {
        self.programmers.lock().unwrap().push(programmer);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_write_delay(&self, delay: Duration) {
        *self.write_delay.lock().unwrap() = Some(delay);
    }

    pub fn set_filter_delay(&self, skill: &str, delay: Duration) {
        self.filter_delays.lock().unwrap().insert(skill.to_string(), delay);
    }

    pub fn create_calls(&self) -> Vec<CreateProgrammerRequest> {
        self.create_calls.lock().unwrap().clone()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.delete_calls.lock().unwrap().clone()
    }

    pub fn filter_calls(&self) -> Vec<String> {
        self.filter_calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn ids(&self) -> Vec<String> {
        self.programmers
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.id.to_string())
            .collect()
    }

    async fn write_pause(&self) {
        let delay = *self.write_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl DirectoryClient for InMemoryDirectory {
    async fn list_all(&self) -> Result<Vec<Programmer>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(SkillqError::read_failed("list_all", "service unavailable"));
        }
        Ok(self.programmers.lock().unwrap().clone())
    }

    async fn filter_by_skill(&self, skill: &str) -> Result<Vec<Programmer>> {
        self.filter_calls.lock().unwrap().push(skill.to_string());
        let delay = self.filter_delays.lock().unwrap().get(skill).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(SkillqError::read_failed("filter_by_skill", "service unavailable"));
        }
        Ok(self
            .programmers
            .lock()
            .unwrap()
            .iter()
            .filter(|p| has_skill(p, skill))
            .cloned()
            .collect())
    }

    async fn create(&self, request: &CreateProgrammerRequest) -> Result<()> {
        self.create_calls.lock().unwrap().push(request.clone());
        self.write_pause().await;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SkillqError::write_failed("create", "service returned 500"));
        }
        let mut programmers = self.programmers.lock().unwrap();
        let id = format!("created-{}", programmers.len() + 1);
        programmers.push(Programmer {
            id: ProgrammerId::new(id),
            name: request.name.clone(),
            email: request.email.clone(),
            job_title: request.job_title.clone(),
            image_url: request.image.image.clone(),
            skills: request.skills.clone(),
        });
        Ok(())
    }

    async fn delete(&self, id: &ProgrammerId) -> Result<()> {
        self.delete_calls.lock().unwrap().push(id.to_string());
        self.write_pause().await;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SkillqError::write_failed("delete", "service returned 500"));
        }
        self.programmers.lock().unwrap().retain(|p| &p.id != id);
        Ok(())
    }
}

/// Encoder that returns a fixed payload per call, or fails.
#[derive(Default)]
pub struct StubEncoder {
    fail: bool,
    calls: AtomicUsize,
}

impl StubEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The payload this encoder produces for `file`.
    pub fn expected(file: &ImageFile) -> EncodedImage {
        EncodedImage {
            mime_type: "image/png".to_string(),
            data_url: format!("data:image/png;base64,{}", file.path().display()),
        }
    }
}

#[async_trait]
impl ImageEncoder for StubEncoder {
    async fn encode(&self, file: &ImageFile) -> Result<EncodedImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SkillqError::encode_failed(
                file.path().display().to_string(),
                "permission denied",
            ));
        }
        Ok(Self::expected(file))
    }
}

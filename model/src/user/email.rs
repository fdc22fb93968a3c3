use std::collections::HashSet;
use std::sync::Mutex;
use uuid::Uuid;

const MAX_ATTEMPTS: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum EmailGeneratorError {
    #[error("could not produce an unused email after {0} attempts")]
    Exhausted(usize),
    #[error("email registry lock was poisoned")]
    Poisoned,
}

/// Hands out `<prefix>-<uuid>@<domain>` addresses and remembers every one it
/// issued, so no address is produced twice during a run.
#[derive(Debug)]
pub struct EmailGenerator {
    domain: String,
    issued: Mutex<HashSet<String>>,
}

impl EmailGenerator {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            issued: Mutex::new(HashSet::new()),
        }
    }

    pub fn generate(&self, prefix: &str) -> Result<String, EmailGeneratorError> {
        self.generate_with(prefix, Uuid::new_v4)
    }

    fn generate_with(
        &self,
        prefix: &str,
        mut token: impl FnMut() -> Uuid,
    ) -> Result<String, EmailGeneratorError> {
        let mut issued = self
            .issued
            .lock()
            .map_err(|_| EmailGeneratorError::Poisoned)?;

        for _ in 0..MAX_ATTEMPTS {
            let email = format!("{prefix}-{}@{}", token(), self.domain);
            if issued.insert(email.clone()) {
                return Ok(email);
            }
        }

        Err(EmailGeneratorError::Exhausted(MAX_ATTEMPTS))
    }

    pub fn issued_count(&self) -> usize {
        self.issued.lock().map(|issued| issued.len()).unwrap_or(0)
    }
}

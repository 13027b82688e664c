//! URL shortener over the `urls` document.
//!
//! Codes are random draws from a configurable alphabet. A draw is accepted
//! only if the code is not already in the table; after `max_attempts`
//! collisions the operation fails with [`DrillError::CodeSpaceExhausted`],
//! which callers may retry later.
//!
//! Uniqueness is checked against the document as loaded. Two processes
//! shortening at once can still pick the same code (single writer only).

use crate::config::DrillConfig;
use crate::error::{DrillError, Result};
use crate::model::{LinkTable, ShortLink};
use crate::store::DocumentStore;
use rand::Rng;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct CodeGenerator {
    alphabet: Vec<char>,
    length: usize,
    max_attempts: u32,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::from_config(&DrillConfig::default())
    }
}

impl CodeGenerator {
    pub fn new(alphabet: &str, length: usize, max_attempts: u32) -> Result<Self> {
        let config = DrillConfig {
            code_length: length,
            code_alphabet: alphabet.to_string(),
            max_attempts,
        };
        config.validate()?;
        Ok(Self::from_config(&config))
    }

    /// Assumes `config` has been validated.
    pub fn from_config(config: &DrillConfig) -> Self {
        Self {
            alphabet: config.code_alphabet.chars().collect(),
            length: config.code_length,
            max_attempts: config.max_attempts,
        }
    }

    /// Size of the code space, saturating at `u128::MAX`.
    pub fn space(&self) -> u128 {
        (self.alphabet.len() as u128).saturating_pow(self.length as u32)
    }

    pub fn generate<R: Rng>(&self, rng: &mut R) -> String {
        (0..self.length)
            .map(|_| self.alphabet[rng.gen_range(0..self.alphabet.len())])
            .collect()
    }

    /// Draw codes until one is accepted by `is_free`.
    pub fn unique<R, F>(&self, rng: &mut R, mut is_free: F) -> Result<String>
    where
        R: Rng,
        F: FnMut(&str) -> bool,
    {
        for attempt in 1..=self.max_attempts {
            let code = self.generate(rng);
            if is_free(&code) {
                return Ok(code);
            }
            debug!(attempt, code = %code, "short code collision");
        }
        warn!(
            attempts = self.max_attempts,
            space = %self.space(),
            "short code space exhausted"
        );
        Err(DrillError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }
}

pub fn shorten<S: DocumentStore>(
    store: &mut S,
    generator: &CodeGenerator,
    url: &str,
) -> Result<ShortLink> {
    shorten_with(store, generator, &mut rand::thread_rng(), url)
}

/// Same as [`shorten`] with a caller supplied random source.
pub fn shorten_with<S, R>(
    store: &mut S,
    generator: &CodeGenerator,
    rng: &mut R,
    url: &str,
) -> Result<ShortLink>
where
    S: DocumentStore,
    R: Rng,
{
    let mut table: LinkTable = store.open()?;
    let code = generator.unique(rng, |candidate| !table.map.contains_key(candidate))?;

    table.map.insert(code.clone(), url.to_string());
    store.commit(&table)?;

    info!(code = %code, url, "short link created");
    Ok(ShortLink {
        code,
        url: url.to_string(),
    })
}

/// The URL behind `code`, or `None` when no mapping exists.
pub fn redirect<S: DocumentStore>(store: &mut S, code: &str) -> Result<Option<String>> {
    let mut table: LinkTable = store.open()?;
    Ok(table.map.remove(code))
}

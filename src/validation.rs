use anyhow::{anyhow, Result};

/// Validation utilities for input sanitization and edge case handling
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Validate a JID (contact, group, or chat identifier)
    pub fn validate_jid(jid: &str) -> Result<()> {
        if jid.trim().is_empty() {
            return Err(anyhow!("JID cannot be empty"));
        }

        if jid.len() > 255 {
            return Err(anyhow!("JID too long (max 255 characters)"));
        }

        // JIDs look like "12345@s.whatsapp.net" or "12345@g.us"
        if !jid.contains('@') {
            return Err(anyhow!("JID must contain an @ separator"));
        }

        if jid.contains('\0') || jid.contains('\r') || jid.contains('\n') {
            return Err(anyhow!("JID contains invalid characters"));
        }

        Ok(())
    }

    /// Validate a topic keyword
    pub fn validate_keyword(keyword: &str) -> Result<()> {
        if keyword.trim().is_empty() {
            return Err(anyhow!("Keyword cannot be empty"));
        }

        if keyword.len() > 200 {
            return Err(anyhow!("Keyword too long (max 200 characters)"));
        }

        if keyword.contains('\0') || keyword.contains('\r') || keyword.contains('\n') {
            return Err(anyhow!("Keyword contains invalid characters"));
        }

        Ok(())
    }

    /// Warn when an importance weight falls outside the documented 0.0-10.0
    /// convention. The value is accepted either way; the range is advisory.
    pub fn check_importance_range(importance: f64) {
        if !(0.0..=10.0).contains(&importance) {
            tracing::warn!(
                importance,
                "importance is outside the documented 0.0-10.0 range"
            );
        }
    }

    /// Validate a result limit
    pub fn validate_limit(limit: i64) -> Result<()> {
        if limit < 0 {
            return Err(anyhow!("Limit cannot be negative"));
        }

        if limit > 10_000 {
            return Err(anyhow!("Limit too large (max 10,000)"));
        }

        Ok(())
    }

    /// Validate a pagination offset
    pub fn validate_offset(offset: i64) -> Result<()> {
        if offset < 0 {
            return Err(anyhow!("Offset cannot be negative"));
        }

        Ok(())
    }

    /// Validate a recency threshold in days
    pub fn validate_days(days: i64) -> Result<()> {
        if days < 0 {
            return Err(anyhow!("Day threshold cannot be negative"));
        }

        // Anything past 20 years is almost certainly a unit mistake
        if days > 365 * 20 {
            return Err(anyhow!("Day threshold too large (max 7300)"));
        }

        Ok(())
    }

    /// Sanitize free-text input (category, notes)
    #[must_use]
    pub fn sanitize_text(text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Validate database URL
    pub fn validate_database_url(url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(anyhow!("Database URL cannot be empty"));
        }

        if url.len() > 1000 {
            return Err(anyhow!("Database URL too long"));
        }

        Ok(())
    }
}

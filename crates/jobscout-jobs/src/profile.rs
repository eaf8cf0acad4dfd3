//! Profile extraction from résumé text.
//!
//! Asks the generation model for a strict-JSON role + skills summary; if the
//! model is unavailable or answers with something unparseable, falls back to
//! a crude deterministic profile built from the résumé's opening words, so
//! the search path always has something to plan from.

use serde::Deserialize;

use jobscout_core::error::Result;
use jobscout_core::traits::Generator;
use jobscout_core::types::Profile;

/// How much of the résumé is shown to the model.
const CV_EXCERPT_CHARS: usize = 3000;
/// Fallback profile takes this many leading words of the résumé as the role.
const FALLBACK_WORD_LIMIT: usize = 10;
const FALLBACK_ROLE_CHARS: usize = 50;

#[derive(Debug, Deserialize)]
struct WireProfile {
    #[serde(default)]
    role: String,
    #[serde(default)]
    skills: String,
}

/// Extract a search profile from résumé text. Never fails: any extraction
/// problem degrades to the deterministic fallback.
pub async fn extract_profile(generator: &dyn Generator, cv_text: &str) -> Profile {
    match extract_with_llm(generator, cv_text).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!("LLM profile extraction failed, using fallback: {e}");
            fallback_profile(cv_text)
        }
    }
}

async fn extract_with_llm(generator: &dyn Generator, cv_text: &str) -> Result<Profile> {
    let excerpt: String = cv_text.chars().take(CV_EXCERPT_CHARS).collect();
    let prompt = format!(
        "Analyze this resume and extract the key information for finding matching job offers.\n\
         \n\
         Resume:\n\
         {excerpt}\n\
         \n\
         Answer in strict JSON (no markdown):\n\
         {{\n\
         \x20 \"role\": \"target job title (max 50 characters)\",\n\
         \x20 \"skills\": \"2-3 MAIN skills only, comma-separated\"\n\
         }}\n\
         \n\
         Examples:\n\
         - role: \"Python Developer\", \"Data Engineer\", \"IT Project Manager\"\n\
         - skills: \"Python, Machine Learning, Docker\" or \"Java, Spring, SQL\"\n\
         \n\
         Answer ONLY with the JSON, no text before or after."
    );

    let response = generator.generate(&prompt, 0.2, 200).await?;
    let cleaned = strip_code_fences(&response);
    let wire: WireProfile = serde_json::from_str(cleaned)?;

    let skills: Vec<String> = wire
        .skills
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(Profile::new(wire.role.trim(), skills))
}

/// First words of the résumé as the role, no skills.
fn fallback_profile(cv_text: &str) -> Profile {
    let opening: String = cv_text.chars().take(200).collect();
    let role: String = opening
        .split_whitespace()
        .take(FALLBACK_WORD_LIMIT)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(FALLBACK_ROLE_CHARS)
        .collect();
    Profile::new(role, vec![])
}

/// Models often wrap JSON in markdown fences despite instructions.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}

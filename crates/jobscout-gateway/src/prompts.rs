//! Prompt templates for the generation model.
//!
//! The engines only hand the model already-assembled context; the wording
//! lives here so it can evolve without touching retrieval or planning code.

/// Grounded question answering over retrieved document chunks.
pub fn answer_prompt(context: &str, question: &str) -> String {
    format!(
        "You are a helpful assistant answering questions based on the provided context \
         from indexed documents.\n\
         \n\
         Context:\n\
         {context}\n\
         \n\
         Question: {question}\n\
         \n\
         Instructions:\n\
         - Use ONLY information present in the context above\n\
         - Mention every relevant entry from the context, without exception\n\
         - Be concise and precise\n\
         - Do not invent information that is not in the context\n\
         - Format the answer in Markdown: **bold** for important titles, numbered \
         (1., 2., 3.) or bulleted (-) lists, and line breaks for readability\n\
         \n\
         Answer:"
    )
}

/// Short professional summary of a résumé.
pub fn profile_summary_prompt(cv_text: &str) -> String {
    let excerpt: String = cv_text.chars().take(2000).collect();
    format!(
        "Analyze this resume and give a concise summary of the professional profile in \
         at most 2-3 sentences. Identify the key skills, the domain of expertise, and \
         the kind of position sought.\n\
         \n\
         Resume:\n\
         {excerpt}\n\
         \n\
         Profile summary (2-3 sentences maximum):"
    )
}

/// Match analysis between a candidate profile and found offers.
pub fn matching_analysis_prompt(profile_summary: &str, context_blocks: &[String]) -> String {
    let context = context_blocks.join("\n\n");
    format!(
        "You are a recruitment advisor. Analyze the match between this candidate profile \
         and the job offers found.\n\
         \n\
         Candidate profile:\n\
         {profile_summary}\n\
         \n\
         Available job offers (top {count}):\n\
         {context}\n\
         \n\
         Provide a detailed analysis in Markdown with:\n\
         1. **Overall match**: rate the profile's compatibility with the offers (2-3 sentences)\n\
         2. **Recommended offers**: list the best offers, each with:\n\
         \x20  - Title and company\n\
         \x20  - Why this offer matches the profile (1-2 sentences)\n\
         \x20  - Strengths of the application\n\
         3. **Advice**: 2-3 recommendations to improve the applications\n\
         \n\
         Analysis:",
        count = context_blocks.len(),
    )
}

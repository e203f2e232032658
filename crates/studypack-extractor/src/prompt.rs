//! Prompt for study element extraction

use crate::config::ExtractorConfig;
use studypack_llm::CompletionRequest;

/// Fixed instruction sent ahead of every chunk
pub const EXTRACTION_INSTRUCTIONS: &str = "From the following study material, extract and categorize the key information. \
Provide the output as a JSON object with the following keys:\n\
'terms': A list of important terms found (e.g., ['Term1', 'Term2']).\n\
'definitions': A list of definitions, explicitly linking to a term if possible (e.g., ['Term1: Definition of Term1', 'Definition of concept']).\n\
'examples': A list of specific examples related to concepts (e.g., ['Example 1 description', 'Example 2 description']).\n\
'questions': A list of questions (from quizzes, practice problems, etc.) as plain strings (e.g., ['What is X?', 'How does Y work?']).\n\
'answers': A list of answers corresponding to the questions, as plain strings. If an answer is not explicitly given, state 'Not provided' (e.g., ['Answer to Q1', 'Not provided']).\n\n\
If a category is not found, its list should be empty. Output ONLY the JSON object. \
Be extremely concise and extract only the most critical information to minimize output size. \
Ensure ALL list items are plain strings, not nested objects or complex structures. Prioritize conciseness.";

/// Build the single user message for one chunk
pub fn build_prompt(chunk: &str) -> String {
    let mut prompt = String::with_capacity(EXTRACTION_INSTRUCTIONS.len() + chunk.len() + 12);
    prompt.push_str(EXTRACTION_INSTRUCTIONS);
    prompt.push_str("\n\nMaterial:\n");
    prompt.push_str(chunk);
    prompt
}

/// Build the JSON-mode completion request for one chunk
pub fn build_request(config: &ExtractorConfig, chunk: &str) -> CompletionRequest {
    CompletionRequest::json(&config.model, build_prompt(chunk))
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens)
}

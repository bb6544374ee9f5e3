//! Prompt builder for expense extraction
//!
//! Renders the single instruction prompt sent to the chat backend. Pure and
//! deterministic: the same message always produces the same bytes.

use crate::category::ExpenseCategory;

/// Build the extraction prompt for one user message.
pub fn extraction_prompt(message: &str) -> String {
    format!(
        r#"You are an AI assistant specialized in analyzing messages to determine if they represent expenses and extracting relevant information.

Your task is to analyze the following message and determine:
1. Is this message describing an expense? (not greetings, questions, or random chat)
2. If yes, extract: description, amount, and category

Valid categories: {categories}

Rules:
- Only mark as expense if there's a clear description and amount
- Ignore greetings like "hi", "hello", "bom dia", "oi", etc.
- Ignore questions or commands
- Amount should be a positive number
- If currency is mentioned (reais, R$, dollars, $), extract just the number
- Choose the most appropriate category from the list above
- If unclear, use "Other" as category

Message to analyze: {message}

Respond with a JSON object with these fields:
- "is_expense": boolean, whether the message describes an expense
- "description": string or null, short expense description
- "amount": number or null, positive amount with at most 2 decimals
- "category": string or null, one of the valid categories

Return valid JSON only, no additional text."#,
        categories = ExpenseCategory::prompt_list(),
        message = message,
    )
}

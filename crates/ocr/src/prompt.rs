/// Build the transaction-extraction prompt handed to a language model along
/// with the processed receipt text.
pub fn build_extraction_prompt(processed_text: &str) -> String {
    format!(
        r#"
Please analyze this receipt/payment text extracted via OCR and extract transaction information in JSON format.

{processed_text}

Extract the following information:
- description: ONLY if clearly identifiable from the text (e.g., specific item names, service descriptions). If unclear or generic, leave as null or empty string.
- amount: Total amount (number only, no currency symbols)
- merchant: Store/business name or payment app (PayLah, GrabPay, etc.)
- category: Expense category (Food & Dining, Transportation, Shopping, Transfer, etc.)
- date: Transaction date if visible (YYYY-MM-DD format)
- payment_method: Payment method used (Cash, Card, PayLah, GrabPay, etc.)

IMPORTANT: Do NOT generate generic descriptions like "Receipt transaction" or "Purchase". Only include a description if you can identify specific items or services from the receipt text.

Return only valid JSON in this format:
{{
  "description": null,
  "amount": 0.00,
  "merchant": "...",
  "category": "...",
  "date": "...",
  "payment_method": "...",
  "confidence": 0.9
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::clean_receipt_text;

    #[test]
    fn embeds_processed_text_verbatim() {
        let processed = clean_receipt_text("HAWKER CENTRE\nChicken Rice 4.50\nTotal 4.50");
        let prompt = build_extraction_prompt(&processed);
        assert!(prompt.contains(&processed));
        assert!(prompt.contains("YYYY-MM-DD"));
    }

    #[test]
    fn template_braces_are_literal() {
        let prompt = build_extraction_prompt("x");
        let template = &prompt[prompt.find('{').unwrap()..];
        assert!(template.starts_with("{\n  \"description\": null,"));
        assert!(prompt.ends_with("\"confidence\": 0.9\n}"));
    }
}

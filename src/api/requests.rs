use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FieldError;
use crate::models::check_amount;
use crate::services::PostJournalCommand;

/// Body of `POST /journal`.
///
/// Every field is optional here so that a missing field is reported as a
/// validation error rather than an extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostJournalRequest {
    pub date: Option<String>,
    pub debit_name: Option<String>,
    pub credit_name: Option<String>,
    /// JSON number or numeric string.
    pub amount: Option<Value>,
    pub description: Option<String>,
}

impl PostJournalRequest {
    /// Checks every field and builds the posting command.
    pub fn into_command(self) -> Result<PostJournalCommand, Vec<FieldError>> {
        let mut errors = Vec::new();

        let posted_at = match non_empty(self.date.as_deref()) {
            None => {
                errors.push(FieldError::new("date", "date is required"));
                None
            }
            Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(FieldError::new("date", "date must be formatted as YYYY-MM-DD"));
                    None
                }
            },
        };

        let debit_name = non_empty(self.debit_name.as_deref()).map(str::to_string);
        if debit_name.is_none() {
            errors.push(FieldError::new("debit_name", "debit_name is required"));
        }

        let credit_name = non_empty(self.credit_name.as_deref()).map(str::to_string);
        if credit_name.is_none() {
            errors.push(FieldError::new("credit_name", "credit_name is required"));
        }

        let amount = match parse_amount(self.amount.as_ref()) {
            Ok(amount) => Some(amount),
            Err(message) => {
                errors.push(FieldError::new("amount", message));
                None
            }
        };

        let description = non_empty(self.description.as_deref()).map(str::to_string);

        match (posted_at, debit_name, credit_name, amount) {
            (Some(posted_at), Some(debit_account_name), Some(credit_account_name), Some(amount))
                if errors.is_empty() =>
            {
                Ok(PostJournalCommand {
                    posted_at,
                    debit_account_name,
                    credit_account_name,
                    amount,
                    description,
                })
            }
            _ => Err(errors),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parses an amount exactly. Accepts plain and scientific notation, rejects
/// anything that is not a finite number greater than zero.
pub fn parse_amount(value: Option<&Value>) -> Result<Decimal, String> {
    let text = match value {
        None | Some(Value::Null) => return Err("amount is required".to_string()),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => match non_empty(Some(s.as_str())) {
            Some(s) => s.to_string(),
            None => return Err("amount is required".to_string()),
        },
        Some(_) => return Err("amount must be a number".to_string()),
    };

    // Decimal's parser would take `1_000` as a digit-grouped number.
    if text.contains('_') {
        return Err(format!("amount '{}' is not a valid number", text));
    }

    let amount = Decimal::from_str_exact(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| format!("amount '{}' is not a valid number", text))?;

    if amount <= Decimal::ZERO {
        return Err("amount must be greater than zero".to_string());
    }
    check_amount(amount).map_err(|e| e.to_string())?;

    Ok(amount.normalize())
}
